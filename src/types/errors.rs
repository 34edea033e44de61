//! Tipos de erro do Sentir.

use thiserror::Error;

/// Tipo de resultado padrão do Sentir.
pub type SentirResult<T> = Result<T, SentirError>;

/// Erros possíveis no Sentir.
#[derive(Error, Debug)]
pub enum SentirError {
    #[error("Erro de configuração: {0}")]
    Config(String),

    #[error("Erro de IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("Erro ao parsear TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Erro ao serializar TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Erro de JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "cli")]
    #[error("Erro de interação: {0}")]
    Dialog(#[from] dialoguer::Error),

    #[error("Entrada inválida: {0}")]
    Validation(String),

    #[error("Cache indisponível: {0}")]
    CacheUnavailable(String),

    #[error("Classificador '{0}' falhou: {1}")]
    ClassifierFailed(String, String),

    #[error("Timeout ao classificar com '{0}'")]
    ClassifierTimeout(String),

    #[error("Modelo '{0}' não carregado")]
    ModelNotLoaded(String),

    #[error("Erro no servidor HTTP: {0}")]
    Server(String),

    #[error("Configuração não encontrada em: {0}")]
    ConfigNotFound(String),

    #[error("{0}")]
    Other(String),
}

impl SentirError {
    /// Cria um erro genérico.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Self::Other(msg.into())
    }

    /// Cria um erro de configuração.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Cria um erro de validação de entrada.
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Self::Validation(msg.into())
    }

    /// Cria um erro de cache a partir de qualquer causa.
    pub fn cache<S: Into<String>>(msg: S) -> Self {
        Self::CacheUnavailable(msg.into())
    }

    /// Indica se o erro é recuperável por degradação (cache fora do ar).
    pub fn is_cache_degradation(&self) -> bool {
        matches!(self, Self::CacheUnavailable(_))
    }

    /// Código estável do erro, usado nos corpos de resposta da API.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::ModelNotLoaded(_) => "model_unavailable",
            Self::ClassifierFailed(..) | Self::ClassifierTimeout(_) => "classifier",
            Self::CacheUnavailable(_) => "cache_unavailable",
            _ => "internal",
        }
    }

    /// Mensagem voltada ao corpo de resposta. Falhas do classificador
    /// viram uma mensagem genérica para não vazar detalhe interno.
    pub fn wire_message(&self) -> String {
        match self {
            Self::Validation(msg) => msg.clone(),
            Self::ModelNotLoaded(_) => "model not loaded".to_string(),
            Self::ClassifierTimeout(_) => "classification timed out".to_string(),
            Self::ClassifierFailed(..) => "prediction failed".to_string(),
            other => other.to_string(),
        }
    }
}
