//! Tipos de resposta do Sentir.

use serde::{Deserialize, Serialize};

/// Polaridade de um sentimento.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Label {
    /// Sentimento positivo.
    Positive,
    /// Sentimento negativo.
    Negative,
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Label::Positive => write!(f, "POSITIVE"),
            Label::Negative => write!(f, "NEGATIVE"),
        }
    }
}

/// Saída bruta de um classificador.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Classification {
    /// Polaridade atribuída.
    pub label: Label,

    /// Confiança em [0, 1].
    pub score: f64,
}

impl Classification {
    /// Cria uma classificação com o score arredondado para 4 casas,
    /// garantindo valores idênticos entre chamadas repetidas.
    pub fn new(label: Label, score: f64) -> Self {
        Self {
            label,
            score: round_score(score),
        }
    }
}

/// Arredonda um score para 4 casas decimais.
pub fn round_score(score: f64) -> f64 {
    (score * 10_000.0).round() / 10_000.0
}

/// Resultado de uma predição individual.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    /// Texto original da requisição.
    pub text: String,

    /// Polaridade atribuída.
    pub label: Label,

    /// Confiança em [0, 1], arredondada para 4 casas.
    pub score: f64,

    /// Se o resultado veio do cache.
    pub cached: bool,

    /// Latência da predição em milissegundos.
    pub latency_ms: f64,
}

impl Prediction {
    /// Resultado recém-computado pelo classificador.
    pub fn fresh(text: impl Into<String>, classification: Classification, latency_ms: f64) -> Self {
        Self {
            text: text.into(),
            label: classification.label,
            score: classification.score,
            cached: false,
            latency_ms,
        }
    }

    /// Resultado servido a partir do cache.
    pub fn from_cache(
        text: impl Into<String>,
        classification: Classification,
        latency_ms: f64,
    ) -> Self {
        Self {
            text: text.into(),
            label: classification.label,
            score: classification.score,
            cached: true,
            latency_ms,
        }
    }
}

/// Corpo de erro servido na API e em itens de lote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Código estável, legível por máquina.
    pub error: String,

    /// Mensagem legível por humanos.
    pub message: String,
}

impl ErrorInfo {
    /// Cria um corpo de erro.
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

/// Falha de um item individual dentro de um lote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionError {
    /// Texto original do item.
    pub text: String,

    /// Causa da falha.
    pub error: ErrorInfo,
}

/// Slot de resultado de lote: sucesso ou marcador de erro, na mesma
/// posição do texto de entrada.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BatchItem {
    /// Item classificado com sucesso.
    Success(Prediction),
    /// Item que falhou na validação ou na classificação.
    Failure(PredictionError),
}

impl BatchItem {
    /// Texto original do item, independente do desfecho.
    pub fn text(&self) -> &str {
        match self {
            BatchItem::Success(p) => &p.text,
            BatchItem::Failure(e) => &e.text,
        }
    }

    /// Se o item foi classificado com sucesso.
    pub fn is_success(&self) -> bool {
        matches!(self, BatchItem::Success(_))
    }
}

/// Resultado agregado de uma predição em lote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchPrediction {
    /// Um slot por texto de entrada, na mesma ordem.
    pub results: Vec<BatchItem>,

    /// Total de itens recebidos.
    pub total: usize,

    /// Quantos itens foram servidos do cache.
    pub cached_count: usize,

    /// Latência total do lote em milissegundos.
    pub latency_ms: f64,
}

/// Estado geral do serviço.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    /// Modelo carregado e cache acessível.
    Healthy,
    /// Modelo carregado, cache inacessível ou desabilitado.
    Degraded,
    /// Modelo não carregado; o serviço não consegue atender.
    Unhealthy,
}

impl std::fmt::Display for HealthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthState::Healthy => write!(f, "healthy"),
            HealthState::Degraded => write!(f, "degraded"),
            HealthState::Unhealthy => write!(f, "unhealthy"),
        }
    }
}

/// Estado de uma dependência individual.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CheckState {
    /// Dependência operacional.
    Healthy,
    /// Dependência com falha.
    Unhealthy,
    /// Dependência desabilitada ou não configurada.
    Unavailable,
}

/// Estado das dependências verificadas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthChecks {
    /// Estado do modelo.
    pub model: CheckState,

    /// Estado do cache.
    pub cache: CheckState,
}

/// Documento de saúde do serviço.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    /// Estado agregado.
    pub status: HealthState,

    /// Nome do serviço.
    pub service: String,

    /// Versão do serviço.
    pub version: String,

    /// Identificador do modelo em uso.
    pub model: String,

    /// Momento da verificação.
    pub timestamp: chrono::DateTime<chrono::Utc>,

    /// Se o modelo está carregado.
    pub model_loaded: bool,

    /// Se o cache respondeu ao ping.
    pub cache_reachable: bool,

    /// Detalhe por dependência.
    pub checks: HealthChecks,
}

/// Documento raiz com os endpoints disponíveis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    /// Nome do serviço.
    pub service: String,

    /// Versão do serviço.
    pub version: String,

    /// Identificador do modelo em uso.
    pub model: String,

    /// Endpoints expostos.
    pub endpoints: ServiceEndpoints,
}

/// Endpoints expostos pelo serviço.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceEndpoints {
    /// Verificação de saúde.
    pub health: String,

    /// Predição individual.
    pub predict: String,

    /// Predição em lote.
    pub batch_predict: String,
}

impl Default for ServiceEndpoints {
    fn default() -> Self {
        Self {
            health: "/health".to_string(),
            predict: "/predict".to_string(),
            batch_predict: "/batch-predict".to_string(),
        }
    }
}
