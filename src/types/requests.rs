//! Tipos de requisição do Sentir.

use serde::{Deserialize, Serialize};

use crate::types::config::LimitsConfig;
use crate::{SentirError, SentirResult};

/// Requisição de predição individual.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRequest {
    /// Texto a ser classificado.
    pub text: String,

    /// Se o cache deve ser consultado e atualizado.
    #[serde(default = "default_use_cache")]
    pub use_cache: bool,
}

impl PredictionRequest {
    /// Cria uma nova requisição.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            use_cache: true,
        }
    }

    /// Desabilita o uso de cache.
    pub fn without_cache(mut self) -> Self {
        self.use_cache = false;
        self
    }

    /// Valida o texto contra os limites configurados.
    pub fn validate(&self, limits: &LimitsConfig) -> SentirResult<()> {
        validate_text(&self.text, limits)
    }
}

/// Requisição de predição em lote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchPredictionRequest {
    /// Textos a classificar, na ordem em que devem ser respondidos.
    pub texts: Vec<String>,

    /// Se o cache deve ser consultado e atualizado.
    #[serde(default = "default_use_cache")]
    pub use_cache: bool,
}

impl BatchPredictionRequest {
    /// Cria uma nova requisição de lote.
    pub fn new<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            texts: texts.into_iter().map(Into::into).collect(),
            use_cache: true,
        }
    }

    /// Desabilita o uso de cache.
    pub fn without_cache(mut self) -> Self {
        self.use_cache = false;
        self
    }

    /// Valida o lote como um todo. Itens individuais são validados
    /// durante o processamento e falham slot a slot.
    pub fn validate(&self, limits: &LimitsConfig) -> SentirResult<()> {
        if self.texts.is_empty() {
            return Err(SentirError::validation("'texts' cannot be empty"));
        }
        if self.texts.len() > limits.max_batch_size {
            return Err(SentirError::validation(format!(
                "too many texts (max {})",
                limits.max_batch_size
            )));
        }
        Ok(())
    }
}

fn default_use_cache() -> bool {
    true
}

/// Valida um texto individual contra os limites configurados.
pub fn validate_text(text: &str, limits: &LimitsConfig) -> SentirResult<()> {
    if text.trim().is_empty() {
        return Err(SentirError::validation("text cannot be empty"));
    }
    if text.chars().count() > limits.max_text_length {
        return Err(SentirError::validation(format!(
            "text too long (max {} characters)",
            limits.max_text_length
        )));
    }
    Ok(())
}
