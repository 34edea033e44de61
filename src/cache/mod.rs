//! Cache de predições do Sentir.
//!
//! Este módulo implementa a camada de cache que evita reclassificações
//! do mesmo texto: construção de chaves determinísticas, a interface
//! de armazenamento e os backends Redis e em memória.

mod key;
mod redis;
mod store;

pub use key::{normalize_text, CacheKeyBuilder};
pub use redis::RedisStore;
pub use store::{CacheStats, CacheStore, MemoryStore};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::responses::{Classification, Label};
use crate::SentirResult;

/// Entrada gravada no cache, serializada como JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Chave completa sob a qual a entrada foi gravada.
    pub key: String,

    /// Polaridade atribuída.
    pub label: Label,

    /// Confiança arredondada para 4 casas.
    pub score: f64,

    /// Momento da gravação.
    pub created_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Cria uma nova entrada a partir de uma classificação.
    pub fn new(key: impl Into<String>, classification: Classification) -> Self {
        Self {
            key: key.into(),
            label: classification.label,
            score: classification.score,
            created_at: Utc::now(),
        }
    }

    /// Reconstrói a classificação armazenada.
    pub fn classification(&self) -> Classification {
        Classification {
            label: self.label,
            score: self.score,
        }
    }

    /// Serializa a entrada para gravação.
    pub fn to_json(&self) -> SentirResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Desserializa uma entrada lida do cache.
    pub fn from_json(raw: &str) -> SentirResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}
