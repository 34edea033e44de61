//! Interface de armazenamento e backend em memória.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lru::LruCache;

use crate::{SentirError, SentirResult};

/// Trait para backends de armazenamento de cache.
///
/// Valores são strings opacas (JSON serializado pelo chamador). Todo
/// erro retornado aqui é tratado como degradação pelo motor de
/// predição, nunca como falha da requisição.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Nome do backend, usado em logs e diagnósticos.
    fn backend(&self) -> &str;

    /// Busca um valor. `None` para chave ausente ou expirada.
    async fn get(&self, key: &str) -> SentirResult<Option<String>>;

    /// Grava um valor com tempo de vida.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> SentirResult<()>;

    /// Verifica se o backend está acessível.
    async fn ping(&self) -> SentirResult<()>;
}

/// Valor gravado no backend em memória.
#[derive(Debug, Clone)]
struct StoredValue {
    value: String,
    cached_at: DateTime<Utc>,
    ttl: Duration,
}

impl StoredValue {
    fn new(value: String, ttl: Duration) -> Self {
        Self {
            value,
            cached_at: Utc::now(),
            ttl,
        }
    }

    /// Verifica se o valor expirou.
    fn is_expired(&self) -> bool {
        let elapsed = Utc::now()
            .signed_duration_since(self.cached_at)
            .to_std()
            .unwrap_or(Duration::MAX);
        elapsed > self.ttl
    }
}

/// Estatísticas do backend em memória.
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    /// Número atual de entradas.
    pub size: usize,

    /// Capacidade máxima.
    pub capacity: usize,

    /// Número de acertos (cache hits).
    pub hits: u64,

    /// Número de erros (cache misses).
    pub misses: u64,
}

impl CacheStats {
    /// Calcula a taxa de acerto.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Backend LRU em memória, com TTL por entrada.
///
/// Útil para testes e para implantações sem Redis. A expiração é
/// verificada na leitura; entradas expiradas são removidas na hora.
pub struct MemoryStore {
    cache: Mutex<LruCache<String, StoredValue>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MemoryStore {
    /// Cria um novo backend com a capacidade dada.
    pub fn new(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::new(100).unwrap());
        Self {
            cache: Mutex::new(LruCache::new(cap)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Retorna estatísticas do backend.
    pub fn stats(&self) -> CacheStats {
        let cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        CacheStats {
            size: cache.len(),
            capacity: cache.cap().get(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    /// Limpa todas as entradas.
    pub fn clear(&self) {
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        cache.clear();
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(1000)
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    fn backend(&self) -> &str {
        "memory"
    }

    async fn get(&self, key: &str) -> SentirResult<Option<String>> {
        let mut cache = self
            .cache
            .lock()
            .map_err(|_| SentirError::cache("lock do cache em memória envenenado"))?;

        // Primeiro verifica expiração com peek, para não alterar a ordem LRU
        let is_expired = cache.peek(key).map(StoredValue::is_expired);

        match is_expired {
            Some(true) => {
                // Expirado: remove e conta como miss
                cache.pop(key);
                self.misses.fetch_add(1, Ordering::Relaxed);
                Ok(None)
            }
            Some(false) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Ok(cache.get(key).map(|v| v.value.clone()))
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                Ok(None)
            }
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> SentirResult<()> {
        let mut cache = self
            .cache
            .lock()
            .map_err(|_| SentirError::cache("lock do cache em memória envenenado"))?;
        cache.put(key.to_string(), StoredValue::new(value.to_string(), ttl));
        Ok(())
    }

    async fn ping(&self) -> SentirResult<()> {
        Ok(())
    }
}
