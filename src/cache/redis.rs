//! Backend Redis do cache.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use super::store::CacheStore;
use crate::types::config::CacheConfig;
use crate::{SentirError, SentirResult};

/// Backend de cache sobre Redis.
///
/// Cada operação obtém uma conexão multiplexada do cliente e é
/// limitada pelo timeout configurado; uma instância Redis fora do ar
/// faz as operações falharem rápido em vez de travar requisições.
pub struct RedisStore {
    client: redis::Client,
    timeout: Duration,
}

impl RedisStore {
    /// Cria um backend a partir de uma URL `redis://host:porta/db`.
    pub fn connect(url: &str, timeout: Duration) -> SentirResult<Self> {
        let client = redis::Client::open(url)
            .map_err(|e| SentirError::cache(format!("URL de Redis inválida: {e}")))?;

        Ok(Self { client, timeout })
    }

    /// Cria um backend a partir da configuração de cache.
    pub fn from_config(config: &CacheConfig) -> SentirResult<Self> {
        Self::connect(
            &config.redis_url(),
            Duration::from_secs(config.connect_timeout_secs),
        )
    }

    async fn connection(&self) -> SentirResult<MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| SentirError::cache(format!("conexão com Redis falhou: {e}")))
    }
}

#[async_trait]
impl CacheStore for RedisStore {
    fn backend(&self) -> &str {
        "redis"
    }

    async fn get(&self, key: &str) -> SentirResult<Option<String>> {
        let op = async {
            let mut conn = self.connection().await?;
            let value: Option<String> = conn
                .get(key)
                .await
                .map_err(|e| SentirError::cache(format!("GET falhou: {e}")))?;
            Ok(value)
        };

        tokio::time::timeout(self.timeout, op)
            .await
            .map_err(|_| SentirError::cache("timeout no GET do Redis"))?
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> SentirResult<()> {
        let op = async {
            let mut conn = self.connection().await?;
            let _: () = conn
                .set_ex(key, value, ttl.as_secs())
                .await
                .map_err(|e| SentirError::cache(format!("SET falhou: {e}")))?;
            Ok(())
        };

        tokio::time::timeout(self.timeout, op)
            .await
            .map_err(|_| SentirError::cache("timeout no SET do Redis"))?
    }

    async fn ping(&self) -> SentirResult<()> {
        let op = async {
            let mut conn = self.connection().await?;
            let reply: String = redis::cmd("PING")
                .query_async(&mut conn)
                .await
                .map_err(|e| SentirError::cache(format!("PING falhou: {e}")))?;

            if reply == "PONG" {
                Ok(())
            } else {
                Err(SentirError::cache(format!(
                    "resposta inesperada ao PING: {reply}"
                )))
            }
        };

        tokio::time::timeout(self.timeout, op)
            .await
            .map_err(|_| SentirError::cache("timeout no PING do Redis"))?
    }
}
