//! Configuration for Sentir.
//!
//! Layered resolution: built-in defaults, then an optional `sentir.toml`
//! file, then environment variables. Environment always wins so container
//! deployments can override the file without editing it.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

use crate::{SentirError, SentirResult};

/// Main configuration for Sentir.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Model settings.
    #[serde(default)]
    pub model: ModelConfig,

    /// Cache settings.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Request limits.
    #[serde(default)]
    pub limits: LimitsConfig,
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error). Env: `DEBUG=true` forces debug.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format (text, json).
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Upper bound for a single classification call (in seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_timeout() -> u64 {
    30
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address. Env: `HOST`, default `0.0.0.0`.
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port. Env: `PORT`, default `5000`.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

/// Model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model identifier, also the version token in cache keys.
    /// Env: `MODEL_NAME`, default `sentir-lexicon-v1`.
    #[serde(default = "default_model_name")]
    pub name: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: default_model_name(),
        }
    }
}

fn default_model_name() -> String {
    "sentir-lexicon-v1".to_string()
}

/// Cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Enabled. Env: `CACHE_ENABLED`, default `true`.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Backend (`redis` or `memory`). Env: `CACHE_BACKEND`.
    #[serde(default = "default_cache_backend")]
    pub backend: String,

    /// Redis host. Env: `REDIS_HOST`, default `localhost`.
    #[serde(default = "default_redis_host")]
    pub host: String,

    /// Redis port. Env: `REDIS_PORT`, default `6379`.
    #[serde(default = "default_redis_port")]
    pub port: u16,

    /// Redis logical database. Env: `REDIS_DB`, default `0`.
    #[serde(default)]
    pub db: u32,

    /// Entry time to live in seconds. Env: `CACHE_EXPIRY`, default `3600`.
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,

    /// Connection and ping timeout (in seconds).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Maximum entries for the in-memory backend.
    #[serde(default = "default_cache_capacity")]
    pub capacity: usize,
}

impl CacheConfig {
    /// Connection URL for the Redis backend.
    pub fn redis_url(&self) -> String {
        format!("redis://{}:{}/{}", self.host, self.port, self.db)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            backend: default_cache_backend(),
            host: default_redis_host(),
            port: default_redis_port(),
            db: 0,
            ttl_secs: default_cache_ttl(),
            connect_timeout_secs: default_connect_timeout(),
            capacity: default_cache_capacity(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_cache_backend() -> String {
    "redis".to_string()
}

fn default_redis_host() -> String {
    "localhost".to_string()
}

fn default_redis_port() -> u16 {
    6379
}

fn default_cache_ttl() -> u64 {
    3600 // 1 hour
}

fn default_connect_timeout() -> u64 {
    5
}

fn default_cache_capacity() -> usize {
    1000
}

/// Request limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Maximum text length in characters. Env: `MAX_TEXT_LENGTH`, default `5000`.
    #[serde(default = "default_max_text_length")]
    pub max_text_length: usize,

    /// Maximum number of texts per batch. Env: `MAX_BATCH_SIZE`, default `100`.
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_text_length: default_max_text_length(),
            max_batch_size: default_max_batch_size(),
        }
    }
}

fn default_max_text_length() -> usize {
    5000
}

fn default_max_batch_size() -> usize {
    100
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> SentirResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Saves configuration to a TOML file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> SentirResult<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Creates default configuration.
    pub fn default_config() -> Self {
        Self {
            general: GeneralConfig::default(),
            server: ServerConfig::default(),
            model: ModelConfig::default(),
            cache: CacheConfig::default(),
            limits: LimitsConfig::default(),
        }
    }

    /// Tries to load configuration from current directory or uses default.
    pub fn load_or_default() -> Self {
        Self::load("sentir.toml").unwrap_or_else(|_| Self::default_config())
    }

    /// Loads the file at `path` if present, otherwise defaults, then applies
    /// environment overrides.
    pub fn resolve<P: AsRef<Path>>(path: P) -> SentirResult<Self> {
        let mut config = if path.as_ref().exists() {
            Self::load(path)?
        } else {
            Self::default_config()
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Applies environment variable overrides. Invalid values fail loudly
    /// instead of silently keeping the previous setting.
    pub fn apply_env(&mut self) -> SentirResult<()> {
        if let Some(host) = env_string("HOST") {
            self.server.host = host;
        }
        if let Some(port) = env_parse("PORT")? {
            self.server.port = port;
        }
        if let Some(name) = env_string("MODEL_NAME") {
            self.model.name = name;
        }
        if let Some(enabled) = env_bool("CACHE_ENABLED")? {
            self.cache.enabled = enabled;
        }
        if let Some(backend) = env_string("CACHE_BACKEND") {
            self.cache.backend = backend;
        }
        if let Some(host) = env_string("REDIS_HOST") {
            self.cache.host = host;
        }
        if let Some(port) = env_parse("REDIS_PORT")? {
            self.cache.port = port;
        }
        if let Some(db) = env_parse("REDIS_DB")? {
            self.cache.db = db;
        }
        if let Some(ttl) = env_parse("CACHE_EXPIRY")? {
            self.cache.ttl_secs = ttl;
        }
        if let Some(max_len) = env_parse("MAX_TEXT_LENGTH")? {
            self.limits.max_text_length = max_len;
        }
        if let Some(max_batch) = env_parse("MAX_BATCH_SIZE")? {
            self.limits.max_batch_size = max_batch;
        }
        if let Some(true) = env_bool("DEBUG")? {
            self.general.log_level = "debug".to_string();
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

fn env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn env_parse<T: FromStr>(name: &str) -> SentirResult<Option<T>> {
    match env_string(name) {
        Some(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|_| SentirError::config(format!("valor inválido em {}: '{}'", name, raw))),
        None => Ok(None),
    }
}

fn env_bool(name: &str) -> SentirResult<Option<bool>> {
    match env_string(name) {
        Some(raw) => match raw.to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(Some(true)),
            "0" | "false" | "no" | "off" => Ok(Some(false)),
            _ => Err(SentirError::config(format!(
                "valor inválido em {}: '{}'",
                name, raw
            ))),
        },
        None => Ok(None),
    }
}
