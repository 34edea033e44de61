//! # Sentir
//!
//! API HTTP de análise de sentimento com cache Redis.
//!
//! Sentir classifica textos como POSITIVE ou NEGATIVE e memoriza cada
//! resultado em cache, devolvendo repetições sem recomputar o modelo.
//!
//! ## Módulos
//!
//! - [`cli`] - Interface de linha de comando
//! - [`http`] - Servidor HTTP e handlers da API
//! - [`predict`] - Orquestração cache-ou-computa das predições
//! - [`classifier`] - Modelo de sentimento baseado em léxico
//! - [`cache`] - Backends de cache (Redis e memória) e chaves
//! - [`types`] - Tipos compartilhados

pub mod cache;
pub mod classifier;
#[cfg(feature = "cli")]
pub mod cli;
pub mod http;
pub mod predict;
pub mod types;

pub use types::config::Config;
pub use types::errors::{SentirError, SentirResult};
