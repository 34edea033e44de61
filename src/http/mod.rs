//! Superfície HTTP do Sentir.
//!
//! Este módulo expõe o motor de predição sobre axum: `/`, `/health`,
//! `/predict` e `/batch-predict`. A camada HTTP é dona da validação de
//! entrada e do mapeamento de erros para status; a orquestração
//! cache-ou-computa fica no motor.

mod error;
mod handlers;

pub use error::ApiError;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::predict::PredictionEngine;
use crate::types::config::Config;
use crate::{SentirError, SentirResult};

/// Estado compartilhado entre os handlers.
#[derive(Clone)]
pub struct AppState {
    /// Motor de predição compartilhado.
    pub engine: Arc<PredictionEngine>,
}

/// Monta o roteador da API sobre um motor já construído.
pub fn build_router(engine: Arc<PredictionEngine>) -> Router {
    let state = AppState { engine };

    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/predict", post(handlers::predict))
        .route("/batch-predict", post(handlers::batch_predict))
        .layer(axum::middleware::from_fn(handlers::track_request))
        .with_state(state)
}

/// Servidor HTTP do Sentir.
pub struct ApiServer {
    config: Config,
    engine: Arc<PredictionEngine>,
}

impl ApiServer {
    /// Cria o servidor: carrega o modelo e o backend de cache.
    ///
    /// Recusa a subir se o modelo não carregar; um cache inacessível
    /// não impede a subida, só degrada o serviço.
    pub fn new(config: Config) -> SentirResult<Self> {
        let engine = Arc::new(PredictionEngine::from_config(&config)?);
        Ok(Self { config, engine })
    }

    /// Inicia o servidor e bloqueia até o sinal de shutdown.
    pub async fn run(self) -> SentirResult<()> {
        let addr = format!("{}:{}", self.config.server.host, self.config.server.port);

        // Registra o estado das dependências na subida
        let report = self.engine.health().await;
        tracing::info!(
            status = %report.status,
            model = %report.model,
            cache_reachable = report.cache_reachable,
            "Sentir API starting"
        );

        let router = build_router(self.engine);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| SentirError::Server(format!("falha ao escutar em {addr}: {e}")))?;

        tracing::info!(addr = %addr, "listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| SentirError::Server(e.to_string()))?;

        tracing::info!("Sentir API stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "falha ao instalar handler de ctrl-c");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStore;
    use crate::classifier::LexiconClassifier;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_router() -> Router {
        let classifier = Arc::new(LexiconClassifier::load("lexicon-test").unwrap());
        let engine = PredictionEngine::with_parts(
            Config::default(),
            classifier,
            Some(Arc::new(MemoryStore::new(10))),
        );
        build_router(Arc::new(engine))
    }

    async fn get_json(router: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap();
        (status, value)
    }

    #[tokio::test]
    async fn test_index_document() {
        let (status, body) = get_json(test_router(), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["service"], "sentir");
        assert_eq!(body["endpoints"]["predict"], "/predict");
        assert_eq!(body["endpoints"]["batch_predict"], "/batch-predict");
    }

    #[tokio::test]
    async fn test_health_healthy() {
        let (status, body) = get_json(test_router(), "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["model_loaded"], true);
        assert_eq!(body["checks"]["cache"], "healthy");
    }

    #[tokio::test]
    async fn test_predict_roundtrip() {
        let router = test_router();

        let request = Request::builder()
            .method("POST")
            .uri("/predict")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"text": "I love this product!"}"#))
            .unwrap();

        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["label"], "POSITIVE");
        assert_eq!(body["cached"], false);
        assert!(body["score"].as_f64().unwrap() > 0.9);
    }
}
