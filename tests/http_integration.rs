//! Testes de integração para a API HTTP do Sentir.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use sentir::cache::{CacheStore, MemoryStore};
use sentir::classifier::{Classifier, LexiconClassifier};
use sentir::http::build_router;
use sentir::predict::PredictionEngine;
use sentir::types::config::Config;
use sentir::types::responses::Classification;
use sentir::{SentirError, SentirResult};

/// Monta um roteador com cache em memória.
fn memory_router() -> Router {
    router_with_store(Some(Arc::new(MemoryStore::new(100))))
}

/// Monta um roteador com o backend de cache dado.
fn router_with_store(store: Option<Arc<dyn CacheStore>>) -> Router {
    let classifier = Arc::new(LexiconClassifier::load("lexicon-test").expect("lexicon loads"));
    let engine = PredictionEngine::with_parts(Config::default(), classifier, store);
    build_router(Arc::new(engine))
}

async fn get_json(router: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(router, request).await
}

async fn post_json(router: &Router, uri: &str, payload: Value) -> (StatusCode, Value) {
    post_raw(router, uri, &payload.to_string()).await
}

async fn post_raw(router: &Router, uri: &str, payload: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    send(router, request).await
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

/// Backend de cache que falha em toda operação.
struct FailingStore;

#[async_trait]
impl CacheStore for FailingStore {
    fn backend(&self) -> &str {
        "failing-test"
    }

    async fn get(&self, _key: &str) -> SentirResult<Option<String>> {
        Err(SentirError::cache("backend fora do ar"))
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> SentirResult<()> {
        Err(SentirError::cache("backend fora do ar"))
    }

    async fn ping(&self) -> SentirResult<()> {
        Err(SentirError::cache("backend fora do ar"))
    }
}

/// Classificador cujo modelo nunca carrega.
struct UnloadedClassifier;

#[async_trait]
impl Classifier for UnloadedClassifier {
    fn name(&self) -> &str {
        "unloaded-test"
    }

    fn is_loaded(&self) -> bool {
        false
    }

    async fn classify(&self, _text: &str) -> SentirResult<Classification> {
        Err(SentirError::ModelNotLoaded("unloaded-test".to_string()))
    }
}

fn unloaded_router() -> Router {
    let engine = PredictionEngine::with_parts(
        Config::default(),
        Arc::new(UnloadedClassifier),
        Some(Arc::new(MemoryStore::new(10))),
    );
    build_router(Arc::new(engine))
}

// Testes do endpoint raiz
mod index_tests {
    use super::*;

    #[tokio::test]
    async fn test_index_lists_endpoints() {
        let router = memory_router();
        let (status, body) = get_json(&router, "/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["service"], "sentir");
        assert_eq!(body["endpoints"]["predict"], "/predict");
        assert_eq!(body["endpoints"]["batch_predict"], "/batch-predict");
        assert_eq!(body["endpoints"]["health"], "/health");
        assert!(body["version"].is_string());
    }

    #[tokio::test]
    async fn test_unknown_route_returns_404() {
        let router = memory_router();
        let (status, _body) = get_json(&router, "/nao-existe").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

// Testes do endpoint /predict
mod predict_tests {
    use super::*;

    #[tokio::test]
    async fn test_predict_positive() {
        let router = memory_router();
        let (status, body) =
            post_json(&router, "/predict", json!({"text": "I love this product!"})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["label"], "POSITIVE");
        assert!(body["score"].as_f64().unwrap() > 0.9);
        assert_eq!(body["cached"], false);
        assert_eq!(body["text"], "I love this product!");
        assert!(body["latency_ms"].is_number());
    }

    #[tokio::test]
    async fn test_predict_negative() {
        let router = memory_router();
        let (status, body) =
            post_json(&router, "/predict", json!({"text": "This is terrible, I hate it."})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["label"], "NEGATIVE");
        assert!(body["score"].as_f64().unwrap() > 0.5);
    }

    #[tokio::test]
    async fn test_predict_second_call_comes_from_cache() {
        let router = memory_router();
        let payload = json!({"text": "what a wonderful day"});

        let (_, first) = post_json(&router, "/predict", payload.clone()).await;
        let (status, second) = post_json(&router, "/predict", payload).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(first["cached"], false);
        assert_eq!(second["cached"], true);

        // Resposta cacheada repete o resultado computado
        assert_eq!(first["label"], second["label"]);
        assert_eq!(first["score"], second["score"]);
    }

    #[tokio::test]
    async fn test_predict_use_cache_false_always_computes() {
        let router = memory_router();
        let payload = json!({"text": "great service", "use_cache": false});

        let (_, first) = post_json(&router, "/predict", payload.clone()).await;
        let (_, second) = post_json(&router, "/predict", payload).await;

        assert_eq!(first["cached"], false);
        assert_eq!(second["cached"], false);
    }

    #[tokio::test]
    async fn test_predict_normalized_whitespace_hits_same_entry() {
        let router = memory_router();

        let (_, first) = post_json(&router, "/predict", json!({"text": "I love rust"})).await;
        let (_, second) = post_json(&router, "/predict", json!({"text": "  I   love   rust  "})).await;

        assert_eq!(first["cached"], false);
        assert_eq!(second["cached"], true);
    }

    #[tokio::test]
    async fn test_predict_empty_text_is_rejected() {
        let router = memory_router();
        let (status, body) = post_json(&router, "/predict", json!({"text": ""})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation");
        assert_eq!(body["message"], "text cannot be empty");
    }

    #[tokio::test]
    async fn test_predict_whitespace_only_text_is_rejected() {
        let router = memory_router();
        let (status, body) = post_json(&router, "/predict", json!({"text": "   \n\t  "})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation");
    }

    #[tokio::test]
    async fn test_predict_oversized_text_is_rejected() {
        let router = memory_router();
        let long_text = "a".repeat(5001);
        let (status, body) = post_json(&router, "/predict", json!({"text": long_text})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation");
        assert_eq!(body["message"], "text too long (max 5000 characters)");
    }

    #[tokio::test]
    async fn test_predict_missing_text_field_is_rejected() {
        let router = memory_router();
        let (status, body) = post_json(&router, "/predict", json!({"texto": "oops"})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation");
    }

    #[tokio::test]
    async fn test_predict_malformed_json_is_rejected() {
        let router = memory_router();
        let (status, body) = post_raw(&router, "/predict", "{not json").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation");
    }

    #[tokio::test]
    async fn test_predict_survives_cache_outage() {
        let router = router_with_store(Some(Arc::new(FailingStore)));
        let (status, body) =
            post_json(&router, "/predict", json!({"text": "I love this product!"})).await;

        // Cache fora do ar degrada para computação, nunca para erro
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["label"], "POSITIVE");
        assert_eq!(body["cached"], false);
    }

    #[tokio::test]
    async fn test_predict_model_not_loaded_returns_503() {
        let router = unloaded_router();
        let (status, body) =
            post_json(&router, "/predict", json!({"text": "anything"})).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "model_unavailable");
    }
}

// Testes do endpoint /batch-predict
mod batch_tests {
    use super::*;

    #[tokio::test]
    async fn test_batch_preserves_input_order() {
        let router = memory_router();
        let texts = vec!["I love this", "this is awful", "pretty good overall"];
        let (status, body) = post_json(&router, "/batch-predict", json!({"texts": texts})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 3);

        let results = body["results"].as_array().unwrap();
        assert_eq!(results.len(), 3);
        for (i, text) in texts.iter().enumerate() {
            assert_eq!(results[i]["text"], *text);
        }
        assert_eq!(results[0]["label"], "POSITIVE");
        assert_eq!(results[1]["label"], "NEGATIVE");
    }

    #[tokio::test]
    async fn test_batch_invalid_item_becomes_error_marker() {
        let router = memory_router();
        let (status, body) = post_json(
            &router,
            "/batch-predict",
            json!({"texts": ["I love this", "", "I hate this"]}),
        )
        .await;

        // O lote inteiro responde 200; o item inválido vira marcador
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 3);

        let results = body["results"].as_array().unwrap();
        assert!(results[0]["label"].is_string());
        assert_eq!(results[1]["error"]["error"], "validation");
        assert_eq!(results[1]["error"]["message"], "text cannot be empty");
        assert_eq!(results[2]["label"], "NEGATIVE");
    }

    #[tokio::test]
    async fn test_batch_counts_cache_hits() {
        let router = memory_router();
        let (_, body) = post_json(
            &router,
            "/batch-predict",
            json!({"texts": ["nice work", "nice work"]}),
        )
        .await;

        // Segunda ocorrência do mesmo texto sai do cache
        assert_eq!(body["total"], 2);
        assert_eq!(body["cached_count"], 1);

        let results = body["results"].as_array().unwrap();
        assert_eq!(results[0]["cached"], false);
        assert_eq!(results[1]["cached"], true);
    }

    #[tokio::test]
    async fn test_batch_empty_list_is_rejected() {
        let router = memory_router();
        let (status, body) =
            post_json(&router, "/batch-predict", json!({"texts": []})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation");
        assert_eq!(body["message"], "'texts' cannot be empty");
    }

    #[tokio::test]
    async fn test_batch_too_many_texts_is_rejected() {
        let router = memory_router();
        let texts: Vec<String> = (0..101).map(|i| format!("text {}", i)).collect();
        let (status, body) =
            post_json(&router, "/batch-predict", json!({"texts": texts})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation");
        assert_eq!(body["message"], "too many texts (max 100)");
    }

    #[tokio::test]
    async fn test_batch_model_not_loaded_returns_503() {
        let router = unloaded_router();
        let (status, body) =
            post_json(&router, "/batch-predict", json!({"texts": ["anything"]})).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "model_unavailable");
    }
}

// Testes do endpoint /health
mod health_tests {
    use super::*;

    #[tokio::test]
    async fn test_health_healthy_with_reachable_cache() {
        let router = memory_router();
        let (status, body) = get_json(&router, "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["model_loaded"], true);
        assert_eq!(body["cache_reachable"], true);
        assert_eq!(body["checks"]["model"], "healthy");
        assert_eq!(body["checks"]["cache"], "healthy");
    }

    #[tokio::test]
    async fn test_health_degraded_without_cache_backend() {
        let router = router_with_store(None);
        let (status, body) = get_json(&router, "/health").await;

        // Degradado ainda atende tráfego, então responde 200
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["model_loaded"], true);
        assert_eq!(body["cache_reachable"], false);
        assert_eq!(body["checks"]["cache"], "unavailable");
    }

    #[tokio::test]
    async fn test_health_degraded_with_failing_cache() {
        let router = router_with_store(Some(Arc::new(FailingStore)));
        let (status, body) = get_json(&router, "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["cache_reachable"], false);
        assert_eq!(body["checks"]["cache"], "unhealthy");
    }

    #[tokio::test]
    async fn test_health_unhealthy_without_model_returns_503() {
        let router = unloaded_router();
        let (status, body) = get_json(&router, "/health").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "unhealthy");
        assert_eq!(body["model_loaded"], false);
        assert_eq!(body["checks"]["model"], "unhealthy");
    }
}
