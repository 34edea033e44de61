//! Handlers dos endpoints da API.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;
use axum::Json;

use super::error::ApiError;
use super::AppState;
use crate::types::requests::{BatchPredictionRequest, PredictionRequest};
use crate::types::responses::{
    BatchPrediction, HealthReport, HealthState, Prediction, ServiceInfo,
};
use crate::SentirError;

/// GET / - Documento raiz com os endpoints disponíveis.
pub async fn index(State(state): State<AppState>) -> Json<ServiceInfo> {
    Json(state.engine.service_info())
}

/// GET /health - Estado do serviço e das dependências.
///
/// `healthy` e `degraded` respondem 200; apenas modelo não carregado
/// responde 503, já que sem cache o serviço continua atendendo.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let report = state.engine.health().await;

    let status = match report.status {
        HealthState::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::OK,
    };

    (status, Json(report))
}

/// POST /predict - Classifica o sentimento de um texto.
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictionRequest>, JsonRejection>,
) -> Result<Json<Prediction>, ApiError> {
    let Json(request) = payload?;

    ensure_model_loaded(&state)?;
    request.validate(state.engine.limits())?;

    let request_id = uuid::Uuid::new_v4();
    tracing::info!(
        request_id = %request_id,
        use_cache = request.use_cache,
        "predição individual"
    );

    let prediction = state
        .engine
        .predict_one(&request.text, request.use_cache)
        .await?;

    Ok(Json(prediction))
}

/// POST /batch-predict - Classifica um lote de textos.
///
/// O lote como um todo é validado aqui (presença e tamanho); cada item
/// é validado pelo motor e falha slot a slot, preservando a ordem.
pub async fn batch_predict(
    State(state): State<AppState>,
    payload: Result<Json<BatchPredictionRequest>, JsonRejection>,
) -> Result<Json<BatchPrediction>, ApiError> {
    let Json(request) = payload?;

    ensure_model_loaded(&state)?;
    request.validate(state.engine.limits())?;

    let request_id = uuid::Uuid::new_v4();
    tracing::info!(
        request_id = %request_id,
        total = request.texts.len(),
        use_cache = request.use_cache,
        "predição em lote"
    );

    let batch = state
        .engine
        .predict_batch(&request.texts, request.use_cache)
        .await;

    Ok(Json(batch))
}

/// Middleware de log de requisições: método, rota, status e latência.
pub async fn track_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = std::time::Instant::now();

    let response = next.run(request).await;

    let latency_ms = started.elapsed().as_secs_f64() * 1000.0;
    tracing::info!(
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        latency_ms,
        "requisição atendida"
    );

    response
}

fn ensure_model_loaded(state: &AppState) -> Result<(), ApiError> {
    if state.engine.model_loaded() {
        Ok(())
    } else {
        Err(ApiError::from(SentirError::ModelNotLoaded(
            state.engine.model_name().to_string(),
        )))
    }
}
