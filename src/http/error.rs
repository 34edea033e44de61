//! Mapeamento de erros para respostas HTTP.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::types::responses::ErrorInfo;
use crate::SentirError;

/// Erro da camada HTTP: status mais corpo `{error, message}`.
///
/// Nenhum detalhe interno vaza no corpo; falhas do classificador viram
/// uma mensagem genérica com status 500.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorInfo,
}

impl ApiError {
    /// Cria um erro com status e código explícitos.
    pub fn new(status: StatusCode, code: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorInfo::new(code, message),
        }
    }

    /// Erro de validação de entrada (400).
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "validation", message)
    }

    /// Status HTTP associado.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Código estável do corpo.
    pub fn code(&self) -> &str {
        &self.body.error
    }
}

impl From<SentirError> for ApiError {
    fn from(err: SentirError) -> Self {
        let status = match &err {
            SentirError::Validation(_) => StatusCode::BAD_REQUEST,
            SentirError::ModelNotLoaded(_) => StatusCode::SERVICE_UNAVAILABLE,
            SentirError::ClassifierFailed(..) | SentirError::ClassifierTimeout(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            // Falha de cache é absorvida pelo motor e não chega aqui;
            // se chegar, é tratada como erro interno
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        Self {
            status,
            body: ErrorInfo::new(err.code(), err.wire_message()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
