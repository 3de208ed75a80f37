use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

use service::errors::ServiceError;

/// JSON error body: `{"error": title, "code": n, "detail": message}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub title: &'static str,
    pub code: u16,
    pub detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: &'static str, detail: Option<String>) -> Self {
        Self { status, title, code: status.as_u16(), detail }
    }

    /// Guard rejection; carries the same code as `ServiceError::InvalidToken`.
    pub fn unauthorized(detail: impl Into<String>) -> Self {
        Self { code: 1005, ..Self::new(StatusCode::UNAUTHORIZED, "Unauthorized", Some(detail.into())) }
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        let (status, title) = match &e {
            ServiceError::Validation(_) => (StatusCode::BAD_REQUEST, "Validation Error"),
            ServiceError::Conflict(_) => (StatusCode::CONFLICT, "Conflict"),
            ServiceError::NotFound(_) => (StatusCode::NOT_FOUND, "Not Found"),
            ServiceError::Unauthorized(_) | ServiceError::InvalidToken(_) => (StatusCode::UNAUTHORIZED, "Unauthorized"),
            ServiceError::Hash(_) | ServiceError::Db(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Error"),
        };
        Self { status, title, code: e.code(), detail: Some(e.to_string()) }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(code = self.code, detail = ?self.detail, "request failed");
        }
        let body = serde_json::json!({
            "error": self.title,
            "code": self.code,
            "detail": self.detail,
        });
        (self.status, Json(body)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use service::token::TokenError;

    #[test]
    fn service_errors_map_to_statuses() {
        let cases = [
            (ServiceError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (ServiceError::Conflict("dup".into()), StatusCode::CONFLICT),
            (ServiceError::NotFound("gone".into()), StatusCode::NOT_FOUND),
            (ServiceError::Unauthorized("no".into()), StatusCode::UNAUTHORIZED),
            (ServiceError::InvalidToken(TokenError::Expired), StatusCode::UNAUTHORIZED),
            (ServiceError::Hash("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (ServiceError::Db("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            let code = err.code();
            let api: JsonApiError = err.into();
            assert_eq!(api.status, status);
            assert_eq!(api.code, code);
        }
    }

    #[test]
    fn into_response_keeps_status() {
        let resp = JsonApiError::unauthorized("missing bearer token").into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
