//! REST API endpoints.
//!
//! Axum-based HTTP API: upload a fight outcome CSV, then query the derived
//! table, the chart series and the per-division detail view.

pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::calculate::MetricsError;
use crate::dashboard::{Dashboard, SelectionError};
use crate::ingest::IngestError;
use state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unprocessable upload: {0}")]
    Unprocessable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<IngestError> for ApiError {
    fn from(e: IngestError) -> Self {
        match e {
            IngestError::Io(io) => ApiError::Internal(io.to_string()),
            other => ApiError::Unprocessable(other.to_string()),
        }
    }
}

impl From<MetricsError> for ApiError {
    fn from(e: MetricsError) -> Self {
        ApiError::Unprocessable(e.to_string())
    }
}

impl From<SelectionError> for ApiError {
    fn from(e: SelectionError) -> Self {
        ApiError::NotFound(e.to_string())
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Unprocessable(_) => (StatusCode::UNPROCESSABLE_ENTITY, "UNPROCESSABLE"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// The loaded dashboard, or 404 when nothing has been uploaded yet.
pub async fn require_dashboard(state: &AppState) -> Result<Arc<Dashboard>, ApiError> {
    state
        .current()
        .await
        .ok_or_else(|| ApiError::NotFound("No dataset loaded".to_string()))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

fn cors_layer(origin: &str) -> CorsLayer {
    if origin == "*" {
        return CorsLayer::permissive();
    }
    match origin.parse::<HeaderValue>() {
        Ok(value) => CorsLayer::new()
            .allow_origin(value)
            .allow_methods(Any)
            .allow_headers(Any),
        Err(_) => {
            tracing::warn!("Ignoring invalid CORS origin: {}", origin);
            CorsLayer::new()
        }
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.server.cors_origin);
    let upload_limit = state.config.server.max_upload_bytes;

    Router::new()
        .route("/api/health", get(health))
        .route(
            "/api/dataset",
            get(routes::dataset::get_dataset)
                .post(routes::dataset::upload_dataset)
                .delete(routes::dataset::clear_dataset),
        )
        .route("/api/divisions", get(routes::divisions::list_divisions))
        .route(
            "/api/divisions/:division",
            get(routes::divisions::get_division),
        )
        .route("/api/charts/outcomes", get(routes::charts::outcome_chart))
        .route("/api/charts/totals", get(routes::charts::totals_chart))
        .layer(DefaultBodyLimit::max(upload_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::ingest::ConsistencyPolicy;

    #[tokio::test]
    async fn test_health() {
        let state = test_state();
        let (status, json) = get_json(&state, "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_error_body_shape() {
        let state = test_state();
        let (status, json) = get_json(&state, "/api/divisions").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "NOT_FOUND");
        assert_eq!(json["error"]["message"], "Not found: No dataset loaded");
    }

    #[tokio::test]
    async fn test_upload_over_limit_rejected() {
        let mut config = crate::config::AppConfig::default();
        config.server.max_upload_bytes = 16;
        let state = AppState::new(config);

        let (status, _) = post_csv(&state, "/api/dataset", SAMPLE_CSV).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert!(state.current().await.is_none());
    }

    #[tokio::test]
    async fn test_state_uses_configured_policy() {
        let mut config = crate::config::AppConfig::default();
        config.validation.policy = ConsistencyPolicy::Strict;
        let state = AppState::new(config);
        assert_eq!(state.loader.policy(), ConsistencyPolicy::Strict);
    }

    #[test]
    fn test_ingest_error_mapping() {
        let err: ApiError = IngestError::MissingColumns(vec!["DQs".to_string()]).into();
        assert!(matches!(err, ApiError::Unprocessable(_)));

        let err: ApiError =
            IngestError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk")).into();
        assert!(matches!(err, ApiError::Internal(_)));
    }

    #[test]
    fn test_selection_error_mapping() {
        let err: ApiError = SelectionError::UnknownDivision("Strawweight".to_string()).into();
        assert_eq!(err.to_string(), "Not found: Unknown division 'Strawweight'");
    }
}
