use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::api::state::AppState;
use crate::api::{require_dashboard, ApiError};
use crate::dashboard::{Dashboard, DatasetSummary, DivisionRow};

#[derive(Debug, Deserialize)]
pub struct UploadParams {
    /// Label for the upload, usually the original file name
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DatasetResponse {
    pub summary: DatasetSummary,
    pub rows: Vec<DivisionRow>,
}

/// Replace the session dataset with the uploaded CSV.
///
/// The previous dataset stays loaded if the upload fails.
pub async fn upload_dataset(
    State(state): State<AppState>,
    Query(params): Query<UploadParams>,
    body: Bytes,
) -> Result<(StatusCode, Json<DatasetSummary>), ApiError> {
    if body.is_empty() {
        return Err(ApiError::BadRequest("Upload body is empty".to_string()));
    }

    let dataset = state
        .loader
        .load_bytes(&body, params.name.as_deref())
        .map_err(|e| {
            warn!("Rejected upload: {}", e);
            ApiError::from(e)
        })?;

    let dashboard = Dashboard::build(dataset).map_err(|e| {
        warn!("Rejected upload: {}", e);
        ApiError::from(e)
    })?;

    let summary = dashboard.summary();
    state.replace(dashboard).await;

    info!(
        "Session dataset {} loaded ({} divisions, {} fights)",
        summary.id, summary.division_count, summary.total_fights
    );
    if !summary.inconsistent_divisions.is_empty() {
        warn!(
            "{} divisions have outcome counts that don't match total fights",
            summary.inconsistent_divisions.len()
        );
    }

    Ok((StatusCode::CREATED, Json(summary)))
}

pub async fn get_dataset(State(state): State<AppState>) -> Result<Json<DatasetResponse>, ApiError> {
    let dashboard = require_dashboard(&state).await?;
    Ok(Json(DatasetResponse {
        summary: dashboard.summary(),
        rows: dashboard.rows(),
    }))
}

pub async fn clear_dataset(State(state): State<AppState>) -> StatusCode {
    if state.clear().await {
        info!("Session dataset discarded");
    }
    StatusCode::NO_CONTENT
}
