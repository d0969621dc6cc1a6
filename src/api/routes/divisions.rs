use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::{require_dashboard, ApiError};
use crate::dashboard::DivisionDetail;

#[derive(Debug, Serialize)]
pub struct DivisionsResponse {
    pub divisions: Vec<String>,
}

/// Options for the division selector, in file order.
pub async fn list_divisions(
    State(state): State<AppState>,
) -> Result<Json<DivisionsResponse>, ApiError> {
    let dashboard = require_dashboard(&state).await?;
    let divisions = dashboard
        .divisions()
        .into_iter()
        .map(String::from)
        .collect();
    Ok(Json(DivisionsResponse { divisions }))
}

pub async fn get_division(
    State(state): State<AppState>,
    Path(division): Path<String>,
) -> Result<Json<DivisionDetail>, ApiError> {
    let dashboard = require_dashboard(&state).await?;
    let detail = dashboard.select(&division)?;
    Ok(Json(detail))
}
