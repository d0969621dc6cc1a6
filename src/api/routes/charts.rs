//! Chart series for the dashboard front-end.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::{require_dashboard, ApiError};
use crate::dashboard::{DivisionTotal, OutcomeShare};

#[derive(Debug, Serialize)]
pub struct OutcomeChartResponse {
    pub shares: Vec<OutcomeShare>,
}

#[derive(Debug, Serialize)]
pub struct TotalsChartResponse {
    pub totals: Vec<DivisionTotal>,
}

/// Stacked bar data: finish percentages per division.
pub async fn outcome_chart(
    State(state): State<AppState>,
) -> Result<Json<OutcomeChartResponse>, ApiError> {
    let dashboard = require_dashboard(&state).await?;
    Ok(Json(OutcomeChartResponse {
        shares: dashboard.outcome_shares(),
    }))
}

/// Bar data: total fights per division, busiest first.
pub async fn totals_chart(
    State(state): State<AppState>,
) -> Result<Json<TotalsChartResponse>, ApiError> {
    let dashboard = require_dashboard(&state).await?;
    Ok(Json(TotalsChartResponse {
        totals: dashboard.totals_by_division(),
    }))
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::*;
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_outcome_chart() {
        let state = loaded_state().await;
        let (status, json) = get_json(&state, "/api/charts/outcomes").await;

        assert_eq!(status, StatusCode::OK);
        let shares = json["shares"].as_array().unwrap();
        assert_eq!(shares.len(), 9);
        assert_eq!(
            shares[0],
            json!({
                "division": "Flyweight",
                "total_fights": 40,
                "outcome": "KO/TKO",
                "percentage": 25.0,
            })
        );
        assert_eq!(shares[5]["outcome"], "Decision");
        assert_eq!(shares[5]["percentage"], 18.0);
    }

    #[tokio::test]
    async fn test_totals_chart() {
        let state = loaded_state().await;
        let (status, json) = get_json(&state, "/api/charts/totals").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json["totals"],
            json!([
                {"division": "Heavyweight", "total_fights": 100},
                {"division": "Light Heavyweight", "total_fights": 80},
                {"division": "Flyweight", "total_fights": 40},
            ])
        );
    }

    #[tokio::test]
    async fn test_charts_before_upload() {
        let state = test_state();
        let (status, _) = get_json(&state, "/api/charts/outcomes").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = get_json(&state, "/api/charts/totals").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
