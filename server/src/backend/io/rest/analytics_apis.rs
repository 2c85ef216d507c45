//! # REST API for Analytics
//!
//! The overview report endpoint.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{error, info};

use crate::backend::domain::analytics_service::{AnalyticsError, AnalyticsQuery};
use crate::backend::AppState;

// Query parameters for the report endpoint
#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Build the overview report for an inclusive date range.
/// Defaults to the trailing seven days when no range is given.
pub async fn get_report(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> impl IntoResponse {
    info!("GET /api/analytics - query: {:?}", query);

    let query = AnalyticsQuery {
        start_date: query.start_date,
        end_date: query.end_date,
    };

    match state.analytics_service.build_report(query).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => match e.downcast_ref::<AnalyticsError>() {
            Some(validation) => {
                (StatusCode::BAD_REQUEST, validation.to_string()).into_response()
            }
            None => {
                error!("Failed to build analytics report: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error building analytics report",
                )
                    .into_response()
            }
        },
    }
}
