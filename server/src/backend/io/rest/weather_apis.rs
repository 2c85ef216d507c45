//! # REST API for Weather
//!
//! The dashboard's weather line. Upstream failures are already degraded to
//! the fallback message inside the service, so this endpoint never errors.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::info;

use crate::backend::AppState;

/// Current conditions for the configured location
pub async fn get_weather(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/weather");

    let report = state.weather_service.current_weather().await;
    (StatusCode::OK, Json(report)).into_response()
}
