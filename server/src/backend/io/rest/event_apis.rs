//! # REST API for Events
//!
//! Endpoints for logging events, listing the raw table, and the admin bulk
//! edit.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{error, info};

use crate::backend::AppState;
use shared::{CreateEventRequest, ReplaceEventsRequest};

/// List the full event table, newest first
pub async fn list_events(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/events");

    match state.event_service.list_events().await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to list events: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing events").into_response()
        }
    }
}

/// Log a new event (the entry form's submit)
pub async fn create_event(
    State(state): State<AppState>,
    Json(request): Json<CreateEventRequest>,
) -> impl IntoResponse {
    info!("POST /api/events - request: {:?}", request);

    match state.event_service.log_event(request).await {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to log event: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

/// Replace the whole event table (admin bulk edit)
pub async fn replace_events(
    State(state): State<AppState>,
    Json(request): Json<ReplaceEventsRequest>,
) -> impl IntoResponse {
    info!("PUT /api/events - {} rows", request.events.len());

    match state.event_service.replace_events(request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to replace events: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}
