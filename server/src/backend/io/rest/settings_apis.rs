//! # REST API for Settings
//!
//! The admin centre's settings endpoints.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{error, info};

use crate::backend::AppState;
use shared::{SetDailyTargetRequest, SetDateOfBirthRequest, SetRecommendationRequest};

/// All settings with defaults applied for missing documents
pub async fn get_settings(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/settings");

    match state.settings_service.get_settings().await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to load settings: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error loading settings").into_response()
        }
    }
}

/// Set the flat daily milk target
pub async fn set_daily_target(
    State(state): State<AppState>,
    Json(request): Json<SetDailyTargetRequest>,
) -> impl IntoResponse {
    info!("PUT /api/settings/daily-target - request: {:?}", request);

    match state.settings_service.set_daily_target(request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to set daily target: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

/// Set the recommended amount of milk per kg of body weight
pub async fn set_recommendation(
    State(state): State<AppState>,
    Json(request): Json<SetRecommendationRequest>,
) -> impl IntoResponse {
    info!("PUT /api/settings/recommendation - request: {:?}", request);

    match state.settings_service.set_recommendation(request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to set recommendation: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

/// Set the date of birth (initial set only)
pub async fn set_date_of_birth(
    State(state): State<AppState>,
    Json(request): Json<SetDateOfBirthRequest>,
) -> impl IntoResponse {
    info!("PUT /api/settings/date-of-birth - request: {:?}", request);

    match state.settings_service.set_date_of_birth(request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to set date of birth: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::testing::setup_test_state;

    #[tokio::test]
    async fn get_settings_handler_returns_defaults() {
        let (state, _temp) = setup_test_state();

        let response = get_settings(State(state)).await;
        assert_eq!(response.into_response().status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn set_daily_target_handler_rejects_low_values() {
        let (state, _temp) = setup_test_state();

        let response = set_daily_target(
            State(state),
            Json(SetDailyTargetRequest {
                daily_milk_target_ml: 100,
            }),
        )
        .await;
        assert_eq!(response.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn set_date_of_birth_handler_rejects_second_write() {
        let (state, _temp) = setup_test_state();

        let response = set_date_of_birth(
            State(state.clone()),
            Json(SetDateOfBirthRequest {
                date_of_birth: "15-01-2024".to_string(),
            }),
        )
        .await;
        assert_eq!(response.into_response().status(), StatusCode::OK);

        let response = set_date_of_birth(
            State(state),
            Json(SetDateOfBirthRequest {
                date_of_birth: "20-02-2024".to_string(),
            }),
        )
        .await;
        assert_eq!(response.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
