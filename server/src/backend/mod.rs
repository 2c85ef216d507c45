//! # Backend Module
//!
//! All non-UI logic for the baby tracker.
//!
//! The backend follows a layered architecture:
//! ```text
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (services, business rules)
//!     ↓
//! Storage Layer (CSV event table, JSON settings documents)
//! ```
//!
//! The interface layer is UI-agnostic: any frontend that can speak HTTP can
//! drive the entry form, the overview, and the admin centre.

pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    routing::{get, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::backend::domain::{
    AnalyticsService, EventService, IntakeService, MilestoneService, SettingsService,
    WeatherService,
};
use crate::backend::storage::csv::connection::CsvConnection;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub event_service: EventService<CsvConnection>,
    pub settings_service: SettingsService<CsvConnection>,
    pub analytics_service: AnalyticsService<CsvConnection>,
    pub weather_service: WeatherService,
}

/// Initialize the backend with all required services
pub async fn initialize_backend() -> Result<AppState> {
    info!("Setting up event store");
    let connection = CsvConnection::new_default()?;

    info!("Setting up domain services");
    let event_service = EventService::new(&connection);
    let settings_service = SettingsService::new(&connection);
    let analytics_service =
        AnalyticsService::new(&connection, IntakeService::new(), MilestoneService::new());
    let weather_service = WeatherService::from_env()?;

    Ok(AppState {
        event_service,
        settings_service,
        analytics_service,
        weather_service,
    })
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    // CORS setup to allow the frontend dev server to make requests
    let cors = CorsLayer::new()
        .allow_origin("http://localhost:8080".parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route(
            "/events",
            get(io::list_events)
                .post(io::create_event)
                .put(io::replace_events),
        )
        .route("/analytics", get(io::get_report))
        .route("/settings", get(io::get_settings))
        .route("/settings/daily-target", put(io::set_daily_target))
        .route("/settings/recommendation", put(io::set_recommendation))
        .route("/settings/date-of-birth", put(io::set_date_of_birth))
        .route("/weather", get(io::get_weather));

    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state)
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use tempfile::TempDir;

    /// Build an AppState over a throwaway data directory
    pub fn setup_test_state() -> (AppState, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();

        let state = AppState {
            event_service: EventService::new(&connection),
            settings_service: SettingsService::new(&connection),
            analytics_service: AnalyticsService::new(
                &connection,
                IntakeService::new(),
                MilestoneService::new(),
            ),
            weather_service: WeatherService::new(None, "Amsterdam".to_string()).unwrap(),
        };

        (state, temp_dir)
    }
}
