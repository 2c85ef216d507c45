//! # Domain Module
//!
//! Business logic for the baby tracker, independent of any storage backend
//! or interface layer.
//!
//! - **event_service**: logging, listing, and admin bulk edit of the event
//!   table
//! - **settings_service**: the three settings documents with validation
//! - **intake_service**: daily intake target derivation
//! - **milestone_service**: the calendar-aware age status line
//! - **analytics_service**: date-range filtering and the chart series
//! - **weather_service**: external weather lookup with graceful degradation

pub mod analytics_service;
pub mod event_service;
pub mod intake_service;
pub mod milestone_service;
pub mod models;
pub mod settings_service;
pub mod weather_service;

pub use analytics_service::*;
pub use event_service::*;
pub use intake_service::*;
pub use milestone_service::*;
pub use settings_service::*;
pub use weather_service::*;
