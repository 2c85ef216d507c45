//! # REST API Interface Layer
//!
//! HTTP endpoints for the baby tracker. This layer handles request and
//! response serialization, input validation at the edge, and the
//! translation of domain errors into HTTP status codes; it contains no
//! business logic of its own.

pub mod analytics_apis;
pub mod event_apis;
pub mod mappers;
pub mod settings_apis;
pub mod weather_apis;

pub use analytics_apis::*;
pub use event_apis::*;
pub use settings_apis::*;
pub use weather_apis::*;
