//! # Storage Traits
//!
//! Storage abstraction traits that let the domain layer work with different
//! backends (local CSV/JSON files, object storage, databases) without
//! modification.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::backend::domain::models::event::Event;

/// Interface for event table storage.
///
/// The table is a single flat resource: every mutation is a whole-table
/// read-modify-write, because rows must be re-sorted by timestamp on each
/// append.
#[async_trait]
pub trait EventStorage: Send + Sync {
    /// Append one event and persist the re-sorted table.
    /// Returns the updated table, newest first.
    async fn append_event(&self, event: &Event) -> Result<Vec<Event>>;

    /// Load the full table, newest first.
    /// A missing or empty store yields an empty table, never an error.
    async fn load_events(&self) -> Result<Vec<Event>>;

    /// Overwrite the whole table with the given rows (admin bulk edit)
    async fn replace_events(&self, events: &[Event]) -> Result<()>;
}

/// Interface for the settings documents.
///
/// Each setting is an independent single-key document; a missing document
/// yields its default, and a save is a full overwrite of that one document.
#[async_trait]
pub trait SettingsStorage: Send + Sync {
    /// Flat daily milk target in ml; 600 when the document is missing
    async fn load_daily_target(&self) -> Result<u32>;

    async fn save_daily_target(&self, target_ml: u32) -> Result<()>;

    /// Recommended intake per kg of body weight; `None` until configured
    async fn load_recommended_ml_per_kg(&self) -> Result<Option<u32>>;

    async fn save_recommended_ml_per_kg(&self, ml_per_kg: u32) -> Result<()>;

    /// Date of birth; `None` until configured
    async fn load_date_of_birth(&self) -> Result<Option<NaiveDate>>;

    async fn save_date_of_birth(&self, date_of_birth: NaiveDate) -> Result<()>;
}

/// Factory trait for storage connections.
///
/// Abstracts away the concrete backend and hands out repositories, so the
/// domain services never name a storage implementation directly.
pub trait Connection: Send + Sync + Clone {
    type EventRepository: EventStorage + Clone;
    type SettingsRepository: SettingsStorage + Clone;

    fn create_event_repository(&self) -> Self::EventRepository;

    fn create_settings_repository(&self) -> Self::SettingsRepository;
}
