use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::backend::storage::traits::Connection;

/// File name of the event table inside the data directory
pub const HISTORY_FILE: &str = "history.csv";

/// Header row of the event table
pub const EVENTS_CSV_HEADER: &str = "Date-Time,Activity,Amount Consumed,Weight,Length\n";

/// CsvConnection manages the data directory and hands out file paths for
/// the event table and the settings documents.
#[derive(Clone)]
pub struct CsvConnection {
    base_directory: PathBuf,
}

impl CsvConnection {
    /// Create a new connection with a base directory, creating it if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Create a connection in the default data directory.
    ///
    /// `BABY_TRACKER_DATA_DIR` overrides the location; otherwise the data
    /// lives in ~/Documents/Baby Tracker.
    pub fn new_default() -> Result<Self> {
        if let Ok(dir) = std::env::var("BABY_TRACKER_DATA_DIR") {
            info!("Using data directory from environment: {}", dir);
            return Self::new(dir);
        }

        let home_dir = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| anyhow::anyhow!("Could not determine home directory"))?;

        let data_dir = PathBuf::from(home_dir).join("Documents").join("Baby Tracker");
        info!("Using default data directory: {}", data_dir.display());
        Self::new(data_dir)
    }

    /// Path of the event table
    pub fn events_file_path(&self) -> PathBuf {
        self.base_directory.join(HISTORY_FILE)
    }

    /// Path of a settings document inside the data directory
    pub fn settings_file_path(&self, file_name: &str) -> PathBuf {
        self.base_directory.join(file_name)
    }

    /// Make sure the event table exists with its header row
    pub fn ensure_events_file_exists(&self) -> Result<()> {
        if !self.base_directory.exists() {
            fs::create_dir_all(&self.base_directory)?;
        }

        let file_path = self.events_file_path();
        if !file_path.exists() {
            fs::write(&file_path, EVENTS_CSV_HEADER)?;
        }

        Ok(())
    }

    /// The data directory this connection works against
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }
}

impl Connection for CsvConnection {
    type EventRepository = super::event_repository::EventRepository;
    type SettingsRepository = super::settings_repository::SettingsRepository;

    fn create_event_repository(&self) -> Self::EventRepository {
        super::event_repository::EventRepository::new(self.clone())
    }

    fn create_settings_repository(&self) -> Self::SettingsRepository {
        super::settings_repository::SettingsRepository::new(self.clone())
    }
}
