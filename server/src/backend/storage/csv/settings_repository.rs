//! JSON settings documents.
//!
//! Each setting lives in its own single-key JSON file next to the event
//! table. A missing document yields the stated default, never an error, and
//! a save is an atomic full overwrite of that one document.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs;
use tracing::debug;

use super::connection::CsvConnection;
use crate::backend::domain::settings_service::DEFAULT_DAILY_TARGET_ML;
use crate::backend::storage::SettingsStorage;
use shared::DATE_OF_BIRTH_FORMAT;

const DAILY_TARGET_FILE: &str = "daily_milk_target.json";
const RECOMMENDATION_FILE: &str = "recommendation.json";
const DATE_OF_BIRTH_FILE: &str = "date_of_birth.json";

#[derive(Serialize, Deserialize)]
struct DailyTargetDocument {
    daily_milk_target: u32,
}

#[derive(Serialize, Deserialize)]
struct RecommendationDocument {
    recommended_amount_ml_per_kg: u32,
}

#[derive(Serialize, Deserialize)]
struct DateOfBirthDocument {
    date_of_birth: String,
}

/// File-based settings repository, one JSON document per key
#[derive(Clone)]
pub struct SettingsRepository {
    connection: CsvConnection,
}

impl SettingsRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn read_document<T: DeserializeOwned>(&self, file_name: &str) -> Result<Option<T>> {
        let path = self.connection.settings_file_path(file_name);

        if !path.exists() {
            debug!("Settings document {} not found, using default", file_name);
            return Ok(None);
        }

        let contents = fs::read_to_string(&path)?;
        let document = serde_json::from_str(&contents)
            .with_context(|| format!("malformed settings document {}", path.display()))?;
        Ok(Some(document))
    }

    fn write_document<T: Serialize>(&self, file_name: &str, document: &T) -> Result<()> {
        let path = self.connection.settings_file_path(file_name);
        let contents = serde_json::to_string(document)?;

        // Same atomic pattern as the event table
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, contents)?;
        fs::rename(&temp_path, &path)?;

        debug!("Saved settings document {}", file_name);
        Ok(())
    }
}

#[async_trait]
impl SettingsStorage for SettingsRepository {
    async fn load_daily_target(&self) -> Result<u32> {
        let document: Option<DailyTargetDocument> = self.read_document(DAILY_TARGET_FILE)?;
        Ok(document
            .map(|d| d.daily_milk_target)
            .unwrap_or(DEFAULT_DAILY_TARGET_ML))
    }

    async fn save_daily_target(&self, target_ml: u32) -> Result<()> {
        self.write_document(
            DAILY_TARGET_FILE,
            &DailyTargetDocument {
                daily_milk_target: target_ml,
            },
        )
    }

    async fn load_recommended_ml_per_kg(&self) -> Result<Option<u32>> {
        let document: Option<RecommendationDocument> = self.read_document(RECOMMENDATION_FILE)?;
        Ok(document.map(|d| d.recommended_amount_ml_per_kg))
    }

    async fn save_recommended_ml_per_kg(&self, ml_per_kg: u32) -> Result<()> {
        self.write_document(
            RECOMMENDATION_FILE,
            &RecommendationDocument {
                recommended_amount_ml_per_kg: ml_per_kg,
            },
        )
    }

    async fn load_date_of_birth(&self) -> Result<Option<NaiveDate>> {
        let document: Option<DateOfBirthDocument> = self.read_document(DATE_OF_BIRTH_FILE)?;
        match document {
            Some(d) => {
                let date = NaiveDate::parse_from_str(&d.date_of_birth, DATE_OF_BIRTH_FORMAT)
                    .with_context(|| {
                        format!("invalid date_of_birth value '{}'", d.date_of_birth)
                    })?;
                Ok(Some(date))
            }
            None => Ok(None),
        }
    }

    async fn save_date_of_birth(&self, date_of_birth: NaiveDate) -> Result<()> {
        self.write_document(
            DATE_OF_BIRTH_FILE,
            &DateOfBirthDocument {
                date_of_birth: date_of_birth.format(DATE_OF_BIRTH_FORMAT).to_string(),
            },
        )
    }
}
