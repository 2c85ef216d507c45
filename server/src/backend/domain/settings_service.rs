//! Dashboard settings: flat daily target, per-kg recommendation, and date
//! of birth. Each is an independent document with a default when missing.

use anyhow::Result;
use chrono::NaiveDate;
use tracing::info;

use crate::backend::storage::{Connection, SettingsStorage};
use shared::{
    SetDailyTargetRequest, SetDateOfBirthRequest, SetRecommendationRequest, SettingsResponse,
    UpdateSettingResponse, DATE_OF_BIRTH_FORMAT,
};

/// Flat daily intake target used when no document is stored
pub const DEFAULT_DAILY_TARGET_ML: u32 = 600;

/// Lowest accepted flat daily target
pub const MIN_DAILY_TARGET_ML: u32 = 600;

/// Lowest accepted per-kg recommendation
pub const MIN_RECOMMENDED_ML_PER_KG: u32 = 100;

#[derive(Debug, thiserror::Error)]
pub enum SettingsValidationError {
    #[error("Daily milk target must be at least 600 ml")]
    DailyTargetTooLow,
    #[error("Recommended amount must be at least 100 ml per kg")]
    RecommendationTooLow,
    #[error("Date of birth must use the DD-MM-YYYY format")]
    InvalidDateOfBirth,
    #[error("Date of birth is already set and cannot be changed")]
    DateOfBirthAlreadySet,
}

#[derive(Clone)]
pub struct SettingsService<C: Connection> {
    settings_repository: C::SettingsRepository,
}

impl<C: Connection> SettingsService<C> {
    pub fn new(connection: &C) -> Self {
        Self {
            settings_repository: connection.create_settings_repository(),
        }
    }

    /// All settings with defaults applied for missing documents
    pub async fn get_settings(&self) -> Result<SettingsResponse> {
        let daily_milk_target_ml = self.settings_repository.load_daily_target().await?;
        let recommended_ml_per_kg = self.settings_repository.load_recommended_ml_per_kg().await?;
        let date_of_birth = self
            .settings_repository
            .load_date_of_birth()
            .await?
            .map(|d| d.format(DATE_OF_BIRTH_FORMAT).to_string());

        Ok(SettingsResponse {
            daily_milk_target_ml,
            recommended_ml_per_kg,
            date_of_birth,
        })
    }

    pub async fn set_daily_target(
        &self,
        request: SetDailyTargetRequest,
    ) -> Result<UpdateSettingResponse> {
        if request.daily_milk_target_ml < MIN_DAILY_TARGET_ML {
            return Err(SettingsValidationError::DailyTargetTooLow.into());
        }

        self.settings_repository
            .save_daily_target(request.daily_milk_target_ml)
            .await?;
        info!("Daily milk target set to {} ml", request.daily_milk_target_ml);

        Ok(UpdateSettingResponse {
            settings: self.get_settings().await?,
            success_message: format!(
                "Daily milk target set to {} ml",
                request.daily_milk_target_ml
            ),
        })
    }

    pub async fn set_recommendation(
        &self,
        request: SetRecommendationRequest,
    ) -> Result<UpdateSettingResponse> {
        if request.recommended_ml_per_kg < MIN_RECOMMENDED_ML_PER_KG {
            return Err(SettingsValidationError::RecommendationTooLow.into());
        }

        self.settings_repository
            .save_recommended_ml_per_kg(request.recommended_ml_per_kg)
            .await?;
        info!(
            "Recommended amount set to {} ml per kg",
            request.recommended_ml_per_kg
        );

        Ok(UpdateSettingResponse {
            settings: self.get_settings().await?,
            success_message: format!(
                "Recommended amount set to {} ml per kg",
                request.recommended_ml_per_kg
            ),
        })
    }

    /// Set the date of birth. The first write persists; rewriting the same
    /// date is a no-op, and any different date is rejected.
    pub async fn set_date_of_birth(
        &self,
        request: SetDateOfBirthRequest,
    ) -> Result<UpdateSettingResponse> {
        let date_of_birth =
            NaiveDate::parse_from_str(&request.date_of_birth, DATE_OF_BIRTH_FORMAT)
                .map_err(|_| SettingsValidationError::InvalidDateOfBirth)?;

        match self.settings_repository.load_date_of_birth().await? {
            Some(existing) if existing != date_of_birth => {
                return Err(SettingsValidationError::DateOfBirthAlreadySet.into());
            }
            Some(_) => {}
            None => {
                self.settings_repository
                    .save_date_of_birth(date_of_birth)
                    .await?;
                info!("Date of birth set to {}", request.date_of_birth);
            }
        }

        Ok(UpdateSettingResponse {
            settings: self.get_settings().await?,
            success_message: format!("Date of birth set to {}", request.date_of_birth),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::csv::connection::CsvConnection;
    use tempfile::TempDir;

    fn setup_test_service() -> (SettingsService<CsvConnection>, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();
        (SettingsService::new(&connection), temp_dir)
    }

    #[tokio::test]
    async fn defaults_before_any_write() {
        let (service, _temp) = setup_test_service();

        let settings = service.get_settings().await.unwrap();
        assert_eq!(settings.daily_milk_target_ml, 600);
        assert_eq!(settings.recommended_ml_per_kg, None);
        assert_eq!(settings.date_of_birth, None);
    }

    #[tokio::test]
    async fn daily_target_below_minimum_is_rejected() {
        let (service, _temp) = setup_test_service();

        let result = service
            .set_daily_target(SetDailyTargetRequest {
                daily_milk_target_ml: 500,
            })
            .await;
        assert!(result.is_err());

        let settings = service.get_settings().await.unwrap();
        assert_eq!(settings.daily_milk_target_ml, 600);
    }

    #[tokio::test]
    async fn recommendation_below_minimum_is_rejected() {
        let (service, _temp) = setup_test_service();

        let result = service
            .set_recommendation(SetRecommendationRequest {
                recommended_ml_per_kg: 50,
            })
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn updates_are_visible_in_settings() {
        let (service, _temp) = setup_test_service();

        service
            .set_daily_target(SetDailyTargetRequest {
                daily_milk_target_ml: 750,
            })
            .await
            .unwrap();
        let response = service
            .set_recommendation(SetRecommendationRequest {
                recommended_ml_per_kg: 150,
            })
            .await
            .unwrap();

        assert_eq!(response.settings.daily_milk_target_ml, 750);
        assert_eq!(response.settings.recommended_ml_per_kg, Some(150));
    }

    #[tokio::test]
    async fn date_of_birth_is_immutable_after_initial_set() {
        let (service, _temp) = setup_test_service();

        service
            .set_date_of_birth(SetDateOfBirthRequest {
                date_of_birth: "15-01-2024".to_string(),
            })
            .await
            .unwrap();

        // Rewriting the identical date is a no-op
        service
            .set_date_of_birth(SetDateOfBirthRequest {
                date_of_birth: "15-01-2024".to_string(),
            })
            .await
            .unwrap();

        // A different date is rejected
        let result = service
            .set_date_of_birth(SetDateOfBirthRequest {
                date_of_birth: "16-01-2024".to_string(),
            })
            .await;
        assert!(result.is_err());

        let settings = service.get_settings().await.unwrap();
        assert_eq!(settings.date_of_birth.as_deref(), Some("15-01-2024"));
    }

    #[tokio::test]
    async fn malformed_date_of_birth_is_rejected() {
        let (service, _temp) = setup_test_service();

        let result = service
            .set_date_of_birth(SetDateOfBirthRequest {
                date_of_birth: "2024-01-15".to_string(),
            })
            .await;
        assert!(result.is_err());
    }
}
