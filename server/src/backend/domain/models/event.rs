//! Domain model for logged baby-care events.

use chrono::{NaiveDate, NaiveDateTime};
use shared::{Activity, EVENT_TIMESTAMP_FORMAT};

/// One logged occurrence with a timestamp and an activity-specific payload.
///
/// Invariant: at most one of `amount_ml`/`weight_kg`/`length_cm` is
/// populated, determined by the activity; absent values are `None`, never
/// zero. The constructor enforces this, so every `Event` in the system is
/// already normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub timestamp: NaiveDateTime,
    pub activity: Activity,
    pub amount_ml: Option<u32>,
    pub weight_kg: Option<f64>,
    pub length_cm: Option<f64>,
}

#[derive(Debug, thiserror::Error)]
pub enum EventValidationError {
    #[error("Timestamp must use the YYYY-MM-DD HH:MM:SS format")]
    InvalidTimestamp,
    #[error("Weight must be a non-negative number of kilograms")]
    InvalidWeight,
    #[error("Length must be a non-negative number of centimeters")]
    InvalidLength,
}

impl Event {
    /// Build a normalized event.
    ///
    /// The payload that does not belong to the activity is discarded, and a
    /// zero value is stored as `None`: a zero amount is indistinguishable
    /// from "not recorded".
    pub fn new(
        timestamp: NaiveDateTime,
        activity: Activity,
        amount_ml: Option<u32>,
        weight_kg: Option<f64>,
        length_cm: Option<f64>,
    ) -> Result<Self, EventValidationError> {
        let amount_ml = match activity {
            Activity::Drink => amount_ml.filter(|&ml| ml > 0),
            _ => None,
        };

        let weight_kg = match activity {
            Activity::Weight => {
                if let Some(kg) = weight_kg {
                    if !kg.is_finite() || kg < 0.0 {
                        return Err(EventValidationError::InvalidWeight);
                    }
                }
                weight_kg.filter(|&kg| kg > 0.0)
            }
            _ => None,
        };

        let length_cm = match activity {
            Activity::Length => {
                if let Some(cm) = length_cm {
                    if !cm.is_finite() || cm < 0.0 {
                        return Err(EventValidationError::InvalidLength);
                    }
                }
                length_cm.filter(|&cm| cm > 0.0)
            }
            _ => None,
        };

        Ok(Self {
            timestamp,
            activity,
            amount_ml,
            weight_kg,
            length_cm,
        })
    }

    /// Parse a wire/CSV timestamp (`YYYY-MM-DD HH:MM:SS`)
    pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, EventValidationError> {
        NaiveDateTime::parse_from_str(raw.trim(), EVENT_TIMESTAMP_FORMAT)
            .map_err(|_| EventValidationError::InvalidTimestamp)
    }

    /// Format the timestamp in the wire/CSV format
    pub fn format_timestamp(&self) -> String {
        self.timestamp.format(EVENT_TIMESTAMP_FORMAT).to_string()
    }

    /// Calendar date of the event, the grouping key for all daily series
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// The single populated payload value, if any
    pub fn value(&self) -> Option<f64> {
        self.amount_ml
            .map(f64::from)
            .or(self.weight_kg)
            .or(self.length_cm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(s: &str) -> NaiveDateTime {
        Event::parse_timestamp(s).unwrap()
    }

    #[test]
    fn zero_amount_normalizes_to_none() {
        let event = Event::new(
            ts("2024-01-15 10:30:00"),
            Activity::Drink,
            Some(0),
            None,
            None,
        )
        .unwrap();
        assert_eq!(event.amount_ml, None);
    }

    #[test]
    fn payload_for_wrong_activity_is_dropped() {
        let event = Event::new(
            ts("2024-01-15 10:30:00"),
            Activity::Diaper,
            Some(120),
            Some(5.0),
            Some(55.0),
        )
        .unwrap();
        assert_eq!(event.amount_ml, None);
        assert_eq!(event.weight_kg, None);
        assert_eq!(event.length_cm, None);
    }

    #[test]
    fn negative_weight_is_rejected() {
        let result = Event::new(
            ts("2024-01-15 10:30:00"),
            Activity::Weight,
            None,
            Some(-1.0),
            None,
        );
        assert!(matches!(result, Err(EventValidationError::InvalidWeight)));
    }

    #[test]
    fn timestamp_round_trip() {
        let event = Event::new(
            ts("2024-01-15 10:30:00"),
            Activity::Drink,
            Some(120),
            None,
            None,
        )
        .unwrap();
        assert_eq!(event.format_timestamp(), "2024-01-15 10:30:00");
        assert_eq!(event.date(), NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(event.value(), Some(120.0));
    }

    #[test]
    fn invalid_timestamp_is_rejected() {
        assert!(matches!(
            Event::parse_timestamp("15-01-2024 10:30"),
            Err(EventValidationError::InvalidTimestamp)
        ));
    }
}
