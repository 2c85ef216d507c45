use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Wire format for event timestamps, e.g. "2024-01-15 10:30:00"
pub const EVENT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Wire format for the date-of-birth setting, e.g. "15-01-2024"
pub const DATE_OF_BIRTH_FORMAT: &str = "%d-%m-%Y";

/// Categorical type of a logged event.
///
/// The entry form only offers the known variants; the event table itself
/// stores free-form labels, so anything an admin edit introduced survives a
/// load/rewrite cycle as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Activity {
    Drink,
    Diaper,
    PoopyDiaper,
    Weight,
    Length,
    VitaminD,
    Nap,
    /// Label not in the fixed enumeration (admin-edited rows)
    Other(String),
}

impl Activity {
    /// The label stored in the `Activity` column
    pub fn label(&self) -> &str {
        match self {
            Activity::Drink => "Drink",
            Activity::Diaper => "Diaper",
            Activity::PoopyDiaper => "Poopy Diaper",
            Activity::Weight => "Weight",
            Activity::Length => "Length",
            Activity::VitaminD => "Vitamin D",
            Activity::Nap => "Nap",
            Activity::Other(label) => label,
        }
    }

    /// Parse a column label back into an activity; unknown labels are kept as `Other`
    pub fn from_label(label: &str) -> Activity {
        match label {
            "Drink" => Activity::Drink,
            "Diaper" => Activity::Diaper,
            "Poopy Diaper" => Activity::PoopyDiaper,
            "Weight" => Activity::Weight,
            "Length" => Activity::Length,
            "Vitamin D" => Activity::VitaminD,
            "Nap" => Activity::Nap,
            other => Activity::Other(other.to_string()),
        }
    }

    /// Weight and Length rows carry growth measurements, not daily care events
    pub fn is_measurement(&self) -> bool {
        matches!(self, Activity::Weight | Activity::Length)
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Activity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Activity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Activity::from_label(&label))
    }
}

/// One logged baby-care occurrence.
///
/// At most one of `amount_ml`/`weight_kg`/`length_cm` is populated,
/// determined by the activity. Absent values are `None`, never zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Timestamp in `YYYY-MM-DD HH:MM:SS` format; primary sort key (descending)
    pub timestamp: String,
    pub activity: Activity,
    /// Milliliters consumed; Drink events only
    pub amount_ml: Option<u32>,
    /// Weight in kilograms; Weight events only
    pub weight_kg: Option<f64>,
    /// Length in centimeters; Length events only
    pub length_cm: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateEventRequest {
    /// Optional timestamp override (`YYYY-MM-DD HH:MM:SS`); current local time if not provided
    pub timestamp: Option<String>,
    pub activity: Activity,
    pub amount_ml: Option<u32>,
    pub weight_kg: Option<f64>,
    pub length_cm: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateEventResponse {
    pub event: Event,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventListResponse {
    /// Full event table, newest first
    pub events: Vec<Event>,
}

/// Admin bulk edit: the whole table is replaced by the submitted rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplaceEventsRequest {
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplaceEventsResponse {
    pub count: usize,
    pub success_message: String,
}

/// All dashboard settings with defaults applied for missing documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsResponse {
    /// Flat daily intake target in milliliters (default 600)
    pub daily_milk_target_ml: u32,
    /// Recommended intake per kilogram of body weight; unset until configured
    pub recommended_ml_per_kg: Option<u32>,
    /// Date of birth in `DD-MM-YYYY` format; unset until configured
    pub date_of_birth: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetDailyTargetRequest {
    pub daily_milk_target_ml: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetRecommendationRequest {
    pub recommended_ml_per_kg: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetDateOfBirthRequest {
    /// `DD-MM-YYYY`; immutable after the initial set
    pub date_of_birth: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateSettingResponse {
    pub settings: SettingsResponse,
    pub success_message: String,
}

/// Row count for one activity on one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityCount {
    pub date: NaiveDate,
    pub activity: Activity,
    pub count: u32,
}

/// Total milliliters consumed on one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAmount {
    pub date: NaiveDate,
    pub total_ml: u32,
}

/// One growth measurement (weight or length) plotted against its date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Everything the overview page renders for an inclusive date range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Age status line; absent until a date of birth is configured
    pub age_message: Option<String>,
    /// Daily intake target in milliliters, derived from the latest weight
    /// when possible, otherwise the flat configured target
    pub daily_target_ml: u32,
    /// Chronologically last event per activity within the range
    pub most_recent: Vec<Event>,
    /// Care-event counts per (date, activity); measurements excluded
    pub activity_counts: Vec<ActivityCount>,
    /// Milliliters consumed per date (missing amounts count as zero)
    pub daily_amounts: Vec<DailyAmount>,
    pub weight_series: Vec<MeasurementPoint>,
    pub length_series: Vec<MeasurementPoint>,
}

/// Weather summary for the dashboard header.
///
/// The detail fields are absent when the upstream lookup failed; `message`
/// always carries something renderable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub message: String,
    pub temperature: Option<f64>,
    pub summary: Option<String>,
    pub headline: Option<String>,
    pub icon: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_label_round_trip() {
        let known = [
            Activity::Drink,
            Activity::Diaper,
            Activity::PoopyDiaper,
            Activity::Weight,
            Activity::Length,
            Activity::VitaminD,
            Activity::Nap,
        ];
        for activity in known {
            assert_eq!(Activity::from_label(activity.label()), activity);
        }
    }

    #[test]
    fn unknown_label_survives_round_trip() {
        let activity = Activity::from_label("Bath");
        assert_eq!(activity, Activity::Other("Bath".to_string()));
        assert_eq!(activity.label(), "Bath");
    }

    #[test]
    fn activity_serializes_as_label_string() {
        let json = serde_json::to_string(&Activity::PoopyDiaper).unwrap();
        assert_eq!(json, "\"Poopy Diaper\"");

        let parsed: Activity = serde_json::from_str("\"Vitamin D\"").unwrap();
        assert_eq!(parsed, Activity::VitaminD);
    }

    #[test]
    fn event_json_shape() {
        let event = Event {
            timestamp: "2024-01-15 10:30:00".to_string(),
            activity: Activity::Drink,
            amount_ml: Some(120),
            weight_kg: None,
            length_cm: None,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["activity"], "Drink");
        assert_eq!(json["amount_ml"], 120);
        assert!(json["weight_kg"].is_null());
    }
}
