//! Daily intake target derivation.

use tracing::debug;

use crate::backend::domain::models::event::Event;
use shared::Activity;

/// Derives the recommended daily intake from the event table and settings.
#[derive(Clone)]
pub struct IntakeService;

impl IntakeService {
    pub fn new() -> Self {
        Self
    }

    /// Daily intake target in milliliters.
    ///
    /// Uses the most recent Weight event with a recorded value together with
    /// the per-kg recommendation; when either is unavailable this falls back
    /// to the flat configured target. The fallback is a recovered condition,
    /// not an error.
    pub fn daily_target(
        &self,
        events: &[Event],
        flat_target_ml: u32,
        recommended_ml_per_kg: Option<u32>,
    ) -> u32 {
        let latest_weight = events
            .iter()
            .filter(|e| e.activity == Activity::Weight)
            .filter_map(|e| e.weight_kg.map(|kg| (e.timestamp, kg)))
            .max_by_key(|(timestamp, _)| *timestamp);

        match (latest_weight, recommended_ml_per_kg) {
            (Some((_, weight_kg)), Some(ml_per_kg)) if ml_per_kg > 0 => {
                (weight_kg * f64::from(ml_per_kg)).round() as u32
            }
            _ => {
                debug!("No usable weight record, falling back to flat daily target");
                flat_target_ml
            }
        }
    }
}

impl Default for IntakeService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(timestamp: &str, activity: Activity, weight_kg: Option<f64>) -> Event {
        Event::new(
            Event::parse_timestamp(timestamp).unwrap(),
            activity,
            None,
            weight_kg,
            None,
        )
        .unwrap()
    }

    #[test]
    fn no_weight_rows_falls_back_to_flat_target() {
        let service = IntakeService::new();
        let events = vec![event("2024-01-15 10:30:00", Activity::Drink, None)];

        assert_eq!(service.daily_target(&events, 600, Some(150)), 600);
    }

    #[test]
    fn derives_target_from_latest_weight() {
        let service = IntakeService::new();
        let events = vec![
            event("2024-01-15 09:00:00", Activity::Weight, Some(5.0)),
            event("2024-01-01 09:00:00", Activity::Weight, Some(4.2)),
        ];

        assert_eq!(service.daily_target(&events, 600, Some(150)), 750);
    }

    #[test]
    fn latest_weight_wins_regardless_of_table_order() {
        let service = IntakeService::new();
        // Oldest first: the repository normally hands out newest first, but
        // the derivation must not depend on that
        let events = vec![
            event("2024-01-01 09:00:00", Activity::Weight, Some(4.0)),
            event("2024-01-20 09:00:00", Activity::Weight, Some(6.0)),
        ];

        assert_eq!(service.daily_target(&events, 500, Some(100)), 600);
    }

    #[test]
    fn missing_recommendation_falls_back_to_flat_target() {
        let service = IntakeService::new();
        let events = vec![event("2024-01-15 09:00:00", Activity::Weight, Some(5.0))];

        assert_eq!(service.daily_target(&events, 650, None), 650);
    }

    #[test]
    fn weight_rows_without_values_are_ignored() {
        let service = IntakeService::new();
        // A zero weight normalizes to None at construction
        let events = vec![event("2024-01-15 09:00:00", Activity::Weight, Some(0.0))];

        assert_eq!(service.daily_target(&events, 600, Some(150)), 600);
    }

    #[test]
    fn rounds_derived_target_to_whole_milliliters() {
        let service = IntakeService::new();
        let events = vec![event("2024-01-15 09:00:00", Activity::Weight, Some(4.37))];

        // 4.37 kg * 150 ml/kg = 655.5 ml
        assert_eq!(service.daily_target(&events, 600, Some(150)), 656);
    }
}
