//! Overview analytics: date-range filtering and the derived series the
//! dashboard charts are drawn from.

use anyhow::Result;
use chrono::{Duration, Local, NaiveDate};
use std::collections::BTreeMap;
use tracing::info;

use crate::backend::domain::intake_service::IntakeService;
use crate::backend::domain::milestone_service::MilestoneService;
use crate::backend::domain::models::event::Event;
use crate::backend::io::rest::mappers::event_mapper::EventMapper;
use crate::backend::storage::{Connection, EventStorage, SettingsStorage};
use shared::{Activity, ActivityCount, AnalyticsReport, DailyAmount, MeasurementPoint};

/// Inclusive date range for a report; unset bounds fall back to the
/// trailing seven days ending today.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    #[error("End date must fall after start date")]
    InvalidDateRange,
}

#[derive(Clone)]
pub struct AnalyticsService<C: Connection> {
    event_repository: C::EventRepository,
    settings_repository: C::SettingsRepository,
    intake_service: IntakeService,
    milestone_service: MilestoneService,
}

impl<C: Connection> AnalyticsService<C> {
    pub fn new(
        connection: &C,
        intake_service: IntakeService,
        milestone_service: MilestoneService,
    ) -> Self {
        Self {
            event_repository: connection.create_event_repository(),
            settings_repository: connection.create_settings_repository(),
            intake_service,
            milestone_service,
        }
    }

    /// Build the overview report for an inclusive date range.
    ///
    /// A range with `start > end` is a validation error surfaced to the
    /// user; an empty filtered set simply yields empty series.
    pub async fn build_report(&self, query: AnalyticsQuery) -> Result<AnalyticsReport> {
        let today = Local::now().date_naive();
        let end_date = query.end_date.unwrap_or(today);
        let start_date = query.start_date.unwrap_or(end_date - Duration::days(7));

        if start_date > end_date {
            return Err(AnalyticsError::InvalidDateRange.into());
        }

        let events = self.event_repository.load_events().await?;

        let flat_target = self.settings_repository.load_daily_target().await?;
        let recommended = self.settings_repository.load_recommended_ml_per_kg().await?;
        let daily_target_ml = self
            .intake_service
            .daily_target(&events, flat_target, recommended);

        let age_message = self
            .settings_repository
            .load_date_of_birth()
            .await?
            .map(|dob| self.milestone_service.age_message(dob, today));

        // Chronological order makes "last per group" a plain overwrite
        let mut in_range: Vec<&Event> = events
            .iter()
            .filter(|e| {
                let date = e.date();
                date >= start_date && date <= end_date
            })
            .collect();
        in_range.sort_by_key(|e| e.timestamp);

        info!(
            "Analytics report for {} to {}: {} of {} events in range",
            start_date,
            end_date,
            in_range.len(),
            events.len()
        );

        Ok(AnalyticsReport {
            start_date,
            end_date,
            age_message,
            daily_target_ml,
            most_recent: most_recent_per_activity(&in_range),
            activity_counts: activity_counts(&in_range),
            daily_amounts: daily_amounts(&in_range),
            weight_series: measurement_series(&in_range, Activity::Weight, |e| e.weight_kg),
            length_series: measurement_series(&in_range, Activity::Length, |e| e.length_cm),
        })
    }
}

/// Chronologically last event per activity, newest activity first
fn most_recent_per_activity(events: &[&Event]) -> Vec<shared::Event> {
    let mut last_per_activity: BTreeMap<Activity, &Event> = BTreeMap::new();
    for event in events {
        last_per_activity.insert(event.activity.clone(), *event);
    }

    let mut latest: Vec<&Event> = last_per_activity.into_values().collect();
    latest.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    latest
        .into_iter()
        .map(|e| EventMapper::to_dto(e.clone()))
        .collect()
}

/// Care-event counts per (date, activity); measurement rows are excluded
/// from the count series
fn activity_counts(events: &[&Event]) -> Vec<ActivityCount> {
    let mut counts: BTreeMap<(NaiveDate, Activity), u32> = BTreeMap::new();
    for event in events {
        if event.activity.is_measurement() {
            continue;
        }
        *counts
            .entry((event.date(), event.activity.clone()))
            .or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|((date, activity), count)| ActivityCount {
            date,
            activity,
            count,
        })
        .collect()
}

/// Milliliters consumed per date; events without a recorded amount count
/// as zero toward the sum
fn daily_amounts(events: &[&Event]) -> Vec<DailyAmount> {
    let mut totals: BTreeMap<NaiveDate, u32> = BTreeMap::new();
    for event in events {
        if event.activity.is_measurement() {
            continue;
        }
        *totals.entry(event.date()).or_insert(0) += event.amount_ml.unwrap_or(0);
    }

    totals
        .into_iter()
        .map(|(date, total_ml)| DailyAmount { date, total_ml })
        .collect()
}

/// Value-vs-date series for one measurement activity, nulls dropped
fn measurement_series(
    events: &[&Event],
    activity: Activity,
    value: fn(&Event) -> Option<f64>,
) -> Vec<MeasurementPoint> {
    events
        .iter()
        .filter(|e| e.activity == activity)
        .filter_map(|e| {
            value(e).map(|v| MeasurementPoint {
                date: e.date(),
                value: v,
            })
        })
        .collect()
}
