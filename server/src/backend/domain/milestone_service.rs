//! Age-message derivation.
//!
//! Produces the status line shown at the top of the overview page. The
//! branch order matters: a year anniversary beats a day-of-month match,
//! which beats the 28-day and 7-day multiples, which beat the raw day
//! count. The 28-day "months" deliberately disagree with calendar months on
//! some days; the fixed precedence keeps the original behavior.

use chrono::{Datelike, Local, NaiveDate};

#[derive(Clone)]
pub struct MilestoneService;

impl MilestoneService {
    pub fn new() -> Self {
        Self
    }

    /// Age status line for the current local date
    pub fn age_message_today(&self, date_of_birth: NaiveDate) -> String {
        self.age_message(date_of_birth, Local::now().date_naive())
    }

    /// Age status line for an explicit reference date
    pub fn age_message(&self, date_of_birth: NaiveDate, today: NaiveDate) -> String {
        let days_old = (today - date_of_birth).num_days();

        let year_anniversary =
            today.month() == date_of_birth.month() && today.day() == date_of_birth.day();
        let day_of_month_matches = today.day() == date_of_birth.day();

        if year_anniversary {
            let years = today.year() - date_of_birth.year();
            let unit = if years == 1 { "year" } else { "years" };
            format!("🎂 HURRAY! {} {} old today 🎁", years, unit)
        } else if day_of_month_matches {
            let months = calendar_months_between(date_of_birth, today);
            format!("🎈 HURRAY! {} calendar months old today 🎉", months)
        } else if days_old % 28 == 0 {
            format!("🎈 HURRAY! {:.1} months old today 🎉", days_old as f64 / 28.0)
        } else if days_old % 7 == 0 {
            format!("🎈 HURRAY! {:.1} weeks old today 🥳", days_old as f64 / 7.0)
        } else {
            format!("🎈 {} days old today", days_old)
        }
    }
}

impl Default for MilestoneService {
    fn default() -> Self {
        Self::new()
    }
}

/// Calendar-aware month difference: whole months elapsed, not day-count
/// division. A partial month (today's day before the birth day) does not
/// count.
fn calendar_months_between(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut months = (today.year() - date_of_birth.year()) * 12
        + (today.month() as i32 - date_of_birth.month() as i32);
    if today.day() < date_of_birth.day() {
        months -= 1;
    }
    months
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn exact_year_anniversary_reports_years() {
        let service = MilestoneService::new();
        let message = service.age_message(date(2023, 6, 1), date(2024, 6, 1));
        assert!(message.contains("1 year old today"));

        let message = service.age_message(date(2023, 6, 1), date(2025, 6, 1));
        assert!(message.contains("2 years old today"));
    }

    #[test]
    fn day_of_month_match_reports_calendar_months() {
        let service = MilestoneService::new();
        let message = service.age_message(date(2024, 1, 15), date(2024, 3, 15));
        assert!(message.contains("2 calendar months old today"));
    }

    #[test]
    fn day_of_month_match_beats_week_multiple() {
        let service = MilestoneService::new();
        // 91 days is exactly 13 weeks, but the day of month matches first
        let message = service.age_message(date(2024, 1, 2), date(2024, 4, 2));
        assert!(message.contains("3 calendar months old today"));
    }

    #[test]
    fn twenty_eight_day_multiple_reports_months() {
        let service = MilestoneService::new();
        // 28 days after Jan 5 is Feb 2: no day-of-month match
        let message = service.age_message(date(2024, 1, 5), date(2024, 2, 2));
        assert!(message.contains("1.0 months old today"));
    }

    #[test]
    fn week_multiple_reports_weeks() {
        let service = MilestoneService::new();
        // 35 days after Jan 5 is Feb 9: not a 28-multiple, day differs
        let message = service.age_message(date(2024, 1, 5), date(2024, 2, 9));
        assert!(message.contains("5.0 weeks old today"));
    }

    #[test]
    fn plain_day_count_otherwise() {
        let service = MilestoneService::new();
        let message = service.age_message(date(2024, 1, 5), date(2024, 1, 9));
        assert!(message.contains("4 days old today"));
    }

    #[test]
    fn calendar_month_count_borrows_for_partial_months() {
        assert_eq!(
            calendar_months_between(date(2024, 1, 31), date(2024, 3, 1)),
            1
        );
        assert_eq!(
            calendar_months_between(date(2024, 1, 15), date(2025, 2, 15)),
            13
        );
    }
}
