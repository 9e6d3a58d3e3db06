//! Calendar-week arithmetic for weekly reports.
//!
//! A reporting week is identified by the date of its Monday (`week_start`).
//! Stored rows carry that date as a plain `YYYY-MM-DD` string; every other
//! week-derived value (previous week, Friday, week number) is computed here.

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::error::CoreError;

/// Wire and storage format of a `week_start` value.
pub const WEEK_START_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` week start supplied by a caller.
///
/// The date is taken as-is: it is NOT moved to the Monday of its week.
pub fn parse_week_start(raw: &str) -> Result<NaiveDate, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Missing weekStart param".to_string()));
    }
    NaiveDate::parse_from_str(trimmed, WEEK_START_FORMAT).map_err(|_| {
        CoreError::Validation(format!(
            "Invalid weekStart '{trimmed}': expected YYYY-MM-DD"
        ))
    })
}

/// The week start exactly seven days before `week_start`.
pub fn previous_week_start(week_start: NaiveDate) -> NaiveDate {
    week_start - Days::new(7)
}

/// The Monday of the week containing `date`.
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_monday();
    date - Days::new(u64::from(offset))
}

/// The Friday of the week containing `date`.
pub fn friday_of(date: NaiveDate) -> NaiveDate {
    monday_of(date) + Days::new(4)
}

/// Whether `date` is already a canonical week start.
pub fn is_week_start(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Mon
}

/// Week-of-year number with Monday-start weeks, where week 1 is the week
/// containing January 1st.
///
/// Dates in the last days of December that share a week with the next
/// January 1st belong to week 1 of the following year.
pub fn week_of_year(date: NaiveDate) -> u32 {
    let monday = monday_of(date);

    if let Some(next_jan1) = NaiveDate::from_ymd_opt(date.year() + 1, 1, 1) {
        if monday >= monday_of(next_jan1) {
            return 1;
        }
    }

    let first_monday = NaiveDate::from_ymd_opt(date.year(), 1, 1)
        .map(monday_of)
        .unwrap_or(monday);
    let weeks = (monday - first_monday).num_days() / 7;
    u32::try_from(weeks).unwrap_or(0) + 1
}
