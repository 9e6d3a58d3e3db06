//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// `?weekStart=YYYY-MM-DD`, used by the week read and export endpoints.
///
/// Kept as a raw string so a missing or malformed value surfaces as a
/// validation error rather than an extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct WeekQuery {
    #[serde(rename = "weekStart")]
    pub week_start: Option<String>,
}
