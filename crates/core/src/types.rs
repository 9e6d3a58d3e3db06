use chrono::{DateTime, NaiveDateTime, Utc};

/// Primary keys are opaque strings (UUIDs for anything minted here).
pub type EntityId = String;

/// All timestamps are UTC.
pub type Timestamp = DateTime<Utc>;

/// Mint a fresh identifier for a report item or project.
pub fn new_id() -> EntityId {
    uuid::Uuid::new_v4().to_string()
}

/// Parse a stored or imported timestamp.
///
/// Accepts RFC 3339 as well as the `YYYY-MM-DD HH:MM:SS` form SQLite's
/// `CURRENT_TIMESTAMP` produces (interpreted as UTC).
pub fn parse_timestamp(raw: &str) -> Option<Timestamp> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}
