//! Backup document shapes.
//!
//! Two shapes are accepted on import:
//!
//! - legacy: a bare JSON array of report rows (reports only);
//! - versioned: `{ version?, timestamp?, reports: [...], projects: [...] }`.
//!
//! [`BackupDocument::decode`] classifies and validates the whole document up
//! front, so a malformed document is rejected before any row is written.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use weekly_core::error::CoreError;
use weekly_core::project::validate_project_name;
use weekly_core::report::ReportItem;
use weekly_core::types::{new_id, parse_timestamp, Timestamp};
use weekly_core::week::WEEK_START_FORMAT;

use crate::models::project::Project;

/// Version written into exported documents.
pub const BACKUP_VERSION: u32 = 2;

/// Full dump produced by `GET /backup`.
#[derive(Debug, Clone, Serialize)]
pub struct BackupExport {
    pub version: u32,
    pub timestamp: Timestamp,
    pub reports: Vec<ReportItem>,
    pub projects: Vec<Project>,
}

/// A decoded, fully validated import document.
#[derive(Debug, Clone, PartialEq)]
pub enum BackupDocument {
    /// Bare array of report rows. Leaves projects untouched.
    Legacy { reports: Vec<ReportItem> },
    /// Object carrying both tables.
    Versioned {
        version: Option<u32>,
        reports: Vec<ReportItem>,
        projects: Vec<Project>,
    },
}

/// Report row as it may appear in a backup: every column optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawReport {
    id: Option<String>,
    week_start: Option<String>,
    division: Option<String>,
    project: Option<String>,
    prev_progress: Option<String>,
    curr_progress: Option<String>,
    remarks: Option<String>,
    created_at: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawProject {
    id: Option<String>,
    name: Option<String>,
    client: Option<String>,
    pm: Option<String>,
    period: Option<String>,
    code: Option<String>,
    created_at: Option<String>,
}

impl BackupDocument {
    /// Classify and validate a JSON backup document.
    pub fn decode(value: Value) -> Result<Self, CoreError> {
        let now = Utc::now();
        match value {
            Value::Array(rows) => Ok(Self::Legacy {
                reports: decode_reports(rows, now)?,
            }),
            Value::Object(mut map) => {
                let version = match map.remove("version") {
                    None | Some(Value::Null) => None,
                    Some(v) => Some(decode_version(&v)?),
                };
                let reports = take_array(&mut map, "reports")?;
                let projects = take_array(&mut map, "projects")?;
                Ok(Self::Versioned {
                    version,
                    reports: decode_reports(reports, now)?,
                    projects: decode_projects(projects, now)?,
                })
            }
            _ => Err(invalid("expected an array of reports or a backup object")),
        }
    }

    pub fn reports(&self) -> &[ReportItem] {
        match self {
            Self::Legacy { reports } | Self::Versioned { reports, .. } => reports,
        }
    }

    /// Project rows to restore; `None` for legacy documents.
    pub fn projects(&self) -> Option<&[Project]> {
        match self {
            Self::Legacy { .. } => None,
            Self::Versioned { projects, .. } => Some(projects),
        }
    }
}

fn invalid(detail: impl std::fmt::Display) -> CoreError {
    CoreError::Validation(format!("Invalid backup format: {detail}"))
}

fn decode_version(value: &Value) -> Result<u32, CoreError> {
    let version = value
        .as_u64()
        .and_then(|v| u32::try_from(v).ok())
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
        .ok_or_else(|| invalid("version must be a positive integer"))?;
    if version > BACKUP_VERSION {
        return Err(invalid(format!(
            "unsupported version {version} (newest supported is {BACKUP_VERSION})"
        )));
    }
    Ok(version)
}

fn take_array(
    map: &mut serde_json::Map<String, Value>,
    key: &str,
) -> Result<Vec<Value>, CoreError> {
    match map.remove(key) {
        Some(Value::Array(rows)) => Ok(rows),
        Some(_) => Err(invalid(format!("'{key}' must be an array"))),
        None => Err(invalid(format!("missing '{key}'"))),
    }
}

fn decode_reports(rows: Vec<Value>, now: Timestamp) -> Result<Vec<ReportItem>, CoreError> {
    rows.into_iter()
        .enumerate()
        .map(|(i, value)| -> Result<ReportItem, CoreError> {
            let raw: RawReport = serde_json::from_value(value)
                .map_err(|e| invalid(format!("reports[{i}]: {e}")))?;
            let week_raw = raw
                .week_start
                .ok_or_else(|| invalid(format!("reports[{i}]: missing week_start")))?;
            let week_start = NaiveDate::parse_from_str(week_raw.trim(), WEEK_START_FORMAT)
                .map_err(|_| {
                    invalid(format!("reports[{i}]: invalid week_start '{week_raw}'"))
                })?;
            Ok(ReportItem {
                id: non_blank_id(raw.id),
                week_start,
                division: raw.division.unwrap_or_default(),
                project: raw.project.unwrap_or_default(),
                prev_progress: raw.prev_progress.unwrap_or_default(),
                curr_progress: raw.curr_progress.unwrap_or_default(),
                remarks: raw.remarks.unwrap_or_default(),
                created_at: Some(created_at(raw.created_at.as_deref(), now, "reports", i)?),
            })
        })
        .collect()
}

fn decode_projects(rows: Vec<Value>, now: Timestamp) -> Result<Vec<Project>, CoreError> {
    rows.into_iter()
        .enumerate()
        .map(|(i, value)| -> Result<Project, CoreError> {
            let raw: RawProject = serde_json::from_value(value)
                .map_err(|e| invalid(format!("projects[{i}]: {e}")))?;
            let name = validate_project_name(raw.name.as_deref())
                .map_err(|_| invalid(format!("projects[{i}]: missing name")))?;
            Ok(Project {
                id: non_blank_id(raw.id),
                name,
                client: raw.client.unwrap_or_default(),
                pm: raw.pm.unwrap_or_default(),
                period: raw.period.unwrap_or_default(),
                code: raw.code.unwrap_or_default(),
                created_at: created_at(raw.created_at.as_deref(), now, "projects", i)?,
            })
        })
        .collect()
}

fn non_blank_id(id: Option<String>) -> String {
    id.filter(|id| !id.trim().is_empty()).unwrap_or_else(new_id)
}

fn created_at(
    raw: Option<&str>,
    now: Timestamp,
    table: &str,
    index: usize,
) -> Result<Timestamp, CoreError> {
    match raw {
        None => Ok(now),
        Some(s) if s.trim().is_empty() => Ok(now),
        Some(s) => parse_timestamp(s)
            .ok_or_else(|| invalid(format!("{table}[{index}]: invalid created_at '{s}'"))),
    }
}
