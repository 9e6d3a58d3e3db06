//! Report row model.

use chrono::NaiveDate;
use sqlx::FromRow;
use weekly_core::report::ReportItem;
use weekly_core::types::{EntityId, Timestamp};

/// A row from the `reports` table.
#[derive(Debug, Clone, FromRow)]
pub struct ReportRow {
    pub id: EntityId,
    pub week_start: NaiveDate,
    pub division: String,
    pub project: String,
    pub prev_progress: String,
    pub curr_progress: String,
    pub remarks: String,
    pub created_at: Timestamp,
}

impl From<ReportRow> for ReportItem {
    fn from(row: ReportRow) -> Self {
        Self {
            id: row.id,
            week_start: row.week_start,
            division: row.division,
            project: row.project,
            prev_progress: row.prev_progress,
            curr_progress: row.curr_progress,
            remarks: row.remarks,
            created_at: Some(row.created_at),
        }
    }
}
