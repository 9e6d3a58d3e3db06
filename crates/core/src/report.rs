//! Weekly report line items.
//!
//! A [`ReportItem`] is one division/project's progress entry for one week.
//! [`ReportItemInput`] is the loosely-shaped form the editor submits on
//! save: every field may be absent and absent text becomes empty.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{new_id, EntityId, Timestamp};

/// One division/project progress entry for one reporting week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportItem {
    pub id: EntityId,
    /// Monday of the reporting week.
    pub week_start: NaiveDate,
    pub division: String,
    pub project: String,
    /// Multi-line narrative of what was done the week before.
    pub prev_progress: String,
    /// Multi-line narrative of what was done this week.
    pub curr_progress: String,
    pub remarks: String,
    /// Set when the row is written. Synthesized drafts have none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}

/// An item as submitted by the editor for saving.
///
/// `week_start` is deliberately absent: the week always comes from the save
/// request itself.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportItemInput {
    pub id: Option<EntityId>,
    pub division: Option<String>,
    pub project: Option<String>,
    pub prev_progress: Option<String>,
    pub curr_progress: Option<String>,
    pub remarks: Option<String>,
}

impl ReportItemInput {
    /// Turn the submitted item into a row for `week_start`, minting an id
    /// when the item has none (or an empty one).
    pub fn into_item(self, week_start: NaiveDate, created_at: Timestamp) -> ReportItem {
        let id = self
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(new_id);
        ReportItem {
            id,
            week_start,
            division: self.division.unwrap_or_default(),
            project: self.project.unwrap_or_default(),
            prev_progress: self.prev_progress.unwrap_or_default(),
            curr_progress: self.curr_progress.unwrap_or_default(),
            remarks: self.remarks.unwrap_or_default(),
            created_at: Some(created_at),
        }
    }
}

impl From<ReportItem> for ReportItemInput {
    fn from(item: ReportItem) -> Self {
        Self {
            id: Some(item.id),
            division: Some(item.division),
            project: Some(item.project),
            prev_progress: Some(item.prev_progress),
            curr_progress: Some(item.curr_progress),
            remarks: Some(item.remarks),
        }
    }
}
