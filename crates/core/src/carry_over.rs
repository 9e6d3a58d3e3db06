//! Carry-over resolution: what the editor shows for a given week.
//!
//! Saved rows for the requested week always win. Otherwise last week's rows
//! are turned into an unsaved draft where last week's "this week" becomes
//! this week's "last week". Resolution only reads; drafts reach the store
//! solely through [`crate::save::save_week`].

use chrono::NaiveDate;
use serde::Serialize;

use crate::report::ReportItem;
use crate::store::ReportStore;
use crate::types::new_id;
use crate::week::previous_week_start;

/// Items to show for a week, and whether they are an unsaved draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedWeek {
    pub items: Vec<ReportItem>,
    pub is_draft: bool,
}

impl ResolvedWeek {
    fn persisted(items: Vec<ReportItem>) -> Self {
        Self {
            items,
            is_draft: false,
        }
    }

    fn draft(items: Vec<ReportItem>) -> Self {
        Self {
            items,
            is_draft: true,
        }
    }
}

/// Resolve the items for `week_start`.
///
/// `week_start` must already be the canonical start of its week; a
/// non-Monday date makes the previous-week lookup miss.
pub async fn resolve_week<S>(store: &S, week_start: NaiveDate) -> Result<ResolvedWeek, S::Error>
where
    S: ReportStore + ?Sized,
{
    let current = store.items_for_week(week_start).await?;
    if !current.is_empty() {
        return Ok(ResolvedWeek::persisted(current));
    }

    let previous_start = previous_week_start(week_start);
    let previous = store.items_for_week(previous_start).await?;
    if previous.is_empty() {
        return Ok(ResolvedWeek::persisted(Vec::new()));
    }

    tracing::debug!(
        %week_start,
        %previous_start,
        count = previous.len(),
        "Synthesizing carry-over draft",
    );
    Ok(ResolvedWeek::draft(carry_forward(&previous, week_start)))
}

/// Seed a new week's draft from the previous week's items.
pub fn carry_forward(previous: &[ReportItem], week_start: NaiveDate) -> Vec<ReportItem> {
    previous
        .iter()
        .map(|item| ReportItem {
            id: new_id(),
            week_start,
            division: item.division.clone(),
            project: item.project.clone(),
            prev_progress: item.curr_progress.clone(),
            curr_progress: String::new(),
            remarks: item.remarks.clone(),
            created_at: None,
        })
        .collect()
}
