//! The storage seam the carry-over resolver and save workflow run against.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::report::ReportItem;

/// Report storage as seen by the week-level workflows.
///
/// Implementations are explicitly constructed handles (a pool wrapper, an
/// in-memory fake); nothing here reaches for global state.
#[async_trait]
pub trait ReportStore: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// All stored items whose `week_start` equals `week_start`, in insertion
    /// order.
    async fn items_for_week(&self, week_start: NaiveDate)
        -> Result<Vec<ReportItem>, Self::Error>;

    /// Whether [`ReportStore::replace_week_atomic`] can apply a delete plus
    /// inserts as one unit.
    fn supports_transactions(&self) -> bool;

    /// Delete every row for `week_start` and insert `items`, all or nothing.
    /// Returns the number of rows inserted.
    async fn replace_week_atomic(
        &self,
        week_start: NaiveDate,
        items: &[ReportItem],
    ) -> Result<u64, Self::Error>;

    /// Delete every row for `week_start`, returning how many were removed.
    async fn delete_week(&self, week_start: NaiveDate) -> Result<u64, Self::Error>;

    /// Insert a single row.
    async fn insert_item(&self, item: &ReportItem) -> Result<(), Self::Error>;
}
