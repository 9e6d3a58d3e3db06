//! [`ReportStore`] backed by the SQLite pool.

use async_trait::async_trait;
use chrono::NaiveDate;
use weekly_core::report::ReportItem;
use weekly_core::store::ReportStore;

use crate::repositories::ReportRepo;
use crate::DbPool;

/// Pool-backed report store.
///
/// `transactional` selects whether saves run as one transaction or as the
/// sequential delete-then-insert fallback.
#[derive(Debug, Clone)]
pub struct SqliteReportStore {
    pool: DbPool,
    transactional: bool,
}

impl SqliteReportStore {
    pub fn new(pool: DbPool, transactional: bool) -> Self {
        Self {
            pool,
            transactional,
        }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl ReportStore for SqliteReportStore {
    type Error = sqlx::Error;

    async fn items_for_week(
        &self,
        week_start: NaiveDate,
    ) -> Result<Vec<ReportItem>, sqlx::Error> {
        ReportRepo::list_by_week(&self.pool, week_start).await
    }

    fn supports_transactions(&self) -> bool {
        self.transactional
    }

    async fn replace_week_atomic(
        &self,
        week_start: NaiveDate,
        items: &[ReportItem],
    ) -> Result<u64, sqlx::Error> {
        ReportRepo::replace_week(&self.pool, week_start, items).await
    }

    async fn delete_week(&self, week_start: NaiveDate) -> Result<u64, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        ReportRepo::delete_week(&mut *conn, week_start).await
    }

    async fn insert_item(&self, item: &ReportItem) -> Result<(), sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        ReportRepo::insert(&mut *conn, item).await
    }
}
