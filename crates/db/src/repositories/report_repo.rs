//! Repository for the `reports` table.

use chrono::NaiveDate;
use sqlx::{SqliteConnection, SqlitePool};
use weekly_core::report::ReportItem;

use crate::models::report::ReportRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, week_start, division, project, prev_progress, curr_progress, remarks, created_at";

/// Provides week-scoped reads and writes for report items.
pub struct ReportRepo;

impl ReportRepo {
    /// All items for one week, in the order they were saved.
    pub async fn list_by_week(
        pool: &SqlitePool,
        week_start: NaiveDate,
    ) -> Result<Vec<ReportItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reports WHERE week_start = ? ORDER BY created_at, rowid"
        );
        let rows = sqlx::query_as::<_, ReportRow>(&query)
            .bind(week_start)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(ReportItem::from).collect())
    }

    /// Every stored item, newest week first, then by division.
    pub async fn list_all(pool: &SqlitePool) -> Result<Vec<ReportItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reports ORDER BY week_start DESC, division ASC, rowid ASC"
        );
        let rows = sqlx::query_as::<_, ReportRow>(&query)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(ReportItem::from).collect())
    }

    /// Distinct weeks that have at least one stored item, oldest first.
    pub async fn list_weeks(pool: &SqlitePool) -> Result<Vec<NaiveDate>, sqlx::Error> {
        let rows: Vec<(NaiveDate,)> =
            sqlx::query_as("SELECT DISTINCT week_start FROM reports ORDER BY week_start ASC")
                .fetch_all(pool)
                .await?;
        Ok(rows.into_iter().map(|(week,)| week).collect())
    }

    /// Delete every item of one week. Returns the number of rows removed.
    pub async fn delete_week(
        conn: &mut SqliteConnection,
        week_start: NaiveDate,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reports WHERE week_start = ?")
            .bind(week_start)
            .execute(conn)
            .await?;
        Ok(result.rows_affected())
    }

    /// Insert one item. Fails on a duplicate `id`.
    pub async fn insert(
        conn: &mut SqliteConnection,
        item: &ReportItem,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO reports
                (id, week_start, division, project, prev_progress, curr_progress, remarks, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, COALESCE(?, CURRENT_TIMESTAMP))",
        )
        .bind(&item.id)
        .bind(item.week_start)
        .bind(&item.division)
        .bind(&item.project)
        .bind(&item.prev_progress)
        .bind(&item.curr_progress)
        .bind(&item.remarks)
        .bind(item.created_at)
        .execute(conn)
        .await?;
        Ok(())
    }

    /// Insert an item, fully overwriting any row with the same `id`.
    pub async fn upsert(
        conn: &mut SqliteConnection,
        item: &ReportItem,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT OR REPLACE INTO reports
                (id, week_start, division, project, prev_progress, curr_progress, remarks, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, COALESCE(?, CURRENT_TIMESTAMP))",
        )
        .bind(&item.id)
        .bind(item.week_start)
        .bind(&item.division)
        .bind(&item.project)
        .bind(&item.prev_progress)
        .bind(&item.curr_progress)
        .bind(&item.remarks)
        .bind(item.created_at)
        .execute(conn)
        .await?;
        Ok(())
    }

    /// Replace one week's items inside a single transaction.
    ///
    /// On any failure the transaction is rolled back (on drop) and the week
    /// keeps its previous rows.
    pub async fn replace_week(
        pool: &SqlitePool,
        week_start: NaiveDate,
        items: &[ReportItem],
    ) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;
        Self::delete_week(&mut *tx, week_start).await?;
        for item in items {
            Self::insert(&mut *tx, item).await?;
        }
        tx.commit().await?;
        Ok(items.len() as u64)
    }
}
