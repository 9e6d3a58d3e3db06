//! Repository for the `projects` table.

use chrono::Utc;
use sqlx::{Row, SqliteConnection, SqlitePool};
use weekly_core::types::{new_id, parse_timestamp};

use crate::models::project::{Project, ProjectFields};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, client, pm, period, code, created_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project with a fresh id, returning the created row.
    pub async fn create(
        pool: &SqlitePool,
        input: &ProjectFields,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (id, name, client, pm, period, code, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(new_id())
            .bind(&input.name)
            .bind(&input.client)
            .bind(&input.pm)
            .bind(&input.period)
            .bind(&input.code)
            .bind(Utc::now())
            .fetch_one(pool)
            .await
    }

    /// Find a project by id.
    pub async fn find_by_id(pool: &SqlitePool, id: &str) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = ?");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all projects ordered by most recently created first.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Project>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM projects ORDER BY created_at DESC, rowid DESC");
        sqlx::query_as::<_, Project>(&query).fetch_all(pool).await
    }

    /// Replace every editable field of a project.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: &str,
        input: &ProjectFields,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET name = ?, client = ?, pm = ?, period = ?, code = ?
             WHERE id = ?
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.name)
            .bind(&input.client)
            .bind(&input.pm)
            .bind(&input.period)
            .bind(&input.code)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a project by id. Returns `true` if a row was removed.
    ///
    /// Report items naming this project are left as they are.
    pub async fn delete(pool: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Insert a project unless its `id` already exists. Returns `true` if a
    /// row was inserted.
    pub async fn insert_if_absent(
        conn: &mut SqliteConnection,
        project: &Project,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO projects (id, name, client, pm, period, code, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&project.id)
        .bind(&project.name)
        .bind(&project.client)
        .bind(&project.pm)
        .bind(&project.period)
        .bind(&project.code)
        .bind(project.created_at)
        .execute(conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Insert a project, fully overwriting any row with the same `id`.
    pub async fn upsert(
        conn: &mut SqliteConnection,
        project: &Project,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT OR REPLACE INTO projects (id, name, client, pm, period, code, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&project.id)
        .bind(&project.name)
        .bind(&project.client)
        .bind(&project.pm)
        .bind(&project.period)
        .bind(&project.code)
        .bind(project.created_at)
        .execute(conn)
        .await?;
        Ok(())
    }

    /// Insert every project whose `id` is not yet present, in one
    /// transaction. Returns how many rows were inserted.
    pub async fn insert_missing(
        pool: &SqlitePool,
        projects: &[Project],
    ) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut inserted = 0;
        for project in projects {
            if Self::insert_if_absent(&mut *tx, project).await? {
                inserted += 1;
            }
        }
        tx.commit().await?;
        Ok(inserted)
    }

    /// Read every project from another registry database.
    ///
    /// The source may predate the `code` column or hold NULLs, so columns are
    /// read leniently. Rows without an id or a name are skipped.
    pub async fn list_external(source: &SqlitePool) -> Result<Vec<Project>, sqlx::Error> {
        let rows = sqlx::query("SELECT * FROM projects").fetch_all(source).await?;
        let now = Utc::now();

        let text = |row: &sqlx::sqlite::SqliteRow, column: &str| -> Option<String> {
            row.try_get::<Option<String>, _>(column).ok().flatten()
        };

        let mut projects = Vec::with_capacity(rows.len());
        for row in &rows {
            let id = text(row, "id").filter(|id| !id.trim().is_empty());
            let name = text(row, "name").filter(|name| !name.trim().is_empty());
            let (Some(id), Some(name)) = (id, name) else {
                tracing::warn!("Skipping external project row without id or name");
                continue;
            };
            projects.push(Project {
                id,
                name,
                client: text(row, "client").unwrap_or_default(),
                pm: text(row, "pm").unwrap_or_default(),
                period: text(row, "period").unwrap_or_default(),
                code: text(row, "code").unwrap_or_default(),
                created_at: text(row, "created_at")
                    .as_deref()
                    .and_then(parse_timestamp)
                    .unwrap_or(now),
            });
        }
        Ok(projects)
    }
}
