//! Whole-database export and restore.

use chrono::Utc;
use serde::Serialize;
use sqlx::SqlitePool;

use crate::models::backup::{BackupDocument, BackupExport, BACKUP_VERSION};
use crate::repositories::{ProjectRepo, ReportRepo};

/// Row counts written by a restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub reports: u64,
    pub projects: u64,
}

pub struct BackupRepo;

impl BackupRepo {
    /// Snapshot every report and project.
    pub async fn export(pool: &SqlitePool) -> Result<BackupExport, sqlx::Error> {
        let reports = ReportRepo::list_all(pool).await?;
        let projects = ProjectRepo::list(pool).await?;
        Ok(BackupExport {
            version: BACKUP_VERSION,
            timestamp: Utc::now(),
            reports,
            projects,
        })
    }

    /// Write a decoded backup with insert-or-replace semantics, all in one
    /// transaction.
    ///
    /// Rows not named in the document are kept. A legacy document leaves
    /// the `projects` table untouched.
    pub async fn import(
        pool: &SqlitePool,
        document: &BackupDocument,
    ) -> Result<ImportSummary, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let mut summary = ImportSummary {
            reports: 0,
            projects: 0,
        };
        for item in document.reports() {
            ReportRepo::upsert(&mut *tx, item).await?;
            summary.reports += 1;
        }
        if let Some(projects) = document.projects() {
            for project in projects {
                ProjectRepo::upsert(&mut *tx, project).await?;
                summary.projects += 1;
            }
        }

        tx.commit().await?;
        Ok(summary)
    }
}
