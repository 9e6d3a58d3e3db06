//! Handlers for whole-database backup and restore.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header::CONTENT_DISPOSITION;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use weekly_db::models::backup::BackupDocument;
use weekly_db::repositories::BackupRepo;

use crate::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct RestoreResponse {
    pub success: bool,
    pub reports: u64,
    pub projects: u64,
}

/// GET /api/v1/backup
///
/// Full dump of reports and projects as a downloadable JSON file.
pub async fn export(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let backup = BackupRepo::export(&state.pool).await?;
    let file_name = format!("weekly-backup-{}.json", backup.timestamp.format("%Y%m%d"));
    tracing::info!(
        reports = backup.reports.len(),
        projects = backup.projects.len(),
        "Exported backup",
    );

    Ok((
        StatusCode::OK,
        [(
            CONTENT_DISPOSITION,
            format!("attachment; filename=\"{file_name}\""),
        )],
        Json(backup),
    ))
}

/// POST /api/v1/backup, POST /api/v1/restore
///
/// Accepts a legacy array of reports or a versioned `{reports, projects}`
/// object. The document is validated in full before anything is written.
pub async fn restore(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<RestoreResponse>> {
    let Json(value) = payload?;
    let document = BackupDocument::decode(value)?;
    let summary = BackupRepo::import(&state.pool, &document).await?;
    tracing::info!(
        reports = summary.reports,
        projects = summary.projects,
        legacy = document.projects().is_none(),
        "Restored backup",
    );

    Ok(Json(RestoreResponse {
        success: true,
        reports: summary.reports,
        projects: summary.projects,
    }))
}
