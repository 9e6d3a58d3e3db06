//! Handlers for the `/projects` resource.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use weekly_core::error::CoreError;
use weekly_core::types::EntityId;
use weekly_db::models::project::{Project, ProjectInput};
use weekly_db::repositories::ProjectRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub success: bool,
    pub count: u64,
}

fn not_found(id: EntityId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Project",
        id,
    })
}

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<ProjectInput>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Project>)> {
    let Json(input) = payload?;
    let fields = input.validate()?;
    let project = ProjectRepo::create(&state.pool, &fields).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/v1/projects
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Project>>> {
    let projects = ProjectRepo::list(&state.pool).await?;
    Ok(Json(projects))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Project>> {
    let project = ProjectRepo::find_by_id(&state.pool, &id).await?;
    project.map(Json).ok_or_else(|| not_found(id))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    payload: Result<Json<ProjectInput>, JsonRejection>,
) -> AppResult<Json<Project>> {
    let Json(input) = payload?;
    let fields = input.validate()?;
    let project = ProjectRepo::update(&state.pool, &id, &fields).await?;
    project.map(Json).ok_or_else(|| not_found(id))
}

/// DELETE /api/v1/projects/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<StatusCode> {
    if ProjectRepo::delete(&state.pool, &id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// POST /api/v1/projects/import
///
/// Copy projects from the registry at `IMPORT_DATABASE_URL`. Rows whose id
/// already exists locally are left untouched.
pub async fn import(State(state): State<AppState>) -> AppResult<Json<ImportResponse>> {
    let source_url = state
        .config
        .import_database_url
        .as_deref()
        .ok_or_else(|| AppError::ImportSource("IMPORT_DATABASE_URL is not configured".into()))?;

    let source = weekly_db::connect_read_only(source_url)
        .await
        .map_err(|e| AppError::ImportSource(format!("Cannot open import source: {e}")))?;
    let fetched = ProjectRepo::list_external(&source).await;
    source.close().await;
    let projects =
        fetched.map_err(|e| AppError::ImportSource(format!("Cannot read import source: {e}")))?;

    let count = ProjectRepo::insert_missing(&state.pool, &projects).await?;
    tracing::info!(found = projects.len(), inserted = count, "Imported projects");

    Ok(Json(ImportResponse {
        success: true,
        count,
    }))
}
