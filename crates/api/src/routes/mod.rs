pub mod backup;
pub mod health;
pub mod projects;
pub mod reports;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /reports                 read week (GET ?weekStart=), save week (POST)
/// /reports/status          weeks with saved rows (GET)
/// /reports/export          download .docx (GET ?weekStart=, POST {date, items})
///
/// /projects                list, create
/// /projects/import         copy from the external registry (POST)
/// /projects/{id}           get, update, delete
///
/// /backup                  export (GET), restore (POST)
/// /restore                 restore (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/reports", reports::router())
        .nest("/projects", projects::router())
        .merge(backup::router())
}
