//! Backup download and restore routes, mounted at the API root.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::backup;
use crate::state::AppState;

/// Restore documents carry the whole database.
const RESTORE_BODY_LIMIT: usize = 32 * 1024 * 1024;

/// ```text
/// GET    /backup    -> export
/// POST   /backup    -> restore
/// POST   /restore   -> restore
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/backup", get(backup::export).post(backup::restore))
        .route("/restore", post(backup::restore))
        .layer(DefaultBodyLimit::max(RESTORE_BODY_LIMIT))
}
