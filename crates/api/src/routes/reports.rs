//! Route definitions for the `/reports` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::reports;
use crate::state::AppState;

/// Routes mounted at `/reports`.
///
/// ```text
/// GET    /?weekStart=      -> get_week
/// POST   /                 -> save
/// GET    /status           -> status
/// GET    /export?weekStart= -> export_week
/// POST   /export           -> export_items
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(reports::get_week).post(reports::save))
        .route("/status", get(reports::status))
        .route(
            "/export",
            get(reports::export_week).post(reports::export_items),
        )
}
