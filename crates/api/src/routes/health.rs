use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use weekly_core::save::SaveStrategy;

use crate::state::AppState;

/// Liveness report for the report service.
///
/// `status` is `degraded` when the report database cannot answer a
/// query; the process keeps serving so an operator can inspect it.
#[derive(Debug, Serialize)]
pub struct ServiceHealth {
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Strategy `PUT /api/v1/reports` will use for week saves.
    pub save_strategy: &'static str,
    /// Whether `POST /api/v1/projects/import` has a source registry.
    pub project_import: bool,
}

impl ServiceHealth {
    async fn collect(state: &AppState) -> Self {
        let db_healthy = match weekly_db::health_check(&state.pool).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Report database health check failed");
                false
            }
        };

        Self {
            status: if db_healthy { "ok" } else { "degraded" },
            version: env!("CARGO_PKG_VERSION"),
            db_healthy,
            save_strategy: SaveStrategy::for_store(&state.reports).as_str(),
            project_import: state.config.import_database_url.is_some(),
        }
    }
}

/// GET /health
async fn service_health(State(state): State<AppState>) -> Json<ServiceHealth> {
    Json(ServiceHealth::collect(&state).await)
}

/// Mounted at the root, outside `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(service_health))
}
