use std::sync::Arc;

use weekly_db::store::SqliteReportStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the pool and the report store share one connection pool.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: weekly_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Report store the carry-over resolver and save workflow run against.
    pub reports: SqliteReportStore,
}

impl AppState {
    pub fn new(pool: weekly_db::DbPool, config: ServerConfig) -> Self {
        let reports = SqliteReportStore::new(pool.clone(), config.atomic_saves);
        Self {
            pool,
            config: Arc::new(config),
            reports,
        }
    }
}
