//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&SqlitePool` (or a connection, when the caller owns the
//! transaction) as the first argument.

pub mod backup_repo;
pub mod project_repo;
pub mod report_repo;

pub use backup_repo::{BackupRepo, ImportSummary};
pub use project_repo::ProjectRepo;
pub use report_repo::ReportRepo;
