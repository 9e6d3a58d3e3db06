pub mod backup;
pub mod projects;
pub mod reports;
