//! Reference project registry rules.
//!
//! Projects only feed the editor's project selector. Report items refer to
//! them by name, loosely, so nothing here cascades into reports.

use crate::error::CoreError;

/// Require a non-blank project name, returning it trimmed.
pub fn validate_project_name(name: Option<&str>) -> Result<String, CoreError> {
    match name.map(str::trim) {
        Some(name) if !name.is_empty() => Ok(name.to_string()),
        _ => Err(CoreError::Validation("Name is required".to_string())),
    }
}

/// Optional free-text project fields are stored as empty strings when absent.
pub fn optional_field(value: Option<String>) -> String {
    value.unwrap_or_default()
}
