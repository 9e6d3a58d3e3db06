//! Project entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use weekly_core::error::CoreError;
use weekly_core::project::{optional_field, validate_project_name};
use weekly_core::types::{EntityId, Timestamp};

/// A project row from the `projects` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Project {
    pub id: EntityId,
    pub name: String,
    pub client: String,
    pub pm: String,
    pub period: String,
    pub code: String,
    pub created_at: Timestamp,
}

/// DTO for creating or fully updating a project.
///
/// Only `name` is required; the other fields default to empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectInput {
    pub name: Option<String>,
    pub client: Option<String>,
    pub pm: Option<String>,
    pub period: Option<String>,
    pub code: Option<String>,
}

/// Validated project fields, ready to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFields {
    pub name: String,
    pub client: String,
    pub pm: String,
    pub period: String,
    pub code: String,
}

impl ProjectInput {
    pub fn validate(self) -> Result<ProjectFields, CoreError> {
        Ok(ProjectFields {
            name: validate_project_name(self.name.as_deref())?,
            client: optional_field(self.client),
            pm: optional_field(self.pm),
            period: optional_field(self.period),
            code: optional_field(self.code),
        })
    }
}
