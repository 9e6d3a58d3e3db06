//! Row models and DTOs.
//!
//! Each submodule contains a `FromRow` struct matching the table row and,
//! where the API writes the table, a `Deserialize` input DTO.

pub mod backup;
pub mod project;
pub mod report;
