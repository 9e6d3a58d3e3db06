//! Domain logic for the weekly status report service.
//!
//! Holds everything that does not touch a database or HTTP: report and
//! project rules, week arithmetic, the carry-over resolver, the week save
//! workflow (over the [`store::ReportStore`] seam) and document export.

pub mod carry_over;
pub mod document;
pub mod error;
pub mod project;
pub mod report;
pub mod save;
pub mod store;
pub mod types;
pub mod week;

#[cfg(test)]
mod testing;
