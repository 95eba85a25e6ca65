//! Reports module for the family ledger
//!
//! Provides the monthly summary and the per-category spending report.

pub mod categories;
pub mod summary;

pub use categories::{CategoryReport, CategoryReportRow};
pub use summary::MonthlySummary;
