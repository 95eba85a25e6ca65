//! Export module for the family ledger
//!
//! Provides data export in two formats:
//! - CSV: the transaction list (spreadsheet-compatible)
//! - JSON: the full ledger with budgets, for backup or other tools

pub mod csv;
pub mod json;

pub use self::csv::{default_file_name, export_transactions_csv, EXPORT_DATE_FORMAT};
pub use self::json::{export_full_json, FullExport, EXPORT_SCHEMA_VERSION};
