//! Display formatting for terminal output
//!
//! Provides utilities for formatting data models for terminal display,
//! mostly as tables.

pub mod budget;
pub mod category;
pub mod transaction;

pub use budget::format_budget_usage;
pub use category::format_category_tree;
pub use transaction::{format_transaction_details, format_transaction_register};
