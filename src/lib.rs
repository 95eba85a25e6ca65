//! family-ledger - household income/expense ledger
//!
//! This library provides the core of a family finance tracker: an ordered
//! ledger of income and expense transactions, two monthly budget ceilings
//! (Food and Miscellaneous), and the aggregations derived from them
//! (balance, monthly totals, spending by category, budget usage).
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (money, transactions, categories, months)
//! - `storage`: Key-value persistence (JSON files or memory)
//! - `services`: Ledger, budget store, aggregation and edit coordinator
//! - `session`: One user session bundling the services
//! - `reports`, `export`, `display`: Output for the `ledger` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use family_ledger::config::{LedgerPaths, Settings};
//! use family_ledger::models::TransactionDraft;
//! use family_ledger::session::Session;
//!
//! let paths = LedgerPaths::new()?;
//! let mut session = Session::open(&paths, Settings::load_or_create(&paths)?)?;
//! session.ledger.add(TransactionDraft::expense("Alimentación", "mercado", "250.50", "2024-03-10"))?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod session;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
