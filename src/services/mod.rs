//! Service layer for the family ledger
//!
//! The service layer owns the mutable state of a session (transactions and
//! budget ceilings), validates every mutation and flushes it to storage. The
//! aggregation functions are pure and recomputed on demand.

pub mod aggregation;
pub mod budget;
pub mod coordinator;
pub mod ledger;

pub use aggregation::{BudgetUsage, CategoryTotal, MonthlyTotals};
pub use budget::BudgetStore;
pub use coordinator::{EditCoordinator, ModalState};
pub use ledger::TransactionLedger;
