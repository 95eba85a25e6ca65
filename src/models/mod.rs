//! Core data models
//!
//! Transactions, the two budget groups and their ceilings, the fixed expense
//! category registry, money and month arithmetic.

pub mod budget;
pub mod category;
pub mod ids;
pub mod money;
pub mod period;
pub mod transaction;

pub use budget::{BudgetCeilings, BudgetGroup};
pub use category::{CategoryDefinition, CategoryRegistry, ResolvedCategory};
pub use ids::TransactionId;
pub use money::{Money, MoneyParseError};
pub use period::{parse_date_input, MonthPeriod};
pub use transaction::{PaymentMethod, Transaction, TransactionDraft, TransactionType};
