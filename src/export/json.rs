//! JSON Export functionality
//!
//! Exports the complete ledger (transactions and budget ceilings) to JSON
//! with schema versioning.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::LedgerResult;
use crate::models::{BudgetCeilings, Transaction};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full ledger export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// All transactions, in ledger order
    pub transactions: Vec<Transaction>,

    /// Budget ceilings
    pub budgets: BudgetCeilings,

    /// Export metadata
    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    /// Total number of transactions
    pub transaction_count: usize,

    /// Date range of transactions (earliest)
    pub earliest_transaction: Option<DateTime<Utc>>,

    /// Date range of transactions (latest)
    pub latest_transaction: Option<DateTime<Utc>>,
}

impl FullExport {
    /// Snapshot the given ledger state
    pub fn new(transactions: &[Transaction], budgets: BudgetCeilings) -> Self {
        let metadata = ExportMetadata {
            transaction_count: transactions.len(),
            earliest_transaction: transactions.iter().map(|t| t.date).min(),
            latest_transaction: transactions.iter().map(|t| t.date).max(),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            transactions: transactions.to_vec(),
            budgets,
            metadata,
        }
    }
}

/// Export the full ledger to JSON
pub fn export_full_json<W: Write>(
    transactions: &[Transaction],
    budgets: BudgetCeilings,
    writer: &mut W,
    pretty: bool,
) -> LedgerResult<()> {
    let export = FullExport::new(transactions, budgets);

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| crate::error::LedgerError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetGroup, Money, TransactionDraft, TransactionId};
    use chrono::FixedOffset;

    fn sample() -> Vec<Transaction> {
        let utc = FixedOffset::east_opt(0).unwrap();
        vec![
            TransactionDraft::expense("Casa", "luz", "80", "2024-03-10")
                .into_transaction(TransactionId::new(), utc)
                .unwrap(),
            TransactionDraft::income("sueldo", "1000", "2024-02-28")
                .into_transaction(TransactionId::new(), utc)
                .unwrap(),
        ]
    }

    #[test]
    fn test_full_export() {
        let mut budgets = BudgetCeilings::default();
        budgets.set(BudgetGroup::Food, Money::from_cents(30000));

        let mut buffer = Vec::new();
        export_full_json(&sample(), budgets, &mut buffer, true).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["schema_version"], EXPORT_SCHEMA_VERSION);
        assert_eq!(value["budgets"]["Food"], 300.0);
        assert_eq!(value["transactions"][0]["type"], "expense");
        assert_eq!(value["metadata"]["transaction_count"], 2);
    }

    #[test]
    fn test_json_roundtrip() {
        let transactions = sample();
        let mut buffer = Vec::new();
        export_full_json(&transactions, BudgetCeilings::default(), &mut buffer, false).unwrap();

        let export: FullExport = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(export.transactions, transactions);
        assert_eq!(export.budgets, BudgetCeilings::default());
    }

    #[test]
    fn test_metadata() {
        let export = FullExport::new(&sample(), BudgetCeilings::default());
        assert_eq!(
            export.metadata.earliest_transaction.unwrap().date_naive().to_string(),
            "2024-02-28"
        );
        assert_eq!(
            export.metadata.latest_transaction.unwrap().date_naive().to_string(),
            "2024-03-10"
        );

        let empty = FullExport::new(&[], BudgetCeilings::default());
        assert_eq!(empty.metadata.transaction_count, 0);
        assert!(empty.metadata.earliest_transaction.is_none());
    }
}
