//! Transaction display formatting
//!
//! Provides utilities for formatting transactions for terminal display,
//! including the register table and a details view.

use chrono::FixedOffset;
use tabled::settings::{object::Columns, Alignment, Style};
use tabled::{Table, Tabled};

use crate::config::Settings;
use crate::models::Transaction;

#[derive(Tabled)]
struct RegisterRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    kind: &'static str,
    #[tabled(rename = "Note")]
    note: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Method")]
    method: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

impl RegisterRow {
    fn new(txn: &Transaction, settings: &Settings, offset: FixedOffset) -> Self {
        let amount = if txn.is_income() {
            format!("+{}", settings.format_money(txn.amount))
        } else {
            format!("-{}", settings.format_money(txn.amount))
        };

        Self {
            id: txn.id.short(),
            date: settings.format_date(txn.date.with_timezone(&offset)),
            kind: txn.kind.export_label(),
            note: truncate(&txn.note, 30),
            category: txn.category_label().to_string(),
            method: txn.payment_method.label().to_string(),
            amount,
        }
    }
}

/// Format a list of transactions as a register table
pub fn format_transaction_register(
    transactions: &[Transaction],
    settings: &Settings,
    offset: FixedOffset,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows = transactions
        .iter()
        .map(|txn| RegisterRow::new(txn, settings, offset));

    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .modify(Columns::single(6), Alignment::right());
    format!("{}\n", table)
}

/// Format transaction details for display
pub fn format_transaction_details(
    txn: &Transaction,
    settings: &Settings,
    offset: FixedOffset,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Type:        {}\n", txn.kind.export_label()));
    output.push_str(&format!(
        "Date:        {}\n",
        settings.format_date(txn.date.with_timezone(&offset))
    ));
    output.push_str(&format!("Amount:      {}\n", settings.format_money(txn.amount)));
    output.push_str(&format!("Note:        {}\n", txn.note));
    if txn.is_expense() {
        output.push_str(&format!("Category:    {}\n", txn.category_label()));
    }
    output.push_str(&format!("Method:      {}\n", txn.payment_method));

    output
}

/// Truncate a string to a maximum number of characters
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TransactionDraft, TransactionId};

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn sample() -> Transaction {
        TransactionDraft::expense("Pedidos por delivery", "pizza del viernes", "42.90", "2024-03-08")
            .into_transaction(TransactionId::new(), utc())
            .unwrap()
    }

    #[test]
    fn test_register_table() {
        let txn = sample();
        let output = format_transaction_register(&[txn.clone()], &Settings::default(), utc());

        assert!(output.contains("Category"));
        assert!(output.contains(&txn.id.short()));
        assert!(output.contains("08/03/2024"));
        assert!(output.contains("-S/ 42.90"));
        assert!(output.contains("Pedidos por delivery"));
    }

    #[test]
    fn test_empty_register() {
        let output = format_transaction_register(&[], &Settings::default(), utc());
        assert_eq!(output, "No transactions found.\n");
    }

    #[test]
    fn test_details() {
        let output = format_transaction_details(&sample(), &Settings::default(), utc());
        assert!(output.contains("Type:        Gasto"));
        assert!(output.contains("Method:      Transferencia"));
        assert!(output.contains("S/ 42.90"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("corto", 10), "corto");
        assert_eq!(truncate("Útiles de aseo grandes", 10), "Útiles ...");
    }
}
