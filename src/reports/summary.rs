//! Monthly Summary
//!
//! Everything known about one calendar month: totals, budget usage, spending
//! by category and the month's transactions in date order.

use std::io::Write;

use serde::Serialize;

use crate::config::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{BudgetCeilings, Money, MonthPeriod, Transaction};
use crate::services::aggregation::{self, BudgetUsage, CategoryTotal, MonthlyTotals};

/// Monthly summary report
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    /// Month label, e.g. "2024-03"
    pub month: String,
    #[serde(skip)]
    pub period: MonthPeriod,
    /// Balance over the whole history
    pub balance: Money,
    pub totals: MonthlyTotals,
    pub budgets: Vec<BudgetUsage>,
    /// Categories with spending, largest first
    pub categories: Vec<CategoryTotal>,
    /// Transactions of the month, oldest first
    pub transactions: Vec<Transaction>,
}

impl MonthlySummary {
    /// Generate the summary for `period`
    pub fn generate(
        transactions: &[Transaction],
        ceilings: &BudgetCeilings,
        period: MonthPeriod,
    ) -> Self {
        let mut month_transactions: Vec<Transaction> =
            aggregation::in_month(transactions, &period).cloned().collect();
        // Ledger order is newest first; reversing keeps insertion order stable among equal dates
        month_transactions.reverse();
        month_transactions.sort_by_key(|t| t.date);

        Self {
            month: period.to_string(),
            period,
            balance: aggregation::balance(transactions),
            totals: aggregation::monthly_totals_for(transactions, &period),
            budgets: aggregation::budget_usage_for(transactions, ceilings, &period),
            categories: aggregation::category_breakdown_for(transactions, &period),
            transactions: month_transactions,
        }
    }

    /// Default file name for a saved summary, without extension
    pub fn file_stem(&self) -> String {
        format!("resumen_financiero_{}", self.period.file_label())
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, settings: &Settings) -> String {
        let money = |m: Money| settings.format_money(m);
        let mut output = String::new();

        output.push_str(&format!("Monthly Summary: {}\n", self.month));
        output.push_str(&"=".repeat(72));
        output.push('\n');
        output.push_str(&format!("{:<20} {:>16}\n", "Month net:", money(self.totals.net())));
        output.push_str(&format!("{:<20} {:>16}\n", "Income:", money(self.totals.income)));
        output.push_str(&format!("{:<20} {:>16}\n", "Expenses:", money(self.totals.expense)));
        output.push_str(&format!("{:<20} {:>16}\n\n", "Overall balance:", money(self.balance)));

        // Budgets
        output.push_str(&format!(
            "{:<16} {:>16} {:>16} {:>16}\n",
            "Budget", "Ceiling", "Spent", "Remaining"
        ));
        output.push_str(&"-".repeat(72));
        output.push('\n');
        for usage in &self.budgets {
            output.push_str(&format!(
                "{:<16} {:>16} {:>16} {:>16}{}\n",
                usage.group.name(),
                money(usage.ceiling),
                money(usage.spent),
                money(usage.remaining),
                if usage.is_over_budget() { "  OVER" } else { "" }
            ));
        }

        // Categories
        output.push('\n');
        if self.categories.is_empty() {
            output.push_str("No expenses recorded this month.\n");
        } else {
            output.push_str(&format!("{:<32} {:>16}\n", "Category", "Spent"));
            output.push_str(&"-".repeat(72));
            output.push('\n');
            for category in &self.categories {
                output.push_str(&format!(
                    "{:<32} {:>16}\n",
                    category.label,
                    money(category.total)
                ));
            }
        }

        // Transactions
        output.push('\n');
        if self.transactions.is_empty() {
            output.push_str("No transactions recorded this month.\n");
        } else {
            output.push_str(&format!(
                "{:<10} {:<8} {:<24} {:<20} {:<16} {:>14}\n",
                "Date", "Type", "Note", "Category", "Method", "Amount"
            ));
            output.push_str(&"-".repeat(72));
            output.push('\n');
            for txn in &self.transactions {
                let sign = if txn.is_income() { '+' } else { '-' };
                output.push_str(&format!(
                    "{:<10} {:<8} {:<24} {:<20} {:<16} {:>14}\n",
                    settings.format_date(txn.date.with_timezone(&self.period.offset())),
                    txn.kind.export_label(),
                    truncate(&txn.note, 24),
                    truncate(txn.category_label(), 20),
                    txn.payment_method.label(),
                    format!("{} {}", sign, txn.amount)
                ));
            }
        }

        output
    }

    /// Write the summary as pretty JSON
    pub fn export_json<W: Write>(&self, writer: &mut W) -> LedgerResult<()> {
        serde_json::to_writer_pretty(&mut *writer, self)?;
        writeln!(writer).map_err(|e| LedgerError::Export(e.to_string()))?;
        Ok(())
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetGroup, TransactionDraft, TransactionId};
    use chrono::FixedOffset;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn setup_test_data() -> (Vec<Transaction>, BudgetCeilings) {
        let build = |draft: TransactionDraft| draft.into_transaction(TransactionId::new(), utc()).unwrap();
        // Newest first, as the ledger keeps them
        let transactions = vec![
            build(TransactionDraft::expense("Compras", "zapatos", "120", "2024-04-02")),
            build(TransactionDraft::expense("Alimentación", "mercado", "250.50", "2024-03-10")),
            build(TransactionDraft::income("sueldo", "1000", "2024-03-05")),
        ];
        let mut ceilings = BudgetCeilings::default();
        ceilings.set(BudgetGroup::Food, Money::from_cents(30000));
        (transactions, ceilings)
    }

    #[test]
    fn test_generate_summary() {
        let (transactions, ceilings) = setup_test_data();
        let period = MonthPeriod::new(2024, 3, utc()).unwrap();
        let summary = MonthlySummary::generate(&transactions, &ceilings, period);

        assert_eq!(summary.month, "2024-03");
        assert_eq!(summary.balance.cents(), 62950);
        assert_eq!(summary.totals.net().cents(), 74950);
        assert_eq!(summary.budgets[0].remaining.cents(), 4950);
        assert_eq!(summary.categories.len(), 1);
        assert_eq!(summary.transactions.len(), 2);
        assert_eq!(summary.transactions[0].note, "sueldo");
        assert_eq!(summary.file_stem(), "resumen_financiero_2024_03");
    }

    #[test]
    fn test_terminal_format() {
        let (transactions, ceilings) = setup_test_data();
        let period = MonthPeriod::new(2024, 3, utc()).unwrap();
        let output = MonthlySummary::generate(&transactions, &ceilings, period)
            .format_terminal(&Settings::default());

        assert!(output.contains("Monthly Summary: 2024-03"));
        assert!(output.contains("S/ 49.50"));
        assert!(output.contains("Alimentación"));
        assert!(output.contains("05/03/2024"));
        assert!(!output.contains("zapatos"));
    }

    #[test]
    fn test_terminal_format_with_unknown_date_specifier() {
        let (transactions, ceilings) = setup_test_data();
        let period = MonthPeriod::new(2024, 3, utc()).unwrap();
        let settings = Settings {
            date_format: "%Q".into(),
            ..Settings::default()
        };
        let output = MonthlySummary::generate(&transactions, &ceilings, period)
            .format_terminal(&settings);

        assert!(output.contains("05/03/2024"));
    }

    #[test]
    fn test_empty_month() {
        let period = MonthPeriod::new(2024, 3, utc()).unwrap();
        let summary = MonthlySummary::generate(&[], &BudgetCeilings::default(), period);
        let output = summary.format_terminal(&Settings::default());
        assert!(output.contains("No expenses recorded this month."));
        assert!(output.contains("No transactions recorded this month."));
    }

    #[test]
    fn test_json_export() {
        let (transactions, ceilings) = setup_test_data();
        let period = MonthPeriod::new(2024, 3, utc()).unwrap();
        let mut buffer = Vec::new();
        MonthlySummary::generate(&transactions, &ceilings, period)
            .export_json(&mut buffer)
            .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["month"], "2024-03");
        assert_eq!(value["totals"]["food"], 250.5);
        assert_eq!(value["budgets"][0]["remaining"], 49.5);
        assert_eq!(value["transactions"].as_array().unwrap().len(), 2);
    }
}
