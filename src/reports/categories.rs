//! Category Spending Report
//!
//! Spending per expense category for one month, with each category's share
//! of the month's expenses.

use std::io::Write;

use crate::config::Settings;
use crate::error::LedgerResult;
use crate::models::{BudgetGroup, Money, MonthPeriod, Transaction};
use crate::services::aggregation;

/// One row of the category report
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryReportRow {
    pub label: String,
    pub budget_group: BudgetGroup,
    pub total: Money,
    /// Share of the month's expenses, 0-100
    pub percentage: f64,
    pub known: bool,
}

/// Category spending report
#[derive(Debug, Clone)]
pub struct CategoryReport {
    pub period: MonthPeriod,
    pub rows: Vec<CategoryReportRow>,
    pub total_expense: Money,
}

impl CategoryReport {
    /// Generate the report; only categories with spending, largest first
    pub fn generate(transactions: &[Transaction], period: MonthPeriod) -> Self {
        let total_expense = aggregation::monthly_totals_for(transactions, &period).expense;

        let rows = aggregation::category_breakdown_for(transactions, &period)
            .into_iter()
            .map(|c| CategoryReportRow {
                percentage: if total_expense.is_zero() {
                    0.0
                } else {
                    c.total.cents() as f64 / total_expense.cents() as f64 * 100.0
                },
                label: c.label,
                budget_group: c.budget_group,
                total: c.total,
                known: c.known,
            })
            .collect();

        Self {
            period,
            rows,
            total_expense,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, settings: &Settings) -> String {
        let mut output = String::new();

        output.push_str(&format!("Spending by Category: {}\n", self.period));
        output.push_str(&"=".repeat(64));
        output.push('\n');

        if self.rows.is_empty() {
            output.push_str("No expenses recorded this month.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<28} {:<14} {:>14} {:>6}\n",
            "Category", "Budget", "Spent", "%"
        ));
        output.push_str(&"-".repeat(64));
        output.push('\n');

        for row in &self.rows {
            let label = if row.known {
                row.label.clone()
            } else {
                format!("{} (?)", row.label)
            };
            output.push_str(&format!(
                "{:<28} {:<14} {:>14} {:>5.1}%\n",
                label,
                row.budget_group.name(),
                settings.format_money(row.total),
                row.percentage
            ));
        }

        output.push_str(&"-".repeat(64));
        output.push('\n');
        output.push_str(&format!(
            "{:<43} {:>14}\n",
            "TOTAL",
            settings.format_money(self.total_expense)
        ));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> LedgerResult<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(["Mes", "Categoría", "Presupuesto", "Gasto Total", "Porcentaje"])?;

        for row in &self.rows {
            wtr.write_record([
                self.period.to_string(),
                row.label.clone(),
                row.budget_group.name().to_string(),
                row.total.to_string(),
                format!("{:.2}", row.percentage),
            ])?;
        }

        wtr.flush()?;
        Ok(())
    }
}
