//! Budget display formatting

use tabled::settings::{object::Columns, Alignment, Style};
use tabled::{Table, Tabled};

use crate::config::Settings;
use crate::models::MonthPeriod;
use crate::services::BudgetUsage;

#[derive(Tabled)]
struct UsageRow {
    #[tabled(rename = "Budget")]
    group: &'static str,
    #[tabled(rename = "Ceiling")]
    ceiling: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Used")]
    used: String,
}

/// Format ceilings against this month's spending
pub fn format_budget_usage(usage: &[BudgetUsage], period: &MonthPeriod, settings: &Settings) -> String {
    let rows = usage.iter().map(|u| UsageRow {
        group: u.group.name(),
        ceiling: settings.format_money(u.ceiling),
        spent: settings.format_money(u.spent),
        remaining: if u.is_over_budget() {
            format!("{} (over)", settings.format_money(u.remaining))
        } else {
            settings.format_money(u.remaining)
        },
        used: u
            .percent_used()
            .map(|p| format!("{:.0}%", p))
            .unwrap_or_else(|| "-".to_string()),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .modify(Columns::new(1..), Alignment::right());
    format!("Budgets for {}\n\n{}\n", period, table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetGroup, Money};
    use chrono::FixedOffset;

    #[test]
    fn test_format_budget_usage() {
        let usage = vec![
            BudgetUsage {
                group: BudgetGroup::Food,
                ceiling: Money::from_cents(30000),
                spent: Money::from_cents(24000),
                remaining: Money::from_cents(6000),
            },
            BudgetUsage {
                group: BudgetGroup::Miscellaneous,
                ceiling: Money::zero(),
                spent: Money::from_cents(1500),
                remaining: Money::from_cents(-1500),
            },
        ];
        let period = MonthPeriod::new(2024, 3, FixedOffset::east_opt(0).unwrap()).unwrap();
        let output = format_budget_usage(&usage, &period, &Settings::default());

        assert!(output.starts_with("Budgets for 2024-03"));
        assert!(output.contains("S/ 60.00"));
        assert!(output.contains("80%"));
        assert!(output.contains("-S/ 15.00 (over)"));
    }
}
