//! Aggregation engine
//!
//! Pure functions over a ledger snapshot (a slice of transactions), the budget
//! ceilings and a reference instant. Nothing here is cached: callers recompute
//! after every mutation. Sums are exact; rounding only happens when the
//! results are rendered.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::models::{
    BudgetCeilings, BudgetGroup, CategoryRegistry, Money, MonthPeriod, Transaction,
};

/// Running balance over the whole history: income minus expenses
pub fn balance(transactions: &[Transaction]) -> Money {
    transactions.iter().map(Transaction::signed_amount).sum()
}

/// Income and expense totals for one calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTotals {
    pub income: Money,
    pub expense: Money,
    pub food: Money,
    pub miscellaneous: Money,
}

impl MonthlyTotals {
    /// Expense spent against a budget group
    pub fn spent(&self, group: BudgetGroup) -> Money {
        match group {
            BudgetGroup::Food => self.food,
            BudgetGroup::Miscellaneous => self.miscellaneous,
        }
    }

    /// Month income minus month expenses
    pub fn net(&self) -> Money {
        self.income - self.expense
    }
}

/// Transactions dated inside `period`, in ledger order
pub fn in_month<'a>(
    transactions: &'a [Transaction],
    period: &'a MonthPeriod,
) -> impl Iterator<Item = &'a Transaction> + 'a {
    transactions.iter().filter(move |t| period.contains(t.date))
}

/// Totals for the month containing `reference`
pub fn monthly_totals(transactions: &[Transaction], reference: DateTime<FixedOffset>) -> MonthlyTotals {
    monthly_totals_for(transactions, &MonthPeriod::containing(reference))
}

/// Totals for a given month
pub fn monthly_totals_for(transactions: &[Transaction], period: &MonthPeriod) -> MonthlyTotals {
    let mut totals = MonthlyTotals {
        income: Money::zero(),
        expense: Money::zero(),
        food: Money::zero(),
        miscellaneous: Money::zero(),
    };

    for txn in in_month(transactions, period) {
        if txn.is_income() {
            totals.income += txn.amount;
            continue;
        }

        totals.expense += txn.amount;
        let group = txn
            .category
            .as_deref()
            .map(CategoryRegistry::budget_group)
            .unwrap_or(BudgetGroup::Miscellaneous);
        match group {
            BudgetGroup::Food => totals.food += txn.amount,
            BudgetGroup::Miscellaneous => totals.miscellaneous += txn.amount,
        }
    }

    totals
}

/// Expense total of one category within a month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub key: String,
    pub label: String,
    pub budget_group: BudgetGroup,
    pub total: Money,
    /// False for keys outside the registry
    pub known: bool,
}

/// Every known category (in registry order, zero when unused), followed by
/// any unknown category keys that had spending, in first-seen order
pub fn category_totals(transactions: &[Transaction], period: &MonthPeriod) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = CategoryRegistry::all()
        .iter()
        .map(|def| CategoryTotal {
            key: def.key.to_string(),
            label: def.label.to_string(),
            budget_group: def.budget_group,
            total: Money::zero(),
            known: true,
        })
        .collect();

    for txn in in_month(transactions, period).filter(|t| t.is_expense()) {
        let key = txn.category.as_deref().unwrap_or_default();
        match totals.iter_mut().find(|c| c.key == key) {
            Some(entry) => entry.total += txn.amount,
            None => {
                let resolved = CategoryRegistry::resolve(key);
                totals.push(CategoryTotal {
                    key: resolved.key.to_string(),
                    label: resolved.label.to_string(),
                    budget_group: resolved.budget_group,
                    total: txn.amount,
                    known: false,
                });
            }
        }
    }

    totals
}

/// Per-category spending for the month containing `reference`, only
/// categories with spending, largest first (ties in registry order)
pub fn category_breakdown(
    transactions: &[Transaction],
    reference: DateTime<FixedOffset>,
) -> Vec<CategoryTotal> {
    category_breakdown_for(transactions, &MonthPeriod::containing(reference))
}

/// Per-category spending for a given month, see [`category_breakdown`]
pub fn category_breakdown_for(transactions: &[Transaction], period: &MonthPeriod) -> Vec<CategoryTotal> {
    let mut breakdown: Vec<_> = category_totals(transactions, period)
        .into_iter()
        .filter(|c| c.total.is_positive())
        .collect();
    // Stable: equal totals keep registry order
    breakdown.sort_by(|a, b| b.total.cmp(&a.total));
    breakdown
}

/// Ceiling versus spending for one budget group in a month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetUsage {
    pub group: BudgetGroup,
    pub ceiling: Money,
    pub spent: Money,
    /// `ceiling - spent`; negative when over budget
    pub remaining: Money,
}

impl BudgetUsage {
    pub fn is_over_budget(&self) -> bool {
        self.remaining.is_negative()
    }

    /// Share of the ceiling already spent, in percent (`None` without a ceiling)
    pub fn percent_used(&self) -> Option<f64> {
        if self.ceiling.is_zero() {
            None
        } else {
            Some(self.spent.cents() as f64 / self.ceiling.cents() as f64 * 100.0)
        }
    }
}

/// Usage of both budget groups for the month containing `reference`
pub fn budget_usage(
    transactions: &[Transaction],
    ceilings: &BudgetCeilings,
    reference: DateTime<FixedOffset>,
) -> Vec<BudgetUsage> {
    budget_usage_for(transactions, ceilings, &MonthPeriod::containing(reference))
}

/// Usage of both budget groups for a given month
pub fn budget_usage_for(
    transactions: &[Transaction],
    ceilings: &BudgetCeilings,
    period: &MonthPeriod,
) -> Vec<BudgetUsage> {
    let totals = monthly_totals_for(transactions, period);
    BudgetGroup::all()
        .iter()
        .map(|group| {
            let ceiling = ceilings.get(*group);
            let spent = totals.spent(*group);
            BudgetUsage {
                group: *group,
                ceiling,
                spent,
                remaining: ceiling - spent,
            }
        })
        .collect()
}
