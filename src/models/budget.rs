//! Budget groups and their monthly ceilings
//!
//! There are exactly two budget groups. Every expense category maps to one of
//! them, and each group carries a single non-negative monthly ceiling.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::money::Money;

/// One of the two fixed spending groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BudgetGroup {
    #[serde(alias = "Alimentación")]
    Food,
    #[serde(alias = "Gastos Diversos")]
    Miscellaneous,
}

impl BudgetGroup {
    /// Both groups in display order
    pub fn all() -> &'static [Self] {
        &[Self::Food, Self::Miscellaneous]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Miscellaneous => "Miscellaneous",
        }
    }
}

impl fmt::Display for BudgetGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for BudgetGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "food" | "alimentación" | "alimentacion" => Ok(Self::Food),
            "misc" | "miscellaneous" | "gastos diversos" => Ok(Self::Miscellaneous),
            other => Err(format!(
                "unknown budget group '{}' (expected 'food' or 'misc')",
                other
            )),
        }
    }
}

/// The committed ceiling of both groups
///
/// Persisted as `{ "Food": 300.0, "Miscellaneous": 0.0 }`. A missing group
/// reads back as zero. The Spanish keys are still read; when both spellings
/// are stored the English key wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "StoredCeilings")]
pub struct BudgetCeilings {
    #[serde(rename = "Food")]
    pub food: Money,

    #[serde(rename = "Miscellaneous")]
    pub miscellaneous: Money,
}

/// On-disk shape of [`BudgetCeilings`], legacy keys included
#[derive(Deserialize)]
struct StoredCeilings {
    #[serde(rename = "Food")]
    food: Option<Money>,
    #[serde(rename = "Alimentación")]
    legacy_food: Option<Money>,
    #[serde(rename = "Miscellaneous")]
    miscellaneous: Option<Money>,
    #[serde(rename = "Gastos Diversos")]
    legacy_miscellaneous: Option<Money>,
}

impl From<StoredCeilings> for BudgetCeilings {
    fn from(stored: StoredCeilings) -> Self {
        Self {
            food: stored.food.or(stored.legacy_food).unwrap_or_default(),
            miscellaneous: stored
                .miscellaneous
                .or(stored.legacy_miscellaneous)
                .unwrap_or_default(),
        }
    }
}

impl BudgetCeilings {
    /// Ceiling of a group
    pub fn get(&self, group: BudgetGroup) -> Money {
        match group {
            BudgetGroup::Food => self.food,
            BudgetGroup::Miscellaneous => self.miscellaneous,
        }
    }

    /// Overwrite the ceiling of a group
    pub fn set(&mut self, group: BudgetGroup, amount: Money) {
        match group {
            BudgetGroup::Food => self.food = amount,
            BudgetGroup::Miscellaneous => self.miscellaneous = amount,
        }
    }
}
