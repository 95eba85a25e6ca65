//! Expense category registry
//!
//! The set of expense categories is fixed at build time. Each category belongs
//! to one budget group. Transactions may still carry keys outside this set
//! (older data, hand-edited files); those resolve to the Miscellaneous group
//! with the raw key as their label instead of failing.

use super::budget::BudgetGroup;

/// Static description of a known expense category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryDefinition {
    pub key: &'static str,
    pub label: &'static str,
    pub budget_group: BudgetGroup,
}

const fn category(key: &'static str, budget_group: BudgetGroup) -> CategoryDefinition {
    CategoryDefinition {
        key,
        label: key,
        budget_group,
    }
}

// "Útiles de aseo" and "Pedidos por delivery" count against Food, as they
// always have in stored data.
const EXPENSE_CATEGORIES: &[CategoryDefinition] = &[
    category("Alimentación", BudgetGroup::Food),
    category("Útiles de aseo", BudgetGroup::Food),
    category("Pedidos por delivery", BudgetGroup::Food),
    category("Compras", BudgetGroup::Miscellaneous),
    category("Colegio", BudgetGroup::Miscellaneous),
    category("Casa", BudgetGroup::Miscellaneous),
    category("Propios", BudgetGroup::Miscellaneous),
    category("Otros", BudgetGroup::Miscellaneous),
];

/// A category key resolved against the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedCategory<'a> {
    pub key: &'a str,
    pub label: &'a str,
    pub budget_group: BudgetGroup,
    /// False when the key is not in the registry
    pub known: bool,
}

/// Read-only access to the fixed category set
pub struct CategoryRegistry;

impl CategoryRegistry {
    /// All known categories in declaration order
    pub fn all() -> &'static [CategoryDefinition] {
        EXPENSE_CATEGORIES
    }

    /// Look up a known category by key
    pub fn get(key: &str) -> Option<&'static CategoryDefinition> {
        EXPENSE_CATEGORIES.iter().find(|c| c.key == key)
    }

    /// Declaration index of a known category
    pub fn position(key: &str) -> Option<usize> {
        EXPENSE_CATEGORIES.iter().position(|c| c.key == key)
    }

    pub fn is_known(key: &str) -> bool {
        Self::get(key).is_some()
    }

    /// Resolve any key, degrading unknown keys to Miscellaneous
    pub fn resolve(key: &str) -> ResolvedCategory<'_> {
        match Self::get(key) {
            Some(def) => ResolvedCategory {
                key: def.key,
                label: def.label,
                budget_group: def.budget_group,
                known: true,
            },
            None => {
                tracing::debug!(category = key, "unknown category, using Miscellaneous");
                ResolvedCategory {
                    key,
                    label: key,
                    budget_group: BudgetGroup::Miscellaneous,
                    known: false,
                }
            }
        }
    }

    /// Budget group a key counts against
    pub fn budget_group(key: &str) -> BudgetGroup {
        Self::resolve(key).budget_group
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_contents() {
        let all = CategoryRegistry::all();
        assert_eq!(all.len(), 8);
        assert_eq!(all[0].key, "Alimentación");
        assert_eq!(all.last().unwrap().key, "Otros");

        let food: Vec<_> = all
            .iter()
            .filter(|c| c.budget_group == BudgetGroup::Food)
            .map(|c| c.key)
            .collect();
        assert_eq!(food, vec!["Alimentación", "Útiles de aseo", "Pedidos por delivery"]);
    }

    #[test]
    fn test_resolve_known() {
        let resolved = CategoryRegistry::resolve("Colegio");
        assert!(resolved.known);
        assert_eq!(resolved.label, "Colegio");
        assert_eq!(resolved.budget_group, BudgetGroup::Miscellaneous);
        assert_eq!(CategoryRegistry::position("Colegio"), Some(4));
    }

    #[test]
    fn test_resolve_unknown_degrades() {
        let resolved = CategoryRegistry::resolve("XYZ");
        assert!(!resolved.known);
        assert_eq!(resolved.key, "XYZ");
        assert_eq!(resolved.label, "XYZ");
        assert_eq!(resolved.budget_group, BudgetGroup::Miscellaneous);
        assert!(!CategoryRegistry::is_known("XYZ"));
    }

    #[test]
    fn test_lookup_is_exact() {
        // Keys are matched exactly; accents and case matter
        assert!(CategoryRegistry::get("alimentación").is_none());
        assert!(CategoryRegistry::get("Alimentacion").is_none());
        assert_eq!(CategoryRegistry::budget_group("Útiles de aseo"), BudgetGroup::Food);
    }
}
