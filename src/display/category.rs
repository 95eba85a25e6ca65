//! Category display formatting
//!
//! Formats the fixed expense categories as a tree grouped by budget group.

use crate::models::{BudgetGroup, CategoryRegistry};

/// Format the known categories as a tree under their budget group
pub fn format_category_tree() -> String {
    let mut output = String::new();

    for (i, group) in BudgetGroup::all().iter().enumerate() {
        output.push_str(&format!("{}\n", group.name()));

        let categories: Vec<_> = CategoryRegistry::all()
            .iter()
            .filter(|c| c.budget_group == *group)
            .collect();

        for (j, category) in categories.iter().enumerate() {
            let is_last = j == categories.len() - 1;
            let prefix = if is_last { "└── " } else { "├── " };
            output.push_str(&format!("  {}{}\n", prefix, category.label));
        }

        // Add blank line between groups (except after last)
        if i < BudgetGroup::all().len() - 1 {
            output.push('\n');
        }
    }

    output
}
