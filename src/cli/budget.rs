//! Budget CLI commands
//!
//! Implements CLI commands for the two monthly budget ceilings.

use clap::Subcommand;

use crate::display::format_budget_usage;
use crate::error::LedgerResult;
use crate::models::BudgetGroup;
use crate::session::Session;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Show ceilings against a month's spending
    Show {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Set the monthly ceiling of a budget group
    Set {
        /// Budget group: food or misc
        group: BudgetGroup,
        /// Ceiling (e.g., "300" or "300.00")
        amount: String,
    },
}

/// Handle a budget command
pub fn handle_budget_command(session: &mut Session, cmd: BudgetCommands) -> LedgerResult<()> {
    match cmd {
        BudgetCommands::Show { month } => {
            let period = session.month(month.as_deref())?;
            let usage = session.budget_usage(&period);
            print!("{}", format_budget_usage(&usage, &period, session.settings()));
        }

        BudgetCommands::Set { group, amount } => {
            let previous = session.budgets.ceiling(group);

            session.budgets.set_editing(group, true);
            session.budgets.stage(group, amount);
            let saved = session.budgets.save_staged(group)?;

            let settings = session.settings();
            println!(
                "{} budget: {} -> {}",
                group,
                settings.format_money(previous),
                settings.format_money(saved)
            );
        }
    }

    Ok(())
}
