//! Report CLI commands

use clap::Subcommand;

use crate::error::LedgerResult;
use crate::session::Session;

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Monthly summary: totals, budgets, categories and transactions
    Summary {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Spending by category for a month
    Categories {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
        /// Print CSV instead of text
        #[arg(long)]
        csv: bool,
    },
}

/// Handle a report command
pub fn handle_report_command(session: &Session, cmd: ReportCommands) -> LedgerResult<()> {
    match cmd {
        ReportCommands::Summary { month, json } => {
            let period = session.month(month.as_deref())?;
            let summary = session.summary(period);

            if json {
                summary.export_json(&mut std::io::stdout().lock())?;
            } else {
                print!("{}", summary.format_terminal(session.settings()));
            }
        }

        ReportCommands::Categories { month, csv } => {
            let period = session.month(month.as_deref())?;
            let report = session.category_report(period);

            if csv {
                report.export_csv(std::io::stdout().lock())?;
            } else {
                print!("{}", report.format_terminal(session.settings()));
            }
        }
    }

    Ok(())
}
