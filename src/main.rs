use anyhow::Result;
use clap::{Parser, Subcommand};

use family_ledger::cli::{
    handle_budget_command, handle_export_command, handle_report_command,
    handle_transaction_command, BudgetCommands, ExportCommands, ReportCommands,
    TransactionCommands,
};
use family_ledger::config::{LedgerPaths, Settings};
use family_ledger::display::format_category_tree;
use family_ledger::logging;
use family_ledger::session::Session;

#[derive(Parser)]
#[command(
    name = "ledger",
    version,
    about = "Household income/expense ledger with two monthly budgets",
    long_about = "Records household income and expenses, tracks a Food and a \
                  Miscellaneous monthly budget, and summarises spending by \
                  category from the command line."
)]
struct Cli {
    /// Show debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Transaction(TransactionCommands),

    /// Budget ceilings
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Monthly reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Export data to files
    #[command(subcommand)]
    Export(ExportCommands),

    /// List the expense categories by budget group
    Categories,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let paths = LedgerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Transaction(cmd)) => {
            let mut session = Session::open(&paths, settings)?;
            handle_transaction_command(&mut session, cmd)?;
        }
        Some(Commands::Budget(cmd)) => {
            let mut session = Session::open(&paths, settings)?;
            handle_budget_command(&mut session, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            let session = Session::open(&paths, settings)?;
            handle_report_command(&session, cmd)?;
        }
        Some(Commands::Export(cmd)) => {
            let session = Session::open(&paths, settings)?;
            handle_export_command(&session, cmd)?;
        }
        Some(Commands::Categories) => {
            print!("{}", format_category_tree());
        }
        Some(Commands::Config) => {
            println!("Family Ledger Configuration");
            println!("===========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            match settings.utc_offset_minutes {
                Some(minutes) => println!("  UTC offset:      {} minutes", minutes),
                None => println!("  UTC offset:      system local ({})", settings.offset()?),
            }
        }
        None => {
            println!("Family Ledger - household income and expenses");
            println!();
            println!("Run 'ledger --help' for usage information.");
        }
    }

    Ok(())
}
