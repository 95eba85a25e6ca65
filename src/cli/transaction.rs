//! Transaction CLI commands
//!
//! Implements CLI commands for recording, editing and removing transactions.
//! Every mutation goes through the session's edit coordinator.

use clap::{Subcommand, ValueEnum};

use crate::display::{format_transaction_details, format_transaction_register};
use crate::error::LedgerResult;
use crate::models::{PaymentMethod, TransactionDraft, TransactionType};
use crate::services::aggregation;
use crate::session::Session;

/// Transaction kind as typed on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Income,
    Expense,
}

impl From<KindArg> for TransactionType {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Income => TransactionType::Income,
            KindArg::Expense => TransactionType::Expense,
        }
    }
}

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record an income or an expense
    Add {
        /// income or expense
        #[arg(value_enum)]
        kind: KindArg,
        /// Amount (e.g., "250.50")
        amount: String,
        /// Short description
        note: String,
        /// Date (YYYY-MM-DD, DD/MM/YYYY or RFC 3339), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Payment method (Yape, Plin, Efectivo, ...)
        #[arg(short = 'm', long = "method")]
        method: Option<String>,
        /// Expense category (see `ledger categories`)
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Edit a transaction (unset fields keep their value)
    Edit {
        /// Transaction ID or unique prefix
        id: String,
        /// New kind
        #[arg(short, long, value_enum)]
        kind: Option<KindArg>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New note
        #[arg(short, long)]
        note: Option<String>,
        /// New date
        #[arg(short, long)]
        date: Option<String>,
        /// New payment method
        #[arg(short = 'm', long = "method")]
        method: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID or unique prefix
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// List transactions, newest first
    List {
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
        /// Only this month (YYYY-MM)
        #[arg(long)]
        month: Option<String>,
    },
    /// Show transaction details
    Show {
        /// Transaction ID or unique prefix
        id: String,
    },
    /// Show the running balance
    Balance,
}

/// Handle a transaction command
pub fn handle_transaction_command(session: &mut Session, cmd: TransactionCommands) -> LedgerResult<()> {
    let settings = session.settings().clone();
    let offset = session.offset();

    match cmd {
        TransactionCommands::Add {
            kind,
            amount,
            note,
            date,
            method,
            category,
        } => {
            let date = date.unwrap_or_else(|| session.now().format("%Y-%m-%d").to_string());
            let mut draft = match kind {
                KindArg::Income => TransactionDraft::income(note, amount, date),
                KindArg::Expense => {
                    TransactionDraft::expense(category.unwrap_or_default(), note, amount, date)
                }
            };
            if let Some(method) = method {
                draft = draft.with_payment_method(PaymentMethod::from(method.as_str()));
            }

            session.coordinator.begin_create()?;
            let created = session.coordinator.submit(&mut session.ledger, draft)?;
            if let Some(txn) = created {
                println!("Created transaction:");
                print!("{}", format_transaction_details(&txn, &settings, offset));
            }
        }

        TransactionCommands::Edit {
            id,
            kind,
            amount,
            note,
            date,
            method,
            category,
        } => {
            let txn = session.ledger.find(&id)?.clone();
            session.coordinator.begin_edit(txn)?;

            let Some(mut draft) = session.coordinator.edit_draft() else {
                session.coordinator.cancel();
                return Ok(());
            };
            if let Some(kind) = kind {
                draft.kind = kind.into();
            }
            if let Some(amount) = amount {
                draft.amount = amount;
            }
            if let Some(note) = note {
                draft.note = note;
            }
            if let Some(date) = date {
                draft.date = date;
            }
            if let Some(method) = method {
                draft.payment_method = PaymentMethod::from(method.as_str());
            }
            if category.is_some() {
                draft.category = category;
            }

            let updated = session.coordinator.submit(&mut session.ledger, draft)?;
            if let Some(txn) = updated {
                println!("Updated transaction:");
                print!("{}", format_transaction_details(&txn, &settings, offset));
            }
        }

        TransactionCommands::Delete { id, yes } => {
            let txn = session.ledger.find(&id)?.clone();
            session.coordinator.begin_delete(txn.clone())?;

            if !yes {
                session.coordinator.cancel();
                println!("About to delete transaction:");
                print!("{}", format_transaction_details(&txn, &settings, offset));
                println!();
                println!("Use --yes to confirm deletion");
                return Ok(());
            }

            if let Some(removed) = session.coordinator.confirm_delete(&mut session.ledger)? {
                println!(
                    "Deleted transaction: {} ({} {})",
                    removed.id.short(),
                    removed.note,
                    settings.format_money(removed.amount)
                );
            }
        }

        TransactionCommands::List { limit, month } => {
            let transactions: Vec<_> = match month {
                Some(month) => {
                    let period = session.month(Some(&month))?;
                    aggregation::in_month(session.ledger.list(), &period)
                        .take(limit)
                        .cloned()
                        .collect()
                }
                None => session.ledger.list().iter().take(limit).cloned().collect(),
            };

            print!("{}", format_transaction_register(&transactions, &settings, offset));
            println!(
                "\nShowing {} of {} transactions",
                transactions.len(),
                session.ledger.len()
            );
        }

        TransactionCommands::Show { id } => {
            let txn = session.ledger.find(&id)?;
            print!("{}", format_transaction_details(txn, &settings, offset));
        }

        TransactionCommands::Balance => {
            let totals = aggregation::monthly_totals(session.ledger.list(), session.now());
            println!("Balance:            {}", settings.format_money(aggregation::balance(session.ledger.list())));
            println!("This month ({})", session.current_month());
            println!("  Income:           {}", settings.format_money(totals.income));
            println!("  Expenses:         {}", settings.format_money(totals.expense));
            println!("    Food:           {}", settings.format_money(totals.food));
            println!("    Miscellaneous:  {}", settings.format_money(totals.miscellaneous));
        }
    }

    Ok(())
}
