//! CLI commands for data export
//!
//! Provides commands for exporting the ledger to files.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Subcommand, ValueEnum};

use crate::error::{LedgerError, LedgerResult};
use crate::export::{self, json};
use crate::session::Session;

/// Summary file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SummaryFormat {
    /// Plain text, as printed by `report summary`
    Text,
    /// JSON
    Json,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export all transactions to CSV
    Transactions {
        /// Output file path (default: Reporte_Transacciones_<today>.csv)
        output: Option<PathBuf>,
    },

    /// Export a monthly summary
    Summary {
        /// Output file path (default: resumen_financiero_<YYYY_MM>.<ext>)
        output: Option<PathBuf>,

        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,

        /// Output format (default: from the file extension, else text)
        #[arg(short, long, value_enum)]
        format: Option<SummaryFormat>,
    },

    /// Export the full ledger (transactions and budgets) to JSON
    All {
        /// Output file path
        output: PathBuf,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
}

/// Handle export commands
pub fn handle_export_command(session: &Session, cmd: ExportCommands) -> LedgerResult<()> {
    match cmd {
        ExportCommands::Transactions { output } => handle_export_transactions(session, output),
        ExportCommands::Summary {
            output,
            month,
            format,
        } => handle_export_summary(session, output, month.as_deref(), format),
        ExportCommands::All { output, pretty } => handle_export_all(session, output, pretty),
    }
}

fn create_file(output: &Path) -> LedgerResult<BufWriter<File>> {
    let file = File::create(output).map_err(|e| {
        LedgerError::Export(format!("Failed to create file {}: {}", output.display(), e))
    })?;
    Ok(BufWriter::new(file))
}

/// Handle transactions export
fn handle_export_transactions(session: &Session, output: Option<PathBuf>) -> LedgerResult<()> {
    if session.ledger.is_empty() {
        return Err(LedgerError::Export("No transactions to export".into()));
    }

    let output = output
        .unwrap_or_else(|| PathBuf::from(export::default_file_name(session.now().date_naive())));
    let mut writer = create_file(&output)?;

    let count = export::export_transactions_csv(
        session.ledger.list(),
        &session.settings().currency_symbol,
        session.offset(),
        &mut writer,
    )?;

    println!("Exported {} transactions to: {}", count, output.display());
    Ok(())
}

/// Handle monthly summary export
fn handle_export_summary(
    session: &Session,
    output: Option<PathBuf>,
    month: Option<&str>,
    format: Option<SummaryFormat>,
) -> LedgerResult<()> {
    let period = session.month(month)?;
    let summary = session.summary(period);

    let from_extension = output
        .as_deref()
        .and_then(Path::extension)
        .filter(|ext| ext.eq_ignore_ascii_case("json"))
        .map(|_| SummaryFormat::Json);
    let format = format.or(from_extension).unwrap_or(SummaryFormat::Text);

    let output = output.unwrap_or_else(|| {
        let ext = match format {
            SummaryFormat::Text => "txt",
            SummaryFormat::Json => "json",
        };
        PathBuf::from(format!("{}.{}", summary.file_stem(), ext))
    });
    let mut writer = create_file(&output)?;

    match format {
        SummaryFormat::Json => summary.export_json(&mut writer)?,
        SummaryFormat::Text => writer
            .write_all(summary.format_terminal(session.settings()).as_bytes())
            .map_err(|e| LedgerError::Export(e.to_string()))?,
    }
    writer
        .flush()
        .map_err(|e| LedgerError::Export(e.to_string()))?;

    println!("Summary for {} exported to: {}", period, output.display());
    Ok(())
}

/// Handle full export
fn handle_export_all(session: &Session, output: PathBuf, pretty: bool) -> LedgerResult<()> {
    let mut writer = create_file(&output)?;

    json::export_full_json(session.ledger.list(), session.budgets.get(), &mut writer, pretty)?;
    writer
        .flush()
        .map_err(|e| LedgerError::Export(e.to_string()))?;

    println!("Full ledger exported to: {}", output.display());
    Ok(())
}
