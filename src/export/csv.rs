//! CSV Export functionality
//!
//! Exports the transaction list as a spreadsheet-compatible CSV file, one
//! row per transaction in ledger order.

use std::io::Write;

use chrono::FixedOffset;

use crate::error::{LedgerError, LedgerResult};
use crate::models::Transaction;

/// Date format used in exported rows
pub const EXPORT_DATE_FORMAT: &str = "%d/%m/%Y";

/// Default export file name for a given day, e.g. `Reporte_Transacciones_2024-03-15.csv`
pub fn default_file_name(today: chrono::NaiveDate) -> String {
    format!("Reporte_Transacciones_{}.csv", today.format("%Y-%m-%d"))
}

/// Export transactions to CSV
///
/// Dates are rendered in `offset`. Refuses an empty list rather than writing
/// a header-only file.
pub fn export_transactions_csv<W: Write>(
    transactions: &[Transaction],
    currency_symbol: &str,
    offset: FixedOffset,
    writer: W,
) -> LedgerResult<usize> {
    if transactions.is_empty() {
        return Err(LedgerError::Export("No transactions to export".into()));
    }

    let mut wtr = csv::Writer::from_writer(writer);
    let amount_header = format!("Monto ({})", currency_symbol);
    wtr.write_record([
        "Tipo",
        "Nota",
        "Categoría",
        "Método de Pago",
        "Fecha",
        amount_header.as_str(),
    ])?;

    for txn in transactions {
        let date = txn
            .date
            .with_timezone(&offset)
            .format(EXPORT_DATE_FORMAT)
            .to_string();
        let amount = txn.amount.to_string();
        wtr.write_record([
            txn.kind.export_label(),
            txn.note.as_str(),
            txn.category_label(),
            txn.payment_method.label(),
            date.as_str(),
            amount.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(transactions.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PaymentMethod, TransactionDraft, TransactionId};

    fn lima() -> FixedOffset {
        FixedOffset::west_opt(5 * 3600).unwrap()
    }

    fn sample() -> Vec<Transaction> {
        vec![
            TransactionDraft::expense("Casa", "foco, cables", "35.5", "2024-03-10")
                .with_payment_method(PaymentMethod::Yape)
                .into_transaction(TransactionId::new(), lima())
                .unwrap(),
            TransactionDraft::income("sueldo", "1000", "2024-03-01")
                .into_transaction(TransactionId::new(), lima())
                .unwrap(),
        ]
    }

    #[test]
    fn test_export_transactions_csv() {
        let mut buffer = Vec::new();
        let count = export_transactions_csv(&sample(), "S/", lima(), &mut buffer).unwrap();
        assert_eq!(count, 2);

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "Tipo,Nota,Categoría,Método de Pago,Fecha,Monto (S/)");
        assert_eq!(lines[1], "Gasto,\"foco, cables\",Casa,Yape,10/03/2024,35.50");
        assert_eq!(lines[2], "Ingreso,sueldo,-,Transferencia,01/03/2024,1000.00");
    }

    #[test]
    fn test_dates_rendered_in_offset() {
        let txn = TransactionDraft::expense("Casa", "luz", "10", "2024-04-01T03:00:00Z")
            .into_transaction(TransactionId::new(), lima())
            .unwrap();
        let mut buffer = Vec::new();
        export_transactions_csv(&[txn], "S/", lima(), &mut buffer).unwrap();
        assert!(String::from_utf8(buffer).unwrap().contains("31/03/2024"));
    }

    #[test]
    fn test_empty_export_is_refused() {
        let mut buffer = Vec::new();
        let err = export_transactions_csv(&[], "S/", lima(), &mut buffer).unwrap_err();
        assert!(matches!(err, LedgerError::Export(_)));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_default_file_name() {
        let day = chrono::NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(default_file_name(day), "Reporte_Transacciones_2024-03-15.csv");
    }
}
