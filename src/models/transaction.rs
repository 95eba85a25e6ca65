//! Transaction model
//!
//! A transaction is either income or a categorized expense. Records are
//! replaced whole on update; drafts carry raw user input until the ledger
//! validates them and assigns an id.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::category::CategoryRegistry;
use super::ids::TransactionId;
use super::money::Money;
use super::period::parse_date_input;
use crate::error::{FieldError, LedgerError};

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    /// Spanish label used in exports ("Ingreso" / "Gasto")
    pub fn export_label(&self) -> &'static str {
        match self {
            Self::Income => "Ingreso",
            Self::Expense => "Gasto",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => f.pad("income"),
            Self::Expense => f.pad("expense"),
        }
    }
}

/// How a transaction was paid
///
/// Stored as its display label. Any label outside the fixed set is kept
/// verbatim as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PaymentMethod {
    Yape,
    Plin,
    Efectivo,
    TarjetaCredito,
    TarjetaDebito,
    #[default]
    Transferencia,
    Other(String),
}

impl PaymentMethod {
    /// The fixed methods in display order
    pub fn known() -> [Self; 6] {
        [
            Self::Yape,
            Self::Plin,
            Self::Efectivo,
            Self::TarjetaCredito,
            Self::TarjetaDebito,
            Self::Transferencia,
        ]
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Yape => "Yape",
            Self::Plin => "Plin",
            Self::Efectivo => "Efectivo",
            Self::TarjetaCredito => "Tarjeta Crédito",
            Self::TarjetaDebito => "Tarjeta Débito",
            Self::Transferencia => "Transferencia",
            Self::Other(label) => label,
        }
    }
}

impl From<&str> for PaymentMethod {
    fn from(s: &str) -> Self {
        let trimmed = s.trim();
        Self::known()
            .into_iter()
            .find(|m| m.label().eq_ignore_ascii_case(trimmed))
            .unwrap_or_else(|| Self::Other(trimmed.to_string()))
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl Serialize for PaymentMethod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for PaymentMethod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(PaymentMethod::from(label.as_str()))
    }
}

/// A stored transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier, assigned by the ledger
    pub id: TransactionId,

    #[serde(rename = "type")]
    pub kind: TransactionType,

    pub note: String,

    /// Always positive; the direction comes from `kind`
    pub amount: Money,

    pub date: DateTime<Utc>,

    #[serde(default, alias = "payment_method")]
    pub payment_method: PaymentMethod,

    /// Category key, present only for expenses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// Contribution to the balance: `+amount` for income, `-amount` for expenses
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }

    /// Display label of the category ("-" for income)
    pub fn category_label(&self) -> &str {
        match (&self.kind, &self.category) {
            (TransactionType::Expense, Some(key)) => CategoryRegistry::resolve(key).label,
            _ => "-",
        }
    }

    /// Check every record invariant, reporting all failing fields at once
    pub fn validate(&self) -> Result<(), LedgerError> {
        let mut errors = Vec::new();

        if !self.amount.is_positive() {
            errors.push(FieldError::new("amount", "must be greater than zero"));
        } else if self.amount.exceeds_max() {
            errors.push(FieldError::new("amount", Money::max_exceeded_message()));
        }
        if self.note.trim().is_empty() {
            errors.push(FieldError::new("note", "must not be empty"));
        }
        if self.payment_method.label().trim().is_empty() {
            errors.push(FieldError::new("paymentMethod", "must not be empty"));
        }
        match (self.kind, self.category.as_deref().map(str::trim)) {
            (TransactionType::Expense, None) | (TransactionType::Expense, Some("")) => {
                errors.push(FieldError::new("category", "is required for expenses"));
            }
            (TransactionType::Income, Some(_)) => {
                errors.push(FieldError::new("category", "must be empty for income"));
            }
            _ => {}
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(LedgerError::Validation(errors))
        }
    }
}

/// A transaction payload before validation and id assignment
///
/// Amount and date are kept as the raw text the user typed so that a failed
/// submission can report every bad field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDraft {
    pub kind: TransactionType,
    pub note: String,
    pub amount: String,
    pub date: String,
    pub payment_method: PaymentMethod,
    pub category: Option<String>,
}

impl TransactionDraft {
    /// Draft an income entry
    pub fn income(note: impl Into<String>, amount: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            kind: TransactionType::Income,
            note: note.into(),
            amount: amount.into(),
            date: date.into(),
            payment_method: PaymentMethod::default(),
            category: None,
        }
    }

    /// Draft an expense entry
    pub fn expense(
        category: impl Into<String>,
        note: impl Into<String>,
        amount: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            kind: TransactionType::Expense,
            note: note.into(),
            amount: amount.into(),
            date: date.into(),
            payment_method: PaymentMethod::default(),
            category: Some(category.into()),
        }
    }

    pub fn with_payment_method(mut self, method: PaymentMethod) -> Self {
        self.payment_method = method;
        self
    }

    /// Prefill a draft from a stored record, for editing
    pub fn from_transaction(txn: &Transaction) -> Self {
        Self {
            kind: txn.kind,
            note: txn.note.clone(),
            amount: txn.amount.to_string(),
            date: txn.date.to_rfc3339(),
            payment_method: txn.payment_method.clone(),
            category: txn.category.clone(),
        }
    }

    /// Validate the draft and build a record with the given id
    ///
    /// Plain dates are read as local midnight in `offset`. A category on an
    /// income draft is dropped rather than rejected.
    pub fn into_transaction(
        self,
        id: TransactionId,
        offset: FixedOffset,
    ) -> Result<Transaction, LedgerError> {
        let mut errors = Vec::new();

        let amount = match Money::parse(&self.amount) {
            Ok(amount) if amount.exceeds_max() => {
                errors.push(FieldError::new("amount", Money::max_exceeded_message()));
                None
            }
            Ok(amount) if amount.is_positive() => Some(amount),
            Ok(_) => {
                errors.push(FieldError::new("amount", "must be greater than zero"));
                None
            }
            Err(e) => {
                errors.push(FieldError::new("amount", e.to_string()));
                None
            }
        };

        let date = parse_date_input(&self.date, offset);
        if date.is_none() {
            errors.push(FieldError::new(
                "date",
                format!("cannot parse '{}' as a date", self.date),
            ));
        }

        let note = self.note.trim().to_string();
        if note.is_empty() {
            errors.push(FieldError::new("note", "must not be empty"));
        }

        if self.payment_method.label().trim().is_empty() {
            errors.push(FieldError::new("paymentMethod", "must not be empty"));
        }

        let category = match self.kind {
            TransactionType::Income => None,
            TransactionType::Expense => {
                let key = self
                    .category
                    .map(|c| c.trim().to_string())
                    .filter(|c| !c.is_empty());
                if key.is_none() {
                    errors.push(FieldError::new("category", "is required for expenses"));
                }
                key
            }
        };

        match (amount, date) {
            (Some(amount), Some(date)) if errors.is_empty() => Ok(Transaction {
                id,
                kind: self.kind,
                note,
                amount,
                date,
                payment_method: self.payment_method,
                category,
            }),
            _ => Err(LedgerError::Validation(errors)),
        }
    }
}
