//! Transaction ledger
//!
//! Owns the transaction collection, validates every mutation, keeps the
//! canonical order (date descending, newest insertion first among equal
//! dates) and flushes to the durable store after each successful change.
//!
//! A failed flush is reported as [`LedgerError::Persistence`] but the
//! in-memory collection keeps the change; [`TransactionLedger::flush`] can be
//! called again to retry.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use chrono::FixedOffset;
use tracing::{debug, info, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{CategoryRegistry, Transaction, TransactionDraft, TransactionId};
use crate::storage::{read_json, write_json, KeyValueStore, TRANSACTIONS_KEY};

/// The authoritative collection of transactions for a session
pub struct TransactionLedger {
    store: Box<dyn KeyValueStore>,
    offset: FixedOffset,
    /// Canonical order, see module docs
    transactions: Vec<Transaction>,
    /// Insertion sequence per id; larger means inserted later
    sequence: HashMap<TransactionId, u64>,
    next_sequence: u64,
}

impl TransactionLedger {
    /// Load the ledger from `store`
    ///
    /// A missing key means an empty ledger. `offset` is used to read plain
    /// dates (`YYYY-MM-DD`) in drafts as local midnight.
    pub fn load(store: Box<dyn KeyValueStore>, offset: FixedOffset) -> LedgerResult<Self> {
        let stored: Vec<Transaction> = read_json(store.as_ref(), TRANSACTIONS_KEY)?;

        let mut seen = HashSet::new();
        let mut transactions = Vec::with_capacity(stored.len());
        for txn in stored {
            if !seen.insert(txn.id) {
                warn!(id = %txn.id, "duplicate transaction id in store, keeping first");
                continue;
            }
            if let Err(e) = txn.validate() {
                warn!(id = %txn.id, error = %e, "stored transaction fails validation");
            }
            transactions.push(txn);
        }

        // Stored order is canonical: the first record counts as the most recent insert
        let count = transactions.len() as u64;
        let sequence = transactions
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id, count - i as u64))
            .collect();

        let mut ledger = Self {
            store,
            offset,
            transactions,
            sequence,
            next_sequence: count + 1,
        };
        ledger.sort();

        debug!(count = ledger.len(), "ledger loaded");
        Ok(ledger)
    }

    /// UTC offset used to interpret plain dates
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Validate a draft, assign it a new id and insert it
    pub fn add(&mut self, draft: TransactionDraft) -> LedgerResult<Transaction> {
        let txn = draft.into_transaction(self.fresh_id(), self.offset)?;
        warn_if_unknown_category(&txn);

        self.sequence.insert(txn.id, self.next_sequence);
        self.next_sequence += 1;
        self.insert_sorted(txn.clone());

        info!(id = %txn.id, kind = %txn.kind, amount = %txn.amount, "transaction added");
        self.flush()?;
        Ok(txn)
    }

    /// Replace a stored record with `record` (matched by id)
    pub fn update(&mut self, mut record: Transaction) -> LedgerResult<Transaction> {
        let index = self
            .index_of(record.id)
            .ok_or_else(|| LedgerError::transaction_not_found(record.id.to_string()))?;
        record.note = record.note.trim().to_string();
        record.validate()?;
        warn_if_unknown_category(&record);

        self.transactions.remove(index);
        self.insert_sorted(record.clone());

        info!(id = %record.id, "transaction updated");
        self.flush()?;
        Ok(record)
    }

    /// Build a full replacement record for `id` from a draft and store it
    pub fn update_from_draft(
        &mut self,
        id: TransactionId,
        draft: TransactionDraft,
    ) -> LedgerResult<Transaction> {
        if self.index_of(id).is_none() {
            return Err(LedgerError::transaction_not_found(id.to_string()));
        }
        let record = draft.into_transaction(id, self.offset)?;
        self.update(record)
    }

    /// Delete a record. Removing an unknown id is a no-op.
    ///
    /// Returns whether a record was removed.
    pub fn remove(&mut self, id: TransactionId) -> LedgerResult<bool> {
        let Some(index) = self.index_of(id) else {
            debug!(id = %id, "remove of absent transaction ignored");
            return Ok(false);
        };

        self.transactions.remove(index);
        self.sequence.remove(&id);

        info!(id = %id, "transaction removed");
        self.flush()?;
        Ok(true)
    }

    /// All transactions in canonical order
    pub fn list(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.index_of(id).map(|i| &self.transactions[i])
    }

    /// Resolve a full id, or a unique prefix of one (with or without `txn-`)
    pub fn find(&self, identifier: &str) -> LedgerResult<&Transaction> {
        if let Ok(id) = identifier.parse::<TransactionId>() {
            return self
                .get(id)
                .ok_or_else(|| LedgerError::transaction_not_found(identifier));
        }

        let prefix = identifier.trim().strip_prefix("txn-").unwrap_or(identifier.trim());
        if prefix.is_empty() {
            return Err(LedgerError::invalid("id", "must not be empty"));
        }

        let mut matches = self
            .transactions
            .iter()
            .filter(|t| t.id.to_string().starts_with(prefix));
        match (matches.next(), matches.next()) {
            (Some(txn), None) => Ok(txn),
            (Some(_), Some(_)) => Err(LedgerError::invalid(
                "id",
                format!("'{}' matches more than one transaction", identifier),
            )),
            (None, _) => Err(LedgerError::transaction_not_found(identifier)),
        }
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Write the current collection to the durable store
    pub fn flush(&self) -> LedgerResult<()> {
        write_json(self.store.as_ref(), TRANSACTIONS_KEY, &self.transactions).map_err(|e| {
            warn!(error = %e, "failed to persist transactions");
            match e {
                LedgerError::Persistence(_) => e,
                other => LedgerError::Persistence(other.to_string()),
            }
        })
    }

    fn fresh_id(&self) -> TransactionId {
        loop {
            let id = TransactionId::new();
            if !self.sequence.contains_key(&id) {
                return id;
            }
        }
    }

    fn index_of(&self, id: TransactionId) -> Option<usize> {
        self.transactions.iter().position(|t| t.id == id)
    }

    fn canonical_cmp(&self, a: &Transaction, b: &Transaction) -> Ordering {
        let seq = |t: &Transaction| self.sequence.get(&t.id).copied().unwrap_or(0);
        b.date.cmp(&a.date).then_with(|| seq(b).cmp(&seq(a)))
    }

    fn insert_sorted(&mut self, txn: Transaction) {
        let index = self
            .transactions
            .partition_point(|existing| self.canonical_cmp(existing, &txn) == Ordering::Less);
        self.transactions.insert(index, txn);
    }

    fn sort(&mut self) {
        let mut transactions = std::mem::take(&mut self.transactions);
        transactions.sort_by(|a, b| self.canonical_cmp(a, b));
        self.transactions = transactions;
    }
}

fn warn_if_unknown_category(txn: &Transaction) {
    if let Some(key) = txn.category.as_deref() {
        if !CategoryRegistry::is_known(key) {
            warn!(id = %txn.id, category = key, "unknown category, counted as Miscellaneous");
        }
    }
}
