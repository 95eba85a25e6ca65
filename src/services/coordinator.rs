//! Create/edit/delete coordinator
//!
//! A small state machine in front of the ledger: at most one create, edit or
//! delete flow is open at a time. Successful submissions and persistence
//! failures (the mutation already happened in memory) close the flow;
//! validation failures keep it open so the caller can fix the draft.

use tracing::debug;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Transaction, TransactionDraft};
use crate::services::ledger::TransactionLedger;

/// What the coordinator is currently doing
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ModalState {
    #[default]
    Idle,
    Creating,
    /// Editing a snapshot of the record taken when the edit began
    Editing(Transaction),
    /// Waiting for confirmation before removing the record
    PendingDelete(Transaction),
}

impl ModalState {
    fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Creating => "creating",
            Self::Editing(_) => "editing",
            Self::PendingDelete(_) => "confirming a delete",
        }
    }
}

/// Outcome of a submit or confirm: the record touched, if any
pub type Outcome = LedgerResult<Option<Transaction>>;

#[derive(Debug, Default)]
pub struct EditCoordinator {
    state: ModalState,
}

impl EditCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, ModalState::Idle)
    }

    /// Open an empty create flow
    pub fn begin_create(&mut self) -> LedgerResult<()> {
        self.require_idle("start creating")?;
        self.transition(ModalState::Creating);
        Ok(())
    }

    /// Open an edit flow on `txn`
    pub fn begin_edit(&mut self, txn: Transaction) -> LedgerResult<()> {
        self.require_idle("start editing")?;
        self.transition(ModalState::Editing(txn));
        Ok(())
    }

    /// Ask for confirmation before deleting `txn`
    pub fn begin_delete(&mut self, txn: Transaction) -> LedgerResult<()> {
        self.require_idle("request a delete")?;
        self.transition(ModalState::PendingDelete(txn));
        Ok(())
    }

    /// Draft prefilled from the record under edit
    pub fn edit_draft(&self) -> Option<TransactionDraft> {
        match &self.state {
            ModalState::Editing(txn) => Some(TransactionDraft::from_transaction(txn)),
            _ => None,
        }
    }

    /// Submit the open create or edit flow
    pub fn submit(&mut self, ledger: &mut TransactionLedger, draft: TransactionDraft) -> Outcome {
        let result = match &self.state {
            ModalState::Creating => ledger.add(draft),
            ModalState::Editing(original) => ledger.update_from_draft(original.id, draft),
            other => {
                return Err(LedgerError::InvalidTransition {
                    action: "submit",
                    state: other.name(),
                })
            }
        };
        self.settle(result.map(Some))
    }

    /// Carry out the pending delete
    pub fn confirm_delete(&mut self, ledger: &mut TransactionLedger) -> Outcome {
        let ModalState::PendingDelete(txn) = &self.state else {
            return Err(LedgerError::InvalidTransition {
                action: "confirm a delete",
                state: self.state.name(),
            });
        };
        let txn = txn.clone();
        let result = ledger
            .remove(txn.id)
            .map(|removed| removed.then_some(txn));
        self.settle(result)
    }

    /// Abandon whatever flow is open
    pub fn cancel(&mut self) {
        if !self.is_idle() {
            self.transition(ModalState::Idle);
        }
    }

    fn settle(&mut self, result: Outcome) -> Outcome {
        match &result {
            Ok(_) => self.transition(ModalState::Idle),
            Err(e) if e.is_persistence() => self.transition(ModalState::Idle),
            Err(_) => {}
        }
        result
    }

    fn require_idle(&self, action: &'static str) -> LedgerResult<()> {
        if self.is_idle() {
            Ok(())
        } else {
            Err(LedgerError::InvalidTransition {
                action,
                state: self.state.name(),
            })
        }
    }

    fn transition(&mut self, next: ModalState) {
        debug!(from = self.state.name(), to = next.name(), "coordinator transition");
        self.state = next;
    }
}
