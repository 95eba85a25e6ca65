//! Budget store
//!
//! Owns the committed ceiling of both budget groups, plus a per-group edit
//! stage: an "editing" flag and the raw text typed so far. Staged text never
//! touches the committed ceiling until it is saved successfully.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{BudgetCeilings, BudgetGroup, Money};
use crate::storage::{read_json, write_json, KeyValueStore, BUDGETS_KEY};

/// Edit state of one budget group
#[derive(Debug, Clone, PartialEq, Eq)]
struct EditStage {
    editing: bool,
    staged: String,
}

/// The two monthly ceilings for a session
pub struct BudgetStore {
    store: Box<dyn KeyValueStore>,
    ceilings: BudgetCeilings,
    stages: BTreeMap<BudgetGroup, EditStage>,
}

impl BudgetStore {
    /// Load ceilings from `store`; missing groups default to zero
    pub fn load(store: Box<dyn KeyValueStore>) -> LedgerResult<Self> {
        let mut ceilings: BudgetCeilings = read_json(store.as_ref(), BUDGETS_KEY)?;

        for group in BudgetGroup::all() {
            if ceilings.get(*group).is_negative() {
                warn!(group = %group, "negative stored ceiling reset to zero");
                ceilings.set(*group, Money::zero());
            }
        }

        let stages = BudgetGroup::all()
            .iter()
            .map(|g| {
                (
                    *g,
                    EditStage {
                        editing: false,
                        staged: ceilings.get(*g).to_string(),
                    },
                )
            })
            .collect();

        debug!(food = %ceilings.food, misc = %ceilings.miscellaneous, "budgets loaded");
        Ok(Self {
            store,
            ceilings,
            stages,
        })
    }

    /// Current committed ceilings
    pub fn get(&self) -> BudgetCeilings {
        self.ceilings
    }

    pub fn ceiling(&self, group: BudgetGroup) -> Money {
        self.ceilings.get(group)
    }

    /// Overwrite the ceiling of `group`
    ///
    /// Rejects negative amounts. A flush failure still leaves the new value
    /// committed in memory.
    pub fn save(&mut self, group: BudgetGroup, amount: Money) -> LedgerResult<()> {
        if amount.is_negative() {
            return Err(LedgerError::invalid("amount", "must not be negative"));
        }
        if amount.exceeds_max() {
            return Err(LedgerError::invalid("amount", Money::max_exceeded_message()));
        }

        self.ceilings.set(group, amount);
        let stage = self.stage_mut(group);
        stage.staged = amount.to_string();

        info!(group = %group, amount = %amount, "budget saved");
        self.flush()
    }

    /// Parse user input as a ceiling and save it
    pub fn save_input(&mut self, group: BudgetGroup, input: &str) -> LedgerResult<Money> {
        let amount = parse_ceiling(input)?;
        self.save(group, amount)?;
        Ok(amount)
    }

    pub fn is_editing(&self, group: BudgetGroup) -> bool {
        self.stages.get(&group).map(|s| s.editing).unwrap_or(false)
    }

    /// Staged text for `group` (the committed value when nothing is staged)
    pub fn staged(&self, group: BudgetGroup) -> &str {
        self.stages
            .get(&group)
            .map(|s| s.staged.as_str())
            .unwrap_or_default()
    }

    /// Enter or leave edit mode. Leaving discards the staged text.
    pub fn set_editing(&mut self, group: BudgetGroup, editing: bool) {
        let committed = self.ceilings.get(group).to_string();
        let stage = self.stage_mut(group);
        stage.editing = editing;
        if !editing {
            stage.staged = committed;
        }
    }

    /// Replace the staged text for `group`
    pub fn stage(&mut self, group: BudgetGroup, value: impl Into<String>) {
        self.stage_mut(group).staged = value.into();
    }

    /// Validate and commit the staged text, then leave edit mode
    ///
    /// On a validation error the group stays in edit mode with its staged
    /// text untouched.
    pub fn save_staged(&mut self, group: BudgetGroup) -> LedgerResult<Money> {
        let amount = parse_ceiling(self.staged(group))?;
        let result = self.save(group, amount);
        // The value is committed in memory even if the flush failed
        self.set_editing(group, false);
        result.map(|_| amount)
    }

    /// Write the current ceilings to the durable store
    pub fn flush(&self) -> LedgerResult<()> {
        write_json(self.store.as_ref(), BUDGETS_KEY, &self.ceilings).map_err(|e| {
            warn!(error = %e, "failed to persist budgets");
            match e {
                LedgerError::Persistence(_) => e,
                other => LedgerError::Persistence(other.to_string()),
            }
        })
    }

    fn stage_mut(&mut self, group: BudgetGroup) -> &mut EditStage {
        self.stages.entry(group).or_insert_with(|| EditStage {
            editing: false,
            staged: String::new(),
        })
    }
}

/// Parse a ceiling from user input: any non-negative number
pub fn parse_ceiling(input: &str) -> LedgerResult<Money> {
    let amount = Money::parse(input)
        .map_err(|_| LedgerError::invalid("amount", format!("'{}' is not a number", input.trim())))?;
    if amount.is_negative() {
        return Err(LedgerError::invalid("amount", "must not be negative"));
    }
    if amount.exceeds_max() {
        return Err(LedgerError::invalid("amount", Money::max_exceeded_message()));
    }
    Ok(amount)
}
