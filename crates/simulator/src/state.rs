//! Per-episode slot bookkeeping
//!
//! ```text
//! rest_slots     goal slots not yet resolved in either direction
//! history_slots  everything said so far, by the user or the agent
//! inform_slots   this turn's outgoing informs (cleared every turn)
//! request_slots  what the user is currently waiting on
//! ```
//!
//! A slot moves from rest to history exactly once per resolution; the two
//! maps never share a key.

use serde::{Deserialize, Serialize};

use usersim_core::{ConstraintCheck, Goal, Outcome, SlotMap, SlotValue, UserAction, UserIntent};

/// Mutable slot state of the simulated user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotState {
    pub rest_slots: SlotMap,
    pub history_slots: SlotMap,
    pub inform_slots: SlotMap,
    pub request_slots: SlotMap,
    pub intent: UserIntent,
}

impl SlotState {
    /// Fresh state with every goal slot pending
    ///
    /// Request slots are layered over inform slots, so a slot listed in
    /// both starts out as `"UNK"`.
    pub fn from_goal(goal: &Goal) -> Self {
        let mut rest_slots = goal.inform_slots.clone();
        rest_slots.extend(
            goal.request_slots
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );

        Self {
            rest_slots,
            history_slots: SlotMap::new(),
            inform_slots: SlotMap::new(),
            request_slots: SlotMap::new(),
            intent: UserIntent::Request,
        }
    }

    /// Mark `slot` as resolved with `value`
    pub fn remember(&mut self, slot: &str, value: SlotValue) {
        self.rest_slots.remove(slot);
        self.history_slots.insert(slot.to_string(), value);
    }

    /// Tell the agent `slot = value` this turn and remember it
    pub fn say(&mut self, slot: &str, value: SlotValue) {
        self.inform_slots.insert(slot.to_string(), value.clone());
        self.remember(slot, value);
    }

    /// Ask the agent for `slot`
    pub fn ask(&mut self, slot: &str) {
        self.request_slots
            .insert(slot.to_string(), SlotValue::unknown());
    }

    /// Snapshot of what the user says this turn
    pub fn to_user_action(&self) -> UserAction {
        UserAction {
            intent: self.intent,
            inform_slots: self.inform_slots.clone(),
            request_slots: self.request_slots.clone(),
        }
    }
}

/// Everything owned by one running episode
#[derive(Debug, Clone, PartialEq)]
pub struct Episode {
    /// Episode-local copy of the sampled goal; relaxation edits this copy only
    pub goal: Goal,
    pub state: SlotState,
    pub constraint_check: ConstraintCheck,
    /// Outcome computed on the latest turn
    pub outcome: Outcome,
}

impl Episode {
    pub fn new(goal: Goal) -> Self {
        let state = SlotState::from_goal(&goal);
        Self {
            goal,
            state,
            constraint_check: ConstraintCheck::Fail,
            outcome: Outcome::NoOutcome,
        }
    }
}
