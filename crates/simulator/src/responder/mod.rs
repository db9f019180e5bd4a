//! Response engine
//!
//! One handler per agent intent, each mutating the episode's slot state and
//! choosing the user's next intent:
//! - `request`: answer, re-ask, or shrug with "anything"
//! - `inform`: absorb the fact, correct it, or move the dialogue along
//! - `match_found`: accept (`thanks`) or `reject` the proposed record
//! - `done`: settle the final outcome
//!
//! The outcome is last-write-wins within a turn: a handler may overwrite a
//! value set earlier in the same `step`.

mod done;
mod inform;
mod match_found;
mod request;

use usersim_config::SimulatorConfig;
use usersim_core::{
    choose, AgentAction, AgentIntent, Error, RandomSource, RecordLookup, Result, SlotMap,
    SlotValue, UserIntent,
};

use crate::state::Episode;

/// Borrowed view of everything one turn may touch
pub(crate) struct Responder<'a> {
    pub(crate) config: &'a SimulatorConfig,
    pub(crate) records: &'a dyn RecordLookup,
    pub(crate) rng: &'a mut dyn RandomSource,
    pub(crate) episode: &'a mut Episode,
    /// Running balance of empty vs. non-empty list informs
    pub(crate) empty_informs: &'a mut i64,
}

impl<'a> Responder<'a> {
    /// Dispatch on the agent's intent
    pub(crate) fn respond(&mut self, action: &AgentAction) -> Result<()> {
        match action.intent {
            AgentIntent::Request => self.respond_to_request(action),
            AgentIntent::Inform => self.respond_to_inform(action),
            AgentIntent::MatchFound => self.respond_to_match_found(action),
            AgentIntent::Done => self.respond_to_done(),
        }
    }

    fn pick<T: Clone>(&mut self, items: &[T]) -> Option<T> {
        choose(&mut *self.rng, items).cloned()
    }

    fn is_primary_key(&self, slot: &str) -> bool {
        slot == self.config.primary_key
    }

    /// Give up one known constraint after the agent found no match
    ///
    /// Picks a resolved slot that is not already "anything", not the primary
    /// key and not in `excluded`, says "anything" for it, and drops it from
    /// the goal so it is never checked again. Returns the relaxed slot.
    fn relax_constraint(&mut self, excluded: &[String]) -> Option<String> {
        let candidates: Vec<String> = self
            .episode
            .state
            .history_slots
            .iter()
            .filter(|(slot, value)| {
                !value.mentions_anything()
                    && !self.is_primary_key(slot)
                    && !excluded.contains(slot)
            })
            .map(|(slot, _)| slot.clone())
            .collect();

        let slot = self.pick(&candidates)?;

        let episode = &mut *self.episode;
        episode.state.intent = UserIntent::Inform;
        episode.state.say(&slot, SlotValue::anything());
        episode.state.request_slots.clear();
        episode.goal.inform_slots.remove(&slot);

        tracing::info!(slot = %slot, "Relaxing constraint after no match");
        Some(slot)
    }
}

/// First slot of a payload the agent must fill
fn first_slot<'m>(
    slots: &'m SlotMap,
    intent: AgentIntent,
    which: &str,
) -> Result<(&'m String, &'m SlotValue)> {
    slots.iter().next().ok_or_else(|| {
        Error::contract(format!(
            "agent {} action carries no {} slots",
            intent, which
        ))
    })
}
