//! Agent proposed a record

use usersim_core::{AgentAction, ConstraintCheck, Error, Outcome, Result, UserIntent};

use super::Responder;

impl Responder<'_> {
    pub(super) fn respond_to_match_found(&mut self, action: &AgentAction) -> Result<()> {
        if self.episode.state.intent == UserIntent::Reject {
            self.episode.outcome = Outcome::Unsuitable;
        }

        let config = self.config;
        let primary_key = config.primary_key.as_str();
        let proposed = action.inform_slots.get(primary_key).ok_or_else(|| {
            Error::contract(format!(
                "match_found without primary key '{}' in informs",
                primary_key
            ))
        })?;

        self.episode.state.intent = UserIntent::Thanks;
        self.episode.constraint_check = ConstraintCheck::Success;

        {
            let state = &mut self.episode.state;
            state.remember(primary_key, proposed.stringified());
            state.request_slots.remove(primary_key);
        }

        if proposed.is_no_match() {
            self.episode.constraint_check = ConstraintCheck::Fail;
            self.relax_constraint(&config.match_relax_excluded);
        }

        let mismatch = self
            .episode
            .goal
            .inform_slots
            .iter()
            .filter(|(slot, _)| !config.no_query_keys.contains(*slot))
            .find(|(slot, value)| action.inform_slots.get(*slot) != Some(*value))
            .map(|(slot, _)| slot.clone());
        if let Some(slot) = mismatch {
            tracing::debug!(slot = %slot, "Proposed record does not satisfy the goal");
            self.episode.constraint_check = ConstraintCheck::Fail;
        }

        if self.episode.constraint_check == ConstraintCheck::Fail {
            let state = &mut self.episode.state;
            state.intent = UserIntent::Reject;
            state.request_slots.clear();
        }

        if self.episode.state.intent == UserIntent::Thanks {
            let episode = &mut *self.episode;
            for slot in episode.goal.request_slots.keys() {
                if episode.state.rest_slots.remove(slot).is_some() {
                    tracing::info!(slot = %slot, "Match accepted, dropping pending request");
                }
            }
            episode.goal.request_slots.clear();
            episode.state.request_slots.clear();
        }

        Ok(())
    }
}
