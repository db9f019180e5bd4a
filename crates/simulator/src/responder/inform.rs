//! Agent stated a slot value

use usersim_core::{AgentAction, Error, Outcome, Result, SlotValue, UserIntent};

use super::{first_slot, Responder};

impl Responder<'_> {
    pub(super) fn respond_to_inform(&mut self, action: &AgentAction) -> Result<()> {
        let (slot, value) = first_slot(&action.inform_slots, action.intent, "inform")?;
        let (slot, value) = (slot.clone(), value.clone());

        if self.is_primary_key(&slot) {
            return Err(Error::contract(format!(
                "agent informed primary key '{}' outside match_found",
                slot
            )));
        }

        self.classify_inform(&slot, &value);

        if value.is_no_match() {
            self.relax_constraint(&[]);
        }

        {
            let state = &mut self.episode.state;
            state.remember(&slot, value.clone());
            state.request_slots.remove(&slot);
        }

        match self.episode.goal.inform_slots.get(&slot).cloned() {
            Some(expected) if expected != value => {
                let state = &mut self.episode.state;
                state.intent = UserIntent::Inform;
                state.say(&slot, expected);
                state.request_slots.clear();
            },
            _ => self.continue_dialogue(),
        }

        Ok(())
    }

    /// Outcome for an agent inform, judged before the state absorbs it
    fn classify_inform(&mut self, slot: &str, value: &SlotValue) {
        let state = &self.episode.state;
        if state.request_slots.contains_key(slot) {
            if value.is_empty() {
                tracing::debug!(slot = %slot, "Agent answered a user request with an empty value");
            }
        } else if state.history_slots.contains_key(slot) {
            self.episode.outcome = Outcome::NoValue;
        } else if let SlotValue::List(items) = value {
            if items.is_empty() {
                *self.empty_informs += 1;
                self.episode.outcome = Outcome::Unsuitable;
            } else {
                *self.empty_informs -= 1;
                self.episode.outcome = Outcome::GoodInform;
            }
        }
    }

    /// Pick the user's next move once the agent's fact is accepted
    ///
    /// Keep asking while a request is pending; otherwise bring up one random
    /// pending slot (inform it if known, request it if not), leaving the
    /// primary key for last; with nothing left to say, thank the agent.
    fn continue_dialogue(&mut self) {
        if !self.episode.state.request_slots.is_empty() {
            self.episode.state.intent = UserIntent::Request;
            return;
        }
        if self.episode.state.rest_slots.is_empty() {
            self.episode.state.intent = UserIntent::Thanks;
            return;
        }

        let primary_key = self.config.primary_key.clone();
        let held_back = self.episode.state.rest_slots.remove(&primary_key);

        let pending: Vec<(String, SlotValue)> = self
            .episode
            .state
            .rest_slots
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        match self.pick(&pending) {
            Some((next, value)) if !value.is_unknown() => {
                let state = &mut self.episode.state;
                state.intent = UserIntent::Inform;
                state.say(&next, value);
            },
            Some((next, _)) => {
                let state = &mut self.episode.state;
                state.intent = UserIntent::Request;
                state.ask(&next);
            },
            None => {
                let state = &mut self.episode.state;
                state.intent = UserIntent::Request;
                state.ask(&primary_key);
            },
        }

        if held_back.map_or(false, |v| v.is_unknown()) {
            self.episode
                .state
                .rest_slots
                .insert(primary_key, SlotValue::unknown());
        }
    }
}
