//! Agent asked the user for a slot

use usersim_core::{AgentAction, Error, Outcome, Result, SlotValue, UserIntent};

use super::{first_slot, Responder};

impl Responder<'_> {
    /// Four cases, checked in order:
    /// 1. slot is a goal inform: answer it from the goal
    /// 2. goal request already resolved: repeat the resolved value
    /// 3. goal request still pending: ask it back, volunteer one pending fact
    /// 4. slot outside the goal: answer "anything"
    pub(super) fn respond_to_request(&mut self, action: &AgentAction) -> Result<()> {
        let (slot, _) = first_slot(&action.request_slots, action.intent, "request")?;
        let slot = slot.clone();

        {
            let state = &self.episode.state;
            if state.request_slots.contains_key(&slot) || state.history_slots.contains_key(&slot)
            {
                self.episode.outcome = Outcome::Unsuitable;
            }
        }

        let goal = &self.episode.goal;
        let in_goal_requests = goal.request_slots.contains_key(&slot);

        if let Some(value) = goal.inform_slots.get(&slot).cloned() {
            let state = &mut self.episode.state;
            state.intent = UserIntent::Inform;
            state.say(&slot, value);
            state.request_slots.clear();
        } else if in_goal_requests && self.episode.state.history_slots.contains_key(&slot) {
            self.episode.outcome = Outcome::Unsuitable;
            let state = &mut self.episode.state;
            let known = state.history_slots[&slot].clone();
            state.intent = UserIntent::Inform;
            state.inform_slots.insert(slot.clone(), known);
            state.request_slots.clear();
        } else if in_goal_requests && self.episode.state.rest_slots.contains_key(&slot) {
            {
                let state = &mut self.episode.state;
                state.request_slots.clear();
                state.intent = UserIntent::Request;
                state.ask(&slot);
            }

            let volunteered: Vec<(String, SlotValue)> = self
                .episode
                .state
                .rest_slots
                .iter()
                .filter(|(_, value)| !value.is_unknown())
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            if let Some((extra, value)) = self.pick(&volunteered) {
                self.episode.state.say(&extra, value);
            }
        } else {
            let state = &mut self.episode.state;
            if state.rest_slots.contains_key(&slot) {
                return Err(Error::invariant(
                    "rest_within_goal",
                    format!("requested slot '{}' is pending but not in the goal", slot),
                ));
            }
            state.intent = UserIntent::Inform;
            state.say(&slot, SlotValue::anything());
            state.request_slots.clear();
        }

        Ok(())
    }
}
