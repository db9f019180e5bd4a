//! Post-turn state checks
//!
//! Run after every turn. A failure means the response engine broke its own
//! bookkeeping (or was fed a malformed goal) and the episode cannot go on.

use usersim_core::{Error, Goal, Result, UserIntent};

use crate::state::SlotState;

/// Check every slot-state invariant, returning the first violation
pub fn check(goal: &Goal, state: &SlotState) -> Result<()> {
    let result = check_intent_payload(state)
        .and_then(|_| check_sentinels(state))
        .and_then(|_| check_disjoint(state))
        .and_then(|_| check_goal_coverage(goal, state))
        .and_then(|_| check_rest_within_goal(goal, state));

    if let Err(ref e) = result {
        tracing::error!(error = %e, ?state, ?goal, "Slot state invariant violated");
    }
    result
}

fn check_intent_payload(state: &SlotState) -> Result<()> {
    match state.intent {
        UserIntent::Request if state.request_slots.is_empty() => Err(Error::invariant(
            "request_has_slots",
            "intent is request but no request slots are set",
        )),
        UserIntent::Inform if state.inform_slots.is_empty() => Err(Error::invariant(
            "inform_has_slots",
            "intent is inform but no inform slots are set",
        )),
        UserIntent::Inform if !state.request_slots.is_empty() => Err(Error::invariant(
            "inform_without_requests",
            format!(
                "intent is inform but requests are pending: {:?}",
                state.request_slots.keys().collect::<Vec<_>>()
            ),
        )),
        _ => Ok(()),
    }
}

fn check_sentinels(state: &SlotState) -> Result<()> {
    if let Some((slot, _)) = state.inform_slots.iter().find(|(_, v)| v.is_unknown()) {
        return Err(Error::invariant(
            "no_unknown_informs",
            format!("user informs '{}' as unknown", slot),
        ));
    }
    if let Some((slot, _)) = state.request_slots.iter().find(|(_, v)| v.is_placeholder()) {
        return Err(Error::invariant(
            "no_placeholder_requests",
            format!("user requests '{}' with a placeholder", slot),
        ));
    }
    Ok(())
}

fn check_disjoint(state: &SlotState) -> Result<()> {
    match state
        .rest_slots
        .keys()
        .find(|k| state.history_slots.contains_key(*k))
    {
        Some(slot) => Err(Error::invariant(
            "rest_history_disjoint",
            format!("'{}' is both pending and resolved", slot),
        )),
        None => Ok(()),
    }
}

fn check_goal_coverage(goal: &Goal, state: &SlotState) -> Result<()> {
    let covered = |slot: &String| {
        state.history_slots.contains_key(slot) || state.rest_slots.contains_key(slot)
    };
    match goal
        .inform_slots
        .keys()
        .chain(goal.request_slots.keys())
        .find(|slot| !covered(*slot))
    {
        Some(slot) => Err(Error::invariant(
            "goal_covered",
            format!("goal slot '{}' is neither pending nor resolved", slot),
        )),
        None => Ok(()),
    }
}

fn check_rest_within_goal(goal: &Goal, state: &SlotState) -> Result<()> {
    match state.rest_slots.keys().find(|slot| !goal.contains(slot)) {
        Some(slot) => Err(Error::invariant(
            "rest_within_goal",
            format!("pending slot '{}' is not part of the goal", slot),
        )),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use usersim_core::{SlotValue, PLACEHOLDER};

    fn goal() -> Goal {
        Goal::new()
            .with_inform("city", "NYC")
            .with_request("restaurant")
    }

    fn fresh() -> SlotState {
        let mut state = SlotState::from_goal(&goal());
        state.ask("restaurant");
        state
    }

    fn violated(result: Result<()>) -> String {
        match result {
            Err(Error::InvariantViolated { invariant, .. }) => invariant,
            other => panic!("expected invariant violation, got {:?}", other),
        }
    }

    #[test]
    fn test_fresh_state_passes() {
        assert!(check(&goal(), &fresh()).is_ok());
    }

    #[test]
    fn test_request_without_slots() {
        let mut state = fresh();
        state.request_slots.clear();
        assert_eq!(violated(check(&goal(), &state)), "request_has_slots");
    }

    #[test]
    fn test_inform_payload_rules() {
        let mut state = fresh();
        state.intent = UserIntent::Inform;
        state.request_slots.clear();
        assert_eq!(violated(check(&goal(), &state)), "inform_has_slots");

        state.say("city", SlotValue::text("NYC"));
        state.ask("restaurant");
        assert_eq!(violated(check(&goal(), &state)), "inform_without_requests");
    }

    #[test]
    fn test_sentinel_leaks() {
        let mut state = fresh();
        state.inform_slots.insert("city".into(), SlotValue::unknown());
        assert_eq!(violated(check(&goal(), &state)), "no_unknown_informs");

        let mut state = fresh();
        state
            .request_slots
            .insert("restaurant".into(), SlotValue::text(PLACEHOLDER));
        assert_eq!(violated(check(&goal(), &state)), "no_placeholder_requests");
    }

    #[test]
    fn test_overlap_detected() {
        let mut state = fresh();
        state
            .history_slots
            .insert("city".into(), SlotValue::text("NYC"));
        assert_eq!(violated(check(&goal(), &state)), "rest_history_disjoint");
    }

    #[test]
    fn test_lost_goal_slot() {
        let mut state = fresh();
        state.rest_slots.remove("city");
        assert_eq!(violated(check(&goal(), &state)), "goal_covered");
    }

    #[test]
    fn test_foreign_rest_slot() {
        let mut state = fresh();
        state
            .rest_slots
            .insert("parking".into(), SlotValue::unknown());
        assert_eq!(violated(check(&goal(), &state)), "rest_within_goal");
    }

    #[test]
    fn test_thanks_and_reject_need_no_payload() {
        let mut state = fresh();
        state.request_slots.clear();
        state.intent = UserIntent::Thanks;
        assert!(check(&goal(), &state).is_ok());
        state.intent = UserIntent::Reject;
        assert!(check(&goal(), &state).is_ok());
    }
}
