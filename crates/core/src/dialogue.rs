//! Dialogue acts exchanged between the agent and the simulated user

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::slots::SlotMap;

/// Intents the simulated user can express
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserIntent {
    /// Asking the agent for one or more slots
    Request,
    /// Stating slot values
    Inform,
    /// Satisfied with the proposed match
    Thanks,
    /// Proposed match violates a constraint
    Reject,
    /// Conversation over
    Done,
}

impl UserIntent {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserIntent::Request => "request",
            UserIntent::Inform => "inform",
            UserIntent::Thanks => "thanks",
            UserIntent::Reject => "reject",
            UserIntent::Done => "done",
        }
    }
}

impl fmt::Display for UserIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Intents the agent under training can express
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentIntent {
    /// Asks the user for a slot
    Request,
    /// States a slot value
    Inform,
    /// Proposes a record
    MatchFound,
    /// Ends the conversation
    Done,
}

impl AgentIntent {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentIntent::Request => "request",
            AgentIntent::Inform => "inform",
            AgentIntent::MatchFound => "match_found",
            AgentIntent::Done => "done",
        }
    }
}

impl fmt::Display for AgentIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the simulated user says on a turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAction {
    pub intent: UserIntent,
    #[serde(default)]
    pub inform_slots: SlotMap,
    #[serde(default)]
    pub request_slots: SlotMap,
}

/// What the agent says on a turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentAction {
    pub intent: AgentIntent,
    #[serde(default)]
    pub inform_slots: SlotMap,
    #[serde(default)]
    pub request_slots: SlotMap,
    /// Turn counter maintained by the training loop
    #[serde(default)]
    pub round: u32,
}

impl AgentAction {
    pub fn new(intent: AgentIntent, round: u32) -> Self {
        Self {
            intent,
            inform_slots: SlotMap::new(),
            request_slots: SlotMap::new(),
            round,
        }
    }

    pub fn with_inform(mut self, slot: &str, value: impl Into<crate::SlotValue>) -> Self {
        self.inform_slots.insert(slot.to_string(), value.into());
        self
    }

    pub fn with_request(mut self, slot: &str) -> Self {
        self.request_slots
            .insert(slot.to_string(), crate::SlotValue::unknown());
        self
    }
}

/// Per-turn classification of the agent's last move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    #[default]
    NoOutcome,
    Success,
    Fail,
    /// Agent acted inappropriately for the situation
    Unsuitable,
    /// Agent supplied a non-empty answer to a new slot
    GoodInform,
    /// Agent repeated a slot the user already had
    NoValue,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }
}

/// Rolling verdict on whether the proposed match satisfies the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintCheck {
    Success,
    #[default]
    Fail,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SlotValue;

    #[test]
    fn test_agent_action_deserialization() {
        let action: AgentAction = serde_json::from_str(
            r#"{"intent": "match_found", "inform_slots": {"ticket": 3}, "round": 4}"#,
        )
        .unwrap();
        assert_eq!(action.intent, AgentIntent::MatchFound);
        assert_eq!(action.inform_slots["ticket"], SlotValue::Int(3));
        assert!(action.request_slots.is_empty());
        assert_eq!(action.round, 4);
    }

    #[test]
    fn test_unknown_agent_intent_rejected() {
        let parsed: Result<AgentAction, _> =
            serde_json::from_str(r#"{"intent": "greeting", "round": 1}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_user_action_serialization() {
        let action = UserAction {
            intent: UserIntent::Thanks,
            inform_slots: SlotMap::new(),
            request_slots: SlotMap::new(),
        };
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["intent"], "thanks");
    }

    #[test]
    fn test_builders() {
        let action = AgentAction::new(AgentIntent::Request, 2).with_request("city");
        assert!(action.request_slots["city"].is_unknown());

        let action = AgentAction::new(AgentIntent::Inform, 2).with_inform("city", "NYC");
        assert_eq!(action.inform_slots["city"], SlotValue::text("NYC"));
    }

    #[test]
    fn test_outcome_defaults() {
        assert_eq!(Outcome::default(), Outcome::NoOutcome);
        assert_eq!(ConstraintCheck::default(), ConstraintCheck::Fail);
        assert!(Outcome::Success.is_success());
        assert!(!Outcome::GoodInform.is_success());
    }
}
