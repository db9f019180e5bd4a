//! User goals
//!
//! A goal is what the simulated user brings into an episode: the facts it
//! already knows (`inform_slots`) and the facts it wants from the agent
//! (`request_slots`, values are always `"UNK"`).

use serde::{Deserialize, Serialize};

use crate::slots::{SlotMap, SlotValue};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Goal {
    #[serde(default)]
    pub inform_slots: SlotMap,
    #[serde(default)]
    pub request_slots: SlotMap,
}

impl Goal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_inform(mut self, slot: &str, value: impl Into<SlotValue>) -> Self {
        self.inform_slots.insert(slot.to_string(), value.into());
        self
    }

    pub fn with_request(mut self, slot: &str) -> Self {
        self.request_slots
            .insert(slot.to_string(), SlotValue::unknown());
        self
    }

    /// Whether `slot` is a goal inform or goal request slot
    pub fn contains(&self, slot: &str) -> bool {
        self.inform_slots.contains_key(slot) || self.request_slots.contains_key(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_from_json() {
        let goal: Goal = serde_json::from_str(
            r#"{"inform_slots": {"city": "NYC"}, "request_slots": {"restaurant": "UNK"}}"#,
        )
        .unwrap();
        assert_eq!(goal.inform_slots["city"], SlotValue::text("NYC"));
        assert!(goal.request_slots["restaurant"].is_unknown());
        assert!(goal.contains("city"));
        assert!(goal.contains("restaurant"));
        assert!(!goal.contains("date"));
    }

    #[test]
    fn test_goal_from_yaml_missing_sections() {
        let goal: Goal = serde_yaml::from_str("inform_slots:\n  city: NYC\n").unwrap();
        assert!(goal.request_slots.is_empty());
    }
}
