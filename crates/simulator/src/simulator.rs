//! Simulated user
//!
//! ```text
//!   reset() ──► opening UserAction
//!      │
//!      ▼
//!   step(AgentAction) ──► validate ──► respond ──► check invariants ──► reward
//!      ▲                                                                  │
//!      └──────────────────────────── StepResult (done = false) ◄──────────┘
//! ```
//!
//! One episode at a time. Any error from `step` ends the episode; the caller
//! must `reset` before stepping again.

use std::sync::Arc;

use serde::Serialize;

use usersim_config::SimulatorConfig;
use usersim_core::{
    choose, AgentAction, AgentIntent, ConstraintCheck, Error, Goal, GoalSource, Outcome,
    RandomSource, RecordLookup, Result, RewardFunction, SlotValue, UserAction, UserIntent,
};

use crate::invariants;
use crate::responder::Responder;
use crate::reward::OutcomeReward;
use crate::rng::SeededRandom;
use crate::state::{Episode, SlotState};

/// Result of one `step`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepResult {
    /// What the user says back
    pub user_action: UserAction,
    pub reward: f64,
    /// Episode ended this turn
    pub done: bool,
    /// `outcome == Success`
    pub success: bool,
    pub outcome: Outcome,
}

/// Rule-based simulated user
pub struct UserSimulator {
    config: SimulatorConfig,
    goals: Arc<dyn GoalSource>,
    records: Arc<dyn RecordLookup>,
    reward: Arc<dyn RewardFunction>,
    rng: Box<dyn RandomSource>,
    episode: Option<Episode>,
    /// Net count of empty minus non-empty list informs since the last take
    empty_informs: i64,
}

impl UserSimulator {
    /// Create a simulator with the default reward and an entropy-seeded RNG
    pub fn new(
        config: SimulatorConfig,
        goals: Arc<dyn GoalSource>,
        records: Arc<dyn RecordLookup>,
    ) -> Self {
        let rng = SeededRandom::from_optional(None);
        tracing::debug!(seed = rng.seed(), "Simulator RNG seeded from entropy");

        Self {
            config,
            goals,
            records,
            reward: Arc::new(OutcomeReward::default()),
            rng: Box::new(rng),
            episode: None,
            empty_informs: 0,
        }
    }

    pub fn with_reward<R: RewardFunction + 'static>(mut self, reward: R) -> Self {
        self.reward = Arc::new(reward);
        self
    }

    pub fn with_rng<R: RandomSource + 'static>(mut self, rng: R) -> Self {
        self.rng = Box::new(rng);
        self
    }

    /// Goal of the running episode (relaxations applied)
    pub fn goal(&self) -> Option<&Goal> {
        self.episode.as_ref().map(|e| &e.goal)
    }

    pub fn state(&self) -> Option<&SlotState> {
        self.episode.as_ref().map(|e| &e.state)
    }

    pub fn constraint_check(&self) -> Option<ConstraintCheck> {
        self.episode.as_ref().map(|e| e.constraint_check)
    }

    /// Outcome of the latest turn
    pub fn outcome(&self) -> Option<Outcome> {
        self.episode.as_ref().map(|e| e.outcome)
    }

    /// Read and zero the empty-inform counter
    pub fn take_empty_inform_count(&mut self) -> i64 {
        std::mem::take(&mut self.empty_informs)
    }

    /// Start a new episode from a randomly drawn goal
    pub fn reset(&mut self) -> Result<UserAction> {
        let goal = self
            .goals
            .sample_goal(&mut *self.rng)
            .ok_or(Error::NoGoals)?;
        self.reset_with_goal(goal)
    }

    /// Start a new episode from a given goal
    ///
    /// The user opens with a request, informing the required initial slots
    /// the goal has (or one random goal inform when it has none of them).
    pub fn reset_with_goal(&mut self, mut goal: Goal) -> Result<UserAction> {
        self.episode = None;

        let primary_key = self.config.primary_key.clone();
        goal.request_slots
            .insert(primary_key.clone(), SlotValue::unknown());

        let mut episode = Episode::new(goal);

        if !episode.goal.inform_slots.is_empty() {
            let required: Vec<(String, SlotValue)> = self
                .config
                .required_init_informs
                .iter()
                .filter_map(|slot| {
                    episode
                        .goal
                        .inform_slots
                        .get(slot)
                        .map(|v| (slot.clone(), v.clone()))
                })
                .collect();

            if required.is_empty() {
                let informs: Vec<(&String, &SlotValue)> =
                    episode.goal.inform_slots.iter().collect();
                if let Some((slot, value)) = choose(&mut *self.rng, &informs) {
                    episode.state.say(slot, (*value).clone());
                }
            } else {
                for (slot, value) in required {
                    episode.state.say(&slot, value);
                }
            }
        }

        let askable: Vec<&String> = episode
            .goal
            .request_slots
            .keys()
            .filter(|slot| **slot != primary_key)
            .collect();
        let first_request = choose(&mut *self.rng, &askable)
            .map(|slot| (*slot).clone())
            .unwrap_or_else(|| primary_key.clone());

        episode.state.intent = UserIntent::Request;
        episode.state.ask(&first_request);

        invariants::check(&episode.goal, &episode.state)?;

        let opening = episode.state.to_user_action();
        tracing::debug!(
            goal = ?episode.goal,
            opening = ?opening,
            "Episode started"
        );
        self.episode = Some(episode);
        Ok(opening)
    }

    /// Respond to one agent action
    pub fn step(&mut self, action: &AgentAction) -> Result<StepResult> {
        let result = self.advance(action);
        if let Err(ref e) = result {
            tracing::error!(error = %e, round = action.round, "Episode aborted");
            self.episode = None;
        }
        result
    }

    fn advance(&mut self, action: &AgentAction) -> Result<StepResult> {
        let episode = self.episode.as_mut().ok_or(Error::NoActiveEpisode)?;
        validate_action(action)?;

        episode.state.inform_slots.clear();
        episode.outcome = Outcome::NoOutcome;

        if episode.state.intent == UserIntent::Thanks && action.intent != AgentIntent::Done {
            episode.outcome = Outcome::Unsuitable;
        }

        let mut done = false;
        if action.round == self.config.max_round_num {
            tracing::debug!(round = action.round, "Max round reached");
            done = true;
            episode.outcome = Outcome::Fail;
            episode.state.intent = UserIntent::Done;
            episode.state.request_slots.clear();
        } else {
            let mut responder = Responder {
                config: &self.config,
                records: &*self.records,
                rng: &mut *self.rng,
                episode: &mut *episode,
                empty_informs: &mut self.empty_informs,
            };
            responder.respond(action)?;

            if action.intent == AgentIntent::Done {
                episode.state.intent = UserIntent::Done;
                episode.state.request_slots.clear();
                done = true;
            }
        }

        invariants::check(&episode.goal, &episode.state)?;

        let outcome = episode.outcome;
        let reward = self.reward.reward(outcome, self.config.max_round_num);
        let user_action = episode.state.to_user_action();

        tracing::debug!(
            agent_intent = %action.intent,
            user_intent = %user_action.intent,
            round = action.round,
            ?outcome,
            reward,
            done,
            "Turn complete"
        );

        Ok(StepResult {
            user_action,
            reward,
            done,
            success: outcome.is_success(),
            outcome,
        })
    }
}

/// Reject sentinel markers the agent must never send
fn validate_action(action: &AgentAction) -> Result<()> {
    if let Some((slot, value)) = action
        .inform_slots
        .iter()
        .find(|(_, v)| v.is_unknown() || v.is_placeholder())
    {
        return Err(Error::contract(format!(
            "agent informs '{}' with sentinel '{}'",
            slot, value
        )));
    }
    if let Some((slot, _)) = action.request_slots.iter().find(|(_, v)| v.is_placeholder()) {
        return Err(Error::contract(format!(
            "agent requests '{}' with a placeholder",
            slot
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRandom;
    use std::collections::BTreeMap;
    use usersim_core::SlotMap;

    fn simulator(goals: Vec<Goal>) -> UserSimulator {
        let config = SimulatorConfig {
            primary_key: "restaurant".to_string(),
            required_init_informs: vec!["city".to_string()],
            no_query_keys: vec!["restaurant".to_string()],
            ..SimulatorConfig::default()
        };
        let records: BTreeMap<i64, SlotMap> = BTreeMap::new();
        UserSimulator::new(config, Arc::new(goals), Arc::new(records))
            .with_rng(ScriptedRandom::default())
    }

    #[test]
    fn test_reset_requires_goals() {
        let mut sim = simulator(Vec::new());
        assert_eq!(sim.reset(), Err(Error::NoGoals));
        assert!(sim.state().is_none());
    }

    #[test]
    fn test_step_requires_episode() {
        let mut sim = simulator(vec![Goal::new().with_inform("city", "NYC")]);
        let action = AgentAction::new(AgentIntent::Request, 1).with_request("city");
        assert_eq!(sim.step(&action), Err(Error::NoActiveEpisode));
    }

    #[test]
    fn test_sentinel_in_agent_action_is_contract_violation() {
        let mut sim = simulator(vec![Goal::new().with_inform("city", "NYC")]);
        sim.reset().unwrap();

        let action = AgentAction::new(AgentIntent::Inform, 1)
            .with_inform("city", SlotValue::unknown());
        let err = sim.step(&action).unwrap_err();
        assert!(matches!(err, Error::ContractViolation(_)));

        assert!(sim.state().is_none());
        let next = AgentAction::new(AgentIntent::Request, 2).with_request("city");
        assert_eq!(sim.step(&next), Err(Error::NoActiveEpisode));
    }

    #[test]
    fn test_placeholder_request_ends_episode() {
        let mut sim = simulator(vec![Goal::new().with_inform("city", "NYC")]);
        sim.reset().unwrap();

        let mut action = AgentAction::new(AgentIntent::Request, 1);
        action
            .request_slots
            .insert("city".to_string(), SlotValue::text(usersim_core::PLACEHOLDER));
        assert!(matches!(sim.step(&action), Err(Error::ContractViolation(_))));
        assert!(sim.goal().is_none());
    }

    #[test]
    fn test_primary_key_added_to_goal() {
        let mut sim = simulator(vec![Goal::new().with_inform("city", "NYC")]);
        let opening = sim.reset().unwrap();

        assert!(sim.goal().unwrap().request_slots.contains_key("restaurant"));
        // only the primary key is left to ask for
        assert!(opening.request_slots.contains_key("restaurant"));
        assert_eq!(opening.inform_slots["city"], SlotValue::text("NYC"));
    }

    #[test]
    fn test_empty_inform_counter_take() {
        let mut sim = simulator(vec![Goal::new().with_inform("city", "NYC")]);
        sim.empty_informs = 3;
        assert_eq!(sim.take_empty_inform_count(), 3);
        assert_eq!(sim.take_empty_inform_count(), 0);
    }
}
