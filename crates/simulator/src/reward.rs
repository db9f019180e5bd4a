//! Default reward bridge
//!
//! ```text
//! reward = turn_penalty + bonus(outcome)
//!
//! Success     +success_multiplier * max_round
//! Fail        -fail_multiplier * max_round
//! Unsuitable  unsuitable_penalty
//! NoValue     no_value_penalty
//! GoodInform  good_inform_bonus
//! NoOutcome   0
//! ```

use usersim_config::RewardConfig;
use usersim_core::{Outcome, RewardFunction};

/// Outcome-weighted reward
#[derive(Debug, Clone, Default)]
pub struct OutcomeReward {
    config: RewardConfig,
}

impl OutcomeReward {
    pub fn new(config: RewardConfig) -> Self {
        Self { config }
    }
}

impl RewardFunction for OutcomeReward {
    fn reward(&self, outcome: Outcome, max_round: u32) -> f64 {
        let max_round = f64::from(max_round);
        let c = &self.config;
        let bonus = match outcome {
            Outcome::NoOutcome => 0.0,
            Outcome::Success => c.success_multiplier * max_round,
            Outcome::Fail => -c.fail_multiplier * max_round,
            Outcome::Unsuitable => c.unsuitable_penalty,
            Outcome::NoValue => c.no_value_penalty,
            Outcome::GoodInform => c.good_inform_bonus,
        };
        c.turn_penalty + bonus
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let reward = OutcomeReward::default();
        assert_eq!(reward.reward(Outcome::NoOutcome, 20), -1.0);
        assert_eq!(reward.reward(Outcome::Success, 20), 39.0);
        assert_eq!(reward.reward(Outcome::Fail, 20), -21.0);
        assert_eq!(reward.reward(Outcome::Unsuitable, 20), -2.0);
        assert_eq!(reward.reward(Outcome::NoValue, 20), -1.5);
        assert_eq!(reward.reward(Outcome::GoodInform, 20), -0.5);
    }

    #[test]
    fn test_custom_weights() {
        let config = RewardConfig {
            turn_penalty: 0.0,
            success_multiplier: 1.0,
            ..RewardConfig::default()
        };
        let reward = OutcomeReward::new(config);
        assert_eq!(reward.reward(Outcome::Success, 10), 10.0);
    }
}
