//! Reward bridge

use crate::dialogue::Outcome;

/// Maps a turn outcome to the scalar signal fed to the learning agent
pub trait RewardFunction: Send + Sync {
    fn reward(&self, outcome: Outcome, max_round: u32) -> f64;
}

impl<F> RewardFunction for F
where
    F: Fn(Outcome, u32) -> f64 + Send + Sync,
{
    fn reward(&self, outcome: Outcome, max_round: u32) -> f64 {
        self(outcome, max_round)
    }
}
