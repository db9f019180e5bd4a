//! Goal sources

use crate::goal::Goal;

use super::RandomSource;

/// Supplies one user goal per episode
pub trait GoalSource: Send + Sync {
    /// Number of goals available
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Goal at a given position
    fn goal_at(&self, index: usize) -> Option<&Goal>;

    /// Uniform random draw, `None` when the source is empty
    fn sample_goal(&self, rng: &mut dyn RandomSource) -> Option<Goal> {
        if self.is_empty() {
            return None;
        }
        let index = rng.pick(self.len());
        self.goal_at(index).cloned()
    }
}

impl GoalSource for Vec<Goal> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn goal_at(&self, index: usize) -> Option<&Goal> {
        self.get(index)
    }
}
