//! Collaborator traits for the user simulator
//!
//! The simulator core only talks to the outside world through these seams,
//! so goal sources, record stores, reward shaping and randomness can be
//! swapped for tests or for a different training setup.
//!
//! ```text
//! GoalSource      -> one Goal per episode
//! RecordLookup    -> record fields by primary-key id (final validation)
//! RewardFunction  <- Outcome per step, returns the scalar training signal
//! RandomSource    -> every stochastic tie-break
//! ```

mod goals;
mod random;
mod records;
mod reward;

pub use goals::GoalSource;
pub use random::{choose, RandomSource};
pub use records::RecordLookup;
pub use reward::RewardFunction;
