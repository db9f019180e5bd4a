//! Core types and traits for the dialogue user simulator
//!
//! This crate provides the vocabulary shared by every other crate:
//! - Slot values, sentinel markers and ordered slot maps
//! - User goals
//! - Dialogue acts (user and agent actions, intents, outcomes)
//! - Error types
//! - Collaborator traits (goal source, record lookup, reward, randomness)

pub mod dialogue;
pub mod error;
pub mod goal;
pub mod slots;
pub mod traits;

pub use dialogue::{AgentAction, AgentIntent, ConstraintCheck, Outcome, UserAction, UserIntent};
pub use error::{Error, Result};
pub use goal::Goal;
pub use slots::{SlotMap, SlotValue, ANYTHING, NO_MATCH, PLACEHOLDER, UNKNOWN};

pub use traits::{choose, GoalSource, RandomSource, RecordLookup, RewardFunction};
