//! Error types
//!
//! Only programming-contract failures travel as errors. Expected dialogue
//! outcomes (fail, unsuitable, ...) are ordinary return values.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The agent action broke the interface contract
    #[error("Contract violation: {0}")]
    ContractViolation(String),

    /// A post-turn state check failed
    #[error("State-machine invariant violated ({invariant}): {detail}")]
    InvariantViolated { invariant: String, detail: String },

    /// The final match disagrees with the backing records
    #[error("Data consistency error: {0}")]
    DataConsistency(String),

    #[error("No active episode, call reset() first")]
    NoActiveEpisode,

    #[error("Goal source is empty")]
    NoGoals,
}

impl Error {
    pub fn contract(message: impl Into<String>) -> Self {
        Error::ContractViolation(message.into())
    }

    pub fn invariant(invariant: &str, detail: impl Into<String>) -> Self {
        Error::InvariantViolated {
            invariant: invariant.to_string(),
            detail: detail.into(),
        }
    }

    /// Whether this error stems from a state-machine invariant
    pub fn is_invariant(&self) -> bool {
        matches!(self, Error::InvariantViolated { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
