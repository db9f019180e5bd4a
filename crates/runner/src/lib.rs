//! Scripted replay of agent actions through the user simulator

pub mod replay;

pub use replay::{replay, ReplaySummary, TurnRecord};
