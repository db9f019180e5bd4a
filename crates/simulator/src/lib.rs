//! Rule-based simulated user for training task-oriented dialogue agents
//!
//! The simulator samples a goal, opens the dialogue, and answers every agent
//! action with a user action plus a shaped reward:
//!
//! ```text
//! GoalSource ──► UserSimulator ◄── AgentAction
//!                    │  ▲
//!        Responder ──┘  └── RecordLookup (final match check)
//!                    │
//!                    ▼
//!        StepResult { user_action, reward, done, success }
//! ```

pub mod invariants;
pub mod reward;
pub mod rng;
pub mod simulator;
pub mod state;

mod responder;

pub use reward::OutcomeReward;
pub use rng::{ScriptedRandom, SeededRandom};
pub use simulator::{StepResult, UserSimulator};
pub use state::{Episode, SlotState};
