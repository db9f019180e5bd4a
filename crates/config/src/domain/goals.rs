//! User goal list
//!
//! A goal file is either a bare list of goals (JSON/YAML) or a table with a
//! `goals` array (any format; the only shape TOML can express):
//!
//! ```yaml
//! - inform_slots:
//!     moviename: zootopia
//!     city: seattle
//!   request_slots:
//!     starttime: UNK
//! ```

use serde::Deserialize;
use std::path::Path;

use usersim_core::{Goal, GoalSource};

use super::{read_structured, FileFormat};
use crate::ConfigError;

#[derive(Deserialize)]
#[serde(untagged)]
enum GoalFile {
    List(Vec<Goal>),
    Table { goals: Vec<Goal> },
}

/// Pre-loaded collection of user goals
#[derive(Debug, Clone, Default)]
pub struct GoalList {
    goals: Vec<Goal>,
}

impl GoalList {
    pub fn new(goals: Vec<Goal>) -> Self {
        Self { goals }
    }

    /// Load goals from a JSON, YAML or TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = FileFormat::from_path(path)?;
        let goals = match read_structured::<GoalFile>(path, format)? {
            GoalFile::List(goals) | GoalFile::Table { goals } => goals,
        };

        if goals.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: path.display().to_string(),
                message: "Goal file contains no goals".to_string(),
            });
        }

        tracing::info!(path = %path.display(), goals = goals.len(), "Loaded user goals");
        Ok(Self { goals })
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }
}

impl GoalSource for GoalList {
    fn len(&self) -> usize {
        self.goals.len()
    }

    fn goal_at(&self, index: usize) -> Option<&Goal> {
        self.goals.get(index)
    }
}
