//! JSON-lines replay loop
//!
//! ```text
//! agent actions (one JSON object per line)
//!        │
//!        ▼
//!   reset? ──► step ──► TurnRecord (one JSON object per line)
//! ```
//!
//! An episode is opened before the first action and again after every
//! terminal turn or aborted episode. Blank lines are skipped.

use std::io::{BufRead, Write};

use anyhow::Context;
use serde::Serialize;

use usersim_core::{AgentAction, Outcome, UserAction};
use usersim_simulator::UserSimulator;

/// One line of replay output
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TurnRecord {
    /// The user's opening utterance
    Reset {
        episode: u64,
        user_action: UserAction,
    },
    /// The user's answer to one agent action
    Step {
        episode: u64,
        round: u32,
        user_action: UserAction,
        reward: f64,
        done: bool,
        success: bool,
        outcome: Outcome,
    },
    /// The episode was aborted by a simulator error
    Error { episode: u64, message: String },
}

/// Totals over one replay
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReplaySummary {
    pub episodes: u64,
    pub turns: u64,
    pub successes: u64,
    pub errors: u64,
    pub total_reward: f64,
}

/// Feed every action in `input` to `sim`, writing one record per line
pub fn replay<R: BufRead, W: Write>(
    sim: &mut UserSimulator,
    input: R,
    mut output: W,
) -> anyhow::Result<ReplaySummary> {
    let mut summary = ReplaySummary::default();
    let mut in_episode = false;

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = line.with_context(|| format!("reading line {}", line_no))?;
        if line.trim().is_empty() {
            continue;
        }
        let action: AgentAction = serde_json::from_str(&line)
            .with_context(|| format!("line {}: not an agent action", line_no))?;

        if !in_episode {
            summary.episodes += 1;
            let user_action = sim.reset().context("starting episode")?;
            write_record(
                &mut output,
                &TurnRecord::Reset {
                    episode: summary.episodes,
                    user_action,
                },
            )?;
            in_episode = true;
        }

        summary.turns += 1;
        let record = match sim.step(&action) {
            Ok(result) => {
                summary.total_reward += result.reward;
                if result.success {
                    summary.successes += 1;
                }
                if result.done {
                    in_episode = false;
                }
                TurnRecord::Step {
                    episode: summary.episodes,
                    round: action.round,
                    user_action: result.user_action,
                    reward: result.reward,
                    done: result.done,
                    success: result.success,
                    outcome: result.outcome,
                }
            },
            Err(e) => {
                tracing::warn!(line = line_no, error = %e, "Episode aborted during replay");
                summary.errors += 1;
                in_episode = false;
                TurnRecord::Error {
                    episode: summary.episodes,
                    message: e.to_string(),
                }
            },
        };
        write_record(&mut output, &record)?;
    }

    output.flush()?;
    Ok(summary)
}

fn write_record<W: Write>(output: &mut W, record: &TurnRecord) -> anyhow::Result<()> {
    serde_json::to_writer(&mut *output, record)?;
    output.write_all(b"\n")?;
    Ok(())
}
