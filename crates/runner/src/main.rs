//! Simulator replay entry point
//!
//! Usage: `usersim [ACTIONS.jsonl]` (reads stdin when no file is given).
//! Settings come from `config/default.*`, `config/{USERSIM_ENV}.*` and
//! `USERSIM__*` environment variables.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use usersim_config::{load_settings, GoalList, RecordDatabase, Settings};
use usersim_runner::replay;
use usersim_simulator::{OutcomeReward, SeededRandom, UserSimulator};

fn main() -> anyhow::Result<()> {
    let env = std::env::var("USERSIM_ENV").ok();
    let settings = match load_settings(env.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            // Tracing not yet initialized
            eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
            Settings::default()
        },
    };

    init_tracing(&settings);
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = env.as_deref().unwrap_or("default"),
        "Starting user simulator replay"
    );

    let goals = GoalList::load(&settings.data.goals_path)
        .with_context(|| format!("loading goals from {}", settings.data.goals_path))?;
    let records = RecordDatabase::load(&settings.data.database_path)
        .with_context(|| format!("loading records from {}", settings.data.database_path))?;

    let rng = SeededRandom::from_optional(settings.seed);
    tracing::info!(seed = rng.seed(), "Random source ready");

    let mut sim = UserSimulator::new(
        settings.simulator.clone(),
        Arc::new(goals),
        Arc::new(records),
    )
    .with_reward(OutcomeReward::new(settings.reward.clone()))
    .with_rng(rng);

    let input: Box<dyn BufRead> = match std::env::args().nth(1) {
        Some(path) => {
            let file = File::open(&path).with_context(|| format!("opening {}", path))?;
            Box::new(BufReader::new(file))
        },
        None => Box::new(io::stdin().lock()),
    };

    let stdout = io::stdout();
    let summary = replay(&mut sim, input, stdout.lock())?;

    tracing::info!(
        episodes = summary.episodes,
        turns = summary.turns,
        successes = summary.successes,
        errors = summary.errors,
        total_reward = summary.total_reward,
        "Replay finished"
    );
    Ok(())
}

fn init_tracing(settings: &Settings) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = &settings.observability.log_level;
        format!("usersim={},warn", level).into()
    });

    // Logs go to stderr; stdout carries the replay records
    let subscriber = tracing_subscriber::registry().with(env_filter);
    let fmt_layer = if settings.observability.log_json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .boxed()
    };
    subscriber.with(fmt_layer).init();
}
