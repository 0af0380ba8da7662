//! Implementation of the `spellbreaker play` command.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

use crate::adapters::channel::ConsoleChannel;
use crate::adapters::memory::JsonFileMemory;
use crate::application::{LevelRunner, RunnerSettings, SessionReport};
use crate::domain::models::{Config, SessionContext};
use crate::domain::ports::SuccessMemory;
use crate::services::{DeflectionDetector, SelectionPolicy, StrategySelector};

use super::build_engine;
use crate::cli::output::{output, table, CommandOutput};

#[derive(Args, Debug)]
pub struct PlayArgs {
    /// Highest level to attempt (overrides engine.max_levels)
    #[arg(long)]
    pub max_levels: Option<u32>,

    /// Questions per level before giving up (overrides engine.max_attempts_per_level)
    #[arg(long)]
    pub max_attempts: Option<u32>,

    /// Do not record successes in the success memory
    #[arg(long)]
    pub no_memory: bool,
}

#[derive(Debug, Serialize)]
pub struct PlayOutput {
    pub levels_completed: usize,
    pub total_attempts: usize,
    #[serde(flatten)]
    pub report: SessionReport,
}

impl CommandOutput for PlayOutput {
    fn to_human(&self) -> String {
        let mut table = table(["Level", "Result", "Strategy", "Attempts"]);
        for level in &self.report.levels {
            table.add_row(vec![
                level.level.to_string(),
                level
                    .password
                    .clone()
                    .unwrap_or_else(|| "unsolved".to_string()),
                level
                    .winning_category
                    .map_or_else(|| "-".to_string(), |c| c.to_string()),
                level.attempts.len().to_string(),
            ]);
        }
        format!(
            "{table}\n\nSession {}: {} level(s) completed in {} attempt(s)",
            self.report.session_id, self.levels_completed, self.total_attempts
        )
    }
}

async fn open_memory(config: &Config) -> Option<Arc<dyn SuccessMemory>> {
    match JsonFileMemory::open(&config.memory.path).await {
        Ok(memory) => Some(Arc::new(memory)),
        Err(err) => {
            warn!(path = %config.memory.path, error = %err, "success memory unavailable");
            None
        }
    }
}

pub async fn execute(args: PlayArgs, config: &Config, json_mode: bool) -> Result<()> {
    let mut engine_config = config.engine.clone();
    if let Some(max_levels) = args.max_levels {
        engine_config.max_levels = max_levels;
    }
    if let Some(max_attempts) = args.max_attempts {
        engine_config.max_attempts_per_level = max_attempts;
    }

    let mut runner = LevelRunner::new(
        Arc::new(ConsoleChannel::stdio()),
        StrategySelector::new(SelectionPolicy::from(&engine_config)),
        build_engine(config)?,
        DeflectionDetector::from(&config.deflection),
        RunnerSettings::from(&engine_config),
    );
    if config.memory.enabled && !args.no_memory {
        if let Some(memory) = open_memory(config).await {
            runner = runner.with_memory(memory);
        }
    }

    let mut ctx = SessionContext::new();
    let report = runner.play(&mut ctx).await?;

    let output_data = PlayOutput {
        levels_completed: report.levels_completed(),
        total_attempts: report.total_attempts(),
        report,
    };
    output(&output_data, json_mode);
    Ok(())
}
