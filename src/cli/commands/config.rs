//! Implementation of the `spellbreaker config` commands.

use anyhow::{Context, Result};
use clap::Subcommand;
use serde::Serialize;

use crate::domain::models::Config;
use crate::cli::output::{output, CommandOutput};

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration after merging files and environment
    Show,
}

#[derive(Debug, Serialize)]
pub struct ConfigOutput {
    pub config: Config,
    #[serde(skip)]
    yaml: String,
}

impl CommandOutput for ConfigOutput {
    fn to_human(&self) -> String {
        self.yaml.trim_end().to_string()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.config).unwrap_or_default()
    }
}

pub fn execute(command: ConfigCommands, config: &Config, json_mode: bool) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            let yaml = serde_yaml::to_string(config).context("Failed to render configuration")?;
            output(
                &ConfigOutput {
                    config: config.clone(),
                    yaml,
                },
                json_mode,
            );
        }
    }
    Ok(())
}
