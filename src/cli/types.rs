//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::commands::config::ConfigCommands;
use super::commands::extract::ExtractArgs;
use super::commands::init::InitArgs;
use super::commands::play::PlayArgs;

#[derive(Parser, Debug)]
#[command(name = "spellbreaker")]
#[command(about = "Adaptive question strategies for recovering a secret word from a text oracle", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Load configuration from this YAML file instead of .spellbreaker/
    #[arg(short, long, global = true, env = "SPELLBREAKER_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create .spellbreaker/ with a default configuration
    Init(InitArgs),

    /// Play levels interactively, relaying questions through the console
    Play(PlayArgs),

    /// Extract candidate words from a single oracle reply
    Extract(ExtractArgs),

    /// List probing strategies in priority order
    Strategies,

    /// Configuration commands
    #[command(subcommand)]
    Config(ConfigCommands),
}
