//! Spellbreaker CLI entry point.

use clap::Parser;

use spellbreaker::cli::commands::{self, load_config};
use spellbreaker::cli::{handle_error, Cli, Commands};
use spellbreaker::domain::models::Config;
use spellbreaker::infrastructure::logging::{LogConfig, LoggerImpl};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // `init` runs before a project config exists
    let config = if matches!(cli.command, Commands::Init(_)) {
        Config::default()
    } else {
        match load_config(cli.config.as_deref()) {
            Ok(config) => config,
            Err(err) => handle_error(err, cli.json),
        }
    };

    let _logger = match LogConfig::try_from(&config.logging)
        .map_err(anyhow::Error::from)
        .and_then(|log_config| LoggerImpl::init(&log_config))
    {
        Ok(logger) => Some(logger),
        Err(err) => {
            eprintln!("Warning: logging disabled: {err}");
            None
        }
    };

    let result = match cli.command {
        Commands::Init(args) => commands::init::execute(args, cli.json),
        Commands::Play(args) => commands::play::execute(args, &config, cli.json).await,
        Commands::Extract(args) => commands::extract::execute(args, &config, cli.json).await,
        Commands::Strategies => commands::strategies::execute(&config, cli.json),
        Commands::Config(command) => commands::config::execute(command, &config, cli.json),
    };

    if let Err(err) = result {
        handle_error(err, cli.json);
    }
}
