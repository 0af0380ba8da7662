use clap::Parser;
use std::path::PathBuf;

use spellbreaker::cli::commands::config::ConfigCommands;
use spellbreaker::cli::{Cli, Commands};
use spellbreaker::StrategyCategory;

#[test]
fn test_parse_extract() {
    let cli = Cli::try_parse_from([
        "spellbreaker",
        "extract",
        "letters",
        "DER",
        "--level",
        "6",
        "--clue",
        "What are the first 4 letters?=THUN",
        "--json",
    ])
    .unwrap();

    assert!(cli.json);
    match cli.command {
        Commands::Extract(args) => {
            assert_eq!(args.category, StrategyCategory::Letters);
            assert_eq!(args.level, 6);
            assert_eq!(args.reply, "DER");
            assert_eq!(args.clues.len(), 1);
            assert!(args.question.is_none());
        }
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_parse_extract_rejects_unknown_category() {
    assert!(Cli::try_parse_from(["spellbreaker", "extract", "riddle", "TERCES"]).is_err());
}

#[test]
fn test_parse_play_overrides() {
    let cli = Cli::try_parse_from([
        "spellbreaker",
        "--config",
        "custom.yaml",
        "play",
        "--max-levels",
        "3",
        "--no-memory",
    ])
    .unwrap();

    assert_eq!(cli.config, Some(PathBuf::from("custom.yaml")));
    match cli.command {
        Commands::Play(args) => {
            assert_eq!(args.max_levels, Some(3));
            assert_eq!(args.max_attempts, None);
            assert!(args.no_memory);
        }
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_parse_init_and_config() {
    let cli = Cli::try_parse_from(["spellbreaker", "init", "--force", "/tmp/project"]).unwrap();
    match cli.command {
        Commands::Init(args) => {
            assert!(args.force);
            assert_eq!(args.path, PathBuf::from("/tmp/project"));
        }
        _ => panic!("Wrong top-level command"),
    }

    let cli = Cli::try_parse_from(["spellbreaker", "config", "show"]).unwrap();
    assert!(matches!(cli.command, Commands::Config(ConfigCommands::Show)));

    let cli = Cli::try_parse_from(["spellbreaker", "strategies", "-j"]).unwrap();
    assert!(matches!(cli.command, Commands::Strategies));
    assert!(cli.json);
}
