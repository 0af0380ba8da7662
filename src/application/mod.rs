pub mod level_runner;

pub use level_runner::{
    AttemptOutcome, AttemptRecord, LevelReport, LevelRunner, RunnerSettings, SessionReport,
};
