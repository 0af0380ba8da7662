pub mod clue_accumulator;
pub mod deflection;
pub mod extraction;
pub mod strategy_selector;

pub use clue_accumulator::ClueAccumulator;
pub use deflection::DeflectionDetector;
pub use extraction::{ExtractionEngine, ExtractionSettings};
pub use strategy_selector::{ProbeQuestion, SelectionPolicy, StrategySelector};
