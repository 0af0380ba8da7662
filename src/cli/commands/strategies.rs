//! Implementation of the `spellbreaker strategies` command.

use anyhow::Result;
use serde::Serialize;

use crate::domain::models::{Config, StrategyCategory, StrategyRegistry};
use crate::cli::output::{output, table, CommandOutput};

#[derive(Debug, Serialize)]
pub struct StrategyRow {
    pub priority: usize,
    pub category: StrategyCategory,
    pub dropped_from_level: Option<u32>,
    pub accumulates_clues_from_level: Option<u32>,
    pub questions: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct StrategiesOutput {
    pub strategies: Vec<StrategyRow>,
}

impl StrategiesOutput {
    pub fn new(registry: &StrategyRegistry, high_difficulty_level: u32) -> Self {
        let strategies = registry
            .iter()
            .map(|strategy| {
                let category = strategy.category();
                StrategyRow {
                    priority: category.priority() + 1,
                    category,
                    dropped_from_level: category
                        .resists_high_difficulty()
                        .then_some(high_difficulty_level),
                    accumulates_clues_from_level: category
                        .accumulates_clues()
                        .then_some(high_difficulty_level),
                    questions: strategy.questions().iter().map(ToString::to_string).collect(),
                }
            })
            .collect();
        Self { strategies }
    }
}

impl CommandOutput for StrategiesOutput {
    fn to_human(&self) -> String {
        let mut table = table(["#", "Category", "High levels", "Questions"]);
        for row in &self.strategies {
            let high = match (row.dropped_from_level, row.accumulates_clues_from_level) {
                (Some(level), _) => format!("dropped from {level}"),
                (_, Some(level)) => format!("clues from {level}"),
                _ => "-".to_string(),
            };
            table.add_row(vec![
                row.priority.to_string(),
                row.category.to_string(),
                high,
                row.questions.join("\n"),
            ]);
        }
        table.to_string()
    }
}

pub fn execute(config: &Config, json_mode: bool) -> Result<()> {
    let output_data = StrategiesOutput::new(
        &StrategyRegistry::new(),
        config.engine.high_difficulty_level,
    );
    output(&output_data, json_mode);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_follow_priority() {
        let output = StrategiesOutput::new(&StrategyRegistry::new(), 6);
        let categories: Vec<_> = output.strategies.iter().map(|r| r.category).collect();
        assert_eq!(categories, StrategyCategory::ALL.to_vec());
        assert_eq!(output.strategies[0].dropped_from_level, Some(6));
        assert_eq!(output.strategies[3].accumulates_clues_from_level, Some(6));
        assert_eq!(output.strategies[1].questions.len(), 5);

        let human = output.to_human();
        assert!(human.contains("acronym"));
        assert!(human.contains("p4ssw0rd"));
    }
}
