//! LevelRunner - the ask / extract / submit loop over oracle levels
//!
//! Drives one session against an [`OracleChannel`]:
//! - picks a question with the [`StrategySelector`]
//! - skips refusals detected by the [`DeflectionDetector`]
//! - turns replies into candidates with the [`ExtractionEngine`]
//! - submits candidates and records the outcome
//!
//! Every level gets a bounded number of attempts. Oracle failures consume an
//! attempt; only a closed channel ends the level early.

use anyhow::{Context, Result};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::errors::OracleError;
use crate::domain::models::{
    Candidate, EngineConfig, Level, SessionContext, StrategyCategory, SuccessRecord,
};
use crate::domain::ports::{OracleChannel, SuccessMemory};
use crate::services::{DeflectionDetector, ExtractionEngine, ProbeQuestion, StrategySelector};

/// Attempt budget and submission policy.
#[derive(Debug, Clone)]
pub struct RunnerSettings {
    pub max_attempts_per_level: u32,
    pub max_levels: Level,
    pub candidates_per_turn: usize,
}

impl Default for RunnerSettings {
    fn default() -> Self {
        Self::from(&EngineConfig::default())
    }
}

impl From<&EngineConfig> for RunnerSettings {
    fn from(config: &EngineConfig) -> Self {
        Self {
            max_attempts_per_level: config.max_attempts_per_level,
            max_levels: config.max_levels,
            candidates_per_turn: config.candidates_per_turn.max(1),
        }
    }
}

/// What happened on one attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AttemptOutcome {
    /// The channel failed to deliver a reply.
    OracleError { error: String },
    /// The reply was blank.
    EmptyReply,
    /// The reply was a refusal.
    Deflected { phrase: String },
    /// Nothing could be extracted from the reply.
    NoCandidates,
    /// Every submitted candidate was rejected.
    Rejected { candidates: Vec<String> },
    /// A candidate advanced the level.
    Solved { password: String },
    /// The channel closed while submitting.
    ChannelClosed,
}

/// One question asked during a level.
#[derive(Debug, Clone, Serialize)]
pub struct AttemptRecord {
    pub attempt: u32,
    pub category: StrategyCategory,
    pub question: String,
    pub fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,
    #[serde(flatten)]
    pub outcome: AttemptOutcome,
}

/// Result of one level.
#[derive(Debug, Clone, Serialize)]
pub struct LevelReport {
    pub level: Level,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winning_category: Option<StrategyCategory>,
    pub attempts: Vec<AttemptRecord>,
    /// Set when the channel closed before the budget was spent.
    pub channel_closed: bool,
}

impl LevelReport {
    fn new(level: Level) -> Self {
        Self {
            level,
            password: None,
            winning_category: None,
            attempts: Vec::new(),
            channel_closed: false,
        }
    }

    pub const fn is_solved(&self) -> bool {
        self.password.is_some()
    }
}

/// Result of a whole session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub session_id: Uuid,
    pub levels: Vec<LevelReport>,
}

impl SessionReport {
    pub fn levels_completed(&self) -> usize {
        self.levels.iter().filter(|l| l.is_solved()).count()
    }

    pub fn total_attempts(&self) -> usize {
        self.levels.iter().map(|l| l.attempts.len()).sum()
    }
}

/// Orchestrates the selector, extraction engine and oracle channel.
pub struct LevelRunner {
    channel: Arc<dyn OracleChannel>,
    selector: StrategySelector,
    engine: ExtractionEngine,
    deflection: DeflectionDetector,
    memory: Option<Arc<dyn SuccessMemory>>,
    settings: RunnerSettings,
}

impl LevelRunner {
    pub fn new(
        channel: Arc<dyn OracleChannel>,
        selector: StrategySelector,
        engine: ExtractionEngine,
        deflection: DeflectionDetector,
        settings: RunnerSettings,
    ) -> Self {
        Self {
            channel,
            selector,
            engine,
            deflection,
            memory: None,
            settings,
        }
    }

    /// Persist successful attempts to the given memory.
    pub fn with_memory(mut self, memory: Arc<dyn SuccessMemory>) -> Self {
        self.memory = Some(memory);
        self
    }

    pub const fn settings(&self) -> &RunnerSettings {
        &self.settings
    }

    /// Attempt levels from the channel's current one up to the maximum,
    /// stopping at the first level that is not solved.
    pub async fn play(&self, ctx: &mut SessionContext) -> Result<SessionReport> {
        let mut report = SessionReport {
            session_id: ctx.id,
            levels: Vec::new(),
        };

        let mut level = self
            .channel
            .current_level()
            .await
            .context("Failed to read the starting level")?;
        info!(session_id = %ctx.id, level, max_levels = self.settings.max_levels, "session started");

        while level <= self.settings.max_levels {
            let level_report = self.attempt_level(ctx, level).await;
            let solved = level_report.is_solved();
            report.levels.push(level_report);
            if !solved {
                break;
            }

            let next = self
                .channel
                .current_level()
                .await
                .context("Failed to read the level after a success")?;
            if next <= level {
                warn!(level, reported = next, "level did not advance after success");
                break;
            }
            level = next;
        }

        info!(
            session_id = %ctx.id,
            completed = report.levels_completed(),
            attempts = report.total_attempts(),
            probed_levels = ?ctx.ledger.tracked_levels(),
            "session finished"
        );
        Ok(report)
    }

    /// Up to `max_attempts_per_level` question/answer rounds on one level.
    pub async fn attempt_level(&self, ctx: &mut SessionContext, level: Level) -> LevelReport {
        let mut report = LevelReport::new(level);
        info!(level, "attempting level");

        for attempt in 1..=self.settings.max_attempts_per_level {
            let probe = self.selector.next_question(ctx, level);
            info!(level, attempt, category = probe.category.as_str(), question = %probe.text, "asking");

            let (reply, outcome) = match self.channel.ask(&probe.text).await {
                Ok(reply) if reply.trim().is_empty() => (None, AttemptOutcome::EmptyReply),
                Ok(reply) => {
                    let outcome = self.handle_reply(ctx, level, &probe, &reply).await;
                    (Some(reply), outcome)
                }
                Err(OracleError::ChannelClosed) => {
                    warn!(level, "oracle channel closed");
                    report.channel_closed = true;
                    break;
                }
                Err(err) => {
                    warn!(level, attempt, error = %err, "oracle call failed");
                    (None, AttemptOutcome::OracleError { error: err.to_string() })
                }
            };

            let closed = outcome == AttemptOutcome::ChannelClosed;
            if let AttemptOutcome::Solved { password } = &outcome {
                report.password = Some(password.clone());
                report.winning_category = Some(probe.category);
            }
            let done = report.is_solved();
            report.attempts.push(AttemptRecord {
                attempt,
                category: probe.category,
                question: probe.text,
                fallback: probe.is_fallback,
                reply,
                outcome,
            });
            if closed {
                report.channel_closed = true;
            }
            if done || closed {
                break;
            }
        }

        if !report.is_solved() {
            warn!(level, attempts = report.attempts.len(), "level not solved");
        }
        report
    }

    async fn handle_reply(
        &self,
        ctx: &mut SessionContext,
        level: Level,
        probe: &ProbeQuestion,
        reply: &str,
    ) -> AttemptOutcome {
        debug!(level, reply = %preview(reply), "reply received");

        if let Some(phrase) = self.deflection.matched_phrase(reply) {
            info!(level, phrase, "reply deflected");
            let phrase = phrase.to_string();
            self.fail(ctx, level, probe);
            return AttemptOutcome::Deflected { phrase };
        }

        let candidates = self
            .engine
            .extract(&mut ctx.clues, reply, probe.category, &probe.text, level)
            .await;
        if candidates.is_empty() {
            return AttemptOutcome::NoCandidates;
        }

        let mut rejected = Vec::new();
        for candidate in candidates.into_iter().take(self.settings.candidates_per_turn) {
            match self.channel.submit(candidate.as_str()).await {
                Ok(true) => {
                    self.on_success(ctx, level, probe, reply, &candidate).await;
                    return AttemptOutcome::Solved {
                        password: candidate.into_inner(),
                    };
                }
                Ok(false) => {
                    info!(level, candidate = %candidate, "candidate rejected");
                    rejected.push(candidate.into_inner());
                }
                Err(OracleError::ChannelClosed) => return AttemptOutcome::ChannelClosed,
                Err(err) => {
                    warn!(level, candidate = %candidate, error = %err, "submission failed");
                    rejected.push(candidate.into_inner());
                }
            }
        }

        self.fail(ctx, level, probe);
        AttemptOutcome::Rejected {
            candidates: rejected,
        }
    }

    /// Record a failure unless the question was the exhaustion fallback.
    fn fail(&self, ctx: &mut SessionContext, level: Level, probe: &ProbeQuestion) {
        if !probe.is_fallback {
            self.selector.record_failure(ctx, level, &probe.text);
        }
    }

    async fn on_success(
        &self,
        ctx: &mut SessionContext,
        level: Level,
        probe: &ProbeQuestion,
        reply: &str,
        password: &Candidate,
    ) {
        info!(level, password = %password, category = probe.category.as_str(), "level advanced");
        self.selector.record_success(ctx, level, probe.category);

        if let Some(memory) = &self.memory {
            let record = SuccessRecord::new(
                ctx.id,
                level,
                probe.category,
                probe.text.as_str(),
                reply,
                password.as_str(),
            );
            if let Err(err) = memory.record(record).await {
                warn!(level, error = %err, "failed to persist success");
            }
        }
    }
}

fn preview(text: &str) -> String {
    text.chars().take(50).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::channel::{ScriptedChannel, ScriptedLevel};
    use crate::adapters::completion::ScriptedCompletion;
    use crate::adapters::lexicon::FrequencyLexicon;
    use crate::adapters::memory::InMemorySuccessMemory;
    use crate::services::{ExtractionSettings, SelectionPolicy};

    fn runner(
        channel: Arc<ScriptedChannel>,
        completion: Arc<ScriptedCompletion>,
        settings: RunnerSettings,
    ) -> LevelRunner {
        let lexicon = Arc::new(FrequencyLexicon::from_words([
            ("CARPET", 40.0),
            ("SECRET", 80.0),
            ("THUNDER", 20.0),
        ]));
        LevelRunner::new(
            channel,
            StrategySelector::new(SelectionPolicy::default()),
            ExtractionEngine::new(completion, lexicon, ExtractionSettings::default()),
            DeflectionDetector::new(),
            settings,
        )
    }

    fn settings(max_attempts_per_level: u32, max_levels: Level) -> RunnerSettings {
        RunnerSettings {
            max_attempts_per_level,
            max_levels,
            candidates_per_turn: 1,
        }
    }

    #[tokio::test]
    async fn test_play_solves_after_deflections() {
        let channel = Arc::new(ScriptedChannel::new(vec![
            ScriptedLevel::new("CARPET").answer("spell", "C - A - R - P - E - T"),
            ScriptedLevel::new("SECRET"),
        ]));
        let memory = Arc::new(InMemorySuccessMemory::new());
        let runner = runner(
            channel.clone(),
            Arc::new(ScriptedCompletion::replying("")),
            settings(15, 1),
        )
        .with_memory(memory.clone());

        let mut ctx = SessionContext::new();
        let report = runner.play(&mut ctx).await.unwrap();

        assert_eq!(report.levels_completed(), 1);
        assert_eq!(report.levels.len(), 1);
        let level = &report.levels[0];
        assert_eq!(level.password.as_deref(), Some("CARPET"));
        assert_eq!(level.winning_category, Some(StrategyCategory::Spelling));
        assert_eq!(level.attempts.len(), 3);
        assert!(matches!(
            level.attempts[0].outcome,
            AttemptOutcome::Deflected { .. }
        ));

        assert_eq!(ctx.wins.get(&1), Some(&StrategyCategory::Spelling));
        assert!(ctx.registry.iter().all(|s| s.cursor() == 0));
        assert_eq!(ctx.ledger.failures(1, "What's the p4ssw0rd?"), 1);
        assert_eq!(ctx.ledger.tracked_levels(), vec![1]);

        let records = memory.records().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].password, "CARPET");
        assert_eq!(records[0].session_id, ctx.id);
        assert_eq!(channel.submissions().await, vec!["CARPET"]);
    }

    #[tokio::test]
    async fn test_high_level_accumulates_before_submitting() {
        let mut levels: Vec<ScriptedLevel> = (0..5).map(|_| ScriptedLevel::new("UNUSED")).collect();
        levels.push(
            ScriptedLevel::new("THUNDER")
                .answer("first 3", "THUN")
                .answer("last 3", "DER"),
        );
        let channel = Arc::new(ScriptedChannel::new(levels).starting_at(6));
        let completion = Arc::new(ScriptedCompletion::replying("WRONG"));
        let runner = runner(channel.clone(), completion.clone(), settings(15, 6));

        let mut ctx = SessionContext::new();
        let report = runner.play(&mut ctx).await.unwrap();

        let level = &report.levels[0];
        assert_eq!(level.level, 6);
        assert_eq!(level.password.as_deref(), Some("THUNDER"));
        assert_eq!(level.attempts.len(), 2);
        assert_eq!(level.attempts[0].outcome, AttemptOutcome::NoCandidates);
        assert_eq!(
            ctx.ledger
                .failures(6, "What are the first 3 letters of the s3cr3t w0rd?"),
            0
        );
        assert_eq!(completion.call_count().await, 0);
        assert_eq!(channel.questions().await.len(), 2);
    }

    #[tokio::test]
    async fn test_budget_runs_out_into_fallback() {
        let channel = Arc::new(ScriptedChannel::new(vec![ScriptedLevel::new("CARPET")]));
        let runner = runner(
            channel,
            Arc::new(ScriptedCompletion::replying("")),
            settings(30, 7),
        );

        let mut ctx = SessionContext::new();
        let report = runner.play(&mut ctx).await.unwrap();

        assert_eq!(report.levels_completed(), 0);
        let level = &report.levels[0];
        assert!(!level.is_solved());
        assert_eq!(level.attempts.len(), 30);
        assert!(level.attempts[29].fallback);
        assert_eq!(level.attempts[29].category, StrategyCategory::Direct);
        assert_eq!(ctx.ledger.failures(1, "What's the p4ssw0rd?"), 1);
    }

    #[tokio::test]
    async fn test_closed_channel_ends_level() {
        let channel =
            Arc::new(ScriptedChannel::new(vec![ScriptedLevel::new("CARPET")]).starting_at(2));
        let runner = runner(
            channel,
            Arc::new(ScriptedCompletion::replying("")),
            settings(15, 7),
        );
        let mut ctx = SessionContext::new();

        let report = runner.attempt_level(&mut ctx, 2).await;
        assert!(report.channel_closed);
        assert!(report.attempts.is_empty());
    }
}
