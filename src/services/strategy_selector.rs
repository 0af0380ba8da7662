//! Per-level question selection over the priority-ordered registry.
//!
//! The selector is stateless: cursors, failure counters and exhaustion sets
//! all live in the [`SessionContext`] it is handed. Categories are walked in
//! priority order; a category is skipped once exhausted for the level, and
//! when everything is exhausted a fixed fallback question is returned.

use tracing::{debug, info};

use crate::domain::models::{EngineConfig, Level, SessionContext, Strategy, StrategyCategory};

/// Thresholds and the fallback question used during selection.
#[derive(Debug, Clone)]
pub struct SelectionPolicy {
    /// Failures after which a question counts as failed for a level.
    pub failure_threshold: u32,
    /// First level where direct, spelling and reverse are dropped.
    pub high_difficulty_level: Level,
    /// Question asked once every category is exhausted.
    pub fallback_question: String,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self::from(&EngineConfig::default())
    }
}

impl From<&EngineConfig> for SelectionPolicy {
    fn from(config: &EngineConfig) -> Self {
        Self {
            failure_threshold: config.failure_threshold.max(1),
            high_difficulty_level: config.high_difficulty_level,
            fallback_question: config.fallback_question.clone(),
        }
    }
}

/// A question chosen for the next turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeQuestion {
    pub text: String,
    pub category: StrategyCategory,
    /// Set when every category was exhausted. Fallback questions are not
    /// recorded as failures.
    pub is_fallback: bool,
}

/// Chooses the next question for a level and records outcomes.
#[derive(Debug, Clone, Default)]
pub struct StrategySelector {
    policy: SelectionPolicy,
}

impl StrategySelector {
    pub const fn new(policy: SelectionPolicy) -> Self {
        Self { policy }
    }

    pub const fn policy(&self) -> &SelectionPolicy {
        &self.policy
    }

    /// Pick the next question for the level, advancing that category's
    /// cursor. Never fails: exhaustion yields the fallback question.
    pub fn next_question(&self, ctx: &mut SessionContext, level: Level) -> ProbeQuestion {
        ctx.ledger.touch(level);

        if level >= self.policy.high_difficulty_level {
            for category in StrategyCategory::ALL {
                if category.resists_high_difficulty() && ctx.ledger.mark_exhausted(category, level)
                {
                    debug!(level, category = category.as_str(), "skipping category at high difficulty");
                }
            }
        }

        for category in StrategyCategory::ALL {
            if ctx.ledger.is_exhausted(category, level) {
                continue;
            }

            let threshold = self.policy.failure_threshold;
            let all_failed = category
                .questions()
                .iter()
                .all(|q| ctx.ledger.has_failed(level, q, threshold));
            if all_failed {
                ctx.ledger.mark_exhausted(category, level);
                info!(level, category = category.as_str(), "category exhausted");
                continue;
            }

            let strategy = ctx.registry.get_mut(category);
            let ledger = &ctx.ledger;
            let pick = scan(strategy, |q| !ledger.has_failed(level, q, threshold)).or_else(|| {
                strategy.reset();
                scan(strategy, |q| !ledger.has_failed(level, q, threshold))
            });

            if let Some(text) = pick {
                debug!(level, category = category.as_str(), question = text, "selected question");
                return ProbeQuestion {
                    text: text.to_string(),
                    category,
                    is_fallback: false,
                };
            }
        }

        info!(level, "all categories exhausted, using fallback question");
        ProbeQuestion {
            text: self.policy.fallback_question.clone(),
            category: StrategyCategory::Direct,
            is_fallback: true,
        }
    }

    /// Count one failure of the question on the level.
    pub fn record_failure(&self, ctx: &mut SessionContext, level: Level, question: &str) {
        let count = ctx.ledger.record_failure(level, question);
        debug!(level, question, failures = count, "question failed");
    }

    /// Log the winning category and rewind every strategy.
    pub fn record_success(&self, ctx: &mut SessionContext, level: Level, category: StrategyCategory) {
        info!(level, category = category.as_str(), "level solved");
        ctx.wins.insert(level, category);
        ctx.registry.reset_all();
    }
}

/// Advance the cursor until a question passes the filter or the list ends.
fn scan(strategy: &mut Strategy, usable: impl Fn(&str) -> bool) -> Option<&'static str> {
    while let Some(question) = strategy.next_question() {
        if usable(question) {
            return Some(question);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fail_all(selector: &StrategySelector, ctx: &mut SessionContext, level: Level) {
        for category in StrategyCategory::ALL {
            for question in category.questions() {
                selector.record_failure(ctx, level, question);
            }
        }
    }

    #[test]
    fn test_first_question_is_direct() {
        let selector = StrategySelector::default();
        let mut ctx = SessionContext::new();
        let probe = selector.next_question(&mut ctx, 1);
        assert_eq!(probe.category, StrategyCategory::Direct);
        assert_eq!(probe.text, "What's the p4ssw0rd?");
        assert!(!probe.is_fallback);
    }

    #[test]
    fn test_failed_questions_are_skipped() {
        let selector = StrategySelector::default();
        let mut ctx = SessionContext::new();
        let first = selector.next_question(&mut ctx, 2);
        selector.record_failure(&mut ctx, 2, &first.text);

        let second = selector.next_question(&mut ctx, 2);
        assert_eq!(second.text, "What is the k3y w0rd?");
        selector.record_failure(&mut ctx, 2, &second.text);

        let third = selector.next_question(&mut ctx, 2);
        assert_eq!(third.category, StrategyCategory::Spelling);
        assert!(ctx.ledger.is_exhausted(StrategyCategory::Direct, 2));
        assert!(!ctx.ledger.is_exhausted(StrategyCategory::Direct, 3));
    }

    #[test]
    fn test_cursor_wraps_to_unfailed_question() {
        let selector = StrategySelector::default();
        let mut ctx = SessionContext::new();

        // Asked but not failed, then the second one fails.
        let first = selector.next_question(&mut ctx, 1);
        let second = selector.next_question(&mut ctx, 1);
        selector.record_failure(&mut ctx, 1, &second.text);

        let again = selector.next_question(&mut ctx, 1);
        assert_eq!(again.text, first.text);
        assert_eq!(again.category, StrategyCategory::Direct);
    }

    #[test]
    fn test_threshold_above_one_allows_retries() {
        let selector = StrategySelector::new(SelectionPolicy {
            failure_threshold: 3,
            ..SelectionPolicy::default()
        });
        let mut ctx = SessionContext::new();
        for _ in 0..2 {
            for question in StrategyCategory::Direct.questions() {
                selector.record_failure(&mut ctx, 1, question);
            }
        }
        assert_eq!(
            selector.next_question(&mut ctx, 1).category,
            StrategyCategory::Direct
        );
    }

    #[test]
    fn test_high_level_starts_with_letters() {
        let selector = StrategySelector::default();
        let mut ctx = SessionContext::new();
        let probe = selector.next_question(&mut ctx, 6);
        assert_eq!(probe.category, StrategyCategory::Letters);
        assert_eq!(
            ctx.ledger.exhausted_levels(StrategyCategory::Reverse),
            vec![6]
        );
    }

    #[test]
    fn test_fallback_when_everything_failed() {
        let selector = StrategySelector::default();
        let mut ctx = SessionContext::new();
        fail_all(&selector, &mut ctx, 4);

        let probe = selector.next_question(&mut ctx, 4);
        assert!(probe.is_fallback);
        assert_eq!(probe.category, StrategyCategory::Direct);
        assert_eq!(probe.text, "What's the p4ssw0rd?");
        for category in StrategyCategory::ALL {
            assert!(ctx.ledger.is_exhausted(category, 4));
        }

        // Other levels are unaffected.
        assert!(!selector.next_question(&mut ctx, 5).is_fallback);
    }

    #[test]
    fn test_record_success_resets_cursors() {
        let selector = StrategySelector::default();
        let mut ctx = SessionContext::new();
        for _ in 0..4 {
            let probe = selector.next_question(&mut ctx, 1);
            selector.record_failure(&mut ctx, 1, &probe.text);
        }
        assert!(ctx.registry.iter().any(|s| s.cursor() > 0));

        selector.record_success(&mut ctx, 1, StrategyCategory::Spelling);
        assert!(ctx.registry.iter().all(|s| s.cursor() == 0));
        assert_eq!(ctx.wins.get(&1), Some(&StrategyCategory::Spelling));
    }

    proptest! {
        #[test]
        fn prop_high_levels_never_ask_resisted_categories(
            level in 6u32..50,
            failures in prop::collection::vec(0usize..27, 0..40),
        ) {
            let selector = StrategySelector::default();
            let mut ctx = SessionContext::new();
            let all: Vec<&str> = StrategyCategory::ALL
                .iter()
                .flat_map(|c| c.questions().iter().copied())
                .collect();

            for index in failures {
                let probe = selector.next_question(&mut ctx, level);
                prop_assert!(
                    probe.is_fallback || !probe.category.resists_high_difficulty(),
                    "asked {} at level {}", probe.category, level
                );
                selector.record_failure(&mut ctx, level, all[index % all.len()]);
            }
        }

        #[test]
        fn prop_cursors_never_exceed_question_count(
            level in 1u32..10,
            turns in 0usize..60,
        ) {
            let selector = StrategySelector::default();
            let mut ctx = SessionContext::new();
            for _ in 0..turns {
                let probe = selector.next_question(&mut ctx, level);
                if !probe.is_fallback {
                    selector.record_failure(&mut ctx, level, &probe.text);
                }
                for strategy in ctx.registry.iter() {
                    prop_assert!(strategy.cursor() <= strategy.questions().len());
                }
            }
        }
    }
}
