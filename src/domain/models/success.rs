//! Records of solved levels, kept by the success memory.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::strategy::{Level, StrategyCategory};

/// One successful attempt: what was asked, what came back, what worked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessRecord {
    pub level: Level,
    pub strategy: StrategyCategory,
    pub question: String,
    pub response: String,
    pub password: String,
    pub recorded_at: DateTime<Utc>,
    pub session_id: Uuid,
}

impl SuccessRecord {
    pub fn new(
        session_id: Uuid,
        level: Level,
        strategy: StrategyCategory,
        question: impl Into<String>,
        response: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            level,
            strategy,
            question: question.into(),
            response: response.into(),
            password: password.into(),
            recorded_at: Utc::now(),
            session_id,
        }
    }
}
