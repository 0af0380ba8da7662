//! Domain errors for the spellbreaker engine.

use thiserror::Error;

/// Failure of a call to an external oracle (channel, completion, lexicon).
///
/// Port methods return this instead of panicking. Inside the engine every
/// `OracleError` is caught at the call site and becomes "no candidates this
/// turn" or a defined fallback path.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OracleError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Oracle call timed out after {0}s")]
    Timeout(u64),

    #[error("Oracle returned status {code}: {body}")]
    Status { code: u16, body: String },

    #[error("Malformed oracle response: {0}")]
    Malformed(String),

    #[error("Oracle unavailable: {0}")]
    Unavailable(String),

    #[error("Oracle channel closed")]
    ChannelClosed,
}

/// Typed outcome of any oracle call.
pub type OracleResult<T> = Result<T, OracleError>;

/// Domain-level errors that can occur outside the per-turn engine path.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Unknown strategy category: {0}")]
    UnknownCategory(String),

    #[error("Lexicon error: {0}")]
    Lexicon(String),

    #[error("Success memory error: {0}")]
    Memory(String),

    #[error("Oracle error: {0}")]
    Oracle(#[from] OracleError),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::Memory(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oracle_error_converts_into_domain_error() {
        let err: DomainError = OracleError::Timeout(30).into();
        assert!(matches!(err, DomainError::Oracle(OracleError::Timeout(30))));
        assert_eq!(err.to_string(), "Oracle error: Oracle call timed out after 30s");
    }

    #[test]
    fn test_status_error_message() {
        let err = OracleError::Status {
            code: 503,
            body: "busy".to_string(),
        };
        assert_eq!(err.to_string(), "Oracle returned status 503: busy");
    }
}
