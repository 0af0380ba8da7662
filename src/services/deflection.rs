//! Refusal detection for oracle replies.

use crate::domain::models::DeflectionConfig;

/// Built-in refusal phrases, lowercase.
const REFUSAL_PHRASES: &[&str] = &[
    "i cannot",
    "cannot reveal",
    "cannot provide",
    "cannot assist",
    "cannot comply",
    "cannot tell",
    "must remain hidden",
    "shall remain hidden",
    "forbidden to",
    "not allowed to",
    "unable to",
    "will not",
    "refuse to",
    "not be spoken",
    "known only to those",
    "not be revealed",
    "fulfill that request",
];

/// Case-insensitive substring matcher for refusals.
#[derive(Debug, Clone)]
pub struct DeflectionDetector {
    phrases: Vec<String>,
}

impl DeflectionDetector {
    pub fn new() -> Self {
        Self::with_phrases(std::iter::empty::<String>())
    }

    /// Built-in phrases plus the given extras. Blank extras are ignored.
    pub fn with_phrases<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut phrases: Vec<String> = REFUSAL_PHRASES.iter().map(|p| (*p).to_string()).collect();
        for phrase in extra {
            let phrase = phrase.as_ref().trim().to_lowercase();
            if !phrase.is_empty() && !phrases.contains(&phrase) {
                phrases.push(phrase);
            }
        }
        Self { phrases }
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    /// The first refusal phrase found in the reply, if any.
    pub fn matched_phrase(&self, reply: &str) -> Option<&str> {
        let reply = reply.to_lowercase();
        self.phrases
            .iter()
            .find(|phrase| reply.contains(phrase.as_str()))
            .map(String::as_str)
    }

    pub fn is_deflection(&self, reply: &str) -> bool {
        self.matched_phrase(reply).is_some()
    }
}

impl Default for DeflectionDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&DeflectionConfig> for DeflectionDetector {
    fn from(config: &DeflectionConfig) -> Self {
        Self::with_phrases(&config.extra_phrases)
    }
}
