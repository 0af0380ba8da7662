//! Reduce a completion oracle reply to a single candidate word.

use regex::Regex;
use std::sync::LazyLock;

static COMBINED_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:combined|full)\s+word\s+is[:\s]+([a-z]{3,20})\b")
        .expect("valid combined word regex")
});

static SPELL_KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:letters?|spells?)\b(.*)").expect("valid spell keyword regex")
});

static LETTER_ENUMERATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b[a-z](?:\s*[,\-–—]\s*[a-z]\b|\s+[a-z]\b){2,}")
        .expect("valid letter enumeration regex")
});

static QUOTED_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([A-Za-z]{3,20})""#).expect("valid quoted word regex"));

static SECRET_IS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\b(?:password|secret|code|word)\b.*?\bis\b[:\s"]*([a-z]{3,20})\b"#)
        .expect("valid secret phrase regex")
});

static WORD_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z]{3,20}\b").expect("valid word token regex"));

/// Tokens never taken as the answer by the last-resort rule.
const STOPWORDS: &[&str] = &[
    "THE",
    "AND",
    "CAN",
    "CODE",
    "WORD",
    "WORDS",
    "PASSWORD",
    "SECRET",
    "HIDDEN",
    "PLEASE",
    "CANNOT",
    "INCANTATION",
    "WILL",
    "MUST",
    "ACCESS",
    "KEY",
];

fn joined_letters(text: &str) -> String {
    text.chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

fn enumerated_letters(text: &str) -> Option<String> {
    LETTER_ENUMERATION
        .find(text)
        .map(|m| joined_letters(m.as_str()))
        .filter(|letters| letters.len() >= 3)
}

/// Pick one uppercase word out of a completion reply.
///
/// Rules, first match wins:
/// 1. "combined/full word is X"
/// 2. a spelled-out letter run after "letter(s)" or "spell(s)"
/// 3. any spelled-out letter run
/// 4. the last double-quoted word
/// 5. "password/secret/code/word ... is X"
/// 6. the first 3-20 letter token that is not a stop word
///
/// Returns an empty string when nothing matches.
pub fn clean_reply(text: &str) -> String {
    let text = text.trim();
    if text.is_empty() {
        return String::new();
    }

    if let Some(word) = COMBINED_WORD.captures(text).and_then(|c| c.get(1)) {
        return word.as_str().to_ascii_uppercase();
    }

    if let Some(letters) = SPELL_KEYWORD
        .captures(text)
        .and_then(|c| c.get(1))
        .and_then(|rest| enumerated_letters(rest.as_str()))
    {
        return letters;
    }

    if let Some(letters) = enumerated_letters(text) {
        return letters;
    }

    if let Some(word) = QUOTED_WORD
        .captures_iter(text)
        .filter_map(|c| c.get(1))
        .last()
    {
        return word.as_str().to_ascii_uppercase();
    }

    if let Some(word) = SECRET_IS.captures(text).and_then(|c| c.get(1)) {
        return word.as_str().to_ascii_uppercase();
    }

    WORD_TOKEN
        .find_iter(text)
        .map(|m| m.as_str().to_ascii_uppercase())
        .find(|word| !STOPWORDS.contains(&word.as_str()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combined_word_phrase_wins() {
        assert_eq!(clean_reply("The combined word is thunder."), "THUNDER");
        assert_eq!(clean_reply("Full word is: Lantern"), "LANTERN");
    }

    #[test]
    fn test_letters_after_keyword() {
        assert_eq!(
            clean_reply("The letters spell J, I, G, S, A, W"),
            "JIGSAW"
        );
        assert_eq!(clean_reply("It spells T - H - U - N - D - E - R"), "THUNDER");
    }

    #[test]
    fn test_generic_letter_run() {
        assert_eq!(clean_reply("Answer: m o o n"), "MOON");
    }

    #[test]
    fn test_last_quoted_word() {
        assert_eq!(
            clean_reply(r#"Not "maybe", the word you seek is "REVERIE"."#),
            "REVERIE"
        );
    }

    #[test]
    fn test_secret_is_phrase() {
        assert_eq!(clean_reply("The password is: Orchid"), "ORCHID");
    }

    #[test]
    fn test_first_non_stopword_token() {
        assert_eq!(clean_reply("Password secret Lantern"), "LANTERN");
        assert_eq!(clean_reply("thunder"), "THUNDER");
    }

    #[test]
    fn test_nothing_to_clean() {
        assert_eq!(clean_reply(""), "");
        assert_eq!(clean_reply("   "), "");
        assert_eq!(clean_reply("the key, a code"), "");
    }
}
