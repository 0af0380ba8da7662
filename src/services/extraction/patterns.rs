//! Text heuristics for pulling letters and words out of oracle replies.
//!
//! Everything here is pure: no oracle calls, no logging. The engine composes
//! these into the per-category extractors.

use regex::Regex;
use std::sync::LazyLock;

/// A maximal run of 3-15 uppercase letters.
static CAPS_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z]{3,15}\b").expect("valid caps word regex"));

/// Single uppercase letters separated by commas, dashes or spaces, optionally
/// joined by "and": `C - A - T`, `C, A and T`.
static SEPARATED_LETTERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Z](?:(?:\s*[,\-–—]\s*|\s+)(?:and\s+)?[A-Z]\b){2,}")
        .expect("valid separated letters regex")
});

/// Letters separated by repeated dots: `C..A..T`, `c ... a ... t`.
static DOTTED_LETTERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z](?:\s*\.{2,}\s*[A-Za-z]\b){2,}").expect("valid dotted letters regex")
});

/// A standalone uppercase letter.
static ISOLATED_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z]\b").expect("valid isolated letter regex"));

/// Letters the oracle spelled out after a first/last keyword, within the same
/// sentence: an uppercase run (`THU`) or separated capitals (`T, H, U`).
/// Lowercase words in between ("three", "the letters") are skipped, never
/// captured.
const PARTIAL_TAIL: &str = r"[^.!?]*?\b([A-Z](?:[\s,\-–]+(?:and\s+)?[A-Z]\b)+|[A-Z]{1,10})\b";

/// "first N letters are X", "starts with X", "begins with the letters X".
static FIRST_PARTIAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i:\b(?:first|starts?\s+with|begins?\s+with)\b){PARTIAL_TAIL}"
    ))
    .expect("valid first partial regex")
});

/// "last N letters are Y", "ends with Y", "the last three letters: Y".
static LAST_PARTIAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i:\b(?:last|ends?\s+with)\b){PARTIAL_TAIL}"))
        .expect("valid last partial regex")
});

/// All-caps or title-case tokens of 2-10 letters.
static CLUE_FRAGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Z]{2,10}\b|\b[A-Z][a-z]{1,9}\b").expect("valid clue fragment regex")
});

/// Word-like tokens in a completion suggestion.
static SUGGESTION_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z]{4,15}\b").expect("valid suggestion regex"));

/// Filler words skipped when reading a completion suggestion.
const SUGGESTION_FILLER: &[&str] = &["THE", "AND", "THAT", "COULD", "MATCH", "WORDS", "WITH"];

fn ascii_letters(text: &str) -> String {
    text.chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Every maximal run of 3-15 uppercase letters, in order.
pub fn caps_words(reply: &str) -> Vec<&str> {
    CAPS_WORD.find_iter(reply).map(|m| m.as_str()).collect()
}

/// The reply reduced to its ASCII letters, uppercased.
pub fn letters_only(reply: &str) -> String {
    ascii_letters(reply)
}

/// Letters of a spelled-out word, trying separated, dotted, then isolated
/// letters. The first pattern that matches wins.
pub fn spelled_letters(reply: &str) -> Option<String> {
    if let Some(m) = SEPARATED_LETTERS.find(reply) {
        let letters: String = ISOLATED_LETTER
            .find_iter(m.as_str())
            .map(|l| l.as_str())
            .collect();
        if letters.len() >= 3 {
            return Some(letters);
        }
    }

    if let Some(m) = DOTTED_LETTERS.find(reply) {
        return Some(ascii_letters(m.as_str()));
    }

    isolated_letters(reply).filter(|letters| letters.len() >= 3)
}

/// All standalone uppercase letters in the reply, joined in order.
pub fn isolated_letters(reply: &str) -> Option<String> {
    let letters: String = ISOLATED_LETTER
        .find_iter(reply)
        .map(|m| m.as_str())
        .collect();
    (!letters.is_empty()).then_some(letters)
}

/// Known fragments of a word from a partial-letters reply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LetterPartial {
    pub first: Option<String>,
    pub last: Option<String>,
    /// Letters known to be in the word, position unknown.
    pub loose: Option<String>,
}

impl LetterPartial {
    pub const fn is_empty(&self) -> bool {
        self.first.is_none() && self.last.is_none() && self.loose.is_none()
    }

    /// Whether a suggested word respects every known fragment.
    pub fn admits(&self, word: &str) -> bool {
        let word = word.to_ascii_uppercase();
        self.first.as_ref().is_none_or(|f| word.starts_with(f.as_str()))
            && self.last.as_ref().is_none_or(|l| word.ends_with(l.as_str()))
            && self
                .loose
                .as_ref()
                .is_none_or(|letters| letters.chars().all(|c| word.contains(c)))
    }

    /// Constraint phrase for a completion prompt.
    pub fn describe(&self) -> String {
        let mut constraints = Vec::new();
        if let Some(first) = &self.first {
            constraints.push(format!("starts with \"{first}\""));
        }
        if let Some(last) = &self.last {
            constraints.push(format!("ends with \"{last}\""));
        }
        if let Some(loose) = &self.loose {
            let letters: Vec<String> = loose.chars().map(String::from).collect();
            constraints.push(format!("contains the letters {}", letters.join(", ")));
        }
        constraints.join(" and ")
    }
}

/// Parse first/last fragment templates; without any, fall back to 2-4
/// isolated uppercase letters as a loose partial.
pub fn letter_partial(reply: &str) -> LetterPartial {
    // A lone "I" after the keyword is the pronoun, not a letter
    let capture = |re: &Regex| {
        re.captures_iter(reply)
            .filter_map(|caps| caps.get(1))
            .map(|m| ascii_letters(m.as_str()))
            .find(|letters| !letters.is_empty() && letters != "I")
    };

    let first = capture(&FIRST_PARTIAL);
    let last = capture(&LAST_PARTIAL);
    if first.is_some() || last.is_some() {
        return LetterPartial {
            first,
            last,
            loose: None,
        };
    }

    let count = ISOLATED_LETTER.find_iter(reply).count();
    LetterPartial {
        loose: (2..=4)
            .contains(&count)
            .then(|| isolated_letters(reply))
            .flatten(),
        ..LetterPartial::default()
    }
}

/// Initials of an acrostic reply, or `None` when fewer than three are found.
///
/// Tries, in order: one initial per non-empty line, per comma-separated
/// fragment, then per capitalized word. The first rule that yields at least
/// three initials wins.
pub fn acronym_initials(reply: &str) -> Option<String> {
    let by_lines = initials(reply.lines());
    if by_lines.len() >= 3 {
        return Some(by_lines);
    }

    if reply.contains(',') {
        let by_commas = initials(reply.split(','));
        if by_commas.len() >= 3 {
            return Some(by_commas);
        }
    }

    let by_capitals: String = reply
        .split_whitespace()
        .filter_map(|word| word.chars().find(char::is_ascii_alphabetic))
        .filter(char::is_ascii_uppercase)
        .collect();
    (by_capitals.len() >= 3).then_some(by_capitals)
}

fn initials<'a>(fragments: impl Iterator<Item = &'a str>) -> String {
    fragments
        .filter_map(|fragment| fragment.chars().find(char::is_ascii_alphabetic))
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Uppercased capitalized-letter runs in a clue reply, in order.
pub fn clue_fragments(reply: &str) -> Vec<String> {
    CLUE_FRAGMENT
        .find_iter(reply)
        .map(|m| m.as_str().to_ascii_uppercase())
        .collect()
}

/// Up to `limit` uppercased word-like tokens from a completion suggestion,
/// skipping filler words.
pub fn suggestion_words(text: &str, limit: usize) -> Vec<String> {
    SUGGESTION_WORD
        .find_iter(text)
        .map(|m| m.as_str().to_ascii_uppercase())
        .filter(|word| !SUGGESTION_FILLER.contains(&word.as_str()))
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caps_words_are_maximal_runs() {
        assert_eq!(caps_words("The word is CARPET, not RUG."), vec!["CARPET", "RUG"]);
        assert!(caps_words("ABCDEFGHIJKLMNOPQ is too long").is_empty());
        assert!(caps_words("no shouting here").is_empty());
    }

    #[test]
    fn test_spelled_letters_separated() {
        assert_eq!(
            spelled_letters("C - A - R - P - E - T").as_deref(),
            Some("CARPET")
        );
        assert_eq!(
            spelled_letters("It goes J, I, G, S, A and W.").as_deref(),
            Some("JIGSAW")
        );
    }

    #[test]
    fn test_spelled_letters_dotted() {
        assert_eq!(spelled_letters("m...o...o...n").as_deref(), Some("MOON"));
    }

    #[test]
    fn test_spelled_letters_isolated_anywhere() {
        assert_eq!(
            spelled_letters("First comes T then H then E then N").as_deref(),
            Some("THEN")
        );
        assert_eq!(spelled_letters("Only A and B here"), None);
    }

    #[test]
    fn test_letter_partial_templates() {
        let partial = letter_partial("The first three letters are T, H, U.");
        assert_eq!(partial.first.as_deref(), Some("THU"));
        assert_eq!(partial.last, None);

        let partial = letter_partial("The last 3 letters of the word are DER");
        assert_eq!(partial.last.as_deref(), Some("DER"));

        let partial = letter_partial("It starts with THU and ends with DER.");
        assert_eq!(partial.first.as_deref(), Some("THU"));
        assert_eq!(partial.last.as_deref(), Some("DER"));
    }

    #[test]
    fn test_letter_partial_skips_filler_words() {
        let partial = letter_partial("The last three letters: D, E, R");
        assert_eq!(partial.last.as_deref(), Some("DER"));
        assert_eq!(partial.first, None);

        let partial = letter_partial("The word begins with the letters THU");
        assert_eq!(partial.first.as_deref(), Some("THU"));

        let partial = letter_partial("First, I will say it begins with THU.");
        assert_eq!(partial.first.as_deref(), Some("THU"));
    }

    #[test]
    fn test_letter_partial_keyword_without_letters_is_loose() {
        let partial = letter_partial("The first letters are a mystery. Yet R and T appear.");
        assert_eq!(partial.first, None);
        assert_eq!(partial.last, None);
        assert_eq!(partial.loose.as_deref(), Some("RT"));
    }

    #[test]
    fn test_letter_partial_loose_letters() {
        let partial = letter_partial("Think of R and T, wise one.");
        assert_eq!(partial.loose.as_deref(), Some("RT"));
        assert!(letter_partial("Nothing to see here.").is_empty());
    }

    #[test]
    fn test_partial_admits() {
        let partial = LetterPartial {
            first: Some("THU".to_string()),
            last: Some("DER".to_string()),
            loose: None,
        };
        assert!(partial.admits("thunder"));
        assert!(!partial.admits("THUMB"));
        assert_eq!(
            partial.describe(),
            "starts with \"THU\" and ends with \"DER\""
        );
    }

    #[test]
    fn test_acronym_comma_split() {
        assert_eq!(
            acronym_initials("Cats roam, Hunting every rat, Every night, Roaming yards").as_deref(),
            Some("CHER")
        );
    }

    #[test]
    fn test_acronym_line_split() {
        let poem = "Many stars shine\nOver the hills\nOnly at night\nNever by day";
        assert_eq!(acronym_initials(poem).as_deref(), Some("MOON"));
    }

    #[test]
    fn test_acronym_capitalized_split() {
        assert_eq!(
            acronym_initials("Bright Rivers Ice Glows Hot Tonight").as_deref(),
            Some("BRIGHT")
        );
        assert_eq!(acronym_initials("no capitals at all"), None);
    }

    #[test]
    fn test_clue_fragments() {
        assert_eq!(
            clue_fragments("The first letters are THUN."),
            vec!["THE", "THUN"]
        );
    }

    #[test]
    fn test_suggestion_words_skip_filler() {
        assert_eq!(
            suggestion_words("That could match THUNDER with words", 5),
            vec!["THUNDER"]
        );
    }
}
