//! First-name inference from free text.

use regex::Regex;
use std::sync::OnceLock;

static NAME_PATTERN: OnceLock<Regex> = OnceLock::new();

#[expect(
    clippy::expect_used,
    reason = "Static regex pattern validated at compile time"
)]
fn name_pattern() -> &'static Regex {
    NAME_PATTERN.get_or_init(|| {
        Regex::new(r"(?i)my name is\s+([A-Za-z]{2,20})")
            .expect("Static regex pattern is guaranteed to be valid")
    })
}

/// Infer a first name from a "my name is ..." statement.
///
/// Returns `None` when a name is already known, so a session's name is only
/// ever inferred once. The first match is returned verbatim.
#[must_use]
pub fn infer_name(text: &str, already_known: Option<&str>) -> Option<String> {
    if already_known.is_some_and(|name| !name.is_empty()) {
        return None;
    }

    name_pattern()
        .captures(text)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infers_from_introduction() {
        assert_eq!(infer_name("Hi, my name is Maya", None), Some("Maya".to_string()));
    }

    #[test]
    fn case_insensitive_phrase_keeps_token_case() {
        assert_eq!(infer_name("MY NAME IS sam!", None), Some("sam".to_string()));
    }

    #[test]
    fn known_name_blocks_inference() {
        assert_eq!(infer_name("actually my name is Sam", Some("Maya")), None);
    }

    #[test]
    fn empty_known_name_does_not_block() {
        assert_eq!(infer_name("my name is Sam", Some("")), Some("Sam".to_string()));
    }

    #[test]
    fn single_letter_is_not_a_name() {
        assert_eq!(infer_name("my name is J", None), None);
    }

    #[test]
    fn first_match_wins() {
        assert_eq!(
            infer_name("my name is Ana, not my name is Bea", None),
            Some("Ana".to_string())
        );
    }

    #[test]
    fn long_token_is_capped() {
        let name = infer_name("my name is Abcdefghijklmnopqrstuvwxyz", None);
        assert_eq!(name.as_deref(), Some("Abcdefghijklmnopqrst"));
    }

    #[test]
    fn no_phrase_no_name() {
        assert_eq!(infer_name("What is a normal cycle length?", None), None);
    }
}
