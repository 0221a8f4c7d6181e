//! @mention extraction from question, answer, and comment bodies.

use std::sync::LazyLock;

use regex::Regex;

/// Matches `@username` where the username is alphanumeric/underscore and the
/// `@` is not glued to a preceding word character (so emails don't trigger
/// mentions).
static MENTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[^\w@])@(\w+)").expect("mention regex is valid"));

/// Extract candidate usernames mentioned in `text`, deduplicated, in order
/// of first appearance. Callers resolve the names against the user store;
/// unknown names are simply dropped there.
pub fn extract_mentions(text: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for cap in MENTION_RE.captures_iter(text) {
        let name = cap[1].to_string();
        if !seen.contains(&name) {
            seen.push(name);
        }
    }
    seen
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_single_mention() {
        assert_eq!(extract_mentions("thanks @alice!"), vec!["alice"]);
    }

    #[test]
    fn extracts_multiple_in_order() {
        assert_eq!(
            extract_mentions("@bob see @alice's answer"),
            vec!["bob", "alice"]
        );
    }

    #[test]
    fn deduplicates_repeats() {
        assert_eq!(extract_mentions("@carol and @carol again"), vec!["carol"]);
    }

    #[test]
    fn mention_at_start_of_text() {
        assert_eq!(extract_mentions("@dave hi"), vec!["dave"]);
    }

    #[test]
    fn punctuation_terminates_name() {
        assert_eq!(extract_mentions("ping @erin, please"), vec!["erin"]);
    }

    #[test]
    fn emails_are_not_mentions() {
        assert!(extract_mentions("mail me at someone@example.com").is_empty());
    }

    #[test]
    fn bare_at_sign_is_ignored() {
        assert!(extract_mentions("look @ this").is_empty());
    }

    #[test]
    fn no_mentions_yields_empty() {
        assert!(extract_mentions("no names here").is_empty());
    }
}
