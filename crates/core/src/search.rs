//! Substring-search helpers shared by the feed repository.
//!
//! Feed filtering uses case-insensitive substring matches (ILIKE). User
//! input must have the LIKE wildcards escaped so a literal `%` in a search
//! term does not turn into a match-everything pattern.

/// Escape LIKE/ILIKE wildcards (`%`, `_`) and the escape character itself.
///
/// PostgreSQL's default escape character for LIKE is backslash.
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Build a contains-anywhere ILIKE pattern from a raw user term.
pub fn contains_pattern(term: &str) -> String {
    format!("%{}%", escape_like(term))
}

/// Normalize an optional user-supplied term: trim whitespace, treat empty
/// strings as absent.
pub fn normalize_term(term: Option<String>) -> Option<String> {
    term.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- escape_like ---------------------------------------------------------

    #[test]
    fn plain_terms_pass_through() {
        assert_eq!(escape_like("rust async"), "rust async");
    }

    #[test]
    fn wildcards_are_escaped() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("snake_case"), "snake\\_case");
    }

    #[test]
    fn backslash_is_escaped() {
        assert_eq!(escape_like("a\\b"), "a\\\\b");
    }

    // -- contains_pattern ----------------------------------------------------

    #[test]
    fn pattern_wraps_escaped_term() {
        assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
    }

    // -- normalize_term ------------------------------------------------------

    #[test]
    fn normalize_trims_and_drops_empty() {
        assert_eq!(normalize_term(Some("  rust  ".into())), Some("rust".into()));
        assert_eq!(normalize_term(Some("   ".into())), None);
        assert_eq!(normalize_term(Some(String::new())), None);
        assert_eq!(normalize_term(None), None);
    }
}
