//! Filter predicate helpers
//!
//! Pure functions backing the conjunctive resource filters. An empty filter
//! list is vacuously satisfied in every predicate.

use regex::Regex;

/// Case-insensitive set membership. An empty list passes.
pub fn contains_fold(value: &str, list: &[String]) -> bool {
    list.is_empty() || list.iter().any(|entry| entry.eq_ignore_ascii_case(value))
}

/// Any-of intersection between the event's values and the filter list,
/// case-insensitive. An empty filter list passes.
pub fn intersects_fold(values: &[&str], list: &[String]) -> bool {
    list.is_empty()
        || values
            .iter()
            .any(|value| list.iter().any(|entry| entry.eq_ignore_ascii_case(value)))
}

/// Whether the value matches at least one pattern in the list. An empty
/// list passes. Patterns are vetted at configuration load; a compile
/// failure here is surfaced rather than swallowed.
pub fn matches_any(value: &str, patterns: &[String]) -> Result<bool, regex::Error> {
    if patterns.is_empty() {
        return Ok(true);
    }
    for pattern in patterns {
        if Regex::new(pattern)?.is_match(value) {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(entries: &[&str]) -> Vec<String> {
        entries.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_contains_fold_empty_list_passes() {
        assert!(contains_fold("anything", &[]));
    }

    #[test]
    fn test_contains_fold_case_insensitive() {
        let statuses = list(&["Succeeded", "abandoned"]);
        assert!(contains_fold("succeeded", &statuses));
        assert!(contains_fold("ABANDONED", &statuses));
        assert!(!contains_fold("queued", &statuses));
    }

    #[test]
    fn test_intersects_fold() {
        let filter = list(&["staging", "production"]);
        assert!(intersects_fold(&["dev", "staging"], &filter));
        assert!(intersects_fold(&["PRODUCTION"], &filter));
        assert!(!intersects_fold(&["dev", "qa"], &filter));
        assert!(intersects_fold(&[], &[]));
        assert!(!intersects_fold(&[], &filter));
    }

    #[test]
    fn test_matches_any_empty_list_passes() {
        assert!(matches_any("refs/heads/master", &[]).unwrap());
    }

    #[test]
    fn test_matches_any_ere_patterns() {
        let refs = list(&["^refs/heads/feature/.+$", "^refs/heads/master$"]);
        assert!(matches_any("refs/heads/feature/login", &refs).unwrap());
        assert!(matches_any("refs/heads/master", &refs).unwrap());
        assert!(!matches_any("refs/heads/hotfix/x", &refs).unwrap());
    }

    #[test]
    fn test_matches_any_invalid_pattern_is_an_error() {
        let bad = list(&["("]);
        assert!(matches_any("refs/heads/master", &bad).is_err());
    }
}
