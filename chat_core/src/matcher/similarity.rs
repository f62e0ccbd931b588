//! String similarity scoring for match candidates.

/// Similarity ratio between two strings in `[0.0, 1.0]`.
///
/// Normalized Levenshtein: 1.0 is an exact match, 0.0 means nothing in
/// common. "hello" vs "helo" scores 0.8.
pub fn ratio(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b)
}

/// Whether two strings are similar enough to accept at the given cutoff.
pub fn is_close(a: &str, b: &str, cutoff: f64) -> bool {
    ratio(a, b) >= cutoff
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_scores_one() {
        assert!((ratio("hello", "hello") - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_edit_ratio() {
        // One deletion in a five-character word.
        assert!((ratio("helo", "hello") - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_unrelated_strings_score_low() {
        assert!(ratio("xyz", "hello") < 0.6);
    }

    #[test]
    fn test_comparison_is_case_sensitive() {
        // Every character differs; no folding happens before scoring.
        assert!(ratio("HELLO", "hello") < 0.6);
    }

    #[test]
    fn test_empty_strings() {
        assert!((ratio("", "") - 1.0).abs() < 1e-9);
        assert!(ratio("", "hello") < 1e-9);
    }

    #[test]
    fn test_is_close_honors_cutoff() {
        assert!(is_close("helo", "hello", 0.6));
        assert!(is_close("helo", "hello", 0.8));
        assert!(!is_close("helo", "hello", 0.81));
    }
}
