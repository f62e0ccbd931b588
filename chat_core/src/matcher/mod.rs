//! Matcher - finds the closest stored pattern for free-text input.
//!
//! The lookup works as follows:
//! 1. **Flatten**: Walk every pattern of every record in scan order
//! 2. **Score**: Compute a similarity ratio between the input and each
//!    candidate
//! 3. **Filter**: Keep candidates at or above the cutoff ratio
//! 4. **Select**: Return the single highest-scoring candidate; equal scores
//!    resolve to the first one encountered

mod similarity;

pub use similarity::*;

use knowledge_store::{KnowledgeBase, Record};
use tracing::{debug, trace};

/// Configuration for best-match lookup.
#[derive(Debug, Clone)]
pub struct MatcherConfig {
    /// Minimum similarity ratio required to accept a match.
    pub cutoff: f64,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self { cutoff: 0.6 }
    }
}

/// A successful lookup.
#[derive(Debug, Clone)]
pub struct Match<'a> {
    /// The record owning the matched pattern.
    pub record: &'a Record,
    /// The stored pattern that matched.
    pub pattern: &'a str,
    /// Similarity ratio between the input and the pattern.
    pub score: f64,
}

impl<'a> Match<'a> {
    /// The response surfaced for this match: the record's first one, even
    /// when several are stored.
    ///
    /// Lookup never selects a record without responses, so the fallback is
    /// unreachable.
    pub fn response(&self) -> &'a str {
        self.record.primary_response().unwrap_or("")
    }
}

/// Finds the closest known pattern above a similarity cutoff.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    config: MatcherConfig,
}

impl Matcher {
    /// Create a new matcher with the given configuration.
    pub fn new(config: MatcherConfig) -> Self {
        Self { config }
    }

    /// Create a matcher with the default configuration.
    pub fn with_defaults() -> Self {
        Self::new(MatcherConfig::default())
    }

    /// The configured cutoff ratio.
    pub fn cutoff(&self) -> f64 {
        self.config.cutoff
    }

    /// Find the single best match for `input` in the knowledge base.
    ///
    /// The input is compared as given: no case folding, no trimming. Records
    /// without responses cannot answer and are not candidates. Returns
    /// `None` when no pattern reaches the cutoff.
    pub fn find_best_match<'a>(
        &self,
        input: &str,
        base: &'a KnowledgeBase,
    ) -> Option<Match<'a>> {
        let mut best: Option<Match<'a>> = None;

        for (record, pattern) in base.patterns() {
            if !record.can_answer() {
                continue;
            }

            let score = similarity::ratio(input, pattern);
            trace!(pattern, score, "scored candidate");

            if score < self.config.cutoff {
                continue;
            }

            // Strictly greater keeps the first candidate on equal scores.
            match &best {
                Some(current) if score <= current.score => {}
                _ => {
                    best = Some(Match {
                        record,
                        pattern,
                        score,
                    })
                }
            }
        }

        match &best {
            Some(found) => debug!(pattern = found.pattern, score = found.score, "best match"),
            None => debug!(input, "no pattern above cutoff"),
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use knowledge_store::{KnowledgeBase, Record};

    fn seeded_base() -> KnowledgeBase {
        let mut base = KnowledgeBase::new();
        base.add_record(Record::new("hello").with_response("hi there"));
        base.add_record(
            Record::new("what is your name")
                .with_pattern("who are you")
                .with_response("I'm Retort")
                .with_tag("identity"),
        );
        base
    }

    #[test]
    fn test_exact_match_returns_first_response() {
        let base = seeded_base();
        let matcher = Matcher::with_defaults();

        let found = matcher.find_best_match("hello", &base);
        assert!(found.is_some());

        let found = found.unwrap();
        assert_eq!(found.response(), "hi there");
        assert!((found.score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_close_input_matches_above_cutoff() {
        let base = seeded_base();
        let matcher = Matcher::with_defaults();

        let found = matcher.find_best_match("helo", &base);
        assert!(found.is_some());

        let found = found.unwrap();
        assert_eq!(found.pattern, "hello");
        assert_eq!(found.response(), "hi there");
        assert!((found.score - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_unrelated_input_finds_nothing() {
        let base = seeded_base();
        let matcher = Matcher::with_defaults();

        assert!(matcher.find_best_match("xyz", &base).is_none());
    }

    #[test]
    fn test_any_pattern_of_a_record_can_match() {
        let base = seeded_base();
        let matcher = Matcher::with_defaults();

        let found = matcher.find_best_match("who are you", &base).unwrap();
        assert_eq!(found.response(), "I'm Retort");
        assert_eq!(found.record.tag.as_deref(), Some("identity"));
    }

    #[test]
    fn test_highest_score_wins_across_records() {
        let mut base = KnowledgeBase::new();
        // Both clear the cutoff for "hello"; the later exact match scores higher.
        base.add_record(Record::new("hell").with_response("first"));
        base.add_record(Record::new("hello").with_response("second"));

        let matcher = Matcher::with_defaults();
        let found = matcher.find_best_match("hello", &base).unwrap();
        assert_eq!(found.response(), "second");
    }

    #[test]
    fn test_tie_resolves_to_first_in_scan_order() {
        let mut base = KnowledgeBase::new();
        base.add_record(Record::new("ping").with_response("pong"));
        base.add_record(Record::new("ping").with_response("pang"));

        let matcher = Matcher::with_defaults();
        let found = matcher.find_best_match("ping", &base).unwrap();
        assert_eq!(found.response(), "pong");
    }

    #[test]
    fn test_records_without_responses_are_not_candidates() {
        let mut base = KnowledgeBase::new();
        base.add_record(Record::new("hello"));
        base.add_record(Record::new("hello").with_response("hi there"));

        let matcher = Matcher::with_defaults();
        let found = matcher.find_best_match("hello", &base).unwrap();
        assert_eq!(found.response(), "hi there");
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let base = seeded_base();
        let matcher = Matcher::with_defaults();

        assert!(matcher.find_best_match("HELLO", &base).is_none());
    }

    #[test]
    fn test_empty_base_never_matches() {
        let matcher = Matcher::with_defaults();
        assert!(matcher.find_best_match("hello", &KnowledgeBase::new()).is_none());
    }

    #[test]
    fn test_custom_cutoff() {
        let base = seeded_base();
        let strict = Matcher::new(MatcherConfig { cutoff: 0.9 });

        // 0.8 is below a 0.9 cutoff.
        assert!(strict.find_best_match("helo", &base).is_none());
        assert!(strict.find_best_match("hello", &base).is_some());
    }
}
