//! The in-memory knowledge base - an ordered collection of records.

use serde::{Deserialize, Serialize};

use crate::record::{Record, RecordId};

/// The complete set of stored knowledge during a session.
///
/// Records are kept in insertion order and every lookup is a linear scan.
/// There are no secondary indices; scan order doubles as the deterministic
/// tie-break order for matching.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct KnowledgeBase {
    records: Vec<Record>,
}

impl KnowledgeBase {
    /// Create a new empty knowledge base.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record. Returns the record ID for reference.
    pub fn add_record(&mut self, record: Record) -> RecordId {
        let id = record.id;
        self.records.push(record);
        id
    }

    /// Iterate over all records in scan order.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    /// Iterate over every (record, pattern) pair in scan order.
    ///
    /// This is the flattened candidate sequence the matcher scans.
    pub fn patterns(&self) -> impl Iterator<Item = (&Record, &str)> {
        self.records
            .iter()
            .flat_map(|record| record.patterns.iter().map(move |p| (record, p.as_str())))
    }

    /// Get a record by ID.
    pub fn get_record(&self, id: RecordId) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Find the first record storing the exact pattern.
    pub fn find_by_pattern(&self, pattern: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.has_pattern(pattern))
    }

    /// Find records matching a predicate.
    pub fn find_records<F>(&self, predicate: F) -> Vec<&Record>
    where
        F: Fn(&Record) -> bool,
    {
        self.records.iter().filter(|r| predicate(r)).collect()
    }

    /// Total number of records.
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Whether the base holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_get_record() {
        let mut base = KnowledgeBase::new();

        let id = base.add_record(Record::new("hello").with_response("hi there"));

        let retrieved = base.get_record(id);
        assert!(retrieved.is_some());
        assert_eq!(retrieved.unwrap().patterns, vec!["hello"]);
        assert_eq!(base.record_count(), 1);
    }

    #[test]
    fn test_scan_order_is_insertion_order() {
        let mut base = KnowledgeBase::new();

        base.add_record(Record::new("first"));
        base.add_record(Record::new("second"));
        base.add_record(Record::new("third"));

        let patterns: Vec<_> = base.records().map(|r| r.patterns[0].as_str()).collect();
        assert_eq!(patterns, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_patterns_flatten_in_scan_order() {
        let mut base = KnowledgeBase::new();

        base.add_record(Record::new("hello").with_pattern("hi"));
        base.add_record(Record::new("bye"));

        let flattened: Vec<_> = base.patterns().map(|(_, p)| p).collect();
        assert_eq!(flattened, vec!["hello", "hi", "bye"]);
    }

    #[test]
    fn test_find_by_pattern_prefers_first_in_scan_order() {
        let mut base = KnowledgeBase::new();

        let first = base.add_record(Record::new("ping").with_response("pong"));
        base.add_record(Record::new("ping").with_response("pang"));

        let found = base.find_by_pattern("ping");
        assert!(found.is_some());
        assert_eq!(found.unwrap().id, first);
    }

    #[test]
    fn test_empty_base() {
        let base = KnowledgeBase::new();
        assert!(base.is_empty());
        assert_eq!(base.record_count(), 0);
        assert!(base.find_by_pattern("anything").is_none());
    }
}
