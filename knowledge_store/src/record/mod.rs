//! Record definitions - the entries of the knowledge base.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(pub Uuid);

impl RecordId {
    /// Create a new random record ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a record ID from a specific UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Create a nil/empty record ID (useful for defaults).
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordSource {
    /// Loaded from the storage file or constructed at setup.
    Seeded,
    /// Appended by the teach operation during a session.
    Taught,
}

/// A record maps one or more phrasings of a question to its answers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,

    /// Stored phrasings used as match candidates. Never empty.
    pub patterns: Vec<String>,

    /// Acceptable answers. Non-empty once taught; a seeded record may still
    /// be waiting for one.
    pub responses: Vec<String>,

    /// Optional grouping label.
    pub tag: Option<String>,

    /// Optional conversational context marker.
    pub context: Option<String>,

    /// Source of this record.
    pub source: RecordSource,
}

impl Record {
    /// Create a new record with the given initial pattern.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            id: RecordId::new(),
            patterns: vec![pattern.into()],
            responses: Vec::new(),
            tag: None,
            context: None,
            source: RecordSource::Seeded,
        }
    }

    /// Add another phrasing of the same question.
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.patterns.push(pattern.into());
        self
    }

    /// Add an acceptable answer.
    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.responses.push(response.into());
        self
    }

    /// Set the grouping tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Set the context marker.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Set the record source.
    pub fn with_source(mut self, source: RecordSource) -> Self {
        self.source = source;
        self
    }

    /// The first stored response, the one surfaced to the user.
    pub fn primary_response(&self) -> Option<&str> {
        self.responses.first().map(String::as_str)
    }

    /// Check if this record stores the exact pattern.
    pub fn has_pattern(&self, pattern: &str) -> bool {
        self.patterns.iter().any(|p| p == pattern)
    }

    /// Whether this record can answer at all.
    pub fn can_answer(&self) -> bool {
        !self.responses.is_empty()
    }
}
