//! JSON file persistence - load, save, and the legacy schema adapter.
//!
//! The knowledge base is mirrored to a single JSON document in one of two
//! shapes:
//!
//! - **Canonical**: `{"intents": [{"tag", "patterns", "responses", "context_set"}]}`
//! - **Legacy**: `{"questions": [{"question", "answer"}]}`
//!
//! Both load into the same [`Record`] shape; saving always writes the
//! canonical document.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::record::Record;
use crate::store::KnowledgeBase;

/// Errors raised by knowledge base persistence.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read knowledge base file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write knowledge base file {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed knowledge base file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode knowledge base")]
    Encode {
        #[source]
        source: serde_json::Error,
    },
}

/// The on-disk document, in either accepted shape.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum StoreDocument {
    Intents { intents: Vec<IntentEntry> },
    Questions { questions: Vec<QuestionEntry> },
}

/// Canonical entry: several phrasings mapped to several answers.
#[derive(Debug, Serialize, Deserialize)]
struct IntentEntry {
    #[serde(default)]
    tag: String,
    patterns: Vec<String>,
    responses: Vec<String>,
    #[serde(default)]
    context_set: String,
}

/// Legacy entry: one phrasing, one answer.
#[derive(Debug, Serialize, Deserialize)]
struct QuestionEntry {
    question: String,
    answer: String,
}

/// An entry with no patterns can never match and is dropped at load time.
fn record_from_intent(entry: IntentEntry) -> Option<Record> {
    let mut patterns = entry.patterns.into_iter();
    let mut record = Record::new(patterns.next()?);
    for pattern in patterns {
        record = record.with_pattern(pattern);
    }
    for response in entry.responses {
        record = record.with_response(response);
    }
    if !entry.tag.is_empty() {
        record = record.with_tag(entry.tag);
    }
    if !entry.context_set.is_empty() {
        record = record.with_context(entry.context_set);
    }
    Some(record)
}

fn record_from_question(entry: QuestionEntry) -> Record {
    Record::new(entry.question).with_response(entry.answer)
}

fn intent_from_record(record: &Record) -> IntentEntry {
    IntentEntry {
        tag: record.tag.clone().unwrap_or_default(),
        patterns: record.patterns.clone(),
        responses: record.responses.clone(),
        context_set: record.context.clone().unwrap_or_default(),
    }
}

/// Load the knowledge base from `path`.
///
/// A missing file is not an error: the bot simply has not learned anything
/// yet. Malformed content surfaces as [`StorageError::Parse`].
pub fn load_knowledge_base(path: impl AsRef<Path>) -> Result<KnowledgeBase, StorageError> {
    let path = path.as_ref();

    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "knowledge base file not found, starting empty");
            return Ok(KnowledgeBase::new());
        }
        Err(err) => {
            return Err(StorageError::Read {
                path: path.to_path_buf(),
                source: err,
            })
        }
    };

    let document: StoreDocument = serde_json::from_str(&contents).map_err(|err| {
        StorageError::Parse {
            path: path.to_path_buf(),
            source: err,
        }
    })?;

    let mut base = KnowledgeBase::new();
    match document {
        StoreDocument::Intents { intents } => {
            for entry in intents {
                match record_from_intent(entry) {
                    Some(record) => {
                        base.add_record(record);
                    }
                    None => {
                        debug!(path = %path.display(), "dropping stored entry with no patterns")
                    }
                }
            }
        }
        StoreDocument::Questions { questions } => {
            info!(path = %path.display(), "migrating legacy question/answer schema");
            for entry in questions {
                base.add_record(record_from_question(entry));
            }
        }
    }

    debug!(path = %path.display(), records = base.record_count(), "knowledge base loaded");
    Ok(base)
}

/// Save the whole knowledge base to `path` in the canonical schema.
///
/// Write failures propagate to the caller; there is no partial-state
/// recovery.
pub fn save_knowledge_base(
    path: impl AsRef<Path>,
    base: &KnowledgeBase,
) -> Result<(), StorageError> {
    let path = path.as_ref();

    let document = StoreDocument::Intents {
        intents: base.records().map(intent_from_record).collect(),
    };
    let json = serde_json::to_string_pretty(&document)
        .map_err(|err| StorageError::Encode { source: err })?;

    fs::write(path, json).map_err(|err| StorageError::Write {
        path: path.to_path_buf(),
        source: err,
    })?;

    debug!(path = %path.display(), records = base.record_count(), "knowledge base saved");
    Ok(())
}
