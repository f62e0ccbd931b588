//! Session state and the teach flow.
//!
//! A session owns the knowledge base for its lifetime and mirrors it to the
//! storage file after every mutation. Teach mode is explicit state: the
//! session is either listening for questions or awaiting the answer to the
//! last unmatched one.

use std::path::{Path, PathBuf};

use knowledge_store::{
    load_knowledge_base, save_knowledge_base, KnowledgeBase, Record, RecordSource, StorageError,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::matcher::Matcher;

/// Answer keyword that declines to teach, compared case-insensitively.
pub const SKIP_KEYWORD: &str = "skip";

/// What the session is currently waiting for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionMode {
    /// Waiting for a question.
    Listening,

    /// The last question had no match; waiting for the user to answer it.
    AwaitingAnswer {
        /// The unmatched input that triggered teach mode.
        question: String,
    },
}

/// Outcome of a teach attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeachOutcome {
    /// A new record was appended and persisted.
    Learned,
    /// The answer was empty or the skip keyword; nothing changed.
    Declined,
}

/// Reply produced for one line of user input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reply {
    /// A stored response matched the input.
    Answer { text: String },

    /// Nothing matched; the session now awaits an answer to teach.
    TeachPrompt,

    /// The pending question was taught successfully.
    Learned,

    /// The user declined to teach the pending question.
    Declined,
}

/// A single-user chat session over one knowledge base file.
pub struct ChatSession {
    base: KnowledgeBase,
    matcher: Matcher,
    storage_path: PathBuf,
    mode: SessionMode,
}

impl ChatSession {
    /// Open a session backed by `path`, loading the stored knowledge base or
    /// starting empty when the file does not exist yet.
    pub fn open(path: impl AsRef<Path>, matcher: Matcher) -> Result<Self, StorageError> {
        let storage_path = path.as_ref().to_path_buf();
        let base = load_knowledge_base(&storage_path)?;
        info!(path = %storage_path.display(), records = base.record_count(), "session opened");

        Ok(Self {
            base,
            matcher,
            storage_path,
            mode: SessionMode::Listening,
        })
    }

    /// The knowledge base as currently held in memory.
    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.base
    }

    /// What the session is waiting for.
    pub fn mode(&self) -> &SessionMode {
        &self.mode
    }

    /// Whether the session awaits an answer to an unmatched question.
    pub fn is_awaiting_answer(&self) -> bool {
        matches!(self.mode, SessionMode::AwaitingAnswer { .. })
    }

    /// Process one line of user input and produce the reply.
    ///
    /// While listening, the input is a question: a match returns its stored
    /// response, a miss switches the session into teach mode. In teach mode
    /// the input is taken as the answer to the pending question.
    pub fn process_input(&mut self, input: &str) -> Result<Reply, StorageError> {
        if let SessionMode::AwaitingAnswer { question } = self.mode.clone() {
            self.mode = SessionMode::Listening;
            return match self.teach(&question, input)? {
                TeachOutcome::Learned => Ok(Reply::Learned),
                TeachOutcome::Declined => Ok(Reply::Declined),
            };
        }

        Ok(self.answer_question(input))
    }

    /// Teach the bot: append a question/answer record and persist the base.
    ///
    /// An empty answer or the skip keyword declines without touching the
    /// store or the file. A persistence failure is fatal to the operation
    /// and surfaces to the caller.
    pub fn teach(&mut self, question: &str, answer: &str) -> Result<TeachOutcome, StorageError> {
        if answer.is_empty() || answer.eq_ignore_ascii_case(SKIP_KEYWORD) {
            debug!(question, "teach declined");
            return Ok(TeachOutcome::Declined);
        }

        let record = Record::new(question)
            .with_response(answer)
            .with_source(RecordSource::Taught);
        self.base.add_record(record);
        save_knowledge_base(&self.storage_path, &self.base)?;

        info!(question, records = self.base.record_count(), "learned a new response");
        Ok(TeachOutcome::Learned)
    }

    fn answer_question(&mut self, input: &str) -> Reply {
        match self.matcher.find_best_match(input, &self.base) {
            Some(found) => Reply::Answer {
                text: found.response().to_string(),
            },
            None => {
                self.mode = SessionMode::AwaitingAnswer {
                    question: input.to_string(),
                };
                Reply::TeachPrompt
            }
        }
    }
}
