use async_trait::async_trait;
use quiz_core::model::{Question, QuestionDraft, QuestionError, QuestionId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::json::{BundledQuestions, JsonQuestionFile};

/// Errors surfaced by question sources.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("question {index} is invalid: {source}")]
    InvalidQuestion {
        index: usize,
        #[source]
        source: QuestionError,
    },

    #[error("question id {id} is used more than once")]
    DuplicateId { id: QuestionId },

    #[error("connection error: {0}")]
    Connection(String),
}

/// Stored shape of a question.
///
/// `id` is optional in question files; records without one take the lowest
/// ids no other record claims, in file order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
}

impl QuestionRecord {
    #[must_use]
    pub fn from_question(question: &Question) -> Self {
        Self {
            id: Some(question.id().value()),
            question: question.text().to_owned(),
            options: question.options().to_vec(),
            answer: question.answer().to_owned(),
        }
    }

    /// Convert the record into a validated `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the record does not describe a valid question.
    pub fn into_question(self, fallback_id: QuestionId) -> Result<Question, QuestionError> {
        let id = self.id.map_or(fallback_id, QuestionId::new);
        QuestionDraft::new(self.question, self.options, self.answer).validate(id)
    }
}

/// Convert records in order, reporting the first invalid one by position.
///
/// # Errors
///
/// Returns `StorageError::InvalidQuestion` for the first record that fails validation
/// and `StorageError::DuplicateId` when two records carry the same explicit id.
pub fn records_into_questions(records: Vec<QuestionRecord>) -> Result<Vec<Question>, StorageError> {
    let mut claimed = HashSet::with_capacity(records.len());
    for id in records.iter().filter_map(|r| r.id) {
        if !claimed.insert(id) {
            return Err(StorageError::DuplicateId {
                id: QuestionId::new(id),
            });
        }
    }

    let mut next_free = 1_u64;
    let mut questions = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        let id = match record.id {
            Some(id) => id,
            None => {
                while claimed.contains(&next_free) {
                    next_free = next_free.saturating_add(1);
                }
                claimed.insert(next_free);
                next_free
            }
        };
        let question = record
            .into_question(QuestionId::new(id))
            .map_err(|source| StorageError::InvalidQuestion { index, source })?;
        questions.push(question);
    }
    Ok(questions)
}

/// Read-only source of bank questions.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Load every question, in stored order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the source cannot be read or holds invalid questions.
    async fn list_questions(&self) -> Result<Vec<Question>, StorageError>;
}

/// Simple in-memory repository for tests and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    questions: Arc<Mutex<Vec<Question>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_questions(questions: Vec<Question>) -> Self {
        Self {
            questions: Arc::new(Mutex::new(questions)),
        }
    }
}

#[async_trait]
impl QuestionRepository for InMemoryRepository {
    async fn list_questions(&self) -> Result<Vec<Question>, StorageError> {
        let guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }
}

/// Question source behind a trait object so the binary can pick one at startup.
#[derive(Clone)]
pub struct Storage {
    pub questions: Arc<dyn QuestionRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            questions: Arc::new(InMemoryRepository::new()),
        }
    }

    #[must_use]
    pub fn json_file(path: impl Into<std::path::PathBuf>) -> Self {
        Self {
            questions: Arc::new(JsonQuestionFile::new(path)),
        }
    }

    /// The question set compiled into the binary.
    #[must_use]
    pub fn bundled() -> Self {
        Self {
            questions: Arc::new(BundledQuestions),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: u64, text: &str) -> Question {
        QuestionDraft::new(text, ["a", "b"], "a")
            .validate(QuestionId::new(id))
            .unwrap()
    }

    #[tokio::test]
    async fn in_memory_lists_questions_in_order() {
        let repo = InMemoryRepository::with_questions(vec![question(2, "second"), question(1, "first")]);
        let all = repo.list_questions().await.unwrap();
        let ids: Vec<_> = all.iter().map(Question::id).collect();
        assert_eq!(ids, vec![QuestionId::new(2), QuestionId::new(1)]);
    }

    #[test]
    fn record_without_id_uses_position() {
        let records = vec![
            QuestionRecord {
                id: None,
                question: "one".into(),
                options: vec!["x".into(), "y".into()],
                answer: "x".into(),
            },
            QuestionRecord {
                id: Some(77),
                question: "two".into(),
                options: vec!["x".into(), "y".into()],
                answer: "y".into(),
            },
        ];
        let questions = records_into_questions(records).unwrap();
        assert_eq!(questions[0].id(), QuestionId::new(1));
        assert_eq!(questions[1].id(), QuestionId::new(77));
    }

    fn record(id: Option<u64>, text: &str) -> QuestionRecord {
        QuestionRecord {
            id,
            question: text.into(),
            options: vec!["x".into(), "y".into()],
            answer: "x".into(),
        }
    }

    #[test]
    fn missing_ids_skip_explicit_ones() {
        let records = vec![
            record(None, "first"),
            record(Some(1), "second"),
            record(None, "third"),
            record(Some(3), "fourth"),
            record(None, "fifth"),
        ];
        let questions = records_into_questions(records).unwrap();
        let ids: Vec<_> = questions.iter().map(|q| q.id().value()).collect();
        assert_eq!(ids, vec![2, 1, 4, 3, 5]);
    }

    #[test]
    fn repeated_explicit_ids_are_rejected() {
        let records = vec![
            QuestionRecord::from_question(&question(2, "one")),
            record(None, "two"),
            record(Some(2), "three"),
        ];
        let err = records_into_questions(records).unwrap_err();
        assert!(matches!(err, StorageError::DuplicateId { id } if id == QuestionId::new(2)));
    }

    #[test]
    fn invalid_record_reports_its_index() {
        let records = vec![
            QuestionRecord::from_question(&question(1, "fine")),
            QuestionRecord {
                id: None,
                question: "broken".into(),
                options: vec!["x".into(), "y".into()],
                answer: "z".into(),
            },
        ];
        let err = records_into_questions(records).unwrap_err();
        assert!(matches!(
            err,
            StorageError::InvalidQuestion {
                index: 1,
                source: QuestionError::AnswerNotAnOption { .. }
            }
        ));
    }
}
