use async_trait::async_trait;
use quiz_core::model::Question;
use std::path::{Path, PathBuf};

use crate::repository::{QuestionRecord, QuestionRepository, StorageError, records_into_questions};

const BUNDLED_QUESTIONS: &str = include_str!("../../data/questions.json");

/// Parse a JSON array of question records and validate every entry.
///
/// # Errors
///
/// Returns `StorageError::Serialization` for malformed JSON and
/// `StorageError::InvalidQuestion` / `DuplicateId` for bad entries.
pub fn parse_questions(json: &str) -> Result<Vec<Question>, StorageError> {
    let records: Vec<QuestionRecord> =
        serde_json::from_str(json).map_err(|e| StorageError::Serialization(e.to_string()))?;
    records_into_questions(records)
}

/// Serialize questions back into the file format.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if encoding fails.
pub fn to_json(questions: &[Question]) -> Result<String, StorageError> {
    let records: Vec<QuestionRecord> = questions.iter().map(QuestionRecord::from_question).collect();
    serde_json::to_string_pretty(&records).map_err(|e| StorageError::Serialization(e.to_string()))
}

/// Questions read from a JSON file on every `list_questions` call.
#[derive(Debug, Clone)]
pub struct JsonQuestionFile {
    path: PathBuf,
}

impl JsonQuestionFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl QuestionRepository for JsonQuestionFile {
    async fn list_questions(&self) -> Result<Vec<Question>, StorageError> {
        let raw = tokio::fs::read_to_string(&self.path).await?;
        parse_questions(&raw)
    }
}

/// The default question set shipped inside the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledQuestions;

#[async_trait]
impl QuestionRepository for BundledQuestions {
    async fn list_questions(&self) -> Result<Vec<Question>, StorageError> {
        parse_questions(BUNDLED_QUESTIONS)
    }
}
