use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use thiserror::Error;

use crate::model::ids::QuestionId;

//
// ─── QUESTION TYPES ────────────────────────────────────────────────────────────
//

/// Unvalidated question as it comes from a question file or a test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub text: String,
    pub options: Vec<String>,
    pub answer: String,
}

/// A validated multiple-choice question from the bank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    text: String,
    options: Vec<String>,
    answer: String,
}

/// A question as it appears in one session, numbered by its shuffled position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionQuestion {
    ordinal: u32,
    question: Question,
}

//
// ─── QUESTION VALIDATION ERRORS ────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyText,

    #[error("a question needs at least 2 options, got {count}")]
    TooFewOptions { count: usize },

    #[error("option {index} is empty")]
    EmptyOption { index: usize },

    #[error("option {option:?} appears more than once")]
    DuplicateOption { option: String },

    #[error("answer {answer:?} is not one of the options")]
    AnswerNotAnOption { answer: String },
}

//
// ─── QUESTION DRAFT IMPL ───────────────────────────────────────────────────────
//

impl QuestionDraft {
    pub fn new(
        text: impl Into<String>,
        options: impl IntoIterator<Item = impl Into<String>>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            options: options.into_iter().map(Into::into).collect(),
            answer: answer.into(),
        }
    }

    /// Validate the draft and bind it to a bank id.
    ///
    /// Text, options and answer are trimmed before checking.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when the text is blank, there are fewer than two
    /// options, an option is blank or repeated, or the answer is not an option.
    pub fn validate(self, id: QuestionId) -> Result<Question, QuestionError> {
        let text = self.text.trim().to_string();
        if text.is_empty() {
            return Err(QuestionError::EmptyText);
        }

        if self.options.len() < 2 {
            return Err(QuestionError::TooFewOptions {
                count: self.options.len(),
            });
        }

        let mut seen = HashSet::with_capacity(self.options.len());
        let mut options = Vec::with_capacity(self.options.len());
        for (index, raw) in self.options.into_iter().enumerate() {
            let option = raw.trim().to_string();
            if option.is_empty() {
                return Err(QuestionError::EmptyOption { index });
            }
            if !seen.insert(option.clone()) {
                return Err(QuestionError::DuplicateOption { option });
            }
            options.push(option);
        }

        let answer = self.answer.trim().to_string();
        if !seen.contains(&answer) {
            return Err(QuestionError::AnswerNotAnOption { answer });
        }

        Ok(Question {
            id,
            text,
            options,
            answer,
        })
    }
}

//
// ─── QUESTION IMPL ─────────────────────────────────────────────────────────────
//

impl Question {
    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Options in bank order.
    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }

    #[must_use]
    pub fn is_correct(&self, option: &str) -> bool {
        self.answer == option
    }

    /// Options in a fresh random order, for a single presentation.
    #[must_use]
    pub fn shuffled_options(&self) -> Vec<String> {
        self.shuffled_options_with(&mut rand::rng())
    }

    pub fn shuffled_options_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<String> {
        let mut options = self.options.clone();
        options.shuffle(rng);
        options
    }
}

impl SessionQuestion {
    /// Number a question for display. `ordinal` is 1-based.
    #[must_use]
    pub fn new(ordinal: u32, question: Question) -> Self {
        Self { ordinal, question }
    }

    #[must_use]
    pub fn ordinal(&self) -> u32 {
        self.ordinal
    }

    #[must_use]
    pub fn question(&self) -> &Question {
        &self.question
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.question.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.question.text
    }

    /// Display label, e.g. `3. What is ownership?`
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}. {}", self.ordinal, self.question.text)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
