use chrono::{DateTime, Utc};
use std::fmt::Write as _;

use crate::model::{AnsweredQuestion, SKIPPED, SessionQuestion};

const ENTRY_SEPARATOR: &str = "\n-----------------------------\n";

/// One scored line of the final report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    ordinal: u32,
    question: String,
    selected: String,
    correct: String,
    is_correct: bool,
}

impl ReportEntry {
    #[must_use]
    pub fn ordinal(&self) -> u32 {
        self.ordinal
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    /// The chosen option, or `Skipped`.
    #[must_use]
    pub fn selected(&self) -> &str {
        &self.selected
    }

    #[must_use]
    pub fn correct(&self) -> &str {
        &self.correct
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.is_correct
    }

    #[must_use]
    pub fn is_skipped(&self) -> bool {
        self.selected == SKIPPED
    }
}

/// Scored summary of a finished session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizReport {
    entries: Vec<ReportEntry>,
    correct_count: u32,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizReport {
    /// Score every reached question against the recorded answers.
    ///
    /// A reached question with no answer entry is reported as skipped.
    #[must_use]
    pub fn build(
        reached: &[SessionQuestion],
        answers: &[AnsweredQuestion],
        started_at: DateTime<Utc>,
        completed_at: Option<DateTime<Utc>>,
    ) -> Self {
        let entries: Vec<ReportEntry> = reached
            .iter()
            .map(|sq| {
                let question = sq.question();
                let selected = answers
                    .iter()
                    .find(|a| a.question_id() == question.id())
                    .map_or(SKIPPED, AnsweredQuestion::selected_label)
                    .to_string();
                let is_correct = selected == question.answer();
                ReportEntry {
                    ordinal: sq.ordinal(),
                    question: question.text().to_string(),
                    selected,
                    correct: question.answer().to_string(),
                    is_correct,
                }
            })
            .collect();
        let correct_count = entries
            .iter()
            .filter(|e| e.is_correct)
            .fold(0_u32, |acc, _| acc.saturating_add(1));

        Self {
            entries,
            correct_count,
            started_at,
            completed_at,
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    #[must_use]
    pub fn total_count(&self) -> u32 {
        u32::try_from(self.entries.len()).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_skipped()).count()
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Whole-number percentage of correct answers; 0 for an empty report.
    #[must_use]
    pub fn score_percent(&self) -> u32 {
        let total = self.total_count();
        if total == 0 {
            return 0;
        }
        self.correct_count.saturating_mul(100) / total
    }

    /// Per-question breakdown, one block per question.
    #[must_use]
    pub fn answers_text(&self) -> String {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| {
                format!(
                    "Q{}: {}\nSelected: {}\nCorrect: {}\n",
                    i + 1,
                    e.question,
                    e.selected,
                    e.correct
                )
            })
            .collect::<Vec<_>>()
            .join(ENTRY_SEPARATOR)
    }

    /// Breakdown followed by the score line, as sent to the report recipient.
    #[must_use]
    pub fn formatted(&self) -> String {
        let mut text = self.answers_text();
        let _ = write!(
            text,
            "\n\nTotal Correct Answers: {} / {}",
            self.correct_count,
            self.total_count()
        );
        text
    }
}
