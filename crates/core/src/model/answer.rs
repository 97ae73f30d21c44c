use crate::model::ids::QuestionId;
use crate::model::question::Question;

/// Label reported for a question that was reached but never answered.
pub const SKIPPED: &str = "Skipped";

/// The user's latest selection for one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnsweredQuestion {
    question_id: QuestionId,
    question_text: String,
    selected: Option<String>,
    correct: String,
}

impl AnsweredQuestion {
    #[must_use]
    pub fn selected(question: &Question, option: impl Into<String>) -> Self {
        Self {
            question_id: question.id(),
            question_text: question.text().to_string(),
            selected: Some(option.into()),
            correct: question.answer().to_string(),
        }
    }

    #[must_use]
    pub fn skipped(question: &Question) -> Self {
        Self {
            question_id: question.id(),
            question_text: question.text().to_string(),
            selected: None,
            correct: question.answer().to_string(),
        }
    }

    pub(crate) fn reselect(&mut self, option: impl Into<String>) {
        self.selected = Some(option.into());
    }

    #[must_use]
    pub fn question_id(&self) -> QuestionId {
        self.question_id
    }

    #[must_use]
    pub fn question_text(&self) -> &str {
        &self.question_text
    }

    /// The recorded option, `None` when the question was skipped.
    #[must_use]
    pub fn selected_option(&self) -> Option<&str> {
        self.selected
            .as_deref()
            .filter(|option| !option.trim().is_empty())
    }

    /// The recorded option or [`SKIPPED`].
    #[must_use]
    pub fn selected_label(&self) -> &str {
        self.selected_option().unwrap_or(SKIPPED)
    }

    #[must_use]
    pub fn correct_option(&self) -> &str {
        &self.correct
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.selected_label() == self.correct
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuestionDraft;

    fn question() -> Question {
        QuestionDraft::new("Pick B", ["A", "B"], "B")
            .validate(QuestionId::new(1))
            .unwrap()
    }

    #[test]
    fn reselect_overwrites_the_choice() {
        let mut answer = AnsweredQuestion::selected(&question(), "A");
        assert!(!answer.is_correct());
        answer.reselect("B");
        assert_eq!(answer.selected_label(), "B");
        assert!(answer.is_correct());
    }

    #[test]
    fn skipped_is_never_correct() {
        let answer = AnsweredQuestion::skipped(&question());
        assert_eq!(answer.selected_label(), SKIPPED);
        assert!(!answer.is_correct());
    }

    #[test]
    fn blank_selection_reads_as_skipped() {
        let answer = AnsweredQuestion::selected(&question(), "  ");
        assert_eq!(answer.selected_option(), None);
        assert_eq!(answer.selected_label(), SKIPPED);
    }
}
