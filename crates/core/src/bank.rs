use rand::Rng;
use rand::seq::SliceRandom;

use crate::model::{Question, SessionQuestion};

/// Read-only set of questions loaded once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// A uniformly random permutation of the bank. The bank itself is untouched.
    pub fn shuffle_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Question> {
        let mut ordering = self.questions.clone();
        ordering.shuffle(rng);
        ordering
    }

    /// Shuffle and number the questions for a new session.
    pub fn draw_session_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<SessionQuestion> {
        number_questions(self.shuffle_with(rng))
    }
}

/// Assign ordinals 1..=N in the given order.
#[must_use]
pub fn number_questions(ordering: Vec<Question>) -> Vec<SessionQuestion> {
    ordering
        .into_iter()
        .zip(1_u32..)
        .map(|(question, ordinal)| SessionQuestion::new(ordinal, question))
        .collect()
}
