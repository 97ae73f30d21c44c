mod controller;
mod runtime;

// Public API of the quiz session subsystem.
pub use crate::error::QuizError;
pub use controller::QuizController;
pub use runtime::{QuizCommand, QuizHandle, QuizRuntime};
