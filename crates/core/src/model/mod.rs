mod answer;
mod identity;
mod ids;
mod question;
mod report;
mod session;

pub use answer::{AnsweredQuestion, SKIPPED};
pub use identity::{
    Identity, IdentityDraft, IdentityError, IdentityErrors, check_email, check_name, check_phone,
};
pub use ids::QuestionId;
pub use question::{Question, QuestionDraft, QuestionError, SessionQuestion};
pub use report::{QuizReport, ReportEntry};
pub use session::{AdvanceOutcome, SessionPhase, SessionState, SessionStateError};
