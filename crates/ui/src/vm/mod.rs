mod identity_vm;
mod quiz_vm;

pub use identity_vm::{FormField, IdentityFormVm};
pub use quiz_vm::{QuestionVm, QuizScreen, ResultRowVm, ResultVm, SignalPresenter, Stage};
