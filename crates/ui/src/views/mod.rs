mod identity_form;
mod quiz;
mod result;
mod rules;
mod shell;
mod welcome;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use identity_form::IdentityFormView;
pub use quiz::QuizView;
pub use result::ResultView;
pub use rules::RulesView;
pub use shell::QuizShell;
pub use welcome::WelcomeView;
