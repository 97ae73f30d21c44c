use std::env;
use std::path::PathBuf;

use quiz_core::timer::TimerSettings;

use crate::delivery::DeliveryConfig;
use crate::error::ConfigError;

pub const QUESTIONS_PATH_VAR: &str = "QUIZ_QUESTIONS_PATH";
pub const SECONDS_VAR: &str = "QUIZ_SECONDS_PER_QUESTION";

/// Runtime settings gathered from the environment.
#[derive(Clone, Debug, Default)]
pub struct QuizConfig {
    pub questions_path: Option<PathBuf>,
    pub timer: TimerSettings,
    pub delivery: Option<DeliveryConfig>,
}

impl QuizConfig {
    /// Read settings from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a numeric variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through `lookup`, which maps a variable name to its value.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a numeric variable cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let questions_path = lookup(QUESTIONS_PATH_VAR)
            .filter(|raw| !raw.trim().is_empty())
            .map(PathBuf::from);

        let mut timer = TimerSettings::default();
        if let Some(raw) = lookup(SECONDS_VAR) {
            timer = timer.with_seconds_per_question(parse_seconds(SECONDS_VAR, &raw)?);
        }

        Ok(Self {
            questions_path,
            timer,
            delivery: DeliveryConfig::from_lookup(&lookup),
        })
    }

    #[must_use]
    pub fn with_questions_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.questions_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_seconds_per_question(mut self, seconds: u32) -> Self {
        self.timer = self.timer.with_seconds_per_question(seconds);
        self
    }
}

/// Parse a per-question time limit; zero is rejected.
///
/// # Errors
///
/// Returns `ConfigError::InvalidSeconds` for anything but a positive integer.
pub fn parse_seconds(var: &'static str, raw: &str) -> Result<u32, ConfigError> {
    match raw.trim().parse::<u32>() {
        Ok(seconds) if seconds > 0 => Ok(seconds),
        _ => Err(ConfigError::InvalidSeconds {
            var,
            raw: raw.to_string(),
        }),
    }
}
