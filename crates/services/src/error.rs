//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::SessionStateError;
use storage::StorageError;

/// Errors emitted by the quiz controller and its command handle.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("the question bank is empty")]
    EmptyBank,
    #[error("no quiz is running")]
    NotStarted,
    #[error("the quiz runtime has stopped")]
    RuntimeClosed,
    #[error(transparent)]
    Session(#[from] SessionStateError),
}

/// Errors emitted by a `ResultDelivery`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DeliveryError {
    #[error("result delivery is not configured")]
    Disabled,
    #[error("result delivery failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted while reading configuration from the environment.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("{var} must be a positive whole number, got {raw:?}")]
    InvalidSeconds { var: &'static str, raw: String },
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error("no questions were loaded")]
    EmptyBank,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
