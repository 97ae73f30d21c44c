#![forbid(unsafe_code)]

pub mod app_services;
pub mod config;
pub mod delivery;
pub mod error;
pub mod presenter;
pub mod reporter;
pub mod sessions;
pub mod timer;

pub use quiz_core::Clock;

pub use app_services::AppServices;
pub use config::QuizConfig;
pub use delivery::{DeliveryConfig, DeliveryPayload, EmailJsDelivery, LogDelivery, ResultDelivery};
pub use error::{AppServicesError, ConfigError, DeliveryError, QuizError};
pub use presenter::{PresenterEvent, QuestionView, QuizPresenter, RecordingPresenter};
pub use reporter::ResultReporter;
pub use sessions::{QuizCommand, QuizController, QuizHandle, QuizRuntime};
pub use timer::{QuestionTimer, TimerEvent, TimerEventKind};
