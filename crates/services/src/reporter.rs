use std::sync::Arc;

use log::{info, warn};
use tokio::task::JoinHandle;

use quiz_core::model::{Identity, QuizReport};

use crate::delivery::{DeliveryConfig, DeliveryPayload, EmailJsDelivery, LogDelivery, ResultDelivery};

/// Hands finished quizzes to a `ResultDelivery` without blocking the caller.
#[derive(Clone)]
pub struct ResultReporter {
    delivery: Arc<dyn ResultDelivery>,
}

impl ResultReporter {
    #[must_use]
    pub fn new(delivery: Arc<dyn ResultDelivery>) -> Self {
        Self { delivery }
    }

    /// `EmailJS` when configured, the log otherwise.
    #[must_use]
    pub fn from_config(config: Option<DeliveryConfig>) -> Self {
        match config {
            Some(config) => Self::new(Arc::new(EmailJsDelivery::new(config))),
            None => Self::log_only(),
        }
    }

    #[must_use]
    pub fn log_only() -> Self {
        Self::new(Arc::new(LogDelivery))
    }

    /// Send the report in the background.
    ///
    /// The outcome is only logged; it never changes what the quiz taker sees.
    /// Returns `None` when called outside a Tokio runtime.
    pub fn dispatch(&self, identity: &Identity, report: &QuizReport) -> Option<JoinHandle<()>> {
        let payload = DeliveryPayload::new(identity, report);
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("no async runtime, quiz results for {} were not sent", payload.email);
            return None;
        };
        let delivery = Arc::clone(&self.delivery);
        Some(runtime.spawn(async move {
            match delivery.deliver(&payload).await {
                Ok(()) => info!("quiz results sent for {}", payload.email),
                Err(err) => warn!("sending quiz results for {} failed: {err}", payload.email),
            }
        }))
    }
}
