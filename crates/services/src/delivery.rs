use async_trait::async_trait;
use log::info;
use reqwest::Client;
use serde::Serialize;

use quiz_core::model::{Identity, QuizReport};

use crate::error::DeliveryError;

pub const DEFAULT_EMAILJS_URL: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// Everything the recipient of a finished quiz needs to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryPayload {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub answers: String,
    pub correct_count: u32,
    pub total_count: u32,
}

impl DeliveryPayload {
    #[must_use]
    pub fn new(identity: &Identity, report: &QuizReport) -> Self {
        Self {
            name: identity.name().to_string(),
            email: identity.email().to_string(),
            phone: identity.phone().to_string(),
            answers: report.formatted(),
            correct_count: report.correct_count(),
            total_count: report.total_count(),
        }
    }
}

/// Sends a finished quiz somewhere outside the app.
#[async_trait]
pub trait ResultDelivery: Send + Sync {
    /// Deliver one payload.
    ///
    /// # Errors
    ///
    /// Returns `DeliveryError` when the payload could not be handed off.
    async fn deliver(&self, payload: &DeliveryPayload) -> Result<(), DeliveryError>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeliveryConfig {
    pub endpoint: String,
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

impl DeliveryConfig {
    /// All three `QUIZ_EMAILJS_*` ids must be set and non-blank.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let required = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let service_id = required("QUIZ_EMAILJS_SERVICE_ID")?;
        let template_id = required("QUIZ_EMAILJS_TEMPLATE_ID")?;
        let public_key = required("QUIZ_EMAILJS_PUBLIC_KEY")?;
        let endpoint = required("QUIZ_EMAILJS_URL").unwrap_or_else(|| DEFAULT_EMAILJS_URL.into());
        Some(Self {
            endpoint,
            service_id,
            template_id,
            public_key,
        })
    }
}

/// Posts results to the `EmailJS` REST endpoint.
#[derive(Clone)]
pub struct EmailJsDelivery {
    client: Client,
    config: DeliveryConfig,
}

impl EmailJsDelivery {
    #[must_use]
    pub fn new(config: DeliveryConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &DeliveryConfig {
        &self.config
    }

    fn request<'a>(&'a self, payload: &'a DeliveryPayload) -> EmailJsRequest<'a> {
        EmailJsRequest {
            service_id: &self.config.service_id,
            template_id: &self.config.template_id,
            user_id: &self.config.public_key,
            template_params: TemplateParams {
                user_name: &payload.name,
                user_email: &payload.email,
                user_phone: &payload.phone,
                user_answers: &payload.answers,
                correct_count: payload.correct_count,
                total_count: payload.total_count,
            },
        }
    }
}

#[async_trait]
impl ResultDelivery for EmailJsDelivery {
    async fn deliver(&self, payload: &DeliveryPayload) -> Result<(), DeliveryError> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&self.request(payload))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DeliveryError::HttpStatus(response.status()));
        }
        Ok(())
    }
}

/// Fallback used when no mail service is configured: writes the report to the log.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogDelivery;

#[async_trait]
impl ResultDelivery for LogDelivery {
    async fn deliver(&self, payload: &DeliveryPayload) -> Result<(), DeliveryError> {
        info!(
            "quiz finished by {} <{}>, {} / {} correct\n{}",
            payload.name, payload.email, payload.correct_count, payload.total_count, payload.answers
        );
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct EmailJsRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: TemplateParams<'a>,
}

#[derive(Debug, Serialize)]
struct TemplateParams<'a> {
    user_name: &'a str,
    user_email: &'a str,
    user_phone: &'a str,
    user_answers: &'a str,
    correct_count: u32,
    total_count: u32,
}
