use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

const MIN_NAME_CHARS: usize = 3;
const PHONE_DIGITS: usize = 10;

/// Raw contact details as typed into the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Validated contact details of the quiz taker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    name: String,
    email: String,
    phone: String,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum IdentityError {
    #[error("Name is required")]
    NameMissing,
    #[error("Name must be at least 3 characters")]
    NameTooShort,
    #[error("Email is required")]
    EmailMissing,
    #[error("Enter a valid email address")]
    EmailInvalid,
    #[error("Phone number is required")]
    PhoneMissing,
    #[error("Enter a valid 10-digit phone number")]
    PhoneInvalid,
}

/// Every field error found in one validation pass.
#[derive(Debug, Error, Clone, Default, PartialEq, Eq)]
#[error("contact details are invalid")]
pub struct IdentityErrors {
    pub name: Option<IdentityError>,
    pub email: Option<IdentityError>,
    pub phone: Option<IdentityError>,
}

impl IdentityErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none()
    }
}

impl IdentityDraft {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    /// Trim and validate all three fields.
    ///
    /// # Errors
    ///
    /// Returns `IdentityErrors` carrying one entry per failing field.
    pub fn validate(self) -> Result<Identity, IdentityErrors> {
        let name = self.name.trim().to_string();
        let email = self.email.trim().to_string();
        let phone = self.phone.trim().to_string();

        let errors = IdentityErrors {
            name: check_name(&name).err(),
            email: check_email(&email).err(),
            phone: check_phone(&phone).err(),
        };
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Identity { name, email, phone })
    }
}

/// # Errors
///
/// Returns `NameMissing` or `NameTooShort`.
pub fn check_name(name: &str) -> Result<(), IdentityError> {
    if name.is_empty() {
        return Err(IdentityError::NameMissing);
    }
    if name.chars().count() < MIN_NAME_CHARS {
        return Err(IdentityError::NameTooShort);
    }
    Ok(())
}

/// # Errors
///
/// Returns `EmailMissing` or `EmailInvalid`.
pub fn check_email(email: &str) -> Result<(), IdentityError> {
    if email.is_empty() {
        return Err(IdentityError::EmailMissing);
    }
    if !EMAIL_PATTERN.is_match(email) {
        return Err(IdentityError::EmailInvalid);
    }
    Ok(())
}

/// # Errors
///
/// Returns `PhoneMissing` or `PhoneInvalid`.
pub fn check_phone(phone: &str) -> Result<(), IdentityError> {
    if phone.is_empty() {
        return Err(IdentityError::PhoneMissing);
    }
    if phone.len() != PHONE_DIGITS || !phone.bytes().all(|b| b.is_ascii_digit()) {
        return Err(IdentityError::PhoneInvalid);
    }
    Ok(())
}

impl Identity {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }
}
