//! User data model.
//!
//! A [`User`] is created through the user service, which applies
//! [`User::set_defaults`], [`User::sanitize`] and [`User::validate`] in that
//! order before handing the record to persistence. Email is the natural key.

use std::fmt;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Separator splitting an email into local part and domain.
const EMAIL_SEPARATOR: char = '@';

/// Sub-second digits kept on timestamps; relational stores hold microseconds.
const TIMESTAMP_PRECISION: u16 = 6;

/// Validation errors returned by [`User::validate`] and [`validate_email`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// The email does not split into exactly two non-empty parts.
    InvalidEmail,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEmail => write!(f, "invalid email address provided"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Registered individual.
///
/// String fields are always serialised; an absent value reads back as an
/// empty string. Timestamps are omitted until [`User::set_defaults`] runs.
///
/// ## Invariants
/// - After creation `created_at` and `updated_at` are both set.
/// - A non-empty `email` contains exactly one `@` with text on both sides.
///
/// # Examples
/// ```
/// use app_template::domain::User;
///
/// let mut user = User {
///     email: "  ada@example.com ".into(),
///     ..User::default()
/// };
/// user.sanitize();
/// assert_eq!(user.email, "ada@example.com");
/// assert!(user.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    #[schema(example = "Ada")]
    pub first_name: String,
    #[schema(example = "Lovelace")]
    pub last_name: String,
    #[schema(example = "+44 20 7946 0000")]
    pub mobile: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    /// Fill unset timestamps with `now`. Already-set values are kept.
    ///
    /// Both timestamps are truncated to microseconds so the record reads back
    /// unchanged from storage.
    pub fn set_defaults(&mut self, now: DateTime<Utc>) {
        for stamp in [&mut self.created_at, &mut self.updated_at] {
            let value = stamp.unwrap_or(now);
            *stamp = Some(value.trunc_subsecs(TIMESTAMP_PRECISION));
        }
    }

    /// Trim surrounding whitespace from every string field.
    pub fn sanitize(&mut self) {
        for field in [
            &mut self.first_name,
            &mut self.last_name,
            &mut self.mobile,
            &mut self.email,
        ] {
            let trimmed = field.trim();
            if trimmed.len() != field.len() {
                *field = trimmed.to_owned();
            }
        }
    }

    /// Check the email shape. An empty email is accepted.
    pub fn validate(&self) -> Result<(), UserValidationError> {
        if self.email.is_empty() {
            return Ok(());
        }
        validate_email(&self.email)
    }
}

/// Minimal "looks like an email" check: exactly one `@` with non-empty text
/// on both sides. This is not RFC 5322 validation.
///
/// # Examples
/// ```
/// use app_template::domain::validate_email;
///
/// assert!(validate_email("a@b.com").is_ok());
/// assert!(validate_email("a@b@c").is_err());
/// assert!(validate_email("").is_err());
/// ```
pub fn validate_email(email: &str) -> Result<(), UserValidationError> {
    let mut parts = email.split(EMAIL_SEPARATOR);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(UserValidationError::InvalidEmail),
    }
}

#[cfg(test)]
mod tests;
