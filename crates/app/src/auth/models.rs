//! Auth data models.

use std::fmt;

use jiff::Timestamp;
use validator::{Validate, ValidateEmail, ValidateLength, ValidationError};
use zeroize::Zeroizing;

use crate::{
    domain::users::records::{UserRecord, UserUuid},
    validation::{first_failure, not_blank},
};

/// Shortest accepted password, in characters.
pub const MIN_PASSWORD_CHARS: u64 = 6;

const REGISTRATION_RULES: &[(&str, &str)] = &[
    ("name", "Name is required"),
    ("email", "A valid email is required"),
    ("password", "Password must be at least 6 characters"),
];

/// The caller resolved from a bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user: UserUuid,
    pub is_admin: bool,
}

/// A signed token together with the user it was issued for.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub expires_at: Timestamp,
    pub user: UserRecord,
}

/// Sign-up details.
#[derive(Clone, Validate)]
pub struct Registration {
    #[validate(custom(function = not_blank))]
    pub name: String,
    #[validate(custom(function = email_address))]
    pub email: String,
    #[validate(custom(function = long_enough))]
    pub password: Zeroizing<String>,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"**redacted**")
            .finish()
    }
}

impl Registration {
    /// Check the registration is acceptable, returning a client-facing reason when not.
    ///
    /// # Errors
    ///
    /// Returns the first rule that fails.
    pub fn check(&self) -> Result<(), &'static str> {
        self.validate().map_err(|errors| first_failure(&errors, REGISTRATION_RULES))
    }
}

fn email_address(email: &str) -> Result<(), ValidationError> {
    if email.trim().validate_email() {
        Ok(())
    } else {
        Err(ValidationError::new("email"))
    }
}

fn long_enough(password: &str) -> Result<(), ValidationError> {
    if password.validate_length(Some(MIN_PASSWORD_CHARS), None, None) {
        Ok(())
    } else {
        Err(ValidationError::new("length"))
    }
}

/// Login details.
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: Zeroizing<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"**redacted**")
            .finish()
    }
}

/// Emails are stored and compared lower-cased with surrounding whitespace removed.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
