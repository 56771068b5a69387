//! Auth service errors.

use argon2::password_hash;
use thiserror::Error;
use tokio::task::JoinError;

use crate::{auth::TokenError, domain::users::UsersServiceError};

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    #[error("user already exists")]
    EmailTaken,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("invalid admin registration key")]
    InvalidAdminKey,

    #[error("invalid token")]
    InvalidToken(#[source] TokenError),

    #[error("token issuance failed")]
    Issue(#[source] TokenError),

    #[error("user no longer exists")]
    UnknownUser,

    #[error("password hashing failed")]
    PasswordHash(#[source] password_hash::Error),

    #[error("blocking task failed")]
    Blocking(#[from] JoinError),

    #[error("users service error")]
    Users(#[source] UsersServiceError),
}

impl From<UsersServiceError> for AuthServiceError {
    fn from(error: UsersServiceError) -> Self {
        match error {
            UsersServiceError::AlreadyExists => Self::EmailTaken,
            UsersServiceError::NotFound => Self::UnknownUser,
            error => Self::Users(error),
        }
    }
}

impl From<password_hash::Error> for AuthServiceError {
    fn from(error: password_hash::Error) -> Self {
        Self::PasswordHash(error)
    }
}
