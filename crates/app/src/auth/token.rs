//! Session tokens.

use std::fmt;

use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::users::records::UserUuid;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token could not be encoded or decoded")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("token lifetime overflows the clock")]
    Lifetime(#[from] jiff::Error),
}

/// Claims carried by a session token.
///
/// `admin` reflects the user at issue time only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub admin: bool,
    pub iat: i64,
    pub exp: i64,
}

/// A freshly signed token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: Timestamp,
}

/// Signs and verifies HS256 session tokens.
#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: SignedDuration,
}

impl fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSigner")
            .field("secret", &"**redacted**")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenSigner {
    #[must_use]
    pub fn new(secret: &[u8], ttl: SignedDuration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    /// Sign a token for the given user.
    ///
    /// # Errors
    ///
    /// Returns an error when the expiry cannot be computed or signing fails.
    pub fn issue(&self, user: UserUuid, admin: bool) -> Result<IssuedToken, TokenError> {
        self.issue_at(user, admin, Timestamp::now())
    }

    fn issue_at(
        &self,
        user: UserUuid,
        admin: bool,
        now: Timestamp,
    ) -> Result<IssuedToken, TokenError> {
        let expires_at = now.checked_add(self.ttl)?;

        let claims = Claims {
            sub: user.into_uuid(),
            admin,
            iat: now.as_second(),
            exp: expires_at.as_second(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Verify signature and expiry, returning the claims.
    ///
    /// # Errors
    ///
    /// Returns an error when the token is malformed, forged, or expired.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)?;

        Ok(data.claims)
    }
}
