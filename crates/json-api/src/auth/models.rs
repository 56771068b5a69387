//! Auth request and response bodies.

use std::fmt;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zeroize::Zeroizing;

use bazaar_app::{
    auth::{Credentials, Registration, Session},
    domain::users::records::{UserProfile, UserRecord},
};

/// Sign-up request
#[derive(Deserialize, ToSchema)]
pub(crate) struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl From<RegisterRequest> for Registration {
    fn from(request: RegisterRequest) -> Self {
        Registration {
            name: request.name,
            email: request.email,
            password: Zeroizing::new(request.password),
        }
    }
}

/// Admin sign-up request, gated by the shared registration key
#[derive(Deserialize, ToSchema)]
pub(crate) struct RegisterAdminRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub admin_key: String,
}

impl fmt::Debug for RegisterAdminRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterAdminRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl RegisterAdminRequest {
    pub(crate) fn into_parts(self) -> (Registration, Zeroizing<String>) {
        (
            Registration {
                name: self.name,
                email: self.email,
                password: Zeroizing::new(self.password),
            },
            Zeroizing::new(self.admin_key),
        )
    }
}

/// Login request
#[derive(Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl From<LoginRequest> for Credentials {
    fn from(request: LoginRequest) -> Self {
        Credentials {
            email: request.email,
            password: Zeroizing::new(request.password),
        }
    }
}

/// Public view of an account
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    pub uuid: Uuid,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
    pub created_at: String,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        UserResponse {
            uuid: user.uuid.into(),
            name: user.name,
            email: user.email,
            is_admin: user.is_admin,
            created_at: user.created_at.to_string(),
        }
    }
}

/// Issued access token and the account it belongs to
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SessionResponse {
    /// Bearer token for the `Authorization` header
    pub token: String,

    /// When the token stops being accepted
    pub expires_at: String,

    pub user: UserResponse,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        SessionResponse {
            token: session.token,
            expires_at: session.expires_at.to_string(),
            user: session.user.into(),
        }
    }
}

/// Account details together with the caller's listings
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProfileResponse {
    pub user: UserResponse,

    /// Products the user sells, newest first
    pub products: Vec<Uuid>,
}

impl From<UserProfile> for ProfileResponse {
    fn from(profile: UserProfile) -> Self {
        ProfileResponse {
            user: profile.user.into(),
            products: profile.products.into_iter().map(Into::into).collect(),
        }
    }
}

/// Token verification result
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VerifyResponse {
    pub valid: bool,
    pub user: Uuid,
    pub is_admin: bool,
}
