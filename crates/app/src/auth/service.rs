//! Auth service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use mockall::automock;
use tokio::{sync::OnceCell, task};
use tracing::info;
use zeroize::Zeroizing;

use crate::{
    auth::{
        AuthServiceError, Credentials, Identity, Registration, Session, TokenSigner,
        hash_password, normalize_email, verify_password,
    },
    domain::users::{
        UsersService,
        data::NewUser,
        records::{UserProfile, UserRecord, UserUuid},
    },
};

/// Password and JWT backed authentication over the users service.
#[derive(Clone)]
pub struct JwtAuthService {
    users: Arc<dyn UsersService>,
    tokens: TokenSigner,
    admin_key: Zeroizing<String>,
    decoy_hash: Arc<OnceCell<String>>,
}

impl fmt::Debug for JwtAuthService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtAuthService")
            .field("tokens", &self.tokens)
            .field("admin_key", &"**redacted**")
            .finish_non_exhaustive()
    }
}

impl JwtAuthService {
    #[must_use]
    pub fn new(
        users: Arc<dyn UsersService>,
        tokens: TokenSigner,
        admin_key: Zeroizing<String>,
    ) -> Self {
        Self {
            users,
            tokens,
            admin_key,
            decoy_hash: Arc::new(OnceCell::new()),
        }
    }

    /// Verified against for unknown emails so both login failures cost one argon2 check.
    async fn decoy_hash(&self) -> Result<String, AuthServiceError> {
        let hash = self
            .decoy_hash
            .get_or_try_init(|| async {
                let hashed = task::spawn_blocking(|| hash_password("decoy-password")).await?;

                Ok::<_, AuthServiceError>(hashed?)
            })
            .await?;

        Ok(hash.clone())
    }

    async fn create_account(
        &self,
        registration: Registration,
        is_admin: bool,
    ) -> Result<Session, AuthServiceError> {
        registration
            .check()
            .map_err(AuthServiceError::InvalidInput)?;

        let email = normalize_email(&registration.email);

        if self.users.find_user_by_email(&email).await?.is_some() {
            return Err(AuthServiceError::EmailTaken);
        }

        let password = registration.password;
        let password_hash = task::spawn_blocking(move || hash_password(&password)).await??;

        let user = self
            .users
            .create_user(NewUser {
                uuid: UserUuid::new(),
                name: registration.name.trim().to_string(),
                email,
                password_hash,
                is_admin,
            })
            .await?;

        info!(user = %user.uuid, is_admin, "registered user");

        self.session_for(user)
    }

    fn session_for(&self, user: UserRecord) -> Result<Session, AuthServiceError> {
        let issued = self
            .tokens
            .issue(user.uuid, user.is_admin)
            .map_err(AuthServiceError::Issue)?;

        Ok(Session {
            token: issued.token,
            expires_at: issued.expires_at,
            user,
        })
    }
}

#[async_trait]
impl AuthService for JwtAuthService {
    async fn register(&self, registration: Registration) -> Result<Session, AuthServiceError> {
        self.create_account(registration, false).await
    }

    async fn register_admin(
        &self,
        registration: Registration,
        admin_key: &str,
    ) -> Result<Session, AuthServiceError> {
        if !keys_match(admin_key.as_bytes(), self.admin_key.as_bytes()) {
            return Err(AuthServiceError::InvalidAdminKey);
        }

        self.create_account(registration, true).await
    }

    async fn login(&self, credentials: Credentials) -> Result<Session, AuthServiceError> {
        let email = normalize_email(&credentials.email);

        let user = self.users.find_user_by_email(&email).await?;

        let stored = match &user {
            Some(user) => user.password_hash.clone(),
            None => self.decoy_hash().await?,
        };

        let password = credentials.password;
        let valid = task::spawn_blocking(move || verify_password(&password, &stored)).await??;

        match user {
            Some(user) if valid => self.session_for(user),
            _ => Err(AuthServiceError::InvalidCredentials),
        }
    }

    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Identity, AuthServiceError> {
        let claims = self
            .tokens
            .verify(bearer_token)
            .map_err(AuthServiceError::InvalidToken)?;

        // The admin claim may be stale; the stored flag is authoritative.
        let user = self.users.get_user(UserUuid::from_uuid(claims.sub)).await?;

        Ok(Identity {
            user: user.uuid,
            is_admin: user.is_admin,
        })
    }

    async fn profile(&self, user: UserUuid) -> Result<UserProfile, AuthServiceError> {
        Ok(self.users.get_profile(user).await?)
    }
}

/// Length-independent comparison of two secrets.
fn keys_match(given: &[u8], expected: &[u8]) -> bool {
    if expected.is_empty() || given.len() != expected.len() {
        return false;
    }

    given
        .iter()
        .zip(expected)
        .fold(0_u8, |diff, (a, b)| diff | (a ^ b))
        == 0
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create a regular account and sign the caller in.
    async fn register(&self, registration: Registration) -> Result<Session, AuthServiceError>;

    /// Create an admin account when the shared registration key matches.
    async fn register_admin(
        &self,
        registration: Registration,
        admin_key: &str,
    ) -> Result<Session, AuthServiceError>;

    /// Exchange an email and password for a session.
    async fn login(&self, credentials: Credentials) -> Result<Session, AuthServiceError>;

    /// Resolve a bearer token to the current identity of its user.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Identity, AuthServiceError>;

    /// The user's account and the products they sell.
    async fn profile(&self, user: UserUuid) -> Result<UserProfile, AuthServiceError>;
}
