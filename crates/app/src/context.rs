//! App Context

use std::{fmt, path::PathBuf, sync::Arc, time::Duration};

use jiff::SignedDuration;
use sqlx::migrate::MigrateError;
use thiserror::Error;
use zeroize::Zeroizing;

use crate::{
    auth::{AuthService, JwtAuthService, TokenSigner},
    database::{self, Db},
    domain::{
        carts::{CartsService, PgCartsService},
        products::{PgProductsService, ProductsService},
        users::{PgUsersService, UsersService},
    },
    uploads::{ImageStoreError, LocalImageStore},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrate(#[source] MigrateError),

    #[error("failed to prepare upload directory")]
    Uploads(#[source] ImageStoreError),
}

/// Everything needed to wire the services together.
pub struct AppSettings {
    pub database_url: String,
    pub database_retry_delay: Duration,
    pub jwt_secret: Zeroizing<String>,
    pub jwt_ttl: SignedDuration,
    pub admin_registration_key: Zeroizing<String>,
    pub upload_dir: PathBuf,
}

impl fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppSettings")
            .field("database_url", &"**redacted**")
            .field("database_retry_delay", &self.database_retry_delay)
            .field("jwt_secret", &"**redacted**")
            .field("jwt_ttl", &self.jwt_ttl)
            .field("admin_registration_key", &"**redacted**")
            .field("upload_dir", &self.upload_dir)
            .finish()
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub users: Arc<dyn UsersService>,
    pub auth: Arc<dyn AuthService>,
    pub products: Arc<dyn ProductsService>,
    pub carts: Arc<dyn CartsService>,
}

impl fmt::Debug for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}

impl AppContext {
    /// Connect to the database, apply migrations, and build every service.
    ///
    /// # Errors
    ///
    /// Returns an error when the database is unreachable with a non-retryable error,
    /// migrations fail, or the upload directory cannot be created.
    pub async fn from_settings(settings: AppSettings) -> Result<Self, AppInitError> {
        let pool =
            database::connect_with_retry(&settings.database_url, settings.database_retry_delay)
                .await
                .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrate)?;

        let images = LocalImageStore::new(settings.upload_dir);

        images.ensure_root().await.map_err(AppInitError::Uploads)?;

        let db = Db::new(pool);
        let users: Arc<dyn UsersService> = Arc::new(PgUsersService::new(db.clone()));

        let tokens = TokenSigner::new(settings.jwt_secret.as_bytes(), settings.jwt_ttl);

        Ok(Self {
            auth: Arc::new(JwtAuthService::new(
                Arc::clone(&users),
                tokens,
                settings.admin_registration_key,
            )),
            products: Arc::new(PgProductsService::new(db.clone(), Arc::new(images))),
            carts: Arc::new(PgCartsService::new(db)),
            users,
        })
    }
}
