//! Server configuration module

use clap::Parser;
use zeroize::Zeroizing;

use bazaar_app::context::AppSettings;

use crate::config::{
    auth::AuthConfig,
    db::DatabaseConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
    uploads::UploadsConfig,
};

pub(crate) mod auth;
pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod server;
pub(crate) mod uploads;

/// Bazaar JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "bazaar-json", about = "Bazaar JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Observability (traces/metrics) settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Token and admin registration settings.
    #[command(flatten)]
    pub auth: AuthConfig,

    /// Image upload settings.
    #[command(flatten)]
    pub uploads: UploadsConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }

    /// Settings for wiring the application services.
    #[must_use]
    pub fn app_settings(&self) -> AppSettings {
        AppSettings {
            database_url: self.database.database_url.clone(),
            database_retry_delay: self.database.retry_delay(),
            jwt_secret: Zeroizing::new(self.auth.jwt_secret.clone()),
            jwt_ttl: self.auth.jwt_ttl(),
            admin_registration_key: Zeroizing::new(self.auth.admin_registration_key.clone()),
            upload_dir: self.uploads.upload_dir.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{path::PathBuf, time::Duration};

    use jiff::SignedDuration;
    use testresult::TestResult;

    use super::*;

    const REQUIRED: [&str; 7] = [
        "bazaar-json",
        "--database-url",
        "postgres://localhost/bazaar",
        "--jwt-secret",
        "signing-secret",
        "--admin-registration-key",
        "admin-key",
    ];

    #[test]
    fn defaults_apply_when_only_secrets_are_given() -> TestResult {
        let config = ServerConfig::try_parse_from(REQUIRED)?;

        assert_eq!(config.socket_addr(), "0.0.0.0:5000");
        assert_eq!(config.server.cors_origin, "http://localhost:3000");
        assert!(!config.observability.otel_enabled);

        let settings = config.app_settings();

        assert_eq!(settings.database_retry_delay, Duration::from_secs(5));
        assert_eq!(settings.jwt_ttl, SignedDuration::from_hours(168));
        assert_eq!(settings.upload_dir, PathBuf::from("uploads"));
        assert_eq!(settings.jwt_secret.as_str(), "signing-secret");

        Ok(())
    }

    #[test]
    fn empty_secrets_are_rejected() {
        let result = ServerConfig::try_parse_from([
            "bazaar-json",
            "--database-url",
            "postgres://localhost/bazaar",
            "--jwt-secret",
            "",
            "--admin-registration-key",
            "admin-key",
        ]);

        assert!(result.is_err(), "an empty signing secret must not parse");
    }

    #[test]
    fn debug_output_hides_secrets() -> TestResult {
        let config = ServerConfig::try_parse_from(REQUIRED)?;
        let debug = format!("{config:?}");

        assert!(!debug.contains("signing-secret"), "secret leaked: {debug}");
        assert!(!debug.contains("admin-key"), "admin key leaked: {debug}");

        Ok(())
    }
}
