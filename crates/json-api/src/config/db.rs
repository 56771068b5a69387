//! Database Config

use std::time::Duration;

use clap::Args;

/// Database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,

    /// Seconds to wait between connection attempts while the database is unavailable
    #[arg(long, env = "DATABASE_RETRY_SECONDS", default_value_t = 5_u64)]
    pub database_retry_seconds: u64,
}

impl DatabaseConfig {
    #[must_use]
    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.database_retry_seconds)
    }
}
