//! Auth Config

use clap::{Args, builder::NonEmptyStringValueParser};
use jiff::SignedDuration;

/// Token signing and admin registration settings.
#[derive(Args)]
pub struct AuthConfig {
    /// Secret used to sign access tokens
    #[arg(
        long,
        env = "JWT_SECRET",
        hide_env_values = true,
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub jwt_secret: String,

    /// Access token lifetime in hours
    #[arg(long, env = "JWT_TTL_HOURS", default_value_t = 168_u32)]
    pub jwt_ttl_hours: u32,

    /// Shared key required to register admin accounts
    #[arg(
        long,
        env = "ADMIN_REGISTRATION_KEY",
        hide_env_values = true,
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub admin_registration_key: String,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"**redacted**")
            .field("jwt_ttl_hours", &self.jwt_ttl_hours)
            .field("admin_registration_key", &"**redacted**")
            .finish()
    }
}

impl AuthConfig {
    #[must_use]
    pub fn jwt_ttl(&self) -> SignedDuration {
        SignedDuration::from_hours(i64::from(self.jwt_ttl_hours))
    }
}
