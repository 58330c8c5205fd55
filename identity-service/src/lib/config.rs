use std::env;

use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::identity::models::AuthPolicy;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

/// Authentication section of the service configuration.
///
/// Lifetimes default to the values the rest of the system assumes
/// (15-minute access tokens, 7-day refresh tokens, 1-hour reset tokens);
/// the secret and the reset-link base URL must always be supplied.
#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub token_secret: String,
    #[serde(default = "default_access_token_ttl_secs")]
    pub access_token_ttl_secs: i64,
    #[serde(default = "default_refresh_token_ttl_secs")]
    pub refresh_token_ttl_secs: i64,
    #[serde(default = "default_reset_token_ttl_secs")]
    pub reset_token_ttl_secs: i64,
    pub reset_link_base_url: String,
}

fn default_access_token_ttl_secs() -> i64 {
    900 // 15 minutes
}

fn default_refresh_token_ttl_secs() -> i64 {
    604800 // 7 days
}

fn default_reset_token_ttl_secs() -> i64 {
    3600 // 1 hour
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, AUTH__TOKEN_SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// Validation runs before the configuration is handed out, so a
    /// misconfigured service fails at startup rather than at first use.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: AUTH__TOKEN_SECRET=... overrides auth.token_secret
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        config.auth.validate().map_err(ConfigError::Message)?;

        Ok(config)
    }
}

impl AuthConfig {
    const MIN_SECRET_BYTES: usize = 32;

    /// Fail-fast sanity checks on the auth section.
    ///
    /// # Errors
    /// Human-readable description of the first violated constraint
    pub fn validate(&self) -> Result<(), String> {
        if self.token_secret.len() < Self::MIN_SECRET_BYTES {
            return Err(format!(
                "auth.token_secret must be at least {} bytes (HS256 secret)",
                Self::MIN_SECRET_BYTES
            ));
        }

        if self.access_token_ttl_secs <= 0
            || self.refresh_token_ttl_secs <= 0
            || self.reset_token_ttl_secs <= 0
        {
            return Err("auth token lifetimes must be positive".to_string());
        }

        if !self.reset_link_base_url.starts_with("http://")
            && !self.reset_link_base_url.starts_with("https://")
        {
            return Err("auth.reset_link_base_url must be an http(s) URL".to_string());
        }

        Ok(())
    }

    /// Convert the validated section into the policy the service consumes.
    pub fn to_policy(&self) -> AuthPolicy {
        AuthPolicy {
            token_secret: self.token_secret.clone(),
            access_token_ttl: Duration::seconds(self.access_token_ttl_secs),
            refresh_token_ttl: Duration::seconds(self.refresh_token_ttl_secs),
            reset_token_ttl: Duration::seconds(self.reset_token_ttl_secs),
            reset_link_base_url: self.reset_link_base_url.trim_end_matches('/').to_string(),
        }
    }
}
