//! # Configuration
//!
//! Configuration loaded from environment variables (a `.env` file is honoured
//! through `dotenvy`). It is validated on load so a bad setup fails fast.
//!
//! | variable              | default               |
//! |-----------------------|-----------------------|
//! | `AUTH_DATABASE_URL`   | `sqlite:data/auth.db` |
//! | `AUTH_PWD_SCHEME`     | `argon2id`            |
//! | `AUTH_PWD_ITERATIONS` | scheme default        |
//! | `AUTH_PWD_OUTPUT_LEN` | `32`                  |
//!
//! Set `AUTH_PWD_SCHEME=pbkdf2-sha1` to keep verifying credentials created
//! with PBKDF2-HMAC-SHA1 at 4096 iterations.
//!
//! ## Global Config Access
//!
//! ```rust,no_run
//! use lib_core::config::{core_config, init_config};
//!
//! init_config().expect("valid configuration");
//! if let Some(config) = core_config() {
//!     let db_url = &config.database_url;
//! }
//! ```

use lib_auth::PwdScheme;
use lib_utils::envs::{get_env_opt, get_env_parse_opt};
use std::sync::OnceLock;

const DEFAULT_DATABASE_URL: &str = "sqlite:data/auth.db";

/// Settings the authenticator itself consumes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthConfig {
    /// Key-derivation scheme for new and existing credentials.
    pub pwd_scheme: PwdScheme,
}

impl AuthConfig {
    /// PBKDF2-HMAC-SHA1 / 4096 / 32, compatible with existing stored credentials.
    pub fn legacy() -> Self {
        Self {
            pwd_scheme: PwdScheme::legacy(),
        }
    }
}

/// Full application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// SQLite database connection URL
    pub database_url: String,

    pub auth: AuthConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();

        let database_url =
            get_env_opt("AUTH_DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let mut pwd_scheme = match get_env_opt("AUTH_PWD_SCHEME") {
            Some(name) => name
                .parse::<PwdScheme>()
                .map_err(|e| format!("AUTH_PWD_SCHEME: {e}"))?,
            None => PwdScheme::default(),
        };

        if let Some(iterations) = get_env_parse_opt::<u32>("AUTH_PWD_ITERATIONS")
            .map_err(|_| "AUTH_PWD_ITERATIONS must be a positive integer".to_string())?
        {
            pwd_scheme = pwd_scheme.with_iterations(iterations);
        }

        if let Some(output_len) = get_env_parse_opt::<usize>("AUTH_PWD_OUTPUT_LEN")
            .map_err(|_| "AUTH_PWD_OUTPUT_LEN must be a positive integer".to_string())?
        {
            pwd_scheme = pwd_scheme.with_output_len(output_len);
        }

        Ok(Self {
            database_url,
            auth: AuthConfig { pwd_scheme },
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.database_url.trim().is_empty() {
            return Err("AUTH_DATABASE_URL cannot be empty".to_string());
        }

        self.auth
            .pwd_scheme
            .validate()
            .map_err(|e| format!("password scheme: {e}"))
    }
}

/// Global configuration instance (initialized once at startup).
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Initialize the global configuration.
///
/// # Errors
///
/// Returns an error if:
/// - Environment variables are invalid
/// - Configuration validation fails
/// - Config has already been initialized
pub fn init_config() -> Result<(), String> {
    let config = Config::from_env()?;
    config.validate()?;

    CONFIG
        .set(config)
        .map_err(|_| "Config has already been initialized".to_string())
}

/// Get a reference to the global configuration, if [`init_config()`] has run.
pub fn core_config() -> Option<&'static Config> {
    CONFIG.get()
}
