//! # Authenticator
//!
//! Signup, signin, signout and token authentication on top of any [`AuthStore`].
//!
//! ## Overview
//!
//! The authenticator owns every security decision: salting and key derivation,
//! session token generation, constant-time password comparison and the session
//! expiry window. The store underneath only persists what it is given.
//!
//! ## Session Lifecycle
//!
//! ```text
//! signup / signin ──► created ──authenticate──► active (last_seen refreshed)
//!                                  │
//!                                  ├── age > 14 days ──► expired  (terminal)
//!                                  └── signout ────────► revoked  (terminal)
//! ```
//!
//! Sessions expire a fixed 14 days after login, however recently they were
//! used. A user may hold any number of sessions at once.
//!
//! ## Example
//!
//! ```rust
//! use lib_core::Authenticator;
//!
//! # async fn example() -> lib_core::Result<()> {
//! let auth = Authenticator::in_memory();
//!
//! let token = auth.signup("John Smith", "jsmith", "supersecretpassword").await?;
//! let user = auth.authenticate(&token).await?;
//! assert_eq!(user.username, "jsmith");
//!
//! auth.signout(&token).await?;
//! # Ok(())
//! # }
//! ```

#[cfg(test)]
mod tests;

use crate::config::{AuthConfig, Config};
use crate::error::{AuthError, Result};
use crate::model::store::{create_pool, AuthStore, DbPool, MemoryStore, SqliteStore, StoreError};
use crate::model::{User, UserId};
use chrono::Duration;
use lib_auth::{generate_salt, generate_token, hash_pwd, token_prefix, verify_pwd};
use lib_utils::{now_utc, validate_not_empty};
use tracing::{debug, error, info, instrument, warn};

/// Days after login at which a session stops authenticating.
pub const SESSION_EXPIRY_DAYS: i64 = 14;

/// The session expiry window.
pub fn session_expiry() -> Duration {
    Duration::days(SESSION_EXPIRY_DAYS)
}

/// Authentication protocol over a storage backend.
///
/// Stateless apart from the store, so one instance can serve concurrent
/// callers (wrap it in an `Arc` to share it).
#[derive(Debug)]
pub struct Authenticator<S> {
    store: S,
    config: AuthConfig,
}

impl Authenticator<MemoryStore> {
    /// Authenticator over a fresh [`MemoryStore`] with default settings.
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }
}

impl Authenticator<SqliteStore> {
    /// Authenticator over an existing SQLite pool. Creates the tables if missing.
    pub async fn sqlite(pool: DbPool, config: AuthConfig) -> Result<Self> {
        let store = SqliteStore::new(pool).await?;
        Ok(Self::with_config(store, config))
    }

    /// Open the configured database and build an authenticator on it.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let pool = create_pool(&config.database_url).await?;
        Self::sqlite(pool, config.auth.clone()).await
    }
}

impl<S: AuthStore> Authenticator<S> {
    /// Authenticator with [`AuthConfig::default`] (Argon2id).
    pub fn new(store: S) -> Self {
        Self::with_config(store, AuthConfig::default())
    }

    pub fn with_config(store: S, config: AuthConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Register a new user and open their first session.
    ///
    /// # Errors
    ///
    /// - [`AuthError::InvalidInput`] if the username is empty
    /// - [`AuthError::DuplicateUsername`] if the username is taken
    /// - [`AuthError::RandomGeneration`] if no secure randomness is available
    /// - [`AuthError::Storage`] if persisting the user or session fails
    #[instrument(skip_all, fields(username = %username))]
    pub async fn signup(&self, full_name: &str, username: &str, password: &str) -> Result<String> {
        validate_not_empty(username, "username").map_err(AuthError::InvalidInput)?;

        // Fast path only. add_user is what actually guarantees uniqueness.
        match self.store.get_user_by_username(username).await {
            Ok(_) => {
                warn!("[SIGNUP] Username already taken");
                return Err(AuthError::DuplicateUsername(username.to_string()));
            }
            Err(StoreError::NotFound) => {}
            Err(e) => return Err(storage_failure(e)),
        }

        debug!("[SIGNUP] Hashing password...");
        let salt = generate_salt()?;
        let hash = hash_pwd(&self.config.pwd_scheme, password.as_bytes(), &salt)?;

        debug!("[SIGNUP] Creating user...");
        let record = self
            .store
            .add_user(username, full_name, &hash, &salt, false)
            .await
            .map_err(|e| match e {
                StoreError::DuplicateUsername(name) => {
                    warn!("[SIGNUP] Username taken by a concurrent signup");
                    AuthError::DuplicateUsername(name)
                }
                other => storage_failure(other),
            })?;

        let token = self.start_session(record.id()).await?;

        info!(user_id = %record.id(), "[SIGNUP] User created and signed in");
        Ok(token)
    }

    /// Verify a username and password and open a new session.
    ///
    /// Existing sessions for the same user stay valid.
    ///
    /// # Errors
    ///
    /// - [`AuthError::UserNotFound`] if no user has this username
    /// - [`AuthError::InvalidCredentials`] if the password does not match
    /// - [`AuthError::RandomGeneration`] / [`AuthError::Storage`] on internal failure
    #[instrument(skip_all, fields(username = %username))]
    pub async fn signin(&self, username: &str, password: &str) -> Result<String> {
        let record = self
            .store
            .get_user_by_username(username)
            .await
            .map_err(|e| match e {
                StoreError::NotFound => {
                    warn!("[SIGNIN] Unknown username");
                    AuthError::UserNotFound
                }
                other => storage_failure(other),
            })?;

        let matches = verify_pwd(
            &self.config.pwd_scheme,
            password.as_bytes(),
            &record.password_salt,
            &record.password_hash,
        )?;

        if !matches {
            warn!(user_id = %record.id(), "[SIGNIN] Invalid password");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.start_session(record.id()).await?;

        info!(user_id = %record.id(), "[SIGNIN] User signed in");
        Ok(token)
    }

    /// Revoke the session identified by `token`.
    ///
    /// # Errors
    ///
    /// - [`AuthError::SessionNotFound`] if no session has this token (always for `""`)
    #[instrument(skip_all, fields(token = %token_prefix(token)))]
    pub async fn signout(&self, token: &str) -> Result<()> {
        if token.is_empty() {
            return Err(AuthError::SessionNotFound);
        }

        self.store
            .delete_session(token)
            .await
            .map_err(|e| not_found_as(e, AuthError::SessionNotFound))?;

        info!("[SIGNOUT] Session revoked");
        Ok(())
    }

    /// Resolve `token` to its user and refresh the session's last-seen time.
    ///
    /// # Errors
    ///
    /// - [`AuthError::SessionNotFound`] if no session has this token (always for `""`)
    /// - [`AuthError::SessionExpired`] if the session is more than 14 days old
    /// - [`AuthError::Storage`] if the last-seen update fails; the call does not
    ///   succeed without it
    /// - [`AuthError::UserNotFound`] if the session's owner no longer exists
    #[instrument(skip_all, fields(token = %token_prefix(token)))]
    pub async fn authenticate(&self, token: &str) -> Result<User> {
        if token.is_empty() {
            return Err(AuthError::SessionNotFound);
        }

        let session = self
            .store
            .get_session(token)
            .await
            .map_err(|e| not_found_as(e, AuthError::SessionNotFound))?;

        let now = now_utc();
        if now - session.login_time > session_expiry() {
            warn!(user_id = %session.user_id, "[AUTH] Session expired");
            return Err(AuthError::SessionExpired);
        }

        // A concurrent signout can remove the session between lookup and update.
        self.store
            .update_session_last_seen(token, now)
            .await
            .map_err(|e| not_found_as(e, AuthError::SessionNotFound))?;

        let record = self
            .store
            .get_user_by_id(session.user_id)
            .await
            .map_err(|e| not_found_as(e, AuthError::UserNotFound))?;

        debug!(user_id = %record.id(), "[AUTH] Session valid");
        Ok(record.into_user())
    }

    async fn start_session(&self, user_id: UserId) -> Result<String> {
        let token = generate_token()?;
        let now = now_utc();

        self.store
            .create_session(&token, user_id, now, now)
            .await
            .map_err(storage_failure)?;

        debug!(token = %token_prefix(&token), "Session created");
        Ok(token)
    }
}

/// Map a store `NotFound` to `missing`; anything else is a storage failure.
fn not_found_as(err: StoreError, missing: AuthError) -> AuthError {
    match err {
        StoreError::NotFound => missing,
        other => storage_failure(other),
    }
}

fn storage_failure(err: StoreError) -> AuthError {
    error!(error = %err, "Storage failure");
    AuthError::Storage(err)
}
