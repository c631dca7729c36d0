//! # Authentication Errors
//!
//! [`AuthError`] is the single error type returned by the authenticator,
//! built with `thiserror`.
//!
//! ## Error Categories
//!
//! 1. **Authentication failures**: the caller's input was rejected
//!    - [`InvalidInput`](AuthError::InvalidInput)
//!    - [`DuplicateUsername`](AuthError::DuplicateUsername)
//!    - [`UserNotFound`](AuthError::UserNotFound) / [`InvalidCredentials`](AuthError::InvalidCredentials)
//!    - [`SessionNotFound`](AuthError::SessionNotFound) / [`SessionExpired`](AuthError::SessionExpired)
//!
//! 2. **Internal failures**: nothing the caller did wrong
//!    - [`RandomGeneration`](AuthError::RandomGeneration)
//!    - [`PasswordHash`](AuthError::PasswordHash)
//!    - [`Storage`](AuthError::Storage)
//!
//! Errors are terminal for the call that produced them. Nothing is retried
//! internally. No variant carries passwords, hashes, salts or tokens.
//!
//! ## Outward Messaging
//!
//! `Display` is for logs. Anything shown to an end user should go through
//! [`AuthError::public_message`], which gives an unknown username and a wrong
//! password the same text:
//!
//! ```rust
//! use lib_core::error::AuthError;
//!
//! assert_eq!(
//!     AuthError::UserNotFound.public_message(),
//!     AuthError::InvalidCredentials.public_message(),
//! );
//! ```

use crate::model::store::StoreError;
use thiserror::Error;

/// Convenience type alias for `Result<T, AuthError>`.
pub type Result<T> = std::result::Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Signup input failed validation (e.g. an empty username).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The username is already registered.
    #[error("username already in use: {0}")]
    DuplicateUsername(String),

    /// No user with the given username (or the session's owner is gone).
    #[error("user not found")]
    UserNotFound,

    /// The password did not match.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No session for the given token.
    #[error("session not found")]
    SessionNotFound,

    /// The session is older than the expiry window.
    #[error("session expired")]
    SessionExpired,

    /// The OS random generator failed.
    #[error("failed to generate random bytes: {0}")]
    RandomGeneration(String),

    /// The configured key-derivation scheme rejected its parameters.
    #[error("password hashing failed: {0}")]
    PasswordHash(String),

    /// Any failure reported by the storage backend.
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

impl AuthError {
    /// True for errors caused by caller input rather than the system.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidInput(_)
                | AuthError::DuplicateUsername(_)
                | AuthError::UserNotFound
                | AuthError::InvalidCredentials
                | AuthError::SessionNotFound
                | AuthError::SessionExpired
        )
    }

    /// Stable machine-readable code.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::InvalidInput(_) => "InvalidInput",
            AuthError::DuplicateUsername(_) => "DuplicateUsername",
            AuthError::UserNotFound => "UserNotFound",
            AuthError::InvalidCredentials => "InvalidCredentials",
            AuthError::SessionNotFound => "SessionNotFound",
            AuthError::SessionExpired => "SessionExpired",
            AuthError::RandomGeneration(_) => "RandomGeneration",
            AuthError::PasswordHash(_) => "PasswordHash",
            AuthError::Storage(_) => "Storage",
        }
    }

    /// Message safe to show outside the process.
    ///
    /// Unknown usernames and wrong passwords share one message so the response
    /// does not reveal which usernames exist. Internal errors are generic.
    pub fn public_message(&self) -> &'static str {
        match self {
            AuthError::InvalidInput(_) => "Invalid input provided",
            AuthError::DuplicateUsername(_) => "Username already taken",
            AuthError::UserNotFound | AuthError::InvalidCredentials => {
                "Invalid username or password"
            }
            AuthError::SessionNotFound | AuthError::SessionExpired => {
                "Session is invalid or has expired"
            }
            AuthError::RandomGeneration(_)
            | AuthError::PasswordHash(_)
            | AuthError::Storage(_) => "An internal error occurred",
        }
    }
}

impl From<lib_auth::token::Error> for AuthError {
    fn from(err: lib_auth::token::Error) -> Self {
        AuthError::RandomGeneration(err.to_string())
    }
}

impl From<lib_auth::pwd::Error> for AuthError {
    fn from(err: lib_auth::pwd::Error) -> Self {
        AuthError::PasswordHash(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            AuthError::DuplicateUsername("jsmith".to_string()).to_string(),
            "username already in use: jsmith"
        );
        assert_eq!(AuthError::SessionExpired.to_string(), "session expired");
        assert_eq!(
            AuthError::Storage(StoreError::NotFound).to_string(),
            "storage error: record not found"
        );
    }

    #[test]
    fn test_enumeration_safe_messages() {
        assert_eq!(
            AuthError::UserNotFound.public_message(),
            AuthError::InvalidCredentials.public_message()
        );
        assert_eq!(
            AuthError::Storage(StoreError::Corrupt("bad row".to_string())).public_message(),
            "An internal error occurred"
        );
    }

    #[test]
    fn test_auth_failure_classification() {
        assert!(AuthError::InvalidCredentials.is_auth_failure());
        assert!(AuthError::SessionNotFound.is_auth_failure());
        assert!(!AuthError::RandomGeneration("no entropy".to_string()).is_auth_failure());
        assert!(!AuthError::Storage(StoreError::NotFound).is_auth_failure());
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AuthError::UserNotFound.error_code(), "UserNotFound");
        assert_eq!(
            AuthError::Storage(StoreError::NotFound).error_code(),
            "Storage"
        );
    }

    #[test]
    fn test_error_from_impls() {
        let err: AuthError = StoreError::Corrupt("x".to_string()).into();
        assert!(matches!(err, AuthError::Storage(StoreError::Corrupt(_))));

        let err: AuthError = lib_auth::token::Error::Rng("unavailable".to_string()).into();
        assert!(matches!(err, AuthError::RandomGeneration(_)));

        let err: AuthError = lib_auth::pwd::Error::InvalidParams("zero".to_string()).into();
        assert!(matches!(err, AuthError::PasswordHash(_)));
    }
}
