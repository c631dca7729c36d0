//! # Auth Store
//!
//! The storage contract consumed by the authenticator, with an in-memory and a
//! SQLite implementation.
//!
//! Stores are plain CRUD over users and sessions. They hold no policy: hashing,
//! token generation and expiry all live in the authenticator. Both
//! implementations report the same [`StoreError`] kinds, so the authenticator
//! never needs to know which one it is talking to.

// region: --- Modules
pub mod memory;
pub mod models;
pub mod sqlite;

// endregion: --- Modules

// region: --- Re-exports
pub use memory::MemoryStore;
pub use sqlite::{create_pool, DbPool, SqliteStore};
// endregion: --- Re-exports

use super::{Session, UserId, UserRecord};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Persistence primitives for users and sessions.
///
/// Username uniqueness must be enforced by `add_user` itself (atomic
/// insert-if-absent or a uniqueness constraint), not by a caller's prior lookup.
#[async_trait]
pub trait AuthStore: Send + Sync {
    /// Insert a new user and return the stored record with its assigned id.
    async fn add_user(
        &self,
        username: &str,
        full_name: &str,
        password_hash: &[u8],
        password_salt: &[u8],
        is_disabled: bool,
    ) -> Result<UserRecord, StoreError>;

    async fn get_user_by_username(&self, username: &str) -> Result<UserRecord, StoreError>;

    async fn get_user_by_id(&self, id: UserId) -> Result<UserRecord, StoreError>;

    /// Store a new session.
    ///
    /// Fails with `DuplicateSession` if the key is taken and `NotFound` if no
    /// user has `user_id`. Existing sessions are never overwritten.
    async fn create_session(
        &self,
        token: &str,
        user_id: UserId,
        login_time: DateTime<Utc>,
        last_seen_time: DateTime<Utc>,
    ) -> Result<(), StoreError>;

    async fn get_session(&self, token: &str) -> Result<Session, StoreError>;

    async fn update_session_last_seen(
        &self,
        token: &str,
        last_seen_time: DateTime<Utc>,
    ) -> Result<(), StoreError>;

    async fn delete_session(&self, token: &str) -> Result<(), StoreError>;
}

// region:    --- Error
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    #[error("username already in use: {0}")]
    DuplicateUsername(String),

    #[error("session key already in use")]
    DuplicateSession,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("corrupt stored record: {0}")]
    Corrupt(String),
}
// endregion: --- Error
