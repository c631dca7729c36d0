//! # SQLite Store
//!
//! Durable [`AuthStore`] backed by `sqlx` and SQLite.
//!
//! ## Schema
//!
//! ```text
//! users(id, username UNIQUE, full_name, password_hash BLOB, password_salt BLOB, is_disabled)
//! sessions(session_key PRIMARY KEY, user_id -> users.id, login_time, last_seen_time)
//! ```
//!
//! Session timestamps are stored as integer epoch seconds, so they come back
//! truncated to whole seconds.
//!
//! ## Example
//!
//! ```rust,no_run
//! # use lib_core::model::store::{create_pool, SqliteStore};
//! # async fn example() -> Result<(), lib_core::model::store::StoreError> {
//! let pool = create_pool("sqlite:data/auth.db").await?;
//! let store = SqliteStore::new(pool).await?;
//! # Ok(())
//! # }
//! ```

use super::models::{SessionRow, UserRow};
use super::{AuthStore, StoreError};
use crate::model::{Session, UserId, UserRecord};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lib_utils::to_epoch_secs;
use sqlx::{query, query_as, sqlite::SqliteConnectOptions, SqlitePool};
use tracing::debug;

/// Type alias for SQLite connection pool.
pub type DbPool = SqlitePool;

const CREATE_USERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL UNIQUE,
        full_name TEXT NOT NULL,
        password_hash BLOB NOT NULL,
        password_salt BLOB NOT NULL,
        is_disabled BOOLEAN NOT NULL DEFAULT 0
    )
"#;

const CREATE_SESSIONS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS sessions (
        session_key TEXT PRIMARY KEY NOT NULL,
        user_id INTEGER NOT NULL REFERENCES users(id),
        login_time INTEGER NOT NULL,
        last_seen_time INTEGER NOT NULL
    )
"#;

const CREATE_SESSIONS_USER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_sessions_user_id ON sessions(user_id)";

const SELECT_USER: &str =
    "SELECT id, username, full_name, password_hash, password_salt, is_disabled FROM users";

/// Create a SQLite connection pool, creating the database file if needed.
pub async fn create_pool(database_url: &str) -> Result<DbPool, StoreError> {
    let options = database_url
        .parse::<SqliteConnectOptions>()?
        .create_if_missing(true);

    let pool = SqlitePool::connect_with(options).await?;

    Ok(pool)
}

/// SQLite-backed store. Cheap to clone; clones share the pool.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    /// Wrap a pool and make sure the `users` and `sessions` tables exist.
    pub async fn new(pool: DbPool) -> Result<Self, StoreError> {
        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    async fn init_schema(&self) -> Result<(), StoreError> {
        for statement in [CREATE_USERS_TABLE, CREATE_SESSIONS_TABLE, CREATE_SESSIONS_USER_INDEX] {
            query(statement).execute(&self.pool).await?;
        }
        debug!("auth schema ready");
        Ok(())
    }
}

#[async_trait]
impl AuthStore for SqliteStore {
    async fn add_user(
        &self,
        username: &str,
        full_name: &str,
        password_hash: &[u8],
        password_salt: &[u8],
        is_disabled: bool,
    ) -> Result<UserRecord, StoreError> {
        let result = query(
            "INSERT INTO users (username, full_name, password_hash, password_salt, is_disabled) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(username)
        .bind(full_name)
        .bind(password_hash)
        .bind(password_salt)
        .bind(is_disabled)
        .execute(&self.pool)
        .await
        .map_err(|err| match err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                StoreError::DuplicateUsername(username.to_string())
            }
            other => StoreError::Database(other),
        })?;

        self.get_user_by_id(UserId(result.last_insert_rowid())).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<UserRecord, StoreError> {
        let sql = format!("{SELECT_USER} WHERE username = ?");
        query_as::<_, UserRow>(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?
            .map(UserRecord::from)
            .ok_or(StoreError::NotFound)
    }

    async fn get_user_by_id(&self, id: UserId) -> Result<UserRecord, StoreError> {
        let sql = format!("{SELECT_USER} WHERE id = ?");
        query_as::<_, UserRow>(&sql)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await?
            .map(UserRecord::from)
            .ok_or(StoreError::NotFound)
    }

    async fn create_session(
        &self,
        token: &str,
        user_id: UserId,
        login_time: DateTime<Utc>,
        last_seen_time: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        query(
            "INSERT INTO sessions (session_key, user_id, login_time, last_seen_time) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(token)
        .bind(user_id.0)
        .bind(to_epoch_secs(login_time))
        .bind(to_epoch_secs(last_seen_time))
        .execute(&self.pool)
        .await
        .map_err(|err| match err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                StoreError::DuplicateSession
            }
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                StoreError::NotFound
            }
            other => StoreError::Database(other),
        })?;

        Ok(())
    }

    async fn get_session(&self, token: &str) -> Result<Session, StoreError> {
        let row = query_as::<_, SessionRow>(
            "SELECT session_key, user_id, login_time, last_seen_time \
             FROM sessions WHERE session_key = ?",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)?;

        Session::try_from(row)
    }

    async fn update_session_last_seen(
        &self,
        token: &str,
        last_seen_time: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let result = query("UPDATE sessions SET last_seen_time = ? WHERE session_key = ?")
            .bind(to_epoch_secs(last_seen_time))
            .bind(token)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn delete_session(&self, token: &str) -> Result<(), StoreError> {
        let result = query("DELETE FROM sessions WHERE session_key = ?")
            .bind(token)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
