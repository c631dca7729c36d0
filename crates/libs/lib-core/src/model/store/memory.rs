//! # In-Memory Store
//!
//! An [`AuthStore`] kept entirely in process memory, for tests and embedding.

use super::{AuthStore, StoreError};
use crate::model::{Session, User, UserId, UserRecord};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Inner {
    next_id: i64,
    users: Vec<UserRecord>,
    sessions: HashMap<String, Session>,
}

/// Internally synchronized store. Users are kept in insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sessions currently held, expired ones included.
    pub async fn session_count(&self) -> usize {
        self.inner.read().await.sessions.len()
    }
}

#[async_trait]
impl AuthStore for MemoryStore {
    async fn add_user(
        &self,
        username: &str,
        full_name: &str,
        password_hash: &[u8],
        password_salt: &[u8],
        is_disabled: bool,
    ) -> Result<UserRecord, StoreError> {
        let mut inner = self.inner.write().await;

        // Check and insert under the same write lock.
        if inner.users.iter().any(|u| u.user.username == username) {
            return Err(StoreError::DuplicateUsername(username.to_string()));
        }

        let record = UserRecord {
            user: User {
                id: UserId(inner.next_id),
                username: username.to_string(),
                full_name: full_name.to_string(),
            },
            password_hash: password_hash.to_vec(),
            password_salt: password_salt.to_vec(),
            is_disabled,
        };

        inner.next_id += 1;
        inner.users.push(record.clone());

        Ok(record)
    }

    async fn get_user_by_username(&self, username: &str) -> Result<UserRecord, StoreError> {
        self.inner
            .read()
            .await
            .users
            .iter()
            .find(|u| u.user.username == username)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn get_user_by_id(&self, id: UserId) -> Result<UserRecord, StoreError> {
        self.inner
            .read()
            .await
            .users
            .iter()
            .find(|u| u.user.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn create_session(
        &self,
        token: &str,
        user_id: UserId,
        login_time: DateTime<Utc>,
        last_seen_time: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;

        // Same rules as the SQLite primary key and foreign key.
        if inner.sessions.contains_key(token) {
            return Err(StoreError::DuplicateSession);
        }
        if !inner.users.iter().any(|u| u.user.id == user_id) {
            return Err(StoreError::NotFound);
        }

        let session = Session {
            session_key: token.to_string(),
            user_id,
            login_time,
            last_seen_time,
        };
        inner.sessions.insert(token.to_string(), session);

        Ok(())
    }

    async fn get_session(&self, token: &str) -> Result<Session, StoreError> {
        self.inner
            .read()
            .await
            .sessions
            .get(token)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn update_session_last_seen(
        &self,
        token: &str,
        last_seen_time: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let session = inner.sessions.get_mut(token).ok_or(StoreError::NotFound)?;
        session.last_seen_time = last_seen_time;
        Ok(())
    }

    async fn delete_session(&self, token: &str) -> Result<(), StoreError> {
        self.inner
            .write()
            .await
            .sessions
            .remove(token)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}
