//! # Model
//!
//! Users, credential records and sessions, plus the storage layer that persists them.

pub mod store;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a registered user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Public user information. Never carries credential material.
///
/// Serializes as `{"id": .., "username": .., "fullname": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(rename = "fullname")]
    pub full_name: String,
}

/// A user together with the stored credential.
///
/// `is_disabled` is persisted but no operation consults it yet.
#[derive(Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub user: User,
    pub password_hash: Vec<u8>,
    pub password_salt: Vec<u8>,
    pub is_disabled: bool,
}

impl UserRecord {
    pub fn id(&self) -> UserId {
        self.user.id
    }

    /// Drop the credential, keeping only what callers may see.
    pub fn into_user(self) -> User {
        self.user
    }
}

// Keep hashes and salts out of logs and panic messages.
impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("user", &self.user)
            .field("password_hash", &"<redacted>")
            .field("password_salt", &"<redacted>")
            .field("is_disabled", &self.is_disabled)
            .finish()
    }
}

/// A logged-in session, keyed by its bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub session_key: String,
    pub user_id: UserId,
    pub login_time: DateTime<Utc>,
    pub last_seen_time: DateTime<Utc>,
}
