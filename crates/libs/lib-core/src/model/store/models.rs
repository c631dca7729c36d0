use crate::model::{Session, User, UserId, UserRecord};
use lib_utils::from_epoch_secs;
use sqlx::FromRow;

use super::StoreError;

/// Row of the `users` table.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub full_name: String,
    pub password_hash: Vec<u8>,
    pub password_salt: Vec<u8>,
    pub is_disabled: bool,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        UserRecord {
            user: User {
                id: UserId(row.id),
                username: row.username,
                full_name: row.full_name,
            },
            password_hash: row.password_hash,
            password_salt: row.password_salt,
            is_disabled: row.is_disabled,
        }
    }
}

/// Row of the `sessions` table. Times are Unix epoch seconds.
#[derive(Debug, Clone, FromRow)]
pub struct SessionRow {
    pub session_key: String,
    pub user_id: i64,
    pub login_time: i64,
    pub last_seen_time: i64,
}

impl TryFrom<SessionRow> for Session {
    type Error = StoreError;

    fn try_from(row: SessionRow) -> Result<Self, Self::Error> {
        let login_time = from_epoch_secs(row.login_time)
            .map_err(|e| StoreError::Corrupt(format!("session login_time: {e}")))?;
        let last_seen_time = from_epoch_secs(row.last_seen_time)
            .map_err(|e| StoreError::Corrupt(format!("session last_seen_time: {e}")))?;

        Ok(Session {
            session_key: row.session_key,
            user_id: UserId(row.user_id),
            login_time,
            last_seen_time,
        })
    }
}
