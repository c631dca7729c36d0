//! # Core Library
//!
//! Session authentication: the [`Authenticator`], its configuration and errors,
//! and the storage backends it runs on.

pub mod authenticator;
pub mod config;
pub mod error;
pub mod model;

// Re-export commonly used types
pub use authenticator::{Authenticator, SESSION_EXPIRY_DAYS};
pub use config::{AuthConfig, Config};
pub use error::{AuthError, Result};
pub use model::store::{create_pool, AuthStore, DbPool, MemoryStore, SqliteStore, StoreError};
pub use model::{Session, User, UserId, UserRecord};
