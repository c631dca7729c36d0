//! # Utilities Library
//!
//! Shared utility functions for base64 encoding, environment variables, time, and validation.

pub mod b64;
pub mod envs;
pub mod time;
pub mod validation;

// Re-export commonly used functions
pub use b64::{b64_encode, b64_decode};
pub use envs::{get_env_opt, get_env_parse_opt};
pub use time::{now_utc, to_epoch_secs, from_epoch_secs};
pub use validation::validate_not_empty;
