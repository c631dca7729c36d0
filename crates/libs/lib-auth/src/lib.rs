//! # Authentication Library
//!
//! Password key derivation, constant-time verification, and session token generation.

pub mod pwd;
pub mod token;

// Re-export commonly used types
pub use pwd::{hash_pwd, verify_pwd, Pbkdf2Digest, PwdScheme};
pub use token::{generate_salt, generate_token, token_prefix, SALT_BYTES, TOKEN_BYTES};
