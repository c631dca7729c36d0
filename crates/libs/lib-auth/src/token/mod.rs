//! # Session Tokens and Salts
//!
//! Cryptographically secure random material for sessions and password salts.
//! Everything here draws from the operating system RNG and reports failure
//! instead of panicking.

use lib_utils::b64_encode;
use rand::{rngs::OsRng, RngCore};

/// Random bytes behind a session token. Encodes to 64 base64 characters.
pub const TOKEN_BYTES: usize = 48;

/// Random bytes in a per-user password salt.
pub const SALT_BYTES: usize = 48;

/// Generate a fresh password salt.
pub fn generate_salt() -> Result<Vec<u8>, Error> {
    random_bytes(SALT_BYTES)
}

/// Generate a fresh session token: random bytes, standard base64.
pub fn generate_token() -> Result<String, Error> {
    random_bytes(TOKEN_BYTES).map(b64_encode)
}

fn random_bytes(len: usize) -> Result<Vec<u8>, Error> {
    let mut buffer = vec![0u8; len];
    OsRng
        .try_fill_bytes(&mut buffer)
        .map_err(|e| Error::Rng(e.to_string()))?;
    Ok(buffer)
}

/// Shorten a token for log output.
pub fn token_prefix(token: &str) -> &str {
    // Base64 is ASCII, but callers may hand us anything.
    match token.char_indices().nth(8) {
        Some((idx, _)) => &token[..idx],
        None => token,
    }
}

// region:    --- Error
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("secure random generator unavailable: {0}")]
    Rng(String),
}
// endregion: --- Error

#[cfg(test)]
mod tests {
    use super::*;
    use lib_utils::b64_decode;

    #[test]
    fn test_token_generation() {
        let token1 = generate_token().expect("OS RNG should be available");
        let token2 = generate_token().expect("OS RNG should be available");

        assert_ne!(token1, token2);
        // 48 bytes -> 64 base64 chars, no padding needed
        assert_eq!(token1.len(), 64);
        assert_eq!(
            b64_decode(&token1).expect("token is valid base64").len(),
            TOKEN_BYTES
        );
    }

    #[test]
    fn test_salt_generation() {
        let salt1 = generate_salt().expect("OS RNG should be available");
        let salt2 = generate_salt().expect("OS RNG should be available");

        assert_eq!(salt1.len(), SALT_BYTES);
        assert_ne!(salt1, salt2);
    }

    #[test]
    fn test_token_prefix() {
        assert_eq!(token_prefix("abcdefghijkl"), "abcdefgh");
        assert_eq!(token_prefix("abc"), "abc");
        assert_eq!(token_prefix(""), "");
    }
}
