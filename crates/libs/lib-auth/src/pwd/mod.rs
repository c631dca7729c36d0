//! # Password Hashing
//!
//! Salted password key derivation and constant-time verification.
//!
//! Two schemes are supported:
//! - **Argon2id** (default) for new deployments.
//! - **PBKDF2-HMAC** over SHA-1/SHA-256/SHA-512. [`PwdScheme::legacy`] reproduces
//!   `PBKDF2-HMAC-SHA1`, 4096 iterations, 32-byte key, which existing stored
//!   credentials were derived with.
//!
//! The scheme is not stored alongside the hash. Verifying a credential requires
//! the same scheme that produced it.

use argon2::{Algorithm, Argon2, Params, Version};
use constant_time_eq::constant_time_eq;
use pbkdf2::pbkdf2_hmac;
use sha1::Sha1;
use sha2::{Sha256, Sha512};
use std::fmt;
use std::str::FromStr;

/// Derived key length used by both default schemes.
pub const DEFAULT_OUTPUT_LEN: usize = 32;

/// Iteration count of the legacy PBKDF2 scheme.
pub const LEGACY_PBKDF2_ITERATIONS: u32 = 4096;

const MAX_OUTPUT_LEN: usize = 64;

/// Underlying hash of the PBKDF2 HMAC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pbkdf2Digest {
    Sha1,
    Sha256,
    Sha512,
}

/// Key-derivation scheme and its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PwdScheme {
    Pbkdf2 {
        digest: Pbkdf2Digest,
        iterations: u32,
        output_len: usize,
    },
    Argon2id {
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
        output_len: usize,
    },
}

impl PwdScheme {
    /// PBKDF2-HMAC-SHA1, 4096 iterations, 32-byte output.
    pub const fn legacy() -> Self {
        Self::Pbkdf2 {
            digest: Pbkdf2Digest::Sha1,
            iterations: LEGACY_PBKDF2_ITERATIONS,
            output_len: DEFAULT_OUTPUT_LEN,
        }
    }

    /// Short name, as accepted by [`PwdScheme::from_str`].
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pbkdf2 { digest: Pbkdf2Digest::Sha1, .. } => "pbkdf2-sha1",
            Self::Pbkdf2 { digest: Pbkdf2Digest::Sha256, .. } => "pbkdf2-sha256",
            Self::Pbkdf2 { digest: Pbkdf2Digest::Sha512, .. } => "pbkdf2-sha512",
            Self::Argon2id { .. } => "argon2id",
        }
    }

    /// Replace the iteration (time cost) parameter.
    pub fn with_iterations(self, iterations: u32) -> Self {
        match self {
            Self::Pbkdf2 { digest, output_len, .. } => Self::Pbkdf2 {
                digest,
                iterations,
                output_len,
            },
            Self::Argon2id {
                memory_kib,
                parallelism,
                output_len,
                ..
            } => Self::Argon2id {
                memory_kib,
                iterations,
                parallelism,
                output_len,
            },
        }
    }

    /// Replace the derived key length.
    pub fn with_output_len(self, output_len: usize) -> Self {
        match self {
            Self::Pbkdf2 { digest, iterations, .. } => Self::Pbkdf2 {
                digest,
                iterations,
                output_len,
            },
            Self::Argon2id {
                memory_kib,
                iterations,
                parallelism,
                ..
            } => Self::Argon2id {
                memory_kib,
                iterations,
                parallelism,
                output_len,
            },
        }
    }

    pub fn output_len(&self) -> usize {
        match self {
            Self::Pbkdf2 { output_len, .. } | Self::Argon2id { output_len, .. } => *output_len,
        }
    }

    /// Check parameters without deriving anything.
    pub fn validate(&self) -> Result<(), Error> {
        let output_len = self.output_len();
        if output_len == 0 || output_len > MAX_OUTPUT_LEN {
            return Err(Error::InvalidParams(format!(
                "output length must be between 1 and {MAX_OUTPUT_LEN} bytes"
            )));
        }

        match self {
            Self::Pbkdf2 { iterations, .. } => {
                if *iterations == 0 {
                    return Err(Error::InvalidParams(
                        "pbkdf2 iterations must be at least 1".to_string(),
                    ));
                }
                Ok(())
            }
            Self::Argon2id { .. } => self.argon2().map(|_| ()),
        }
    }

    fn argon2(&self) -> Result<Argon2<'static>, Error> {
        let Self::Argon2id {
            memory_kib,
            iterations,
            parallelism,
            output_len,
        } = *self
        else {
            return Err(Error::InvalidParams("not an argon2 scheme".to_string()));
        };

        let params = Params::new(memory_kib, iterations, parallelism, Some(output_len))
            .map_err(|e| Error::InvalidParams(format!("argon2: {e}")))?;

        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

impl Default for PwdScheme {
    /// Argon2id with the argon2 crate's recommended costs.
    fn default() -> Self {
        Self::Argon2id {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
            output_len: DEFAULT_OUTPUT_LEN,
        }
    }
}

impl fmt::Display for PwdScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PwdScheme {
    type Err = Error;

    /// Parse a scheme name into that scheme with its default parameters.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let pbkdf2 = |digest| Self::Pbkdf2 {
            digest,
            iterations: LEGACY_PBKDF2_ITERATIONS,
            output_len: DEFAULT_OUTPUT_LEN,
        };

        match s.trim().to_lowercase().as_str() {
            "argon2id" | "argon2" => Ok(Self::default()),
            "pbkdf2-sha1" | "legacy" => Ok(pbkdf2(Pbkdf2Digest::Sha1)),
            "pbkdf2-sha256" => Ok(pbkdf2(Pbkdf2Digest::Sha256)),
            "pbkdf2-sha512" => Ok(pbkdf2(Pbkdf2Digest::Sha512)),
            other => Err(Error::UnknownScheme(other.to_string())),
        }
    }
}

/// Derive the password key for `password` and `salt` under `scheme`.
pub fn hash_pwd(scheme: &PwdScheme, password: &[u8], salt: &[u8]) -> Result<Vec<u8>, Error> {
    scheme.validate()?;

    let mut out = vec![0u8; scheme.output_len()];

    match scheme {
        PwdScheme::Pbkdf2 {
            digest, iterations, ..
        } => match digest {
            Pbkdf2Digest::Sha1 => pbkdf2_hmac::<Sha1>(password, salt, *iterations, &mut out),
            Pbkdf2Digest::Sha256 => pbkdf2_hmac::<Sha256>(password, salt, *iterations, &mut out),
            Pbkdf2Digest::Sha512 => pbkdf2_hmac::<Sha512>(password, salt, *iterations, &mut out),
        },
        PwdScheme::Argon2id { .. } => {
            scheme
                .argon2()?
                .hash_password_into(password, salt, &mut out)
                .map_err(|e| Error::Derive(e.to_string()))?;
        }
    }

    Ok(out)
}

/// Recompute the key and compare it to `expected` in constant time.
///
/// The full derivation always runs and the comparison never short-circuits on
/// the first differing byte. Only a length mismatch returns early.
pub fn verify_pwd(
    scheme: &PwdScheme,
    password: &[u8],
    salt: &[u8],
    expected: &[u8],
) -> Result<bool, Error> {
    let derived = hash_pwd(scheme, password, salt)?;

    Ok(constant_time_eq(&derived, expected))
}

// region:    --- Error
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid password scheme parameters: {0}")]
    InvalidParams(String),

    #[error("unknown password scheme: {0}")]
    UnknownScheme(String),

    #[error("key derivation failed: {0}")]
    Derive(String),
}
// endregion: --- Error

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap_argon2() -> PwdScheme {
        PwdScheme::Argon2id {
            memory_kib: 256,
            iterations: 1,
            parallelism: 1,
            output_len: DEFAULT_OUTPUT_LEN,
        }
    }

    #[test]
    fn test_legacy_matches_known_vector() {
        // RFC 6070: P = "password", S = "salt", c = 4096, dkLen = 20
        let scheme = PwdScheme::legacy().with_output_len(20);
        let key = hash_pwd(&scheme, b"password", b"salt").expect("derivation should succeed");

        assert_eq!(
            key,
            [
                0x4b, 0x00, 0x79, 0x01, 0xb7, 0x65, 0x48, 0x9a, 0xbe, 0xad, 0x49, 0xd9, 0x26,
                0xf7, 0x21, 0xd0, 0x65, 0xa4, 0x29, 0xc1,
            ]
        );
    }

    #[test]
    fn test_legacy_output_is_32_bytes() {
        let key = hash_pwd(&PwdScheme::legacy(), b"supersecretpassword", &[7u8; 48])
            .expect("derivation should succeed");
        assert_eq!(key.len(), 32);
    }

    #[test]
    fn test_verify_accepts_correct_password() {
        for scheme in [PwdScheme::legacy(), cheap_argon2()] {
            let salt = [42u8; 48];
            let hash = hash_pwd(&scheme, b"bar", &salt).expect("derivation should succeed");

            assert!(verify_pwd(&scheme, b"bar", &salt, &hash).expect("verify should run"));
            assert!(!verify_pwd(&scheme, b"baz", &salt, &hash).expect("verify should run"));
        }
    }

    #[test]
    fn test_salt_changes_hash() {
        let scheme = PwdScheme::legacy();
        let a = hash_pwd(&scheme, b"bar", &[1u8; 48]).expect("derivation should succeed");
        let b = hash_pwd(&scheme, b"bar", &[2u8; 48]).expect("derivation should succeed");
        assert_ne!(a, b);
    }

    #[test]
    fn test_digests_differ() {
        let salt = [9u8; 48];
        let sha1 = hash_pwd(&PwdScheme::legacy(), b"bar", &salt).expect("sha1");
        let sha256 = hash_pwd(
            &"pbkdf2-sha256".parse::<PwdScheme>().expect("known scheme"),
            b"bar",
            &salt,
        )
        .expect("sha256");
        assert_ne!(sha1, sha256);
    }

    #[test]
    fn test_verify_rejects_truncated_hash() {
        let scheme = PwdScheme::legacy();
        let salt = [3u8; 48];
        let hash = hash_pwd(&scheme, b"bar", &salt).expect("derivation should succeed");

        assert!(!verify_pwd(&scheme, b"bar", &salt, &hash[..16]).expect("verify should run"));
    }

    #[test]
    fn test_invalid_params() {
        let zero_iter = PwdScheme::legacy().with_iterations(0);
        assert!(matches!(
            hash_pwd(&zero_iter, b"bar", b"saltsalt"),
            Err(Error::InvalidParams(_))
        ));

        let too_long = PwdScheme::legacy().with_output_len(65);
        assert!(matches!(too_long.validate(), Err(Error::InvalidParams(_))));

        let bad_argon = cheap_argon2().with_iterations(0);
        assert!(matches!(bad_argon.validate(), Err(Error::InvalidParams(_))));
    }

    #[test]
    fn test_scheme_names_round_trip() {
        for name in ["argon2id", "pbkdf2-sha1", "pbkdf2-sha256", "pbkdf2-sha512"] {
            let scheme: PwdScheme = name.parse().expect("known scheme");
            assert_eq!(scheme.name(), name);
        }
        assert_eq!("legacy".parse::<PwdScheme>().expect("alias"), PwdScheme::legacy());
        assert!(matches!(
            "md5".parse::<PwdScheme>(),
            Err(Error::UnknownScheme(_))
        ));
    }
}
