//! # Base64 Encoding/Decoding
//!
//! Standard padded base64, as used for session tokens.

use base64::{Engine as _, engine::general_purpose};

/// Encode bytes to a standard (padded) base64 string.
pub fn b64_encode(content: impl AsRef<[u8]>) -> String {
    general_purpose::STANDARD.encode(content)
}

/// Decode a standard (padded) base64 string to bytes.
pub fn b64_decode(b64: &str) -> Result<Vec<u8>, Error> {
    general_purpose::STANDARD
        .decode(b64)
        .map_err(|_| Error::FailToB64Decode)
}

// region:    --- Error
#[derive(Debug)]
pub enum Error {
    FailToB64Decode,
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for Error {}
// endregion: --- Error

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_encoding_is_padded() {
        // 4 bytes -> 8 chars with padding
        assert_eq!(b64_encode([0xde, 0xad, 0xbe, 0xef]), "3q2+7w==");
        assert_eq!(
            b64_decode("3q2+7w==").expect("valid base64 should decode"),
            vec![0xde, 0xad, 0xbe, 0xef]
        );
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(b64_decode("not base64!"), Err(Error::FailToB64Decode)));
        assert!(matches!(b64_decode("3q2+7w"), Err(Error::FailToB64Decode)));
    }
}
