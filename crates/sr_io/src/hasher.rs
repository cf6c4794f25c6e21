//! crates/sr_io/src/hasher.rs
//!
//! SHA-256 digests for report inputs.
//! - `sha256_hex` over raw bytes (the input file exactly as read).
//! - `sha256_canonical` over any serializable value via canonical JSON, so
//!   that key order and whitespace never change the digest.
//! - Hex output is lowercase.

#![forbid(unsafe_code)]

use serde::Serialize;

use crate::canonical_json::canonical_bytes_of;
use crate::IoError;

/// Lowercase hex SHA-256 of `bytes`.
#[cfg(feature = "hash")]
pub fn sha256_hex(bytes: &[u8]) -> String {
    use sha2::{Digest, Sha256};
    hex::encode(Sha256::digest(bytes))
}

/// Digest of the canonical JSON form of `value`.
pub fn sha256_canonical<T: Serialize>(value: &T) -> Result<String, IoError> {
    let bytes = canonical_bytes_of(value)?;
    try_sha256_hex(&bytes)
}

/// Fails loudly when the `hash` feature is off instead of returning an empty digest.
pub fn try_sha256_hex(bytes: &[u8]) -> Result<String, IoError> {
    #[cfg(feature = "hash")]
    {
        Ok(sha256_hex(bytes))
    }
    #[cfg(not(feature = "hash"))]
    {
        let _ = bytes;
        Err(IoError::Hash("hash feature disabled".into()))
    }
}
