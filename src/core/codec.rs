//! core/codec.rs — CBOR marshaling for the step input/output records.
//!
//! Infrastructure only, no handshake knowledge:
//! - `to_cbor` serializes any `T: Serialize` with **ciborium**.
//! - `from_cbor` deserializes and rejects trailing bytes after the first item.
//!
//! Records arrive from hosts with their own encoders, so decoding does not
//! insist on the deterministic form; it only insists on exactly one item.

use serde::{Serialize, de::DeserializeOwned};
use std::io::Cursor;

/// Errors produced by the record codec.
#[derive(thiserror::Error, Debug)]
pub enum CodecError {
    /// Error produced during serialization.
    #[error("CBOR serialize error: {0}")]
    Ser(#[from] ciborium::ser::Error<std::io::Error>),

    /// Error produced during deserialization.
    #[error("CBOR deserialize error: {0}")]
    De(#[from] ciborium::de::Error<std::io::Error>),

    /// Bytes remained after a complete item.
    #[error("{0} trailing bytes after CBOR value")]
    Trailing(usize),
}

/// Serialize any `T: Serialize` to CBOR bytes.
///
/// # Errors
/// Returns [`CodecError::Ser`] if serialization fails.
pub fn to_cbor<T: Serialize>(v: &T) -> Result<Vec<u8>, CodecError> {
    let mut buf = Vec::with_capacity(256);
    ciborium::ser::into_writer(v, &mut buf)?;
    Ok(buf)
}

/// Deserialize exactly one CBOR item from `b`.
///
/// # Errors
/// * [`CodecError::De`] if deserialization fails.
/// * [`CodecError::Trailing`] if bytes follow the item.
pub fn from_cbor<T: DeserializeOwned>(b: &[u8]) -> Result<T, CodecError> {
    let mut cur = Cursor::new(b);
    let value: T = ciborium::de::from_reader(&mut cur)?;
    let pos = usize::try_from(cur.position()).unwrap_or(usize::MAX);
    if pos < b.len() {
        return Err(CodecError::Trailing(b.len() - pos));
    }
    Ok(value)
}
