//! Opaque handle codec.
//!
//! Each step is a separate, stateless invocation, so the engine's handles
//! travel through the caller as strings. The encoding is the two words in
//! order (`lower`, `upper`), each as 16 lowercase big-endian hex digits:
//! 32 characters total.
//!
//! Decoding is canonical: a string is accepted only if re-encoding the
//! decoded value reproduces it byte for byte. There is no fallback value;
//! anything else is `HandleCodecError::Malformed`.
//!
//! This is also the only place where domain handles are converted to and
//! from the engine's native `SecHandle` layout.

use crate::domain::handshake::OpaqueHandle;
use crate::domain::handshake::params::HANDLE_HEX_LEN;
use crate::ports::engine::SecHandle;

/// Errors produced by the handle codec.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HandleCodecError {
    /// Input was not produced by `encode` for this handle kind.
    #[error("malformed {kind}: {reason}")]
    Malformed { kind: &'static str, reason: String },
}

fn malformed<H: OpaqueHandle>(reason: impl Into<String>) -> HandleCodecError {
    HandleCodecError::Malformed {
        kind: H::KIND,
        reason: reason.into(),
    }
}

/// Encode a handle to its transportable string form.
#[must_use]
pub fn encode<H: OpaqueHandle>(handle: &H) -> String {
    let (lower, upper) = handle.words();
    let mut raw = [0u8; 16];
    raw[..8].copy_from_slice(&lower.to_be_bytes());
    raw[8..].copy_from_slice(&upper.to_be_bytes());
    hex::encode(raw)
}

/// Decode a string produced by [`encode`].
///
/// # Errors
/// Returns `HandleCodecError::Malformed` for wrong length, non-hex
/// characters, or any non-canonical spelling (e.g. uppercase digits).
pub fn decode<H: OpaqueHandle>(encoded: &str) -> Result<H, HandleCodecError> {
    if encoded.len() != HANDLE_HEX_LEN {
        return Err(malformed::<H>(format!(
            "expected {HANDLE_HEX_LEN} hex characters, got {}",
            encoded.len()
        )));
    }
    let mut raw = [0u8; 16];
    hex::decode_to_slice(encoded, &mut raw).map_err(|e| malformed::<H>(e.to_string()))?;

    let mut lower = [0u8; 8];
    let mut upper = [0u8; 8];
    lower.copy_from_slice(&raw[..8]);
    upper.copy_from_slice(&raw[8..]);
    let handle = H::from_words(u64::from_be_bytes(lower), u64::from_be_bytes(upper));

    if encode(&handle) != encoded {
        return Err(malformed::<H>("non-canonical encoding"));
    }
    Ok(handle)
}

/// Native engine layout of a domain handle.
#[must_use]
pub fn to_native<H: OpaqueHandle>(handle: &H) -> SecHandle {
    let (lower, upper) = handle.words();
    SecHandle { lower, upper }
}

/// Domain handle from the engine's native layout.
#[must_use]
pub fn from_native<H: OpaqueHandle>(native: SecHandle) -> H {
    H::from_words(native.lower, native.upper)
}
