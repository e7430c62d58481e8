use thiserror::Error;

/// ---- Domain error type (idiomatic, typed) ----
/// Shape failures of handshake values detected before anything reaches the
/// negotiation engine. All of them are caller errors, never protocol errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HandshakeError {
    /// A buffer type label did not name a known type nor the `unknown(N)` form.
    #[error("unrecognized buffer type label: {0:?}")]
    UnknownBufferType(String),
    /// Inbound descriptor carried no buffer of type `token`.
    #[error("inbound buffer descriptor has no token buffer")]
    MissingToken,
    /// Inbound descriptor carried more buffers than allowed.
    #[error("inbound buffer descriptor has {actual} buffers (max {max})")]
    TooManyBuffers { max: usize, actual: usize },
    /// Descriptor version differs from the one the engine understands.
    #[error("buffer descriptor version {actual} unsupported (expected {expected})")]
    UnsupportedVersion { expected: u32, actual: u32 },
}
