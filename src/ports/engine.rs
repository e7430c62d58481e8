//! Negotiation engine boundary.
//!
//! The engine performs the actual security negotiation; this crate consumes
//! it through the single `NegotiationEngine::negotiate_step` operation. Types
//! in this module mirror the engine's native representation (two-word
//! handles, numerically typed buffers, one bounded output buffer) so that the
//! conversion to and from the domain types stays in `adapters`.
//!
//! Clean architecture: the trait lives in `ports` so a platform binding (or a
//! test stub) supplies the implementation while the step executor depends
//! only on the abstraction.

use crate::domain::handshake::{BufferType, SecurityStatus};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Native two-word handle as the engine stores it.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SecHandle {
    pub lower: u64,
    pub upper: u64,
}

/// One engine buffer: numeric type code plus payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeBuffer {
    pub buffer_type: u32,
    pub data: Vec<u8>,
}

/// Engine buffer list for one message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NativeBufferDesc {
    pub version: u32,
    pub buffers: Vec<NativeBuffer>,
}

/// Returned by `ScratchBuffer::write` when a token does not fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("token of {needed} bytes exceeds scratch capacity of {capacity} bytes")]
pub struct CapacityExceeded {
    pub needed: usize,
    pub capacity: usize,
}

/// Fixed-capacity output buffer handed to the engine for one round.
///
/// The backing storage is allocated once at full capacity and never grows.
/// An engine that cannot fit its token must report that through its status
/// (typically `SecurityStatus::BUFFER_TOO_SMALL`), not by resizing. Contents
/// are wiped on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ScratchBuffer {
    buffer_type: u32,
    storage: Vec<u8>,
    len: usize,
}

impl ScratchBuffer {
    /// Allocate a zeroed `token` buffer of exactly `capacity` bytes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer_type: BufferType::Token.code(),
            storage: vec![0u8; capacity],
            len: 0,
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Bytes written so far (the engine's `cbBuffer` on return).
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn buffer_type(&self) -> u32 {
        self.buffer_type
    }

    /// Retag the buffer (engines may downgrade an unused token to `empty`).
    pub fn set_buffer_type(&mut self, buffer_type: u32) {
        self.buffer_type = buffer_type;
    }

    /// Replace the contents with `token`.
    ///
    /// # Errors
    /// Returns `CapacityExceeded` if `token` is longer than the capacity; the
    /// previous contents are left untouched in that case.
    pub fn write(&mut self, token: &[u8]) -> Result<(), CapacityExceeded> {
        if token.len() > self.storage.len() {
            return Err(CapacityExceeded {
                needed: token.len(),
                capacity: self.storage.len(),
            });
        }
        self.storage[..token.len()].copy_from_slice(token);
        self.len = token.len();
        Ok(())
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.storage[..self.len]
    }

    /// Copy the written bytes out as a one-buffer engine descriptor.
    #[must_use]
    pub fn to_native(&self, version: u32) -> NativeBufferDesc {
        NativeBufferDesc {
            version,
            buffers: vec![NativeBuffer {
                buffer_type: self.buffer_type,
                data: self.as_slice().to_vec(),
            }],
        }
    }
}

impl core::fmt::Debug for ScratchBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScratchBuffer")
            .field("buffer_type", &self.buffer_type)
            .field("len", &self.len)
            .field("capacity", &self.storage.len())
            .finish_non_exhaustive()
    }
}

/// Arguments of one engine invocation.
#[derive(Debug, Clone, Copy)]
pub struct EngineRequest<'a> {
    /// Decoded credential handle.
    pub credential: SecHandle,
    /// `None` on the first call of a session (null context); otherwise the
    /// context to continue.
    pub context: Option<SecHandle>,
    /// Peer's message.
    pub inbound: &'a NativeBufferDesc,
    /// `ASC_REQ_*` flags.
    pub context_requirements: u32,
    /// Target data representation.
    pub data_rep: u32,
}

/// Everything the engine returns besides the outbound token.
///
/// `attributes` and `expiry` are engine-internal detail; the executor does
/// not forward them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineReply {
    pub new_context: SecHandle,
    pub status: SecurityStatus,
    pub attributes: u32,
    pub expiry: i64,
}

/// The engine itself could not be reached or initialized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("negotiation engine unavailable: {reason}")]
pub struct EngineUnavailable {
    pub reason: String,
}

/// Port for the external negotiation engine.
///
/// Contract:
/// - Exactly one call per handshake step; the caller never retries.
/// - `outbound` is a fresh, call-local buffer; implementations write the
///   response token with `ScratchBuffer::write` and report overflow through
///   `EngineReply::status`.
/// - `EngineReply::new_context` is returned on every path, errors included.
/// - Validating a well-formed but foreign or stale context handle is the
///   implementation's business; the outcome is engine-defined.
///
/// Thread safety: this trait imposes none. Executors shared across threads
/// need a `Sync` engine.
pub trait NegotiationEngine {
    /// Advance (or start) a security context by one round.
    ///
    /// # Errors
    /// Returns `EngineUnavailable` only when the engine could not be invoked
    /// at all. Negotiation failures are reported through the reply status.
    fn negotiate_step(
        &self,
        request: EngineRequest<'_>,
        outbound: &mut ScratchBuffer,
    ) -> Result<EngineReply, EngineUnavailable>;
}

impl<E: NegotiationEngine + ?Sized> NegotiationEngine for &E {
    fn negotiate_step(
        &self,
        request: EngineRequest<'_>,
        outbound: &mut ScratchBuffer,
    ) -> Result<EngineReply, EngineUnavailable> {
        (**self).negotiate_step(request, outbound)
    }
}
