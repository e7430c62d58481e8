//! Token buffer adapter: domain `BufferDescriptor` <-> engine buffer lists.
//!
//! Type tags survive the conversion in both directions. Codes this crate has
//! no name for are carried as `BufferType::Unknown(code)` and re-emitted with
//! the same code.

use crate::domain::handshake::{BufferDescriptor, BufferType, TokenBuffer};
use crate::ports::engine::{NativeBuffer, NativeBufferDesc, ScratchBuffer};

/// Build the engine's inbound buffer list from a caller descriptor.
#[must_use]
pub fn to_engine_buffers(desc: &BufferDescriptor) -> NativeBufferDesc {
    NativeBufferDesc {
        version: desc.version,
        buffers: desc
            .buffers
            .iter()
            .map(|b| NativeBuffer {
                buffer_type: b.buffer_type.code(),
                data: b.data.clone(),
            })
            .collect(),
    }
}

/// Turn an engine buffer list back into a descriptor.
#[must_use]
pub fn from_engine_buffers(native: &NativeBufferDesc) -> BufferDescriptor {
    BufferDescriptor {
        version: native.version,
        buffers: native
            .buffers
            .iter()
            .map(|b| TokenBuffer::new(BufferType::from_code(b.buffer_type), b.data.clone()))
            .collect(),
    }
}

/// The single outbound scratch buffer for one round.
///
/// Call-local: a new one per step, never shared between concurrent steps.
#[must_use]
pub fn allocate_outbound(capacity: usize) -> ScratchBuffer {
    ScratchBuffer::with_capacity(capacity)
}
