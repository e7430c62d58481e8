//! Concrete boundary conversions between domain values and the engine port.

pub mod handle_codec;
pub mod token_buffers;

pub use handle_codec::HandleCodecError;
