pub mod codec;

pub use codec::{CodecError, from_cbor, to_cbor};
