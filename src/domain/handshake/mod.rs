/*
Value types for one server-side negotiate handshake step.

Everything here is pure data plus shape validation: no engine calls, no
encoding of handles to strings, no logging. Handles are modeled as immutable
two-word values rather than raw addresses; the codec and engine boundary
live in `adapters` and `ports`.

* [`CredentialRef`] / [`SessionHandle`] – opaque engine handles.
* [`BufferDescriptor`] – typed token buffers exchanged in one round.
* [`SecurityStatus`] / [`Outcome`] – raw engine status and its normalization.
* [`MessageType`] – structural classification of inbound tokens.
*/

pub mod buffer;
pub mod errors;
pub mod handle;
pub mod message_type;
pub mod params;
pub mod status;

pub use buffer::*;
pub use errors::HandshakeError;
pub use handle::*;
pub use message_type::*;
pub use status::*;
