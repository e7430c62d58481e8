//! Crate root for `negostep`.
//!
//! One server-side step of a negotiate handshake: given a credential, an
//! optional session handle from the previous round and the peer's token,
//! invoke the negotiation engine once and return the updated session handle,
//! the outbound token and a normalized status.
//!
//! High-level tree:
//! * `domain::handshake` – handles, typed token buffers, status and outcome.
//! * `ports::engine` – the `NegotiationEngine` trait and its native types.
//! * `adapters` – opaque handle codec and token buffer conversion.
//! * `application::handshake` – `StepExecutor`, input/output records, config, errors.
//! * `core::codec` – CBOR marshaling of the records.
#![forbid(unsafe_code)]

pub mod adapters;
pub mod application;
pub mod core;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod test_support;

pub use application::handshake::{
    StepConfig, StepError, StepExecutor, StepInput, StepOutput, StepResult,
};
pub use domain::handshake::{
    BufferDescriptor, BufferType, CredentialRef, MessageType, Outcome, SecurityStatus,
    SessionHandle, TokenBuffer,
};
pub use ports::engine::NegotiationEngine;
