//! Orchestration of a handshake step on top of the domain types and the
//! engine port.

pub mod handshake;

pub use handshake::*;
