#![allow(dead_code)]
use std::sync::Mutex;

use crate::adapters::handle_codec;
use crate::domain::handshake::{BufferDescriptor, CredentialRef, SecurityStatus};
use crate::ports::engine::{
    EngineReply, EngineRequest, EngineUnavailable, NativeBufferDesc, NegotiationEngine,
    ScratchBuffer, SecHandle,
};

/// What the stub saw on one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub credential: SecHandle,
    pub context: Option<SecHandle>,
    pub inbound: NativeBufferDesc,
    pub capacity: usize,
    pub context_requirements: u32,
    pub data_rep: u32,
}

/// Deterministic engine: always answers with the configured status and
/// token, and derives the new context from the incoming one.
pub struct StubEngine {
    pub status: SecurityStatus,
    pub token: Vec<u8>,
    pub unavailable: bool,
    calls: Mutex<Vec<RecordedCall>>,
}

impl StubEngine {
    pub fn new(status: SecurityStatus, token: &[u8]) -> Self {
        Self {
            status,
            token: token.to_vec(),
            unavailable: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::new(SecurityStatus::OK, b"")
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

/// Context the stub hands out: first call gets `(1, 0xC0)`, each continuation
/// bumps the lower word.
pub fn next_context(prev: Option<SecHandle>) -> SecHandle {
    match prev {
        None => SecHandle {
            lower: 1,
            upper: 0xC0,
        },
        Some(h) => SecHandle {
            lower: h.lower.wrapping_add(1),
            upper: h.upper,
        },
    }
}

impl NegotiationEngine for StubEngine {
    fn negotiate_step(
        &self,
        request: EngineRequest<'_>,
        outbound: &mut ScratchBuffer,
    ) -> Result<EngineReply, EngineUnavailable> {
        self.calls.lock().unwrap().push(RecordedCall {
            credential: request.credential,
            context: request.context,
            inbound: request.inbound.clone(),
            capacity: outbound.capacity(),
            context_requirements: request.context_requirements,
            data_rep: request.data_rep,
        });
        if self.unavailable {
            return Err(EngineUnavailable {
                reason: "stub offline".into(),
            });
        }
        let status = match outbound.write(&self.token) {
            Ok(()) => self.status,
            Err(_) => SecurityStatus::BUFFER_TOO_SMALL,
        };
        Ok(EngineReply {
            new_context: next_context(request.context),
            status,
            attributes: 0,
            expiry: 0,
        })
    }
}

pub fn mk_credential() -> CredentialRef {
    CredentialRef::new(0xC1, 0)
}

pub fn mk_credential_str() -> String {
    handle_codec::encode(&mk_credential())
}

pub fn mk_inbound(token: &[u8]) -> BufferDescriptor {
    BufferDescriptor::single_token(token.to_vec())
}
