//! Logical input/output records of one step, as exchanged with a host.
//!
//! Handles appear here only in encoded form; see `adapters::handle_codec`.

use crate::domain::handshake::{
    BufferDescriptor, MessageType, Outcome, SecurityStatus, SessionHandle,
};
use serde::{Deserialize, Serialize};

/// Input record. Every field is optional at the type level so that a missing
/// required field surfaces as `StepError::InvalidInput` rather than a codec
/// failure.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepInput {
    /// Encoded credential reference (required).
    #[serde(default)]
    pub credential: Option<String>,
    /// Encoded session handle from the previous step; absent on the first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prior_session_handle: Option<String>,
    /// Peer's token(s) (required).
    #[serde(default)]
    pub inbound_buffer_descriptor: Option<BufferDescriptor>,
}

impl StepInput {
    /// Input for the first step of a session.
    #[must_use]
    pub fn first(credential: impl Into<String>, inbound: BufferDescriptor) -> Self {
        Self {
            credential: Some(credential.into()),
            prior_session_handle: None,
            inbound_buffer_descriptor: Some(inbound),
        }
    }

    /// Input continuing the session identified by `prior`.
    #[must_use]
    pub fn next(
        credential: impl Into<String>,
        prior: impl Into<String>,
        inbound: BufferDescriptor,
    ) -> Self {
        Self {
            credential: Some(credential.into()),
            prior_session_handle: Some(prior.into()),
            inbound_buffer_descriptor: Some(inbound),
        }
    }
}

/// Output record of a successful (`ContinueNeeded` / `Established`) step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepOutput {
    pub session_handle: String,
    /// Normalized outcome: `ContinueNeeded` or `Established`.
    pub status: String,
    /// Exact engine status: a symbolic name or `0xNNNNNNNN`.
    pub raw_status: String,
    pub outbound_buffer_descriptor: BufferDescriptor,
    /// Diagnostic classification of the inbound token.
    pub message_type: MessageType,
}

/// Typed result of a successful step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepResult {
    pub session: SessionHandle,
    pub outbound: BufferDescriptor,
    /// Never `Outcome::Failed`; failures are returned as errors.
    pub outcome: Outcome,
    pub status: SecurityStatus,
    pub message_type: MessageType,
}
