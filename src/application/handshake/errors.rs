use thiserror::Error;

use crate::adapters::HandleCodecError;
use crate::core::CodecError;
use crate::domain::handshake::{HandshakeError, SecurityStatus};
use crate::ports::engine::EngineUnavailable;

/// Errors raised by a handshake step.
///
/// Every failure path ends here; nothing is logged and swallowed.
/// `InvalidInput` and `MalformedHandle` are caller errors detected before the
/// engine runs. `ProtocolFailure` means the engine ran and reported a
/// negative status.
#[derive(Debug, Error)]
pub enum StepError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    MalformedHandle(#[from] HandleCodecError),

    /// The engine returned a negative status. `session_handle` is the encoded
    /// handle the engine produced anyway; it must be treated as invalid.
    #[error("negotiation step failed (<0): {}", failure_code(.status))]
    ProtocolFailure {
        status: SecurityStatus,
        session_handle: String,
    },

    #[error(transparent)]
    EngineUnavailable(#[from] EngineUnavailable),

    #[error("record codec error: {0}")]
    Codec(#[from] CodecError),
}

/// `Name (0xNNNNNNNN)` for named codes, bare `0xNNNNNNNN` otherwise.
fn failure_code(status: &SecurityStatus) -> String {
    match status.name() {
        Some(name) => format!("{name} ({})", status.formatted()),
        None => status.formatted(),
    }
}

impl From<HandshakeError> for StepError {
    fn from(e: HandshakeError) -> Self {
        Self::InvalidInput(e.to_string())
    }
}

impl StepError {
    /// True for errors the caller caused (bad shape or bad encoding).
    #[must_use]
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_) | Self::MalformedHandle(_) | Self::Codec(_)
        )
    }

    /// Raw engine status, for `ProtocolFailure` only.
    #[must_use]
    pub fn status(&self) -> Option<SecurityStatus> {
        match self {
            Self::ProtocolFailure { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub(crate) fn missing(field: &str) -> Self {
        Self::InvalidInput(format!("missing required field `{field}`"))
    }
}
