use crate::application::handshake::errors::StepError;
use crate::domain::handshake::params::{
    ASC_REQ_CONNECTION, MAX_INBOUND_BUFFERS, MAX_MESSAGE, SECURITY_NATIVE_DREP,
};

/// Tunables for the step executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepConfig {
    /// Capacity of the outbound scratch buffer (hard ceiling per round).
    pub max_message: usize,
    /// `ASC_REQ_*` flags passed to the engine on every call.
    pub context_requirements: u32,
    /// Target data representation passed to the engine.
    pub data_rep: u32,
    /// Inbound descriptors with more buffers than this are rejected.
    pub max_inbound_buffers: usize,
}

impl Default for StepConfig {
    fn default() -> Self {
        Self {
            max_message: MAX_MESSAGE,
            context_requirements: ASC_REQ_CONNECTION,
            data_rep: SECURITY_NATIVE_DREP,
            max_inbound_buffers: MAX_INBOUND_BUFFERS,
        }
    }
}

impl StepConfig {
    /// # Errors
    /// Returns `StepError::InvalidInput` when a capacity is zero.
    pub fn validate(&self) -> Result<(), StepError> {
        if self.max_message == 0 {
            return Err(StepError::InvalidInput("max_message must be > 0".into()));
        }
        if self.max_inbound_buffers == 0 {
            return Err(StepError::InvalidInput(
                "max_inbound_buffers must be > 0".into(),
            ));
        }
        Ok(())
    }
}
