//! Handshake step executor.
//!
//! One call = one engine invocation. The executor keeps no session state:
//! the caller passes the previous session handle back in on every round and
//! receives the updated one in the result. Independent sessions may therefore
//! be stepped concurrently from separate threads with a shared executor.
//!
//! Flow of one step:
//! 1. Validate the inbound descriptor shape (caller errors never reach the engine).
//! 2. Convert credential / prior handle to the engine's native layout.
//! 3. Build the inbound engine buffers and a fresh fixed-capacity scratch buffer.
//! 4. Invoke the engine once (null context when there is no prior handle).
//! 5. Classify the status; negative statuses are raised as
//!    `StepError::ProtocolFailure`, carrying the handle the engine produced.
//! 6. Convert the scratch buffer into the outbound descriptor.
//!
//! Caller responsibility: feeding the *same* session handle to two concurrent
//! steps (a replayed or duplicated round) races inside the engine with an
//! engine-defined result. Nothing here detects or serializes that case. There
//! is no timeout or cancellation; a step blocks until the engine returns.

use tracing::{debug, warn};

use crate::adapters::{handle_codec, token_buffers};
use crate::application::handshake::config::StepConfig;
use crate::application::handshake::errors::StepError;
use crate::application::handshake::records::{StepInput, StepOutput, StepResult};
use crate::core::{from_cbor, to_cbor};
use crate::domain::handshake::params::SECBUFFER_VERSION;
use crate::domain::handshake::{
    BufferDescriptor, CredentialRef, MessageType, Outcome, SessionHandle,
};
use crate::ports::engine::{EngineRequest, NegotiationEngine};

/// Stateless driver around a `NegotiationEngine`.
#[derive(Debug)]
pub struct StepExecutor<E: NegotiationEngine> {
    engine: E,
    config: StepConfig,
}

impl<E: NegotiationEngine> StepExecutor<E> {
    /// Executor with `StepConfig::default()`.
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            config: StepConfig::default(),
        }
    }

    /// # Errors
    /// Returns `StepError::InvalidInput` if `config` fails validation.
    pub fn with_config(engine: E, config: StepConfig) -> Result<Self, StepError> {
        config.validate()?;
        Ok(Self { engine, config })
    }

    #[must_use]
    pub fn config(&self) -> &StepConfig {
        &self.config
    }

    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Run one handshake round on decoded values.
    ///
    /// `prior == None` starts a new session: the engine is called with a
    /// null context, never with a zero-valued handle.
    ///
    /// # Errors
    /// - `StepError::InvalidInput` if `inbound` has no `token` buffer or is otherwise malformed.
    /// - `StepError::EngineUnavailable` if the engine could not be invoked.
    /// - `StepError::ProtocolFailure` if the engine returned a negative status.
    pub fn step(
        &self,
        credential: &CredentialRef,
        prior: Option<&SessionHandle>,
        inbound: &BufferDescriptor,
    ) -> Result<StepResult, StepError> {
        inbound.validate_inbound(self.config.max_inbound_buffers)?;

        let first_call = prior.is_none();
        let message_type = inbound
            .first_token()
            .map_or(MessageType::Unknown, MessageType::classify);
        debug!(
            first_call,
            %message_type,
            inbound_len = inbound.total_len(),
            "step: start"
        );

        let native_in = token_buffers::to_engine_buffers(inbound);
        let mut scratch = token_buffers::allocate_outbound(self.config.max_message);
        let request = EngineRequest {
            credential: handle_codec::to_native(credential),
            context: prior.map(handle_codec::to_native),
            inbound: &native_in,
            context_requirements: self.config.context_requirements,
            data_rep: self.config.data_rep,
        };

        let reply = self.engine.negotiate_step(request, &mut scratch)?;
        let session: SessionHandle = handle_codec::from_native(reply.new_context);

        let outcome = reply.status.outcome();
        if let Outcome::Failed(status) = outcome {
            warn!(
                first_call,
                %message_type,
                status = %status,
                code = %status.formatted(),
                "step: engine reported failure"
            );
            return Err(StepError::ProtocolFailure {
                status,
                session_handle: handle_codec::encode(&session),
            });
        }

        let outbound = token_buffers::from_engine_buffers(&scratch.to_native(SECBUFFER_VERSION));
        debug!(
            first_call,
            status = %reply.status,
            outbound_len = outbound.total_len(),
            "step: end"
        );
        Ok(StepResult {
            session,
            outbound,
            outcome,
            status: reply.status,
            message_type,
        })
    }

    /// Run one round from an input record with encoded handles.
    ///
    /// # Errors
    /// - `StepError::InvalidInput` if `credential` or `inboundBufferDescriptor` is absent.
    /// - `StepError::MalformedHandle` if an encoded handle does not decode.
    /// - Everything `step` returns.
    pub fn step_record(&self, input: &StepInput) -> Result<StepOutput, StepError> {
        let credential = input
            .credential
            .as_deref()
            .ok_or_else(|| StepError::missing("credential"))?;
        let inbound = input
            .inbound_buffer_descriptor
            .as_ref()
            .ok_or_else(|| StepError::missing("inboundBufferDescriptor"))?;

        let credential: CredentialRef = handle_codec::decode(credential)?;
        let prior: Option<SessionHandle> = input
            .prior_session_handle
            .as_deref()
            .map(handle_codec::decode::<SessionHandle>)
            .transpose()?;

        let result = self.step(&credential, prior.as_ref(), inbound)?;
        Ok(StepOutput {
            session_handle: handle_codec::encode(&result.session),
            status: result.outcome.to_string(),
            raw_status: result.status.to_string(),
            outbound_buffer_descriptor: result.outbound,
            message_type: result.message_type,
        })
    }

    /// Run one round on a CBOR-encoded `StepInput`, returning a CBOR-encoded
    /// `StepOutput`.
    ///
    /// # Errors
    /// `StepError::Codec` for undecodable input, otherwise as `step_record`.
    pub fn step_cbor(&self, input: &[u8]) -> Result<Vec<u8>, StepError> {
        let input: StepInput = from_cbor(input)?;
        let output = self.step_record(&input)?;
        Ok(to_cbor(&output)?)
    }
}
