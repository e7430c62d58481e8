/// ---- Negotiate package parameters ----
/// Limits and flag values shared by the step executor, the token buffer
/// adapter and the engine port. The scratch capacity is a hard ceiling: the
/// engine reports overflow through its status, buffers never grow past it.

/// Maximum size of one outbound token (one scratch buffer per round).
pub const MAX_MESSAGE: usize = 12000;
/// Buffer descriptor version understood by the engine.
pub const SECBUFFER_VERSION: u32 = 0;
/// Default upper bound on the number of buffers in an inbound descriptor.
pub const MAX_INBOUND_BUFFERS: usize = 8;

/// Request a connection-oriented context.
pub const ASC_REQ_CONNECTION: u32 = 0x0000_0800;
/// Native byte ordering for the engine's data representation argument.
pub const SECURITY_NATIVE_DREP: u32 = 0x0000_0010;

/// Encoded handle length: two machine words, 16 hex digits each.
pub(crate) const HANDLE_HEX_LEN: usize = 32;
/// Number of leading hex digits shown when a handle is displayed.
pub(crate) const HANDLE_REDACT_LEN: usize = 8;
