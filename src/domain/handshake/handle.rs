use core::fmt;

/// Shared view over the two opaque machine words that make up an engine
/// handle. Implemented by every handle kind that crosses the call boundary so
/// a single codec serves them all.
pub trait OpaqueHandle: Copy {
    /// Human-readable kind, used in codec error messages.
    const KIND: &'static str;

    /// Rebuild the handle from its two words.
    fn from_words(lower: u64, upper: u64) -> Self;

    /// The `(lower, upper)` word pair.
    fn words(&self) -> (u64, u64);
}

/// Identity token issued by an external credential-acquisition step.
///
/// Caller-owned and immutable; only decoded for use in a single step.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CredentialRef {
    lower: u64,
    upper: u64,
}

/// One in-progress or completed handshake.
///
/// Absent on the first step of a session and produced by the engine on every
/// step (the first included). The executor keeps no copy: between steps the
/// caller is the only holder, in the encoded form.
///
/// The all-zero value is a legitimate handle here. "No prior session" is
/// expressed as `Option::None` by callers, never by a zero handle.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionHandle {
    lower: u64,
    upper: u64,
}

impl OpaqueHandle for CredentialRef {
    const KIND: &'static str = "credential";

    fn from_words(lower: u64, upper: u64) -> Self {
        Self { lower, upper }
    }

    fn words(&self) -> (u64, u64) {
        (self.lower, self.upper)
    }
}

impl OpaqueHandle for SessionHandle {
    const KIND: &'static str = "session handle";

    fn from_words(lower: u64, upper: u64) -> Self {
        Self { lower, upper }
    }

    fn words(&self) -> (u64, u64) {
        (self.lower, self.upper)
    }
}

impl CredentialRef {
    #[must_use]
    pub const fn new(lower: u64, upper: u64) -> Self {
        Self { lower, upper }
    }
}

impl SessionHandle {
    #[must_use]
    pub const fn new(lower: u64, upper: u64) -> Self {
        Self { lower, upper }
    }

    /// True when both words are zero (an engine-issued "uninitialized" context).
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.lower == 0 && self.upper == 0
    }
}

// Handles are opaque; Debug shows only the leading lower word digits.
fn fmt_redacted(name: &str, lower: u64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let digits = format!("{lower:016x}");
    write!(
        f,
        "{name}({}…)",
        &digits[..super::params::HANDLE_REDACT_LEN]
    )
}

impl fmt::Debug for CredentialRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_redacted("CredentialRef", self.lower, f)
    }
}

impl fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_redacted("SessionHandle", self.lower, f)
    }
}
