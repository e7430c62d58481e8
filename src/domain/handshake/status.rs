use core::fmt;

/// Raw status word returned by the negotiation engine.
///
/// Negative values are errors. Non-negative values are success or
/// informational codes. Only a handful of well-known codes carry a symbolic
/// name; everything else prints as `0xNNNNNNNN`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SecurityStatus(pub i32);

// `as i32` keeps the bit pattern of the documented unsigned values.
#[allow(clippy::cast_possible_wrap)]
impl SecurityStatus {
    pub const OK: Self = Self(0);
    pub const CONTINUE_NEEDED: Self = Self(0x0009_0312);
    pub const COMPLETE_NEEDED: Self = Self(0x0009_0313);
    pub const COMPLETE_AND_CONTINUE: Self = Self(0x0009_0314);
    pub const INSUFFICIENT_MEMORY: Self = Self(0x8009_0300_u32 as i32);
    pub const INVALID_HANDLE: Self = Self(0x8009_0301_u32 as i32);
    pub const INTERNAL_ERROR: Self = Self(0x8009_0304_u32 as i32);
    pub const INVALID_TOKEN: Self = Self(0x8009_0308_u32 as i32);
    pub const LOGON_DENIED: Self = Self(0x8009_030C_u32 as i32);
    pub const NO_CREDENTIALS: Self = Self(0x8009_030E_u32 as i32);
    pub const INCOMPLETE_MESSAGE: Self = Self(0x8009_0318_u32 as i32);
    pub const BUFFER_TOO_SMALL: Self = Self(0x8009_0321_u32 as i32);
}

impl SecurityStatus {
    /// True for every negative (error) status.
    #[must_use]
    pub const fn is_error(self) -> bool {
        self.0 < 0
    }

    /// Symbolic name for well-known codes.
    #[must_use]
    pub fn name(self) -> Option<&'static str> {
        Some(match self {
            Self::OK => "Established",
            Self::CONTINUE_NEEDED => "ContinueNeeded",
            Self::COMPLETE_NEEDED => "CompleteNeeded",
            Self::COMPLETE_AND_CONTINUE => "CompleteAndContinue",
            Self::INSUFFICIENT_MEMORY => "InsufficientMemory",
            Self::INVALID_HANDLE => "InvalidHandle",
            Self::INTERNAL_ERROR => "InternalError",
            Self::INVALID_TOKEN => "InvalidToken",
            Self::LOGON_DENIED => "LogonDenied",
            Self::NO_CREDENTIALS => "NoCredentials",
            Self::INCOMPLETE_MESSAGE => "IncompleteMessage",
            Self::BUFFER_TOO_SMALL => "BufferTooSmall",
            _ => return None,
        })
    }

    /// Always the `0xNNNNNNNN` form, regardless of any symbolic name.
    #[must_use]
    pub fn formatted(self) -> String {
        format!("0x{:08x}", self.0)
    }

    /// Classify into the three caller-meaningful outcomes.
    #[must_use]
    pub fn outcome(self) -> Outcome {
        if self.is_error() {
            return Outcome::Failed(self);
        }
        match self {
            Self::CONTINUE_NEEDED | Self::COMPLETE_AND_CONTINUE => Outcome::ContinueNeeded,
            _ => Outcome::Established,
        }
    }
}

impl fmt::Display for SecurityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(n) => f.write_str(n),
            None => write!(f, "0x{:08x}", self.0),
        }
    }
}

impl fmt::Debug for SecurityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecurityStatus({self} / 0x{:08x})", self.0)
    }
}

/// Normalized result of one handshake step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Session handle valid; the peer must send another token.
    ContinueNeeded,
    /// Handshake complete; the session handle is final.
    Established,
    /// Engine reported an error; any returned handle must be treated as invalid.
    Failed(SecurityStatus),
}

impl Outcome {
    /// True for the two outcomes that come paired with an outbound descriptor.
    #[must_use]
    pub const fn is_success(self) -> bool {
        !matches!(self, Self::Failed(_))
    }
}

/// `ContinueNeeded`, `Established`, or the failure's `0xNNNNNNNN` code.
impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContinueNeeded => f.write_str("ContinueNeeded"),
            Self::Established => f.write_str("Established"),
            Self::Failed(status) => write!(f, "0x{:08x}", status.0),
        }
    }
}
