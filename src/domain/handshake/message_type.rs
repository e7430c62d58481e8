//! Classification of inbound negotiate tokens for diagnostics.
//!
//! Purely structural: looks at a token's framing bytes and never parses or
//! validates its contents. The engine remains the only judge of validity.

use core::fmt;
use serde::{Deserialize, Serialize};

const NTLM_SIGNATURE: &[u8; 8] = b"NTLMSSP\0";
/// GSS-API initial context token (`[APPLICATION 0]`).
const KERBEROS_INITIAL_TAG: u8 = 0x60;
/// SPNEGO `NegTokenResp` (`[1]` context tag).
const KERBEROS_NEXT_TAG: u8 = 0xa1;

/// What kind of message an inbound token looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageType {
    Unknown,
    NtlmNegotiate,
    NtlmChallenge,
    NtlmAuthenticate,
    KerberosInitial,
    KerberosNext,
}

/// Underlying mechanism negotiated by the package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthMethod {
    Ntlm,
    Kerberos,
}

impl MessageType {
    /// Classify a raw token. NTLM messages are recognized both bare and
    /// wrapped in SPNEGO.
    #[must_use]
    pub fn classify(token: &[u8]) -> Self {
        if let Some(t) = ntlm_message_type(token) {
            return t;
        }
        match token.first() {
            Some(&KERBEROS_INITIAL_TAG) => Self::KerberosInitial,
            Some(&KERBEROS_NEXT_TAG) => Self::KerberosNext,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub const fn method(self) -> Option<AuthMethod> {
        match self {
            Self::NtlmNegotiate | Self::NtlmChallenge | Self::NtlmAuthenticate => {
                Some(AuthMethod::Ntlm)
            }
            Self::KerberosInitial | Self::KerberosNext => Some(AuthMethod::Kerberos),
            Self::Unknown => None,
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unknown => "Unknown",
            Self::NtlmNegotiate => "NTLM_NEGOTIATE_01",
            Self::NtlmChallenge => "NTLM_CHALLENGE_02",
            Self::NtlmAuthenticate => "NTLM_AUTHENTICATE_03",
            Self::KerberosInitial => "Kerberos_1",
            Self::KerberosNext => "Kerberos_N",
        })
    }
}

fn ntlm_message_type(token: &[u8]) -> Option<MessageType> {
    let at = token
        .windows(NTLM_SIGNATURE.len())
        .position(|w| w == NTLM_SIGNATURE)?;
    let ty = token.get(at + 8..at + 12)?;
    let ty = u32::from_le_bytes([ty[0], ty[1], ty[2], ty[3]]);
    match ty {
        1 => Some(MessageType::NtlmNegotiate),
        2 => Some(MessageType::NtlmChallenge),
        3 => Some(MessageType::NtlmAuthenticate),
        _ => None,
    }
}
