use crate::domain::handshake::errors::HandshakeError;
use crate::domain::handshake::params::SECBUFFER_VERSION;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// Type tag carried by every token buffer.
///
/// The tag space is open: engines may emit values this crate has no name
/// for. Those are kept as `Unknown(code)` and passed through unchanged.
/// Equality and hashing go by `code()`, so `Unknown(2)` is the same tag as
/// `Token`.
#[derive(Debug, Clone, Copy)]
pub enum BufferType {
    Empty,
    Data,
    Token,
    PkgParams,
    Missing,
    Extra,
    StreamTrailer,
    StreamHeader,
    Padding,
    Stream,
    ChannelBindings,
    Unknown(u32),
}

impl BufferType {
    /// Engine-level numeric code for this tag.
    #[must_use]
    pub const fn code(self) -> u32 {
        match self {
            Self::Empty => 0,
            Self::Data => 1,
            Self::Token => 2,
            Self::PkgParams => 3,
            Self::Missing => 4,
            Self::Extra => 5,
            Self::StreamTrailer => 6,
            Self::StreamHeader => 7,
            Self::Padding => 9,
            Self::Stream => 10,
            Self::ChannelBindings => 14,
            Self::Unknown(c) => c,
        }
    }

    /// Map an engine code back to a tag; unnamed codes become `Unknown`.
    #[must_use]
    pub const fn from_code(code: u32) -> Self {
        match code {
            0 => Self::Empty,
            1 => Self::Data,
            2 => Self::Token,
            3 => Self::PkgParams,
            4 => Self::Missing,
            5 => Self::Extra,
            6 => Self::StreamTrailer,
            7 => Self::StreamHeader,
            9 => Self::Padding,
            10 => Self::Stream,
            14 => Self::ChannelBindings,
            other => Self::Unknown(other),
        }
    }

    /// Same tag, with a named code spelled by its name.
    #[must_use]
    pub const fn normalized(self) -> Self {
        Self::from_code(self.code())
    }

    fn label(self) -> Option<&'static str> {
        Some(match self {
            Self::Empty => "empty",
            Self::Data => "data",
            Self::Token => "token",
            Self::PkgParams => "pkg_params",
            Self::Missing => "missing",
            Self::Extra => "extra",
            Self::StreamTrailer => "stream_trailer",
            Self::StreamHeader => "stream_header",
            Self::Padding => "padding",
            Self::Stream => "stream",
            Self::ChannelBindings => "channel_bindings",
            Self::Unknown(_) => return None,
        })
    }
}

impl PartialEq for BufferType {
    fn eq(&self, other: &Self) -> bool {
        self.code() == other.code()
    }
}

impl Eq for BufferType {}

impl Hash for BufferType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code().hash(state);
    }
}

impl fmt::Display for BufferType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.normalized().label() {
            Some(l) => f.write_str(l),
            None => write!(f, "unknown({})", self.code()),
        }
    }
}

impl FromStr for BufferType {
    type Err = HandshakeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(inner) = s.strip_prefix("unknown(").and_then(|r| r.strip_suffix(')')) {
            let code = inner
                .parse::<u32>()
                .map_err(|_| HandshakeError::UnknownBufferType(s.to_string()))?;
            // A named code spelled as unknown(N) still maps to its name.
            return Ok(Self::from_code(code));
        }
        (0..=14)
            .map(Self::from_code)
            .find(|t| t.label() == Some(s))
            .ok_or_else(|| HandshakeError::UnknownBufferType(s.to_string()))
    }
}

impl Serialize for BufferType {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for BufferType {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        use std::borrow::Cow;
        let s: Cow<'de, str> = Cow::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// One labeled unit of handshake data (request or response token).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBuffer {
    #[serde(rename = "type")]
    pub buffer_type: BufferType,
    pub data: Vec<u8>,
}

impl TokenBuffer {
    #[must_use]
    pub fn new(buffer_type: BufferType, data: impl Into<Vec<u8>>) -> Self {
        Self {
            buffer_type: buffer_type.normalized(),
            data: data.into(),
        }
    }

    /// Convenience for the common `token` tag.
    #[must_use]
    pub fn token(data: impl Into<Vec<u8>>) -> Self {
        Self::new(BufferType::Token, data)
    }
}

/// Ordered buffers forming the message of a single round.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BufferDescriptor {
    #[serde(default)]
    pub version: u32,
    pub buffers: Vec<TokenBuffer>,
}

impl BufferDescriptor {
    #[must_use]
    pub fn new(buffers: Vec<TokenBuffer>) -> Self {
        Self {
            version: SECBUFFER_VERSION,
            buffers,
        }
    }

    /// Descriptor holding exactly one `token` buffer.
    #[must_use]
    pub fn single_token(data: impl Into<Vec<u8>>) -> Self {
        Self::new(vec![TokenBuffer::token(data)])
    }

    /// First buffer tagged `token`, if any.
    #[must_use]
    pub fn first_token(&self) -> Option<&[u8]> {
        self.buffers
            .iter()
            .find(|b| b.buffer_type.code() == BufferType::Token.code())
            .map(|b| b.data.as_slice())
    }

    /// Sum of all buffer payload lengths.
    #[must_use]
    pub fn total_len(&self) -> usize {
        self.buffers.iter().map(|b| b.data.len()).sum()
    }

    /// Check the shape required of a caller-supplied inbound descriptor.
    ///
    /// # Errors
    /// - `HandshakeError::UnsupportedVersion` if `version` is not `SECBUFFER_VERSION`.
    /// - `HandshakeError::TooManyBuffers` if more than `max_buffers` buffers are present.
    /// - `HandshakeError::MissingToken` if no buffer is tagged `token`.
    pub fn validate_inbound(&self, max_buffers: usize) -> Result<(), HandshakeError> {
        if self.version != SECBUFFER_VERSION {
            return Err(HandshakeError::UnsupportedVersion {
                expected: SECBUFFER_VERSION,
                actual: self.version,
            });
        }
        if self.buffers.len() > max_buffers {
            return Err(HandshakeError::TooManyBuffers {
                max: max_buffers,
                actual: self.buffers.len(),
            });
        }
        if self.first_token().is_none() {
            return Err(HandshakeError::MissingToken);
        }
        Ok(())
    }
}
