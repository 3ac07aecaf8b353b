use thiserror::Error;

/// Unified codec error covering scheme, transport encoding, record grammar
/// and relay pairing.
/// - Every structural mismatch is a hard failure; nothing is coerced.
/// - `field` names are stable so callers can match on them in logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StampError {
    /// Input does not start with `sdns://`.
    #[error("stamps are expected to start with \"{expected}\"")]
    BadScheme { expected: &'static str },

    /// Payload after the scheme is not valid base64url.
    #[error("invalid base64url payload: {0}")]
    BadEncoding(String),

    /// Leading tag byte is not a known protocol.
    #[error("unknown stamp protocol: 0x{raw:02x}")]
    UnknownProtocol { raw: u8 },

    /// Record ended before `field` was fully read.
    #[error("stamp truncated while reading {field}: need {need} bytes, have {have}")]
    TruncatedInput { field: &'static str, need: usize, have: usize },

    /// Bytes remain after the last field of the layout.
    #[error("garbage after end of stamp: {count} trailing bytes")]
    TrailingBytes { count: usize },

    /// A field is missing, malformed or out of range.
    #[error("invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    /// Relay pair separator missing or a half is unusable.
    #[error("malformed relay pair: {reason}")]
    MalformedPair { reason: String },
}

impl StampError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        StampError::InvalidField { field, reason: reason.into() }
    }

    pub(crate) fn truncated(field: &'static str, need: usize, have: usize) -> Self {
        StampError::TruncatedInput { field, need, have }
    }
}

impl From<base64::DecodeError> for StampError {
    fn from(e: base64::DecodeError) -> Self {
        StampError::BadEncoding(e.to_string())
    }
}
