use thiserror::Error;

/// Errors that can occur while reading a relay frame off the wire
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireError {
    /// Frame carried no bytes at all
    #[error("Received an empty relay frame. Every frame must start with a message tag")]
    EmptyFrame,

    /// Leading tag byte does not name a known message kind
    #[error("Unknown relay message tag {tag:#04x}. Frame is malformed or from another version")]
    UnknownTag { tag: u8 },

    /// Frame ended before a required field
    #[error("Relay frame truncated: missing {field}")]
    Truncated { field: &'static str },

    /// Sync payload criticality byte was neither 0 nor 1
    #[error("Invalid criticality flag {flag:#04x} on sync payload. Expected 0x00 or 0x01")]
    InvalidCriticality { flag: u8 },

    /// Identity announcement did not start with the session id prefix
    #[error("Identity announcement is missing the `SessionID:` prefix")]
    MissingPrefix,

    /// Session identifier bytes were not valid UTF-8
    #[error("Identity announcement carries a session id that is not valid UTF-8")]
    InvalidUtf8,

    /// Session identifier was empty after the prefix
    #[error("Identity announcement carries an empty session id")]
    EmptySessionId,
}
