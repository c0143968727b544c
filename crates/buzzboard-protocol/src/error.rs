//! Error types for the protocol layer.

/// Errors that can occur while encoding or decoding events.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning an event into a text frame).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed: malformed JSON, an unknown event name, or
    /// a payload that doesn't match the event's schema.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The frame is invalid at the protocol level — it parsed, but can't
    /// be interpreted (e.g., a non-text frame where text is required).
    #[error("invalid frame: {0}")]
    InvalidFrame(String),
}
