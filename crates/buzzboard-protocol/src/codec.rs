//! Codec trait and implementations for serializing/deserializing events.
//!
//! A codec converts between Rust event types and the text frames that
//! travel over the transport. The rest of the stack only depends on the
//! [`Codec`] trait, so the frame format can change without touching the
//! room or the handler.
//!
//! Currently we provide [`JsonCodec`], which matches the JSON wire shapes
//! documented in [`crate::types`].

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// Encodes events to text frames and decodes frames back.
///
/// `Send + Sync + 'static` because the codec is shared across connection
/// handler tasks. The methods are generic over the serde traits so one
/// codec serves both [`ClientEvent`](crate::ClientEvent) and
/// [`ServerEvent`](crate::ServerEvent).
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into a text frame.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<String, ProtocolError>;

    /// Deserializes a text frame back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the frame is malformed, names an
    /// unknown event, or carries a payload of the wrong shape.
    fn decode<T: DeserializeOwned>(&self, text: &str) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// Human-readable, inspectable in browser DevTools, and directly compatible
/// with the web client. Behind the `json` feature flag (enabled by default).
///
/// ## Example
///
/// ```rust
/// use buzzboard_protocol::{ClientEvent, Codec, JsonCodec};
///
/// let codec = JsonCodec;
///
/// let text = codec.encode(&ClientEvent::Press).unwrap();
/// assert_eq!(text, r#"{"event":"buzzer:press"}"#);
///
/// let decoded: ClientEvent = codec.decode(&text).unwrap();
/// assert_eq!(decoded, ClientEvent::Press);
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<String, ProtocolError> {
        serde_json::to_string(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, text: &str) -> Result<T, ProtocolError> {
        serde_json::from_str(text).map_err(ProtocolError::Decode)
    }
}
