//! Codec trait and the JSON implementation.
//!
//! The solver leg of the protocol and the dimensions request both carry
//! structured values. [`Codec`] is the seam between those values and raw
//! bytes; [`JsonCodec`] is the encoding the remote services speak.

use serde::{de::DeserializeOwned, Serialize};

use crate::ProtocolError;

/// A codec that can encode Rust types to bytes and decode bytes back.
///
/// `DeserializeOwned` means the decoded value owns its data, so the
/// receive buffer can be dropped right after decoding.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed,
    /// incomplete, or don't match the expected type.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// ```rust
/// use mazeway_protocol::{Codec, JsonCodec, Position};
///
/// let codec = JsonCodec;
/// let bytes = codec.encode(&Position::new(1, 2)).unwrap();
/// assert_eq!(bytes, br#"{"row":1,"col":2}"#);
///
/// let back: Position = codec.decode(&bytes).unwrap();
/// assert_eq!(back, Position::new(1, 2));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}
