//! # Protocol Error Types

use thiserror::Error;

/// Errors raised while encoding or decoding frames.
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// An inbound frame was not valid JSON or did not match any message.
    #[error("failed to decode frame: {0}")]
    Decode(#[source] serde_json::Error),

    /// An outbound message could not be serialized.
    #[error("failed to encode {kind}: {source}")]
    Encode {
        /// Message type.
        kind: &'static str,
        /// Underlying serializer error.
        #[source]
        source: serde_json::Error,
    },

    /// A well-formed message arrived in a state that does not expect it.
    #[error("unexpected message: {0}")]
    UnexpectedMessage(String),
}

/// Result type for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;
