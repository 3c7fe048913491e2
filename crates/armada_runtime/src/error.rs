//! # Runtime Error Types
//!
//! One taxonomy for everything a bot can run into:
//! - Bad arguments (NaN distances, angles)
//! - State that is not available yet (no game, no tick)
//! - Transport trouble (closed connection, full outbox)
//!
//! A refused shot is not an error: `fire` returns `false` instead.

use armada_core::MotionError;
use armada_protocol::ProtocolError;
use thiserror::Error;

/// Errors raised by the runtime.
#[derive(Error, Debug)]
pub enum BotError {
    /// A motion or intent argument was rejected.
    #[error(transparent)]
    InvalidArgument(#[from] MotionError),

    /// The requested state does not exist yet, or no longer.
    #[error("{0} is not available: no game in progress or no turn received yet")]
    NotReady(&'static str),

    /// The connection to the server is closed.
    #[error("not connected to the server")]
    NotConnected,

    /// The outbound queue is full; the writer is not keeping up.
    #[error("outbound queue is full")]
    OutboxFull,

    /// A frame could not be encoded or decoded.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The configuration is invalid.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Socket or file I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The bot-logic thread panicked. The bot instance is lost.
    #[error("bot thread panicked")]
    BotPanicked,
}

/// Result type for runtime operations.
pub type BotResult<T> = Result<T, BotError>;
