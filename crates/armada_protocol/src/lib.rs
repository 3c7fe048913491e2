//! # ARMADA Protocol
//!
//! Typed JSON frames for the bot/server connection.
//!
//! The runtime consumes [`InboundMessage`] and produces [`OutboundMessage`];
//! [`codec`] turns them into text and back. Unknown frame and event types
//! decode to an `Unknown` variant instead of failing, so a newer server
//! does not break an older bot.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod codec;
pub mod error;
pub mod events;
pub mod messages;

pub use codec::{decode_inbound, decode_outbound, encode_inbound, encode_outbound};
pub use error::{ProtocolError, ProtocolResult};
pub use events::{
    BotDeathEvent, BotHitBotEvent, BotHitWallEvent, BulletFiredEvent, BulletHitBotEvent,
    BulletHitBulletEvent, BulletHitWallEvent, BulletState, ScannedBotEvent, SkippedTurnEvent,
    WireEvent, WonRoundEvent,
};
pub use messages::{
    BotHandshake, BotIntent, BotResults, BotState, GameEndedEventForBot, GameSetup,
    GameStartedEventForBot, InboundMessage, OutboundMessage, RoundEndedEventForBot,
    RoundStartedEvent, ServerHandshake, TickEventForBot,
};
