//! # ARMADA Runtime
//!
//! Turn-synchronized execution of one bot against a game server.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────── network path ────────────────────────────┐
//! │ Connection ─▶ BotRuntime::handle_message                             │
//! │                 │ tick: motion update, queue events, barrier.advance │
//! └─────────────────┼────────────────────────────────────────────────────┘
//!                   ▼
//!   Shared { TurnBarrier, Mutex<MotionState>, Mutex<EventQueue>, ... }
//!                   ▲
//! ┌─────────────────┼────────────── bot-logic thread ────────────────────┐
//! │ Bot::run(ctx) ─▶ forward / turn / fire / go                          │
//! │                   flush intent ─▶ outbox ─▶ armada-writer            │
//! │                   await_next_turn, then dispatch events to handlers  │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Guarantees
//!
//! - One intent per turn at most, sent before the bot waits
//! - The network path never waits for bot logic
//! - Every blocking call returns promptly once the round ends
//! - Handlers that block keep receiving other events; events of the kind
//!   being handled wait until that handler returns
//! - Events older than the configured age are dropped, except death and
//!   round wins

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::float_cmp, clippy::module_name_repetitions)]

pub mod barrier;
pub mod bot;
pub mod conditions;
pub mod config;
pub mod connection;
pub mod context;
pub mod driver;
pub mod error;
pub mod events;
pub mod queue;
pub mod runtime;
pub mod snapshot;
mod state;

pub use barrier::{NotRunning, TurnBarrier};
pub use bot::{Bot, HandlerResult, Interrupt};
pub use conditions::{Condition, ConditionSet};
pub use config::BotConfig;
pub use connection::{
    channel_transport, connect_tcp, ChannelReader, ChannelWriter, Connection, FrameReader,
    FrameWriter, LineReader, LineWriter, ServerEnd,
};
pub use context::{Actions, BotContext, Controller};
pub use driver::DriverState;
pub use error::{BotError, BotResult};
pub use events::{BotEvent, CustomEvent, EventKind};
pub use queue::EventQueue;
pub use runtime::BotRuntime;
pub use snapshot::TickSnapshot;
