//! # ARMADA
//!
//! Write bots for turn-synchronized tank arenas.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                            ARMADA                               │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │  ┌──────────────┐    ┌──────────────┐    ┌──────────────────┐   │
//! │  │ armada_core  │───>│ armada_      │───>│ armada_runtime   │   │
//! │  │              │    │ protocol     │    │                  │   │
//! │  │ • Planner    │    │ • Messages   │    │ • Turn Barrier   │   │
//! │  │ • Intent     │    │ • Events     │    │ • Dispatcher     │   │
//! │  │ • Motion     │    │ • JSON codec │    │ • Bot driver     │   │
//! │  └──────────────┘    └──────────────┘    │ • Connection     │   │
//! │                                          └──────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use armada::prelude::*;
//!
//! struct Circler;
//!
//! impl Bot for Circler {
//!     fn run(ctx: &mut BotContext<Self>) -> BotResult<()> {
//!         ctx.set_target_speed(5.0)?;
//!         ctx.set_turn_rate(5.0)?;
//!         while ctx.is_running() {
//!             ctx.go()?;
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let config = BotConfig::load("bot.toml")?;
//! let (reader, writer) = connect_tcp(&config.server.url)?;
//! let url = config.server.url.clone();
//! Connection::new(url, reader, writer).run(Circler, config)?;
//! # Ok::<(), BotError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod bots;

// Re-export the layers
pub use armada_core as core;
pub use armada_protocol as protocol;
pub use armada_runtime as runtime;

/// Everything a bot author usually needs.
pub mod prelude {
    pub use armada_core::math::{
        bearing_to, bullet_damage, bullet_speed, direction_to, distance_to,
        normalize_absolute_angle, normalize_relative_angle, turns_until_gun_cool,
    };
    pub use armada_core::{Color, Colors};
    pub use armada_protocol::{
        BotDeathEvent, BotHitBotEvent, BotHitWallEvent, BulletFiredEvent, BulletHitBotEvent,
        BulletHitBulletEvent, BulletHitWallEvent, GameEndedEventForBot, GameSetup,
        GameStartedEventForBot, RoundEndedEventForBot, RoundStartedEvent, ScannedBotEvent,
        SkippedTurnEvent, WonRoundEvent,
    };
    pub use armada_runtime::{
        connect_tcp, Actions, Bot, BotConfig, BotContext, BotError, BotResult, Condition,
        Connection, Controller, CustomEvent, HandlerResult, Interrupt, TickSnapshot,
    };
}
