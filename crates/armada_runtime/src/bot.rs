//! # The Bot Trait
//!
//! What a bot author implements.
//!
//! ```rust,ignore
//! struct Spinner;
//!
//! impl Bot for Spinner {
//!     fn run(ctx: &mut BotContext<Self>) -> BotResult<()> {
//!         while ctx.is_running() {
//!             ctx.forward(100.0)?;
//!             ctx.turn_right(90.0)?;
//!         }
//!         Ok(())
//!     }
//!
//!     fn on_scanned_bot(ctx: &mut BotContext<Self>, _: &ScannedBotEvent) -> HandlerResult {
//!         ctx.fire(2.0)?;
//!         ctx.scan()
//!     }
//! }
//! ```
//!
//! Two groups of callbacks exist:
//! - **Turn events** (`on_tick`, `on_scanned_bot`, ...) run on the bot-logic
//!   thread between turns and get the same [`BotContext`] as `run`. Blocking
//!   calls made inside a handler keep delivering other events.
//! - **Lifecycle callbacks** (`on_connected`, `on_round_started`, ...) run on
//!   the network path while no round is in progress. They only see the bot.

use armada_protocol::{
    BotDeathEvent, BotHitBotEvent, BotHitWallEvent, BulletFiredEvent, BulletHitBotEvent,
    BulletHitBulletEvent, BulletHitWallEvent, GameEndedEventForBot, GameStartedEventForBot,
    RoundEndedEventForBot, RoundStartedEvent, ScannedBotEvent, SkippedTurnEvent, WonRoundEvent,
};

use crate::context::BotContext;
use crate::error::{BotError, BotResult};
use crate::events::CustomEvent;
use crate::snapshot::TickSnapshot;

/// Early exit from an event handler.
#[derive(Debug)]
pub enum Interrupt {
    /// A fresh scan arrived while the previous one was being handled.
    ///
    /// Raised only by [`BotContext::scan`]. The dispatcher swallows it at
    /// the handler boundary and delivers the new scan next.
    Rescan,
    /// The handler failed.
    Failed(BotError),
}

impl From<BotError> for Interrupt {
    fn from(error: BotError) -> Self {
        Self::Failed(error)
    }
}

/// Result of an event handler.
pub type HandlerResult = Result<(), Interrupt>;

/// A bot program.
#[allow(unused_variables)]
pub trait Bot: Send + 'static {
    /// Main routine, started on the first turn of every round.
    ///
    /// When it returns, the runtime keeps sending turns until the round ends.
    ///
    /// # Errors
    ///
    /// Any error ends the routine early; it is logged and the round goes on.
    fn run(ctx: &mut BotContext<Self>) -> BotResult<()>
    where
        Self: Sized,
    {
        Ok(())
    }

    // =========================================================================
    // Turn events (bot-logic thread)
    // =========================================================================

    /// A new turn began.
    fn on_tick(ctx: &mut BotContext<Self>, tick: &TickSnapshot) -> HandlerResult
    where
        Self: Sized,
    {
        Ok(())
    }

    /// The radar saw another bot.
    fn on_scanned_bot(ctx: &mut BotContext<Self>, event: &ScannedBotEvent) -> HandlerResult
    where
        Self: Sized,
    {
        Ok(())
    }

    /// This bot collided with another bot.
    fn on_hit_bot(ctx: &mut BotContext<Self>, event: &BotHitBotEvent) -> HandlerResult
    where
        Self: Sized,
    {
        Ok(())
    }

    /// This bot hit a wall.
    fn on_hit_wall(ctx: &mut BotContext<Self>, event: &BotHitWallEvent) -> HandlerResult
    where
        Self: Sized,
    {
        Ok(())
    }

    /// This bot fired.
    fn on_bullet_fired(ctx: &mut BotContext<Self>, event: &BulletFiredEvent) -> HandlerResult
    where
        Self: Sized,
    {
        Ok(())
    }

    /// A bullet of this bot hit a wall.
    fn on_bullet_hit_wall(ctx: &mut BotContext<Self>, event: &BulletHitWallEvent) -> HandlerResult
    where
        Self: Sized,
    {
        Ok(())
    }

    /// This bot was hit.
    fn on_hit_by_bullet(ctx: &mut BotContext<Self>, event: &BulletHitBotEvent) -> HandlerResult
    where
        Self: Sized,
    {
        Ok(())
    }

    /// A bullet of this bot hit another bot.
    fn on_bullet_hit(ctx: &mut BotContext<Self>, event: &BulletHitBotEvent) -> HandlerResult
    where
        Self: Sized,
    {
        Ok(())
    }

    /// A bullet of this bot hit another bullet.
    fn on_bullet_hit_bullet(ctx: &mut BotContext<Self>, event: &BulletHitBulletEvent) -> HandlerResult
    where
        Self: Sized,
    {
        Ok(())
    }

    /// This bot died. The bot-logic thread ends after this handler.
    fn on_death(ctx: &mut BotContext<Self>, event: &BotDeathEvent) -> HandlerResult
    where
        Self: Sized,
    {
        Ok(())
    }

    /// Another bot died.
    fn on_bot_death(ctx: &mut BotContext<Self>, event: &BotDeathEvent) -> HandlerResult
    where
        Self: Sized,
    {
        Ok(())
    }

    /// The server did not get this bot's intent in time.
    fn on_skipped_turn(ctx: &mut BotContext<Self>, event: &SkippedTurnEvent) -> HandlerResult
    where
        Self: Sized,
    {
        Ok(())
    }

    /// A registered condition holds.
    fn on_custom_event(ctx: &mut BotContext<Self>, event: &CustomEvent) -> HandlerResult
    where
        Self: Sized,
    {
        Ok(())
    }

    /// This bot won the round.
    fn on_won_round(ctx: &mut BotContext<Self>, event: &WonRoundEvent) -> HandlerResult
    where
        Self: Sized,
    {
        Ok(())
    }

    // =========================================================================
    // Lifecycle (network path, bot idle)
    // =========================================================================

    /// Connected to the server.
    fn on_connected(&mut self, url: &str) {}

    /// The connection closed.
    fn on_disconnected(&mut self, remote_closed: bool) {}

    /// The connection failed.
    fn on_connection_error(&mut self, error: &BotError) {}

    /// A game started.
    fn on_game_started(&mut self, event: &GameStartedEventForBot) {}

    /// The game ended.
    fn on_game_ended(&mut self, event: &GameEndedEventForBot) {}

    /// The server aborted the game.
    fn on_game_aborted(&mut self) {}

    /// A round started. The bot-logic thread follows on the first turn.
    fn on_round_started(&mut self, event: &RoundStartedEvent) {}

    /// A round ended.
    fn on_round_ended(&mut self, event: &RoundEndedEventForBot) {}
}
