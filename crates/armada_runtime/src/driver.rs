//! # Bot Thread Driver
//!
//! Owns the user bot between rounds and the bot-logic thread during a
//! round. The thread takes the bot by value and hands it back through its
//! `JoinHandle`, so the bot is never shared:
//!
//! ```text
//!   Idle(bot) ──start──▶ Running { handle } ──stop + join──▶ Idle(bot)
//!                                 │
//!                                 └── thread panicked ──▶ Lost
//! ```

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use armada_protocol::GameSetup;
use tracing::{error, info};

use crate::bot::Bot;
use crate::context::{Actions, BotContext, Controller};
use crate::error::{BotError, BotResult};
use crate::snapshot::TickSnapshot;
use crate::state::Shared;

/// Where the user bot currently lives.
enum BotSlot<B> {
    /// On the network path; lifecycle callbacks may run.
    Idle(B),
    /// Moved into the bot-logic thread for `round`.
    Running {
        round: i32,
        handle: JoinHandle<B>,
    },
    /// The bot-logic thread panicked and took the bot with it.
    Lost,
}

/// State of the driver, for diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    /// No thread; the bot is available.
    Idle,
    /// A bot-logic thread runs the given round.
    Running(i32),
    /// The bot was lost to a panic.
    Lost,
}

/// Starts, stops and joins the bot-logic thread.
pub(crate) struct BotDriver<B: Bot> {
    slot: BotSlot<B>,
    shared: Arc<Shared>,
}

impl<B: Bot> BotDriver<B> {
    pub fn new(bot: B, shared: Arc<Shared>) -> Self {
        Self {
            slot: BotSlot::Idle(bot),
            shared,
        }
    }

    pub fn state(&self) -> DriverState {
        match &self.slot {
            BotSlot::Idle(_) => DriverState::Idle,
            BotSlot::Running { round, .. } => DriverState::Running(*round),
            BotSlot::Lost => DriverState::Lost,
        }
    }

    /// Runs `f` on the bot if no thread owns it.
    pub fn with_idle_bot(&mut self, f: impl FnOnce(&mut B)) {
        if let BotSlot::Idle(bot) = &mut self.slot {
            f(bot);
        }
    }

    /// Starts the bot-logic thread for `round`, stopping any previous one.
    ///
    /// # Errors
    ///
    /// [`BotError::BotPanicked`] if there is no bot to run,
    /// [`BotError::Io`] if the thread cannot be spawned.
    pub fn start(&mut self, round: i32, tick: Arc<TickSnapshot>, my_id: i32, game_setup: Arc<GameSetup>) -> BotResult<()> {
        self.stop()?;
        let BotSlot::Idle(bot) = std::mem::replace(&mut self.slot, BotSlot::Lost) else {
            return Err(BotError::BotPanicked);
        };

        self.shared.barrier.start();
        let controller = Controller::new(Arc::clone(&self.shared), tick, my_id, game_setup);
        let spawned = thread::Builder::new()
            .name(format!("armada-bot-r{round}"))
            .spawn(move || run_bot(BotContext::new(bot, controller)));

        match spawned {
            Ok(handle) => {
                info!(round, "bot thread started");
                self.slot = BotSlot::Running { round, handle };
                Ok(())
            }
            Err(e) => {
                self.shared.barrier.shutdown();
                error!(round, error = %e, "failed to spawn bot thread");
                Err(e.into())
            }
        }
    }

    /// Signals the bot-logic thread to stop and joins it.
    ///
    /// Does nothing if no thread is running.
    ///
    /// # Errors
    ///
    /// [`BotError::BotPanicked`] if the thread panicked.
    pub fn stop(&mut self) -> BotResult<()> {
        self.shared.barrier.shutdown();
        if !matches!(self.slot, BotSlot::Running { .. }) {
            return Ok(());
        }
        let BotSlot::Running { round, handle } = std::mem::replace(&mut self.slot, BotSlot::Lost) else {
            return Ok(());
        };
        match handle.join() {
            Ok(bot) => {
                info!(round, "bot thread stopped");
                self.slot = BotSlot::Idle(bot);
                Ok(())
            }
            Err(_) => {
                error!(round, "bot thread panicked");
                Err(BotError::BotPanicked)
            }
        }
    }

    /// Stops the thread and gives the bot back, if it survived.
    pub fn into_bot(mut self) -> Option<B> {
        if let Err(e) = self.stop() {
            error!(error = %e, "bot lost during shutdown");
        }
        match std::mem::replace(&mut self.slot, BotSlot::Lost) {
            BotSlot::Idle(bot) => Some(bot),
            BotSlot::Running { .. } | BotSlot::Lost => None,
        }
    }
}

/// Body of the bot-logic thread.
fn run_bot<B: Bot>(mut ctx: BotContext<B>) -> B {
    if let Err(e) = B::run(&mut ctx) {
        error!(error = %e, "bot run routine failed");
    }
    while ctx.is_running() {
        if ctx.go().is_err() {
            break;
        }
    }
    ctx.into_bot()
}
