//! # Bot Logic Driver: Controller and Blocking Primitives
//!
//! The bot-logic thread talks to the runtime through [`BotContext`], which
//! owns the bot and its [`Controller`]. [`Bot::run`] and every event handler
//! receive the same context, so `forward`, `turn_left`, `fire`, ... read the
//! same everywhere:
//!
//! ```text
//!   forward(100)
//!     │ set remaining distance         (motion lock)
//!     ▼
//!   go() ── flush intent ──▶ outbox ──▶ server
//!     │
//!     ▼ await_next_turn               (barrier)
//!   dispatch events ──▶ handler ──▶ go() ...
//!     │
//!     └── remaining == 0 ? return : go() again
//! ```
//!
//! Turns taken inside a handler keep dispatching, one level deeper. A nested
//! dispatch stops early when the next event is of the kind being handled, so
//! same-kind events are never handled out of order.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use armada_core::constants::MIN_FIRE_POWER;
use armada_core::{Colors, RemainingMotion};
use armada_protocol::{BotIntent, GameSetup, OutboundMessage};
use tracing::{debug, trace, warn};

use crate::bot::{Bot, HandlerResult, Interrupt};
use crate::conditions::Condition;
use crate::error::BotResult;
use crate::events::{BotEvent, EventKind};
use crate::snapshot::TickSnapshot;
use crate::state::Shared;

// =============================================================================
// CONTROLLER
// =============================================================================

/// The bot's handle on the running round.
pub struct Controller {
    shared: Arc<Shared>,
    tick: Arc<TickSnapshot>,
    my_id: i32,
    game_setup: Arc<GameSetup>,
    last_sent_turn: Option<i32>,
    /// Kinds of the handlers currently on the stack, innermost last.
    dispatching: Vec<EventKind>,
}

impl Controller {
    pub(crate) fn new(shared: Arc<Shared>, tick: Arc<TickSnapshot>, my_id: i32, game_setup: Arc<GameSetup>) -> Self {
        Self {
            shared,
            tick,
            my_id,
            game_setup,
            last_sent_turn: None,
            dispatching: Vec::new(),
        }
    }

    /// False once the round, the game or this bot's life is over.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.shared.barrier.is_running()
    }

    // =========================================================================
    // Turn state
    // =========================================================================

    /// State of the latest turn this thread has seen.
    #[must_use]
    pub fn tick(&self) -> &TickSnapshot {
        &self.tick
    }

    /// Id of this bot in the current game.
    #[must_use]
    pub fn my_id(&self) -> i32 {
        self.my_id
    }

    /// Parameters of the current game.
    #[must_use]
    pub fn game_setup(&self) -> &GameSetup {
        &self.game_setup
    }

    /// Current turn number.
    #[must_use]
    pub fn turn_number(&self) -> i32 {
        self.tick.turn_number
    }

    /// Newest turn the server has published. Ahead of
    /// [`Controller::turn_number`] while the bot is catching up.
    #[must_use]
    pub fn latest_turn(&self) -> i32 {
        self.shared.barrier.current_turn()
    }

    /// Current round number.
    #[must_use]
    pub fn round_number(&self) -> i32 {
        self.tick.round_number
    }

    /// Energy left.
    #[must_use]
    pub fn energy(&self) -> f64 {
        self.tick.bot_state.energy
    }

    /// X coordinate.
    #[must_use]
    pub fn x(&self) -> f64 {
        self.tick.bot_state.x
    }

    /// Y coordinate.
    #[must_use]
    pub fn y(&self) -> f64 {
        self.tick.bot_state.y
    }

    /// Body heading.
    #[must_use]
    pub fn direction(&self) -> f64 {
        self.tick.bot_state.direction
    }

    /// Gun heading.
    #[must_use]
    pub fn gun_direction(&self) -> f64 {
        self.tick.bot_state.gun_direction
    }

    /// Radar heading.
    #[must_use]
    pub fn radar_direction(&self) -> f64 {
        self.tick.bot_state.radar_direction
    }

    /// Speed achieved in the latest turn.
    #[must_use]
    pub fn speed(&self) -> f64 {
        self.tick.bot_state.speed
    }

    /// Gun heat. The gun fires only at zero.
    #[must_use]
    pub fn gun_heat(&self) -> f64 {
        self.tick.bot_state.gun_heat
    }

    /// Opponents still alive.
    #[must_use]
    pub fn enemy_count(&self) -> u32 {
        self.tick.bot_state.enemy_count
    }

    /// Events waiting for the dispatcher.
    #[must_use]
    pub fn pending_events(&self) -> usize {
        self.shared.events.lock().len()
    }

    // =========================================================================
    // Remaining motion
    // =========================================================================

    /// Outstanding distance and rotations.
    #[must_use]
    pub fn remaining(&self) -> RemainingMotion {
        *self.shared.motion.lock().motion.remaining()
    }

    /// Distance still to travel.
    #[must_use]
    pub fn distance_remaining(&self) -> f64 {
        self.remaining().distance
    }

    /// Body rotation still to do.
    #[must_use]
    pub fn turn_remaining(&self) -> f64 {
        self.remaining().turn
    }

    /// Gun rotation still to do.
    #[must_use]
    pub fn gun_turn_remaining(&self) -> f64 {
        self.remaining().gun_turn
    }

    /// Radar rotation still to do.
    #[must_use]
    pub fn radar_turn_remaining(&self) -> f64 {
        self.remaining().radar_turn
    }

    /// Whether motion is stopped by [`Controller::set_stop`].
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.shared.motion.lock().motion.is_stopped()
    }

    // =========================================================================
    // Non-blocking setters (take effect on the next turn)
    // =========================================================================

    /// Moves `distance` units forward (negative = back).
    ///
    /// # Errors
    ///
    /// [`crate::BotError::InvalidArgument`] for NaN.
    pub fn set_forward(&mut self, distance: f64) -> BotResult<()> {
        let speed = self.speed();
        let mut state = self.shared.motion.lock();
        let state = &mut *state;
        state.motion.set_forward(distance, speed, &mut state.intent)?;
        Ok(())
    }

    /// Moves `distance` units backwards.
    ///
    /// # Errors
    ///
    /// [`crate::BotError::InvalidArgument`] for NaN.
    pub fn set_back(&mut self, distance: f64) -> BotResult<()> {
        self.set_forward(-distance)
    }

    /// Travels at `speed` with no distance target.
    ///
    /// # Errors
    ///
    /// [`crate::BotError::InvalidArgument`] for NaN.
    pub fn set_target_speed(&mut self, speed: f64) -> BotResult<()> {
        let mut state = self.shared.motion.lock();
        let state = &mut *state;
        state.motion.set_target_speed(speed, &mut state.intent)?;
        Ok(())
    }

    /// Turns the body left by `degrees`.
    ///
    /// # Errors
    ///
    /// [`crate::BotError::InvalidArgument`] for NaN.
    pub fn set_turn_left(&mut self, degrees: f64) -> BotResult<()> {
        let mut state = self.shared.motion.lock();
        let state = &mut *state;
        state.motion.set_turn(degrees, &mut state.intent)?;
        Ok(())
    }

    /// Turns the body right by `degrees`.
    ///
    /// # Errors
    ///
    /// [`crate::BotError::InvalidArgument`] for NaN.
    pub fn set_turn_right(&mut self, degrees: f64) -> BotResult<()> {
        self.set_turn_left(-degrees)
    }

    /// Turns the gun left by `degrees`.
    ///
    /// # Errors
    ///
    /// [`crate::BotError::InvalidArgument`] for NaN.
    pub fn set_turn_gun_left(&mut self, degrees: f64) -> BotResult<()> {
        let mut state = self.shared.motion.lock();
        let state = &mut *state;
        state.motion.set_gun_turn(degrees, &mut state.intent)?;
        Ok(())
    }

    /// Turns the gun right by `degrees`.
    ///
    /// # Errors
    ///
    /// [`crate::BotError::InvalidArgument`] for NaN.
    pub fn set_turn_gun_right(&mut self, degrees: f64) -> BotResult<()> {
        self.set_turn_gun_left(-degrees)
    }

    /// Turns the radar left by `degrees`.
    ///
    /// # Errors
    ///
    /// [`crate::BotError::InvalidArgument`] for NaN.
    pub fn set_turn_radar_left(&mut self, degrees: f64) -> BotResult<()> {
        let mut state = self.shared.motion.lock();
        let state = &mut *state;
        state.motion.set_radar_turn(degrees, &mut state.intent)?;
        Ok(())
    }

    /// Turns the radar right by `degrees`.
    ///
    /// # Errors
    ///
    /// [`crate::BotError::InvalidArgument`] for NaN.
    pub fn set_turn_radar_right(&mut self, degrees: f64) -> BotResult<()> {
        self.set_turn_radar_left(-degrees)
    }

    /// Turns the body continuously at `rate` degrees per turn.
    ///
    /// # Errors
    ///
    /// [`crate::BotError::InvalidArgument`] for NaN.
    pub fn set_turn_rate(&mut self, rate: f64) -> BotResult<()> {
        let mut state = self.shared.motion.lock();
        let state = &mut *state;
        state.motion.set_turn_rate(rate, &mut state.intent)?;
        Ok(())
    }

    /// Turns the gun continuously at `rate` degrees per turn.
    ///
    /// # Errors
    ///
    /// [`crate::BotError::InvalidArgument`] for NaN.
    pub fn set_gun_turn_rate(&mut self, rate: f64) -> BotResult<()> {
        let mut state = self.shared.motion.lock();
        let state = &mut *state;
        state.motion.set_gun_turn_rate(rate, &mut state.intent)?;
        Ok(())
    }

    /// Turns the radar continuously at `rate` degrees per turn.
    ///
    /// # Errors
    ///
    /// [`crate::BotError::InvalidArgument`] for NaN.
    pub fn set_radar_turn_rate(&mut self, rate: f64) -> BotResult<()> {
        let mut state = self.shared.motion.lock();
        let state = &mut *state;
        state.motion.set_radar_turn_rate(rate, &mut state.intent)?;
        Ok(())
    }

    /// Requests a shot on the next turn.
    ///
    /// Returns `false` without touching the intent if the gun is still hot,
    /// energy is below `power`, or `power` is below the minimum.
    ///
    /// # Errors
    ///
    /// [`crate::BotError::InvalidArgument`] for NaN.
    pub fn set_fire(&mut self, power: f64) -> BotResult<bool> {
        if power.is_nan() {
            return Err(armada_core::MotionError::InvalidArgument {
                name: "fire_power",
                value: power,
            }
            .into());
        }
        if self.gun_heat() > 0.0 || self.energy() < power || power < MIN_FIRE_POWER {
            return Ok(false);
        }
        self.shared.motion.lock().intent.set_fire_power(power)?;
        Ok(true)
    }

    /// Requests a radar rescan on the next turn.
    pub fn set_rescan(&mut self) {
        self.shared.motion.lock().intent.set_rescan();
    }

    /// Keeps the gun heading fixed while the body turns.
    pub fn set_adjust_gun_for_body_turn(&mut self, adjust: bool) {
        self.shared.motion.lock().intent.set_adjust_gun_for_body_turn(adjust);
    }

    /// Keeps the radar heading fixed while the body turns.
    pub fn set_adjust_radar_for_body_turn(&mut self, adjust: bool) {
        self.shared.motion.lock().intent.set_adjust_radar_for_body_turn(adjust);
    }

    /// Keeps the radar heading fixed while the gun turns.
    pub fn set_adjust_radar_for_gun_turn(&mut self, adjust: bool) {
        self.shared.motion.lock().intent.set_adjust_radar_for_gun_turn(adjust);
    }

    /// Replaces all paint colors.
    pub fn set_colors(&mut self, colors: Colors) {
        *self.shared.motion.lock().intent.colors_mut() = colors;
    }

    /// Lowers the speed cap for the rest of the round.
    pub fn set_max_speed(&mut self, max_speed: f64) {
        let mut state = self.shared.motion.lock();
        state.limits.set_max_speed(max_speed);
        let cap = state.limits.max_speed();
        state.motion.set_max_speed(cap);
    }

    /// Lowers the body turn-rate cap.
    pub fn set_max_turn_rate(&mut self, max_rate: f64) {
        self.shared.motion.lock().limits.set_max_turn_rate(max_rate);
    }

    /// Lowers the gun turn-rate cap.
    pub fn set_max_gun_turn_rate(&mut self, max_rate: f64) {
        self.shared.motion.lock().limits.set_max_gun_turn_rate(max_rate);
    }

    /// Lowers the radar turn-rate cap.
    pub fn set_max_radar_turn_rate(&mut self, max_rate: f64) {
        self.shared.motion.lock().limits.set_max_radar_turn_rate(max_rate);
    }

    /// Stops all motion, saving what was outstanding.
    ///
    /// A second stop is ignored unless `overwrite` is set.
    pub fn set_stop(&mut self, overwrite: bool) {
        let mut state = self.shared.motion.lock();
        let state = &mut *state;
        state.motion.stop(&mut state.intent, overwrite);
    }

    /// Restores the motion saved by [`Controller::set_stop`].
    pub fn set_resume(&mut self) {
        let mut state = self.shared.motion.lock();
        let state = &mut *state;
        state.motion.resume(&mut state.intent);
    }

    /// Registers a condition, checked once per turn.
    pub fn add_condition(&mut self, condition: Condition) {
        self.shared.conditions.lock().add(condition);
    }

    /// Removes every condition named `name`.
    pub fn remove_condition(&mut self, name: &str) -> bool {
        self.shared.conditions.lock().remove(name)
    }

    // =========================================================================
    // Turn handling
    // =========================================================================

    /// Sends this turn's intent (once per turn) and waits for the next turn.
    ///
    /// Returns without waiting when the bot is no longer running.
    ///
    /// # Errors
    ///
    /// [`crate::BotError::NotConnected`] or [`crate::BotError::OutboxFull`]
    /// if the intent cannot be queued. The bot stops running in that case.
    fn take_turn(&mut self) -> BotResult<()> {
        if !self.is_running() {
            return Ok(());
        }
        let turn = self.shared.barrier.current_turn();
        if self.last_sent_turn != Some(turn) {
            let snapshot = self.shared.motion.lock().flush();
            self.last_sent_turn = Some(turn);
            trace!(turn, speed = snapshot.target_speed, "sending intent");
            if let Err(e) = self.shared.send(OutboundMessage::BotIntent(BotIntent::from(&snapshot))) {
                warn!(turn, error = %e, "failed to send intent, stopping bot");
                self.shutdown();
                return Err(e);
            }
        }
        if let Ok(tick) = self.shared.barrier.await_next_turn(turn) {
            self.tick = tick;
        }
        Ok(())
    }

    /// Ends the bot-logic thread cooperatively.
    pub(crate) fn shutdown(&self) {
        self.shared.barrier.shutdown();
    }

    /// Removes the next deliverable event, evicting stale ones first.
    ///
    /// Returns `None` when the queue is empty or when the next event is of
    /// the kind the innermost handler is busy with.
    fn next_event(&self) -> Option<BotEvent> {
        let turn = self.shared.barrier.current_turn();
        let held = self.dispatching.last().copied();
        self.shared.events.lock().pop_next_unless(turn, held)
    }

    /// Whether a deliverable event of `kind` is buffered.
    fn has_pending(&self, kind: EventKind) -> bool {
        let turn = self.shared.barrier.current_turn();
        let mut queue = self.shared.events.lock();
        queue.evict_stale(turn);
        queue.contains_kind(kind)
    }

    /// Kind of the innermost handler running, if any.
    #[must_use]
    pub fn handling(&self) -> Option<EventKind> {
        self.dispatching.last().copied()
    }
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("my_id", &self.my_id)
            .field("turn", &self.tick.turn_number)
            .field("last_sent_turn", &self.last_sent_turn)
            .field("dispatching", &self.dispatching)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// BLOCKING PRIMITIVES
// =============================================================================

/// Blocking calls of a bot.
///
/// Each one sets its part of the intent, takes a turn, and keeps taking
/// turns until its goal is reached or the bot stops running. None of them
/// fails on shutdown; they just return.
pub trait Actions {
    /// The controller behind this handle.
    fn controller(&self) -> &Controller;

    /// Mutable access to the controller.
    fn controller_mut(&mut self) -> &mut Controller;

    /// Ends the current turn: sends the intent, waits for the next one and
    /// dispatches the events that came with it.
    ///
    /// # Errors
    ///
    /// [`crate::BotError::NotConnected`] or [`crate::BotError::OutboxFull`].
    fn go(&mut self) -> BotResult<()>;

    /// Takes turns until `done` holds or the bot stops running.
    ///
    /// # Errors
    ///
    /// As [`Actions::go`].
    fn wait_for(&mut self, mut done: impl FnMut(&Controller) -> bool) -> BotResult<()>
    where
        Self: Sized,
    {
        while self.controller().is_running() && !done(self.controller()) {
            self.go()?;
        }
        Ok(())
    }

    /// Moves forward `distance` units and waits until the bot is at rest
    /// on the target.
    ///
    /// # Errors
    ///
    /// [`crate::BotError::InvalidArgument`] for NaN, else as [`Actions::go`].
    fn forward(&mut self, distance: f64) -> BotResult<()>
    where
        Self: Sized,
    {
        if self.controller().is_stopped() {
            return self.go();
        }
        self.controller_mut().set_forward(distance)?;
        self.go()?;
        self.wait_for(|c| c.distance_remaining() == 0.0 && c.speed() == 0.0)
    }

    /// Moves back `distance` units.
    ///
    /// # Errors
    ///
    /// As [`Actions::forward`].
    fn back(&mut self, distance: f64) -> BotResult<()>
    where
        Self: Sized,
    {
        self.forward(-distance)
    }

    /// Turns the body left and waits until done.
    ///
    /// # Errors
    ///
    /// As [`Actions::forward`].
    fn turn_left(&mut self, degrees: f64) -> BotResult<()>
    where
        Self: Sized,
    {
        if self.controller().is_stopped() {
            return self.go();
        }
        self.controller_mut().set_turn_left(degrees)?;
        self.go()?;
        self.wait_for(|c| c.turn_remaining() == 0.0)
    }

    /// Turns the body right and waits until done.
    ///
    /// # Errors
    ///
    /// As [`Actions::forward`].
    fn turn_right(&mut self, degrees: f64) -> BotResult<()>
    where
        Self: Sized,
    {
        self.turn_left(-degrees)
    }

    /// Turns the gun left and waits until done.
    ///
    /// # Errors
    ///
    /// As [`Actions::forward`].
    fn turn_gun_left(&mut self, degrees: f64) -> BotResult<()>
    where
        Self: Sized,
    {
        if self.controller().is_stopped() {
            return self.go();
        }
        self.controller_mut().set_turn_gun_left(degrees)?;
        self.go()?;
        self.wait_for(|c| c.gun_turn_remaining() == 0.0)
    }

    /// Turns the gun right and waits until done.
    ///
    /// # Errors
    ///
    /// As [`Actions::forward`].
    fn turn_gun_right(&mut self, degrees: f64) -> BotResult<()>
    where
        Self: Sized,
    {
        self.turn_gun_left(-degrees)
    }

    /// Turns the radar left and waits until done.
    ///
    /// # Errors
    ///
    /// As [`Actions::forward`].
    fn turn_radar_left(&mut self, degrees: f64) -> BotResult<()>
    where
        Self: Sized,
    {
        if self.controller().is_stopped() {
            return self.go();
        }
        self.controller_mut().set_turn_radar_left(degrees)?;
        self.go()?;
        self.wait_for(|c| c.radar_turn_remaining() == 0.0)
    }

    /// Turns the radar right and waits until done.
    ///
    /// # Errors
    ///
    /// As [`Actions::forward`].
    fn turn_radar_right(&mut self, degrees: f64) -> BotResult<()>
    where
        Self: Sized,
    {
        self.turn_radar_left(-degrees)
    }

    /// Fires and waits until the shot registers (gun heat above zero).
    ///
    /// Returns `false` at once if the shot is refused, see
    /// [`Controller::set_fire`].
    ///
    /// # Errors
    ///
    /// As [`Actions::forward`].
    fn fire(&mut self, power: f64) -> BotResult<bool>
    where
        Self: Sized,
    {
        if !self.controller_mut().set_fire(power)? {
            return Ok(false);
        }
        self.go()?;
        self.wait_for(|c| c.gun_heat() > 0.0 || c.energy() <= 0.0)?;
        Ok(true)
    }

    /// Stops all motion and takes a turn.
    ///
    /// # Errors
    ///
    /// As [`Actions::go`].
    fn stop(&mut self) -> BotResult<()>
    where
        Self: Sized,
    {
        self.controller_mut().set_stop(false);
        self.go()
    }

    /// Resumes motion saved by [`Actions::stop`] and takes a turn.
    ///
    /// # Errors
    ///
    /// As [`Actions::go`].
    fn resume(&mut self) -> BotResult<()>
    where
        Self: Sized,
    {
        self.controller_mut().set_resume();
        self.go()
    }
}

// =============================================================================
// BOT CONTEXT
// =============================================================================

/// The bot plus its controller, as seen by [`Bot::run`] and the event
/// handlers.
///
/// Dereferences to [`Controller`] for state queries and setters.
pub struct BotContext<B: Bot> {
    bot: B,
    controller: Controller,
}

impl<B: Bot> BotContext<B> {
    pub(crate) fn new(bot: B, controller: Controller) -> Self {
        Self { bot, controller }
    }

    /// The bot.
    #[must_use]
    pub fn bot(&self) -> &B {
        &self.bot
    }

    /// The bot, mutably.
    pub fn bot_mut(&mut self) -> &mut B {
        &mut self.bot
    }

    /// Scans for one turn.
    ///
    /// Inside an event handler: if an event of the kind being handled is
    /// still waiting after the turn, returns [`Interrupt::Rescan`] so the
    /// handler can bail out with `?`. The dispatcher swallows it and delivers
    /// the waiting event next. From [`Bot::run`] use
    /// [`Controller::set_rescan`] and [`Actions::go`].
    ///
    /// # Errors
    ///
    /// [`Interrupt::Rescan`] as above; [`Interrupt::Failed`] if the intent
    /// cannot be sent.
    pub fn scan(&mut self) -> HandlerResult {
        self.controller.set_rescan();
        self.go()?;
        match self.controller.handling() {
            Some(kind) if self.controller.has_pending(kind) => {
                debug!(?kind, "rescan interrupts handler");
                Err(Interrupt::Rescan)
            }
            _ => Ok(()),
        }
    }

    pub(crate) fn into_bot(self) -> B {
        self.bot
    }

    /// Delivers buffered events until the queue is empty, the bot stops, or
    /// the next event is of the kind an enclosing handler is busy with.
    pub(crate) fn dispatch_events(&mut self) {
        while self.controller.is_running() {
            let Some(event) = self.controller.next_event() else {
                break;
            };
            let kind = event.kind();
            trace!(?kind, depth = self.controller.dispatching.len(), "dispatching");
            self.controller.dispatching.push(kind);
            let result = deliver(self, &event);
            self.controller.dispatching.pop();

            match result {
                Ok(()) => {}
                Err(Interrupt::Rescan) => debug!(?kind, "handler interrupted by rescan"),
                Err(Interrupt::Failed(e)) => warn!(?kind, error = %e, "event handler failed"),
            }
            if kind == EventKind::Death {
                debug!(turn = event.turn_number(), "bot died, stopping");
                self.controller.shutdown();
            }
        }
    }
}

impl<B: Bot> Actions for BotContext<B> {
    fn controller(&self) -> &Controller {
        &self.controller
    }

    fn controller_mut(&mut self) -> &mut Controller {
        &mut self.controller
    }

    fn go(&mut self) -> BotResult<()> {
        self.controller.take_turn()?;
        self.dispatch_events();
        Ok(())
    }
}

impl<B: Bot> Deref for BotContext<B> {
    type Target = Controller;

    fn deref(&self) -> &Controller {
        &self.controller
    }
}

impl<B: Bot> DerefMut for BotContext<B> {
    fn deref_mut(&mut self) -> &mut Controller {
        &mut self.controller
    }
}

impl<B: Bot> std::fmt::Debug for BotContext<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotContext")
            .field("controller", &self.controller)
            .finish_non_exhaustive()
    }
}

/// Routes one event to its handler.
fn deliver<B: Bot>(ctx: &mut BotContext<B>, event: &BotEvent) -> HandlerResult {
    match event {
        BotEvent::Tick(e) => B::on_tick(ctx, e),
        BotEvent::ScannedBot(e) => B::on_scanned_bot(ctx, e),
        BotEvent::HitBot(e) => B::on_hit_bot(ctx, e),
        BotEvent::HitWall(e) => B::on_hit_wall(ctx, e),
        BotEvent::BulletFired(e) => B::on_bullet_fired(ctx, e),
        BotEvent::BulletHitWall(e) => B::on_bullet_hit_wall(ctx, e),
        BotEvent::HitByBullet(e) => B::on_hit_by_bullet(ctx, e),
        BotEvent::BulletHit(e) => B::on_bullet_hit(ctx, e),
        BotEvent::BulletHitBullet(e) => B::on_bullet_hit_bullet(ctx, e),
        BotEvent::Death(e) => B::on_death(ctx, e),
        BotEvent::BotDeath(e) => B::on_bot_death(ctx, e),
        BotEvent::SkippedTurn(e) => B::on_skipped_turn(ctx, e),
        BotEvent::Custom(e) => B::on_custom_event(ctx, e),
        BotEvent::WonRound(e) => B::on_won_round(ctx, e),
    }
}
