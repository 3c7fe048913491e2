//! # Bot Runtime
//!
//! Message handlers for one bot's session. The Connection Shell decodes
//! frames and calls [`BotRuntime::handle_message`]; everything here runs on
//! the network path and never waits on bot logic, except for joining a
//! bot-logic thread that has already been told to stop.
//!
//! ## Per-tick sequence
//!
//! 1. Collisions in the tick halt the outstanding distance
//! 2. Remaining motion is folded forward and the intent rewritten
//! 3. Tick, embedded and custom events are queued
//! 4. The barrier publishes the turn and wakes the bot-logic thread
//! 5. On the first tick of a round, the bot-logic thread is started

use std::sync::Arc;

use armada_protocol::{
    GameEndedEventForBot, GameSetup, GameStartedEventForBot, InboundMessage, OutboundMessage,
    RoundEndedEventForBot, RoundStartedEvent, ServerHandshake, SkippedTurnEvent, TickEventForBot,
    WireEvent,
};
use crossbeam_channel::Sender;
use tracing::{debug, error, info, warn};

use crate::bot::Bot;
use crate::config::BotConfig;
use crate::driver::{BotDriver, DriverState};
use crate::error::{BotError, BotResult};
use crate::events::{BotEvent, CustomEvent};
use crate::snapshot::TickSnapshot;
use crate::state::Shared;

/// Game-level session data.
#[derive(Debug, Default)]
struct Session {
    session_id: Option<String>,
    my_id: Option<i32>,
    game_setup: Option<Arc<GameSetup>>,
    round_number: Option<i32>,
    /// Round whose bot-logic thread has been started.
    started_round: Option<i32>,
}

/// One bot's runtime: session state, shared turn state and the driver.
pub struct BotRuntime<B: Bot> {
    shared: Arc<Shared>,
    driver: BotDriver<B>,
    session: Session,
}

impl<B: Bot> BotRuntime<B> {
    /// Creates a runtime that queues outbound frames on `outbox`.
    ///
    /// # Errors
    ///
    /// [`BotError::Config`] if the configuration does not validate.
    pub fn new(bot: B, config: BotConfig, outbox: Sender<OutboundMessage>) -> BotResult<Self> {
        config.validate()?;
        let shared = Arc::new(Shared::new(config, outbox));
        Ok(Self {
            driver: BotDriver::new(bot, Arc::clone(&shared)),
            shared,
            session: Session::default(),
        })
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &BotConfig {
        self.shared.config()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Id assigned by the server for the current game.
    ///
    /// # Errors
    ///
    /// [`BotError::NotReady`] outside a game.
    pub fn my_id(&self) -> BotResult<i32> {
        self.session.my_id.ok_or(BotError::NotReady("bot id"))
    }

    /// Session id from the server handshake.
    #[must_use]
    pub fn session_id(&self) -> Option<&str> {
        self.session.session_id.as_deref()
    }

    /// Parameters of the current game.
    ///
    /// # Errors
    ///
    /// [`BotError::NotReady`] outside a game.
    pub fn game_setup(&self) -> BotResult<Arc<GameSetup>> {
        self.session.game_setup.clone().ok_or(BotError::NotReady("game setup"))
    }

    /// Latest turn state.
    ///
    /// # Errors
    ///
    /// [`BotError::NotReady`] outside a game or before the first tick of
    /// the round.
    pub fn current_tick(&self) -> BotResult<Arc<TickSnapshot>> {
        if self.session.my_id.is_none() {
            return Err(BotError::NotReady("tick"));
        }
        self.shared.barrier.snapshot().ok_or(BotError::NotReady("tick"))
    }

    /// Current round number.
    ///
    /// # Errors
    ///
    /// [`BotError::NotReady`] outside a game or before the first round.
    pub fn round_number(&self) -> BotResult<i32> {
        self.session
            .my_id
            .and(self.session.round_number)
            .ok_or(BotError::NotReady("round number"))
    }

    /// Current turn number.
    ///
    /// # Errors
    ///
    /// As [`BotRuntime::current_tick`].
    pub fn turn_number(&self) -> BotResult<i32> {
        self.current_tick().map(|tick| tick.turn_number)
    }

    /// State of the bot-logic thread.
    #[must_use]
    pub fn driver_state(&self) -> DriverState {
        self.driver.state()
    }

    /// Events buffered for the bot-logic thread.
    #[must_use]
    pub fn pending_events(&self) -> usize {
        self.shared.events.lock().len()
    }

    // =========================================================================
    // Connection lifecycle
    // =========================================================================

    /// The transport connected.
    pub fn on_connected(&mut self, url: &str) {
        info!(url, "connected");
        self.driver.with_idle_bot(|bot| bot.on_connected(url));
    }

    /// The transport closed. Stops the bot-logic thread and ends the game.
    pub fn on_disconnected(&mut self, remote_closed: bool) {
        info!(remote_closed, "disconnected");
        self.stop_bot();
        self.end_game();
        self.driver.with_idle_bot(|bot| bot.on_disconnected(remote_closed));
    }

    /// The transport failed.
    pub fn on_connection_error(&mut self, error: &BotError) {
        error!(%error, "connection error");
        self.stop_bot();
        self.driver.with_idle_bot(|bot| bot.on_connection_error(error));
    }

    /// Stops the bot-logic thread and returns the bot, if it survived.
    #[must_use]
    pub fn shutdown(self) -> Option<B> {
        self.driver.into_bot()
    }

    // =========================================================================
    // Message handlers
    // =========================================================================

    /// Handles one decoded frame.
    ///
    /// # Errors
    ///
    /// Transport errors while replying, or [`BotError::BotPanicked`] if the
    /// bot-logic thread died.
    pub fn handle_message(&mut self, message: InboundMessage) -> BotResult<()> {
        match message {
            InboundMessage::ServerHandshake(handshake) => self.on_server_handshake(&handshake),
            InboundMessage::GameStartedEventForBot(event) => self.on_game_started(event),
            InboundMessage::TickEventForBot(tick) => self.on_tick(tick),
            InboundMessage::RoundStartedEvent(event) => self.on_round_started(&event),
            InboundMessage::RoundEndedEventForBot(event) => self.on_round_ended(&event),
            InboundMessage::GameEndedEventForBot(event) => self.on_game_ended(&event),
            InboundMessage::GameAbortedEvent => self.on_game_aborted(),
            InboundMessage::SkippedTurnEvent(event) => self.on_skipped_turn(event),
            InboundMessage::Unknown => {
                debug!("ignoring unknown message");
                Ok(())
            }
        }
    }

    fn on_server_handshake(&mut self, handshake: &ServerHandshake) -> BotResult<()> {
        info!(session_id = %handshake.session_id, server_version = %handshake.version, "server handshake");
        self.session.session_id = Some(handshake.session_id.clone());
        let reply = self.shared.config().handshake(&handshake.session_id);
        self.shared.send(OutboundMessage::BotHandshake(reply))
    }

    fn on_game_started(&mut self, event: GameStartedEventForBot) -> BotResult<()> {
        info!(
            my_id = event.my_id,
            game_type = %event.game_setup.game_type,
            rounds = event.game_setup.number_of_rounds,
            "game started"
        );
        self.stop_bot();
        self.session.my_id = Some(event.my_id);
        self.session.game_setup = Some(Arc::new(event.game_setup.clone()));
        self.session.round_number = None;
        self.session.started_round = None;
        self.driver.with_idle_bot(|bot| bot.on_game_started(&event));
        self.shared.send(OutboundMessage::BotReady)
    }

    fn on_round_started(&mut self, event: &RoundStartedEvent) -> BotResult<()> {
        info!(round = event.round_number, "round started");
        self.stop_bot();
        self.shared.reset_round();
        self.session.round_number = Some(event.round_number);
        self.session.started_round = None;
        self.driver.with_idle_bot(|bot| bot.on_round_started(event));
        Ok(())
    }

    fn on_round_ended(&mut self, event: &RoundEndedEventForBot) -> BotResult<()> {
        info!(round = event.round_number, turn = event.turn_number, "round ended");
        self.stop_bot();
        self.driver.with_idle_bot(|bot| bot.on_round_ended(event));
        Ok(())
    }

    fn on_game_ended(&mut self, event: &GameEndedEventForBot) -> BotResult<()> {
        info!(rank = event.results.rank, score = event.results.total_score, "game ended");
        self.stop_bot();
        self.end_game();
        self.driver.with_idle_bot(|bot| bot.on_game_ended(event));
        Ok(())
    }

    fn on_game_aborted(&mut self) -> BotResult<()> {
        warn!("game aborted");
        self.stop_bot();
        self.end_game();
        self.driver.with_idle_bot(Bot::on_game_aborted);
        Ok(())
    }

    fn on_skipped_turn(&mut self, event: SkippedTurnEvent) -> BotResult<()> {
        warn!(turn = event.turn_number, "skipped turn");
        self.shared.events.lock().push(BotEvent::SkippedTurn(event));
        Ok(())
    }

    fn on_tick(&mut self, tick: TickEventForBot) -> BotResult<()> {
        let Some(my_id) = self.session.my_id else {
            warn!(turn = tick.turn_number, "tick outside a game, ignoring");
            return Ok(());
        };
        if self.session.started_round.is_some_and(|r| r != tick.round_number) {
            debug!(round = tick.round_number, "new round without round start, resetting");
            self.stop_bot();
            self.shared.reset_round();
            self.session.started_round = None;
        }
        let (snapshot, wire_events) = TickSnapshot::from_tick(tick);
        let snapshot = Arc::new(snapshot);
        let turn = snapshot.turn_number;
        let round = snapshot.round_number;
        debug!(turn, round, events = wire_events.len(), energy = snapshot.bot_state.energy, "tick");

        self.update_motion(&snapshot, &wire_events);
        self.queue_events(&snapshot, wire_events, my_id);

        if !self.shared.barrier.advance(Arc::clone(&snapshot)) {
            warn!(turn, "stale tick, not advancing");
            return Ok(());
        }

        if self.session.started_round != Some(round) {
            self.session.round_number = Some(round);
            self.session.started_round = Some(round);
            let setup = self.game_setup()?;
            self.driver.start(round, snapshot, my_id, setup)?;
        }
        Ok(())
    }

    /// Steps 1 and 2 of the per-tick sequence, under the motion lock.
    fn update_motion(&self, snapshot: &TickSnapshot, wire_events: &[WireEvent]) {
        let mut state = self.shared.motion.lock();
        let state = &mut *state;
        for event in wire_events {
            let halted = match event {
                WireEvent::BotHitWallEvent(_) => true,
                WireEvent::BotHitBotEvent(e) => e.rammed,
                _ => false,
            };
            if halted {
                state.motion.halt_distance();
            }
        }
        state.motion.on_turn(&snapshot.observation(), &mut state.intent);
    }

    /// Step 3: tick event first, then embedded events, then conditions.
    fn queue_events(&self, snapshot: &Arc<TickSnapshot>, wire_events: Vec<WireEvent>, my_id: i32) {
        let turn = snapshot.turn_number;
        let satisfied = self.shared.conditions.lock().evaluate(snapshot);

        let mut queue = self.shared.events.lock();
        queue.push(BotEvent::Tick(Arc::clone(snapshot)));
        for event in wire_events.into_iter().filter_map(|e| BotEvent::from_wire(e, my_id)) {
            queue.push(event);
        }
        for name in satisfied {
            queue.push(BotEvent::Custom(CustomEvent { turn_number: turn, name }));
        }
    }

    fn stop_bot(&mut self) {
        if let Err(e) = self.driver.stop() {
            error!(error = %e, "bot thread did not stop cleanly");
        }
    }

    fn end_game(&mut self) {
        self.session.my_id = None;
        self.session.game_setup = None;
        self.session.round_number = None;
        self.session.started_round = None;
    }
}

impl<B: Bot> std::fmt::Debug for BotRuntime<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotRuntime")
            .field("session", &self.session)
            .field("driver", &self.driver.state())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use armada_protocol::{BotDeathEvent, BotIntent, BotState, ServerHandshake};
    use crossbeam_channel::{bounded, Receiver};
    use parking_lot::Mutex;
    use std::time::{Duration, Instant};

    const TIMEOUT: Duration = Duration::from_secs(5);

    /// Records lifecycle calls and deaths.
    #[derive(Clone, Default)]
    struct Recorder {
        log: Arc<Mutex<Vec<String>>>,
    }

    impl Recorder {
        fn entries(&self) -> Vec<String> {
            self.log.lock().clone()
        }
    }

    impl Bot for Recorder {
        fn on_death(ctx: &mut crate::BotContext<Self>, event: &BotDeathEvent) -> crate::HandlerResult {
            ctx.bot().log.lock().push(format!("death@{}", event.turn_number));
            Ok(())
        }

        fn on_game_started(&mut self, event: &GameStartedEventForBot) {
            self.log.lock().push(format!("game:{}", event.my_id));
        }

        fn on_round_started(&mut self, event: &RoundStartedEvent) {
            self.log.lock().push(format!("round:{}", event.round_number));
        }
    }

    fn runtime() -> (BotRuntime<Recorder>, Recorder, Receiver<OutboundMessage>) {
        let (tx, rx) = bounded(64);
        let recorder = Recorder::default();
        let runtime = BotRuntime::new(recorder.clone(), BotConfig::default(), tx).unwrap();
        (runtime, recorder, rx)
    }

    fn tick(round: i32, turn: i32, events: Vec<WireEvent>) -> InboundMessage {
        InboundMessage::TickEventForBot(TickEventForBot {
            turn_number: turn,
            round_number: round,
            bot_state: BotState {
                energy: 100.0,
                x: 50.0,
                y: 50.0,
                ..BotState::default()
            },
            bullet_states: Vec::new(),
            events,
        })
    }

    fn start_game(runtime: &mut BotRuntime<Recorder>, rx: &Receiver<OutboundMessage>) {
        runtime
            .handle_message(InboundMessage::GameStartedEventForBot(GameStartedEventForBot {
                my_id: 7,
                game_setup: GameSetup::default(),
            }))
            .unwrap();
        assert_eq!(rx.recv_timeout(TIMEOUT).unwrap(), OutboundMessage::BotReady);
        runtime
            .handle_message(InboundMessage::RoundStartedEvent(RoundStartedEvent { round_number: 1 }))
            .unwrap();
    }

    fn next_intent(rx: &Receiver<OutboundMessage>) -> BotIntent {
        match rx.recv_timeout(TIMEOUT).unwrap() {
            OutboundMessage::BotIntent(intent) => intent,
            other => panic!("expected an intent, got {}", other.kind()),
        }
    }

    #[test]
    fn test_server_handshake_is_answered() {
        let (mut runtime, _, rx) = runtime();
        runtime
            .handle_message(InboundMessage::ServerHandshake(ServerHandshake {
                session_id: "abc".to_string(),
                ..ServerHandshake::default()
            }))
            .unwrap();

        match rx.recv_timeout(TIMEOUT).unwrap() {
            OutboundMessage::BotHandshake(handshake) => {
                assert_eq!(handshake.session_id, "abc");
                assert_eq!(handshake.name, runtime.config().bot.name);
            }
            other => panic!("expected a handshake, got {}", other.kind()),
        }
        assert_eq!(runtime.session_id(), Some("abc"));
    }

    #[test]
    fn test_state_not_ready_outside_game() {
        let (runtime, _, _rx) = runtime();
        assert!(matches!(runtime.my_id(), Err(BotError::NotReady(_))));
        assert!(matches!(runtime.current_tick(), Err(BotError::NotReady(_))));
        assert!(matches!(runtime.turn_number(), Err(BotError::NotReady(_))));
        assert!(matches!(runtime.game_setup(), Err(BotError::NotReady(_))));
    }

    #[test]
    fn test_tick_outside_game_is_ignored() {
        let (mut runtime, _, rx) = runtime();
        runtime.handle_message(tick(1, 1, Vec::new())).unwrap();
        assert_eq!(runtime.driver_state(), DriverState::Idle);
        assert_eq!(runtime.pending_events(), 0);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_first_tick_starts_bot_thread() {
        let (mut runtime, recorder, rx) = runtime();
        start_game(&mut runtime, &rx);
        assert_eq!(recorder.entries(), vec!["game:7".to_string(), "round:1".to_string()]);
        assert_eq!(runtime.driver_state(), DriverState::Idle);

        runtime.handle_message(tick(1, 1, Vec::new())).unwrap();
        assert_eq!(runtime.driver_state(), DriverState::Running(1));
        assert_eq!(runtime.turn_number().unwrap(), 1);

        // An idle bot still answers every turn
        next_intent(&rx);
        runtime.handle_message(tick(1, 2, Vec::new())).unwrap();
        next_intent(&rx);

        let _ = runtime.shutdown();
    }

    #[test]
    fn test_death_stops_bot_thread() {
        let (mut runtime, recorder, rx) = runtime();
        start_game(&mut runtime, &rx);
        runtime.handle_message(tick(1, 1, Vec::new())).unwrap();
        next_intent(&rx);

        let death = WireEvent::BotDeathEvent(BotDeathEvent {
            turn_number: 2,
            victim_id: 7,
        });
        runtime.handle_message(tick(1, 2, vec![death])).unwrap();

        let deadline = Instant::now() + TIMEOUT;
        while runtime.shared.barrier.is_running() {
            assert!(Instant::now() < deadline, "bot thread kept running after death");
            std::thread::sleep(Duration::from_millis(5));
        }

        runtime
            .handle_message(InboundMessage::RoundEndedEventForBot(RoundEndedEventForBot::default()))
            .unwrap();
        assert_eq!(runtime.driver_state(), DriverState::Idle);
        assert!(recorder.entries().contains(&"death@2".to_string()));
    }

    #[test]
    fn test_collision_halts_distance() {
        let (mut runtime, _, rx) = runtime();
        start_game(&mut runtime, &rx);
        {
            let mut state = runtime.shared.motion.lock();
            let state = &mut *state;
            state.motion.set_forward(100.0, 0.0, &mut state.intent).unwrap();
        }

        let wall = WireEvent::BotHitWallEvent(armada_protocol::BotHitWallEvent {
            turn_number: 1,
            victim_id: 7,
        });
        runtime.handle_message(tick(1, 1, vec![wall])).unwrap();

        assert_eq!(runtime.shared.motion.lock().motion.remaining().distance, 0.0);
        let _ = runtime.shutdown();
    }

    #[test]
    fn test_game_ended_clears_session() {
        let (mut runtime, _, rx) = runtime();
        start_game(&mut runtime, &rx);
        runtime.handle_message(tick(1, 1, Vec::new())).unwrap();
        assert_eq!(runtime.my_id().unwrap(), 7);

        runtime
            .handle_message(InboundMessage::GameEndedEventForBot(GameEndedEventForBot::default()))
            .unwrap();
        assert_eq!(runtime.driver_state(), DriverState::Idle);
        assert!(matches!(runtime.my_id(), Err(BotError::NotReady(_))));
        assert!(matches!(runtime.current_tick(), Err(BotError::NotReady(_))));
    }

    #[test]
    fn test_next_round_restarts_turn_numbers() {
        let (mut runtime, recorder, rx) = runtime();
        start_game(&mut runtime, &rx);
        runtime.handle_message(tick(1, 1, Vec::new())).unwrap();
        runtime.handle_message(tick(1, 2, Vec::new())).unwrap();

        runtime
            .handle_message(InboundMessage::RoundStartedEvent(RoundStartedEvent { round_number: 2 }))
            .unwrap();
        assert_eq!(runtime.driver_state(), DriverState::Idle);
        assert!(recorder.entries().contains(&"round:2".to_string()));

        runtime.handle_message(tick(2, 1, Vec::new())).unwrap();
        assert_eq!(runtime.driver_state(), DriverState::Running(2));
        assert_eq!(runtime.turn_number().unwrap(), 1);
        let _ = runtime.shutdown();
    }
}
