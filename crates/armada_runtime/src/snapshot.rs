//! Immutable per-turn state.

use armada_core::{Headings, Observation};
use armada_protocol::{BotState, BulletState, TickEventForBot, WireEvent};

/// Authoritative state of one completed turn.
///
/// Created once per tick and shared read-only behind an `Arc`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickSnapshot {
    /// Turn number within the round.
    pub turn_number: i32,
    /// Round number.
    pub round_number: i32,
    /// This bot's state.
    pub bot_state: BotState,
    /// This bot's bullets in flight.
    pub bullet_states: Vec<BulletState>,
}

impl TickSnapshot {
    /// Creates a snapshot with no bullets.
    #[must_use]
    pub fn new(turn_number: i32, round_number: i32, bot_state: BotState) -> Self {
        Self {
            turn_number,
            round_number,
            bot_state,
            bullet_states: Vec::new(),
        }
    }

    /// Splits a tick frame into the snapshot and its embedded events.
    #[must_use]
    pub fn from_tick(tick: TickEventForBot) -> (Self, Vec<WireEvent>) {
        let snapshot = Self {
            turn_number: tick.turn_number,
            round_number: tick.round_number,
            bot_state: tick.bot_state,
            bullet_states: tick.bullet_states,
        };
        (snapshot, tick.events)
    }

    /// The part of the state the motion controller folds in.
    #[must_use]
    pub fn observation(&self) -> Observation {
        let state = &self.bot_state;
        Observation {
            speed: state.speed,
            headings: Headings {
                direction: state.direction,
                gun_direction: state.gun_direction,
                radar_direction: state.radar_direction,
            },
            energy: state.energy,
        }
    }

    /// A bot with no energy left cannot act.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.bot_state.energy <= 0.0
    }
}
