//! State shared by the network path and the bot-logic thread.
//!
//! Every piece has exactly one lock:
//!
//! | field        | written by                    | read by          |
//! |--------------|-------------------------------|------------------|
//! | `barrier`    | network (turns), both (flag)  | bot thread       |
//! | `motion`     | bot thread (setters), network (per-turn update) | both |
//! | `events`     | network (push)                | bot thread (pop) |
//! | `conditions` | bot thread (add/remove)       | network (evaluate) |

use armada_core::{Intent, IntentSnapshot, Limits, MotionController, MovementPlanner};
use armada_protocol::OutboundMessage;
use crossbeam_channel::{Sender, TrySendError};
use parking_lot::Mutex;

use crate::barrier::TurnBarrier;
use crate::conditions::ConditionSet;
use crate::config::BotConfig;
use crate::error::{BotError, BotResult};
use crate::queue::EventQueue;

/// Intent, limits and remaining motion, guarded together.
#[derive(Debug)]
pub(crate) struct MotionState {
    pub intent: Intent,
    pub limits: Limits,
    pub motion: MotionController,
}

impl MotionState {
    pub fn new(limits: Limits, planner: MovementPlanner) -> Self {
        Self {
            intent: Intent::new(),
            limits,
            motion: MotionController::new(planner),
        }
    }

    /// Clamped snapshot for the wire; clears one-shot fields.
    pub fn flush(&mut self) -> IntentSnapshot {
        self.intent.flush(&self.limits)
    }
}

/// Everything one bot's runtime shares across threads.
#[derive(Debug)]
pub(crate) struct Shared {
    pub barrier: TurnBarrier,
    pub motion: Mutex<MotionState>,
    pub events: Mutex<EventQueue>,
    pub conditions: Mutex<ConditionSet>,
    outbox: Sender<OutboundMessage>,
    config: BotConfig,
}

impl Shared {
    pub fn new(config: BotConfig, outbox: Sender<OutboundMessage>) -> Self {
        Self {
            barrier: TurnBarrier::new(),
            motion: Mutex::new(MotionState::new(config.limits(), config.planner())),
            events: Mutex::new(EventQueue::new(
                config.events.max_queue_size,
                config.events.max_event_age,
            )),
            conditions: Mutex::new(ConditionSet::new()),
            outbox,
            config,
        }
    }

    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    /// Queues a frame for the writer without blocking.
    pub fn send(&self, message: OutboundMessage) -> BotResult<()> {
        self.outbox.try_send(message).map_err(|e| match e {
            TrySendError::Full(_) => BotError::OutboxFull,
            TrySendError::Disconnected(_) => BotError::NotConnected,
        })
    }

    /// Fresh per-round state: new intent, zeroed motion, no conditions,
    /// no buffered events, barrier back at turn 0.
    pub fn reset_round(&self) {
        *self.motion.lock() = MotionState::new(self.config.limits(), self.config.planner());
        self.events.lock().clear();
        self.conditions.lock().clear();
        self.barrier.reset();
    }
}
