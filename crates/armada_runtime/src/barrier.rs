//! # Turn Barrier
//!
//! Hands turns from the network path to the bot-logic thread.
//!
//! ```text
//!   network path                       bot-logic thread
//!   ────────────                       ────────────────
//!   advance(tick 7) ──┐
//!                     ├─ notify_all ──▶ await_next_turn(6) returns tick 7
//!   advance(tick 8) ──┘                (busy...)
//!   advance(tick 9)                    await_next_turn(7) returns tick 9
//! ```
//!
//! The barrier is level-triggered: it keeps only the newest snapshot, so a
//! slow bot catches up to the latest turn instead of working through a
//! backlog of wakeups. Events of skipped turns are not lost; they live in
//! the event queue.
//!
//! The running flag lives under the same mutex as the turn counter. A
//! shutdown therefore always wakes every waiter; there is no window in
//! which a waiter checks the flag, misses the notify and sleeps forever.

use std::sync::Arc;

use parking_lot::{Condvar, Mutex};

use crate::snapshot::TickSnapshot;

/// Returned by [`TurnBarrier::await_next_turn`] when the bot must stop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NotRunning;

#[derive(Debug, Default)]
struct BarrierState {
    turn: i32,
    running: bool,
    snapshot: Option<Arc<TickSnapshot>>,
}

/// Monitor pairing the latest turn with the running flag.
#[derive(Debug, Default)]
pub struct TurnBarrier {
    state: Mutex<BarrierState>,
    turn_advanced: Condvar,
}

impl TurnBarrier {
    /// Creates a barrier at turn 0, not running.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes a new turn and wakes every waiter.
    ///
    /// Snapshots for a turn at or before the current one are ignored and
    /// `false` is returned.
    pub fn advance(&self, snapshot: Arc<TickSnapshot>) -> bool {
        let mut state = self.state.lock();
        if snapshot.turn_number <= state.turn && state.snapshot.is_some() {
            return false;
        }
        state.turn = snapshot.turn_number;
        state.snapshot = Some(snapshot);
        drop(state);
        self.turn_advanced.notify_all();
        true
    }

    /// Blocks until a turn after `observed_turn` is published.
    ///
    /// Returns immediately if the barrier is already past `observed_turn`.
    ///
    /// # Errors
    ///
    /// [`NotRunning`] as soon as the barrier is shut down, without waiting.
    pub fn await_next_turn(&self, observed_turn: i32) -> Result<Arc<TickSnapshot>, NotRunning> {
        let mut state = self.state.lock();
        loop {
            if !state.running {
                return Err(NotRunning);
            }
            if state.turn > observed_turn {
                if let Some(snapshot) = &state.snapshot {
                    return Ok(Arc::clone(snapshot));
                }
            }
            self.turn_advanced.wait(&mut state);
        }
    }

    /// Latest published turn (0 before the first tick of a round).
    #[must_use]
    pub fn current_turn(&self) -> i32 {
        self.state.lock().turn
    }

    /// Latest published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Option<Arc<TickSnapshot>> {
        self.state.lock().snapshot.clone()
    }

    /// Whether waiters are allowed to block.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state.lock().running
    }

    /// Lets the bot-logic thread wait on turns.
    pub fn start(&self) {
        self.state.lock().running = true;
    }

    /// Clears the running flag and wakes every waiter.
    pub fn shutdown(&self) {
        self.state.lock().running = false;
        self.turn_advanced.notify_all();
    }

    /// Forgets the turn counter and snapshot. Called between rounds,
    /// when turn numbers restart at 1.
    pub fn reset(&self) {
        let mut state = self.state.lock();
        state.turn = 0;
        state.snapshot = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    fn tick(turn: i32) -> Arc<TickSnapshot> {
        Arc::new(TickSnapshot {
            turn_number: turn,
            round_number: 1,
            ..TickSnapshot::default()
        })
    }

    #[test]
    fn test_not_running_returns_immediately() {
        let barrier = TurnBarrier::new();
        assert_eq!(barrier.await_next_turn(0), Err(NotRunning));
    }

    #[test]
    fn test_already_advanced_returns_latest() {
        let barrier = TurnBarrier::new();
        barrier.start();
        barrier.advance(tick(1));
        barrier.advance(tick(2));
        barrier.advance(tick(3));
        let snapshot = barrier.await_next_turn(1).unwrap();
        assert_eq!(snapshot.turn_number, 3);
    }

    #[test]
    fn test_stale_advance_ignored() {
        let barrier = TurnBarrier::new();
        assert!(barrier.advance(tick(5)));
        assert!(!barrier.advance(tick(5)));
        assert!(!barrier.advance(tick(4)));
        assert_eq!(barrier.current_turn(), 5);
    }

    #[test]
    fn test_waiter_released_by_later_turn_only() {
        let barrier = Arc::new(TurnBarrier::new());
        barrier.start();
        barrier.advance(tick(3));

        let (tx, rx) = crossbeam_channel::bounded(1);
        let waiter = {
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let _ = tx.send(barrier.await_next_turn(3).map(|s| s.turn_number));
            })
        };

        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
        barrier.advance(tick(3));
        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());

        barrier.advance(tick(4));
        assert_eq!(rx.recv_timeout(Duration::from_secs(5)).unwrap(), Ok(4));
        waiter.join().unwrap();
    }

    #[test]
    fn test_shutdown_wakes_waiter() {
        let barrier = Arc::new(TurnBarrier::new());
        barrier.start();
        barrier.advance(tick(1));

        let (tx, rx) = crossbeam_channel::bounded(1);
        let waiter = {
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let _ = tx.send(barrier.await_next_turn(1).map(|s| s.turn_number));
            })
        };

        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
        barrier.shutdown();
        assert_eq!(rx.recv_timeout(Duration::from_secs(5)).unwrap(), Err(NotRunning));
        waiter.join().unwrap();
    }

    #[test]
    fn test_reset_between_rounds() {
        let barrier = TurnBarrier::new();
        barrier.advance(tick(500));
        barrier.reset();
        assert_eq!(barrier.current_turn(), 0);
        assert!(barrier.snapshot().is_none());
        assert!(barrier.advance(tick(1)));
    }
}
