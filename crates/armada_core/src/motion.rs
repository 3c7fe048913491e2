//! # Remaining Motion
//!
//! Bookkeeping for blocking motion requests ("move 100", "turn 90").
//!
//! Every turn the runtime feeds the freshly observed bot state into
//! [`MotionController::on_turn`]. The controller subtracts what was actually
//! achieved from the outstanding counters and rewrites the motion fields of
//! the [`Intent`] for the next turn:
//!
//! ```text
//!   observed (speed, headings)
//!            │
//!            ▼
//!   ┌──────────────────┐   remaining -= achieved
//!   │ MotionController │──────────────────────────▶ RemainingMotion
//!   └──────────────────┘
//!            │ next speed / turn rates
//!            ▼
//!         Intent
//! ```
//!
//! Infinite counters mean "keep going": the controller leaves the bot's own
//! request untouched on that axis.

use crate::constants::is_near_zero;
use crate::error::{require_number, MotionResult};
use crate::intent::Intent;
use crate::movement::{heading_delta, reduce_turn_remaining, MovementPlanner};

/// Outstanding distance and rotation of blocking calls.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RemainingMotion {
    /// Distance left to travel (signed, may be infinite).
    pub distance: f64,
    /// Body rotation left, in degrees (positive = left).
    pub turn: f64,
    /// Gun rotation left, in degrees.
    pub gun_turn: f64,
    /// Radar rotation left, in degrees.
    pub radar_turn: f64,
}

impl RemainingMotion {
    /// Returns true when no axis has anything left to do.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.distance == 0.0 && self.turn == 0.0 && self.gun_turn == 0.0 && self.radar_turn == 0.0
    }
}

/// Headings observed on a turn.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Headings {
    /// Body heading.
    pub direction: f64,
    /// Gun heading.
    pub gun_direction: f64,
    /// Radar heading.
    pub radar_direction: f64,
}

/// The slice of a tick the controller needs.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Observation {
    /// Speed achieved during the completed turn.
    pub speed: f64,
    /// Headings at the end of the completed turn.
    pub headings: Headings,
    /// Remaining energy. A bot at zero energy is disabled.
    pub energy: f64,
}

impl Observation {
    /// A disabled bot cannot move, turn or fire.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.energy <= 0.0
    }
}

/// Saved state of a stopped bot, consumed by resume.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StopSnapshot {
    /// Remaining motion at the time of the stop.
    pub remaining: RemainingMotion,
    /// Headings the next delta is measured from.
    pub previous: Option<Headings>,
    /// Intent motion fields as `(speed, turn, gun turn, radar turn)`.
    pub intent_motion: (f64, f64, f64, f64),
    /// Over-drive latch.
    pub over_driving: bool,
    /// Continuous-travel flag.
    pub continuous: bool,
}

/// Owns [`RemainingMotion`] and derives each turn's motion request.
#[derive(Clone, Debug, Default)]
pub struct MotionController {
    planner: MovementPlanner,
    remaining: RemainingMotion,
    previous: Option<Headings>,
    over_driving: bool,
    continuous: bool,
    stopped: Option<StopSnapshot>,
}

impl MotionController {
    /// Creates a controller driven by `planner`.
    #[must_use]
    pub fn new(planner: MovementPlanner) -> Self {
        Self {
            planner,
            ..Self::default()
        }
    }

    /// The planner in use.
    #[must_use]
    pub const fn planner(&self) -> &MovementPlanner {
        &self.planner
    }

    /// Changes the speed cap used for planning.
    pub fn set_max_speed(&mut self, max_speed: f64) {
        self.planner = self.planner.with_max_speed(max_speed);
    }

    /// Outstanding motion.
    #[must_use]
    pub const fn remaining(&self) -> &RemainingMotion {
        &self.remaining
    }

    /// Whether the bot is currently stopped.
    #[must_use]
    pub const fn is_stopped(&self) -> bool {
        self.stopped.is_some()
    }

    /// Whether the bot is braking past its target.
    #[must_use]
    pub const fn is_over_driving(&self) -> bool {
        self.over_driving
    }

    /// Forgets everything. Called at round start.
    pub fn reset(&mut self) {
        *self = Self::new(self.planner);
    }

    /// Zeroes all counters (disabled bot, death).
    pub fn clear_remaining(&mut self) {
        self.remaining = RemainingMotion::default();
        self.over_driving = false;
        self.continuous = false;
    }

    /// A collision halted the bot: drop the outstanding distance.
    pub fn halt_distance(&mut self) {
        self.remaining.distance = 0.0;
        self.over_driving = false;
        self.continuous = false;
    }

    // =========================================================================
    // REQUESTS (bot-logic side)
    // =========================================================================

    /// Starts a move of `distance` units (negative = backwards).
    ///
    /// Motion requests made while stopped are ignored: [`MotionController::resume`]
    /// restores exactly what the stop saved.
    ///
    /// # Errors
    ///
    /// Rejects NaN.
    pub fn set_forward(&mut self, distance: f64, current_speed: f64, intent: &mut Intent) -> MotionResult<()> {
        let distance = require_number("distance", distance)?;
        if self.is_stopped() {
            return Ok(());
        }
        self.remaining.distance = distance;
        self.over_driving = false;
        self.continuous = false;
        intent.set_target_speed(self.planner.next_speed(current_speed, distance))
    }

    /// Requests continuous travel at `speed`, with no distance target.
    ///
    /// # Errors
    ///
    /// Rejects NaN.
    pub fn set_target_speed(&mut self, speed: f64, intent: &mut Intent) -> MotionResult<()> {
        let speed = require_number("target_speed", speed)?;
        if self.is_stopped() {
            return Ok(());
        }
        self.remaining.distance = continuous_value(speed);
        self.over_driving = false;
        self.continuous = true;
        intent.set_target_speed(speed)
    }

    /// Starts a body rotation of `degrees` (positive = left).
    ///
    /// # Errors
    ///
    /// Rejects NaN.
    pub fn set_turn(&mut self, degrees: f64, intent: &mut Intent) -> MotionResult<()> {
        let degrees = require_number("degrees", degrees)?;
        if self.is_stopped() {
            return Ok(());
        }
        self.remaining.turn = degrees;
        intent.set_turn_rate(degrees)
    }

    /// Starts a gun rotation of `degrees` (positive = left).
    ///
    /// # Errors
    ///
    /// Rejects NaN.
    pub fn set_gun_turn(&mut self, degrees: f64, intent: &mut Intent) -> MotionResult<()> {
        let degrees = require_number("degrees", degrees)?;
        if self.is_stopped() {
            return Ok(());
        }
        self.remaining.gun_turn = degrees;
        intent.set_gun_turn_rate(degrees)
    }

    /// Starts a radar rotation of `degrees` (positive = left).
    ///
    /// # Errors
    ///
    /// Rejects NaN.
    pub fn set_radar_turn(&mut self, degrees: f64, intent: &mut Intent) -> MotionResult<()> {
        let degrees = require_number("degrees", degrees)?;
        if self.is_stopped() {
            return Ok(());
        }
        self.remaining.radar_turn = degrees;
        intent.set_radar_turn_rate(degrees)
    }

    /// Turns continuously at `rate` on the body axis.
    ///
    /// # Errors
    ///
    /// Rejects NaN.
    pub fn set_turn_rate(&mut self, rate: f64, intent: &mut Intent) -> MotionResult<()> {
        let rate = require_number("turn_rate", rate)?;
        if self.is_stopped() {
            return Ok(());
        }
        self.remaining.turn = continuous_value(rate);
        intent.set_turn_rate(rate)
    }

    /// Turns the gun continuously at `rate`.
    ///
    /// # Errors
    ///
    /// Rejects NaN.
    pub fn set_gun_turn_rate(&mut self, rate: f64, intent: &mut Intent) -> MotionResult<()> {
        let rate = require_number("gun_turn_rate", rate)?;
        if self.is_stopped() {
            return Ok(());
        }
        self.remaining.gun_turn = continuous_value(rate);
        intent.set_gun_turn_rate(rate)
    }

    /// Turns the radar continuously at `rate`.
    ///
    /// # Errors
    ///
    /// Rejects NaN.
    pub fn set_radar_turn_rate(&mut self, rate: f64, intent: &mut Intent) -> MotionResult<()> {
        let rate = require_number("radar_turn_rate", rate)?;
        if self.is_stopped() {
            return Ok(());
        }
        self.remaining.radar_turn = continuous_value(rate);
        intent.set_radar_turn_rate(rate)
    }

    /// Stops all motion, saving what was outstanding.
    ///
    /// A second stop is ignored unless `overwrite` is set.
    pub fn stop(&mut self, intent: &mut Intent, overwrite: bool) {
        if self.stopped.is_some() && !overwrite {
            return;
        }
        let intent_motion = intent.take_motion();
        self.stopped = Some(StopSnapshot {
            remaining: self.remaining,
            previous: self.previous,
            intent_motion,
            over_driving: self.over_driving,
            continuous: self.continuous,
        });
        self.remaining = RemainingMotion::default();
        self.over_driving = false;
        self.continuous = false;
    }

    /// Restores the state saved by [`MotionController::stop`].
    ///
    /// Does nothing when the bot is not stopped.
    pub fn resume(&mut self, intent: &mut Intent) {
        if let Some(saved) = self.stopped.take() {
            self.remaining = saved.remaining;
            self.previous = saved.previous;
            self.over_driving = saved.over_driving;
            self.continuous = saved.continuous;
            intent.restore_motion(saved.intent_motion);
        }
    }

    // =========================================================================
    // PER-TURN UPDATE (network side)
    // =========================================================================

    /// Folds one observed turn into the counters and rewrites the intent.
    pub fn on_turn(&mut self, observed: &Observation, intent: &mut Intent) {
        let previous = self.previous.replace(observed.headings);

        if self.stopped.is_some() {
            let _ = intent.take_motion();
            return;
        }
        if observed.is_disabled() {
            self.clear_remaining();
            let _ = intent.take_motion();
            return;
        }

        if let Some(previous) = previous {
            let current = observed.headings;
            self.remaining.turn = advance_turn(
                self.remaining.turn,
                heading_delta(current.direction, previous.direction),
            );
            self.remaining.gun_turn = advance_turn(
                self.remaining.gun_turn,
                heading_delta(current.gun_direction, previous.gun_direction),
            );
            self.remaining.radar_turn = advance_turn(
                self.remaining.radar_turn,
                heading_delta(current.radar_direction, previous.radar_direction),
            );
        }
        // Infinite counters keep the rate the bot asked for.
        if self.remaining.turn.is_finite() {
            let _ = intent.set_turn_rate(self.remaining.turn);
        }
        if self.remaining.gun_turn.is_finite() {
            let _ = intent.set_gun_turn_rate(self.remaining.gun_turn);
        }
        if self.remaining.radar_turn.is_finite() {
            let _ = intent.set_radar_turn_rate(self.remaining.radar_turn);
        }

        if !self.continuous {
            let speed = self.update_distance(observed.speed);
            let _ = intent.set_target_speed(speed);
        }
    }

    /// Subtracts the distance covered and plans the next speed, latching
    /// the remaining distance to zero once an overshoot has been braked out.
    fn update_distance(&mut self, speed: f64) -> f64 {
        let mut distance = self.remaining.distance - speed;
        if is_near_zero(distance) {
            distance = 0.0;
        }

        let next = self.planner.next_speed(speed, distance);

        if is_near_zero(next) && self.over_driving {
            distance = 0.0;
            self.over_driving = false;
        }
        if distance * next >= 0.0 {
            self.over_driving = self.planner.distance_until_stop(next) > distance.abs();
        }

        self.remaining.distance = distance;
        next
    }
}

/// Applies the achieved delta unless the counter is unbounded.
fn advance_turn(remaining: f64, delta: f64) -> f64 {
    if remaining.is_infinite() {
        remaining
    } else {
        reduce_turn_remaining(remaining, delta)
    }
}

/// Maps a continuous rate to an unbounded counter with the same sign.
fn continuous_value(rate: f64) -> f64 {
    if rate > 0.0 {
        f64::INFINITY
    } else if rate < 0.0 {
        f64::NEG_INFINITY
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observe(speed: f64, direction: f64) -> Observation {
        Observation {
            speed,
            headings: Headings {
                direction,
                gun_direction: direction,
                radar_direction: direction,
            },
            energy: 100.0,
        }
    }

    #[test]
    fn test_forward_100_end_to_end() {
        let mut motion = MotionController::new(MovementPlanner::new(1.0, -2.0, 8.0));
        let mut intent = Intent::new();
        motion.on_turn(&observe(0.0, 0.0), &mut intent);
        motion.set_forward(100.0, 0.0, &mut intent).unwrap();

        let mut traveled = 0.0;
        let mut speed;
        for _ in 0..100 {
            // The server applies the requested speed for the next turn.
            speed = intent.target_speed();
            traveled += speed;
            motion.on_turn(&observe(speed, 0.0), &mut intent);
            if motion.remaining().distance == 0.0 && speed == 0.0 {
                break;
            }
        }
        assert!((traveled - 100.0).abs() < 1e-5, "traveled {traveled}");
        assert_eq!(motion.remaining().distance, 0.0);
        assert_eq!(intent.target_speed(), 0.0);
    }

    #[test]
    fn test_turn_counter_snaps_to_zero() {
        let mut motion = MotionController::default();
        let mut intent = Intent::new();
        motion.on_turn(&observe(0.0, 0.0), &mut intent);
        motion.set_turn(10.0, &mut intent).unwrap();
        // The server turned further than asked.
        motion.on_turn(&observe(0.0, 12.0), &mut intent);
        assert_eq!(motion.remaining().turn, 0.0);
        assert_eq!(intent.turn_rate(), 0.0);
    }

    #[test]
    fn test_turn_counter_counts_down() {
        let mut motion = MotionController::default();
        let mut intent = Intent::new();
        motion.on_turn(&observe(0.0, 350.0), &mut intent);
        motion.set_turn(25.0, &mut intent).unwrap();
        motion.on_turn(&observe(0.0, 0.0), &mut intent);
        assert_eq!(motion.remaining().turn, 15.0);
        assert_eq!(intent.turn_rate(), 15.0);
    }

    #[test]
    fn test_stop_resume_round_trip() {
        let mut motion = MotionController::default();
        let mut intent = Intent::new();
        motion.on_turn(&observe(4.0, 30.0), &mut intent);
        motion.set_forward(50.0, 4.0, &mut intent).unwrap();
        motion.set_turn(-40.0, &mut intent).unwrap();
        motion.set_radar_turn(90.0, &mut intent).unwrap();

        let remaining = *motion.remaining();
        let before = intent.clone();

        motion.stop(&mut intent, false);
        assert!(motion.is_stopped());
        assert!(motion.remaining().is_idle());
        assert_eq!(intent.target_speed(), 0.0);
        assert_eq!(intent.turn_rate(), 0.0);
        assert_eq!(intent.radar_turn_rate(), 0.0);

        motion.resume(&mut intent);
        assert!(!motion.is_stopped());
        assert_eq!(*motion.remaining(), remaining);
        assert_eq!(intent, before);
    }

    #[test]
    fn test_second_stop_keeps_first_snapshot() {
        let mut motion = MotionController::default();
        let mut intent = Intent::new();
        motion.set_turn(20.0, &mut intent).unwrap();
        motion.stop(&mut intent, false);
        motion.stop(&mut intent, false);
        motion.resume(&mut intent);
        assert_eq!(motion.remaining().turn, 20.0);
        assert_eq!(intent.turn_rate(), 20.0);
    }

    #[test]
    fn test_stopped_bot_requests_no_motion() {
        let mut motion = MotionController::default();
        let mut intent = Intent::new();
        motion.set_forward(100.0, 0.0, &mut intent).unwrap();
        motion.stop(&mut intent, false);
        motion.on_turn(&observe(1.0, 0.0), &mut intent);
        assert_eq!(intent.target_speed(), 0.0);
        assert_eq!(motion.remaining().distance, 0.0);
    }

    #[test]
    fn test_stopped_bot_ignores_rate_requests() {
        let mut motion = MotionController::default();
        let mut intent = Intent::new();
        motion.set_forward(100.0, 0.0, &mut intent).unwrap();
        motion.stop(&mut intent, false);
        motion.set_turn_rate(5.0, &mut intent).unwrap();
        motion.set_gun_turn_rate(10.0, &mut intent).unwrap();
        motion.set_radar_turn_rate(-30.0, &mut intent).unwrap();
        motion.set_target_speed(6.0, &mut intent).unwrap();

        let flushed = intent.flush(&crate::intent::Limits::default());
        assert_eq!(flushed.turn_rate, 0.0);
        assert_eq!(flushed.gun_turn_rate, 0.0);
        assert_eq!(flushed.radar_turn_rate, 0.0);
        assert_eq!(flushed.target_speed, 0.0);
        assert!(motion.remaining().is_idle());
    }

    #[test]
    fn test_requests_while_stopped_do_not_survive_resume() {
        let mut motion = MotionController::default();
        let mut intent = Intent::new();
        motion.set_forward(100.0, 0.0, &mut intent).unwrap();
        motion.stop(&mut intent, false);
        motion.set_forward(-20.0, 0.0, &mut intent).unwrap();
        motion.set_turn(45.0, &mut intent).unwrap();
        assert!(motion.remaining().is_idle());

        motion.resume(&mut intent);
        assert_eq!(motion.remaining().distance, 100.0);
        assert_eq!(motion.remaining().turn, 0.0);
        assert_eq!(intent.turn_rate(), 0.0);
    }

    #[test]
    fn test_nan_rejected_while_stopped() {
        let mut motion = MotionController::default();
        let mut intent = Intent::new();
        motion.stop(&mut intent, false);
        assert!(motion.set_turn_rate(f64::NAN, &mut intent).is_err());
    }

    #[test]
    fn test_collision_halts_distance() {
        let mut motion = MotionController::default();
        let mut intent = Intent::new();
        motion.set_forward(100.0, 0.0, &mut intent).unwrap();
        motion.halt_distance();
        motion.on_turn(&observe(0.0, 0.0), &mut intent);
        assert_eq!(motion.remaining().distance, 0.0);
        assert_eq!(intent.target_speed(), 0.0);
    }

    #[test]
    fn test_disabled_bot_clears_remaining() {
        let mut motion = MotionController::default();
        let mut intent = Intent::new();
        motion.set_forward(100.0, 0.0, &mut intent).unwrap();
        motion.set_turn(90.0, &mut intent).unwrap();
        let mut observed = observe(0.0, 0.0);
        observed.energy = 0.0;
        motion.on_turn(&observed, &mut intent);
        assert!(motion.remaining().is_idle());
        assert_eq!(intent.turn_rate(), 0.0);
    }

    #[test]
    fn test_continuous_speed_is_left_alone() {
        let mut motion = MotionController::default();
        let mut intent = Intent::new();
        motion.set_target_speed(5.0, &mut intent).unwrap();
        motion.on_turn(&observe(1.0, 0.0), &mut intent);
        motion.on_turn(&observe(2.0, 0.0), &mut intent);
        assert_eq!(intent.target_speed(), 5.0);
        assert_eq!(motion.remaining().distance, f64::INFINITY);
    }

    #[test]
    fn test_nan_distance_rejected() {
        let mut motion = MotionController::default();
        let mut intent = Intent::new();
        assert!(motion.set_forward(f64::NAN, 0.0, &mut intent).is_err());
        assert!(motion.set_turn(f64::NAN, &mut intent).is_err());
        assert!(motion.remaining().is_idle());
    }
}
