//! # Movement Planner
//!
//! Acceleration-bounded speed control for "move exactly N units" requests.
//!
//! ## Model
//!
//! Each turn the speed may grow by at most `acceleration` or shrink by at
//! most `|deceleration|`. Given the distance still to travel, the planner
//! picks the fastest speed from which the bot can still brake to exactly
//! zero on the target:
//!
//! ```text
//! speed  8 |        ________
//!          |      /         \
//!          |    /             \
//!          |  /                 \
//!        0 |/_____________________\____ turns
//!           accelerate  cruise  brake
//! ```
//!
//! Braking over `t` turns covers the arithmetic sum
//! `d(t) = t * v - |dec| * t * (t - 1) / 2`. Inverting that sum for the
//! remaining distance gives the number of braking turns, and from it the
//! largest admissible speed for this turn.
//!
//! All functions are pure. Negative distances are solved on the mirrored
//! problem, so `next_speed(-v, -d) == -next_speed(v, d)`.

use crate::constants::{self, is_near_zero};
use crate::math::normalize_relative_angle;

/// Speed controller parameterized by the arena's physics limits.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MovementPlanner {
    /// Speed gained per turn when speeding up.
    acceleration: f64,
    /// Speed lost per turn when braking (absolute value).
    deceleration: f64,
    /// Speed cap for this bot.
    max_speed: f64,
}

impl MovementPlanner {
    /// Creates a planner.
    ///
    /// `deceleration` may be given with either sign; only its magnitude is used.
    #[must_use]
    pub fn new(acceleration: f64, deceleration: f64, max_speed: f64) -> Self {
        Self {
            acceleration: acceleration.abs(),
            deceleration: deceleration.abs(),
            max_speed: max_speed.abs(),
        }
    }

    /// Returns the same planner with a different speed cap.
    #[must_use]
    pub fn with_max_speed(self, max_speed: f64) -> Self {
        Self {
            max_speed: max_speed.abs(),
            ..self
        }
    }

    /// Acceleration per turn.
    #[inline]
    #[must_use]
    pub const fn acceleration(&self) -> f64 {
        self.acceleration
    }

    /// Absolute deceleration per turn.
    #[inline]
    #[must_use]
    pub const fn deceleration(&self) -> f64 {
        self.deceleration
    }

    /// Speed cap.
    #[inline]
    #[must_use]
    pub const fn max_speed(&self) -> f64 {
        self.max_speed
    }

    /// Computes the speed to request for the next turn.
    ///
    /// `speed` is the current signed speed and `distance` the signed distance
    /// still to travel. An infinite distance means continuous travel.
    ///
    /// The result never differs from `speed` by more than `acceleration`
    /// when speeding up or `|deceleration|` when slowing down.
    #[must_use]
    pub fn next_speed(&self, speed: f64, distance: f64) -> f64 {
        if distance < 0.0 || (distance == 0.0 && speed < 0.0) {
            return -self.next_speed(-speed, -distance);
        }

        let target = if distance.is_infinite() {
            self.max_speed
        } else {
            self.max_speed_for_distance(distance).min(self.max_speed)
        };

        if speed >= 0.0 {
            (speed - self.deceleration).max(target.min(speed + self.acceleration))
        } else {
            // Moving away from the target: brake first, then accelerate back.
            (speed - self.acceleration).max(target.min(speed + self.max_speed_change_from_reverse(-speed)))
        }
    }

    /// Largest speed from which the bot can still stop within `distance`.
    #[must_use]
    pub fn max_speed_for_distance(&self, distance: f64) -> f64 {
        let dec = self.deceleration;
        if dec <= 0.0 {
            return self.max_speed;
        }
        let brake_turns = (((4.0 * 2.0 / dec) * distance + 1.0).sqrt() - 1.0) / 2.0;
        let brake_turns = brake_turns.ceil().max(1.0);
        if brake_turns.is_infinite() {
            return self.max_speed;
        }
        let brake_distance = (brake_turns / 2.0) * (brake_turns - 1.0) * dec;
        ((brake_turns - 1.0) * dec) + ((distance - brake_distance) / brake_turns)
    }

    /// Speed change available in one turn when reversing out of `speed`
    /// (braking down to zero, then accelerating for the rest of the turn).
    fn max_speed_change_from_reverse(&self, speed: f64) -> f64 {
        if self.deceleration <= 0.0 {
            return self.acceleration;
        }
        let brake_time = speed / self.deceleration;
        let accel_time = 1.0 - brake_time;
        brake_time.min(1.0) * self.deceleration + accel_time.max(0.0) * self.acceleration
    }

    /// Distance covered from `speed` until the bot comes to rest,
    /// braking as hard as allowed.
    #[must_use]
    pub fn distance_until_stop(&self, speed: f64) -> f64 {
        let mut speed = speed.abs();
        let mut distance = 0.0;
        while speed > 0.0 {
            speed = self.next_speed(speed, 0.0);
            distance += speed;
        }
        distance
    }
}

impl Default for MovementPlanner {
    fn default() -> Self {
        Self::new(
            constants::ACCELERATION,
            constants::DECELERATION,
            constants::MAX_SPEED,
        )
    }
}

/// Reduces a remaining-degrees counter by the rotation achieved this turn.
///
/// Snaps to exactly zero once the achieved delta covers what was left,
/// so the counter never changes sign through floating point drift.
#[must_use]
pub fn reduce_turn_remaining(remaining: f64, achieved_delta: f64) -> f64 {
    if remaining.abs() <= achieved_delta.abs() {
        return 0.0;
    }
    let left = remaining - achieved_delta;
    if is_near_zero(left) {
        0.0
    } else {
        left
    }
}

/// Heading change between two observed headings, normalized to `(-180, 180]`.
#[inline]
#[must_use]
pub fn heading_delta(current: f64, previous: f64) -> f64 {
    normalize_relative_angle(current - previous)
}

/// Clamps a requested rate into `[-max, max]`.
#[inline]
#[must_use]
pub fn clamp_rate(rate: f64, max: f64) -> f64 {
    let max = max.abs();
    rate.clamp(-max, max)
}
