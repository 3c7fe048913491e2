//! # Arena Constants
//!
//! Physical limits shared by every bot in the arena.
//!
//! **CRITICAL:** The server enforces the same values. A bot that requests
//! more than these limits is clamped before its intent leaves the runtime.

// =============================================================================
// MOVEMENT
// =============================================================================

/// Maximum absolute speed of a bot, in units per turn.
pub const MAX_SPEED: f64 = 8.0;

/// Speed gained per turn when accelerating.
pub const ACCELERATION: f64 = 1.0;

/// Speed change per turn when braking (negative by convention).
pub const DECELERATION: f64 = -2.0;

/// Maximum body turn rate, in degrees per turn.
pub const MAX_TURN_RATE: f64 = 10.0;

/// Maximum gun turn rate, in degrees per turn.
pub const MAX_GUN_TURN_RATE: f64 = 20.0;

/// Maximum radar turn rate, in degrees per turn.
pub const MAX_RADAR_TURN_RATE: f64 = 45.0;

// =============================================================================
// WEAPONS
// =============================================================================

/// Smallest fire power the server accepts.
pub const MIN_FIRE_POWER: f64 = 0.1;

/// Largest fire power the server accepts.
pub const MAX_FIRE_POWER: f64 = 3.0;

// =============================================================================
// EVENTS
// =============================================================================

/// Maximum age, in turns, of a buffered non-critical event.
pub const MAX_EVENT_AGE: i32 = 2;

/// Maximum number of buffered events per bot.
pub const MAX_QUEUE_SIZE: usize = 256;

// =============================================================================
// NUMERICS
// =============================================================================

/// Values closer to zero than this are treated as zero.
pub const NEAR_ZERO: f64 = 1e-5;

/// Returns true if `value` is within [`NEAR_ZERO`] of zero.
#[inline]
#[must_use]
pub fn is_near_zero(value: f64) -> bool {
    value.abs() < NEAR_ZERO
}
