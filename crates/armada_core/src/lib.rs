//! # ARMADA Core
//!
//! Pure motion math for turn-synchronized bots:
//! - Arena constants and angle helpers
//! - Movement Planner: the fastest speed that still stops on target
//! - Intent Accumulator: what the bot asks for next turn
//! - Remaining-motion bookkeeping behind blocking calls, with Stop/Resume
//!
//! ## Architecture Rules
//!
//! 1. **No I/O, no threads** - everything here is deterministic
//! 2. **Clamp on the way out** - the live intent keeps raw requests,
//!    the flushed snapshot is always within the arena limits
//!
//! ## Example
//!
//! ```rust
//! use armada_core::{Intent, Limits, MovementPlanner};
//!
//! let planner = MovementPlanner::default();
//! let mut intent = Intent::new();
//! intent.set_target_speed(planner.next_speed(0.0, 100.0)).unwrap();
//! assert_eq!(intent.flush(&Limits::default()).target_speed, 1.0);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::float_cmp)]

pub mod constants;
pub mod error;
pub mod intent;
pub mod math;
pub mod motion;
pub mod movement;

pub use error::{MotionError, MotionResult};
pub use intent::{Color, Colors, Intent, IntentSnapshot, Limits};
pub use motion::{Headings, MotionController, Observation, RemainingMotion, StopSnapshot};
pub use movement::MovementPlanner;
