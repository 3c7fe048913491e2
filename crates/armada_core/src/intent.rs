//! # Intent Accumulator
//!
//! The bot's requested actions for the *next* turn.
//!
//! The bot mutates the live [`Intent`] through setters. Once per turn the
//! runtime calls [`Intent::flush`], which produces a clamped
//! [`IntentSnapshot`] for the wire and clears the one-shot fields (fire
//! power, rescan). Anything set after a flush lands in the following turn.

use crate::constants::{
    MAX_GUN_TURN_RATE, MAX_RADAR_TURN_RATE, MAX_SPEED, MAX_TURN_RATE,
};
use crate::error::{require_number, MotionError, MotionResult};
use crate::movement::clamp_rate;

// =============================================================================
// COLORS
// =============================================================================

/// An RGB paint color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Creates a color from its channels.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#RRGGBB` or `#RGB`.
    ///
    /// # Errors
    ///
    /// Returns [`MotionError::InvalidColor`] for anything else.
    pub fn from_hex(text: &str) -> MotionResult<Self> {
        let invalid = || MotionError::InvalidColor(text.to_string());
        let digits = text.strip_prefix('#').ok_or_else(invalid)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        match digits.len() {
            6 => Ok(Self::rgb(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            3 => {
                let r = channel(&digits[0..1])?;
                let g = channel(&digits[1..2])?;
                let b = channel(&digits[2..3])?;
                Ok(Self::rgb(r * 17, g * 17, b * 17))
            }
            _ => Err(invalid()),
        }
    }

    /// Formats as `#RRGGBB`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// The six paintable parts of a bot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Colors {
    /// Body color.
    pub body: Option<Color>,
    /// Turret (gun) color.
    pub turret: Option<Color>,
    /// Radar color.
    pub radar: Option<Color>,
    /// Bullet color.
    pub bullet: Option<Color>,
    /// Scan arc color.
    pub scan: Option<Color>,
    /// Tracks color.
    pub tracks: Option<Color>,
}

// =============================================================================
// LIMITS
// =============================================================================

/// Per-bot speed and turn-rate caps, never above the arena maxima.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Limits {
    max_speed: f64,
    max_turn_rate: f64,
    max_gun_turn_rate: f64,
    max_radar_turn_rate: f64,
}

impl Limits {
    /// Creates limits, clamping each value into `[0, arena maximum]`.
    #[must_use]
    pub fn new(max_speed: f64, max_turn_rate: f64, max_gun_turn_rate: f64, max_radar_turn_rate: f64) -> Self {
        let mut limits = Self::default();
        limits.set_max_speed(max_speed);
        limits.set_max_turn_rate(max_turn_rate);
        limits.set_max_gun_turn_rate(max_gun_turn_rate);
        limits.set_max_radar_turn_rate(max_radar_turn_rate);
        limits
    }

    /// Speed cap.
    #[must_use]
    pub const fn max_speed(&self) -> f64 {
        self.max_speed
    }

    /// Body turn-rate cap.
    #[must_use]
    pub const fn max_turn_rate(&self) -> f64 {
        self.max_turn_rate
    }

    /// Gun turn-rate cap.
    #[must_use]
    pub const fn max_gun_turn_rate(&self) -> f64 {
        self.max_gun_turn_rate
    }

    /// Radar turn-rate cap.
    #[must_use]
    pub const fn max_radar_turn_rate(&self) -> f64 {
        self.max_radar_turn_rate
    }

    /// Lowers (or restores) the speed cap.
    pub fn set_max_speed(&mut self, value: f64) {
        self.max_speed = clamp_limit(value, MAX_SPEED);
    }

    /// Lowers (or restores) the body turn-rate cap.
    pub fn set_max_turn_rate(&mut self, value: f64) {
        self.max_turn_rate = clamp_limit(value, MAX_TURN_RATE);
    }

    /// Lowers (or restores) the gun turn-rate cap.
    pub fn set_max_gun_turn_rate(&mut self, value: f64) {
        self.max_gun_turn_rate = clamp_limit(value, MAX_GUN_TURN_RATE);
    }

    /// Lowers (or restores) the radar turn-rate cap.
    pub fn set_max_radar_turn_rate(&mut self, value: f64) {
        self.max_radar_turn_rate = clamp_limit(value, MAX_RADAR_TURN_RATE);
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_speed: MAX_SPEED,
            max_turn_rate: MAX_TURN_RATE,
            max_gun_turn_rate: MAX_GUN_TURN_RATE,
            max_radar_turn_rate: MAX_RADAR_TURN_RATE,
        }
    }
}

fn clamp_limit(value: f64, arena_max: f64) -> f64 {
    if value.is_nan() {
        arena_max
    } else {
        value.clamp(0.0, arena_max)
    }
}

// =============================================================================
// INTENT
// =============================================================================

/// The live, mutable intent for the upcoming turn.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Intent {
    target_speed: f64,
    turn_rate: f64,
    gun_turn_rate: f64,
    radar_turn_rate: f64,
    fire_power: Option<f64>,
    rescan: bool,
    adjust_gun_for_body_turn: bool,
    adjust_radar_for_body_turn: bool,
    adjust_radar_for_gun_turn: bool,
    colors: Colors,
}

impl Intent {
    /// Creates an empty intent (no motion, no fire).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requested speed.
    #[must_use]
    pub const fn target_speed(&self) -> f64 {
        self.target_speed
    }

    /// Requested body turn rate.
    #[must_use]
    pub const fn turn_rate(&self) -> f64 {
        self.turn_rate
    }

    /// Requested gun turn rate.
    #[must_use]
    pub const fn gun_turn_rate(&self) -> f64 {
        self.gun_turn_rate
    }

    /// Requested radar turn rate.
    #[must_use]
    pub const fn radar_turn_rate(&self) -> f64 {
        self.radar_turn_rate
    }

    /// Pending fire power, if a shot is requested this turn.
    #[must_use]
    pub const fn fire_power(&self) -> Option<f64> {
        self.fire_power
    }

    /// Whether a rescan is requested this turn.
    #[must_use]
    pub const fn rescan(&self) -> bool {
        self.rescan
    }

    /// Current paint colors.
    #[must_use]
    pub const fn colors(&self) -> &Colors {
        &self.colors
    }

    /// Sets the requested speed. Unbounded here; clamped on flush.
    ///
    /// # Errors
    ///
    /// Rejects NaN.
    pub fn set_target_speed(&mut self, speed: f64) -> MotionResult<()> {
        self.target_speed = require_number("target_speed", speed)?;
        Ok(())
    }

    /// Sets the requested body turn rate.
    ///
    /// # Errors
    ///
    /// Rejects NaN.
    pub fn set_turn_rate(&mut self, rate: f64) -> MotionResult<()> {
        self.turn_rate = require_number("turn_rate", rate)?;
        Ok(())
    }

    /// Sets the requested gun turn rate.
    ///
    /// # Errors
    ///
    /// Rejects NaN.
    pub fn set_gun_turn_rate(&mut self, rate: f64) -> MotionResult<()> {
        self.gun_turn_rate = require_number("gun_turn_rate", rate)?;
        Ok(())
    }

    /// Sets the requested radar turn rate.
    ///
    /// # Errors
    ///
    /// Rejects NaN.
    pub fn set_radar_turn_rate(&mut self, rate: f64) -> MotionResult<()> {
        self.radar_turn_rate = require_number("radar_turn_rate", rate)?;
        Ok(())
    }

    /// Requests a shot with the given power this turn.
    ///
    /// # Errors
    ///
    /// Rejects NaN and negative powers.
    pub fn set_fire_power(&mut self, power: f64) -> MotionResult<()> {
        if power.is_nan() || power < 0.0 {
            return Err(MotionError::InvalidArgument {
                name: "fire_power",
                value: power,
            });
        }
        self.fire_power = Some(power);
        Ok(())
    }

    /// Requests a radar rescan this turn.
    pub fn set_rescan(&mut self) {
        self.rescan = true;
    }

    /// Keeps the gun heading fixed while the body turns.
    pub fn set_adjust_gun_for_body_turn(&mut self, adjust: bool) {
        self.adjust_gun_for_body_turn = adjust;
    }

    /// Keeps the radar heading fixed while the body turns.
    pub fn set_adjust_radar_for_body_turn(&mut self, adjust: bool) {
        self.adjust_radar_for_body_turn = adjust;
    }

    /// Keeps the radar heading fixed while the gun turns.
    pub fn set_adjust_radar_for_gun_turn(&mut self, adjust: bool) {
        self.adjust_radar_for_gun_turn = adjust;
    }

    /// Mutable access to the paint colors.
    pub fn colors_mut(&mut self) -> &mut Colors {
        &mut self.colors
    }

    /// Zeroes every motion request, returning the previous values as
    /// `(target_speed, turn_rate, gun_turn_rate, radar_turn_rate)`.
    pub fn take_motion(&mut self) -> (f64, f64, f64, f64) {
        let saved = (
            self.target_speed,
            self.turn_rate,
            self.gun_turn_rate,
            self.radar_turn_rate,
        );
        self.target_speed = 0.0;
        self.turn_rate = 0.0;
        self.gun_turn_rate = 0.0;
        self.radar_turn_rate = 0.0;
        saved
    }

    /// Restores motion requests saved by [`Intent::take_motion`].
    pub fn restore_motion(&mut self, saved: (f64, f64, f64, f64)) {
        (self.target_speed, self.turn_rate, self.gun_turn_rate, self.radar_turn_rate) = saved;
    }

    /// Produces the clamped snapshot for this turn and clears one-shot fields.
    pub fn flush(&mut self, limits: &Limits) -> IntentSnapshot {
        IntentSnapshot {
            target_speed: clamp_rate(self.target_speed, limits.max_speed()),
            turn_rate: clamp_rate(self.turn_rate, limits.max_turn_rate()),
            gun_turn_rate: clamp_rate(self.gun_turn_rate, limits.max_gun_turn_rate()),
            radar_turn_rate: clamp_rate(self.radar_turn_rate, limits.max_radar_turn_rate()),
            fire_power: self.fire_power.take(),
            rescan: std::mem::take(&mut self.rescan),
            adjust_gun_for_body_turn: self.adjust_gun_for_body_turn,
            adjust_radar_for_body_turn: self.adjust_radar_for_body_turn,
            adjust_radar_for_gun_turn: self.adjust_radar_for_gun_turn,
            colors: self.colors,
        }
    }
}

/// Immutable, clamped copy of an [`Intent`] as sent for one turn.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct IntentSnapshot {
    /// Requested speed, within `[-max_speed, max_speed]`.
    pub target_speed: f64,
    /// Requested body turn rate.
    pub turn_rate: f64,
    /// Requested gun turn rate.
    pub gun_turn_rate: f64,
    /// Requested radar turn rate.
    pub radar_turn_rate: f64,
    /// Fire power, if firing this turn.
    pub fire_power: Option<f64>,
    /// Rescan request.
    pub rescan: bool,
    /// Gun compensates body rotation.
    pub adjust_gun_for_body_turn: bool,
    /// Radar compensates body rotation.
    pub adjust_radar_for_body_turn: bool,
    /// Radar compensates gun rotation.
    pub adjust_radar_for_gun_turn: bool,
    /// Paint colors.
    pub colors: Colors,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flush_clamps_rates() {
        let mut intent = Intent::new();
        intent.set_target_speed(100.0).unwrap();
        intent.set_turn_rate(-50.0).unwrap();
        intent.set_gun_turn_rate(30.0).unwrap();
        intent.set_radar_turn_rate(-90.0).unwrap();

        let snap = intent.flush(&Limits::default());
        assert_eq!(snap.target_speed, 8.0);
        assert_eq!(snap.turn_rate, -10.0);
        assert_eq!(snap.gun_turn_rate, 20.0);
        assert_eq!(snap.radar_turn_rate, -45.0);
        // The live intent keeps the unclamped request.
        assert_eq!(intent.target_speed(), 100.0);
    }

    #[test]
    fn test_flush_honors_lowered_limits() {
        let mut intent = Intent::new();
        intent.set_target_speed(-7.0).unwrap();
        let mut limits = Limits::default();
        limits.set_max_speed(4.0);
        assert_eq!(intent.flush(&limits).target_speed, -4.0);
    }

    #[test]
    fn test_one_shot_fields_cleared() {
        let mut intent = Intent::new();
        intent.set_fire_power(2.0).unwrap();
        intent.set_rescan();
        intent.colors_mut().body = Some(Color::rgb(255, 0, 0));

        let first = intent.flush(&Limits::default());
        assert_eq!(first.fire_power, Some(2.0));
        assert!(first.rescan);

        let second = intent.flush(&Limits::default());
        assert_eq!(second.fire_power, None);
        assert!(!second.rescan);
        assert_eq!(second.colors.body, Some(Color::rgb(255, 0, 0)));
    }

    #[test]
    fn test_nan_rejected() {
        let mut intent = Intent::new();
        assert!(intent.set_target_speed(f64::NAN).is_err());
        assert!(intent.set_turn_rate(f64::NAN).is_err());
        assert!(intent.set_fire_power(-1.0).is_err());
        assert_eq!(intent, Intent::new());
    }

    #[test]
    fn test_take_and_restore_motion() {
        let mut intent = Intent::new();
        intent.set_target_speed(3.0).unwrap();
        intent.set_turn_rate(4.0).unwrap();
        let saved = intent.take_motion();
        assert_eq!(intent.target_speed(), 0.0);
        assert_eq!(intent.turn_rate(), 0.0);
        intent.restore_motion(saved);
        assert_eq!(intent.target_speed(), 3.0);
        assert_eq!(intent.turn_rate(), 4.0);
    }

    #[test]
    fn test_limits_clamped_to_arena() {
        let limits = Limits::new(20.0, -5.0, 15.0, f64::NAN);
        assert_eq!(limits.max_speed(), 8.0);
        assert_eq!(limits.max_turn_rate(), 0.0);
        assert_eq!(limits.max_gun_turn_rate(), 15.0);
        assert_eq!(limits.max_radar_turn_rate(), 45.0);
    }

    #[test]
    fn test_color_hex() {
        assert_eq!(Color::from_hex("#FF8000").unwrap(), Color::rgb(255, 128, 0));
        assert_eq!(Color::from_hex("#f80").unwrap(), Color::rgb(255, 136, 0));
        assert_eq!(Color::rgb(1, 2, 255).to_hex(), "#0102FF");
        assert!(Color::from_hex("FF8000").is_err());
        assert!(Color::from_hex("#GG0000").is_err());
    }
}
