//! Angle and ballistics helpers.
//!
//! Angles are in degrees. 0 points east (positive x) and angles grow
//! counter-clockwise, the same convention the server uses for headings.

/// Normalizes an angle to the range `[0, 360)`.
#[inline]
#[must_use]
pub fn normalize_absolute_angle(angle: f64) -> f64 {
    let normalized = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// Normalizes an angle to the range `(-180, 180]`.
#[inline]
#[must_use]
pub fn normalize_relative_angle(angle: f64) -> f64 {
    let angle = angle % 360.0;
    if angle <= -180.0 {
        angle + 360.0
    } else if angle > 180.0 {
        angle - 360.0
    } else {
        angle
    }
}

/// Signed shortest rotation from `from` to `to`.
#[inline]
#[must_use]
pub fn delta_angle(to: f64, from: f64) -> f64 {
    normalize_relative_angle(to - from)
}

/// Absolute direction from `(x, y)` towards `(target_x, target_y)`.
#[must_use]
pub fn direction_to(x: f64, y: f64, target_x: f64, target_y: f64) -> f64 {
    normalize_absolute_angle((target_y - y).atan2(target_x - x).to_degrees())
}

/// Bearing from a heading to a point, relative to that heading.
#[must_use]
pub fn bearing_to(heading: f64, x: f64, y: f64, target_x: f64, target_y: f64) -> f64 {
    normalize_relative_angle(direction_to(x, y, target_x, target_y) - heading)
}

/// Euclidean distance between two points.
#[inline]
#[must_use]
pub fn distance_to(x: f64, y: f64, target_x: f64, target_y: f64) -> f64 {
    (target_x - x).hypot(target_y - y)
}

/// Bullet speed for a given fire power.
#[inline]
#[must_use]
pub fn bullet_speed(fire_power: f64) -> f64 {
    20.0 - 3.0 * fire_power
}

/// Damage a bullet of the given power deals on impact.
#[inline]
#[must_use]
pub fn bullet_damage(fire_power: f64) -> f64 {
    let bonus = if fire_power > 1.0 {
        2.0 * (fire_power - 1.0)
    } else {
        0.0
    };
    4.0 * fire_power + bonus
}

/// Gun heat added by firing a bullet of the given power.
#[inline]
#[must_use]
pub fn gun_heat_for(fire_power: f64) -> f64 {
    1.0 + fire_power / 5.0
}

/// Number of turns until the gun is cool enough to fire again.
///
/// Returns `u32::MAX` when the cooling rate is not positive.
#[must_use]
pub fn turns_until_gun_cool(gun_heat: f64, cooling_rate: f64) -> u32 {
    if gun_heat <= 0.0 {
        return 0;
    }
    if cooling_rate <= 0.0 {
        return u32::MAX;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let turns = (gun_heat / cooling_rate).ceil() as u32;
    turns
}
