//! Game events embedded in a tick.
//!
//! The server reports events from the arena's point of view: a bullet hit
//! names its victim, a death names who died. Mapping them onto "was it me"
//! is left to the runtime, which knows its own bot id.

use serde::{Deserialize, Serialize};

/// A bullet in flight.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BulletState {
    /// Bullet id, unique within a round.
    pub bullet_id: i32,
    /// Bot that fired it.
    pub owner_id: i32,
    /// Fire power.
    pub power: f64,
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Heading in degrees.
    pub direction: f64,
    /// Paint color, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Events the server can report inside a tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WireEvent {
    /// A bot died.
    BotDeathEvent(BotDeathEvent),
    /// Two bots collided.
    BotHitBotEvent(BotHitBotEvent),
    /// A bot hit a wall.
    BotHitWallEvent(BotHitWallEvent),
    /// This bot fired.
    BulletFiredEvent(BulletFiredEvent),
    /// A bullet hit a bot.
    BulletHitBotEvent(BulletHitBotEvent),
    /// Two bullets collided.
    BulletHitBulletEvent(BulletHitBulletEvent),
    /// A bullet hit a wall.
    BulletHitWallEvent(BulletHitWallEvent),
    /// The radar saw another bot.
    ScannedBotEvent(ScannedBotEvent),
    /// This bot missed a turn.
    SkippedTurnEvent(SkippedTurnEvent),
    /// This bot won the round.
    WonRoundEvent(WonRoundEvent),
    /// Any event type this runtime does not handle.
    #[serde(other)]
    Unknown,
}

impl WireEvent {
    /// Turn the event happened on, if it carries one.
    #[must_use]
    pub fn turn_number(&self) -> Option<i32> {
        let turn = match self {
            Self::BotDeathEvent(e) => e.turn_number,
            Self::BotHitBotEvent(e) => e.turn_number,
            Self::BotHitWallEvent(e) => e.turn_number,
            Self::BulletFiredEvent(e) => e.turn_number,
            Self::BulletHitBotEvent(e) => e.turn_number,
            Self::BulletHitBulletEvent(e) => e.turn_number,
            Self::BulletHitWallEvent(e) => e.turn_number,
            Self::ScannedBotEvent(e) => e.turn_number,
            Self::SkippedTurnEvent(e) => e.turn_number,
            Self::WonRoundEvent(e) => e.turn_number,
            Self::Unknown => return None,
        };
        Some(turn)
    }
}

/// A bot died.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BotDeathEvent {
    /// Turn of death.
    pub turn_number: i32,
    /// Bot that died.
    pub victim_id: i32,
}

/// Two bots collided.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BotHitBotEvent {
    /// Turn of the collision.
    pub turn_number: i32,
    /// Bot receiving this event.
    pub bot_id: i32,
    /// The other bot.
    pub victim_id: i32,
    /// Energy of the other bot.
    pub energy: f64,
    /// X coordinate of the other bot.
    pub x: f64,
    /// Y coordinate of the other bot.
    pub y: f64,
    /// True if the receiving bot drove into the other one.
    pub rammed: bool,
}

/// A bot hit a wall.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BotHitWallEvent {
    /// Turn of the collision.
    pub turn_number: i32,
    /// Bot that hit the wall.
    pub victim_id: i32,
}

/// This bot fired a bullet.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BulletFiredEvent {
    /// Turn the bullet was fired on.
    pub turn_number: i32,
    /// The new bullet.
    pub bullet: BulletState,
}

/// A bullet hit a bot.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BulletHitBotEvent {
    /// Turn of the hit.
    pub turn_number: i32,
    /// Bot that was hit.
    pub victim_id: i32,
    /// The bullet.
    pub bullet: BulletState,
    /// Damage dealt.
    pub damage: f64,
    /// Victim energy after the hit.
    pub energy: f64,
}

/// Two bullets collided.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BulletHitBulletEvent {
    /// Turn of the collision.
    pub turn_number: i32,
    /// This bot's bullet.
    pub bullet: BulletState,
    /// The bullet it hit.
    pub hit_bullet: BulletState,
}

/// A bullet hit a wall.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BulletHitWallEvent {
    /// Turn of the hit.
    pub turn_number: i32,
    /// The bullet.
    pub bullet: BulletState,
}

/// The radar saw another bot.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScannedBotEvent {
    /// Turn of the scan.
    pub turn_number: i32,
    /// Bot whose radar made the scan.
    pub scanned_by_bot_id: i32,
    /// Bot that was seen.
    pub scanned_bot_id: i32,
    /// Its energy.
    pub energy: f64,
    /// Its X coordinate.
    pub x: f64,
    /// Its Y coordinate.
    pub y: f64,
    /// Its heading.
    pub direction: f64,
    /// Its speed.
    pub speed: f64,
}

/// The bot did not send its intent in time.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkippedTurnEvent {
    /// The turn that was skipped.
    pub turn_number: i32,
}

/// This bot won the round.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WonRoundEvent {
    /// Final turn of the round.
    pub turn_number: i32,
}
