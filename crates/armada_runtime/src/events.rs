//! # Bot Events
//!
//! The closed set of events a bot can receive, and the one table that
//! decides their delivery order.
//!
//! Wire events are reported from the arena's point of view. [`BotEvent::from_wire`]
//! turns them into the bot's point of view: a bullet hitting *this* bot is
//! [`BotEvent::HitByBullet`], one fired by this bot hitting someone else is
//! [`BotEvent::BulletHit`].

use std::sync::Arc;

use armada_protocol::{
    BotDeathEvent, BotHitBotEvent, BotHitWallEvent, BulletFiredEvent, BulletHitBotEvent,
    BulletHitBulletEvent, BulletHitWallEvent, ScannedBotEvent, SkippedTurnEvent, WireEvent,
    WonRoundEvent,
};

use crate::snapshot::TickSnapshot;

/// A condition registered by the bot was satisfied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomEvent {
    /// Turn the condition was evaluated on.
    pub turn_number: i32,
    /// Name of the condition.
    pub name: String,
}

/// Every event deliverable to a bot.
#[derive(Clone, Debug, PartialEq)]
pub enum BotEvent {
    /// A new turn.
    Tick(Arc<TickSnapshot>),
    /// The radar saw another bot.
    ScannedBot(ScannedBotEvent),
    /// This bot collided with another bot.
    HitBot(BotHitBotEvent),
    /// This bot hit a wall.
    HitWall(BotHitWallEvent),
    /// This bot fired a bullet.
    BulletFired(BulletFiredEvent),
    /// A bullet of this bot hit a wall.
    BulletHitWall(BulletHitWallEvent),
    /// This bot was hit by a bullet.
    HitByBullet(BulletHitBotEvent),
    /// A bullet of this bot hit another bot.
    BulletHit(BulletHitBotEvent),
    /// A bullet of this bot hit another bullet.
    BulletHitBullet(BulletHitBulletEvent),
    /// This bot died.
    Death(BotDeathEvent),
    /// Another bot died.
    BotDeath(BotDeathEvent),
    /// This bot missed a turn.
    SkippedTurn(SkippedTurnEvent),
    /// A registered condition was met.
    Custom(CustomEvent),
    /// This bot won the round.
    WonRound(WonRoundEvent),
}

/// Payload-free discriminant of [`BotEvent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    /// See [`BotEvent::Tick`].
    Tick,
    /// See [`BotEvent::ScannedBot`].
    ScannedBot,
    /// See [`BotEvent::HitBot`].
    HitBot,
    /// See [`BotEvent::HitWall`].
    HitWall,
    /// See [`BotEvent::BulletFired`].
    BulletFired,
    /// See [`BotEvent::BulletHitWall`].
    BulletHitWall,
    /// See [`BotEvent::HitByBullet`].
    HitByBullet,
    /// See [`BotEvent::BulletHit`].
    BulletHit,
    /// See [`BotEvent::BulletHitBullet`].
    BulletHitBullet,
    /// See [`BotEvent::Death`].
    Death,
    /// See [`BotEvent::BotDeath`].
    BotDeath,
    /// See [`BotEvent::SkippedTurn`].
    SkippedTurn,
    /// See [`BotEvent::Custom`].
    Custom,
    /// See [`BotEvent::WonRound`].
    WonRound,
}

// =============================================================================
// PRIORITY TABLE
// =============================================================================

impl EventKind {
    /// Delivery priority. Within a turn, lower numbers are delivered first.
    #[must_use]
    pub const fn priority(self) -> u8 {
        match self {
            Self::Tick => 10,
            Self::ScannedBot => 20,
            Self::HitBot => 30,
            Self::HitWall => 40,
            Self::BulletFired => 50,
            Self::BulletHitWall => 60,
            Self::HitByBullet | Self::BulletHit => 70,
            Self::BulletHitBullet => 80,
            Self::Death | Self::BotDeath => 90,
            Self::SkippedTurn => 100,
            Self::Custom => 110,
            Self::WonRound => 120,
        }
    }

    /// Critical events are never evicted for age.
    #[must_use]
    pub const fn is_critical(self) -> bool {
        matches!(self, Self::Death | Self::WonRound)
    }
}

impl BotEvent {
    /// Maps a wire event to this bot's point of view.
    ///
    /// Returns `None` for event types the runtime does not deliver.
    #[must_use]
    pub fn from_wire(event: WireEvent, my_id: i32) -> Option<Self> {
        let event = match event {
            WireEvent::ScannedBotEvent(e) => Self::ScannedBot(e),
            WireEvent::BotHitBotEvent(e) => Self::HitBot(e),
            WireEvent::BotHitWallEvent(e) => Self::HitWall(e),
            WireEvent::BulletFiredEvent(e) => Self::BulletFired(e),
            WireEvent::BulletHitWallEvent(e) => Self::BulletHitWall(e),
            WireEvent::BulletHitBotEvent(e) if e.victim_id == my_id => Self::HitByBullet(e),
            WireEvent::BulletHitBotEvent(e) => Self::BulletHit(e),
            WireEvent::BulletHitBulletEvent(e) => Self::BulletHitBullet(e),
            WireEvent::BotDeathEvent(e) if e.victim_id == my_id => Self::Death(e),
            WireEvent::BotDeathEvent(e) => Self::BotDeath(e),
            WireEvent::SkippedTurnEvent(e) => Self::SkippedTurn(e),
            WireEvent::WonRoundEvent(e) => Self::WonRound(e),
            WireEvent::Unknown => return None,
        };
        Some(event)
    }

    /// Kind of this event.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Tick(_) => EventKind::Tick,
            Self::ScannedBot(_) => EventKind::ScannedBot,
            Self::HitBot(_) => EventKind::HitBot,
            Self::HitWall(_) => EventKind::HitWall,
            Self::BulletFired(_) => EventKind::BulletFired,
            Self::BulletHitWall(_) => EventKind::BulletHitWall,
            Self::HitByBullet(_) => EventKind::HitByBullet,
            Self::BulletHit(_) => EventKind::BulletHit,
            Self::BulletHitBullet(_) => EventKind::BulletHitBullet,
            Self::Death(_) => EventKind::Death,
            Self::BotDeath(_) => EventKind::BotDeath,
            Self::SkippedTurn(_) => EventKind::SkippedTurn,
            Self::Custom(_) => EventKind::Custom,
            Self::WonRound(_) => EventKind::WonRound,
        }
    }

    /// Turn the event originated on.
    #[must_use]
    pub fn turn_number(&self) -> i32 {
        match self {
            Self::Tick(e) => e.turn_number,
            Self::ScannedBot(e) => e.turn_number,
            Self::HitBot(e) => e.turn_number,
            Self::HitWall(e) => e.turn_number,
            Self::BulletFired(e) => e.turn_number,
            Self::BulletHitWall(e) => e.turn_number,
            Self::HitByBullet(e) | Self::BulletHit(e) => e.turn_number,
            Self::BulletHitBullet(e) => e.turn_number,
            Self::Death(e) | Self::BotDeath(e) => e.turn_number,
            Self::SkippedTurn(e) => e.turn_number,
            Self::Custom(e) => e.turn_number,
            Self::WonRound(e) => e.turn_number,
        }
    }

    /// Whether the event survives age eviction.
    #[inline]
    #[must_use]
    pub fn is_critical(&self) -> bool {
        self.kind().is_critical()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use armada_protocol::BulletState;

    #[test]
    fn test_priority_order() {
        let ordered = [
            EventKind::Tick,
            EventKind::ScannedBot,
            EventKind::HitBot,
            EventKind::HitWall,
            EventKind::BulletFired,
            EventKind::BulletHitWall,
            EventKind::HitByBullet,
            EventKind::BulletHitBullet,
            EventKind::Death,
            EventKind::SkippedTurn,
            EventKind::Custom,
            EventKind::WonRound,
        ];
        for pair in ordered.windows(2) {
            assert!(pair[0].priority() < pair[1].priority(), "{:?} vs {:?}", pair[0], pair[1]);
        }
        assert_eq!(EventKind::HitByBullet.priority(), EventKind::BulletHit.priority());
        assert_eq!(EventKind::Death.priority(), EventKind::BotDeath.priority());
    }

    #[test]
    fn test_critical_kinds() {
        assert!(EventKind::Death.is_critical());
        assert!(EventKind::WonRound.is_critical());
        assert!(!EventKind::BotDeath.is_critical());
        assert!(!EventKind::SkippedTurn.is_critical());
        assert!(!EventKind::Tick.is_critical());
    }

    #[test]
    fn test_point_of_view_mapping() {
        let hit = |victim_id| {
            WireEvent::BulletHitBotEvent(BulletHitBotEvent {
                turn_number: 4,
                victim_id,
                bullet: BulletState::default(),
                damage: 4.0,
                energy: 96.0,
            })
        };
        assert_eq!(BotEvent::from_wire(hit(1), 1).map(|e| e.kind()), Some(EventKind::HitByBullet));
        assert_eq!(BotEvent::from_wire(hit(2), 1).map(|e| e.kind()), Some(EventKind::BulletHit));

        let death = |victim_id| WireEvent::BotDeathEvent(BotDeathEvent { turn_number: 9, victim_id });
        let mine = BotEvent::from_wire(death(1), 1).unwrap();
        assert_eq!(mine.kind(), EventKind::Death);
        assert!(mine.is_critical());
        assert_eq!(mine.turn_number(), 9);
        assert_eq!(BotEvent::from_wire(death(3), 1).unwrap().kind(), EventKind::BotDeath);

        assert_eq!(BotEvent::from_wire(WireEvent::Unknown, 1), None);
    }
}
