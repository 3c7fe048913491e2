//! # Event Queue
//!
//! Bounded, age-limited buffer between the network path (producer) and the
//! bot-logic thread (consumer).
//!
//! Events sit in buckets keyed by `(origin turn, priority)`. Walking the
//! buckets in key order yields older turns first and, within a turn, the
//! order of the priority table. Inside a bucket, arrival order is kept.
//!
//! ```text
//!   (turn 7, Tick) (turn 7, ScannedBot) (turn 7, HitWall) (turn 8, Tick) ...
//!        ▲ next
//! ```
//!
//! Eviction and removal of the next event happen in one `&mut self` call,
//! so under the owner's mutex an event is either delivered or evicted,
//! never both.

use std::collections::{BTreeMap, VecDeque};

use tracing::{debug, warn};

use crate::events::{BotEvent, EventKind};

/// Bucket key: origin turn first, then priority.
type BucketKey = (i32, u8);

/// Priority buckets with a hard capacity.
#[derive(Debug)]
pub struct EventQueue {
    buckets: BTreeMap<BucketKey, VecDeque<BotEvent>>,
    len: usize,
    capacity: usize,
    max_age: i32,
}

impl EventQueue {
    /// Creates an empty queue.
    ///
    /// Non-critical events older than `max_age` turns are evicted; at most
    /// `capacity` events are buffered.
    #[must_use]
    pub fn new(capacity: usize, max_age: i32) -> Self {
        Self {
            buckets: BTreeMap::new(),
            len: 0,
            capacity,
            max_age,
        }
    }

    /// Buffered events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if nothing is buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Buffers an event.
    ///
    /// When the queue is full the new event is dropped, logged, and `false`
    /// is returned. Buffered events are never overwritten.
    pub fn push(&mut self, event: BotEvent) -> bool {
        if self.len >= self.capacity {
            warn!(
                kind = ?event.kind(),
                turn = event.turn_number(),
                capacity = self.capacity,
                "event queue full, dropping event"
            );
            return false;
        }
        let key = (event.turn_number(), event.kind().priority());
        self.buckets.entry(key).or_default().push_back(event);
        self.len += 1;
        true
    }

    /// Drops every non-critical event older than the age limit.
    ///
    /// Returns the number of evicted events.
    pub fn evict_stale(&mut self, current_turn: i32) -> usize {
        let max_age = self.max_age;
        let mut evicted = 0;
        self.buckets.retain(|&(turn, _), bucket| {
            if current_turn - turn <= max_age {
                return true;
            }
            let before = bucket.len();
            bucket.retain(BotEvent::is_critical);
            evicted += before - bucket.len();
            !bucket.is_empty()
        });
        if evicted > 0 {
            self.len -= evicted;
            debug!(evicted, current_turn, "evicted stale events");
        }
        evicted
    }

    /// Evicts stale events, then removes and returns the next event to
    /// deliver.
    pub fn pop_next(&mut self, current_turn: i32) -> Option<BotEvent> {
        self.evict_stale(current_turn);
        let mut entry = self.buckets.first_entry()?;
        let event = entry.get_mut().pop_front();
        if entry.get().is_empty() {
            entry.remove();
        }
        if event.is_some() {
            self.len -= 1;
        }
        event
    }

    /// As [`EventQueue::pop_next`], but leaves the next event in place if
    /// it is of kind `held`.
    pub fn pop_next_unless(&mut self, current_turn: i32, held: Option<EventKind>) -> Option<BotEvent> {
        if held.is_some() && self.peek_kind(current_turn) == held {
            return None;
        }
        self.pop_next(current_turn)
    }

    /// Kind of the event [`EventQueue::pop_next`] would return.
    pub fn peek_kind(&mut self, current_turn: i32) -> Option<EventKind> {
        self.evict_stale(current_turn);
        self.buckets
            .first_key_value()
            .and_then(|(_, bucket)| bucket.front())
            .map(BotEvent::kind)
    }

    /// True if an event of `kind` is buffered.
    #[must_use]
    pub fn contains_kind(&self, kind: EventKind) -> bool {
        self.buckets
            .values()
            .flatten()
            .any(|event| event.kind() == kind)
    }

    /// Drops everything.
    pub fn clear(&mut self) {
        self.buckets.clear();
        self.len = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::CustomEvent;
    use crate::snapshot::TickSnapshot;
    use armada_protocol::{BotDeathEvent, BotHitWallEvent, ScannedBotEvent, SkippedTurnEvent};
    use std::sync::Arc;

    fn hit_wall(turn: i32) -> BotEvent {
        BotEvent::HitWall(BotHitWallEvent {
            turn_number: turn,
            victim_id: 1,
        })
    }

    fn scanned(turn: i32, id: i32) -> BotEvent {
        BotEvent::ScannedBot(ScannedBotEvent {
            turn_number: turn,
            scanned_bot_id: id,
            ..ScannedBotEvent::default()
        })
    }

    fn tick(turn: i32) -> BotEvent {
        BotEvent::Tick(Arc::new(TickSnapshot {
            turn_number: turn,
            ..TickSnapshot::default()
        }))
    }

    fn drain(queue: &mut EventQueue, turn: i32) -> Vec<EventKind> {
        std::iter::from_fn(|| queue.pop_next(turn)).map(|e| e.kind()).collect()
    }

    #[test]
    fn test_scanned_before_hit_wall_in_any_input_order() {
        let mut queue = EventQueue::new(256, 2);
        queue.push(hit_wall(3));
        queue.push(scanned(3, 2));
        queue.push(tick(3));
        assert_eq!(drain(&mut queue, 3), vec![EventKind::Tick, EventKind::ScannedBot, EventKind::HitWall]);

        queue.push(scanned(4, 2));
        queue.push(hit_wall(4));
        assert_eq!(drain(&mut queue, 4), vec![EventKind::ScannedBot, EventKind::HitWall]);
    }

    #[test]
    fn test_older_turns_first() {
        let mut queue = EventQueue::new(256, 2);
        queue.push(tick(6));
        queue.push(hit_wall(5));
        assert_eq!(drain(&mut queue, 6), vec![EventKind::HitWall, EventKind::Tick]);
    }

    #[test]
    fn test_same_bucket_keeps_arrival_order() {
        let mut queue = EventQueue::new(256, 2);
        queue.push(scanned(1, 7));
        queue.push(scanned(1, 3));
        let ids: Vec<i32> = std::iter::from_fn(|| queue.pop_next(1))
            .map(|e| match e {
                BotEvent::ScannedBot(s) => s.scanned_bot_id,
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(ids, vec![7, 3]);
    }

    #[test]
    fn test_stale_event_never_delivered() {
        let mut queue = EventQueue::new(256, 2);
        queue.push(scanned(5, 2));
        assert_eq!(queue.pop_next(8), None);
        assert!(queue.is_empty());

        queue.push(scanned(5, 2));
        assert_eq!(queue.peek_kind(9), None);
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn test_event_at_age_limit_still_delivered() {
        let mut queue = EventQueue::new(256, 2);
        queue.push(scanned(5, 2));
        assert_eq!(queue.pop_next(7).map(|e| e.kind()), Some(EventKind::ScannedBot));
    }

    #[test]
    fn test_critical_survives_eviction() {
        let mut queue = EventQueue::new(256, 2);
        queue.push(BotEvent::Death(BotDeathEvent {
            turn_number: 1,
            victim_id: 1,
        }));
        queue.push(BotEvent::BotDeath(BotDeathEvent {
            turn_number: 1,
            victim_id: 2,
        }));
        queue.push(BotEvent::SkippedTurn(SkippedTurnEvent { turn_number: 1 }));
        assert_eq!(queue.evict_stale(50), 2);
        assert_eq!(drain(&mut queue, 50), vec![EventKind::Death]);
    }

    #[test]
    fn test_overflow_drops_newest() {
        let mut queue = EventQueue::new(2, 2);
        assert!(queue.push(scanned(1, 1)));
        assert!(queue.push(hit_wall(1)));
        assert!(!queue.push(BotEvent::Custom(CustomEvent {
            turn_number: 1,
            name: "late".to_string(),
        })));
        assert_eq!(queue.len(), 2);
        assert!(!queue.contains_kind(EventKind::Custom));
        assert_eq!(drain(&mut queue, 1), vec![EventKind::ScannedBot, EventKind::HitWall]);
    }

    #[test]
    fn test_held_kind_stays_queued() {
        let mut queue = EventQueue::new(256, 2);
        queue.push(tick(2));
        queue.push(scanned(2, 4));
        queue.push(hit_wall(2));

        let held = Some(EventKind::ScannedBot);
        assert_eq!(queue.pop_next_unless(2, held).map(|e| e.kind()), Some(EventKind::Tick));
        assert_eq!(queue.pop_next_unless(2, held), None);
        assert_eq!(queue.len(), 2);
        assert_eq!(drain(&mut queue, 2), vec![EventKind::ScannedBot, EventKind::HitWall]);
    }

    #[test]
    fn test_clear() {
        let mut queue = EventQueue::new(8, 2);
        queue.push(tick(1));
        queue.push(hit_wall(1));
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.pop_next(1), None);
    }
}
