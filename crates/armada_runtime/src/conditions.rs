//! Named user predicates, evaluated once per turn.

use std::fmt;

use crate::snapshot::TickSnapshot;

type Predicate = Box<dyn FnMut(&TickSnapshot) -> bool + Send>;

/// A named predicate over the turn state.
///
/// Each turn it holds, the bot receives a custom event carrying its name.
pub struct Condition {
    name: String,
    predicate: Predicate,
}

impl Condition {
    /// Creates a condition.
    pub fn new(name: impl Into<String>, predicate: impl FnMut(&TickSnapshot) -> bool + Send + 'static) -> Self {
        Self {
            name: name.into(),
            predicate: Box::new(predicate),
        }
    }

    /// Name reported in custom events.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Evaluates the predicate.
    pub fn test(&mut self, tick: &TickSnapshot) -> bool {
        (self.predicate)(tick)
    }
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Condition").field("name", &self.name).finish_non_exhaustive()
    }
}

/// The conditions registered for the current round.
#[derive(Debug, Default)]
pub struct ConditionSet {
    conditions: Vec<Condition>,
}

impl ConditionSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a condition. Names need not be unique.
    pub fn add(&mut self, condition: Condition) {
        self.conditions.push(condition);
    }

    /// Removes every condition with this name. Returns true if any was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.conditions.len();
        self.conditions.retain(|c| c.name != name);
        self.conditions.len() != before
    }

    /// Names of the conditions that hold for this turn, in registration order.
    pub fn evaluate(&mut self, tick: &TickSnapshot) -> Vec<String> {
        self.conditions
            .iter_mut()
            .filter_map(|c| c.test(tick).then(|| c.name.clone()))
            .collect()
    }

    /// Registered conditions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    /// True if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Drops every condition. Called at round start.
    pub fn clear(&mut self) {
        self.conditions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_turn(turn: i32) -> TickSnapshot {
        TickSnapshot {
            turn_number: turn,
            ..TickSnapshot::default()
        }
    }

    #[test]
    fn test_evaluate_in_order() {
        let mut set = ConditionSet::new();
        set.add(Condition::new("even", |t| t.turn_number % 2 == 0));
        set.add(Condition::new("late", |t| t.turn_number > 10));
        assert_eq!(set.evaluate(&at_turn(12)), vec!["even", "late"]);
        assert_eq!(set.evaluate(&at_turn(3)), Vec::<String>::new());
    }

    #[test]
    fn test_stateful_predicate() {
        let mut set = ConditionSet::new();
        let mut seen = 0;
        set.add(Condition::new("third", move |_| {
            seen += 1;
            seen == 3
        }));
        let hits: Vec<usize> = (1..=5).map(|t| set.evaluate(&at_turn(t)).len()).collect();
        assert_eq!(hits, vec![0, 0, 1, 0, 0]);
    }

    #[test]
    fn test_remove_by_name() {
        let mut set = ConditionSet::new();
        set.add(Condition::new("a", |_| true));
        set.add(Condition::new("b", |_| true));
        assert!(set.remove("a"));
        assert!(!set.remove("a"));
        assert_eq!(set.len(), 1);
        set.clear();
        assert!(set.is_empty());
    }
}
