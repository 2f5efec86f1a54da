//! Transition history tracking.
//!
//! Keeps an ordered, optionally bounded record of completed transitions.
//! Only transitions that changed the current state are recorded; rejected,
//! canceled and self-transitions leave no trace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single completed transition.
///
/// # Example
///
/// ```rust
/// use hookfsm::core::TransitionRecord;
/// use chrono::Utc;
///
/// let record = TransitionRecord {
///     event: "open".to_string(),
///     from: "closed".to_string(),
///     to: "open".to_string(),
///     timestamp: Utc::now(),
///     deferred: false,
/// };
/// assert_eq!(record.to, "open");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Event that triggered the transition
    pub event: String,
    /// The state being transitioned from
    pub from: String,
    /// The state being transitioned to
    pub to: String,
    /// When the state actually changed
    pub timestamp: DateTime<Utc>,
    /// Whether the transition was completed by a resume call
    pub deferred: bool,
}

/// Ordered history of completed transitions.
///
/// History is immutable - the `record` method returns a new history
/// with the transition added. With a limit set, the oldest records are
/// dropped once the limit is reached.
///
/// # Example
///
/// ```rust
/// use hookfsm::core::{TransitionHistory, TransitionRecord};
/// use chrono::Utc;
///
/// let step = |event: &str, from: &str, to: &str| TransitionRecord {
///     event: event.to_string(),
///     from: from.to_string(),
///     to: to.to_string(),
///     timestamp: Utc::now(),
///     deferred: false,
/// };
///
/// let history = TransitionHistory::new()
///     .record(step("warn", "green", "yellow"))
///     .record(step("panic", "yellow", "red"));
///
/// assert_eq!(history.get_path(), vec!["green", "yellow", "red"]);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TransitionHistory {
    records: Vec<TransitionRecord>,
    limit: Option<usize>,
}

impl TransitionHistory {
    /// Create a new, unbounded, empty history.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            limit: None,
        }
    }

    /// Create an empty history keeping at most `limit` records.
    ///
    /// A limit of zero disables recording entirely.
    pub fn bounded(limit: usize) -> Self {
        Self {
            records: Vec::new(),
            limit: Some(limit),
        }
    }

    /// Create an empty history with an optional bound.
    pub fn with_limit(limit: Option<usize>) -> Self {
        match limit {
            Some(limit) => Self::bounded(limit),
            None => Self::new(),
        }
    }

    /// Record a transition, returning a new history.
    ///
    /// Does not mutate the existing history.
    pub fn record(&self, record: TransitionRecord) -> Self {
        let mut history = self.clone();
        history.push(record);
        history
    }

    /// Append a transition in place, dropping the oldest records past the limit.
    pub fn push(&mut self, record: TransitionRecord) {
        self.records.push(record);

        if let Some(limit) = self.limit {
            let excess = self.records.len().saturating_sub(limit);
            self.records.drain(..excess);
        }
    }

    /// Get the path of states traversed.
    ///
    /// Returns the first recorded source state, then the destination of
    /// each record. Empty if nothing has been recorded.
    pub fn get_path(&self) -> Vec<&str> {
        let mut path = Vec::new();
        if let Some(first) = self.records.first() {
            path.push(first.from.as_str());
        }
        for record in &self.records {
            path.push(record.to.as_str());
        }
        path
    }

    /// Duration between the first and last recorded transition.
    ///
    /// Returns `None` if there are no records.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.records.first(), self.records.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// All retained records, oldest first.
    pub fn transitions(&self) -> &[TransitionRecord] {
        &self.records
    }

    /// Most recent record.
    pub fn last(&self) -> Option<&TransitionRecord> {
        self.records.last()
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(event: &str, from: &str, to: &str) -> TransitionRecord {
        TransitionRecord {
            event: event.to_string(),
            from: from.to_string(),
            to: to.to_string(),
            timestamp: Utc::now(),
            deferred: false,
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history = TransitionHistory::new();

        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
        assert!(history.last().is_none());
    }

    #[test]
    fn record_is_pure() {
        let history = TransitionHistory::new();
        let updated = history.record(record("open", "closed", "open"));

        assert_eq!(history.len(), 0);
        assert_eq!(updated.len(), 1);
    }

    #[test]
    fn path_follows_recorded_transitions() {
        let history = TransitionHistory::new()
            .record(record("first", "one", "two"))
            .record(record("second", "two", "three"))
            .record(record("reset", "three", "one"));

        assert_eq!(history.get_path(), vec!["one", "two", "three", "one"]);
        assert_eq!(history.last().map(|r| r.event.as_str()), Some("reset"));
    }

    #[test]
    fn bounded_history_drops_oldest_records() {
        let history = TransitionHistory::bounded(2)
            .record(record("a", "s0", "s1"))
            .record(record("b", "s1", "s2"))
            .record(record("c", "s2", "s3"));

        let events: Vec<_> = history.transitions().iter().map(|r| r.event.as_str()).collect();
        assert_eq!(events, vec!["b", "c"]);
        assert_eq!(history.get_path(), vec!["s1", "s2", "s3"]);
    }

    #[test]
    fn push_appends_in_place_within_limit() {
        let mut history = TransitionHistory::bounded(2);
        history.push(record("a", "s0", "s1"));
        history.push(record("b", "s1", "s2"));
        history.push(record("c", "s2", "s3"));

        assert_eq!(history.len(), 2);
        assert_eq!(history.get_path(), vec!["s1", "s2", "s3"]);

        let mut unbounded = TransitionHistory::new();
        for _ in 0..500 {
            unbounded.push(record("tick", "on", "off"));
        }
        assert_eq!(unbounded.len(), 500);
    }

    #[test]
    fn zero_limit_records_nothing() {
        let history = TransitionHistory::bounded(0).record(record("a", "s0", "s1"));

        assert!(history.is_empty());
        assert_eq!(history.limit(), Some(0));
    }

    #[test]
    fn duration_spans_first_to_last() {
        let start = Utc::now();
        let mut first = record("a", "s0", "s1");
        first.timestamp = start;
        let mut second = record("b", "s1", "s2");
        second.timestamp = start + chrono::Duration::seconds(3);

        let history = TransitionHistory::new().record(first).record(second);

        assert_eq!(history.duration(), Some(Duration::from_secs(3)));
    }

    #[test]
    fn history_serializes_round_trip() {
        let history = TransitionHistory::bounded(4).record(record("open", "closed", "open"));

        let json = serde_json::to_string(&history).unwrap();
        let restored: TransitionHistory = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.transitions(), history.transitions());
        assert_eq!(restored.limit(), Some(4));
    }
}
