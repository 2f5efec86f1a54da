//! The `(event, source) -> destination` lookup table.
//!
//! Built once from the descriptor list. Besides the routes it keeps the sets
//! of every event name and state name it has seen, which handler-name
//! classification needs to tell events and states apart.

use super::descriptor::TransitionDescriptor;
use crate::machine::MachineError;
use std::collections::{BTreeMap, BTreeSet};

/// Two descriptors mapped the same `(event, source)` pair to different destinations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionConflict {
    pub event: String,
    pub source: String,
    /// Destination declared first
    pub first: String,
    /// Destination declared later, which the table keeps
    pub second: String,
}

/// Precomputed transition lookup table.
///
/// # Example
///
/// ```rust
/// use hookfsm::core::{TransitionDescriptor, TransitionTable};
///
/// let table = TransitionTable::from_descriptors(&[
///     TransitionDescriptor::new("warn", ["green"], "yellow"),
///     TransitionDescriptor::new("panic", ["yellow", "green"], "red"),
/// ]);
///
/// assert_eq!(table.destination("panic", "green"), Some("red"));
/// assert_eq!(table.destination("warn", "red"), None);
/// assert!(table.has_state("yellow"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct TransitionTable {
    // event -> source -> destination
    routes: BTreeMap<String, BTreeMap<String, String>>,
    events: BTreeSet<String>,
    states: BTreeSet<String>,
}

impl TransitionTable {
    /// Build the table, reporting each conflicting `(event, source)` pair once.
    ///
    /// On conflict the later declaration is kept; callers decide whether the
    /// conflicts are acceptable.
    pub fn build(descriptors: &[TransitionDescriptor]) -> (Self, Vec<TransitionConflict>) {
        let mut table = Self::default();
        let mut conflicts = Vec::new();
        let mut conflicted = BTreeSet::new();

        for descriptor in descriptors {
            table.events.insert(descriptor.event.clone());
            table.states.insert(descriptor.destination.clone());

            for (event, source, destination) in descriptor.expand() {
                table.states.insert(source.to_string());

                let sources = table.routes.entry(event.to_string()).or_default();
                let previous = sources.insert(source.to_string(), destination.to_string());
                if let Some(previous) = previous {
                    // One report per key, naming its first two distinct destinations.
                    if previous != destination
                        && conflicted.insert((event.to_string(), source.to_string()))
                    {
                        conflicts.push(TransitionConflict {
                            event: event.to_string(),
                            source: source.to_string(),
                            first: previous,
                            second: destination.to_string(),
                        });
                    }
                }
            }
        }

        (table, conflicts)
    }

    /// Build the table, silently keeping the last of any conflicting declarations.
    pub fn from_descriptors(descriptors: &[TransitionDescriptor]) -> Self {
        Self::build(descriptors).0
    }

    /// Destination of `event` fired from `state`, if declared.
    pub fn destination(&self, event: &str, state: &str) -> Option<&str> {
        self.routes
            .get(event)
            .and_then(|sources| sources.get(state))
            .map(String::as_str)
    }

    /// Look up a destination, explaining why there is none.
    ///
    /// An event without any route at all is unknown; an event routed only
    /// from other states is illegal in `state`.
    pub fn resolve(&self, event: &str, state: &str) -> Result<&str, MachineError> {
        match self.routes.get(event) {
            None => Err(MachineError::UnknownEvent {
                event: event.to_string(),
            }),
            Some(sources) => sources
                .get(state)
                .map(String::as_str)
                .ok_or_else(|| MachineError::IllegalTransition {
                    event: event.to_string(),
                    state: state.to_string(),
                }),
        }
    }

    /// Events that can be fired from `state`, sorted by name.
    pub fn events_from(&self, state: &str) -> Vec<&str> {
        self.routes
            .iter()
            .filter(|(_, sources)| sources.contains_key(state))
            .map(|(event, _)| event.as_str())
            .collect()
    }

    pub fn has_event(&self, event: &str) -> bool {
        self.events.contains(event)
    }

    pub fn has_state(&self, state: &str) -> bool {
        self.states.contains(state)
    }

    /// Every event name appearing in a descriptor.
    pub fn events(&self) -> impl Iterator<Item = &str> {
        self.events.iter().map(String::as_str)
    }

    /// Every state name appearing as a source or destination.
    pub fn states(&self) -> impl Iterator<Item = &str> {
        self.states.iter().map(String::as_str)
    }

    /// Number of `(event, source)` routes.
    pub fn len(&self) -> usize {
        self.routes.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
