//! Declarative transition descriptors.

use serde::{Deserialize, Serialize};

/// A named transition from one or more source states to a single destination.
///
/// A descriptor with N sources is equivalent to N descriptors with one source
/// each, all sharing the event name and destination.
///
/// # Example
///
/// ```rust
/// use hookfsm::core::TransitionDescriptor;
///
/// let panic = TransitionDescriptor::new("panic", ["yellow", "green"], "red");
///
/// assert_eq!(panic.event, "panic");
/// assert_eq!(panic.sources, vec!["yellow", "green"]);
/// assert_eq!(panic.destination, "red");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionDescriptor {
    /// Name of the event that triggers the transition
    pub event: String,
    /// States the event may be fired from
    pub sources: Vec<String>,
    /// State the machine ends up in
    pub destination: String,
}

impl TransitionDescriptor {
    /// Create a descriptor from any iterable of source names.
    ///
    /// Repeated source names are collapsed, keeping first-seen order.
    pub fn new<I, S>(event: impl Into<String>, sources: I, destination: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for source in sources {
            let source = source.into();
            if !unique.contains(&source) {
                unique.push(source);
            }
        }

        Self {
            event: event.into(),
            sources: unique,
            destination: destination.into(),
        }
    }

    /// Iterate the individual `(event, source, destination)` entries.
    pub fn expand(&self) -> impl Iterator<Item = (&str, &str, &str)> + '_ {
        self.sources
            .iter()
            .map(move |source| (self.event.as_str(), source.as_str(), self.destination.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_collapses_repeated_sources() {
        let descriptor = TransitionDescriptor::new("reset", ["one", "two", "one"], "start");

        assert_eq!(descriptor.sources, vec!["one", "two"]);
    }

    #[test]
    fn expand_yields_one_entry_per_source() {
        let descriptor = TransitionDescriptor::new("panic", ["yellow", "green"], "red");

        let entries: Vec<_> = descriptor.expand().collect();

        assert_eq!(
            entries,
            vec![("panic", "yellow", "red"), ("panic", "green", "red")]
        );
    }

    #[test]
    fn descriptor_without_sources_expands_to_nothing() {
        let descriptor = TransitionDescriptor::new("noop", Vec::<String>::new(), "anywhere");

        assert_eq!(descriptor.expand().count(), 0);
    }
}
