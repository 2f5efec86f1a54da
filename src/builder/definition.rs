//! Declarative machine definitions.
//!
//! Definitions use a JSON format:
//!
//! ```json
//! {
//!   "initial": "green",
//!   "transitions": [
//!     {"event": "warn", "from": "green", "to": "yellow"},
//!     {"event": "panic", "from": ["yellow", "green"], "to": "red"}
//!   ],
//!   "options": {"on_ambiguous_handler": "last_wins", "history_limit": 64}
//! }
//! ```
//!
//! `options` and each of its fields may be omitted.

use crate::builder::error::BuildError;
use crate::builder::violations::ConflictPolicy;
use crate::core::TransitionDescriptor;
use serde::{Deserialize, Serialize};

/// Default number of completed transitions a machine remembers.
pub const DEFAULT_HISTORY_LIMIT: usize = 128;

/// Construction policies.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    /// What to do when one `(event, source)` pair leads to two destinations
    pub on_conflicting_transition: ConflictPolicy,

    /// What to do when handler names collide or a shorthand name is ambiguous
    pub on_ambiguous_handler: ConflictPolicy,

    /// Completed transitions kept in history; `None` keeps all of them
    pub history_limit: Option<usize>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            on_conflicting_transition: ConflictPolicy::Reject,
            on_ambiguous_handler: ConflictPolicy::Reject,
            history_limit: Some(DEFAULT_HISTORY_LIMIT),
        }
    }
}

/// A transition as written in a definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionEntry {
    /// Event that triggers this transition.
    pub event: String,

    /// Source state(s). Can be a single state or multiple.
    #[serde(deserialize_with = "deserialize_sources")]
    pub from: Vec<String>,

    /// Target state.
    pub to: String,
}

fn deserialize_sources<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct SourcesVisitor;

    impl<'de> Visitor<'de> for SourcesVisitor {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a state name or an array of state names")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![v.to_string()])
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: de::SeqAccess<'de>,
        {
            let mut states = Vec::new();
            while let Some(state) = seq.next_element::<String>()? {
                states.push(state);
            }
            Ok(states)
        }
    }

    deserializer.deserialize_any(SourcesVisitor)
}

/// Serializable description of a machine, without its handlers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineDefinition {
    /// State the machine starts in.
    pub initial: String,

    /// Transitions in declaration order.
    pub transitions: Vec<TransitionEntry>,

    /// Construction policies.
    #[serde(default)]
    pub options: BuildOptions,
}

impl MachineDefinition {
    /// Parse a definition from JSON text.
    pub fn from_json(json: &str) -> Result<Self, BuildError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a definition from an already decoded JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, BuildError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Transitions as descriptors, in declaration order.
    pub fn descriptors(&self) -> Vec<TransitionDescriptor> {
        self.transitions
            .iter()
            .map(|entry| TransitionDescriptor::new(&entry.event, &entry.from, &entry.to))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn traffic_light() -> serde_json::Value {
        serde_json::json!({
            "initial": "green",
            "transitions": [
                {"event": "warn", "from": "green", "to": "yellow"},
                {"event": "panic", "from": ["yellow", "green"], "to": "red"},
                {"event": "calm", "from": "red", "to": "yellow"},
                {"event": "clear", "from": "yellow", "to": "green"}
            ]
        })
    }

    #[test]
    fn parses_single_and_multiple_sources() {
        let definition = MachineDefinition::from_value(traffic_light()).unwrap();

        assert_eq!(definition.initial, "green");
        assert_eq!(definition.transitions[0].from, vec!["green"]);
        assert_eq!(definition.transitions[1].from, vec!["yellow", "green"]);
    }

    #[test]
    fn options_default_when_omitted() {
        let definition = MachineDefinition::from_value(traffic_light()).unwrap();

        assert_eq!(definition.options, BuildOptions::default());
        assert_eq!(definition.options.history_limit, Some(DEFAULT_HISTORY_LIMIT));
    }

    #[test]
    fn partial_options_keep_other_defaults() {
        let definition = MachineDefinition::from_json(
            r#"{
                "initial": "a",
                "transitions": [{"event": "go", "from": "a", "to": "b"}],
                "options": {"on_ambiguous_handler": "last_wins", "history_limit": null}
            }"#,
        )
        .unwrap();

        assert_eq!(definition.options.on_ambiguous_handler, ConflictPolicy::LastWins);
        assert_eq!(definition.options.on_conflicting_transition, ConflictPolicy::Reject);
        assert_eq!(definition.options.history_limit, None);
    }

    #[test]
    fn descriptors_preserve_order() {
        let definition = MachineDefinition::from_value(traffic_light()).unwrap();

        let events: Vec<_> = definition
            .descriptors()
            .into_iter()
            .map(|d| d.event)
            .collect();

        assert_eq!(events, vec!["warn", "panic", "calm", "clear"]);
    }

    #[test]
    fn malformed_json_is_a_definition_error() {
        let result = MachineDefinition::from_json(
            r#"{"initial": "a", "transitions": [{"event": "go", "from": 3, "to": "b"}]}"#,
        );

        assert!(matches!(result, Err(BuildError::Definition(_))));
    }

    #[test]
    fn missing_initial_is_rejected() {
        let result = MachineDefinition::from_json(r#"{"transitions": []}"#);

        assert!(matches!(result, Err(BuildError::Definition(_))));
    }
}
