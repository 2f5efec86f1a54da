//! Resolution of handler names into `(target, phase)` registrations.

use crate::core::{HandlerKey, Phase, TransitionTable};
use crate::machine::TransitionContext;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Shared lifecycle callback.
///
/// Callbacks communicate only through the context: they may set an error,
/// cancel, or (in a leave callback) defer the transition.
#[derive(Clone)]
pub struct Handler(Arc<dyn Fn(&mut TransitionContext) + Send + Sync>);

impl Handler {
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&mut TransitionContext) + Send + Sync + 'static,
    {
        Self(Arc::new(callback))
    }

    pub(crate) fn call(&self, context: &mut TransitionContext) {
        (self.0)(context)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Handler(..)")
    }
}

/// Result of classifying one handler name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Classified {
    pub key: HandlerKey,
    /// Shorthand name that is both a state and an event; the state reading won
    pub ambiguous: bool,
}

/// Classify a raw handler name against the known events and states.
///
/// Prefixed names (`before_`, `leave_`, `enter_`, `after_`) bind to the
/// named event or state, or to the generic handler when followed by `event`
/// or `state`. Unprefixed names bind to entering a state of that name, or
/// failing that to after an event of that name. Names that match nothing
/// return `None`.
///
/// # Example
///
/// ```rust
/// use hookfsm::core::{Phase, TransitionDescriptor, TransitionTable};
/// use hookfsm::handlers::classify;
///
/// let table = TransitionTable::from_descriptors(&[
///     TransitionDescriptor::new("run", ["start"], "end"),
/// ]);
///
/// assert_eq!(classify("before_run", &table).unwrap().key.phase, Phase::BeforeEvent);
/// assert_eq!(classify("end", &table).unwrap().key.phase, Phase::EnterState);
/// assert!(classify("after_walk", &table).is_none());
/// ```
pub fn classify(name: &str, table: &TransitionTable) -> Option<Classified> {
    for phase in Phase::ALL {
        if let Some(rest) = name.strip_prefix(phase.prefix()) {
            return classify_prefixed(rest, phase, table).map(|key| Classified {
                key,
                ambiguous: false,
            });
        }
    }

    let is_state = table.has_state(name);
    let is_event = table.has_event(name);
    let phase = match (is_state, is_event) {
        (true, _) => Phase::EnterState,
        (false, true) => Phase::AfterEvent,
        (false, false) => return None,
    };

    Some(Classified {
        key: HandlerKey::named(name, phase),
        ambiguous: is_state && is_event,
    })
}

fn classify_prefixed(rest: &str, phase: Phase, table: &TransitionTable) -> Option<HandlerKey> {
    if rest == phase.generic_suffix() {
        return Some(HandlerKey::generic(phase));
    }

    let known = if phase.targets_events() {
        table.has_event(rest)
    } else {
        table.has_state(rest)
    };

    known.then(|| HandlerKey::named(rest, phase))
}

/// Two handler names resolved to the same key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HandlerConflict {
    pub key: HandlerKey,
    /// Name registered first
    pub first: String,
    /// Name registered later, which the registry keeps
    pub second: String,
}

/// Diagnostics gathered while building a registry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegistryReport {
    pub conflicts: Vec<HandlerConflict>,
    /// Shorthand names matching both a state and an event
    pub ambiguous: Vec<String>,
    /// Names that matched no event or state
    pub ignored: Vec<String>,
}

impl RegistryReport {
    pub fn is_clean(&self) -> bool {
        self.conflicts.is_empty() && self.ambiguous.is_empty()
    }
}

#[derive(Clone, Debug)]
struct Registration {
    name: String,
    handler: Handler,
}

/// Callbacks keyed by phase and target, built once at construction.
#[derive(Clone, Debug, Default)]
pub struct HandlerRegistry {
    phases: HashMap<Phase, HashMap<String, Registration>>,
}

impl HandlerRegistry {
    /// Build a registry from handler names in declaration order.
    ///
    /// When two names resolve to the same key the later one is kept and the
    /// clash is listed in the returned report.
    pub fn build<I, N>(handlers: I, table: &TransitionTable) -> (Self, RegistryReport)
    where
        I: IntoIterator<Item = (N, Handler)>,
        N: Into<String>,
    {
        let mut registry = Self::default();
        let mut report = RegistryReport::default();

        for (name, handler) in handlers {
            let name = name.into();
            let Some(classified) = classify(&name, table) else {
                tracing::debug!(handler = %name, "handler name matches no event or state");
                report.ignored.push(name);
                continue;
            };

            if classified.ambiguous {
                report.ambiguous.push(name.clone());
            }

            let key = classified.key;
            let previous = registry
                .phases
                .entry(key.phase)
                .or_default()
                .insert(
                    key.target.clone(),
                    Registration {
                        name: name.clone(),
                        handler,
                    },
                );

            if let Some(previous) = previous {
                report.conflicts.push(HandlerConflict {
                    key,
                    first: previous.name,
                    second: name,
                });
            }
        }

        (registry, report)
    }

    /// Handler bound to `target` in `phase`; an empty target is the generic handler.
    pub fn get(&self, target: &str, phase: Phase) -> Option<&Handler> {
        self.phases
            .get(&phase)
            .and_then(|targets| targets.get(target))
            .map(|registration| &registration.handler)
    }

    /// Name the handler under `key` was registered with.
    pub fn name_of(&self, key: &HandlerKey) -> Option<&str> {
        self.phases
            .get(&key.phase)
            .and_then(|targets| targets.get(&key.target))
            .map(|registration| registration.name.as_str())
    }

    /// All registered keys, sorted.
    pub fn keys(&self) -> Vec<HandlerKey> {
        let mut keys: Vec<HandlerKey> = self
            .phases
            .iter()
            .flat_map(|(phase, targets)| {
                targets
                    .keys()
                    .map(move |target| HandlerKey::named(target.clone(), *phase))
            })
            .collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.phases.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TransitionDescriptor;

    fn table() -> TransitionTable {
        TransitionTable::from_descriptors(&[
            TransitionDescriptor::new("run", ["start"], "end"),
            TransitionDescriptor::new("reset", ["end"], "start"),
        ])
    }

    fn key(name: &str) -> Option<HandlerKey> {
        classify(name, &table()).map(|c| c.key)
    }

    fn noop() -> Handler {
        Handler::new(|_| {})
    }

    #[test]
    fn generic_names() {
        assert_eq!(key("before_event"), Some(HandlerKey::generic(Phase::BeforeEvent)));
        assert_eq!(key("leave_state"), Some(HandlerKey::generic(Phase::LeaveState)));
        assert_eq!(key("enter_state"), Some(HandlerKey::generic(Phase::EnterState)));
        assert_eq!(key("after_event"), Some(HandlerKey::generic(Phase::AfterEvent)));
    }

    #[test]
    fn specific_names() {
        assert_eq!(key("before_run"), Some(HandlerKey::named("run", Phase::BeforeEvent)));
        assert_eq!(key("leave_start"), Some(HandlerKey::named("start", Phase::LeaveState)));
        assert_eq!(key("enter_end"), Some(HandlerKey::named("end", Phase::EnterState)));
        assert_eq!(key("after_reset"), Some(HandlerKey::named("reset", Phase::AfterEvent)));
    }

    #[test]
    fn prefixes_check_the_right_namespace() {
        // "end" is a state, not an event
        assert_eq!(key("before_end"), None);
        assert_eq!(key("after_end"), None);
        // "run" is an event, not a state
        assert_eq!(key("leave_run"), None);
        assert_eq!(key("enter_run"), None);
        // generic suffix belongs to the other namespace
        assert_eq!(key("before_state"), None);
        assert_eq!(key("enter_event"), None);
    }

    #[test]
    fn shorthand_names() {
        assert_eq!(key("end"), Some(HandlerKey::named("end", Phase::EnterState)));
        assert_eq!(key("run"), Some(HandlerKey::named("run", Phase::AfterEvent)));
        assert_eq!(key("walk"), None);
    }

    #[test]
    fn shorthand_prefers_state_and_flags_ambiguity() {
        let table = TransitionTable::from_descriptors(&[TransitionDescriptor::new(
            "open",
            ["closed"],
            "open",
        )]);

        let classified = classify("open", &table).unwrap();

        assert_eq!(classified.key, HandlerKey::named("open", Phase::EnterState));
        assert!(classified.ambiguous);
    }

    #[test]
    fn prefixed_name_never_falls_back_to_shorthand() {
        let table = TransitionTable::from_descriptors(&[TransitionDescriptor::new(
            "go",
            ["before_x"],
            "after_x",
        )]);

        assert_eq!(classify("before_x", &table), None);
    }

    #[test]
    fn build_registers_and_reports_ignored_names() {
        let (registry, report) = HandlerRegistry::build(
            vec![
                ("before_run", noop()),
                ("enter_state", noop()),
                ("after_walk", noop()),
            ],
            &table(),
        );

        assert_eq!(registry.len(), 2);
        assert!(registry.get("run", Phase::BeforeEvent).is_some());
        assert!(registry.get("", Phase::EnterState).is_some());
        assert!(registry.get("run", Phase::AfterEvent).is_none());
        assert_eq!(report.ignored, vec!["after_walk".to_string()]);
        assert!(report.is_clean());
    }

    #[test]
    fn build_reports_duplicate_keys_and_keeps_later() {
        let (registry, report) = HandlerRegistry::build(
            vec![("end", noop()), ("enter_end", noop())],
            &table(),
        );

        let key = HandlerKey::named("end", Phase::EnterState);
        assert_eq!(
            report.conflicts,
            vec![HandlerConflict {
                key: key.clone(),
                first: "end".to_string(),
                second: "enter_end".to_string(),
            }]
        );
        assert_eq!(registry.name_of(&key), Some("enter_end"));
        assert!(!report.is_clean());
    }

    #[test]
    fn keys_are_sorted() {
        let (registry, _) = HandlerRegistry::build(
            vec![("after_event", noop()), ("before_run", noop()), ("leave_start", noop())],
            &table(),
        );

        assert_eq!(
            registry.keys(),
            vec![
                HandlerKey::generic(Phase::AfterEvent),
                HandlerKey::named("run", Phase::BeforeEvent),
                HandlerKey::named("start", Phase::LeaveState),
            ]
        );
    }
}
