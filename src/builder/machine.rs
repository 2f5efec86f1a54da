//! Builder for constructing machines.

use crate::builder::definition::{BuildOptions, MachineDefinition};
use crate::builder::error::BuildError;
use crate::builder::violations::{ConflictPolicy, DefinitionViolation};
use crate::core::{TransitionConflict, TransitionDescriptor, TransitionHistory, TransitionTable};
use crate::handlers::{Handler, HandlerRegistry, RegistryReport};
use crate::machine::{Machine, TransitionContext};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<DefinitionViolation>>;

/// Builder for constructing machines with a fluent API.
///
/// Transitions and handlers are collected in declaration order; the
/// transition table and handler registry are built and validated once, in
/// [`build`](MachineBuilder::build). Every violation is reported at once.
#[derive(Debug, Default)]
pub struct MachineBuilder {
    initial: Option<String>,
    transitions: Vec<TransitionDescriptor>,
    handlers: Vec<(String, Handler)>,
    options: BuildOptions,
}

impl MachineBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a parsed definition; handlers are added afterwards.
    pub fn from_definition(definition: MachineDefinition) -> Self {
        Self::new()
            .initial(definition.initial.clone())
            .transitions(definition.descriptors())
            .options(definition.options)
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: impl Into<String>) -> Self {
        self.initial = Some(state.into());
        self
    }

    /// Declare an event leading from any of `sources` to `destination`.
    pub fn event<I, S>(
        self,
        event: impl Into<String>,
        sources: I,
        destination: impl Into<String>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.transition(TransitionDescriptor::new(event, sources, destination))
    }

    /// Add a pre-built descriptor.
    pub fn transition(mut self, descriptor: TransitionDescriptor) -> Self {
        self.transitions.push(descriptor);
        self
    }

    /// Add multiple descriptors at once.
    pub fn transitions(
        mut self,
        descriptors: impl IntoIterator<Item = TransitionDescriptor>,
    ) -> Self {
        self.transitions.extend(descriptors);
        self
    }

    /// Register a callback under a conventional handler name.
    ///
    /// See [`crate::handlers`] for the naming rules.
    pub fn on<F>(self, name: impl Into<String>, callback: F) -> Self
    where
        F: Fn(&mut TransitionContext) + Send + Sync + 'static,
    {
        self.handler(name, Handler::new(callback))
    }

    /// Register an already wrapped handler.
    pub fn handler(mut self, name: impl Into<String>, handler: Handler) -> Self {
        self.handlers.push((name.into(), handler));
        self
    }

    /// Replace the construction policies.
    pub fn options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    /// Build the machine.
    ///
    /// Fails if the initial state is missing, or if the definition is
    /// ambiguous and the matching policy is [`ConflictPolicy::Reject`].
    pub fn build(self) -> Result<Machine, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        let (table, conflicts) = TransitionTable::build(&self.transitions);
        let (registry, report) = HandlerRegistry::build(self.handlers, &table);

        let mut checks = check_transitions(conflicts, self.options.on_conflicting_transition);
        checks.extend(check_handlers(report, self.options.on_ambiguous_handler));
        if let Validation::Failure(violations) = Validation::all_vec(checks) {
            return Err(BuildError::Invalid(violations.iter().cloned().collect()));
        }

        if !table.has_state(&initial) {
            tracing::debug!(initial = %initial, "initial state appears in no transition");
        }

        tracing::debug!(
            initial = %initial,
            routes = table.len(),
            handlers = registry.len(),
            "machine built"
        );

        let history = TransitionHistory::with_limit(self.options.history_limit);
        Ok(Machine::from_parts(initial, table, registry, history))
    }
}

fn check_transitions(conflicts: Vec<TransitionConflict>, policy: ConflictPolicy) -> Vec<Check> {
    let violations = conflicts
        .into_iter()
        .map(|conflict| DefinitionViolation::ConflictingTransition {
            event: conflict.event,
            state: conflict.source,
            first: conflict.first,
            second: conflict.second,
        })
        .collect();

    apply_policy(violations, policy)
}

fn check_handlers(report: RegistryReport, policy: ConflictPolicy) -> Vec<Check> {
    let shorthands = report
        .ambiguous
        .into_iter()
        .map(|name| DefinitionViolation::AmbiguousShorthand { name });
    let collisions = report
        .conflicts
        .into_iter()
        .map(|conflict| DefinitionViolation::AmbiguousHandler {
            key: conflict.key,
            first: conflict.first,
            second: conflict.second,
        });

    apply_policy(shorthands.chain(collisions).collect(), policy)
}

fn apply_policy(violations: Vec<DefinitionViolation>, policy: ConflictPolicy) -> Vec<Check> {
    violations
        .into_iter()
        .map(|violation| match policy {
            ConflictPolicy::Reject => Validation::fail(violation),
            ConflictPolicy::LastWins => {
                tracing::warn!(%violation, "ambiguous definition, keeping the last declaration");
                Validation::success(())
            }
        })
        .collect()
}
