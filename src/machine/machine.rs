//! The machine: current state, lookup tables, and at most one pending transition.

use super::context::{Arg, TransitionContext};
use super::error::MachineError;
use super::outcome::{Fired, TransitionReport};
use super::pending::PendingTransition;
use crate::core::{Phase, TransitionHistory, TransitionRecord, TransitionTable};
use crate::handlers::HandlerRegistry;
use chrono::Utc;
use std::iter;
use std::ops::ControlFlow;

/// Finite state machine driven by named events.
///
/// Firing an event runs, in order: `before_<EVENT>`, `before_event`,
/// `leave_<STATE>`, `leave_state`, then changes the state and runs
/// `enter_<STATE>`, `enter_state`, `after_<EVENT>`, `after_event`.
///
/// Only one transition can be in flight. While a transition is deferred,
/// queries keep working but [`fire`](Machine::fire) is refused until
/// [`resume`](Machine::resume) completes it.
///
/// The machine performs no internal synchronization; share it across
/// threads behind a lock.
///
/// # Example
///
/// ```rust
/// use hookfsm::builder::MachineBuilder;
///
/// let mut machine = MachineBuilder::new()
///     .initial("green")
///     .event("warn", ["green"], "yellow")
///     .event("panic", ["yellow", "green"], "red")
///     .build()
///     .unwrap();
///
/// machine.fire("warn").unwrap();
/// assert_eq!(machine.current(), "yellow");
///
/// machine.fire("panic").unwrap();
/// assert!(machine.is("red"));
/// ```
#[derive(Debug)]
pub struct Machine {
    current: String,
    table: TransitionTable,
    registry: HandlerRegistry,
    pending: Option<PendingTransition>,
    history: TransitionHistory,
}

impl Machine {
    pub(crate) fn from_parts(
        initial: String,
        table: TransitionTable,
        registry: HandlerRegistry,
        history: TransitionHistory,
    ) -> Self {
        Self {
            current: initial,
            table,
            registry,
            pending: None,
            history,
        }
    }

    /// Current state (pure)
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Whether `state` is the current state (pure)
    pub fn is(&self, state: &str) -> bool {
        self.current == state
    }

    /// Whether `event` can be fired right now.
    ///
    /// False while a transition is pending, even if the event is declared
    /// from the current state.
    pub fn can(&self, event: &str) -> bool {
        self.pending.is_none() && self.table.destination(event, &self.current).is_some()
    }

    pub fn cannot(&self, event: &str) -> bool {
        !self.can(event)
    }

    /// Events that can be fired right now, sorted by name.
    pub fn available_events(&self) -> Vec<&str> {
        if self.pending.is_some() {
            return Vec::new();
        }
        self.table.events_from(&self.current)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The deferred transition awaiting [`resume`](Machine::resume), if any.
    pub fn pending(&self) -> Option<&PendingTransition> {
        self.pending.as_ref()
    }

    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Completed transitions, oldest first.
    pub fn history(&self) -> &TransitionHistory {
        &self.history
    }

    /// Fire `event` without arguments.
    pub fn fire(&mut self, event: &str) -> Result<Fired, MachineError> {
        self.fire_with(event, Vec::new())
    }

    /// Fire `event`, passing `args` through to every callback.
    ///
    /// Returns [`Fired::Unchanged`] for a self-transition (no callbacks run),
    /// [`Fired::Deferred`] when a leave callback deferred, and
    /// [`Fired::Completed`] otherwise. A callback error rides along in the
    /// report without undoing the transition.
    pub fn fire_with(&mut self, event: &str, args: Vec<Arg>) -> Result<Fired, MachineError> {
        if let Some(pending) = &self.pending {
            tracing::debug!(
                event,
                pending = pending.event(),
                "event refused while a transition is pending"
            );
            return Err(MachineError::TransitionInProgress {
                event: event.to_string(),
                pending: pending.event().to_string(),
            });
        }

        let to = self.table.resolve(event, &self.current)?.to_string();
        if to == self.current {
            tracing::trace!(event, state = %self.current, "self-transition, no callbacks run");
            return Ok(Fired::Unchanged);
        }

        let from = self.current.clone();
        let mut context = TransitionContext::new(event, from.as_str(), to.as_str(), args);

        if self.dispatch(Phase::BeforeEvent, event, &mut context).is_break() {
            return Err(canceled(context));
        }

        if self.dispatch(Phase::LeaveState, &from, &mut context).is_break() {
            if context.is_canceled() {
                return Err(canceled(context));
            }

            tracing::debug!(event, from = %from, to = %to, "transition deferred");
            let report = context.report();
            self.pending = Some(PendingTransition::new(context));
            return Ok(Fired::Deferred(report));
        }

        self.pending = Some(PendingTransition::new(context));
        match self.complete_pending() {
            Ok(report) => Ok(Fired::Completed(report)),
            Err(err) => Err(MachineError::Internal {
                reason: err.to_string(),
            }),
        }
    }

    /// Complete the deferred transition.
    ///
    /// Changes the state and runs the enter and after callbacks. Fails with
    /// [`MachineError::NoTransitionInProgress`] if nothing is pending.
    pub fn resume(&mut self) -> Result<TransitionReport, MachineError> {
        let Some(waited) = self.pending.as_ref().map(PendingTransition::elapsed) else {
            tracing::debug!(state = %self.current, "resume called with no pending transition");
            return Err(MachineError::NoTransitionInProgress);
        };

        let report = self.complete_pending()?;
        tracing::debug!(
            event = %report.event,
            ?waited,
            "deferred transition resumed"
        );
        Ok(report)
    }

    fn complete_pending(&mut self) -> Result<TransitionReport, MachineError> {
        let pending = self
            .pending
            .take()
            .ok_or(MachineError::NoTransitionInProgress)?;
        let mut context = pending.into_context();
        let event = context.event().to_string();
        let to = context.to().to_string();

        self.current = to.clone();
        self.history.push(TransitionRecord {
            event: event.clone(),
            from: context.from().to_string(),
            to: to.clone(),
            timestamp: Utc::now(),
            deferred: context.is_deferred(),
        });

        self.notify(Phase::EnterState, &to, &mut context);
        self.notify(Phase::AfterEvent, &event, &mut context);

        tracing::debug!(
            event = %event,
            from = context.from(),
            to = %to,
            failed = context.error().is_some(),
            "transition completed"
        );
        Ok(context.report())
    }

    /// Run the handlers of a phase that follows the state change.
    ///
    /// Cancel and defer requests made here are left on the context unheeded.
    fn notify(&self, phase: Phase, target: &str, context: &mut TransitionContext) {
        debug_assert!(!phase.can_interrupt());
        let flow = self.dispatch(phase, target, context);
        debug_assert!(flow.is_continue());
    }

    /// Run the named then the generic handler of `phase`.
    ///
    /// Breaks as soon as a callback cancels or defers, but only in phases
    /// that run before the state changes.
    fn dispatch(
        &self,
        phase: Phase,
        target: &str,
        context: &mut TransitionContext,
    ) -> ControlFlow<()> {
        context.enter_phase(phase);

        let targets = iter::once(target)
            .filter(|target| !target.is_empty())
            .chain(iter::once(""));
        for target in targets {
            let Some(handler) = self.registry.get(target, phase) else {
                continue;
            };

            tracing::trace!(event = context.event(), %phase, target, "invoking handler");
            handler.call(context);

            if phase.can_interrupt() && context.is_interrupted() {
                return ControlFlow::Break(());
            }
        }

        ControlFlow::Continue(())
    }
}

fn canceled(context: TransitionContext) -> MachineError {
    tracing::debug!(
        event = context.event(),
        state = context.from(),
        phase = %context.phase(),
        "transition canceled by callback"
    );
    MachineError::CallbackCanceled {
        event: context.event().to_string(),
        state: context.from().to_string(),
        error: context.handler_error(),
    }
}
