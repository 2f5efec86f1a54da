//! Context handed to every callback of one transition attempt.

use super::error::HandlerError;
use super::outcome::TransitionReport;
use crate::core::Phase;
use chrono::{DateTime, Utc};
use std::any::Any;
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

/// Opaque, caller-defined argument passed through to callbacks.
pub type Arg = Box<dyn Any + Send + Sync>;

/// State of one transition attempt, threaded through all of its callbacks.
///
/// A single context is created per fire call and shared by every callback of
/// that attempt, so a flag set by one callback is visible to the next. When
/// the transition is deferred the context travels with the pending transition
/// and is handed to the enter/after callbacks on resume.
#[derive(Debug)]
pub struct TransitionContext {
    event: String,
    from: String,
    to: String,
    phase: Phase,
    error: Option<HandlerError>,
    args: Vec<Arg>,
    canceled: bool,
    deferred: bool,
    started_at: DateTime<Utc>,
}

impl TransitionContext {
    pub(crate) fn new(
        event: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
        args: Vec<Arg>,
    ) -> Self {
        Self {
            event: event.into(),
            from: from.into(),
            to: to.into(),
            phase: Phase::BeforeEvent,
            error: None,
            args,
            canceled: false,
            deferred: false,
            started_at: Utc::now(),
        }
    }

    /// Name of the event being fired.
    pub fn event(&self) -> &str {
        &self.event
    }

    /// State the transition starts from.
    pub fn from(&self) -> &str {
        &self.from
    }

    /// State the transition ends in.
    pub fn to(&self) -> &str {
        &self.to
    }

    /// Phase whose callbacks are currently running.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Arguments supplied by the caller of the fire operation.
    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    /// Argument at `index`, if present and of type `T`.
    pub fn arg<T: Any>(&self, index: usize) -> Option<&T> {
        self.args
            .get(index)
            .and_then(|arg| arg.as_ref().downcast_ref::<T>())
    }

    /// Error reported by a callback so far.
    pub fn error(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.error.as_deref()
    }

    /// Report an error to the caller of the fire (or resume) operation.
    ///
    /// Setting an error does not stop the transition; call [`cancel`] for that.
    ///
    /// [`cancel`]: TransitionContext::cancel
    pub fn set_error<E>(&mut self, error: E)
    where
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        self.error = Some(Arc::from(error.into()));
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Cancel the transition before the state changes.
    ///
    /// Only effective in `before_*` and `leave_*` callbacks.
    pub fn cancel(&mut self) {
        self.canceled = true;
    }

    pub fn is_canceled(&self) -> bool {
        self.canceled
    }

    /// Suspend the transition until [`Machine::resume`] is called.
    ///
    /// Only honored in `leave_*` callbacks; elsewhere the request is ignored.
    ///
    /// [`Machine::resume`]: crate::machine::Machine::resume
    pub fn defer(&mut self) {
        if self.phase == Phase::LeaveState {
            self.deferred = true;
        } else {
            tracing::debug!(
                event = %self.event,
                phase = %self.phase,
                "defer ignored outside the leave phase"
            );
        }
    }

    pub fn is_deferred(&self) -> bool {
        self.deferred
    }

    /// Time since the fire call created this context.
    pub fn elapsed(&self) -> Duration {
        Utc::now()
            .signed_duration_since(self.started_at)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }

    pub(crate) fn enter_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    /// Whether a callback asked to stop dispatching the current phase.
    pub(crate) fn is_interrupted(&self) -> bool {
        self.canceled || self.deferred
    }

    pub(crate) fn handler_error(&self) -> Option<HandlerError> {
        self.error.clone()
    }

    pub(crate) fn report(&self) -> TransitionReport {
        TransitionReport {
            event: self.event.clone(),
            from: self.from.clone(),
            to: self.to.clone(),
            error: self.handler_error(),
        }
    }
}
