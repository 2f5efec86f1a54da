//! Successful results of the mutating machine operations.

use super::error::HandlerError;
use std::error::Error;

/// Summary of a transition that completed or was deferred.
#[derive(Clone, Debug)]
pub struct TransitionReport {
    pub event: String,
    pub from: String,
    pub to: String,
    /// Error set by a callback; it does not undo the transition
    pub error: Option<HandlerError>,
}

impl TransitionReport {
    pub fn error(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.error.as_deref()
    }
}

/// Result of a fire call that was not rejected.
#[derive(Clone, Debug)]
pub enum Fired {
    /// The event leads back to the current state; no callbacks ran
    Unchanged,

    /// The state changed and all callbacks ran
    Completed(TransitionReport),

    /// A leave callback suspended the transition; the state is unchanged
    /// until `resume` is called
    Deferred(TransitionReport),
}

impl Fired {
    /// Report of the transition, absent for a self-transition.
    pub fn report(&self) -> Option<&TransitionReport> {
        match self {
            Fired::Unchanged => None,
            Fired::Completed(report) | Fired::Deferred(report) => Some(report),
        }
    }

    /// Error a callback reported along the way, if any.
    pub fn error(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.report().and_then(TransitionReport::error)
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Fired::Completed(_))
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, Fired::Deferred(_))
    }
}
