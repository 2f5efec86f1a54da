//! Errors returned by the mutating machine operations.

use std::error::Error;
use std::sync::Arc;
use thiserror::Error;

/// Error value a callback reports through its transition context.
///
/// Shared so that the same error can be handed back from a deferring fire
/// call while staying attached to the pending transition.
pub type HandlerError = Arc<dyn Error + Send + Sync>;

/// Errors that can occur when firing an event or resuming a transition.
///
/// Every error leaves the current state exactly as it was before the call.
#[derive(Debug, Error)]
pub enum MachineError {
    #[error("event '{event}' inappropriate because transition '{pending}' did not complete")]
    TransitionInProgress { event: String, pending: String },

    #[error("resume inappropriate because no transition is in progress")]
    NoTransitionInProgress,

    #[error("event '{event}' does not exist")]
    UnknownEvent { event: String },

    #[error("event '{event}' inappropriate in current state '{state}'")]
    IllegalTransition { event: String, state: String },

    #[error("event '{event}' canceled by a callback in state '{state}'")]
    CallbackCanceled {
        event: String,
        state: String,
        /// Error the canceling callback reported, if any
        error: Option<HandlerError>,
    },

    #[error("internal error on state transition: {reason}")]
    Internal { reason: String },
}

impl MachineError {
    /// Whether the call was refused because another transition is pending.
    pub fn is_busy(&self) -> bool {
        matches!(self, MachineError::TransitionInProgress { .. })
    }

    /// Whether the event was refused by the transition table.
    pub fn is_rejected(&self) -> bool {
        matches!(
            self,
            MachineError::UnknownEvent { .. } | MachineError::IllegalTransition { .. }
        )
    }

    /// Error a callback attached before canceling, if any.
    pub fn handler_error(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        match self {
            MachineError::CallbackCanceled { error, .. } => error.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_event_and_state() {
        let illegal = MachineError::IllegalTransition {
            event: "close".to_string(),
            state: "closed".to_string(),
        };
        assert_eq!(
            illegal.to_string(),
            "event 'close' inappropriate in current state 'closed'"
        );

        let unknown = MachineError::UnknownEvent {
            event: "lock".to_string(),
        };
        assert_eq!(unknown.to_string(), "event 'lock' does not exist");
    }

    #[test]
    fn classification_helpers() {
        let busy = MachineError::TransitionInProgress {
            event: "reset".to_string(),
            pending: "run".to_string(),
        };
        assert!(busy.is_busy());
        assert!(!busy.is_rejected());
        assert!(!MachineError::NoTransitionInProgress.is_busy());
        assert!(MachineError::UnknownEvent {
            event: "x".to_string()
        }
        .is_rejected());
    }

    #[test]
    fn handler_error_is_exposed_for_cancellation() {
        let canceled = MachineError::CallbackCanceled {
            event: "run".to_string(),
            state: "start".to_string(),
            error: Some(Arc::from(Box::<dyn Error + Send + Sync>::from("not ready"))),
        };

        assert_eq!(
            canceled.handler_error().map(|e| e.to_string()),
            Some("not ready".to_string())
        );
        assert!(MachineError::NoTransitionInProgress.handler_error().is_none());
    }
}
