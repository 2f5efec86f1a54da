//! Callback phases and the keys handlers are registered under.

use serde::{Deserialize, Serialize};
use std::fmt;

/// When a callback runs relative to a transition.
///
/// Phases run in declaration order: `BeforeEvent`, `LeaveState`, then (after
/// the state changes) `EnterState` and `AfterEvent`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    BeforeEvent,
    LeaveState,
    EnterState,
    AfterEvent,
}

impl Phase {
    /// All phases in dispatch order.
    pub const ALL: [Phase; 4] = [
        Phase::BeforeEvent,
        Phase::LeaveState,
        Phase::EnterState,
        Phase::AfterEvent,
    ];

    /// Handler-name prefix selecting this phase.
    pub fn prefix(self) -> &'static str {
        match self {
            Phase::BeforeEvent => "before_",
            Phase::LeaveState => "leave_",
            Phase::EnterState => "enter_",
            Phase::AfterEvent => "after_",
        }
    }

    /// Suffix that turns a prefixed handler name into the generic handler.
    pub fn generic_suffix(self) -> &'static str {
        if self.targets_events() {
            "event"
        } else {
            "state"
        }
    }

    /// Whether handlers of this phase are keyed by event name (otherwise by state name).
    pub fn targets_events(self) -> bool {
        matches!(self, Phase::BeforeEvent | Phase::AfterEvent)
    }

    /// Whether a handler in this phase can still stop the transition.
    pub fn can_interrupt(self) -> bool {
        matches!(self, Phase::BeforeEvent | Phase::LeaveState)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::BeforeEvent => "before_event",
            Phase::LeaveState => "leave_state",
            Phase::EnterState => "enter_state",
            Phase::AfterEvent => "after_event",
        };
        f.write_str(name)
    }
}

/// Registry key for a handler: a target name and a phase.
///
/// An empty target denotes the generic handler for the phase.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HandlerKey {
    pub target: String,
    pub phase: Phase,
}

impl HandlerKey {
    /// Key for a handler bound to a specific event or state.
    pub fn named(target: impl Into<String>, phase: Phase) -> Self {
        Self {
            target: target.into(),
            phase,
        }
    }

    /// Key for the handler that applies to every event/state in `phase`.
    pub fn generic(phase: Phase) -> Self {
        Self {
            target: String::new(),
            phase,
        }
    }

    pub fn is_generic(&self) -> bool {
        self.target.is_empty()
    }
}

impl fmt::Display for HandlerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_generic() {
            write!(f, "{}", self.phase)
        } else {
            write!(f, "{}{}", self.phase.prefix(), self.target)
        }
    }
}
