//! A transition suspended between its leave and enter phases.

use super::context::{Arg, TransitionContext};
use std::time::Duration;

/// Transition whose leave phase deferred completion.
///
/// Holds the attempt's context, which names the event and destination
/// needed to finish the transition. A machine holds at most one.
#[derive(Debug)]
pub struct PendingTransition {
    context: TransitionContext,
}

impl PendingTransition {
    pub(crate) fn new(context: TransitionContext) -> Self {
        Self { context }
    }

    pub fn event(&self) -> &str {
        self.context.event()
    }

    pub fn from(&self) -> &str {
        self.context.from()
    }

    pub fn to(&self) -> &str {
        self.context.to()
    }

    pub fn args(&self) -> &[Arg] {
        self.context.args()
    }

    /// Time since the transition was fired.
    pub fn elapsed(&self) -> Duration {
        self.context.elapsed()
    }

    pub(crate) fn into_context(self) -> TransitionContext {
        self.context
    }
}
