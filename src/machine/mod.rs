//! Runtime side of the engine: firing events and completing transitions.
//!
//! # Key Concepts
//!
//! - **Machine**: holds the current state and drives callbacks
//! - **Context**: one mutable value per transition attempt, shared by its callbacks
//! - **Pending transition**: a transition deferred by a leave callback, completed by `resume`

mod context;
mod error;
#[allow(clippy::module_inception)]
mod machine;
mod outcome;
mod pending;

pub use context::{Arg, TransitionContext};
pub use error::{HandlerError, MachineError};
pub use machine::Machine;
pub use outcome::{Fired, TransitionReport};
pub use pending::PendingTransition;
