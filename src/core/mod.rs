//! Core state machine data types.
//!
//! This module contains the pure, callback-free part of the engine:
//! - Transition descriptors and the lookup table built from them
//! - Callback phases and handler keys
//! - History of completed transitions
//!
//! Nothing here invokes user code.

mod descriptor;
mod history;
mod phase;
mod table;

pub use descriptor::TransitionDescriptor;
pub use history::{TransitionHistory, TransitionRecord};
pub use phase::{HandlerKey, Phase};
pub use table::{TransitionConflict, TransitionTable};
