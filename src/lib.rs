//! hookfsm: an event-driven finite state machine with lifecycle callbacks
//!
//! A machine is declared as a list of named events, each leading from one or
//! more source states to a destination. Firing an event runs callbacks
//! registered under conventional names around the state change, and a
//! callback may cancel the transition or suspend it until `resume` is called.
//!
//! # Core Concepts
//!
//! - **Transition table**: `(event, state) -> destination`, built once
//! - **Handlers**: callbacks resolved by name into `(target, phase)` keys
//! - **Context**: one mutable value per attempt, shared by its callbacks
//! - **Deferred transitions**: at most one pending transition per machine
//!
//! # Example
//!
//! ```rust
//! use hookfsm::builder::MachineBuilder;
//! use hookfsm::transitions;
//! use std::sync::{Arc, Mutex};
//!
//! let calls = Arc::new(Mutex::new(Vec::new()));
//! let before = Arc::clone(&calls);
//! let enter = Arc::clone(&calls);
//!
//! let mut machine = MachineBuilder::new()
//!     .initial("closed")
//!     .transitions(transitions! {
//!         open: [closed] => open,
//!         close: [open] => closed,
//!     })
//!     .on("before_event", move |ctx| {
//!         before.lock().unwrap().push(format!("before {}", ctx.event()))
//!     })
//!     .on("enter_state", move |ctx| {
//!         enter.lock().unwrap().push(format!("enter {}", ctx.to()))
//!     })
//!     .build()
//!     .unwrap();
//!
//! machine.fire("open").unwrap();
//!
//! assert_eq!(machine.current(), "open");
//! assert_eq!(*calls.lock().unwrap(), vec!["before open", "enter open"]);
//! ```

pub mod builder;
pub mod core;
pub mod handlers;
pub mod machine;

// Re-export commonly used types
pub use builder::{BuildError, BuildOptions, ConflictPolicy, MachineBuilder, MachineDefinition};
pub use crate::core::{HandlerKey, Phase, TransitionDescriptor};
pub use handlers::Handler;
pub use machine::{Fired, Machine, MachineError, TransitionContext, TransitionReport};
