//! Builder API for machine construction.
//!
//! This module provides the fluent builder, declarative definitions and
//! macros for creating machines, and the validation that runs when a machine
//! is built: conflicting transitions and ambiguous handler names are
//! collected together and either rejected or resolved per [`BuildOptions`].

pub mod definition;
pub mod error;
pub mod machine;
pub mod macros;
pub mod violations;

pub use definition::{BuildOptions, MachineDefinition, TransitionEntry, DEFAULT_HISTORY_LIMIT};
pub use error::BuildError;
pub use machine::MachineBuilder;
pub use violations::{ConflictPolicy, DefinitionViolation};
