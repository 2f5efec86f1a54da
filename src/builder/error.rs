//! Build errors for machine construction.

use crate::builder::violations::DefinitionViolation;
use thiserror::Error;

/// Errors that can occur when building a machine.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("Invalid machine definition: {}", describe(.0))]
    Invalid(Vec<DefinitionViolation>),

    #[error("Malformed machine definition: {0}")]
    Definition(#[from] serde_json::Error),
}

impl BuildError {
    /// Violations that made the definition invalid, if that was the cause.
    pub fn violations(&self) -> &[DefinitionViolation] {
        match self {
            BuildError::Invalid(violations) => violations,
            _ => &[],
        }
    }
}

fn describe(violations: &[DefinitionViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
