//! Definition problems detected at construction and how to treat them.

use crate::core::HandlerKey;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Problems in a machine definition that make its behavior ambiguous
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DefinitionViolation {
    #[error("event '{event}' from '{state}' leads to both '{first}' and '{second}'")]
    ConflictingTransition {
        event: String,
        state: String,
        first: String,
        second: String,
    },

    #[error("handlers '{first}' and '{second}' both resolve to '{key}'")]
    AmbiguousHandler {
        key: HandlerKey,
        first: String,
        second: String,
    },

    #[error("handler '{name}' names both a state and an event; it runs on entering the state")]
    AmbiguousShorthand { name: String },
}

/// Strategy for duplicate or ambiguous declarations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// Fail construction, listing every violation
    #[default]
    Reject,

    /// Keep the declaration made last and log a warning
    LastWins,
}
