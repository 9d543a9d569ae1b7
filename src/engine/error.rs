//! Engine errors.

use super::accessor::AccessorError;
use crate::core::{BlockerList, Place};
use crate::guard::GuardError;
use thiserror::Error;

/// Errors that can occur while evaluating or applying transitions.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The subject reports a place the definition does not know.
    #[error("place \"{place}\" is not valid for state machine \"{machine}\"")]
    InvalidState { place: Place, machine: String },

    /// No transition carries the requested name.
    #[error("transition \"{transition}\" is not defined for state machine \"{machine}\"")]
    UndefinedTransition { transition: String, machine: String },

    /// The name is known but every candidate is blocked.
    #[error("transition \"{transition}\" is not enabled for state machine \"{machine}\": {blockers}")]
    NotEnabledTransition {
        transition: String,
        machine: String,
        blockers: BlockerList,
    },

    /// A leave or enter guard refused the transition mid-protocol.
    #[error(transparent)]
    Guard(#[from] GuardError),

    #[error("state accessor failed: {0}")]
    Accessor(#[source] AccessorError),
}

impl WorkflowError {
    /// Blockers carried by a not-enabled error.
    pub fn blockers(&self) -> Option<&BlockerList> {
        match self {
            Self::NotEnabledTransition { blockers, .. } => Some(blockers),
            _ => None,
        }
    }
}
