//! Transition guards.
//!
//! A [`GuardManager`] is attached to a transition and consulted at three
//! checkpoints:
//!
//! - **availability**: a cheap pre-flight evaluated during diagnosis; an
//!   internal failure counts as "not available"
//! - **leave**: evaluated once the engine has committed to the transition,
//!   before any leave notification
//! - **enter**: evaluated after leave notifications have been dispatched
//!
//! Leave and enter failures abort `apply` without undoing what listeners
//! of earlier phases already did.
//!
//! [`GuardSet`] builds a manager from closures and accumulates every failing
//! check using Stillwater's `Validation`.

mod set;
mod violations;

pub use set::{GuardCheck, GuardSet};
pub use violations::{GuardError, GuardViolation};

use crate::core::Transition;
use crate::engine::StateMachine;

/// Capability interface for per-transition guards.
///
/// Every method defaults to "pass".
pub trait GuardManager<T>: Send + Sync {
    fn run_availability_guards(
        &self,
        _subject: &T,
        _transition: &Transition<T>,
        _machine: &StateMachine<T>,
    ) -> Result<bool, GuardError> {
        Ok(true)
    }

    fn run_leave_guards(
        &self,
        _subject: &T,
        _transition: &Transition<T>,
        _machine: &StateMachine<T>,
    ) -> Result<(), GuardError> {
        Ok(())
    }

    fn run_enter_guards(
        &self,
        _subject: &T,
        _transition: &Transition<T>,
        _machine: &StateMachine<T>,
    ) -> Result<(), GuardError> {
        Ok(())
    }
}
