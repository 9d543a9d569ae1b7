//! Transitions: named, directed edges between two places.

use super::place::Place;
use crate::engine::StateMachine;
use crate::guard::{GuardError, GuardManager};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

/// Unique identity of a transition.
///
/// Several transitions may share a name, so the id is what tells them apart
/// (for instance when looking up transition metadata).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransitionId(Uuid);

impl TransitionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TransitionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TransitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A named move from one place to another, with optional guards.
///
/// Transitions are immutable once built. The guard manager, when present,
/// is consulted at three checkpoints: availability (before any side
/// effect), leave (once the engine has committed to firing) and enter
/// (after leave notifications have already gone out).
///
/// # Example
///
/// ```rust
/// use waymark::core::Transition;
///
/// let submit: Transition<()> = Transition::new("submit", "draft", "review");
///
/// assert_eq!(submit.name(), "submit");
/// assert_eq!(submit.from(), "draft");
/// assert_eq!(submit.to(), "review");
/// ```
pub struct Transition<T> {
    id: TransitionId,
    name: String,
    from: Place,
    to: Place,
    guards: Option<Arc<dyn GuardManager<T>>>,
}

impl<T> Transition<T> {
    pub fn new(name: impl Into<String>, from: impl Into<Place>, to: impl Into<Place>) -> Self {
        Self {
            id: TransitionId::new(),
            name: name.into(),
            from: from.into(),
            to: to.into(),
            guards: None,
        }
    }

    /// Attach a guard manager.
    pub fn with_guards<G>(self, guards: G) -> Self
    where
        G: GuardManager<T> + 'static,
    {
        self.with_guard_manager(Arc::new(guards))
    }

    /// Attach a shared guard manager.
    pub fn with_guard_manager(mut self, guards: Arc<dyn GuardManager<T>>) -> Self {
        self.guards = Some(guards);
        self
    }

    pub fn id(&self) -> TransitionId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn from(&self) -> &Place {
        &self.from
    }

    pub fn to(&self) -> &Place {
        &self.to
    }

    pub fn has_guards(&self) -> bool {
        self.guards.is_some()
    }

    /// Cheap pre-flight check.
    ///
    /// A guard manager that fails while evaluating is treated as "not
    /// available" rather than propagating the failure.
    pub fn check_is_available(&self, subject: &T, machine: &StateMachine<T>) -> bool {
        let Some(guards) = &self.guards else {
            return true;
        };

        match guards.run_availability_guards(subject, self, machine) {
            Ok(available) => available,
            Err(error) => {
                warn!(
                    machine = machine.name(),
                    transition = %self.name,
                    %error,
                    "availability guard failed, treating transition as unavailable"
                );
                false
            }
        }
    }

    /// Fails if the subject may not leave the source place.
    pub fn check_can_leave(&self, subject: &T, machine: &StateMachine<T>) -> Result<(), GuardError> {
        match &self.guards {
            Some(guards) => guards.run_leave_guards(subject, self, machine),
            None => Ok(()),
        }
    }

    /// Fails if the subject may not enter the target place.
    pub fn check_can_enter(&self, subject: &T, machine: &StateMachine<T>) -> Result<(), GuardError> {
        match &self.guards {
            Some(guards) => guards.run_enter_guards(subject, self, machine),
            None => Ok(()),
        }
    }
}

impl<T> Clone for Transition<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            from: self.from.clone(),
            to: self.to.clone(),
            guards: self.guards.clone(),
        }
    }
}

impl<T> fmt::Debug for Transition<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("from", &self.from)
            .field("to", &self.to)
            .field("guarded", &self.guards.is_some())
            .finish()
    }
}
