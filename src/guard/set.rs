//! Closure-backed guard manager.

use super::violations::{GuardError, GuardViolation};
use super::GuardManager;
use crate::core::Transition;
use crate::engine::StateMachine;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type AvailabilityCheck<T> = Box<dyn Fn(&T) -> Result<bool, GuardError> + Send + Sync>;

/// Type alias for leave/enter check functions.
pub type GuardCheck<T> =
    Box<dyn Fn(&T) -> Validation<(), NonEmptyVec<GuardViolation>> + Send + Sync>;

/// Guard manager assembled from closures.
///
/// Availability predicates must all hold. Leave and enter checks are all
/// evaluated and every violation is reported, not just the first one.
///
/// # Example
///
/// ```rust
/// use waymark::core::Transition;
/// use waymark::guard::GuardSet;
///
/// struct Article {
///     title: String,
///     locked: bool,
/// }
///
/// let publish: Transition<Article> = Transition::new("publish", "review", "published")
///     .with_guards(
///         GuardSet::new()
///             .available_when(|a: &Article| !a.locked)
///             .require_enter(|a: &Article| !a.title.is_empty(), "title is missing"),
///     );
/// ```
pub struct GuardSet<T> {
    availability: Vec<AvailabilityCheck<T>>,
    leave: Vec<GuardCheck<T>>,
    enter: Vec<GuardCheck<T>>,
}

impl<T: 'static> GuardSet<T> {
    pub fn new() -> Self {
        Self {
            availability: Vec::new(),
            leave: Vec::new(),
            enter: Vec::new(),
        }
    }

    /// Add an availability predicate.
    pub fn available_when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.availability.push(Box::new(move |subject: &T| Ok(predicate(subject))));
        self
    }

    /// Add a fallible availability predicate. An `Err` makes the
    /// transition unavailable.
    pub fn try_available_when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&T) -> Result<bool, GuardError> + Send + Sync + 'static,
    {
        self.availability.push(Box::new(predicate));
        self
    }

    /// Require `predicate` to hold before leaving the source place.
    pub fn require_leave<F>(mut self, predicate: F, message: impl Into<String>) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.leave.push(predicate_check(predicate, message.into()));
        self
    }

    /// Require `predicate` to hold before entering the target place.
    pub fn require_enter<F>(mut self, predicate: F, message: impl Into<String>) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.enter.push(predicate_check(predicate, message.into()));
        self
    }

    /// Add a custom leave check that may report several violations.
    pub fn leave_check<F>(mut self, check: F) -> Self
    where
        F: Fn(&T) -> Validation<(), NonEmptyVec<GuardViolation>> + Send + Sync + 'static,
    {
        self.leave.push(Box::new(check));
        self
    }

    /// Add a custom enter check that may report several violations.
    pub fn enter_check<F>(mut self, check: F) -> Self
    where
        F: Fn(&T) -> Validation<(), NonEmptyVec<GuardViolation>> + Send + Sync + 'static,
    {
        self.enter.push(Box::new(check));
        self
    }
}

impl<T: 'static> Default for GuardSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> GuardManager<T> for GuardSet<T> {
    fn run_availability_guards(
        &self,
        subject: &T,
        _transition: &Transition<T>,
        _machine: &StateMachine<T>,
    ) -> Result<bool, GuardError> {
        for check in &self.availability {
            if !check(subject)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn run_leave_guards(
        &self,
        subject: &T,
        transition: &Transition<T>,
        _machine: &StateMachine<T>,
    ) -> Result<(), GuardError> {
        accumulate(&self.leave, subject).map_err(|violations| GuardError::LeaveDenied {
            transition: transition.name().to_string(),
            place: transition.from().to_string(),
            violations,
        })
    }

    fn run_enter_guards(
        &self,
        subject: &T,
        transition: &Transition<T>,
        _machine: &StateMachine<T>,
    ) -> Result<(), GuardError> {
        accumulate(&self.enter, subject).map_err(|violations| GuardError::EnterDenied {
            transition: transition.name().to_string(),
            place: transition.to().to_string(),
            violations,
        })
    }
}

fn predicate_check<T: 'static, F>(predicate: F, message: String) -> GuardCheck<T>
where
    F: Fn(&T) -> bool + Send + Sync + 'static,
{
    Box::new(move |subject: &T| {
        if predicate(subject) {
            Validation::success(())
        } else {
            Validation::fail(GuardViolation::new(message.clone()))
        }
    })
}

// Runs every check and collects all failures.
fn accumulate<T>(checks: &[GuardCheck<T>], subject: &T) -> Result<(), Vec<GuardViolation>> {
    let results: Vec<Validation<(), NonEmptyVec<GuardViolation>>> =
        checks.iter().map(|check| check(subject)).collect();

    match Validation::all_vec(results) {
        Validation::Success(_) => Ok(()),
        Validation::Failure(errors) => Err(errors.iter().cloned().collect()),
    }
}
