//! Builder API for ergonomic workflow construction.
//!
//! This module provides fluent builders and macros for creating
//! definitions and state machines with minimal boilerplate while
//! validating the graph up front.

pub mod definition;
pub mod error;
pub mod machine;
pub mod macros;
pub mod transition;

pub use definition::DefinitionBuilder;
pub use error::BuildError;
pub use machine::StateMachineBuilder;
pub use transition::TransitionBuilder;

use crate::core::{Place, Transition};
use crate::guard::GuardSet;

/// Create a transition that is only available while `predicate` holds.
///
/// # Example
///
/// ```
/// use waymark::builder::guarded_transition;
/// use waymark::core::Transition;
///
/// struct Account {
///     balance: i64,
/// }
///
/// let withdraw: Transition<Account> =
///     guarded_transition("withdraw", "open", "open", |a: &Account| a.balance > 0);
///
/// assert!(withdraw.has_guards());
/// ```
pub fn guarded_transition<T, F>(
    name: impl Into<String>,
    from: impl Into<Place>,
    to: impl Into<Place>,
    predicate: F,
) -> Transition<T>
where
    T: 'static,
    F: Fn(&T) -> bool + Send + Sync + 'static,
{
    Transition::new(name, from, to).with_guards(GuardSet::new().available_when(predicate))
}
