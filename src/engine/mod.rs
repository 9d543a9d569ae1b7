//! The transition engine.
//!
//! [`StateMachine`] answers "can this fire?", "why not?" and "what can
//! fire now?", and applies transitions through the leave, transition,
//! enter, entered, completed and announce phases. Subjects are read and
//! written only through a [`StateAccessor`].

mod accessor;
mod error;
mod machine;

pub use accessor::{AccessorError, Context, FnStateAccessor, StateAccessor};
pub use error::WorkflowError;
pub use machine::{StateMachine, DEFAULT_MACHINE_NAME};
