//! Transition notifications.
//!
//! Each phase of a transition is published on a hierarchy of typed
//! [`Topic`]s: every machine, one machine, then one transition (or place)
//! of one machine. Listeners registered on a [`BasicEventDispatcher`]
//! pick the granularity they care about by choosing the topic.
//!
//! Dispatch is synchronous. Guard-phase listeners are expected to be free
//! of side effects, since diagnosis may run them many times.

mod audit;
mod dispatcher;
mod event;
mod topic;

pub use audit::{AuditTrail, TransitionRecord};
pub use dispatcher::{BasicEventDispatcher, EventDispatcher, Listener};
pub use event::Event;
pub use topic::{Phase, Topic, TopicScope};
