//! Audit trail of completed transitions.
//!
//! The engine never remembers anything about a subject. When a record of
//! what happened is needed, attach an [`AuditTrail`] listener to the
//! `completed` phase and it will keep the history itself.

use super::event::Event;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Record of one completed transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Name of the machine that fired the transition
    pub machine: String,
    /// Name of the transition
    pub transition: String,
    /// The place left
    pub from: String,
    /// The place entered
    pub to: String,
    /// When the transition completed
    pub timestamp: DateTime<Utc>,
}

/// Shared, append-only list of [`TransitionRecord`]s.
///
/// Clones share the same storage, so one clone can be registered as a
/// listener while another is kept for reading.
///
/// # Example
///
/// ```rust
/// use waymark::core::{Definition, Transition};
/// use waymark::engine::{Context, FnStateAccessor, StateMachine};
/// use waymark::events::{AuditTrail, BasicEventDispatcher, Phase, Topic};
///
/// struct Order {
///     place: String,
/// }
///
/// let trail = AuditTrail::new();
/// let mut dispatcher = BasicEventDispatcher::new();
/// dispatcher.add_listener(Topic::all(Phase::Completed), trail.listener());
///
/// let definition = Definition::new(
///     ["cart", "paid"],
///     vec![Transition::new("pay", "cart", "paid")],
/// )
/// .unwrap();
/// let machine = StateMachine::new(
///     definition,
///     FnStateAccessor::new(
///         |o: &Order| Ok(o.place.as_str().into()),
///         |o: &mut Order, place, _| {
///             o.place = place.to_string();
///             Ok(())
///         },
///     ),
/// )
/// .with_name("order")
/// .with_dispatcher(dispatcher);
///
/// let mut order = Order { place: "cart".into() };
/// machine.apply(&mut order, "pay", Context::new()).unwrap();
///
/// let records = trail.records();
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].transition, "pay");
/// assert_eq!(trail.path(), vec!["cart", "paid"]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct AuditTrail {
    records: Arc<Mutex<Vec<TransitionRecord>>>,
}

impl AuditTrail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record describing `event`'s transition.
    pub fn record<T>(&self, event: &Event<'_, T>) {
        let transition = event.transition();
        self.lock().push(TransitionRecord {
            machine: event.machine_name().to_string(),
            transition: transition.name().to_string(),
            from: transition.from().to_string(),
            to: transition.to().to_string(),
            timestamp: Utc::now(),
        });
    }

    /// Listener appending to this trail.
    pub fn listener<T: 'static>(&self) -> impl Fn(&mut Event<'_, T>) + Send + Sync + 'static {
        let trail = self.clone();
        move |event: &mut Event<'_, T>| trail.record(event)
    }

    /// All records in completion order.
    pub fn records(&self) -> Vec<TransitionRecord> {
        self.lock().clone()
    }

    /// Places traversed: the first source, then every target.
    pub fn path(&self) -> Vec<String> {
        let records = self.lock();
        let mut path = Vec::new();
        if let Some(first) = records.first() {
            path.push(first.from.clone());
        }
        path.extend(records.iter().map(|r| r.to.clone()));
        path
    }

    /// Time between the first and last record.
    pub fn duration(&self) -> Option<Duration> {
        let records = self.lock();
        let (first, last) = (records.first()?, records.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<TransitionRecord>> {
        // A panicking listener must not make the trail unreadable.
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
