//! Topic-keyed, synchronous event dispatch.

use super::event::Event;
use super::topic::Topic;
use std::collections::HashMap;
use std::fmt;

/// Type alias for registered listener functions.
pub type Listener<T> = Box<dyn Fn(&mut Event<'_, T>) + Send + Sync>;

/// Sink for transition notifications.
pub trait EventDispatcher<T>: Send + Sync {
    /// Invoke every listener registered for exactly `topic`, in
    /// registration order. A topic without listeners is a no-op.
    fn dispatch(&self, topic: &Topic, event: &mut Event<'_, T>);
}

/// Dispatcher holding listeners in memory.
///
/// Listeners are registered up front, before the dispatcher is handed to
/// a state machine. Matching is exact: there are no wildcards.
pub struct BasicEventDispatcher<T> {
    listeners: HashMap<Topic, Vec<Listener<T>>>,
}

impl<T> BasicEventDispatcher<T> {
    pub fn new() -> Self {
        Self {
            listeners: HashMap::new(),
        }
    }

    /// Register `listener` for `topic`.
    pub fn add_listener<F>(&mut self, topic: Topic, listener: F)
    where
        F: Fn(&mut Event<'_, T>) + Send + Sync + 'static,
    {
        self.listeners
            .entry(topic)
            .or_default()
            .push(Box::new(listener));
    }

    pub fn listener_count(&self, topic: &Topic) -> usize {
        self.listeners.get(topic).map_or(0, Vec::len)
    }
}

impl<T> Default for BasicEventDispatcher<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> EventDispatcher<T> for BasicEventDispatcher<T> {
    fn dispatch(&self, topic: &Topic, event: &mut Event<'_, T>) {
        let Some(listeners) = self.listeners.get(topic) else {
            return;
        };

        for listener in listeners {
            listener(event);
        }
    }
}

impl<T> fmt::Debug for BasicEventDispatcher<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: HashMap<String, usize> = self
            .listeners
            .iter()
            .map(|(topic, listeners)| (topic.to_string(), listeners.len()))
            .collect();
        f.debug_struct("BasicEventDispatcher")
            .field("listeners", &counts)
            .finish()
    }
}
