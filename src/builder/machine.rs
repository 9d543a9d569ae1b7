//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::core::Definition;
use crate::engine::{StateAccessor, StateMachine, DEFAULT_MACHINE_NAME};
use crate::events::EventDispatcher;
use std::sync::Arc;

/// Builder for constructing state machines with a fluent API.
pub struct StateMachineBuilder<T> {
    name: String,
    definition: Option<Arc<Definition<T>>>,
    state_accessor: Option<Arc<dyn StateAccessor<T>>>,
    dispatcher: Option<Arc<dyn EventDispatcher<T>>>,
}

impl<T> StateMachineBuilder<T> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            name: DEFAULT_MACHINE_NAME.to_string(),
            definition: None,
            state_accessor: None,
            dispatcher: None,
        }
    }

    /// Set the machine name used in event topics (optional).
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the definition (required).
    pub fn definition(mut self, definition: impl Into<Arc<Definition<T>>>) -> Self {
        self.definition = Some(definition.into());
        self
    }

    /// Set the state accessor (required).
    pub fn state_accessor<A>(mut self, accessor: A) -> Self
    where
        A: StateAccessor<T> + 'static,
    {
        self.state_accessor = Some(Arc::new(accessor));
        self
    }

    /// Set the event dispatcher (optional).
    pub fn dispatcher<D>(self, dispatcher: D) -> Self
    where
        D: EventDispatcher<T> + 'static,
    {
        self.shared_dispatcher(Arc::new(dispatcher))
    }

    /// Set a dispatcher shared with other machines (optional).
    pub fn shared_dispatcher(mut self, dispatcher: Arc<dyn EventDispatcher<T>>) -> Self {
        self.dispatcher = Some(dispatcher);
        self
    }

    /// Build the state machine.
    /// Returns an error if required fields are missing.
    pub fn build(self) -> Result<StateMachine<T>, BuildError> {
        let definition = self.definition.ok_or(BuildError::MissingDefinition)?;
        let state_accessor = self
            .state_accessor
            .ok_or(BuildError::MissingStateAccessor)?;

        Ok(StateMachine::from_parts(
            definition,
            state_accessor,
            self.dispatcher,
            self.name,
        ))
    }
}

impl<T> Default for StateMachineBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}
