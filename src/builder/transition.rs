//! Builder for constructing transitions.

use crate::builder::error::BuildError;
use crate::core::{Metadata, Place, Transition};
use crate::guard::GuardManager;
use serde_json::Value;
use std::sync::Arc;

/// Builder for constructing transitions with a fluent API.
pub struct TransitionBuilder<T> {
    name: Option<String>,
    from: Option<Place>,
    to: Option<Place>,
    guards: Option<Arc<dyn GuardManager<T>>>,
    metadata: Metadata,
}

impl<T> TransitionBuilder<T> {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self {
            name: None,
            from: None,
            to: None,
            guards: None,
            metadata: Metadata::new(),
        }
    }

    /// Set the transition name (required).
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the source place (required).
    pub fn from(mut self, place: impl Into<Place>) -> Self {
        self.from = Some(place.into());
        self
    }

    /// Set the target place (required).
    pub fn to(mut self, place: impl Into<Place>) -> Self {
        self.to = Some(place.into());
        self
    }

    /// Attach a guard manager (optional).
    pub fn guards<G>(mut self, guards: G) -> Self
    where
        G: GuardManager<T> + 'static,
    {
        self.guards = Some(Arc::new(guards));
        self
    }

    /// Attach a shared guard manager (optional).
    pub fn shared_guards(mut self, guards: Arc<dyn GuardManager<T>>) -> Self {
        self.guards = Some(guards);
        self
    }

    /// Add a metadata entry. Only kept when the builder is handed to a
    /// `DefinitionBuilder`.
    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Build the transition.
    pub fn build(self) -> Result<Transition<T>, BuildError> {
        self.into_parts().map(|(transition, _)| transition)
    }

    pub(crate) fn into_parts(self) -> Result<(Transition<T>, Metadata), BuildError> {
        let name = self.name.ok_or(BuildError::MissingName)?;
        let from = self.from.ok_or(BuildError::MissingFromPlace)?;
        let to = self.to.ok_or(BuildError::MissingToPlace)?;

        if name.is_empty() {
            return Err(BuildError::EmptyTransitionName);
        }

        let mut transition = Transition::new(name, from, to);
        if let Some(guards) = self.guards {
            transition = transition.with_guard_manager(guards);
        }

        Ok((transition, self.metadata))
    }
}

impl<T> Default for TransitionBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guard::GuardSet;

    struct Ticket {
        priority: u8,
    }

    #[test]
    fn builder_validates_required_fields() {
        let result = TransitionBuilder::<Ticket>::new().name("close").build();
        assert!(matches!(result, Err(BuildError::MissingFromPlace)));

        let result = TransitionBuilder::<Ticket>::new()
            .name("close")
            .from("open")
            .build();
        assert!(matches!(result, Err(BuildError::MissingToPlace)));

        let result = TransitionBuilder::<Ticket>::new()
            .from("open")
            .to("closed")
            .build();
        assert!(matches!(result, Err(BuildError::MissingName)));
    }

    #[test]
    fn builder_rejects_empty_name() {
        let result = TransitionBuilder::<Ticket>::new()
            .name("")
            .from("open")
            .to("closed")
            .build();

        assert!(matches!(result, Err(BuildError::EmptyTransitionName)));
    }

    #[test]
    fn fluent_api_builds_transition() {
        let transition = TransitionBuilder::new()
            .name("escalate")
            .from("open")
            .to("escalated")
            .guards(GuardSet::new().available_when(|t: &Ticket| t.priority > 2))
            .build()
            .unwrap();

        assert_eq!(transition.name(), "escalate");
        assert_eq!(transition.from(), "open");
        assert_eq!(transition.to(), "escalated");
        assert!(transition.has_guards());
    }

    #[test]
    fn metadata_travels_with_parts() {
        let (transition, metadata) = TransitionBuilder::<Ticket>::new()
            .name("close")
            .from("open")
            .to("closed")
            .metadata("label", "Close ticket")
            .into_parts()
            .unwrap();

        assert!(!transition.has_guards());
        assert_eq!(metadata.get("label"), Some(&Value::from("Close ticket")));
    }
}
