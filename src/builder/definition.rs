//! Builder for constructing workflow definitions.

use crate::builder::error::BuildError;
use crate::builder::transition::TransitionBuilder;
use crate::core::{Definition, InMemoryMetadataStore, Metadata, MetadataStore, Place, Transition};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Builder for constructing definitions with a fluent API.
///
/// Metadata declared on the builder (or on the transition builders handed
/// to it) ends up in an [`InMemoryMetadataStore`], unless a store is
/// supplied explicitly.
pub struct DefinitionBuilder<T> {
    places: Vec<Place>,
    transitions: Vec<Transition<T>>,
    machine_metadata: Metadata,
    place_metadata: HashMap<String, Metadata>,
    store: InMemoryMetadataStore,
    custom_store: Option<Arc<dyn MetadataStore>>,
}

impl<T> DefinitionBuilder<T> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            places: Vec::new(),
            transitions: Vec::new(),
            machine_metadata: Metadata::new(),
            place_metadata: HashMap::new(),
            store: InMemoryMetadataStore::new(),
            custom_store: None,
        }
    }

    /// Declare a place.
    pub fn place(mut self, place: impl Into<Place>) -> Self {
        self.places.push(place.into());
        self
    }

    /// Declare several places.
    pub fn places<I, P>(mut self, places: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Place>,
    {
        self.places.extend(places.into_iter().map(Into::into));
        self
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn transition(mut self, builder: TransitionBuilder<T>) -> Result<Self, BuildError> {
        let (transition, metadata) = builder.into_parts()?;
        if !metadata.is_empty() {
            self.store = self.store.with_transition_metadata(transition.id(), metadata);
        }
        self.transitions.push(transition);
        Ok(self)
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, transition: Transition<T>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add multiple transitions at once.
    pub fn transitions(mut self, transitions: Vec<Transition<T>>) -> Self {
        self.transitions.extend(transitions);
        self
    }

    /// Add a machine-level metadata entry.
    pub fn machine_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.machine_metadata.insert(key.into(), value.into());
        self
    }

    /// Add a metadata entry to a place.
    pub fn place_metadata(
        mut self,
        place: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.place_metadata
            .entry(place.into())
            .or_default()
            .insert(key.into(), value.into());
        self
    }

    /// Use `store` instead of the metadata declared on this builder.
    pub fn metadata_store<M>(mut self, store: M) -> Self
    where
        M: MetadataStore + 'static,
    {
        self.custom_store = Some(Arc::new(store));
        self
    }

    /// Build the definition.
    /// Returns an error if a transition references an undeclared place.
    pub fn build(self) -> Result<Definition<T>, BuildError> {
        let definition = Definition::new(self.places, self.transitions)?;

        if let Some(store) = self.custom_store {
            return Ok(definition.with_shared_metadata_store(store));
        }

        let store = self
            .place_metadata
            .into_iter()
            .fold(
                self.store.with_machine_metadata(self.machine_metadata),
                |store, (place, metadata)| store.with_place_metadata(place, metadata),
            );

        Ok(definition.with_metadata_store(store))
    }
}

impl<T> Default for DefinitionBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}
