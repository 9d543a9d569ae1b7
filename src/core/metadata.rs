//! Descriptive metadata attached to a machine, its places and transitions.
//!
//! Metadata is never consulted by the evaluation algorithm.

use super::transition::TransitionId;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// Key/value bag of metadata.
pub type Metadata = BTreeMap<String, Value>;

/// What a metadata lookup refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MetadataSubject<'a> {
    Machine,
    Place(&'a str),
    Transition(TransitionId),
}

/// Read access to workflow metadata.
pub trait MetadataStore: Send + Sync {
    fn state_machine_metadata(&self) -> Metadata;

    fn place_metadata(&self, place: &str) -> Metadata;

    fn transition_metadata(&self, transition: TransitionId) -> Metadata;

    /// Look up a single key on the given subject.
    fn get_metadata(&self, key: &str, subject: MetadataSubject<'_>) -> Option<Value> {
        let mut bag = match subject {
            MetadataSubject::Machine => self.state_machine_metadata(),
            MetadataSubject::Place(place) => self.place_metadata(place),
            MetadataSubject::Transition(id) => self.transition_metadata(id),
        };
        bag.remove(key)
    }
}

/// Metadata store backed by in-memory maps.
#[derive(Clone, Debug, Default)]
pub struct InMemoryMetadataStore {
    machine: Metadata,
    places: HashMap<String, Metadata>,
    transitions: HashMap<TransitionId, Metadata>,
}

impl InMemoryMetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_machine_metadata(mut self, metadata: Metadata) -> Self {
        self.machine = metadata;
        self
    }

    pub fn with_place_metadata(mut self, place: impl Into<String>, metadata: Metadata) -> Self {
        self.places.insert(place.into(), metadata);
        self
    }

    pub fn with_transition_metadata(mut self, transition: TransitionId, metadata: Metadata) -> Self {
        self.transitions.insert(transition, metadata);
        self
    }
}

impl MetadataStore for InMemoryMetadataStore {
    fn state_machine_metadata(&self) -> Metadata {
        self.machine.clone()
    }

    fn place_metadata(&self, place: &str) -> Metadata {
        self.places.get(place).cloned().unwrap_or_default()
    }

    fn transition_metadata(&self, transition: TransitionId) -> Metadata {
        self.transitions
            .get(&transition)
            .cloned()
            .unwrap_or_default()
    }
}
