//! Immutable workflow definitions.

use super::metadata::{InMemoryMetadataStore, MetadataStore};
use super::place::Place;
use super::transition::Transition;
use crate::builder::BuildError;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// The static graph of a workflow: places, transitions and metadata.
///
/// Declaration order of transitions is significant: it is the tie-break
/// order used when several transitions share a name. A definition is
/// never mutated after construction and is shared by every machine and
/// subject that uses it.
///
/// # Example
///
/// ```rust
/// use waymark::core::{Definition, Transition};
///
/// let definition: Definition<()> = Definition::new(
///     ["draft", "review", "published"],
///     vec![
///         Transition::new("submit", "draft", "review"),
///         Transition::new("publish", "review", "published"),
///     ],
/// )
/// .unwrap();
///
/// assert!(definition.has_place("review"));
/// assert_eq!(definition.transitions().len(), 2);
/// ```
pub struct Definition<T> {
    places: BTreeSet<Place>,
    transitions: Vec<Transition<T>>,
    metadata_store: Arc<dyn MetadataStore>,
}

impl<T> Definition<T> {
    /// Build a definition, checking that every transition references
    /// declared places.
    pub fn new<I, P>(places: I, transitions: Vec<Transition<T>>) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = P>,
        P: Into<Place>,
    {
        let places: BTreeSet<Place> = places.into_iter().map(Into::into).collect();

        if places.iter().any(Place::is_empty) {
            return Err(BuildError::EmptyPlaceName);
        }

        for transition in &transitions {
            if transition.name().is_empty() {
                return Err(BuildError::EmptyTransitionName);
            }
            for place in [transition.from(), transition.to()] {
                if !places.contains(place) {
                    return Err(BuildError::UnknownPlace {
                        transition: transition.name().to_string(),
                        place: place.to_string(),
                    });
                }
            }
        }

        Ok(Self {
            places,
            transitions,
            metadata_store: Arc::new(InMemoryMetadataStore::new()),
        })
    }

    /// Replace the metadata store.
    pub fn with_metadata_store<M>(self, store: M) -> Self
    where
        M: MetadataStore + 'static,
    {
        self.with_shared_metadata_store(Arc::new(store))
    }

    pub fn with_shared_metadata_store(mut self, store: Arc<dyn MetadataStore>) -> Self {
        self.metadata_store = store;
        self
    }

    pub fn places(&self) -> &BTreeSet<Place> {
        &self.places
    }

    pub fn has_place(&self, place: &str) -> bool {
        self.places.contains(place)
    }

    /// Transitions in declaration order.
    pub fn transitions(&self) -> &[Transition<T>] {
        &self.transitions
    }

    /// Transitions carrying `name`, in declaration order.
    pub fn transitions_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a Transition<T>> + 'a {
        self.transitions.iter().filter(move |t| t.name() == name)
    }

    pub fn metadata_store(&self) -> &dyn MetadataStore {
        self.metadata_store.as_ref()
    }
}

impl<T> fmt::Debug for Definition<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Definition")
            .field("places", &self.places)
            .field("transitions", &self.transitions)
            .finish_non_exhaustive()
    }
}
