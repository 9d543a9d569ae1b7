//! Build errors for definitions, transitions and state machines.

use thiserror::Error;

/// Errors that can occur when building workflow components.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Transition name not specified. Call .name(name)")]
    MissingName,

    #[error("Transition source place not specified. Call .from(place)")]
    MissingFromPlace,

    #[error("Transition target place not specified. Call .to(place)")]
    MissingToPlace,

    #[error("Transition names must not be empty")]
    EmptyTransitionName,

    #[error("Place names must not be empty")]
    EmptyPlaceName,

    #[error("Place \"{place}\" referenced in transition \"{transition}\" does not exist")]
    UnknownPlace { transition: String, place: String },

    #[error("Definition not specified. Call .definition(definition)")]
    MissingDefinition,

    #[error("State accessor not specified. Call .state_accessor(accessor)")]
    MissingStateAccessor,
}
