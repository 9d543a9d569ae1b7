//! Core workflow types.
//!
//! This module contains the immutable building blocks of a workflow:
//! - Places and transitions
//! - Definitions tying them together with metadata
//! - Blockers describing why a transition cannot fire
//!
//! Nothing here holds per-subject state.

mod blocker;
mod definition;
mod metadata;
mod place;
mod transition;

pub use blocker::{Blocker, BlockerCode, BlockerList};
pub use definition::Definition;
pub use metadata::{InMemoryMetadataStore, Metadata, MetadataStore, MetadataSubject};
pub use place::Place;
pub use transition::{Transition, TransitionId};
