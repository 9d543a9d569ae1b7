//! Waymark: a single-place workflow state machine library
//!
//! A subject (any value of your own type) sits in exactly one place at a
//! time. A [`Definition`](core::Definition) lists the places and the named
//! transitions between them; a [`StateMachine`](engine::StateMachine)
//! evaluates guards, explains why a transition is blocked, applies it, and
//! publishes lifecycle events to an optional dispatcher.
//!
//! # Core Concepts
//!
//! - **Definition**: Immutable places, transitions and metadata
//! - **Guards**: Availability predicates plus leave/enter checks that
//!   accumulate every violation
//! - **Blockers**: Structured reasons a transition cannot fire
//! - **Events**: Seven phases published on hierarchical topics
//! - **Registry**: Finds the machine responsible for a subject
//!
//! # Example
//!
//! ```rust
//! use waymark::definition;
//! use waymark::core::Place;
//! use waymark::engine::{Context, FnStateAccessor, StateMachine};
//! use waymark::events::{AuditTrail, BasicEventDispatcher, Phase, Topic};
//!
//! struct Article {
//!     place: String,
//! }
//!
//! let definition = definition! {
//!     places: ["draft", "review", "published"],
//!     transitions: [
//!         "submit": "draft" => "review",
//!         "publish": "review" => "published",
//!     ]
//! }
//! .unwrap();
//!
//! let audit = AuditTrail::new();
//! let mut dispatcher = BasicEventDispatcher::new();
//! dispatcher.add_listener(Topic::machine(Phase::Completed, "article"), audit.listener());
//!
//! let machine = StateMachine::builder()
//!     .name("article")
//!     .definition(definition)
//!     .state_accessor(FnStateAccessor::new(
//!         |a: &Article| Ok(Place::from(a.place.as_str())),
//!         |a: &mut Article, place: Place, _: &Context| {
//!             a.place = place.to_string();
//!             Ok(())
//!         },
//!     ))
//!     .dispatcher(dispatcher)
//!     .build()
//!     .unwrap();
//!
//! let mut article = Article { place: "draft".into() };
//! machine.apply(&mut article, "submit", Context::new()).unwrap();
//! machine.apply(&mut article, "publish", Context::new()).unwrap();
//!
//! assert_eq!(article.place, "published");
//! assert_eq!(audit.path(), vec!["draft", "review", "published"]);
//! ```

pub mod builder;
pub mod core;
pub mod engine;
pub mod events;
pub mod guard;
pub mod registry;

// Re-export commonly used types
pub use builder::{BuildError, DefinitionBuilder, StateMachineBuilder, TransitionBuilder};
pub use self::core::{Blocker, BlockerCode, BlockerList, Definition, Place, Transition};
pub use engine::{Context, StateAccessor, StateMachine, WorkflowError};
pub use events::{BasicEventDispatcher, Event, EventDispatcher, Phase, Topic};
pub use guard::{GuardError, GuardManager, GuardSet};
pub use registry::{Registry, RegistryError, SupportStrategy};
