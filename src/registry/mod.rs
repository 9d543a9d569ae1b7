//! Looking up the state machine responsible for a subject.
//!
//! Machines are registered together with a [`SupportStrategy`] deciding
//! which subjects they handle. Lookups may additionally filter by machine
//! name.

mod error;

pub use error::RegistryError;

use crate::engine::StateMachine;
use std::fmt;
use std::sync::Arc;

/// Decides whether a machine handles a given subject.
pub trait SupportStrategy<T>: Send + Sync {
    fn supports(&self, machine: &StateMachine<T>, subject: &T) -> bool;
}

impl<T, F> SupportStrategy<T> for F
where
    F: Fn(&StateMachine<T>, &T) -> bool + Send + Sync,
{
    fn supports(&self, machine: &StateMachine<T>, subject: &T) -> bool {
        self(machine, subject)
    }
}

/// Strategy supporting every subject of the machine's type.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnySubject;

impl<T> SupportStrategy<T> for AnySubject {
    fn supports(&self, _machine: &StateMachine<T>, _subject: &T) -> bool {
        true
    }
}

struct Entry<T> {
    machine: Arc<StateMachine<T>>,
    strategy: Box<dyn SupportStrategy<T>>,
}

/// Registered state machines, in registration order.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use waymark::core::{Definition, Place, Transition};
/// use waymark::engine::{Context, FnStateAccessor, StateMachine};
/// use waymark::registry::{AnySubject, Registry};
///
/// struct Order {
///     status: String,
/// }
///
/// let definition = Definition::new(["new", "paid"], vec![Transition::new("pay", "new", "paid")])
///     .unwrap();
/// let machine = StateMachine::new(
///     definition,
///     FnStateAccessor::new(
///         |o: &Order| Ok(Place::from(o.status.as_str())),
///         |o: &mut Order, place: Place, _: &Context| {
///             o.status = place.to_string();
///             Ok(())
///         },
///     ),
/// )
/// .with_name("order");
///
/// let mut registry = Registry::new();
/// registry.add(Arc::new(machine), AnySubject);
///
/// let order = Order { status: "new".into() };
/// assert!(registry.has(&order, Some("order")));
/// assert_eq!(registry.get(&order, None).unwrap().name(), "order");
/// ```
pub struct Registry<T> {
    entries: Vec<Entry<T>>,
}

impl<T> Registry<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register `machine`, handling the subjects `strategy` accepts.
    pub fn add<S>(&mut self, machine: Arc<StateMachine<T>>, strategy: S)
    where
        S: SupportStrategy<T> + 'static,
    {
        self.entries.push(Entry {
            machine,
            strategy: Box::new(strategy),
        });
    }

    /// Whether any machine (named `name`, if given) supports `subject`.
    pub fn has(&self, subject: &T, name: Option<&str>) -> bool {
        self.matching(subject, name).next().is_some()
    }

    /// The single machine (named `name`, if given) supporting `subject`.
    pub fn get(&self, subject: &T, name: Option<&str>) -> Result<Arc<StateMachine<T>>, RegistryError> {
        let mut matches: Vec<&Arc<StateMachine<T>>> = self.matching(subject, name).collect();

        match matches.len() {
            0 => Err(RegistryError::NoMachine {
                name: name.map(str::to_string),
            }),
            1 => Ok(Arc::clone(matches.remove(0))),
            _ => Err(RegistryError::TooManyMachines {
                names: matches.iter().map(|m| m.name().to_string()).collect(),
            }),
        }
    }

    /// Every machine supporting `subject`, in registration order.
    pub fn all(&self, subject: &T) -> Vec<Arc<StateMachine<T>>> {
        self.matching(subject, None).map(Arc::clone).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn matching<'a>(
        &'a self,
        subject: &'a T,
        name: Option<&'a str>,
    ) -> impl Iterator<Item = &'a Arc<StateMachine<T>>> + 'a {
        self.entries
            .iter()
            .filter(move |entry| name.map_or(true, |name| entry.machine.name() == name))
            .filter(move |entry| entry.strategy.supports(&entry.machine, subject))
            .map(|entry| &entry.machine)
    }
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.entries.iter().map(|e| e.machine.name()).collect();
        f.debug_struct("Registry").field("machines", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Definition, Place, Transition};
    use crate::engine::{Context, FnStateAccessor};

    #[derive(Debug)]
    enum Document {
        Article { status: String },
        Invoice { status: String },
    }

    impl Document {
        fn status(&self) -> &str {
            match self {
                Document::Article { status } | Document::Invoice { status } => status,
            }
        }
    }

    fn machine(name: &str) -> Arc<StateMachine<Document>> {
        let definition = Definition::new(
            ["draft", "done"],
            vec![Transition::new("finish", "draft", "done")],
        )
        .unwrap();

        let accessor = FnStateAccessor::new(
            |d: &Document| Ok(Place::from(d.status())),
            |d: &mut Document, place: Place, _: &Context| {
                match d {
                    Document::Article { status } | Document::Invoice { status } => {
                        *status = place.to_string()
                    }
                }
                Ok(())
            },
        );

        Arc::new(StateMachine::new(definition, accessor).with_name(name))
    }

    fn is_article(_: &StateMachine<Document>, d: &Document) -> bool {
        matches!(d, Document::Article { .. })
    }

    fn article() -> Document {
        Document::Article {
            status: "draft".into(),
        }
    }

    fn invoice() -> Document {
        Document::Invoice {
            status: "draft".into(),
        }
    }

    #[test]
    fn get_uses_support_strategy() {
        let mut registry = Registry::new();
        registry.add(machine("article"), is_article);
        registry.add(machine("invoice"), |_: &StateMachine<Document>, d: &Document| {
            matches!(d, Document::Invoice { .. })
        });

        assert_eq!(registry.get(&article(), None).unwrap().name(), "article");
        assert_eq!(registry.get(&invoice(), None).unwrap().name(), "invoice");
    }

    #[test]
    fn get_filters_by_name() {
        let mut registry = Registry::new();
        registry.add(machine("article"), is_article);
        registry.add(machine("article_review"), is_article);

        assert!(registry.has(&article(), Some("article_review")));
        assert!(!registry.has(&article(), Some("missing")));
        assert_eq!(
            registry
                .get(&article(), Some("article_review"))
                .unwrap()
                .name(),
            "article_review"
        );
    }

    #[test]
    fn get_fails_without_match() {
        let mut registry = Registry::new();
        registry.add(machine("article"), is_article);

        assert!(!registry.has(&invoice(), None));
        assert!(matches!(
            registry.get(&invoice(), None),
            Err(RegistryError::NoMachine { name: None })
        ));
    }

    #[test]
    fn get_fails_on_ambiguity() {
        let mut registry = Registry::new();
        registry.add(machine("article"), is_article);
        registry.add(machine("article_review"), AnySubject);

        match registry.get(&article(), None) {
            Err(RegistryError::TooManyMachines { names }) => {
                assert_eq!(names, vec!["article", "article_review"]);
            }
            other => panic!("Expected TooManyMachines, got {other:?}"),
        }
    }

    #[test]
    fn all_returns_every_supporting_machine() {
        let mut registry = Registry::new();
        registry.add(machine("article"), is_article);
        registry.add(machine("any"), AnySubject);
        registry.add(machine("invoice"), |_: &StateMachine<Document>, d: &Document| {
            matches!(d, Document::Invoice { .. })
        });

        let names: Vec<String> = registry
            .all(&article())
            .iter()
            .map(|m| m.name().to_string())
            .collect();
        assert_eq!(names, vec!["article", "any"]);
        assert_eq!(registry.len(), 3);
    }
}
