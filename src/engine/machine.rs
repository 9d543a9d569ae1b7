//! State machine that evaluates and applies transitions against subjects.

use super::accessor::{Context, StateAccessor};
use super::error::WorkflowError;
use crate::builder::StateMachineBuilder;
use crate::core::{
    Blocker, BlockerCode, BlockerList, Definition, MetadataStore, Place, Transition,
};
use crate::events::{Event, EventDispatcher, Phase, Topic};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Name given to machines that were not named explicitly.
pub const DEFAULT_MACHINE_NAME: &str = "unnamed";

/// Orchestrates a [`Definition`], its guards and an optional dispatcher
/// against externally owned subjects.
///
/// The machine holds only immutable configuration. Every call reads the
/// subject's place through the state accessor, so one machine can serve
/// any number of subjects, including from several threads as long as
/// each subject is only touched by one of them at a time.
///
/// # Example
///
/// ```rust
/// use waymark::core::{Definition, Transition};
/// use waymark::engine::{Context, FnStateAccessor, StateMachine};
///
/// struct Article {
///     place: String,
/// }
///
/// let definition = Definition::new(
///     ["draft", "review", "published"],
///     vec![
///         Transition::new("submit", "draft", "review"),
///         Transition::new("publish", "review", "published"),
///     ],
/// )
/// .unwrap();
///
/// let machine = StateMachine::new(
///     definition,
///     FnStateAccessor::new(
///         |a: &Article| Ok(a.place.as_str().into()),
///         |a: &mut Article, place, _| {
///             a.place = place.to_string();
///             Ok(())
///         },
///     ),
/// )
/// .with_name("article");
///
/// let mut article = Article { place: "draft".into() };
/// assert!(machine.can(&article, "submit").unwrap());
///
/// let place = machine.apply(&mut article, "submit", Context::new()).unwrap();
/// assert_eq!(place, "review");
/// assert!(machine.can(&article, "publish").unwrap());
/// ```
pub struct StateMachine<T> {
    definition: Arc<Definition<T>>,
    state_accessor: Arc<dyn StateAccessor<T>>,
    dispatcher: Option<Arc<dyn EventDispatcher<T>>>,
    name: String,
}

impl<T> StateMachine<T> {
    /// Create an unnamed machine without a dispatcher.
    pub fn new<A>(definition: impl Into<Arc<Definition<T>>>, state_accessor: A) -> Self
    where
        A: StateAccessor<T> + 'static,
    {
        Self::from_parts(
            definition.into(),
            Arc::new(state_accessor),
            None,
            DEFAULT_MACHINE_NAME.to_string(),
        )
    }

    /// Start a [`StateMachineBuilder`].
    pub fn builder() -> StateMachineBuilder<T> {
        StateMachineBuilder::new()
    }

    pub(crate) fn from_parts(
        definition: Arc<Definition<T>>,
        state_accessor: Arc<dyn StateAccessor<T>>,
        dispatcher: Option<Arc<dyn EventDispatcher<T>>>,
        name: String,
    ) -> Self {
        Self {
            definition,
            state_accessor,
            dispatcher,
            name,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_dispatcher<D>(self, dispatcher: D) -> Self
    where
        D: EventDispatcher<T> + 'static,
    {
        self.with_shared_dispatcher(Arc::new(dispatcher))
    }

    pub fn with_shared_dispatcher(mut self, dispatcher: Arc<dyn EventDispatcher<T>>) -> Self {
        self.dispatcher = Some(dispatcher);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn definition(&self) -> &Definition<T> {
        &self.definition
    }

    pub fn state_accessor(&self) -> &dyn StateAccessor<T> {
        self.state_accessor.as_ref()
    }

    pub fn metadata_store(&self) -> &dyn MetadataStore {
        self.definition.metadata_store()
    }

    /// The subject's current place, checked against the definition.
    pub fn state(&self, subject: &T) -> Result<Place, WorkflowError> {
        let place = self
            .state_accessor
            .get_state(subject)
            .map_err(WorkflowError::Accessor)?;

        if !self.definition.has_place(place.as_str()) {
            return Err(WorkflowError::InvalidState {
                place,
                machine: self.name.clone(),
            });
        }

        Ok(place)
    }

    /// True if some transition called `transition_name` is enabled.
    ///
    /// Unknown names are simply not enabled.
    pub fn can(&self, subject: &T, transition_name: &str) -> Result<bool, WorkflowError> {
        let place = self.state(subject)?;

        Ok(self
            .definition
            .transitions_named(transition_name)
            .any(|t| self.blockers_for(subject, &place, t).is_empty()))
    }

    /// Explain why `transition_name` cannot fire.
    ///
    /// Returns an empty list as soon as one candidate is enabled. Otherwise
    /// the first list blocked by something other than the current place is
    /// preferred, since a place mismatch is expected when several
    /// transitions share a name. If every candidate is blocked by place,
    /// the first candidate's list is returned.
    pub fn build_transition_blocker_list(
        &self,
        subject: &T,
        transition_name: &str,
    ) -> Result<BlockerList, WorkflowError> {
        let place = self.state(subject)?;
        let mut first: Option<BlockerList> = None;

        for transition in self.definition.transitions_named(transition_name) {
            let blockers = self.blockers_for(subject, &place, transition);

            if blockers.is_empty() || !blockers.has(&BlockerCode::BlockedByState) {
                return Ok(blockers);
            }

            if first.is_none() {
                first = Some(blockers);
            }
        }

        first.ok_or_else(|| self.undefined(transition_name))
    }

    /// Every transition enabled for the subject, in declaration order.
    pub fn enabled_transitions(&self, subject: &T) -> Result<Vec<&Transition<T>>, WorkflowError> {
        let place = self.state(subject)?;

        Ok(self
            .definition
            .transitions()
            .iter()
            .filter(|t| self.blockers_for(subject, &place, t).is_empty())
            .collect())
    }

    /// Fire the first enabled transition called `transition_name` and
    /// return the place entered.
    ///
    /// Phases run in order: leave guard, leave, transition, enter guard,
    /// enter, state write, entered, completed, announce. A leave or enter
    /// guard failure aborts the call, but whatever listeners of earlier
    /// phases did is not undone; wrap `apply` in your own transaction if
    /// that matters.
    ///
    /// When every candidate is blocked, the error carries the blockers of
    /// the last candidate examined (unlike
    /// [`build_transition_blocker_list`](Self::build_transition_blocker_list),
    /// which prefers a non-place blocker).
    pub fn apply(
        &self,
        subject: &mut T,
        transition_name: &str,
        context: Context,
    ) -> Result<Place, WorkflowError> {
        let from = self.state(subject)?;

        let mut last_blockers: Option<BlockerList> = None;
        let mut approved: Option<&Transition<T>> = None;

        for transition in self.definition.transitions_named(transition_name) {
            let blockers = self.blockers_for(subject, &from, transition);
            if blockers.is_empty() {
                approved = Some(transition);
                break;
            }
            last_blockers = Some(blockers);
        }

        let Some(transition) = approved else {
            return Err(match last_blockers {
                Some(blockers) => WorkflowError::NotEnabledTransition {
                    transition: transition_name.to_string(),
                    machine: self.name.clone(),
                    blockers,
                },
                None => self.undefined(transition_name),
            });
        };

        debug!(
            machine = %self.name,
            transition = transition_name,
            from = %from,
            to = %transition.to(),
            "applying transition"
        );

        self.leave(subject, transition)?;
        let context = self.transition(subject, transition, context);
        self.enter(subject, transition)?;

        let to = transition.to().clone();
        self.state_accessor
            .set_state(subject, to.clone(), &context)
            .map_err(WorkflowError::Accessor)?;
        debug!(machine = %self.name, place = %to, "state written");

        self.entered(subject, transition);
        self.completed(subject, transition);
        self.announce(subject, transition)?;

        Ok(to)
    }

    // Blocker diagnosis for one candidate: place, then availability, then
    // guard listeners. Never writes to the subject.
    fn blockers_for(&self, subject: &T, place: &Place, transition: &Transition<T>) -> BlockerList {
        trace!(
            machine = %self.name,
            transition = transition.name(),
            from = %transition.from(),
            place = %place,
            "evaluating candidate"
        );

        if transition.from() != place {
            return BlockerList::single(Blocker::blocked_by_state(place));
        }

        if !transition.check_is_available(subject, self) {
            return BlockerList::single(Blocker::blocked_by_availability_guard());
        }

        self.guard(subject, transition)
    }

    fn guard(&self, subject: &T, transition: &Transition<T>) -> BlockerList {
        if self.dispatcher.is_none() {
            return BlockerList::new();
        }

        let mut event = Event::new(Phase::Guard, subject, transition, self);
        self.publish(Phase::Guard, transition.name(), &mut event);
        event.into_blockers()
    }

    fn leave(&self, subject: &T, transition: &Transition<T>) -> Result<(), WorkflowError> {
        transition.check_can_leave(subject, self)?;

        if self.dispatcher.is_some() {
            let mut event = Event::new(Phase::Leave, subject, transition, self);
            self.publish(Phase::Leave, transition.from().as_str(), &mut event);
        }
        Ok(())
    }

    fn transition(&self, subject: &T, transition: &Transition<T>, context: Context) -> Context {
        if self.dispatcher.is_none() {
            return context;
        }

        let mut event =
            Event::new(Phase::Transition, subject, transition, self).with_context(context);
        self.publish(Phase::Transition, transition.name(), &mut event);
        event.into_context()
    }

    fn enter(&self, subject: &T, transition: &Transition<T>) -> Result<(), WorkflowError> {
        transition.check_can_enter(subject, self)?;

        if self.dispatcher.is_some() {
            let mut event = Event::new(Phase::Enter, subject, transition, self);
            self.publish(Phase::Enter, transition.to().as_str(), &mut event);
        }
        Ok(())
    }

    fn entered(&self, subject: &T, transition: &Transition<T>) {
        if self.dispatcher.is_some() {
            let mut event = Event::new(Phase::Entered, subject, transition, self);
            self.publish(Phase::Entered, transition.to().as_str(), &mut event);
        }
    }

    fn completed(&self, subject: &T, transition: &Transition<T>) {
        if self.dispatcher.is_some() {
            let mut event = Event::new(Phase::Completed, subject, transition, self);
            self.publish(Phase::Completed, transition.name(), &mut event);
        }
    }

    fn announce(&self, subject: &T, transition: &Transition<T>) -> Result<(), WorkflowError> {
        let Some(dispatcher) = &self.dispatcher else {
            return Ok(());
        };

        let mut event = Event::new(Phase::Announce, subject, transition, self);
        self.emit(dispatcher.as_ref(), &Topic::all(Phase::Announce), &mut event);
        self.emit(
            dispatcher.as_ref(),
            &Topic::machine(Phase::Announce, &self.name),
            &mut event,
        );

        for next in self.enabled_transitions(subject)? {
            self.emit(
                dispatcher.as_ref(),
                &Topic::scoped(Phase::Announce, &self.name, next.name()),
                &mut event,
            );
        }
        Ok(())
    }

    // Publish on the generic, machine and scoped topics of `phase`.
    fn publish(&self, phase: Phase, qualifier: &str, event: &mut Event<'_, T>) {
        let Some(dispatcher) = &self.dispatcher else {
            return;
        };

        for topic in [
            Topic::all(phase),
            Topic::machine(phase, &self.name),
            Topic::scoped(phase, &self.name, qualifier),
        ] {
            self.emit(dispatcher.as_ref(), &topic, event);
        }
    }

    fn emit(&self, dispatcher: &dyn EventDispatcher<T>, topic: &Topic, event: &mut Event<'_, T>) {
        trace!(%topic, "dispatching");
        dispatcher.dispatch(topic, event);
    }

    fn undefined(&self, transition_name: &str) -> WorkflowError {
        WorkflowError::UndefinedTransition {
            transition: transition_name.to_string(),
            machine: self.name.clone(),
        }
    }
}

impl<T> fmt::Debug for StateMachine<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("name", &self.name)
            .field("definition", &self.definition)
            .field("dispatcher", &self.dispatcher.is_some())
            .finish_non_exhaustive()
    }
}
