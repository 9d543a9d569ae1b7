//! The event object handed to listeners.

use super::topic::Phase;
use crate::core::{Blocker, BlockerList, MetadataStore, Transition};
use crate::engine::{Context, StateMachine};

/// Notification about one phase of a transition.
///
/// The same instance is passed to every listener on every topic of a
/// phase, so changes made by one listener are visible to the next.
/// Guard listeners veto by adding blockers; transition listeners may
/// rewrite the context that is later handed to the state accessor.
pub struct Event<'a, T> {
    phase: Phase,
    subject: &'a T,
    transition: &'a Transition<T>,
    machine: &'a StateMachine<T>,
    blockers: BlockerList,
    context: Context,
}

impl<'a, T> Event<'a, T> {
    pub(crate) fn new(
        phase: Phase,
        subject: &'a T,
        transition: &'a Transition<T>,
        machine: &'a StateMachine<T>,
    ) -> Self {
        Self {
            phase,
            subject,
            transition,
            machine,
            blockers: BlockerList::new(),
            context: Context::new(),
        }
    }

    pub(crate) fn with_context(mut self, context: Context) -> Self {
        self.context = context;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn subject(&self) -> &'a T {
        self.subject
    }

    pub fn transition(&self) -> &'a Transition<T> {
        self.transition
    }

    pub fn machine(&self) -> &'a StateMachine<T> {
        self.machine
    }

    pub fn machine_name(&self) -> &'a str {
        self.machine.name()
    }

    pub fn metadata(&self) -> &'a dyn MetadataStore {
        self.machine.metadata_store()
    }

    pub fn blockers(&self) -> &BlockerList {
        &self.blockers
    }

    pub fn add_blocker(&mut self, blocker: Blocker) {
        self.blockers.add(blocker);
    }

    /// Veto the transition with a listener-supplied reason.
    pub fn block(&mut self, message: impl Into<String>) {
        self.blockers.add(Blocker::blocked_by_event_guard(message));
    }

    pub fn is_blocked(&self) -> bool {
        !self.blockers.is_empty()
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }

    pub fn set_context(&mut self, context: Context) {
        self.context = context;
    }

    pub(crate) fn into_blockers(self) -> BlockerList {
        self.blockers
    }

    pub(crate) fn into_context(self) -> Context {
        self.context
    }
}
