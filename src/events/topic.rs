//! Typed topics for transition notifications.

use std::fmt;

/// Notification phase of a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    Guard,
    Leave,
    Transition,
    Enter,
    Entered,
    Completed,
    Announce,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Guard => "guard",
            Self::Leave => "leave",
            Self::Transition => "transition",
            Self::Enter => "enter",
            Self::Entered => "entered",
            Self::Completed => "completed",
            Self::Announce => "announce",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How narrowly a topic is scoped.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TopicScope {
    /// Every machine.
    All,
    /// One machine.
    Machine(String),
    /// One machine, one transition or place.
    Scoped { machine: String, qualifier: String },
}

/// A phase plus a scope.
///
/// The engine publishes each notification on the same event instance,
/// from the broadest topic to the narrowest, so listeners choose their
/// granularity by the topic they subscribe to. The qualifier of a scoped
/// topic is the transition name for guard, transition, completed and
/// announce, the source place for leave, and the target place for enter
/// and entered.
///
/// # Example
///
/// ```rust
/// use waymark::events::{Phase, Topic};
///
/// assert_eq!(Topic::all(Phase::Guard).to_string(), "statemachine.guard");
/// assert_eq!(
///     Topic::machine(Phase::Leave, "article").to_string(),
///     "statemachine.leave.article"
/// );
/// assert_eq!(
///     Topic::scoped(Phase::Guard, "article", "submit").to_string(),
///     "statemachine.guard.article.submit"
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Topic {
    phase: Phase,
    scope: TopicScope,
}

impl Topic {
    pub fn all(phase: Phase) -> Self {
        Self {
            phase,
            scope: TopicScope::All,
        }
    }

    pub fn machine(phase: Phase, machine: impl Into<String>) -> Self {
        Self {
            phase,
            scope: TopicScope::Machine(machine.into()),
        }
    }

    pub fn scoped(phase: Phase, machine: impl Into<String>, qualifier: impl Into<String>) -> Self {
        Self {
            phase,
            scope: TopicScope::Scoped {
                machine: machine.into(),
                qualifier: qualifier.into(),
            },
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn scope(&self) -> &TopicScope {
        &self.scope
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "statemachine.{}", self.phase)?;
        match &self.scope {
            TopicScope::All => Ok(()),
            TopicScope::Machine(machine) => write!(f, ".{machine}"),
            TopicScope::Scoped { machine, qualifier } => write!(f, ".{machine}.{qualifier}"),
        }
    }
}
