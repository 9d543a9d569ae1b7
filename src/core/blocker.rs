//! Blockers explain why a transition cannot fire.
//!
//! A [`BlockerList`] is built fresh for every evaluation. An empty list is
//! the single source of truth for "this transition is enabled".

use super::place::Place;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Reason code attached to a [`Blocker`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockerCode {
    /// The subject is not in the transition's source place.
    BlockedByState,
    /// The transition's availability guard said no.
    BlockedByAvailabilityGuard,
    /// A guard expression evaluated to false.
    BlockedByExpressionGuard,
    /// A guard listener vetoed the transition.
    BlockedByEventGuard,
    /// Blocked for a reason the listener did not classify.
    Unknown,
    /// Application-defined code.
    Custom(String),
}

impl BlockerCode {
    /// Stable string form of the code.
    pub fn as_str(&self) -> &str {
        match self {
            Self::BlockedByState => "blocked_by_state",
            Self::BlockedByAvailabilityGuard => "blocked_by_availability_guard",
            Self::BlockedByExpressionGuard => "blocked_by_expression_guard",
            Self::BlockedByEventGuard => "blocked_by_event_guard",
            Self::Unknown => "unknown",
            Self::Custom(code) => code,
        }
    }
}

impl fmt::Display for BlockerCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed reason code plus a human readable message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blocker {
    code: BlockerCode,
    message: String,
    parameters: BTreeMap<String, String>,
}

impl Blocker {
    pub fn new(code: BlockerCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            parameters: BTreeMap::new(),
        }
    }

    /// Attach a context parameter.
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    /// The subject's current place does not enable the transition.
    pub fn blocked_by_state(place: &Place) -> Self {
        Self::new(
            BlockerCode::BlockedByState,
            format!("The current place \"{place}\" does not enable the transition."),
        )
        .with_parameter("place", place.as_str())
    }

    pub fn blocked_by_availability_guard() -> Self {
        Self::new(
            BlockerCode::BlockedByAvailabilityGuard,
            "The transition is not available.",
        )
    }

    pub fn blocked_by_expression_guard(expression: impl Into<String>) -> Self {
        let expression = expression.into();
        Self::new(
            BlockerCode::BlockedByExpressionGuard,
            format!("The guard expression \"{expression}\" blocks the transition."),
        )
        .with_parameter("expression", expression)
    }

    pub fn blocked_by_event_guard(message: impl Into<String>) -> Self {
        Self::new(BlockerCode::BlockedByEventGuard, message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(BlockerCode::Unknown, message)
    }

    pub fn code(&self) -> &BlockerCode {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn parameters(&self) -> &BTreeMap<String, String> {
        &self.parameters
    }
}

impl fmt::Display for Blocker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// Ordered collection of blockers for one evaluation.
///
/// # Example
///
/// ```rust
/// use waymark::core::{Blocker, BlockerCode, BlockerList, Place};
///
/// let mut blockers = BlockerList::new();
/// assert!(blockers.is_empty());
///
/// blockers.add(Blocker::blocked_by_state(&Place::from("draft")));
/// assert!(blockers.has(&BlockerCode::BlockedByState));
/// assert_eq!(blockers.len(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockerList {
    blockers: Vec<Blocker>,
}

impl BlockerList {
    pub fn new() -> Self {
        Self::default()
    }

    /// List holding exactly one blocker.
    pub fn single(blocker: Blocker) -> Self {
        Self {
            blockers: vec![blocker],
        }
    }

    pub fn add(&mut self, blocker: Blocker) {
        self.blockers.push(blocker);
    }

    /// True if any blocker carries `code`.
    pub fn has(&self, code: &BlockerCode) -> bool {
        self.blockers.iter().any(|b| b.code() == code)
    }

    pub fn clear(&mut self) {
        self.blockers.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.blockers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.blockers.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Blocker> {
        self.blockers.iter()
    }
}

impl fmt::Display for BlockerList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.blockers.iter().map(ToString::to_string).collect();
        f.write_str(&messages.join("; "))
    }
}

impl FromIterator<Blocker> for BlockerList {
    fn from_iter<I: IntoIterator<Item = Blocker>>(iter: I) -> Self {
        Self {
            blockers: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for BlockerList {
    type Item = Blocker;
    type IntoIter = std::vec::IntoIter<Blocker>;

    fn into_iter(self) -> Self::IntoIter {
        self.blockers.into_iter()
    }
}

impl<'a> IntoIterator for &'a BlockerList {
    type Item = &'a Blocker;
    type IntoIter = std::slice::Iter<'a, Blocker>;

    fn into_iter(self) -> Self::IntoIter {
        self.blockers.iter()
    }
}
