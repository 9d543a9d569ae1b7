//! Place identifiers.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// A named position a subject may occupy within a workflow.
///
/// Places are opaque string identifiers. They have no behaviour of their
/// own; transitions reference them and state accessors produce them.
///
/// # Example
///
/// ```rust
/// use waymark::core::Place;
///
/// let draft = Place::from("draft");
/// assert_eq!(draft, "draft");
/// assert_eq!(draft.as_str(), "draft");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Place(String);

impl Place {
    /// Create a place from anything string-like.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Place {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for Place {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl Borrow<str> for Place {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Place {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Place {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Place {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
