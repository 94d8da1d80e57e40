//! Product category label.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A product category.
///
/// An opaque label: the API uses the same string for display and as a
/// filter key, so no structure is imposed on it here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    /// Create a category from a label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Returns the label as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        Self(label)
    }
}

impl From<&str> for Category {
    fn from(label: &str) -> Self {
        Self(label.to_owned())
    }
}
