//! Country catalog entity definitions.

use serde::{Deserialize, Serialize};

/// A row of the read-only country catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    /// Canonical identifier (ISO-3166 alpha-3).
    pub code: String,
    /// English short name.
    pub name: String,
}

impl Country {
    /// Creates a new catalog entry.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }

    /// Returns true if the lower-cased name contains `fragment`.
    ///
    /// `fragment` is expected to be lower-cased already.
    pub fn name_contains(&self, fragment: &str) -> bool {
        self.name.to_lowercase().contains(fragment)
    }

    /// Returns true if the name equals `input`, ignoring case.
    pub fn name_matches(&self, input: &str) -> bool {
        self.name.to_lowercase() == input.to_lowercase()
    }
}
