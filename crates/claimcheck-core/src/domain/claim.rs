//! Claims: the unit of verification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An atomic assertion extracted from input text.
///
/// Immutable once extracted; every downstream stage borrows it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claim(String);

impl Claim {
    pub fn new(text: impl Into<String>) -> Self {
        Claim(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lower-cased, trimmed form used for matching and query building.
    pub fn normalized(&self) -> String {
        self.0.trim().to_lowercase()
    }
}

impl fmt::Display for Claim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Claim {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
