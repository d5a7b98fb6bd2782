//! Unique identifiers for iPMS entities.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Unique identifier for an accepted progress update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UpdateId(Ulid);

impl UpdateId {
    /// Generate a new UpdateId
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for UpdateId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UpdateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for UpdateId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}
