//! Validation policy - the limits every update is checked against.

use serde::{Deserialize, Serialize};
use std::path::Path;
use ipms_core::MIB;

/// Error type for policy operations.
pub type Result<T> = std::result::Result<T, PolicyError>;

/// Errors that can occur while loading a policy.
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A limit is out of range
    #[error("Invalid policy: {0}")]
    Invalid(String),
}

/// Limits applied to progress updates.
///
/// Every field has a default, so a policy file only needs the limits it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationPolicy {
    /// Largest allowed decrease per update, in percent (of the work value for
    /// financial progress)
    pub max_decrease_percent: f64,

    /// Largest allowed increase per update, in percent
    pub max_increase_percent: f64,

    /// Largest allowed attachment, in bytes
    pub max_file_size_bytes: u64,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            max_decrease_percent: 5.0,
            max_increase_percent: 50.0,
            max_file_size_bytes: 10 * MIB,
        }
    }
}

impl ValidationPolicy {
    /// Load a policy from a JSON file and check its limits.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let policy = Self::from_json(&content)?;
        tracing::debug!(path = %path.display(), ?policy, "Loaded validation policy");
        Ok(policy)
    }

    /// Parse a policy from JSON and check its limits.
    pub fn from_json(json: &str) -> Result<Self> {
        let policy: Self = serde_json::from_str(json)?;
        policy.check()?;
        Ok(policy)
    }

    /// Check that every limit is usable.
    pub fn check(&self) -> Result<()> {
        for (name, value) in [
            ("max_decrease_percent", self.max_decrease_percent),
            ("max_increase_percent", self.max_increase_percent),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(PolicyError::Invalid(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
            if value > 100.0 {
                tracing::warn!(limit = name, value, "Limit above 100% never rejects an update");
            }
        }

        if self.max_file_size_bytes == 0 {
            return Err(PolicyError::Invalid(
                "max_file_size_bytes must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// File size cap as shown in messages, e.g. "10MB".
    pub fn file_size_label(&self) -> String {
        let mib = self.max_file_size_bytes as f64 / MIB as f64;
        format!("{}MB", (mib * 100.0).round() / 100.0)
    }
}
