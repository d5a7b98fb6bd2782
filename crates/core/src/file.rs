//! File references attached to progress updates.

use serde::{Deserialize, Serialize};

/// Number of bytes in one mebibyte.
pub const MIB: u64 = 1024 * 1024;

/// A file attached to an update: name plus size, content is never inspected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    /// File name as selected by the user
    pub name: String,

    /// File size in bytes
    pub size_bytes: u64,
}

impl FileRef {
    /// Create a new file reference.
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            size_bytes,
        }
    }

    /// Whether this file is larger than `limit_bytes`.
    pub fn exceeds(&self, limit_bytes: u64) -> bool {
        self.size_bytes > limit_bytes
    }
}

/// Errors parsing a `name:bytes` file reference.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FileRefParseError {
    /// No `:` separator
    #[error("expected <name>:<bytes>, got {0:?}")]
    MissingSize(String),

    /// Empty file name
    #[error("file name cannot be empty")]
    EmptyName,

    /// Size is not a non-negative integer
    #[error("invalid file size {0:?}")]
    InvalidSize(String),
}

impl std::str::FromStr for FileRef {
    type Err = FileRefParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Split on the last ':' so names may contain colons.
        let (name, size) = s
            .rsplit_once(':')
            .ok_or_else(|| FileRefParseError::MissingSize(s.to_string()))?;

        let name = name.trim();
        if name.is_empty() {
            return Err(FileRefParseError::EmptyName);
        }

        let size_bytes = size
            .trim()
            .parse::<u64>()
            .map_err(|_| FileRefParseError::InvalidSize(size.to_string()))?;

        Ok(Self::new(name, size_bytes))
    }
}

impl std::fmt::Display for FileRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.name, self.size_bytes)
    }
}
