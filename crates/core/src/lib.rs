//! iPMS core data models.
//!
//! Value types shared by every tier that validates progress updates:
//! requests, attachments, validation outcomes and change records.

#![warn(missing_docs)]

// Core identities
mod id;

// Update inputs
mod file;
mod request;

// Update outputs
mod validation;
mod change;

// Re-exports
pub use id::*;

pub use file::{FileRef, FileRefParseError, MIB};
pub use request::{
    ProjectKind, ProgressKind, ProgressUpdateRequest, FinancialProgressUpdateRequest,
    CombinedProgressUpdateRequest,
};
pub use validation::{ErrorField, ViolationKind, ValidationIssue, ValidationResult};
pub use change::ProgressChange;

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
