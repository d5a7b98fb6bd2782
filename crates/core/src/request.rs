//! Progress update requests.
//!
//! Requests are transient: a caller builds one right before validation and
//! drops it afterwards.

use serde::{Deserialize, Serialize};
use crate::file::FileRef;

/// Which record an update targets. Active and archived projects share the
/// same update rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectKind {
    /// A live project
    #[default]
    Project,
    /// A project in the archive
    ArchiveProject,
}

/// Which aspect of progress an update changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressKind {
    /// Physical completion percentage
    Physical,
    /// Cumulative bill amount against the work value
    Financial,
}

impl ProgressKind {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressKind::Physical => "physical",
            ProgressKind::Financial => "financial",
        }
    }
}

/// A proposed change to a physical completion percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressUpdateRequest {
    /// Current percentage (0-100)
    pub current_value: f64,

    /// Proposed percentage
    pub proposed_value: f64,

    /// Supporting documents
    #[serde(default)]
    pub attached_files: Vec<FileRef>,
}

impl ProgressUpdateRequest {
    /// Create a request without attachments.
    pub fn new(current_value: f64, proposed_value: f64) -> Self {
        Self {
            current_value,
            proposed_value,
            attached_files: Vec::new(),
        }
    }

    /// Attach supporting documents.
    pub fn with_files(mut self, files: Vec<FileRef>) -> Self {
        self.attached_files = files;
        self
    }
}

/// A proposed change to the cumulative amount billed against a work value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialProgressUpdateRequest {
    /// Amount billed so far
    pub current_amount: f64,

    /// Proposed cumulative bill amount
    pub proposed_amount: f64,

    /// Total contracted work value
    pub reference_amount: f64,

    /// Supporting documents
    #[serde(default)]
    pub attached_files: Vec<FileRef>,
}

impl FinancialProgressUpdateRequest {
    /// Create a request without attachments.
    pub fn new(current_amount: f64, proposed_amount: f64, reference_amount: f64) -> Self {
        Self {
            current_amount,
            proposed_amount,
            reference_amount,
            attached_files: Vec::new(),
        }
    }

    /// Attach supporting documents.
    pub fn with_files(mut self, files: Vec<FileRef>) -> Self {
        self.attached_files = files;
        self
    }
}

/// An update that may change physical progress, financial progress, or both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedProgressUpdateRequest {
    /// Current physical percentage
    pub current_physical: f64,

    /// Proposed physical percentage, if being updated
    pub proposed_physical: Option<f64>,

    /// Amount billed so far
    pub current_amount: f64,

    /// Proposed bill amount, if being updated
    pub proposed_amount: Option<f64>,

    /// Total contracted work value
    pub reference_amount: f64,

    /// Supporting documents, shared by both aspects
    #[serde(default)]
    pub attached_files: Vec<FileRef>,
}

impl CombinedProgressUpdateRequest {
    /// The physical half of this update, if one was proposed.
    pub fn physical(&self) -> Option<ProgressUpdateRequest> {
        self.proposed_physical.map(|proposed| ProgressUpdateRequest {
            current_value: self.current_physical,
            proposed_value: proposed,
            attached_files: self.attached_files.clone(),
        })
    }

    /// The financial half of this update, if one was proposed.
    pub fn financial(&self) -> Option<FinancialProgressUpdateRequest> {
        self.proposed_amount.map(|proposed| FinancialProgressUpdateRequest {
            current_amount: self.current_amount,
            proposed_amount: proposed,
            reference_amount: self.reference_amount,
            attached_files: self.attached_files.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn combined(physical: Option<f64>, amount: Option<f64>) -> CombinedProgressUpdateRequest {
        CombinedProgressUpdateRequest {
            current_physical: 20.0,
            proposed_physical: physical,
            current_amount: 100_000.0,
            proposed_amount: amount,
            reference_amount: 1_000_000.0,
            attached_files: vec![FileRef::new("bill.pdf", 10)],
        }
    }

    #[test]
    fn test_combined_splits_into_halves() {
        let request = combined(Some(30.0), None);
        let physical = request.physical().unwrap();
        assert_eq!(physical.current_value, 20.0);
        assert_eq!(physical.proposed_value, 30.0);
        assert_eq!(physical.attached_files.len(), 1);
        assert!(request.financial().is_none());

        let request = combined(None, Some(200_000.0));
        let financial = request.financial().unwrap();
        assert_eq!(financial.reference_amount, 1_000_000.0);
        assert!(request.physical().is_none());
    }

    #[test]
    fn test_request_deserializes_without_files() {
        let request: ProgressUpdateRequest =
            serde_json::from_str(r#"{"current_value": 10, "proposed_value": 20}"#).unwrap();
        assert!(request.attached_files.is_empty());
    }

    #[test]
    fn test_project_kind_serialization() {
        let json = serde_json::to_string(&ProjectKind::ArchiveProject).unwrap();
        assert_eq!(json, "\"archive_project\"");
        assert_eq!(ProjectKind::default(), ProjectKind::Project);
    }
}
