//! Change record - what an accepted update did.

use serde::{Deserialize, Serialize};
use crate::id::UpdateId;
use crate::request::{ProgressKind, ProjectKind};
use crate::Time;

/// Record of an accepted progress update, ready for a history log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressChange {
    /// Unique identifier
    pub id: UpdateId,

    /// Active or archived project
    pub project_kind: ProjectKind,

    /// Physical or financial
    pub kind: ProgressKind,

    /// Value before the update (percentage or amount)
    pub from: f64,

    /// Value after the update
    pub to: f64,

    /// Human-readable delta, e.g. "Increased by 15.0%"
    pub description: String,

    /// When the update was accepted
    pub recorded_at: Time,
}

impl ProgressChange {
    /// Create a change record stamped with the current time.
    pub fn new(
        project_kind: ProjectKind,
        kind: ProgressKind,
        from: f64,
        to: f64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: UpdateId::new(),
            project_kind,
            kind,
            from,
            to,
            description: description.into(),
            recorded_at: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_change_record() {
        let change = ProgressChange::new(
            ProjectKind::ArchiveProject,
            ProgressKind::Physical,
            40.0,
            38.0,
            "Decreased by 2.0%",
        );
        assert_eq!(change.project_kind, ProjectKind::ArchiveProject);
        assert_eq!(change.description, "Decreased by 2.0%");
        assert!(change.to < change.from);
        assert!(change.recorded_at <= chrono::Utc::now());
    }

    #[test]
    fn test_change_serializes_kinds_in_snake_case() {
        let change = ProgressChange::new(
            ProjectKind::Project,
            ProgressKind::Financial,
            0.0,
            100.0,
            "Increased by ₹0.0L (0.0%)",
        );
        let json = serde_json::to_value(&change).unwrap();
        assert_eq!(json["kind"], "financial");
        assert_eq!(json["project_kind"], "project");
    }
}
