//! Validation outcomes.
//!
//! A validation never fails: it produces a [`ValidationResult`], a mapping
//! from form field to the reason that field was rejected. An empty mapping
//! means the update is valid.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Form field an error is reported against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ErrorField {
    /// Physical progress percentage
    #[serde(rename = "progress")]
    Progress,
    /// Proposed bill amount
    #[serde(rename = "newBillAmount")]
    NewBillAmount,
    /// Attached documents
    #[serde(rename = "files")]
    Files,
    /// Not tied to a single field
    #[serde(rename = "general")]
    General,
    /// Total work value
    #[serde(rename = "workValue")]
    WorkValue,
}

impl ErrorField {
    /// Field name as reported to forms.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorField::Progress => "progress",
            ErrorField::NewBillAmount => "newBillAmount",
            ErrorField::Files => "files",
            ErrorField::General => "general",
            ErrorField::WorkValue => "workValue",
        }
    }
}

impl std::fmt::Display for ErrorField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationKind {
    /// Value outside its domain
    RangeViolation,
    /// Change too large in either direction
    MagnitudeViolation,
    /// Completion claimed without a supporting document
    EvidenceMissing,
    /// An attached file is over the size cap
    SizeLimitExceeded,
    /// Nothing to validate
    MissingInput,
}

/// One rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Failure category
    pub kind: ViolationKind,

    /// Human-readable message
    pub message: String,

    /// Distinct messages making up `message`, in order
    #[serde(skip)]
    parts: Vec<String>,
}

impl ValidationIssue {
    fn new(kind: ViolationKind, message: String) -> Self {
        Self {
            kind,
            parts: vec![message.clone()],
            message,
        }
    }

    /// Append the other issue's messages that are not already listed.
    fn absorb(&mut self, other: ValidationIssue) {
        for part in other.parts {
            if !self.parts.contains(&part) {
                self.parts.push(part);
            }
        }
        self.message = self.parts.join("; ");
    }
}

/// Outcome of validating an update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    valid: bool,
    errors: BTreeMap<ErrorField, ValidationIssue>,
}

impl ValidationResult {
    /// A result with no errors.
    pub fn ok() -> Self {
        Self {
            valid: true,
            errors: BTreeMap::new(),
        }
    }

    /// A result with a single error.
    pub fn rejected(field: ErrorField, kind: ViolationKind, message: impl Into<String>) -> Self {
        let mut result = Self::ok();
        result.set(field, kind, message);
        result
    }

    /// Record an error for `field`, replacing any earlier one.
    pub fn set(&mut self, field: ErrorField, kind: ViolationKind, message: impl Into<String>) {
        self.errors
            .insert(field, ValidationIssue::new(kind, message.into()));
        self.valid = false;
    }

    /// Merge another result into this one.
    ///
    /// Fields present in only one side are copied. When both sides reject the
    /// same field the messages are joined with `"; "`, an identical message is
    /// kept once, and the first side's kind wins.
    pub fn merge(&mut self, other: ValidationResult) {
        for (field, issue) in other.errors {
            match self.errors.get_mut(&field) {
                Some(existing) => existing.absorb(issue),
                None => {
                    self.errors.insert(field, issue);
                }
            }
        }
        self.valid = self.errors.is_empty();
    }

    /// Whether the update is acceptable.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Message recorded for `field`, if it was rejected.
    pub fn error(&self, field: ErrorField) -> Option<&str> {
        self.errors.get(&field).map(|issue| issue.message.as_str())
    }

    /// Full issue recorded for `field`.
    pub fn issue(&self, field: ErrorField) -> Option<&ValidationIssue> {
        self.errors.get(&field)
    }

    /// Whether `field` was rejected.
    pub fn has_error(&self, field: ErrorField) -> bool {
        self.errors.contains_key(&field)
    }

    /// All rejected fields, in field order.
    pub fn errors(&self) -> impl Iterator<Item = (ErrorField, &ValidationIssue)> {
        self.errors.iter().map(|(field, issue)| (*field, issue))
    }

    /// Number of rejected fields.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Field name to message mapping, the shape forms display inline.
    pub fn messages(&self) -> BTreeMap<&'static str, &str> {
        self.errors
            .iter()
            .map(|(field, issue)| (field.as_str(), issue.message.as_str()))
            .collect()
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_result_is_valid() {
        let result = ValidationResult::default();
        assert!(result.is_valid());
        assert_eq!(result.error_count(), 0);
        assert!(result.error(ErrorField::Progress).is_none());
    }

    #[test]
    fn test_set_overwrites_same_field() {
        let mut result = ValidationResult::ok();
        result.set(ErrorField::Files, ViolationKind::EvidenceMissing, "first");
        result.set(ErrorField::Files, ViolationKind::SizeLimitExceeded, "second");
        assert!(!result.is_valid());
        assert_eq!(result.error(ErrorField::Files), Some("second"));
        assert_eq!(
            result.issue(ErrorField::Files).unwrap().kind,
            ViolationKind::SizeLimitExceeded
        );
    }

    #[test]
    fn test_merge_unions_fields() {
        let mut left = ValidationResult::rejected(
            ErrorField::Progress,
            ViolationKind::MagnitudeViolation,
            "too far",
        );
        left.merge(ValidationResult::rejected(
            ErrorField::NewBillAmount,
            ViolationKind::RangeViolation,
            "negative",
        ));
        assert_eq!(left.error_count(), 2);
        assert_eq!(left.error(ErrorField::Progress), Some("too far"));
        assert_eq!(left.error(ErrorField::NewBillAmount), Some("negative"));
    }

    #[test]
    fn test_merge_joins_colliding_messages() {
        let mut left =
            ValidationResult::rejected(ErrorField::Files, ViolationKind::EvidenceMissing, "a");
        left.merge(ValidationResult::rejected(
            ErrorField::Files,
            ViolationKind::SizeLimitExceeded,
            "b",
        ));
        left.merge(ValidationResult::rejected(
            ErrorField::Files,
            ViolationKind::SizeLimitExceeded,
            "a",
        ));
        assert_eq!(left.error(ErrorField::Files), Some("a; b"));
        assert_eq!(
            left.issue(ErrorField::Files).unwrap().kind,
            ViolationKind::EvidenceMissing
        );
    }

    #[test]
    fn test_merge_compares_whole_messages() {
        let message = "Files exceed 10MB limit: a; b.pdf";
        let mut left = ValidationResult::rejected(
            ErrorField::Files,
            ViolationKind::SizeLimitExceeded,
            message,
        );
        left.merge(ValidationResult::rejected(
            ErrorField::Files,
            ViolationKind::SizeLimitExceeded,
            message,
        ));
        assert_eq!(left.error(ErrorField::Files), Some(message));

        left.merge(ValidationResult::rejected(
            ErrorField::Files,
            ViolationKind::EvidenceMissing,
            "a",
        ));
        assert_eq!(
            left.error(ErrorField::Files),
            Some("Files exceed 10MB limit: a; b.pdf; a")
        );
    }

    #[test]
    fn test_merge_of_merged_results_keeps_each_message_once() {
        let mut left =
            ValidationResult::rejected(ErrorField::Files, ViolationKind::EvidenceMissing, "a");
        left.merge(ValidationResult::rejected(
            ErrorField::Files,
            ViolationKind::EvidenceMissing,
            "b",
        ));

        let mut right =
            ValidationResult::rejected(ErrorField::Files, ViolationKind::EvidenceMissing, "b");
        right.merge(ValidationResult::rejected(
            ErrorField::Files,
            ViolationKind::EvidenceMissing,
            "c",
        ));

        left.merge(right);
        assert_eq!(left.error(ErrorField::Files), Some("a; b; c"));
    }

    #[test]
    fn test_merge_of_valid_results_stays_valid() {
        let mut result = ValidationResult::ok();
        result.merge(ValidationResult::ok());
        assert!(result.is_valid());
    }

    #[test]
    fn test_serialized_shape() {
        let result = ValidationResult::rejected(
            ErrorField::NewBillAmount,
            ViolationKind::RangeViolation,
            "Bill amount cannot be negative",
        );
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["valid"], false);
        assert_eq!(
            json["errors"]["newBillAmount"]["message"],
            "Bill amount cannot be negative"
        );
        assert_eq!(json["errors"]["newBillAmount"]["kind"], "RangeViolation");
    }

    #[test]
    fn test_messages_use_form_field_names() {
        let mut result = ValidationResult::ok();
        result.set(ErrorField::General, ViolationKind::MissingInput, "nothing");
        let messages = result.messages();
        assert_eq!(messages.get("general"), Some(&"nothing"));
    }
}
