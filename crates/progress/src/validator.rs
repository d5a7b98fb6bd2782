//! Progress update validation.
//!
//! One validator serves both physical and financial updates, for active and
//! archived projects alike. Validation is a pure decision: it never logs,
//! never fails, and always returns a [`ValidationResult`].

use std::sync::Arc;
use ipms_core::{
    CombinedProgressUpdateRequest, ErrorField, FileRef, FinancialProgressUpdateRequest,
    ProgressChange, ProgressKind, ProgressUpdateRequest, ProjectKind, ValidationResult,
    ViolationKind,
};

use crate::currency::{CurrencyFormatter, IndianCurrency};
use crate::describe::{describe_financial_change_with, describe_progress_change, rounded_percent};
use crate::policy::ValidationPolicy;

/// An update that failed validation.
#[derive(Debug, Clone, thiserror::Error)]
#[error("progress update rejected: {fields}")]
pub struct UpdateRejected {
    fields: String,
    result: ValidationResult,
}

impl UpdateRejected {
    fn new(result: ValidationResult) -> Self {
        let fields = result
            .errors()
            .map(|(field, _)| field.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        Self { fields, result }
    }

    /// The field errors behind the rejection.
    pub fn result(&self) -> &ValidationResult {
        &self.result
    }

    /// Take the field errors.
    pub fn into_result(self) -> ValidationResult {
        self.result
    }
}

/// Validates progress updates against a [`ValidationPolicy`].
#[derive(Clone)]
pub struct ProgressValidator {
    policy: ValidationPolicy,
    formatter: Arc<dyn CurrencyFormatter>,
}

impl std::fmt::Debug for ProgressValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressValidator")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl Default for ProgressValidator {
    fn default() -> Self {
        Self::new(ValidationPolicy::default())
    }
}

impl ProgressValidator {
    /// Create a validator with the given limits and Indian currency display.
    pub fn new(policy: ValidationPolicy) -> Self {
        Self {
            policy,
            formatter: Arc::new(IndianCurrency::default()),
        }
    }

    /// Use a different currency display for financial change descriptions.
    pub fn with_formatter(mut self, formatter: Arc<dyn CurrencyFormatter>) -> Self {
        self.formatter = formatter;
        self
    }

    /// The limits in force.
    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    /// Validate a change to physical progress.
    pub fn validate_physical(
        &self,
        current_value: f64,
        proposed_value: f64,
        attached_files: &[FileRef],
    ) -> ValidationResult {
        if !(0.0..=100.0).contains(&proposed_value) {
            return ValidationResult::rejected(
                ErrorField::Progress,
                ViolationKind::RangeViolation,
                "Progress must be between 0 and 100",
            );
        }

        let mut result = ValidationResult::ok();
        let delta = proposed_value - current_value;

        if delta < 0.0 && delta.abs() > self.policy.max_decrease_percent {
            result.set(
                ErrorField::Progress,
                ViolationKind::MagnitudeViolation,
                format!(
                    "Significant backward progress not allowed. Maximum {}% decrease per update for corrections.",
                    self.policy.max_decrease_percent
                ),
            );
        }

        if delta > self.policy.max_increase_percent {
            result.set(
                ErrorField::Progress,
                ViolationKind::MagnitudeViolation,
                format!(
                    "Progress increase exceeds reasonable limits. Maximum {}% increase per update.",
                    self.policy.max_increase_percent
                ),
            );
        }

        if proposed_value == 100.0 && attached_files.is_empty() {
            result.set(
                ErrorField::Files,
                ViolationKind::EvidenceMissing,
                "Project completion (100% progress) requires at least one supporting document",
            );
        }

        self.check_file_sizes(attached_files, &mut result);
        result
    }

    /// Validate a change to the cumulative bill amount.
    pub fn validate_financial(
        &self,
        current_amount: f64,
        proposed_amount: f64,
        reference_amount: f64,
        attached_files: &[FileRef],
    ) -> ValidationResult {
        if !reference_amount.is_finite() || reference_amount <= 0.0 {
            return ValidationResult::rejected(
                ErrorField::WorkValue,
                ViolationKind::RangeViolation,
                "Work value must be greater than zero",
            );
        }

        if !proposed_amount.is_finite() {
            return ValidationResult::rejected(
                ErrorField::NewBillAmount,
                ViolationKind::RangeViolation,
                "Bill amount must be a valid number",
            );
        }

        if proposed_amount < 0.0 {
            return ValidationResult::rejected(
                ErrorField::NewBillAmount,
                ViolationKind::RangeViolation,
                "Bill amount cannot be negative",
            );
        }

        if proposed_amount > reference_amount {
            return ValidationResult::rejected(
                ErrorField::NewBillAmount,
                ViolationKind::RangeViolation,
                "Bill amount cannot exceed work value",
            );
        }

        let mut result = ValidationResult::ok();
        let amount_diff = proposed_amount - current_amount;
        let pct_of_reference = amount_diff.abs() / reference_amount * 100.0;

        if amount_diff < 0.0 && pct_of_reference > self.policy.max_decrease_percent {
            result.set(
                ErrorField::NewBillAmount,
                ViolationKind::MagnitudeViolation,
                format!(
                    "Significant backward financial progress not allowed. Maximum {}% of work value decrease per update for corrections.",
                    self.policy.max_decrease_percent
                ),
            );
        }

        if amount_diff > 0.0 && pct_of_reference > self.policy.max_increase_percent {
            result.set(
                ErrorField::NewBillAmount,
                ViolationKind::MagnitudeViolation,
                format!(
                    "Financial progress increase exceeds reasonable limits. Maximum {}% of work value increase per update.",
                    self.policy.max_increase_percent
                ),
            );
        }

        // Completion is judged on the rounded percentage, so 99.5% counts.
        let completes = rounded_percent(proposed_amount, reference_amount) == 100.0;
        if completes && attached_files.is_empty() {
            result.set(
                ErrorField::Files,
                ViolationKind::EvidenceMissing,
                "Financial completion (100% progress) requires at least one supporting document",
            );
        }

        self.check_file_sizes(attached_files, &mut result);
        result
    }

    /// Validate an update touching physical progress, financial progress, or
    /// both. Errors from the two aspects are merged per field.
    pub fn validate_combined(
        &self,
        current_physical: f64,
        proposed_physical: Option<f64>,
        current_amount: f64,
        proposed_amount: Option<f64>,
        reference_amount: f64,
        attached_files: &[FileRef],
    ) -> ValidationResult {
        self.validate_combined_request(&CombinedProgressUpdateRequest {
            current_physical,
            proposed_physical,
            current_amount,
            proposed_amount,
            reference_amount,
            attached_files: attached_files.to_vec(),
        })
    }

    /// Validate a physical progress request.
    pub fn validate_physical_request(&self, request: &ProgressUpdateRequest) -> ValidationResult {
        self.validate_physical(
            request.current_value,
            request.proposed_value,
            &request.attached_files,
        )
    }

    /// Validate a financial progress request.
    pub fn validate_financial_request(
        &self,
        request: &FinancialProgressUpdateRequest,
    ) -> ValidationResult {
        self.validate_financial(
            request.current_amount,
            request.proposed_amount,
            request.reference_amount,
            &request.attached_files,
        )
    }

    /// Validate a combined request.
    pub fn validate_combined_request(
        &self,
        request: &CombinedProgressUpdateRequest,
    ) -> ValidationResult {
        let physical = request.physical();
        let financial = request.financial();

        if physical.is_none() && financial.is_none() {
            return ValidationResult::rejected(
                ErrorField::General,
                ViolationKind::MissingInput,
                "At least one progress update (physical or financial) must be provided",
            );
        }

        let mut result = ValidationResult::ok();

        if let Some(physical) = &physical {
            result.merge(self.validate_physical_request(physical));
        }

        if let Some(financial) = &financial {
            result.merge(self.validate_financial_request(financial));
        }

        result
    }

    /// Describe a billed-amount change using this validator's currency display.
    pub fn describe_financial(&self, from: f64, to: f64, reference_amount: f64) -> String {
        describe_financial_change_with(from, to, reference_amount, self.formatter.as_ref())
    }

    /// Validate a physical update and, if it passes, produce its change record.
    pub fn accept_physical(
        &self,
        project_kind: ProjectKind,
        request: &ProgressUpdateRequest,
    ) -> Result<ProgressChange, UpdateRejected> {
        let result = self.validate_physical_request(request);
        if !result.is_valid() {
            return Err(UpdateRejected::new(result));
        }

        Ok(self.physical_change(project_kind, request.current_value, request.proposed_value))
    }

    /// Validate a financial update and, if it passes, produce its change record.
    pub fn accept_financial(
        &self,
        project_kind: ProjectKind,
        request: &FinancialProgressUpdateRequest,
    ) -> Result<ProgressChange, UpdateRejected> {
        let result = self.validate_financial_request(request);
        if !result.is_valid() {
            return Err(UpdateRejected::new(result));
        }

        Ok(self.financial_change(
            project_kind,
            request.current_amount,
            request.proposed_amount,
            request.reference_amount,
        ))
    }

    /// Validate a combined update and, if it passes, produce one change record
    /// per aspect that was updated (physical first).
    pub fn accept_combined(
        &self,
        project_kind: ProjectKind,
        request: &CombinedProgressUpdateRequest,
    ) -> Result<Vec<ProgressChange>, UpdateRejected> {
        let result = self.validate_combined_request(request);
        if !result.is_valid() {
            return Err(UpdateRejected::new(result));
        }

        let mut changes = Vec::with_capacity(2);
        if let Some(physical) = request.physical() {
            changes.push(self.physical_change(
                project_kind,
                physical.current_value,
                physical.proposed_value,
            ));
        }
        if let Some(financial) = request.financial() {
            changes.push(self.financial_change(
                project_kind,
                financial.current_amount,
                financial.proposed_amount,
                financial.reference_amount,
            ));
        }
        Ok(changes)
    }

    fn physical_change(&self, project_kind: ProjectKind, from: f64, to: f64) -> ProgressChange {
        ProgressChange::new(
            project_kind,
            ProgressKind::Physical,
            from,
            to,
            describe_progress_change(from, to),
        )
    }

    fn financial_change(
        &self,
        project_kind: ProjectKind,
        from: f64,
        to: f64,
        reference_amount: f64,
    ) -> ProgressChange {
        ProgressChange::new(
            project_kind,
            ProgressKind::Financial,
            from,
            to,
            self.describe_financial(from, to, reference_amount),
        )
    }

    fn check_file_sizes(&self, attached_files: &[FileRef], result: &mut ValidationResult) {
        let oversized: Vec<&str> = attached_files
            .iter()
            .filter(|file| file.exceeds(self.policy.max_file_size_bytes))
            .map(|file| file.name.as_str())
            .collect();

        if !oversized.is_empty() {
            result.set(
                ErrorField::Files,
                ViolationKind::SizeLimitExceeded,
                format!(
                    "Files exceed {} limit: {}",
                    self.policy.file_size_label(),
                    oversized.join(", ")
                ),
            );
        }
    }
}
