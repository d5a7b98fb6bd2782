//! Progress Validation
//!
//! Update rules for physical and financial progress, change descriptions,
//! and the currency display those descriptions use.
//!
//! The free functions below apply the default policy; build a
//! [`ProgressValidator`] to use different limits.

#![warn(missing_docs)]

pub mod policy;
pub mod validator;
pub mod describe;
pub mod currency;

pub use policy::{ValidationPolicy, PolicyError};
pub use validator::{ProgressValidator, UpdateRejected};
pub use describe::{
    describe_progress_change, describe_financial_progress_change, describe_financial_change_with,
};
pub use currency::{CurrencyFormatter, CurrencyLocale, IndianCurrency, InternationalCurrency};

use ipms_core::{FileRef, ValidationResult};

/// Validate a physical progress update under the default policy.
pub fn validate_physical_progress(
    current_value: f64,
    proposed_value: f64,
    attached_files: &[FileRef],
) -> ValidationResult {
    ProgressValidator::default().validate_physical(current_value, proposed_value, attached_files)
}

/// Validate a financial progress update under the default policy.
pub fn validate_financial_progress(
    current_amount: f64,
    proposed_amount: f64,
    reference_amount: f64,
    attached_files: &[FileRef],
) -> ValidationResult {
    ProgressValidator::default().validate_financial(
        current_amount,
        proposed_amount,
        reference_amount,
        attached_files,
    )
}

/// Validate a physical and/or financial update under the default policy.
pub fn validate_combined_progress(
    current_physical: f64,
    proposed_physical: Option<f64>,
    current_amount: f64,
    proposed_amount: Option<f64>,
    reference_amount: f64,
    attached_files: &[FileRef],
) -> ValidationResult {
    ProgressValidator::default().validate_combined(
        current_physical,
        proposed_physical,
        current_amount,
        proposed_amount,
        reference_amount,
        attached_files,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ipms_core::ErrorField;

    #[test]
    fn test_free_functions_use_default_policy() {
        assert!(validate_physical_progress(80.0, 70.0, &[]).has_error(ErrorField::Progress));
        assert!(validate_physical_progress(10.0, 65.0, &[]).has_error(ErrorField::Progress));
        assert!(validate_physical_progress(90.0, 100.0, &[]).has_error(ErrorField::Files));
        let cert = [FileRef::new("cert.pdf", 1024)];
        assert!(validate_physical_progress(90.0, 100.0, &cert).is_valid());

        assert!(validate_financial_progress(500_000.0, 600_000.0, 1_000_000.0, &[]).is_valid());
        assert!(validate_financial_progress(900_000.0, 1_000_000.0, 1_000_000.0, &[])
            .has_error(ErrorField::Files));

        assert!(validate_combined_progress(0.0, None, 0.0, None, 1.0, &[])
            .has_error(ErrorField::General));
    }

    #[test]
    fn test_describe_free_functions() {
        assert_eq!(describe_progress_change(55.0, 40.0), "Decreased by 15.0%");
        assert_eq!(
            describe_financial_progress_change(0.0, 15_000_000.0, 20_000_000.0),
            "Increased by ₹1.5Cr (75.0%)"
        );
        assert_eq!(describe_financial_progress_change(5.0, 5.0, 10.0), "No change");
    }
}
