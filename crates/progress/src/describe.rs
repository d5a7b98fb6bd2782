//! Human-readable descriptions of progress changes.

use crate::currency::{CurrencyFormatter, IndianCurrency};

/// Round half up, matching how percentages are shown to users.
pub(crate) fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// `amount` as a whole percentage of `reference`; zero when there is no
/// usable reference.
pub(crate) fn rounded_percent(amount: f64, reference: f64) -> f64 {
    if reference > 0.0 && reference.is_finite() {
        round_half_up(amount / reference * 100.0)
    } else {
        0.0
    }
}

/// Describe a change in physical progress.
///
/// ```
/// use ipms_progress::describe_progress_change;
///
/// assert_eq!(describe_progress_change(40.0, 55.0), "Increased by 15.0%");
/// assert_eq!(describe_progress_change(40.0, 40.0), "No change");
/// ```
pub fn describe_progress_change(from: f64, to: f64) -> String {
    let diff = to - from;
    if diff > 0.0 {
        format!("Increased by {diff:.1}%")
    } else if diff < 0.0 {
        format!("Decreased by {:.1}%", diff.abs())
    } else {
        "No change".to_string()
    }
}

/// Describe a change in billed amount, with the amount rendered by
/// `formatter` and the percentage-point change of the work value.
pub fn describe_financial_change_with(
    from: f64,
    to: f64,
    reference: f64,
    formatter: &dyn CurrencyFormatter,
) -> String {
    let amount_diff = to - from;
    let pct_diff = rounded_percent(to, reference) - rounded_percent(from, reference);

    if amount_diff > 0.0 {
        format!(
            "Increased by {} ({:.1}%)",
            formatter.format_amount(amount_diff),
            pct_diff
        )
    } else if amount_diff < 0.0 {
        format!(
            "Decreased by {} ({:.1}%)",
            formatter.format_amount(amount_diff.abs()),
            pct_diff.abs()
        )
    } else {
        "No change".to_string()
    }
}

/// Describe a billed-amount change in lakh/crore rupees.
///
/// ```
/// use ipms_progress::describe_financial_progress_change;
///
/// assert_eq!(
///     describe_financial_progress_change(0.0, 15_000_000.0, 20_000_000.0),
///     "Increased by ₹1.5Cr (75.0%)"
/// );
/// ```
pub fn describe_financial_progress_change(
    from_amount: f64,
    to_amount: f64,
    reference_amount: f64,
) -> String {
    describe_financial_change_with(
        from_amount,
        to_amount,
        reference_amount,
        &IndianCurrency::default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::InternationalCurrency;

    #[test]
    fn test_describe_progress_change() {
        assert_eq!(describe_progress_change(40.0, 55.0), "Increased by 15.0%");
        assert_eq!(describe_progress_change(55.0, 40.0), "Decreased by 15.0%");
        assert_eq!(describe_progress_change(40.0, 40.0), "No change");
        assert_eq!(describe_progress_change(10.0, 12.5), "Increased by 2.5%");
    }

    #[test]
    fn test_describe_financial_crore() {
        let inr = IndianCurrency::default();
        assert_eq!(
            describe_financial_change_with(0.0, 15_000_000.0, 20_000_000.0, &inr),
            "Increased by ₹1.5Cr (75.0%)"
        );
    }

    #[test]
    fn test_describe_financial_lakh_decrease() {
        let inr = IndianCurrency::default();
        assert_eq!(
            describe_financial_change_with(500_000.0, 480_000.0, 1_000_000.0, &inr),
            "Decreased by ₹0.2L (2.0%)"
        );
    }

    #[test]
    fn test_describe_financial_no_change() {
        let usd = InternationalCurrency::default();
        assert_eq!(
            describe_financial_change_with(1_000.0, 1_000.0, 5_000.0, &usd),
            "No change"
        );
    }

    #[test]
    fn test_describe_financial_without_reference() {
        let usd = InternationalCurrency::default();
        assert_eq!(
            describe_financial_change_with(0.0, 2_000.0, 0.0, &usd),
            "Increased by $2.0K (0.0%)"
        );
    }

    #[test]
    fn test_describe_financial_progress_change_defaults_to_rupees() {
        assert_eq!(
            describe_financial_progress_change(20_000_000.0, 5_000_000.0, 20_000_000.0),
            "Decreased by ₹1.5Cr (75.0%)"
        );
    }

    #[test]
    fn test_percentages_round_half_up() {
        assert_eq!(rounded_percent(125.0, 1_000.0), 13.0);
        assert_eq!(rounded_percent(124.0, 1_000.0), 12.0);
        assert_eq!(rounded_percent(996.0, 1_000.0), 100.0);
        assert_eq!(round_half_up(-2.5), -2.0);
    }
}
