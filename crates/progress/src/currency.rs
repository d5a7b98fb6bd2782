//! Compact currency formatting for change descriptions.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

const LAKH: f64 = 100_000.0;
const CRORE: f64 = 10_000_000.0;

/// Renders an amount in compact form.
pub trait CurrencyFormatter: Send + Sync {
    /// Format `amount`, e.g. "₹1.5Cr".
    fn format_amount(&self, amount: f64) -> String;
}

/// Indian numbering: lakh (L) below one crore, crore (Cr) from there on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndianCurrency {
    symbol: String,
}

impl IndianCurrency {
    /// Create a formatter with the given currency symbol.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }
}

impl Default for IndianCurrency {
    fn default() -> Self {
        Self::new("₹")
    }
}

impl CurrencyFormatter for IndianCurrency {
    fn format_amount(&self, amount: f64) -> String {
        let sign = if amount < 0.0 { "-" } else { "" };
        let amount = amount.abs();
        if amount >= CRORE {
            format!("{sign}{}{:.1}Cr", self.symbol, amount / CRORE)
        } else {
            format!("{sign}{}{:.1}L", self.symbol, amount / LAKH)
        }
    }
}

/// Short-scale numbering: K, M and B suffixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternationalCurrency {
    symbol: String,
}

impl InternationalCurrency {
    /// Create a formatter with the given currency symbol.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }
}

impl Default for InternationalCurrency {
    fn default() -> Self {
        Self::new("$")
    }
}

impl CurrencyFormatter for InternationalCurrency {
    fn format_amount(&self, amount: f64) -> String {
        let sign = if amount < 0.0 { "-" } else { "" };
        let amount = amount.abs();
        let symbol = &self.symbol;
        if amount >= 1e9 {
            format!("{sign}{symbol}{:.1}B", amount / 1e9)
        } else if amount >= 1e6 {
            format!("{sign}{symbol}{:.1}M", amount / 1e6)
        } else if amount >= 1e3 {
            format!("{sign}{symbol}{:.1}K", amount / 1e3)
        } else {
            format!("{sign}{symbol}{amount:.2}")
        }
    }
}

/// Numbering convention for amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurrencyLocale {
    /// Lakh/crore
    #[default]
    Indian,
    /// K/M/B
    International,
}

impl CurrencyLocale {
    /// Build the formatter for this locale, using its usual symbol unless one
    /// is given.
    pub fn formatter(&self, symbol: Option<&str>) -> Arc<dyn CurrencyFormatter> {
        match (self, symbol) {
            (CurrencyLocale::Indian, Some(s)) => Arc::new(IndianCurrency::new(s)),
            (CurrencyLocale::Indian, None) => Arc::new(IndianCurrency::default()),
            (CurrencyLocale::International, Some(s)) => Arc::new(InternationalCurrency::new(s)),
            (CurrencyLocale::International, None) => Arc::new(InternationalCurrency::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indian_tiers() {
        let inr = IndianCurrency::default();
        assert_eq!(inr.format_amount(15_000_000.0), "₹1.5Cr");
        assert_eq!(inr.format_amount(10_000_000.0), "₹1.0Cr");
        assert_eq!(inr.format_amount(9_999_999.0), "₹100.0L");
        assert_eq!(inr.format_amount(250_000.0), "₹2.5L");
        assert_eq!(inr.format_amount(50_000.0), "₹0.5L");
    }

    #[test]
    fn test_indian_negative_amount_uses_magnitude_tier() {
        let inr = IndianCurrency::new("Rs.");
        assert_eq!(inr.format_amount(-20_000_000.0), "-Rs.2.0Cr");
    }

    #[test]
    fn test_international_tiers() {
        let usd = InternationalCurrency::default();
        assert_eq!(usd.format_amount(2_500_000_000.0), "$2.5B");
        assert_eq!(usd.format_amount(1_200_000.0), "$1.2M");
        assert_eq!(usd.format_amount(4_500.0), "$4.5K");
        assert_eq!(usd.format_amount(12.5), "$12.50");
    }

    #[test]
    fn test_locale_formatter() {
        let formatter = CurrencyLocale::International.formatter(Some("€"));
        assert_eq!(formatter.format_amount(3_000.0), "€3.0K");
        let formatter = CurrencyLocale::default().formatter(None);
        assert_eq!(formatter.format_amount(100_000.0), "₹1.0L");
    }
}
