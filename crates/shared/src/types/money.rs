//! Money type with decimal precision and currency.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! This type wraps `rust_decimal::Decimal` for arbitrary precision.
//!
//! Display formatting groups the integer part with commas and prefixes the
//! currency code (`PKR 100,000`). Formatting never rounds: a non-zero
//! fractional part is always shown.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents a monetary amount with currency.
///
/// Uses `Decimal` internally to avoid floating-point precision errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// The amount in major currency units.
    pub amount: Decimal,
    /// ISO 4217 currency code (e.g., "PKR", "USD").
    pub currency: Currency,
}

/// ISO 4217 currency codes a register can be configured with.
///
/// A deployment uses exactly one of these; there is no conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Pakistani Rupee
    #[default]
    Pkr,
    /// US Dollar
    Usd,
    /// Euro
    Eur,
    /// Indian Rupee
    Inr,
    /// UAE Dirham
    Aed,
}

impl Money {
    /// Creates a new Money instance.
    #[must_use]
    pub const fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Creates a zero amount in the specified currency.
    #[must_use]
    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.currency, format_grouped(self.amount))
    }
}

/// Formats an amount with comma-grouped thousands.
///
/// `100000` → `100,000`, `-4000` → `-4,000`, `1234.50` → `1,234.5`.
#[must_use]
pub fn format_grouped(amount: Decimal) -> String {
    let normalized = amount.normalize();
    let negative = normalized.is_sign_negative() && !normalized.is_zero();
    let abs = normalized.abs();
    let whole = abs.trunc();
    let fraction = (abs - whole).normalize();

    let digits = whole.normalize().to_string();
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 + 2);
    if negative {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if !fraction.is_zero() {
        // "0.25" -> ".25"
        let frac = fraction.to_string();
        out.push_str(frac.trim_start_matches('0'));
    }
    out
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pkr => write!(f, "PKR"),
            Self::Usd => write!(f, "USD"),
            Self::Eur => write!(f, "EUR"),
            Self::Inr => write!(f, "INR"),
            Self::Aed => write!(f, "AED"),
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PKR" => Ok(Self::Pkr),
            "USD" => Ok(Self::Usd),
            "EUR" => Ok(Self::Eur),
            "INR" => Ok(Self::Inr),
            "AED" => Ok(Self::Aed),
            _ => Err(format!("Unknown currency: {s}")),
        }
    }
}
