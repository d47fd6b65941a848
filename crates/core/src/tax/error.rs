//! Tax error types.

use cashdesk_shared::AppError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Tax-related errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaxError {
    /// A period figure is negative.
    #[error("Tax figure '{field}' cannot be negative, got {value}")]
    NegativeFigure {
        /// Which figure.
        field: &'static str,
        /// The rejected value.
        value: Decimal,
    },

    /// Summing periods left the range a `Decimal` can hold.
    #[error("Tax figure '{field}' exceeds the representable range")]
    Overflow {
        /// Which figure.
        field: &'static str,
    },
}

impl TaxError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NegativeFigure { .. } => "NEGATIVE_TAX_FIGURE",
            Self::Overflow { .. } => "AMOUNT_OVERFLOW",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::NegativeFigure { .. } | Self::Overflow { .. } => 422,
        }
    }
}

impl From<TaxError> for AppError {
    fn from(err: TaxError) -> Self {
        Self::BusinessRule {
            code: err.error_code(),
            message: err.to_string(),
        }
    }
}
