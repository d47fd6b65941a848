//! Cash error types.
//!
//! A malformed record is a data-integrity failure: it is raised before any
//! total is produced and must never be turned into a zero figure.

use cashdesk_shared::AppError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Why a transaction record was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedReason {
    /// Amount is zero or negative.
    #[error("amount must be greater than zero, got {0}")]
    NonPositiveAmount(Decimal),

    /// Direction is neither `in` nor `out`.
    #[error("unrecognized transaction type '{0}'")]
    UnknownDirection(String),

    /// A required text field is empty.
    #[error("missing required field '{0}'")]
    MissingField(&'static str),
}

/// Errors that can occur while aggregating or filtering cash records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CashError {
    /// A record violates the amount/type invariant.
    #[error("Malformed record {record}: {reason}")]
    MalformedRecord {
        /// Identifier (or reference, for unsaved records) of the offending record.
        record: String,
        /// What is wrong with it.
        reason: MalformedReason,
    },

    /// A filter query value could not be parsed.
    #[error("Invalid {field} filter '{value}'")]
    InvalidQuery {
        /// Query field name.
        field: &'static str,
        /// Rejected value.
        value: String,
    },

    /// A running total left the range a `Decimal` can hold.
    #[error("Cash total '{total}' exceeds the representable range")]
    Overflow {
        /// Which total overflowed.
        total: &'static str,
    },
}

impl CashError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MalformedRecord { .. } => "MALFORMED_RECORD",
            Self::InvalidQuery { .. } => "INVALID_QUERY",
            Self::Overflow { .. } => "AMOUNT_OVERFLOW",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::MalformedRecord { .. } | Self::Overflow { .. } => 422,
            Self::InvalidQuery { .. } => 400,
        }
    }
}

impl From<CashError> for AppError {
    fn from(err: CashError) -> Self {
        match err {
            CashError::MalformedRecord { .. } | CashError::Overflow { .. } => Self::BusinessRule {
                code: err.error_code(),
                message: err.to_string(),
            },
            CashError::InvalidQuery { .. } => Self::Validation(err.to_string()),
        }
    }
}
