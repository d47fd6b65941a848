//! Provider error types.

use cashdesk_shared::AppError;
use thiserror::Error;

use crate::cash::CashError;
use crate::tax::TaxError;

/// Errors returned by a data provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The provider could not be reached or failed to answer.
    #[error("Data provider unavailable: {0}")]
    Unavailable(String),

    /// The provider refused a submission.
    #[error("Submission rejected: {0}")]
    Rejected(String),

    /// The provider returned or was sent a malformed cash record.
    #[error(transparent)]
    Malformed(#[from] CashError),

    /// The provider returned or was sent invalid tax figures.
    #[error(transparent)]
    InvalidTax(#[from] TaxError),
}

impl ProviderError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unavailable(_) => "PROVIDER_UNAVAILABLE",
            Self::Rejected(_) => "REJECTED",
            Self::Malformed(e) => e.error_code(),
            Self::InvalidTax(e) => e.error_code(),
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::Unavailable(_) => 503,
            Self::Rejected(_) => 400,
            Self::Malformed(e) => e.http_status_code(),
            Self::InvalidTax(e) => e.http_status_code(),
        }
    }
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Unavailable(msg) => Self::ProviderUnavailable(msg),
            ProviderError::Rejected(msg) => Self::Validation(msg),
            ProviderError::Malformed(e) => e.into(),
            ProviderError::InvalidTax(e) => e.into(),
        }
    }
}
