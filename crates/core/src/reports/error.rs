//! Report error types.

use cashdesk_shared::AppError;
use thiserror::Error;

/// Errors that can occur during report assembly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// The report identifier is not one of the known report types.
    #[error("Unsupported report type: {0}")]
    UnsupportedReportType(String),
}

impl ReportError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedReportType(_) => "UNSUPPORTED_REPORT_TYPE",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::UnsupportedReportType(_) => 400,
        }
    }
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        Self::Unsupported(err.to_string())
    }
}
