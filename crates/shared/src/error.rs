//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Module errors in `cashdesk-core` are folded into one of these variants at
/// the HTTP boundary; the code carried by the module error is kept so
/// clients can still tell `MALFORMED_RECORD` from other rule violations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request input could not be parsed or is out of range.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Data violates a financial invariant.
    #[error("Business rule violation: {code}: {message}")]
    BusinessRule {
        /// Machine-readable code of the originating module error.
        code: &'static str,
        /// Human-readable description.
        message: String,
    },

    /// Requested operation or identifier is not supported.
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// The data provider could not be reached and no fallback was available.
    #[error("Data provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::Unsupported(_) => 400,
            Self::BusinessRule { .. } => 422,
            Self::ProviderUnavailable(_) => 503,
            Self::Configuration(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::BusinessRule { code, .. } => *code,
            Self::Unsupported(_) => "UNSUPPORTED",
            Self::ProviderUnavailable(_) => "PROVIDER_UNAVAILABLE",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(code: &'static str) -> AppError {
        AppError::BusinessRule {
            code,
            message: "msg".into(),
        }
    }

    #[test]
    fn test_error_status_codes() {
        assert_eq!(AppError::Validation(String::new()).status_code(), 400);
        assert_eq!(rule("MALFORMED_RECORD").status_code(), 422);
        assert_eq!(AppError::Unsupported(String::new()).status_code(), 400);
        assert_eq!(
            AppError::ProviderUnavailable(String::new()).status_code(),
            503
        );
        assert_eq!(AppError::Configuration(String::new()).status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::Validation(String::new()).error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(rule("MALFORMED_RECORD").error_code(), "MALFORMED_RECORD");
        assert_eq!(
            AppError::Unsupported(String::new()).error_code(),
            "UNSUPPORTED"
        );
        assert_eq!(
            AppError::ProviderUnavailable(String::new()).error_code(),
            "PROVIDER_UNAVAILABLE"
        );
        assert_eq!(
            AppError::Configuration(String::new()).error_code(),
            "CONFIGURATION_ERROR"
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::Validation("msg".into()).to_string(),
            "Validation error: msg"
        );
        assert_eq!(
            rule("MALFORMED_RECORD").to_string(),
            "Business rule violation: MALFORMED_RECORD: msg"
        );
        assert_eq!(
            AppError::ProviderUnavailable("msg".into()).to_string(),
            "Data provider unavailable: msg"
        );
        assert_eq!(
            AppError::Configuration("msg".into()).to_string(),
            "Configuration error: msg"
        );
    }
}
