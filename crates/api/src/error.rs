//! JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use cashdesk_shared::AppError;
use chrono::NaiveDate;
use serde_json::json;
use tracing::{error, warn};

/// Renders an error as `{ "error": code, "message": text }`.
///
/// Server-side failures are logged at error level, client errors at warn.
pub fn error_response(err: impl Into<AppError>) -> Response {
    let err = err.into();
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if status.is_server_error() {
        error!(error = %err, code = err.error_code(), "Request failed");
    } else {
        warn!(error = %err, code = err.error_code(), "Request rejected");
    }

    (
        status,
        Json(json!({
            "error": err.error_code(),
            "message": err.to_string()
        })),
    )
        .into_response()
}

/// Parses an optional `YYYY-MM-DD` query value.
pub(crate) fn parse_date(field: &str, value: Option<&str>) -> Result<Option<NaiveDate>, AppError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| AppError::Validation(format!("{field}: expected YYYY-MM-DD, got '{raw}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cashdesk_core::cash::CashError;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn test_query_error_body() {
        let response = error_response(CashError::InvalidQuery {
            field: "type",
            value: "sideways".to_string(),
        });
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "VALIDATION_ERROR");
        assert!(json["message"].as_str().unwrap().contains("sideways"));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("date", None).unwrap(), None);
        assert_eq!(parse_date("date", Some(" ")).unwrap(), None);
        assert_eq!(
            parse_date("date", Some("2025-11-28")).unwrap(),
            NaiveDate::from_ymd_opt(2025, 11, 28)
        );
        assert!(matches!(
            parse_date("from", Some("28/11/2025")),
            Err(AppError::Validation(_))
        ));
    }
}
