//! Sales import route.

use axum::{
    Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post,
};
use cashdesk_core::provider::SalesImportBatch;
use tracing::info;

use crate::AppState;
use crate::error::error_response;

/// Creates the sales routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/sales/import", post(import_sales))
}

/// POST /sales/import
async fn import_sales(
    State(state): State<AppState>,
    Json(batch): Json<SalesImportBatch>,
) -> impl IntoResponse {
    let source = batch.source.clone();

    match state.provider.submit_sales_import(batch) {
        Ok(receipt) => {
            info!(
                batch_id = %receipt.batch_id,
                %source,
                lines = receipt.lines_imported,
                taxable = %receipt.totals.taxable,
                "Sales import accepted"
            );
            (StatusCode::CREATED, Json(receipt)).into_response()
        }
        Err(e) => error_response(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{send, test_state};
    use axum::http::Method;
    use cashdesk_core::provider::{CashDataProvider, DateRange};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn app(state: AppState) -> Router {
        Router::new().merge(routes()).with_state(state)
    }

    #[tokio::test]
    async fn test_import_batch() {
        let (state, store) = test_state();
        let body = json!({
            "source": "pos-2025-11-28.csv",
            "lines": [
                {"invoice": "INV-1001", "date": "2025-11-28", "taxable": 10000, "tax": 1500},
                {"invoice": "INV-0990", "date": "2025-11-28", "taxable": 2000, "tax": 300, "kind": "return"}
            ]
        });

        let (status, json) = send(app(state), Method::POST, "/sales/import", Some(body)).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["linesImported"], 2);
        assert_eq!(json["totals"]["taxable"], "10000");
        assert_eq!(json["totals"]["reversed"], "300");

        let day = DateRange::day(NaiveDate::from_ymd_opt(2025, 11, 28).unwrap());
        assert_eq!(store.tax_period(day).unwrap().collected, dec!(1500));
    }

    #[tokio::test]
    async fn test_negative_tax_is_422() {
        let (state, _) = test_state();
        let body = json!({
            "source": "bad.csv",
            "lines": [{"invoice": "INV-1", "date": "2025-11-28", "taxable": 100, "tax": -15}]
        });

        let (status, json) = send(app(state), Method::POST, "/sales/import", Some(body)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["error"], "NEGATIVE_TAX_FIGURE");
    }

    #[tokio::test]
    async fn test_empty_batch_is_rejected() {
        let (state, _) = test_state();
        let body = json!({"source": "empty.csv", "lines": []});

        let (status, _) = send(app(state), Method::POST, "/sales/import", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
