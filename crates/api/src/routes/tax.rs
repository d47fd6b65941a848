//! Tax overview routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
};
use cashdesk_core::provider::{DataSource, DateRange, ProviderError};
use cashdesk_core::tax::{TaxBreakdown, TaxComparison, TaxPeriod, TaxPeriodSummary, TaxService};
use cashdesk_shared::AppError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::combined_source;
use crate::AppState;
use crate::error::{error_response, parse_date};

/// Creates the tax routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/tax/summary", get(get_tax_summary))
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Query parameters for the tax summary.
#[derive(Debug, Deserialize)]
pub struct TaxSummaryQuery {
    /// First day (`YYYY-MM-DD`); first of the current month when absent.
    pub from: Option<String>,
    /// Last day (`YYYY-MM-DD`); today when absent.
    pub to: Option<String>,
}

// ============================================================================
// Response Types
// ============================================================================

/// Tax summary for a range against the preceding equal-length range.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxSummaryResponse {
    /// First day.
    pub from: NaiveDate,
    /// Last day.
    pub to: NaiveDate,
    /// Summary for the range.
    pub summary: TaxPeriodSummary,
    /// Summary for the preceding range, when it could be fetched.
    pub previous: Option<TaxPeriodSummary>,
    /// Change against the preceding range.
    pub comparison: TaxComparison,
    /// Month-by-month rows.
    pub breakdown: TaxBreakdown,
    /// From the start of the quarter containing `to`, through `to`.
    pub quarter_to_date: TaxPeriodSummary,
    /// From January 1 of the year containing `to`, through `to`.
    pub year_to_date: TaxPeriodSummary,
    /// Whether the inputs were live or cached.
    pub source: DataSource,
}

// ============================================================================
// Helper Functions
// ============================================================================

fn resolve_range(state: &AppState, query: &TaxSummaryQuery) -> Result<DateRange, AppError> {
    let today = state.today();
    let from = parse_date("from", query.from.as_deref())?
        .unwrap_or_else(|| DateRange::month_of(today).start());
    let to = parse_date("to", query.to.as_deref())?.unwrap_or(today);

    DateRange::new(from, to)
        .ok_or_else(|| AppError::Validation(format!("from {from} is after to {to}")))
}

/// Quarter-to-date and year-to-date summaries ending at `end`.
///
/// The year is the quarter folded together with the earlier quarters of the
/// same year.
fn rollups(
    state: &AppState,
    end: NaiveDate,
) -> Result<(TaxPeriodSummary, TaxPeriodSummary, Vec<DataSource>), AppError> {
    let quarter = DateRange::quarter_of(end);
    let quarter_to_date = quarter.through(end).unwrap_or(DateRange::day(end));
    let current = state.provider.tax_period(quarter_to_date)?;
    let mut sources = vec![current.source];

    let earlier_quarters = quarter
        .start()
        .pred_opt()
        .and_then(|last| DateRange::year_of(end).through(last));
    let earlier = match earlier_quarters {
        Some(range) => {
            let fetched = state.provider.tax_period(range)?;
            sources.push(fetched.source);
            fetched.data
        }
        None => TaxPeriod::default(),
    };

    let quarter_summary = TaxService::summarize(current.data)?;
    let year_summary = TaxService::summarize(current.data.combine(earlier)?)?;
    Ok((quarter_summary, year_summary, sources))
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /tax/summary
async fn get_tax_summary(
    State(state): State<AppState>,
    Query(query): Query<TaxSummaryQuery>,
) -> impl IntoResponse {
    let range = match resolve_range(&state, &query) {
        Ok(range) => range,
        Err(e) => return error_response(e),
    };

    let current = match state.provider.tax_period(range) {
        Ok(current) => current,
        Err(e) => return error_response(e),
    };
    let summary = match TaxService::summarize(current.data) {
        Ok(summary) => summary,
        Err(e) => return error_response(e),
    };

    // A missing comparison period degrades to "not applicable".
    let previous = match range.preceding().map(|prev| state.provider.tax_period(prev)) {
        None => None,
        Some(Ok(previous)) => Some(previous),
        Some(Err(ProviderError::Unavailable(reason))) => {
            warn!(%reason, "Previous tax period unavailable");
            None
        }
        Some(Err(e)) => return error_response(e),
    };
    let previous_summary = match previous.as_ref().map(|p| TaxService::summarize(p.data)) {
        None => None,
        Some(Ok(summary)) => Some(summary),
        Some(Err(e)) => return error_response(e),
    };
    let comparison = TaxService::compare_to_previous(&summary, previous_summary.as_ref());

    let rows = match state.provider.tax_breakdown(range) {
        Ok(rows) => rows,
        Err(e) => return error_response(e),
    };
    let breakdown = match TaxService::breakdown(&rows.data) {
        Ok(breakdown) => breakdown,
        Err(e) => return error_response(e),
    };

    let (quarter_to_date, year_to_date, rollup_sources) = match rollups(&state, range.end()) {
        Ok(rollups) => rollups,
        Err(e) => return error_response(e),
    };

    let mut sources = vec![current.source, rows.source];
    sources.extend(previous.map(|p| p.source));
    sources.extend(rollup_sources);

    Json(TaxSummaryResponse {
        from: range.start(),
        to: range.end(),
        summary,
        previous: previous_summary,
        comparison,
        breakdown,
        quarter_to_date,
        year_to_date,
        source: combined_source(&sources),
    })
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryProvider;
    use crate::test_support::{decimal, sale, send, test_state};
    use axum::http::{Method, StatusCode};
    use cashdesk_core::provider::{CashDataProvider, SaleKind, SaleLine, SalesImportBatch};
    use rust_decimal_macros::dec;

    fn app(state: AppState) -> Router {
        Router::new().merge(routes()).with_state(state)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn seed(store: &InMemoryProvider) {
        store
            .submit_sales_import(SalesImportBatch {
                source: "pos.csv".to_string(),
                lines: vec![
                    sale("INV-1", date(2025, 10, 10), dec!(220000), dec!(33000)),
                    sale("INV-2", date(2025, 11, 10), dec!(250000), dec!(37500)),
                    SaleLine {
                        invoice: "INV-2".to_string(),
                        date: date(2025, 11, 12),
                        taxable: dec!(33333.33),
                        tax: dec!(5000),
                        kind: SaleKind::Return,
                    },
                ],
            })
            .unwrap();
    }

    #[tokio::test]
    async fn test_month_to_date_summary() {
        let (state, store) = test_state();
        seed(&store);

        let (status, json) = send(app(state), Method::GET, "/tax/summary", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["from"], "2025-11-01");
        assert_eq!(json["to"], "2025-11-28");
        assert_eq!(json["summary"]["payable"], "32500");
        assert_eq!(decimal(&json["summary"]["effectiveRate"]), dec!(15));
        assert_eq!(json["breakdown"]["rows"][0]["label"], "November 2025");
        assert_eq!(json["source"], "live");
    }

    #[tokio::test]
    async fn test_comparison_against_preceding_range() {
        let (state, store) = test_state();
        seed(&store);

        let (status, json) = send(
            app(state),
            Method::GET,
            "/tax/summary?from=2025-11-01&to=2025-11-30",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        // Preceding range is 2025-10-02..=2025-10-31.
        assert_eq!(json["previous"]["taxable"], "220000");
        assert_eq!(json["comparison"]["taxableChange"]["status"], "change");
        assert_eq!(json["comparison"]["taxableChange"]["percent"], "13.6");
        assert_eq!(json["comparison"]["taxableChange"]["direction"], "up");
        assert_eq!(json["comparison"]["reversedChange"]["status"], "not_applicable");
    }

    #[tokio::test]
    async fn test_quarter_and_year_to_date() {
        let (state, store) = test_state();
        seed(&store);
        store
            .submit_sales_import(SalesImportBatch {
                source: "q1.csv".to_string(),
                lines: vec![sale("INV-0", date(2025, 2, 14), dec!(100000), dec!(15000))],
            })
            .unwrap();

        let (status, json) = send(app(state), Method::GET, "/tax/summary", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["summary"]["taxable"], "250000");
        assert_eq!(json["quarterToDate"]["taxable"], "470000");
        assert_eq!(json["quarterToDate"]["payable"], "65500");
        assert_eq!(json["yearToDate"]["taxable"], "570000");
        assert_eq!(json["yearToDate"]["collected"], "85500");
        assert_eq!(json["yearToDate"]["payable"], "80500");
    }

    #[tokio::test]
    async fn test_rollups_follow_the_range_end() {
        let (state, store) = test_state();
        seed(&store);

        let (status, json) = send(
            app(state),
            Method::GET,
            "/tax/summary?from=2025-09-01&to=2025-09-30",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        // Q3 and January through September hold no sales.
        assert_eq!(json["quarterToDate"]["taxable"], "0");
        assert_eq!(json["yearToDate"]["taxable"], "0");
    }

    #[tokio::test]
    async fn test_inverted_range_is_400() {
        let (state, _) = test_state();
        let (status, json) = send(
            app(state),
            Method::GET,
            "/tax/summary?from=2025-11-30&to=2025-11-01",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_empty_range_is_zero_not_error() {
        let (state, _) = test_state();
        let (status, json) = send(app(state), Method::GET, "/tax/summary", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["summary"]["payable"], "0");
        assert!(json["summary"]["effectiveRate"].is_null());
        assert_eq!(json["comparison"]["collectedChange"]["status"], "not_applicable");
    }
}
