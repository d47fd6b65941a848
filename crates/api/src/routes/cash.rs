//! Cash register and cash log routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use cashdesk_core::cash::{
    CashDay, CashError, DateBucket, LedgerSummary, NewCashTransaction, TransactionQuery,
    TransactionRecord, TypeFilter, aggregate, filter,
};
use cashdesk_core::provider::{DataSource, DateRange};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::combined_source;
use crate::AppState;
use crate::error::{error_response, parse_date};

/// Creates the cash routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/cash/logs", get(list_cash_logs).post(create_cash_log))
        .route("/cash/register", get(get_cash_register))
        .route("/cash/opening-balance", put(set_opening_balance))
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Query parameters for the cash log page.
#[derive(Debug, Default, Deserialize)]
pub struct CashLogQuery {
    /// Free-text search.
    pub search: Option<String>,
    /// `all`, `in` or `out`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// `all`, `today`, `yesterday`, `week` or `month`.
    pub range: Option<String>,
}

/// Query parameters for the cash register page.
#[derive(Debug, Deserialize)]
pub struct CashRegisterQuery {
    /// Business date (`YYYY-MM-DD`); today when absent.
    pub date: Option<String>,
}

/// Request body for an opening balance edit.
#[derive(Debug, Deserialize)]
pub struct OpeningBalanceRequest {
    /// New opening balance. May be negative.
    pub amount: Decimal,
    /// Business date; today when absent.
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

// ============================================================================
// Response Types
// ============================================================================

/// Filtered cash log with totals.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CashLogResponse {
    /// Matching records in log order.
    pub transactions: Vec<TransactionRecord>,
    /// Totals over the matching records, from today's opening balance.
    pub summary: LedgerSummary,
    /// Whether the inputs were live or cached.
    pub source: DataSource,
}

/// One business day on the register.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CashRegisterResponse {
    /// The day and its opening balance.
    pub cash_day: CashDay,
    /// The day's totals.
    pub summary: LedgerSummary,
    /// The day's records in log order.
    pub transactions: Vec<TransactionRecord>,
    /// Whether the inputs were live or cached.
    pub source: DataSource,
}

// ============================================================================
// Helper Functions
// ============================================================================

fn parse_query(query: &CashLogQuery) -> Result<TransactionQuery, CashError> {
    let direction = match query.kind.as_deref() {
        Some(kind) => kind.parse::<TypeFilter>()?,
        None => TypeFilter::All,
    };
    let bucket = match query.range.as_deref() {
        Some(range) => range.parse::<DateBucket>()?,
        None => DateBucket::All,
    };

    Ok(TransactionQuery::all()
        .with_text(query.search.clone().unwrap_or_default())
        .with_direction(direction)
        .with_date_bucket(bucket))
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /cash/logs
async fn list_cash_logs(
    State(state): State<AppState>,
    Query(query): Query<CashLogQuery>,
) -> impl IntoResponse {
    let query = match parse_query(&query) {
        Ok(query) => query,
        Err(e) => return error_response(e),
    };

    let logs = match state.provider.cash_logs(None) {
        Ok(logs) => logs,
        Err(e) => return error_response(e),
    };
    let today = match state.provider.cash_day(state.today()) {
        Ok(day) => day,
        Err(e) => return error_response(e),
    };

    let matched = match filter(&logs.data, &query, &state.now()) {
        Ok(matched) => matched,
        Err(e) => return error_response(e),
    };
    let summary = match aggregate(matched.iter().copied(), today.data.opening_balance()) {
        Ok(summary) => summary,
        Err(e) => return error_response(e),
    };

    Json(CashLogResponse {
        transactions: matched.into_iter().cloned().collect(),
        summary,
        source: combined_source(&[logs.source, today.source]),
    })
    .into_response()
}

/// POST /cash/logs
async fn create_cash_log(
    State(state): State<AppState>,
    Json(new): Json<NewCashTransaction>,
) -> impl IntoResponse {
    match state.provider.submit_cash_transaction(new) {
        Ok(record) => {
            info!(
                id = %record.id,
                direction = %record.direction,
                amount = %record.amount,
                user = %record.user,
                "Cash transaction recorded"
            );
            (StatusCode::CREATED, Json(record)).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// GET /cash/register
async fn get_cash_register(
    State(state): State<AppState>,
    Query(query): Query<CashRegisterQuery>,
) -> impl IntoResponse {
    let date = match parse_date("date", query.date.as_deref()) {
        Ok(date) => date.unwrap_or_else(|| state.today()),
        Err(e) => return error_response(e),
    };

    let day = match state.provider.cash_day(date) {
        Ok(day) => day,
        Err(e) => return error_response(e),
    };
    let logs = match state.provider.cash_logs(Some(DateRange::day(date))) {
        Ok(logs) => logs,
        Err(e) => return error_response(e),
    };

    match day.data.summarize(logs.data.iter()) {
        Ok(summary) => Json(CashRegisterResponse {
            cash_day: day.data,
            summary,
            transactions: logs.data.to_vec(),
            source: combined_source(&[day.source, logs.source]),
        })
        .into_response(),
        Err(e) => error_response(e),
    }
}

/// PUT /cash/opening-balance
async fn set_opening_balance(
    State(state): State<AppState>,
    Json(request): Json<OpeningBalanceRequest>,
) -> impl IntoResponse {
    let date = request.date.unwrap_or_else(|| state.today());

    match state.provider.set_opening_balance(date, request.amount) {
        Ok(day) => {
            info!(%date, amount = %request.amount, "Opening balance edited");
            Json(day).into_response()
        }
        Err(e) => error_response(e),
    }
}
