//! Report routes.
//!
//! `POST /reports/export` formats caller-supplied data. `GET /reports/{type}`
//! builds the data from the provider first.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, post},
};
use cashdesk_core::cash::aggregate;
use cashdesk_core::provider::{DataSource, DateRange, ProviderError};
use cashdesk_core::reports::{
    FlatReportRecord, MonthlyPerformance, ReportData, ReportType, daily_report_data,
    tax_report_data,
};
use cashdesk_core::tax::TaxService;
use cashdesk_shared::AppError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::combined_source;
use crate::AppState;
use crate::error::{error_response, parse_date};

/// Creates the report routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reports/export", post(export_report))
        .route("/reports/{report_type}", get(generate_report))
}

// ============================================================================
// Request / Query Types
// ============================================================================

/// Request body for a report export.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    /// Report identifier (`daily`, `tax`, `monthly`, `compliance`).
    pub report_type: String,
    /// Flat key/value data in display order.
    #[serde(default)]
    pub data: ReportData,
}

/// Query parameters for a generated report.
#[derive(Debug, Deserialize)]
pub struct GenerateQuery {
    /// Business date (`YYYY-MM-DD`); today when absent.
    pub date: Option<String>,
}

// ============================================================================
// Response Types
// ============================================================================

/// A generated report tagged with its data source.
#[derive(Debug, Serialize)]
pub struct GeneratedReport {
    /// The report.
    #[serde(flatten)]
    pub report: FlatReportRecord,
    /// Whether the inputs were live or cached.
    pub source: DataSource,
}

// ============================================================================
// Helper Functions
// ============================================================================

fn month_label(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

fn daily_data(state: &AppState, date: NaiveDate) -> Result<(ReportData, DataSource), AppError> {
    let fetched = state.provider.dashboard_source(date)?;
    let source = &fetched.data;
    let ledger = source.cash_day.summarize(&source.records)?;
    Ok((
        daily_report_data(date, &ledger, source.sales_today),
        fetched.source,
    ))
}

fn tax_data(state: &AppState, date: NaiveDate) -> Result<(ReportData, DataSource), AppError> {
    let month = DateRange::month_of(date);
    let fetched = state.provider.tax_period(month)?;
    let summary = TaxService::summarize(fetched.data)?;
    Ok((
        tax_report_data(&month_label(date), &summary),
        fetched.source,
    ))
}

fn monthly_data(state: &AppState, date: NaiveDate) -> Result<(ReportData, DataSource), AppError> {
    let month = DateRange::month_of(date);
    let sales = state.provider.tax_period(month)?;
    let logs = state.provider.cash_logs(Some(month))?;
    let expenses = aggregate(logs.data.iter(), Decimal::ZERO)?.total_out();

    let mut sources = vec![sales.source, logs.source];
    let previous_sales = match month.start().pred_opt().map(DateRange::month_of) {
        None => None,
        Some(previous) => match state.provider.tax_period(previous) {
            Ok(fetched) => {
                sources.push(fetched.source);
                Some(fetched.data.taxable)
            }
            Err(ProviderError::Unavailable(reason)) => {
                warn!(%reason, "Previous month sales unavailable");
                None
            }
            Err(e) => return Err(e.into()),
        },
    };

    let performance = MonthlyPerformance {
        month: month_label(date),
        total_sales: sales.data.taxable,
        total_expenses: expenses,
        previous_sales,
    };
    Ok((performance.to_report_data(), combined_source(&sources)))
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST /reports/export
async fn export_report(
    State(state): State<AppState>,
    Json(request): Json<ExportRequest>,
) -> impl IntoResponse {
    match state.reports.assemble(&request.report_type, &request.data) {
        Ok(report) => {
            info!(
                report_type = %report.report_type,
                entries = report.entries.len(),
                "Report exported"
            );
            Json(report).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// GET /reports/{report_type}
async fn generate_report(
    State(state): State<AppState>,
    Path(report_type): Path<String>,
    Query(query): Query<GenerateQuery>,
) -> impl IntoResponse {
    let report_type = match report_type.parse::<ReportType>() {
        Ok(report_type) => report_type,
        Err(e) => return error_response(e),
    };
    let date = match parse_date("date", query.date.as_deref()) {
        Ok(date) => date.unwrap_or_else(|| state.today()),
        Err(e) => return error_response(e),
    };

    let built = match report_type {
        ReportType::Daily => daily_data(&state, date),
        ReportType::Tax => tax_data(&state, date),
        ReportType::Monthly => monthly_data(&state, date),
        ReportType::Compliance => Err(AppError::Unsupported(
            "compliance report requires filing history".to_string(),
        )),
    };

    match built {
        Ok((data, source)) => Json(GeneratedReport {
            report: state.reports.assemble_typed(report_type, &data),
            source,
        })
        .into_response(),
        Err(e) => error_response(e),
    }
}
