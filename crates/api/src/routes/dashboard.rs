//! Dashboard routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
};
use cashdesk_core::dashboard::DashboardSnapshot;
use cashdesk_core::provider::DataSource;
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::error::{error_response, parse_date};

/// Creates the dashboard routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(get_dashboard))
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Query parameters for the dashboard.
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// Business date (`YYYY-MM-DD`); today when absent.
    pub date: Option<String>,
}

// ============================================================================
// Response Types
// ============================================================================

/// Dashboard snapshot tagged with its data source.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    /// The snapshot.
    #[serde(flatten)]
    pub snapshot: DashboardSnapshot,
    /// Whether the inputs were live or cached.
    pub source: DataSource,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /dashboard
async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> impl IntoResponse {
    let date = match parse_date("date", query.date.as_deref()) {
        Ok(date) => date.unwrap_or_else(|| state.today()),
        Err(e) => return error_response(e),
    };

    let fetched = match state.provider.dashboard_source(date) {
        Ok(fetched) => fetched,
        Err(e) => return error_response(e),
    };

    let source = &fetched.data;
    match DashboardSnapshot::compute(
        state.currency,
        &source.cash_day,
        &source.records,
        source.sales_today,
        source.tax_month,
    ) {
        Ok(snapshot) => Json(DashboardResponse {
            snapshot,
            source: fetched.source,
        })
        .into_response(),
        Err(e) => error_response(e),
    }
}
