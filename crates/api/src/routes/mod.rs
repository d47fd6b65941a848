//! API route definitions.

use axum::Router;
use cashdesk_core::provider::DataSource;

use crate::AppState;

pub mod cash;
pub mod dashboard;
pub mod health;
pub mod reports;
pub mod sales;
pub mod tax;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(dashboard::routes())
        .merge(cash::routes())
        .merge(sales::routes())
        .merge(tax::routes())
        .merge(reports::routes())
}

/// `Cache` if any part of a response was served from the cache.
pub(crate) fn combined_source(sources: &[DataSource]) -> DataSource {
    if sources.contains(&DataSource::Cache) {
        DataSource::Cache
    } else {
        DataSource::Live
    }
}
