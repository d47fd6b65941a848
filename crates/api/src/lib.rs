//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for the dashboard, cash register, tax and reports pages
//! - JSON error responses mapped from core errors
//! - An in-memory data provider used by the server binary

pub mod error;
pub mod routes;
pub mod store;

use std::sync::Arc;

use axum::Router;
use cashdesk_core::provider::CachedProvider;
use cashdesk_core::reports::ReportAssembler;
use cashdesk_shared::types::Currency;
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Data provider with last-good-answer fallback.
    pub provider: Arc<CachedProvider>,
    /// Report assembler bound to the display currency.
    pub reports: ReportAssembler,
    /// Display currency.
    pub currency: Currency,
    /// Zone the business day is counted in.
    pub timezone: Tz,
    /// Source of the current instant.
    pub clock: fn() -> DateTime<Utc>,
}

impl AppState {
    /// Creates state reading the system clock.
    #[must_use]
    pub fn new(provider: Arc<CachedProvider>, currency: Currency, timezone: Tz) -> Self {
        Self {
            provider,
            reports: ReportAssembler::new(currency),
            currency,
            timezone,
            clock: Utc::now,
        }
    }

    /// Replaces the clock.
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    /// The current instant in the business zone.
    #[must_use]
    pub fn now(&self) -> DateTime<Tz> {
        (self.clock)().with_timezone(&self.timezone)
    }

    /// Today's business date.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod test_support;
