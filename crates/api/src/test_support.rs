//! Shared fixtures for route tests.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use cashdesk_core::cash::{CashDay, NewCashTransaction, TransactionRecord};
use cashdesk_core::provider::{
    CachedProvider, CashDataProvider, DashboardSource, DateRange, ImportReceipt, ProviderError,
    SaleKind, SaleLine, SalesImportBatch,
};
use cashdesk_core::tax::{LabelledTaxPeriod, TaxPeriod};
use cashdesk_shared::types::Currency;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;
use tower::ServiceExt;

use crate::AppState;
use crate::store::InMemoryProvider;

/// 2025-11-28 14:00 in Karachi, a Friday.
pub(crate) fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 11, 28, 9, 0, 0).unwrap()
}

pub(crate) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 11, 28).unwrap()
}

/// State over an empty store opening at 100,000.
pub(crate) fn test_state() -> (AppState, Arc<InMemoryProvider>) {
    let store = Arc::new(
        InMemoryProvider::new(chrono_tz::Asia::Karachi, dec!(100000)).with_clock(fixed_now),
    );
    let provider = Arc::new(CachedProvider::new(store.clone()));
    let state = AppState::new(provider, Currency::Pkr, chrono_tz::Asia::Karachi)
        .with_clock(fixed_now);
    (state, store)
}

/// State over a provider that is always down.
pub(crate) fn down_state() -> AppState {
    let provider = Arc::new(CachedProvider::new(Arc::new(DownProvider)));
    AppState::new(provider, Currency::Pkr, chrono_tz::Asia::Karachi).with_clock(fixed_now)
}

pub(crate) fn cash(kind: &str, amount: Decimal, minutes_before_now: i64) -> NewCashTransaction {
    NewCashTransaction {
        direction: kind.to_string(),
        amount,
        reason: "Counter".to_string(),
        description: None,
        user: "Ayesha Khan".to_string(),
        user_role: "Cashier".to_string(),
        reference: None,
        status: None,
        timestamp: Some(fixed_now() - chrono::Duration::minutes(minutes_before_now)),
    }
}

/// Seeds in 15,000, out 4,000, in 25,000 for today.
pub(crate) fn seed_day(store: &InMemoryProvider) {
    for (i, (kind, amount)) in [("in", dec!(15000)), ("out", dec!(4000)), ("in", dec!(25000))]
        .into_iter()
        .enumerate()
    {
        store
            .submit_cash_transaction(cash(kind, amount, 60 - i as i64))
            .unwrap();
    }
}

pub(crate) fn sale(invoice: &str, date: NaiveDate, taxable: Decimal, tax: Decimal) -> SaleLine {
    SaleLine {
        invoice: invoice.to_string(),
        date,
        taxable,
        tax,
        kind: SaleKind::Sale,
    }
}

/// Sends a request and decodes the JSON body (`Null` when empty).
pub(crate) async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let body = body.map_or_else(Body::empty, |v| Body::from(v.to_string()));
    dispatch(app, method, uri, body).await
}

/// Like [`send`], but posts `body` verbatim so key order is preserved.
pub(crate) async fn send_text(
    app: Router,
    method: Method,
    uri: &str,
    body: &str,
) -> (StatusCode, Value) {
    dispatch(app, method, uri, Body::from(body.to_string())).await
}

async fn dispatch(app: Router, method: Method, uri: &str, body: Body) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(body)
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

struct DownProvider;

fn down<T>() -> Result<T, ProviderError> {
    Err(ProviderError::Unavailable("connection refused".to_string()))
}

impl CashDataProvider for DownProvider {
    fn dashboard_source(&self, _date: NaiveDate) -> Result<DashboardSource, ProviderError> {
        down()
    }

    fn cash_day(&self, _date: NaiveDate) -> Result<CashDay, ProviderError> {
        down()
    }

    fn cash_logs(
        &self,
        _range: Option<DateRange>,
    ) -> Result<Vec<TransactionRecord>, ProviderError> {
        down()
    }

    fn tax_period(&self, _range: DateRange) -> Result<TaxPeriod, ProviderError> {
        down()
    }

    fn tax_breakdown(&self, _range: DateRange) -> Result<Vec<LabelledTaxPeriod>, ProviderError> {
        down()
    }

    fn submit_cash_transaction(
        &self,
        _new: NewCashTransaction,
    ) -> Result<TransactionRecord, ProviderError> {
        down()
    }

    fn submit_sales_import(
        &self,
        _batch: SalesImportBatch,
    ) -> Result<ImportReceipt, ProviderError> {
        down()
    }

    fn set_opening_balance(
        &self,
        _date: NaiveDate,
        _amount: Decimal,
    ) -> Result<CashDay, ProviderError> {
        down()
    }
}

/// Reads a decimal serialized as a JSON string.
pub(crate) fn decimal(value: &Value) -> Decimal {
    value.as_str().unwrap().parse().unwrap()
}
