//! Last-good-answer fallback using Moka.
//!
//! Every successful read is remembered per request key. When the wrapped
//! provider reports `Unavailable`, the remembered answer is served instead and
//! tagged as coming from the cache. Other errors are never masked.
//!
//! Writes bump a generation counter before dropping remembered answers. A read
//! that overlapped a write does not keep its answer, so a later fallback never
//! serves data from before the write.

use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::NaiveDate;
use moka::sync::Cache;
use rust_decimal::Decimal;
use serde::Serialize;

use super::error::ProviderError;
use super::types::{DashboardSource, DateRange, ImportReceipt, SalesImportBatch};
use super::CashDataProvider;
use crate::cash::{CashDay, NewCashTransaction, TransactionRecord};
use crate::tax::{LabelledTaxPeriod, TaxPeriod};

/// Default cache capacity per request kind.
const DEFAULT_CACHE_CAPACITY: u64 = 256;

/// Default time-to-live for a remembered answer (15 minutes).
const DEFAULT_TTL_SECS: u64 = 900;

/// Where an answer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// Fresh from the provider.
    Live,
    /// Remembered from an earlier successful read.
    Cache,
}

/// A provider answer tagged with its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched<T> {
    /// The answer.
    pub data: T,
    /// Where it came from.
    pub source: DataSource,
}

impl<T> Fetched<T> {
    const fn live(data: T) -> Self {
        Self {
            data,
            source: DataSource::Live,
        }
    }

    const fn cached(data: T) -> Self {
        Self {
            data,
            source: DataSource::Cache,
        }
    }

    /// Returns true if the answer was served from the cache.
    #[must_use]
    pub fn is_cached(&self) -> bool {
        self.source == DataSource::Cache
    }
}

/// Provider wrapper with cached fallback for reads.
#[derive(Clone)]
pub struct CachedProvider {
    inner: Arc<dyn CashDataProvider>,
    dashboards: Cache<NaiveDate, Arc<DashboardSource>>,
    days: Cache<NaiveDate, CashDay>,
    logs: Cache<Option<DateRange>, Arc<Vec<TransactionRecord>>>,
    tax: Cache<DateRange, TaxPeriod>,
    breakdowns: Cache<DateRange, Arc<Vec<LabelledTaxPeriod>>>,
    generation: Arc<AtomicU64>,
}

fn build_cache<K, V>(max_capacity: u64, ttl: Duration) -> Cache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    Cache::builder()
        .max_capacity(max_capacity)
        .time_to_live(ttl)
        .build()
}

fn read_through<K, V>(
    cache: &Cache<K, V>,
    generation: &AtomicU64,
    key: K,
    what: &'static str,
    fetch: impl FnOnce() -> Result<V, ProviderError>,
) -> Result<Fetched<V>, ProviderError>
where
    K: Clone + Hash + Eq + Send + Sync + Debug + 'static,
    V: Clone + Send + Sync + 'static,
{
    let started = generation.load(Ordering::SeqCst);
    match fetch() {
        Ok(value) => {
            cache.insert(key.clone(), value.clone());
            // Re-checked after the insert: a write that bumps later also
            // invalidates later, so it clears this entry itself.
            if generation.load(Ordering::SeqCst) != started {
                tracing::debug!(
                    request = what,
                    ?key,
                    "Read overlapped a write, not remembered"
                );
                cache.invalidate(&key);
            }
            Ok(Fetched::live(value))
        }
        Err(ProviderError::Unavailable(reason)) => {
            if let Some(value) = cache.get(&key) {
                tracing::warn!(
                    request = what,
                    ?key,
                    %reason,
                    "Provider unavailable, serving cached answer"
                );
                Ok(Fetched::cached(value))
            } else {
                tracing::warn!(
                    request = what,
                    ?key,
                    %reason,
                    "Provider unavailable, no cached answer"
                );
                Err(ProviderError::Unavailable(reason))
            }
        }
        Err(other) => Err(other),
    }
}

impl CachedProvider {
    /// Wraps `inner` with default cache settings.
    ///
    /// Default: 256 entries per request kind, 15 minute TTL.
    #[must_use]
    pub fn new(inner: Arc<dyn CashDataProvider>) -> Self {
        Self::with_config(inner, DEFAULT_CACHE_CAPACITY, DEFAULT_TTL_SECS)
    }

    /// Wraps `inner` with custom cache settings.
    ///
    /// # Arguments
    ///
    /// * `max_capacity` - Maximum remembered answers per request kind
    /// * `ttl_secs` - Time-to-live in seconds for each answer
    #[must_use]
    pub fn with_config(
        inner: Arc<dyn CashDataProvider>,
        max_capacity: u64,
        ttl_secs: u64,
    ) -> Self {
        let ttl = Duration::from_secs(ttl_secs);
        Self {
            inner,
            dashboards: build_cache(max_capacity, ttl),
            days: build_cache(max_capacity, ttl),
            logs: build_cache(max_capacity, ttl),
            tax: build_cache(max_capacity, ttl),
            breakdowns: build_cache(max_capacity, ttl),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Dashboard inputs for `date`.
    ///
    /// # Errors
    ///
    /// Returns `Unavailable` only when the provider is down and nothing is
    /// cached for `date`; other provider errors pass through.
    pub fn dashboard_source(
        &self,
        date: NaiveDate,
    ) -> Result<Fetched<Arc<DashboardSource>>, ProviderError> {
        read_through(&self.dashboards, &self.generation, date, "dashboard", || {
            self.inner.dashboard_source(date).map(Arc::new)
        })
    }

    /// The business day for `date`.
    ///
    /// # Errors
    ///
    /// See [`CachedProvider::dashboard_source`].
    pub fn cash_day(&self, date: NaiveDate) -> Result<Fetched<CashDay>, ProviderError> {
        read_through(&self.days, &self.generation, date, "cash_day", || {
            self.inner.cash_day(date)
        })
    }

    /// Cash records in `range`.
    ///
    /// # Errors
    ///
    /// See [`CachedProvider::dashboard_source`].
    pub fn cash_logs(
        &self,
        range: Option<DateRange>,
    ) -> Result<Fetched<Arc<Vec<TransactionRecord>>>, ProviderError> {
        read_through(&self.logs, &self.generation, range, "cash_logs", || {
            self.inner.cash_logs(range).map(Arc::new)
        })
    }

    /// Tax figures for `range`.
    ///
    /// # Errors
    ///
    /// See [`CachedProvider::dashboard_source`].
    pub fn tax_period(&self, range: DateRange) -> Result<Fetched<TaxPeriod>, ProviderError> {
        read_through(&self.tax, &self.generation, range, "tax_period", || {
            self.inner.tax_period(range)
        })
    }

    /// Monthly tax figures overlapping `range`.
    ///
    /// # Errors
    ///
    /// See [`CachedProvider::dashboard_source`].
    pub fn tax_breakdown(
        &self,
        range: DateRange,
    ) -> Result<Fetched<Arc<Vec<LabelledTaxPeriod>>>, ProviderError> {
        read_through(&self.breakdowns, &self.generation, range, "tax_breakdown", || {
            self.inner.tax_breakdown(range).map(Arc::new)
        })
    }

    /// Submits a cash transaction. Remembered reads are dropped on success.
    ///
    /// # Errors
    ///
    /// Passes through every provider error; writes never fall back.
    pub fn submit_cash_transaction(
        &self,
        new: NewCashTransaction,
    ) -> Result<TransactionRecord, ProviderError> {
        let record = self.inner.submit_cash_transaction(new)?;
        self.invalidate_all();
        Ok(record)
    }

    /// Submits a sales import. Remembered reads are dropped on success.
    ///
    /// # Errors
    ///
    /// Passes through every provider error; writes never fall back.
    pub fn submit_sales_import(
        &self,
        batch: SalesImportBatch,
    ) -> Result<ImportReceipt, ProviderError> {
        let receipt = self.inner.submit_sales_import(batch)?;
        self.invalidate_all();
        Ok(receipt)
    }

    /// Edits the opening balance. Remembered reads are dropped on success.
    ///
    /// # Errors
    ///
    /// Passes through every provider error; writes never fall back.
    pub fn set_opening_balance(
        &self,
        date: NaiveDate,
        amount: Decimal,
    ) -> Result<CashDay, ProviderError> {
        let day = self.inner.set_opening_balance(date, amount)?;
        self.invalidate_all();
        Ok(day)
    }

    /// Drops every remembered answer, including any a read in flight is
    /// about to store.
    pub fn invalidate_all(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.dashboards.invalidate_all();
        self.days.invalidate_all();
        self.logs.invalidate_all();
        self.tax.invalidate_all();
        self.breakdowns.invalidate_all();
    }
}
