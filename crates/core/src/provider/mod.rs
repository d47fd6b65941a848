//! Data provider boundary.
//!
//! The computation modules never fetch data themselves. A
//! [`CashDataProvider`] supplies records and period figures, and
//! [`CachedProvider`] keeps the last good answer per request so a caller can
//! fall back to it when the provider is unavailable.

pub mod cache;
pub mod error;
pub mod types;

pub use cache::{CachedProvider, DataSource, Fetched};
pub use error::ProviderError;
pub use types::{DashboardSource, DateRange, ImportReceipt, SaleKind, SaleLine, SalesImportBatch};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::cash::{CashDay, NewCashTransaction, TransactionRecord};
use crate::tax::{LabelledTaxPeriod, TaxPeriod};

/// Source of cash records and tax figures.
///
/// Implementations validate what they store; callers still validate what
/// they read. An empty collection is a valid answer, never an error.
pub trait CashDataProvider: Send + Sync {
    /// Inputs for the dashboard of `date`.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Unavailable` if the provider cannot answer.
    fn dashboard_source(&self, date: NaiveDate) -> Result<DashboardSource, ProviderError>;

    /// The business day for `date`, with its opening balance.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Unavailable` if the provider cannot answer.
    fn cash_day(&self, date: NaiveDate) -> Result<CashDay, ProviderError>;

    /// Cash records, optionally restricted to a date range. Input order is
    /// the provider's log order.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Unavailable` if the provider cannot answer.
    fn cash_logs(&self, range: Option<DateRange>)
    -> Result<Vec<TransactionRecord>, ProviderError>;

    /// Tax figures for a date range.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Unavailable` if the provider cannot answer.
    fn tax_period(&self, range: DateRange) -> Result<TaxPeriod, ProviderError>;

    /// Tax figures for each calendar month overlapping `range`.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Unavailable` if the provider cannot answer.
    fn tax_breakdown(&self, range: DateRange) -> Result<Vec<LabelledTaxPeriod>, ProviderError>;

    /// Stores a new cash transaction and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Malformed` for an invalid submission, or
    /// `ProviderError::Unavailable` if the provider cannot answer.
    fn submit_cash_transaction(
        &self,
        new: NewCashTransaction,
    ) -> Result<TransactionRecord, ProviderError>;

    /// Stores a batch of sale lines.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Rejected` for an empty batch,
    /// `ProviderError::InvalidTax` for negative figures, or
    /// `ProviderError::Unavailable` if the provider cannot answer.
    fn submit_sales_import(&self, batch: SalesImportBatch) -> Result<ImportReceipt, ProviderError>;

    /// Operator edit of the opening balance for `date`.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Unavailable` if the provider cannot answer.
    fn set_opening_balance(&self, date: NaiveDate, amount: Decimal)
    -> Result<CashDay, ProviderError>;
}
