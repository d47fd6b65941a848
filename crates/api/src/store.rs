//! In-memory data provider.
//!
//! Holds cash records, opening balances and imported sale lines behind one
//! lock. Records are bucketed into business days in the configured zone.

use std::collections::{HashMap, HashSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use cashdesk_core::cash::{CashDay, NewCashTransaction, TransactionRecord};
use cashdesk_core::provider::{
    CashDataProvider, DashboardSource, DateRange, ImportReceipt, ProviderError, SaleLine,
    SalesImportBatch,
};
use cashdesk_core::tax::{LabelledTaxPeriod, TaxError, TaxPeriod};
use cashdesk_shared::types::{ImportBatchId, TransactionId};
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;

#[derive(Debug, Default)]
struct StoreState {
    records: Vec<TransactionRecord>,
    days: HashMap<NaiveDate, CashDay>,
    sales: Vec<SaleLine>,
}

/// Provider backed by process memory.
pub struct InMemoryProvider {
    state: RwLock<StoreState>,
    timezone: Tz,
    default_opening: Decimal,
    clock: fn() -> DateTime<Utc>,
}

impl InMemoryProvider {
    /// Creates an empty store. Days without an explicit opening balance start
    /// at `default_opening`.
    #[must_use]
    pub fn new(timezone: Tz, default_opening: Decimal) -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
            timezone,
            default_opening,
            clock: Utc::now,
        }
    }

    /// Replaces the clock used to stamp submissions.
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, StoreState>, ProviderError> {
        self.state
            .read()
            .map_err(|_| ProviderError::Unavailable("store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, StoreState>, ProviderError> {
        self.state
            .write()
            .map_err(|_| ProviderError::Unavailable("store lock poisoned".to_string()))
    }

    fn business_date(&self, record: &TransactionRecord) -> NaiveDate {
        record.timestamp.with_timezone(&self.timezone).date_naive()
    }

    fn day_of(&self, state: &StoreState, date: NaiveDate) -> CashDay {
        state
            .days
            .get(&date)
            .cloned()
            .unwrap_or_else(|| CashDay::open(date, self.default_opening))
    }

    fn records_in(&self, state: &StoreState, range: DateRange) -> Vec<TransactionRecord> {
        state
            .records
            .iter()
            .filter(|r| range.contains(self.business_date(r)))
            .cloned()
            .collect()
    }
}

fn sales_in(state: &StoreState, range: DateRange) -> Result<TaxPeriod, TaxError> {
    TaxPeriod::total(
        state
            .sales
            .iter()
            .filter(|line| range.contains(line.date))
            .map(SaleLine::tax_period),
    )
}

impl CashDataProvider for InMemoryProvider {
    fn dashboard_source(&self, date: NaiveDate) -> Result<DashboardSource, ProviderError> {
        let state = self.read()?;
        let month_start = DateRange::month_of(date).start();
        let month_to_date = DateRange::new(month_start, date).unwrap_or(DateRange::day(date));

        Ok(DashboardSource {
            cash_day: self.day_of(&state, date),
            records: self.records_in(&state, DateRange::day(date)),
            sales_today: sales_in(&state, DateRange::day(date))?.taxable,
            tax_month: sales_in(&state, month_to_date)?,
        })
    }

    fn cash_day(&self, date: NaiveDate) -> Result<CashDay, ProviderError> {
        let state = self.read()?;
        Ok(self.day_of(&state, date))
    }

    fn cash_logs(
        &self,
        range: Option<DateRange>,
    ) -> Result<Vec<TransactionRecord>, ProviderError> {
        let state = self.read()?;
        Ok(match range {
            Some(range) => self.records_in(&state, range),
            None => state.records.clone(),
        })
    }

    fn tax_period(&self, range: DateRange) -> Result<TaxPeriod, ProviderError> {
        let state = self.read()?;
        Ok(sales_in(&state, range)?)
    }

    fn tax_breakdown(&self, range: DateRange) -> Result<Vec<LabelledTaxPeriod>, ProviderError> {
        let state = self.read()?;
        let mut rows = Vec::new();
        let mut month = DateRange::month_of(range.start());

        loop {
            let start = month.start().max(range.start());
            let end = month.end().min(range.end());
            if let Some(overlap) = DateRange::new(start, end) {
                rows.push(LabelledTaxPeriod {
                    label: month.start().format("%B %Y").to_string(),
                    period: sales_in(&state, overlap)?,
                });
            }

            match month.end().succ_opt() {
                Some(next) if next <= range.end() => month = DateRange::month_of(next),
                _ => break,
            }
        }

        Ok(rows)
    }

    fn submit_cash_transaction(
        &self,
        new: NewCashTransaction,
    ) -> Result<TransactionRecord, ProviderError> {
        let record = new.into_record(TransactionId::new(), (self.clock)())?;
        self.write()?.records.push(record.clone());
        Ok(record)
    }

    fn submit_sales_import(&self, batch: SalesImportBatch) -> Result<ImportReceipt, ProviderError> {
        if batch.lines.is_empty() {
            return Err(ProviderError::Rejected(format!(
                "import '{}' contains no lines",
                batch.source
            )));
        }
        let totals = batch.totals()?;

        let mut seen = HashSet::with_capacity(batch.lines.len());
        if let Some(dup) = batch
            .lines
            .iter()
            .find(|line| !seen.insert((line.invoice.as_str(), line.kind)))
        {
            return Err(ProviderError::Rejected(format!(
                "invoice {} appears twice in '{}'",
                dup.invoice, batch.source
            )));
        }

        let mut state = self.write()?;
        if let Some(dup) = batch.lines.iter().find(|line| {
            state
                .sales
                .iter()
                .any(|s| s.invoice == line.invoice && s.kind == line.kind)
        }) {
            return Err(ProviderError::Rejected(format!(
                "invoice {} already imported",
                dup.invoice
            )));
        }

        let lines_imported = batch.lines.len();
        state.sales.extend(batch.lines);

        Ok(ImportReceipt {
            batch_id: ImportBatchId::new(),
            lines_imported,
            totals,
        })
    }

    fn set_opening_balance(
        &self,
        date: NaiveDate,
        amount: Decimal,
    ) -> Result<CashDay, ProviderError> {
        let now = (self.clock)();
        let mut state = self.write()?;
        let day = state
            .days
            .entry(date)
            .or_insert_with(|| CashDay::open(date, self.default_opening));
        day.edit_opening_balance(amount, now);
        Ok(day.clone())
    }
}
