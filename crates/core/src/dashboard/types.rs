//! Dashboard data types.

use cashdesk_shared::AppError;
use cashdesk_shared::types::Currency;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::cash::{CashDay, CashError, LedgerSummary, TransactionRecord};
use crate::tax::{TaxError, TaxPeriod, TaxPeriodSummary, TaxService};

/// Number of transactions shown in the recent list.
pub const RECENT_LIMIT: usize = 5;

/// Errors that can occur while composing the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    /// A cash record failed validation.
    #[error(transparent)]
    Cash(#[from] CashError),
    /// The month's tax figures failed validation.
    #[error(transparent)]
    Tax(#[from] TaxError),
}

impl From<DashboardError> for AppError {
    fn from(err: DashboardError) -> Self {
        match err {
            DashboardError::Cash(e) => e.into(),
            DashboardError::Tax(e) => e.into(),
        }
    }
}

/// Everything the dashboard page shows for one business day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    /// Business date.
    pub business_date: NaiveDate,
    /// Display currency.
    pub currency: Currency,
    /// Cash totals for the day.
    pub cash: LedgerSummary,
    /// Sales recorded today.
    pub sales_today: Decimal,
    /// Tax position for the month so far.
    pub tax_month: TaxPeriodSummary,
    /// Most recent transactions, newest first.
    pub recent_transactions: Vec<TransactionRecord>,
}

impl DashboardSnapshot {
    /// Builds the snapshot for `day` from its records and figures.
    ///
    /// # Errors
    ///
    /// Returns the first cash or tax validation failure. No partial snapshot
    /// is produced.
    pub fn compute(
        currency: Currency,
        day: &CashDay,
        records: &[TransactionRecord],
        sales_today: Decimal,
        tax_month: TaxPeriod,
    ) -> Result<Self, DashboardError> {
        let cash = day.summarize(records)?;
        let tax_month = TaxService::summarize(tax_month)?;

        let mut recent: Vec<_> = records.to_vec();
        recent.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        recent.truncate(RECENT_LIMIT);

        Ok(Self {
            business_date: day.business_date(),
            currency,
            cash,
            sales_today,
            tax_month,
            recent_transactions: recent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cash::CashDirection;
    use crate::test_support::{base_time, record_at};
    use chrono::Duration;
    use rust_decimal_macros::dec;

    fn day() -> CashDay {
        CashDay::open(NaiveDate::from_ymd_opt(2025, 11, 28).unwrap(), dec!(100000))
    }

    fn month() -> TaxPeriod {
        TaxPeriod::new(dec!(250000), dec!(37500), dec!(5000))
    }

    #[test]
    fn test_snapshot_figures() {
        let records: Vec<_> = [
            (CashDirection::In, dec!(15000)),
            (CashDirection::Out, dec!(4000)),
            (CashDirection::In, dec!(25000)),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (d, a))| record_at(d, a, base_time() + Duration::minutes(i as i64)))
        .collect();

        let snapshot =
            DashboardSnapshot::compute(Currency::Pkr, &day(), &records, dec!(45000), month())
                .unwrap();

        assert_eq!(snapshot.cash.closing_balance(), dec!(136000));
        assert_eq!(snapshot.tax_month.payable(), dec!(32500));
        assert_eq!(snapshot.sales_today, dec!(45000));
        assert_eq!(snapshot.recent_transactions[0].amount, dec!(25000));
    }

    #[test]
    fn test_recent_is_capped() {
        let records: Vec<_> = (0..8)
            .map(|i| record_at(CashDirection::In, dec!(10), base_time() + Duration::hours(i)))
            .collect();
        let snapshot =
            DashboardSnapshot::compute(Currency::Pkr, &day(), &records, Decimal::ZERO, month())
                .unwrap();
        assert_eq!(snapshot.recent_transactions.len(), RECENT_LIMIT);
        assert_eq!(snapshot.recent_transactions[0].timestamp, records[7].timestamp);
    }

    #[test]
    fn test_empty_day_is_valid() {
        let snapshot = DashboardSnapshot::compute(
            Currency::Pkr,
            &day(),
            &[],
            Decimal::ZERO,
            TaxPeriod::default(),
        )
        .unwrap();
        assert_eq!(snapshot.cash.closing_balance(), dec!(100000));
        assert!(snapshot.recent_transactions.is_empty());
    }

    #[test]
    fn test_malformed_record_fails_snapshot() {
        let records = vec![record_at(CashDirection::Out, dec!(-500), base_time())];
        let err = DashboardSnapshot::compute(Currency::Pkr, &day(), &records, Decimal::ZERO, month())
            .unwrap_err();
        assert!(matches!(err, DashboardError::Cash(CashError::MalformedRecord { .. })));
    }

    #[test]
    fn test_negative_tax_fails_snapshot() {
        let err = DashboardSnapshot::compute(
            Currency::Pkr,
            &day(),
            &[],
            Decimal::ZERO,
            TaxPeriod::new(dec!(-1), Decimal::ZERO, Decimal::ZERO),
        )
        .unwrap_err();
        assert!(matches!(err, DashboardError::Tax(_)));
    }
}
