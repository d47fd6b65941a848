//! Business-day cash register state.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::CashError;
use super::ledger::{LedgerSummary, aggregate};
use super::record::TransactionRecord;

/// Opening balance for one business day.
///
/// The opening balance changes only through [`CashDay::edit_opening_balance`];
/// summaries never write back into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashDay {
    business_date: NaiveDate,
    opening_balance: Decimal,
    opening_set_at: Option<DateTime<Utc>>,
}

impl CashDay {
    /// Opens a business day with a carried-forward balance. May be negative.
    #[must_use]
    pub const fn open(business_date: NaiveDate, opening_balance: Decimal) -> Self {
        Self {
            business_date,
            opening_balance,
            opening_set_at: None,
        }
    }

    /// The business date.
    #[must_use]
    pub const fn business_date(&self) -> NaiveDate {
        self.business_date
    }

    /// The current opening balance.
    #[must_use]
    pub const fn opening_balance(&self) -> Decimal {
        self.opening_balance
    }

    /// When the operator last edited the opening balance, if ever.
    #[must_use]
    pub const fn opening_set_at(&self) -> Option<DateTime<Utc>> {
        self.opening_set_at
    }

    /// Operator edit of the opening balance. Returns the previous value.
    pub fn edit_opening_balance(&mut self, amount: Decimal, at: DateTime<Utc>) -> Decimal {
        let previous = self.opening_balance;
        self.opening_balance = amount;
        self.opening_set_at = Some(at);
        previous
    }

    /// Aggregates `records` against this day's opening balance.
    ///
    /// # Errors
    ///
    /// Propagates `MalformedRecord` from [`aggregate`].
    pub fn summarize<'a, I>(&self, records: I) -> Result<LedgerSummary, CashError>
    where
        I: IntoIterator<Item = &'a TransactionRecord>,
    {
        aggregate(records, self.opening_balance)
    }
}
