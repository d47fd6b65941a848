//! Ledger aggregation.
//!
//! Folds a collection of transaction records into in/out totals and derives
//! net flow and closing balance from an opening balance.

use rust_decimal::Decimal;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use super::error::CashError;
use super::record::{CashDirection, TransactionRecord};

/// Totals for a collection of cash records.
///
/// Net flow and closing balance are computed from the stored inputs on every
/// call and are never held as separate fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LedgerSummary {
    opening_balance: Decimal,
    total_in: Decimal,
    total_out: Decimal,
    in_count: usize,
    out_count: usize,
}

impl LedgerSummary {
    /// Summary of an empty collection.
    #[must_use]
    pub fn empty(opening_balance: Decimal) -> Self {
        Self {
            opening_balance,
            ..Self::default()
        }
    }

    /// Opening balance the summary was computed from.
    #[must_use]
    pub const fn opening_balance(&self) -> Decimal {
        self.opening_balance
    }

    /// Sum of all `in` amounts.
    #[must_use]
    pub const fn total_in(&self) -> Decimal {
        self.total_in
    }

    /// Sum of all `out` amounts.
    #[must_use]
    pub const fn total_out(&self) -> Decimal {
        self.total_out
    }

    /// Number of `in` records.
    #[must_use]
    pub const fn in_count(&self) -> usize {
        self.in_count
    }

    /// Number of `out` records.
    #[must_use]
    pub const fn out_count(&self) -> usize {
        self.out_count
    }

    /// Number of records aggregated.
    #[must_use]
    pub const fn transaction_count(&self) -> usize {
        self.in_count + self.out_count
    }

    /// `total_in - total_out`. Signed.
    ///
    /// Both totals are non-negative, so the difference always fits.
    #[must_use]
    pub fn net_flow(&self) -> Decimal {
        self.total_in - self.total_out
    }

    /// `opening_balance + net_flow`.
    ///
    /// [`aggregate`] refuses inputs whose closing balance would overflow.
    #[must_use]
    pub fn closing_balance(&self) -> Decimal {
        self.opening_balance + self.net_flow()
    }

    fn record(&mut self, direction: CashDirection, amount: Decimal) -> Result<(), CashError> {
        let (total, count, name) = match direction {
            CashDirection::In => (&mut self.total_in, &mut self.in_count, "totalIn"),
            CashDirection::Out => (&mut self.total_out, &mut self.out_count, "totalOut"),
        };
        *total = total
            .checked_add(amount)
            .ok_or(CashError::Overflow { total: name })?;
        *count += 1;
        Ok(())
    }
}

impl Serialize for LedgerSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("LedgerSummary", 7)?;
        state.serialize_field("openingBalance", &self.opening_balance)?;
        state.serialize_field("totalIn", &self.total_in)?;
        state.serialize_field("totalOut", &self.total_out)?;
        state.serialize_field("netFlow", &self.net_flow())?;
        state.serialize_field("closingBalance", &self.closing_balance())?;
        state.serialize_field("inCount", &self.in_count)?;
        state.serialize_field("outCount", &self.out_count)?;
        state.end()
    }
}

/// Aggregates `records` into a [`LedgerSummary`] in a single pass.
///
/// An empty collection is valid and yields zero totals with
/// `closing_balance == opening_balance`.
///
/// # Errors
///
/// Returns `MalformedRecord` for the first record with `amount <= 0`, and
/// `Overflow` when a total or the closing balance would not fit in a
/// `Decimal`. No partial summary is returned.
pub fn aggregate<'a, I>(records: I, opening_balance: Decimal) -> Result<LedgerSummary, CashError>
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    let mut summary = LedgerSummary::empty(opening_balance);
    for record in records {
        record.validate()?;
        summary.record(record.direction, record.amount)?;
    }
    summary
        .opening_balance
        .checked_add(summary.net_flow())
        .ok_or(CashError::Overflow {
            total: "closingBalance",
        })?;
    Ok(summary)
}
