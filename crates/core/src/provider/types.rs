//! Provider boundary types.

use cashdesk_shared::types::ImportBatchId;
use chrono::{Datelike, Duration, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cash::{CashDay, TransactionRecord};
use crate::tax::{TaxError, TaxPeriod};

/// Inclusive range of business dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a range. Returns `None` if `start` is after `end`.
    #[must_use]
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// A single-day range.
    #[must_use]
    pub const fn day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// The calendar month containing `date`.
    #[must_use]
    pub fn month_of(date: NaiveDate) -> Self {
        let start = date.with_day(1).unwrap_or(date);
        let end = start
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(date);
        Self { start, end }
    }

    /// The calendar quarter containing `date`.
    #[must_use]
    pub fn quarter_of(date: NaiveDate) -> Self {
        let first_month = date.month0() / 3 * 3 + 1;
        let start = NaiveDate::from_ymd_opt(date.year(), first_month, 1).unwrap_or(date);
        let end = start
            .checked_add_months(Months::new(3))
            .and_then(|next| next.pred_opt())
            .unwrap_or(date);
        Self { start, end }
    }

    /// The calendar year containing `date`.
    #[must_use]
    pub fn year_of(date: NaiveDate) -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date),
            end: NaiveDate::from_ymd_opt(date.year(), 12, 31).unwrap_or(date),
        }
    }

    /// This range cut short at `date`, or `None` if `date` is before it.
    #[must_use]
    pub fn through(&self, date: NaiveDate) -> Option<Self> {
        Self::new(self.start, self.end.min(date))
    }

    /// First day.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns true if `date` is within the range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days in the range.
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// The equal-length range ending the day before this one starts.
    #[must_use]
    pub fn preceding(&self) -> Option<Self> {
        let end = self.start.pred_opt()?;
        let start = end.checked_sub_signed(Duration::days(self.days() - 1))?;
        Some(Self { start, end })
    }
}

/// Whether a sale line adds or reverses tax.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaleKind {
    /// A sale; its tax is collected.
    #[default]
    Sale,
    /// A return or credit note; its tax is reversed.
    Return,
}

/// One line of a sales import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleLine {
    /// Invoice number.
    pub invoice: String,
    /// Business date of the sale.
    pub date: NaiveDate,
    /// Taxable amount.
    pub taxable: Decimal,
    /// Tax on the line.
    pub tax: Decimal,
    /// Sale or return.
    #[serde(default)]
    pub kind: SaleKind,
}

impl SaleLine {
    /// Contribution of this line to a tax period.
    #[must_use]
    pub fn tax_period(&self) -> TaxPeriod {
        match self.kind {
            SaleKind::Sale => TaxPeriod::new(self.taxable, self.tax, Decimal::ZERO),
            SaleKind::Return => TaxPeriod::new(Decimal::ZERO, Decimal::ZERO, self.tax),
        }
    }
}

/// A batch of sale lines from one import file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesImportBatch {
    /// Name of the imported file or source system.
    pub source: String,
    /// Lines in file order.
    pub lines: Vec<SaleLine>,
}

impl SalesImportBatch {
    /// Checks every line's figures and returns the batch totals.
    ///
    /// # Errors
    ///
    /// Returns `TaxError::NegativeFigure` for the first line with a negative
    /// taxable amount or tax, and `TaxError::Overflow` when the totals do not
    /// fit.
    pub fn totals(&self) -> Result<TaxPeriod, TaxError> {
        for line in &self.lines {
            if line.taxable < Decimal::ZERO {
                return Err(TaxError::NegativeFigure {
                    field: "taxable",
                    value: line.taxable,
                });
            }
            if line.tax < Decimal::ZERO {
                return Err(TaxError::NegativeFigure {
                    field: "tax",
                    value: line.tax,
                });
            }
        }
        TaxPeriod::total(self.lines.iter().map(SaleLine::tax_period))
    }
}

/// Acknowledgement of an accepted sales import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReceipt {
    /// Batch identifier.
    pub batch_id: ImportBatchId,
    /// Number of lines stored.
    pub lines_imported: usize,
    /// Tax figures added by the batch.
    pub totals: TaxPeriod,
}

/// Raw inputs for one day's dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSource {
    /// The business day and its opening balance.
    pub cash_day: CashDay,
    /// The day's cash records.
    pub records: Vec<TransactionRecord>,
    /// Sales recorded that day.
    pub sales_today: Decimal,
    /// Tax figures for the month to date.
    pub tax_month: TaxPeriod,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_range_rejects_inverted() {
        assert!(DateRange::new(date(2025, 11, 30), date(2025, 11, 1)).is_none());
    }

    #[test]
    fn test_preceding_month_length() {
        let november = DateRange::new(date(2025, 11, 1), date(2025, 11, 30)).unwrap();
        let previous = november.preceding().unwrap();
        assert_eq!(previous.start(), date(2025, 10, 2));
        assert_eq!(previous.end(), date(2025, 10, 31));
        assert_eq!(previous.days(), 30);
    }

    #[test]
    fn test_month_of() {
        let feb = DateRange::month_of(date(2024, 2, 14));
        assert_eq!(feb.start(), date(2024, 2, 1));
        assert_eq!(feb.end(), date(2024, 2, 29));
        assert!(feb.contains(date(2024, 2, 29)));
        assert!(!feb.contains(date(2024, 3, 1)));
    }

    #[test]
    fn test_quarter_and_year_of() {
        let q4 = DateRange::quarter_of(date(2025, 11, 28));
        assert_eq!((q4.start(), q4.end()), (date(2025, 10, 1), date(2025, 12, 31)));

        let q1 = DateRange::quarter_of(date(2024, 3, 31));
        assert_eq!((q1.start(), q1.end()), (date(2024, 1, 1), date(2024, 3, 31)));

        let year = DateRange::year_of(date(2025, 6, 15));
        assert_eq!((year.start(), year.end()), (date(2025, 1, 1), date(2025, 12, 31)));
        assert_eq!(year.days(), 365);
    }

    #[test]
    fn test_through_cuts_the_range() {
        let q4 = DateRange::quarter_of(date(2025, 11, 28));
        let to_date = q4.through(date(2025, 11, 28)).unwrap();
        assert_eq!(to_date.end(), date(2025, 11, 28));
        assert_eq!(q4.through(date(2026, 2, 1)), Some(q4));
        assert_eq!(q4.through(date(2025, 9, 30)), None);
    }

    #[test]
    fn test_batch_totals() {
        let batch = SalesImportBatch {
            source: "pos-2025-11-28.csv".to_string(),
            lines: vec![
                SaleLine {
                    invoice: "INV-1001".to_string(),
                    date: date(2025, 11, 28),
                    taxable: dec!(10000),
                    tax: dec!(1500),
                    kind: SaleKind::Sale,
                },
                SaleLine {
                    invoice: "INV-0990".to_string(),
                    date: date(2025, 11, 28),
                    taxable: dec!(2000),
                    tax: dec!(300),
                    kind: SaleKind::Return,
                },
            ],
        };

        let totals = batch.totals().unwrap();
        assert_eq!(totals, TaxPeriod::new(dec!(10000), dec!(1500), dec!(300)));
    }

    #[test]
    fn test_batch_rejects_negative_tax() {
        let batch = SalesImportBatch {
            source: "bad.csv".to_string(),
            lines: vec![SaleLine {
                invoice: "INV-1".to_string(),
                date: date(2025, 11, 28),
                taxable: dec!(100),
                tax: dec!(-15),
                kind: SaleKind::Sale,
            }],
        };
        assert!(matches!(
            batch.totals(),
            Err(TaxError::NegativeFigure { field: "tax", .. })
        ));
    }
}
