//! Tax types.

use rust_decimal::Decimal;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use super::error::TaxError;

/// Raw tax figures for a period, as supplied by the data provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxPeriod {
    /// Sales subject to tax.
    pub taxable: Decimal,
    /// Tax collected on those sales.
    pub collected: Decimal,
    /// Tax reversed (refunds, credit notes).
    pub reversed: Decimal,
}

impl TaxPeriod {
    /// Creates a period from its three figures.
    #[must_use]
    pub const fn new(taxable: Decimal, collected: Decimal, reversed: Decimal) -> Self {
        Self {
            taxable,
            collected,
            reversed,
        }
    }

    /// Checks that no figure is negative.
    ///
    /// # Errors
    ///
    /// Returns `TaxError::NegativeFigure` naming the first negative field.
    pub fn validate(&self) -> Result<(), TaxError> {
        for (field, value) in [
            ("taxable", self.taxable),
            ("collected", self.collected),
            ("reversed", self.reversed),
        ] {
            if value < Decimal::ZERO {
                return Err(TaxError::NegativeFigure { field, value });
            }
        }
        Ok(())
    }

    /// Field-wise sum of two periods.
    ///
    /// # Errors
    ///
    /// Returns `TaxError::Overflow` naming the first figure that does not fit.
    pub fn combine(self, other: Self) -> Result<Self, TaxError> {
        let add = |field, a: Decimal, b: Decimal| {
            a.checked_add(b).ok_or(TaxError::Overflow { field })
        };
        Ok(Self {
            taxable: add("taxable", self.taxable, other.taxable)?,
            collected: add("collected", self.collected, other.collected)?,
            reversed: add("reversed", self.reversed, other.reversed)?,
        })
    }

    /// Folds `periods` with [`combine`](Self::combine), starting from zero.
    ///
    /// # Errors
    ///
    /// Returns `TaxError::Overflow` as soon as a running figure does not fit.
    pub fn total<I>(periods: I) -> Result<Self, TaxError>
    where
        I: IntoIterator<Item = Self>,
    {
        periods
            .into_iter()
            .try_fold(Self::default(), Self::combine)
    }
}

/// Something a caller should look at before filing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TaxAnomaly {
    /// More tax was reversed than collected; payable is negative.
    OverReversal {
        /// How far reversals exceed collections.
        excess: Decimal,
    },
}

/// Derived summary of a tax period.
///
/// `payable` is always `collected - reversed` and is never clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxPeriodSummary {
    period: TaxPeriod,
}

impl TaxPeriodSummary {
    pub(crate) const fn from_period(period: TaxPeriod) -> Self {
        Self { period }
    }

    /// Underlying figures.
    #[must_use]
    pub const fn period(&self) -> TaxPeriod {
        self.period
    }

    /// Taxable sales.
    #[must_use]
    pub const fn taxable(&self) -> Decimal {
        self.period.taxable
    }

    /// Tax collected.
    #[must_use]
    pub const fn collected(&self) -> Decimal {
        self.period.collected
    }

    /// Tax reversed.
    #[must_use]
    pub const fn reversed(&self) -> Decimal {
        self.period.reversed
    }

    /// `collected - reversed`. May be negative.
    #[must_use]
    pub fn payable(&self) -> Decimal {
        self.period.collected - self.period.reversed
    }

    /// Over-reversal, when payable is negative.
    #[must_use]
    pub fn anomaly(&self) -> Option<TaxAnomaly> {
        let payable = self.payable();
        (payable < Decimal::ZERO).then(|| TaxAnomaly::OverReversal { excess: -payable })
    }

    /// Collected as a percentage of taxable, one decimal place. `None` when
    /// there were no taxable sales or the ratio does not fit in a `Decimal`.
    #[must_use]
    pub fn effective_rate(&self) -> Option<Decimal> {
        self.period
            .collected
            .checked_div(self.period.taxable)?
            .checked_mul(Decimal::ONE_HUNDRED)
            .map(super::service::round_percent)
    }
}

impl Serialize for TaxPeriodSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("TaxPeriodSummary", 6)?;
        state.serialize_field("taxable", &self.taxable())?;
        state.serialize_field("collected", &self.collected())?;
        state.serialize_field("reversed", &self.reversed())?;
        state.serialize_field("payable", &self.payable())?;
        state.serialize_field("effectiveRate", &self.effective_rate())?;
        state.serialize_field("anomaly", &self.anomaly())?;
        state.end()
    }
}

/// Direction of a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// Increased.
    Up,
    /// Decreased.
    Down,
    /// Exactly unchanged.
    Flat,
}

/// Period-over-period change of one figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PercentChange {
    /// A comparable previous value existed.
    Change {
        /// Signed percentage, one decimal place.
        percent: Decimal,
        /// Direction of the raw delta.
        direction: Trend,
    },
    /// Previous value missing or zero.
    NotApplicable,
}

impl PercentChange {
    /// The percentage, if one is defined.
    #[must_use]
    pub const fn percent(&self) -> Option<Decimal> {
        match self {
            Self::Change { percent, .. } => Some(*percent),
            Self::NotApplicable => None,
        }
    }

    /// The direction, if a comparison exists.
    #[must_use]
    pub const fn direction(&self) -> Option<Trend> {
        match self {
            Self::Change { direction, .. } => Some(*direction),
            Self::NotApplicable => None,
        }
    }
}

/// Changes of each figure against a previous period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxComparison {
    /// Change in taxable sales.
    pub taxable_change: PercentChange,
    /// Change in tax collected.
    pub collected_change: PercentChange,
    /// Change in tax reversed.
    pub reversed_change: PercentChange,
}

impl TaxComparison {
    /// Every figure not applicable.
    #[must_use]
    pub const fn not_applicable() -> Self {
        Self {
            taxable_change: PercentChange::NotApplicable,
            collected_change: PercentChange::NotApplicable,
            reversed_change: PercentChange::NotApplicable,
        }
    }
}

/// A period with a display label (e.g. "Nov 2025").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelledTaxPeriod {
    /// Display label.
    pub label: String,
    /// Figures.
    #[serde(flatten)]
    pub period: TaxPeriod,
}

/// One row of a tax breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxBreakdownRow {
    /// Display label.
    pub label: String,
    /// Taxable sales.
    pub taxable: Decimal,
    /// Tax collected.
    pub collected: Decimal,
    /// Tax reversed.
    pub reversed: Decimal,
    /// `collected - reversed` for this row.
    pub net_tax: Decimal,
}

/// Per-period rows and their total.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxBreakdown {
    /// One row per input period, input order.
    pub rows: Vec<TaxBreakdownRow>,
    /// Summary over all rows.
    pub total: TaxPeriodSummary,
}
