//! Tax period aggregation.

use std::cmp::Ordering;

use rust_decimal::{Decimal, RoundingStrategy};

use super::error::TaxError;
use super::types::{
    LabelledTaxPeriod, PercentChange, TaxBreakdown, TaxBreakdownRow, TaxComparison, TaxPeriod,
    TaxPeriodSummary, Trend,
};

/// Rounds a percentage to one decimal place, halves away from zero.
pub(crate) fn round_percent(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

/// `(current - previous) / previous * 100`, rounded to one decimal place.
///
/// The direction comes from the sign of the unrounded delta, so a change that
/// rounds to `0.0` still reads as up or down. A zero `previous` has no
/// defined percentage and yields [`PercentChange::NotApplicable`], as does a
/// change too large to represent.
#[must_use]
pub fn percentage_change(current: Decimal, previous: Decimal) -> PercentChange {
    let Some(delta) = current.checked_sub(previous) else {
        return PercentChange::NotApplicable;
    };
    let Some(percent) = delta
        .checked_div(previous)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
    else {
        return PercentChange::NotApplicable;
    };

    let direction = match delta.cmp(&Decimal::ZERO) {
        Ordering::Greater => Trend::Up,
        Ordering::Less => Trend::Down,
        Ordering::Equal => Trend::Flat,
    };

    PercentChange::Change {
        percent: round_percent(percent),
        direction,
    }
}

/// Tax service for business logic.
pub struct TaxService;

impl TaxService {
    /// Summarizes a single period.
    ///
    /// # Errors
    ///
    /// Returns `TaxError::NegativeFigure` if any input figure is negative.
    pub fn summarize(period: TaxPeriod) -> Result<TaxPeriodSummary, TaxError> {
        period.validate()?;
        Ok(TaxPeriodSummary::from_period(period))
    }

    /// Compares `current` against `previous`, figure by figure.
    ///
    /// A missing previous period makes every change not applicable.
    #[must_use]
    pub fn compare_to_previous(
        current: &TaxPeriodSummary,
        previous: Option<&TaxPeriodSummary>,
    ) -> TaxComparison {
        let Some(previous) = previous else {
            return TaxComparison::not_applicable();
        };

        TaxComparison {
            taxable_change: percentage_change(current.taxable(), previous.taxable()),
            collected_change: percentage_change(current.collected(), previous.collected()),
            reversed_change: percentage_change(current.reversed(), previous.reversed()),
        }
    }

    /// Summarizes several labelled periods into rows plus a total.
    ///
    /// # Errors
    ///
    /// Returns `TaxError::NegativeFigure` for the first invalid period and
    /// `TaxError::Overflow` when the total does not fit; no partial breakdown
    /// is returned.
    pub fn breakdown(periods: &[LabelledTaxPeriod]) -> Result<TaxBreakdown, TaxError> {
        let mut rows = Vec::with_capacity(periods.len());
        for labelled in periods {
            let summary = Self::summarize(labelled.period)?;
            rows.push(TaxBreakdownRow {
                label: labelled.label.clone(),
                taxable: summary.taxable(),
                collected: summary.collected(),
                reversed: summary.reversed(),
                net_tax: summary.payable(),
            });
        }

        let total = TaxPeriod::total(periods.iter().map(|p| p.period))?;
        Ok(TaxBreakdown {
            rows,
            total: TaxPeriodSummary::from_period(total),
        })
    }
}
