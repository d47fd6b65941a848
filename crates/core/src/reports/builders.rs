//! Report data builders.
//!
//! Each builder produces the [`ReportData`] for one report kind from figures
//! already computed by the cash and tax modules.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::ReportData;
use crate::cash::LedgerSummary;
use crate::tax::{PercentChange, TaxPeriodSummary, percentage_change};

fn percent_label(change: PercentChange) -> String {
    match change {
        PercentChange::Change { percent, .. } if percent > Decimal::ZERO => {
            format!("+{percent}%")
        }
        PercentChange::Change { percent, .. } => format!("{percent}%"),
        PercentChange::NotApplicable => "N/A".to_string(),
    }
}

/// Data for the daily cash summary report.
#[must_use]
pub fn daily_report_data(
    date: NaiveDate,
    ledger: &LedgerSummary,
    total_sales: Decimal,
) -> ReportData {
    ReportData::new()
        .with("date", date.to_string())
        .with("openingCash", ledger.opening_balance())
        .with("totalSales", total_sales)
        .with("cashAdded", ledger.total_in())
        .with("cashRemoved", ledger.total_out())
        .with("closingBalance", ledger.closing_balance())
        .with("transactions", ledger.transaction_count())
        .with("status", "Ready")
}

/// Data for the tax summary report.
///
/// An over-reversed period is marked for review instead of pending filing.
#[must_use]
pub fn tax_report_data(period: &str, summary: &TaxPeriodSummary) -> ReportData {
    let tax_rate = summary
        .effective_rate()
        .map_or_else(|| "N/A".to_string(), |rate| format!("{}%", rate.normalize()));
    let status = if summary.anomaly().is_some() {
        "Review Required"
    } else {
        "Pending Filing"
    };

    ReportData::new()
        .with("period", period)
        .with("taxableSales", summary.taxable())
        .with("taxCollected", summary.collected())
        .with("taxReversed", summary.reversed())
        .with("finalPayable", summary.payable())
        .with("taxRate", tax_rate)
        .with("status", status)
}

/// Monthly sales against expenses, with growth over the previous month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPerformance {
    /// Month label, e.g. "November 2025".
    pub month: String,
    /// Sales for the month.
    pub total_sales: Decimal,
    /// Expenses (cash out) for the month.
    pub total_expenses: Decimal,
    /// Sales for the previous month, if known.
    pub previous_sales: Option<Decimal>,
}

impl MonthlyPerformance {
    /// `total_sales - total_expenses`.
    #[must_use]
    pub fn net_profit(&self) -> Decimal {
        self.total_sales - self.total_expenses
    }

    /// Sales growth over the previous month.
    #[must_use]
    pub fn growth(&self) -> PercentChange {
        self.previous_sales
            .map_or(PercentChange::NotApplicable, |previous| {
                percentage_change(self.total_sales, previous)
            })
    }

    /// Data for the monthly performance report.
    #[must_use]
    pub fn to_report_data(&self) -> ReportData {
        ReportData::new()
            .with("month", self.month.as_str())
            .with("totalSales", self.total_sales)
            .with("totalExpenses", self.total_expenses)
            .with("netProfit", self.net_profit())
            .with("growth", percent_label(self.growth()))
            .with("status", "Generated")
    }
}

/// Filing position for a tax period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilingState {
    /// Nothing outstanding.
    Compliant,
    /// Filings outstanding, not yet late.
    FilingDue,
    /// Filings outstanding past the due date.
    Overdue,
}

impl FilingState {
    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Compliant => "Compliant",
            Self::FilingDue => "Filing Due",
            Self::Overdue => "Overdue",
        }
    }

    /// Letter rating.
    #[must_use]
    pub const fn rating(self) -> &'static str {
        match self {
            Self::Compliant => "A",
            Self::FilingDue => "B",
            Self::Overdue => "C",
        }
    }
}

/// Tax compliance position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceStatus {
    /// Period label.
    pub period: String,
    /// Outstanding filings.
    pub filings_due: u32,
    /// Date of the last filing, if any.
    pub last_filed: Option<NaiveDate>,
    /// Next filing deadline.
    pub next_due: NaiveDate,
    /// Derived filing state.
    pub state: FilingState,
}

impl ComplianceStatus {
    /// Derives the filing state as of `today`.
    #[must_use]
    pub fn evaluate(
        period: impl Into<String>,
        filings_due: u32,
        last_filed: Option<NaiveDate>,
        next_due: NaiveDate,
        today: NaiveDate,
    ) -> Self {
        let state = match filings_due {
            0 => FilingState::Compliant,
            _ if today > next_due => FilingState::Overdue,
            _ => FilingState::FilingDue,
        };
        Self {
            period: period.into(),
            filings_due,
            last_filed,
            next_due,
            state,
        }
    }

    /// Data for the compliance report.
    #[must_use]
    pub fn to_report_data(&self) -> ReportData {
        let last_filed = self
            .last_filed
            .map_or_else(|| "Never".to_string(), |d| d.to_string());

        ReportData::new()
            .with("period", self.period.as_str())
            .with("status", self.state.label())
            .with("filingsDue", self.filings_due)
            .with("lastFiled", last_filed)
            .with("nextDue", self.next_due.to_string())
            .with("rating", self.state.rating())
    }
}
