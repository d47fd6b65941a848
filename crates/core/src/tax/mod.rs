//! Tax period aggregation and period-over-period comparison.

pub mod error;
pub mod service;
pub mod types;


pub use error::TaxError;
pub use service::{TaxService, percentage_change};
pub use types::{
    LabelledTaxPeriod, PercentChange, TaxAnomaly, TaxBreakdown, TaxBreakdownRow, TaxComparison,
    TaxPeriod, TaxPeriodSummary, Trend,
};
