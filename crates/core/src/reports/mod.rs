//! Flat report assembly.
//!
//! This module turns computed summaries into display/export records:
//! - Daily cash summary
//! - Tax summary
//! - Monthly performance
//! - Tax compliance
//!
//! File generation (spreadsheet, PDF, CSV) happens outside this crate.

pub mod builders;
pub mod error;
pub mod service;
pub mod types;


pub use builders::{
    ComplianceStatus, FilingState, MonthlyPerformance, daily_report_data, tax_report_data,
};
pub use error::ReportError;
pub use service::ReportAssembler;
pub use types::{FlatReportRecord, ReportData, ReportEntry, ReportType, ReportValue};
