//! Cash ledger and tax computation for Cashdesk.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Every page of the register (dashboard, cash register, cash logs, tax
//! overview, reports) derives its numbers through these functions instead of
//! recomputing them locally.
//!
//! # Modules
//!
//! - `cash` - Transaction records, ledger aggregation, filtering, opening balance
//! - `tax` - Tax period aggregation and period-over-period comparison
//! - `reports` - Flat report assembly for display and export
//! - `dashboard` - Dashboard snapshot composed from ledger and tax summaries
//! - `provider` - Data provider boundary and cached fallback reads

pub mod cash;
pub mod dashboard;
pub mod provider;
pub mod reports;
pub mod tax;

#[cfg(test)]
pub(crate) mod test_support;
