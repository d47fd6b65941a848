//! Cash register logic.
//!
//! This module implements the cash side of the register:
//! - Transaction records (direction, amount, attribution)
//! - Ledger aggregation into opening/closing balances
//! - Search and bucket filtering of transaction logs
//! - The operator-set opening balance for a business day
//! - Error types for malformed records and queries

pub mod error;
pub mod filter;
pub mod ledger;
pub mod record;
pub mod register;

#[cfg(test)]
mod filter_props;
#[cfg(test)]
mod ledger_props;

pub use error::{CashError, MalformedReason};
pub use filter::{DateBucket, TransactionQuery, TypeFilter, filter};
pub use ledger::{LedgerSummary, aggregate};
pub use record::{CashDirection, NewCashTransaction, TransactionRecord, TransactionStatus};
pub use register::CashDay;
