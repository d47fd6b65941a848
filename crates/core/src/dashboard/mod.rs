//! Dashboard snapshot.
//!
//! The dashboard shows the day's cash position, today's sales and the month's
//! tax position. Every figure comes from the cash and tax modules.

pub mod types;

pub use types::{DashboardError, DashboardSnapshot};
