//! Transaction log filtering.
//!
//! Text, direction and date-bucket predicates are combined with AND. Date
//! buckets are evaluated against a caller-supplied `now`; nothing here reads
//! the clock.

use std::str::FromStr;

use chrono::{DateTime, Datelike, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::error::CashError;
use super::record::{CashDirection, TransactionRecord};

/// Direction restriction for a query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    /// Any direction.
    #[default]
    All,
    /// Only `in` records.
    In,
    /// Only `out` records.
    Out,
}

impl TypeFilter {
    /// Returns true if `direction` passes this filter.
    #[must_use]
    pub const fn matches(self, direction: CashDirection) -> bool {
        matches!(
            (self, direction),
            (Self::All, _) | (Self::In, CashDirection::In) | (Self::Out, CashDirection::Out)
        )
    }
}

impl FromStr for TypeFilter {
    type Err = CashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(Self::All),
            "in" => Ok(Self::In),
            "out" => Ok(Self::Out),
            _ => Err(CashError::InvalidQuery {
                field: "type",
                value: s.to_string(),
            }),
        }
    }
}

/// Calendar bucket relative to a reference instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateBucket {
    /// Same calendar day as `now`.
    Today,
    /// The calendar day before `now`.
    Yesterday,
    /// Same ISO week (Monday start) as `now`.
    Week,
    /// Same calendar month as `now`.
    Month,
    /// No date restriction.
    #[default]
    All,
}

impl DateBucket {
    /// Returns true if `timestamp` falls in this bucket relative to `now`.
    ///
    /// The timestamp is converted into `now`'s time zone before comparing
    /// calendar fields.
    #[must_use]
    pub fn contains<Tz: TimeZone>(self, timestamp: &DateTime<Utc>, now: &DateTime<Tz>) -> bool {
        let today = now.date_naive();
        let day = timestamp.with_timezone(&now.timezone()).date_naive();
        match self {
            Self::Today => day == today,
            Self::Yesterday => today.pred_opt() == Some(day),
            Self::Week => day.iso_week() == today.iso_week(),
            Self::Month => day.year() == today.year() && day.month() == today.month(),
            Self::All => true,
        }
    }
}

impl FromStr for DateBucket {
    type Err = CashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(Self::All),
            "today" => Ok(Self::Today),
            "yesterday" => Ok(Self::Yesterday),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            _ => Err(CashError::InvalidQuery {
                field: "range",
                value: s.to_string(),
            }),
        }
    }
}

/// A transaction log query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionQuery {
    /// Free text matched against reason, description, user and reference.
    pub text: Option<String>,
    /// Direction restriction.
    pub direction: TypeFilter,
    /// Date bucket restriction.
    pub date_bucket: DateBucket,
}

impl TransactionQuery {
    /// A query that matches every record.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Sets the search text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Sets the direction restriction.
    #[must_use]
    pub const fn with_direction(mut self, direction: TypeFilter) -> Self {
        self.direction = direction;
        self
    }

    /// Sets the date bucket.
    #[must_use]
    pub const fn with_date_bucket(mut self, bucket: DateBucket) -> Self {
        self.date_bucket = bucket;
        self
    }

    /// Returns true if this query can never exclude a record.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.text.as_deref().is_none_or(|t| t.trim().is_empty())
            && self.direction == TypeFilter::All
            && self.date_bucket == DateBucket::All
    }

    fn needle(&self) -> String {
        self.text
            .as_deref()
            .map(|t| t.trim().to_lowercase())
            .unwrap_or_default()
    }
}

/// Selects the records matching `query`, preserving input order.
///
/// # Errors
///
/// Returns `MalformedRecord` if any record in the input violates the amount
/// invariant, whether or not it would have been selected.
pub fn filter<'a, Tz: TimeZone>(
    records: &'a [TransactionRecord],
    query: &TransactionQuery,
    now: &DateTime<Tz>,
) -> Result<Vec<&'a TransactionRecord>, CashError> {
    records.iter().try_for_each(TransactionRecord::validate)?;

    let needle = query.needle();
    Ok(records
        .iter()
        .filter(|r| query.direction.matches(r.direction))
        .filter(|r| query.date_bucket.contains(&r.timestamp, now))
        .filter(|r| r.matches_text(&needle))
        .collect())
}
