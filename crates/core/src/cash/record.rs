//! Cash transaction records.

use std::str::FromStr;

use cashdesk_shared::types::TransactionId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::{CashError, MalformedReason};

/// Direction of a cash movement.
///
/// The sign of a movement lives here, never in the amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CashDirection {
    /// Cash added to the drawer.
    In,
    /// Cash removed from the drawer.
    Out,
}

impl CashDirection {
    /// Returns the wire name of the direction.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
        }
    }
}

impl std::fmt::Display for CashDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CashDirection {
    type Err = MalformedReason;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "in" => Ok(Self::In),
            "out" => Ok(Self::Out),
            _ => Err(MalformedReason::UnknownDirection(s.to_string())),
        }
    }
}

/// Settlement status of a cash movement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Recorded but not yet confirmed.
    Pending,
    /// Confirmed.
    #[default]
    Completed,
}

/// A single cash movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    /// Record ID, assigned at creation.
    pub id: TransactionId,
    /// Direction of the movement.
    #[serde(rename = "type")]
    pub direction: CashDirection,
    /// Amount moved, always > 0.
    pub amount: Decimal,
    /// Short label.
    pub reason: String,
    /// Free-text detail.
    #[serde(default)]
    pub description: Option<String>,
    /// Who recorded the movement.
    pub user: String,
    /// Role of the recording user.
    pub user_role: String,
    /// When the movement happened.
    pub timestamp: DateTime<Utc>,
    /// Settlement status.
    pub status: TransactionStatus,
    /// External correlation identifier.
    pub reference: String,
}

impl TransactionRecord {
    /// Checks the amount invariant.
    ///
    /// # Errors
    ///
    /// Returns `MalformedRecord` naming this record when `amount <= 0`.
    pub fn validate(&self) -> Result<(), CashError> {
        if self.amount <= Decimal::ZERO {
            return Err(CashError::MalformedRecord {
                record: self.id.to_string(),
                reason: MalformedReason::NonPositiveAmount(self.amount),
            });
        }
        Ok(())
    }

    /// Case-insensitive substring match over reason, description, user and
    /// reference. `needle` must already be lowercase.
    #[must_use]
    pub fn matches_text(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        let contains = |field: &str| field.to_lowercase().contains(needle);
        contains(&self.reason)
            || self.description.as_deref().is_some_and(contains)
            || contains(&self.user)
            || contains(&self.reference)
    }
}

/// A cash movement submitted by an operator, before it has an ID.
///
/// `type` arrives as free text; turning it into a [`TransactionRecord`] is
/// where the shape is validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCashTransaction {
    /// Direction as sent by the client (`in` / `out`).
    #[serde(rename = "type")]
    pub direction: String,
    /// Amount moved.
    pub amount: Decimal,
    /// Short label.
    pub reason: String,
    /// Free-text detail.
    #[serde(default)]
    pub description: Option<String>,
    /// Who is recording the movement.
    pub user: String,
    /// Role of the recording user.
    #[serde(default)]
    pub user_role: String,
    /// External reference; generated from the ID when absent.
    #[serde(default)]
    pub reference: Option<String>,
    /// Settlement status; completed when absent.
    #[serde(default)]
    pub status: Option<TransactionStatus>,
    /// When the movement happened; the receive time when absent.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl NewCashTransaction {
    /// Validates the submission and turns it into a record with `id`.
    ///
    /// # Errors
    ///
    /// Returns `MalformedRecord` for an unknown direction, a non-positive
    /// amount, or an empty reason or user.
    pub fn into_record(
        self,
        id: TransactionId,
        received_at: DateTime<Utc>,
    ) -> Result<TransactionRecord, CashError> {
        let label = self
            .reference
            .clone()
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| "new transaction".to_string());
        let malformed = |reason| CashError::MalformedRecord {
            record: label.clone(),
            reason,
        };

        let direction = self.direction.parse::<CashDirection>().map_err(malformed)?;
        if self.amount <= Decimal::ZERO {
            return Err(malformed(MalformedReason::NonPositiveAmount(self.amount)));
        }
        if self.reason.trim().is_empty() {
            return Err(malformed(MalformedReason::MissingField("reason")));
        }
        if self.user.trim().is_empty() {
            return Err(malformed(MalformedReason::MissingField("user")));
        }

        let reference = match self.reference {
            Some(r) if !r.trim().is_empty() => r,
            _ => format!("REF-{}", &id.to_string()[..8]).to_uppercase(),
        };

        Ok(TransactionRecord {
            id,
            direction,
            amount: self.amount,
            reason: self.reason,
            description: self.description.filter(|d| !d.trim().is_empty()),
            user: self.user,
            user_role: self.user_role,
            timestamp: self.timestamp.unwrap_or(received_at),
            status: self.status.unwrap_or_default(),
            reference,
        })
    }
}
