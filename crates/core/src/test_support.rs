//! Shared fixtures and proptest strategies.

use cashdesk_shared::types::TransactionId;
use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::cash::{CashDirection, TransactionRecord, TransactionStatus};

/// Fixed instant used by fixtures that don't care about time.
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 11, 1, 4, 0, 0).unwrap()
}

/// A completed record at [`base_time`].
pub fn record(direction: CashDirection, amount: Decimal) -> TransactionRecord {
    record_at(direction, amount, base_time())
}

/// A completed record at `timestamp`.
pub fn record_at(
    direction: CashDirection,
    amount: Decimal,
    timestamp: DateTime<Utc>,
) -> TransactionRecord {
    let id = TransactionId::new();
    TransactionRecord {
        id,
        direction,
        amount,
        reason: "Cash sales deposit".to_string(),
        description: None,
        user: "Ali Ahmed".to_string(),
        user_role: "Cashier".to_string(),
        timestamp,
        status: TransactionStatus::Completed,
        reference: format!("REF-{}", &id.to_string()[..8]),
    }
}

/// Strategy for positive amounts (0.01 to 1,000,000.00).
pub fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for any opening balance, deficits included.
pub fn opening_balance() -> impl Strategy<Value = Decimal> {
    (-100_000_000i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for cash direction.
pub fn direction() -> impl Strategy<Value = CashDirection> {
    prop_oneof![Just(CashDirection::In), Just(CashDirection::Out)]
}

/// Strategy for timestamps across November and December 2025.
pub fn timestamp() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..61 * 24 * 60).prop_map(|minutes| base_time() + Duration::minutes(minutes))
}

fn reason() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Cash sales deposit".to_string()),
        Just("Petty cash for supplies".to_string()),
        Just("Customer payment".to_string()),
        Just("Bank deposit".to_string()),
        Just("Change fund".to_string()),
    ]
}

fn user() -> impl Strategy<Value = (String, String)> {
    prop_oneof![
        Just(("Ali Ahmed".to_string(), "Cashier".to_string())),
        Just(("Sara Khan".to_string(), "Manager".to_string())),
        Just(("Hamza Malik".to_string(), "Owner".to_string())),
    ]
}

/// Strategy for a well-formed transaction record.
pub fn transaction_record() -> impl Strategy<Value = TransactionRecord> {
    (
        direction(),
        positive_amount(),
        reason(),
        proptest::option::of("[a-z ]{0,24}"),
        user(),
        timestamp(),
        0u32..1000,
    )
        .prop_map(
            |(direction, amount, reason, description, (user, user_role), timestamp, n)| {
                TransactionRecord {
                    id: TransactionId::new(),
                    direction,
                    amount,
                    reason,
                    description,
                    user,
                    user_role,
                    timestamp,
                    status: TransactionStatus::Completed,
                    reference: format!("REF-{n:03}"),
                }
            },
        )
}

/// Strategy for a collection of well-formed records.
pub fn record_batch(max: usize) -> impl Strategy<Value = Vec<TransactionRecord>> {
    prop::collection::vec(transaction_record(), 0..max)
}
