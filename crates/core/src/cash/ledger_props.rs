//! Property-based tests for ledger aggregation.
//!
//! - Closing balance equals opening plus ins minus outs
//! - Aggregation is independent of record order
//! - An empty collection keeps the opening balance
//! - A malformed record anywhere yields no summary

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::error::CashError;
use super::ledger::aggregate;
use super::record::{CashDirection, TransactionRecord};
use crate::test_support::{opening_balance, positive_amount, record_batch};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Closing balance is opening + Σin − Σout.
    #[test]
    fn prop_closing_balance_formula(
        records in record_batch(40),
        opening in opening_balance(),
    ) {
        let expected_in: Decimal = records
            .iter()
            .filter(|r| r.direction == CashDirection::In)
            .map(|r| r.amount)
            .sum();
        let expected_out: Decimal = records
            .iter()
            .filter(|r| r.direction == CashDirection::Out)
            .map(|r| r.amount)
            .sum();

        let summary = aggregate(&records, opening).unwrap();

        prop_assert_eq!(summary.total_in(), expected_in);
        prop_assert_eq!(summary.total_out(), expected_out);
        prop_assert_eq!(summary.closing_balance(), opening + expected_in - expected_out);
        prop_assert_eq!(summary.transaction_count(), records.len());
        prop_assert!(summary.total_in() >= Decimal::ZERO);
        prop_assert!(summary.total_out() >= Decimal::ZERO);
    }

    /// Shuffling the input never changes the summary.
    #[test]
    fn prop_permutation_invariant(
        (original, shuffled) in record_batch(40).prop_flat_map(|rs| {
            let copy = rs.clone();
            (Just(rs), Just(copy).prop_shuffle())
        }),
        opening in opening_balance(),
    ) {
        let a = aggregate(&original, opening).unwrap();
        let b = aggregate(&shuffled, opening).unwrap();
        prop_assert_eq!(a, b);
    }

    /// No records means closing == opening, negative openings included.
    #[test]
    fn prop_empty_keeps_opening(opening in opening_balance()) {
        let none: Vec<TransactionRecord> = Vec::new();
        let summary = aggregate(&none, opening).unwrap();
        prop_assert_eq!(summary.closing_balance(), opening);
        prop_assert_eq!(summary.net_flow(), Decimal::ZERO);
    }

    /// A single non-positive amount fails the whole aggregation.
    #[test]
    fn prop_malformed_fails_closed(
        mut records in record_batch(20).prop_filter("non-empty", |r| !r.is_empty()),
        bad_amount in positive_amount(),
        index in any::<prop::sample::Index>(),
        opening in opening_balance(),
    ) {
        let i = index.index(records.len());
        records[i].amount = -bad_amount;

        let result = aggregate(&records, opening);
        let is_malformed = matches!(result, Err(CashError::MalformedRecord { .. }));
        prop_assert!(is_malformed);
    }
}
