//! Property-based tests for transaction filtering.
//!
//! - Filtering is idempotent
//! - The empty query is the identity
//! - Results keep input order and satisfy every predicate

use chrono::{DateTime, TimeZone};
use chrono_tz::Asia::Karachi;
use chrono_tz::Tz;
use proptest::prelude::*;

use super::filter::{DateBucket, TransactionQuery, TypeFilter, filter};
use super::record::TransactionRecord;
use crate::test_support::{record_batch, timestamp};

fn type_filter() -> impl Strategy<Value = TypeFilter> {
    prop_oneof![
        Just(TypeFilter::All),
        Just(TypeFilter::In),
        Just(TypeFilter::Out)
    ]
}

fn date_bucket() -> impl Strategy<Value = DateBucket> {
    prop_oneof![
        Just(DateBucket::Today),
        Just(DateBucket::Yesterday),
        Just(DateBucket::Week),
        Just(DateBucket::Month),
        Just(DateBucket::All),
    ]
}

fn any_query() -> impl Strategy<Value = TransactionQuery> {
    (
        proptest::option::of(prop_oneof![
            Just("sales".to_string()),
            Just("ALI".to_string()),
            Just("ref-0".to_string()),
            Just("deposit".to_string()),
            Just(String::new()),
        ]),
        type_filter(),
        date_bucket(),
    )
        .prop_map(|(text, direction, date_bucket)| TransactionQuery {
            text,
            direction,
            date_bucket,
        })
}

fn any_now() -> impl Strategy<Value = DateTime<Tz>> {
    timestamp().prop_map(|ts| Karachi.from_utc_datetime(&ts.naive_utc()))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// filter(filter(R, Q), Q) == filter(R, Q)
    #[test]
    fn prop_filter_idempotent(records in record_batch(40), query in any_query(), now in any_now()) {
        let once: Vec<TransactionRecord> = filter(&records, &query, &now)
            .unwrap()
            .into_iter()
            .cloned()
            .collect();
        let twice = filter(&once, &query, &now).unwrap();

        prop_assert_eq!(twice, once.iter().collect::<Vec<_>>());
    }

    /// Empty text, `all` type and `all` bucket returns the input unchanged.
    #[test]
    fn prop_empty_query_is_identity(records in record_batch(40), now in any_now()) {
        let result = filter(&records, &TransactionQuery::all(), &now).unwrap();
        prop_assert_eq!(result, records.iter().collect::<Vec<_>>());
    }

    /// Every selected record satisfies each predicate, in input order.
    #[test]
    fn prop_filter_is_stable_subsequence(
        records in record_batch(40),
        query in any_query(),
        now in any_now(),
    ) {
        let result = filter(&records, &query, &now).unwrap();

        let mut cursor = records.iter();
        for selected in &result {
            prop_assert!(query.direction.matches(selected.direction));
            prop_assert!(query.date_bucket.contains(&selected.timestamp, &now));
            prop_assert!(cursor.any(|r| std::ptr::eq(r, *selected)));
        }
    }
}
