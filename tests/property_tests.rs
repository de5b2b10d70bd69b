//! Property Tests
//!
//! Ordering invariants checked over arbitrary insertion sequences.

use proptest::prelude::*;
use tscolumns::{ColumnStore, Value};

const KEYS: [&str; 2] = ["time", "seq"];

/// Store built by inserting `times` in order, with `seq` = insertion number
fn build(times: &[i64]) -> ColumnStore {
    ColumnStore::from_rows(
        &KEYS,
        "time",
        times
            .iter()
            .enumerate()
            .map(|(i, &t)| vec![Value::Int(t), Value::Int(i as i64)]),
    )
    .unwrap()
}

proptest! {
    #[test]
    fn prop_index_sorted_after_every_insert(times in prop::collection::vec(-50i64..50, 0..64)) {
        let mut store = ColumnStore::new(KEYS, "time").unwrap();
        for (i, &t) in times.iter().enumerate() {
            store.add_row(vec![Value::Int(t), Value::Int(i as i64)], &KEYS).unwrap();
            prop_assert!(store.index().windows(2).all(|w| w[0] <= w[1]));
            prop_assert_eq!(store.len(), i + 1);
            prop_assert!(store.validate().is_ok());
        }
    }

    #[test]
    fn prop_ties_keep_insertion_order(times in prop::collection::vec(0i64..5, 0..64)) {
        let store = build(&times);
        let index = store.index();
        let seq = store.column("seq").unwrap();
        for i in 1..store.len() {
            if index[i - 1] == index[i] {
                prop_assert!(seq[i - 1] < seq[i]);
            }
        }
    }

    #[test]
    fn prop_full_slice_round_trips(times in prop::collection::vec(any::<i64>(), 0..32)) {
        let store = build(&times);
        prop_assert_eq!(store.iloc().slice(..), store.clone());
    }

    #[test]
    fn prop_loc_matches_leftmost_iloc(
        times in prop::collection::vec(-20i64..20, 1..48),
        pick in any::<prop::sample::Index>(),
    ) {
        let store = build(&times);
        let value = store.index()[pick.index(store.len())].clone();
        let position = store.index().iter().position(|v| *v >= value).unwrap();

        prop_assert_eq!(store.loc().get(&value), store.iloc().get(position as isize).unwrap());
    }

    #[test]
    fn prop_loc_range_is_half_open(
        times in prop::collection::vec(-20i64..20, 0..48),
        start in -25i64..25,
        stop in -25i64..25,
    ) {
        let store = build(&times);
        let window = store.loc().range(Some(&Value::Int(start)), Some(&Value::Int(stop)));

        let expected = times.iter().filter(|&&t| start <= t && t < stop).count();
        prop_assert_eq!(window.len(), expected);
        prop_assert!(window
            .index()
            .iter()
            .all(|v| *v >= Value::Int(start) && *v < Value::Int(stop)));
    }

    #[test]
    fn prop_merge_equals_repeated_insert(
        base in prop::collection::vec(0i64..10, 0..32),
        incoming in prop::collection::vec(0i64..10, 0..32),
    ) {
        let other = ColumnStore::from_rows(
            &KEYS,
            "time",
            incoming.iter().map(|&t| vec![Value::Int(t), Value::Int(-1 - t)]),
        )
        .unwrap();

        let mut merged = build(&base);
        merged.merge(&other).unwrap();

        let mut inserted = build(&base);
        for row in other.iter() {
            let (rows, names) = row.to_rows();
            inserted.add_rows(rows, &names).unwrap();
        }

        prop_assert_eq!(merged, inserted);
    }
}
