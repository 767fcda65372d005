use compare::Compare;
use ordered_collections::{TreeMap, TreeSet};
use proptest::prelude::*;
use std::cell::Cell;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::rc::Rc;

/// A natural ordering on `u32` that counts how many times it is consulted.
#[derive(Clone, Default)]
struct CountingCmp {
    count: Rc<Cell<usize>>,
}

impl Compare<u32> for CountingCmp {
    fn compare(&self, l: &u32, r: &u32) -> Ordering {
        self.count.set(self.count.get() + 1);
        l.cmp(r)
    }
}

#[test]
fn positions_survive_unrelated_inserts() {
    let mut map = TreeMap::new();
    let mut tracked = HashMap::new();

    for key in (0..2000u32).filter(|key| key % 2 == 0) {
        let (pos, inserted) = map.insert(key, key * 7);
        assert!(inserted);
        tracked.insert(key, pos);
    }
    for key in (0..2000u32).filter(|key| key % 2 == 1) {
        map.insert(key, key * 7);
        let probe = key.saturating_sub(1);
        assert_eq!(map.get_at(tracked[&probe]), Some((&probe, &(probe * 7))));
    }
    for (key, pos) in &tracked {
        assert_eq!(map.get_at(*pos), Some((key, &(key * 7))));
    }
}

#[test]
fn removal_invalidates_only_the_removed_position() {
    let mut set = TreeSet::new();
    let mut positions = Vec::new();
    for value in 0..100u32 {
        let (pos, _) = set.insert(value);
        positions.push(pos);
    }

    for value in (0..100u32).filter(|value| value % 3 == 0) {
        assert_eq!(set.remove_at(positions[value as usize]), value);
    }

    for value in (0..100u32).filter(|value| value % 3 != 0) {
        assert_eq!(set.get_at(positions[value as usize]), Some(&value));
    }

    // Stepping from a survivor crosses the gaps the removals left.
    assert_eq!(set.next(positions[2]), positions[4]);
    assert_eq!(set.prev(positions[4]), positions[2]);
    assert_eq!(set.prev(positions[1]), positions[1]);

    let walked = {
        let mut values = Vec::new();
        let mut pos = set.begin();
        while pos != set.end() {
            values.push(*set.get_at(pos).unwrap());
            pos = set.next(pos);
        }
        values
    };
    assert_eq!(
        walked,
        (0..100u32).filter(|value| value % 3 != 0).collect::<Vec<u32>>(),
    );
}

#[test]
fn duplicate_insert_returns_existing_position() {
    let mut set = TreeSet::new();
    let (pos, inserted) = set.insert(5);
    assert!(inserted);

    let snapshot = set.iter().cloned().collect::<Vec<u32>>();
    let (existing, inserted) = set.insert(5);
    assert!(!inserted);
    assert_eq!(existing, pos);
    assert_eq!(set.iter().cloned().collect::<Vec<u32>>(), snapshot);

    // A duplicate offered through a hint behaves the same way.
    let end = set.end();
    assert_eq!(set.insert_hint(end, 5), pos);
    assert_eq!(set.len(), 1);
}

#[test]
fn cloned_container_keeps_positions_and_evolves_independently() {
    let mut map = TreeMap::new();
    for key in 0..100u32 {
        map.insert(key, key);
    }
    let pos = map.find(&40);

    let mut copy = map.clone();
    assert_eq!(copy.get_at(pos), Some((&40, &40)));

    copy.remove(&40);
    copy.insert(1000, 1000);
    assert_eq!(map.get_at(pos), Some((&40, &40)));
    assert_eq!(map.len(), 100);
    assert_eq!(copy.len(), 100);
    assert!(!copy.contains_key(&40));
    assert!(!map.contains_key(&1000));
}

#[test]
fn hinted_ascending_insert_uses_linear_comparisons() {
    let cmp = CountingCmp::default();
    let mut set = TreeSet::with_cmp(cmp.clone());

    for value in 0..100_000u32 {
        let end = set.end();
        set.insert_hint(end, value);
    }

    assert_eq!(set.len(), 100_000);
    // Each append resolves against the maximum and its new parent only.
    assert!(cmp.count.get() <= 3 * 100_000);
}

#[test]
fn sorted_extend_uses_linear_comparisons() {
    let cmp = CountingCmp::default();
    let mut map = TreeMap::with_cmp(cmp.clone());

    map.extend((0..100_000u32).map(|key| (key, key)));

    assert_eq!(map.len(), 100_000);
    assert!(cmp.count.get() <= 3 * 100_000);
}

#[test]
fn end_hint_beats_plain_insert_on_ascending_input() {
    let hinted_cmp = CountingCmp::default();
    let mut hinted = TreeSet::with_cmp(hinted_cmp.clone());
    let plain_cmp = CountingCmp::default();
    let mut plain = TreeSet::with_cmp(plain_cmp.clone());

    for value in 0..2048u32 {
        let end = hinted.end();
        hinted.insert_hint(end, value);
        plain.insert(value);
    }

    assert_eq!(hinted, plain);
    assert!(hinted_cmp.count.get() * 2 < plain_cmp.count.get());
}

proptest!(
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn hinted_insert_matches_plain_insert(
        values in proptest::collection::vec(0u32..64, 1..128),
        selectors in proptest::collection::vec(0usize..5, 1..128),
    ) {
        let mut plain = TreeSet::new();
        let mut hinted = TreeSet::new();

        for (value, selector) in values.into_iter().zip(selectors) {
            plain.insert(value);
            let hint = match selector {
                0 => hinted.end(),
                1 => hinted.begin(),
                2 => hinted.lower_bound(&value),
                3 => hinted.upper_bound(&value),
                _ => {
                    let steps = value as usize % (hinted.len() + 1);
                    let mut pos = hinted.begin();
                    for _ in 0..steps {
                        pos = hinted.next(pos);
                    }
                    pos
                }
            };
            hinted.insert_hint(hint, value);
            prop_assert_eq!(hinted.len(), plain.len());
        }

        prop_assert_eq!(
            hinted.iter().collect::<Vec<&u32>>(),
            plain.iter().collect::<Vec<&u32>>(),
        );
    }

    #[test]
    fn position_walk_stays_sorted_under_churn(
        operations in proptest::collection::vec((0u32..256, proptest::bool::ANY), 1..512),
    ) {
        let mut set = TreeSet::new();
        for (value, insert) in operations {
            if insert {
                set.insert(value);
            } else {
                set.remove(&value);
            }
        }

        let mut walked = Vec::new();
        let mut pos = set.begin();
        while pos != set.end() {
            walked.push(*set.get_at(pos).unwrap());
            pos = set.next(pos);
        }
        prop_assert_eq!(walked.len(), set.len());
        for window in walked.windows(2) {
            prop_assert!(window[0] < window[1]);
        }
    }
);
