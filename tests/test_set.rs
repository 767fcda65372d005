use ordered_collections::TreeSet;
use rand::Rng;
use std::collections::BTreeSet;

const NUM_OF_OPERATIONS: usize = 100_000;
const KEY_SPACE: u32 = 10_000;

#[test]
fn int_test_set_against_reference() {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut set = TreeSet::new();
    let mut expected = BTreeSet::new();

    for _ in 0..NUM_OF_OPERATIONS {
        let value = rng.gen_range(0, KEY_SPACE);
        match rng.gen_range(0, 4) {
            0 | 1 => {
                let (pos, inserted) = set.insert(value);
                assert_eq!(set.get_at(pos), Some(&value));
                assert_eq!(inserted, expected.insert(value));
            }
            2 => {
                let removed = set.remove(&value);
                let model_removed = expected.remove(&value);
                assert_eq!(removed.is_some(), model_removed);
                assert_eq!(removed, if model_removed { Some(value) } else { None });
            }
            _ => {
                assert_eq!(set.contains(&value), expected.contains(&value));
                let expected_count = if expected.contains(&value) { 1 } else { 0 };
                assert_eq!(set.count(&value), expected_count);
            }
        }
        assert_eq!(set.len(), expected.len());
    }

    assert_eq!(TreeSet::min(&set), expected.iter().next());
    assert_eq!(TreeSet::max(&set), expected.iter().next_back());
    assert_eq!(
        set.iter().collect::<Vec<&u32>>(),
        expected.iter().collect::<Vec<&u32>>(),
    );
    assert_eq!(
        set.into_iter().collect::<Vec<u32>>(),
        expected.into_iter().collect::<Vec<u32>>(),
    );
}

#[test]
fn int_test_set_range_removal() {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut set = TreeSet::new();
    let mut expected = BTreeSet::new();

    for _ in 0..1000 {
        let value = rng.gen_range(0, 1000);
        set.insert(value);
        expected.insert(value);
    }

    // Removes [200, 600) and compares against the reference.
    let from = set.lower_bound(&200);
    let to = set.lower_bound(&600);
    set.remove_range(from, to);
    let expected = expected
        .into_iter()
        .filter(|value| *value < 200 || *value >= 600)
        .collect::<Vec<u32>>();
    assert_eq!(set.iter().cloned().collect::<Vec<u32>>(), expected);
}

#[test]
fn int_test_set_extend_sorted() {
    let mut set = TreeSet::new();
    set.extend(0..10_000u32);
    assert_eq!(set.len(), 10_000);
    assert_eq!(TreeSet::min(&set), Some(&0));
    assert_eq!(TreeSet::max(&set), Some(&9_999));
    assert_eq!(
        set.iter().cloned().collect::<Vec<u32>>(),
        (0..10_000).collect::<Vec<u32>>(),
    );
}
