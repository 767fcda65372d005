/// A struct representing a key-value pair.
#[derive(Clone, Debug)]
pub struct Entry<T, U> {
    pub key: T,
    pub value: U,
}

/// A trait for projecting the ordering key out of a stored value.
///
/// The tree stores whole values and applies the projection whenever it needs a key to compare.
/// Projection is O(1), never compares, and never clones.
pub trait ExtractKey<V> {
    type Key;

    fn extract(value: &V) -> &Self::Key;
}

/// Key extraction for sets: the stored value is the key.
#[derive(Clone, Copy, Debug, Default)]
pub struct Identity;

impl<T> ExtractKey<T> for Identity {
    type Key = T;

    fn extract(value: &T) -> &T {
        value
    }
}

/// Key extraction for maps: the key half of a stored `Entry`.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeyOfEntry;

impl<T, U> ExtractKey<Entry<T, U>> for KeyOfEntry {
    type Key = T;

    fn extract(entry: &Entry<T, U>) -> &T {
        &entry.key
    }
}
