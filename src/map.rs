//! An ordered map with stable element positions.

use crate::entry::{Entry, KeyOfEntry};
use crate::tree::{self, Position, RbTree};
use compare::{natural, Compare, Natural};
use std::fmt;
use std::fmt::Debug;
use std::iter::FromIterator;
use std::mem;
use std::ops::{Index, IndexMut};

/// An ordered map implemented using a red-black tree.
///
/// A red-black tree is a binary search tree that stays balanced by coloring each node red or
/// black and bounding the number of black nodes on any path from the root to a leaf. Insertions,
/// removals, and lookups take logarithmic time, and iteration yields entries in ascending key
/// order. Keys are unique; ordering is decided by a comparator, which is `Natural` ordering
/// unless the map is built with `with_cmp`.
///
/// Every entry occupies a stable `Position` that survives later insertions and the removal of
/// other entries, so positions can be saved and stepped with `next` and `prev` long after they
/// were obtained.
///
/// # Examples
///
/// ```
/// use ordered_collections::TreeMap;
///
/// let mut map = TreeMap::new();
/// map.insert(0, 1);
/// map.insert(3, 4);
///
/// assert_eq!(map[&0], 1);
/// assert_eq!(map.get(&1), None);
/// assert_eq!(map.len(), 2);
///
/// assert_eq!(TreeMap::min(&map), Some(&0));
/// assert_eq!(map.get_at(map.lower_bound(&2)), Some((&3, &4)));
///
/// map[&0] = 2;
/// assert_eq!(map.remove(&0), Some((0, 2)));
/// assert_eq!(map.remove(&1), None);
/// ```
#[derive(Clone)]
pub struct TreeMap<T, U, C = Natural<T>>
where
    C: Compare<T>,
{
    tree: RbTree<Entry<T, U>, KeyOfEntry, C>,
}

impl<T, U> TreeMap<T, U>
where
    T: Ord,
{
    /// Constructs a new, empty `TreeMap<T, U>` ordered by the natural ordering of `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeMap;
    ///
    /// let map: TreeMap<u32, u32> = TreeMap::new();
    /// ```
    pub fn new() -> Self {
        TreeMap::with_cmp(natural())
    }
}

impl<T, U, C> TreeMap<T, U, C>
where
    C: Compare<T>,
{
    /// Constructs a new, empty `TreeMap<T, U, C>` ordered by `cmp`.
    ///
    /// # Examples
    ///
    /// ```
    /// use compare::{natural, Compare};
    /// use ordered_collections::TreeMap;
    ///
    /// let mut map = TreeMap::with_cmp(natural().rev());
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    /// assert_eq!(TreeMap::min(&map), Some(&2));
    /// ```
    pub fn with_cmp(cmp: C) -> Self {
        TreeMap {
            tree: RbTree::with_cmp(cmp),
        }
    }

    /// Inserts a key-value pair into the map. Returns the position of the entry and `true` if the
    /// key was not present. If the key is already in the map, the map is unchanged and the
    /// position of the existing entry is returned with `false`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// let (pos, inserted) = map.insert(1, 1);
    /// assert!(inserted);
    /// assert_eq!(map.get_at(pos), Some((&1, &1)));
    ///
    /// let (same_pos, inserted) = map.insert(1, 2);
    /// assert!(!inserted);
    /// assert_eq!(same_pos, pos);
    /// assert_eq!(map.get(&1), Some(&1));
    /// ```
    pub fn insert(&mut self, key: T, value: U) -> (Position, bool) {
        self.tree.insert(Entry { key, value })
    }

    /// Inserts a key-value pair using `hint` as a starting point for the search. If the hint
    /// names the position just after the pair's ordered slot, the insertion point is found in
    /// constant time instead of logarithmic time; any other hint only slows the insertion down,
    /// it never misplaces the entry. Returns the position of the inserted entry, or of the
    /// existing entry with an equal key.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// for key in 0..5 {
    ///     let end = map.end();
    ///     map.insert_hint(end, key, key * 10);
    /// }
    /// assert_eq!(map.get(&3), Some(&30));
    /// ```
    pub fn insert_hint(&mut self, hint: Position, key: T, value: U) -> Position {
        self.tree.insert_hint(hint, Entry { key, value })
    }

    /// Removes a key-value pair from the map. If the key exists in the map, it will return the
    /// associated key-value pair. Otherwise it will return `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.remove(&1), Some((1, 1)));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove(&mut self, key: &T) -> Option<(T, U)> {
        self.tree
            .erase_key(key)
            .map(|Entry { key, value }| (key, value))
    }

    /// Removes the entry at `pos` and returns its key-value pair. Positions of other entries stay
    /// valid.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is the past-the-end position or does not name an entry of the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// let (pos, _) = map.insert(1, 1);
    /// map.insert(2, 2);
    /// assert_eq!(map.remove_at(pos), (1, 1));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn remove_at(&mut self, pos: Position) -> (T, U) {
        let Entry { key, value } = self.tree.erase(pos);
        (key, value)
    }

    /// Removes every entry from `from` up to, but not including, `to`.
    ///
    /// # Panics
    ///
    /// Panics if the two positions do not form a range of the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// for key in 0..5 {
    ///     map.insert(key, key);
    /// }
    /// let from = map.find(&1);
    /// let to = map.find(&4);
    /// map.remove_range(from, to);
    /// assert_eq!(map.iter().map(|(key, _)| *key).collect::<Vec<u32>>(), vec![0, 4]);
    /// ```
    pub fn remove_range(&mut self, from: Position, to: Position) {
        self.tree.erase_range(from, to);
    }

    /// Checks if a key exists in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.insert(1, 1);
    /// assert!(!map.contains_key(&0));
    /// assert!(map.contains_key(&1));
    /// ```
    pub fn contains_key(&self, key: &T) -> bool {
        self.tree.find(key) != self.tree.end()
    }

    /// Returns the number of entries with a key equal to `key`, which is either zero or one
    /// because keys in the map are unique.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.count(&0), 0);
    /// assert_eq!(map.count(&1), 1);
    /// ```
    pub fn count(&self, key: &T) -> usize {
        if self.contains_key(key) {
            1
        } else {
            0
        }
    }

    /// Returns an immutable reference to the value associated with a particular key. It will
    /// return `None` if the key does not exist in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.get(&0), None);
    /// assert_eq!(map.get(&1), Some(&1));
    /// ```
    pub fn get(&self, key: &T) -> Option<&U> {
        let pos = self.tree.find(key);
        self.tree.value_at(pos).map(|entry| &entry.value)
    }

    /// Returns a mutable reference to the value associated with a particular key. Returns `None`
    /// if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.insert(1, 1);
    /// *map.get_mut(&1).unwrap() = 2;
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn get_mut(&mut self, key: &T) -> Option<&mut U> {
        let pos = self.tree.find(key);
        self.tree.value_at_mut(pos).map(|entry| &mut entry.value)
    }

    /// Returns a mutable reference to the value associated with `key`, inserting the default
    /// value first if the key does not exist in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeMap;
    ///
    /// let mut map: TreeMap<u32, u32> = TreeMap::new();
    /// *map.get_or_default(1) += 5;
    /// *map.get_or_default(1) += 5;
    /// assert_eq!(map[&1], 10);
    /// ```
    pub fn get_or_default(&mut self, key: T) -> &mut U
    where
        U: Default,
    {
        let pos = self.tree.lower_bound(&key);
        let missing = match self.tree.value_at(pos) {
            Some(entry) => self.tree.cmp().compares_lt(&key, &entry.key),
            None => true,
        };
        let pos = if missing {
            let value = U::default();
            self.tree.insert_hint(pos, Entry { key, value })
        } else {
            pos
        };
        &mut self
            .tree
            .value_at_mut(pos)
            .expect("Expected a value-carrying node.")
            .value
    }

    /// Returns the key-value pair at `pos`, or `None` if `pos` is the past-the-end position.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// let (pos, _) = map.insert(1, 1);
    /// assert_eq!(map.get_at(pos), Some((&1, &1)));
    /// assert_eq!(map.get_at(map.end()), None);
    /// ```
    pub fn get_at(&self, pos: Position) -> Option<(&T, &U)> {
        self.tree
            .value_at(pos)
            .map(|entry| (&entry.key, &entry.value))
    }

    /// Returns a mutable reference to the value at `pos`, or `None` if `pos` is the past-the-end
    /// position. The key is not mutable; changing it could put the entry out of order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// let (pos, _) = map.insert(1, 1);
    /// *map.get_at_mut(pos).unwrap() = 2;
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn get_at_mut(&mut self, pos: Position) -> Option<&mut U> {
        self.tree.value_at_mut(pos).map(|entry| &mut entry.value)
    }

    /// Returns the position of the entry with a key equal to `key`, or the past-the-end position
    /// if the key does not exist in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.get_at(map.find(&1)), Some((&1, &1)));
    /// assert_eq!(map.find(&2), map.end());
    /// ```
    pub fn find(&self, key: &T) -> Position {
        self.tree.find(key)
    }

    /// Returns the position of the first entry whose key is not less than `key`, or the
    /// past-the-end position if there is no such entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    /// assert_eq!(map.get_at(map.lower_bound(&2)), Some((&3, &3)));
    /// assert_eq!(map.get_at(map.lower_bound(&3)), Some((&3, &3)));
    /// assert_eq!(map.lower_bound(&4), map.end());
    /// ```
    pub fn lower_bound(&self, key: &T) -> Position {
        self.tree.lower_bound(key)
    }

    /// Returns the position of the first entry whose key is greater than `key`, or the
    /// past-the-end position if there is no such entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    /// assert_eq!(map.get_at(map.upper_bound(&2)), Some((&3, &3)));
    /// assert_eq!(map.upper_bound(&3), map.end());
    /// ```
    pub fn upper_bound(&self, key: &T) -> Position {
        self.tree.upper_bound(key)
    }

    /// Returns the pair of positions `(lower_bound(key), upper_bound(key))`. The two are equal
    /// exactly when the key does not exist in the map; otherwise the range holds the one entry
    /// with an equal key.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.insert(1, 1);
    ///
    /// let (low, high) = map.equal_range(&1);
    /// assert_eq!(map.get_at(low), Some((&1, &1)));
    /// assert_eq!(high, map.end());
    ///
    /// let (low, high) = map.equal_range(&0);
    /// assert_eq!(low, high);
    /// ```
    pub fn equal_range(&self, key: &T) -> (Position, Position) {
        self.tree.equal_range(key)
    }

    /// Returns the position of the first entry in key order. Equals the past-the-end position
    /// when the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// assert_eq!(map.begin(), map.end());
    /// map.insert(1, 1);
    /// assert_eq!(map.get_at(map.begin()), Some((&1, &1)));
    /// ```
    pub fn begin(&self) -> Position {
        self.tree.begin()
    }

    /// Returns the past-the-end position. It names no entry, and it is where `find` and the bound
    /// lookups land when nothing matches.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeMap;
    ///
    /// let map: TreeMap<u32, u32> = TreeMap::new();
    /// assert_eq!(map.get_at(map.end()), None);
    /// ```
    pub fn end(&self) -> Position {
        self.tree.end()
    }

    /// Returns the position of the entry following `pos` in key order. The past-the-end position
    /// is its own successor.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    ///
    /// let pos = map.next(map.begin());
    /// assert_eq!(map.get_at(pos), Some((&2, &2)));
    /// assert_eq!(map.next(pos), map.end());
    /// ```
    pub fn next(&self, pos: Position) -> Position {
        self.tree.next(pos)
    }

    /// Returns the position of the entry preceding `pos` in key order. Stepping back from the
    /// past-the-end position yields the last entry; the first position is its own predecessor.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    ///
    /// let pos = map.prev(map.end());
    /// assert_eq!(map.get_at(pos), Some((&2, &2)));
    /// ```
    pub fn prev(&self, pos: Position) -> Position {
        self.tree.prev(pos)
    }

    /// Returns the number of entries in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeMap;
    ///
    /// let map: TreeMap<u32, u32> = TreeMap::new();
    /// assert!(map.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the maximum number of entries the map can hold.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeMap;
    ///
    /// let map: TreeMap<u32, u32> = TreeMap::new();
    /// assert!(map.max_len() >= map.len());
    /// ```
    pub fn max_len(&self) -> usize {
        self.tree.max_len()
    }

    /// Clears the map, removing all entries and invalidating every position.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    /// map.clear();
    /// assert_eq!(map.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Swaps the contents of two maps without moving any entry. Positions stay valid and keep
    /// naming the entries they named, which now live in the other map.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.insert(1, 1);
    /// let pos = map.find(&1);
    ///
    /// let mut other = TreeMap::new();
    /// other.insert(2, 2);
    ///
    /// map.swap(&mut other);
    /// assert_eq!(map.get(&2), Some(&2));
    /// assert_eq!(other.get_at(pos), Some((&1, &1)));
    /// ```
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.tree, &mut other.tree);
    }

    /// Returns the minimum key of the map. Returns `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    /// assert_eq!(TreeMap::min(&map), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&T> {
        self.tree.value_at(self.tree.begin()).map(|entry| &entry.key)
    }

    /// Returns the maximum key of the map. Returns `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    /// assert_eq!(TreeMap::max(&map), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&T> {
        let pos = self.tree.prev(self.tree.end());
        self.tree.value_at(pos).map(|entry| &entry.key)
    }

    /// Returns a reference to the map's comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use compare::{natural, Compare};
    /// use ordered_collections::TreeMap;
    ///
    /// let map: TreeMap<u32, u32> = TreeMap::new();
    /// assert!(map.cmp().compares_lt(&1, &2));
    /// ```
    pub fn cmp(&self) -> &C {
        self.tree.cmp()
    }

    /// Returns an iterator over the map. The iterator will yield key-value pairs in ascending key
    /// order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    ///
    /// let mut iterator = map.iter();
    /// assert_eq!(iterator.next(), Some((&1, &1)));
    /// assert_eq!(iterator.next(), Some((&2, &2)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> TreeMapIter<'_, T, U> {
        TreeMapIter {
            iter: self.tree.iter(),
        }
    }

    /// Returns an iterator over the keys of the map in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.insert(1, 2);
    /// map.insert(3, 4);
    ///
    /// assert_eq!(map.keys().collect::<Vec<&u32>>(), vec![&1, &3]);
    /// ```
    pub fn keys(&self) -> TreeMapKeys<'_, T, U> {
        TreeMapKeys { iter: self.iter() }
    }

    /// Returns an iterator over the values of the map, in ascending order of their keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.insert(1, 2);
    /// map.insert(3, 4);
    ///
    /// assert_eq!(map.values().collect::<Vec<&u32>>(), vec![&2, &4]);
    /// ```
    pub fn values(&self) -> TreeMapValues<'_, T, U> {
        TreeMapValues { iter: self.iter() }
    }
}

impl<T, U, C> IntoIterator for TreeMap<T, U, C>
where
    C: Compare<T>,
{
    type IntoIter = TreeMapIntoIter<T, U>;
    type Item = (T, U);

    fn into_iter(self) -> Self::IntoIter {
        TreeMapIntoIter {
            iter: self.tree.into_iter(),
        }
    }
}

impl<'a, T, U, C> IntoIterator for &'a TreeMap<T, U, C>
where
    C: Compare<T>,
{
    type IntoIter = TreeMapIter<'a, T, U>;
    type Item = (&'a T, &'a U);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `TreeMap<T, U>`.
///
/// This iterator traverses the entries of the map in-order and yields owned key-value pairs.
pub struct TreeMapIntoIter<T, U> {
    iter: tree::IntoIter<Entry<T, U>>,
}

impl<T, U> Iterator for TreeMapIntoIter<T, U> {
    type Item = (T, U);

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|Entry { key, value }| (key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<T, U> DoubleEndedIterator for TreeMapIntoIter<T, U> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter
            .next_back()
            .map(|Entry { key, value }| (key, value))
    }
}

impl<T, U> ExactSizeIterator for TreeMapIntoIter<T, U> {}

/// An iterator for `TreeMap<T, U>`.
///
/// This iterator traverses the entries of the map in-order and yields immutable references.
pub struct TreeMapIter<'a, T, U> {
    iter: tree::Iter<'a, Entry<T, U>>,
}

impl<'a, T, U> Clone for TreeMapIter<'a, T, U> {
    fn clone(&self) -> Self {
        TreeMapIter {
            iter: self.iter.clone(),
        }
    }
}

impl<'a, T, U> Iterator for TreeMapIter<'a, T, U> {
    type Item = (&'a T, &'a U);

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|entry| (&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<'a, T, U> DoubleEndedIterator for TreeMapIter<'a, T, U> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter
            .next_back()
            .map(|entry| (&entry.key, &entry.value))
    }
}

impl<'a, T, U> ExactSizeIterator for TreeMapIter<'a, T, U> {}

/// An iterator over the keys of a `TreeMap<T, U>` in ascending order.
pub struct TreeMapKeys<'a, T, U> {
    iter: TreeMapIter<'a, T, U>,
}

impl<'a, T, U> Clone for TreeMapKeys<'a, T, U> {
    fn clone(&self) -> Self {
        TreeMapKeys {
            iter: self.iter.clone(),
        }
    }
}

impl<'a, T, U> Iterator for TreeMapKeys<'a, T, U> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<'a, T, U> DoubleEndedIterator for TreeMapKeys<'a, T, U> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back().map(|(key, _)| key)
    }
}

impl<'a, T, U> ExactSizeIterator for TreeMapKeys<'a, T, U> {}

/// An iterator over the values of a `TreeMap<T, U>`, in ascending order of their keys.
pub struct TreeMapValues<'a, T, U> {
    iter: TreeMapIter<'a, T, U>,
}

impl<'a, T, U> Clone for TreeMapValues<'a, T, U> {
    fn clone(&self) -> Self {
        TreeMapValues {
            iter: self.iter.clone(),
        }
    }
}

impl<'a, T, U> Iterator for TreeMapValues<'a, T, U> {
    type Item = &'a U;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<'a, T, U> DoubleEndedIterator for TreeMapValues<'a, T, U> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back().map(|(_, value)| value)
    }
}

impl<'a, T, U> ExactSizeIterator for TreeMapValues<'a, T, U> {}

impl<T, U, C> Extend<(T, U)> for TreeMap<T, U, C>
where
    C: Compare<T>,
{
    /// Each pair is offered with the past-the-end position as a hint, so extending from input
    /// that is already sorted takes linear time.
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = (T, U)>,
    {
        for (key, value) in iter {
            let end = self.end();
            self.insert_hint(end, key, value);
        }
    }
}

impl<T, U, C> FromIterator<(T, U)> for TreeMap<T, U, C>
where
    C: Compare<T> + Default,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (T, U)>,
    {
        let mut map = TreeMap::with_cmp(C::default());
        map.extend(iter);
        map
    }
}

impl<T, U, C> Default for TreeMap<T, U, C>
where
    C: Compare<T> + Default,
{
    fn default() -> Self {
        TreeMap::with_cmp(C::default())
    }
}

impl<T, U, C> Debug for TreeMap<T, U, C>
where
    T: Debug,
    U: Debug,
    C: Compare<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<T, U, C> PartialEq for TreeMap<T, U, C>
where
    T: PartialEq,
    U: PartialEq,
    C: Compare<T>,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T, U, C> Eq for TreeMap<T, U, C>
where
    T: Eq,
    U: Eq,
    C: Compare<T>,
{
}

impl<T, U, C> PartialOrd for TreeMap<T, U, C>
where
    T: PartialOrd,
    U: PartialOrd,
    C: Compare<T>,
{
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T, U, C> Ord for TreeMap<T, U, C>
where
    T: Ord,
    U: Ord,
    C: Compare<T>,
{
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<'a, T, U, C> Index<&'a T> for TreeMap<T, U, C>
where
    C: Compare<T>,
{
    type Output = U;

    fn index(&self, key: &T) -> &Self::Output {
        self.get(key).expect("Error: key does not exist.")
    }
}

impl<'a, T, U, C> IndexMut<&'a T> for TreeMap<T, U, C>
where
    C: Compare<T>,
{
    fn index_mut(&mut self, key: &T) -> &mut Self::Output {
        self.get_mut(key).expect("Error: key does not exist.")
    }
}

#[cfg(test)]
mod tests {
    use super::TreeMap;
    use compare::{natural, Compare};

    #[test]
    fn test_len_empty() {
        let map: TreeMap<u32, u32> = TreeMap::new();
        assert_eq!(map.len(), 0);
    }

    #[test]
    fn test_is_empty() {
        let map: TreeMap<u32, u32> = TreeMap::new();
        assert!(map.is_empty());
    }

    #[test]
    fn test_min_max_empty() {
        let map: TreeMap<u32, u32> = TreeMap::new();
        assert_eq!(TreeMap::min(&map), None);
        assert_eq!(TreeMap::max(&map), None);
    }

    #[test]
    fn test_insert() {
        let mut map = TreeMap::new();
        let (pos, inserted) = map.insert(1, 1);
        assert!(inserted);
        assert!(map.contains_key(&1));
        assert_eq!(map.get(&1), Some(&1));
        assert_eq!(map.get_at(pos), Some((&1, &1)));
    }

    #[test]
    fn test_insert_duplicate_keeps_value() {
        let mut map = TreeMap::new();
        let (pos, _) = map.insert(1, 1);
        let (existing, inserted) = map.insert(1, 3);
        assert!(!inserted);
        assert_eq!(existing, pos);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&1), Some(&1));
    }

    #[test]
    fn test_insert_hint_sorted() {
        let mut map = TreeMap::new();
        for key in 0..100 {
            let end = map.end();
            map.insert_hint(end, key, key * 2);
        }
        assert_eq!(map.len(), 100);
        for key in 0..100 {
            assert_eq!(map.get(&key), Some(&(key * 2)));
        }
    }

    #[test]
    fn test_remove() {
        let mut map = TreeMap::new();
        map.insert(1, 1);
        assert_eq!(map.remove(&1), Some((1, 1)));
        assert!(!map.contains_key(&1));
        assert_eq!(map.remove(&1), None);
    }

    #[test]
    fn test_remove_at() {
        let mut map = TreeMap::new();
        map.insert(1, 1);
        let (pos, _) = map.insert(2, 2);
        map.insert(3, 3);
        assert_eq!(map.remove_at(pos), (2, 2));
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&2), None);
    }

    #[test]
    #[should_panic]
    fn test_remove_at_end_position() {
        let mut map = TreeMap::new();
        map.insert(1, 1);
        let end = map.end();
        map.remove_at(end);
    }

    #[test]
    fn test_remove_range() {
        let mut map = TreeMap::new();
        for key in 0..10 {
            map.insert(key, key);
        }
        let from = map.find(&3);
        let to = map.find(&7);
        map.remove_range(from, to);
        assert_eq!(
            map.keys().cloned().collect::<Vec<u32>>(),
            vec![0, 1, 2, 7, 8, 9],
        );
    }

    #[test]
    fn test_remove_range_all() {
        let mut map = TreeMap::new();
        for key in 0..10 {
            map.insert(key, key);
        }
        let begin = map.begin();
        let end = map.end();
        map.remove_range(begin, end);
        assert!(map.is_empty());
    }

    #[test]
    fn test_count() {
        let mut map = TreeMap::new();
        map.insert(1, 1);
        assert_eq!(map.count(&0), 0);
        assert_eq!(map.count(&1), 1);
    }

    #[test]
    fn test_get_mut() {
        let mut map = TreeMap::new();
        map.insert(1, 1);
        {
            let value = map.get_mut(&1);
            *value.unwrap() = 3;
        }
        assert_eq!(map.get(&1), Some(&3));
    }

    #[test]
    fn test_get_or_default() {
        let mut map = TreeMap::new();
        map.insert(1, 10);
        assert_eq!(*map.get_or_default(1), 10);
        assert_eq!(*map.get_or_default(2), 0);
        *map.get_or_default(2) += 7;
        assert_eq!(map.get(&2), Some(&7));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_min_max() {
        let mut map = TreeMap::new();
        map.insert(1, 1);
        map.insert(3, 3);
        map.insert(5, 5);

        assert_eq!(TreeMap::min(&map), Some(&1));
        assert_eq!(TreeMap::max(&map), Some(&5));
    }

    #[test]
    fn test_bounds() {
        let mut map = TreeMap::new();
        map.insert(1, 1);
        map.insert(3, 3);
        map.insert(5, 5);

        assert_eq!(map.get_at(map.lower_bound(&0)), Some((&1, &1)));
        assert_eq!(map.get_at(map.lower_bound(&3)), Some((&3, &3)));
        assert_eq!(map.lower_bound(&6), map.end());

        assert_eq!(map.get_at(map.upper_bound(&0)), Some((&1, &1)));
        assert_eq!(map.get_at(map.upper_bound(&3)), Some((&5, &5)));
        assert_eq!(map.upper_bound(&5), map.end());

        let (low, high) = map.equal_range(&3);
        assert_eq!(map.get_at(low), Some((&3, &3)));
        assert_eq!(map.get_at(high), Some((&5, &5)));
        let (low, high) = map.equal_range(&2);
        assert_eq!(low, high);
    }

    #[test]
    fn test_positions_walk() {
        let mut map = TreeMap::new();
        map.insert(1, 1);
        map.insert(2, 2);
        map.insert(3, 3);

        let mut keys = Vec::new();
        let mut pos = map.begin();
        while pos != map.end() {
            keys.push(*map.get_at(pos).unwrap().0);
            pos = map.next(pos);
        }
        assert_eq!(keys, vec![1, 2, 3]);

        let pos = map.prev(map.end());
        assert_eq!(map.get_at(pos), Some((&3, &3)));
    }

    #[test]
    fn test_positions_survive_inserts() {
        let mut map = TreeMap::new();
        let (pos, _) = map.insert(50, 50);
        for key in 0..50 {
            map.insert(key, key);
        }
        assert_eq!(map.get_at(pos), Some((&50, &50)));
    }

    #[test]
    fn test_swap() {
        let mut map = TreeMap::new();
        map.insert(1, 1);
        let pos = map.find(&1);

        let mut other = TreeMap::new();
        other.insert(2, 2);

        map.swap(&mut other);
        assert_eq!(map.get(&1), None);
        assert_eq!(map.get(&2), Some(&2));
        assert_eq!(other.get_at(pos), Some((&1, &1)));
    }

    #[test]
    fn test_index() {
        let mut map = TreeMap::new();
        map.insert(1, 1);
        map[&1] = 3;
        assert_eq!(map[&1], 3);
    }

    #[test]
    #[should_panic]
    fn test_index_panics_on_missing_key() {
        let map: TreeMap<u32, u32> = TreeMap::new();
        let _ = map[&0];
    }

    #[test]
    fn test_into_iter() {
        let mut map = TreeMap::new();
        map.insert(1, 2);
        map.insert(5, 6);
        map.insert(3, 4);

        assert_eq!(
            map.into_iter().collect::<Vec<(u32, u32)>>(),
            vec![(1, 2), (3, 4), (5, 6)],
        );
    }

    #[test]
    fn test_iter() {
        let mut map = TreeMap::new();
        map.insert(1, 2);
        map.insert(5, 6);
        map.insert(3, 4);

        assert_eq!(
            map.iter().collect::<Vec<(&u32, &u32)>>(),
            vec![(&1, &2), (&3, &4), (&5, &6)],
        );
    }

    #[test]
    fn test_iter_rev() {
        let mut map = TreeMap::new();
        map.insert(1, 2);
        map.insert(5, 6);
        map.insert(3, 4);

        assert_eq!(
            map.iter().rev().collect::<Vec<(&u32, &u32)>>(),
            vec![(&5, &6), (&3, &4), (&1, &2)],
        );
    }

    #[test]
    fn test_keys_values() {
        let mut map = TreeMap::new();
        map.insert(1, 2);
        map.insert(3, 4);

        assert_eq!(map.keys().collect::<Vec<&u32>>(), vec![&1, &3]);
        assert_eq!(map.values().collect::<Vec<&u32>>(), vec![&2, &4]);
    }

    #[test]
    fn test_from_iterator_and_extend() {
        let mut map = (0..5).map(|key| (key, key)).collect::<TreeMap<u32, u32>>();
        map.extend((5..10).map(|key| (key, key)));
        assert_eq!(map.len(), 10);
        assert_eq!(map.keys().cloned().collect::<Vec<u32>>(), (0..10).collect::<Vec<u32>>());
    }

    #[test]
    fn test_comparisons() {
        let left = vec![(1, 1), (2, 2)].into_iter().collect::<TreeMap<u32, u32>>();
        let right = vec![(2, 2), (1, 1)].into_iter().collect::<TreeMap<u32, u32>>();
        assert_eq!(left, right);

        let smaller = vec![(1, 1)].into_iter().collect::<TreeMap<u32, u32>>();
        assert!(smaller < left);
        let diverging = vec![(1, 1), (3, 0)].into_iter().collect::<TreeMap<u32, u32>>();
        assert!(left < diverging);
    }

    #[test]
    fn test_debug() {
        let mut map = TreeMap::new();
        map.insert(3, 4);
        map.insert(1, 2);
        assert_eq!(format!("{:?}", map), "{1: 2, 3: 4}");
    }

    #[test]
    fn test_custom_comparator() {
        let mut map = TreeMap::with_cmp(natural().rev());
        map.insert(1, 1);
        map.insert(2, 2);
        map.insert(3, 3);
        assert_eq!(TreeMap::min(&map), Some(&3));
        assert_eq!(
            map.keys().cloned().collect::<Vec<u32>>(),
            vec![3, 2, 1],
        );
    }

    #[test]
    fn test_clone_evolves_independently() {
        let mut map = TreeMap::new();
        map.insert(1, 1);
        map.insert(2, 2);
        let mut copy = map.clone();
        assert_eq!(map, copy);

        copy.insert(3, 3);
        copy.remove(&1);
        assert_eq!(map.get(&1), Some(&1));
        assert_eq!(map.len(), 2);
        assert_eq!(copy.len(), 2);
        assert!(!copy.contains_key(&1));
    }
}
