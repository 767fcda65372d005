//! An ordered set with stable element positions.

use crate::entry::Identity;
use crate::tree::{self, Position, RbTree};
use compare::{natural, Compare, Natural};
use std::fmt;
use std::fmt::Debug;
use std::iter::FromIterator;
use std::mem;

/// An ordered set implemented using a red-black tree.
///
/// A red-black tree is a binary search tree that stays balanced by coloring each node red or
/// black and bounding the number of black nodes on any path from the root to a leaf. Insertions,
/// removals, and lookups take logarithmic time, and iteration yields elements in ascending order.
/// Elements are unique; ordering is decided by a comparator, which is `Natural` ordering unless
/// the set is built with `with_cmp`.
///
/// Every element occupies a stable `Position` that survives later insertions and the removal of
/// other elements, so positions can be saved and stepped with `next` and `prev` long after they
/// were obtained.
///
/// # Examples
///
/// ```
/// use ordered_collections::TreeSet;
///
/// let mut set = TreeSet::new();
/// set.insert(0);
/// set.insert(3);
///
/// assert_eq!(set.len(), 2);
///
/// assert_eq!(TreeSet::min(&set), Some(&0));
/// assert_eq!(set.get_at(set.lower_bound(&2)), Some(&3));
///
/// assert_eq!(set.remove(&0), Some(0));
/// assert_eq!(set.remove(&1), None);
/// ```
#[derive(Clone)]
pub struct TreeSet<T, C = Natural<T>>
where
    C: Compare<T>,
{
    tree: RbTree<T, Identity, C>,
}

impl<T> TreeSet<T>
where
    T: Ord,
{
    /// Constructs a new, empty `TreeSet<T>` ordered by the natural ordering of `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeSet;
    ///
    /// let set: TreeSet<u32> = TreeSet::new();
    /// ```
    pub fn new() -> Self {
        TreeSet::with_cmp(natural())
    }
}

impl<T, C> TreeSet<T, C>
where
    C: Compare<T>,
{
    /// Constructs a new, empty `TreeSet<T, C>` ordered by `cmp`.
    ///
    /// # Examples
    ///
    /// ```
    /// use compare::{natural, Compare};
    /// use ordered_collections::TreeSet;
    ///
    /// let mut set = TreeSet::with_cmp(natural().rev());
    /// set.insert(1);
    /// set.insert(2);
    /// assert_eq!(TreeSet::min(&set), Some(&2));
    /// ```
    pub fn with_cmp(cmp: C) -> Self {
        TreeSet {
            tree: RbTree::with_cmp(cmp),
        }
    }

    /// Inserts an element into the set. Returns the position of the element and `true` if it was
    /// not present. If an equal element is already in the set, the set is unchanged, `value` is
    /// dropped, and the position of the existing element is returned with `false`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeSet;
    ///
    /// let mut set = TreeSet::new();
    /// let (pos, inserted) = set.insert(1);
    /// assert!(inserted);
    /// assert_eq!(set.get_at(pos), Some(&1));
    ///
    /// let (same_pos, inserted) = set.insert(1);
    /// assert!(!inserted);
    /// assert_eq!(same_pos, pos);
    /// ```
    pub fn insert(&mut self, value: T) -> (Position, bool) {
        self.tree.insert(value)
    }

    /// Inserts an element using `hint` as a starting point for the search. If the hint names the
    /// position just after the element's ordered slot, the insertion point is found in constant
    /// time instead of logarithmic time; any other hint only slows the insertion down, it never
    /// misplaces the element. Returns the position of the inserted element, or of the equal
    /// element already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeSet;
    ///
    /// let mut set = TreeSet::new();
    /// for value in 0..5 {
    ///     let end = set.end();
    ///     set.insert_hint(end, value);
    /// }
    /// assert_eq!(set.len(), 5);
    /// ```
    pub fn insert_hint(&mut self, hint: Position, value: T) -> Position {
        self.tree.insert_hint(hint, value)
    }

    /// Removes an element from the set. If the element exists in the set, it will return the
    /// element. Otherwise it will return `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeSet;
    ///
    /// let mut set = TreeSet::new();
    /// set.insert(1);
    /// assert_eq!(set.remove(&1), Some(1));
    /// assert_eq!(set.remove(&1), None);
    /// ```
    pub fn remove(&mut self, value: &T) -> Option<T> {
        self.tree.erase_key(value)
    }

    /// Removes the element at `pos` and returns it. Positions of other elements stay valid.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is the past-the-end position or does not name an element of the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeSet;
    ///
    /// let mut set = TreeSet::new();
    /// let (pos, _) = set.insert(1);
    /// set.insert(2);
    /// assert_eq!(set.remove_at(pos), 1);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn remove_at(&mut self, pos: Position) -> T {
        self.tree.erase(pos)
    }

    /// Removes every element from `from` up to, but not including, `to`.
    ///
    /// # Panics
    ///
    /// Panics if the two positions do not form a range of the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeSet;
    ///
    /// let mut set = TreeSet::new();
    /// for value in 0..5 {
    ///     set.insert(value);
    /// }
    /// let from = set.find(&1);
    /// let to = set.find(&4);
    /// set.remove_range(from, to);
    /// assert_eq!(set.iter().cloned().collect::<Vec<u32>>(), vec![0, 4]);
    /// ```
    pub fn remove_range(&mut self, from: Position, to: Position) {
        self.tree.erase_range(from, to);
    }

    /// Checks if an element exists in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeSet;
    ///
    /// let mut set = TreeSet::new();
    /// set.insert(1);
    /// assert!(!set.contains(&0));
    /// assert!(set.contains(&1));
    /// ```
    pub fn contains(&self, value: &T) -> bool {
        self.tree.find(value) != self.tree.end()
    }

    /// Returns the number of elements equal to `value`, which is either zero or one because
    /// elements in the set are unique.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeSet;
    ///
    /// let mut set = TreeSet::new();
    /// set.insert(1);
    /// assert_eq!(set.count(&0), 0);
    /// assert_eq!(set.count(&1), 1);
    /// ```
    pub fn count(&self, value: &T) -> usize {
        if self.contains(value) {
            1
        } else {
            0
        }
    }

    /// Returns a reference to the stored element equal to `value`, or `None` if no such element
    /// exists in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeSet;
    ///
    /// let mut set = TreeSet::new();
    /// set.insert(1);
    /// assert_eq!(set.get(&1), Some(&1));
    /// assert_eq!(set.get(&2), None);
    /// ```
    pub fn get(&self, value: &T) -> Option<&T> {
        let pos = self.tree.find(value);
        self.tree.value_at(pos)
    }

    /// Returns the element at `pos`, or `None` if `pos` is the past-the-end position.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeSet;
    ///
    /// let mut set = TreeSet::new();
    /// let (pos, _) = set.insert(1);
    /// assert_eq!(set.get_at(pos), Some(&1));
    /// assert_eq!(set.get_at(set.end()), None);
    /// ```
    pub fn get_at(&self, pos: Position) -> Option<&T> {
        self.tree.value_at(pos)
    }

    /// Returns the position of the element equal to `value`, or the past-the-end position if it
    /// does not exist in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeSet;
    ///
    /// let mut set = TreeSet::new();
    /// set.insert(1);
    /// assert_eq!(set.get_at(set.find(&1)), Some(&1));
    /// assert_eq!(set.find(&2), set.end());
    /// ```
    pub fn find(&self, value: &T) -> Position {
        self.tree.find(value)
    }

    /// Returns the position of the first element not less than `value`, or the past-the-end
    /// position if there is no such element.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeSet;
    ///
    /// let mut set = TreeSet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.get_at(set.lower_bound(&2)), Some(&3));
    /// assert_eq!(set.get_at(set.lower_bound(&3)), Some(&3));
    /// assert_eq!(set.lower_bound(&4), set.end());
    /// ```
    pub fn lower_bound(&self, value: &T) -> Position {
        self.tree.lower_bound(value)
    }

    /// Returns the position of the first element greater than `value`, or the past-the-end
    /// position if there is no such element.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeSet;
    ///
    /// let mut set = TreeSet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.get_at(set.upper_bound(&2)), Some(&3));
    /// assert_eq!(set.upper_bound(&3), set.end());
    /// ```
    pub fn upper_bound(&self, value: &T) -> Position {
        self.tree.upper_bound(value)
    }

    /// Returns the pair of positions `(lower_bound(value), upper_bound(value))`. The two are
    /// equal exactly when the element does not exist in the set; otherwise the range holds the
    /// one equal element.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeSet;
    ///
    /// let mut set = TreeSet::new();
    /// set.insert(1);
    ///
    /// let (low, high) = set.equal_range(&1);
    /// assert_eq!(set.get_at(low), Some(&1));
    /// assert_eq!(high, set.end());
    ///
    /// let (low, high) = set.equal_range(&0);
    /// assert_eq!(low, high);
    /// ```
    pub fn equal_range(&self, value: &T) -> (Position, Position) {
        self.tree.equal_range(value)
    }

    /// Returns the position of the first element in ascending order. Equals the past-the-end
    /// position when the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeSet;
    ///
    /// let mut set = TreeSet::new();
    /// assert_eq!(set.begin(), set.end());
    /// set.insert(1);
    /// assert_eq!(set.get_at(set.begin()), Some(&1));
    /// ```
    pub fn begin(&self) -> Position {
        self.tree.begin()
    }

    /// Returns the past-the-end position. It names no element, and it is where `find` and the
    /// bound lookups land when nothing matches.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeSet;
    ///
    /// let set: TreeSet<u32> = TreeSet::new();
    /// assert_eq!(set.get_at(set.end()), None);
    /// ```
    pub fn end(&self) -> Position {
        self.tree.end()
    }

    /// Returns the position of the element following `pos` in ascending order. The past-the-end
    /// position is its own successor.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeSet;
    ///
    /// let mut set = TreeSet::new();
    /// set.insert(1);
    /// set.insert(2);
    ///
    /// let pos = set.next(set.begin());
    /// assert_eq!(set.get_at(pos), Some(&2));
    /// assert_eq!(set.next(pos), set.end());
    /// ```
    pub fn next(&self, pos: Position) -> Position {
        self.tree.next(pos)
    }

    /// Returns the position of the element preceding `pos` in ascending order. Stepping back from
    /// the past-the-end position yields the last element; the first position is its own
    /// predecessor.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeSet;
    ///
    /// let mut set = TreeSet::new();
    /// set.insert(1);
    /// set.insert(2);
    ///
    /// let pos = set.prev(set.end());
    /// assert_eq!(set.get_at(pos), Some(&2));
    /// ```
    pub fn prev(&self, pos: Position) -> Position {
        self.tree.prev(pos)
    }

    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeSet;
    ///
    /// let mut set = TreeSet::new();
    /// set.insert(1);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeSet;
    ///
    /// let set: TreeSet<u32> = TreeSet::new();
    /// assert!(set.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the maximum number of elements the set can hold.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeSet;
    ///
    /// let set: TreeSet<u32> = TreeSet::new();
    /// assert!(set.max_len() >= set.len());
    /// ```
    pub fn max_len(&self) -> usize {
        self.tree.max_len()
    }

    /// Clears the set, removing all elements and invalidating every position.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeSet;
    ///
    /// let mut set = TreeSet::new();
    /// set.insert(1);
    /// set.insert(2);
    /// set.clear();
    /// assert_eq!(set.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Swaps the contents of two sets without moving any element. Positions stay valid and keep
    /// naming the elements they named, which now live in the other set.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeSet;
    ///
    /// let mut set = TreeSet::new();
    /// set.insert(1);
    /// let pos = set.find(&1);
    ///
    /// let mut other = TreeSet::new();
    /// other.insert(2);
    ///
    /// set.swap(&mut other);
    /// assert!(set.contains(&2));
    /// assert_eq!(other.get_at(pos), Some(&1));
    /// ```
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.tree, &mut other.tree);
    }

    /// Returns the minimum element of the set. Returns `None` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeSet;
    ///
    /// let mut set = TreeSet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(TreeSet::min(&set), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&T> {
        self.tree.value_at(self.tree.begin())
    }

    /// Returns the maximum element of the set. Returns `None` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeSet;
    ///
    /// let mut set = TreeSet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(TreeSet::max(&set), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&T> {
        let pos = self.tree.prev(self.tree.end());
        self.tree.value_at(pos)
    }

    /// Returns a reference to the set's comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use compare::{natural, Compare};
    /// use ordered_collections::TreeSet;
    ///
    /// let set: TreeSet<u32> = TreeSet::new();
    /// assert!(set.cmp().compares_lt(&1, &2));
    /// ```
    pub fn cmp(&self) -> &C {
        self.tree.cmp()
    }

    /// Returns an iterator over the set. The iterator will yield elements in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::TreeSet;
    ///
    /// let mut set = TreeSet::new();
    /// set.insert(1);
    /// set.insert(2);
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&2));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> TreeSetIter<'_, T> {
        TreeSetIter {
            iter: self.tree.iter(),
        }
    }
}

impl<T, C> IntoIterator for TreeSet<T, C>
where
    C: Compare<T>,
{
    type IntoIter = TreeSetIntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        TreeSetIntoIter {
            iter: self.tree.into_iter(),
        }
    }
}

impl<'a, T, C> IntoIterator for &'a TreeSet<T, C>
where
    C: Compare<T>,
{
    type IntoIter = TreeSetIter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `TreeSet<T>`.
///
/// This iterator traverses the elements of the set in-order and yields owned elements.
pub struct TreeSetIntoIter<T> {
    iter: tree::IntoIter<T>,
}

impl<T> Iterator for TreeSetIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<T> DoubleEndedIterator for TreeSetIntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back()
    }
}

impl<T> ExactSizeIterator for TreeSetIntoIter<T> {}

/// An iterator for `TreeSet<T>`.
///
/// This iterator traverses the elements of the set in-order and yields immutable references.
pub struct TreeSetIter<'a, T> {
    iter: tree::Iter<'a, T>,
}

impl<'a, T> Clone for TreeSetIter<'a, T> {
    fn clone(&self) -> Self {
        TreeSetIter {
            iter: self.iter.clone(),
        }
    }
}

impl<'a, T> Iterator for TreeSetIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<'a, T> DoubleEndedIterator for TreeSetIter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back()
    }
}

impl<'a, T> ExactSizeIterator for TreeSetIter<'a, T> {}

impl<T, C> Extend<T> for TreeSet<T, C>
where
    C: Compare<T>,
{
    /// Each element is offered with the past-the-end position as a hint, so extending from input
    /// that is already sorted takes linear time.
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for value in iter {
            let end = self.end();
            self.insert_hint(end, value);
        }
    }
}

impl<T, C> FromIterator<T> for TreeSet<T, C>
where
    C: Compare<T> + Default,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut set = TreeSet::with_cmp(C::default());
        set.extend(iter);
        set
    }
}

impl<T, C> Default for TreeSet<T, C>
where
    C: Compare<T> + Default,
{
    fn default() -> Self {
        TreeSet::with_cmp(C::default())
    }
}

impl<T, C> Debug for TreeSet<T, C>
where
    T: Debug,
    C: Compare<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, C> PartialEq for TreeSet<T, C>
where
    T: PartialEq,
    C: Compare<T>,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T, C> Eq for TreeSet<T, C>
where
    T: Eq,
    C: Compare<T>,
{
}

impl<T, C> PartialOrd for TreeSet<T, C>
where
    T: PartialOrd,
    C: Compare<T>,
{
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T, C> Ord for TreeSet<T, C>
where
    T: Ord,
    C: Compare<T>,
{
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.iter().cmp(other.iter())
    }
}
