use crate::arena::{Arena, Handle};
use crate::entry::ExtractKey;
use crate::node::{self, Color, Node};
use compare::Compare;
use std::marker::PhantomData;

const CHUNK_SIZE: usize = 64;

/// A location in an ordered container: either one element or the past-the-end position.
///
/// A position stays valid as long as the element it names is in the container. Inserting never
/// invalidates any position; removing an element invalidates only that element's position; `swap`
/// leaves positions valid but naming elements of the other container. Clearing or dropping the
/// container invalidates every position.
///
/// Using an invalidated position is memory-safe but meaningless: it panics or names an arbitrary
/// element, because the slot it referred to may have been reused by a later insertion. Positions
/// must only be used with the container that produced them.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Position {
    handle: Handle,
}

/// A red-black tree over arena-allocated nodes.
///
/// `V` is the stored value, `X` projects the ordering key out of a value, and `C` compares keys.
/// The header sentinel is an ordinary arena node with no value: its parent link is the root, and
/// its left and right links cache the minimum and maximum nodes, pointing back at the header
/// itself while the tree is empty. The header doubles as the past-the-end position.
#[derive(Clone)]
pub struct RbTree<V, X, C> {
    store: Arena<Node<V>>,
    header: Handle,
    len: usize,
    cmp: C,
    extract: PhantomData<X>,
}

impl<V, X, C> RbTree<V, X, C> {
    pub fn with_cmp(cmp: C) -> Self {
        let mut store = Arena::new(CHUNK_SIZE);
        let header = store.allocate(Node::header());
        let mut tree = RbTree {
            store,
            header,
            len: 0,
            cmp,
            extract: PhantomData,
        };
        tree.reset_header();
        tree
    }

    fn reset_header(&mut self) {
        let header = self.header;
        let node = &mut self.store[header];
        node.parent = None;
        node.left = Some(header);
        node.right = Some(header);
    }

    fn left(&self, node: Handle) -> Option<Handle> {
        self.store[node].left
    }

    fn right(&self, node: Handle) -> Option<Handle> {
        self.store[node].right
    }

    fn parent(&self, node: Handle) -> Option<Handle> {
        self.store[node].parent
    }

    fn set_left(&mut self, node: Handle, link: Option<Handle>) {
        self.store[node].left = link;
    }

    fn set_right(&mut self, node: Handle, link: Option<Handle>) {
        self.store[node].right = link;
    }

    fn set_parent(&mut self, node: Handle, link: Option<Handle>) {
        self.store[node].parent = link;
    }

    fn color(&self, node: Handle) -> Color {
        self.store[node].color
    }

    fn set_color(&mut self, node: Handle, color: Color) {
        self.store[node].color = color;
    }

    fn is_red(&self, link: Option<Handle>) -> bool {
        link.map_or(false, |node| self.store[node].color == Color::Red)
    }

    fn root(&self) -> Option<Handle> {
        self.store[self.header].parent
    }

    fn set_root(&mut self, link: Option<Handle>) {
        self.store[self.header].parent = link;
    }

    fn leftmost(&self) -> Handle {
        self.store[self.header]
            .left
            .expect("Expected a minimum link.")
    }

    fn set_leftmost(&mut self, node: Handle) {
        self.store[self.header].left = Some(node);
    }

    fn rightmost(&self) -> Handle {
        self.store[self.header]
            .right
            .expect("Expected a maximum link.")
    }

    fn set_rightmost(&mut self, node: Handle) {
        self.store[self.header].right = Some(node);
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn max_len(&self) -> usize {
        self.store.max_len()
    }

    pub fn cmp(&self) -> &C {
        &self.cmp
    }

    pub fn begin(&self) -> Position {
        Position {
            handle: self.leftmost(),
        }
    }

    pub fn end(&self) -> Position {
        Position {
            handle: self.header,
        }
    }

    /// Advances a position by one element. Saturates at the past-the-end position.
    pub fn next(&self, pos: Position) -> Position {
        if pos.handle == self.header {
            return pos;
        }
        Position {
            handle: node::successor(&self.store, pos.handle),
        }
    }

    /// Retreats a position by one element. The predecessor of the past-the-end position is the
    /// maximum; the first position saturates.
    pub fn prev(&self, pos: Position) -> Position {
        if self.len == 0 || pos.handle == self.leftmost() {
            return pos;
        }
        Position {
            handle: node::predecessor(&self.store, pos.handle),
        }
    }

    pub fn value_at(&self, pos: Position) -> Option<&V> {
        self.store
            .get(&pos.handle)
            .and_then(|node| node.value.as_ref())
    }

    pub fn value_at_mut(&mut self, pos: Position) -> Option<&mut V> {
        self.store
            .get_mut(&pos.handle)
            .and_then(|node| node.value.as_mut())
    }

    pub fn clear(&mut self) {
        self.store.clear();
        self.header = self.store.allocate(Node::header());
        self.reset_header();
        self.len = 0;
    }

    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            store: &self.store,
            front: self.leftmost(),
            back: self.rightmost(),
            remaining: self.len,
        }
    }

    pub fn into_iter(self) -> IntoIter<V> {
        let front = self.leftmost();
        let back = self.rightmost();
        IntoIter {
            store: self.store,
            front,
            back,
            remaining: self.len,
        }
    }

    fn rotate_left(&mut self, x: Handle) {
        let y = self.right(x).expect("Expected a right child node.");

        let y_left = self.left(y);
        self.set_right(x, y_left);
        if let Some(child) = y_left {
            self.set_parent(child, Some(x));
        }
        let x_parent = self.parent(x);
        self.set_parent(y, x_parent);

        if self.root() == Some(x) {
            self.set_root(Some(y));
        } else {
            let parent = x_parent.expect("Expected a parent node.");
            if self.left(parent) == Some(x) {
                self.set_left(parent, Some(y));
            } else {
                self.set_right(parent, Some(y));
            }
        }
        self.set_left(y, Some(x));
        self.set_parent(x, Some(y));
    }

    fn rotate_right(&mut self, x: Handle) {
        let y = self.left(x).expect("Expected a left child node.");

        let y_right = self.right(y);
        self.set_left(x, y_right);
        if let Some(child) = y_right {
            self.set_parent(child, Some(x));
        }
        let x_parent = self.parent(x);
        self.set_parent(y, x_parent);

        if self.root() == Some(x) {
            self.set_root(Some(y));
        } else {
            let parent = x_parent.expect("Expected a parent node.");
            if self.right(parent) == Some(x) {
                self.set_right(parent, Some(y));
            } else {
                self.set_left(parent, Some(y));
            }
        }
        self.set_right(y, Some(x));
        self.set_parent(x, Some(y));
    }

    /// Links the fresh red node `z` below `parent` and restores the balance invariants.
    fn attach_and_rebalance(&mut self, insert_left: bool, z: Handle, parent: Handle) {
        self.set_parent(z, Some(parent));

        if insert_left {
            // When parent is the header this assignment also refreshes the minimum cache.
            self.set_left(parent, Some(z));
            if parent == self.header {
                self.set_root(Some(z));
                self.set_rightmost(z);
            } else if parent == self.leftmost() {
                self.set_leftmost(z);
            }
        } else {
            self.set_right(parent, Some(z));
            if parent == self.rightmost() {
                self.set_rightmost(z);
            }
        }

        let mut x = z;
        while self.root() != Some(x) {
            let x_parent = self.parent(x).expect("Expected a parent node.");
            if self.color(x_parent) != Color::Red {
                break;
            }
            let grandparent = self.parent(x_parent).expect("Expected a grandparent node.");
            if Some(x_parent) == self.left(grandparent) {
                match self.right(grandparent) {
                    Some(uncle) if self.color(uncle) == Color::Red => {
                        self.set_color(x_parent, Color::Black);
                        self.set_color(uncle, Color::Black);
                        self.set_color(grandparent, Color::Red);
                        x = grandparent;
                    }
                    _ => {
                        if Some(x) == self.right(x_parent) {
                            x = x_parent;
                            self.rotate_left(x);
                        }
                        let x_parent = self.parent(x).expect("Expected a parent node.");
                        self.set_color(x_parent, Color::Black);
                        self.set_color(grandparent, Color::Red);
                        self.rotate_right(grandparent);
                    }
                }
            } else {
                match self.left(grandparent) {
                    Some(uncle) if self.color(uncle) == Color::Red => {
                        self.set_color(x_parent, Color::Black);
                        self.set_color(uncle, Color::Black);
                        self.set_color(grandparent, Color::Red);
                        x = grandparent;
                    }
                    _ => {
                        if Some(x) == self.left(x_parent) {
                            x = x_parent;
                            self.rotate_right(x);
                        }
                        let x_parent = self.parent(x).expect("Expected a parent node.");
                        self.set_color(x_parent, Color::Black);
                        self.set_color(grandparent, Color::Red);
                        self.rotate_left(grandparent);
                    }
                }
            }
        }
        let root = self.root().expect("Expected a root node.");
        self.set_color(root, Color::Black);
        self.len += 1;
    }

    /// Removes one element by position and returns its value.
    ///
    /// Panics if `pos` is the past-the-end position or no longer names an element.
    pub fn erase(&mut self, pos: Position) -> V {
        if pos.handle == self.header {
            panic!("Error: position out of bounds.");
        }
        let detached = self.detach(pos.handle);
        self.len -= 1;
        let node = self.store.free(&detached);
        node.value.expect("Expected a value-carrying node.")
    }

    /// Erases every element in `[from, to)`. Erasing the whole container degenerates to `clear`.
    pub fn erase_range(&mut self, from: Position, to: Position) {
        if from.handle == self.leftmost() && to.handle == self.header {
            self.clear();
        } else {
            let mut current = from;
            while current != to {
                if current.handle == self.header {
                    panic!("Error: position out of bounds.");
                }
                let next = self.next(current);
                self.erase(current);
                current = next;
            }
        }
    }

    /// Unlinks the node `z`, rebalances, and returns the handle whose slot must be freed.
    ///
    /// A node with two children is replaced by its in-order successor node rather than by moving
    /// values, so every surviving handle keeps naming the value it named before. The two nodes
    /// swap colors to keep the color pattern of the tree unchanged.
    fn detach(&mut self, z: Handle) -> Handle {
        let mut y = z;
        let x: Option<Handle>;
        let x_parent: Handle;

        if self.left(y).is_none() {
            x = self.right(y);
        } else if self.right(y).is_none() {
            x = self.left(y);
        } else {
            let right = self.right(y).expect("Expected a right child node.");
            y = node::minimum(&self.store, right);
            x = self.right(y);
        }

        if y != z {
            let z_left = self.left(z).expect("Expected a left child node.");
            self.set_parent(z_left, Some(y));
            self.set_left(y, Some(z_left));
            if Some(y) != self.right(z) {
                x_parent = self.parent(y).expect("Expected a parent node.");
                if let Some(x) = x {
                    self.set_parent(x, Some(x_parent));
                }
                self.set_left(x_parent, x);
                let z_right = self.right(z).expect("Expected a right child node.");
                self.set_right(y, Some(z_right));
                self.set_parent(z_right, Some(y));
            } else {
                x_parent = y;
            }
            if self.root() == Some(z) {
                self.set_root(Some(y));
            } else {
                let z_parent = self.parent(z).expect("Expected a parent node.");
                if self.left(z_parent) == Some(z) {
                    self.set_left(z_parent, Some(y));
                } else {
                    self.set_right(z_parent, Some(y));
                }
            }
            self.set_parent(y, self.parent(z));
            let y_color = self.color(y);
            self.set_color(y, self.color(z));
            self.set_color(z, y_color);
            y = z;
        } else {
            x_parent = self.parent(y).expect("Expected a parent node.");
            if let Some(x) = x {
                self.set_parent(x, Some(x_parent));
            }
            if self.root() == Some(z) {
                self.set_root(x);
            } else if self.left(x_parent) == Some(z) {
                self.set_left(x_parent, x);
            } else {
                self.set_right(x_parent, x);
            }
            if self.leftmost() == z {
                match x {
                    // z is the minimum and has no left child; when it also has no right child its
                    // parent becomes the minimum, or the header itself once the tree empties.
                    None => self.set_leftmost(x_parent),
                    Some(x) => {
                        let minimum = node::minimum(&self.store, x);
                        self.set_leftmost(minimum);
                    }
                }
            }
            if self.rightmost() == z {
                match x {
                    None => self.set_rightmost(x_parent),
                    Some(x) => {
                        let maximum = node::maximum(&self.store, x);
                        self.set_rightmost(maximum);
                    }
                }
            }
        }

        if self.color(y) != Color::Red {
            self.erase_rebalance(x, x_parent);
        }
        y
    }

    fn erase_rebalance(&mut self, mut x: Option<Handle>, mut x_parent: Handle) {
        while x != self.root() && !self.is_red(x) {
            if x == self.left(x_parent) {
                let mut w = self.right(x_parent).expect("Expected a sibling node.");
                if self.color(w) == Color::Red {
                    self.set_color(w, Color::Black);
                    self.set_color(x_parent, Color::Red);
                    self.rotate_left(x_parent);
                    w = self.right(x_parent).expect("Expected a sibling node.");
                }
                if !self.is_red(self.left(w)) && !self.is_red(self.right(w)) {
                    self.set_color(w, Color::Red);
                    x = Some(x_parent);
                    x_parent = self.parent(x_parent).expect("Expected a parent node.");
                } else {
                    if !self.is_red(self.right(w)) {
                        let w_left = self.left(w).expect("Expected a nephew node.");
                        self.set_color(w_left, Color::Black);
                        self.set_color(w, Color::Red);
                        self.rotate_right(w);
                        w = self.right(x_parent).expect("Expected a sibling node.");
                    }
                    self.set_color(w, self.color(x_parent));
                    self.set_color(x_parent, Color::Black);
                    if let Some(w_right) = self.right(w) {
                        self.set_color(w_right, Color::Black);
                    }
                    self.rotate_left(x_parent);
                    break;
                }
            } else {
                let mut w = self.left(x_parent).expect("Expected a sibling node.");
                if self.color(w) == Color::Red {
                    self.set_color(w, Color::Black);
                    self.set_color(x_parent, Color::Red);
                    self.rotate_right(x_parent);
                    w = self.left(x_parent).expect("Expected a sibling node.");
                }
                if !self.is_red(self.right(w)) && !self.is_red(self.left(w)) {
                    self.set_color(w, Color::Red);
                    x = Some(x_parent);
                    x_parent = self.parent(x_parent).expect("Expected a parent node.");
                } else {
                    if !self.is_red(self.left(w)) {
                        let w_right = self.right(w).expect("Expected a nephew node.");
                        self.set_color(w_right, Color::Black);
                        self.set_color(w, Color::Red);
                        self.rotate_left(w);
                        w = self.left(x_parent).expect("Expected a sibling node.");
                    }
                    self.set_color(w, self.color(x_parent));
                    self.set_color(x_parent, Color::Black);
                    if let Some(w_left) = self.left(w) {
                        self.set_color(w_left, Color::Black);
                    }
                    self.rotate_right(x_parent);
                    break;
                }
            }
        }
        if let Some(x) = x {
            self.set_color(x, Color::Black);
        }
    }
}

impl<V, X, C> RbTree<V, X, C>
where
    X: ExtractKey<V>,
    C: Compare<X::Key>,
{
    fn key(&self, node: Handle) -> &X::Key {
        X::extract(
            self.store[node]
                .value
                .as_ref()
                .expect("Expected a value-carrying node."),
        )
    }

    fn insert_under(&mut self, force_left: bool, parent: Handle, value: V) -> Position {
        let insert_left = force_left
            || parent == self.header
            || self.cmp.compares_lt(X::extract(&value), self.key(parent));
        let z = self.store.allocate(Node::new(value));
        self.attach_and_rebalance(insert_left, z, parent);
        Position { handle: z }
    }

    /// Inserts `value` unless a key-equivalent element is present. Returns the position of the
    /// inserted or blocking element and whether an insertion happened.
    pub fn insert(&mut self, value: V) -> (Position, bool) {
        let mut y = self.header;
        let mut x = self.root();
        let mut comp = true;
        while let Some(current) = x {
            y = current;
            comp = self
                .cmp
                .compares_lt(X::extract(&value), self.key(current));
            x = if comp {
                self.left(current)
            } else {
                self.right(current)
            };
        }

        // The attach parent is y; the candidate for an equivalent key is y itself when the last
        // step went right, otherwise y's predecessor.
        if comp {
            if y == self.leftmost() {
                return (self.insert_under(false, y, value), true);
            }
            let before = node::predecessor(&self.store, y);
            if self.cmp.compares_lt(self.key(before), X::extract(&value)) {
                return (self.insert_under(false, y, value), true);
            }
            return (Position { handle: before }, false);
        }
        if self.cmp.compares_lt(self.key(y), X::extract(&value)) {
            (self.insert_under(false, y, value), true)
        } else {
            (Position { handle: y }, false)
        }
    }

    /// Inserts with a position hint. A hint adjacent to the value's ordered slot makes the
    /// insertion point lookup O(1); any other hint falls back to a full `insert`. Returns the
    /// position of the inserted element, or of the key-equivalent element already present.
    pub fn insert_hint(&mut self, hint: Position, value: V) -> Position {
        let node = hint.handle;
        if node == self.header {
            if self.len > 0
                && self
                    .cmp
                    .compares_lt(self.key(self.rightmost()), X::extract(&value))
            {
                let rightmost = self.rightmost();
                return self.insert_under(false, rightmost, value);
            }
            return self.insert(value).0;
        }
        if self.cmp.compares_lt(X::extract(&value), self.key(node)) {
            if node == self.leftmost() {
                return self.insert_under(true, node, value);
            }
            let before = node::predecessor(&self.store, node);
            if self.cmp.compares_lt(self.key(before), X::extract(&value)) {
                if self.right(before).is_none() {
                    return self.insert_under(false, before, value);
                }
                return self.insert_under(true, node, value);
            }
            return self.insert(value).0;
        }
        if self.cmp.compares_lt(self.key(node), X::extract(&value)) {
            if node == self.rightmost() {
                let rightmost = self.rightmost();
                return self.insert_under(false, rightmost, value);
            }
            let after = node::successor(&self.store, node);
            if self.cmp.compares_lt(X::extract(&value), self.key(after)) {
                if self.right(node).is_none() {
                    return self.insert_under(false, node, value);
                }
                return self.insert_under(true, after, value);
            }
            return self.insert(value).0;
        }
        hint
    }

    /// Removes the element with a key equivalent to `key`, if any, and returns its value.
    pub fn erase_key(&mut self, key: &X::Key) -> Option<V> {
        let pos = self.find(key);
        if pos.handle == self.header {
            None
        } else {
            Some(self.erase(pos))
        }
    }

    fn lower_bound_handle(&self, key: &X::Key) -> Handle {
        let mut result = self.header;
        let mut x = self.root();
        while let Some(current) = x {
            if !self.cmp.compares_lt(self.key(current), key) {
                result = current;
                x = self.left(current);
            } else {
                x = self.right(current);
            }
        }
        result
    }

    /// Returns the first position whose key is not less than `key`.
    pub fn lower_bound(&self, key: &X::Key) -> Position {
        Position {
            handle: self.lower_bound_handle(key),
        }
    }

    /// Returns the first position whose key is greater than `key`.
    pub fn upper_bound(&self, key: &X::Key) -> Position {
        let mut result = self.header;
        let mut x = self.root();
        while let Some(current) = x {
            if self.cmp.compares_lt(key, self.key(current)) {
                result = current;
                x = self.left(current);
            } else {
                x = self.right(current);
            }
        }
        Position { handle: result }
    }

    pub fn equal_range(&self, key: &X::Key) -> (Position, Position) {
        (self.lower_bound(key), self.upper_bound(key))
    }

    /// Returns the position of the element with a key equivalent to `key`, or the past-the-end
    /// position.
    pub fn find(&self, key: &X::Key) -> Position {
        let candidate = self.lower_bound_handle(key);
        if candidate == self.header || self.cmp.compares_lt(key, self.key(candidate)) {
            Position {
                handle: self.header,
            }
        } else {
            Position { handle: candidate }
        }
    }
}

/// A borrowed in-order iterator over the values of a tree.
pub struct Iter<'a, V> {
    store: &'a Arena<Node<V>>,
    front: Handle,
    back: Handle,
    remaining: usize,
}

impl<'a, V> Clone for Iter<'a, V> {
    fn clone(&self) -> Self {
        Iter {
            store: self.store,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        if self.remaining == 0 {
            return None;
        }
        let store = self.store;
        let current = self.front;
        self.remaining -= 1;
        if self.remaining > 0 {
            self.front = node::successor(store, current);
        }
        store[current].value.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, V> DoubleEndedIterator for Iter<'a, V> {
    fn next_back(&mut self) -> Option<&'a V> {
        if self.remaining == 0 {
            return None;
        }
        let store = self.store;
        let current = self.back;
        self.remaining -= 1;
        if self.remaining > 0 {
            self.back = node::predecessor(store, current);
        }
        store[current].value.as_ref()
    }
}

impl<'a, V> ExactSizeIterator for Iter<'a, V> {}

/// An owning in-order iterator. Values are taken out of their nodes one by one; the structure
/// stays linked so traversal keeps working, and whatever is left drops with the arena.
pub struct IntoIter<V> {
    store: Arena<Node<V>>,
    front: Handle,
    back: Handle,
    remaining: usize,
}

impl<V> Iterator for IntoIter<V> {
    type Item = V;

    fn next(&mut self) -> Option<V> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.front;
        self.remaining -= 1;
        if self.remaining > 0 {
            self.front = node::successor(&self.store, current);
        }
        self.store[current].value.take()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> DoubleEndedIterator for IntoIter<V> {
    fn next_back(&mut self) -> Option<V> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.back;
        self.remaining -= 1;
        if self.remaining > 0 {
            // The predecessor walk must run before the value is taken: an emptied node would
            // look like the header to it.
            self.back = node::predecessor(&self.store, current);
        }
        self.store[current].value.take()
    }
}

impl<V> ExactSizeIterator for IntoIter<V> {}
