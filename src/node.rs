use crate::arena::{Arena, Handle};

/// An enum representing the color of a node in a red-black tree.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Color {
    Red,
    Black,
}

/// A struct representing a node of a red-black tree, including the header sentinel.
///
/// The header carries no value; `value` being `None` is what marks it. Its parent link holds the
/// root, and its left and right links cache the minimum and maximum nodes, pointing back at the
/// header itself while the tree is empty.
#[derive(Clone)]
pub struct Node<V> {
    pub value: Option<V>,
    pub color: Color,
    pub parent: Option<Handle>,
    pub left: Option<Handle>,
    pub right: Option<Handle>,
}

impl<V> Node<V> {
    pub fn new(value: V) -> Self {
        Node {
            value: Some(value),
            color: Color::Red,
            parent: None,
            left: None,
            right: None,
        }
    }

    pub fn header() -> Self {
        Node {
            value: None,
            color: Color::Red,
            parent: None,
            left: None,
            right: None,
        }
    }

    pub fn is_header(&self) -> bool {
        self.value.is_none()
    }
}

pub fn minimum<V>(store: &Arena<Node<V>>, mut node: Handle) -> Handle {
    while let Some(left) = store[node].left {
        node = left;
    }
    node
}

pub fn maximum<V>(store: &Arena<Node<V>>, mut node: Handle) -> Handle {
    while let Some(right) = store[node].right {
        node = right;
    }
    node
}

/// Returns the in-order successor of `node`. The successor of the maximum is the header.
pub fn successor<V>(store: &Arena<Node<V>>, mut node: Handle) -> Handle {
    if let Some(right) = store[node].right {
        minimum(store, right)
    } else {
        let mut parent = store[node].parent.expect("Expected a parent node.");
        while Some(node) == store[parent].right {
            node = parent;
            parent = store[parent].parent.expect("Expected a parent node.");
        }
        // Ascending from the maximum stops on the header; its right link points back down, so
        // stepping up once more would re-enter the tree.
        if store[node].right != Some(parent) {
            node = parent;
        }
        node
    }
}

/// Returns the in-order predecessor of `node`. The predecessor of the header is the maximum,
/// recognized by the sentinel tag rather than by any link inspection.
pub fn predecessor<V>(store: &Arena<Node<V>>, mut node: Handle) -> Handle {
    if store[node].is_header() {
        return store[node].right.expect("Expected a maximum link.");
    }
    if let Some(left) = store[node].left {
        maximum(store, left)
    } else {
        let mut parent = store[node].parent.expect("Expected a parent node.");
        while Some(node) == store[parent].left {
            node = parent;
            parent = store[parent].parent.expect("Expected a parent node.");
        }
        parent
    }
}
