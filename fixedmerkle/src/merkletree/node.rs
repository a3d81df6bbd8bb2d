use std::fmt;

use super::tree::Tree;

/// A vertex of a built [`Tree`].
///
/// Nodes are not stored as linked objects; a `Node` is a borrowed view naming a
/// `(level, position)` slot in the tree's digest arena. Level 0 is the root and level
/// `depth` holds the leaves. The children of node `p` are nodes `2p` and `2p + 1` one
/// level down, and its parent is node `p / 2` one level up.
#[derive(Clone, Copy)]
pub struct Node<'a> {
    tree: &'a Tree,
    level: u32,
    position: u64,
}

impl<'a> Node<'a> {
    pub(crate) fn new(tree: &'a Tree, level: u32, position: u64) -> Self {
        Self {
            tree,
            level,
            position,
        }
    }

    pub fn digest(&self) -> &'a [u8] {
        self.tree.digest(self.level, self.position)
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn is_leaf(&self) -> bool {
        self.level == self.tree.depth()
    }

    pub fn is_root(&self) -> bool {
        self.level == 0
    }

    pub fn left(&self) -> Option<Node<'a>> {
        if self.is_leaf() {
            return None;
        }
        Some(Node::new(self.tree, self.level + 1, self.position << 1))
    }

    pub fn right(&self) -> Option<Node<'a>> {
        if self.is_leaf() {
            return None;
        }
        Some(Node::new(self.tree, self.level + 1, (self.position << 1) | 1))
    }

    /// The other child of this node's parent.
    pub fn sibling(&self) -> Option<Node<'a>> {
        if self.is_root() {
            return None;
        }
        Some(Node::new(self.tree, self.level, self.position ^ 1))
    }

    pub fn parent(&self) -> Option<Node<'a>> {
        if self.is_root() {
            return None;
        }
        Some(Node::new(self.tree, self.level - 1, self.position >> 1))
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree)
            && self.level == other.level
            && self.position == other.position
    }
}

impl Eq for Node<'_> {}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({}-{}, 0x", self.level, self.position)?;
        for byte in self.digest() {
            write!(f, "{:02x}", byte)?;
        }
        write!(f, ")")
    }
}
