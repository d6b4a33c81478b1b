use std::fmt;

/// Index of a node inside the tree's arena.
pub type NodeId = usize;

/// Color tag carried by every node, absent children count as [Color::Black].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Color::Red => write!(f, "R"),
            Color::Black => write!(f, "B"),
        }
    }
}

// Node corresponds to a single element in RbTree instance. Children are
// owned through the arena, parent is a back link used for navigation only.
#[derive(Clone)]
pub struct Node<T> {
    pub item: T,
    pub color: Color,
    pub parent: Option<NodeId>, // none only for root
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
}

impl<T> Node<T> {
    pub fn new(item: T, parent: Option<NodeId>, color: Color) -> Node<T> {
        Node {
            item,
            color,
            parent,
            left: None,
            right: None,
        }
    }

    #[inline]
    pub fn set_red(&mut self) {
        self.color = Color::Red
    }

    #[inline]
    pub fn set_black(&mut self) {
        self.color = Color::Black
    }

    #[inline]
    pub fn is_black(&self) -> bool {
        self.color == Color::Black
    }

    #[inline]
    pub fn is_red(&self) -> bool {
        self.color == Color::Red
    }

    /// Return the only child, if node has at most one child.
    #[inline]
    pub fn only_child(&self) -> Option<NodeId> {
        self.left.or(self.right)
    }
}

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;
