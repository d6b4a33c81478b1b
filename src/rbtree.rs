//! Module provide ordered multiset implemented by [RbTree] type.
//!
//! RbTree is implemented using [red-black][wiki-rbt] tree, nodes are kept
//! in an arena and linked by index, each node carrying a back link to its
//! parent. The parent link gives constant time access to sibling, uncle
//! and grandparent while fixing up the tree after insert and delete.
//!
//! - Each entry in RbTree instance is a single element `T`, ordered by `Ord`.
//! - Duplicate elements are allowed, they are routed right on tie.
//! - CRUD operations, via insert(), search(), delete() api.
//! - Full table scan, to iterate over all elements in sorted order.
//! - No Durability guarantee.
//! - Not thread safe.
//!
//! Insert places the new element as a red leaf and then resolves a
//! possible *double red* by walking upward, either recoloring (split) or
//! restructuring with one or two rotations. Delete reduces a node with
//! two children to its in-order successor, and resolves the *double black*
//! left behind by a removed black node before detaching it.
//!
//! [wiki-rbt]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree

use log::{debug, trace};

use std::{borrow::Borrow, cmp::Ordering, fmt, iter::FromIterator, mem};

use crate::{
    node::{Color, Node, NodeId},
    Error, Result,
};

/// RbTree manage a single instance of in-memory ordered multiset using
/// [red-black][rbt] tree.
///
/// [rbt]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree
#[derive(Clone)]
pub struct RbTree<T> {
    pub(crate) nodes: Vec<Node<T>>, // arena, every live node and nothing else
    pub(crate) root: Option<NodeId>,
    pub(crate) n_count: usize, // number of elements in the tree.
}

impl<T> Default for RbTree<T> {
    fn default() -> RbTree<T> {
        RbTree::new()
    }
}

impl<T> RbTree<T> {
    /// Create an empty instance of RbTree.
    pub fn new() -> RbTree<T> {
        RbTree {
            nodes: Vec::default(),
            root: None,
            n_count: Default::default(),
        }
    }
}

/// Maintenance API.
impl<T> RbTree<T> {
    /// Return number of elements in this instance.
    #[inline]
    pub fn len(&self) -> usize {
        self.n_count
    }

    /// Check whether this index is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n_count == 0
    }

    /// Render the tree sideways, right subtree above its parent, four
    /// spaces per level. Root is marked with `>`, other nodes with `*`,
    /// and each element is followed by its color.
    pub fn to_pretty_string(&self) -> String
    where
        T: fmt::Debug,
    {
        let mut out = String::default();
        if let Some(root) = self.root {
            self.pretty_node(root, 0, &mut out);
        }
        out
    }

    /// Print [RbTree::to_pretty_string] to stdout.
    pub fn pretty_print(&self)
    where
        T: fmt::Debug,
    {
        println!("--------------");
        print!("{}", self.to_pretty_string());
        println!("--------------");
    }

    fn pretty_node(&self, id: NodeId, depth: usize, out: &mut String)
    where
        T: fmt::Debug,
    {
        let node = &self.nodes[id];
        if let Some(right) = node.right {
            self.pretty_node(right, depth + 1, out);
        }
        let symbol = if self.root == Some(id) { '>' } else { '*' };
        out.push_str(&format!(
            "{}{} {:?}({})\n",
            "    ".repeat(depth),
            symbol,
            node.item,
            node.color
        ));
        if let Some(left) = node.left {
            self.pretty_node(left, depth + 1, out);
        }
    }
}

impl<T> RbTree<T> {
    /// Search for an element matching key. Return [Error::KeyNotFound]
    /// if there is no such element.
    pub fn search<Q>(&self, key: &Q) -> Result<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.find(key) {
            Some(id) => Ok(&self.nodes[id].item),
            None => err_at!(KeyNotFound, msg: "search, missing key"),
        }
    }

    /// Check whether an element matching key is present.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Return an iterator over all elements in sorted order.
    pub fn iter(&self) -> Iter<T> {
        let mut paths = Vec::default();
        build_iter(&self.nodes, self.root, &mut paths);
        Iter {
            nodes: &self.nodes,
            paths,
        }
    }

    /// Collect all elements in sorted order.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    fn find<Q>(&self, key: &Q) -> Option<NodeId>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut cursor = self.root;
        while let Some(id) = cursor {
            let node = &self.nodes[id];
            cursor = match node.item.borrow().cmp(key) {
                Ordering::Less => node.right,
                Ordering::Greater => node.left,
                Ordering::Equal => return Some(id),
            };
        }
        None
    }
}

impl<T> RbTree<T> {
    /// Insert element into this instance. Duplicate elements are allowed,
    /// an element equal to an existing one is placed to its right.
    pub fn insert(&mut self, item: T)
    where
        T: Ord,
    {
        let (mut parent, mut go_left) = (None, false);
        let mut cursor = self.root;
        while let Some(id) = cursor {
            let node = &self.nodes[id];
            go_left = node.item.cmp(&item) == Ordering::Greater;
            parent = Some(id);
            cursor = if go_left { node.left } else { node.right };
        }

        let id = self.nodes.len();
        match parent {
            None => {
                self.nodes.push(Node::new(item, None, Color::Black));
                self.root = Some(id);
            }
            Some(parent) => {
                self.nodes.push(Node::new(item, Some(parent), Color::Red));
                if go_left {
                    self.nodes[parent].left = Some(id);
                } else {
                    self.nodes[parent].right = Some(id);
                }
                if self.nodes[parent].is_red() {
                    self.resolve_double_red(id);
                }
            }
        }
        self.n_count += 1;
    }

    /// Delete an element matching key from this instance and return it.
    /// If there are several matching elements only one of them is
    /// removed. Return [Error::KeyNotFound] if key is not present, in
    /// which case the tree is left untouched.
    pub fn delete<Q>(&mut self, key: &Q) -> Result<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut target = match self.find(key) {
            Some(id) => id,
            None => {
                debug!("delete, missing key n_count:{}", self.n_count);
                return err_at!(KeyNotFound, msg: "delete, missing key");
            }
        };

        // reduce to a node with at most one child.
        if let (Some(_), Some(right)) = (self.nodes[target].left, self.nodes[target].right) {
            let successor = self.leftmost(right);
            self.swap_items(target, successor);
            target = successor;
        }

        let child = self.nodes[target].only_child();
        match self.nodes[target].parent {
            None => {
                self.root = child;
                if let Some(child) = child {
                    self.nodes[child].parent = None;
                    self.nodes[child].set_black();
                }
            }
            Some(_) => {
                // sibling must be read while target is still attached.
                if self.nodes[target].is_black() {
                    self.resolve_double_black(target);
                }
                let parent = self.nodes[target].parent;
                self.replace_child(parent, target, child);
                if let Some(child) = child {
                    self.nodes[child].parent = parent;
                }
            }
        }

        let node = self.release(target);
        self.n_count -= 1;
        Ok(node.item)
    }
}

impl<T> RbTree<T> {
    //          (g)                      (g)
    //           |                        |
    //           p                        n
    //          / \                      / \
    //         n   c         ==>        a   p
    //        / \                          / \
    //       a   b                        b   c
    //
    // Promote node above its parent, mirror image when node is a right
    // child. Colors are left to the caller.
    fn rotate(&mut self, node: NodeId) {
        let parent = self.expect_parent(node);
        let grand = self.nodes[parent].parent;
        trace!("rotate {} over {}", node, parent);

        if self.is_left_child(node) {
            let moved = self.nodes[node].right;
            self.nodes[parent].left = moved;
            if let Some(moved) = moved {
                self.nodes[moved].parent = Some(parent);
            }
            self.nodes[node].right = Some(parent);
        } else {
            let moved = self.nodes[node].left;
            self.nodes[parent].right = moved;
            if let Some(moved) = moved {
                self.nodes[moved].parent = Some(parent);
            }
            self.nodes[node].left = Some(parent);
        }
        self.nodes[parent].parent = Some(node);
        self.nodes[node].parent = grand;
        self.replace_child(grand, parent, Some(node));
    }

    // node is red and so is its parent.
    fn resolve_double_red(&mut self, mut node: NodeId) {
        loop {
            let parent = self.expect_parent(node);
            let grand = self.expect_parent(parent);
            let uncle = self.sibling(parent);

            match uncle {
                Some(uncle) if self.nodes[uncle].is_red() => {
                    trace!("double-red split at {}", grand);
                    self.nodes[parent].set_black();
                    self.nodes[uncle].set_black();
                    match self.nodes[grand].parent {
                        None => break, // root stays black
                        Some(up) => {
                            self.nodes[grand].set_red();
                            if self.nodes[up].is_black() {
                                break;
                            }
                            node = grand;
                        }
                    }
                }
                _ if self.is_left_child(node) == self.is_left_child(parent) => {
                    trace!("double-red zig-zig at {}", node);
                    self.nodes[parent].set_black();
                    self.nodes[grand].set_red();
                    self.rotate(parent);
                    break;
                }
                _ => {
                    trace!("double-red zig-zag at {}", node);
                    self.nodes[node].set_black();
                    self.nodes[grand].set_red();
                    self.rotate(node);
                    self.rotate(node);
                    break;
                }
            }
        }
    }

    // node's position is about to lose one black unit relative to its
    // sibling's subtree.
    fn resolve_double_black(&mut self, mut node: NodeId) {
        loop {
            let parent = match self.nodes[node].parent {
                Some(parent) => parent,
                None => break,
            };
            let sibling = match self.sibling(node) {
                Some(sibling) => sibling,
                None => break,
            };

            if self.nodes[sibling].is_red() {
                trace!("double-black red sibling {}", sibling);
                self.nodes[sibling].set_black();
                self.nodes[parent].set_red();
                self.rotate(sibling);
                continue;
            }

            let (outer, inner) = if self.is_left_child(node) {
                (self.nodes[sibling].right, self.nodes[sibling].left)
            } else {
                (self.nodes[sibling].left, self.nodes[sibling].right)
            };
            let color = self.nodes[parent].color;

            match (outer, inner) {
                (Some(outer), _) if self.nodes[outer].is_red() => {
                    trace!("double-black restructure single at {}", sibling);
                    self.nodes[sibling].color = color;
                    self.nodes[parent].set_black();
                    self.nodes[outer].set_black();
                    self.rotate(sibling);
                    break;
                }
                (_, Some(inner)) if self.nodes[inner].is_red() => {
                    trace!("double-black restructure double at {}", inner);
                    self.nodes[inner].color = color;
                    self.nodes[parent].set_black();
                    self.nodes[sibling].set_black();
                    self.rotate(inner);
                    self.rotate(inner);
                    break;
                }
                _ => {
                    trace!("double-black recolor at {}", sibling);
                    self.nodes[sibling].set_red();
                    if self.nodes[parent].parent.is_none() {
                        break; // tree height shrinks by one
                    } else if self.nodes[parent].is_black() {
                        node = parent;
                    } else {
                        self.nodes[parent].set_black();
                        break;
                    }
                }
            }
        }
    }
}

impl<T> RbTree<T> {
    fn expect_parent(&self, id: NodeId) -> NodeId {
        match self.nodes[id].parent {
            Some(parent) => parent,
            None => panic!("expect_parent(): node {} is root ? Call the programmer", id),
        }
    }

    #[inline]
    fn is_left_child(&self, id: NodeId) -> bool {
        match self.nodes[id].parent {
            Some(parent) => self.nodes[parent].left == Some(id),
            None => false,
        }
    }

    fn sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = &self.nodes[self.nodes[id].parent?];
        if parent.left == Some(id) {
            parent.right
        } else {
            parent.left
        }
    }

    fn leftmost(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.nodes[id].left {
            id = left;
        }
        id
    }

    // point parent's slot, or root, that held `old` to `new`.
    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: Option<NodeId>) {
        match parent {
            None => self.root = new,
            Some(parent) if self.nodes[parent].left == Some(old) => {
                self.nodes[parent].left = new
            }
            Some(parent) if self.nodes[parent].right == Some(old) => {
                self.nodes[parent].right = new
            }
            Some(parent) => panic!(
                "replace_child(): {} is not a child of {} ? Call the programmer",
                old, parent
            ),
        }
    }

    fn swap_items(&mut self, a: NodeId, b: NodeId) {
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let (head, tail) = self.nodes.split_at_mut(hi);
        mem::swap(&mut head[lo].item, &mut tail[0].item);
    }

    // Remove a detached node from the arena. The last node in the arena
    // moves into the vacated slot, relink its neighbours.
    fn release(&mut self, id: NodeId) -> Node<T> {
        let node = self.nodes.swap_remove(id);
        let moved = self.nodes.len();
        if id < moved {
            let (parent, left, right) = {
                let n = &self.nodes[id];
                (n.parent, n.left, n.right)
            };
            self.replace_child(parent, moved, Some(id));
            if let Some(left) = left {
                self.nodes[left].parent = Some(id);
            }
            if let Some(right) = right {
                self.nodes[right].parent = Some(id);
            }
        }
        node
    }
}

impl<T> Extend<T> for RbTree<T>
where
    T: Ord,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        iter.into_iter().for_each(|item| self.insert(item));
    }
}

impl<T> FromIterator<T> for RbTree<T>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> RbTree<T>
    where
        I: IntoIterator<Item = T>,
    {
        let mut index = RbTree::new();
        index.extend(iter);
        index
    }
}

impl<'a, T> IntoIterator for &'a RbTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// In-order iterator over [RbTree] elements, refer [RbTree::iter].
pub struct Iter<'a, T> {
    nodes: &'a [Node<T>],
    paths: Vec<NodeId>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.paths.pop()?;
        let node = &self.nodes[id];
        build_iter(self.nodes, node.right, &mut self.paths);
        Some(&node.item)
    }
}

fn build_iter<T>(nodes: &[Node<T>], mut cursor: Option<NodeId>, paths: &mut Vec<NodeId>) {
    while let Some(id) = cursor {
        paths.push(id);
        cursor = nodes[id].left;
    }
}

#[cfg(test)]
#[path = "rbtree_test.rs"]
mod rbtree_test;
