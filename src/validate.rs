//! Module implement the invariant checker for [RbTree].
//!
//! The checker is a read-only pass, never invoked by insert or delete.
//! It walks the tree with an explicit stack so that it can also
//! verify broken trees that are deeper than a balanced tree can be.

use log::warn;

use std::{cmp, fmt};

use crate::{node::NodeId, rbtree::RbTree, Error, Result};

/// Statistics gathered by [RbTree::validate].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stats {
    /// Number of nodes reachable from root.
    pub n_count: usize,
    /// Number of nodes on the longest path from root to a leaf.
    pub height: usize,
    /// Number of black nodes on every path from root to an absent leaf,
    /// counting the absent leaf itself.
    pub black_height: usize,
}

struct Frame<'a, T> {
    id: NodeId,
    low: Option<&'a T>,
    high: Option<&'a T>,
    n_blacks: usize, // black nodes above this node
    depth: usize,
}

impl<T> RbTree<T> {
    /// Validate the tree with following rules:
    ///
    /// * Parent and child links agree with each other.
    /// * Elements are in sorted order, left subtree <= node <= right
    ///   subtree.
    /// * Root is black.
    /// * From root to any leaf, no consecutive reds allowed in its path.
    /// * Number of blacks is the same on every path from root to leaf.
    /// * Number of reachable nodes match the element count.
    ///
    /// Return [Error::InvariantViolation] for the first violation found,
    /// naming the offending element. Otherwise return [Stats].
    pub fn validate(&self) -> Result<Stats>
    where
        T: Ord + fmt::Debug,
    {
        let root = match self.root {
            Some(root) => root,
            None if self.n_count == 0 && self.nodes.is_empty() => {
                return Ok(Stats {
                    n_count: 0,
                    height: 0,
                    black_height: 1,
                })
            }
            None => {
                let (n, m) = (self.n_count, self.nodes.len());
                return err_at!(InvariantViolation, msg: "no root, n_count:{} arena:{}", n, m);
            }
        };

        if root >= self.nodes.len() {
            return err_at!(InvariantViolation, msg: "dangling root link {}", root);
        }
        let node = &self.nodes[root];
        if let Some(parent) = node.parent {
            return err_at!(InvariantViolation, msg: "root {:?} has parent {}", node.item, parent);
        }
        if node.is_red() {
            return err_at!(InvariantViolation, msg: "red root {:?}", node.item);
        }

        let (mut n_count, mut height) = (0, 0);
        let mut black_height: Option<usize> = None;

        let mut stack = vec![Frame {
            id: root,
            low: None,
            high: None,
            n_blacks: 0,
            depth: 1,
        }];
        while let Some(frame) = stack.pop() {
            n_count += 1;
            if n_count > self.nodes.len() {
                let n = self.nodes.len();
                return err_at!(InvariantViolation, msg: "cycle, more than {} nodes", n);
            }
            height = cmp::max(height, frame.depth);

            let node = &self.nodes[frame.id];
            if let Some(low) = frame.low {
                if node.item.lt(low) {
                    let item = &node.item;
                    return err_at!(InvariantViolation, msg: "sort {:?} below {:?}", item, low);
                }
            }
            if let Some(high) = frame.high {
                if node.item.gt(high) {
                    let item = &node.item;
                    return err_at!(InvariantViolation, msg: "sort {:?} above {:?}", item, high);
                }
            }

            let n_blacks = frame.n_blacks + if node.is_black() { 1 } else { 0 };

            for (i, child) in [node.left, node.right].iter().enumerate() {
                let child = match child {
                    Some(child) => *child,
                    None => {
                        let bh = n_blacks + 1;
                        match black_height {
                            None => black_height = Some(bh),
                            Some(h) if h != bh => {
                                return err_at!(
                                    InvariantViolation,
                                    msg: "unbalanced blacks at {:?} {} {}", node.item, h, bh
                                );
                            }
                            Some(_) => (),
                        }
                        continue;
                    }
                };

                if child >= self.nodes.len() {
                    return err_at!(
                        InvariantViolation,
                        msg: "dangling link {:?} {}", node.item, child
                    );
                }
                let cnode = &self.nodes[child];
                if cnode.parent != Some(frame.id) {
                    return err_at!(
                        InvariantViolation,
                        msg: "parent-child link {:?} {:?}", node.item, cnode.item
                    );
                }
                if node.is_red() && cnode.is_red() {
                    return err_at!(
                        InvariantViolation,
                        msg: "consecutive reds {:?} {:?}", node.item, cnode.item
                    );
                }

                let (low, high) = match i {
                    0 => (frame.low, Some(&node.item)),
                    _ => (Some(&node.item), frame.high),
                };
                stack.push(Frame {
                    id: child,
                    low,
                    high,
                    n_blacks,
                    depth: frame.depth + 1,
                });
            }
        }

        if n_count != self.n_count || n_count != self.nodes.len() {
            let (n, m) = (self.n_count, self.nodes.len());
            return err_at!(
                InvariantViolation,
                msg: "reachable {} n_count:{} arena:{}", n_count, n, m
            );
        }

        Ok(Stats {
            n_count,
            height,
            black_height: black_height.unwrap_or(1),
        })
    }

    /// Same as [RbTree::validate], but log the violation and return
    /// `false` instead of an error.
    pub fn check_invariants(&self) -> bool
    where
        T: Ord + fmt::Debug,
    {
        match self.validate() {
            Ok(_) => true,
            Err(err) => {
                warn!("check_invariants, {}", err);
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;
