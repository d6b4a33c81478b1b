//! Package implement an ordered multiset using a [red-black tree][wiki-rbt].
//!
//! [RbTree] keeps its elements sorted and balanced by maintaining the
//! classic red-black invariants:
//!
//! * Every node's element is ordered against its left and right subtrees.
//! * The root is black.
//! * No red node has a red child.
//! * Every path from the root to an absent leaf carries the same number
//!   of black nodes.
//!
//! Search, insert and delete run in O(log n), rebalancing through
//! rotations and recoloring.
//!
//! Simple ordered multiset for single threaded use case
//! ----------------------------------------------------
//!
//! - Parametrised over the element type, which must be `Ord`.
//! - Duplicate elements are allowed, equal elements are routed right.
//! - Nodes are held in an arena and linked by index, including a back
//!   link to the parent node.
//! - In-order iteration over all elements.
//! - Invariant checker for verification, refer [RbTree::validate].
//! - No Durability guarantee.
//! - Not thread safe.
//!
//! Constructing a new [RbTree] instance and CRUD operations:
//!
//! ```
//! use redblack::RbTree;
//!
//! let mut index: RbTree<u64> = RbTree::new();
//! assert_eq!(index.len(), 0);
//! assert_eq!(index.is_empty(), true);
//!
//! index.insert(10);
//! index.insert(20);
//! index.insert(30);
//! assert_eq!(index.len(), 3);
//!
//! assert_eq!(*index.search(&20).unwrap(), 20);
//! assert!(index.search(&25).is_err());
//!
//! let item = index.delete(&10).unwrap();
//! assert_eq!(item, 10);
//! assert_eq!(index.to_vec(), vec![20, 30]);
//! assert!(index.check_invariants());
//! ```
//!
//! [wiki-rbt]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree

use std::{error, fmt, result};

// Short form to compose Error values.
//
// Here are few possible ways:
//
// ```ignore
// use crate::Error;
// err_at!(KeyNotFound, msg: format!("missing key"));
// ```
//
// ```ignore
// use crate::Error;
// err_at!(KeyNotFound, lookup(key));
// ```
//
// ```ignore
// use crate::Error;
// err_at!(KeyNotFound, lookup(key), format!("delete failed"));
// ```
//
macro_rules! err_at {
    ($v:ident, msg: $($arg:expr),+) => {{
        let prefix = format!("{}:{}", file!(), line!());
        Err(Error::$v(prefix, format!($($arg),+)))
    }};
    ($v:ident, $e:expr) => {{
        match $e {
            Ok(val) => Ok(val),
            Err(err) => {
                let prefix = format!("{}:{}", file!(), line!());
                Err(Error::$v(prefix, format!("{}", err)))
            }
        }
    }};
    ($v:ident, $e:expr, $($arg:expr),+) => {{
        match $e {
            Ok(val) => Ok(val),
            Err(err) => {
                let prefix = format!("{}:{}", file!(), line!());
                let msg = format!($($arg),+);
                Err(Error::$v(prefix, format!("{} {}", err, msg)))
            }
        }
    }};
}

mod node;
mod rbtree;
mod validate;

pub use node::Color;
pub use rbtree::{Iter, RbTree};
pub use validate::Stats;

/// Error variants that are returned by this package's API.
///
/// Each variant carries a prefix, typically identifying the
/// error location.
pub enum Error {
    KeyNotFound(String, String),
    InvariantViolation(String, String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        use Error::*;

        match self {
            KeyNotFound(p, msg) => write!(f, "{} KeyNotFound: {}", p, msg),
            InvariantViolation(p, msg) => write!(f, "{} InvariantViolation: {}", p, msg),
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        write!(f, "{}", self)
    }
}

impl error::Error for Error {}

/// Type alias for Result return type, used by this package.
pub type Result<T> = result::Result<T, Error>;
