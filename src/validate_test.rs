use super::*;

use crate::node::Color;

fn three() -> (RbTree<u32>, NodeId, NodeId, NodeId) {
    let mut index = RbTree::new();
    index.extend(vec![20, 10, 30]);
    let root = index.root.unwrap();
    let left = index.nodes[root].left.unwrap();
    let right = index.nodes[root].right.unwrap();
    (index, root, left, right)
}

fn violation(index: &RbTree<u32>, what: &str) {
    match index.validate() {
        Err(Error::InvariantViolation(_, msg)) => assert!(msg.contains(what), "{}", msg),
        Err(err) => panic!("unexpected {}", err),
        Ok(stats) => panic!("unexpected {:?}", stats),
    }
    assert_eq!(index.check_invariants(), false);
}

#[test]
fn test_validate_ok() {
    let index: RbTree<u32> = RbTree::new();
    let stats = index.validate().unwrap();
    assert_eq!(
        stats,
        Stats {
            n_count: 0,
            height: 0,
            black_height: 1
        }
    );

    let (index, _, _, _) = three();
    let stats = index.validate().unwrap();
    assert_eq!(
        stats,
        Stats {
            n_count: 3,
            height: 2,
            black_height: 2
        }
    );
    assert!(index.check_invariants());
}

#[test]
fn test_validate_red_root() {
    let (mut index, root, _, _) = three();
    index.nodes[root].color = Color::Red;
    violation(&index, "red root");
}

#[test]
fn test_validate_consecutive_reds() {
    let mut index = RbTree::new();
    index.extend(vec![20, 10, 30, 5]);
    let root = index.root.unwrap();
    let left = index.nodes[root].left.unwrap();
    assert_eq!(index.nodes[left].item, 10);
    index.nodes[left].color = Color::Red;
    violation(&index, "consecutive reds");
}

#[test]
fn test_validate_black_height() {
    let (mut index, _, _, right) = three();
    index.nodes[right].color = Color::Black;
    violation(&index, "unbalanced blacks");
}

#[test]
fn test_validate_sort() {
    let (mut index, _, left, _) = three();
    index.nodes[left].item = 25;
    violation(&index, "sort 25 above 20");

    let (mut index, _, _, right) = three();
    index.nodes[right].item = 15;
    violation(&index, "sort 15 below 20");
}

#[test]
fn test_validate_links() {
    let (mut index, _, left, right) = three();
    index.nodes[left].parent = Some(right);
    violation(&index, "parent-child link");

    let (mut index, _, left, _) = three();
    index.nodes[left].left = Some(99);
    violation(&index, "dangling link");

    let (mut index, root, left, _) = three();
    index.nodes[root].parent = Some(left);
    violation(&index, "has parent");
}

#[test]
fn test_validate_count() {
    let (mut index, _, _, _) = three();
    index.n_count += 1;
    violation(&index, "reachable 3 n_count:4");

    let mut index: RbTree<u32> = RbTree::new();
    index.n_count = 1;
    violation(&index, "no root");
}
