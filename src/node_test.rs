use super::*;

#[test]
fn test_node() {
    let mut node: Node<u32> = Node::new(10, Some(3), Color::Red);
    assert_eq!(node.is_red(), true);
    assert_eq!(node.is_black(), false);
    assert_eq!(node.only_child(), None);
    assert_eq!(node.parent, Some(3));
    assert_eq!(node.item, 10);

    node.set_black();
    assert_eq!(node.is_black(), true);
    node.set_red();
    assert_eq!(node.is_red(), true);

    node.right = Some(7);
    assert_eq!(node.only_child(), Some(7));
    node.left = Some(5);
    assert_eq!(node.only_child(), Some(5));
}

#[test]
fn test_color_display() {
    assert_eq!(format!("{}", Color::Red), "R");
    assert_eq!(format!("{}", Color::Black), "B");
}
