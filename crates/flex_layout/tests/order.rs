mod common;

use common::{assert_close, init_logging, row_root, sized_node};
use flex_layout::{Direction, FlexTree, NodeId};

fn ordered_row(tree: &mut FlexTree, orders: &[i32]) -> anyhow::Result<(NodeId, Vec<NodeId>)> {
    let root = row_root(tree, 100.0, 10.0);
    let mut children = Vec::with_capacity(orders.len());
    for &order in orders {
        let child = sized_node(tree, 10.0, 10.0);
        tree.set_order(child, order);
        tree.add_child(root, child)?;
        children.push(child);
    }
    Ok((root, children))
}

/// Items are laid out by ascending `order`.
#[test]
fn order_sorts_items() -> anyhow::Result<()> {
    init_logging();

    let mut tree = FlexTree::new();
    let (root, children) = ordered_row(&mut tree, &[2, 0, 1])?;
    tree.calculate_layout(root, None, None, Direction::LeftToRight)?;

    assert_close(tree.layout_left(children[0]), 20.0);
    assert_close(tree.layout_left(children[1]), 0.0);
    assert_close(tree.layout_left(children[2]), 10.0);
    Ok(())
}

/// Equal `order` keeps document order, and negative values come first.
#[test]
fn order_is_stable() -> anyhow::Result<()> {
    init_logging();

    let mut tree = FlexTree::new();
    let (root, children) = ordered_row(&mut tree, &[1, 1, -1])?;
    tree.calculate_layout(root, None, None, Direction::LeftToRight)?;

    assert_close(tree.layout_left(children[2]), 0.0);
    assert_close(tree.layout_left(children[0]), 10.0);
    assert_close(tree.layout_left(children[1]), 20.0);
    Ok(())
}
