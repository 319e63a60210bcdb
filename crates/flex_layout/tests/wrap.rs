mod common;

use common::{assert_box, assert_close, init_logging, row_root, sized_node};
use flex_layout::{Align, Direction, FlexDirection, FlexTree, NodeId, Value, Wrap};

fn wrapping_row(
    tree: &mut FlexTree,
    height: Option<f64>,
    items: usize,
) -> anyhow::Result<(NodeId, Vec<NodeId>)> {
    let root = tree.new_node();
    tree.set_flex_direction(root, FlexDirection::Row);
    tree.set_flex_wrap(root, Wrap::Wrap);
    tree.set_width(root, Value::Point(100.0));
    if let Some(height) = height {
        tree.set_height(root, Value::Point(height));
    }
    let mut children = Vec::with_capacity(items);
    for _ in 0..items {
        let child = sized_node(tree, 40.0, 10.0);
        tree.add_child(root, child)?;
        children.push(child);
    }
    Ok((root, children))
}

/// Items that overflow the main size move to a new line.
#[test]
fn wrap_breaks_lines() -> anyhow::Result<()> {
    init_logging();

    let mut tree = FlexTree::new();
    let (root, children) = wrapping_row(&mut tree, None, 3)?;
    tree.calculate_layout(root, None, None, Direction::LeftToRight)?;

    assert_box(&tree, children[0], (0.0, 0.0, 40.0, 10.0));
    assert_box(&tree, children[1], (40.0, 0.0, 40.0, 10.0));
    assert_box(&tree, children[2], (0.0, 10.0, 40.0, 10.0));
    assert_close(tree.layout_height(root), 20.0);
    assert_eq!(tree.layout(children[2]).line_index(), 1);
    Ok(())
}

/// `align-content: space-between` pushes the last line to the far edge.
#[test]
fn align_content_space_between() -> anyhow::Result<()> {
    init_logging();

    let mut tree = FlexTree::new();
    let (root, children) = wrapping_row(&mut tree, Some(100.0), 3)?;
    tree.set_align_content(root, Align::SpaceBetween);
    tree.calculate_layout(root, None, None, Direction::LeftToRight)?;

    assert_close(tree.layout_top(children[0]), 0.0);
    assert_close(tree.layout_top(children[2]), 90.0);
    Ok(())
}

/// `align-content: center` centers the block of lines.
#[test]
fn align_content_center() -> anyhow::Result<()> {
    init_logging();

    let mut tree = FlexTree::new();
    let (root, children) = wrapping_row(&mut tree, Some(100.0), 3)?;
    tree.set_align_content(root, Align::Center);
    tree.calculate_layout(root, None, None, Direction::LeftToRight)?;

    assert_close(tree.layout_top(children[0]), 40.0);
    assert_close(tree.layout_top(children[2]), 50.0);
    Ok(())
}

/// `wrap-reverse` stacks lines from the cross end.
#[test]
fn wrap_reverse_mirrors_lines() -> anyhow::Result<()> {
    init_logging();

    let mut tree = FlexTree::new();
    let (root, children) = wrapping_row(&mut tree, Some(100.0), 3)?;
    tree.set_flex_wrap(root, Wrap::WrapReverse);
    tree.calculate_layout(root, None, None, Direction::LeftToRight)?;

    assert_close(tree.layout_top(children[0]), 90.0);
    assert_close(tree.layout_top(children[1]), 90.0);
    assert_close(tree.layout_top(children[2]), 80.0);
    Ok(())
}

/// Without wrapping every item stays on one line and may overflow.
#[test]
fn nowrap_keeps_single_line() -> anyhow::Result<()> {
    init_logging();

    let mut tree = FlexTree::new();
    let root = row_root(&mut tree, 100.0, 100.0);
    let mut children = Vec::new();
    for _ in 0..3 {
        let child = sized_node(&mut tree, 40.0, 10.0);
        tree.add_child(root, child)?;
        children.push(child);
    }
    tree.calculate_layout(root, None, None, Direction::LeftToRight)?;

    assert_close(tree.layout_left(children[2]), 80.0);
    assert_close(tree.layout_top(children[2]), 0.0);
    assert!(tree.layout_had_overflow(root));
    Ok(())
}
