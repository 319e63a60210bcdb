mod common;

use common::{assert_box, init_logging, row_root, sized_node};
use flex_layout::{Align, Direction, Edge, FlexTree, Justify, NodeId, PositionType, Value};

fn absolute_child(
    tree: &mut FlexTree,
    root: NodeId,
    width: f64,
    height: f64,
) -> anyhow::Result<NodeId> {
    let child = sized_node(tree, width, height);
    tree.set_position_type(child, PositionType::Absolute);
    tree.add_child(root, child)?;
    Ok(child)
}

/// Leading insets place the child from the top-left corner.
#[test]
fn leading_insets_place_child() -> anyhow::Result<()> {
    init_logging();

    let mut tree = FlexTree::new();
    let root = sized_node(&mut tree, 100.0, 100.0);
    let child = absolute_child(&mut tree, root, 30.0, 40.0)?;
    tree.set_position(child, Edge::Left, Value::Point(10.0));
    tree.set_position(child, Edge::Top, Value::Point(20.0));
    tree.calculate_layout(root, None, None, Direction::LeftToRight)?;

    assert_box(&tree, child, (10.0, 20.0, 30.0, 40.0));
    Ok(())
}

/// Trailing insets pin the child to the bottom-right corner.
#[test]
fn trailing_insets_place_child() -> anyhow::Result<()> {
    init_logging();

    let mut tree = FlexTree::new();
    let root = sized_node(&mut tree, 100.0, 100.0);
    let child = absolute_child(&mut tree, root, 30.0, 40.0)?;
    tree.set_position(child, Edge::Right, Value::Point(10.0));
    tree.set_position(child, Edge::Bottom, Value::Point(10.0));
    tree.calculate_layout(root, None, None, Direction::LeftToRight)?;

    assert_box(&tree, child, (60.0, 50.0, 30.0, 40.0));
    Ok(())
}

/// Opposing insets size a child without a width.
#[test]
fn opposing_insets_size_child() -> anyhow::Result<()> {
    init_logging();

    let mut tree = FlexTree::new();
    let root = sized_node(&mut tree, 100.0, 100.0);
    let child = tree.new_node();
    tree.set_position_type(child, PositionType::Absolute);
    tree.set_height(child, Value::Point(10.0));
    tree.set_position(child, Edge::Left, Value::Point(10.0));
    tree.set_position(child, Edge::Right, Value::Point(10.0));
    tree.add_child(root, child)?;
    tree.calculate_layout(root, None, None, Direction::LeftToRight)?;

    assert_box(&tree, child, (10.0, 0.0, 80.0, 10.0));
    Ok(())
}

/// Without insets the container's alignment applies.
#[test]
fn alignment_places_child_without_insets() -> anyhow::Result<()> {
    init_logging();

    let mut tree = FlexTree::new();
    let root = sized_node(&mut tree, 100.0, 100.0);
    tree.set_justify_content(root, Justify::Center);
    tree.set_align_items(root, Align::Center);
    let child = absolute_child(&mut tree, root, 10.0, 10.0)?;
    tree.calculate_layout(root, None, None, Direction::LeftToRight)?;

    assert_box(&tree, child, (45.0, 45.0, 10.0, 10.0));
    Ok(())
}

/// Absolute children do not take part in flex sizing.
#[test]
fn absolute_child_is_out_of_flow() -> anyhow::Result<()> {
    init_logging();

    let mut tree = FlexTree::new();
    let root = tree.new_node();
    tree.set_width(root, Value::Point(100.0));
    absolute_child(&mut tree, root, 50.0, 50.0)?;
    let flowing = sized_node(&mut tree, 10.0, 10.0);
    tree.add_child(root, flowing)?;
    tree.calculate_layout(root, None, None, Direction::LeftToRight)?;

    assert_box(&tree, flowing, (0.0, 0.0, 10.0, 10.0));
    assert_box(&tree, root, (0.0, 0.0, 100.0, 10.0));
    Ok(())
}

/// Without insets a child in a row starts inside the leading border.
#[test]
fn row_child_without_insets_starts_at_border() -> anyhow::Result<()> {
    init_logging();

    let mut tree = FlexTree::new();
    let root = row_root(&mut tree, 100.0, 100.0);
    tree.set_border(root, Edge::All, 10.0);
    let child = absolute_child(&mut tree, root, 20.0, 20.0)?;
    tree.calculate_layout(root, None, None, Direction::LeftToRight)?;

    assert_box(&tree, child, (10.0, 10.0, 20.0, 20.0));
    Ok(())
}

/// Column layout offsets by the border on both axes, but not the padding.
#[test]
fn column_child_without_insets_starts_at_border() -> anyhow::Result<()> {
    init_logging();

    let mut tree = FlexTree::new();
    let root = sized_node(&mut tree, 100.0, 100.0);
    tree.set_border(root, Edge::All, 3.0);
    tree.set_padding(root, Edge::All, Value::Point(5.0));
    let child = absolute_child(&mut tree, root, 20.0, 20.0)?;
    tree.calculate_layout(root, None, None, Direction::LeftToRight)?;

    assert_box(&tree, child, (3.0, 3.0, 20.0, 20.0));
    Ok(())
}

/// The justify offset of the line carries over to a child without insets.
#[test]
fn space_around_offsets_child_without_insets() -> anyhow::Result<()> {
    init_logging();

    let mut tree = FlexTree::new();
    let root = row_root(&mut tree, 100.0, 100.0);
    tree.set_border(root, Edge::All, 10.0);
    tree.set_justify_content(root, Justify::SpaceAround);
    let flowing = sized_node(&mut tree, 20.0, 20.0);
    tree.add_child(root, flowing)?;
    let child = absolute_child(&mut tree, root, 20.0, 20.0)?;
    tree.calculate_layout(root, None, None, Direction::LeftToRight)?;

    assert_box(&tree, flowing, (40.0, 10.0, 20.0, 20.0));
    assert_box(&tree, child, (40.0, 10.0, 20.0, 20.0));
    Ok(())
}
