//! Tests for pixel-grid snapping.

use std::rc::Rc;

use super::*;

#[test]
/// # Panics
/// Panics if values are not rounded half up.
fn rounds_half_up() {
    assert_close(round_value_to_pixel_grid(1.5, 1.0, false, false), 2.0);
    assert_close(round_value_to_pixel_grid(1.4, 1.0, false, false), 1.0);
    assert_close(round_value_to_pixel_grid(2.000_01, 1.0, false, false), 2.0);
}

#[test]
/// # Panics
/// Panics if the forced directions are ignored.
fn forced_ceil_and_floor() {
    assert_close(round_value_to_pixel_grid(1.1, 1.0, true, false), 2.0);
    assert_close(round_value_to_pixel_grid(1.9, 1.0, false, true), 1.0);
    assert_close(round_value_to_pixel_grid(3.0, 1.0, true, false), 3.0);
}

#[test]
/// # Panics
/// Panics if the scale factor does not define the grid.
fn scale_factor_sets_the_grid() {
    assert_close(round_value_to_pixel_grid(1.3, 2.0, false, false), 1.5);
    assert_close(round_value_to_pixel_grid(1.2, 2.0, false, false), 1.0);
    assert_close(round_value_to_pixel_grid(0.4, 3.0, false, false), 1.0 / 3.0);
}

#[test]
/// # Panics
/// Panics if negative values do not round toward the nearest grid line.
fn negative_values_round_to_nearest() {
    assert_close(round_value_to_pixel_grid(-0.3, 1.0, false, false), 0.0);
    assert_close(round_value_to_pixel_grid(-0.7, 1.0, false, false), -1.0);
}

#[test]
/// # Panics
/// Panics if adjacent siblings leave a gap or overlap after rounding.
fn siblings_share_edges_after_rounding() -> anyhow::Result<()> {
    let mut tree = FlexTree::new();
    let root = sized_node(&mut tree, 100.0, 10.0);
    tree.set_flex_direction(root, FlexDirection::Row);
    let mut children = Vec::new();
    for _ in 0..3 {
        let child = tree.new_node();
        tree.set_flex_grow(child, Some(1.0));
        tree.add_child(root, child)?;
        children.push(child);
    }
    tree.calculate_layout(root, None, None, Direction::LeftToRight)?;

    let lefts: Vec<f64> = children.iter().map(|child| tree.layout_left(*child)).collect();
    let widths: Vec<f64> = children.iter().map(|child| tree.layout_width(*child)).collect();
    assert_eq!(lefts, [0.0, 33.0, 67.0]);
    assert_eq!(widths, [33.0, 34.0, 33.0]);
    Ok(())
}

#[test]
/// # Panics
/// Panics if a text node's fractional size is truncated.
fn text_nodes_round_size_up() -> anyhow::Result<()> {
    let mut tree = FlexTree::new();
    let root = sized_node(&mut tree, 100.0, 100.0);
    tree.set_flex_direction(root, FlexDirection::Row);
    tree.set_align_items(root, Align::FlexStart);
    let text = tree.new_node();
    let measure: MeasureFunc = Rc::new(|_, _, _, _, _| Size {
        width: 10.2,
        height: 10.2,
    });
    tree.set_measure_func(text, Some(measure))?;
    tree.add_child(root, text)?;
    tree.calculate_layout(root, None, None, Direction::LeftToRight)?;

    assert_eq!(tree.node_type(text), NodeType::Text);
    assert_close(tree.layout_width(text), 11.0);
    assert_close(tree.layout_height(text), 11.0);
    Ok(())
}

#[test]
/// # Panics
/// Panics if a zero scale factor still rounds.
fn zero_scale_factor_disables_rounding() -> anyhow::Result<()> {
    let mut tree = FlexTree::with_config(Config {
        point_scale_factor: 0.0,
        ..Config::default()
    });
    let root = sized_node(&mut tree, 100.0, 10.0);
    tree.set_flex_direction(root, FlexDirection::Row);
    let first = tree.new_node();
    let second = tree.new_node();
    tree.set_flex_grow(first, Some(1.0));
    tree.set_flex_grow(second, Some(2.0));
    tree.add_child(root, first)?;
    tree.add_child(root, second)?;
    tree.calculate_layout(root, None, None, Direction::LeftToRight)?;

    assert_close(tree.layout_width(first), 100.0 / 3.0);
    assert_close(tree.layout_left(second), 100.0 / 3.0);
    Ok(())
}
