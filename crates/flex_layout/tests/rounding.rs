mod common;

use common::{assert_close, init_logging, row_root};
use flex_layout::{Config, Direction, FlexTree, NodeId};

fn thirds(tree: &mut FlexTree) -> anyhow::Result<(NodeId, Vec<NodeId>)> {
    let root = row_root(tree, 100.0, 10.0);
    let mut children = Vec::new();
    for _ in 0..3 {
        let child = tree.new_node();
        tree.set_flex_grow(child, Some(1.0));
        tree.add_child(root, child)?;
        children.push(child);
    }
    Ok((root, children))
}

/// A scale factor of two snaps edges to half points.
#[test]
fn scale_factor_snaps_to_half_points() -> anyhow::Result<()> {
    init_logging();

    let mut tree = FlexTree::with_config(Config {
        point_scale_factor: 2.0,
        ..Config::default()
    });
    let (root, children) = thirds(&mut tree)?;
    tree.calculate_layout(root, None, None, Direction::LeftToRight)?;

    let lefts: Vec<f64> = children.iter().map(|&child| tree.layout_left(child)).collect();
    let widths: Vec<f64> = children.iter().map(|&child| tree.layout_width(child)).collect();
    for (got, expected) in lefts.into_iter().zip([0.0, 33.5, 66.5]) {
        assert_close(got, expected);
    }
    for (got, expected) in widths.into_iter().zip([33.5, 33.0, 33.5]) {
        assert_close(got, expected);
    }
    Ok(())
}

/// Rounded children always cover their owner exactly.
#[test]
fn rounded_children_cover_owner() -> anyhow::Result<()> {
    init_logging();

    let mut tree = FlexTree::new();
    let (root, children) = thirds(&mut tree)?;
    tree.calculate_layout(root, None, None, Direction::LeftToRight)?;

    let total: f64 = children.iter().map(|&child| tree.layout_width(child)).sum();
    assert_close(total, 100.0);
    for pair in children.windows(2) {
        let end = tree.layout_left(pair[0]) + tree.layout_width(pair[0]);
        assert_close(tree.layout_left(pair[1]), end);
    }
    Ok(())
}
