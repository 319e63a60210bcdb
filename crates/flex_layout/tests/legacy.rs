mod common;

use common::{assert_close, init_logging, sized_node};
use flex_layout::{Align, Config, Direction, FlexTree, NodeId};

/// Column root holding a content-sized column whose only child wants to grow.
fn growing_grandchild(tree: &mut FlexTree) -> anyhow::Result<(NodeId, NodeId)> {
    let root = sized_node(tree, 100.0, 100.0);
    tree.set_align_items(root, Align::FlexStart);
    let middle = tree.new_node();
    let grandchild = tree.new_node();
    tree.set_flex_grow(grandchild, Some(1.0));
    tree.add_child(root, middle)?;
    tree.add_child(middle, grandchild)?;
    Ok((root, middle))
}

/// By default a content-sized container shrinks to its items.
#[test]
fn content_sized_container_fits_items() -> anyhow::Result<()> {
    init_logging();

    let mut tree = FlexTree::new();
    let (root, middle) = growing_grandchild(&mut tree)?;
    tree.calculate_layout(root, None, None, Direction::LeftToRight)?;

    assert_close(tree.layout_height(middle), 0.0);
    assert!(!tree.layout(root).does_legacy_stretch_flag_affect_layout());
    Ok(())
}

/// Legacy stretch keeps the offered size, and the diff pass notices.
#[test]
fn legacy_stretch_is_diffed() -> anyhow::Result<()> {
    init_logging();

    let mut tree = FlexTree::with_config(Config {
        use_legacy_stretch_behaviour: true,
        should_diff_layout_without_legacy_stretch_behaviour: true,
        ..Config::default()
    });
    let (root, middle) = growing_grandchild(&mut tree)?;
    tree.calculate_layout(root, None, None, Direction::LeftToRight)?;

    assert_close(tree.layout_height(middle), 100.0);
    assert!(tree.layout(root).does_legacy_stretch_flag_affect_layout());
    assert_eq!(tree.child_count(root), 1);
    Ok(())
}

/// Without the diff option the flag is never computed.
#[test]
fn legacy_without_diff_leaves_flag_unset() -> anyhow::Result<()> {
    init_logging();

    let mut tree = FlexTree::with_config(Config {
        use_legacy_stretch_behaviour: true,
        ..Config::default()
    });
    let (root, middle) = growing_grandchild(&mut tree)?;
    tree.calculate_layout(root, None, None, Direction::LeftToRight)?;

    assert_close(tree.layout_height(middle), 100.0);
    assert!(!tree.layout(root).does_legacy_stretch_flag_affect_layout());
    Ok(())
}

/// The comparison pass leaves the pass counters untouched.
#[test]
fn legacy_diff_is_not_counted() -> anyhow::Result<()> {
    init_logging();

    let mut plain = FlexTree::with_config(Config {
        use_legacy_stretch_behaviour: true,
        ..Config::default()
    });
    let (plain_root, _) = growing_grandchild(&mut plain)?;
    plain.calculate_layout(plain_root, None, None, Direction::LeftToRight)?;

    let mut diffed = FlexTree::with_config(Config {
        use_legacy_stretch_behaviour: true,
        should_diff_layout_without_legacy_stretch_behaviour: true,
        ..Config::default()
    });
    let (diffed_root, _) = growing_grandchild(&mut diffed)?;
    diffed.calculate_layout(diffed_root, None, None, Direction::LeftToRight)?;

    assert!(diffed.layout(diffed_root).does_legacy_stretch_flag_affect_layout());
    assert_eq!(diffed.stats(), plain.stats());

    diffed.calculate_layout(diffed_root, None, None, Direction::LeftToRight)?;
    assert_eq!(diffed.stats().full_computations_last(), 0);
    assert_eq!(diffed.stats().cache_hits_last(), 1);
    Ok(())
}
