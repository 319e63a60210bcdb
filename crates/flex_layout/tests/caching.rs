mod common;

use std::cell::Cell;
use std::rc::Rc;

use common::{assert_close, counting_measure, init_logging, row_root, sized_node};
use flex_layout::{Align, DirtiedFunc, Direction, FlexTree, Size, Value};

/// A second pass over an unchanged tree is answered from the cache.
#[test]
fn unchanged_tree_is_served_from_cache() -> anyhow::Result<()> {
    init_logging();

    let mut tree = FlexTree::new();
    let root = row_root(&mut tree, 200.0, 100.0);
    for _ in 0..3 {
        let child = sized_node(&mut tree, 20.0, 20.0);
        tree.add_child(root, child)?;
    }
    tree.calculate_layout(root, None, None, Direction::LeftToRight)?;
    assert!(tree.stats().full_computations_last() > 0);

    tree.calculate_layout(root, None, None, Direction::LeftToRight)?;
    assert_eq!(tree.stats().full_computations_last(), 0);
    assert_eq!(tree.stats().cache_hits_last(), 1);
    assert_eq!(tree.stats().passes_total(), 2);
    assert_close(tree.layout_width(root), 200.0);
    Ok(())
}

/// Editing a style dirties the path to the root and recomputes it.
#[test]
fn style_change_invalidates_ancestors() -> anyhow::Result<()> {
    init_logging();

    let mut tree = FlexTree::new();
    let root = row_root(&mut tree, 200.0, 100.0);
    let first = sized_node(&mut tree, 20.0, 20.0);
    let second = sized_node(&mut tree, 20.0, 20.0);
    tree.add_child(root, first)?;
    tree.add_child(root, second)?;
    tree.calculate_layout(root, None, None, Direction::LeftToRight)?;
    assert!(!tree.is_dirty(root));

    tree.set_width(first, Value::Point(50.0));
    assert!(tree.is_dirty(first));
    assert!(tree.is_dirty(root));
    assert!(!tree.is_dirty(second));

    tree.calculate_layout(root, None, None, Direction::LeftToRight)?;
    assert!(tree.stats().full_computations_last() > 0);
    assert_close(tree.layout_width(first), 50.0);
    assert_close(tree.layout_left(second), 50.0);
    Ok(())
}

/// Setting a style property to its current value does not dirty anything.
#[test]
fn same_value_keeps_node_clean() -> anyhow::Result<()> {
    init_logging();

    let mut tree = FlexTree::new();
    let root = row_root(&mut tree, 200.0, 100.0);
    tree.calculate_layout(root, None, None, Direction::LeftToRight)?;

    tree.set_width(root, Value::Point(200.0));
    assert!(!tree.is_dirty(root));
    Ok(())
}

/// Measure callbacks are not repeated for cached constraints.
#[test]
fn measure_is_not_repeated() -> anyhow::Result<()> {
    init_logging();

    let mut tree = FlexTree::new();
    let root = sized_node(&mut tree, 200.0, 100.0);
    tree.set_align_items(root, Align::FlexStart);
    let text = tree.new_node();
    let (measure, calls) = counting_measure(Size {
        width: 50.0,
        height: 20.0,
    });
    tree.set_measure_func(text, Some(measure))?;
    tree.add_child(root, text)?;

    tree.calculate_layout(root, None, None, Direction::LeftToRight)?;
    assert_eq!(calls.get(), 1);
    assert_eq!(tree.stats().measure_callbacks_last(), 1);

    tree.calculate_layout(root, None, None, Direction::LeftToRight)?;
    assert_eq!(calls.get(), 1);

    tree.mark_dirty(text);
    tree.calculate_layout(root, None, None, Direction::LeftToRight)?;
    assert_eq!(calls.get(), 2);
    Ok(())
}

/// The dirtied callback fires only on the clean-to-dirty transition.
#[test]
fn dirtied_callback_fires_once() -> anyhow::Result<()> {
    init_logging();

    let mut tree = FlexTree::new();
    let root = row_root(&mut tree, 100.0, 100.0);
    let child = sized_node(&mut tree, 10.0, 10.0);
    tree.add_child(root, child)?;
    tree.calculate_layout(root, None, None, Direction::LeftToRight)?;

    let fired = Rc::new(Cell::new(0_u32));
    let counter = Rc::clone(&fired);
    let dirtied: DirtiedFunc = Rc::new(move |_| counter.set(counter.get() + 1));
    tree.set_dirtied_func(root, Some(dirtied));

    tree.mark_dirty(child);
    tree.mark_dirty(child);
    tree.set_width(child, Value::Point(20.0));
    assert_eq!(fired.get(), 1);
    Ok(())
}

/// Consumers can acknowledge a layout and see it flagged again after a pass.
#[test]
fn new_layout_flag_is_acknowledged() -> anyhow::Result<()> {
    init_logging();

    let mut tree = FlexTree::new();
    let root = row_root(&mut tree, 100.0, 100.0);
    tree.calculate_layout(root, None, None, Direction::LeftToRight)?;
    assert!(tree.has_new_layout(root));

    tree.mark_layout_seen(root);
    assert!(!tree.has_new_layout(root));

    tree.set_height(root, Value::Point(50.0));
    tree.calculate_layout(root, None, None, Direction::LeftToRight)?;
    assert!(tree.has_new_layout(root));
    assert_close(tree.layout_height(root), 50.0);
    Ok(())
}
