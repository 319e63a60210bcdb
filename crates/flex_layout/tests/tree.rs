mod common;

use std::rc::Rc;

use common::{assert_box, assert_close, counting_measure, init_logging, row_root, sized_node};
use flex_layout::{Direction, Display, FlexTree, LayoutError, MeasureFunc, Size};

/// A node can only have one owner at a time.
#[test]
fn child_cannot_have_two_owners() -> anyhow::Result<()> {
    init_logging();

    let mut tree = FlexTree::new();
    let first = tree.new_node();
    let second = tree.new_node();
    let child = tree.new_node();
    tree.add_child(first, child)?;

    let result = tree.add_child(second, child);
    assert!(matches!(result, Err(LayoutError::ChildAlreadyOwned { .. })));

    tree.remove_child(first, child)?;
    tree.add_child(second, child)?;
    assert_eq!(tree.parent(child), Some(second));
    Ok(())
}

/// Layout only starts at a node without an owner.
#[test]
fn layout_requires_root() -> anyhow::Result<()> {
    init_logging();

    let mut tree = FlexTree::new();
    let root = tree.new_node();
    let child = tree.new_node();
    tree.add_child(root, child)?;

    let result = tree.calculate_layout(child, None, None, Direction::LeftToRight);
    assert!(matches!(result, Err(LayoutError::NotARoot { .. })));
    Ok(())
}

/// A measured root is rejected.
#[test]
fn measured_root_is_rejected() -> anyhow::Result<()> {
    init_logging();

    let mut tree = FlexTree::new();
    let root = tree.new_node();
    let (measure, _) = counting_measure(Size::default());
    tree.set_measure_func(root, Some(measure))?;

    let result = tree.calculate_layout(root, None, None, Direction::LeftToRight);
    assert!(matches!(result, Err(LayoutError::RootHasMeasureFunc { .. })));
    Ok(())
}

/// Owner sizes must be finite when given.
#[test]
fn non_finite_owner_size_is_rejected() {
    init_logging();

    let mut tree = FlexTree::new();
    let root = tree.new_node();

    let result = tree.calculate_layout(root, Some(f64::NAN), None, Direction::LeftToRight);
    assert!(matches!(
        result,
        Err(LayoutError::NonFiniteOwnerSize { axis: "width", .. })
    ));
    let result = tree.calculate_layout(root, None, Some(f64::INFINITY), Direction::LeftToRight);
    assert!(matches!(
        result,
        Err(LayoutError::NonFiniteOwnerSize { axis: "height", .. })
    ));
}

/// Measure functions and children exclude each other.
#[test]
fn measure_and_children_are_exclusive() -> anyhow::Result<()> {
    init_logging();

    let mut tree = FlexTree::new();
    let parent = tree.new_node();
    let child = tree.new_node();
    tree.add_child(parent, child)?;
    let measure: MeasureFunc = Rc::new(|_, _, _, _, _| Size::default());

    let result = tree.set_measure_func(parent, Some(Rc::clone(&measure)));
    assert!(matches!(result, Err(LayoutError::NodeHasChildren { .. })));

    let leaf = tree.new_node();
    tree.set_measure_func(leaf, Some(measure))?;
    let orphan = tree.new_node();
    let result = tree.add_child(leaf, orphan);
    assert!(matches!(
        result,
        Err(LayoutError::MeasuredNodeCannotHaveChildren { .. })
    ));
    Ok(())
}

/// Children keep their insertion index and invalid edits are reported.
#[test]
fn insert_child_respects_index() -> anyhow::Result<()> {
    init_logging();

    let mut tree = FlexTree::new();
    let root = tree.new_node();
    let first = tree.new_node();
    let second = tree.new_node();
    let third = tree.new_node();
    tree.add_child(root, first)?;
    tree.add_child(root, third)?;
    tree.insert_child(root, second, 1)?;

    let order: Vec<_> = tree.children(root).collect();
    assert_eq!(order, [first, second, third]);
    assert_eq!(tree.child(root, 2), Some(third));

    let extra = tree.new_node();
    let result = tree.insert_child(root, extra, 5);
    assert!(matches!(
        result,
        Err(LayoutError::ChildIndexOutOfBounds { index: 5, count: 3, .. })
    ));
    let result = tree.remove_child(first, second);
    assert!(matches!(result, Err(LayoutError::NotAChild { .. })));
    Ok(())
}

/// Reset refuses attached nodes and otherwise restores defaults.
#[test]
fn reset_restores_defaults() -> anyhow::Result<()> {
    init_logging();

    let mut tree = FlexTree::new();
    let root = tree.new_node();
    let child = sized_node(&mut tree, 10.0, 10.0);
    tree.add_child(root, child)?;

    assert!(matches!(tree.reset(child), Err(LayoutError::ResetWithOwner { .. })));
    assert!(matches!(tree.reset(root), Err(LayoutError::ResetWithChildren { .. })));

    tree.remove_all_children(root);
    tree.reset(child)?;
    assert_eq!(tree.child_count(root), 0);
    assert!(tree.style(child).dimensions.iter().all(|value| !value.is_defined()));
    Ok(())
}

/// Host data round-trips by type.
#[test]
fn context_is_typed() {
    init_logging();

    let mut tree = FlexTree::new();
    let node = tree.new_node();
    tree.set_context(node, 42_u32);

    assert_eq!(tree.context::<u32>(node), Some(&42));
    assert!(tree.context::<String>(node).is_none());

    tree.clear_context(node);
    assert!(tree.context::<u32>(node).is_none());
}

/// Hidden children take no space and are zeroed.
#[test]
fn display_none_takes_no_space() -> anyhow::Result<()> {
    init_logging();

    let mut tree = FlexTree::new();
    let root = row_root(&mut tree, 100.0, 100.0);
    let hidden = sized_node(&mut tree, 30.0, 30.0);
    tree.set_display(hidden, Display::None);
    let visible = sized_node(&mut tree, 20.0, 20.0);
    tree.add_child(root, hidden)?;
    tree.add_child(root, visible)?;
    tree.calculate_layout(root, None, None, Direction::LeftToRight)?;

    assert_box(&tree, hidden, (0.0, 0.0, 0.0, 0.0));
    assert_close(tree.layout_left(visible), 0.0);
    Ok(())
}

/// A deep clone copies style and structure but not the owner.
#[test]
fn deep_clone_copies_subtree() -> anyhow::Result<()> {
    init_logging();

    let mut tree = FlexTree::new();
    let root = row_root(&mut tree, 100.0, 50.0);
    let child = sized_node(&mut tree, 10.0, 10.0);
    tree.add_child(root, child)?;

    let copy = tree.deep_clone(root);
    assert_eq!(tree.parent(copy), None);
    assert_eq!(tree.child_count(copy), 1);
    assert_eq!(tree.style(copy), tree.style(root));

    tree.calculate_layout(copy, None, None, Direction::LeftToRight)?;
    assert_close(tree.layout_width(copy), 100.0);
    tree.free_subtree(copy);
    Ok(())
}
