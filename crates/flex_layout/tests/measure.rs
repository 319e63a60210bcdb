mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::{assert_box, counting_measure, init_logging, sized_node};
use flex_layout::{
    Align, Direction, Edge, FlexTree, MeasureFunc, MeasureMode, NodeType, Size, Value,
};

type Request = (Option<f64>, MeasureMode, Option<f64>, MeasureMode);

/// The callback sees the content box and its result is padded back out.
#[test]
fn measure_gets_content_box() -> anyhow::Result<()> {
    init_logging();

    let mut tree = FlexTree::new();
    let root = sized_node(&mut tree, 200.0, 100.0);
    tree.set_align_items(root, Align::FlexStart);
    let text = tree.new_node();
    tree.set_padding(text, Edge::All, Value::Point(5.0));

    let requests: Rc<RefCell<Vec<Request>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&requests);
    let measure: MeasureFunc = Rc::new(move |_, width, width_mode, height, height_mode| {
        sink.borrow_mut().push((width, width_mode, height, height_mode));
        Size {
            width: 50.0,
            height: 20.0,
        }
    });
    tree.set_measure_func(text, Some(measure))?;
    assert_eq!(tree.node_type(text), NodeType::Text);
    tree.add_child(root, text)?;
    tree.calculate_layout(root, None, None, Direction::LeftToRight)?;

    assert_box(&tree, text, (0.0, 0.0, 60.0, 30.0));
    let seen = requests.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(
        seen[0],
        (Some(190.0), MeasureMode::AtMost, Some(90.0), MeasureMode::AtMost)
    );
    Ok(())
}

/// A leaf sized on both axes is never measured.
#[test]
fn fixed_leaf_skips_measure() -> anyhow::Result<()> {
    init_logging();

    let mut tree = FlexTree::new();
    let root = sized_node(&mut tree, 200.0, 100.0);
    let text = sized_node(&mut tree, 50.0, 20.0);
    let (measure, calls) = counting_measure(Size {
        width: 10.0,
        height: 10.0,
    });
    tree.set_measure_func(text, Some(measure))?;
    tree.add_child(root, text)?;
    tree.calculate_layout(root, None, None, Direction::LeftToRight)?;

    assert_eq!(calls.get(), 0);
    assert_box(&tree, text, (0.0, 0.0, 50.0, 20.0));
    Ok(())
}

/// Measured size is clamped by min and max.
#[test]
fn measured_size_respects_max() -> anyhow::Result<()> {
    init_logging();

    let mut tree = FlexTree::new();
    let root = sized_node(&mut tree, 200.0, 100.0);
    tree.set_align_items(root, Align::FlexStart);
    let text = tree.new_node();
    tree.set_max_width(text, Value::Point(40.0));
    let (measure, _) = counting_measure(Size {
        width: 120.0,
        height: 20.0,
    });
    tree.set_measure_func(text, Some(measure))?;
    tree.add_child(root, text)?;
    tree.calculate_layout(root, None, None, Direction::LeftToRight)?;

    assert_box(&tree, text, (0.0, 0.0, 40.0, 20.0));
    Ok(())
}

/// A replaced measure function is the one consulted on the next layout.
#[test]
fn replaced_measure_func_is_used() -> anyhow::Result<()> {
    init_logging();

    let mut tree = FlexTree::new();
    let root = sized_node(&mut tree, 200.0, 100.0);
    tree.set_align_items(root, Align::FlexStart);
    let text = tree.new_node();
    let (first, first_calls) = counting_measure(Size {
        width: 30.0,
        height: 10.0,
    });
    tree.set_measure_func(text, Some(first))?;
    tree.add_child(root, text)?;
    tree.calculate_layout(root, None, None, Direction::LeftToRight)?;
    assert_box(&tree, text, (0.0, 0.0, 30.0, 10.0));

    let (second, second_calls) = counting_measure(Size {
        width: 70.0,
        height: 40.0,
    });
    tree.set_measure_func(text, Some(second))?;
    tree.mark_dirty(text);
    tree.calculate_layout(root, None, None, Direction::LeftToRight)?;

    assert_eq!(first_calls.get(), 1);
    assert_eq!(second_calls.get(), 1);
    assert_eq!(tree.stats().measure_callbacks_last(), 1);
    assert_box(&tree, text, (0.0, 0.0, 70.0, 40.0));
    Ok(())
}
