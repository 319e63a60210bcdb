//! Shared helpers for the layout integration tests.

#![allow(dead_code, reason = "each test binary uses a different subset of helpers")]

use std::cell::Cell;
use std::rc::Rc;

use flex_layout::{EPSILON, FlexDirection, FlexTree, MeasureFunc, NodeId, Size, Value};

/// Route `log` output through the test harness.
#[allow(
    clippy::let_underscore_must_use,
    reason = "a logger may already be installed by another test"
)]
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Assert two lengths are equal within tolerance.
#[inline]
pub fn assert_close(got: f64, expected: f64) {
    assert!(
        (got - expected).abs() <= EPSILON,
        "expected {expected}, got {got}"
    );
}

/// Assert the `(left, top, width, height)` box of `node`.
pub fn assert_box(tree: &FlexTree, node: NodeId, expected: (f64, f64, f64, f64)) {
    let (left, top, width, height) = expected;
    assert_close(tree.layout_left(node), left);
    assert_close(tree.layout_top(node), top);
    assert_close(tree.layout_width(node), width);
    assert_close(tree.layout_height(node), height);
}

/// Create a detached node with a fixed size.
pub fn sized_node(tree: &mut FlexTree, width: f64, height: f64) -> NodeId {
    let node = tree.new_node();
    tree.set_width(node, Value::Point(width));
    tree.set_height(node, Value::Point(height));
    node
}

/// Create a fixed-size row container.
pub fn row_root(tree: &mut FlexTree, width: f64, height: f64) -> NodeId {
    let root = sized_node(tree, width, height);
    tree.set_flex_direction(root, FlexDirection::Row);
    root
}

/// Measure function reporting a fixed content size and counting its calls.
pub fn counting_measure(size: Size) -> (MeasureFunc, Rc<Cell<u32>>) {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let measure: MeasureFunc = Rc::new(move |_, _, _, _, _| {
        counter.set(counter.get() + 1);
        size
    });
    (measure, calls)
}
