//! Unit tests for the layout engine internals.

use super::*;

mod rounding_tests;

/// Helper to assert two lengths are equal within tolerance.
#[inline]
pub fn assert_close(got: f64, expected: f64) {
    assert!(
        (got - expected).abs() <= EPSILON,
        "expected {expected}, got {got}"
    );
}

/// Helper to create a detached node with a fixed size.
#[inline]
pub fn sized_node(tree: &mut FlexTree, width: f64, height: f64) -> NodeId {
    let node = tree.new_node();
    tree.set_width(node, Value::Point(width));
    tree.set_height(node, Value::Point(height));
    node
}
