//! Tests for the style model.

use super::*;


/// Helper to assert an optional length equals `expected` within tolerance.
#[inline]
pub fn assert_resolves_to(got: Option<f64>, expected: f64) {
    assert!(
        got.is_some_and(|value| (value - expected).abs() <= EPSILON),
        "expected {expected}, got {got:?}"
    );
}
