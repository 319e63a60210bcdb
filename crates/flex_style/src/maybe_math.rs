//! Arithmetic over possibly-unresolved lengths.
//!
//! Sums and differences involving an unresolved operand stay unresolved.
//! `maybe_min`/`maybe_max` instead ignore a missing side, and comparisons
//! with a missing side are false.

/// Operations on `Option<f64>` that keep "unresolved" explicit.
pub trait MaybeMath {
    fn maybe_add(self, rhs: impl Into<Option<f64>>) -> Option<f64>;
    fn maybe_sub(self, rhs: impl Into<Option<f64>>) -> Option<f64>;
    fn maybe_mul(self, rhs: impl Into<Option<f64>>) -> Option<f64>;
    fn maybe_div(self, rhs: impl Into<Option<f64>>) -> Option<f64>;
    /// Larger of two values; a missing side yields the other one.
    fn maybe_max(self, rhs: impl Into<Option<f64>>) -> Option<f64>;
    /// Smaller of two values; a missing side yields the other one.
    fn maybe_min(self, rhs: impl Into<Option<f64>>) -> Option<f64>;
    fn maybe_gt(self, rhs: impl Into<Option<f64>>) -> bool;
    fn maybe_lt(self, rhs: impl Into<Option<f64>>) -> bool;
    fn maybe_ge(self, rhs: impl Into<Option<f64>>) -> bool;
    fn maybe_le(self, rhs: impl Into<Option<f64>>) -> bool;
}

#[inline]
fn zip_with(
    lhs: Option<f64>,
    rhs: Option<f64>,
    combine: impl FnOnce(f64, f64) -> f64,
) -> Option<f64> {
    match (lhs, rhs) {
        (Some(left), Some(right)) => Some(combine(left, right)),
        _ => None,
    }
}

#[inline]
fn either_with(
    lhs: Option<f64>,
    rhs: Option<f64>,
    pick: impl FnOnce(f64, f64) -> f64,
) -> Option<f64> {
    match (lhs, rhs) {
        (Some(left), Some(right)) => Some(pick(left, right)),
        (Some(only), None) | (None, Some(only)) => Some(only),
        (None, None) => None,
    }
}

#[inline]
fn compare(lhs: Option<f64>, rhs: Option<f64>, test: impl FnOnce(f64, f64) -> bool) -> bool {
    match (lhs, rhs) {
        (Some(left), Some(right)) => test(left, right),
        _ => false,
    }
}

impl MaybeMath for Option<f64> {
    #[inline]
    fn maybe_add(self, rhs: impl Into<Option<f64>>) -> Option<f64> {
        zip_with(self, rhs.into(), |left, right| left + right)
    }

    #[inline]
    fn maybe_sub(self, rhs: impl Into<Option<f64>>) -> Option<f64> {
        zip_with(self, rhs.into(), |left, right| left - right)
    }

    #[inline]
    fn maybe_mul(self, rhs: impl Into<Option<f64>>) -> Option<f64> {
        zip_with(self, rhs.into(), |left, right| left * right)
    }

    #[inline]
    fn maybe_div(self, rhs: impl Into<Option<f64>>) -> Option<f64> {
        zip_with(self, rhs.into(), |left, right| left / right)
    }

    #[inline]
    fn maybe_max(self, rhs: impl Into<Option<f64>>) -> Option<f64> {
        either_with(self, rhs.into(), f64::max)
    }

    #[inline]
    fn maybe_min(self, rhs: impl Into<Option<f64>>) -> Option<f64> {
        either_with(self, rhs.into(), f64::min)
    }

    #[inline]
    fn maybe_gt(self, rhs: impl Into<Option<f64>>) -> bool {
        compare(self, rhs.into(), |left, right| left > right)
    }

    #[inline]
    fn maybe_lt(self, rhs: impl Into<Option<f64>>) -> bool {
        compare(self, rhs.into(), |left, right| left < right)
    }

    #[inline]
    fn maybe_ge(self, rhs: impl Into<Option<f64>>) -> bool {
        compare(self, rhs.into(), |left, right| left >= right)
    }

    #[inline]
    fn maybe_le(self, rhs: impl Into<Option<f64>>) -> bool {
        compare(self, rhs.into(), |left, right| left <= right)
    }
}
