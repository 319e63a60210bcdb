//! Measurement cache lookup and the compatibility rules behind it.

use std::iter;

use flex_style::{FlexDirection, MaybeMath as _, MeasureMode, floats_equal};
use indextree::NodeId;
use log::trace;

use super::LayoutInput;
use crate::layout::CachedMeasurement;
use crate::tree::FlexTree;

/// Sizing request on one axis, as seen by the cache.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AxisConstraint {
    pub mode: MeasureMode,
    /// Outer size offered, margins included.
    pub available: Option<f64>,
    /// Margin of the node on this axis.
    pub margin: Option<f64>,
}

/// Snap `value` to the grid of `point_scale_factor` device pixels per point.
///
/// Rounds half up unless `force_ceil` or `force_floor` is set. Values already
/// on the grid, within [`flex_style::EPSILON`], are kept.
pub fn round_value_to_pixel_grid(
    value: f64,
    point_scale_factor: f64,
    force_ceil: bool,
    force_floor: bool,
) -> f64 {
    let scaled = value * point_scale_factor;
    let fraction = scaled.rem_euclid(1.0);
    let base = scaled - fraction;
    let rounded = if floats_equal(Some(fraction), Some(0.0)) {
        base
    } else if floats_equal(Some(fraction), Some(1.0)) || force_ceil {
        base + 1.0
    } else if force_floor {
        base
    } else if fraction > 0.5 || floats_equal(Some(fraction), Some(0.5)) {
        base + 1.0
    } else {
        base
    };
    rounded / point_scale_factor
}

/// Whether `cached` can answer a request for `width` x `height`.
///
/// A result is reusable when the request is identical, or when the new
/// constraint provably leads to the same size: an exact size equal to the
/// cached result, an upper bound the unconstrained result still fits, or a
/// tighter upper bound the cached result still fits.
pub fn can_use_cached_measurement(
    width: AxisConstraint,
    height: AxisConstraint,
    cached: &CachedMeasurement,
    point_scale_factor: f64,
) -> bool {
    if cached.computed_width < 0.0 || cached.computed_height < 0.0 {
        return false;
    }
    axis_is_compatible(
        width,
        cached.width_mode,
        cached.available_width,
        cached.computed_width,
        point_scale_factor,
    ) && axis_is_compatible(
        height,
        cached.height_mode,
        cached.available_height,
        cached.computed_height,
        point_scale_factor,
    )
}

fn axis_is_compatible(
    request: AxisConstraint,
    last_mode: Option<MeasureMode>,
    last_available: Option<f64>,
    last_computed: f64,
    point_scale_factor: f64,
) -> bool {
    let snap = |size: Option<f64>| {
        if point_scale_factor == 0.0 {
            size
        } else {
            size.map(|value| round_value_to_pixel_grid(value, point_scale_factor, false, false))
        }
    };
    let same_request =
        last_mode == Some(request.mode) && floats_equal(snap(last_available), snap(request.available));
    if same_request {
        return true;
    }

    let Some(inner) = request.available.maybe_sub(request.margin) else {
        return false;
    };
    let fits_computed = inner >= last_computed || floats_equal(Some(inner), Some(last_computed));
    match (request.mode, last_mode) {
        (MeasureMode::Exactly, _) => floats_equal(Some(inner), Some(last_computed)),
        (MeasureMode::AtMost, Some(MeasureMode::Undefined)) => fits_computed,
        (MeasureMode::AtMost, Some(MeasureMode::AtMost)) => {
            last_available.is_some_and(|last| last > inner) && fits_computed
        }
        _ => false,
    }
}

impl FlexTree {
    /// Cached result of `node` usable for `input`, if any.
    ///
    /// Nodes with a measure function accept any compatible entry; other nodes
    /// only an entry stored for the very same constraints, looked up in the
    /// layout slot or the measurement ring depending on `perform_layout`.
    pub(super) fn find_cached_measurement(
        &self,
        node: NodeId,
        input: &LayoutInput,
    ) -> Option<CachedMeasurement> {
        let data = self.data(node);
        let layout = &data.layout;
        let ring = &layout.cached_measurements[..layout.next_cached_measurements_index];

        let found = if data.measure.is_some() {
            let width = AxisConstraint {
                mode: input.width_mode,
                available: input.available_width,
                margin: data.margin_for_axis(FlexDirection::Row, input.owner_width),
            };
            let height = AxisConstraint {
                mode: input.height_mode,
                available: input.available_height,
                margin: data.margin_for_axis(FlexDirection::Column, input.owner_width),
            };
            let scale = data.config.point_scale_factor;
            iter::once(&layout.cached_layout)
                .chain(ring)
                .find(|entry| can_use_cached_measurement(width, height, entry, scale))
        } else {
            let matches = |entry: &&CachedMeasurement| {
                entry.matches_exactly(
                    input.available_width,
                    input.available_height,
                    input.width_mode,
                    input.height_mode,
                )
            };
            if input.perform_layout {
                Some(&layout.cached_layout).filter(matches)
            } else {
                ring.iter().find(matches)
            }
        };

        if let Some(entry) = found {
            trace!(
                target: "flex::layout",
                "[CACHE] node={node:?} hit {}x{} for {:?}/{:?}",
                entry.computed_width, entry.computed_height, input.width_mode, input.height_mode
            );
        }
        found.copied()
    }
}
