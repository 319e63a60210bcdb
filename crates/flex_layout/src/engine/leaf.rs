//! Shortcuts for nodes that need no flex pass: leaves with a measure
//! function, containers without children, and measurements whose result
//! is fixed by the constraints alone.

use flex_style::{Dimension, FlexDirection, MaybeMath as _, MeasureMode};
use indextree::NodeId;
use log::trace;

use super::LayoutInput;
use crate::node::MeasureFunc;
use crate::tree::FlexTree;

/// Outer size the owner offers when the mode pins it, else `content`.
fn offered_or(
    mode: MeasureMode,
    content: Option<f64>,
    available: Option<f64>,
    margin: Option<f64>,
) -> Option<f64> {
    match mode {
        MeasureMode::Undefined | MeasureMode::AtMost => content,
        MeasureMode::Exactly => available.maybe_sub(margin),
    }
}

impl FlexTree {
    /// Size a leaf through its measure function.
    pub(super) fn measure_leaf(
        &mut self,
        node: NodeId,
        measure: &MeasureFunc,
        input: &LayoutInput,
    ) {
        let data = self.data(node);
        let available_width = input.available_width;
        let available_height = input.available_height;
        let padding_border_row =
            data.padding_and_border_for_axis(FlexDirection::Row, available_width);
        let padding_border_column =
            data.padding_and_border_for_axis(FlexDirection::Column, available_width);
        let margin_row = data.margin_for_axis(FlexDirection::Row, available_width);
        let margin_column = data.margin_for_axis(FlexDirection::Column, available_width);

        let both_exact =
            input.width_mode == MeasureMode::Exactly && input.height_mode == MeasureMode::Exactly;
        let (width, height) = if both_exact {
            (
                available_width.maybe_sub(margin_row),
                available_height.maybe_sub(margin_column),
            )
        } else {
            let inner = |available: Option<f64>, margin: Option<f64>, padding_border: f64| {
                available.and_then(|size| {
                    Some(size)
                        .maybe_sub(margin)
                        .maybe_sub(padding_border)
                        .maybe_max(0.0)
                })
            };
            let inner_width = inner(available_width, margin_row, padding_border_row);
            let inner_height = inner(available_height, margin_column, padding_border_column);
            let measured = measure(
                node,
                inner_width,
                input.width_mode,
                inner_height,
                input.height_mode,
            );
            trace!(
                target: "flex::layout",
                "[MEASURE] node={node:?} inner={inner_width:?}x{inner_height:?} modes={:?}/{:?} -> {}x{}",
                input.width_mode, input.height_mode, measured.width, measured.height
            );
            (
                offered_or(
                    input.width_mode,
                    Some(measured.width + padding_border_row),
                    available_width,
                    margin_row,
                ),
                offered_or(
                    input.height_mode,
                    Some(measured.height + padding_border_column),
                    available_height,
                    margin_column,
                ),
            )
        };

        let owner_width = input.owner_width;
        let measured_width = data.bound_axis(FlexDirection::Row, width, owner_width, owner_width);
        let measured_height =
            data.bound_axis(FlexDirection::Column, height, input.owner_height, owner_width);
        if !both_exact {
            self.stats.record_measure_callback();
        }
        self.set_measured_size(node, measured_width, measured_height);
    }

    /// Size a container with no children from its padding and border.
    pub(super) fn measure_empty_container(&mut self, node: NodeId, input: &LayoutInput) {
        let data = self.data(node);
        let owner_width = input.owner_width;
        let width = offered_or(
            input.width_mode,
            Some(data.padding_and_border_for_axis(FlexDirection::Row, owner_width)),
            input.available_width,
            data.margin_for_axis(FlexDirection::Row, owner_width),
        );
        let height = offered_or(
            input.height_mode,
            Some(data.padding_and_border_for_axis(FlexDirection::Column, owner_width)),
            input.available_height,
            data.margin_for_axis(FlexDirection::Column, owner_width),
        );
        let measured_width = data.bound_axis(FlexDirection::Row, width, owner_width, owner_width);
        let measured_height =
            data.bound_axis(FlexDirection::Column, height, input.owner_height, owner_width);
        self.set_measured_size(node, measured_width, measured_height);
    }

    /// Answer a measurement without visiting children when the constraints
    /// fix the size: both axes exact, or an upper bound of zero or less.
    /// Returns whether the shortcut applied.
    pub(super) fn measure_fixed_size(&mut self, node: NodeId, input: &LayoutInput) -> bool {
        let collapsed = |available: Option<f64>, mode: MeasureMode| {
            mode == MeasureMode::AtMost && available.is_some_and(|size| size <= 0.0)
        };
        let both_exact =
            input.width_mode == MeasureMode::Exactly && input.height_mode == MeasureMode::Exactly;
        let fixed = collapsed(input.available_width, input.width_mode)
            || collapsed(input.available_height, input.height_mode)
            || both_exact;
        if !fixed {
            return false;
        }

        let data = self.data(node);
        let owner_width = input.owner_width;
        let outer = |available: Option<f64>, mode: MeasureMode, margin: Option<f64>| {
            match available {
                Some(size) if mode == MeasureMode::AtMost && size < 0.0 => Some(0.0),
                Some(size) => Some(size).maybe_sub(margin),
                None => Some(0.0),
            }
        };
        let width = outer(
            input.available_width,
            input.width_mode,
            data.margin_for_axis(FlexDirection::Row, owner_width),
        );
        let height = outer(
            input.available_height,
            input.height_mode,
            data.margin_for_axis(FlexDirection::Column, owner_width),
        );
        let measured_width = data.bound_axis(FlexDirection::Row, width, owner_width, owner_width);
        let measured_height =
            data.bound_axis(FlexDirection::Column, height, input.owner_height, owner_width);
        self.set_measured_size(node, measured_width, measured_height);
        true
    }

    fn set_measured_size(&mut self, node: NodeId, width: f64, height: f64) {
        let layout = &mut self.data_mut(node).layout;
        layout.set_measured(Dimension::Width, Some(width));
        layout.set_measured(Dimension::Height, Some(height));
    }
}
