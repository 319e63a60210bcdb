//! Layout of absolutely positioned children against their container.

use flex_style::{Align, Direction, FlexDirection, Justify, MaybeMath as _, MeasureMode, Wrap};
use indextree::NodeId;
use log::trace;

use super::LayoutInput;
use crate::node::NodeData;
use crate::tree::FlexTree;

/// Size of an absolute child on `axis` from its style, or from its two
/// insets when both are set.
fn inset_size(
    container: &NodeData,
    child: &NodeData,
    axis: FlexDirection,
    reference: Option<f64>,
    width: Option<f64>,
) -> Option<f64> {
    if child.is_style_dim_defined(axis, reference) {
        return child
            .style
            .resolved_dimension(axis.dimension())
            .resolve(reference)
            .maybe_add(child.margin_for_axis(axis, width));
    }
    if !(child.is_leading_position_defined(axis) && child.is_trailing_position_defined(axis)) {
        return None;
    }
    let size = container
        .measured(axis)
        .maybe_sub(container.leading_border(axis) + container.trailing_border(axis))
        .maybe_sub(
            child
                .leading_position(axis, reference)
                .maybe_add(child.trailing_position(axis, reference)),
        );
    Some(child.bound_axis(axis, size, reference, width))
}

impl FlexTree {
    /// Size and place the absolute `child` of `node`.
    ///
    /// Insets win over alignment: a child with a trailing inset only is pinned
    /// to the trailing edge, one with no inset on an axis follows
    /// `justify-content` or its own alignment there.
    pub(super) fn absolute_layout_child(
        &mut self,
        node: NodeId,
        child: NodeId,
        width: Option<f64>,
        width_mode: MeasureMode,
        height: Option<f64>,
        direction: Direction,
    ) {
        let container = self.data(node);
        let data = self.data(child);
        let main_axis = container.style.flex_direction.resolve(direction);
        let cross_axis = main_axis.cross(direction);
        let is_main_row = main_axis.is_row();

        let mut child_width = inset_size(container, data, FlexDirection::Row, width, width);
        let mut child_height = inset_size(container, data, FlexDirection::Column, height, width);

        // Exactly one side known: derive the other from the aspect ratio.
        if child_width.is_none() != child_height.is_none()
            && let Some(ratio) = data.style.aspect_ratio
        {
            let margin_row = data.margin_for_axis(FlexDirection::Row, width);
            let margin_column = data.margin_for_axis(FlexDirection::Column, width);
            if child_width.is_none() {
                child_width =
                    margin_row.maybe_add(child_height.maybe_sub(margin_column).maybe_mul(ratio));
            } else {
                child_height =
                    margin_column.maybe_add(child_width.maybe_sub(margin_row).maybe_div(ratio));
            }
        }

        if child_width.is_none() || child_height.is_none() {
            let mut child_width_mode = if child_width.is_some() {
                MeasureMode::Exactly
            } else {
                MeasureMode::Undefined
            };
            let child_height_mode = if child_height.is_some() {
                MeasureMode::Exactly
            } else {
                MeasureMode::Undefined
            };
            // A column container bounds the content width of its absolute children.
            if !is_main_row
                && child_width.is_none()
                && width_mode != MeasureMode::Undefined
                && width.is_some_and(|size| size > 0.0)
            {
                child_width = width;
                child_width_mode = MeasureMode::AtMost;
            }

            self.layout_node(
                child,
                LayoutInput {
                    available_width: child_width,
                    available_height: child_height,
                    owner_direction: direction,
                    width_mode: child_width_mode,
                    height_mode: child_height_mode,
                    owner_width: child_width,
                    owner_height: child_height,
                    perform_layout: false,
                    reason: "abs-measure",
                },
            );
            let measured = self.data(child);
            child_width = measured
                .measured(FlexDirection::Row)
                .maybe_add(measured.margin_for_axis(FlexDirection::Row, width));
            child_height = measured
                .measured(FlexDirection::Column)
                .maybe_add(measured.margin_for_axis(FlexDirection::Column, width));
        }

        self.layout_node(
            child,
            LayoutInput {
                available_width: child_width,
                available_height: child_height,
                owner_direction: direction,
                width_mode: MeasureMode::Exactly,
                height_mode: MeasureMode::Exactly,
                owner_width: child_width,
                owner_height: child_height,
                perform_layout: true,
                reason: "abs-layout",
            },
        );

        let (main_reference, cross_reference) = if is_main_row {
            (width, height)
        } else {
            (height, width)
        };
        self.place_absolute_on_axis(node, child, main_axis, main_reference, width, false);
        self.place_absolute_on_axis(node, child, cross_axis, cross_reference, width, true);
        trace!(
            target: "flex::absolute",
            "[ABSOLUTE] node={node:?} child={child:?} size={child_width:?}x{child_height:?}"
        );
    }

    /// Leading offset of an absolute child on one axis when its leading inset
    /// is not set.
    fn place_absolute_on_axis(
        &mut self,
        node: NodeId,
        child: NodeId,
        axis: FlexDirection,
        reference: Option<f64>,
        width: Option<f64>,
        is_cross: bool,
    ) {
        let container = self.data(node);
        let data = self.data(child);
        if data.is_leading_position_defined(axis) {
            return;
        }

        let free = container.measured(axis).maybe_sub(data.measured(axis));
        let position = if data.is_trailing_position_defined(axis) {
            free.maybe_sub(container.trailing_border(axis))
                .maybe_sub(data.trailing_margin(axis, width))
                .maybe_sub(data.trailing_position(axis, reference))
        } else if is_cross {
            let align = self.align_item(node, child);
            let wrap_reverse = container.style.flex_wrap == Wrap::WrapReverse;
            if align == Align::Center {
                free.maybe_div(2.0)
            } else if (align == Align::FlexEnd) != wrap_reverse {
                free
            } else {
                return;
            }
        } else {
            match container.style.justify_content {
                Justify::Center => free.maybe_div(2.0),
                Justify::FlexEnd => free,
                Justify::FlexStart
                | Justify::SpaceBetween
                | Justify::SpaceAround
                | Justify::SpaceEvenly => return,
            }
        };
        self.data_mut(child)
            .layout
            .set_position(axis.leading_edge(), position);
    }
}
