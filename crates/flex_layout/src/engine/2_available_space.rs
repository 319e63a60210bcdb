use flex_style::{Direction, FlexDirection, MaybeMath as _, MeasureMode};
use indextree::NodeId;
use log::trace;

use super::{FlexContext, LayoutInput};
use crate::node::NodeData;
use crate::tree::{ChildList, FlexTree};

/// Space left for children on `axis` once margin, padding and border are
/// removed, clamped to the node's own min/max.
fn available_inner_dim(
    data: &NodeData,
    axis: FlexDirection,
    available: Option<f64>,
    owner_size: Option<f64>,
) -> Option<f64> {
    let axis = if axis.is_row() {
        FlexDirection::Row
    } else {
        FlexDirection::Column
    };
    let dimension = axis.dimension();
    let padding_and_border = data.padding_and_border_for_axis(axis, owner_size);
    let inner = available
        .maybe_sub(data.margin_for_axis(axis, owner_size))
        .maybe_sub(padding_and_border)?;

    let min_inner = data
        .min_dimension(dimension, owner_size)
        .map_or(0.0, |min| min - padding_and_border);
    let max_inner = data
        .max_dimension(dimension, owner_size)
        .map_or(f64::MAX, |max| max - padding_and_border);
    Some(inner.min(max_inner).max(min_inner))
}

impl FlexTree {
    /// Children of `node` in the order flex items are processed: document
    /// order, or a stable sort on `order` when any child sets it.
    pub(crate) fn ordered_children(&self, node: NodeId) -> ChildList {
        let mut children = self.child_list(node);
        if children
            .iter()
            .any(|child| self.data(*child).style.order != 0)
        {
            children.sort_by_key(|child| self.data(*child).style.order);
        }
        children
    }

    /// Resolve axes, modes and inner sizes for laying out the children of `node`.
    pub(super) fn flex_context(
        &self,
        node: NodeId,
        direction: Direction,
        input: &LayoutInput,
    ) -> FlexContext {
        let data = self.data(node);
        let main_axis = data.style.flex_direction.resolve(direction);
        let cross_axis = main_axis.cross(direction);
        let is_main_row = main_axis.is_row();
        let owner_width = input.owner_width;
        let owner_height = input.owner_height;

        let padding_border_main = data.padding_and_border_for_axis(main_axis, owner_width);
        let padding_border_cross = data.padding_and_border_for_axis(cross_axis, owner_width);
        let (padding_border_row, padding_border_column) = if is_main_row {
            (padding_border_main, padding_border_cross)
        } else {
            (padding_border_cross, padding_border_main)
        };

        let min_inner_width = data
            .min_dimension(FlexDirection::Row.dimension(), owner_width)
            .maybe_sub(padding_border_row);
        let max_inner_width = data
            .max_dimension(FlexDirection::Row.dimension(), owner_width)
            .maybe_sub(padding_border_row);
        let min_inner_height = data
            .min_dimension(FlexDirection::Column.dimension(), owner_height)
            .maybe_sub(padding_border_column);
        let max_inner_height = data
            .max_dimension(FlexDirection::Column.dimension(), owner_height)
            .maybe_sub(padding_border_column);

        let available_inner_width =
            available_inner_dim(data, FlexDirection::Row, input.available_width, owner_width);
        let available_inner_height = available_inner_dim(
            data,
            FlexDirection::Column,
            input.available_height,
            owner_height,
        );

        let pick = |row: Option<f64>, column: Option<f64>| {
            if is_main_row { (row, column) } else { (column, row) }
        };
        let (main_owner_size, cross_owner_size) = pick(owner_width, owner_height);
        let (available_inner_main, available_inner_cross) =
            pick(available_inner_width, available_inner_height);
        let (min_inner_main, _) = pick(min_inner_width, min_inner_height);
        let (max_inner_main, _) = pick(max_inner_width, max_inner_height);
        let (main_mode, cross_mode) = if is_main_row {
            (input.width_mode, input.height_mode)
        } else {
            (input.height_mode, input.width_mode)
        };

        trace!(
            target: "flex::layout",
            "[LAYOUT-SPACE] node={node:?} main={main_axis:?} inner={available_inner_width:?}x{available_inner_height:?}"
        );

        FlexContext {
            node,
            direction,
            main_axis,
            cross_axis,
            wrap: data.style.flex_wrap,
            perform_layout: input.perform_layout,
            owner_width,
            owner_height,
            main_owner_size,
            cross_owner_size,
            width_mode: input.width_mode,
            height_mode: input.height_mode,
            main_mode,
            cross_mode,
            available_inner_width,
            available_inner_height,
            available_inner_main,
            available_inner_cross,
            min_inner_main,
            max_inner_main,
            padding_border_main,
            padding_border_cross,
            leading_padding_border_cross: data.leading_padding_and_border(cross_axis, owner_width),
            flex_basis_overflows: false,
            children: self.ordered_children(node),
        }
    }
}

impl FlexContext {
    /// Mode of the main axis before any wrap adjustment.
    pub(super) const fn requested_main_mode(&self) -> MeasureMode {
        if self.main_axis.is_row() {
            self.width_mode
        } else {
            self.height_mode
        }
    }
}
