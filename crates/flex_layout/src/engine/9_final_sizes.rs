use flex_style::{
    Dimension, Display, FlexDirection, MaybeMath as _, MeasureMode, Overflow, PositionType, Wrap,
};
use indextree::NodeId;
use log::trace;

use super::{FlexContext, LayoutInput, LinesSummary};
use crate::node::NodeData;
use crate::tree::FlexTree;

/// Content-based size of a container on one axis.
#[derive(Copy, Clone, Debug)]
struct AxisContent {
    axis: FlexDirection,
    mode: MeasureMode,
    /// Size of the content, padding and border included.
    content: f64,
    owner_size: Option<f64>,
    available_inner: Option<f64>,
    padding_border: f64,
}

impl AxisContent {
    /// The size to use in place of the owner's offer, or `None` when the offer
    /// is exact and stands.
    fn fit(self, data: &NodeData, owner_width: Option<f64>) -> Option<f64> {
        let scroll = data.style.overflow == Overflow::Scroll;
        match self.mode {
            MeasureMode::Exactly => None,
            MeasureMode::AtMost if scroll => Some(
                self.available_inner
                    .maybe_add(self.padding_border)
                    .maybe_min(data.bound_axis_within_min_and_max(
                        self.axis,
                        Some(self.content),
                        self.owner_size,
                    ))
                    .maybe_max(self.padding_border)
                    .unwrap_or(self.padding_border),
            ),
            MeasureMode::Undefined | MeasureMode::AtMost => Some(data.bound_axis(
                self.axis,
                Some(self.content),
                self.owner_size,
                owner_width,
            )),
        }
    }
}

impl FlexTree {
    /// Settle the container's measured size, then, when performing layout,
    /// mirror wrap-reverse lines, lay out absolute children and fill in the
    /// trailing edges of reversed axes.
    pub(super) fn finish_container(
        &mut self,
        ctx: &FlexContext,
        input: &LayoutInput,
        summary: &LinesSummary,
    ) {
        self.settle_container_size(ctx, input, summary);
        if !ctx.perform_layout {
            return;
        }

        let node = ctx.node;
        let cross_axis = ctx.cross_axis;
        if ctx.wrap == Wrap::WrapReverse {
            let container_cross = self.data(node).measured(cross_axis);
            let edge = cross_axis.leading_edge();
            for &child in &ctx.children {
                if self.data(child).style.position_type != PositionType::Relative {
                    continue;
                }
                let layout = &mut self.data_mut(child).layout;
                let position = container_cross
                    .maybe_sub(layout.position(edge))
                    .maybe_sub(layout.measured(cross_axis.dimension()));
                layout.set_position(edge, position);
            }
        }

        let mode_for_width = if ctx.is_main_row() { ctx.main_mode } else { ctx.cross_mode };
        for &child in &ctx.children {
            let data = self.data(child);
            if data.style.display == Display::None
                || data.style.position_type != PositionType::Absolute
            {
                continue;
            }
            self.absolute_layout_child(
                node,
                child,
                ctx.available_inner_width,
                mode_for_width,
                ctx.available_inner_height,
                ctx.direction,
            );
        }

        let reversed_main = ctx.main_axis.is_reverse();
        let reversed_cross = cross_axis.is_reverse();
        if !reversed_main && !reversed_cross {
            return;
        }
        for &child in &ctx.children {
            if self.data(child).style.display == Display::None {
                continue;
            }
            if reversed_main {
                self.set_child_trailing_position(ctx.node, child, ctx.main_axis);
            }
            if reversed_cross {
                self.set_child_trailing_position(ctx.node, child, cross_axis);
            }
        }
    }

    /// Measured size of the container: the owner's offer on exact axes, the
    /// content size clamped to min/max otherwise.
    fn settle_container_size(
        &mut self,
        ctx: &FlexContext,
        input: &LayoutInput,
        summary: &LinesSummary,
    ) {
        let data = self.data(ctx.node);
        let owner_width = ctx.owner_width;

        let margin_row = data.margin_for_axis(FlexDirection::Row, owner_width);
        let margin_column = data.margin_for_axis(FlexDirection::Column, owner_width);
        let mut width = data.bound_axis(
            FlexDirection::Row,
            input.available_width.maybe_sub(margin_row),
            owner_width,
            owner_width,
        );
        let mut height = data.bound_axis(
            FlexDirection::Column,
            input.available_height.maybe_sub(margin_column),
            ctx.owner_height,
            owner_width,
        );

        let main = AxisContent {
            axis: ctx.main_axis,
            mode: ctx.main_mode,
            content: summary.max_main,
            owner_size: ctx.main_owner_size,
            available_inner: ctx.available_inner_main,
            padding_border: ctx.padding_border_main,
        }
        .fit(data, owner_width);
        let cross = AxisContent {
            axis: ctx.cross_axis,
            mode: ctx.cross_mode,
            content: summary.total_cross + ctx.padding_border_cross,
            owner_size: ctx.cross_owner_size,
            available_inner: ctx.available_inner_cross,
            padding_border: ctx.padding_border_cross,
        }
        .fit(data, owner_width);

        let (row, column) = if ctx.is_main_row() { (main, cross) } else { (cross, main) };
        if let Some(size) = row {
            width = size;
        }
        if let Some(size) = column {
            height = size;
        }
        trace!(
            target: "flex::layout",
            "[LAYOUT-SIZE] node={:?} measured={width}x{height} main_mode={:?} cross_mode={:?}",
            ctx.node, ctx.main_mode, ctx.cross_mode
        );

        let layout = &mut self.data_mut(ctx.node).layout;
        layout.set_measured(Dimension::Width, Some(width));
        layout.set_measured(Dimension::Height, Some(height));
    }

    /// Offset of `child` from the trailing edge of `node` on a reversed axis.
    fn set_child_trailing_position(&mut self, node: NodeId, child: NodeId, axis: FlexDirection) {
        let container_size = self.data(node).measured(axis);
        let layout = &mut self.data_mut(child).layout;
        let position = container_size
            .maybe_sub(layout.measured(axis.dimension()))
            .maybe_sub(layout.position(axis.leading_edge()));
        layout.set_position(axis.trailing_edge(), position);
    }
}
