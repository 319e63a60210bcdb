use flex_style::{
    Align, Dimension, Display, FlexDirection, MaybeMath as _, MeasureMode, Overflow, PositionType,
};
use indextree::NodeId;
use log::trace;

use super::{FlexContext, LayoutInput, constrain_max_size_for_mode};
use crate::layout::Layout;
use crate::tree::{ChildList, FlexTree};

/// Child size request built while measuring a flex basis.
#[derive(Copy, Clone, Debug)]
struct ChildRequest {
    width: Option<f64>,
    height: Option<f64>,
    width_mode: MeasureMode,
    height_mode: MeasureMode,
}

impl FlexTree {
    /// Compute the flex basis of every in-flow child and return the sum of
    /// their outer bases.
    ///
    /// Hidden children are zeroed here. With `perform_layout`, the relative
    /// offsets of every child are also written.
    pub(super) fn compute_flex_basis_for_children(&mut self, ctx: &FlexContext) -> Option<f64> {
        let single_flex_child = if ctx.requested_main_mode() == MeasureMode::Exactly {
            self.single_flex_child(&ctx.children)
        } else {
            None
        };
        let generation = self.generation;
        let mut total_outer_flex_basis = Some(0.0);

        for &child in &ctx.children {
            if self.data(child).style.display == Display::None {
                self.zero_out_layout_recursively(child);
                let data = self.data_mut(child);
                data.has_new_layout = true;
                data.is_dirty = false;
                continue;
            }

            if ctx.perform_layout {
                let (main_size, cross_size) = if ctx.is_main_row() {
                    (ctx.available_inner_width, ctx.available_inner_height)
                } else {
                    (ctx.available_inner_height, ctx.available_inner_width)
                };
                let data = self.data_mut(child);
                let child_direction = data.resolve_direction(ctx.direction);
                data.set_position(child_direction, main_size, cross_size, ctx.available_inner_width, true);
            }

            if self.data(child).style.position_type == PositionType::Absolute {
                continue;
            }

            if single_flex_child == Some(child) {
                let layout = &mut self.data_mut(child).layout;
                layout.computed_flex_basis_generation = generation;
                layout.computed_flex_basis = Some(0.0);
            } else {
                self.compute_flex_basis_for_child(ctx, child);
            }

            let data = self.data(child);
            total_outer_flex_basis = total_outer_flex_basis.maybe_add(
                data.layout
                    .computed_flex_basis
                    .maybe_add(data.margin_for_axis(ctx.main_axis, ctx.available_inner_width)),
            );
            trace!(
                target: "flex::basis",
                "[BASIS] node={:?} child={child:?} basis={:?}",
                ctx.node, data.layout.computed_flex_basis
            );
        }
        total_outer_flex_basis
    }

    /// The only child that can both grow and shrink, if there is exactly one.
    /// Its basis is set to zero so it absorbs all remaining space.
    fn single_flex_child(&self, children: &ChildList) -> Option<NodeId> {
        let mut single = None;
        for &child in children {
            let data = self.data(child);
            if single.is_some() {
                if data.is_flexible(true) {
                    return None;
                }
            } else if data.resolve_flex_grow(true) > 0.0 && data.resolve_flex_shrink(true) > 0.0 {
                single = Some(child);
            }
        }
        single
    }

    /// Flex basis of one child: the definite `flex-basis`, else the definite
    /// main-axis size, else a measurement of the child.
    fn compute_flex_basis_for_child(&mut self, ctx: &FlexContext, child: NodeId) {
        let main_axis = ctx.main_axis;
        let is_main_row = main_axis.is_row();
        let width = ctx.available_inner_width;
        let height = ctx.available_inner_height;
        let main_size = if is_main_row { width } else { height };
        let generation = self.generation;

        let data = self.data(child);
        let resolved_basis = data.resolve_flex_basis().resolve(main_size);
        let basis = if resolved_basis.is_some() && main_size.is_some() {
            let recompute = data.layout.computed_flex_basis.is_none()
                || (data.config.experimental_features.web_flex_basis
                    && data.layout.computed_flex_basis_generation != generation);
            if !recompute {
                self.data_mut(child).layout.computed_flex_basis_generation = generation;
                return;
            }
            resolved_basis.maybe_max(data.padding_and_border_for_axis(main_axis, width))
        } else if is_main_row && data.is_style_dim_defined(FlexDirection::Row, width) {
            data.style
                .resolved_dimension(Dimension::Width)
                .resolve(width)
                .maybe_max(data.padding_and_border_for_axis(FlexDirection::Row, width))
        } else if !is_main_row && data.is_style_dim_defined(FlexDirection::Column, height) {
            data.style
                .resolved_dimension(Dimension::Height)
                .resolve(height)
                .maybe_max(data.padding_and_border_for_axis(FlexDirection::Column, width))
        } else {
            let request = self.flex_basis_request(ctx, child);
            self.layout_node(
                child,
                LayoutInput {
                    available_width: request.width,
                    available_height: request.height,
                    owner_direction: ctx.direction,
                    width_mode: request.width_mode,
                    height_mode: request.height_mode,
                    owner_width: width,
                    owner_height: height,
                    perform_layout: false,
                    reason: "measure",
                },
            );
            let measured_child = self.data(child);
            measured_child
                .measured(main_axis)
                .maybe_max(measured_child.padding_and_border_for_axis(main_axis, width))
        };

        let layout = &mut self.data_mut(child).layout;
        layout.computed_flex_basis = basis;
        layout.computed_flex_basis_generation = generation;
    }

    /// Constraints used to measure a child whose basis is content-based.
    fn flex_basis_request(&self, ctx: &FlexContext, child: NodeId) -> ChildRequest {
        let is_main_row = ctx.is_main_row();
        let width = ctx.available_inner_width;
        let height = ctx.available_inner_height;
        let data = self.data(child);
        let overflow = self.data(ctx.node).style.overflow;
        let aspect_ratio = data.style.aspect_ratio;

        let row_defined = data.is_style_dim_defined(FlexDirection::Row, width);
        let column_defined = data.is_style_dim_defined(FlexDirection::Column, height);
        let margin_row = data.margin_for_axis(FlexDirection::Row, width);
        let margin_column = data.margin_for_axis(FlexDirection::Column, width);

        let mut request = ChildRequest {
            width: None,
            height: None,
            width_mode: MeasureMode::Undefined,
            height_mode: MeasureMode::Undefined,
        };
        if row_defined {
            request.width = data
                .style
                .resolved_dimension(Dimension::Width)
                .resolve(width)
                .maybe_add(margin_row);
            request.width_mode = MeasureMode::Exactly;
        }
        if column_defined {
            request.height = data
                .style
                .resolved_dimension(Dimension::Height)
                .resolve(height)
                .maybe_add(margin_column);
            request.height_mode = MeasureMode::Exactly;
        }

        // A scroll container does not bound its content on the main axis.
        let scroll = overflow == Overflow::Scroll;
        if (!scroll || !is_main_row) && request.width.is_none() && width.is_some() {
            request.width = width;
            request.width_mode = MeasureMode::AtMost;
        }
        if (!scroll || is_main_row) && request.height.is_none() && height.is_some() {
            request.height = height;
            request.height_mode = MeasureMode::AtMost;
        }

        if let Some(ratio) = aspect_ratio {
            if !is_main_row && request.width_mode == MeasureMode::Exactly {
                request.height =
                    margin_column.maybe_add(request.width.maybe_sub(margin_row).maybe_div(ratio));
                request.height_mode = MeasureMode::Exactly;
            } else if is_main_row && request.height_mode == MeasureMode::Exactly {
                request.width =
                    margin_row.maybe_add(request.height.maybe_sub(margin_column).maybe_mul(ratio));
                request.width_mode = MeasureMode::Exactly;
            }
        }

        let stretches = self.align_item(ctx.node, child) == Align::Stretch;
        let has_exact_width = width.is_some() && ctx.width_mode == MeasureMode::Exactly;
        if !is_main_row
            && !row_defined
            && has_exact_width
            && stretches
            && request.width_mode != MeasureMode::Exactly
        {
            request.width = width;
            request.width_mode = MeasureMode::Exactly;
            if let Some(ratio) = aspect_ratio {
                request.height = request.width.maybe_sub(margin_row).maybe_div(ratio);
                request.height_mode = MeasureMode::Exactly;
            }
        }
        let has_exact_height = height.is_some() && ctx.height_mode == MeasureMode::Exactly;
        if is_main_row
            && !column_defined
            && has_exact_height
            && stretches
            && request.height_mode != MeasureMode::Exactly
        {
            request.height = height;
            request.height_mode = MeasureMode::Exactly;
            if let Some(ratio) = aspect_ratio {
                request.width = request.height.maybe_sub(margin_column).maybe_mul(ratio);
                request.width_mode = MeasureMode::Exactly;
            }
        }

        (request.width_mode, request.width) = constrain_max_size_for_mode(
            data,
            FlexDirection::Row,
            width,
            width,
            request.width_mode,
            request.width,
        );
        (request.height_mode, request.height) = constrain_max_size_for_mode(
            data,
            FlexDirection::Column,
            height,
            width,
            request.height_mode,
            request.height,
        );
        request
    }

    /// Reset the layout of a hidden subtree to zero.
    pub(super) fn zero_out_layout_recursively(&mut self, node: NodeId) {
        let data = self.data_mut(node);
        data.layout = Layout::zeroed();
        data.has_new_layout = true;
        for child in self.child_list(node) {
            self.zero_out_layout_recursively(child);
        }
    }
}
