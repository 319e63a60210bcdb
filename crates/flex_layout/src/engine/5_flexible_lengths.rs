use flex_style::{Align, MaybeMath as _, MeasureMode, Unit};
use indextree::NodeId;
use log::trace;

use super::{FlexContext, FlexLine, LayoutInput, constrain_max_size_for_mode, has_no_auto_margin};
use crate::tree::FlexTree;

impl FlexTree {
    /// Distribute the line's free space over its items in two passes and lay
    /// every item out at its resolved main size.
    pub(super) fn resolve_flexible_length(&mut self, ctx: &FlexContext, line: &mut FlexLine) {
        let original_free_space = line.remaining_free_space;
        self.distribute_free_space_first_pass(ctx, line);
        let distributed = self.distribute_free_space_second_pass(ctx, line);
        line.remaining_free_space = original_free_space.maybe_sub(distributed);
        trace!(
            target: "flex::resolve",
            "[RESOLVE] node={:?} free={original_free_space:?} distributed={distributed:?}",
            ctx.node
        );
    }

    /// Find items whose flexed size violates their min/max. Their clamped size
    /// is taken out of the free space and their factor out of the totals.
    #[allow(clippy::float_cmp, reason = "a clamp is detected by exact inequality")]
    fn distribute_free_space_first_pass(&self, ctx: &FlexContext, line: &mut FlexLine) {
        let mut delta_free_space = Some(0.0);
        for &child in &line.relative_children {
            let data = self.data(child);
            let child_basis = data.bound_axis_within_min_and_max(
                ctx.main_axis,
                data.layout.computed_flex_basis,
                ctx.main_owner_size,
            );

            if line.remaining_free_space.maybe_lt(0.0) {
                let Some(scaled_shrink) = child_basis.map(|basis| -data.resolve_flex_shrink(true) * basis)
                else {
                    continue;
                };
                if scaled_shrink == 0.0 {
                    continue;
                }
                let base_size = child_basis.maybe_add(
                    line.remaining_free_space
                        .maybe_div(line.total_flex_shrink_scaled_factors)
                        .maybe_mul(scaled_shrink),
                );
                let bound_size = data.bound_axis(
                    ctx.main_axis,
                    base_size,
                    ctx.available_inner_main,
                    ctx.available_inner_width,
                );
                if base_size.is_some_and(|base| base != bound_size) {
                    delta_free_space = delta_free_space.maybe_add(Some(bound_size).maybe_sub(child_basis));
                    line.total_flex_shrink_scaled_factors =
                        line.total_flex_shrink_scaled_factors.maybe_sub(scaled_shrink);
                }
            } else if line.remaining_free_space.maybe_gt(0.0) {
                let grow = data.resolve_flex_grow(true);
                if grow == 0.0 {
                    continue;
                }
                let base_size = child_basis.maybe_add(
                    line.remaining_free_space
                        .maybe_div(line.total_flex_grow_factors)
                        .maybe_mul(grow),
                );
                let bound_size = data.bound_axis(
                    ctx.main_axis,
                    base_size,
                    ctx.available_inner_main,
                    ctx.available_inner_width,
                );
                if base_size.is_some_and(|base| base != bound_size) {
                    delta_free_space = delta_free_space.maybe_add(Some(bound_size).maybe_sub(child_basis));
                    line.total_flex_grow_factors -= grow;
                }
            }
        }
        line.remaining_free_space = line.remaining_free_space.maybe_sub(delta_free_space);
    }

    /// Final main size of every item, then lay each item out at that size.
    /// Returns the space actually handed out.
    fn distribute_free_space_second_pass(&mut self, ctx: &FlexContext, line: &FlexLine) -> Option<f64> {
        let mut delta_free_space = Some(0.0);
        for &child in &line.relative_children {
            let data = self.data(child);
            let child_basis = data.bound_axis_within_min_and_max(
                ctx.main_axis,
                data.layout.computed_flex_basis,
                ctx.main_owner_size,
            );
            let mut main_size = child_basis;

            if line.remaining_free_space.maybe_lt(0.0) {
                let scaled_shrink = child_basis.map(|basis| -data.resolve_flex_shrink(true) * basis);
                if scaled_shrink != Some(0.0) {
                    let child_size = if line.total_flex_shrink_scaled_factors == Some(0.0) {
                        child_basis.maybe_add(scaled_shrink)
                    } else {
                        child_basis.maybe_add(
                            line.remaining_free_space
                                .maybe_div(line.total_flex_shrink_scaled_factors)
                                .maybe_mul(scaled_shrink),
                        )
                    };
                    main_size = Some(data.bound_axis(
                        ctx.main_axis,
                        child_size,
                        ctx.available_inner_main,
                        ctx.available_inner_width,
                    ));
                }
            } else if line.remaining_free_space.maybe_gt(0.0) {
                let grow = data.resolve_flex_grow(true);
                if grow != 0.0 {
                    let child_size = child_basis.maybe_add(
                        line.remaining_free_space
                            .maybe_div(line.total_flex_grow_factors)
                            .maybe_mul(grow),
                    );
                    main_size = Some(data.bound_axis(
                        ctx.main_axis,
                        child_size,
                        ctx.available_inner_main,
                        ctx.available_inner_width,
                    ));
                }
            }

            delta_free_space = delta_free_space.maybe_add(main_size.maybe_sub(child_basis));
            self.layout_flexed_child(ctx, child, main_size);
        }
        delta_free_space
    }

    /// Lay out `child` at its resolved main size with the cross size its
    /// alignment calls for.
    fn layout_flexed_child(&mut self, ctx: &FlexContext, child: NodeId, main_size: Option<f64>) {
        let main_axis = ctx.main_axis;
        let cross_axis = ctx.cross_axis;
        let is_main_row = ctx.is_main_row();
        let stretches = self.align_item(ctx.node, child) == Align::Stretch;
        let data = self.data(child);

        let margin_main = data.margin_for_axis(main_axis, ctx.available_inner_width);
        let margin_cross = data.margin_for_axis(cross_axis, ctx.available_inner_width);
        let cross_defined = data.is_style_dim_defined(cross_axis, ctx.available_inner_cross);
        let no_auto_cross_margin = has_no_auto_margin(data, cross_axis);

        let child_main_size = main_size.maybe_add(margin_main);
        let (child_cross_size, child_cross_mode) = if let Some(ratio) = data.style.aspect_ratio {
            let inner_main = child_main_size.maybe_sub(margin_main);
            let cross = if is_main_row {
                inner_main.maybe_div(ratio)
            } else {
                inner_main.maybe_mul(ratio)
            };
            (cross.maybe_add(margin_cross), MeasureMode::Exactly)
        } else if ctx.available_inner_cross.is_some()
            && !cross_defined
            && ctx.cross_mode == MeasureMode::Exactly
            && !(ctx.is_wrap() && ctx.flex_basis_overflows)
            && stretches
            && no_auto_cross_margin
        {
            (ctx.available_inner_cross, MeasureMode::Exactly)
        } else if !cross_defined {
            let mode = if ctx.available_inner_cross.is_some() {
                MeasureMode::AtMost
            } else {
                MeasureMode::Undefined
            };
            (ctx.available_inner_cross, mode)
        } else {
            let cross_dimension = data.style.resolved_dimension(cross_axis.dimension());
            let size = cross_dimension
                .resolve(ctx.available_inner_cross)
                .maybe_add(margin_cross);
            let loose_percentage = cross_dimension.unit() == Unit::Percent
                && ctx.cross_mode != MeasureMode::Exactly;
            let mode = if size.is_none() || loose_percentage {
                MeasureMode::Undefined
            } else {
                MeasureMode::Exactly
            };
            (size, mode)
        };

        let (child_main_mode, child_main_size) = constrain_max_size_for_mode(
            data,
            main_axis,
            ctx.available_inner_main,
            ctx.available_inner_width,
            MeasureMode::Exactly,
            child_main_size,
        );
        let (child_cross_mode, child_cross_size) = constrain_max_size_for_mode(
            data,
            cross_axis,
            ctx.available_inner_cross,
            ctx.available_inner_width,
            child_cross_mode,
            child_cross_size,
        );

        // Stretched items are laid out again once the line's cross size is known.
        let requires_stretch_layout = !cross_defined && stretches && no_auto_cross_margin;
        let (available_width, available_height, width_mode, height_mode) = if is_main_row {
            (child_main_size, child_cross_size, child_main_mode, child_cross_mode)
        } else {
            (child_cross_size, child_main_size, child_cross_mode, child_main_mode)
        };
        self.layout_node(
            child,
            LayoutInput {
                available_width,
                available_height,
                owner_direction: ctx.direction,
                width_mode,
                height_mode,
                owner_width: ctx.available_inner_width,
                owner_height: ctx.available_inner_height,
                perform_layout: ctx.perform_layout && !requires_stretch_layout,
                reason: "flex",
            },
        );

        let child_overflowed = self.data(child).layout.had_overflow;
        self.data_mut(ctx.node).layout.had_overflow |= child_overflowed;
    }
}
