use flex_style::{Align, Display, MaybeMath as _, MeasureMode, PositionType, Unit};
use indextree::NodeId;
use log::trace;

use super::{FlexContext, FlexLine, LayoutInput, constrain_max_size_for_mode, has_no_auto_margin};
use crate::tree::FlexTree;

impl FlexTree {
    /// Settle the line's cross size. Returns the cross size of the container's
    /// content box that items are aligned against.
    pub(super) fn size_line_cross_axis(&self, ctx: &FlexContext, line: &mut FlexLine) -> Option<f64> {
        let data = self.data(ctx.node);
        let bound_cross = |content: Option<f64>| {
            Some(
                data.bound_axis(
                    ctx.cross_axis,
                    content.maybe_add(ctx.padding_border_cross),
                    ctx.cross_owner_size,
                    ctx.owner_width,
                ) - ctx.padding_border_cross,
            )
        };

        let container_cross = match ctx.cross_mode {
            MeasureMode::Undefined | MeasureMode::AtMost => bound_cross(line.cross_dim),
            MeasureMode::Exactly => ctx.available_inner_cross,
        };
        if !ctx.is_wrap() && ctx.cross_mode == MeasureMode::Exactly {
            line.cross_dim = ctx.available_inner_cross;
        }
        line.cross_dim = bound_cross(line.cross_dim);
        container_cross
    }

    /// Place the line's items on the cross axis: absolute items at their
    /// offset, stretched items at the line size, the rest by alignment and
    /// auto margins.
    pub(super) fn align_line_cross_axis(
        &mut self,
        ctx: &FlexContext,
        line: &FlexLine,
        container_cross: Option<f64>,
        lines_cross_before: f64,
    ) {
        let cross_axis = ctx.cross_axis;
        let position_edge = cross_axis.leading_edge();
        let leading_border_cross = self.data(ctx.node).leading_border(cross_axis);

        for &child in &ctx.children[line.start..line.end] {
            let data = self.data(child);
            if data.style.display == Display::None {
                continue;
            }

            if data.style.position_type == PositionType::Absolute {
                let leading_margin = data.leading_margin(cross_axis, ctx.available_inner_width);
                let offset = data
                    .is_leading_position_defined(cross_axis)
                    .then(|| {
                        data.leading_position(cross_axis, ctx.available_inner_cross)
                            .maybe_add(leading_border_cross)
                            .maybe_add(leading_margin)
                    })
                    .flatten();
                let position = offset.or_else(|| Some(leading_border_cross).maybe_add(leading_margin));
                self.data_mut(child).layout.set_position(position_edge, position);
                continue;
            }

            let align = self.align_item(ctx.node, child);
            let mut leading_cross = ctx.leading_padding_border_cross;
            if align == Align::Stretch && has_no_auto_margin(data, cross_axis) {
                if !data.is_style_dim_defined(cross_axis, ctx.available_inner_cross) {
                    self.stretch_child(ctx, child, line.cross_dim);
                }
            } else {
                let remaining = container_cross
                    .maybe_sub(data.dim_with_margin(cross_axis, ctx.available_inner_width));
                let leading_auto = data.margin_leading_value(cross_axis).unit() == Unit::Auto;
                let trailing_auto = data.margin_trailing_value(cross_axis).unit() == Unit::Auto;
                leading_cross += match (leading_auto, trailing_auto) {
                    (true, true) => remaining.maybe_div(2.0).map_or(0.0, |space| space.max(0.0)),
                    (_, true) => 0.0,
                    (true, false) => remaining.map_or(0.0, |space| space.max(0.0)),
                    (false, false) => match align {
                        Align::FlexStart => 0.0,
                        Align::Center => remaining.unwrap_or(0.0) / 2.0,
                        _ => remaining.unwrap_or(0.0),
                    },
                };
            }

            let layout = &mut self.data_mut(child).layout;
            let position = layout
                .position(position_edge)
                .maybe_add(lines_cross_before)
                .maybe_add(leading_cross);
            layout.set_position(position_edge, position);
            trace!(
                target: "flex::cross",
                "[CROSS] node={:?} child={child:?} align={align:?} offset={position:?}",
                ctx.node
            );
        }
    }

    /// Lay out a stretched item again at the line's cross size.
    fn stretch_child(&mut self, ctx: &FlexContext, child: NodeId, line_cross: Option<f64>) {
        let main_axis = ctx.main_axis;
        let cross_axis = ctx.cross_axis;
        let is_main_row = ctx.is_main_row();
        let data = self.data(child);

        let measured_main = data.measured(main_axis);
        let cross_size = match data.style.aspect_ratio {
            Some(ratio) => {
                let cross = if is_main_row {
                    measured_main.maybe_div(ratio)
                } else {
                    measured_main.maybe_mul(ratio)
                };
                data.margin_for_axis(cross_axis, ctx.available_inner_width)
                    .maybe_add(cross)
            }
            None => line_cross,
        };
        let main_size = measured_main.maybe_add(data.margin_for_axis(main_axis, ctx.available_inner_width));

        let (_, main_size) = constrain_max_size_for_mode(
            data,
            main_axis,
            ctx.available_inner_main,
            ctx.available_inner_width,
            MeasureMode::Exactly,
            main_size,
        );
        let (_, cross_size) = constrain_max_size_for_mode(
            data,
            cross_axis,
            ctx.available_inner_cross,
            ctx.available_inner_width,
            MeasureMode::Exactly,
            cross_size,
        );

        let (width, height) = if is_main_row {
            (main_size, cross_size)
        } else {
            (cross_size, main_size)
        };
        let mode_for = |size: Option<f64>| {
            if size.is_some() {
                MeasureMode::Exactly
            } else {
                MeasureMode::Undefined
            }
        };
        self.layout_node(
            child,
            LayoutInput {
                available_width: width,
                available_height: height,
                owner_direction: ctx.direction,
                width_mode: mode_for(width),
                height_mode: mode_for(height),
                owner_width: ctx.available_inner_width,
                owner_height: ctx.available_inner_height,
                perform_layout: true,
                reason: "stretch",
            },
        );
    }
}
