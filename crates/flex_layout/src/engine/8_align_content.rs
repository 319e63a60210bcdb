use flex_style::{
    Align, Display, Edge, FlexDirection, MaybeMath as _, MeasureMode, PositionType, floats_equal,
};
use indextree::NodeId;
use log::trace;

use super::{FlexContext, LayoutInput, LinesSummary};
use crate::tree::FlexTree;

/// Line height and baseline extents gathered for one flex line.
#[derive(Copy, Clone, Debug, Default)]
struct LineMetrics {
    /// Index one past the line's last child.
    end: usize,
    height: f64,
    max_ascent: f64,
    max_descent: f64,
}

impl FlexTree {
    /// Distribute the container's cross space over its lines and re-align
    /// every item inside its line.
    pub(super) fn align_content(&mut self, ctx: &FlexContext, summary: &LinesSummary) {
        let Some(available_cross) = ctx.available_inner_cross else {
            return;
        };
        let line_count = summary.line_count as f64;
        let remaining = available_cross - summary.total_cross;
        let has_free_space = available_cross > summary.total_cross;

        let mut current_lead = ctx.leading_padding_border_cross;
        let mut cross_dim_lead = 0.0;
        match self.data(ctx.node).style.align_content {
            Align::FlexEnd => current_lead += remaining,
            Align::Center => current_lead += remaining / 2.0,
            Align::Stretch if has_free_space => cross_dim_lead = remaining / line_count,
            Align::SpaceAround if has_free_space => {
                current_lead += remaining / (2.0 * line_count);
                if summary.line_count > 1 {
                    cross_dim_lead = remaining / line_count;
                }
            }
            Align::SpaceAround => current_lead += remaining / 2.0,
            Align::SpaceBetween if has_free_space && summary.line_count > 1 => {
                cross_dim_lead = remaining / (line_count - 1.0);
            }
            _ => {}
        }
        trace!(
            target: "flex::align_content",
            "[ALIGN-CONTENT] node={:?} lines={} remaining={remaining} lead={current_lead} per_line={cross_dim_lead}",
            ctx.node, summary.line_count
        );

        let mut start = 0;
        for line_index in 0..summary.line_count {
            let mut metrics = self.line_metrics(ctx, start, line_index);
            metrics.height += cross_dim_lead;

            for &child in &ctx.children[start..metrics.end] {
                let data = self.data(child);
                if data.style.display == Display::None
                    || data.style.position_type != PositionType::Relative
                {
                    continue;
                }
                self.align_child_in_line(ctx, child, current_lead, &metrics);
            }

            trace!(
                target: "flex::align_content",
                "[ALIGN-CONTENT-LINE] node={:?} line={line_index} lead={current_lead} height={}",
                ctx.node, metrics.height
            );
            current_lead += metrics.height;
            start = metrics.end;
        }
    }

    /// Height of the line that starts at `start`, and its baseline extents.
    fn line_metrics(&self, ctx: &FlexContext, start: usize, line_index: usize) -> LineMetrics {
        let cross_axis = ctx.cross_axis;
        let mut metrics = LineMetrics {
            end: start,
            ..LineMetrics::default()
        };

        while let Some(&child) = ctx.children.get(metrics.end) {
            let data = self.data(child);
            if data.style.display == Display::None {
                metrics.end += 1;
                continue;
            }
            if data.style.position_type != PositionType::Relative {
                metrics.end += 1;
                continue;
            }
            if data.layout.line_index != line_index {
                break;
            }
            if data.is_layout_dim_defined(cross_axis)
                && let Some(outer) = data.dim_with_margin(cross_axis, ctx.available_inner_width)
            {
                metrics.height = metrics.height.max(outer);
            }
            if self.align_item(ctx.node, child) == Align::Baseline {
                let leading_margin = data
                    .leading_margin(FlexDirection::Column, ctx.available_inner_width)
                    .unwrap_or(0.0);
                let margin_column = data
                    .margin_for_axis(FlexDirection::Column, ctx.available_inner_width)
                    .unwrap_or(0.0);
                let measured_height = data.measured(FlexDirection::Column).unwrap_or(0.0);
                let ascent = self.calculate_baseline(child) + leading_margin;
                let descent = measured_height + margin_column - ascent;
                metrics.max_ascent = metrics.max_ascent.max(ascent);
                metrics.max_descent = metrics.max_descent.max(descent);
                metrics.height = metrics.height.max(metrics.max_ascent + metrics.max_descent);
            }
            metrics.end += 1;
        }
        metrics
    }

    /// Place one relative item inside a line of known height.
    fn align_child_in_line(
        &mut self,
        ctx: &FlexContext,
        child: NodeId,
        current_lead: f64,
        metrics: &LineMetrics,
    ) {
        let cross_axis = ctx.cross_axis;
        let leading_edge = cross_axis.leading_edge();
        let align = self.align_item(ctx.node, child);
        let data = self.data(child);
        let width = ctx.available_inner_width;
        let measured_cross = data.measured(cross_axis).unwrap_or(0.0);

        let position = match align {
            Align::FlexStart => Some(current_lead).maybe_add(data.leading_margin(cross_axis, width)),
            Align::FlexEnd => Some(current_lead + metrics.height - measured_cross)
                .maybe_sub(data.trailing_margin(cross_axis, width)),
            Align::Center => Some(current_lead + (metrics.height - measured_cross) / 2.0),
            Align::Stretch => {
                let position = Some(current_lead).maybe_add(data.leading_margin(cross_axis, width));
                self.data_mut(child).layout.set_position(leading_edge, position);
                self.stretch_child_to_line(ctx, child, metrics.height);
                return;
            }
            Align::Baseline => {
                let offset = data
                    .leading_position(FlexDirection::Column, ctx.available_inner_cross)
                    .unwrap_or(0.0);
                let baseline = self.calculate_baseline(child);
                self.data_mut(child).layout.set_position(
                    Edge::Top,
                    Some(current_lead + metrics.max_ascent - baseline + offset),
                );
                return;
            }
            Align::Auto | Align::SpaceBetween | Align::SpaceAround => return,
        };
        self.data_mut(child).layout.set_position(leading_edge, position);
    }

    /// Lay a stretched item out again at the height of its line, unless its
    /// size already matches or its cross size is set in style.
    fn stretch_child_to_line(&mut self, ctx: &FlexContext, child: NodeId, line_height: f64) {
        let width_size = ctx.available_inner_width;
        let is_main_row = ctx.is_main_row();
        let data = self.data(child);
        if data.is_style_dim_defined(ctx.cross_axis, ctx.available_inner_cross) {
            return;
        }

        let measured_width = data.measured(FlexDirection::Row);
        let measured_height = data.measured(FlexDirection::Column);
        let width = if is_main_row {
            measured_width.maybe_add(data.margin_for_axis(ctx.main_axis, width_size))
        } else {
            Some(line_height)
        };
        let height = if is_main_row {
            Some(line_height)
        } else {
            measured_height.maybe_add(data.margin_for_axis(ctx.cross_axis, width_size))
        };
        if floats_equal(width, measured_width) && floats_equal(height, measured_height) {
            return;
        }

        self.layout_node(
            child,
            LayoutInput {
                available_width: width,
                available_height: height,
                owner_direction: ctx.direction,
                width_mode: MeasureMode::Exactly,
                height_mode: MeasureMode::Exactly,
                owner_width: width_size,
                owner_height: ctx.available_inner_height,
                perform_layout: true,
                reason: "multiline-stretch",
            },
        );
    }
}
