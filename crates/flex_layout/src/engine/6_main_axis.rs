use flex_style::{Display, Justify, MaybeMath as _, MeasureMode, PositionType, Unit};
use log::trace;

use super::{FlexContext, FlexLine};
use crate::tree::FlexTree;

impl FlexTree {
    /// Position the line's items along the main axis and measure the line.
    ///
    /// Auto margins on the main axis take the free space before
    /// `justify-content` gets any of it.
    pub(super) fn justify_main_axis(&mut self, ctx: &FlexContext, line: &mut FlexLine) {
        let node = ctx.node;
        let main_axis = ctx.main_axis;
        let style = &self.data(node).style;

        if ctx.main_mode == MeasureMode::AtMost && line.remaining_free_space.maybe_gt(0.0) {
            let min_main = style.min_dimension(main_axis.dimension());
            line.remaining_free_space = match min_main.resolve(ctx.main_owner_size) {
                Some(min) if min_main.unit() != Unit::Undefined => {
                    let used = ctx.available_inner_main.maybe_sub(line.remaining_free_space);
                    Some(min).maybe_sub(used).maybe_max(0.0)
                }
                _ => Some(0.0),
            };
        }

        let line_children = &ctx.children[line.start..line.end];
        let auto_margins: usize = line_children
            .iter()
            .map(|&child| self.data(child))
            .filter(|data| data.style.position_type == PositionType::Relative)
            .map(|data| {
                usize::from(data.margin_leading_value(main_axis).unit() == Unit::Auto)
                    + usize::from(data.margin_trailing_value(main_axis).unit() == Unit::Auto)
            })
            .sum();

        let free_space = line.remaining_free_space;
        let items = line.items_on_line as f64;
        let (leading_main, between_main) = if auto_margins > 0 {
            (Some(0.0), Some(0.0))
        } else {
            match style.justify_content {
                Justify::FlexStart => (Some(0.0), Some(0.0)),
                Justify::Center => (free_space.maybe_div(2.0), Some(0.0)),
                Justify::FlexEnd => (free_space, Some(0.0)),
                Justify::SpaceBetween if line.items_on_line > 1 => {
                    (Some(0.0), free_space.maybe_max(0.0).maybe_div(items - 1.0))
                }
                Justify::SpaceBetween => (Some(0.0), Some(0.0)),
                Justify::SpaceEvenly => {
                    let between = free_space.maybe_div(items + 1.0);
                    (between, between)
                }
                Justify::SpaceAround => {
                    let between = free_space.maybe_div(items);
                    (between.maybe_div(2.0), between)
                }
            }
        };
        let auto_margin_share = free_space.maybe_div(auto_margins as f64);

        let container = self.data(node);
        let leading_border_main = container.leading_border(main_axis);
        line.main_dim = Some(container.leading_padding_and_border(main_axis, ctx.owner_width))
            .maybe_add(leading_main);
        line.cross_dim = Some(0.0);
        let trailing_padding_and_border =
            container.trailing_padding_and_border(main_axis, ctx.owner_width);

        for &child in line_children {
            let data = self.data(child);
            if data.style.display == Display::None {
                continue;
            }
            let position_edge = main_axis.leading_edge();

            // Absolute items take no space on the line. A leading inset places
            // them from the border, otherwise the justify offset applies.
            if data.style.position_type == PositionType::Absolute {
                if ctx.perform_layout {
                    let position = if data.is_leading_position_defined(main_axis) {
                        data.leading_position(main_axis, ctx.available_inner_main)
                            .maybe_add(leading_border_main)
                            .maybe_add(data.leading_margin(main_axis, ctx.available_inner_width))
                    } else {
                        data.layout
                            .position(position_edge)
                            .maybe_add(leading_border_main)
                            .maybe_add(leading_main)
                    };
                    self.data_mut(child).layout.set_position(position_edge, position);
                }
                continue;
            }

            let leading_auto = data.margin_leading_value(main_axis).unit() == Unit::Auto;
            let trailing_auto = data.margin_trailing_value(main_axis).unit() == Unit::Auto;
            if leading_auto {
                line.main_dim = line.main_dim.maybe_add(auto_margin_share);
            }
            if ctx.perform_layout {
                let position = data.layout.position(position_edge).maybe_add(line.main_dim);
                self.data_mut(child).layout.set_position(position_edge, position);
            }
            if trailing_auto {
                line.main_dim = line.main_dim.maybe_add(auto_margin_share);
            }

            let placed = self.data(child);
            if ctx.can_skip_flex() {
                // Only the cross size is needed; the basis stands in for the main size.
                line.main_dim = line.main_dim.maybe_add(between_main).maybe_add(
                    placed
                        .margin_for_axis(main_axis, ctx.available_inner_width)
                        .maybe_add(placed.layout.computed_flex_basis),
                );
                line.cross_dim = ctx.available_inner_cross;
            } else {
                line.main_dim = line
                    .main_dim
                    .maybe_add(between_main)
                    .maybe_add(placed.dim_with_margin(main_axis, ctx.available_inner_width));
                line.cross_dim = line
                    .cross_dim
                    .maybe_max(placed.dim_with_margin(ctx.cross_axis, ctx.available_inner_width));
            }
        }
        line.main_dim = line.main_dim.maybe_add(trailing_padding_and_border);

        trace!(
            target: "flex::justify",
            "[JUSTIFY] node={node:?} leading={leading_main:?} between={between_main:?} auto_margins={auto_margins} main={:?} cross={:?}",
            line.main_dim, line.cross_dim
        );
    }
}
