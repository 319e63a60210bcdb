use flex_style::{Display, MaybeMath as _, MeasureMode, PositionType};
use log::trace;

use super::FlexContext;
use crate::tree::{ChildList, FlexTree};

/// One flex line: the in-flow items that share a main-axis run, and the
/// numbers the later steps accumulate for it.
#[derive(Clone, Debug)]
pub(super) struct FlexLine {
    /// Range into the container's ordered children, absolute and hidden ones included.
    pub(super) start: usize,
    pub(super) end: usize,
    pub(super) items_on_line: usize,
    /// Sum of the items' clamped outer flex bases.
    pub(super) size_consumed: Option<f64>,
    pub(super) total_flex_grow_factors: f64,
    /// Sum of `-shrink * basis`; negative when anything can shrink.
    pub(super) total_flex_shrink_scaled_factors: Option<f64>,
    pub(super) remaining_free_space: Option<f64>,
    pub(super) main_dim: Option<f64>,
    pub(super) cross_dim: Option<f64>,
    pub(super) relative_children: ChildList,
}

impl FlexLine {
    fn new(start: usize) -> Self {
        Self {
            start,
            end: start,
            items_on_line: 0,
            size_consumed: Some(0.0),
            total_flex_grow_factors: 0.0,
            total_flex_shrink_scaled_factors: Some(0.0),
            remaining_free_space: Some(0.0),
            main_dim: Some(0.0),
            cross_dim: Some(0.0),
            relative_children: ChildList::new(),
        }
    }
}

impl FlexTree {
    /// Gather the next line starting at `start`. An item opens a new line only
    /// when wrapping is on, the line already has an item, and the item would
    /// overflow the available main size.
    pub(super) fn collect_flex_line(
        &mut self,
        ctx: &FlexContext,
        start: usize,
        line_index: usize,
    ) -> FlexLine {
        let mut line = FlexLine::new(start);
        let mut consumed_with_min = Some(0.0);
        let mut end = start;

        while let Some(&child) = ctx.children.get(end) {
            let style = &self.data(child).style;
            if style.display == Display::None || style.position_type == PositionType::Absolute {
                end += 1;
                continue;
            }
            self.data_mut(child).layout.line_index = line_index;

            let data = self.data(child);
            let margin_main = data.margin_for_axis(ctx.main_axis, ctx.available_inner_width);
            let clamped_basis = data.bound_axis_within_min_and_max(
                ctx.main_axis,
                data.layout.computed_flex_basis,
                ctx.main_owner_size,
            );
            let outer_basis = clamped_basis.maybe_add(margin_main);
            if consumed_with_min
                .maybe_add(outer_basis)
                .maybe_gt(ctx.available_inner_main)
                && ctx.is_wrap()
                && line.items_on_line > 0
            {
                break;
            }

            consumed_with_min = consumed_with_min.maybe_add(outer_basis);
            line.size_consumed = line.size_consumed.maybe_add(outer_basis);
            line.items_on_line += 1;
            if data.is_flexible(true) {
                line.total_flex_grow_factors += data.resolve_flex_grow(true);
                line.total_flex_shrink_scaled_factors = line.total_flex_shrink_scaled_factors.maybe_add(
                    data.layout
                        .computed_flex_basis
                        .map(|basis| -data.resolve_flex_shrink(true) * basis),
                );
            }
            line.relative_children.push(child);
            end += 1;
        }

        // Totals between 0 and 1 are floored to 1.
        if line.total_flex_grow_factors > 0.0 && line.total_flex_grow_factors < 1.0 {
            line.total_flex_grow_factors = 1.0;
        }
        if line
            .total_flex_shrink_scaled_factors
            .is_some_and(|total| total > 0.0 && total < 1.0)
        {
            line.total_flex_shrink_scaled_factors = Some(1.0);
        }
        line.end = end;

        trace!(
            target: "flex::lines",
            "[LINES-COLLECT] node={:?} line={line_index} range={start}..{end} items={} consumed={:?}",
            ctx.node, line.items_on_line, line.size_consumed
        );
        line
    }

    /// For a main axis that is not `Exactly`, settle the available main size
    /// for this line: the container's min or max when the content violates it,
    /// else the content size itself. Returns whether the container sizes to its
    /// content.
    pub(super) fn fit_main_space_to_line(&mut self, ctx: &mut FlexContext, line: &FlexLine) -> bool {
        if ctx.main_mode == MeasureMode::Exactly {
            return false;
        }
        if ctx.min_inner_main.is_some() && line.size_consumed.maybe_lt(ctx.min_inner_main) {
            ctx.available_inner_main = ctx.min_inner_main;
            return false;
        }
        if ctx.max_inner_main.is_some() && line.size_consumed.maybe_gt(ctx.max_inner_main) {
            ctx.available_inner_main = ctx.max_inner_main;
            return false;
        }

        let has_owner = self.parent(ctx.node).is_some();
        let data = self.data_mut(ctx.node);
        let legacy = data.config.use_legacy_stretch_behaviour;
        if legacy {
            data.layout.did_use_legacy_flag = true;
            return false;
        }
        if line.total_flex_grow_factors == 0.0 || data.resolve_flex_grow(has_owner) == 0.0 {
            ctx.available_inner_main = line.size_consumed;
        }
        true
    }
}
