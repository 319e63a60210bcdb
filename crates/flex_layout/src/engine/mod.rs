//! The flex layout algorithm.
//!
//! [`FlexTree::calculate_layout`] is the entry point. Every node is reached
//! through `layout_node`, which answers from the node's measurement cache when
//! it can and otherwise runs `layout_impl`. A container goes through the
//! numbered steps below, one module per step; leaves with a measure function,
//! empty containers and fixed-size measurements take the shortcuts in `leaf`.

mod absolute;
mod baseline;
mod cache;
mod leaf;
mod legacy;
mod rounding;

// Step 1: resolve margin, border and padding.
#[path = "1_box_model.rs"]
mod step1;
// Step 2: axes and available inner space.
#[path = "2_available_space.rs"]
mod step2;
// Step 3: flex basis of every child.
#[path = "3_flex_basis.rs"]
mod step3;
// Step 4: collect children into flex lines.
#[path = "4_flex_lines.rs"]
mod step4;
// Step 5: resolve flexible lengths.
#[path = "5_flexible_lengths.rs"]
mod step5;
// Step 6: main-axis justification.
#[path = "6_main_axis.rs"]
mod step6;
// Step 7: cross-axis alignment within a line.
#[path = "7_cross_axis.rs"]
mod step7;
// Step 8: multi-line alignment and baselines.
#[path = "8_align_content.rs"]
mod step8;
// Step 9: final container size, wrap-reverse, absolute children, trailing edges.
#[path = "9_final_sizes.rs"]
mod step9;

use std::rc::Rc;

use flex_style::{
    Align, Dimension, Direction, FlexDirection, MaybeMath as _, MeasureMode, Unit, Wrap,
};
use indextree::NodeId;
use log::{debug, trace};

use crate::error::{LayoutError, Result};
use crate::layout::{CachedMeasurement, Layout, MAX_CACHED_MEASUREMENTS};
use crate::node::NodeData;
use crate::tree::{ChildList, FlexTree};

pub use cache::{AxisConstraint, can_use_cached_measurement, round_value_to_pixel_grid};
use step4::FlexLine;

/// Sizing request handed to `layout_node`.
#[derive(Copy, Clone, Debug)]
pub(crate) struct LayoutInput {
    /// Outer size offered on each axis, margins included.
    pub(crate) available_width: Option<f64>,
    pub(crate) available_height: Option<f64>,
    pub(crate) owner_direction: Direction,
    pub(crate) width_mode: MeasureMode,
    pub(crate) height_mode: MeasureMode,
    /// Owner content box, the reference for percentages.
    pub(crate) owner_width: Option<f64>,
    pub(crate) owner_height: Option<f64>,
    /// `false` only sizes the node; `true` also positions its children.
    pub(crate) perform_layout: bool,
    /// Why the node is visited; diagnostics only.
    pub(crate) reason: &'static str,
}

/// State shared by the numbered steps while one container is laid out.
struct FlexContext {
    node: NodeId,
    /// Resolved direction of the container.
    direction: Direction,
    main_axis: FlexDirection,
    cross_axis: FlexDirection,
    wrap: Wrap,
    perform_layout: bool,
    owner_width: Option<f64>,
    owner_height: Option<f64>,
    main_owner_size: Option<f64>,
    cross_owner_size: Option<f64>,
    /// Modes as requested by the owner.
    width_mode: MeasureMode,
    height_mode: MeasureMode,
    /// Main mode after the wrap adjustment of step 3.
    main_mode: MeasureMode,
    cross_mode: MeasureMode,
    available_inner_width: Option<f64>,
    available_inner_height: Option<f64>,
    /// Narrowed by step 4 when the container sizes to its content.
    available_inner_main: Option<f64>,
    available_inner_cross: Option<f64>,
    min_inner_main: Option<f64>,
    max_inner_main: Option<f64>,
    padding_border_main: f64,
    padding_border_cross: f64,
    leading_padding_border_cross: f64,
    flex_basis_overflows: bool,
    /// Children in processing order (sorted by `order` when any child sets it).
    children: ChildList,
}

impl FlexContext {
    #[inline]
    const fn is_main_row(&self) -> bool {
        self.main_axis.is_row()
    }

    #[inline]
    fn is_wrap(&self) -> bool {
        self.wrap != Wrap::NoWrap
    }

    /// Whether a relative child skips flexing because only its cross size is needed.
    #[inline]
    fn can_skip_flex(&self) -> bool {
        !self.perform_layout && self.cross_mode == MeasureMode::Exactly
    }
}

/// Accumulated results of the line loop.
#[derive(Copy, Clone, Debug, Default)]
struct LinesSummary {
    line_count: usize,
    total_cross: f64,
    max_main: f64,
}

/// Lower `size` to the node's max dimension on `axis`, switching an
/// unconstrained mode to `AtMost` when a max exists.
fn constrain_max_size_for_mode(
    data: &NodeData,
    axis: FlexDirection,
    owner_axis_size: Option<f64>,
    owner_width: Option<f64>,
    mode: MeasureMode,
    size: Option<f64>,
) -> (MeasureMode, Option<f64>) {
    let max_size = data
        .max_dimension(axis.dimension(), owner_axis_size)
        .maybe_add(data.margin_for_axis(axis, owner_width));
    match mode {
        MeasureMode::Exactly | MeasureMode::AtMost => {
            if max_size.is_some() && !size.maybe_lt(max_size) {
                (mode, max_size)
            } else {
                (mode, size)
            }
        }
        MeasureMode::Undefined if max_size.is_some() => (MeasureMode::AtMost, max_size),
        MeasureMode::Undefined => (mode, size),
    }
}

/// True when neither cross-axis margin of `data` is `auto`.
#[inline]
fn has_no_auto_margin(data: &NodeData, axis: FlexDirection) -> bool {
    data.margin_leading_value(axis).unit() != Unit::Auto
        && data.margin_trailing_value(axis).unit() != Unit::Auto
}

impl FlexTree {
    /// Lay out the tree rooted at `root` inside the given owner size.
    ///
    /// Results are read back with [`FlexTree::layout`] and the `layout_*`
    /// accessors. Calling this again without changes is served from the cache.
    ///
    /// # Errors
    /// Fails if `root` has an owner or a measure function, or if an owner size
    /// is NaN or infinite.
    pub fn calculate_layout(
        &mut self,
        root: NodeId,
        owner_width: Option<f64>,
        owner_height: Option<f64>,
        owner_direction: Direction,
    ) -> Result<()> {
        if self.parent(root).is_some() {
            return Err(LayoutError::NotARoot { node: root });
        }
        if self.has_measure_func(root) {
            return Err(LayoutError::RootHasMeasureFunc { node: root });
        }
        for (axis, size) in [("width", owner_width), ("height", owner_height)] {
            if let Some(value) = size
                && !value.is_finite()
            {
                return Err(LayoutError::NonFiniteOwnerSize { axis, value });
            }
        }

        self.generation = self.generation.wrapping_add(1);
        self.stats.begin_pass();

        let (available_width, width_mode) =
            self.root_constraint(root, FlexDirection::Row, owner_width, owner_width);
        let (available_height, height_mode) =
            self.root_constraint(root, FlexDirection::Column, owner_height, owner_width);
        let input = LayoutInput {
            available_width,
            available_height,
            owner_direction,
            width_mode,
            height_mode,
            owner_width,
            owner_height,
            perform_layout: true,
            reason: "initial",
        };
        debug!(
            target: "flex::layout",
            "[LAYOUT-ROOT] root={root:?} generation={} width={available_width:?}/{width_mode:?} height={available_height:?}/{height_mode:?}",
            self.generation
        );

        let previous_dimensions = self.data(root).layout.dimensions;
        if self.layout_node(root, input) {
            self.place_and_round_root(root, owner_width, owner_height);
        } else {
            // Served from cache: keep the rounded size of the previous pass.
            self.data_mut(root).layout.dimensions = previous_dimensions;
        }

        if self
            .data(root)
            .config
            .should_diff_layout_without_legacy_stretch_behaviour
            && self.did_use_legacy_flag(root)
        {
            self.diff_layout_without_legacy_stretch(root, input);
        }
        Ok(())
    }

    /// Position a freshly laid out root inside its owner and snap the tree to
    /// the pixel grid.
    fn place_and_round_root(
        &mut self,
        root: NodeId,
        owner_width: Option<f64>,
        owner_height: Option<f64>,
    ) {
        let data = self.data_mut(root);
        let direction = data.layout.direction;
        data.set_position(direction, owner_width, owner_height, owner_width, false);
        let scale = data.config.point_scale_factor;
        self.round_to_pixel_grid(root, scale, 0.0, 0.0);
    }

    /// Size and mode the root is laid out with on `axis`.
    fn root_constraint(
        &self,
        root: NodeId,
        axis: FlexDirection,
        owner_size: Option<f64>,
        owner_width: Option<f64>,
    ) -> (Option<f64>, MeasureMode) {
        let data = self.data(root);
        let dimension = axis.dimension();
        if data.is_style_dim_defined(axis, owner_size) {
            let size = data
                .style
                .resolved_dimension(dimension)
                .resolve(owner_size)
                .maybe_add(data.margin_for_axis(axis, owner_width));
            return (size, MeasureMode::Exactly);
        }
        if let Some(max) = data.max_dimension(dimension, owner_size) {
            return (Some(max), MeasureMode::AtMost);
        }
        match owner_size {
            Some(size) => (Some(size), MeasureMode::Exactly),
            None => (None, MeasureMode::Undefined),
        }
    }

    /// Size `node` for `input`, reusing a cached result when allowed.
    ///
    /// Returns whether the node was actually computed rather than served from
    /// the cache.
    pub(crate) fn layout_node(&mut self, node: NodeId, input: LayoutInput) -> bool {
        self.depth = self.depth.saturating_add(1);
        self.stats.record_visit(self.depth);
        let generation = self.generation;

        let data = self.data(node);
        let need_to_visit = (data.is_dirty && data.layout.generation_count != generation)
            || data.layout.last_owner_direction != Some(input.owner_direction);
        if need_to_visit {
            self.data_mut(node).layout.invalidate_cache();
        }

        let cached = self.find_cached_measurement(node, &input);
        let performed = match cached {
            Some(entry) if !need_to_visit => {
                let layout = &mut self.data_mut(node).layout;
                layout.measured_dimensions =
                    [Some(entry.computed_width), Some(entry.computed_height)];
                self.stats.record_cache_hit();
                trace!(
                    target: "flex::layout",
                    "[LAYOUT-HIT] depth={} node={node:?} reason={} size={}x{}",
                    self.depth, input.reason, entry.computed_width, entry.computed_height
                );
                false
            }
            _ => {
                trace!(
                    target: "flex::layout",
                    "[LAYOUT-MISS] depth={} node={node:?} reason={} width={:?}/{:?} height={:?}/{:?} perform={}",
                    self.depth,
                    input.reason,
                    input.available_width,
                    input.width_mode,
                    input.available_height,
                    input.height_mode,
                    input.perform_layout
                );
                self.stats.record_full_computation();
                self.layout_impl(node, &input);
                let layout = &mut self.data_mut(node).layout;
                layout.last_owner_direction = Some(input.owner_direction);
                if cached.is_none() {
                    store_in_cache(&mut self.data_mut(node).layout, &input);
                }
                true
            }
        };

        let data = self.data_mut(node);
        if input.perform_layout {
            data.layout.dimensions = data.layout.measured_dimensions;
            data.has_new_layout = true;
            data.is_dirty = false;
        }
        data.layout.generation_count = generation;
        self.depth = self.depth.saturating_sub(1);
        performed
    }

    /// The full computation behind a cache miss.
    fn layout_impl(&mut self, node: NodeId, input: &LayoutInput) {
        let direction = self.data(node).resolve_direction(input.owner_direction);
        self.resolve_box_model(node, direction, input.owner_width);

        if let Some(measure) = self.data(node).measure.as_ref().map(Rc::clone) {
            self.measure_leaf(node, &measure, input);
            return;
        }
        if self.child_count(node) == 0 {
            self.measure_empty_container(node, input);
            return;
        }
        if !input.perform_layout && self.measure_fixed_size(node, input) {
            return;
        }

        self.data_mut(node).layout.had_overflow = false;
        let mut ctx = self.flex_context(node, direction, input);

        let total_outer_flex_basis = self.compute_flex_basis_for_children(&ctx);
        ctx.flex_basis_overflows = ctx.main_mode != MeasureMode::Undefined
            && total_outer_flex_basis.maybe_gt(ctx.available_inner_main);
        if ctx.is_wrap() && ctx.flex_basis_overflows && ctx.main_mode == MeasureMode::AtMost {
            ctx.main_mode = MeasureMode::Exactly;
        }

        let summary = self.layout_lines(&mut ctx);
        if ctx.perform_layout
            && (summary.line_count > 1 || self.is_baseline_layout(node))
            && ctx.available_inner_cross.is_some()
        {
            self.align_content(&ctx, &summary);
        }
        self.finish_container(&ctx, input, &summary);
        debug!(
            target: "flex::layout",
            "[LAYOUT-DONE] depth={} node={node:?} lines={} measured={:?}",
            self.depth,
            summary.line_count,
            self.data(node).layout.measured_dimensions
        );
    }

    /// Steps 4 to 7 for every line of the container.
    fn layout_lines(&mut self, ctx: &mut FlexContext) -> LinesSummary {
        let mut summary = LinesSummary::default();
        let mut start = 0;
        while start < ctx.children.len() {
            let mut line = self.collect_flex_line(ctx, start, summary.line_count);
            let size_based_on_content = self.fit_main_space_to_line(ctx, &line);

            if !size_based_on_content && let Some(available) = ctx.available_inner_main {
                line.remaining_free_space = Some(available).maybe_sub(line.size_consumed);
            } else if line.size_consumed.maybe_lt(0.0) {
                line.remaining_free_space = line.size_consumed.map(|consumed| -consumed);
            }

            if !ctx.can_skip_flex() {
                self.resolve_flexible_length(ctx, &mut line);
            }
            let overflowed = line.remaining_free_space.maybe_lt(0.0);
            self.data_mut(ctx.node).layout.had_overflow |= overflowed;

            self.justify_main_axis(ctx, &mut line);
            let container_cross = self.size_line_cross_axis(ctx, &mut line);
            if ctx.perform_layout {
                self.align_line_cross_axis(ctx, &line, container_cross, summary.total_cross);
            }

            summary.total_cross += line.cross_dim.unwrap_or(0.0);
            if let Some(main) = line.main_dim {
                summary.max_main = summary.max_main.max(main);
            }
            trace!(
                target: "flex::lines",
                "[LINES-DONE] node={:?} line={} items={} main={:?} cross={:?}",
                ctx.node, summary.line_count, line.items_on_line, line.main_dim, line.cross_dim
            );
            summary.line_count += 1;
            start = line.end;
        }
        summary
    }

    /// Effective alignment of `child` inside `node`. Baseline alignment only
    /// exists for row containers.
    pub(crate) fn align_item(&self, node: NodeId, child: NodeId) -> Align {
        let owner = &self.data(node).style;
        let align = match self.data(child).style.align_self {
            Align::Auto => owner.align_items,
            explicit => explicit,
        };
        if align == Align::Baseline && owner.flex_direction.is_column() {
            Align::FlexStart
        } else {
            align
        }
    }
}

/// Record the node's fresh measurement in the slot matching `input`.
fn store_in_cache(layout: &mut Layout, input: &LayoutInput) {
    let entry = CachedMeasurement {
        available_width: input.available_width,
        available_height: input.available_height,
        width_mode: Some(input.width_mode),
        height_mode: Some(input.height_mode),
        computed_width: layout.measured(Dimension::Width).unwrap_or(-1.0),
        computed_height: layout.measured(Dimension::Height).unwrap_or(-1.0),
    };
    if input.perform_layout {
        layout.cached_layout = entry;
        return;
    }
    if layout.next_cached_measurements_index == MAX_CACHED_MEASUREMENTS {
        layout.next_cached_measurements_index = 0;
    }
    let slot = layout.next_cached_measurements_index;
    layout.cached_measurements[slot] = entry;
    layout.next_cached_measurements_index += 1;
}
