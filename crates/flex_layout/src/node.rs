//! Node payload stored in the tree arena, and the style-derived box metrics
//! the engine reads from it.

use std::any::Any;
use std::rc::Rc;

use flex_style::{
    Dimension, Direction, Edge, FlexDirection, MaybeMath as _, MeasureMode, NodeType,
    PositionType, Style, Unit, Value,
};
use indextree::NodeId;

use crate::config::Config;
use crate::layout::Layout;

/// Size returned by a measure callback.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Host measurement: `(node, width, width_mode, height, height_mode) -> size`.
/// Widths and heights are inner sizes (margin, padding and border removed);
/// they are `None` when the matching mode is `Undefined` and unresolved.
pub type MeasureFunc =
    Rc<dyn Fn(NodeId, Option<f64>, MeasureMode, Option<f64>, MeasureMode) -> Size>;

/// Host baseline: `(node, width, height) -> distance from the top edge`.
pub type BaselineFunc = Rc<dyn Fn(NodeId, f64, f64) -> f64>;

/// Notification fired when a clean node becomes dirty.
pub type DirtiedFunc = Rc<dyn Fn(NodeId)>;

/// Everything a tree node owns apart from its links.
#[derive(Clone)]
pub(crate) struct NodeData {
    pub(crate) style: Style,
    pub(crate) layout: Layout,
    pub(crate) config: Rc<Config>,
    pub(crate) measure: Option<MeasureFunc>,
    pub(crate) baseline: Option<BaselineFunc>,
    pub(crate) dirtied: Option<DirtiedFunc>,
    pub(crate) context: Option<Rc<dyn Any>>,
    pub(crate) node_type: NodeType,
    pub(crate) is_dirty: bool,
    pub(crate) has_new_layout: bool,
}

impl NodeData {
    pub(crate) fn new(config: Rc<Config>) -> Self {
        let style = if config.use_web_defaults {
            Style::web_defaults()
        } else {
            Style::default()
        };
        Self {
            style,
            layout: Layout::default(),
            config,
            measure: None,
            baseline: None,
            dirtied: None,
            context: None,
            node_type: NodeType::Default,
            is_dirty: false,
            has_new_layout: true,
        }
    }

    /// Direction of this node given the one it inherits.
    #[inline]
    pub(crate) fn resolve_direction(&self, owner_direction: Direction) -> Direction {
        match self.style.direction {
            Direction::Inherit if owner_direction == Direction::Inherit => Direction::LeftToRight,
            Direction::Inherit => owner_direction,
            explicit => explicit,
        }
    }

    // Flex factors. An unowned node never flexes.

    pub(crate) fn resolve_flex_grow(&self, has_owner: bool) -> f64 {
        if !has_owner {
            return 0.0;
        }
        if let Some(grow) = self.style.flex_grow {
            return grow;
        }
        match self.style.flex {
            Some(flex) if flex > 0.0 => flex,
            _ => 0.0,
        }
    }

    pub(crate) fn resolve_flex_shrink(&self, has_owner: bool) -> f64 {
        if !has_owner {
            return 0.0;
        }
        if let Some(shrink) = self.style.flex_shrink {
            return shrink;
        }
        match self.style.flex {
            Some(flex) if !self.config.use_web_defaults && flex < 0.0 => -flex,
            _ => self.config.default_flex_shrink(),
        }
    }

    pub(crate) fn resolve_flex_basis(&self) -> Value {
        let basis = self.style.flex_basis;
        if !matches!(basis.unit(), Unit::Auto | Unit::Undefined) {
            return basis;
        }
        match self.style.flex {
            Some(flex) if flex > 0.0 => {
                if self.config.use_web_defaults {
                    Value::Auto
                } else {
                    Value::ZERO
                }
            }
            _ => Value::Auto,
        }
    }

    #[inline]
    pub(crate) fn is_flexible(&self, has_owner: bool) -> bool {
        self.style.position_type == PositionType::Relative
            && (self.resolve_flex_grow(has_owner) != 0.0
                || self.resolve_flex_shrink(has_owner) != 0.0)
    }

    // Margins. Logical start/end win over the physical leading/trailing edge on
    // row axes.

    /// Raw leading margin value, used to detect `auto` margins.
    pub(crate) fn margin_leading_value(&self, axis: FlexDirection) -> Value {
        let start = self.style.margin.get(Edge::Start);
        if axis.is_row() && start.is_defined() {
            start
        } else {
            self.style.margin.get(axis.leading_edge())
        }
    }

    /// Raw trailing margin value, used to detect `auto` margins.
    pub(crate) fn margin_trailing_value(&self, axis: FlexDirection) -> Value {
        let end = self.style.margin.get(Edge::End);
        if axis.is_row() && end.is_defined() {
            end
        } else {
            self.style.margin.get(axis.trailing_edge())
        }
    }

    pub(crate) fn leading_margin(&self, axis: FlexDirection, width_size: Option<f64>) -> Option<f64> {
        let start = self.style.margin.get(Edge::Start);
        if axis.is_row() && start.is_defined() {
            return start.resolve_margin(width_size);
        }
        self.style
            .margin
            .computed(axis.leading_edge(), Value::ZERO)
            .resolve_margin(width_size)
    }

    pub(crate) fn trailing_margin(&self, axis: FlexDirection, width_size: Option<f64>) -> Option<f64> {
        let end = self.style.margin.get(Edge::End);
        if axis.is_row() && end.is_defined() {
            return end.resolve_margin(width_size);
        }
        self.style
            .margin
            .computed(axis.trailing_edge(), Value::ZERO)
            .resolve_margin(width_size)
    }

    #[inline]
    pub(crate) fn margin_for_axis(&self, axis: FlexDirection, width_size: Option<f64>) -> Option<f64> {
        self.leading_margin(axis, width_size)
            .maybe_add(self.trailing_margin(axis, width_size))
    }

    // Padding and border never go negative and default to zero when unresolved.

    pub(crate) fn leading_padding(&self, axis: FlexDirection, width_size: Option<f64>) -> f64 {
        let start = self.style.padding.get(Edge::Start);
        if axis.is_row()
            && start.is_defined()
            && let Some(resolved) = start.resolve(width_size).filter(|value| *value >= 0.0)
        {
            return resolved;
        }
        self.style
            .padding
            .computed(axis.leading_edge(), Value::ZERO)
            .resolve(width_size)
            .map_or(0.0, |value| value.max(0.0))
    }

    pub(crate) fn trailing_padding(&self, axis: FlexDirection, width_size: Option<f64>) -> f64 {
        let end = self.style.padding.get(Edge::End);
        if axis.is_row()
            && end.is_defined()
            && let Some(resolved) = end.resolve(width_size).filter(|value| *value >= 0.0)
        {
            return resolved;
        }
        self.style
            .padding
            .computed(axis.trailing_edge(), Value::ZERO)
            .resolve(width_size)
            .map_or(0.0, |value| value.max(0.0))
    }

    pub(crate) fn leading_border(&self, axis: FlexDirection) -> f64 {
        let start = self.style.border.get(Edge::Start).resolve(None);
        if axis.is_row()
            && let Some(width) = start.filter(|value| *value >= 0.0)
        {
            return width;
        }
        self.style
            .border
            .computed(axis.leading_edge(), Value::ZERO)
            .resolve(None)
            .map_or(0.0, |value| value.max(0.0))
    }

    pub(crate) fn trailing_border(&self, axis: FlexDirection) -> f64 {
        let end = self.style.border.get(Edge::End).resolve(None);
        if axis.is_row()
            && let Some(width) = end.filter(|value| *value >= 0.0)
        {
            return width;
        }
        self.style
            .border
            .computed(axis.trailing_edge(), Value::ZERO)
            .resolve(None)
            .map_or(0.0, |value| value.max(0.0))
    }

    #[inline]
    pub(crate) fn leading_padding_and_border(&self, axis: FlexDirection, width_size: Option<f64>) -> f64 {
        self.leading_padding(axis, width_size) + self.leading_border(axis)
    }

    #[inline]
    pub(crate) fn trailing_padding_and_border(
        &self,
        axis: FlexDirection,
        width_size: Option<f64>,
    ) -> f64 {
        self.trailing_padding(axis, width_size) + self.trailing_border(axis)
    }

    #[inline]
    pub(crate) fn padding_and_border_for_axis(&self, axis: FlexDirection, width_size: Option<f64>) -> f64 {
        self.leading_padding_and_border(axis, width_size)
            + self.trailing_padding_and_border(axis, width_size)
    }

    // Position offsets.

    pub(crate) fn is_leading_position_defined(&self, axis: FlexDirection) -> bool {
        let edges = &self.style.position;
        (axis.is_row() && edges.computed(Edge::Start, Value::Undefined).is_defined())
            || edges.computed(axis.leading_edge(), Value::Undefined).is_defined()
    }

    pub(crate) fn is_trailing_position_defined(&self, axis: FlexDirection) -> bool {
        let edges = &self.style.position;
        (axis.is_row() && edges.computed(Edge::End, Value::Undefined).is_defined())
            || edges.computed(axis.trailing_edge(), Value::Undefined).is_defined()
    }

    pub(crate) fn leading_position(&self, axis: FlexDirection, axis_size: Option<f64>) -> Option<f64> {
        let edges = &self.style.position;
        if axis.is_row() {
            let start = edges.computed(Edge::Start, Value::Undefined);
            if start.is_defined() {
                return start.resolve(axis_size);
            }
        }
        let leading = edges.computed(axis.leading_edge(), Value::Undefined);
        if leading.is_defined() {
            leading.resolve(axis_size)
        } else {
            Some(0.0)
        }
    }

    pub(crate) fn trailing_position(&self, axis: FlexDirection, axis_size: Option<f64>) -> Option<f64> {
        let edges = &self.style.position;
        if axis.is_row() {
            let end = edges.computed(Edge::End, Value::Undefined);
            if end.is_defined() {
                return end.resolve(axis_size);
            }
        }
        let trailing = edges.computed(axis.trailing_edge(), Value::Undefined);
        if trailing.is_defined() {
            trailing.resolve(axis_size)
        } else {
            Some(0.0)
        }
    }

    /// Offset from relative positioning: the leading offset if set, else the
    /// negated trailing offset.
    pub(crate) fn relative_position(&self, axis: FlexDirection, axis_size: Option<f64>) -> Option<f64> {
        if self.is_leading_position_defined(axis) {
            return self.leading_position(axis, axis_size);
        }
        self.trailing_position(axis, axis_size).map(|offset| -offset)
    }

    /// Write the margin-plus-relative-offset position on all four edges.
    pub(crate) fn set_position(
        &mut self,
        direction: Direction,
        main_size: Option<f64>,
        cross_size: Option<f64>,
        owner_width: Option<f64>,
        has_owner: bool,
    ) {
        let direction = if has_owner { direction } else { Direction::LeftToRight };
        let main_axis = self.style.flex_direction.resolve(direction);
        let cross_axis = main_axis.cross(direction);

        let relative_main = self.relative_position(main_axis, main_size);
        let relative_cross = self.relative_position(cross_axis, cross_size);

        let leading_main = self.leading_margin(main_axis, owner_width).maybe_add(relative_main);
        let trailing_main = self.trailing_margin(main_axis, owner_width).maybe_add(relative_main);
        let leading_cross = self.leading_margin(cross_axis, owner_width).maybe_add(relative_cross);
        let trailing_cross = self.trailing_margin(cross_axis, owner_width).maybe_add(relative_cross);

        self.layout.set_position(main_axis.leading_edge(), leading_main);
        self.layout.set_position(main_axis.trailing_edge(), trailing_main);
        self.layout.set_position(cross_axis.leading_edge(), leading_cross);
        self.layout.set_position(cross_axis.trailing_edge(), trailing_cross);
    }

    // Dimensions.

    /// Whether the preferred size on `axis` is definite against `owner_size`.
    pub(crate) fn is_style_dim_defined(&self, axis: FlexDirection, owner_size: Option<f64>) -> bool {
        match self.style.resolved_dimension(axis.dimension()) {
            Value::Undefined | Value::Auto => false,
            Value::Point(points) => points >= 0.0,
            Value::Percent(percent) => percent >= 0.0 && owner_size.is_some(),
        }
    }

    #[inline]
    pub(crate) fn is_layout_dim_defined(&self, axis: FlexDirection) -> bool {
        self.layout
            .dimension(axis.dimension())
            .is_some_and(|size| size >= 0.0)
    }

    #[inline]
    pub(crate) fn measured(&self, axis: FlexDirection) -> Option<f64> {
        self.layout.measured(axis.dimension())
    }

    /// Measured outer size along `axis`.
    #[inline]
    pub(crate) fn dim_with_margin(&self, axis: FlexDirection, width_size: Option<f64>) -> Option<f64> {
        self.measured(axis).maybe_add(self.margin_for_axis(axis, width_size))
    }

    #[inline]
    pub(crate) fn min_dimension(&self, dimension: Dimension, reference: Option<f64>) -> Option<f64> {
        self.style.min_dimension(dimension).resolve(reference)
    }

    #[inline]
    pub(crate) fn max_dimension(&self, dimension: Dimension, reference: Option<f64>) -> Option<f64> {
        self.style.max_dimension(dimension).resolve(reference)
    }

    /// Clamp `value` into the node's min/max on `axis`. Negative bounds are ignored.
    pub(crate) fn bound_axis_within_min_and_max(
        &self,
        axis: FlexDirection,
        value: Option<f64>,
        axis_size: Option<f64>,
    ) -> Option<f64> {
        let dimension = axis.dimension();
        let min = self.min_dimension(dimension, axis_size);
        let max = self.max_dimension(dimension, axis_size);

        let mut bound = value;
        if max.maybe_ge(0.0) && bound.maybe_gt(max) {
            bound = max;
        }
        if min.maybe_ge(0.0) && bound.maybe_lt(min) {
            bound = min;
        }
        bound
    }

    /// Like [`Self::bound_axis_within_min_and_max`] but never below padding+border.
    #[inline]
    pub(crate) fn bound_axis(
        &self,
        axis: FlexDirection,
        value: Option<f64>,
        axis_size: Option<f64>,
        width_size: Option<f64>,
    ) -> f64 {
        let floor = self.padding_and_border_for_axis(axis, width_size);
        self.bound_axis_within_min_and_max(axis, value, axis_size)
            .map_or(floor, |bound| bound.max(floor))
    }
}
