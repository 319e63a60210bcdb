//! Declarative per-node style.

use crate::edges::Edges;
use crate::properties::{
    Align, Dimension, Direction, Display, FlexDirection, Justify, Overflow, PositionType, Wrap,
};
use crate::value::Value;

/// Style record owned by a single node.
#[derive(Clone, Debug, PartialEq)]
pub struct Style {
    pub direction: Direction,
    pub flex_direction: FlexDirection,
    pub justify_content: Justify,
    pub align_content: Align,
    pub align_items: Align,
    pub align_self: Align,
    pub position_type: PositionType,
    pub flex_wrap: Wrap,
    pub overflow: Overflow,
    pub display: Display,
    /// `flex` shorthand; consulted when grow/shrink/basis are unset.
    pub flex: Option<f64>,
    pub flex_grow: Option<f64>,
    pub flex_shrink: Option<f64>,
    pub flex_basis: Value,
    /// Reordering key among siblings; ties keep insertion order.
    pub order: i32,
    pub margin: Edges,
    pub position: Edges,
    pub padding: Edges,
    pub border: Edges,
    /// Preferred width/height, indexed by [`Dimension::index`].
    pub dimensions: [Value; 2],
    pub min_dimensions: [Value; 2],
    pub max_dimensions: [Value; 2],
    /// Width divided by height.
    pub aspect_ratio: Option<f64>,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            direction: Direction::Inherit,
            flex_direction: FlexDirection::Column,
            justify_content: Justify::FlexStart,
            align_content: Align::FlexStart,
            align_items: Align::Stretch,
            align_self: Align::Auto,
            position_type: PositionType::Relative,
            flex_wrap: Wrap::NoWrap,
            overflow: Overflow::Visible,
            display: Display::Flex,
            flex: None,
            flex_grow: None,
            flex_shrink: None,
            flex_basis: Value::Auto,
            order: 0,
            margin: Edges::default(),
            position: Edges::default(),
            padding: Edges::default(),
            border: Edges::default(),
            dimensions: [Value::Auto, Value::Auto],
            min_dimensions: [Value::Undefined, Value::Undefined],
            max_dimensions: [Value::Undefined, Value::Undefined],
            aspect_ratio: None,
        }
    }
}

impl Style {
    /// Defaults matching browser flexbox: row direction and stretched lines.
    pub fn web_defaults() -> Self {
        Self {
            flex_direction: FlexDirection::Row,
            align_content: Align::Stretch,
            ..Self::default()
        }
    }

    #[inline]
    pub const fn dimension(&self, dimension: Dimension) -> Value {
        self.dimensions[dimension.index()]
    }

    #[inline]
    pub const fn min_dimension(&self, dimension: Dimension) -> Value {
        self.min_dimensions[dimension.index()]
    }

    #[inline]
    pub const fn max_dimension(&self, dimension: Dimension) -> Value {
        self.max_dimensions[dimension.index()]
    }

    /// Preferred size after collapsing `min == max` into a fixed size.
    pub fn resolved_dimension(&self, dimension: Dimension) -> Value {
        let max = self.max_dimension(dimension);
        if max.is_defined() && max == self.min_dimension(dimension) {
            max
        } else {
            self.dimension(dimension)
        }
    }
}
