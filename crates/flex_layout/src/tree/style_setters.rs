//! Per-property style setters. A setter only dirties the node when the stored
//! value actually changes.

use flex_style::{
    Align, Dimension, Direction, Display, Edge, FlexDirection, Justify, Overflow, PositionType,
    Style, Value, Wrap,
};
use indextree::NodeId;

use super::FlexTree;

#[inline]
fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

#[inline]
fn replace_value(slot: &mut Value, value: Value) -> bool {
    if slot.is_identical(value) {
        return false;
    }
    *slot = value;
    true
}

/// NaN is treated as "unset".
#[inline]
fn replace_number(slot: &mut Option<f64>, value: Option<f64>) -> bool {
    let value = value.filter(|number| !number.is_nan());
    if slot.map(f64::to_bits) == value.map(f64::to_bits) {
        return false;
    }
    *slot = value;
    true
}

impl FlexTree {
    fn update_style(&mut self, node: NodeId, change: impl FnOnce(&mut Style) -> bool) {
        if change(&mut self.data_mut(node).style) {
            self.mark_dirty_and_propagate(node);
        }
    }

    pub fn set_direction(&mut self, node: NodeId, direction: Direction) {
        self.update_style(node, |style| replace(&mut style.direction, direction));
    }

    pub fn set_flex_direction(&mut self, node: NodeId, flex_direction: FlexDirection) {
        self.update_style(node, |style| replace(&mut style.flex_direction, flex_direction));
    }

    pub fn set_justify_content(&mut self, node: NodeId, justify: Justify) {
        self.update_style(node, |style| replace(&mut style.justify_content, justify));
    }

    pub fn set_align_content(&mut self, node: NodeId, align: Align) {
        self.update_style(node, |style| replace(&mut style.align_content, align));
    }

    pub fn set_align_items(&mut self, node: NodeId, align: Align) {
        self.update_style(node, |style| replace(&mut style.align_items, align));
    }

    pub fn set_align_self(&mut self, node: NodeId, align: Align) {
        self.update_style(node, |style| replace(&mut style.align_self, align));
    }

    pub fn set_position_type(&mut self, node: NodeId, position_type: PositionType) {
        self.update_style(node, |style| replace(&mut style.position_type, position_type));
    }

    pub fn set_flex_wrap(&mut self, node: NodeId, wrap: Wrap) {
        self.update_style(node, |style| replace(&mut style.flex_wrap, wrap));
    }

    pub fn set_overflow(&mut self, node: NodeId, overflow: Overflow) {
        self.update_style(node, |style| replace(&mut style.overflow, overflow));
    }

    pub fn set_display(&mut self, node: NodeId, display: Display) {
        self.update_style(node, |style| replace(&mut style.display, display));
    }

    /// `flex` shorthand.
    pub fn set_flex(&mut self, node: NodeId, flex: Option<f64>) {
        self.update_style(node, |style| replace_number(&mut style.flex, flex));
    }

    pub fn set_flex_grow(&mut self, node: NodeId, grow: Option<f64>) {
        self.update_style(node, |style| replace_number(&mut style.flex_grow, grow));
    }

    pub fn set_flex_shrink(&mut self, node: NodeId, shrink: Option<f64>) {
        self.update_style(node, |style| replace_number(&mut style.flex_shrink, shrink));
    }

    pub fn set_flex_basis(&mut self, node: NodeId, basis: Value) {
        self.update_style(node, |style| replace_value(&mut style.flex_basis, basis));
    }

    pub fn set_order(&mut self, node: NodeId, order: i32) {
        self.update_style(node, |style| replace(&mut style.order, order));
    }

    pub fn set_margin(&mut self, node: NodeId, edge: Edge, margin: Value) {
        self.update_style(node, |style| style.margin.set(edge, margin));
    }

    pub fn set_padding(&mut self, node: NodeId, edge: Edge, padding: Value) {
        self.update_style(node, |style| style.padding.set(edge, padding));
    }

    /// Border widths are absolute; NaN clears the edge.
    pub fn set_border(&mut self, node: NodeId, edge: Edge, width: f64) {
        self.update_style(node, |style| style.border.set(edge, Value::from(width)));
    }

    /// Offset used by relative and absolute positioning.
    pub fn set_position(&mut self, node: NodeId, edge: Edge, offset: Value) {
        self.update_style(node, |style| style.position.set(edge, offset));
    }

    pub fn set_width(&mut self, node: NodeId, width: Value) {
        self.update_style(node, |style| {
            replace_value(&mut style.dimensions[Dimension::Width.index()], width)
        });
    }

    pub fn set_height(&mut self, node: NodeId, height: Value) {
        self.update_style(node, |style| {
            replace_value(&mut style.dimensions[Dimension::Height.index()], height)
        });
    }

    pub fn set_min_width(&mut self, node: NodeId, width: Value) {
        self.update_style(node, |style| {
            replace_value(&mut style.min_dimensions[Dimension::Width.index()], width)
        });
    }

    pub fn set_min_height(&mut self, node: NodeId, height: Value) {
        self.update_style(node, |style| {
            replace_value(&mut style.min_dimensions[Dimension::Height.index()], height)
        });
    }

    pub fn set_max_width(&mut self, node: NodeId, width: Value) {
        self.update_style(node, |style| {
            replace_value(&mut style.max_dimensions[Dimension::Width.index()], width)
        });
    }

    pub fn set_max_height(&mut self, node: NodeId, height: Value) {
        self.update_style(node, |style| {
            replace_value(&mut style.max_dimensions[Dimension::Height.index()], height)
        });
    }

    /// Width-to-height ratio; `None` clears it.
    pub fn set_aspect_ratio(&mut self, node: NodeId, ratio: Option<f64>) {
        self.update_style(node, |style| replace_number(&mut style.aspect_ratio, ratio));
    }
}
