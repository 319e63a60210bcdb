//! Read-back of computed layout.

use flex_style::{Direction, Edge};
use indextree::NodeId;

use super::FlexTree;
use crate::layout::Layout;

impl FlexTree {
    /// Full computed layout record of `node`.
    pub fn layout(&self, node: NodeId) -> &Layout {
        &self.data(node).layout
    }

    /// Left offset within the owner, after rounding.
    pub fn layout_left(&self, node: NodeId) -> f64 {
        self.layout(node).left()
    }

    pub fn layout_top(&self, node: NodeId) -> f64 {
        self.layout(node).top()
    }

    pub fn layout_right(&self, node: NodeId) -> f64 {
        self.layout(node).right()
    }

    pub fn layout_bottom(&self, node: NodeId) -> f64 {
        self.layout(node).bottom()
    }

    pub fn layout_width(&self, node: NodeId) -> f64 {
        self.layout(node).width()
    }

    pub fn layout_height(&self, node: NodeId) -> f64 {
        self.layout(node).height()
    }

    pub fn layout_margin(&self, node: NodeId, edge: Edge) -> f64 {
        self.layout(node).margin(edge)
    }

    pub fn layout_padding(&self, node: NodeId, edge: Edge) -> f64 {
        self.layout(node).padding(edge)
    }

    pub fn layout_border(&self, node: NodeId, edge: Edge) -> f64 {
        self.layout(node).border(edge)
    }

    pub fn layout_direction(&self, node: NodeId) -> Direction {
        self.layout(node).direction()
    }

    pub fn layout_had_overflow(&self, node: NodeId) -> bool {
        self.layout(node).had_overflow()
    }
}
