use flex_style::{Dimension, Edge, NodeType, floats_equal};
use indextree::NodeId;
use log::trace;

use super::cache::round_value_to_pixel_grid;
use crate::tree::FlexTree;

/// True when `size` does not land on the pixel grid.
fn is_fractional(size: f64, point_scale_factor: f64) -> bool {
    let fraction = (size * point_scale_factor).rem_euclid(1.0);
    !floats_equal(Some(fraction), Some(0.0)) && !floats_equal(Some(fraction), Some(1.0))
}

impl FlexTree {
    /// Snap the subtree of `node` to the pixel grid.
    ///
    /// Edges are rounded in absolute coordinates so siblings that touch keep
    /// touching; sizes are the difference of the rounded edges. Text nodes
    /// round their far edge up when their size is fractional so glyphs are
    /// never clipped.
    pub(crate) fn round_to_pixel_grid(
        &mut self,
        node: NodeId,
        point_scale_factor: f64,
        absolute_left: f64,
        absolute_top: f64,
    ) {
        if point_scale_factor == 0.0 {
            return;
        }

        let data = self.data_mut(node);
        let text = data.node_type == NodeType::Text;
        let layout = &mut data.layout;
        let left = layout.position(Edge::Left).unwrap_or(0.0);
        let top = layout.position(Edge::Top).unwrap_or(0.0);
        let width = layout.dimension(Dimension::Width).unwrap_or(0.0);
        let height = layout.dimension(Dimension::Height).unwrap_or(0.0);

        let node_left = absolute_left + left;
        let node_top = absolute_top + top;
        let node_right = node_left + width;
        let node_bottom = node_top + height;

        let fractional_width = is_fractional(width, point_scale_factor);
        let fractional_height = is_fractional(height, point_scale_factor);
        let round = |value: f64, ceil: bool, floor: bool| {
            round_value_to_pixel_grid(value, point_scale_factor, ceil, floor)
        };

        layout.set_position(Edge::Left, Some(round(left, false, text)));
        layout.set_position(Edge::Top, Some(round(top, false, text)));
        layout.set_dimension(
            Dimension::Width,
            Some(
                round(node_right, text && fractional_width, text && !fractional_width)
                    - round(node_left, false, text),
            ),
        );
        layout.set_dimension(
            Dimension::Height,
            Some(
                round(node_bottom, text && fractional_height, text && !fractional_height)
                    - round(node_top, false, text),
            ),
        );
        trace!(
            target: "flex::round",
            "[ROUND] node={node:?} origin=({node_left}, {node_top}) size={:?}",
            layout.dimensions
        );

        for child in self.child_list(node) {
            self.round_to_pixel_grid(child, point_scale_factor, node_left, node_top);
        }
    }
}
