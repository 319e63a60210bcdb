use flex_style::{Direction, Edge, FlexDirection};
use indextree::NodeId;

use crate::tree::FlexTree;

impl FlexTree {
    /// Store the node's direction and its resolved margin, border and padding.
    ///
    /// Horizontal edges are kept as start/end of the resolved row axis so that
    /// `Left`/`Right` reads can be mapped through the direction later.
    pub(super) fn resolve_box_model(
        &mut self,
        node: NodeId,
        direction: Direction,
        owner_width: Option<f64>,
    ) {
        let row = FlexDirection::Row.resolve(direction);
        let column = FlexDirection::Column.resolve(direction);
        let data = self.data_mut(node);

        let margins = [
            (Edge::Start, data.leading_margin(row, owner_width)),
            (Edge::End, data.trailing_margin(row, owner_width)),
            (Edge::Top, data.leading_margin(column, owner_width)),
            (Edge::Bottom, data.trailing_margin(column, owner_width)),
        ];
        let borders = [
            (Edge::Start, data.leading_border(row)),
            (Edge::End, data.trailing_border(row)),
            (Edge::Top, data.leading_border(column)),
            (Edge::Bottom, data.trailing_border(column)),
        ];
        let paddings = [
            (Edge::Start, data.leading_padding(row, owner_width)),
            (Edge::End, data.trailing_padding(row, owner_width)),
            (Edge::Top, data.leading_padding(column, owner_width)),
            (Edge::Bottom, data.trailing_padding(column, owner_width)),
        ];

        let layout = &mut data.layout;
        layout.direction = direction;
        for (edge, margin) in margins {
            layout.set_margin(edge, margin);
        }
        for (edge, border) in borders {
            layout.set_border(edge, border);
        }
        for (edge, padding) in paddings {
            layout.set_padding(edge, padding);
        }
    }
}
