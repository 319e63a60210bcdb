use flex_style::{Align, Edge, FlexDirection, PositionType};
use indextree::NodeId;
use log::trace;

use crate::tree::FlexTree;

impl FlexTree {
    /// Distance from the top of `node` to its baseline.
    ///
    /// A baseline function answers directly. Otherwise the baseline is taken
    /// from the first baseline-aligned item of the first line, or the first
    /// item when none is, and falls back to the node's own height.
    pub(crate) fn calculate_baseline(&self, node: NodeId) -> f64 {
        let data = self.data(node);
        let width = data.measured(FlexDirection::Row).unwrap_or(0.0);
        let height = data.measured(FlexDirection::Column).unwrap_or(0.0);
        if let Some(baseline) = data.baseline.as_ref() {
            let value = baseline(node, width, height);
            trace!(target: "flex::layout", "[BASELINE] node={node:?} from callback: {value}");
            return value;
        }

        let mut baseline_child = None;
        for child in self.ordered_children(node) {
            let child_data = self.data(child);
            if child_data.layout.line_index > 0 {
                break;
            }
            if child_data.style.position_type == PositionType::Absolute {
                continue;
            }
            if self.align_item(node, child) == Align::Baseline {
                baseline_child = Some(child);
                break;
            }
            if baseline_child.is_none() {
                baseline_child = Some(child);
            }
        }

        baseline_child.map_or(height, |child| {
            let top = self.data(child).layout.position(Edge::Top).unwrap_or(0.0);
            self.calculate_baseline(child) + top
        })
    }

    /// Whether any item of the row container `node` aligns on its baseline.
    pub(crate) fn is_baseline_layout(&self, node: NodeId) -> bool {
        let style = &self.data(node).style;
        if style.flex_direction.is_column() {
            return false;
        }
        if style.align_items == Align::Baseline {
            return true;
        }
        self.children(node).any(|child| {
            let child_style = &self.data(child).style;
            child_style.position_type == PositionType::Relative
                && child_style.align_self == Align::Baseline
        })
    }
}
