//! Flexbox layout engine.
//!
//! A [`FlexTree`] owns styled nodes. [`FlexTree::calculate_layout`] sizes and
//! positions every node under a root following the CSS flexible box model:
//! flex basis, two-pass flexible lengths, wrapping into lines, main and cross
//! axis alignment, `align-content`, baselines, absolute positioning and
//! pixel-grid rounding. Measurements are cached per node and reused until a
//! style change dirties the node.

mod config;
mod engine;
mod error;
mod layout;
mod node;
mod stats;
mod tree;

pub use config::{Config, ExperimentalFeatures};
pub use engine::{AxisConstraint, can_use_cached_measurement, round_value_to_pixel_grid};
pub use error::{LayoutError, Result};
pub use flex_style::{
    Align, Dimension, Direction, Display, EPSILON, Edge, Edges, FlexDirection, Justify,
    MaybeMath, MeasureMode, NodeType, Overflow, PositionType, Style, Unit, Value, Wrap,
    floats_equal,
};
pub use indextree::NodeId;
pub use layout::{CachedMeasurement, Layout, MAX_CACHED_MEASUREMENTS};
pub use node::{BaselineFunc, DirtiedFunc, MeasureFunc, Size};
pub use stats::LayoutStats;
pub use tree::FlexTree;

#[cfg(test)]
mod tests;
