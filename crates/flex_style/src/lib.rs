//! Style model for the flex layout engine.
//!
//! Values and units, the per-edge tables used for margin, padding, border and
//! position, the enumerated flexbox properties, and the `Style` record that a
//! layout node owns. Nothing here depends on the tree or on layout state.

mod axis;
mod edges;
mod maybe_math;
mod properties;
mod style;
mod value;

pub use edges::{Edge, Edges};
pub use maybe_math::MaybeMath;
pub use properties::{
    Align, Dimension, Direction, Display, FlexDirection, Justify, MeasureMode, NodeType, Overflow,
    PositionType, Wrap,
};
pub use style::Style;
pub use value::{EPSILON, Unit, Value, floats_equal};

#[cfg(test)]
mod tests;
