//! Enumerated flexbox properties.

/// Writing direction of a node. `Inherit` takes the owner's resolved direction.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    Inherit,
    LeftToRight,
    RightToLeft,
}

/// Main-axis orientation of a flex container.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FlexDirection {
    #[default]
    Column,
    ColumnReverse,
    Row,
    RowReverse,
}

/// `justify-content` values.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Justify {
    #[default]
    FlexStart,
    Center,
    FlexEnd,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

/// Shared value set of `align-items`, `align-self` and `align-content`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Align {
    /// Only meaningful for `align-self`: defer to the owner's `align-items`.
    #[default]
    Auto,
    FlexStart,
    Center,
    FlexEnd,
    Stretch,
    Baseline,
    SpaceBetween,
    SpaceAround,
}

/// Whether a node participates in flex lines.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PositionType {
    #[default]
    Relative,
    Absolute,
}

/// `flex-wrap` values.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Wrap {
    #[default]
    NoWrap,
    Wrap,
    WrapReverse,
}

/// `overflow` values. Only `Scroll` changes sizing.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
    Scroll,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Display {
    #[default]
    Flex,
    None,
}

/// Physical dimension index.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Dimension {
    Width,
    Height,
}

impl Dimension {
    /// Slot in two-element per-dimension arrays.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::Width => 0,
            Self::Height => 1,
        }
    }
}

/// How an available size constrains a measurement.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum MeasureMode {
    /// No constraint (max-content).
    #[default]
    Undefined,
    /// The size is imposed (fill-available).
    Exactly,
    /// The size is an upper bound (fit-content).
    AtMost,
}

/// Node kind. Nodes with a measure callback are text nodes and get
/// non-truncating pixel rounding.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum NodeType {
    #[default]
    Default,
    Text,
}
