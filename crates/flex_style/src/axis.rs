//! Axis helpers: direction-aware flex-direction resolution and the
//! leading/trailing edge tables.

use crate::edges::Edge;
use crate::properties::{Dimension, Direction, FlexDirection};

impl FlexDirection {
    #[inline]
    pub const fn is_row(self) -> bool {
        matches!(self, Self::Row | Self::RowReverse)
    }

    #[inline]
    pub const fn is_column(self) -> bool {
        matches!(self, Self::Column | Self::ColumnReverse)
    }

    /// Flip row axes under right-to-left writing.
    #[inline]
    pub const fn resolve(self, direction: Direction) -> Self {
        match (self, direction) {
            (Self::Row, Direction::RightToLeft) => Self::RowReverse,
            (Self::RowReverse, Direction::RightToLeft) => Self::Row,
            _ => self,
        }
    }

    /// Cross axis of `self` taken as a main axis.
    #[inline]
    pub const fn cross(self, direction: Direction) -> Self {
        if self.is_column() {
            Self::Row.resolve(direction)
        } else {
            Self::Column
        }
    }

    /// Physical edge where items along this axis start.
    #[inline]
    pub const fn leading_edge(self) -> Edge {
        match self {
            Self::Column => Edge::Top,
            Self::ColumnReverse => Edge::Bottom,
            Self::Row => Edge::Left,
            Self::RowReverse => Edge::Right,
        }
    }

    /// Physical edge where items along this axis end.
    #[inline]
    pub const fn trailing_edge(self) -> Edge {
        match self {
            Self::Column => Edge::Bottom,
            Self::ColumnReverse => Edge::Top,
            Self::Row => Edge::Right,
            Self::RowReverse => Edge::Left,
        }
    }

    #[inline]
    pub const fn dimension(self) -> Dimension {
        if self.is_row() {
            Dimension::Width
        } else {
            Dimension::Height
        }
    }

    /// True for the reversed variants.
    #[inline]
    pub const fn is_reverse(self) -> bool {
        matches!(self, Self::RowReverse | Self::ColumnReverse)
    }
}
