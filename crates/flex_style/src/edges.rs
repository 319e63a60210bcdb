//! Nine-slot edge tables for margin, padding, border and position.

use crate::value::Value;

/// Addressable edges. `Start`/`End` follow the writing direction,
/// `Horizontal`/`Vertical`/`All` are aggregates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    Left,
    Top,
    Right,
    Bottom,
    Start,
    End,
    Horizontal,
    Vertical,
    All,
}

impl Edge {
    /// Every edge in slot order.
    pub const ALL_EDGES: [Self; 9] = [
        Self::Left,
        Self::Top,
        Self::Right,
        Self::Bottom,
        Self::Start,
        Self::End,
        Self::Horizontal,
        Self::Vertical,
        Self::All,
    ];

    #[inline]
    const fn slot(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Top => 1,
            Self::Right => 2,
            Self::Bottom => 3,
            Self::Start => 4,
            Self::End => 5,
            Self::Horizontal => 6,
            Self::Vertical => 7,
            Self::All => 8,
        }
    }
}

/// Sparse per-edge values.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Edges {
    slots: [Value; 9],
}

impl Edges {
    /// Raw value stored for `edge`, without fallback.
    #[inline]
    pub const fn get(&self, edge: Edge) -> Value {
        self.slots[edge.slot()]
    }

    /// Store `value` for `edge`. Returns whether the stored value changed.
    #[inline]
    pub fn set(&mut self, edge: Edge, value: Value) -> bool {
        let slot = &mut self.slots[edge.slot()];
        if slot.is_identical(value) {
            return false;
        }
        *slot = value;
        true
    }

    /// Effective value of a physical or logical edge.
    ///
    /// Precedence: the edge itself, then `Vertical` (top/bottom) or
    /// `Horizontal` (left/right/start/end), then `All`. `Start`/`End` stop at
    /// `Undefined`; physical edges fall back to `default`.
    pub fn computed(&self, edge: Edge, default: Value) -> Value {
        let own = self.get(edge);
        if own.is_defined() {
            return own;
        }

        let vertical = self.get(Edge::Vertical);
        if matches!(edge, Edge::Top | Edge::Bottom) && vertical.is_defined() {
            return vertical;
        }

        let horizontal = self.get(Edge::Horizontal);
        if matches!(edge, Edge::Left | Edge::Right | Edge::Start | Edge::End)
            && horizontal.is_defined()
        {
            return horizontal;
        }

        let all = self.get(Edge::All);
        if all.is_defined() {
            return all;
        }

        if matches!(edge, Edge::Start | Edge::End) {
            return Value::Undefined;
        }
        default
    }
}
