//! Per-node computed layout state and the measurement cache.

use flex_style::{Dimension, Direction, Edge, MeasureMode, floats_equal};

/// Capacity of the measurement ring.
pub const MAX_CACHED_MEASUREMENTS: usize = 16;

/// One cached sizing result keyed on the constraints that produced it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CachedMeasurement {
    pub available_width: Option<f64>,
    pub available_height: Option<f64>,
    /// `None` marks an empty slot.
    pub width_mode: Option<MeasureMode>,
    pub height_mode: Option<MeasureMode>,
    /// Negative while the slot is empty.
    pub computed_width: f64,
    pub computed_height: f64,
}

impl Default for CachedMeasurement {
    fn default() -> Self {
        Self {
            available_width: Some(0.0),
            available_height: Some(0.0),
            width_mode: None,
            height_mode: None,
            computed_width: -1.0,
            computed_height: -1.0,
        }
    }
}

impl CachedMeasurement {
    /// True when this entry was stored for exactly these constraints.
    #[inline]
    pub(crate) fn matches_exactly(
        &self,
        available_width: Option<f64>,
        available_height: Option<f64>,
        width_mode: MeasureMode,
        height_mode: MeasureMode,
    ) -> bool {
        floats_equal(self.available_width, available_width)
            && floats_equal(self.available_height, available_height)
            && self.width_mode == Some(width_mode)
            && self.height_mode == Some(height_mode)
    }
}

/// Physical slots of [`Layout::position`].
#[inline]
pub(crate) const fn position_slot(edge: Edge) -> Option<usize> {
    match edge {
        Edge::Left => Some(0),
        Edge::Top => Some(1),
        Edge::Right => Some(2),
        Edge::Bottom => Some(3),
        Edge::Start | Edge::End | Edge::Horizontal | Edge::Vertical | Edge::All => None,
    }
}

/// Slots of the resolved box-edge arrays (`margin`, `border`, `padding`).
#[inline]
pub(crate) const fn box_slot(edge: Edge) -> Option<usize> {
    match edge {
        Edge::Left => Some(0),
        Edge::Top => Some(1),
        Edge::Right => Some(2),
        Edge::Bottom => Some(3),
        Edge::Start => Some(4),
        Edge::End => Some(5),
        Edge::Horizontal | Edge::Vertical | Edge::All => None,
    }
}

/// Computed layout of a node.
///
/// Positions are relative to the owner's border box. Margin, border and padding
/// are stored for `Top`, `Bottom`, `Start` and `End`; `Left`/`Right` reads go
/// through the resolved direction.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    pub(crate) position: [Option<f64>; 4],
    pub(crate) dimensions: [Option<f64>; 2],
    pub(crate) margin: [Option<f64>; 6],
    pub(crate) border: [f64; 6],
    pub(crate) padding: [f64; 6],
    pub(crate) direction: Direction,

    pub(crate) computed_flex_basis_generation: u32,
    pub(crate) computed_flex_basis: Option<f64>,
    pub(crate) had_overflow: bool,

    /// Generation in which the node was last visited.
    pub(crate) generation_count: u32,
    pub(crate) last_owner_direction: Option<Direction>,

    pub(crate) next_cached_measurements_index: usize,
    pub(crate) cached_measurements: [CachedMeasurement; MAX_CACHED_MEASUREMENTS],
    pub(crate) measured_dimensions: [Option<f64>; 2],
    pub(crate) cached_layout: CachedMeasurement,

    /// Flex line the node landed on in its owner.
    pub(crate) line_index: usize,
    pub(crate) did_use_legacy_flag: bool,
    pub(crate) does_legacy_stretch_flag_affect_layout: bool,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            position: [None; 4],
            dimensions: [None; 2],
            margin: [None; 6],
            border: [0.0; 6],
            padding: [0.0; 6],
            direction: Direction::Inherit,
            computed_flex_basis_generation: 0,
            computed_flex_basis: None,
            had_overflow: false,
            generation_count: 0,
            last_owner_direction: None,
            next_cached_measurements_index: 0,
            cached_measurements: [CachedMeasurement::default(); MAX_CACHED_MEASUREMENTS],
            measured_dimensions: [None; 2],
            cached_layout: CachedMeasurement::default(),
            line_index: 0,
            did_use_legacy_flag: false,
            does_legacy_stretch_flag_affect_layout: false,
        }
    }
}

impl Layout {
    /// Layout of a node hidden with `display: none`: everything zero.
    pub(crate) fn zeroed() -> Self {
        Self {
            position: [Some(0.0); 4],
            dimensions: [Some(0.0); 2],
            margin: [Some(0.0); 6],
            measured_dimensions: [Some(0.0); 2],
            ..Self::default()
        }
    }

    #[inline]
    pub(crate) fn position(&self, edge: Edge) -> Option<f64> {
        position_slot(edge).and_then(|slot| self.position[slot])
    }

    #[inline]
    pub(crate) fn set_position(&mut self, edge: Edge, value: Option<f64>) {
        if let Some(slot) = position_slot(edge) {
            self.position[slot] = value;
        }
    }

    #[inline]
    pub(crate) const fn dimension(&self, dimension: Dimension) -> Option<f64> {
        self.dimensions[dimension.index()]
    }

    #[inline]
    pub(crate) const fn set_dimension(&mut self, dimension: Dimension, value: Option<f64>) {
        self.dimensions[dimension.index()] = value;
    }

    #[inline]
    pub(crate) const fn measured(&self, dimension: Dimension) -> Option<f64> {
        self.measured_dimensions[dimension.index()]
    }

    #[inline]
    pub(crate) const fn set_measured(&mut self, dimension: Dimension, value: Option<f64>) {
        self.measured_dimensions[dimension.index()] = value;
    }

    #[inline]
    pub(crate) fn set_margin(&mut self, edge: Edge, value: Option<f64>) {
        if let Some(slot) = box_slot(edge) {
            self.margin[slot] = value;
        }
    }

    #[inline]
    pub(crate) fn set_border(&mut self, edge: Edge, value: f64) {
        if let Some(slot) = box_slot(edge) {
            self.border[slot] = value;
        }
    }

    #[inline]
    pub(crate) fn set_padding(&mut self, edge: Edge, value: f64) {
        if let Some(slot) = box_slot(edge) {
            self.padding[slot] = value;
        }
    }

    /// Drop every cached result; used when a node must be revisited.
    pub(crate) fn invalidate_cache(&mut self) {
        self.next_cached_measurements_index = 0;
        self.cached_layout.width_mode = None;
        self.cached_layout.height_mode = None;
        self.cached_layout.computed_width = -1.0;
        self.cached_layout.computed_height = -1.0;
    }

    /// Map a physical left/right read onto the stored start/end slot.
    fn logical_slot(&self, edge: Edge) -> Option<usize> {
        let rtl = self.direction == Direction::RightToLeft;
        match edge {
            Edge::Left if rtl => box_slot(Edge::End),
            Edge::Left => box_slot(Edge::Start),
            Edge::Right if rtl => box_slot(Edge::Start),
            Edge::Right => box_slot(Edge::End),
            other => box_slot(other),
        }
    }

    /// Resolved margin on `edge`, zero if unresolved.
    pub fn margin(&self, edge: Edge) -> f64 {
        self.logical_slot(edge)
            .and_then(|slot| self.margin[slot])
            .unwrap_or(0.0)
    }

    /// Resolved border width on `edge`.
    pub fn border(&self, edge: Edge) -> f64 {
        self.logical_slot(edge).map_or(0.0, |slot| self.border[slot])
    }

    /// Resolved padding on `edge`.
    pub fn padding(&self, edge: Edge) -> f64 {
        self.logical_slot(edge).map_or(0.0, |slot| self.padding[slot])
    }

    pub fn left(&self) -> f64 {
        self.position[0].unwrap_or(0.0)
    }

    pub fn top(&self) -> f64 {
        self.position[1].unwrap_or(0.0)
    }

    pub fn right(&self) -> f64 {
        self.position[2].unwrap_or(0.0)
    }

    pub fn bottom(&self) -> f64 {
        self.position[3].unwrap_or(0.0)
    }

    pub fn width(&self) -> f64 {
        self.dimensions[0].unwrap_or(0.0)
    }

    pub fn height(&self) -> f64 {
        self.dimensions[1].unwrap_or(0.0)
    }

    pub const fn direction(&self) -> Direction {
        self.direction
    }

    pub const fn had_overflow(&self) -> bool {
        self.had_overflow
    }

    /// Flex line index assigned during the owner's last layout.
    pub const fn line_index(&self) -> usize {
        self.line_index
    }

    /// Set by a diffing pass when the legacy stretch flag changed the result.
    pub const fn does_legacy_stretch_flag_affect_layout(&self) -> bool {
        self.does_legacy_stretch_flag_affect_layout
    }

    /// Host-visible geometry equality, used to compare a layout against its
    /// legacy-free rerun.
    pub(crate) fn same_geometry(&self, other: &Self) -> bool {
        let all_equal = |lhs: &[Option<f64>], rhs: &[Option<f64>]| {
            lhs.iter()
                .zip(rhs)
                .all(|(left, right)| floats_equal(*left, *right))
        };
        let all_equal_plain = |lhs: &[f64], rhs: &[f64]| {
            lhs.iter()
                .zip(rhs)
                .all(|(left, right)| floats_equal(Some(*left), Some(*right)))
        };
        all_equal(&self.position, &other.position)
            && all_equal(&self.dimensions, &other.dimensions)
            && all_equal(&self.margin, &other.margin)
            && all_equal_plain(&self.border, &other.border)
            && all_equal_plain(&self.padding, &other.padding)
            && self.direction == other.direction
            && self.had_overflow == other.had_overflow
    }
}
