//! Dimension values (`auto`, points, percentages) and their resolution.

/// Tolerance for every float comparison made by the engine.
pub const EPSILON: f64 = 0.0001;

/// Unit tag of a [`Value`], without its payload.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Unit {
    /// Not specified.
    #[default]
    Undefined,
    /// Absolute length in points.
    Point,
    /// Percentage of a reference length.
    Percent,
    /// `auto` keyword.
    Auto,
}

/// A style length as written by the host.
///
/// Equality compares payloads with [`EPSILON`] tolerance, and only when the
/// units match. `Undefined` and `Auto` carry no payload.
#[derive(Copy, Clone, Debug, Default)]
pub enum Value {
    /// Not specified.
    #[default]
    Undefined,
    /// `auto` keyword.
    Auto,
    /// Absolute length in points.
    Point(f64),
    /// Percentage of a reference length.
    Percent(f64),
}

impl Value {
    /// `0pt`.
    pub const ZERO: Self = Self::Point(0.0);

    /// Unit tag of this value.
    #[inline]
    pub const fn unit(self) -> Unit {
        match self {
            Self::Undefined => Unit::Undefined,
            Self::Auto => Unit::Auto,
            Self::Point(_) => Unit::Point,
            Self::Percent(_) => Unit::Percent,
        }
    }

    /// Numeric payload for `Point` and `Percent`.
    #[inline]
    pub const fn payload(self) -> Option<f64> {
        match self {
            Self::Point(number) | Self::Percent(number) => Some(number),
            Self::Undefined | Self::Auto => None,
        }
    }

    /// True unless the value is `Undefined`.
    #[inline]
    pub const fn is_defined(self) -> bool {
        !matches!(self, Self::Undefined)
    }

    /// True for `Auto`.
    #[inline]
    pub const fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }

    /// Resolve against a reference length.
    ///
    /// `Undefined` and `Auto` never resolve. A percentage resolves only when the
    /// reference is known.
    #[inline]
    pub fn resolve(self, reference: Option<f64>) -> Option<f64> {
        match self {
            Self::Undefined | Self::Auto => None,
            Self::Point(points) => Some(points),
            Self::Percent(percent) => reference.map(|size| percent * size * 0.01),
        }
    }

    /// Resolve a margin: `auto` margins occupy no space until free space is
    /// handed out, so they resolve to zero here.
    #[inline]
    pub fn resolve_margin(self, reference: Option<f64>) -> Option<f64> {
        if self.is_auto() {
            return Some(0.0);
        }
        self.resolve(reference)
    }

    /// Bitwise identity, used to decide whether a setter changed anything.
    #[inline]
    pub fn is_identical(self, other: Self) -> bool {
        self.unit() == other.unit()
            && self.payload().map(f64::to_bits) == other.payload().map(f64::to_bits)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        if self.unit() != other.unit() {
            return false;
        }
        match (self.payload(), other.payload()) {
            (Some(lhs), Some(rhs)) => (lhs - rhs).abs() < EPSILON,
            _ => true,
        }
    }
}

impl From<f64> for Value {
    fn from(points: f64) -> Self {
        if points.is_nan() {
            Self::Undefined
        } else {
            Self::Point(points)
        }
    }
}

/// Compare two optional numbers within [`EPSILON`]; two unresolved values are equal.
#[inline]
pub fn floats_equal(lhs: Option<f64>, rhs: Option<f64>) -> bool {
    match (lhs, rhs) {
        (Some(left), Some(right)) => (left - right).abs() < EPSILON,
        (None, None) => true,
        _ => false,
    }
}
