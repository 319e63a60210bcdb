//! Engine configuration shared by the nodes of a tree.

/// Opt-in behaviours that deviate from the default algorithm.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ExperimentalFeatures {
    /// Recompute a definite flex-basis on every new layout generation.
    pub web_flex_basis: bool,
}

/// Layout configuration. Nodes hold it behind an `Rc`; deep clones copy it.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Device pixels per point. `0.0` disables pixel-grid rounding.
    pub point_scale_factor: f64,
    pub experimental_features: ExperimentalFeatures,
    /// Keep the available main size of a content-sized container instead of
    /// shrinking it to its items.
    pub use_legacy_stretch_behaviour: bool,
    /// After each layout that relied on the legacy flag, lay out a clone
    /// without it and record whether the results differ.
    pub should_diff_layout_without_legacy_stretch_behaviour: bool,
    /// Browser-compatible defaults: row direction, stretched lines, and a
    /// default flex-shrink of 1.
    pub use_web_defaults: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            point_scale_factor: 1.0,
            experimental_features: ExperimentalFeatures::default(),
            use_legacy_stretch_behaviour: false,
            should_diff_layout_without_legacy_stretch_behaviour: false,
            use_web_defaults: false,
        }
    }
}

impl Config {
    /// Default flex-shrink for items that set neither `flex-shrink` nor `flex`.
    #[inline]
    pub const fn default_flex_shrink(&self) -> f64 {
        if self.use_web_defaults { 1.0 } else { 0.0 }
    }
}
