//! Per-tree layout telemetry.

/// Counters describing the work done by layout passes.
///
/// The `*_last` counters cover the most recent `calculate_layout` call and are
/// reset when it starts; the `*_total` counters accumulate over the tree's life.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LayoutStats {
    layout_calls_last: u64,
    full_computations_last: u64,
    cache_hits_last: u64,
    measure_callbacks_last: u64,
    max_depth_last: u32,
    passes_total: u64,
    full_computations_total: u64,
}

impl LayoutStats {
    pub(crate) fn begin_pass(&mut self) {
        self.layout_calls_last = 0;
        self.full_computations_last = 0;
        self.cache_hits_last = 0;
        self.measure_callbacks_last = 0;
        self.max_depth_last = 0;
        self.passes_total = self.passes_total.saturating_add(1);
    }

    pub(crate) fn record_visit(&mut self, depth: u32) {
        self.layout_calls_last = self.layout_calls_last.saturating_add(1);
        self.max_depth_last = self.max_depth_last.max(depth);
    }

    pub(crate) fn record_full_computation(&mut self) {
        self.full_computations_last = self.full_computations_last.saturating_add(1);
        self.full_computations_total = self.full_computations_total.saturating_add(1);
    }

    pub(crate) fn record_cache_hit(&mut self) {
        self.cache_hits_last = self.cache_hits_last.saturating_add(1);
    }

    pub(crate) fn record_measure_callback(&mut self) {
        self.measure_callbacks_last = self.measure_callbacks_last.saturating_add(1);
    }

    /// Calls into the cached layout entry during the last pass.
    pub const fn layout_calls_last(&self) -> u64 {
        self.layout_calls_last
    }

    /// Nodes whose layout was actually computed (cache misses) during the last pass.
    pub const fn full_computations_last(&self) -> u64 {
        self.full_computations_last
    }

    pub const fn cache_hits_last(&self) -> u64 {
        self.cache_hits_last
    }

    pub const fn measure_callbacks_last(&self) -> u64 {
        self.measure_callbacks_last
    }

    /// Deepest recursion reached during the last pass.
    pub const fn max_depth_last(&self) -> u32 {
        self.max_depth_last
    }

    pub const fn passes_total(&self) -> u64 {
        self.passes_total
    }

    pub const fn full_computations_total(&self) -> u64 {
        self.full_computations_total
    }
}
