use indextree::NodeId;
use log::debug;

use super::LayoutInput;
use crate::tree::FlexTree;

impl FlexTree {
    /// Lay out a throwaway copy of `root` with legacy stretch sizing turned off
    /// and record on `root` whether the two layouts differ.
    ///
    /// The comparison pass is not counted in [`crate::LayoutStats`].
    pub(super) fn diff_layout_without_legacy_stretch(&mut self, root: NodeId, input: LayoutInput) {
        let stats = self.stats;
        let copy = self.deep_clone(root);
        self.mark_dirty_downwards(copy);
        self.generation = self.generation.wrapping_add(1);
        self.set_use_legacy_flag_recursively(copy, false);

        let performed = self.layout_node(
            copy,
            LayoutInput {
                reason: "legacy-diff",
                ..input
            },
        );
        if performed {
            self.place_and_round_root(copy, input.owner_width, input.owner_height);
            let affected = !self.is_layout_tree_equal(copy, root);
            self.data_mut(root).layout.does_legacy_stretch_flag_affect_layout = affected;
            debug!(
                target: "flex::layout",
                "[LAYOUT-LEGACY] root={root:?} legacy stretch changes layout: {affected}"
            );
        }
        copy.remove_subtree(&mut self.arena);
        self.stats = stats;
    }
}
