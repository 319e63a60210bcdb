//! Arena-backed node tree: ownership, mutation and dirty propagation.

mod accessors;
mod style_setters;

use std::any::Any;
use std::rc::Rc;

use flex_style::{NodeType, Style};
use indextree::{Arena, NodeId};
use log::{debug, trace};
use smallvec::SmallVec;

use crate::config::Config;
use crate::error::{LayoutError, Result};
use crate::layout::Layout;
use crate::node::{BaselineFunc, DirtiedFunc, MeasureFunc, NodeData};
use crate::stats::LayoutStats;

/// Inline capacity for child lists collected while the arena is mutated.
pub(crate) type ChildList = SmallVec<NodeId, 8>;

/// A forest of layout nodes.
///
/// Nodes are addressed by [`NodeId`] handles. Each node has at most one owner;
/// owners are tracked as non-owning back links for dirty propagation.
/// A tree is single-threaded: style edits and layout passes must not overlap.
pub struct FlexTree {
    pub(crate) arena: Arena<NodeData>,
    /// Config given to nodes created without one.
    config: Rc<Config>,
    /// Layout generation, bumped once per top-level pass.
    pub(crate) generation: u32,
    /// Current recursion depth of the running pass.
    pub(crate) depth: u32,
    pub(crate) stats: LayoutStats,
}

impl Default for FlexTree {
    fn default() -> Self {
        Self::new()
    }
}

impl FlexTree {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            arena: Arena::new(),
            config: Rc::new(config),
            generation: 0,
            depth: 0,
            stats: LayoutStats::default(),
        }
    }

    /// Default config shared by nodes created with [`Self::new_node`].
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Create a detached node with default style.
    pub fn new_node(&mut self) -> NodeId {
        let config = Rc::clone(&self.config);
        self.new_node_with_config(config)
    }

    /// Create a detached node sharing `config`.
    pub fn new_node_with_config(&mut self, config: Rc<Config>) -> NodeId {
        let node = self.arena.new_node(NodeData::new(config));
        trace!(target: "flex::tree", "[TREE-NEW] node={node:?}");
        node
    }

    /// Config used when laying out `node`.
    pub fn node_config(&self, node: NodeId) -> &Config {
        &self.data(node).config
    }

    pub fn stats(&self) -> &LayoutStats {
        &self.stats
    }

    #[inline]
    pub(crate) fn data(&self, node: NodeId) -> &NodeData {
        self.arena[node].get()
    }

    #[inline]
    pub(crate) fn data_mut(&mut self, node: NodeId) -> &mut NodeData {
        self.arena[node].get_mut()
    }

    // Structure

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.arena[node].parent()
    }

    pub fn child_count(&self, node: NodeId) -> usize {
        node.children(&self.arena).count()
    }

    pub fn child(&self, node: NodeId, index: usize) -> Option<NodeId> {
        node.children(&self.arena).nth(index)
    }

    pub fn children(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        node.children(&self.arena)
    }

    /// Snapshot of the children, safe to hold across arena mutation.
    pub(crate) fn child_list(&self, node: NodeId) -> ChildList {
        node.children(&self.arena).collect()
    }

    /// Insert `child` at `index` among the children of `parent`.
    ///
    /// # Errors
    /// Fails if `child` already has an owner, if `parent` has a measure
    /// function, if `index` is past the end, or if the edit would form a cycle.
    pub fn insert_child(&mut self, parent: NodeId, child: NodeId, index: usize) -> Result<()> {
        if self.parent(child).is_some() {
            return Err(LayoutError::ChildAlreadyOwned { child });
        }
        if self.data(parent).measure.is_some() {
            return Err(LayoutError::MeasuredNodeCannotHaveChildren { node: parent });
        }
        let count = self.child_count(parent);
        match self.child(parent, index) {
            Some(sibling) => sibling.checked_insert_before(child, &mut self.arena)?,
            None if index == count => parent.checked_append(child, &mut self.arena)?,
            None => {
                return Err(LayoutError::ChildIndexOutOfBounds {
                    node: parent,
                    index,
                    count,
                });
            }
        }
        trace!(target: "flex::tree", "[TREE-INSERT] parent={parent:?} child={child:?} index={index}");
        self.mark_dirty_and_propagate(parent);
        Ok(())
    }

    /// Append `child` after the last child of `parent`.
    ///
    /// # Errors
    /// See [`Self::insert_child`].
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let count = self.child_count(parent);
        self.insert_child(parent, child, count)
    }

    /// Detach `child` from `owner`. Its layout is reset since it no longer
    /// describes anything.
    ///
    /// # Errors
    /// Fails if `child` is not a child of `owner`.
    pub fn remove_child(&mut self, owner: NodeId, child: NodeId) -> Result<()> {
        if self.parent(child) != Some(owner) {
            return Err(LayoutError::NotAChild { owner, child });
        }
        child.detach(&mut self.arena);
        self.data_mut(child).layout = Layout::default();
        trace!(target: "flex::tree", "[TREE-REMOVE] owner={owner:?} child={child:?}");
        self.mark_dirty_and_propagate(owner);
        Ok(())
    }

    /// Detach every child of `owner`.
    pub fn remove_all_children(&mut self, owner: NodeId) {
        let children = self.child_list(owner);
        if children.is_empty() {
            return;
        }
        for child in children {
            child.detach(&mut self.arena);
            self.data_mut(child).layout = Layout::default();
        }
        self.mark_dirty_and_propagate(owner);
    }

    /// Release a detached, childless node. The handle must not be used again.
    ///
    /// # Errors
    /// Fails while the node still has an owner or children.
    pub fn free_node(&mut self, node: NodeId) -> Result<()> {
        self.ensure_detached(node)?;
        node.remove(&mut self.arena);
        Ok(())
    }

    /// Detach `node` from its owner and release it with its whole subtree.
    pub fn free_subtree(&mut self, node: NodeId) {
        if let Some(owner) = self.parent(node) {
            node.detach(&mut self.arena);
            self.mark_dirty_and_propagate(owner);
        }
        node.remove_subtree(&mut self.arena);
    }

    fn ensure_detached(&self, node: NodeId) -> Result<()> {
        if self.child_count(node) > 0 {
            return Err(LayoutError::ResetWithChildren { node });
        }
        if self.parent(node).is_some() {
            return Err(LayoutError::ResetWithOwner { node });
        }
        Ok(())
    }

    /// Return a detached node to its freshly created state, keeping its config.
    ///
    /// # Errors
    /// Fails while the node still has children or an owner.
    pub fn reset(&mut self, node: NodeId) -> Result<()> {
        self.ensure_detached(node)?;
        let data = self.data_mut(node);
        *data = NodeData::new(Rc::clone(&data.config));
        Ok(())
    }

    /// Recursively copy `node` with its style, layout and callbacks. Every
    /// copied node gets its own copy of the config.
    pub fn deep_clone(&mut self, node: NodeId) -> NodeId {
        let mut data = self.data(node).clone();
        data.config = Rc::new(Config::clone(&data.config));
        let copy = self.arena.new_node(data);
        for child in self.child_list(node) {
            let child_copy = self.deep_clone(child);
            copy.append(child_copy, &mut self.arena);
        }
        copy
    }

    /// Copy the whole style of `src` onto `dst`, dirtying `dst` if it changed.
    pub fn copy_style(&mut self, dst: NodeId, src: NodeId) {
        let style = self.data(src).style.clone();
        self.set_style(dst, style);
    }

    pub fn style(&self, node: NodeId) -> &Style {
        &self.data(node).style
    }

    /// Replace the whole style of `node`, dirtying it if anything changed.
    pub fn set_style(&mut self, node: NodeId, style: Style) {
        if self.data(node).style != style {
            self.data_mut(node).style = style;
            self.mark_dirty_and_propagate(node);
        }
    }

    // Callbacks and host data

    /// Install or clear the measure function. A node with a measure function is
    /// a text leaf.
    ///
    /// # Errors
    /// Fails when installing on a node that has children.
    pub fn set_measure_func(&mut self, node: NodeId, measure: Option<MeasureFunc>) -> Result<()> {
        if measure.is_some() && self.child_count(node) > 0 {
            return Err(LayoutError::NodeHasChildren { node });
        }
        let data = self.data_mut(node);
        data.node_type = if measure.is_some() {
            NodeType::Text
        } else {
            NodeType::Default
        };
        data.measure = measure;
        Ok(())
    }

    pub fn set_baseline_func(&mut self, node: NodeId, baseline: Option<BaselineFunc>) {
        self.data_mut(node).baseline = baseline;
    }

    pub fn set_dirtied_func(&mut self, node: NodeId, dirtied: Option<DirtiedFunc>) {
        self.data_mut(node).dirtied = dirtied;
    }

    pub fn has_measure_func(&self, node: NodeId) -> bool {
        self.data(node).measure.is_some()
    }

    pub fn has_baseline_func(&self, node: NodeId) -> bool {
        self.data(node).baseline.is_some()
    }

    pub fn node_type(&self, node: NodeId) -> NodeType {
        self.data(node).node_type
    }

    /// Attach an arbitrary host value to `node`, replacing any previous one.
    pub fn set_context<T: Any>(&mut self, node: NodeId, context: T) {
        self.data_mut(node).context = Some(Rc::new(context));
    }

    pub fn clear_context(&mut self, node: NodeId) {
        self.data_mut(node).context = None;
    }

    /// Host value attached to `node`, if it has type `T`.
    pub fn context<T: Any>(&self, node: NodeId) -> Option<&T> {
        self.data(node)
            .context
            .as_deref()
            .and_then(|context| context.downcast_ref::<T>())
    }

    // Dirty state

    pub fn is_dirty(&self, node: NodeId) -> bool {
        self.data(node).is_dirty
    }

    /// Force `node` and its ancestors to be laid out again, e.g. after the
    /// content behind a measure function changed.
    pub fn mark_dirty(&mut self, node: NodeId) {
        self.mark_dirty_and_propagate(node);
    }

    /// Dirty `node` and walk up until an already dirty ancestor is found.
    pub(crate) fn mark_dirty_and_propagate(&mut self, node: NodeId) {
        let mut current = Some(node);
        while let Some(id) = current {
            let data = self.data_mut(id);
            if data.is_dirty {
                break;
            }
            data.is_dirty = true;
            data.layout.computed_flex_basis = None;
            let dirtied = data.dirtied.clone();
            trace!(target: "flex::tree", "[TREE-DIRTY] node={id:?}");
            if let Some(callback) = dirtied {
                callback(id);
            }
            current = self.parent(id);
        }
    }

    /// Dirty every node of the subtree rooted at `node`.
    pub(crate) fn mark_dirty_downwards(&mut self, node: NodeId) {
        let descendants: ChildList = node.descendants(&self.arena).collect();
        for id in descendants {
            self.data_mut(id).is_dirty = true;
        }
    }

    pub fn has_new_layout(&self, node: NodeId) -> bool {
        self.data(node).has_new_layout
    }

    pub fn set_has_new_layout(&mut self, node: NodeId, has_new_layout: bool) {
        self.data_mut(node).has_new_layout = has_new_layout;
    }

    /// Acknowledge the current layout of `node`.
    pub fn mark_layout_seen(&mut self, node: NodeId) {
        self.set_has_new_layout(node, false);
    }

    /// Set the legacy stretch flag on the config of every node in the subtree.
    pub(crate) fn set_use_legacy_flag_recursively(&mut self, node: NodeId, enabled: bool) {
        let descendants: ChildList = node.descendants(&self.arena).collect();
        for id in descendants {
            let config = &mut self.data_mut(id).config;
            if config.use_legacy_stretch_behaviour != enabled {
                Rc::make_mut(config).use_legacy_stretch_behaviour = enabled;
            }
        }
        debug!(target: "flex::tree", "[TREE-LEGACY] root={node:?} enabled={enabled}");
    }

    /// Whether any node of the subtree fell back on legacy stretch sizing.
    pub(crate) fn did_use_legacy_flag(&self, node: NodeId) -> bool {
        node.descendants(&self.arena)
            .any(|id| self.data(id).layout.did_use_legacy_flag)
    }

    /// Structural and geometric equality of two subtrees' layouts.
    pub(crate) fn is_layout_tree_equal(&self, lhs: NodeId, rhs: NodeId) -> bool {
        if !self.data(lhs).layout.same_geometry(&self.data(rhs).layout) {
            return false;
        }
        let lhs_children = self.child_list(lhs);
        let rhs_children = self.child_list(rhs);
        lhs_children.len() == rhs_children.len()
            && lhs_children
                .iter()
                .zip(rhs_children.iter())
                .all(|(left, right)| self.is_layout_tree_equal(*left, *right))
    }
}
