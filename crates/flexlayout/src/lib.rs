//! Flexbox layout engine: style trees in, pixel rectangles out.
//!
//! The engine solves a subset of CSS3 Flexible Box Layout over a tree of
//! style nodes. Hosts build the tree through [`LayoutTree`], mutate styles
//! (which propagates a dirty bit to the root), call
//! [`LayoutTree::calculate_layout`], then read per-node rectangles back out
//! of [`Layout`] and acknowledge them with
//! [`LayoutTree::mark_layout_seen`].
//!
//! Nodes live in a tree-owned arena and are addressed by copyable
//! [`NodeKey`] handles, so parent links never form ownership cycles. All
//! numeric inputs default to an undefined sentinel (`NaN`) meaning "auto";
//! see [`layout::number`].

use log::{debug, trace};

pub mod error;
pub mod layout;
mod printing;

pub use error::{LayoutError, Result};
pub use layout::geometry::{CachedLayout, Dimension, Layout, MeasureOutput, PhysicalEdge};
pub use layout::number::{is_defined, is_undefined, UNDEFINED};
pub use layout::spacing::{Spacing, SpacingType};
pub use layout::style::{
    Align, Direction, FlexDirection, FlexWrap, Justify, Offsets, PositionType, Style,
};
pub use layout::LayoutContext;

/// Handle to a node inside a [`LayoutTree`] arena.
///
/// Keys are issued by the tree that owns the node and are only meaningful
/// against that tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey(u32);

/// Where a node sits in the dirty/seen protocol.
///
/// Any input mutation moves the node (and its ancestors) to `Dirty`; a solve
/// moves every visited node to `HasNewLayout`; the host acknowledges each
/// consumed result with [`LayoutTree::mark_layout_seen`], reaching
/// `UpToDate`. Mutating a node whose new layout was never seen is an error,
/// so unconsumed results cannot be silently lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutState {
    Dirty,
    HasNewLayout,
    UpToDate,
}

/// Leaf content sizer: receives the available width (possibly undefined for
/// "unconstrained") and writes an intrinsic size into the caller-owned
/// [`MeasureOutput`]. Either output may be left undefined.
pub type MeasureFunc = Box<dyn FnMut(f32, &mut MeasureOutput)>;

struct Node {
    style: Style,
    layout: Layout,
    cached: CachedLayout,
    parent: Option<NodeKey>,
    children: Vec<NodeKey>,
    measure: Option<MeasureFunc>,
    state: LayoutState,
}

impl Node {
    fn detached() -> Self {
        Self {
            style: Style::default(),
            layout: Layout::default(),
            cached: CachedLayout::default(),
            parent: None,
            children: Vec::new(),
            measure: None,
            state: LayoutState::Dirty,
        }
    }
}

/// Arena-owned node tree plus the layout entry points.
///
/// The `&mut self` receiver on every mutator and on `calculate_layout` makes
/// the engine's single-threaded contract a compile-time guarantee: the tree
/// cannot be mutated while a solve is running.
#[derive(Default)]
pub struct LayoutTree {
    nodes: Vec<Node>,
}

impl LayoutTree {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Create a detached node with default style, in the `Dirty` state.
    pub fn new_node(&mut self) -> NodeKey {
        let key = NodeKey(self.nodes.len() as u32);
        self.nodes.push(Node::detached());
        key
    }

    fn node(&self, key: NodeKey) -> &Node {
        &self.nodes[key.0 as usize]
    }

    fn node_mut(&mut self, key: NodeKey) -> &mut Node {
        &mut self.nodes[key.0 as usize]
    }

    // ---- tree structure ------------------------------------------------

    pub fn parent(&self, key: NodeKey) -> Option<NodeKey> {
        self.node(key).parent
    }

    pub fn child_count(&self, key: NodeKey) -> usize {
        self.node(key).children.len()
    }

    pub fn child(&self, key: NodeKey, index: usize) -> Option<NodeKey> {
        self.node(key).children.get(index).copied()
    }

    pub fn children(&self, key: NodeKey) -> &[NodeKey] {
        &self.node(key).children
    }

    /// Position of `child` in `parent`'s child list, if it is listed there.
    pub fn index_of(&self, parent: NodeKey, child: NodeKey) -> Option<usize> {
        self.node(parent).children.iter().position(|&c| c == child)
    }

    /// Keys of every node that currently has no parent, in creation order.
    pub fn roots(&self) -> impl Iterator<Item = NodeKey> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.parent.is_none())
            .map(|(index, _)| NodeKey(index as u32))
    }

    /// Insert `child` into `parent`'s child list at `index`, shifting later
    /// children right. The child must be detached.
    pub fn insert_child(&mut self, parent: NodeKey, index: usize, child: NodeKey) -> Result<()> {
        if self.node(child).parent.is_some() {
            return Err(LayoutError::TreeStructure {
                node: child,
                message: "child already has a parent, it must be removed first",
            });
        }
        if index > self.node(parent).children.len() {
            return Err(LayoutError::TreeStructure {
                node: parent,
                message: "insertion index is out of bounds",
            });
        }
        // Attaching an ancestor under its own descendant would close a cycle
        // and dirty propagation would never terminate.
        let mut ancestor = Some(parent);
        while let Some(current) = ancestor {
            if current == child {
                return Err(LayoutError::TreeStructure {
                    node: child,
                    message: "inserting a node under its own descendant",
                });
            }
            ancestor = self.node(current).parent;
        }
        self.dirty(parent)?;
        trace!("insert_child parent={:?} index={} child={:?}", parent, index, child);
        self.node_mut(parent).children.insert(index, child);
        self.node_mut(child).parent = Some(parent);
        Ok(())
    }

    /// Append `child` at the end of `parent`'s child list.
    pub fn add_child(&mut self, parent: NodeKey, child: NodeKey) -> Result<()> {
        self.insert_child(parent, self.child_count(parent), child)
    }

    /// Detach and return the child at `index`. The node itself stays alive
    /// in the arena and may be re-inserted elsewhere.
    pub fn remove_child_at(&mut self, parent: NodeKey, index: usize) -> Result<NodeKey> {
        if index >= self.node(parent).children.len() {
            return Err(LayoutError::TreeStructure {
                node: parent,
                message: "removal index is out of bounds",
            });
        }
        self.dirty(parent)?;
        let child = self.node_mut(parent).children.remove(index);
        trace!("remove_child_at parent={:?} index={} child={:?}", parent, index, child);
        self.node_mut(child).parent = None;
        Ok(child)
    }

    /// Detach `child` from its recorded parent.
    pub fn remove_self(&mut self, child: NodeKey) -> Result<()> {
        let parent = self.node(child).parent.ok_or(LayoutError::TreeStructure {
            node: child,
            message: "node has no parent to detach from",
        })?;
        let index = self.index_of(parent, child).ok_or(LayoutError::TreeStructure {
            node: child,
            message: "recorded parent does not list the child",
        })?;
        self.remove_child_at(parent, index)?;
        Ok(())
    }

    // ---- style ---------------------------------------------------------

    pub fn style(&self, key: NodeKey) -> &Style {
        &self.node(key).style
    }

    /// Replace the node's style. A no-op (no dirtying) when the new style is
    /// tolerantly equal to the current one.
    pub fn set_style(&mut self, key: NodeKey, style: Style) -> Result<()> {
        if self.node(key).style.approx_eq(&style) {
            return Ok(());
        }
        self.dirty(key)?;
        self.node_mut(key).style = style;
        Ok(())
    }

    /// Mutate the node's style in place through `f`, with the same
    /// idempotence guarantee as [`set_style`](Self::set_style).
    pub fn update_style<F>(&mut self, key: NodeKey, f: F) -> Result<()>
    where
        F: FnOnce(&mut Style),
    {
        let mut style = self.node(key).style.clone();
        f(&mut style);
        self.set_style(key, style)
    }

    // ---- measurement ---------------------------------------------------

    /// Install or clear the leaf measure callback. Always dirties the node;
    /// callbacks cannot be compared for equality.
    pub fn set_measure(&mut self, key: NodeKey, measure: Option<MeasureFunc>) -> Result<()> {
        self.dirty(key)?;
        self.node_mut(key).measure = measure;
        Ok(())
    }

    pub fn is_measure_defined(&self, key: NodeKey) -> bool {
        self.node(key).measure.is_some()
    }

    /// Run the node's measure callback through the context-owned scratch.
    pub(crate) fn invoke_measure(
        &mut self,
        ctx: &mut LayoutContext,
        key: NodeKey,
        available_width: f32,
    ) -> Result<()> {
        let node = self.node_mut(key);
        let measure = node
            .measure
            .as_mut()
            .ok_or(LayoutError::MeasureNotDefined { node: key })?;
        ctx.measure_output.reset();
        measure(available_width, &mut ctx.measure_output);
        Ok(())
    }

    // ---- dirty/seen protocol -------------------------------------------

    pub fn is_dirty(&self, key: NodeKey) -> bool {
        self.node(key).state == LayoutState::Dirty
    }

    pub fn has_new_layout(&self, key: NodeKey) -> bool {
        self.node(key).state == LayoutState::HasNewLayout
    }

    /// Host-driven invalidation, e.g. when measure-callback inputs changed
    /// behind the engine's back.
    pub fn mark_dirty(&mut self, key: NodeKey) -> Result<()> {
        self.dirty(key)
    }

    /// Acknowledge a computed layout, moving the node to `UpToDate`.
    pub fn mark_layout_seen(&mut self, key: NodeKey) -> Result<()> {
        if self.node(key).state != LayoutState::HasNewLayout {
            return Err(LayoutError::ProtocolMisuse {
                node: key,
                message: "mark_layout_seen without a new layout pending",
            });
        }
        self.node_mut(key).state = LayoutState::UpToDate;
        Ok(())
    }

    /// Set `Dirty` on the node and every ancestor. Stops early at an already
    /// dirty node: the monotonicity invariant guarantees its ancestors are
    /// dirty too.
    fn dirty(&mut self, key: NodeKey) -> Result<()> {
        let mut current = Some(key);
        while let Some(node_key) = current {
            let node = self.node_mut(node_key);
            match node.state {
                LayoutState::Dirty => return Ok(()),
                LayoutState::HasNewLayout => {
                    return Err(LayoutError::ProtocolMisuse {
                        node: node_key,
                        message: "previous layout was never seen, mark_layout_seen must run first",
                    });
                }
                LayoutState::UpToDate => {
                    node.state = LayoutState::Dirty;
                    current = node.parent;
                }
            }
        }
        Ok(())
    }

    pub(crate) fn mark_has_new_layout(&mut self, key: NodeKey) {
        self.node_mut(key).state = LayoutState::HasNewLayout;
    }

    // ---- layout --------------------------------------------------------

    pub fn layout(&self, key: NodeKey) -> &Layout {
        &self.node(key).layout
    }

    pub(crate) fn layout_mut(&mut self, key: NodeKey) -> &mut Layout {
        &mut self.node_mut(key).layout
    }

    pub(crate) fn cached(&self, key: NodeKey) -> &CachedLayout {
        &self.node(key).cached
    }

    pub(crate) fn cached_mut(&mut self, key: NodeKey) -> &mut CachedLayout {
        &mut self.node_mut(key).cached
    }

    /// Solve layout for the subtree rooted at `key`.
    ///
    /// Runs synchronously to completion. Nodes whose inputs are unchanged
    /// since the last solve are reused from their cache; every visited node
    /// ends in `HasNewLayout`.
    pub fn calculate_layout(&mut self, key: NodeKey) -> Result<()> {
        debug!("layout pass starting at {:?}", key);
        self.node_mut(key).layout.reset_result();
        let mut ctx = LayoutContext::default();
        self.layout_node(&mut ctx, key, UNDEFINED, None)?;
        trace!(
            "layout pass done at {:?}: {}x{}",
            key,
            self.node(key).layout.width(),
            self.node(key).layout.height()
        );
        Ok(())
    }
}
