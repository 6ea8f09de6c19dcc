//! The composition graph arena: insert, attach/detach, walk, focus queries.

use slotmap::{SecondaryMap, SlotMap};

use super::node::{NodeData, NodeId};
use crate::error::{Error, Result};
use crate::widget::{Primitive, Widget, WidgetKind};

/// All widget nodes of an application, backed by a slotmap arena.
///
/// Ordered children are owned by the container widgets themselves (their
/// per-child layout metadata); the arena only keeps the parent map so that
/// the one-parent and no-cycle rules can be checked in O(depth).
#[derive(Debug, Default)]
pub struct Dom {
    nodes: SlotMap<NodeId, NodeData>,
    parent: SecondaryMap<NodeId, NodeId>,
}

impl Dom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a detached node holding `widget` with default attributes.
    pub fn insert(&mut self, widget: impl Into<Widget>) -> NodeId {
        self.insert_with(NodeData::new(widget))
    }

    /// Add a detached node with fully specified attributes.
    pub fn insert_with(&mut self, data: NodeData) -> NodeId {
        self.nodes.insert(data)
    }

    /// Destroy a node and its whole subtree.
    ///
    /// The node is first detached from its parent container. Returns the
    /// node's data, or `None` if it did not exist.
    pub fn remove(&mut self, id: NodeId) -> Option<NodeData> {
        if !self.nodes.contains_key(id) {
            return None;
        }
        // Detach cannot fail for a live node.
        let _ = self.detach(id);

        let mut stack = vec![id];
        let mut removed = None;
        while let Some(current) = stack.pop() {
            self.parent.remove(current);
            if let Some(data) = self.nodes.remove(current) {
                stack.extend(data.widget.as_primitive().children());
                if current == id {
                    removed = Some(data);
                }
            }
        }
        removed
    }

    pub fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(id)
    }

    /// Node data or [`Error::UnknownNode`].
    pub fn node(&self, id: NodeId) -> Result<&NodeData> {
        self.nodes.get(id).ok_or(Error::UnknownNode(id))
    }

    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut NodeData> {
        self.nodes.get_mut(id).ok_or(Error::UnknownNode(id))
    }

    /// The widget at `id` as its concrete type.
    pub fn widget<T: WidgetKind>(&self, id: NodeId) -> Result<&T> {
        let widget = &self.node(id)?.widget;
        T::from_widget(widget).ok_or(Error::WrongKind { expected: T::KIND, found: widget.kind() })
    }

    pub fn widget_mut<T: WidgetKind>(&mut self, id: NodeId) -> Result<&mut T> {
        let widget = &mut self.node_mut(id)?.widget;
        let found = widget.kind();
        T::from_widget_mut(widget).ok_or(Error::WrongKind { expected: T::KIND, found })
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate mutably over every node.
    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (NodeId, &mut NodeData)> {
        self.nodes.iter_mut()
    }

    // -----------------------------------------------------------------------
    // Tree shape
    // -----------------------------------------------------------------------

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parent.get(id).copied()
    }

    /// Children of `id` in container order; empty for leaves and unknown ids.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(id)
            .map(|n| n.widget.as_primitive().children())
            .unwrap_or_default()
    }

    /// Ancestors of `id`, nearest first. Does not include `id`.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(p) = self.parent.get(current).copied() {
            result.push(p);
            current = p;
        }
        result
    }

    /// Whether `ancestor` lies on the parent chain of `id` (or is `id`).
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, id: NodeId) -> bool {
        id == ancestor || self.ancestors(id).contains(&ancestor)
    }

    /// Check that `child` may be placed under `parent`.
    pub(crate) fn check_attach(&self, parent: NodeId, child: NodeId) -> Result<()> {
        self.node(parent)?;
        self.node(child)?;
        if self.is_ancestor_or_self(child, parent) {
            return Err(Error::Cycle(child));
        }
        if self.parent.contains_key(child) {
            return Err(Error::AlreadyAttached(child));
        }
        Ok(())
    }

    /// Record `parent` as the parent of `child`. Call after `check_attach`
    /// and after the container recorded the child.
    pub(crate) fn link(&mut self, parent: NodeId, child: NodeId) {
        self.parent.insert(child, parent);
    }

    /// Forget the parent of `child` without touching container metadata.
    pub(crate) fn unlink(&mut self, child: NodeId) {
        self.parent.remove(child);
    }

    /// Detach `id` from its parent container, keeping the node alive so it
    /// can be attached elsewhere. Detaching a root-level node is a no-op.
    pub fn detach(&mut self, id: NodeId) -> Result<()> {
        self.node(id)?;
        if let Some(parent) = self.parent.remove(id) {
            if let Some(data) = self.nodes.get_mut(parent) {
                data.widget.as_primitive_mut().release_child(id);
            }
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Walks
    // -----------------------------------------------------------------------

    /// Every node under `root` (inclusive), depth-first pre-order.
    pub fn walk_depth_first(&self, root: NodeId) -> Vec<NodeId> {
        self.walk(root, |p| p.children(), false)
    }

    /// Nodes under `root` that are on screen: visible themselves and shown
    /// by their container.
    pub fn walk_displayed(&self, root: NodeId) -> Vec<NodeId> {
        self.walk(root, |p| p.shown_children(), true)
    }

    fn walk(&self, root: NodeId, children: impl Fn(&dyn Primitive) -> Vec<NodeId>, visible_only: bool) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(data) = self.nodes.get(id) else { continue };
            if visible_only && !data.visible {
                continue;
            }
            result.push(id);
            let kids = children(data.widget.as_primitive());
            stack.extend(kids.into_iter().rev());
        }
        result
    }

    /// Whether `id` is currently displayed as part of the tree under `root`.
    pub fn is_displayed(&self, root: NodeId, id: NodeId) -> bool {
        let mut current = id;
        loop {
            match self.nodes.get(current) {
                Some(data) if data.visible => {}
                _ => return false,
            }
            if current == root {
                return true;
            }
            let Some(parent) = self.parent(current) else { return false };
            let shown = self
                .nodes
                .get(parent)
                .map(|p| p.widget.as_primitive().shown_children().contains(&current))
                .unwrap_or(false);
            if !shown {
                return false;
            }
            current = parent;
        }
    }

    /// First node carrying `name`, searching the whole arena.
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|(_, data)| data.name.as_deref() == Some(name))
            .map(|(id, _)| id)
    }

    // -----------------------------------------------------------------------
    // Focus queries
    // -----------------------------------------------------------------------

    /// The node that should receive focus when `id` is asked to take it:
    /// `id` itself if it can hold focus, otherwise the first focusable node
    /// reached through the containers' focus candidates.
    pub fn default_focus(&self, id: NodeId) -> Option<NodeId> {
        let data = self.nodes.get(id)?;
        if !data.visible || data.disabled {
            return None;
        }
        if data.can_focus() {
            return Some(id);
        }
        data.widget
            .as_primitive()
            .focus_candidates()
            .into_iter()
            .find_map(|child| self.default_focus(child))
    }

    /// Displayed, focusable nodes under `root` in traversal order.
    pub fn focus_order(&self, root: NodeId) -> Vec<NodeId> {
        self.walk_displayed(root)
            .into_iter()
            .filter(|&id| self.nodes.get(id).map(NodeData::can_focus).unwrap_or(false))
            .collect()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
