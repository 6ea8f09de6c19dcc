//! Layout: assigns a screen region to every displayed node.
//!
//! Containers place their shown children inside their content region
//! ([`Primitive::layout_children`](crate::widget::Primitive::layout_children));
//! flex and grid containers delegate to the taffy solver in [`engine`].
//! The result also records paint order for hit testing.

pub mod engine;
pub mod spatial;

use std::collections::HashMap;

pub use engine::Direction;
pub use spatial::SpatialMap;

use crate::dom::{Dom, NodeId};
use crate::geometry::{Offset, Region};

/// Regions computed for one frame.
#[derive(Debug, Default, Clone)]
pub struct Layout {
    outer: HashMap<NodeId, Region>,
    inner: HashMap<NodeId, Region>,
    order: Vec<NodeId>,
    spatial: SpatialMap,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lay out the tree under `root` inside `area`.
    pub fn compute(dom: &Dom, root: NodeId, area: Region) -> Self {
        let mut layout = Self::new();
        layout.place(dom, root, area);
        layout
    }

    fn place(&mut self, dom: &Dom, id: NodeId, region: Region) {
        let Some(data) = dom.get(id) else { return };
        if !data.visible {
            return;
        }
        let inner = data.decoration.inner(region);
        self.outer.insert(id, region);
        self.inner.insert(id, inner);
        self.order.push(id);
        self.spatial.push(id, region);

        let visible = |child: NodeId| dom.get(child).is_some_and(|c| c.visible);
        for (child, child_region) in data.widget.as_primitive().layout_children(inner, &visible) {
            self.place(dom, child, child_region);
        }
    }

    /// Outer region (including border) of a displayed node.
    pub fn region(&self, id: NodeId) -> Option<Region> {
        self.outer.get(&id).copied()
    }

    /// Content region of a displayed node.
    pub fn inner(&self, id: NodeId) -> Option<Region> {
        self.inner.get(&id).copied()
    }

    /// Displayed nodes in paint order (parents before children).
    pub fn paint_order(&self) -> &[NodeId] {
        &self.order
    }

    /// Frontmost node under the point.
    pub fn hit_test(&self, x: i32, y: i32) -> Option<NodeId> {
        self.spatial.node_at(Offset::new(x, y))
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::dom::NodeData;
    use crate::widgets::{Button, Flex, FlexItem, Panels};

    #[test]
    fn nested_flex_with_border() {
        let mut dom = Dom::new();
        let root = dom.insert(Flex::row());
        let left = dom.insert_with(NodeData::new(Button::new("L")).with_border(true));
        let right = dom.insert(Button::new("R"));
        dom.add_item(root, left, FlexItem::fixed(10)).unwrap();
        dom.add_item(root, right, FlexItem::proportional(1)).unwrap();

        let layout = Layout::compute(&dom, root, Region::new(0, 0, 30, 5));
        assert_eq!(layout.region(root), Some(Region::new(0, 0, 30, 5)));
        assert_eq!(layout.region(left), Some(Region::new(0, 0, 10, 5)));
        assert_eq!(layout.inner(left), Some(Region::new(1, 1, 8, 3)));
        assert_eq!(layout.region(right), Some(Region::new(10, 0, 20, 5)));
        assert_eq!(layout.paint_order(), &[root, left, right]);
    }

    #[test]
    fn hidden_nodes_get_no_region() {
        let mut dom = Dom::new();
        let root = dom.insert(Flex::row());
        let shown = dom.insert(Button::new("a"));
        let hidden = dom.insert_with(NodeData::new(Button::new("b")).visible(false));
        dom.add_item(root, shown, FlexItem::proportional(1)).unwrap();
        dom.add_item(root, hidden, FlexItem::proportional(1)).unwrap();

        let layout = Layout::compute(&dom, root, Region::new(0, 0, 10, 1));
        assert_eq!(layout.region(shown), Some(Region::new(0, 0, 10, 1)));
        assert_eq!(layout.region(hidden), None);
    }

    #[test]
    fn hit_test_prefers_children() {
        let mut dom = Dom::new();
        let panels = dom.insert(Panels::new());
        let a = dom.insert(Button::new("a"));
        dom.add_panel(panels, "a", a, true).unwrap();

        let layout = Layout::compute(&dom, panels, Region::new(0, 0, 10, 3));
        assert_eq!(layout.hit_test(4, 1), Some(a));
        assert_eq!(layout.hit_test(40, 1), None);
    }
}
