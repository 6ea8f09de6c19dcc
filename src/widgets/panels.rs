//! Panels: a keyed stack of full-size pages.

use crate::dom::NodeId;
use crate::error::{Error, Result};
use crate::event::AppHandle;
use crate::geometry::Region;
use crate::render::strip::Strip;
use crate::render::style::Style;
use crate::widget::{Callback, EventCtx, Primitive};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Panel {
    key: String,
    node: NodeId,
    visible: bool,
}

/// Pages stacked on top of each other, each filling the whole content area.
///
/// Every visible page is drawn, later pages on top; the last visible page is
/// the front page and receives focus when the stack does. Keys are unique: a
/// page added under an existing key takes over that entry's position.
#[derive(Debug, Default)]
pub struct Panels {
    panels: Vec<Panel>,
    pending_change: bool,
    changed: Callback<()>,
}

impl Panels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Node shown under `key`.
    pub fn panel(&self, key: &str) -> Option<NodeId> {
        self.find(key).map(|i| self.panels[i].node)
    }

    pub fn has_panel(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    /// Keys in stacking order, bottom first.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.panels.iter().map(|p| p.key.as_str())
    }

    pub fn is_visible(&self, key: &str) -> Option<bool> {
        self.find(key).map(|i| self.panels[i].visible)
    }

    /// Key of the topmost visible page.
    pub fn front_panel(&self) -> Option<&str> {
        self.panels.iter().rev().find(|p| p.visible).map(|p| p.key.as_str())
    }

    /// Show only the page under `key`.
    pub fn set_current_panel(&mut self, key: &str) -> Result<()> {
        let index = self.require(key)?;
        for (i, panel) in self.panels.iter_mut().enumerate() {
            panel.visible = i == index;
        }
        self.pending_change = true;
        Ok(())
    }

    pub fn show_panel(&mut self, key: &str) -> Result<()> {
        let index = self.require(key)?;
        self.panels[index].visible = true;
        self.pending_change = true;
        Ok(())
    }

    pub fn hide_panel(&mut self, key: &str) -> Result<()> {
        let index = self.require(key)?;
        self.panels[index].visible = false;
        self.pending_change = true;
        Ok(())
    }

    /// Move the page under `key` to the top of the stack.
    pub fn send_to_front(&mut self, key: &str) -> Result<()> {
        let index = self.require(key)?;
        let panel = self.panels.remove(index);
        self.panels.push(panel);
        self.pending_change = true;
        Ok(())
    }

    /// Move the page under `key` to the bottom of the stack.
    pub fn send_to_back(&mut self, key: &str) -> Result<()> {
        let index = self.require(key)?;
        let panel = self.panels.remove(index);
        self.panels.insert(0, panel);
        self.pending_change = true;
        Ok(())
    }

    /// Fired on the loop thread after the shown set of pages changes.
    pub fn set_changed_func(&mut self, f: impl FnMut(&AppHandle, ()) + 'static) -> &mut Self {
        self.changed.set(f);
        self
    }

    /// Insert or replace the entry under `key`. A replaced entry keeps its
    /// position and stays visible if it was; returns the replaced node.
    pub(crate) fn upsert(&mut self, key: String, node: NodeId, visible: bool) -> Option<NodeId> {
        self.pending_change = true;
        match self.find(&key) {
            Some(index) => {
                let entry = &mut self.panels[index];
                let old = std::mem::replace(&mut entry.node, node);
                entry.visible = entry.visible || visible;
                Some(old)
            }
            None => {
                self.panels.push(Panel { key, node, visible });
                None
            }
        }
    }

    pub(crate) fn take_panel(&mut self, key: &str) -> Result<NodeId> {
        let index = self.require(key)?;
        self.pending_change = true;
        Ok(self.panels.remove(index).node)
    }

    fn find(&self, key: &str) -> Option<usize> {
        self.panels.iter().position(|p| p.key == key)
    }

    fn require(&self, key: &str) -> Result<usize> {
        self.find(key).ok_or_else(|| Error::UnknownKey(key.to_string()))
    }
}

impl Primitive for Panels {
    fn kind(&self) -> &'static str {
        "Panels"
    }

    fn draw(&self, _region: Region, _style: &Style, _focused: bool) -> Vec<Strip> {
        Vec::new()
    }

    fn children(&self) -> Vec<NodeId> {
        self.panels.iter().map(|p| p.node).collect()
    }

    fn shown_children(&self) -> Vec<NodeId> {
        self.panels.iter().filter(|p| p.visible).map(|p| p.node).collect()
    }

    fn focus_candidates(&self) -> Vec<NodeId> {
        self.panels.iter().rev().filter(|p| p.visible).map(|p| p.node).collect()
    }

    fn layout_children(&self, inner: Region, visible: &dyn Fn(NodeId) -> bool) -> Vec<(NodeId, Region)> {
        self.panels
            .iter()
            .filter(|p| p.visible && visible(p.node))
            .map(|p| (p.node, inner))
            .collect()
    }

    fn release_child(&mut self, child: NodeId) {
        let before = self.panels.len();
        self.panels.retain(|p| p.node != child);
        if self.panels.len() != before {
            self.pending_change = true;
        }
    }

    fn notify_changes(&mut self, ctx: &EventCtx<'_>) -> bool {
        if !std::mem::take(&mut self.pending_change) {
            return false;
        }
        self.changed.call(ctx.handle, ())
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::dom::Dom;
    use crate::testing::test_handle;
    use crate::widgets::Button;

    fn stack(n: usize) -> (Dom, NodeId, Vec<NodeId>) {
        let mut dom = Dom::new();
        let panels = dom.insert(Panels::new());
        let ids: Vec<_> = (0..n).map(|i| dom.insert(Button::new(format!("b{i}")))).collect();
        for (i, id) in ids.iter().enumerate() {
            dom.add_panel(panels, format!("p{i}"), *id, true).unwrap();
        }
        (dom, panels, ids)
    }

    #[test]
    fn front_panel_is_last_visible() {
        let (mut dom, panels, ids) = stack(3);
        let stack = dom.widget_mut::<Panels>(panels).unwrap();
        assert_eq!(stack.front_panel(), Some("p2"));
        assert_eq!(stack.focus_candidates(), vec![ids[2], ids[1], ids[0]]);

        stack.hide_panel("p2").unwrap();
        assert_eq!(stack.front_panel(), Some("p1"));
        stack.send_to_front("p0").unwrap();
        assert_eq!(stack.front_panel(), Some("p0"));
        assert_eq!(stack.keys().collect::<Vec<_>>(), vec!["p1", "p2", "p0"]);
    }

    #[test]
    fn set_current_shows_exactly_one() {
        let (mut dom, panels, ids) = stack(3);
        let stack = dom.widget_mut::<Panels>(panels).unwrap();
        stack.set_current_panel("p1").unwrap();
        assert_eq!(stack.shown_children(), vec![ids[1]]);
        assert_eq!(stack.children().len(), 3);
        assert!(matches!(stack.set_current_panel("nope"), Err(Error::UnknownKey(_))));
        assert_eq!(stack.shown_children(), vec![ids[1]]);
    }

    #[test]
    fn visible_pages_fill_content_area() {
        let (mut dom, panels, ids) = stack(2);
        dom.widget_mut::<Panels>(panels).unwrap().hide_panel("p0").unwrap();
        let inner = Region::new(1, 1, 20, 8);
        let placed = dom.widget::<Panels>(panels).unwrap().layout_children(inner, &|_| true);
        assert_eq!(placed, vec![(ids[1], inner)]);
    }

    #[test]
    fn changed_fires_once_per_batch() {
        let (mut dom, panels, _) = stack(2);
        let hits = Rc::new(Cell::new(0));
        let sink = Rc::clone(&hits);
        let handle = test_handle();
        let ctx = EventCtx { handle: &handle, node: panels };

        let stack = dom.widget_mut::<Panels>(panels).unwrap();
        stack.set_changed_func(move |_, ()| sink.set(sink.get() + 1));
        stack.set_current_panel("p0").unwrap();
        stack.show_panel("p1").unwrap();
        assert!(stack.notify_changes(&ctx));
        assert!(!stack.notify_changes(&ctx));
        assert_eq!(hits.get(), 1);
    }
}
