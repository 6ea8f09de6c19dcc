//! WindowManager: freely positioned, overlapping windows.

use crate::dom::NodeId;
use crate::error::{check_index, Error, Result};
use crate::event::{MouseAction, MouseBtn, MouseEvent};
use crate::geometry::{Offset, Region};
use crate::render::strip::Strip;
use crate::render::style::Style;
use crate::widget::{EventCtx, EventResult, Primitive};

/// Windows at explicit rectangles relative to the content area. The last
/// window is on top and is the first focus candidate.
#[derive(Debug, Default)]
pub struct WindowManager {
    windows: Vec<(NodeId, Region)>,
}

impl WindowManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    /// Node and rectangle of window `index`, bottom first.
    pub fn window(&self, index: usize) -> Option<(NodeId, Region)> {
        self.windows.get(index).copied()
    }

    pub fn topmost(&self) -> Option<NodeId> {
        self.windows.last().map(|(id, _)| *id)
    }

    pub fn bring_to_front(&mut self, node: NodeId) -> Result<()> {
        let index = self.position(node)?;
        let window = self.windows.remove(index);
        self.windows.push(window);
        Ok(())
    }

    pub fn set_window_rect(&mut self, node: NodeId, rect: Region) -> Result<()> {
        let index = self.position(node)?;
        self.windows[index].1 = rect;
        Ok(())
    }

    pub(crate) fn push_window(&mut self, node: NodeId, rect: Region) {
        self.windows.push((node, rect));
    }

    pub(crate) fn take_window(&mut self, index: usize) -> Result<NodeId> {
        check_index(index, self.windows.len())?;
        Ok(self.windows.remove(index).0)
    }

    fn position(&self, node: NodeId) -> Result<usize> {
        self.windows.iter().position(|(id, _)| *id == node).ok_or(Error::UnknownNode(node))
    }
}

impl Primitive for WindowManager {
    fn kind(&self) -> &'static str {
        "WindowManager"
    }

    fn draw(&self, _region: Region, _style: &Style, _focused: bool) -> Vec<Strip> {
        Vec::new()
    }

    /// A click on a window raises it; the click itself is left for the
    /// window's own widgets.
    fn handle_mouse(&mut self, mouse: MouseEvent, local: Offset, _ctx: &EventCtx<'_>) -> EventResult {
        if mouse.kind != MouseAction::Down(MouseBtn::Left) {
            return EventResult::Ignored;
        }
        let hit = self.windows.iter().rev().find(|(_, rect)| rect.contains(local.x, local.y)).map(|(id, _)| *id);
        if let Some(node) = hit {
            if self.topmost() != Some(node) {
                // Known to be present.
                let _ = self.bring_to_front(node);
            }
        }
        EventResult::Ignored
    }

    fn children(&self) -> Vec<NodeId> {
        self.windows.iter().map(|(id, _)| *id).collect()
    }

    fn focus_candidates(&self) -> Vec<NodeId> {
        self.windows.iter().rev().map(|(id, _)| *id).collect()
    }

    fn layout_children(&self, inner: Region, visible: &dyn Fn(NodeId) -> bool) -> Vec<(NodeId, Region)> {
        self.windows
            .iter()
            .filter(|(id, _)| visible(*id))
            .map(|(id, rect)| (*id, rect.translate(inner.offset()).intersection(inner)))
            .collect()
    }

    fn release_child(&mut self, child: NodeId) {
        self.windows.retain(|(id, _)| *id != child);
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::dom::Dom;
    use crate::testing::test_handle;
    use crate::widgets::Button;

    fn two_windows() -> (Dom, NodeId, NodeId, NodeId) {
        let mut dom = Dom::new();
        let wm = dom.insert(WindowManager::new());
        let a = dom.insert(Button::new("a"));
        let b = dom.insert(Button::new("b"));
        dom.add_window(wm, a, Region::new(0, 0, 10, 5)).unwrap();
        dom.add_window(wm, b, Region::new(5, 2, 10, 5)).unwrap();
        (dom, wm, a, b)
    }

    #[test]
    fn windows_are_offset_and_clipped() {
        let (dom, wm, a, b) = two_windows();
        let placed = dom.widget::<WindowManager>(wm).unwrap().layout_children(Region::new(1, 1, 12, 6), &|_| true);
        assert_eq!(placed, vec![(a, Region::new(1, 1, 10, 5)), (b, Region::new(6, 3, 7, 4))]);
    }

    #[test]
    fn topmost_window_is_first_focus_candidate() {
        let (mut dom, wm, a, b) = two_windows();
        assert_eq!(dom.default_focus(wm), Some(b));
        dom.widget_mut::<WindowManager>(wm).unwrap().bring_to_front(a).unwrap();
        assert_eq!(dom.default_focus(wm), Some(a));
    }

    #[test]
    fn click_raises_window_under_pointer() {
        let (mut dom, wm, a, _) = two_windows();
        let handle = test_handle();
        let ctx = EventCtx { handle: &handle, node: wm };
        let manager = dom.widget_mut::<WindowManager>(wm).unwrap();
        let result = manager.handle_mouse(MouseEvent::click(1, 1), Offset::new(1, 1), &ctx);
        assert_eq!(result, EventResult::Ignored);
        assert_eq!(manager.topmost(), Some(a));
    }
}
