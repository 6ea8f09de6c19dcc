//! TabbedPanels: keyed pages selected through a tab bar.

use crate::dom::NodeId;
use crate::error::{Error, Result};
use crate::event::{AppHandle, MouseAction, MouseBtn, MouseEvent};
use crate::geometry::{Offset, Region};
use crate::render::strip::Strip;
use crate::render::style::Style;
use crate::widget::{Callback, EventCtx, EventResult, Primitive};

const SEPARATOR: char = '│';

#[derive(Debug, Clone, PartialEq, Eq)]
struct Tab {
    key: String,
    label: String,
    node: NodeId,
}

/// A tab bar on the first row and the current tab's page below it.
///
/// The first tab added becomes current. Clicking a label switches to it.
#[derive(Debug, Default)]
pub struct TabbedPanels {
    tabs: Vec<Tab>,
    current: Option<usize>,
    pending_change: bool,
    changed: Callback<String>,
}

impl TabbedPanels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tab(&self, key: &str) -> Option<NodeId> {
        self.find(key).map(|i| self.tabs[i].node)
    }

    pub fn label(&self, key: &str) -> Option<&str> {
        self.find(key).map(|i| self.tabs[i].label.as_str())
    }

    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.tabs.iter().map(|t| t.key.as_str())
    }

    pub fn current_tab(&self) -> Option<&str> {
        self.current.map(|i| self.tabs[i].key.as_str())
    }

    pub fn set_current_tab(&mut self, key: &str) -> Result<()> {
        let index = self.find(key).ok_or_else(|| Error::UnknownKey(key.to_string()))?;
        self.select(index);
        Ok(())
    }

    pub fn set_tab_label(&mut self, key: &str, label: impl Into<String>) -> Result<()> {
        let index = self.find(key).ok_or_else(|| Error::UnknownKey(key.to_string()))?;
        self.tabs[index].label = label.into();
        Ok(())
    }

    /// Fired with the new current key after the selection changes.
    pub fn set_changed_func(&mut self, f: impl FnMut(&AppHandle, String) + 'static) -> &mut Self {
        self.changed.set(f);
        self
    }

    pub(crate) fn upsert(&mut self, key: String, label: String, node: NodeId) -> Option<NodeId> {
        match self.find(&key) {
            Some(index) => {
                let tab = &mut self.tabs[index];
                tab.label = label;
                Some(std::mem::replace(&mut tab.node, node))
            }
            None => {
                self.tabs.push(Tab { key, label, node });
                if self.current.is_none() {
                    self.select(self.tabs.len() - 1);
                }
                None
            }
        }
    }

    /// Remove the tab under `key`. Removing the current tab selects its
    /// right neighbour, or the left one when it was last.
    pub(crate) fn take_tab(&mut self, key: &str) -> Result<NodeId> {
        let index = self.find(key).ok_or_else(|| Error::UnknownKey(key.to_string()))?;
        let tab = self.tabs.remove(index);
        self.after_removal(index);
        Ok(tab.node)
    }

    fn after_removal(&mut self, index: usize) {
        match self.current {
            Some(_) if self.tabs.is_empty() => self.current = None,
            Some(c) if c == index => self.select(index.min(self.tabs.len() - 1)),
            Some(c) if c > index => self.current = Some(c - 1),
            _ => {}
        }
    }

    fn select(&mut self, index: usize) {
        if self.current != Some(index) {
            self.current = Some(index);
            self.pending_change = true;
        }
    }

    fn find(&self, key: &str) -> Option<usize> {
        self.tabs.iter().position(|t| t.key == key)
    }

    /// Column span `[start, end)` of each label on the tab bar.
    fn label_spans(&self) -> Vec<(i32, i32)> {
        let mut x = 0;
        self.tabs
            .iter()
            .map(|tab| {
                let start = x;
                let end = start + tab.label.chars().count() as i32 + 2;
                x = end + 1;
                (start, end)
            })
            .collect()
    }
}

impl Primitive for TabbedPanels {
    fn kind(&self) -> &'static str {
        "TabbedPanels"
    }

    fn draw(&self, region: Region, style: &Style, _focused: bool) -> Vec<Strip> {
        if region.is_empty() {
            return Vec::new();
        }
        let base = style.cell();
        let mut bar = Strip::new(region.y, region.x);
        for (i, tab) in self.tabs.iter().enumerate() {
            if i > 0 {
                bar.push(SEPARATOR, base);
            }
            let cell = if self.current == Some(i) { base.reverse() } else { base };
            bar.push_str(&format!(" {} ", tab.label), cell);
        }
        bar.fill(region.width, base);
        vec![bar]
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, local: Offset, _ctx: &EventCtx<'_>) -> EventResult {
        if mouse.kind != MouseAction::Down(MouseBtn::Left) || local.y != 0 {
            return EventResult::Ignored;
        }
        match self.label_spans().iter().position(|&(start, end)| local.x >= start && local.x < end) {
            Some(index) => {
                self.select(index);
                EventResult::Consumed
            }
            None => EventResult::Ignored,
        }
    }

    fn children(&self) -> Vec<NodeId> {
        self.tabs.iter().map(|t| t.node).collect()
    }

    fn shown_children(&self) -> Vec<NodeId> {
        self.current.map(|i| self.tabs[i].node).into_iter().collect()
    }

    fn layout_children(&self, inner: Region, visible: &dyn Fn(NodeId) -> bool) -> Vec<(NodeId, Region)> {
        let (_, page) = inner.split_horizontal(1);
        self.shown_children().into_iter().filter(|id| visible(*id)).map(|id| (id, page)).collect()
    }

    fn release_child(&mut self, child: NodeId) {
        if let Some(index) = self.tabs.iter().position(|t| t.node == child) {
            self.tabs.remove(index);
            self.after_removal(index);
        }
    }

    fn notify_changes(&mut self, ctx: &EventCtx<'_>) -> bool {
        if !std::mem::take(&mut self.pending_change) {
            return false;
        }
        let Some(key) = self.current_tab().map(str::to_string) else { return false };
        self.changed.call(ctx.handle, key)
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::dom::Dom;
    use crate::testing::test_handle;
    use crate::widgets::TextView;

    fn three_tabs() -> (Dom, NodeId, Vec<NodeId>) {
        let mut dom = Dom::new();
        let tabs = dom.insert(TabbedPanels::new());
        let pages: Vec<_> = (0..3).map(|i| dom.insert(TextView::new().with_text(format!("page {i}")))).collect();
        for (i, (key, label)) in [("a", "Alpha"), ("b", "Beta"), ("c", "Gamma")].into_iter().enumerate() {
            dom.add_tab(tabs, key, label, pages[i]).unwrap();
        }
        (dom, tabs, pages)
    }

    #[test]
    fn first_tab_is_current_and_only_page_laid_out() {
        let (dom, tabs, pages) = three_tabs();
        let t = dom.widget::<TabbedPanels>(tabs).unwrap();
        assert_eq!(t.current_tab(), Some("a"));
        let placed = t.layout_children(Region::new(0, 0, 30, 10), &|_| true);
        assert_eq!(placed, vec![(pages[0], Region::new(0, 1, 30, 9))]);
    }

    #[test]
    fn draws_tab_bar_with_current_reversed() {
        let (dom, tabs, _) = three_tabs();
        let t = dom.widget::<TabbedPanels>(tabs).unwrap();
        let strips = t.draw(Region::new(0, 0, 24, 3), &Style::default(), false);
        assert_eq!(strips[0].as_text(), " Alpha │ Beta │ Gamma   ");
        assert!(strips[0].cells[1].style.reverse);
        assert!(!strips[0].cells[9].style.reverse);
    }

    #[test]
    fn click_on_label_switches_tab() {
        let (mut dom, tabs, _) = three_tabs();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let handle = test_handle();
        let ctx = EventCtx { handle: &handle, node: tabs };

        let t = dom.widget_mut::<TabbedPanels>(tabs).unwrap();
        t.notify_changes(&ctx);
        t.set_changed_func(move |_, key| sink.borrow_mut().push(key));
        let click = MouseEvent::click(10, 0);
        assert_eq!(t.handle_mouse(click, Offset::new(10, 0), &ctx), EventResult::Consumed);
        assert_eq!(t.current_tab(), Some("b"));
        assert!(t.notify_changes(&ctx));
        assert_eq!(*seen.borrow(), vec!["b".to_string()]);
    }

    #[test]
    fn removing_current_tab_selects_neighbour() {
        let (mut dom, tabs, _) = three_tabs();
        dom.widget_mut::<TabbedPanels>(tabs).unwrap().set_current_tab("c").unwrap();
        dom.remove_tab(tabs, "c").unwrap();
        assert_eq!(dom.widget::<TabbedPanels>(tabs).unwrap().current_tab(), Some("b"));
        assert!(matches!(dom.remove_tab(tabs, "c"), Err(Error::UnknownKey(_))));
    }
}
