//! Child management for container widgets.
//!
//! Every operation that changes which nodes a container holds goes through
//! [`Dom`] so the parent map stays in step with the container's metadata.
//! Index-addressed removal past the end and key-addressed removal of a missing
//! key both fail without touching the container.

use super::node::NodeId;
use super::tree::Dom;
use crate::error::{Error, Result};
use crate::event::AppHandle;
use crate::geometry::Region;
use crate::widgets::{
    Button, DropDown, Flex, FlexItem, Form, Grid, GridCell, List, Panels, TabbedPanels, WindowManager,
};

impl Dom {
    // -----------------------------------------------------------------------
    // Flex
    // -----------------------------------------------------------------------

    /// Append `item` to a [`Flex`].
    pub fn add_item(&mut self, flex: NodeId, item: NodeId, layout: FlexItem) -> Result<()> {
        self.widget::<Flex>(flex)?;
        self.check_attach(flex, item)?;
        self.widget_mut::<Flex>(flex)?.push_item(item, layout);
        self.link(flex, item);
        Ok(())
    }

    /// Remove the item at `index` from a [`Flex`]; the node stays alive.
    pub fn remove_item(&mut self, flex: NodeId, index: usize) -> Result<NodeId> {
        let node = self.widget_mut::<Flex>(flex)?.take_item(index)?;
        self.unlink(node);
        Ok(node)
    }

    // -----------------------------------------------------------------------
    // Grid
    // -----------------------------------------------------------------------

    pub fn add_grid_item(&mut self, grid: NodeId, item: NodeId, cell: GridCell) -> Result<()> {
        self.widget::<Grid>(grid)?;
        self.check_attach(grid, item)?;
        self.widget_mut::<Grid>(grid)?.push_item(item, cell);
        self.link(grid, item);
        Ok(())
    }

    pub fn remove_grid_item(&mut self, grid: NodeId, index: usize) -> Result<NodeId> {
        let node = self.widget_mut::<Grid>(grid)?.take_item(index)?;
        self.unlink(node);
        Ok(node)
    }

    // -----------------------------------------------------------------------
    // Form
    // -----------------------------------------------------------------------

    /// Append a form field (any node; typically an input, checkbox or
    /// dropdown).
    pub fn add_form_item(&mut self, form: NodeId, item: NodeId) -> Result<()> {
        self.widget::<Form>(form)?;
        self.check_attach(form, item)?;
        self.widget_mut::<Form>(form)?.push_item(item);
        self.link(form, item);
        Ok(())
    }

    pub fn remove_form_item(&mut self, form: NodeId, index: usize) -> Result<NodeId> {
        let node = self.widget_mut::<Form>(form)?.take_item(index)?;
        self.unlink(node);
        Ok(node)
    }

    /// Create a button labelled `label` at the end of the form's button row.
    pub fn add_button(
        &mut self,
        form: NodeId,
        label: impl Into<String>,
        on_selected: impl FnMut(&AppHandle, ()) + 'static,
    ) -> Result<NodeId> {
        self.widget::<Form>(form)?;
        let mut button = Button::new(label);
        button.set_selected_func(on_selected);
        let width = button.label().chars().count() as i32 + 4;
        let node = self.insert(button);
        self.widget_mut::<Form>(form)?.push_button(node, width);
        self.link(form, node);
        Ok(node)
    }

    /// Remove and destroy the button at `index`.
    pub fn remove_button(&mut self, form: NodeId, index: usize) -> Result<()> {
        let node = self.widget_mut::<Form>(form)?.take_button(index)?;
        self.unlink(node);
        self.remove(node);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Panels
    // -----------------------------------------------------------------------

    /// Add `node` to a [`Panels`] stack under `key`.
    ///
    /// A duplicate key replaces the existing entry in place; the old node is
    /// detached, and the entry stays visible if it was visible before.
    pub fn add_panel(&mut self, panels: NodeId, key: impl Into<String>, node: NodeId, visible: bool) -> Result<()> {
        let key = key.into();
        let existing = self.widget::<Panels>(panels)?.panel(&key);
        if existing == Some(node) {
            let stack = self.widget_mut::<Panels>(panels)?;
            if visible {
                stack.show_panel(&key)?;
            }
            return Ok(());
        }

        self.check_attach(panels, node)?;
        let replaced = self.widget_mut::<Panels>(panels)?.upsert(key, node, visible);
        if let Some(old) = replaced {
            self.unlink(old);
        }
        self.link(panels, node);
        Ok(())
    }

    /// Remove the panel under `key`; the node stays alive.
    pub fn remove_panel(&mut self, panels: NodeId, key: &str) -> Result<NodeId> {
        let node = self.widget_mut::<Panels>(panels)?.take_panel(key)?;
        self.unlink(node);
        Ok(node)
    }

    // -----------------------------------------------------------------------
    // TabbedPanels
    // -----------------------------------------------------------------------

    /// Add a tab. A duplicate key replaces that tab's label and content in
    /// place.
    pub fn add_tab(
        &mut self,
        tabs: NodeId,
        key: impl Into<String>,
        label: impl Into<String>,
        node: NodeId,
    ) -> Result<()> {
        let key = key.into();
        let existing = self.widget::<TabbedPanels>(tabs)?.tab(&key);
        if existing != Some(node) {
            self.check_attach(tabs, node)?;
        }
        let replaced = self.widget_mut::<TabbedPanels>(tabs)?.upsert(key, label.into(), node);
        if let Some(old) = replaced.filter(|old| *old != node) {
            self.unlink(old);
        }
        self.link(tabs, node);
        Ok(())
    }

    pub fn remove_tab(&mut self, tabs: NodeId, key: &str) -> Result<NodeId> {
        let node = self.widget_mut::<TabbedPanels>(tabs)?.take_tab(key)?;
        self.unlink(node);
        Ok(node)
    }

    // -----------------------------------------------------------------------
    // WindowManager
    // -----------------------------------------------------------------------

    /// Add a window at `rect` (relative to the manager's content area). New
    /// windows go on top.
    pub fn add_window(&mut self, manager: NodeId, node: NodeId, rect: Region) -> Result<()> {
        self.widget::<WindowManager>(manager)?;
        self.check_attach(manager, node)?;
        self.widget_mut::<WindowManager>(manager)?.push_window(node, rect);
        self.link(manager, node);
        Ok(())
    }

    pub fn remove_window(&mut self, manager: NodeId, index: usize) -> Result<NodeId> {
        let node = self.widget_mut::<WindowManager>(manager)?.take_window(index)?;
        self.unlink(node);
        Ok(node)
    }

    // -----------------------------------------------------------------------
    // Generic index removal
    // -----------------------------------------------------------------------

    /// Remove entry `index` from whichever index-addressed collection
    /// `container` holds: flex, grid and form items, windows, list items or
    /// dropdown options.
    pub fn remove_at(&mut self, container: NodeId, index: usize) -> Result<()> {
        let kind = self.node(container)?.widget.kind();
        match kind {
            "Flex" => self.remove_item(container, index).map(drop),
            "Grid" => self.remove_grid_item(container, index).map(drop),
            "Form" => self.remove_form_item(container, index).map(drop),
            "WindowManager" => self.remove_window(container, index).map(drop),
            "List" => self.widget_mut::<List>(container)?.remove_item(index).map(drop),
            "DropDown" => self.widget_mut::<DropDown>(container)?.remove_option(index).map(drop),
            found => Err(Error::WrongKind { expected: "index-addressed container", found }),
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::widgets::{Block, ListItem, TextView};

    fn text(dom: &mut Dom, s: &str) -> NodeId {
        dom.insert(TextView::new().with_text(s))
    }

    // ── Flex / Grid ──────────────────────────────────────────────────

    #[test]
    fn flex_keeps_insertion_order() {
        let mut dom = Dom::new();
        let flex = dom.insert(Flex::row());
        let ids: Vec<_> = (0..4).map(|i| text(&mut dom, &i.to_string())).collect();
        for id in &ids {
            dom.add_item(flex, *id, FlexItem::proportional(1)).unwrap();
        }
        assert_eq!(dom.children(flex), ids);

        assert_eq!(dom.remove_item(flex, 1).unwrap(), ids[1]);
        assert_eq!(dom.children(flex), vec![ids[0], ids[2], ids[3]]);
        assert!(dom.contains(ids[1]));
        assert_eq!(dom.parent(ids[1]), None);
    }

    #[test]
    fn flex_remove_out_of_range() {
        let mut dom = Dom::new();
        let flex = dom.insert(Flex::row());
        let a = text(&mut dom, "a");
        dom.add_item(flex, a, FlexItem::fixed(3)).unwrap();
        assert!(matches!(
            dom.remove_item(flex, 4),
            Err(Error::IndexOutOfRange { index: 4, len: 1 })
        ));
        assert_eq!(dom.children(flex), vec![a]);
    }

    #[test]
    fn add_item_to_non_flex_is_wrong_kind() {
        let mut dom = Dom::new();
        let block = dom.insert(Block::new());
        let a = text(&mut dom, "a");
        assert!(matches!(
            dom.add_item(block, a, FlexItem::fixed(1)),
            Err(Error::WrongKind { expected: "Flex", found: "Block" })
        ));
        assert_eq!(dom.parent(a), None);
    }

    #[test]
    fn grid_items_in_order() {
        let mut dom = Dom::new();
        let grid = dom.insert(Grid::new().with_rows([1, 0]).with_columns([10, 0]));
        let a = text(&mut dom, "a");
        let b = text(&mut dom, "b");
        dom.add_grid_item(grid, a, GridCell::at(0, 0)).unwrap();
        dom.add_grid_item(grid, b, GridCell::at(1, 0).with_span(1, 2)).unwrap();
        assert_eq!(dom.children(grid), vec![a, b]);
        assert_eq!(dom.remove_grid_item(grid, 0).unwrap(), a);
        assert!(dom.remove_grid_item(grid, 3).is_err());
    }

    // ── Form ─────────────────────────────────────────────────────────

    #[test]
    fn form_items_then_buttons() {
        let mut dom = Dom::new();
        let form = dom.insert(Form::new());
        let a = text(&mut dom, "a");
        dom.add_form_item(form, a).unwrap();
        let save = dom.add_button(form, "Save", |_, ()| {}).unwrap();
        let quit = dom.add_button(form, "Quit", |_, ()| {}).unwrap();

        assert_eq!(dom.children(form), vec![a, save, quit]);
        assert_eq!(dom.widget::<Button>(save).unwrap().label(), "Save");
        assert_eq!(dom.parent(quit), Some(form));

        dom.remove_button(form, 0).unwrap();
        assert!(!dom.contains(save));
        assert_eq!(dom.children(form), vec![a, quit]);
        assert!(matches!(dom.remove_button(form, 5), Err(Error::IndexOutOfRange { .. })));
        assert_eq!(dom.remove_form_item(form, 0).unwrap(), a);
    }

    // ── Panels ───────────────────────────────────────────────────────

    #[test]
    fn duplicate_panel_key_replaces_in_place() {
        let mut dom = Dom::new();
        let panels = dom.insert(Panels::new());
        let ids: Vec<_> = (0..5).map(|i| text(&mut dom, &format!("content {i}"))).collect();
        for (i, id) in ids.iter().enumerate() {
            dom.add_panel(panels, format!("panel-{i}"), *id, i == 0).unwrap();
        }
        dom.widget_mut::<Panels>(panels).unwrap().set_current_panel("panel-2").unwrap();

        let fresh = text(&mut dom, "new content");
        dom.add_panel(panels, "panel-2", fresh, false).unwrap();

        let stack = dom.widget::<Panels>(panels).unwrap();
        assert_eq!(stack.panel_count(), 5);
        assert_eq!(stack.keys().filter(|k| *k == "panel-2").count(), 1);
        assert_eq!(stack.panel("panel-2"), Some(fresh));
        assert_eq!(stack.front_panel(), Some("panel-2"));
        assert_eq!(dom.children(panels)[2], fresh);
        assert_eq!(dom.parent(ids[2]), None);
        assert_eq!(dom.parent(fresh), Some(panels));
    }

    #[test]
    fn re_adding_same_node_under_same_key() {
        let mut dom = Dom::new();
        let panels = dom.insert(Panels::new());
        let a = text(&mut dom, "a");
        dom.add_panel(panels, "a", a, false).unwrap();
        dom.add_panel(panels, "a", a, true).unwrap();
        let stack = dom.widget::<Panels>(panels).unwrap();
        assert_eq!(stack.panel_count(), 1);
        assert_eq!(stack.front_panel(), Some("a"));
    }

    #[test]
    fn remove_missing_panel_is_unknown_key() {
        let mut dom = Dom::new();
        let panels = dom.insert(Panels::new());
        let a = text(&mut dom, "a");
        dom.add_panel(panels, "a", a, true).unwrap();
        assert!(matches!(dom.remove_panel(panels, "zzz"), Err(Error::UnknownKey(_))));
        assert_eq!(dom.remove_panel(panels, "a").unwrap(), a);
        assert_eq!(dom.parent(a), None);
    }

    // ── TabbedPanels ─────────────────────────────────────────────────

    #[test]
    fn tabs_replace_on_duplicate_key() {
        let mut dom = Dom::new();
        let tabs = dom.insert(TabbedPanels::new());
        let a = text(&mut dom, "a");
        let b = text(&mut dom, "b");
        let c = text(&mut dom, "c");
        dom.add_tab(tabs, "one", "One", a).unwrap();
        dom.add_tab(tabs, "two", "Two", b).unwrap();
        dom.add_tab(tabs, "one", "Uno", c).unwrap();

        let t = dom.widget::<TabbedPanels>(tabs).unwrap();
        assert_eq!(t.tab_count(), 2);
        assert_eq!(t.tab("one"), Some(c));
        assert_eq!(t.label("one"), Some("Uno"));
        assert_eq!(dom.children(tabs), vec![c, b]);
        assert_eq!(dom.parent(a), None);
    }

    // ── WindowManager ────────────────────────────────────────────────

    #[test]
    fn windows_by_index() {
        let mut dom = Dom::new();
        let wm = dom.insert(WindowManager::new());
        let a = text(&mut dom, "a");
        dom.add_window(wm, a, Region::new(1, 1, 10, 4)).unwrap();
        assert_eq!(dom.children(wm), vec![a]);
        assert!(matches!(dom.remove_window(wm, 2), Err(Error::IndexOutOfRange { index: 2, len: 1 })));
        assert_eq!(dom.remove_window(wm, 0).unwrap(), a);
    }

    // ── remove_at ────────────────────────────────────────────────────

    #[test]
    fn remove_at_dispatches_by_kind() {
        let mut dom = Dom::new();
        let mut list = List::new();
        for s in ["a", "b", "c"] {
            list.add_item(ListItem::new(s));
        }
        let list = dom.insert(list);

        assert!(matches!(dom.remove_at(list, 5), Err(Error::IndexOutOfRange { index: 5, len: 3 })));
        assert_eq!(dom.widget::<List>(list).unwrap().item_count(), 3);

        dom.remove_at(list, 1).unwrap();
        assert_eq!(dom.widget::<List>(list).unwrap().item_count(), 2);

        let block = dom.insert(Block::new());
        assert!(matches!(dom.remove_at(block, 0), Err(Error::WrongKind { .. })));
    }
}
