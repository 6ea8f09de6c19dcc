//! TreeView widget: an expandable hierarchy of text nodes.
//!
//! Tree nodes live in a small arena inside the widget and are addressed by
//! [`TreeNodeId`]. They are not composition-graph nodes and cannot hold
//! widgets.

use crate::error::{check_index, Error, Result};
use crate::event::{AppHandle, Key, KeyEvent, MouseAction, MouseBtn, MouseEvent};
use crate::geometry::{Offset, Region};
use crate::render::draw;
use crate::render::strip::Strip;
use crate::render::style::Style;
use crate::widget::{Callback, EventCtx, EventResult, Primitive};

/// Index of a node inside one [`TreeView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TreeNodeId(pub usize);

/// A node of a [`TreeView`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub text: String,
    pub expanded: bool,
    pub selectable: bool,
    children: Vec<TreeNodeId>,
}

impl TreeNode {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), expanded: true, selectable: true, children: Vec::new() }
    }

    pub fn collapsed(mut self) -> Self {
        self.expanded = false;
        self
    }

    pub fn with_selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    pub fn children(&self) -> &[TreeNodeId] {
        &self.children
    }
}

/// An indented, collapsible tree.
///
/// `Up`/`Down` move between visible nodes, `Left` collapses, `Right`
/// expands, `Enter` fires *selected* and toggles expansion.
#[derive(Debug, Default)]
pub struct TreeView {
    nodes: Vec<TreeNode>,
    root: Option<TreeNodeId>,
    show_root: bool,
    current: Option<TreeNodeId>,
    pending_change: bool,
    selected: Callback<TreeNodeId>,
    changed: Callback<TreeNodeId>,
    done: Callback<Key>,
}

impl TreeView {
    pub fn new() -> Self {
        Self { show_root: true, ..Self::default() }
    }

    pub fn with_root_shown(mut self, show: bool) -> Self {
        self.show_root = show;
        self
    }

    /// Replace the whole tree with a single root node.
    pub fn set_root(&mut self, node: TreeNode) -> TreeNodeId {
        self.nodes.clear();
        self.nodes.push(TreeNode { children: Vec::new(), ..node });
        let id = TreeNodeId(0);
        self.root = Some(id);
        self.current = self.visible_nodes().first().map(|(id, _)| *id);
        id
    }

    pub fn root(&self) -> Option<TreeNodeId> {
        self.root
    }

    /// Append `node` as the last child of `parent`.
    pub fn add_child(&mut self, parent: TreeNodeId, node: TreeNode) -> Result<TreeNodeId> {
        check_index(parent.0, self.nodes.len())?;
        let id = TreeNodeId(self.nodes.len());
        self.nodes.push(TreeNode { children: Vec::new(), ..node });
        self.nodes[parent.0].children.push(id);
        if self.current.is_none() {
            self.current = self.visible_nodes().first().map(|(id, _)| *id);
        }
        Ok(id)
    }

    pub fn node(&self, id: TreeNodeId) -> Option<&TreeNode> {
        self.nodes.get(id.0)
    }

    pub fn set_expanded(&mut self, id: TreeNodeId, expanded: bool) -> Result<()> {
        check_index(id.0, self.nodes.len())?;
        self.nodes[id.0].expanded = expanded;
        // Keep the cursor on a visible node.
        if let Some(current) = self.current {
            if !self.visible_nodes().iter().any(|(v, _)| *v == current) {
                self.current = Some(id);
                self.pending_change = true;
            }
        }
        Ok(())
    }

    pub fn current(&self) -> Option<TreeNodeId> {
        self.current
    }

    /// Move the cursor. The node must be visible (all ancestors expanded).
    pub fn set_current(&mut self, id: TreeNodeId) -> Result<()> {
        check_index(id.0, self.nodes.len())?;
        if !self.visible_nodes().iter().any(|(v, _)| *v == id) {
            return Err(Error::UnknownKey(format!("tree node {} is not visible", id.0)));
        }
        if self.current != Some(id) {
            self.current = Some(id);
            self.pending_change = true;
        }
        Ok(())
    }

    /// Visible nodes in display order with their depth.
    pub fn visible_nodes(&self) -> Vec<(TreeNodeId, usize)> {
        let mut out = Vec::new();
        let Some(root) = self.root else { return out };
        let mut stack = if self.show_root {
            vec![(root, 0)]
        } else {
            self.nodes[root.0].children.iter().rev().map(|c| (*c, 0)).collect()
        };
        while let Some((id, depth)) = stack.pop() {
            out.push((id, depth));
            let node = &self.nodes[id.0];
            if node.expanded {
                stack.extend(node.children.iter().rev().map(|c| (*c, depth + 1)));
            }
        }
        out
    }

    pub fn set_selected_func(&mut self, f: impl FnMut(&AppHandle, TreeNodeId) + 'static) -> &mut Self {
        self.selected.set(f);
        self
    }

    pub fn set_changed_func(&mut self, f: impl FnMut(&AppHandle, TreeNodeId) + 'static) -> &mut Self {
        self.changed.set(f);
        self
    }

    pub fn set_done_func(&mut self, f: impl FnMut(&AppHandle, Key) + 'static) -> &mut Self {
        self.done.set(f);
        self
    }

    fn step(&mut self, delta: isize, handle: &AppHandle) {
        let visible = self.visible_nodes();
        let position = self.current.and_then(|c| visible.iter().position(|(v, _)| *v == c)).unwrap_or(0);
        let mut index = position as isize;
        // Skip unselectable nodes in the direction of travel.
        loop {
            index += delta;
            let Some((id, _)) = usize::try_from(index).ok().and_then(|i| visible.get(i)) else { return };
            if self.nodes[id.0].selectable {
                self.current = Some(*id);
                self.changed.call(handle, *id);
                return;
            }
        }
    }
}

impl Primitive for TreeView {
    fn kind(&self) -> &'static str {
        "TreeView"
    }

    fn draw(&self, region: Region, style: &Style, focused: bool) -> Vec<Strip> {
        if region.is_empty() {
            return Vec::new();
        }
        let base = style.cell();
        let visible = self.visible_nodes();
        let position = self.current.and_then(|c| visible.iter().position(|(v, _)| *v == c)).unwrap_or(0);
        let first = (position + 1).saturating_sub(region.height as usize);

        visible
            .iter()
            .skip(first)
            .take(region.height as usize)
            .enumerate()
            .map(|(row, (id, depth))| {
                let node = &self.nodes[id.0];
                let marker = match (node.children.is_empty(), node.expanded) {
                    (true, _) => "  ",
                    (false, true) => "- ",
                    (false, false) => "+ ",
                };
                let text = format!("{}{marker}{}", "  ".repeat(*depth), node.text);
                let mut strip = draw::aligned_line(region, row as i32, &text, style.align, base);
                if Some(*id) == self.current {
                    strip.restyle(|c| if focused { c.reverse() } else { c.bold() });
                }
                strip
            })
            .collect()
    }

    fn handle_key(&mut self, key: KeyEvent, ctx: &EventCtx<'_>) -> EventResult {
        match key.code {
            Key::Up => self.step(-1, ctx.handle),
            Key::Down => self.step(1, ctx.handle),
            Key::Left | Key::Right => {
                if let Some(id) = self.current {
                    let _ = self.set_expanded(id, key.code == Key::Right);
                }
            }
            Key::Enter => {
                if let Some(id) = self.current {
                    self.selected.call(ctx.handle, id);
                    let expanded = self.nodes[id.0].expanded;
                    let _ = self.set_expanded(id, !expanded);
                }
            }
            Key::Escape | Key::Tab | Key::BackTab => {
                self.done.call(ctx.handle, key.code);
                return EventResult::Ignored;
            }
            _ => return EventResult::Ignored,
        }
        EventResult::Consumed
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, _local: Offset, ctx: &EventCtx<'_>) -> EventResult {
        match mouse.kind {
            MouseAction::ScrollUp => self.step(-1, ctx.handle),
            MouseAction::ScrollDown => self.step(1, ctx.handle),
            MouseAction::Down(MouseBtn::Left) => {}
            _ => return EventResult::Ignored,
        }
        EventResult::Consumed
    }

    fn accepts_focus(&self) -> bool {
        true
    }

    fn notify_changes(&mut self, ctx: &EventCtx<'_>) -> bool {
        if !std::mem::take(&mut self.pending_change) {
            return false;
        }
        match self.current {
            Some(id) => self.changed.call(ctx.handle, id),
            None => false,
        }
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
    use crate::dom::NodeId;
    use crate::testing::test_handle;

    /// root
    ///   src
    ///     main.rs
    ///   docs (collapsed)
    ///     guide.md
    fn sample() -> (TreeView, Vec<TreeNodeId>) {
        let mut tree = TreeView::new();
        let root = tree.set_root(TreeNode::new("root"));
        let src = tree.add_child(root, TreeNode::new("src")).unwrap();
        let main = tree.add_child(src, TreeNode::new("main.rs")).unwrap();
        let docs = tree.add_child(root, TreeNode::new("docs").collapsed()).unwrap();
        let guide = tree.add_child(docs, TreeNode::new("guide.md")).unwrap();
        (tree, vec![root, src, main, docs, guide])
    }

    fn press(tree: &mut TreeView, code: Key) {
        let handle = test_handle();
        let ctx = EventCtx { handle: &handle, node: NodeId::default() };
        tree.handle_key(KeyEvent::plain(code), &ctx);
    }

    #[test]
    fn visible_nodes_respect_expansion() {
        let (tree, ids) = sample();
        let visible: Vec<_> = tree.visible_nodes();
        assert_eq!(visible, vec![(ids[0], 0), (ids[1], 1), (ids[2], 2), (ids[3], 1)]);
    }

    #[test]
    fn hidden_root_shows_children_at_depth_zero() {
        let (tree, ids) = sample();
        let tree = tree.with_root_shown(false);
        assert_eq!(tree.visible_nodes()[0], (ids[1], 0));
    }

    #[test]
    fn add_child_to_missing_parent_fails() {
        let (mut tree, _) = sample();
        assert!(tree.add_child(TreeNodeId(99), TreeNode::new("x")).is_err());
    }

    #[test]
    fn arrows_walk_visible_nodes() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let (mut tree, ids) = sample();
        tree.set_changed_func(move |_, id| sink.borrow_mut().push(id));

        for _ in 0..5 {
            press(&mut tree, Key::Down);
        }
        assert_eq!(tree.current(), Some(ids[3]));
        press(&mut tree, Key::Right);
        press(&mut tree, Key::Down);
        assert_eq!(tree.current(), Some(ids[4]));
        assert_eq!(*seen.borrow(), vec![ids[1], ids[2], ids[3], ids[4]]);
    }

    #[test]
    fn collapsing_moves_cursor_off_hidden_node() {
        let (mut tree, ids) = sample();
        tree.set_current(ids[2]).unwrap();
        tree.set_expanded(ids[1], false).unwrap();
        assert_eq!(tree.current(), Some(ids[1]));
    }

    #[test]
    fn set_current_rejects_hidden_nodes() {
        let (mut tree, ids) = sample();
        assert!(tree.set_current(ids[4]).is_err());
        assert!(tree.set_current(TreeNodeId(42)).is_err());
        assert_eq!(tree.current(), Some(ids[0]));
    }

    #[test]
    fn enter_selects_and_toggles() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let (mut tree, ids) = sample();
        tree.set_selected_func(move |_, id| sink.borrow_mut().push(id));
        tree.set_current(ids[3]).unwrap();
        press(&mut tree, Key::Enter);
        assert_eq!(*seen.borrow(), vec![ids[3]]);
        assert!(tree.node(ids[3]).is_some_and(|n| n.expanded));
    }

    #[test]
    fn draws_indented_markers() {
        let (tree, _) = sample();
        let strips = tree.draw(Region::new(0, 0, 14, 4), &Style::default(), false);
        let rows: Vec<String> = strips.iter().map(Strip::as_text).collect();
        assert_eq!(rows, vec!["- root        ", "  - src       ", "      main.rs ", "  + docs      "]);
        assert!(strips[0].cells[0].style.bold);
    }
}
