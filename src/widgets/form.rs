//! Form container: a column of fields followed by a row of buttons.

use crate::dom::NodeId;
use crate::error::{check_index, Result};
use crate::event::{AppHandle, Key, KeyEvent};
use crate::geometry::Region;
use crate::render::strip::Strip;
use crate::render::style::Style;
use crate::widget::{Callback, EventCtx, EventResult, Primitive};

const BUTTON_GAP: i32 = 2;

/// Fields stacked one per row (separated by `item_padding` blank rows), then
/// a blank row and the buttons left to right.
///
/// Focus traversal visits the fields first, then the buttons. `Escape`
/// bubbling up from any field or button fires *cancel* when one is set.
#[derive(Debug)]
pub struct Form {
    items: Vec<NodeId>,
    /// Button node and its drawn width.
    buttons: Vec<(NodeId, i32)>,
    item_padding: i32,
    cancel: Callback<()>,
}

impl Default for Form {
    fn default() -> Self {
        Self::new()
    }
}

impl Form {
    pub fn new() -> Self {
        Self { items: Vec::new(), buttons: Vec::new(), item_padding: 1, cancel: Callback::new() }
    }

    pub fn with_item_padding(mut self, padding: i32) -> Self {
        self.item_padding = padding.max(0);
        self
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    pub fn item(&self, index: usize) -> Option<NodeId> {
        self.items.get(index).copied()
    }

    pub fn button(&self, index: usize) -> Option<NodeId> {
        self.buttons.get(index).map(|(id, _)| *id)
    }

    pub fn set_cancel_func(&mut self, f: impl FnMut(&AppHandle, ()) + 'static) -> &mut Self {
        self.cancel.set(f);
        self
    }

    pub(crate) fn push_item(&mut self, node: NodeId) {
        self.items.push(node);
    }

    pub(crate) fn take_item(&mut self, index: usize) -> Result<NodeId> {
        check_index(index, self.items.len())?;
        Ok(self.items.remove(index))
    }

    pub(crate) fn push_button(&mut self, node: NodeId, width: i32) {
        self.buttons.push((node, width));
    }

    pub(crate) fn take_button(&mut self, index: usize) -> Result<NodeId> {
        check_index(index, self.buttons.len())?;
        Ok(self.buttons.remove(index).0)
    }
}

impl Primitive for Form {
    fn kind(&self) -> &'static str {
        "Form"
    }

    fn draw(&self, _region: Region, _style: &Style, _focused: bool) -> Vec<Strip> {
        Vec::new()
    }

    fn handle_key(&mut self, key: KeyEvent, ctx: &EventCtx<'_>) -> EventResult {
        if key.code == Key::Escape && self.cancel.call(ctx.handle, ()) {
            return EventResult::Consumed;
        }
        EventResult::Ignored
    }

    fn children(&self) -> Vec<NodeId> {
        self.items.iter().copied().chain(self.buttons.iter().map(|(id, _)| *id)).collect()
    }

    fn layout_children(&self, inner: Region, visible: &dyn Fn(NodeId) -> bool) -> Vec<(NodeId, Region)> {
        let mut placed = Vec::new();
        let mut y = inner.y;
        for &item in self.items.iter().filter(|id| visible(**id)) {
            placed.push((item, Region::new(inner.x, y, inner.width, 1).intersection(inner)));
            y += 1 + self.item_padding;
        }
        if !self.items.is_empty() && self.item_padding == 0 {
            y += 1;
        }

        let mut x = inner.x;
        for &(button, width) in self.buttons.iter().filter(|(id, _)| visible(*id)) {
            placed.push((button, Region::new(x, y, width, 1).intersection(inner)));
            x += width + BUTTON_GAP;
        }
        placed
    }

    fn release_child(&mut self, child: NodeId) {
        self.items.retain(|id| *id != child);
        self.buttons.retain(|(id, _)| *id != child);
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
    use crate::widgets::{CheckBox, InputField};

    #[test]
    fn fields_then_button_row() {
        let mut dom = Dom::new();
        let form = dom.insert(Form::new());
        let name = dom.insert(InputField::new().with_label("Name"));
        let agree = dom.insert(CheckBox::new().with_label("Agree"));
        dom.add_form_item(form, name).unwrap();
        dom.add_form_item(form, agree).unwrap();
        let save = dom.add_button(form, "Save", |_, ()| {}).unwrap();
        let quit = dom.add_button(form, "Quit", |_, ()| {}).unwrap();

        let widget = dom.widget::<Form>(form).unwrap();
        let placed = widget.layout_children(Region::new(0, 0, 40, 10), &|_| true);
        assert_eq!(
            placed,
            vec![
                (name, Region::new(0, 0, 40, 1)),
                (agree, Region::new(0, 2, 40, 1)),
                (save, Region::new(0, 4, 8, 1)),
                (quit, Region::new(10, 4, 8, 1)),
            ]
        );
        assert_eq!(dom.focus_order(form), vec![name, agree, save, quit]);
    }

    #[test]
    fn escape_fires_cancel_only_when_set() {
        let handle = test_handle();
        let ctx = EventCtx { handle: &handle, node: NodeId::default() };
        let mut form = Form::new();
        assert_eq!(form.handle_key(KeyEvent::plain(Key::Escape), &ctx), EventResult::Ignored);

        let hits = Rc::new(Cell::new(0));
        let sink = Rc::clone(&hits);
        form.set_cancel_func(move |_, ()| sink.set(sink.get() + 1));
        assert_eq!(form.handle_key(KeyEvent::plain(Key::Escape), &ctx), EventResult::Consumed);
        assert_eq!(form.handle_key(KeyEvent::plain(Key::Enter), &ctx), EventResult::Ignored);
        assert_eq!(hits.get(), 1);
    }
}
