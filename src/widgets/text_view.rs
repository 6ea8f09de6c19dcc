//! TextView widget: multi-line, scrollable, read-only text.

use crate::event::{AppHandle, Key, KeyEvent, MouseAction, MouseEvent};
use crate::geometry::{Offset, Region};
use crate::render::draw;
use crate::render::strip::Strip;
use crate::render::style::Style;
use crate::widget::{Callback, EventCtx, EventResult, Primitive};

/// Read-only text split on newlines and aligned per the node style.
///
/// Changing the text programmatically schedules the *changed* callback; it
/// fires on the loop thread once the current command finishes.
#[derive(Debug)]
pub struct TextView {
    text: String,
    scroll: usize,
    scrollable: bool,
    pending_change: bool,
    changed: Callback<()>,
    done: Callback<Key>,
}

impl TextView {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            scroll: 0,
            scrollable: true,
            pending_change: false,
            changed: Callback::new(),
            done: Callback::new(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Whether arrow keys scroll the view (and so whether it takes focus).
    pub fn with_scrollable(mut self, scrollable: bool) -> Self {
        self.scrollable = scrollable;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.text = text.into();
        self.scroll = self.scroll.min(self.line_count().saturating_sub(1));
        self.pending_change = true;
        self
    }

    pub fn append(&mut self, text: &str) -> &mut Self {
        self.text.push_str(text);
        self.pending_change = true;
        self
    }

    pub fn clear(&mut self) -> &mut Self {
        self.set_text(String::new())
    }

    pub fn line_count(&self) -> usize {
        self.text.lines().count()
    }

    /// Index of the first line shown.
    pub fn scroll_offset(&self) -> usize {
        self.scroll
    }

    pub fn scroll_to(&mut self, line: usize) -> &mut Self {
        self.scroll = line.min(self.line_count().saturating_sub(1));
        self
    }

    pub fn set_changed_func(&mut self, f: impl FnMut(&AppHandle, ()) + 'static) -> &mut Self {
        self.changed.set(f);
        self
    }

    pub fn set_done_func(&mut self, f: impl FnMut(&AppHandle, Key) + 'static) -> &mut Self {
        self.done.set(f);
        self
    }

    fn scroll_by(&mut self, delta: isize) {
        let max = self.line_count().saturating_sub(1);
        self.scroll = self.scroll.saturating_add_signed(delta).min(max);
    }
}

impl Default for TextView {
    fn default() -> Self {
        Self::new()
    }
}

impl Primitive for TextView {
    fn kind(&self) -> &'static str {
        "TextView"
    }

    fn draw(&self, region: Region, style: &Style, _focused: bool) -> Vec<Strip> {
        let cell = style.cell();
        let mut lines = self.text.lines().skip(self.scroll);
        (0..region.height)
            .map(|row| {
                let line = lines.next().unwrap_or("");
                draw::aligned_line(region, row, line, style.align, cell)
            })
            .collect()
    }

    fn handle_key(&mut self, key: KeyEvent, ctx: &EventCtx<'_>) -> EventResult {
        match key.code {
            Key::Up if self.scrollable => self.scroll_by(-1),
            Key::Down if self.scrollable => self.scroll_by(1),
            Key::PageUp if self.scrollable => self.scroll_by(-10),
            Key::PageDown if self.scrollable => self.scroll_by(10),
            Key::Home if self.scrollable => self.scroll = 0,
            Key::End if self.scrollable => self.scroll = self.line_count().saturating_sub(1),
            Key::Enter => {
                self.done.call(ctx.handle, key.code);
            }
            Key::Escape | Key::Tab | Key::BackTab => {
                self.done.call(ctx.handle, key.code);
                return EventResult::Ignored;
            }
            _ => return EventResult::Ignored,
        }
        EventResult::Consumed
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, _local: Offset, _ctx: &EventCtx<'_>) -> EventResult {
        match mouse.kind {
            MouseAction::ScrollUp if self.scrollable => self.scroll_by(-1),
            MouseAction::ScrollDown if self.scrollable => self.scroll_by(1),
            _ => return EventResult::Ignored,
        }
        EventResult::Consumed
    }

    fn accepts_focus(&self) -> bool {
        self.scrollable
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

    use super::*;
    use crate::dom::NodeId;
    use crate::render::style::Align;
    use crate::testing::test_handle;

    fn lines(n: usize) -> String {
        (0..n).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n")
    }

    #[test]
    fn draws_from_scroll_offset() {
        let mut view = TextView::new().with_text(lines(5));
        view.scroll_to(3);
        let strips = view.draw(Region::new(0, 0, 8, 3), &Style::default(), false);
        let rows: Vec<String> = strips.iter().map(Strip::as_text).collect();
        assert_eq!(rows, vec!["line 3  ", "line 4  ", "        "]);
    }

    #[test]
    fn honours_alignment() {
        let view = TextView::new().with_text("ab");
        let style = Style::default().with_align(Align::Right);
        let strips = view.draw(Region::new(0, 0, 5, 1), &style, false);
        assert_eq!(strips[0].as_text(), "   ab");
    }

    #[test]
    fn arrow_keys_scroll_within_bounds() {
        let mut view = TextView::new().with_text(lines(3));
        let handle = test_handle();
        let ctx = EventCtx { handle: &handle, node: NodeId::default() };
        for _ in 0..5 {
            view.handle_key(KeyEvent::plain(Key::Down), &ctx);
        }
        assert_eq!(view.scroll_offset(), 2);
        view.handle_key(KeyEvent::plain(Key::Home), &ctx);
        assert_eq!(view.scroll_offset(), 0);
        view.handle_key(KeyEvent::plain(Key::Up), &ctx);
        assert_eq!(view.scroll_offset(), 0);
    }

    #[test]
    fn set_text_fires_changed_once_on_notify() {
        let hits = Rc::new(Cell::new(0));
        let sink = Rc::clone(&hits);
        let mut view = TextView::new();
        view.set_changed_func(move |_, ()| sink.set(sink.get() + 1));
        view.set_text("a");
        view.append("b");
        assert_eq!(hits.get(), 0);

        let handle = test_handle();
        let ctx = EventCtx { handle: &handle, node: NodeId::default() };
        assert!(view.notify_changes(&ctx));
        assert!(!view.notify_changes(&ctx));
        assert_eq!(hits.get(), 1);
        assert_eq!(view.text(), "ab");
    }

    #[test]
    fn static_text_does_not_take_focus() {
        assert!(TextView::new().accepts_focus());
        assert!(!TextView::new().with_scrollable(false).accepts_focus());
    }
}
