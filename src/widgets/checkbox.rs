//! CheckBox widget: a labelled boolean toggle.

use crate::event::{AppHandle, Key, KeyEvent, MouseAction, MouseBtn, MouseEvent};
use crate::geometry::{Offset, Region};
use crate::render::strip::Strip;
use crate::render::style::Style;
use crate::widget::{Callback, EventCtx, EventResult, Primitive};

/// A checkbox drawn as `[x] label`.
///
/// `Enter`, `Space` or a left click toggles it and fires *changed* with the
/// new state. `Tab`, `BackTab` and `Escape` fire *done*.
#[derive(Debug, Default)]
pub struct CheckBox {
    label: String,
    checked: bool,
    changed: Callback<bool>,
    done: Callback<Key>,
}

impl CheckBox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Set the state without firing *changed*.
    pub fn set_checked(&mut self, checked: bool) -> &mut Self {
        self.checked = checked;
        self
    }

    pub fn set_changed_func(&mut self, f: impl FnMut(&AppHandle, bool) + 'static) -> &mut Self {
        self.changed.set(f);
        self
    }

    pub fn set_done_func(&mut self, f: impl FnMut(&AppHandle, Key) + 'static) -> &mut Self {
        self.done.set(f);
        self
    }

    fn toggle(&mut self, handle: &AppHandle) {
        self.checked = !self.checked;
        self.changed.call(handle, self.checked);
    }
}

impl Primitive for CheckBox {
    fn kind(&self) -> &'static str {
        "CheckBox"
    }

    fn draw(&self, region: Region, style: &Style, focused: bool) -> Vec<Strip> {
        if region.is_empty() {
            return Vec::new();
        }
        let base = style.cell();
        let mark = if focused { base.reverse() } else { base };
        let mut strip = Strip::new(region.y, region.x);
        strip.push_str(if self.checked { "[x]" } else { "[ ]" }, mark);
        if !self.label.is_empty() {
            strip.push(' ', base);
            strip.push_str(&self.label, base);
        }
        strip.fill(region.width, base);
        vec![strip]
    }

    fn handle_key(&mut self, key: KeyEvent, ctx: &EventCtx<'_>) -> EventResult {
        match key.code {
            Key::Enter | Key::Char(' ') => {
                self.toggle(ctx.handle);
                EventResult::Consumed
            }
            Key::Tab | Key::BackTab | Key::Escape => {
                self.done.call(ctx.handle, key.code);
                EventResult::Ignored
            }
            _ => EventResult::Ignored,
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, _local: Offset, ctx: &EventCtx<'_>) -> EventResult {
        if mouse.kind == MouseAction::Down(MouseBtn::Left) {
            self.toggle(ctx.handle);
            return EventResult::Consumed;
        }
        EventResult::Ignored
    }

    fn accepts_focus(&self) -> bool {
        true
    }
}

// ===========================================================================
// Tests
// ===========================================================================
