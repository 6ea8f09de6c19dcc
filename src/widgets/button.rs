//! Button widget: a focusable label that fires a callback when pressed.

use crate::event::{AppHandle, Key, KeyEvent, MouseAction, MouseBtn, MouseEvent};
use crate::geometry::{Offset, Region};
use crate::render::draw;
use crate::render::strip::Strip;
use crate::render::style::{Align, Style};
use crate::widget::{Callback, EventCtx, EventResult, Primitive};

// ---------------------------------------------------------------------------
// Button
// ---------------------------------------------------------------------------

/// A button with a centered label.
///
/// `Enter` or a left click fires the *selected* callback. `Tab`, `BackTab`
/// and `Escape` fire the *exit* callback and are then left to bubble, so the
/// default traversal bindings still move focus.
///
/// ```ignore
/// let mut ok = Button::new("OK");
/// ok.set_selected_func(|app, ()| { app.stop(); });
/// let ok = dom.insert(ok);
/// ```
#[derive(Debug)]
pub struct Button {
    label: String,
    selected: Callback<()>,
    exit: Callback<Key>,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into(), selected: Callback::new(), exit: Callback::new() }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) -> &mut Self {
        self.label = label.into();
        self
    }

    /// Called when the button is activated.
    pub fn set_selected_func(&mut self, f: impl FnMut(&AppHandle, ()) + 'static) -> &mut Self {
        self.selected.set(f);
        self
    }

    /// Called with the key that moved focus away from the button.
    pub fn set_exit_func(&mut self, f: impl FnMut(&AppHandle, Key) + 'static) -> &mut Self {
        self.exit.set(f);
        self
    }
}

impl Primitive for Button {
    fn kind(&self) -> &'static str {
        "Button"
    }

    fn draw(&self, region: Region, style: &Style, focused: bool) -> Vec<Strip> {
        if region.is_empty() {
            return Vec::new();
        }
        let mut cell = style.cell();
        if focused {
            cell = cell.reverse();
        }
        // Label sits on the middle row for tall buttons.
        let label_row = if region.height >= 3 { region.height / 2 } else { 0 };
        (0..region.height)
            .map(|row| {
                let text = if row == label_row { self.label.as_str() } else { "" };
                draw::aligned_line(region, row, text, Align::Center, cell)
            })
            .collect()
    }

    fn handle_key(&mut self, key: KeyEvent, ctx: &EventCtx<'_>) -> EventResult {
        match key.code {
            Key::Enter => {
                self.selected.call(ctx.handle, ());
                EventResult::Consumed
            }
            Key::Tab | Key::BackTab | Key::Escape => {
                self.exit.call(ctx.handle, key.code);
                EventResult::Ignored
            }
            _ => EventResult::Ignored,
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, _local: Offset, ctx: &EventCtx<'_>) -> EventResult {
        if mouse.kind == MouseAction::Down(MouseBtn::Left) {
            self.selected.call(ctx.handle, ());
            EventResult::Consumed
        } else {
            EventResult::Ignored
        }
    }

    fn accepts_focus(&self) -> bool {
        true
    }
}

// ===========================================================================
// Tests
// ===========================================================================
