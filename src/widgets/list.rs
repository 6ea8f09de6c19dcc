//! List widget: selectable items with optional secondary text and shortcut
//! keys.

use std::cell::Cell;

use crate::error::{check_index, Result};
use crate::event::{AppHandle, Key, KeyEvent, MouseAction, MouseBtn, MouseEvent};
use crate::geometry::{Offset, Region};
use crate::render::draw;
use crate::render::strip::Strip;
use crate::render::style::Style;
use crate::widget::{Callback, EventCtx, EventResult, Primitive};

// ---------------------------------------------------------------------------
// ListItem
// ---------------------------------------------------------------------------

/// One entry of a [`List`].
#[derive(Debug)]
pub struct ListItem {
    pub main: String,
    pub secondary: String,
    /// Pressing this character while the list is focused selects the item.
    pub shortcut: Option<char>,
    selected: Callback<()>,
}

impl ListItem {
    pub fn new(main: impl Into<String>) -> Self {
        Self { main: main.into(), secondary: String::new(), shortcut: None, selected: Callback::new() }
    }

    pub fn with_secondary(mut self, text: impl Into<String>) -> Self {
        self.secondary = text.into();
        self
    }

    pub fn with_shortcut(mut self, key: char) -> Self {
        self.shortcut = Some(key);
        self
    }

    /// Callback for this item alone, fired before the list's own *selected*.
    pub fn on_selected(mut self, f: impl FnMut(&AppHandle, ()) + 'static) -> Self {
        self.selected.set(f);
        self
    }
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

/// A vertical list with one current item.
///
/// Each item takes one row, two when secondary text is shown.
#[derive(Debug)]
pub struct List {
    items: Vec<ListItem>,
    current: usize,
    /// First item drawn in the last frame; maps clicks onto items.
    first_shown: Cell<usize>,
    show_secondary: bool,
    wrap_around: bool,
    pending_change: bool,
    selected: Callback<(usize, String, String)>,
    changed: Callback<usize>,
    done: Callback<Key>,
}

impl List {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            current: 0,
            first_shown: Cell::new(0),
            show_secondary: false,
            wrap_around: true,
            pending_change: false,
            selected: Callback::new(),
            changed: Callback::new(),
            done: Callback::new(),
        }
    }

    pub fn with_secondary_text(mut self, show: bool) -> Self {
        self.show_secondary = show;
        self
    }

    pub fn with_wrap_around(mut self, wrap: bool) -> Self {
        self.wrap_around = wrap;
        self
    }

    pub fn add_item(&mut self, item: ListItem) -> &mut Self {
        self.items.push(item);
        self
    }

    /// Remove the item at `index`; the current item stays the same entry
    /// where possible.
    pub fn remove_item(&mut self, index: usize) -> Result<ListItem> {
        check_index(index, self.items.len())?;
        let item = self.items.remove(index);
        if index < self.current {
            self.current -= 1;
        } else if index == self.current && !self.items.is_empty() {
            self.current = self.current.min(self.items.len() - 1);
            self.pending_change = true;
        }
        Ok(item)
    }

    pub fn clear(&mut self) -> &mut Self {
        self.items.clear();
        self.current = 0;
        self
    }

    pub fn item(&self, index: usize) -> Option<&ListItem> {
        self.items.get(index)
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn current_item(&self) -> usize {
        self.current
    }

    pub fn set_current_item(&mut self, index: usize) -> Result<()> {
        check_index(index, self.items.len())?;
        if index != self.current {
            self.current = index;
            self.pending_change = true;
        }
        Ok(())
    }

    pub fn set_selected_func(&mut self, f: impl FnMut(&AppHandle, (usize, String, String)) + 'static) -> &mut Self {
        self.selected.set(f);
        self
    }

    pub fn set_changed_func(&mut self, f: impl FnMut(&AppHandle, usize) + 'static) -> &mut Self {
        self.changed.set(f);
        self
    }

    pub fn set_done_func(&mut self, f: impl FnMut(&AppHandle, Key) + 'static) -> &mut Self {
        self.done.set(f);
        self
    }

    fn rows_per_item(&self) -> i32 {
        if self.show_secondary {
            2
        } else {
            1
        }
    }

    fn move_to(&mut self, index: usize, handle: &AppHandle) {
        if index != self.current && index < self.items.len() {
            self.current = index;
            self.changed.call(handle, index);
        }
    }

    fn step(&mut self, delta: isize, handle: &AppHandle) {
        let len = self.items.len();
        if len == 0 {
            return;
        }
        let target = self.current as isize + delta;
        let index = if self.wrap_around {
            target.rem_euclid(len as isize) as usize
        } else {
            target.clamp(0, len as isize - 1) as usize
        };
        self.move_to(index, handle);
    }

    fn select_current(&mut self, handle: &AppHandle) {
        let Some(item) = self.items.get_mut(self.current) else { return };
        item.selected.call(handle, ());
        let args = (self.current, item.main.clone(), item.secondary.clone());
        self.selected.call(handle, args);
    }
}

impl Default for List {
    fn default() -> Self {
        Self::new()
    }
}

impl Primitive for List {
    fn kind(&self) -> &'static str {
        "List"
    }

    fn draw(&self, region: Region, style: &Style, focused: bool) -> Vec<Strip> {
        if region.is_empty() {
            return Vec::new();
        }
        let base = style.cell();
        let per_item = self.rows_per_item();
        let visible_items = (region.height / per_item).max(1) as usize;
        let first = (self.current + 1).saturating_sub(visible_items);
        self.first_shown.set(first);

        let mut strips = Vec::new();
        for (slot, (index, item)) in self.items.iter().enumerate().skip(first).take(visible_items).enumerate() {
            let row = slot as i32 * per_item;
            let mut main_cell = base;
            if index == self.current {
                main_cell = if focused { base.reverse() } else { base.bold() };
            }
            let main = match item.shortcut {
                Some(key) => format!("({key}) {}", item.main),
                None => item.main.clone(),
            };
            let mut strip = draw::aligned_line(region, row, &main, style.align, base);
            strip.restyle(|_| main_cell);
            strips.push(strip);
            if self.show_secondary && row + 1 < region.height {
                strips.push(draw::aligned_line(region, row + 1, &item.secondary, style.align, base.dim()));
            }
        }
        strips
    }

    fn handle_key(&mut self, key: KeyEvent, ctx: &EventCtx<'_>) -> EventResult {
        if let Some(c) = key.printable() {
            let Some(index) = self.items.iter().position(|item| item.shortcut == Some(c)) else {
                return EventResult::Ignored;
            };
            self.move_to(index, ctx.handle);
            self.select_current(ctx.handle);
            return EventResult::Consumed;
        }
        match key.code {
            Key::Up => self.step(-1, ctx.handle),
            Key::Down => self.step(1, ctx.handle),
            Key::Home => self.move_to(0, ctx.handle),
            Key::End => self.move_to(self.items.len().saturating_sub(1), ctx.handle),
            Key::Enter => self.select_current(ctx.handle),
            Key::Escape | Key::Tab | Key::BackTab => {
                self.done.call(ctx.handle, key.code);
                return EventResult::Ignored;
            }
            _ => return EventResult::Ignored,
        }
        EventResult::Consumed
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, local: Offset, ctx: &EventCtx<'_>) -> EventResult {
        match mouse.kind {
            MouseAction::ScrollUp => self.step(-1, ctx.handle),
            MouseAction::ScrollDown => self.step(1, ctx.handle),
            MouseAction::Down(MouseBtn::Left) => {
                let index = self.first_shown.get() + (local.y / self.rows_per_item()).max(0) as usize;
                self.move_to(index, ctx.handle);
                if index == self.current {
                    self.select_current(ctx.handle);
                }
            }
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
        self.changed.call(ctx.handle, self.current)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
