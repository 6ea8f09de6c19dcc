//! DropDown widget: a labelled selector that opens a list of options.

use std::cell::Cell;

use crate::error::{check_index, Result};
use crate::event::{AppHandle, Key, KeyEvent, MouseAction, MouseBtn, MouseEvent};
use crate::geometry::{Offset, Region};
use crate::render::draw;
use crate::render::strip::Strip;
use crate::render::style::{Align, Style};
use crate::widget::{Callback, EventCtx, EventResult, Primitive};

/// One choice of a [`DropDown`].
#[derive(Debug)]
pub struct DropDownOption {
    pub text: String,
    selected: Callback<()>,
}

impl DropDownOption {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), selected: Callback::new() }
    }

    pub fn on_selected(mut self, f: impl FnMut(&AppHandle, ()) + 'static) -> Self {
        self.selected.set(f);
        self
    }
}

/// `label [current option]`, opening a list below itself on `Enter`.
///
/// While open, `Up`/`Down` move the highlight, `Enter` picks it and `Escape`
/// closes without changing the selection. The open list is drawn as an
/// overlay on top of the rest of the screen.
#[derive(Debug, Default)]
pub struct DropDown {
    label: String,
    options: Vec<DropDownOption>,
    current: Option<usize>,
    open: bool,
    highlight: usize,
    /// Width of the content region in the last frame, for click mapping.
    last_width: Cell<i32>,
    pending_change: bool,
    selected: Callback<(usize, String)>,
    done: Callback<Key>,
}

impl DropDown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_options<S: Into<String>>(mut self, options: impl IntoIterator<Item = S>) -> Self {
        self.options.extend(options.into_iter().map(DropDownOption::new));
        self
    }

    pub fn add_option(&mut self, option: DropDownOption) -> &mut Self {
        self.options.push(option);
        self
    }

    /// Remove option `index`. Removing the current option clears the
    /// selection.
    pub fn remove_option(&mut self, index: usize) -> Result<DropDownOption> {
        check_index(index, self.options.len())?;
        let option = self.options.remove(index);
        self.current = match self.current {
            Some(c) if c == index => None,
            Some(c) if c > index => Some(c - 1),
            other => other,
        };
        self.highlight = self.highlight.min(self.options.len().saturating_sub(1));
        if self.options.is_empty() {
            self.open = false;
        }
        Ok(option)
    }

    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    pub fn option(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(|o| o.text.as_str())
    }

    /// Index and text of the current option.
    pub fn current_option(&self) -> Option<(usize, &str)> {
        self.current.map(|i| (i, self.options[i].text.as_str()))
    }

    /// Select option `index`. Its callbacks fire on the next loop
    /// iteration.
    pub fn set_current_option(&mut self, index: usize) -> Result<()> {
        check_index(index, self.options.len())?;
        self.current = Some(index);
        self.highlight = index;
        self.pending_change = true;
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_selected_func(&mut self, f: impl FnMut(&AppHandle, (usize, String)) + 'static) -> &mut Self {
        self.selected.set(f);
        self
    }

    pub fn set_done_func(&mut self, f: impl FnMut(&AppHandle, Key) + 'static) -> &mut Self {
        self.done.set(f);
        self
    }

    fn pick(&mut self, index: usize, handle: &AppHandle) {
        self.current = Some(index);
        self.open = false;
        self.fire_selected(handle);
    }

    fn fire_selected(&mut self, handle: &AppHandle) -> bool {
        let Some(index) = self.current else { return false };
        let Some(option) = self.options.get_mut(index) else { return false };
        let item = option.selected.call(handle, ());
        let list = self.selected.call(handle, (index, option.text.clone()));
        item || list
    }

    /// Where the open list sits for a field drawn in `region`.
    fn list_region(&self, region: Region) -> Region {
        let width = self.options.iter().map(|o| o.text.chars().count() as i32).max().unwrap_or(0) + 2;
        Region::new(region.x + self.field_start(), region.y + 1, width, self.options.len() as i32)
    }

    fn field_start(&self) -> i32 {
        if self.label.is_empty() {
            0
        } else {
            self.label.chars().count() as i32 + 1
        }
    }
}

impl Primitive for DropDown {
    fn kind(&self) -> &'static str {
        "DropDown"
    }

    fn draw(&self, region: Region, style: &Style, focused: bool) -> Vec<Strip> {
        if region.is_empty() {
            return Vec::new();
        }
        self.last_width.set(region.width);
        let base = style.cell();
        let mut strip = Strip::new(region.y, region.x);
        let start = self.field_start().min(region.width);
        if start > 0 {
            strip.push_str(&draw::truncate(&self.label, start - 1), base);
            strip.fill(start, base);
        }
        let field = self.current_option().map(|(_, text)| text).unwrap_or("");
        let field_cell = if focused { base.reverse() } else { base.underline() };
        strip.push_str(field, field_cell);
        strip.push_str(if self.open { " ▲" } else { " ▼" }, field_cell);
        strip.fill(region.width, base);
        vec![strip]
    }

    fn draw_overlay(&self, region: Region, style: &Style) -> Vec<Strip> {
        if !self.open || self.options.is_empty() {
            return Vec::new();
        }
        let base = style.cell().reverse();
        let list = self.list_region(region);
        self.options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                let cell = if i == self.highlight { base.bold() } else { base };
                let mut strip = draw::aligned_line(list, i as i32, &format!(" {}", option.text), Align::Left, cell);
                if i == self.highlight {
                    strip.restyle(|c| c.underline());
                }
                strip
            })
            .collect()
    }

    fn handle_key(&mut self, key: KeyEvent, ctx: &EventCtx<'_>) -> EventResult {
        if self.open {
            match key.code {
                Key::Up => self.highlight = self.highlight.saturating_sub(1),
                Key::Down => self.highlight = (self.highlight + 1).min(self.options.len().saturating_sub(1)),
                Key::Enter | Key::Char(' ') => self.pick(self.highlight, ctx.handle),
                Key::Escape => self.open = false,
                _ => return EventResult::Ignored,
            }
            return EventResult::Consumed;
        }
        match key.code {
            Key::Enter | Key::Char(' ') | Key::Down if !self.options.is_empty() => {
                self.open = true;
                self.highlight = self.current.unwrap_or(0);
                EventResult::Consumed
            }
            Key::Escape | Key::Tab | Key::BackTab => {
                self.done.call(ctx.handle, key.code);
                EventResult::Ignored
            }
            _ => EventResult::Ignored,
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, local: Offset, _ctx: &EventCtx<'_>) -> EventResult {
        if mouse.kind != MouseAction::Down(MouseBtn::Left) {
            return EventResult::Ignored;
        }
        if !self.options.is_empty() && local.x < self.last_width.get().max(1) {
            self.open = !self.open;
            self.highlight = self.current.unwrap_or(0);
        }
        EventResult::Consumed
    }

    fn overlay_region(&self, region: Region) -> Option<Region> {
        (self.open && !self.options.is_empty()).then(|| self.list_region(region))
    }

    fn handle_overlay_mouse(&mut self, mouse: MouseEvent, local: Offset, ctx: &EventCtx<'_>) -> EventResult {
        if !self.open {
            return EventResult::Ignored;
        }
        if mouse.kind == MouseAction::Down(MouseBtn::Left) {
            if let Ok(index) = usize::try_from(local.y) {
                if index < self.options.len() {
                    self.pick(index, ctx.handle);
                }
            }
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
        self.fire_selected(ctx.handle)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
