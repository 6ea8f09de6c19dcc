//! InputField widget: a single-line text entry with an optional label.
//!
//! The cursor is tracked in characters, not bytes, so editing is safe for
//! any UTF-8 input. An optional acceptance function vets every edit before
//! it is applied.

use std::fmt;

use crate::event::{AppHandle, Key, KeyEvent, MouseAction, MouseBtn, MouseEvent};
use crate::geometry::{Offset, Region};
use crate::render::draw;
use crate::render::strip::Strip;
use crate::render::style::Style;
use crate::widget::{Callback, EventCtx, EventResult, Primitive};

type AcceptFn = Box<dyn Fn(&str, char) -> bool>;

/// Only allow text that parses as a (possibly negative) integer.
pub fn accept_integer(text: &str, _last: char) -> bool {
    text == "-" || text.parse::<i64>().is_ok()
}

// ---------------------------------------------------------------------------
// InputField
// ---------------------------------------------------------------------------

/// A text entry field.
///
/// Drawn as `label` followed by the field. `field_width` of 0 means the field
/// takes the rest of the row. Every accepted edit fires *changed* with the
/// new text. `Enter` fires *done* and is consumed; `Escape`, `Tab` and
/// `BackTab` fire *done* and then bubble to the enclosing form and the
/// traversal bindings.
pub struct InputField {
    label: String,
    text: String,
    cursor: usize,
    field_width: i32,
    placeholder: String,
    mask: Option<char>,
    accept: Option<AcceptFn>,
    changed: Callback<String>,
    done: Callback<Key>,
}

impl InputField {
    pub fn new() -> Self {
        Self {
            label: String::new(),
            text: String::new(),
            cursor: 0,
            field_width: 0,
            placeholder: String::new(),
            mask: None,
            accept: None,
            changed: Callback::new(),
            done: Callback::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self.cursor = self.char_len();
        self
    }

    pub fn with_field_width(mut self, width: i32) -> Self {
        self.field_width = width.max(0);
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Draw every character as `mask` (for passwords).
    pub fn with_mask(mut self, mask: char) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Vet edits: `f(candidate_text, last_char)` returns whether to keep the
    /// edit. Deletions are checked with `'\0'` as the character.
    pub fn with_accept(mut self, f: impl Fn(&str, char) -> bool + 'static) -> Self {
        self.accept = Some(Box::new(f));
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text and move the cursor to the end. Does not fire
    /// *changed*.
    pub fn set_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.text = text.into();
        self.cursor = self.char_len();
        self
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set_changed_func(&mut self, f: impl FnMut(&AppHandle, String) + 'static) -> &mut Self {
        self.changed.set(f);
        self
    }

    pub fn set_done_func(&mut self, f: impl FnMut(&AppHandle, Key) + 'static) -> &mut Self {
        self.done.set(f);
        self
    }

    // -----------------------------------------------------------------------
    // Editing
    // -----------------------------------------------------------------------

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_at(&self, char_index: usize) -> usize {
        self.text.char_indices().nth(char_index).map(|(i, _)| i).unwrap_or(self.text.len())
    }

    /// Apply `candidate` if the acceptance function allows it.
    fn commit(&mut self, candidate: String, last: char, cursor: usize, handle: &AppHandle) -> bool {
        if let Some(accept) = &self.accept {
            if !accept(&candidate, last) {
                return false;
            }
        }
        self.text = candidate;
        self.cursor = cursor;
        self.changed.call(handle, self.text.clone());
        true
    }

    fn insert_str(&mut self, s: &str, handle: &AppHandle) -> bool {
        let Some(last) = s.chars().last() else { return false };
        let at = self.byte_at(self.cursor);
        let mut candidate = self.text.clone();
        candidate.insert_str(at, s);
        let cursor = self.cursor + s.chars().count();
        self.commit(candidate, last, cursor, handle)
    }

    fn delete_before(&mut self, handle: &AppHandle) {
        if self.cursor == 0 {
            return;
        }
        let start = self.byte_at(self.cursor - 1);
        let end = self.byte_at(self.cursor);
        let mut candidate = self.text.clone();
        candidate.replace_range(start..end, "");
        self.commit(candidate, '\0', self.cursor - 1, handle);
    }

    fn delete_at(&mut self, handle: &AppHandle) {
        if self.cursor >= self.char_len() {
            return;
        }
        let start = self.byte_at(self.cursor);
        let end = self.byte_at(self.cursor + 1);
        let mut candidate = self.text.clone();
        candidate.replace_range(start..end, "");
        self.commit(candidate, '\0', self.cursor, handle);
    }

    /// Text as it appears on screen.
    fn shown_text(&self) -> String {
        match self.mask {
            Some(m) => std::iter::repeat(m).take(self.char_len()).collect(),
            None => self.text.clone(),
        }
    }

    /// Column where the field starts, relative to the content region.
    fn field_start(&self) -> i32 {
        if self.label.is_empty() {
            0
        } else {
            self.label.chars().count() as i32 + 1
        }
    }
}

impl Default for InputField {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputField")
            .field("label", &self.label)
            .field("text", &self.text)
            .field("cursor", &self.cursor)
            .field("field_width", &self.field_width)
            .finish_non_exhaustive()
    }
}

impl Primitive for InputField {
    fn kind(&self) -> &'static str {
        "InputField"
    }

    fn draw(&self, region: Region, style: &Style, focused: bool) -> Vec<Strip> {
        if region.is_empty() {
            return Vec::new();
        }
        let base = style.cell();
        let field_cell = base.underline();
        let start = self.field_start().min(region.width);
        let available = region.width - start;
        let width = if self.field_width > 0 { self.field_width.min(available) } else { available };

        let mut strip = Strip::new(region.y, region.x);
        if start > 0 {
            strip.push_str(&draw::truncate(&self.label, start - 1), base);
            strip.fill(start, base);
        }

        let (shown, cell) = if self.text.is_empty() && !self.placeholder.is_empty() {
            (self.placeholder.clone(), field_cell.dim())
        } else {
            (self.shown_text(), field_cell)
        };
        // Scroll so the cursor stays inside the field.
        let scroll = (self.cursor as i32 - width + 1).max(0) as usize;
        let visible: String = shown.chars().skip(scroll).take(width.max(0) as usize).collect();
        let field_x = strip.width();
        strip.push_str(&visible, cell);
        strip.fill(start + width, field_cell);

        if focused {
            let cursor_x = (field_x + self.cursor as i32 - scroll as i32) as usize;
            if let Some(c) = strip.cells.get_mut(cursor_x) {
                c.style = c.style.reverse();
            }
        }
        strip.fill(region.width, base);
        vec![strip]
    }

    fn handle_key(&mut self, key: KeyEvent, ctx: &EventCtx<'_>) -> EventResult {
        if let Some(c) = key.printable() {
            self.insert_str(&c.to_string(), ctx.handle);
            return EventResult::Consumed;
        }
        match key.code {
            Key::Backspace => self.delete_before(ctx.handle),
            Key::Delete => self.delete_at(ctx.handle),
            Key::Left => self.cursor = self.cursor.saturating_sub(1),
            Key::Right => self.cursor = (self.cursor + 1).min(self.char_len()),
            Key::Home => self.cursor = 0,
            Key::End => self.cursor = self.char_len(),
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

    fn handle_mouse(&mut self, mouse: MouseEvent, local: Offset, _ctx: &EventCtx<'_>) -> EventResult {
        if mouse.kind != MouseAction::Down(MouseBtn::Left) {
            return EventResult::Ignored;
        }
        let column = (local.x - self.field_start()).max(0) as usize;
        self.cursor = column.min(self.char_len());
        EventResult::Consumed
    }

    fn handle_paste(&mut self, text: &str, ctx: &EventCtx<'_>) -> EventResult {
        let line: String = text.chars().filter(|c| !c.is_control()).collect();
        self.insert_str(&line, ctx.handle);
        EventResult::Consumed
    }

    fn accepts_focus(&self) -> bool {
        true
    }
}

// ===========================================================================
// Tests
// ===========================================================================
