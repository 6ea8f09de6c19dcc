//! Table widget: a grid of text cells with optional fixed header rows and a
//! selection cursor.

use crate::error::{Error, Result};
use crate::event::{AppHandle, Key, KeyEvent, MouseAction, MouseBtn, MouseEvent};
use crate::geometry::{Offset, Region};
use crate::render::draw;
use crate::render::strip::Strip;
use crate::render::style::Style;
use crate::widget::{Callback, EventCtx, EventResult, Primitive};

/// A table of string cells.
///
/// Column widths are the widest cell in each column. With `rows_selectable`
/// the cursor moves by row; with `columns_selectable` by column; with both, by
/// cell. Arrow keys move the selection and fire *selection_changed*; `Enter`
/// fires *selected*.
#[derive(Debug, Default)]
pub struct Table {
    cells: Vec<Vec<String>>,
    fixed_rows: usize,
    rows_selectable: bool,
    columns_selectable: bool,
    selection: (usize, usize),
    pending_change: bool,
    selected: Callback<(usize, usize)>,
    selection_changed: Callback<(usize, usize)>,
    done: Callback<Key>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows that stay on top and cannot be selected.
    pub fn with_fixed_rows(mut self, rows: usize) -> Self {
        self.fixed_rows = rows;
        self.selection.0 = self.selection.0.max(rows);
        self
    }

    pub fn with_selectable(mut self, rows: bool, columns: bool) -> Self {
        self.rows_selectable = rows;
        self.columns_selectable = columns;
        self
    }

    /// Set one cell, growing the table as needed.
    pub fn set_cell(&mut self, row: usize, column: usize, text: impl Into<String>) -> &mut Self {
        if self.cells.len() <= row {
            self.cells.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.cells[row];
        if cells.len() <= column {
            cells.resize(column + 1, String::new());
        }
        cells[column] = text.into();
        self
    }

    /// Append a row.
    pub fn push_row<S: Into<String>>(&mut self, row: impl IntoIterator<Item = S>) -> &mut Self {
        self.cells.push(row.into_iter().map(Into::into).collect());
        self
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.cells.get(row)?.get(column).map(String::as_str)
    }

    pub fn row_count(&self) -> usize {
        self.cells.len()
    }

    pub fn column_count(&self) -> usize {
        self.cells.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn clear(&mut self) -> &mut Self {
        self.cells.clear();
        self.selection = (self.fixed_rows, 0);
        self
    }

    pub fn selection(&self) -> (usize, usize) {
        self.selection
    }

    /// Move the selection. Fails when the cell is outside the table.
    pub fn select(&mut self, row: usize, column: usize) -> Result<()> {
        if row >= self.row_count() {
            return Err(Error::IndexOutOfRange { index: row, len: self.row_count() });
        }
        let columns = self.column_count();
        if column >= columns {
            return Err(Error::IndexOutOfRange { index: column, len: columns });
        }
        if self.selection != (row, column) {
            self.selection = (row, column);
            self.pending_change = true;
        }
        Ok(())
    }

    pub fn set_selected_func(&mut self, f: impl FnMut(&AppHandle, (usize, usize)) + 'static) -> &mut Self {
        self.selected.set(f);
        self
    }

    pub fn set_selection_changed_func(
        &mut self,
        f: impl FnMut(&AppHandle, (usize, usize)) + 'static,
    ) -> &mut Self {
        self.selection_changed.set(f);
        self
    }

    pub fn set_done_func(&mut self, f: impl FnMut(&AppHandle, Key) + 'static) -> &mut Self {
        self.done.set(f);
        self
    }

    fn is_selectable(&self) -> bool {
        self.rows_selectable || self.columns_selectable
    }

    fn column_widths(&self) -> Vec<i32> {
        let mut widths = vec![0; self.column_count()];
        for row in &self.cells {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count() as i32);
            }
        }
        widths
    }

    fn move_selection(&mut self, d_row: isize, d_col: isize, handle: &AppHandle) {
        let (row, col) = self.selection;
        let row = if self.rows_selectable {
            row.saturating_add_signed(d_row).clamp(self.fixed_rows, self.row_count().saturating_sub(1).max(self.fixed_rows))
        } else {
            row
        };
        let col = if self.columns_selectable {
            col.saturating_add_signed(d_col).min(self.column_count().saturating_sub(1))
        } else {
            col
        };
        if (row, col) != self.selection {
            self.selection = (row, col);
            self.selection_changed.call(handle, self.selection);
        }
    }

    /// First scrolled row so the selection is visible in `height` rows.
    fn scroll_for(&self, height: i32) -> usize {
        let body = (height as usize).saturating_sub(self.fixed_rows).max(1);
        let sel = self.selection.0.saturating_sub(self.fixed_rows);
        (sel + 1).saturating_sub(body)
    }
}

impl Primitive for Table {
    fn kind(&self) -> &'static str {
        "Table"
    }

    fn draw(&self, region: Region, style: &Style, focused: bool) -> Vec<Strip> {
        if region.is_empty() {
            return Vec::new();
        }
        let base = style.cell();
        let widths = self.column_widths();
        let scroll = self.scroll_for(region.height);
        let fixed = 0..self.fixed_rows.min(self.row_count());
        let body = self.fixed_rows + scroll..self.row_count();

        fixed
            .chain(body)
            .take(region.height as usize)
            .enumerate()
            .map(|(screen_row, row)| {
                let mut strip = Strip::new(region.y + screen_row as i32, region.x);
                for (col, width) in widths.iter().enumerate() {
                    let text = self.cell(row, col).unwrap_or("");
                    let highlight = self.is_selectable()
                        && row >= self.fixed_rows
                        && (!self.rows_selectable || row == self.selection.0)
                        && (!self.columns_selectable || col == self.selection.1);
                    let cell = if highlight && focused {
                        base.reverse()
                    } else if row < self.fixed_rows {
                        base.bold()
                    } else {
                        base
                    };
                    let start = strip.width();
                    strip.push_str(&draw::truncate(text, *width), cell);
                    strip.fill(start + width, cell);
                    strip.push(' ', base);
                }
                strip.fill(region.width, base);
                strip
            })
            .collect()
    }

    fn handle_key(&mut self, key: KeyEvent, ctx: &EventCtx<'_>) -> EventResult {
        if !self.is_selectable() {
            return EventResult::Ignored;
        }
        match key.code {
            Key::Up => self.move_selection(-1, 0, ctx.handle),
            Key::Down => self.move_selection(1, 0, ctx.handle),
            Key::Left => self.move_selection(0, -1, ctx.handle),
            Key::Right => self.move_selection(0, 1, ctx.handle),
            Key::PageUp => self.move_selection(-10, 0, ctx.handle),
            Key::PageDown => self.move_selection(10, 0, ctx.handle),
            Key::Enter => {
                if self.row_count() > self.fixed_rows {
                    self.selected.call(ctx.handle, self.selection);
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
            MouseAction::ScrollUp => self.move_selection(-1, 0, ctx.handle),
            MouseAction::ScrollDown => self.move_selection(1, 0, ctx.handle),
            MouseAction::Down(MouseBtn::Left) => {}
            _ => return EventResult::Ignored,
        }
        EventResult::Consumed
    }

    fn accepts_focus(&self) -> bool {
        self.is_selectable()
    }

    fn notify_changes(&mut self, ctx: &EventCtx<'_>) -> bool {
        if !std::mem::take(&mut self.pending_change) {
            return false;
        }
        self.selection_changed.call(ctx.handle, self.selection)
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

    fn sample() -> Table {
        let mut t = Table::new().with_fixed_rows(1).with_selectable(true, false);
        t.push_row(["Name", "Qty"]);
        t.push_row(["apple", "3"]);
        t.push_row(["pear", "12"]);
        t
    }

    // ── Cells ────────────────────────────────────────────────────────

    #[test]
    fn set_cell_grows_table() {
        let mut t = Table::new();
        t.set_cell(2, 1, "x");
        assert_eq!(t.row_count(), 3);
        assert_eq!(t.column_count(), 2);
        assert_eq!(t.cell(2, 1), Some("x"));
        assert_eq!(t.cell(0, 0), None);
    }

    #[test]
    fn draw_pads_columns() {
        let t = sample();
        let strips = t.draw(Region::new(0, 0, 12, 3), &Style::default(), false);
        let rows: Vec<String> = strips.iter().map(Strip::as_text).collect();
        assert_eq!(rows, vec!["Name  Qty   ", "apple 3     ", "pear  12    "]);
        assert!(strips[0].cells[0].style.bold);
    }

    #[test]
    fn selection_scrolls_into_view() {
        let mut t = sample();
        t.push_row(["plum", "1"]);
        t.select(3, 0).unwrap();
        let strips = t.draw(Region::new(0, 0, 12, 2), &Style::default(), true);
        assert_eq!(strips[0].as_text(), "Name  Qty   ");
        assert_eq!(strips[1].as_text(), "plum  1     ");
        assert!(strips[1].cells[0].style.reverse);
    }

    // ── Selection ────────────────────────────────────────────────────

    #[test]
    fn select_is_bounds_checked() {
        let mut t = sample();
        assert!(matches!(t.select(9, 0), Err(Error::IndexOutOfRange { index: 9, len: 3 })));
        assert!(matches!(t.select(1, 5), Err(Error::IndexOutOfRange { index: 5, len: 2 })));
        assert_eq!(t.selection(), (1, 0));
    }

    #[test]
    fn arrows_move_within_body_and_notify() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut t = sample();
        t.set_selection_changed_func(move |_, sel| sink.borrow_mut().push(sel));

        let handle = test_handle();
        let ctx = EventCtx { handle: &handle, node: NodeId::default() };
        t.handle_key(KeyEvent::plain(Key::Up), &ctx);
        t.handle_key(KeyEvent::plain(Key::Down), &ctx);
        t.handle_key(KeyEvent::plain(Key::Down), &ctx);
        t.handle_key(KeyEvent::plain(Key::Right), &ctx);

        assert_eq!(*seen.borrow(), vec![(2, 0)]);
    }

    #[test]
    fn enter_reports_selected_cell() {
        let seen = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&seen);
        let mut t = sample();
        t.set_selected_func(move |_, sel| *sink.borrow_mut() = Some(sel));

        let handle = test_handle();
        let ctx = EventCtx { handle: &handle, node: NodeId::default() };
        assert!(t.handle_key(KeyEvent::plain(Key::Enter), &ctx).is_consumed());
        assert_eq!(*seen.borrow(), Some((1, 0)));
    }

    #[test]
    fn programmatic_select_notifies_later() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut t = sample();
        t.set_selection_changed_func(move |_, sel| sink.borrow_mut().push(sel));
        t.select(2, 1).unwrap();
        assert!(seen.borrow().is_empty());

        let handle = test_handle();
        let ctx = EventCtx { handle: &handle, node: NodeId::default() };
        assert!(t.notify_changes(&ctx));
        assert_eq!(*seen.borrow(), vec![(2, 1)]);
    }

    #[test]
    fn unselectable_table_ignores_keys() {
        let mut t = Table::new();
        t.push_row(["a"]);
        let handle = test_handle();
        let ctx = EventCtx { handle: &handle, node: NodeId::default() };
        assert_eq!(t.handle_key(KeyEvent::plain(Key::Down), &ctx), EventResult::Ignored);
        assert!(!t.accepts_focus());
    }
}
