//! Crossterm terminal output.
//!
//! The `Driver` wraps a buffered stdout writer: alternate screen and raw mode,
//! mouse capture, window title, and writing batches of [`CellUpdate`]s.

use std::io::{self, BufWriter, Stdout, Write};

use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute, queue,
    style::{Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};

use super::compositor::CellUpdate;
use super::style::CellStyle;

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Terminal output using crossterm.
///
/// The driver does not enter the alternate screen on creation; call
/// [`Driver::enter`] explicitly and [`Driver::leave`] on the way out.
pub struct Driver {
    writer: BufWriter<Stdout>,
    mouse_captured: bool,
}

impl Driver {
    pub fn new() -> Self {
        Self { writer: BufWriter::new(io::stdout()), mouse_captured: false }
    }

    /// Enter alternate screen, enable raw mode and hide the cursor.
    pub fn enter(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(self.writer, EnterAlternateScreen, cursor::Hide)?;
        Ok(())
    }

    /// Undo everything [`Driver::enter`] and mouse capture did.
    pub fn leave(&mut self) -> io::Result<()> {
        if self.mouse_captured {
            execute!(self.writer, DisableMouseCapture)?;
            self.mouse_captured = false;
        }
        execute!(self.writer, ResetColor, cursor::Show, LeaveAlternateScreen)?;
        terminal::disable_raw_mode()
    }

    pub fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
        if enabled == self.mouse_captured {
            return Ok(());
        }
        if enabled {
            execute!(self.writer, EnableMouseCapture)?;
        } else {
            execute!(self.writer, DisableMouseCapture)?;
        }
        self.mouse_captured = enabled;
        Ok(())
    }

    pub fn set_title(&mut self, title: &str) -> io::Result<()> {
        execute!(self.writer, SetTitle(title))
    }

    /// Queue a batch of cell updates and flush them to the terminal.
    pub fn apply_updates(&mut self, updates: &[CellUpdate]) -> io::Result<()> {
        for update in updates {
            queue!(self.writer, cursor::MoveTo(update.x, update.y))?;
            self.apply_cell_style(&update.cell.style)?;
            queue!(self.writer, Print(update.cell.ch), SetAttribute(Attribute::Reset), ResetColor)?;
        }
        self.writer.flush()
    }

    /// Terminal size as (columns, rows).
    pub fn terminal_size() -> io::Result<(u16, u16)> {
        terminal::size()
    }

    fn apply_cell_style(&mut self, style: &CellStyle) -> io::Result<()> {
        if let Some(fg) = style.fg {
            queue!(self.writer, SetForegroundColor(fg.into()))?;
        }
        if let Some(bg) = style.bg {
            queue!(self.writer, SetBackgroundColor(bg.into()))?;
        }
        if style.bold {
            queue!(self.writer, SetAttribute(Attribute::Bold))?;
        }
        if style.dim {
            queue!(self.writer, SetAttribute(Attribute::Dim))?;
        }
        if style.italic {
            queue!(self.writer, SetAttribute(Attribute::Italic))?;
        }
        if style.underline {
            queue!(self.writer, SetAttribute(Attribute::Underlined))?;
        }
        if style.reverse {
            queue!(self.writer, SetAttribute(Attribute::Reverse))?;
        }
        Ok(())
    }
}

impl Default for Driver {
    fn default() -> Self {
        Self::new()
    }
}
