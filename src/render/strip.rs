//! Strip: a horizontal run of styled terminal cells.
//!
//! Widgets draw by returning `Vec<Strip>` in absolute screen coordinates;
//! the compositor clips them to the widget's region and places them into the
//! back buffer.

use super::style::CellStyle;

// ---------------------------------------------------------------------------
// StyledCell
// ---------------------------------------------------------------------------

/// A single terminal cell: one character with associated style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyledCell {
    pub ch: char,
    pub style: CellStyle,
}

impl StyledCell {
    pub fn new(ch: char, style: CellStyle) -> Self {
        Self { ch, style }
    }

    /// A blank (space) cell with default style.
    pub fn blank() -> Self {
        Self { ch: ' ', style: CellStyle::default() }
    }

    /// A blank (space) cell with the given style.
    pub fn blank_styled(style: CellStyle) -> Self {
        Self { ch: ' ', style }
    }
}

impl Default for StyledCell {
    fn default() -> Self {
        Self::blank()
    }
}

// ---------------------------------------------------------------------------
// Strip
// ---------------------------------------------------------------------------

/// A horizontal line of styled cells starting at `(x_offset, y)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strip {
    pub y: i32,
    pub x_offset: i32,
    pub cells: Vec<StyledCell>,
}

impl Strip {
    pub fn new(y: i32, x_offset: i32) -> Self {
        Self { y, x_offset, cells: Vec::new() }
    }

    /// A strip holding `text` in a single style.
    pub fn text(y: i32, x_offset: i32, text: &str, style: CellStyle) -> Self {
        let mut strip = Self::new(y, x_offset);
        strip.push_str(text, style);
        strip
    }

    pub fn push(&mut self, ch: char, style: CellStyle) {
        self.cells.push(StyledCell::new(ch, style));
    }

    pub fn push_str(&mut self, text: &str, style: CellStyle) {
        self.cells.extend(text.chars().map(|ch| StyledCell::new(ch, style)));
    }

    pub fn width(&self) -> i32 {
        self.cells.len() as i32
    }

    /// The rightmost x position (exclusive).
    pub fn right(&self) -> i32 {
        self.x_offset + self.width()
    }

    /// Keep only cells whose absolute x falls in `[x_start, x_end)`.
    pub fn crop(&self, x_start: i32, x_end: i32) -> Strip {
        let mut result = Strip::new(self.y, x_start);
        for (i, cell) in self.cells.iter().enumerate() {
            let cell_x = self.x_offset + i as i32;
            if cell_x >= x_start && cell_x < x_end {
                if result.cells.is_empty() {
                    result.x_offset = cell_x;
                }
                result.cells.push(*cell);
            }
        }
        result
    }

    /// Pad with styled blanks, or truncate, to exactly `width` cells.
    pub fn fill(&mut self, width: i32, style: CellStyle) {
        let w = width.max(0) as usize;
        if self.cells.len() < w {
            self.cells.resize(w, StyledCell::blank_styled(style));
        } else {
            self.cells.truncate(w);
        }
    }

    /// Apply `f` to every cell's style, e.g. to reverse a highlighted row.
    pub fn restyle(&mut self, f: impl Fn(CellStyle) -> CellStyle) {
        for cell in &mut self.cells {
            cell.style = f(cell.style);
        }
    }

    /// The characters of this strip as a `String`.
    pub fn as_text(&self) -> String {
        self.cells.iter().map(|c| c.ch).collect()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::style::Color;

    fn red() -> CellStyle {
        CellStyle::new().fg(Color::Red)
    }

    // ── StyledCell ─────────────────────────────────────────────────────

    #[test]
    fn blank_cell_is_space() {
        let c = StyledCell::blank();
        assert_eq!(c.ch, ' ');
        assert_eq!(c.style, CellStyle::default());
        assert_eq!(StyledCell::default(), c);
    }

    // ── Strip construction ─────────────────────────────────────────────

    #[test]
    fn text_strip() {
        let s = Strip::text(2, 3, "abc", red());
        assert_eq!(s.y, 2);
        assert_eq!(s.x_offset, 3);
        assert_eq!(s.width(), 3);
        assert_eq!(s.right(), 6);
        assert_eq!(s.as_text(), "abc");
        assert!(s.cells.iter().all(|c| c.style == red()));
    }

    // ── crop / fill ────────────────────────────────────────────────────

    #[test]
    fn crop_keeps_window() {
        let s = Strip::text(0, 2, "hello", CellStyle::default());
        let cropped = s.crop(3, 5);
        assert_eq!(cropped.x_offset, 3);
        assert_eq!(cropped.as_text(), "el");
    }

    #[test]
    fn crop_outside_is_empty() {
        let s = Strip::text(0, 0, "hi", CellStyle::default());
        assert!(s.crop(10, 20).cells.is_empty());
    }

    #[test]
    fn fill_pads_and_truncates() {
        let mut s = Strip::text(0, 0, "ab", CellStyle::default());
        s.fill(4, red());
        assert_eq!(s.as_text(), "ab  ");
        assert_eq!(s.cells[3].style, red());

        s.fill(1, red());
        assert_eq!(s.as_text(), "a");
    }

    #[test]
    fn restyle_all_cells() {
        let mut s = Strip::text(0, 0, "xy", CellStyle::default());
        s.restyle(|st| st.reverse());
        assert!(s.cells.iter().all(|c| c.style.reverse));
    }
}
