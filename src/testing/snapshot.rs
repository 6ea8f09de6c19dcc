//! Snapshot rendering helpers.
//!
//! Functions for converting rendered output (widget strips, compositor
//! frames) into plain-text strings suitable for snapshot assertions.

use crate::geometry::Region;
use crate::render::compositor::Compositor;
use crate::render::strip::Strip;
use crate::render::style::Style;
use crate::widget::Primitive;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Draw a primitive unfocused into a `width` x `height` region at the origin
/// and return its text.
///
/// Each row becomes one line with trailing spaces trimmed. Lines are joined
/// with `'\n'` and the last line has no trailing newline.
///
/// ```ignore
/// use trellis_tui::testing::render_to_string;
/// use trellis_tui::widgets::Button;
///
/// let output = render_to_string(&Button::new("OK"), 10, 1);
/// assert!(output.contains("OK"));
/// ```
pub fn render_to_string(widget: &dyn Primitive, width: i32, height: i32) -> String {
    let strips = widget.draw(Region::new(0, 0, width, height), &Style::default(), false);
    strips_to_string(&strips, width, height)
}

/// Convert raw strips to a plain text string.
///
/// Cells outside the `width` x `height` grid are dropped.
pub fn strips_to_string(strips: &[Strip], width: i32, height: i32) -> String {
    if width <= 0 || height <= 0 {
        return String::new();
    }

    let mut grid = vec![vec![' '; width as usize]; height as usize];
    for strip in strips {
        if strip.y < 0 || strip.y >= height {
            continue;
        }
        let row = &mut grid[strip.y as usize];
        for (i, cell) in strip.cells.iter().enumerate() {
            let x = strip.x_offset + i as i32;
            if (0..width).contains(&x) {
                row[x as usize] = cell.ch;
            }
        }
    }
    join_rows(grid.into_iter().map(|row| row.into_iter().collect()))
}

/// Convert a whole compositor frame to a plain text string.
pub fn compositor_to_string(compositor: &Compositor) -> String {
    if compositor.width == 0 || compositor.height == 0 {
        return String::new();
    }
    join_rows((0..compositor.height).map(|y| compositor.row_text(y)))
}

fn join_rows(rows: impl Iterator<Item = String>) -> String {
    rows.map(|row| row.trim_end().to_owned()).collect::<Vec<_>>().join("\n")
}

// ===========================================================================
// Tests
// ===========================================================================
