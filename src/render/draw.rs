//! Small drawing helpers shared by the widgets and the frame renderer.

use super::strip::Strip;
use super::style::{Align, CellStyle};
use crate::geometry::Region;

const TOP_LEFT: char = '┌';
const TOP_RIGHT: char = '┐';
const BOTTOM_LEFT: char = '└';
const BOTTOM_RIGHT: char = '┘';
const HORIZONTAL: char = '─';
const VERTICAL: char = '│';

/// Truncate `text` to at most `width` characters.
pub fn truncate(text: &str, width: i32) -> String {
    text.chars().take(width.max(0) as usize).collect()
}

/// One row of `text` inside `region` at row `row` (relative), aligned and
/// padded to the region width.
pub fn aligned_line(region: Region, row: i32, text: &str, align: Align, style: CellStyle) -> Strip {
    let shown = truncate(text, region.width);
    let len = shown.chars().count() as i32;
    let mut strip = Strip::new(region.y + row, region.x);
    let pad = align.offset(len, region.width);
    for _ in 0..pad {
        strip.push(' ', style);
    }
    strip.push_str(&shown, style);
    strip.fill(region.width, style);
    strip
}

/// A single-line box border around `region`.
pub fn border(region: Region, style: CellStyle) -> Vec<Strip> {
    if region.width < 2 || region.height < 2 {
        return Vec::new();
    }
    let inner = (region.width - 2) as usize;
    let mut strips = Vec::with_capacity(region.height as usize);

    let mut top = Strip::new(region.y, region.x);
    top.push(TOP_LEFT, style);
    top.push_str(&HORIZONTAL.to_string().repeat(inner), style);
    top.push(TOP_RIGHT, style);
    strips.push(top);

    for y in region.y + 1..region.bottom() - 1 {
        strips.push(Strip::text(y, region.x, &VERTICAL.to_string(), style));
        strips.push(Strip::text(y, region.right() - 1, &VERTICAL.to_string(), style));
    }

    let mut bottom = Strip::new(region.bottom() - 1, region.x);
    bottom.push(BOTTOM_LEFT, style);
    bottom.push_str(&HORIZONTAL.to_string().repeat(inner), style);
    bottom.push(BOTTOM_RIGHT, style);
    strips.push(bottom);

    strips
}

/// A title drawn over the top border line of `region`.
pub fn title(region: Region, text: &str, align: Align, style: CellStyle) -> Option<Strip> {
    let available = region.width - 2;
    if available <= 0 || text.is_empty() {
        return None;
    }
    let shown = truncate(text, available);
    let len = shown.chars().count() as i32;
    let x = region.x + 1 + align.offset(len, available);
    Some(Strip::text(region.y, x, &shown, style))
}

/// A horizontal bar `filled` cells long out of `width`.
pub fn bar(region: Region, row: i32, filled: i32, style: CellStyle) -> Strip {
    let filled = filled.clamp(0, region.width.max(0));
    let mut strip = Strip::new(region.y + row, region.x);
    for _ in 0..filled {
        strip.push('█', style);
    }
    strip.fill(region.width, style);
    strip
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_by_chars() {
        assert_eq!(truncate("hello", 3), "hel");
        assert_eq!(truncate("hi", 10), "hi");
        assert_eq!(truncate("hi", -1), "");
    }

    #[test]
    fn aligned_line_pads_to_width() {
        let r = Region::new(2, 1, 6, 3);
        let s = aligned_line(r, 1, "ab", Align::Center, CellStyle::default());
        assert_eq!(s.y, 2);
        assert_eq!(s.x_offset, 2);
        assert_eq!(s.as_text(), "  ab  ");

        let s = aligned_line(r, 0, "abcdefgh", Align::Right, CellStyle::default());
        assert_eq!(s.as_text(), "abcdef");
    }

    #[test]
    fn border_shape() {
        let strips = border(Region::new(0, 0, 4, 3), CellStyle::default());
        assert_eq!(strips[0].as_text(), "┌──┐");
        assert_eq!(strips[1].as_text(), "│");
        assert_eq!(strips[2].x_offset, 3);
        assert_eq!(strips.last().map(Strip::as_text), Some("└──┘".to_string()));
    }

    #[test]
    fn border_too_small_is_empty() {
        assert!(border(Region::new(0, 0, 1, 5), CellStyle::default()).is_empty());
    }

    #[test]
    fn title_placement() {
        let r = Region::new(0, 0, 10, 3);
        let t = title(r, "Hi", Align::Left, CellStyle::default());
        assert_eq!(t.as_ref().map(|s| s.x_offset), Some(1));
        let t = title(r, "Hi", Align::Right, CellStyle::default());
        assert_eq!(t.as_ref().map(|s| s.x_offset), Some(7));
        assert!(title(r, "", Align::Left, CellStyle::default()).is_none());
    }

    #[test]
    fn bar_fill() {
        let s = bar(Region::new(0, 0, 5, 1), 0, 2, CellStyle::default());
        assert_eq!(s.as_text(), "██   ");
    }
}
