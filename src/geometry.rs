//! Cell geometry: Offset, Region, Spacing.
//!
//! Coordinates are signed terminal cells so that intermediate layout results
//! may go negative before being clipped against the screen.

use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Offset
// ---------------------------------------------------------------------------

/// A position or displacement in terminal cells.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Offset {
    pub x: i32,
    pub y: i32,
}

impl Offset {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Offset {
    type Output = Offset;
    fn add(self, rhs: Offset) -> Offset {
        Offset::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Offset {
    type Output = Offset;
    fn sub(self, rhs: Offset) -> Offset {
        Offset::new(self.x - rhs.x, self.y - rhs.y)
    }
}

// ---------------------------------------------------------------------------
// Region
// ---------------------------------------------------------------------------

/// A rectangle of cells: top-left corner plus size.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    pub const EMPTY: Region = Region { x: 0, y: 0, width: 0, height: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Exclusive right edge.
    #[inline]
    pub const fn right(self) -> i32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    #[inline]
    pub const fn bottom(self) -> i32 {
        self.y + self.height
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// The top-left corner.
    #[inline]
    pub const fn offset(self) -> Offset {
        Offset::new(self.x, self.y)
    }

    /// Whether the cell (x, y) lies inside.
    #[inline]
    pub const fn contains(self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// The overlap of two regions, or [`Region::EMPTY`].
    pub fn intersection(self, other: Region) -> Region {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let width = self.right().min(other.right()) - x;
        let height = self.bottom().min(other.bottom()) - y;
        if width <= 0 || height <= 0 {
            Region::EMPTY
        } else {
            Region::new(x, y, width, height)
        }
    }

    pub fn translate(self, by: Offset) -> Region {
        Region::new(self.x + by.x, self.y + by.y, self.width, self.height)
    }

    /// Shrink inward by `insets`; the size never goes below zero.
    pub fn shrink(self, insets: Spacing) -> Region {
        Region::new(
            self.x + insets.left,
            self.y + insets.top,
            (self.width - insets.left - insets.right).max(0),
            (self.height - insets.top - insets.bottom).max(0),
        )
    }

    /// `(top, bottom)` split `rows` cells below the top edge, clamped to the
    /// region.
    pub fn split_horizontal(self, rows: i32) -> (Region, Region) {
        let rows = rows.clamp(0, self.height.max(0));
        (
            Region::new(self.x, self.y, self.width, rows),
            Region::new(self.x, self.y + rows, self.width, self.height - rows),
        )
    }

    /// `(left, right)` split `columns` cells right of the left edge, clamped
    /// to the region.
    pub fn split_vertical(self, columns: i32) -> (Region, Region) {
        let columns = columns.clamp(0, self.width.max(0));
        (
            Region::new(self.x, self.y, columns, self.height),
            Region::new(self.x + columns, self.y, self.width - columns, self.height),
        )
    }
}

// ---------------------------------------------------------------------------
// Spacing
// ---------------------------------------------------------------------------

/// Insets on the four sides of a rectangle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Spacing {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Spacing {
    pub const ZERO: Spacing = Spacing { top: 0, right: 0, bottom: 0, left: 0 };

    /// The same inset on every side.
    #[inline]
    pub const fn all(value: i32) -> Self {
        Self { top: value, right: value, bottom: value, left: value }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_arithmetic() {
        let a = Offset::new(1, 2);
        let b = Offset::new(3, 4);
        assert_eq!(a + b, Offset::new(4, 6));
        assert_eq!(b - a, Offset::new(2, 2));
    }

    #[test]
    fn contains_is_half_open() {
        let r = Region::new(0, 0, 4, 2);
        assert!(r.contains(0, 0));
        assert!(r.contains(3, 1));
        assert!(!r.contains(4, 1));
        assert!(!r.contains(3, 2));
        assert!(!r.contains(-1, 0));
    }

    #[test]
    fn intersection() {
        let a = Region::new(0, 0, 10, 10);
        assert_eq!(a.intersection(Region::new(5, 5, 10, 10)), Region::new(5, 5, 5, 5));
        assert_eq!(a.intersection(Region::new(12, 0, 2, 2)), Region::EMPTY);
    }

    #[test]
    fn translate_moves_origin() {
        let r = Region::new(1, 1, 3, 3).translate(Offset::new(2, -1));
        assert_eq!(r, Region::new(3, 0, 3, 3));
    }

    #[test]
    fn shrink_for_border() {
        assert_eq!(Region::new(0, 0, 10, 5).shrink(Spacing::all(1)), Region::new(1, 1, 8, 3));
        assert!(Region::new(0, 0, 1, 1).shrink(Spacing::all(1)).is_empty());
    }

    #[test]
    fn splits_clamp() {
        let r = Region::new(0, 0, 10, 4);
        assert_eq!(r.split_horizontal(1), (Region::new(0, 0, 10, 1), Region::new(0, 1, 10, 3)));
        assert_eq!(r.split_horizontal(9).1.height, 0);
        assert_eq!(r.split_vertical(-2).0.width, 0);
        assert_eq!(r.split_vertical(6), (Region::new(0, 0, 6, 4), Region::new(6, 0, 4, 4)));
    }
}
