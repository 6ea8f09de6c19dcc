//! Screen buffer and frame diffing.
//!
//! The application keeps two compositors: the front one mirrors what the
//! terminal currently shows, the back one receives the frame being drawn.
//! After drawing, `back.diff(&front)` yields the minimal set of
//! [`CellUpdate`]s for the backend, and the two are swapped.

use super::strip::{Strip, StyledCell};
use super::style::CellStyle;
use crate::geometry::Region;

// ---------------------------------------------------------------------------
// CellUpdate
// ---------------------------------------------------------------------------

/// A single cell that changed between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellUpdate {
    pub x: u16,
    pub y: u16,
    pub cell: StyledCell,
}

// ---------------------------------------------------------------------------
// Compositor
// ---------------------------------------------------------------------------

/// A `width x height` grid of styled cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compositor {
    /// `screen[y][x]` is the cell at column x, row y.
    screen: Vec<Vec<StyledCell>>,
    pub width: u16,
    pub height: u16,
}

impl Compositor {
    /// Create a compositor with a blank screen of the given dimensions.
    pub fn new(width: u16, height: u16) -> Self {
        Self { screen: Self::blank_screen(width, height), width, height }
    }

    /// Resize the buffer. All cells are reset to blank.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.screen = Self::blank_screen(width, height);
    }

    /// Reset every cell to blank.
    pub fn clear(&mut self) {
        for row in &mut self.screen {
            row.fill(StyledCell::blank());
        }
    }

    /// The whole screen as a region at the origin.
    pub fn region(&self) -> Region {
        Region::new(0, 0, self.width as i32, self.height as i32)
    }

    /// Place strips into the buffer, clipped to `clip` and to the screen.
    pub fn place_strips(&mut self, strips: &[Strip], clip: Region) {
        let clip = clip.intersection(self.region());
        if clip.is_empty() {
            return;
        }

        for strip in strips {
            if strip.y < clip.y || strip.y >= clip.bottom() {
                continue;
            }
            let row = &mut self.screen[strip.y as usize];
            for (i, cell) in strip.cells.iter().enumerate() {
                let x = strip.x_offset + i as i32;
                if x >= clip.x && x < clip.right() {
                    row[x as usize] = *cell;
                }
            }
        }
    }

    /// Fill a region with blanks in the given style (backgrounds).
    pub fn fill_region(&mut self, region: Region, style: CellStyle) {
        let clip = region.intersection(self.region());
        for y in clip.y..clip.bottom() {
            for x in clip.x..clip.right() {
                self.screen[y as usize][x as usize] = StyledCell::blank_styled(style);
            }
        }
    }

    /// Cells that differ from `previous`, plus every cell outside its bounds.
    pub fn diff(&self, previous: &Compositor) -> Vec<CellUpdate> {
        let mut updates = Vec::new();
        for (y, row) in self.screen.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let prior = previous.screen.get(y).and_then(|r| r.get(x));
                if prior != Some(cell) {
                    updates.push(CellUpdate { x: x as u16, y: y as u16, cell: *cell });
                }
            }
        }
        updates
    }

    /// Every cell as an update; used for full repaints after resize.
    pub fn all_updates(&self) -> Vec<CellUpdate> {
        self.screen
            .iter()
            .enumerate()
            .flat_map(|(y, row)| {
                row.iter()
                    .enumerate()
                    .map(move |(x, cell)| CellUpdate { x: x as u16, y: y as u16, cell: *cell })
            })
            .collect()
    }

    /// The cell at (x, y), or `None` if out of bounds.
    pub fn get_cell(&self, x: u16, y: u16) -> Option<&StyledCell> {
        self.screen.get(y as usize).and_then(|row| row.get(x as usize))
    }

    /// The characters of row `y`, trailing spaces kept.
    pub fn row_text(&self, y: u16) -> String {
        self.screen
            .get(y as usize)
            .map(|row| row.iter().map(|c| c.ch).collect())
            .unwrap_or_default()
    }

    fn blank_screen(width: u16, height: u16) -> Vec<Vec<StyledCell>> {
        vec![vec![StyledCell::blank(); width as usize]; height as usize]
    }
}

// ===========================================================================
// Tests
// ===========================================================================
