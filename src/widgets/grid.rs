//! Grid container: items placed on row and column tracks.

use crate::dom::NodeId;
use crate::error::{check_index, Result};
use crate::geometry::Region;
use crate::layout::engine::{solve_grid, GridRequest};
use crate::render::strip::Strip;
use crate::render::style::Style;
use crate::widget::Primitive;

/// Placement of one [`Grid`] item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub row: u16,
    pub column: u16,
    pub row_span: u16,
    pub column_span: u16,
    /// The item is only shown when the grid's content area is at least this
    /// wide.
    pub min_width: i32,
    /// The item is only shown when the grid's content area is at least this
    /// tall.
    pub min_height: i32,
    pub focus: bool,
}

impl GridCell {
    pub fn at(row: u16, column: u16) -> Self {
        Self { row, column, row_span: 1, column_span: 1, min_width: 0, min_height: 0, focus: false }
    }

    pub fn with_span(mut self, rows: u16, columns: u16) -> Self {
        self.row_span = rows.max(1);
        self.column_span = columns.max(1);
        self
    }

    pub fn with_min_size(mut self, width: i32, height: i32) -> Self {
        self.min_width = width;
        self.min_height = height;
        self
    }

    pub fn with_focus(mut self, focus: bool) -> Self {
        self.focus = focus;
        self
    }

    fn fits(&self, inner: Region) -> bool {
        inner.width >= self.min_width && inner.height >= self.min_height
    }
}

/// Items on a grid of tracks.
///
/// A positive track size is a fixed number of cells, 0 takes one share of the
/// remaining space and `-n` takes `n` shares. Items referencing tracks past
/// the declared ones get extra one-share tracks.
#[derive(Debug, Default)]
pub struct Grid {
    rows: Vec<i32>,
    columns: Vec<i32>,
    items: Vec<(NodeId, GridCell)>,
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(mut self, rows: impl IntoIterator<Item = i32>) -> Self {
        self.rows = rows.into_iter().collect();
        self
    }

    pub fn with_columns(mut self, columns: impl IntoIterator<Item = i32>) -> Self {
        self.columns = columns.into_iter().collect();
        self
    }

    pub fn set_rows(&mut self, rows: impl IntoIterator<Item = i32>) -> &mut Self {
        self.rows = rows.into_iter().collect();
        self
    }

    pub fn set_columns(&mut self, columns: impl IntoIterator<Item = i32>) -> &mut Self {
        self.columns = columns.into_iter().collect();
        self
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn item(&self, index: usize) -> Option<(NodeId, GridCell)> {
        self.items.get(index).copied()
    }

    pub(crate) fn push_item(&mut self, node: NodeId, cell: GridCell) {
        self.items.push((node, cell));
    }

    pub(crate) fn take_item(&mut self, index: usize) -> Result<NodeId> {
        check_index(index, self.items.len())?;
        Ok(self.items.remove(index).0)
    }
}

impl Primitive for Grid {
    fn kind(&self) -> &'static str {
        "Grid"
    }

    fn draw(&self, _region: Region, _style: &Style, _focused: bool) -> Vec<Strip> {
        Vec::new()
    }

    fn children(&self) -> Vec<NodeId> {
        self.items.iter().map(|(id, _)| *id).collect()
    }

    fn focus_candidates(&self) -> Vec<NodeId> {
        let (preferred, rest): (Vec<&(NodeId, GridCell)>, Vec<&(NodeId, GridCell)>) =
            self.items.iter().partition(|(_, cell)| cell.focus);
        preferred.into_iter().chain(rest).map(|&(id, _)| id).collect()
    }

    fn layout_children(&self, inner: Region, visible: &dyn Fn(NodeId) -> bool) -> Vec<(NodeId, Region)> {
        let shown: Vec<&(NodeId, GridCell)> =
            self.items.iter().filter(|(id, cell)| visible(*id) && cell.fits(inner)).collect();
        let requests: Vec<GridRequest> = shown
            .iter()
            .map(|(_, cell)| GridRequest {
                row: cell.row,
                column: cell.column,
                row_span: cell.row_span,
                column_span: cell.column_span,
            })
            .collect();
        let regions = solve_grid(&self.rows, &self.columns, &requests, inner);
        shown.into_iter().map(|(id, _)| *id).zip(regions).collect()
    }

    fn release_child(&mut self, child: NodeId) {
        self.items.retain(|(id, _)| *id != child);
    }
}

// ===========================================================================
// Tests
// ===========================================================================
