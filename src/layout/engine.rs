//! Taffy-backed track solving for the flex and grid containers.
//!
//! Each call builds a throwaway [`TaffyTree`] holding one container and its
//! leaf items, computes it at the size of the container's content region and
//! reads back integer cell regions. Leaves have no intrinsic content, so
//! every size comes from the item's fixed length or its share of free space.

use taffy::geometry::Line;
use taffy::prelude::*;
use taffy::style_helpers::{FromFr, FromLength};

use crate::geometry::Region;

/// Main axis of a flex container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Items side by side, left to right.
    #[default]
    Row,
    /// Items stacked top to bottom.
    Column,
}

/// Size request of one flex item along the main axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlexRequest {
    /// Fixed cell count; 0 means "share the free space".
    pub fixed: u16,
    /// Relative share of the free space when `fixed` is 0.
    pub proportion: u16,
}

/// Placement of one grid item, 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridRequest {
    pub row: u16,
    pub column: u16,
    pub row_span: u16,
    pub column_span: u16,
}

/// A track size: positive is a fixed cell count, 0 is one fraction of the
/// free space, negative `-n` is `n` fractions.
fn track<T: FromLength + FromFr>(size: i32) -> T {
    match size {
        n if n > 0 => length(n as f32),
        0 => fr(1.0),
        n => fr(n.unsigned_abs() as f32),
    }
}

fn container_style(inner: Region) -> Style {
    let mut style: Style = Style::default();
    style.size = Size { width: Dimension::from_length(inner.width as f32), height: Dimension::from_length(inner.height as f32) };
    style
}

fn solve(tree: &mut TaffyTree<()>, root: NodeId, items: &[NodeId], inner: Region) -> Vec<Region> {
    let available = Size {
        width: AvailableSpace::Definite(inner.width as f32),
        height: AvailableSpace::Definite(inner.height as f32),
    };
    if let Err(err) = tree.compute_layout(root, available) {
        tracing::warn!(%err, "layout computation failed");
        return vec![Region::EMPTY; items.len()];
    }
    items
        .iter()
        .map(|&item| match tree.layout(item) {
            Ok(layout) => Region::new(
                inner.x + layout.location.x.round() as i32,
                inner.y + layout.location.y.round() as i32,
                layout.size.width.round() as i32,
                layout.size.height.round() as i32,
            )
            .intersection(inner),
            Err(_) => Region::EMPTY,
        })
        .collect()
}

/// Distribute `inner` along `direction` among `requests`, in order.
pub fn solve_flex(direction: Direction, requests: &[FlexRequest], inner: Region) -> Vec<Region> {
    if inner.is_empty() || requests.is_empty() {
        return vec![Region::EMPTY; requests.len()];
    }
    let mut tree: TaffyTree<()> = TaffyTree::new();
    let leaves: Result<Vec<NodeId>, _> = requests
        .iter()
        .map(|req| {
            let mut style: Style = Style::default();
            if req.fixed > 0 {
                style.flex_basis = Dimension::from_length(f32::from(req.fixed));
                style.flex_grow = 0.0;
                style.flex_shrink = 0.0;
            } else {
                style.flex_basis = Dimension::from_length(0.0);
                style.flex_grow = f32::from(req.proportion.max(1));
                style.flex_shrink = 1.0;
            }
            tree.new_leaf(style)
        })
        .collect();

    let mut root_style = container_style(inner);
    root_style.display = Display::Flex;
    root_style.flex_direction = match direction {
        Direction::Row => FlexDirection::Row,
        Direction::Column => FlexDirection::Column,
    };

    let built = leaves.and_then(|leaves| {
        let root = tree.new_with_children(root_style, &leaves)?;
        Ok((root, leaves))
    });
    match built {
        Ok((root, leaves)) => solve(&mut tree, root, &leaves, inner),
        Err(err) => {
            tracing::warn!(%err, "failed to build flex layout");
            vec![Region::EMPTY; requests.len()]
        }
    }
}

/// Place `requests` on a grid with the given row and column tracks.
///
/// Items referencing rows or columns past the declared tracks get extra
/// one-fraction tracks.
pub fn solve_grid(rows: &[i32], columns: &[i32], requests: &[GridRequest], inner: Region) -> Vec<Region> {
    if inner.is_empty() || requests.is_empty() {
        return vec![Region::EMPTY; requests.len()];
    }
    let needed_rows = requests.iter().map(|r| usize::from(r.row + r.row_span.max(1))).max().unwrap_or(0);
    let needed_cols = requests.iter().map(|r| usize::from(r.column + r.column_span.max(1))).max().unwrap_or(0);
    let padded = |tracks: &[i32], needed: usize| -> Vec<i32> {
        let mut tracks = tracks.to_vec();
        if tracks.len() < needed {
            tracks.resize(needed, 0);
        }
        tracks
    };

    let mut tree: TaffyTree<()> = TaffyTree::new();
    let leaves: Result<Vec<NodeId>, _> = requests
        .iter()
        .map(|req| {
            let mut style: Style = Style::default();
            style.grid_row = Line { start: line(req.row as i16 + 1), end: span(req.row_span.max(1)) };
            style.grid_column = Line { start: line(req.column as i16 + 1), end: span(req.column_span.max(1)) };
            tree.new_leaf(style)
        })
        .collect();

    let mut root_style = container_style(inner);
    root_style.display = Display::Grid;
    root_style.grid_template_rows = padded(rows, needed_rows).into_iter().map(track).collect();
    root_style.grid_template_columns = padded(columns, needed_cols).into_iter().map(track).collect();

    let built = leaves.and_then(|leaves| {
        let root = tree.new_with_children(root_style, &leaves)?;
        Ok((root, leaves))
    });
    match built {
        Ok((root, leaves)) => solve(&mut tree, root, &leaves, inner),
        Err(err) => {
            tracing::warn!(%err, "failed to build grid layout");
            vec![Region::EMPTY; requests.len()]
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
