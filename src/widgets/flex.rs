//! Flex container: children laid out in one row or one column.

use crate::dom::NodeId;
use crate::error::{check_index, Result};
use crate::geometry::Region;
use crate::layout::engine::{solve_flex, Direction, FlexRequest};
use crate::render::strip::Strip;
use crate::render::style::Style;
use crate::widget::Primitive;

/// How one child of a [`Flex`] is sized along the main axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlexItem {
    /// Fixed size in cells; 0 means proportional.
    pub fixed: u16,
    /// Share of the free space for proportional items.
    pub proportion: u16,
    /// Whether this item is preferred when the container is given focus.
    pub focus: bool,
}

impl FlexItem {
    pub fn fixed(size: u16) -> Self {
        Self { fixed: size, proportion: 0, focus: false }
    }

    pub fn proportional(proportion: u16) -> Self {
        Self { fixed: 0, proportion: proportion.max(1), focus: false }
    }

    pub fn with_focus(mut self, focus: bool) -> Self {
        self.focus = focus;
        self
    }
}

/// A row or column of items. Fixed items get their size first; the rest of
/// the main axis is split among proportional items by weight.
#[derive(Debug, Default)]
pub struct Flex {
    direction: Direction,
    items: Vec<(NodeId, FlexItem)>,
}

impl Flex {
    pub fn new(direction: Direction) -> Self {
        Self { direction, items: Vec::new() }
    }

    pub fn row() -> Self {
        Self::new(Direction::Row)
    }

    pub fn column() -> Self {
        Self::new(Direction::Column)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Direction) -> &mut Self {
        self.direction = direction;
        self
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Sizing of the item at `index`.
    pub fn item(&self, index: usize) -> Option<(NodeId, FlexItem)> {
        self.items.get(index).copied()
    }

    pub(crate) fn push_item(&mut self, node: NodeId, item: FlexItem) {
        self.items.push((node, item));
    }

    pub(crate) fn take_item(&mut self, index: usize) -> Result<NodeId> {
        check_index(index, self.items.len())?;
        Ok(self.items.remove(index).0)
    }
}

impl Primitive for Flex {
    fn kind(&self) -> &'static str {
        "Flex"
    }

    fn draw(&self, _region: Region, _style: &Style, _focused: bool) -> Vec<Strip> {
        Vec::new()
    }

    fn children(&self) -> Vec<NodeId> {
        self.items.iter().map(|(id, _)| *id).collect()
    }

    fn focus_candidates(&self) -> Vec<NodeId> {
        let (preferred, rest): (Vec<&(NodeId, FlexItem)>, Vec<&(NodeId, FlexItem)>) =
            self.items.iter().partition(|(_, item)| item.focus);
        preferred.into_iter().chain(rest).map(|&(id, _)| id).collect()
    }

    fn layout_children(&self, inner: Region, visible: &dyn Fn(NodeId) -> bool) -> Vec<(NodeId, Region)> {
        let shown: Vec<&(NodeId, FlexItem)> = self.items.iter().filter(|(id, _)| visible(*id)).collect();
        let requests: Vec<FlexRequest> = shown
            .iter()
            .map(|(_, item)| FlexRequest { fixed: item.fixed, proportion: item.proportion })
            .collect();
        let regions = solve_flex(self.direction, &requests, inner);
        shown.into_iter().map(|(id, _)| *id).zip(regions).collect()
    }

    fn release_child(&mut self, child: NodeId) {
        self.items.retain(|(id, _)| *id != child);
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::dom::Dom;
    use crate::widgets::Button;

    #[test]
    fn focus_candidates_prefer_marked_item() {
        let mut dom = Dom::new();
        let flex = dom.insert(Flex::column());
        let a = dom.insert(Button::new("a"));
        let b = dom.insert(Button::new("b"));
        dom.add_item(flex, a, FlexItem::fixed(1)).unwrap();
        dom.add_item(flex, b, FlexItem::fixed(1).with_focus(true)).unwrap();

        let widget = dom.widget::<Flex>(flex).unwrap();
        assert_eq!(widget.focus_candidates(), vec![b, a]);
        assert_eq!(dom.default_focus(flex), Some(b));
    }

    #[test]
    fn layout_skips_invisible_items() {
        let mut dom = Dom::new();
        let flex = dom.insert(Flex::row());
        let ids: Vec<_> = (0..3).map(|i| dom.insert(Button::new(format!("{i}")))).collect();
        for id in &ids {
            dom.add_item(flex, *id, FlexItem::proportional(1)).unwrap();
        }
        let widget = dom.widget::<Flex>(flex).unwrap();
        let placed = widget.layout_children(Region::new(0, 0, 20, 1), &|id| id != ids[1]);
        assert_eq!(placed, vec![(ids[0], Region::new(0, 0, 10, 1)), (ids[2], Region::new(10, 0, 10, 1))]);
    }

    #[test]
    fn proportional_zero_is_one() {
        assert_eq!(FlexItem::proportional(0).proportion, 1);
        assert_eq!(FlexItem::fixed(4).proportion, 0);
    }
}
