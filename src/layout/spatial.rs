//! Hit testing over painted node regions.

use crate::dom::NodeId;
use crate::geometry::{Offset, Region};

/// Node regions in paint order; later entries are painted on top.
#[derive(Debug, Default, Clone)]
pub struct SpatialMap {
    entries: Vec<(NodeId, Region)>,
}

impl SpatialMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Append a node painted after every node already present.
    pub fn push(&mut self, node: NodeId, region: Region) {
        self.entries.push((node, region));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every node containing `point`, frontmost first.
    pub fn hit_test(&self, point: Offset) -> Vec<NodeId> {
        self.entries
            .iter()
            .rev()
            .filter(|(_, region)| region.contains(point.x, point.y))
            .map(|(id, _)| *id)
            .collect()
    }

    /// The frontmost node at `point`.
    pub fn node_at(&self, point: Offset) -> Option<NodeId> {
        self.entries
            .iter()
            .rev()
            .find(|(_, region)| region.contains(point.x, point.y))
            .map(|(id, _)| *id)
    }
}

#[cfg(test)]
mod tests {
    use slotmap::SlotMap;

    use super::*;

    fn ids(n: usize) -> Vec<NodeId> {
        let mut map: SlotMap<NodeId, ()> = SlotMap::with_key();
        (0..n).map(|_| map.insert(())).collect()
    }

    #[test]
    fn frontmost_wins() {
        let ids = ids(3);
        let mut map = SpatialMap::new();
        map.push(ids[0], Region::new(0, 0, 20, 10));
        map.push(ids[1], Region::new(2, 2, 5, 5));
        map.push(ids[2], Region::new(15, 0, 5, 5));

        assert_eq!(map.node_at(Offset::new(3, 3)), Some(ids[1]));
        assert_eq!(map.hit_test(Offset::new(3, 3)), vec![ids[1], ids[0]]);
        assert_eq!(map.node_at(Offset::new(10, 8)), Some(ids[0]));
        assert_eq!(map.node_at(Offset::new(30, 30)), None);
    }

    #[test]
    fn clear_empties_map() {
        let ids = ids(1);
        let mut map = SpatialMap::new();
        map.push(ids[0], Region::new(0, 0, 1, 1));
        assert_eq!(map.len(), 1);
        map.clear();
        assert!(map.is_empty());
    }
}
