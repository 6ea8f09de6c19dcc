//! Ordered focus traversal over an explicit list of nodes.

use std::fmt;

use crate::dom::NodeId;
use crate::error::{check_index, Result};

type FocusSetter = Box<dyn FnMut(NodeId) + Send>;

/// Cycles keyboard focus through a fixed list of nodes.
///
/// The manager only tracks a cursor; moving it calls the focus setter given
/// at construction, typically [`AppHandle::focus_setter`](crate::event::AppHandle::focus_setter)
/// so the actual focus change happens on the loop thread. The list is
/// append-only.
pub struct FocusManager {
    nodes: Vec<NodeId>,
    current: usize,
    wrap: bool,
    setter: FocusSetter,
}

impl FocusManager {
    /// An empty, non-wrapping manager.
    pub fn new(setter: impl FnMut(NodeId) + Send + 'static) -> Self {
        Self { nodes: Vec::new(), current: 0, wrap: false, setter: Box::new(setter) }
    }

    pub fn with_wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    pub fn set_wrap(&mut self, wrap: bool) -> &mut Self {
        self.wrap = wrap;
        self
    }

    /// Append nodes to the traversal order.
    pub fn add(&mut self, nodes: &[NodeId]) -> &mut Self {
        self.nodes.extend_from_slice(nodes);
        self
    }

    /// Advance to the next node and focus it. No-op when empty, or at the
    /// last node without wrapping.
    pub fn focus_next(&mut self) {
        if self.nodes.is_empty() {
            return;
        }
        let next = self.current + 1;
        if next < self.nodes.len() {
            self.move_to(next);
        } else if self.wrap {
            self.move_to(0);
        }
    }

    /// Step back to the previous node and focus it. No-op when empty, or at
    /// the first node without wrapping.
    pub fn focus_previous(&mut self) {
        if self.nodes.is_empty() {
            return;
        }
        if self.current > 0 {
            self.move_to(self.current - 1);
        } else if self.wrap {
            self.move_to(self.nodes.len() - 1);
        }
    }

    /// Jump to the node at `index` and focus it.
    pub fn focus_at(&mut self, index: usize) -> Result<()> {
        check_index(index, self.nodes.len())?;
        self.move_to(index);
        Ok(())
    }

    /// The node under the cursor.
    pub fn current(&self) -> Option<NodeId> {
        self.nodes.get(self.current).copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn move_to(&mut self, index: usize) {
        self.current = index;
        tracing::trace!(index, "focus manager moved");
        (self.setter)(self.nodes[index]);
    }
}

impl fmt::Debug for FocusManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FocusManager")
            .field("nodes", &self.nodes)
            .field("current", &self.current)
            .field("wrap", &self.wrap)
            .finish_non_exhaustive()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use pretty_assertions::assert_eq;
    use slotmap::SlotMap;

    use super::*;
    use crate::error::Error;

    fn ids(n: usize) -> Vec<NodeId> {
        let mut map: SlotMap<NodeId, ()> = SlotMap::with_key();
        (0..n).map(|_| map.insert(())).collect()
    }

    fn recording(wrap: bool) -> (FocusManager, Arc<Mutex<Vec<NodeId>>>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        let manager = FocusManager::new(move |id| sink.lock().unwrap().push(id)).with_wrap(wrap);
        (manager, log)
    }

    // ── Traversal ────────────────────────────────────────────────────

    #[test]
    fn wraps_forward_and_backward() {
        let nodes = ids(3);
        let (mut fm, log) = recording(true);
        fm.add(&nodes);

        fm.focus_next();
        fm.focus_next();
        fm.focus_next();
        assert_eq!(fm.current(), Some(nodes[0]));
        fm.focus_previous();
        assert_eq!(fm.current(), Some(nodes[2]));
        assert_eq!(*log.lock().unwrap(), vec![nodes[1], nodes[2], nodes[0], nodes[2]]);
    }

    #[test]
    fn without_wrap_ends_are_no_ops() {
        let nodes = ids(2);
        let (mut fm, log) = recording(false);
        fm.add(&nodes);

        fm.focus_previous();
        assert_eq!(fm.current(), Some(nodes[0]));
        fm.focus_next();
        fm.focus_next();
        assert_eq!(fm.current(), Some(nodes[1]));
        assert_eq!(*log.lock().unwrap(), vec![nodes[1]]);
    }

    #[test]
    fn empty_manager_never_calls_setter() {
        let (mut fm, log) = recording(true);
        fm.focus_next();
        fm.focus_previous();
        assert!(fm.current().is_none());
        assert!(log.lock().unwrap().is_empty());
    }

    // ── Direct jumps ─────────────────────────────────────────────────

    #[test]
    fn focus_at_checks_bounds() {
        let nodes = ids(3);
        let (mut fm, log) = recording(false);
        fm.add(&nodes[..2]).add(&nodes[2..]);
        assert_eq!(fm.len(), 3);

        fm.focus_at(2).unwrap();
        assert_eq!(fm.current(), Some(nodes[2]));
        assert!(matches!(fm.focus_at(3), Err(Error::IndexOutOfRange { index: 3, len: 3 })));
        assert_eq!(*log.lock().unwrap(), vec![nodes[2]]);
    }
}
