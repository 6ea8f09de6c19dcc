//! Composition graph: slotmap-backed node arena, tree invariants and the
//! container operations that attach and detach children.

pub mod containers;
pub mod node;
pub mod tree;

pub use node::{Decoration, NodeData, NodeId};
pub use tree::Dom;
