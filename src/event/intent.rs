//! Typed requests that flow through the application queue.
//!
//! Callbacks never touch the composition graph directly. They post an
//! [`Intent`] through their [`AppHandle`](super::AppHandle); the loop applies
//! it between callbacks, in arrival order.

use std::fmt;

use super::input::InputEvent;
use crate::app::Application;
use crate::dom::NodeId;

/// A request for the application loop to change shared state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// End the run loop.
    Stop,
    /// Redraw on the next iteration.
    Draw,
    /// Move keyboard focus to a node.
    SetFocus(NodeId),
    /// Move focus to the next focusable node in traversal order.
    FocusNext,
    /// Move focus to the previous focusable node in traversal order.
    FocusPrevious,
    /// Install a new root primitive.
    SetRoot { node: NodeId, give_focus: bool },
    /// Bring a keyed panel of a `Panels` container to the front.
    SwitchPanel { panels: NodeId, key: String },
    /// Select a tab of a `TabbedPanels` container.
    SwitchTab { tabs: NodeId, key: String },
    /// Remove the entry at `index` from an index-addressed container.
    RemoveItem { container: NodeId, index: usize },
}

/// Closure run on the loop thread with exclusive access to the application.
pub type UpdateFn = Box<dyn FnOnce(&mut Application) + Send + 'static>;

/// Everything the loop can receive.
pub(crate) enum Command {
    Input(InputEvent),
    Update { f: UpdateFn, draw: bool },
    Intent(Intent),
    /// No payload; makes a blocked loop re-check the stop flag.
    Wake,
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Input(ev) => f.debug_tuple("Input").field(ev).finish(),
            Command::Update { draw, .. } => f.debug_struct("Update").field("draw", draw).finish_non_exhaustive(),
            Command::Intent(intent) => f.debug_tuple("Intent").field(intent).finish(),
            Command::Wake => f.write_str("Wake"),
        }
    }
}
