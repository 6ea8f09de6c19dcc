//! Headless testing helpers: the [`Pilot`] driver and text snapshots.
//!
//! The [`Pilot`] drives an [`Application`](crate::app::Application) without a
//! terminal by feeding input through its queue and draining it. The snapshot
//! helpers turn strips and frames into plain text for assertions.

pub mod pilot;
pub mod snapshot;

pub use pilot::Pilot;
pub use snapshot::{compositor_to_string, render_to_string, strips_to_string};

use crate::event::{AppHandle, CommandQueue};

/// A handle whose application is gone. Sends return `false`; callbacks that
/// receive it can still run.
pub fn test_handle() -> AppHandle {
    CommandQueue::new().handle().clone()
}
