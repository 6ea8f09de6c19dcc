//! Event system: input, intents, the application queue, key bindings.

pub mod binding;
pub mod input;
pub mod intent;
pub mod keyspec;
pub mod queue;

pub use binding::KeyBindingRegistry;
pub use input::{InputEvent, Key, KeyEvent, Modifiers, MouseAction, MouseBtn, MouseEvent};
pub use intent::{Intent, UpdateFn};
pub(crate) use intent::Command;
pub use keyspec::parse_key_spec;
pub use queue::AppHandle;
pub(crate) use queue::CommandQueue;
