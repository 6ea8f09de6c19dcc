//! # trellis-tui
//!
//! Widget composition and event wiring for terminal applications.
//!
//! Primitives live in a slotmap-backed composition graph and are arranged by
//! container primitives (flex, grid, form, panels, tabs, windows). One
//! application loop owns the graph; every other thread talks to it through a
//! cloneable [`AppHandle`](event::AppHandle) whose queued updates are applied
//! in FIFO order before the next frame.
//!
//! ## Core Systems
//!
//! - **[`dom`]**: Composition graph arena, tree invariants, container operations
//! - **[`widget`]**: The closed `Widget` enum, the `Primitive` trait, callback slots
//! - **[`widgets`]**: Built-in primitives and containers
//! - **[`event`]**: Input events, intents, key bindings, the application queue
//! - **[`focus`]**: Ordered focus traversal with optional wrap-around
//! - **[`layout`]**: Taffy-powered flex and grid placement, hit testing
//! - **[`render`]**: Strip-based compositor, painter and crossterm driver
//! - **[`backend`]**: Terminal and headless backends
//! - **[`app`]**: The application shell and run loop
//! - **[`testing`]**: Headless pilot and snapshot helpers

// Foundation
pub mod error;
pub mod geometry;

// Composition
pub mod dom;
pub mod widget;
pub mod widgets;

// Events and focus
pub mod event;
pub mod focus;

// Layout and rendering
pub mod layout;
pub mod render;

// Application
pub mod app;
pub mod backend;
pub mod config;

pub mod testing;

pub use app::{Application, RunState};
pub use config::AppConfig;
pub use error::{Error, Result};
pub use focus::FocusManager;
