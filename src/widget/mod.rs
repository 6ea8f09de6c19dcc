//! Widget system: the closed [`Widget`] enum, the [`Primitive`] capability
//! trait every variant implements, and callback slots.
//!
//! The set of widget kinds is fixed. Each kind is a plain struct in
//! [`crate::widgets`]; the `widget_kinds!` table below generates the enum,
//! the `From` conversions and typed access through [`WidgetKind`].

pub mod callback;

pub use callback::Callback;

use crate::dom::NodeId;
use crate::event::{AppHandle, KeyEvent, MouseEvent};
use crate::geometry::{Offset, Region};
use crate::render::strip::Strip;
use crate::render::style::Style;
use crate::widgets::{
    Block, Button, CheckBox, DropDown, Flex, Form, Grid, InputField, List, Panels, ProgressBar,
    Table, TabbedPanels, TextView, TreeView, WindowManager,
};

// ---------------------------------------------------------------------------
// EventResult / EventCtx
// ---------------------------------------------------------------------------

/// Whether a widget used an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// The event was handled; stop propagating.
    Consumed,
    /// Not interested; the event continues to the parent, then to bindings.
    Ignored,
}

impl EventResult {
    pub fn is_consumed(self) -> bool {
        self == EventResult::Consumed
    }
}

/// What a widget sees while handling an event.
pub struct EventCtx<'a> {
    /// Handle for firing intents and queued updates from callbacks.
    pub handle: &'a AppHandle,
    /// The node that holds the widget.
    pub node: NodeId,
}

// ---------------------------------------------------------------------------
// Primitive
// ---------------------------------------------------------------------------

/// Capabilities shared by every widget kind.
///
/// Only `kind` and `draw` are required; everything else defaults to "leaf,
/// not focusable, ignores input".
pub trait Primitive {
    /// Widget kind name, e.g. `"Button"`.
    fn kind(&self) -> &'static str;

    /// Draw the content into `region` (already inside any border).
    /// Strips use absolute screen coordinates.
    fn draw(&self, region: Region, style: &Style, focused: bool) -> Vec<Strip>;

    fn handle_key(&mut self, _key: KeyEvent, _ctx: &EventCtx<'_>) -> EventResult {
        EventResult::Ignored
    }

    /// `local` is the pointer position relative to the content region.
    fn handle_mouse(&mut self, _mouse: MouseEvent, _local: Offset, _ctx: &EventCtx<'_>) -> EventResult {
        EventResult::Ignored
    }

    fn handle_paste(&mut self, _text: &str, _ctx: &EventCtx<'_>) -> EventResult {
        EventResult::Ignored
    }

    fn accepts_focus(&self) -> bool {
        false
    }

    /// Every attached child in container order.
    fn children(&self) -> Vec<NodeId> {
        Vec::new()
    }

    /// Children currently on screen (a panel stack shows only some).
    fn shown_children(&self) -> Vec<NodeId> {
        self.children()
    }

    /// Where focus goes when this node is asked to take it but cannot hold it
    /// itself, in preference order.
    fn focus_candidates(&self) -> Vec<NodeId> {
        self.shown_children()
    }

    /// Regions for shown children inside this node's content region.
    /// `visible` reports each child's own visibility flag.
    fn layout_children(&self, _inner: Region, _visible: &dyn Fn(NodeId) -> bool) -> Vec<(NodeId, Region)> {
        Vec::new()
    }

    /// Forget the container metadata held for `child`.
    fn release_child(&mut self, _child: NodeId) {}

    /// Fire "changed" callbacks for state that was modified programmatically
    /// since the last call. Returns whether anything fired.
    fn notify_changes(&mut self, _ctx: &EventCtx<'_>) -> bool {
        false
    }

    /// Content drawn above everything else while the node is focused, e.g.
    /// an open dropdown list. `region` is the node's content region.
    fn draw_overlay(&self, _region: Region, _style: &Style) -> Vec<Strip> {
        Vec::new()
    }

    /// Screen area covered by the overlay for a node whose content region is
    /// `region`. Clicks inside it go to [`Primitive::handle_overlay_mouse`].
    fn overlay_region(&self, _region: Region) -> Option<Region> {
        None
    }

    /// Mouse input inside the overlay; `local` is relative to the overlay's
    /// top-left corner.
    fn handle_overlay_mouse(&mut self, _mouse: MouseEvent, _local: Offset, _ctx: &EventCtx<'_>) -> EventResult {
        EventResult::Ignored
    }
}

// ---------------------------------------------------------------------------
// WidgetKind
// ---------------------------------------------------------------------------

/// Typed access to one variant of [`Widget`].
pub trait WidgetKind: Sized {
    const KIND: &'static str;
    fn from_widget(widget: &Widget) -> Option<&Self>;
    fn from_widget_mut(widget: &mut Widget) -> Option<&mut Self>;
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

macro_rules! widget_kinds {
    ($($variant:ident),* $(,)?) => {
        /// Every widget kind the composition graph can hold.
        #[derive(Debug)]
        pub enum Widget {
            $($variant($variant),)*
        }

        impl Widget {
            pub fn as_primitive(&self) -> &dyn Primitive {
                match self {
                    $(Widget::$variant(w) => w,)*
                }
            }

            pub fn as_primitive_mut(&mut self) -> &mut dyn Primitive {
                match self {
                    $(Widget::$variant(w) => w,)*
                }
            }

            /// Kind name of the held widget.
            pub fn kind(&self) -> &'static str {
                match self {
                    $(Widget::$variant(_) => stringify!($variant),)*
                }
            }
        }

        $(
            impl From<$variant> for Widget {
                fn from(widget: $variant) -> Self {
                    Widget::$variant(widget)
                }
            }

            impl WidgetKind for $variant {
                const KIND: &'static str = stringify!($variant);

                fn from_widget(widget: &Widget) -> Option<&Self> {
                    match widget {
                        Widget::$variant(w) => Some(w),
                        _ => None,
                    }
                }

                fn from_widget_mut(widget: &mut Widget) -> Option<&mut Self> {
                    match widget {
                        Widget::$variant(w) => Some(w),
                        _ => None,
                    }
                }
            }
        )*
    };
}

widget_kinds! {
    Block,
    Button,
    CheckBox,
    InputField,
    TextView,
    ProgressBar,
    Table,
    List,
    TreeView,
    DropDown,
    Form,
    Flex,
    Grid,
    Panels,
    TabbedPanels,
    WindowManager,
}

// ===========================================================================
// Tests
// ===========================================================================
