//! Node types: NodeId, NodeData, Decoration.

use slotmap::new_key_type;

use crate::geometry::{Region, Spacing};
use crate::render::style::{Align, Style};
use crate::widget::Widget;

new_key_type! {
    /// Identifier for a node in the composition graph. Copy and weak: holding
    /// one keeps nothing alive, and a stale id simply stops resolving.
    pub struct NodeId;
}

// ---------------------------------------------------------------------------
// Decoration
// ---------------------------------------------------------------------------

/// Border and title drawn around a node's content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decoration {
    pub border: bool,
    pub title: Option<String>,
    pub title_align: Align,
}

impl Decoration {
    /// Space taken by the decoration on each side.
    pub fn insets(&self) -> Spacing {
        if self.border {
            Spacing::all(1)
        } else {
            Spacing::ZERO
        }
    }

    /// The content region left inside `outer`.
    pub fn inner(&self, outer: Region) -> Region {
        outer.shrink(self.insets())
    }
}

// ---------------------------------------------------------------------------
// NodeData
// ---------------------------------------------------------------------------

/// A widget plus the attributes every node shares.
#[derive(Debug)]
pub struct NodeData {
    pub widget: Widget,
    /// Lookup name for [`Dom::find_by_name`](super::Dom::find_by_name).
    pub name: Option<String>,
    pub visible: bool,
    /// Whether the node may take focus when its widget supports it.
    pub focusable: bool,
    pub disabled: bool,
    pub decoration: Decoration,
    pub style: Style,
}

impl NodeData {
    pub fn new(widget: impl Into<Widget>) -> Self {
        Self {
            widget: widget.into(),
            name: None,
            visible: true,
            focusable: true,
            disabled: false,
            decoration: Decoration::default(),
            style: Style::default(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_border(mut self, border: bool) -> Self {
        self.decoration.border = border;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.decoration.title = Some(title.into());
        self
    }

    pub fn with_title_align(mut self, align: Align) -> Self {
        self.decoration.title_align = align;
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn focusable(mut self, focusable: bool) -> Self {
        self.focusable = focusable;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Whether the node can hold keyboard focus right now.
    pub fn can_focus(&self) -> bool {
        self.visible && self.focusable && !self.disabled && self.widget.as_primitive().accepts_focus()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::{Block, Button};

    #[test]
    fn defaults() {
        let data = NodeData::new(Block::new());
        assert!(data.visible);
        assert!(data.focusable);
        assert!(!data.disabled);
        assert!(data.name.is_none());
        assert_eq!(data.decoration, Decoration::default());
    }

    #[test]
    fn builders() {
        let data = NodeData::new(Button::new("OK"))
            .with_name("ok")
            .with_border(true)
            .with_title("Confirm")
            .with_title_align(Align::Center)
            .disabled(true);
        assert_eq!(data.name.as_deref(), Some("ok"));
        assert!(data.decoration.border);
        assert_eq!(data.decoration.title.as_deref(), Some("Confirm"));
        assert_eq!(data.decoration.title_align, Align::Center);
        assert!(data.disabled);
    }

    #[test]
    fn can_focus_requires_widget_support_and_flags() {
        assert!(NodeData::new(Button::new("OK")).can_focus());
        assert!(!NodeData::new(Button::new("OK")).disabled(true).can_focus());
        assert!(!NodeData::new(Button::new("OK")).visible(false).can_focus());
        assert!(!NodeData::new(Button::new("OK")).focusable(false).can_focus());
        assert!(!NodeData::new(Block::new()).can_focus());
    }

    #[test]
    fn decoration_inner() {
        let mut deco = Decoration::default();
        let outer = Region::new(0, 0, 10, 4);
        assert_eq!(deco.inner(outer), outer);
        deco.border = true;
        assert_eq!(deco.inner(outer), Region::new(1, 1, 8, 2));
    }
}
