//! Paints a laid-out composition graph into a compositor.
//!
//! Nodes are painted in layout order, parents before children. Each node
//! gets its background, then its border and title, then its content clipped
//! to the content region. The focused node's overlay goes last so it sits
//! above every sibling.

use super::compositor::Compositor;
use super::draw;
use crate::dom::{Dom, NodeId};
use crate::layout::Layout;

/// Paint every node of `layout` into `target`. `focus` is the node holding
/// keyboard focus, if any.
pub fn paint(dom: &Dom, layout: &Layout, focus: Option<NodeId>, target: &mut Compositor) {
    target.clear();
    for &id in layout.paint_order() {
        let (Some(data), Some(outer), Some(inner)) = (dom.get(id), layout.region(id), layout.inner(id)) else {
            continue;
        };
        let base = data.style.cell();
        target.fill_region(outer, base);

        let focused = focus == Some(id);
        if data.decoration.border {
            let on_focus_path = focus.is_some_and(|f| dom.is_ancestor_or_self(id, f));
            let frame = if on_focus_path { base.bold() } else { base };
            target.place_strips(&draw::border(outer, frame), outer);
            if let Some(title) = data.decoration.title.as_deref() {
                if let Some(strip) = draw::title(outer, title, data.decoration.title_align, frame) {
                    target.place_strips(&[strip], outer);
                }
            }
        }

        let strips = data.widget.as_primitive().draw(inner, &data.style, focused);
        target.place_strips(&strips, inner);
    }

    if let Some(id) = focus {
        if let (Some(data), Some(inner)) = (dom.get(id), layout.inner(id)) {
            let overlay = data.widget.as_primitive().draw_overlay(inner, &data.style);
            let screen = target.region();
            target.place_strips(&overlay, screen);
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
