//! Block: an empty rectangle. Useful as a spacer or as a bordered frame.

use crate::geometry::Region;
use crate::render::strip::Strip;
use crate::render::style::Style;
use crate::widget::Primitive;

/// A widget that draws nothing of its own.
///
/// Background color, border and title come from the node attributes, so a
/// `Block` with a title is a plain labelled frame.
#[derive(Debug, Default)]
pub struct Block;

impl Block {
    pub fn new() -> Self {
        Self
    }
}

impl Primitive for Block {
    fn kind(&self) -> &'static str {
        "Block"
    }

    fn draw(&self, _region: Region, _style: &Style, _focused: bool) -> Vec<Strip> {
        Vec::new()
    }
}
