//! ProgressBar widget: a horizontal bar with a percentage readout.

use crate::event::AppHandle;
use crate::geometry::Region;
use crate::render::draw;
use crate::render::strip::Strip;
use crate::render::style::Style;
use crate::widget::{Callback, EventCtx, Primitive};

/// Progress toward a maximum value.
///
/// The value is clamped to `0..=max`. Value changes schedule the *changed*
/// callback with the new value.
#[derive(Debug)]
pub struct ProgressBar {
    value: u32,
    max: u32,
    show_percent: bool,
    pending_change: bool,
    changed: Callback<u32>,
}

impl ProgressBar {
    /// A bar counting up to `max` (a `max` of 0 is treated as 1).
    pub fn new(max: u32) -> Self {
        Self { value: 0, max: max.max(1), show_percent: true, pending_change: false, changed: Callback::new() }
    }

    pub fn with_percent(mut self, show: bool) -> Self {
        self.show_percent = show;
        self
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn set_value(&mut self, value: u32) -> &mut Self {
        let value = value.min(self.max);
        if value != self.value {
            self.value = value;
            self.pending_change = true;
        }
        self
    }

    pub fn increment(&mut self, by: u32) -> &mut Self {
        self.set_value(self.value.saturating_add(by))
    }

    pub fn is_complete(&self) -> bool {
        self.value == self.max
    }

    /// Fraction complete in `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        f64::from(self.value) / f64::from(self.max)
    }

    pub fn set_changed_func(&mut self, f: impl FnMut(&AppHandle, u32) + 'static) -> &mut Self {
        self.changed.set(f);
        self
    }
}

impl Primitive for ProgressBar {
    fn kind(&self) -> &'static str {
        "ProgressBar"
    }

    fn draw(&self, region: Region, style: &Style, _focused: bool) -> Vec<Strip> {
        if region.is_empty() {
            return Vec::new();
        }
        let cell = style.cell();
        let label = format!(" {:>3}%", (self.progress() * 100.0).round() as u32);
        let (bar_area, label_area) = if self.show_percent && region.width > label.len() as i32 {
            region.split_vertical(region.width - label.len() as i32)
        } else {
            (region, Region::EMPTY)
        };

        let filled = (self.progress() * f64::from(bar_area.width)).round() as i32;
        let mut strips = vec![draw::bar(bar_area, 0, filled, cell)];
        if !label_area.is_empty() {
            strips.push(Strip::text(label_area.y, label_area.x, &label, cell));
        }
        strips
    }

    fn notify_changes(&mut self, ctx: &EventCtx<'_>) -> bool {
        if !std::mem::take(&mut self.pending_change) {
            return false;
        }
        self.changed.call(ctx.handle, self.value)
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::dom::NodeId;
    use crate::testing::test_handle;

    #[test]
    fn value_is_clamped() {
        let mut bar = ProgressBar::new(10);
        bar.set_value(25);
        assert_eq!(bar.value(), 10);
        assert!(bar.is_complete());
        assert_eq!(ProgressBar::new(0).max(), 1);
    }

    #[test]
    fn draws_bar_and_percentage() {
        let mut bar = ProgressBar::new(100);
        bar.set_value(50);
        let strips = bar.draw(Region::new(0, 0, 15, 1), &Style::default(), false);
        assert_eq!(strips.len(), 2);
        assert_eq!(strips[0].as_text(), "█████     ");
        assert_eq!(strips[1].as_text(), "  50%");
        assert_eq!(strips[1].x_offset, 10);
    }

    #[test]
    fn narrow_bar_drops_label() {
        let mut bar = ProgressBar::new(4);
        bar.set_value(4);
        let strips = bar.draw(Region::new(0, 0, 4, 1), &Style::default(), false);
        assert_eq!(strips.len(), 1);
        assert_eq!(strips[0].as_text(), "████");
    }

    #[test]
    fn changes_notify_latest_value_once() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut bar = ProgressBar::new(10);
        bar.set_changed_func(move |_, v| sink.borrow_mut().push(v));
        bar.increment(3).increment(3);

        let handle = test_handle();
        let ctx = EventCtx { handle: &handle, node: NodeId::default() };
        assert!(bar.notify_changes(&ctx));
        assert!(!bar.notify_changes(&ctx));
        bar.set_value(6);
        assert!(!bar.notify_changes(&ctx));
        assert_eq!(*seen.borrow(), vec![6]);
    }
}
