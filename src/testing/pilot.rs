//! Pilot: programmatic interaction with a headless Application.
//!
//! The `Pilot` owns an [`Application`] that never touches a terminal. Input
//! goes through the application's queue exactly as terminal input would, and
//! each simulated event drains the queue before returning.

use crate::app::Application;
use crate::config::AppConfig;
use crate::dom::NodeId;
use crate::event::{InputEvent, Key, KeyEvent, Modifiers, MouseEvent};

use super::snapshot::compositor_to_string;

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless application driver for tests.
///
/// ```ignore
/// use trellis_tui::testing::Pilot;
/// use trellis_tui::event::Key;
///
/// let mut pilot = Pilot::new(40, 10);
/// pilot.press(Key::Tab);
/// println!("{}", pilot.render());
/// ```
pub struct Pilot {
    app: Application,
}

impl Pilot {
    /// A default application sized `width` x `height`, mouse enabled.
    pub fn new(width: u16, height: u16) -> Self {
        Self::with_config(AppConfig::new().with_mouse(true), width, height)
    }

    pub fn with_config(config: AppConfig, width: u16, height: u16) -> Self {
        Self::with_app(Application::new(config), width, height)
    }

    /// Drive an existing application.
    pub fn with_app(mut app: Application, width: u16, height: u16) -> Self {
        app.resize(width, height);
        Self { app }
    }

    pub fn app(&self) -> &Application {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut Application {
        &mut self.app
    }

    pub fn into_app(self) -> Application {
        self.app
    }

    // ── Input simulation ─────────────────────────────────────────────

    pub fn press(&mut self, key: Key) {
        self.press_with(key, Modifiers::NONE);
    }

    pub fn press_with(&mut self, key: Key, modifiers: Modifiers) {
        self.send(KeyEvent::new(key, modifiers).into());
    }

    /// Each character of `text` as an individual key press.
    pub fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            self.press(Key::Char(ch));
        }
    }

    /// Left-button press at (x, y). The layout is refreshed first so the hit
    /// test sees the current tree.
    pub fn click(&mut self, x: u16, y: u16) {
        self.send(MouseEvent::click(x, y).into());
    }

    pub fn paste(&mut self, text: &str) {
        self.send(InputEvent::Paste(text.to_owned()));
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.send(InputEvent::Resize { width, height });
    }

    fn send(&mut self, event: InputEvent) {
        self.app.handle().send_input(event);
        self.app.process_pending();
    }

    // ── Processing and inspection ────────────────────────────────────

    /// Apply everything already queued.
    pub fn process(&mut self) {
        self.app.process_pending();
    }

    /// Render a frame and return it as text.
    pub fn render(&mut self) -> String {
        self.app.process_pending();
        if let Err(err) = self.app.draw() {
            tracing::warn!(%err, "headless draw failed");
        }
        compositor_to_string(self.app.screen())
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.app.focus()
    }

    /// Whether a stop has been requested.
    pub fn is_stopped(&self) -> bool {
        self.app.handle().is_stopped()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
