//! Application configuration.

/// Configuration for an [`Application`](crate::app::Application).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Terminal window title set while running.
    pub title: Option<String>,
    /// Capture mouse input from the start.
    pub mouse: bool,
    /// Upper bound on frames per second; 0 renders after every batch.
    pub fps: u32,
    /// Install the default key bindings (Ctrl+C, Tab, BackTab).
    pub default_bindings: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { title: None, mouse: false, fps: 60, default_bindings: true }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_mouse(mut self, mouse: bool) -> Self {
        self.mouse = mouse;
        self
    }

    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    pub fn with_default_bindings(mut self, enabled: bool) -> Self {
        self.default_bindings = enabled;
        self
    }

    /// Minimum time between two frames, if throttled.
    pub fn frame_interval(&self) -> Option<std::time::Duration> {
        (self.fps > 0).then(|| std::time::Duration::from_secs(1) / self.fps)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
