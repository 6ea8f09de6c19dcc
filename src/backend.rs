//! Terminal backends: where frames go and where input comes from.
//!
//! [`TerminalBackend`] drives a real terminal through crossterm and forwards
//! its event stream into the application queue. [`HeadlessBackend`] keeps
//! frames in memory and replays scripted input; tests inspect it through a
//! [`HeadlessProbe`].

use std::io;
use std::sync::{Arc, Mutex, MutexGuard};

use crossterm::event::EventStream;
use futures::StreamExt;
use tokio::task::JoinHandle;

use crate::event::{AppHandle, InputEvent};
use crate::render::compositor::{CellUpdate, Compositor};
use crate::render::driver::Driver;

/// Output surface and input source of a running application.
///
/// `start_input` is called from inside the loop's tokio runtime, so
/// implementations may spawn tasks there.
pub trait Backend {
    /// Prepare the terminal (raw mode, alternate screen).
    fn init(&mut self) -> io::Result<()>;

    /// Undo `init`. Called exactly once per successful `init`, on every exit
    /// path of the run loop.
    fn restore(&mut self) -> io::Result<()>;

    /// Current size as (columns, rows).
    fn size(&self) -> io::Result<(u16, u16)>;

    fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()>;

    fn set_title(&mut self, title: &str) -> io::Result<()>;

    /// Present a frame. `updates` lists the cells that differ from the
    /// previous frame; `frame` is the complete new screen.
    fn draw(&mut self, frame: &Compositor, updates: &[CellUpdate]) -> io::Result<()>;

    /// Begin delivering input through `handle`.
    fn start_input(&mut self, handle: AppHandle);
}

// ---------------------------------------------------------------------------
// TerminalBackend
// ---------------------------------------------------------------------------

/// A crossterm terminal on stdout.
#[derive(Default)]
pub struct TerminalBackend {
    driver: Driver,
    input: Option<JoinHandle<()>>,
}

impl TerminalBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Backend for TerminalBackend {
    fn init(&mut self) -> io::Result<()> {
        self.driver.enter()
    }

    fn restore(&mut self) -> io::Result<()> {
        if let Some(task) = self.input.take() {
            task.abort();
        }
        self.driver.leave()
    }

    fn size(&self) -> io::Result<(u16, u16)> {
        Driver::terminal_size()
    }

    fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
        self.driver.set_mouse_capture(enabled)
    }

    fn set_title(&mut self, title: &str) -> io::Result<()> {
        self.driver.set_title(title)
    }

    fn draw(&mut self, _frame: &Compositor, updates: &[CellUpdate]) -> io::Result<()> {
        self.driver.apply_updates(updates)
    }

    fn start_input(&mut self, handle: AppHandle) {
        self.input = Some(tokio::spawn(async move {
            let mut events = EventStream::new();
            while let Some(event) = events.next().await {
                match event {
                    Ok(event) => {
                        let Some(input) = InputEvent::from_crossterm(event) else { continue };
                        if !handle.send_input(input) {
                            break;
                        }
                    }
                    Err(err) => {
                        tracing::warn!(%err, "terminal input stream failed");
                        handle.stop();
                        break;
                    }
                }
            }
        }));
    }
}

impl std::fmt::Debug for TerminalBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalBackend").field("input_running", &self.input.is_some()).finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// HeadlessBackend
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct HeadlessState {
    width: u16,
    height: u16,
    frames: usize,
    last_frame: Option<Compositor>,
    mouse_capture: bool,
    title: Option<String>,
    initialized: bool,
    restored: bool,
}

/// An in-memory terminal of fixed size.
#[derive(Debug)]
pub struct HeadlessBackend {
    state: Arc<Mutex<HeadlessState>>,
    input: Vec<InputEvent>,
    fail_init: bool,
}

impl HeadlessBackend {
    pub fn new(width: u16, height: u16) -> Self {
        let state = HeadlessState { width, height, ..HeadlessState::default() };
        Self { state: Arc::new(Mutex::new(state)), input: Vec::new(), fail_init: false }
    }

    /// Make `init` fail, as a terminal that cannot enter raw mode would.
    pub fn fail_init(mut self) -> Self {
        self.fail_init = true;
        self
    }

    /// Input delivered in order once the loop starts.
    pub fn with_input(mut self, events: impl IntoIterator<Item = InputEvent>) -> Self {
        self.input.extend(events);
        self
    }

    /// A view on this backend that stays usable after the backend moved
    /// into the application.
    pub fn probe(&self) -> HeadlessProbe {
        HeadlessProbe { state: Arc::clone(&self.state) }
    }

    fn state(&self) -> MutexGuard<'_, HeadlessState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Backend for HeadlessBackend {
    fn init(&mut self) -> io::Result<()> {
        if self.fail_init {
            return Err(io::Error::new(io::ErrorKind::Unsupported, "headless terminal refused to initialise"));
        }
        self.state().initialized = true;
        Ok(())
    }

    fn restore(&mut self) -> io::Result<()> {
        let mut state = self.state();
        state.restored = true;
        state.mouse_capture = false;
        Ok(())
    }

    fn size(&self) -> io::Result<(u16, u16)> {
        let state = self.state();
        Ok((state.width, state.height))
    }

    fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
        self.state().mouse_capture = enabled;
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> io::Result<()> {
        self.state().title = Some(title.to_string());
        Ok(())
    }

    fn draw(&mut self, frame: &Compositor, _updates: &[CellUpdate]) -> io::Result<()> {
        let mut state = self.state();
        state.frames += 1;
        state.last_frame = Some(frame.clone());
        Ok(())
    }

    fn start_input(&mut self, handle: AppHandle) {
        for event in self.input.drain(..) {
            if !handle.send_input(event) {
                break;
            }
        }
    }
}

/// Read access to a [`HeadlessBackend`]'s recorded output.
#[derive(Debug, Clone)]
pub struct HeadlessProbe {
    state: Arc<Mutex<HeadlessState>>,
}

impl HeadlessProbe {
    fn state(&self) -> MutexGuard<'_, HeadlessState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Number of frames presented.
    pub fn frame_count(&self) -> usize {
        self.state().frames
    }

    /// The most recent frame.
    pub fn last_frame(&self) -> Option<Compositor> {
        self.state().last_frame.clone()
    }

    pub fn mouse_capture(&self) -> bool {
        self.state().mouse_capture
    }

    pub fn title(&self) -> Option<String> {
        self.state().title.clone()
    }

    pub fn is_initialized(&self) -> bool {
        self.state().initialized
    }

    /// Whether `restore` ran.
    pub fn is_restored(&self) -> bool {
        self.state().restored
    }
}

// ===========================================================================
// Tests
// ===========================================================================
