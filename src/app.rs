//! Application shell: root installation, focus, input dispatch and the run
//! loop.
//!
//! [`Application`] owns the composition graph and everything the loop needs.
//! It is `!Send`; other threads reach it only through an [`AppHandle`], whose
//! commands are applied here in FIFO order.

use std::fmt;
use std::time::Instant;

use crate::backend::{Backend, TerminalBackend};
use crate::config::AppConfig;
use crate::dom::{Dom, NodeData, NodeId};
use crate::error::{Error, Result};
use crate::event::{
    AppHandle, Command, CommandQueue, InputEvent, Intent, KeyBindingRegistry, KeyEvent, MouseAction, MouseBtn,
    MouseEvent,
};
use crate::geometry::Offset;
use crate::layout::Layout;
use crate::render::compositor::Compositor;
use crate::render::paint;
use crate::widget::EventCtx;
use crate::widgets::{Panels, TabbedPanels};

/// Upper bound on change-notification rounds per drain; a callback that
/// keeps re-arming a change cannot starve the loop.
const MAX_NOTIFY_ROUNDS: usize = 8;

type InputCapture = Box<dyn FnMut(&AppHandle, KeyEvent) -> Option<KeyEvent>>;

/// Lifecycle of an [`Application`]. There is no way back from `Stopped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Created,
    Running,
    Stopped,
}

/// The application shell.
pub struct Application {
    dom: Dom,
    root: Option<NodeId>,
    focus: Option<NodeId>,
    state: RunState,
    mouse: bool,
    config: AppConfig,
    bindings: KeyBindingRegistry,
    capture: Option<InputCapture>,
    queue: CommandQueue,
    layout: Layout,
    front: Compositor,
    back: Compositor,
    backend: Option<Box<dyn Backend>>,
    dirty: bool,
    full_repaint: bool,
}

impl Default for Application {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl Application {
    pub fn new(config: AppConfig) -> Self {
        let bindings = if config.default_bindings {
            KeyBindingRegistry::with_defaults()
        } else {
            KeyBindingRegistry::new()
        };
        Self {
            dom: Dom::new(),
            root: None,
            focus: None,
            state: RunState::Created,
            mouse: config.mouse,
            config,
            bindings,
            capture: None,
            queue: CommandQueue::new(),
            layout: Layout::new(),
            front: Compositor::new(0, 0),
            back: Compositor::new(0, 0),
            backend: None,
            dirty: true,
            full_repaint: true,
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    pub fn dom_mut(&mut self) -> &mut Dom {
        self.dirty = true;
        &mut self.dom
    }

    /// A new handle onto this application's queue.
    pub fn handle(&self) -> AppHandle {
        self.queue.handle().clone()
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn focus(&self) -> Option<NodeId> {
        self.focus
    }

    pub fn mouse_enabled(&self) -> bool {
        self.mouse
    }

    pub fn bindings_mut(&mut self) -> &mut KeyBindingRegistry {
        &mut self.bindings
    }

    /// The last rendered frame.
    pub fn screen(&self) -> &Compositor {
        &self.front
    }

    /// Regions from the last layout pass.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    // -----------------------------------------------------------------------
    // Root, focus, mouse, capture
    // -----------------------------------------------------------------------

    /// Install `node` as the root. With `give_focus`, focus moves to the
    /// node or, for containers, to its default focus candidate.
    pub fn set_root(&mut self, node: NodeId, give_focus: bool) -> Result<()> {
        self.dom.node(node)?;
        tracing::debug!(?node, give_focus, "root installed");
        self.root = Some(node);
        if give_focus {
            self.focus = Some(self.dom.default_focus(node).unwrap_or(node));
        }
        self.dirty = true;
        Ok(())
    }

    /// Move focus to `node`, or to its default focus candidate when the node
    /// cannot hold focus itself.
    pub fn set_focus(&mut self, node: NodeId) -> Result<()> {
        self.dom.node(node)?;
        let target = self.dom.default_focus(node).unwrap_or(node);
        tracing::trace!(?target, "focus set");
        self.focus = Some(target);
        self.dirty = true;
        Ok(())
    }

    /// Turn mouse capture on or off. Applied to the terminal immediately
    /// while running, otherwise when `run` starts.
    pub fn enable_mouse(&mut self, enabled: bool) {
        self.mouse = enabled;
        if let Some(backend) = self.backend.as_mut() {
            if let Err(err) = backend.set_mouse_capture(enabled) {
                tracing::warn!(%err, "failed to toggle mouse capture");
            }
        }
    }

    /// Install a function that sees every key before anything else. Returning
    /// `None` swallows the key; returning a key (possibly a different one)
    /// passes it on.
    pub fn set_input_capture(&mut self, f: impl FnMut(&AppHandle, KeyEvent) -> Option<KeyEvent> + 'static) {
        self.capture = Some(Box::new(f));
    }

    pub fn clear_input_capture(&mut self) {
        self.capture = None;
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Ask the loop to end after the current iteration. A stop requested
    /// before `run` makes `run` return at once.
    pub fn stop(&self) {
        self.queue.handle().stop();
    }

    /// Render now. Without a backend the frame is only kept in memory.
    pub fn draw(&mut self) -> Result<()> {
        self.render()
    }

    /// Run on the process terminal until stopped.
    pub fn run(&mut self) -> Result<()> {
        self.run_with(TerminalBackend::new())
    }

    /// Run on `backend` until stopped. The backend is restored on every exit
    /// path once it was initialised.
    pub fn run_with(&mut self, backend: impl Backend + 'static) -> Result<()> {
        match self.state {
            RunState::Running => return Err(Error::AlreadyRunning),
            RunState::Stopped => return Err(Error::AlreadyStopped),
            RunState::Created => {}
        }
        if self.queue.handle().is_stopped() {
            tracing::debug!("stop requested before run; not starting");
            self.state = RunState::Stopped;
            return Ok(());
        }

        let mut backend: Box<dyn Backend> = Box::new(backend);
        if let Err(err) = backend.init() {
            self.state = RunState::Stopped;
            return Err(Error::Backend(err));
        }
        tracing::debug!("application started");
        self.state = RunState::Running;
        self.backend = Some(backend);

        let result = self.event_loop();

        let restored = match self.backend.take() {
            Some(mut backend) => backend.restore(),
            None => Ok(()),
        };
        self.state = RunState::Stopped;
        tracing::debug!(ok = result.is_ok(), "application stopped");
        result?;
        restored.map_err(Error::Backend)
    }

    fn event_loop(&mut self) -> Result<()> {
        let runtime = tokio::runtime::Builder::new_current_thread().enable_time().build()?;
        runtime.block_on(self.drive())
    }

    async fn drive(&mut self) -> Result<()> {
        self.start_backend()?;
        let interval = self.config.frame_interval();
        let mut last_frame: Option<Instant> = None;

        loop {
            if self.queue.handle().is_stopped() {
                break;
            }
            if self.dirty {
                if let (Some(interval), Some(last)) = (interval, last_frame) {
                    let wait = interval.saturating_sub(last.elapsed());
                    if !wait.is_zero() {
                        tokio::time::sleep(wait).await;
                        self.process_pending();
                        if self.queue.handle().is_stopped() {
                            break;
                        }
                    }
                }
                self.render()?;
                last_frame = Some(Instant::now());
            }

            let Some(command) = self.queue.recv().await else { break };
            self.dispatch(command);
            self.process_pending();
        }
        Ok(())
    }

    fn start_backend(&mut self) -> Result<()> {
        let handle = self.handle();
        let Some(backend) = self.backend.as_mut() else { return Ok(()) };
        let (width, height) = backend.size()?;
        if let Some(title) = self.config.title.as_deref() {
            backend.set_title(title)?;
        }
        if self.mouse {
            backend.set_mouse_capture(true)?;
        }
        backend.start_input(handle);
        self.resize(width, height);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Queue processing
    // -----------------------------------------------------------------------

    /// Apply every command already waiting on the queue, in order, then fire
    /// pending change notifications. Commands posted by those callbacks are
    /// applied in the same call.
    pub fn process_pending(&mut self) {
        for _ in 0..MAX_NOTIFY_ROUNDS {
            while let Some(command) = self.queue.try_recv() {
                self.dispatch(command);
            }
            if !self.notify_changes() {
                break;
            }
        }
        self.repair_focus();
    }

    fn dispatch(&mut self, command: Command) {
        tracing::trace!(?command, "dispatch");
        match command {
            Command::Input(event) => self.handle_input(event),
            Command::Update { f, draw } => {
                f(self);
                if draw {
                    self.dirty = true;
                }
            }
            Command::Intent(intent) => self.apply_intent(intent),
            Command::Wake => {}
        }
    }

    fn notify_changes(&mut self) -> bool {
        let handle = self.handle();
        let mut fired = false;
        for (node, data) in self.dom.iter_mut() {
            let ctx = EventCtx { handle: &handle, node };
            fired |= data.widget.as_primitive_mut().notify_changes(&ctx);
        }
        if fired {
            self.dirty = true;
        }
        fired
    }

    /// Redirect focus that points at a destroyed or no longer displayed node
    /// to the root's default focus.
    fn repair_focus(&mut self) {
        let (Some(root), Some(focus)) = (self.root, self.focus) else { return };
        if self.dom.contains(focus) && self.dom.is_displayed(root, focus) {
            return;
        }
        let replacement = self.dom.default_focus(root);
        tracing::debug!(?focus, ?replacement, "focus lost its node; redirecting");
        self.focus = replacement;
        self.dirty = true;
    }

    // -----------------------------------------------------------------------
    // Intents
    // -----------------------------------------------------------------------

    fn apply_intent(&mut self, intent: Intent) {
        let outcome = match intent {
            Intent::Stop => {
                self.stop();
                Ok(())
            }
            Intent::Draw => Ok(()),
            Intent::SetFocus(node) => self.set_focus(node),
            Intent::FocusNext => {
                self.cycle_focus(true);
                Ok(())
            }
            Intent::FocusPrevious => {
                self.cycle_focus(false);
                Ok(())
            }
            Intent::SetRoot { node, give_focus } => self.set_root(node, give_focus),
            Intent::SwitchPanel { panels, key } => self
                .dom
                .widget_mut::<Panels>(panels)
                .and_then(|stack| stack.set_current_panel(&key))
                .map(|()| self.refocus_within(panels)),
            Intent::SwitchTab { tabs, key } => self
                .dom
                .widget_mut::<TabbedPanels>(tabs)
                .and_then(|t| t.set_current_tab(&key))
                .map(|()| self.refocus_within(tabs)),
            Intent::RemoveItem { container, index } => self.dom.remove_at(container, index),
        };
        if let Err(err) = outcome {
            tracing::warn!(%err, "intent rejected");
        }
        self.dirty = true;
    }

    /// After `container` changed what it shows, move focus into it if focus
    /// was inside it or is no longer displayed.
    fn refocus_within(&mut self, container: NodeId) {
        let inside = self.focus.is_some_and(|f| self.dom.is_ancestor_or_self(container, f));
        let lost = match (self.root, self.focus) {
            (Some(root), Some(f)) => !self.dom.is_displayed(root, f),
            _ => false,
        };
        if inside || lost {
            if let Some(target) = self.dom.default_focus(container) {
                self.focus = Some(target);
            }
        }
    }

    fn cycle_focus(&mut self, forward: bool) {
        let Some(root) = self.root else { return };
        let order = self.dom.focus_order(root);
        if order.is_empty() {
            return;
        }
        let position = self.focus.and_then(|f| order.iter().position(|&id| id == f));
        let next = match (position, forward) {
            (Some(i), true) => (i + 1) % order.len(),
            (Some(i), false) => (i + order.len() - 1) % order.len(),
            (None, true) => 0,
            (None, false) => order.len() - 1,
        };
        self.focus = Some(order[next]);
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::Mouse(mouse) => self.handle_mouse(mouse),
            InputEvent::Paste(text) => self.handle_paste(&text),
            InputEvent::Resize { width, height } => self.resize(width, height),
            InputEvent::FocusGained | InputEvent::FocusLost => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        self.dirty = true;
        let handle = self.handle();
        let key = match self.capture.as_mut() {
            Some(capture) => match capture(&handle, key) {
                Some(key) => key,
                None => return,
            },
            None => key,
        };

        for node in self.focus_path() {
            let Some(data) = self.dom.get_mut(node) else { continue };
            if data.disabled {
                continue;
            }
            let ctx = EventCtx { handle: &handle, node };
            if data.widget.as_primitive_mut().handle_key(key, &ctx).is_consumed() {
                return;
            }
        }

        if let Some(intent) = self.bindings.resolve(&key).cloned() {
            self.apply_intent(intent);
        }
    }

    fn handle_paste(&mut self, text: &str) {
        self.dirty = true;
        let handle = self.handle();
        for node in self.focus_path() {
            let Some(data) = self.dom.get_mut(node) else { continue };
            let ctx = EventCtx { handle: &handle, node };
            if data.widget.as_primitive_mut().handle_paste(text, &ctx).is_consumed() {
                return;
            }
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if !self.mouse {
            return;
        }
        self.dirty = true;
        self.refresh_layout();
        if self.route_to_overlay(mouse) {
            return;
        }
        let Some(hit) = self.layout.hit_test(i32::from(mouse.x), i32::from(mouse.y)) else { return };
        let mut path = vec![hit];
        path.extend(self.dom.ancestors(hit));

        if mouse.kind == MouseAction::Down(MouseBtn::Left) {
            if let Some(target) = path.iter().copied().find(|&id| self.dom.get(id).is_some_and(NodeData::can_focus)) {
                self.focus = Some(target);
            }
        }

        let handle = self.handle();
        for node in path {
            let Some(inner) = self.layout.inner(node) else { continue };
            let Some(data) = self.dom.get_mut(node) else { continue };
            if data.disabled {
                continue;
            }
            let local = Offset::new(i32::from(mouse.x) - inner.x, i32::from(mouse.y) - inner.y);
            let ctx = EventCtx { handle: &handle, node };
            if data.widget.as_primitive_mut().handle_mouse(mouse, local, &ctx).is_consumed() {
                break;
            }
        }
    }

    /// Deliver `mouse` to the focused node's overlay when it lies inside it.
    fn route_to_overlay(&mut self, mouse: MouseEvent) -> bool {
        let Some(focus) = self.focus else { return false };
        let Some(inner) = self.layout.inner(focus) else { return false };
        let handle = self.handle();
        let Some(data) = self.dom.get_mut(focus) else { return false };
        if data.disabled {
            return false;
        }
        let Some(area) = data.widget.as_primitive().overlay_region(inner) else { return false };
        let (x, y) = (i32::from(mouse.x), i32::from(mouse.y));
        if !area.contains(x, y) {
            return false;
        }
        let ctx = EventCtx { handle: &handle, node: focus };
        let local = Offset::new(x - area.x, y - area.y);
        data.widget.as_primitive_mut().handle_overlay_mouse(mouse, local, &ctx);
        true
    }

    /// The focused node followed by its ancestors.
    fn focus_path(&self) -> Vec<NodeId> {
        let Some(focus) = self.focus else { return Vec::new() };
        let mut path = vec![focus];
        path.extend(self.dom.ancestors(focus));
        path
    }

    // -----------------------------------------------------------------------
    // Rendering
    // -----------------------------------------------------------------------

    /// Resize the frame buffers; the next frame repaints every cell.
    pub fn resize(&mut self, width: u16, height: u16) {
        tracing::debug!(width, height, "resize");
        self.front.resize(width, height);
        self.back.resize(width, height);
        self.full_repaint = true;
        self.dirty = true;
    }

    fn refresh_layout(&mut self) {
        self.layout = match self.root {
            Some(root) => Layout::compute(&self.dom, root, self.back.region()),
            None => Layout::new(),
        };
    }

    fn render(&mut self) -> Result<()> {
        self.refresh_layout();
        paint(&self.dom, &self.layout, self.focus, &mut self.back);
        if let Some(backend) = self.backend.as_mut() {
            let updates = if self.full_repaint { self.back.all_updates() } else { self.back.diff(&self.front) };
            backend.draw(&self.back, &updates)?;
            self.full_repaint = false;
        }
        std::mem::swap(&mut self.front, &mut self.back);
        self.dirty = false;
        Ok(())
    }
}

impl fmt::Debug for Application {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Application")
            .field("state", &self.state)
            .field("root", &self.root)
            .field("focus", &self.focus)
            .field("mouse", &self.mouse)
            .field("nodes", &self.dom.len())
            .finish_non_exhaustive()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::{Arc, Mutex};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::backend::HeadlessBackend;
    use crate::event::{Key, Modifiers};
    use crate::widgets::{Button, Flex, FlexItem, Form, InputField, TextView};

    fn two_buttons(app: &mut Application) -> (NodeId, NodeId, NodeId) {
        let dom = app.dom_mut();
        let root = dom.insert(Flex::row());
        let a = dom.insert(Button::new("a"));
        let b = dom.insert(Button::new("b"));
        dom.add_item(root, a, FlexItem::proportional(1)).unwrap();
        dom.add_item(root, b, FlexItem::proportional(1)).unwrap();
        app.set_root(root, true).unwrap();
        (root, a, b)
    }

    fn press(app: &mut Application, key: KeyEvent) {
        app.handle().send_input(key.into());
        app.process_pending();
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    #[test]
    fn new_application_defaults() {
        let app = Application::default();
        assert_eq!(app.state(), RunState::Created);
        assert_eq!(app.focus(), None);
        assert!(!app.mouse_enabled());
    }

    #[test]
    fn stop_before_run_returns_without_starting() {
        let mut app = Application::default();
        let backend = HeadlessBackend::new(20, 5);
        let probe = backend.probe();
        app.stop();
        app.run_with(backend).unwrap();
        assert_eq!(app.state(), RunState::Stopped);
        assert_eq!(probe.frame_count(), 0);
        assert!(!probe.is_initialized());
    }

    #[test]
    fn init_failure_is_backend_error() {
        let mut app = Application::default();
        let err = app.run_with(HeadlessBackend::new(10, 2).fail_init()).unwrap_err();
        assert!(matches!(err, Error::Backend(_)));
    }

    #[test]
    fn ctrl_c_ends_run_and_restores() {
        let mut app = Application::new(AppConfig::new().with_title("t").with_mouse(true).with_fps(0));
        two_buttons(&mut app);
        let backend = HeadlessBackend::new(20, 3).with_input([KeyEvent::ctrl('c').into()]);
        let probe = backend.probe();

        app.run_with(backend).unwrap();
        assert!(probe.is_restored());
        assert_eq!(probe.title().as_deref(), Some("t"));
        assert!(probe.frame_count() >= 1);
        assert!(matches!(app.run_with(HeadlessBackend::new(1, 1)), Err(Error::AlreadyStopped)));
    }

    #[test]
    fn run_from_inside_loop_is_rejected() {
        let mut app = Application::new(AppConfig::new().with_fps(0));
        let seen = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&seen);
        app.handle().queue_update(move |app| {
            let nested = app.run_with(HeadlessBackend::new(1, 1));
            *sink.lock().unwrap() = Some(matches!(nested, Err(Error::AlreadyRunning)));
            app.stop();
        });
        app.run_with(HeadlessBackend::new(10, 2)).unwrap();
        assert_eq!(*seen.lock().unwrap(), Some(true));
    }

    #[test]
    fn queued_updates_apply_in_order_before_next_frame() {
        let mut app = Application::new(AppConfig::new().with_fps(0));
        let view = app.dom_mut().insert(TextView::new());
        app.set_root(view, false).unwrap();
        let handle = app.handle();
        for word in ["one", "two", "three"] {
            handle.queue_update_draw(move |app| {
                if let Ok(v) = app.dom_mut().widget_mut::<TextView>(view) {
                    v.append(word);
                }
            });
        }
        handle.queue_update(|app| app.stop());

        let backend = HeadlessBackend::new(20, 2);
        let probe = backend.probe();
        app.run_with(backend).unwrap();

        assert_eq!(app.dom().widget::<TextView>(view).unwrap().text(), "onetwothree");
        assert_eq!(probe.frame_count(), 1);
    }

    // ── Key dispatch ─────────────────────────────────────────────────

    #[test]
    fn tab_binding_cycles_focus() {
        let mut app = Application::default();
        let (_, a, b) = two_buttons(&mut app);
        assert_eq!(app.focus(), Some(a));
        press(&mut app, KeyEvent::plain(Key::Tab));
        assert_eq!(app.focus(), Some(b));
        press(&mut app, KeyEvent::plain(Key::Tab));
        assert_eq!(app.focus(), Some(a));
        press(&mut app, KeyEvent::plain(Key::BackTab));
        assert_eq!(app.focus(), Some(b));
    }

    #[test]
    fn unconsumed_escape_bubbles_to_form() {
        let mut app = Application::default();
        let cancelled = Rc::new(RefCell::new(false));
        let flag = Rc::clone(&cancelled);
        let dom = app.dom_mut();
        let form = dom.insert(Form::new());
        let field = dom.insert(InputField::new().with_label("Name"));
        dom.add_form_item(form, field).unwrap();
        dom.widget_mut::<Form>(form).unwrap().set_cancel_func(move |_, ()| *flag.borrow_mut() = true);
        app.set_root(form, true).unwrap();
        assert_eq!(app.focus(), Some(field));

        press(&mut app, KeyEvent::plain(Key::Char('x')));
        assert_eq!(app.dom().widget::<InputField>(field).unwrap().text(), "x");
        press(&mut app, KeyEvent::plain(Key::Escape));
        assert!(*cancelled.borrow());
    }

    #[test]
    fn input_capture_can_swallow_and_rewrite() {
        let mut app = Application::default();
        let (_, a, b) = two_buttons(&mut app);
        app.set_input_capture(|_, key| match key.code {
            Key::Char('n') => Some(KeyEvent::plain(Key::Tab)),
            Key::Tab => None,
            _ => Some(key),
        });
        press(&mut app, KeyEvent::plain(Key::Tab));
        assert_eq!(app.focus(), Some(a));
        press(&mut app, KeyEvent::plain(Key::Char('n')));
        assert_eq!(app.focus(), Some(b));
    }

    #[test]
    fn custom_binding_posts_intent() {
        let mut app = Application::default();
        let (_, _, b) = two_buttons(&mut app);
        app.bindings_mut().bind(Key::F(2), Modifiers::NONE, Intent::SetFocus(b));
        press(&mut app, KeyEvent::plain(Key::F(2)));
        assert_eq!(app.focus(), Some(b));
    }

    // ── Focus repair and intents ─────────────────────────────────────

    #[test]
    fn removing_focused_node_redirects_focus() {
        let mut app = Application::default();
        let (root, a, b) = two_buttons(&mut app);
        app.handle().post(Intent::RemoveItem { container: root, index: 0 });
        app.process_pending();
        assert_eq!(app.dom().parent(a), None);
        assert_eq!(app.focus(), Some(b));
    }

    #[test]
    fn switch_panel_moves_focus_to_front_page() {
        let mut app = Application::default();
        let dom = app.dom_mut();
        let panels = dom.insert(Panels::new());
        let first = dom.insert(Button::new("first"));
        let second = dom.insert(Button::new("second"));
        dom.add_panel(panels, "first", first, true).unwrap();
        dom.add_panel(panels, "second", second, false).unwrap();
        app.set_root(panels, true).unwrap();
        assert_eq!(app.focus(), Some(first));

        app.handle().post(Intent::SwitchPanel { panels, key: "second".into() });
        app.process_pending();
        assert_eq!(app.focus(), Some(second));

        app.handle().post(Intent::SwitchPanel { panels, key: "missing".into() });
        app.process_pending();
        assert_eq!(app.focus(), Some(second));
    }

    #[test]
    fn set_root_rejects_unknown_node() {
        let mut app = Application::default();
        let id = app.dom_mut().insert(Button::new("x"));
        app.dom_mut().remove(id);
        assert!(matches!(app.set_root(id, true), Err(Error::UnknownNode(_))));
        assert_eq!(app.root(), None);
    }

    // ── Mouse and rendering ──────────────────────────────────────────

    #[test]
    fn click_focuses_only_with_mouse_enabled() {
        let mut app = Application::default();
        let (_, a, b) = two_buttons(&mut app);
        app.resize(20, 1);
        app.draw().unwrap();

        app.handle().send_input(MouseEvent::click(15, 0).into());
        app.process_pending();
        assert_eq!(app.focus(), Some(a));

        app.enable_mouse(true);
        app.handle().send_input(MouseEvent::click(15, 0).into());
        app.process_pending();
        assert_eq!(app.focus(), Some(b));
    }

    #[test]
    fn draw_renders_into_screen() {
        let mut app = Application::default();
        let view = app.dom_mut().insert(TextView::new().with_text("ready"));
        app.set_root(view, false).unwrap();
        app.resize(10, 1);
        app.draw().unwrap();
        assert_eq!(app.screen().row_text(0), "ready     ");
    }
}
