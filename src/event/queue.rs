//! The application queue: one FIFO shared by input, queued updates and
//! intents.
//!
//! [`AppHandle`] is the sending half. It is `Clone + Send + Sync`, so
//! background threads and tasks hold their own copy and use it to schedule
//! work on the loop thread. The receiving half lives inside the
//! [`Application`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};

use super::input::InputEvent;
use super::intent::{Command, Intent};
use crate::app::Application;
use crate::dom::NodeId;

// ---------------------------------------------------------------------------
// AppHandle
// ---------------------------------------------------------------------------

/// Cloneable, thread-safe handle to a running (or not yet running)
/// application.
#[derive(Clone)]
pub struct AppHandle {
    tx: UnboundedSender<Command>,
    stop: Arc<AtomicBool>,
}

impl AppHandle {
    /// Schedule `f` to run on the loop thread, then redraw.
    ///
    /// Updates run in the order they were queued, before the next frame is
    /// rendered. Returns `false` if the application no longer exists.
    pub fn queue_update_draw<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut Application) + Send + 'static,
    {
        self.send(Command::Update { f: Box::new(f), draw: true })
    }

    /// Schedule `f` to run on the loop thread without forcing a redraw.
    pub fn queue_update<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut Application) + Send + 'static,
    {
        self.send(Command::Update { f: Box::new(f), draw: false })
    }

    /// Post an [`Intent`] to be applied on the loop thread.
    pub fn post(&self, intent: Intent) -> bool {
        self.send(Command::Intent(intent))
    }

    /// Request a redraw.
    pub fn draw(&self) -> bool {
        self.post(Intent::Draw)
    }

    /// Request that the loop ends. Sticky: a stop before `run` makes `run`
    /// return immediately.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
        // The receiver may already be gone; the flag alone is enough then.
        let _ = self.tx.send(Command::Wake);
    }

    /// Whether a stop has been requested.
    pub fn is_stopped(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }

    /// Feed an input event into the loop as if the terminal produced it.
    pub fn send_input(&self, event: InputEvent) -> bool {
        self.send(Command::Input(event))
    }

    /// A focus-set callback for a [`FocusManager`](crate::focus::FocusManager)
    /// that posts [`Intent::SetFocus`].
    pub fn focus_setter(&self) -> impl FnMut(NodeId) + Send + 'static {
        let handle = self.clone();
        move |node| {
            handle.post(Intent::SetFocus(node));
        }
    }

    fn send(&self, command: Command) -> bool {
        match self.tx.send(command) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(command = ?err.0, "application queue closed; dropping command");
                false
            }
        }
    }
}

impl std::fmt::Debug for AppHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppHandle")
            .field("stopped", &self.is_stopped())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// CommandQueue
// ---------------------------------------------------------------------------

/// Receiving half of the application queue.
pub(crate) struct CommandQueue {
    rx: UnboundedReceiver<Command>,
    handle: AppHandle,
}

impl CommandQueue {
    pub(crate) fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = AppHandle { tx, stop: Arc::new(AtomicBool::new(false)) };
        Self { rx, handle }
    }

    pub(crate) fn handle(&self) -> &AppHandle {
        &self.handle
    }

    /// Wait for the next command. The queue keeps its own sender, so this
    /// only resolves when something is posted.
    pub(crate) async fn recv(&mut self) -> Option<Command> {
        self.rx.recv().await
    }

    /// Take the next command if one is already waiting.
    pub(crate) fn try_recv(&mut self) -> Option<Command> {
        match self.rx.try_recv() {
            Ok(command) => Some(command),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::input::{Key, KeyEvent};

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn handle_is_send_and_sync() {
        assert_send_sync::<AppHandle>();
    }

    #[test]
    fn commands_arrive_in_fifo_order() {
        let mut queue = CommandQueue::new();
        let handle = queue.handle().clone();

        handle.post(Intent::FocusNext);
        handle.send_input(KeyEvent::plain(Key::Enter).into());
        handle.queue_update_draw(|_| {});
        handle.post(Intent::Stop);

        assert!(matches!(queue.try_recv(), Some(Command::Intent(Intent::FocusNext))));
        assert!(matches!(queue.try_recv(), Some(Command::Input(_))));
        assert!(matches!(queue.try_recv(), Some(Command::Update { draw: true, .. })));
        assert!(matches!(queue.try_recv(), Some(Command::Intent(Intent::Stop))));
        assert!(queue.try_recv().is_none());
    }

    #[test]
    fn stop_sets_flag_and_wakes() {
        let mut queue = CommandQueue::new();
        let handle = queue.handle().clone();
        assert!(!handle.is_stopped());

        handle.stop();
        assert!(handle.is_stopped());
        assert!(queue.handle().is_stopped());
        assert!(matches!(queue.try_recv(), Some(Command::Wake)));
    }

    #[test]
    fn queue_update_without_draw() {
        let mut queue = CommandQueue::new();
        queue.handle().queue_update(|_| {});
        assert!(matches!(queue.try_recv(), Some(Command::Update { draw: false, .. })));
    }

    #[test]
    fn send_after_queue_dropped_reports_false() {
        let queue = CommandQueue::new();
        let handle = queue.handle().clone();
        drop(queue);
        assert!(!handle.post(Intent::Draw));
        assert!(!handle.queue_update_draw(|_| {}));
    }

    #[test]
    fn cross_thread_posts_are_received() {
        let mut queue = CommandQueue::new();
        let threads: Vec<_> = (0..4)
            .map(|_| {
                let handle = queue.handle().clone();
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        handle.post(Intent::Draw);
                    }
                })
            })
            .collect();
        for t in threads {
            t.join().unwrap();
        }

        let mut count = 0;
        while queue.try_recv().is_some() {
            count += 1;
        }
        assert_eq!(count, 100);
    }

    #[test]
    fn recv_waits_for_next_command() {
        let mut queue = CommandQueue::new();
        let handle = queue.handle().clone();
        handle.post(Intent::FocusPrevious);
        let command = tokio_test::block_on(queue.recv());
        assert!(matches!(command, Some(Command::Intent(Intent::FocusPrevious))));
    }
}
