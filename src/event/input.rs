//! Input event types, decoupled from crossterm.
//!
//! The backend converts crossterm events with [`InputEvent::from_crossterm`];
//! everything above the backend sees only these types.

use std::ops::{BitAnd, BitOr};

use crossterm::event as ct;

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// Keyboard key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Tab,
    BackTab,
    Backspace,
    Delete,
    Insert,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
}

// ---------------------------------------------------------------------------
// Modifiers
// ---------------------------------------------------------------------------

/// Modifier key bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(pub u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const SHIFT: Modifiers = Modifiers(1);
    pub const CTRL: Modifiers = Modifiers(2);
    pub const ALT: Modifiers = Modifiers(4);

    /// Whether `self` contains all the bits in `other`.
    pub fn contains(self, other: Modifiers) -> bool {
        (self.0 & other.0) == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// `self` with the bits of `other` cleared.
    pub fn without(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 & !other.0)
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;
    fn bitor(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 | rhs.0)
    }
}

impl BitAnd for Modifiers {
    type Output = Modifiers;
    fn bitand(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 & rhs.0)
    }
}

// ---------------------------------------------------------------------------
// KeyEvent
// ---------------------------------------------------------------------------

/// A key press with modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(code: Key, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    /// A key with no modifiers held.
    pub fn plain(code: Key) -> Self {
        Self::new(code, Modifiers::NONE)
    }

    /// `Ctrl` plus a character key.
    pub fn ctrl(c: char) -> Self {
        Self::new(Key::Char(c), Modifiers::CTRL)
    }

    /// Whether this is an unmodified (or shift-only) printable character.
    pub fn printable(&self) -> Option<char> {
        match self.code {
            Key::Char(c) if self.modifiers.without(Modifiers::SHIFT).is_empty() => Some(c),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// MouseBtn / MouseAction / MouseEvent
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseBtn {
    Left,
    Right,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseAction {
    Down(MouseBtn),
    Up(MouseBtn),
    Drag(MouseBtn),
    Moved,
    ScrollUp,
    ScrollDown,
}

/// A mouse event in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MouseEvent {
    pub kind: MouseAction,
    pub x: u16,
    pub y: u16,
    pub modifiers: Modifiers,
}

impl MouseEvent {
    /// A left-button press at (x, y).
    pub fn click(x: u16, y: u16) -> Self {
        Self { kind: MouseAction::Down(MouseBtn::Left), x, y, modifiers: Modifiers::NONE }
    }
}

// ---------------------------------------------------------------------------
// InputEvent
// ---------------------------------------------------------------------------

/// Top-level input event delivered to the application loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize { width: u16, height: u16 },
    FocusGained,
    FocusLost,
    Paste(String),
}

impl InputEvent {
    /// Convert a crossterm event.
    ///
    /// Key releases and key codes with no counterpart in [`Key`] yield `None`.
    pub fn from_crossterm(event: ct::Event) -> Option<InputEvent> {
        match event {
            ct::Event::Key(ke) => {
                if ke.kind == ct::KeyEventKind::Release {
                    return None;
                }
                convert_key(ke).map(InputEvent::Key)
            }
            ct::Event::Mouse(me) => convert_mouse(me).map(InputEvent::Mouse),
            ct::Event::Resize(width, height) => Some(InputEvent::Resize { width, height }),
            ct::Event::FocusGained => Some(InputEvent::FocusGained),
            ct::Event::FocusLost => Some(InputEvent::FocusLost),
            ct::Event::Paste(s) => Some(InputEvent::Paste(s)),
        }
    }
}

impl From<KeyEvent> for InputEvent {
    fn from(key: KeyEvent) -> Self {
        InputEvent::Key(key)
    }
}

impl From<MouseEvent> for InputEvent {
    fn from(mouse: MouseEvent) -> Self {
        InputEvent::Mouse(mouse)
    }
}

// ---------------------------------------------------------------------------
// crossterm conversions
// ---------------------------------------------------------------------------

fn convert_modifiers(m: ct::KeyModifiers) -> Modifiers {
    let mut out = Modifiers::NONE;
    if m.contains(ct::KeyModifiers::SHIFT) {
        out = out | Modifiers::SHIFT;
    }
    if m.contains(ct::KeyModifiers::CONTROL) {
        out = out | Modifiers::CTRL;
    }
    if m.contains(ct::KeyModifiers::ALT) {
        out = out | Modifiers::ALT;
    }
    out
}

fn convert_key(ke: ct::KeyEvent) -> Option<KeyEvent> {
    let code = match ke.code {
        ct::KeyCode::Char(c) => Key::Char(c),
        ct::KeyCode::Enter => Key::Enter,
        ct::KeyCode::Esc => Key::Escape,
        ct::KeyCode::Tab => Key::Tab,
        ct::KeyCode::BackTab => Key::BackTab,
        ct::KeyCode::Backspace => Key::Backspace,
        ct::KeyCode::Delete => Key::Delete,
        ct::KeyCode::Insert => Key::Insert,
        ct::KeyCode::Left => Key::Left,
        ct::KeyCode::Right => Key::Right,
        ct::KeyCode::Up => Key::Up,
        ct::KeyCode::Down => Key::Down,
        ct::KeyCode::Home => Key::Home,
        ct::KeyCode::End => Key::End,
        ct::KeyCode::PageUp => Key::PageUp,
        ct::KeyCode::PageDown => Key::PageDown,
        ct::KeyCode::F(n) => Key::F(n),
        _ => return None,
    };
    let mut modifiers = convert_modifiers(ke.modifiers);
    // Shift is already folded into BackTab and into the character itself.
    if matches!(code, Key::BackTab | Key::Char(_)) {
        modifiers = modifiers.without(Modifiers::SHIFT);
    }
    Some(KeyEvent { code, modifiers })
}

fn convert_button(b: ct::MouseButton) -> MouseBtn {
    match b {
        ct::MouseButton::Left => MouseBtn::Left,
        ct::MouseButton::Right => MouseBtn::Right,
        ct::MouseButton::Middle => MouseBtn::Middle,
    }
}

fn convert_mouse(me: ct::MouseEvent) -> Option<MouseEvent> {
    let kind = match me.kind {
        ct::MouseEventKind::Down(b) => MouseAction::Down(convert_button(b)),
        ct::MouseEventKind::Up(b) => MouseAction::Up(convert_button(b)),
        ct::MouseEventKind::Drag(b) => MouseAction::Drag(convert_button(b)),
        ct::MouseEventKind::Moved => MouseAction::Moved,
        ct::MouseEventKind::ScrollUp => MouseAction::ScrollUp,
        ct::MouseEventKind::ScrollDown => MouseAction::ScrollDown,
        _ => return None,
    };
    Some(MouseEvent { kind, x: me.column, y: me.row, modifiers: convert_modifiers(me.modifiers) })
}

// ===========================================================================
// Tests
// ===========================================================================
