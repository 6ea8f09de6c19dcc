//! Textual key specifications such as `ctrl+q`, `shift+tab` or `f5`.
//!
//! A spec is a `+`-separated list of zero or more modifiers followed by one
//! key. Names are case-insensitive. The result is normalized the same way
//! crossterm input is: shift is folded into characters and into `BackTab`,
//! so a parsed spec compares equal to the event a real key press produces.

use logos::Logos;

use super::input::{Key, KeyEvent, Modifiers};
use crate::error::{Error, Result};

/// Key spec token.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t]+")]
enum Token {
    #[token("+")]
    Plus,

    /// A modifier or key name: `ctrl`, `enter`, `f12`, `q`.
    #[regex(r"[a-zA-Z][a-zA-Z0-9_]*")]
    Word,

    /// Any single non-letter character used as a key: `1`, `?`, `/`.
    #[regex(r"[^+ \ta-zA-Z]")]
    Symbol,
}

/// Parse a key spec into the [`KeyEvent`] it denotes.
pub fn parse_key_spec(spec: &str) -> Result<KeyEvent> {
    let invalid = || Error::InvalidKeySpec(spec.to_string());

    let mut parts: Vec<(Token, &str)> = Vec::new();
    let mut lexer = Token::lexer(spec);
    while let Some(token) = lexer.next() {
        let token = token.map_err(|()| invalid())?;
        parts.push((token, lexer.slice()));
    }

    let mut items: Vec<&str> = Vec::new();
    let mut expect_item = true;
    let count = parts.len();
    for (i, (token, text)) in parts.into_iter().enumerate() {
        match (token, expect_item) {
            (Token::Plus, false) => expect_item = true,
            // "ctrl++" names the plus key itself.
            (Token::Plus, true) if i + 1 == count && !items.is_empty() => {
                items.push(text);
                expect_item = false;
            }
            (Token::Plus, true) | (_, false) => return Err(invalid()),
            (_, true) => {
                items.push(text);
                expect_item = false;
            }
        }
    }
    if expect_item {
        return Err(invalid());
    }

    let (key, mods) = items.split_last().ok_or_else(invalid)?;
    let code = key_name(key).ok_or_else(invalid)?;
    let mut modifiers = Modifiers::NONE;
    for name in mods {
        modifiers = modifiers | modifier_name(name).ok_or_else(invalid)?;
    }
    Ok(normalize(code, modifiers))
}

fn modifier_name(text: &str) -> Option<Modifiers> {
    match text.to_ascii_lowercase().as_str() {
        "ctrl" | "control" => Some(Modifiers::CTRL),
        "shift" => Some(Modifiers::SHIFT),
        "alt" | "meta" => Some(Modifiers::ALT),
        _ => None,
    }
}

fn key_name(text: &str) -> Option<Key> {
    let mut chars = text.chars();
    if let (Some(c), None) = (chars.next(), chars.clone().next()) {
        return Some(Key::Char(c));
    }

    let lower = text.to_ascii_lowercase();
    let key = match lower.as_str() {
        "enter" | "return" => Key::Enter,
        "esc" | "escape" => Key::Escape,
        "tab" => Key::Tab,
        "backtab" => Key::BackTab,
        "backspace" | "bs" => Key::Backspace,
        "delete" | "del" => Key::Delete,
        "insert" | "ins" => Key::Insert,
        "left" => Key::Left,
        "right" => Key::Right,
        "up" => Key::Up,
        "down" => Key::Down,
        "home" => Key::Home,
        "end" => Key::End,
        "pageup" | "page_up" | "pgup" => Key::PageUp,
        "pagedown" | "page_down" | "pgdn" => Key::PageDown,
        "space" => Key::Char(' '),
        "plus" => Key::Char('+'),
        other => {
            let n: u8 = other.strip_prefix('f')?.parse().ok()?;
            if (1..=24).contains(&n) {
                Key::F(n)
            } else {
                return None;
            }
        }
    };
    Some(key)
}

fn normalize(code: Key, modifiers: Modifiers) -> KeyEvent {
    if !modifiers.contains(Modifiers::SHIFT) {
        return KeyEvent::new(code, modifiers);
    }
    let rest = modifiers.without(Modifiers::SHIFT);
    match code {
        Key::Tab | Key::BackTab => KeyEvent::new(Key::BackTab, rest),
        Key::Char(c) => KeyEvent::new(Key::Char(c.to_ascii_uppercase()), rest),
        other => KeyEvent::new(other, modifiers),
    }
}

// ===========================================================================
// Tests
// ===========================================================================
