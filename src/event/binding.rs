//! Key binding registry.
//!
//! [`KeyBindingRegistry`] maps key+modifier combinations to [`Intent`]s. Keys
//! that neither the global input capture nor the focused widget (or its
//! ancestors) consume are resolved here.

use std::collections::HashMap;

use super::input::{Key, KeyEvent, Modifiers};
use super::intent::Intent;
use super::keyspec::parse_key_spec;
use crate::error::Result;

/// Registry of key bindings, mapping `(Key, Modifiers)` to an [`Intent`].
#[derive(Debug, Clone, Default)]
pub struct KeyBindingRegistry {
    bindings: HashMap<(Key, Modifiers), Intent>,
}

impl KeyBindingRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the standard bindings:
    /// `Ctrl+C` stops, `Tab` and `BackTab` move focus.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.bind(Key::Char('c'), Modifiers::CTRL, Intent::Stop);
        registry.bind(Key::Tab, Modifiers::NONE, Intent::FocusNext);
        registry.bind(Key::BackTab, Modifiers::NONE, Intent::FocusPrevious);
        registry
    }

    /// Register a binding, replacing any existing one for the same keys.
    pub fn bind(&mut self, key: Key, modifiers: Modifiers, intent: Intent) {
        self.bindings.insert((key, modifiers), intent);
    }

    /// Register a binding from a textual spec such as `"ctrl+q"`.
    pub fn bind_spec(&mut self, spec: &str, intent: Intent) -> Result<()> {
        let event = parse_key_spec(spec)?;
        self.bind(event.code, event.modifiers, intent);
        Ok(())
    }

    /// Remove a binding, returning its intent.
    pub fn unbind(&mut self, key: Key, modifiers: Modifiers) -> Option<Intent> {
        self.bindings.remove(&(key, modifiers))
    }

    /// The intent bound to exactly this key and modifier set.
    pub fn resolve(&self, event: &KeyEvent) -> Option<&Intent> {
        self.bindings.get(&(event.code, event.modifiers))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    // ── Construction ─────────────────────────────────────────────────

    #[test]
    fn new_registry_is_empty() {
        let reg = KeyBindingRegistry::new();
        assert!(reg.is_empty());
        assert_eq!(reg.len(), 0);
    }

    #[test]
    fn defaults() {
        let reg = KeyBindingRegistry::with_defaults();
        assert_eq!(reg.len(), 3);
        assert_eq!(reg.resolve(&KeyEvent::ctrl('c')), Some(&Intent::Stop));
        assert_eq!(reg.resolve(&KeyEvent::plain(Key::Tab)), Some(&Intent::FocusNext));
        assert_eq!(reg.resolve(&KeyEvent::plain(Key::BackTab)), Some(&Intent::FocusPrevious));
    }

    // ── Bind / Unbind ────────────────────────────────────────────────

    #[test]
    fn modifiers_must_match_exactly() {
        let mut reg = KeyBindingRegistry::new();
        reg.bind(Key::Char('q'), Modifiers::CTRL, Intent::Stop);
        assert!(reg.resolve(&KeyEvent::plain(Key::Char('q'))).is_none());
        assert_eq!(reg.resolve(&KeyEvent::ctrl('q')), Some(&Intent::Stop));
    }

    #[test]
    fn rebinding_replaces() {
        let mut reg = KeyBindingRegistry::new();
        reg.bind(Key::F(1), Modifiers::NONE, Intent::Draw);
        reg.bind(Key::F(1), Modifiers::NONE, Intent::Stop);
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.resolve(&KeyEvent::plain(Key::F(1))), Some(&Intent::Stop));
    }

    #[test]
    fn unbind_removes() {
        let mut reg = KeyBindingRegistry::with_defaults();
        assert_eq!(reg.unbind(Key::Char('c'), Modifiers::CTRL), Some(Intent::Stop));
        assert!(reg.resolve(&KeyEvent::ctrl('c')).is_none());
        assert_eq!(reg.unbind(Key::Char('c'), Modifiers::CTRL), None);
    }

    // ── Specs ────────────────────────────────────────────────────────

    #[test]
    fn bind_spec_resolves_like_a_key_press() {
        let mut reg = KeyBindingRegistry::new();
        reg.bind_spec("ctrl+q", Intent::Stop).unwrap();
        reg.bind_spec("shift+tab", Intent::FocusPrevious).unwrap();
        assert_eq!(reg.resolve(&KeyEvent::ctrl('q')), Some(&Intent::Stop));
        assert_eq!(reg.resolve(&KeyEvent::plain(Key::BackTab)), Some(&Intent::FocusPrevious));
    }

    #[test]
    fn bind_spec_rejects_garbage() {
        let mut reg = KeyBindingRegistry::new();
        assert!(matches!(
            reg.bind_spec("ctrl+", Intent::Stop),
            Err(Error::InvalidKeySpec(_))
        ));
        assert!(reg.is_empty());
    }
}
