//! Single-subscriber callback slots.
//!
//! Each widget event ("selected", "changed", "done", ...) is one `Callback`
//! field. Setting a slot replaces whatever was there; firing an empty slot
//! does nothing.

use std::fmt;

use crate::event::AppHandle;

type Slot<A> = Box<dyn FnMut(&AppHandle, A)>;

/// A slot holding at most one callback taking an argument of type `A`.
pub struct Callback<A> {
    f: Option<Slot<A>>,
}

impl<A> Callback<A> {
    pub fn new() -> Self {
        Self { f: None }
    }

    /// Install `f`, replacing any previous callback.
    pub fn set(&mut self, f: impl FnMut(&AppHandle, A) + 'static) {
        self.f = Some(Box::new(f));
    }

    pub fn clear(&mut self) {
        self.f = None;
    }

    pub fn is_set(&self) -> bool {
        self.f.is_some()
    }

    /// Invoke the callback. Returns whether one was installed.
    pub fn call(&mut self, handle: &AppHandle, arg: A) -> bool {
        match self.f.as_mut() {
            Some(f) => {
                f(handle, arg);
                true
            }
            None => false,
        }
    }
}

impl<A> Default for Callback<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for Callback<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.is_set() { "Callback(set)" } else { "Callback(empty)" })
    }
}

// ===========================================================================
// Tests
// ===========================================================================
