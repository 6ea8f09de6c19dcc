//! Crate-wide error type.
//!
//! Backend failures are fatal to the run loop and surface as the return value
//! of [`Application::run`](crate::app::Application::run). Structural errors
//! (bad node ids, tree invariant violations, missing keys, out-of-range
//! indices) are reported to the caller of the graph operation and leave the
//! graph untouched.

use std::io;

use crate::dom::NodeId;

/// Errors reported by the shell and the composition graph.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The terminal backend failed to initialise, draw, or restore.
    #[error("terminal backend failure: {0}")]
    Backend(#[from] io::Error),

    /// `run` was called on an application whose loop already finished.
    #[error("application has already stopped; create a new one to run again")]
    AlreadyStopped,

    /// `run` was called from inside a running loop (e.g. from a callback).
    #[error("application is already running")]
    AlreadyRunning,

    /// The node id does not refer to a live node.
    #[error("unknown node {0:?}")]
    UnknownNode(NodeId),

    /// The node holds a different widget kind than the operation expects.
    #[error("expected a {expected} widget, found {found}")]
    WrongKind {
        expected: &'static str,
        found: &'static str,
    },

    /// The node already has a parent; detach it first.
    #[error("node {0:?} is already attached to a parent")]
    AlreadyAttached(NodeId),

    /// Attaching the node would make it its own ancestor.
    #[error("attaching {0:?} would create a cycle")]
    Cycle(NodeId),

    /// Index-addressed container received an index past its end.
    #[error("index {index} out of range for container with {len} entries")]
    IndexOutOfRange { index: usize, len: usize },

    /// Key-addressed container has no entry under the key.
    #[error("no entry with key {0:?}")]
    UnknownKey(String),

    /// A textual key binding could not be parsed.
    #[error("invalid key binding {0:?}")]
    InvalidKeySpec(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Bounds check shared by every index-addressed collection.
pub(crate) fn check_index(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(Error::IndexOutOfRange { index, len })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_index_in_range() {
        assert!(check_index(0, 1).is_ok());
        assert!(check_index(2, 3).is_ok());
    }

    #[test]
    fn check_index_out_of_range() {
        match check_index(5, 3) {
            Err(Error::IndexOutOfRange { index, len }) => {
                assert_eq!(index, 5);
                assert_eq!(len, 3);
            }
            other => panic!("expected IndexOutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn messages_are_readable() {
        let err = Error::IndexOutOfRange { index: 5, len: 3 };
        assert_eq!(
            err.to_string(),
            "index 5 out of range for container with 3 entries"
        );
        assert_eq!(
            Error::UnknownKey("panel-9".into()).to_string(),
            "no entry with key \"panel-9\""
        );
    }

    #[test]
    fn io_errors_convert_to_backend() {
        let io = io::Error::new(io::ErrorKind::Other, "no tty");
        let err: Error = io.into();
        assert!(matches!(err, Error::Backend(_)));
    }
}
