//! Error types for store operations.

use std::fmt;

use crate::path::{Path, PathError};

/// What a local key holds: a value history or a child store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// A scalar value with per-step history.
    Value,
    /// A nested child store.
    Child,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKind::Value => write!(f, "value"),
            ItemKind::Child => write!(f, "child store"),
        }
    }
}

/// Errors from store operations.
///
/// These are usage errors, not transient failures: the store performs no
/// I/O and nothing here is retryable. `Store::has` is the one call that
/// converts failure into a `false` result instead of surfacing it.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Path validation or resolution error.
    #[error("{0}")]
    Path(#[from] PathError),

    /// No value or child store exists at the path.
    #[error("nothing stored at '{path}'")]
    NotFound { path: Path },

    /// The slot exists but was never written at the requested offset.
    #[error("'{path}' has no value written at step offset {offset}")]
    NotWritten { path: Path, offset: usize },

    /// The offset reaches past the resolving node's history window.
    #[error("step offset {offset} is out of range for buffer size {buffer_size}")]
    OffsetOutOfRange { offset: usize, buffer_size: usize },

    /// The terminal key holds the other kind of item.
    #[error("'{path}' holds a {found}, expected a {expected}")]
    TypeConflict {
        path: Path,
        expected: ItemKind,
        found: ItemKind,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path;

    #[test]
    fn not_found_display() {
        let e = Error::NotFound {
            path: path!("foo/bar"),
        };
        assert!(format!("{}", e).contains("foo/bar"));
    }

    #[test]
    fn not_written_display() {
        let e = Error::NotWritten {
            path: path!("data/residual"),
            offset: 2,
        };
        let display = format!("{}", e);
        assert!(display.contains("data/residual"));
        assert!(display.contains("offset 2"));
    }

    #[test]
    fn offset_out_of_range_display() {
        let e = Error::OffsetOutOfRange {
            offset: 3,
            buffer_size: 3,
        };
        let display = format!("{}", e);
        assert!(display.contains("offset 3"));
        assert!(display.contains("buffer size 3"));
    }

    #[test]
    fn type_conflict_display() {
        let e = Error::TypeConflict {
            path: path!("data"),
            expected: ItemKind::Value,
            found: ItemKind::Child,
        };
        let display = format!("{}", e);
        assert!(display.contains("child store"));
        assert!(display.contains("expected a value"));
    }

    #[test]
    fn path_error_conversion() {
        let path_err = PathError::InvalidPath {
            message: "empty path".to_string(),
        };
        let e: Error = path_err.into();
        assert!(matches!(e, Error::Path(_)));
    }

    #[test]
    fn path_error_source() {
        use std::error::Error as StdError;
        let e = Error::Path(PathError::InvalidPath {
            message: "test".to_string(),
        });
        assert!(StdError::source(&e).is_some());
    }
}
