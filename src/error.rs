//! Error types for the stashify storage contracts.

use std::io;

/// Convenience alias used throughout the crate.
pub type Result<T, E = StashError> = std::result::Result<T, E>;

/// Error type shared by every backend.
///
/// Backend failures are carried as the original [`io::Error`] without
/// translation, so callers can match on [`io::ErrorKind`] exactly as they
/// would against `std::fs`.
///
/// # Examples
///
/// ```rust
/// use stashify::{FileEntry, StashError};
///
/// let err = FileEntry::new("a/b", "").unwrap_err();
/// assert!(matches!(err, StashError::InvalidName { .. }));
/// ```
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum StashError {
    /// A name contained a path separator or addressed a pseudo-entry.
    #[error("invalid name: {name:?}")]
    InvalidName {
        /// The rejected name.
        name: String,
    },

    /// Neither a name nor a path was supplied.
    #[error("{kind}: a name or a path is required")]
    MissingIdentifier {
        /// The kind of entry being constructed.
        kind: &'static str,
    },

    /// Contents could not be interpreted as requested.
    #[error("invalid data: {name} ({details})")]
    InvalidData {
        /// Name of the offending entry.
        name: String,
        /// Details about the invalid data.
        details: String,
    },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Deserialization error.
    #[error("deserialization error: {0}")]
    Deserialization(String),

    /// Failure surfaced unmodified from the storage backend.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl StashError {
    /// The [`io::ErrorKind`] of a backend failure, if this is one.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            StashError::Io(e) => Some(e.kind()),
            _ => None,
        }
    }

    pub(crate) fn not_found(name: &str) -> Self {
        io::Error::new(io::ErrorKind::NotFound, format!("not found: {name}")).into()
    }

    pub(crate) fn is_a_directory(name: &str) -> Self {
        io::Error::new(io::ErrorKind::IsADirectory, format!("is a directory: {name}")).into()
    }

    pub(crate) fn not_a_directory(name: &str) -> Self {
        io::Error::new(
            io::ErrorKind::NotADirectory,
            format!("not a directory: {name}"),
        )
        .into()
    }

    pub(crate) fn already_exists(name: &str) -> Self {
        io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("already exists: {name}"),
        )
        .into()
    }
}
