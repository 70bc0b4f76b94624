//! The file-or-directory union passed between backends.

use crate::{Directory, File, Result};

/// A child of a [`Directory`]: either a file or a directory, from any backend.
///
/// Operations that accept "something to write" take an `Entry` and match on
/// it, rather than probing the runtime type of their argument.
///
/// # Example
///
/// ```rust
/// use stashify::{Entry, FileEntry};
///
/// # fn main() -> stashify::Result<()> {
/// let entry = Entry::from(FileEntry::new("a.txt", "hi")?);
/// assert_eq!(entry.name(), "a.txt");
/// assert!(entry.is_file());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub enum Entry {
    /// A file.
    File(Box<dyn File>),
    /// A directory.
    Directory(Box<dyn Directory>),
}

impl Entry {
    /// Name of the underlying file or directory.
    pub fn name(&self) -> &str {
        match self {
            Entry::File(f) => f.name(),
            Entry::Directory(d) => d.name(),
        }
    }

    /// Returns `true` for a file.
    #[inline]
    pub fn is_file(&self) -> bool {
        matches!(self, Entry::File(_))
    }

    /// Returns `true` for a directory.
    #[inline]
    pub fn is_directory(&self) -> bool {
        matches!(self, Entry::Directory(_))
    }

    /// Borrow as a file, if this is one.
    pub fn as_file(&self) -> Option<&dyn File> {
        match self {
            Entry::File(f) => Some(f.as_ref()),
            Entry::Directory(_) => None,
        }
    }

    /// Borrow as a directory, if this is one.
    pub fn as_directory(&self) -> Option<&dyn Directory> {
        match self {
            Entry::Directory(d) => Some(d.as_ref()),
            Entry::File(_) => None,
        }
    }

    /// Take the file out, if this is one.
    pub fn into_file(self) -> Option<Box<dyn File>> {
        match self {
            Entry::File(f) => Some(f),
            Entry::Directory(_) => None,
        }
    }

    /// Take the directory out, if this is one.
    pub fn into_directory(self) -> Option<Box<dyn Directory>> {
        match self {
            Entry::Directory(d) => Some(d),
            Entry::File(_) => None,
        }
    }

    /// Equal by value. A file never equals a directory.
    pub fn value_eq(&self, other: &Entry) -> Result<bool> {
        match (self, other) {
            (Entry::File(a), Entry::File(b)) => a.value_eq(b.as_ref()),
            (Entry::Directory(a), Entry::Directory(b)) => a.value_eq(b.as_ref()),
            _ => Ok(false),
        }
    }

    /// Same kind, same backend type, same name and same path.
    pub fn identity_eq(&self, other: &Entry) -> bool {
        match (self, other) {
            (Entry::File(a), Entry::File(b)) => a.identity_eq(b.as_ref()),
            (Entry::Directory(a), Entry::Directory(b)) => a.identity_eq(b.as_ref()),
            _ => false,
        }
    }
}

impl From<Box<dyn File>> for Entry {
    fn from(file: Box<dyn File>) -> Self {
        Entry::File(file)
    }
}

impl From<Box<dyn Directory>> for Entry {
    fn from(directory: Box<dyn Directory>) -> Self {
        Entry::Directory(directory)
    }
}
