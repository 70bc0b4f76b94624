//! # Extension Traits
//!
//! Convenience methods layered on the contracts.
//!
//! ## Overview
//!
//! [`DirectoryExt`] provides commonly-needed lookups that aren't part of the
//! [`Directory`] contract. They are default methods with a blanket
//! implementation, so every backend gets them for free.
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`contains`](DirectoryExt::contains) | Check whether a child exists |
//! | [`find_path`](DirectoryExt::find_path) | Look up an entry several levels down |
//! | [`read`](DirectoryExt::read) | Contents of a child file |
//! | [`read_to_string`](DirectoryExt::read_to_string) | Contents of a child file as UTF-8 |
//!
//! ## JSON Support (Feature-Gated)
//!
//! With the `serde` feature enabled, [`FileJsonExt`] adds `read_json` and
//! `write_json` to every [`File`](crate::File).

use crate::{Directory, Entry, File, Result, StashError};

/// Extension methods for any directory backend.
///
/// # Example
///
/// ```rust
/// use stashify::{DirEntry, Directory, DirectoryExt, FileEntry};
///
/// # fn main() -> stashify::Result<()> {
/// let root = DirEntry::new("root")?;
/// let sub = DirEntry::new("sub")?;
/// sub.write(&FileEntry::new("a.txt", "hi")?.into())?;
/// root.write(&sub.into())?;
///
/// assert!(root.contains("sub")?);
/// let file = root.find_path(&["sub", "a.txt"])?.expect("nested file");
/// assert!(file.is_file());
/// # Ok(())
/// # }
/// ```
pub trait DirectoryExt: Directory {
    /// Whether `name` is an existing file or directory.
    fn contains(&self, name: &str) -> Result<bool> {
        Ok(self.is_directory(name)? || self.is_file(name)?)
    }

    /// Follow `names` down through child directories.
    ///
    /// Returns `Ok(None)` if any step is missing or is a file before the
    /// last name. An empty `names` also yields `Ok(None)`.
    fn find_path(&self, names: &[&str]) -> Result<Option<Entry>> {
        let Some((first, rest)) = names.split_first() else {
            return Ok(None);
        };
        let mut current = match self.find(first)? {
            Some(entry) => entry,
            None => return Ok(None),
        };
        for name in rest {
            let Entry::Directory(dir) = current else {
                return Ok(None);
            };
            current = match dir.find(name)? {
                Some(entry) => entry,
                None => return Ok(None),
            };
        }
        Ok(Some(current))
    }

    /// Contents of the child file `name`.
    ///
    /// # Errors
    ///
    /// A backend failure if the file is missing or unreadable.
    fn read(&self, name: &str) -> Result<Vec<u8>> {
        self.file(name)?.contents()
    }

    /// Contents of the child file `name` as UTF-8.
    ///
    /// # Errors
    ///
    /// - A backend failure if the file is missing or unreadable
    /// - [`StashError::InvalidData`] if the contents are not valid UTF-8
    fn read_to_string(&self, name: &str) -> Result<String> {
        String::from_utf8(self.read(name)?).map_err(|e| StashError::InvalidData {
            name: name.to_owned(),
            details: e.to_string(),
        })
    }
}

// Blanket implementation - any Directory backend gets DirectoryExt for free
impl<D: Directory + ?Sized> DirectoryExt for D {}

// =============================================================================
// JSON Support (Feature-Gated)
// =============================================================================

#[cfg(feature = "serde")]
mod json {
    use super::*;
    use serde::{Serialize, de::DeserializeOwned};

    /// JSON serialization extension methods.
    ///
    /// Available when the `serde` feature is enabled.
    pub trait FileJsonExt: File {
        /// Read the file and deserialize it as JSON.
        ///
        /// # Errors
        ///
        /// - A backend failure if the file is missing or unreadable
        /// - [`StashError::Deserialization`] if JSON parsing failed
        fn read_json<T: DeserializeOwned>(&self) -> Result<T> {
            let data = self.contents()?;
            serde_json::from_slice(&data).map_err(|e| StashError::Deserialization(e.to_string()))
        }

        /// Serialize `value` as pretty-printed JSON and write it.
        ///
        /// # Errors
        ///
        /// - [`StashError::Serialization`] if serialization failed
        /// - A backend failure from the underlying write
        fn write_json<T: Serialize>(&self, value: &T) -> Result<()> {
            let json = serde_json::to_vec_pretty(value)
                .map_err(|e| StashError::Serialization(e.to_string()))?;
            self.write(&json)
        }
    }

    // Blanket implementation
    impl<F: File + ?Sized> FileJsonExt for F {}

}

#[cfg(feature = "serde")]
pub use json::FileJsonExt;
