//! Local filesystem backend.
//!
//! Handles hold only a path. Every operation opens, acts and closes within
//! the call, and every read goes to disk, so results always reflect the
//! current on-disk state. Failures are the host's `io::Error`s, unchanged.

use std::any::Any;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, trace, warn};

use crate::{Directory, Entry, File, Result, StashError, name, ops};

// =============================================================================
// LocalFile
// =============================================================================

/// A file on the local filesystem.
///
/// Construction performs no I/O. `==` compares location, not contents; use
/// [`File::value_eq`] to compare contents.
///
/// # Example
///
/// ```rust,no_run
/// use stashify::{File, LocalFile};
///
/// # fn main() -> stashify::Result<()> {
/// let file = LocalFile::new("/tmp/x/a.txt")?;
/// assert_eq!(file.name(), "a.txt");
/// file.write(b"hi")?;
/// assert_eq!(file.contents()?, b"hi");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocalFile {
    name: String,
    path: PathBuf,
}

impl LocalFile {
    /// A handle for the file at `path`. Its name is the final component.
    ///
    /// # Errors
    ///
    /// [`StashError::InvalidName`](crate::StashError::InvalidName) if `path`
    /// does not end in a nameable component.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let name = name::from_path(&path)?;
        Ok(Self { name, path })
    }

    /// The host path of this file.
    pub fn as_path(&self) -> &Path {
        &self.path
    }
}

impl File for LocalFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn path(&self) -> Option<&Path> {
        Some(&self.path)
    }

    fn contents(&self) -> Result<Vec<u8>> {
        trace!(path = %self.path.display(), "read file");
        Ok(fs::read(&self.path)?)
    }

    fn write(&self, contents: &[u8]) -> Result<()> {
        debug!(path = %self.path.display(), len = contents.len(), "write file");
        Ok(fs::write(&self.path, contents)?)
    }

    fn delete(&self) -> Result<()> {
        debug!(path = %self.path.display(), "remove file");
        Ok(fs::remove_file(&self.path)?)
    }

    fn exists(&self) -> Result<bool> {
        Ok(self.path.try_exists()?)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl From<LocalFile> for Entry {
    fn from(file: LocalFile) -> Self {
        Entry::File(Box::new(file))
    }
}

// =============================================================================
// LocalDirectory
// =============================================================================

/// A directory on the local filesystem.
///
/// Construction performs no I/O and does not require the directory to
/// exist. `==` compares location, not contents; use
/// [`Directory::value_eq`] to compare contents.
///
/// # Example
///
/// ```rust,no_run
/// use stashify::{Directory, FileEntry, LocalDirectory};
///
/// # fn main() -> stashify::Result<()> {
/// let dir = LocalDirectory::new("/tmp/x")?;
/// dir.write(&FileEntry::new("a.txt", "hi")?.into())?;
/// assert_eq!(std::fs::read_to_string("/tmp/x/a.txt")?, "hi");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocalDirectory {
    name: String,
    path: PathBuf,
}

impl LocalDirectory {
    /// A handle for the directory at `path`. Its name is the final component.
    ///
    /// # Errors
    ///
    /// [`StashError::InvalidName`](crate::StashError::InvalidName) if `path`
    /// does not end in a nameable component.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let name = name::from_path(&path)?;
        Ok(Self { name, path })
    }

    /// The host path of this directory.
    pub fn as_path(&self) -> &Path {
        &self.path
    }

    /// The directory containing this one.
    ///
    /// A handle always carries a name, and the filesystem root has none, so
    /// there is no parent handle for a directory directly under `/` or for a
    /// single-component relative path.
    ///
    /// # Errors
    ///
    /// [`StashError::InvalidName`] if the parent has no nameable final
    /// component.
    pub fn parent(&self) -> Result<LocalDirectory> {
        let parent = self.path.parent().unwrap_or_else(|| Path::new(""));
        LocalDirectory::new(parent)
    }

    fn child(&self, name: &str) -> Result<PathBuf> {
        name::validate(name)?;
        Ok(self.path_of(&[name]))
    }

    fn metadata(&self, name: &str) -> Result<Option<fs::Metadata>> {
        match fs::metadata(self.child(name)?) {
            Ok(m) => Ok(Some(m)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl Directory for LocalDirectory {
    fn name(&self) -> &str {
        &self.name
    }

    fn path(&self) -> Option<&Path> {
        Some(&self.path)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn is_directory(&self, name: &str) -> Result<bool> {
        Ok(self.metadata(name)?.is_some_and(|m| m.is_dir()))
    }

    fn is_file(&self, name: &str) -> Result<bool> {
        Ok(self.metadata(name)?.is_some_and(|m| !m.is_dir()))
    }

    fn file(&self, name: &str) -> Result<Box<dyn File>> {
        Ok(Box::new(LocalFile {
            name: name.to_owned(),
            path: self.child(name)?,
        }))
    }

    fn directory(&self, name: &str) -> Result<Box<dyn Directory>> {
        Ok(Box::new(LocalDirectory {
            name: name.to_owned(),
            path: self.child(name)?,
        }))
    }

    fn files(&self) -> Result<Vec<Entry>> {
        trace!(path = %self.path.display(), "list directory");
        let mut entries = Vec::new();
        for item in fs::read_dir(&self.path)? {
            let file_name = item?.file_name();
            let Some(name) = file_name.to_str() else {
                warn!(path = %self.path.display(), name = ?file_name, "non UTF-8 name");
                return Err(StashError::InvalidName {
                    name: file_name.to_string_lossy().into_owned(),
                });
            };
            if let Some(entry) = self.find(name)? {
                entries.push(entry);
            }
        }
        Ok(entries)
    }

    fn write_directory(&self, directory: &dyn Directory) -> Result<()> {
        let path = self.child(directory.name())?;
        debug!(path = %path.display(), "create directory");
        match fs::create_dir(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => {}
            Err(e) => return Err(e.into()),
        }
        let target = LocalDirectory {
            name: directory.name().to_owned(),
            path,
        };
        ops::copy_children(&target, directory)
    }

    fn write_file(&self, file: &dyn File) -> Result<()> {
        let path = self.child(file.name())?;
        let contents = file.contents()?;
        debug!(path = %path.display(), len = contents.len(), "write file");
        Ok(fs::write(path, contents)?)
    }

    fn delete_directory(&self, name: &str) -> Result<()> {
        let path = self.child(name)?;
        debug!(path = %path.display(), "remove directory tree");
        Ok(fs::remove_dir_all(path)?)
    }

    fn delete_file(&self, name: &str) -> Result<()> {
        let path = self.child(name)?;
        debug!(path = %path.display(), "remove file");
        Ok(fs::remove_file(path)?)
    }
}

impl From<LocalDirectory> for Entry {
    fn from(directory: LocalDirectory) -> Self {
        Entry::Directory(Box::new(directory))
    }
}
