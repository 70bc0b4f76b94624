//! The directory contract.

use std::any::Any;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::{Entry, File, Result, ops};

/// A named container of files and directories.
///
/// A backend supplies five primitives:
/// [`is_directory`](Self::is_directory), [`is_file`](Self::is_file),
/// [`file`](Self::file), [`directory`](Self::directory) and
/// [`files`](Self::files). Everything else has a default built from those
/// primitives by the functions in [`ops`](crate::ops), so a backend can be
/// written, copied into and torn down without further code.
///
/// Backends may override the composite methods when their storage offers
/// a cheaper route, e.g. a single recursive remove instead of walking the
/// tree.
///
/// # Cross-Backend Operation
///
/// The composite methods only use the public contract of their argument.
/// Writing a directory from one backend into a directory of another copies
/// the whole subtree:
///
/// ```rust
/// use stashify::{DirEntry, Directory, Entry, FileEntry};
///
/// # fn main() -> stashify::Result<()> {
/// let source = DirEntry::new("docs")?;
/// source.write(&FileEntry::new("a.txt", "hi")?.into())?;
///
/// let target = DirEntry::new("root")?;
/// target.write(&Entry::from(source))?;
///
/// let copied = target.find("docs")?.expect("copied");
/// assert!(copied.is_directory());
/// # Ok(())
/// # }
/// ```
///
/// # Object Safety
///
/// This trait is object-safe and is normally handled as `dyn Directory`.
pub trait Directory: fmt::Debug + Send + Sync + Any {
    /// The directory's name (final component of its path).
    fn name(&self) -> &str;

    /// Full address of the directory within its backend, if known.
    fn path(&self) -> Option<&Path>;

    /// Upcast used for identity comparisons.
    fn as_any(&self) -> &dyn Any;

    /// Whether `name` is a child directory.
    fn is_directory(&self, name: &str) -> Result<bool>;

    /// Whether `name` is an existing child that is not a directory.
    fn is_file(&self, name: &str) -> Result<bool>;

    /// A handle for the child file `name`. The file need not exist.
    fn file(&self, name: &str) -> Result<Box<dyn File>>;

    /// A handle for the child directory `name`. The directory need not exist.
    ///
    /// Entries written through the handle must end up in this directory;
    /// the default [`write_directory`](Self::write_directory) relies on it.
    /// Backends without a native "create on first write" create the child
    /// here.
    fn directory(&self, name: &str) -> Result<Box<dyn Directory>>;

    /// The current children. Order is backend-defined.
    fn files(&self) -> Result<Vec<Entry>>;

    /// Look up a child by name; `Ok(None)` when nothing matches.
    fn find(&self, name: &str) -> Result<Option<Entry>> {
        ops::find(self, name)
    }

    /// Write a file or a whole directory tree into this directory.
    fn write(&self, entry: &Entry) -> Result<()> {
        ops::write(self, entry)
    }

    /// Copy `directory` and its contents into a child of the same name.
    fn write_directory(&self, directory: &dyn Directory) -> Result<()> {
        ops::copy_directory(self, directory)
    }

    /// Write `file`'s contents to the child of the same name.
    fn write_file(&self, file: &dyn File) -> Result<()> {
        ops::copy_file(self, file)
    }

    /// Remove the child `name`, recursing into directories.
    fn delete(&self, name: &str) -> Result<()> {
        ops::delete(self, name)
    }

    /// Remove everything below the child directory `name`.
    fn delete_directory(&self, name: &str) -> Result<()> {
        ops::clear_directory(self, name)
    }

    /// Remove the child file `name`.
    fn delete_file(&self, name: &str) -> Result<()> {
        ops::remove_file(self, name)
    }

    /// Join `names` onto this directory's path.
    ///
    /// Any number of names may be given, addressing arbitrarily deep
    /// entries below this directory. A directory without a path joins onto
    /// an empty relative path.
    fn path_of(&self, names: &[&str]) -> PathBuf {
        let mut path = self.path().map(Path::to_path_buf).unwrap_or_default();
        path.extend(names);
        path
    }

    /// Equal by value: the children are equal, deeply.
    fn value_eq(&self, other: &dyn Directory) -> Result<bool> {
        ops::directories_equal(self, other)
    }

    /// Same backend type, same name and same path.
    fn identity_eq(&self, other: &dyn Directory) -> bool {
        self.as_any().type_id() == other.as_any().type_id()
            && self.name() == other.name()
            && self.path() == other.path()
    }
}
