//! The file contract.

use std::any::Any;
use std::fmt;
use std::path::Path;

use crate::Result;

/// A single named blob of content.
///
/// All methods use `&self`. Backends that keep state in memory use interior
/// mutability; backends over external storage hold only an address.
///
/// # Laziness
///
/// [`contents`](Self::contents) is computed on every call. Backends whose
/// reads are expensive must not read at construction time, so that handles
/// can be created just to inspect [`name`](Self::name).
///
/// # Object Safety
///
/// This trait is object-safe and is normally handled as `dyn File`.
pub trait File: fmt::Debug + Send + Sync + Any {
    /// The file's name. Never contains a path separator.
    fn name(&self) -> &str;

    /// Full address of the file within its backend, if it has one.
    fn path(&self) -> Option<&Path> {
        None
    }

    /// Current contents.
    ///
    /// # Errors
    ///
    /// A backend failure if the file does not exist or cannot be read.
    fn contents(&self) -> Result<Vec<u8>>;

    /// Replace the contents, creating the file if it does not exist.
    fn write(&self, contents: &[u8]) -> Result<()>;

    /// Remove the file. Afterwards [`exists`](Self::exists) is `false`.
    ///
    /// # Errors
    ///
    /// A backend failure if there is nothing to remove.
    fn delete(&self) -> Result<()>;

    /// Whether the file currently has content.
    fn exists(&self) -> Result<bool>;

    /// Upcast used for identity comparisons.
    fn as_any(&self) -> &dyn Any;

    /// Equal by value: same name and same contents, whatever the backend.
    fn value_eq(&self, other: &dyn File) -> Result<bool> {
        crate::ops::files_equal(self, other)
    }

    /// Same backend type, same name and same path.
    fn identity_eq(&self, other: &dyn File) -> bool {
        self.as_any().type_id() == other.as_any().type_id()
            && self.name() == other.name()
            && self.path() == other.path()
    }
}
