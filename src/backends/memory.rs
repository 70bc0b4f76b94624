//! In-memory backend.
//!
//! [`FileEntry`] and [`DirEntry`] are plain values that can be built by hand
//! and written into any other backend, and they are also a complete,
//! writable backend in their own right.
//!
//! Handles returned by a [`DirEntry`] share storage with it: writing through
//! a [`FileEntry`] obtained from [`Directory::file`] updates the directory,
//! and [`Directory::directory`] creates the child directory if it is missing.
//! A file handle for a missing name is not stored until it is written.

use std::any::Any;
use std::collections::btree_map::{self, BTreeMap};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::{Directory, Entry, File, Result, StashError, name, ops};

type Contents = Arc<RwLock<Option<Vec<u8>>>>;
type ChildMap = BTreeMap<String, Node>;
type Children = Arc<RwLock<ChildMap>>;

/// A stored child. Every file node in a child map holds contents; deleting
/// a file removes its node.
#[derive(Debug, Clone)]
enum Node {
    File(Contents),
    Directory(Children),
}

fn read_lock<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write_lock<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

// =============================================================================
// FileEntry
// =============================================================================

/// An in-memory file.
///
/// Equality (`==`) is by value: name and contents.
///
/// # Example
///
/// ```rust
/// use stashify::{File, FileEntry};
///
/// # fn main() -> stashify::Result<()> {
/// let file = FileEntry::new("a.txt", "hi")?;
/// assert_eq!(file.contents()?, b"hi");
///
/// file.delete()?;
/// assert!(!file.exists()?);
/// # Ok(())
/// # }
/// ```
pub struct FileEntry {
    name: String,
    path: Option<PathBuf>,
    contents: Contents,
    // The child map of the directory that handed out this handle.
    parent: Option<Children>,
}

impl FileEntry {
    /// Create a file named `name` holding `contents`.
    ///
    /// # Errors
    ///
    /// [`StashError::InvalidName`] if `name` contains a separator.
    pub fn new(name: impl Into<String>, contents: impl Into<Vec<u8>>) -> Result<Self> {
        let name = name.into();
        name::validate(&name)?;
        Ok(Self::attached(name, None, fresh(Some(contents.into())), None))
    }

    /// Create an empty file named `name`.
    pub fn named(name: impl Into<String>) -> Result<Self> {
        Self::new(name, Vec::new())
    }

    /// Create a file whose name is the final component of `path`.
    pub fn from_path(path: impl AsRef<Path>, contents: impl Into<Vec<u8>>) -> Result<Self> {
        Self::from_parts(None, Some(path.as_ref()), contents)
    }

    /// Create a file from an optional name and an optional path.
    ///
    /// An explicit `name` wins over the one derived from `path`.
    ///
    /// # Errors
    ///
    /// - [`StashError::MissingIdentifier`] if both are `None`
    /// - [`StashError::InvalidName`] if the name contains a separator
    pub fn from_parts(
        name: Option<&str>,
        path: Option<&Path>,
        contents: impl Into<Vec<u8>>,
    ) -> Result<Self> {
        let name = identify("file", name, path)?;
        Ok(Self::attached(
            name,
            path.map(Path::to_path_buf),
            fresh(Some(contents.into())),
            None,
        ))
    }

    fn attached(
        name: String,
        path: Option<PathBuf>,
        contents: Contents,
        parent: Option<Children>,
    ) -> Self {
        Self {
            name,
            path,
            contents,
            parent,
        }
    }

    fn snapshot(&self) -> Option<Vec<u8>> {
        read_lock(&self.contents).clone()
    }

    /// Make sure the parent map points at this handle's contents. The
    /// returned guard keeps the map locked until the contents are set.
    fn attach<'a>(&self, parent: &'a Children) -> Result<RwLockWriteGuard<'a, ChildMap>> {
        let mut children = write_lock(parent);
        let linked = match children.get(&self.name) {
            Some(Node::Directory(_)) => return Err(StashError::is_a_directory(&self.name)),
            Some(Node::File(cell)) => Arc::ptr_eq(cell, &self.contents),
            None => false,
        };
        if !linked {
            children.insert(self.name.clone(), Node::File(Arc::clone(&self.contents)));
        }
        Ok(children)
    }
}

impl fmt::Debug for FileEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileEntry")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("contents", &self.contents)
            .finish_non_exhaustive()
    }
}

impl File for FileEntry {
    fn name(&self) -> &str {
        &self.name
    }

    fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn contents(&self) -> Result<Vec<u8>> {
        self.snapshot()
            .ok_or_else(|| StashError::not_found(&self.name))
    }

    fn write(&self, contents: &[u8]) -> Result<()> {
        let _parent = match &self.parent {
            Some(parent) => Some(self.attach(parent)?),
            None => None,
        };
        *write_lock(&self.contents) = Some(contents.to_vec());
        Ok(())
    }

    fn delete(&self) -> Result<()> {
        let mut parent = self.parent.as_ref().map(|p| write_lock(p));
        if write_lock(&self.contents).take().is_none() {
            return Err(StashError::not_found(&self.name));
        }
        if let Some(children) = parent.as_mut() {
            let ours = matches!(
                children.get(&self.name),
                Some(Node::File(cell)) if Arc::ptr_eq(cell, &self.contents)
            );
            if ours {
                children.remove(&self.name);
            }
        }
        Ok(())
    }

    fn exists(&self) -> Result<bool> {
        Ok(read_lock(&self.contents).is_some())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl PartialEq for FileEntry {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.snapshot() == other.snapshot()
    }
}

impl Eq for FileEntry {}

impl From<FileEntry> for Entry {
    fn from(file: FileEntry) -> Self {
        Entry::File(Box::new(file))
    }
}

// =============================================================================
// DirEntry
// =============================================================================

/// An in-memory directory.
///
/// `path` is optional; children of a directory without a path have no path
/// either.
#[derive(Debug)]
pub struct DirEntry {
    name: String,
    path: Option<PathBuf>,
    children: Children,
}

impl DirEntry {
    /// Create an empty directory named `name`.
    ///
    /// # Errors
    ///
    /// [`StashError::InvalidName`] if `name` contains a separator.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        name::validate(&name)?;
        Ok(Self::attached(name, None, Children::default()))
    }

    /// Create an empty directory whose name is the final component of `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_parts(None, Some(path.as_ref()))
    }

    /// Create an empty directory from an optional name and an optional path.
    ///
    /// # Errors
    ///
    /// - [`StashError::MissingIdentifier`] if both are `None`
    /// - [`StashError::InvalidName`] if the name contains a separator
    pub fn from_parts(name: Option<&str>, path: Option<&Path>) -> Result<Self> {
        let name = identify("directory", name, path)?;
        Ok(Self::attached(
            name,
            path.map(Path::to_path_buf),
            Children::default(),
        ))
    }

    fn attached(name: String, path: Option<PathBuf>, children: Children) -> Self {
        Self {
            name,
            path,
            children,
        }
    }

    fn child_path(&self, name: &str) -> Option<PathBuf> {
        self.path.as_ref().map(|p| p.join(name))
    }

    fn file_handle(&self, name: &str, contents: Contents) -> FileEntry {
        FileEntry::attached(
            name.to_owned(),
            self.child_path(name),
            contents,
            Some(Arc::clone(&self.children)),
        )
    }

    fn entry(&self, name: &str, node: &Node) -> Entry {
        match node {
            Node::File(contents) => Entry::from(self.file_handle(name, Arc::clone(contents))),
            Node::Directory(children) => Entry::from(DirEntry::attached(
                name.to_owned(),
                self.child_path(name),
                Arc::clone(children),
            )),
        }
    }
}

impl Directory for DirEntry {
    fn name(&self) -> &str {
        &self.name
    }

    fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn is_directory(&self, name: &str) -> Result<bool> {
        Ok(matches!(
            read_lock(&self.children).get(name),
            Some(Node::Directory(_))
        ))
    }

    fn is_file(&self, name: &str) -> Result<bool> {
        Ok(matches!(
            read_lock(&self.children).get(name),
            Some(Node::File(_))
        ))
    }

    fn file(&self, name: &str) -> Result<Box<dyn File>> {
        name::validate(name)?;
        let contents = match read_lock(&self.children).get(name) {
            Some(Node::File(contents)) => Arc::clone(contents),
            Some(Node::Directory(_)) => return Err(StashError::is_a_directory(name)),
            None => fresh(None),
        };
        Ok(Box::new(self.file_handle(name, contents)))
    }

    // Obtaining a missing directory creates it.
    fn directory(&self, name: &str) -> Result<Box<dyn Directory>> {
        name::validate(name)?;
        let children = match write_lock(&self.children).entry(name.to_owned()) {
            btree_map::Entry::Occupied(slot) => match slot.get() {
                Node::Directory(children) => Arc::clone(children),
                Node::File(_) => return Err(StashError::not_a_directory(name)),
            },
            btree_map::Entry::Vacant(slot) => {
                debug!(dir = %self.name, name, "create directory");
                let children = Children::default();
                slot.insert(Node::Directory(Arc::clone(&children)));
                children
            }
        };
        Ok(Box::new(DirEntry::attached(
            name.to_owned(),
            self.child_path(name),
            children,
        )))
    }

    fn files(&self) -> Result<Vec<Entry>> {
        Ok(read_lock(&self.children)
            .iter()
            .map(|(name, node)| self.entry(name, node))
            .collect())
    }

    fn write_directory(&self, directory: &dyn Directory) -> Result<()> {
        if self.is_file(directory.name())? {
            return Err(StashError::already_exists(directory.name()));
        }
        ops::copy_directory(self, directory)
    }

    fn delete_directory(&self, name: &str) -> Result<()> {
        if !self.is_directory(name)? {
            return Err(StashError::not_found(name));
        }
        ops::clear_directory(self, name)?;
        debug!(dir = %self.name, name, "drop directory");
        write_lock(&self.children).remove(name);
        Ok(())
    }
}

impl From<DirEntry> for Entry {
    fn from(directory: DirEntry) -> Self {
        Entry::Directory(Box::new(directory))
    }
}

fn fresh(contents: Option<Vec<u8>>) -> Contents {
    Arc::new(RwLock::new(contents))
}


/// Resolve the name of a new entry from an explicit name or a path.
fn identify(kind: &'static str, name: Option<&str>, path: Option<&Path>) -> Result<String> {
    match (name, path) {
        (Some(name), _) => {
            name::validate(name)?;
            Ok(name.to_owned())
        }
        (None, Some(path)) => name::from_path(path),
        (None, None) => Err(StashError::MissingIdentifier { kind }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_keeps_name_and_contents() {
        let file = FileEntry::new("a.txt", "hi").unwrap();
        assert_eq!(file.name(), "a.txt");
        assert_eq!(file.contents().unwrap(), b"hi");
        assert!(file.exists().unwrap());
    }

    #[test]
    fn file_named_is_empty() {
        let file = FileEntry::named("empty").unwrap();
        assert_eq!(file.contents().unwrap(), b"");
        assert!(file.exists().unwrap());
    }

    #[test]
    fn file_rejects_separator() {
        assert!(matches!(
            FileEntry::new("a/b", ""),
            Err(StashError::InvalidName { .. })
        ));
    }

    #[test]
    fn file_from_path_derives_name() {
        let file = FileEntry::from_path("/r/s/t.txt", "x").unwrap();
        assert_eq!(file.name(), "t.txt");
        assert_eq!(file.path(), Some(Path::new("/r/s/t.txt")));
    }

    #[test]
    fn file_from_parts_requires_identifier() {
        assert!(matches!(
            FileEntry::from_parts(None, None, ""),
            Err(StashError::MissingIdentifier { kind: "file" })
        ));
    }

    #[test]
    fn file_write_then_delete() {
        let file = FileEntry::named("f").unwrap();
        file.write(b"new").unwrap();
        assert_eq!(file.contents().unwrap(), b"new");

        file.delete().unwrap();
        assert!(!file.exists().unwrap());
        assert_eq!(
            file.contents().unwrap_err().io_kind(),
            Some(std::io::ErrorKind::NotFound)
        );
        assert!(file.delete().is_err());

        file.write(b"back").unwrap();
        assert!(file.exists().unwrap());
    }

    #[test]
    fn file_equality_is_by_value() {
        let a = FileEntry::new("a", "1").unwrap();
        assert_eq!(a, FileEntry::new("a", "1").unwrap());
        assert_ne!(a, FileEntry::new("a", "2").unwrap());
        assert_ne!(a, FileEntry::new("b", "1").unwrap());
    }

    #[test]
    fn dir_from_parts_requires_identifier() {
        assert!(matches!(
            DirEntry::from_parts(None, None),
            Err(StashError::MissingIdentifier { kind: "directory" })
        ));
    }

    #[test]
    fn dir_from_path_derives_name() {
        let dir = DirEntry::from_path("/tmp/x").unwrap();
        assert_eq!(dir.name(), "x");
        assert_eq!(dir.path(), Some(Path::new("/tmp/x")));
    }

    #[test]
    fn dir_explicit_name_wins() {
        let dir = DirEntry::from_parts(Some("named"), Some(Path::new("/tmp/x"))).unwrap();
        assert_eq!(dir.name(), "named");
    }

    #[test]
    fn dir_handles_write_through() {
        let dir = DirEntry::new("d").unwrap();
        dir.file("a.txt").unwrap().write(b"hi").unwrap();
        assert!(dir.is_file("a.txt").unwrap());

        let found = dir.find("a.txt").unwrap().unwrap();
        assert_eq!(found.as_file().unwrap().contents().unwrap(), b"hi");
    }

    #[test]
    fn unwritten_handles_are_not_listed() {
        let dir = DirEntry::new("d").unwrap();
        let _handle = dir.file("ghost").unwrap();
        assert!(!dir.is_file("ghost").unwrap());
        assert!(dir.files().unwrap().is_empty());
        assert!(dir.find("ghost").unwrap().is_none());
    }

    #[test]
    fn file_handle_on_directory_fails() {
        let dir = DirEntry::new("d").unwrap();
        dir.write(&DirEntry::new("sub").unwrap().into()).unwrap();
        let err = dir.file("sub").unwrap_err();
        assert_eq!(err.io_kind(), Some(std::io::ErrorKind::IsADirectory));
    }

    #[test]
    fn directory_handle_on_file_fails() {
        let dir = DirEntry::new("d").unwrap();
        dir.write(&FileEntry::new("f", "x").unwrap().into()).unwrap();
        let err = dir.directory("f").unwrap_err();
        assert_eq!(err.io_kind(), Some(std::io::ErrorKind::NotADirectory));
    }

    #[test]
    fn writing_directory_over_file_fails() {
        let dir = DirEntry::new("d").unwrap();
        dir.write(&FileEntry::new("x", "1").unwrap().into()).unwrap();
        let err = dir.write(&DirEntry::new("x").unwrap().into()).unwrap_err();
        assert_eq!(err.io_kind(), Some(std::io::ErrorKind::AlreadyExists));
    }

    #[test]
    fn writing_directory_twice_merges() {
        let dir = DirEntry::new("d").unwrap();
        let sub = DirEntry::new("sub").unwrap();
        sub.write(&FileEntry::new("one", "1").unwrap().into()).unwrap();
        dir.write(&sub.into()).unwrap();

        let sub = DirEntry::new("sub").unwrap();
        sub.write(&FileEntry::new("two", "2").unwrap().into()).unwrap();
        dir.write(&sub.into()).unwrap();

        let sub = dir.directory("sub").unwrap();
        assert_eq!(sub.files().unwrap().len(), 2);
    }

    #[test]
    fn delete_directory_drops_subtree() {
        let dir = DirEntry::new("d").unwrap();
        let sub = DirEntry::new("sub").unwrap();
        let nested = DirEntry::new("nested").unwrap();
        nested.write(&FileEntry::new("f", "x").unwrap().into()).unwrap();
        sub.write(&nested.into()).unwrap();
        dir.write(&sub.into()).unwrap();

        dir.delete("sub").unwrap();
        assert!(!dir.is_directory("sub").unwrap());
        assert!(dir.find("sub").unwrap().is_none());
    }

    #[test]
    fn delete_missing_name_fails() {
        let dir = DirEntry::new("d").unwrap();
        let err = dir.delete("missing").unwrap_err();
        assert_eq!(err.io_kind(), Some(std::io::ErrorKind::NotFound));
    }

    #[test]
    fn children_inherit_paths() {
        let dir = DirEntry::from_path("/r").unwrap();
        dir.write(&FileEntry::new("a", "").unwrap().into()).unwrap();
        let child = dir.find("a").unwrap().unwrap();
        assert_eq!(child.as_file().unwrap().path(), Some(Path::new("/r/a")));
    }

    #[test]
    fn listing_is_sorted_by_name() {
        let dir = DirEntry::new("d").unwrap();
        for name in ["c", "a", "b"] {
            dir.write(&FileEntry::named(name).unwrap().into()).unwrap();
        }
        let names: Vec<_> = dir
            .files()
            .unwrap()
            .iter()
            .map(|e| e.name().to_owned())
            .collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn identity_differs_from_value() {
        let a = DirEntry::from_path("/one/d").unwrap();
        let b = DirEntry::from_path("/two/d").unwrap();
        assert!(a.value_eq(&b).unwrap());
        assert!(!a.identity_eq(&b));
        assert!(a.identity_eq(&DirEntry::from_path("/one/d").unwrap()));
    }

    #[test]
    fn directory_handle_creates_child() {
        let root = DirEntry::new("root").unwrap();
        let created = root.directory("new").unwrap();
        created.write(&FileEntry::new("a", "x").unwrap().into()).unwrap();

        let found = root.find("new").unwrap().unwrap();
        let file = found.as_directory().unwrap().find("a").unwrap().unwrap();
        assert_eq!(file.as_file().unwrap().contents().unwrap(), b"x");
    }

    #[test]
    fn generic_copy_lands_in_memory() {
        let source = DirEntry::new("src").unwrap();
        source
            .write(&FileEntry::new("a", "x").unwrap().into())
            .unwrap();
        let root = DirEntry::new("root").unwrap();
        ops::copy_directory(&root, &source).unwrap();

        let copied = root.find("src").unwrap().unwrap();
        assert!(copied.as_directory().unwrap().value_eq(&source).unwrap());
    }

    #[test]
    fn failed_lookups_store_nothing() {
        let root = DirEntry::new("root").unwrap();
        for i in 0..100 {
            let name = format!("missing{i}");
            assert!(root.delete(&name).is_err());
            assert!(root.file(&name).unwrap().contents().is_err());
        }
        assert!(read_lock(&root.children).is_empty());
    }

    #[test]
    fn deleting_through_handle_drops_node() {
        let root = DirEntry::new("root").unwrap();
        root.write(&FileEntry::new("f", "x").unwrap().into()).unwrap();
        let handle = root.file("f").unwrap();
        handle.delete().unwrap();
        assert!(read_lock(&root.children).is_empty());

        handle.write(b"again").unwrap();
        assert!(root.is_file("f").unwrap());
        assert_eq!(root.file("f").unwrap().contents().unwrap(), b"again");
    }

    #[test]
    fn file_handle_write_over_new_directory_fails() {
        let root = DirEntry::new("root").unwrap();
        let handle = root.file("x").unwrap();
        root.directory("x").unwrap();
        let err = handle.write(b"data").unwrap_err();
        assert_eq!(err.io_kind(), Some(std::io::ErrorKind::IsADirectory));
    }

    #[test]
    fn delete_directory_on_missing_name_fails() {
        let root = DirEntry::new("root").unwrap();
        let err = root.delete_directory("missing").unwrap_err();
        assert_eq!(err.io_kind(), Some(std::io::ErrorKind::NotFound));
        assert!(read_lock(&root.children).is_empty());
    }
}
