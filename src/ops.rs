//! # Contract Algorithms
//!
//! Lookup dispatch, recursive copy, recursive delete and value equality,
//! written purely against the [`Directory`] and [`File`] primitives.
//!
//! The provided methods of [`Directory`] forward here. Backends that
//! override one of those methods can still call these functions to reuse
//! the generic part, e.g. creating a directory natively and then copying
//! its children with [`copy_children`].

use tracing::{debug, trace};

use crate::{Directory, Entry, File, Result};

/// Resolve `name` in `dir`: a directory if there is one, otherwise a file if
/// one exists, otherwise `None`.
pub fn find<D: Directory + ?Sized>(dir: &D, name: &str) -> Result<Option<Entry>> {
    trace!(dir = dir.name(), name, "find");
    if dir.is_directory(name)? {
        Ok(Some(Entry::Directory(dir.directory(name)?)))
    } else if dir.is_file(name)? {
        Ok(Some(Entry::File(dir.file(name)?)))
    } else {
        Ok(None)
    }
}

/// Write `entry` into `dir`, dispatching on its kind.
pub fn write<D: Directory + ?Sized>(dir: &D, entry: &Entry) -> Result<()> {
    match entry {
        Entry::Directory(source) => dir.write_directory(source.as_ref()),
        Entry::File(source) => dir.write_file(source.as_ref()),
    }
}

/// Copy `source` into the child of `dir` named after it.
///
/// Obtains the child through [`Directory::directory`] and writes every one
/// of `source`'s children into it. The destination backend decides whether
/// obtaining the child creates it.
pub fn copy_directory<D: Directory + ?Sized>(dir: &D, source: &dyn Directory) -> Result<()> {
    debug!(dir = dir.name(), source = source.name(), "copy directory");
    let target = dir.directory(source.name())?;
    copy_children(target.as_ref(), source)
}

/// Write each child of `source` into `target`, recursing through
/// [`Directory::write`]. Aborts on the first failure.
pub fn copy_children(target: &dyn Directory, source: &dyn Directory) -> Result<()> {
    for child in source.files()? {
        target.write(&child)?;
    }
    Ok(())
}

/// Write `source`'s contents to the child file of `dir` with the same name.
pub fn copy_file<D: Directory + ?Sized>(dir: &D, source: &dyn File) -> Result<()> {
    debug!(dir = dir.name(), file = source.name(), "copy file");
    let contents = source.contents()?;
    dir.file(source.name())?.write(&contents)
}

/// Delete `name` from `dir`, dispatching on whether it is a directory.
pub fn delete<D: Directory + ?Sized>(dir: &D, name: &str) -> Result<()> {
    if dir.is_directory(name)? {
        dir.delete_directory(name)
    } else {
        dir.delete_file(name)
    }
}

/// Delete every child of the directory `name` in `dir`.
///
/// The dual of [`copy_directory`]. The generic contract has no primitive for
/// removing an empty directory, so the emptied directory itself is left for
/// the backend to drop.
pub fn clear_directory<D: Directory + ?Sized>(dir: &D, name: &str) -> Result<()> {
    debug!(dir = dir.name(), name, "clear directory");
    let target = dir.directory(name)?;
    clear_children(target.as_ref())
}

/// Delete every child of `dir`, recursing through [`Directory::delete`].
pub fn clear_children(dir: &dyn Directory) -> Result<()> {
    for child in dir.files()? {
        dir.delete(child.name())?;
    }
    Ok(())
}

/// Delete the child file `name` of `dir`.
pub fn remove_file<D: Directory + ?Sized>(dir: &D, name: &str) -> Result<()> {
    debug!(dir = dir.name(), name, "remove file");
    dir.file(name)?.delete()
}

/// Value equality of files: same name and same contents.
pub fn files_equal<F: File + ?Sized>(a: &F, b: &dyn File) -> Result<bool> {
    if a.name() != b.name() {
        return Ok(false);
    }
    Ok(a.contents()? == b.contents()?)
}

/// Value equality of directories: same children, compared deeply.
///
/// Listing order is backend-defined, so children are matched by name.
/// Directory names themselves are not compared, only what they hold.
pub fn directories_equal<D: Directory + ?Sized>(a: &D, b: &dyn Directory) -> Result<bool> {
    let mut left = a.files()?;
    let mut right = b.files()?;
    if left.len() != right.len() {
        return Ok(false);
    }
    left.sort_by(|x, y| x.name().cmp(y.name()));
    right.sort_by(|x, y| x.name().cmp(y.name()));

    for (x, y) in left.iter().zip(&right) {
        let equal = match (x, y) {
            (Entry::File(x), Entry::File(y)) => x.value_eq(y.as_ref())?,
            (Entry::Directory(x), Entry::Directory(y)) => {
                x.name() == y.name() && x.value_eq(y.as_ref())?
            }
            _ => false,
        };
        if !equal {
            return Ok(false);
        }
    }
    Ok(true)
}
