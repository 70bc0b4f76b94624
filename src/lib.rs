//! # stashify
//!
//! File and directory contracts over interchangeable storage backends.
//!
//! Callers read, write, delete and traverse hierarchical data without
//! knowing whether it lives on the local disk, in memory, or in any other
//! store that implements the two traits in this crate.
//!
//! ---
//!
//! ## Quick Start
//!
//! ```rust
//! use stashify::{DirEntry, Directory, Entry, File, FileEntry};
//!
//! # fn main() -> stashify::Result<()> {
//! let root = DirEntry::new("root")?;
//! root.write(&FileEntry::new("a.txt", "hi")?.into())?;
//!
//! match root.find("a.txt")? {
//!     Some(Entry::File(file)) => assert_eq!(file.contents()?, b"hi"),
//!     _ => unreachable!(),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The same calls work against [`LocalDirectory`], and entries from one
//! backend can be written straight into another:
//!
//! ```rust,no_run
//! use stashify::{Directory, Entry, LocalDirectory};
//!
//! # fn main() -> stashify::Result<()> {
//! let source = LocalDirectory::new("/tmp/x")?;
//! let target = LocalDirectory::new("/tmp/y")?;
//! target.write(&Entry::from(source))?; // copies /tmp/x to /tmp/y/x
//! # Ok(())
//! # }
//! ```
//!
//! ---
//!
//! ## Core Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`File`] | Contract for a named blob of content |
//! | [`Directory`] | Contract for a named container of entries |
//! | [`Entry`] | A file or a directory, from any backend |
//! | [`FileEntry`], [`DirEntry`] | In-memory backend |
//! | [`LocalFile`], [`LocalDirectory`] | Local filesystem backend |
//! | [`StashError`] | Error type |
//!
//! ---
//!
//! ## Writing a Backend
//!
//! Implement [`File`] and the five [`Directory`] primitives (`is_directory`,
//! `is_file`, `file`, `directory`, `files`). Lookup, recursive copy and
//! recursive delete come from default methods built on the functions in
//! [`ops`]. Override `write_directory`, `delete_directory` and friends only
//! when the store has a faster native route.
//!
//! ---
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, StashError>`](Result). Contract
//! violations are reported at construction time
//! ([`StashError::InvalidName`], [`StashError::MissingIdentifier`]). Storage
//! failures are passed through untouched as [`StashError::Io`]:
//!
//! ```rust
//! use stashify::{DirEntry, Directory};
//! use std::io::ErrorKind;
//!
//! let dir = DirEntry::new("empty").unwrap();
//! let err = dir.delete("missing").unwrap_err();
//! assert_eq!(err.io_kind(), Some(ErrorKind::NotFound));
//! ```
//!
//! Composite operations stop at the first failure and do not roll back.
//!
//! ---
//!
//! ## Logging
//!
//! Operations emit [`tracing`] events (`debug` for mutations, `trace` for
//! lookups). No subscriber is installed by this crate.
//!
//! ---
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | JSON helpers on files via `FileJsonExt` |

// Private modules
mod backends;
mod entry;
mod error;
mod ext;
mod traits;

// Public modules
pub mod name;
pub mod ops;

// Public re-exports - error types
pub use error::{Result, StashError};

// Public re-exports - contracts
pub use entry::Entry;
pub use traits::{Directory, File};

// Public re-exports - backends
pub use backends::{DirEntry, FileEntry, LocalDirectory, LocalFile};

// Public re-exports - infrastructure
pub use ext::DirectoryExt;

// Conditional re-exports
#[cfg(feature = "serde")]
pub use ext::FileJsonExt;
