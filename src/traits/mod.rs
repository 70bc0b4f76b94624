//! # Storage Contracts
//!
//! The two capability traits every backend implements.
//!
//! | Trait | Represents | Backend supplies |
//! |-------|------------|------------------|
//! | [`File`] | One named blob | `contents`, `write`, `delete`, `exists` |
//! | [`Directory`] | Named container | `is_directory`, `is_file`, `file`, `directory`, `files` |
//!
//! Composite directory behavior (lookup dispatch, recursive copy, recursive
//! delete, value equality) is provided by default methods that forward to
//! the free functions in [`ops`](crate::ops). Those functions only use the
//! public contract, which is what lets entries from unrelated backends be
//! written into each other.
//!
//! ## Equality
//!
//! Two notions are kept apart on purpose:
//!
//! - `value_eq` compares content (names and bytes, recursively).
//! - `identity_eq` compares location (backend type, name, path).
//!
//! ## Thread Safety
//!
//! Both traits require `Send + Sync`. Methods take `&self`; in-memory
//! state lives behind locks.

mod directory;
mod file;

pub use directory::Directory;
pub use file::File;
