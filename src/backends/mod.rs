//! Concrete backends.
//!
//! | Backend | File | Directory |
//! |---------|------|-----------|
//! | In-memory | [`FileEntry`] | [`DirEntry`] |
//! | Local filesystem | [`LocalFile`] | [`LocalDirectory`] |

mod local;
mod memory;

pub use local::{LocalDirectory, LocalFile};
pub use memory::{DirEntry, FileEntry};
