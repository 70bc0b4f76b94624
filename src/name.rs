//! Entry name validation.
//!
//! Names are single path components. They are checked once, when a file or
//! directory value is constructed, and never again.

use std::path::{Component, Path};

use crate::{Result, StashError};

/// Returns `true` if `name` can address a child entry.
///
/// Rejects the empty string, the `.`/`..` pseudo-entries, and anything
/// containing `/` or the host separator.
pub fn is_valid(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains(std::path::MAIN_SEPARATOR)
}

/// Validate `name`, returning [`StashError::InvalidName`] on failure.
pub fn validate(name: &str) -> Result<()> {
    if is_valid(name) {
        Ok(())
    } else {
        Err(StashError::InvalidName {
            name: name.to_owned(),
        })
    }
}

/// Derive an entry name from the final component of `path`.
pub(crate) fn from_path(path: &Path) -> Result<String> {
    match path.components().next_back() {
        Some(Component::Normal(name)) => {
            let name = name.to_string_lossy().into_owned();
            validate(&name)?;
            Ok(name)
        }
        _ => Err(StashError::InvalidName {
            name: path.display().to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_names_are_valid() {
        for name in ["a.txt", "sub", " ", "ünïcödé", "..hidden", "a.b.c"] {
            assert!(is_valid(name), "{name:?} should be valid");
        }
    }

    #[test]
    fn separators_are_rejected() {
        for name in ["a/b", "/", "/leading", "trailing/"] {
            assert!(matches!(
                validate(name),
                Err(StashError::InvalidName { .. })
            ));
        }
    }

    #[test]
    fn pseudo_entries_are_rejected() {
        assert!(!is_valid(""));
        assert!(!is_valid("."));
        assert!(!is_valid(".."));
    }

    #[test]
    fn name_from_path_takes_last_component() {
        assert_eq!(from_path(Path::new("/tmp/x/a.txt")).unwrap(), "a.txt");
        assert_eq!(from_path(Path::new("relative/dir/")).unwrap(), "dir");
        assert_eq!(from_path(Path::new("single")).unwrap(), "single");
    }

    #[test]
    fn name_from_root_fails() {
        assert!(matches!(
            from_path(Path::new("/")),
            Err(StashError::InvalidName { .. })
        ));
        assert!(from_path(Path::new("a/..")).is_err());
    }
}
