//! Path resolution for directive identifiers.
//!
//! Two rules, and only two:
//!
//! - `./x`, `../x`, `.hidden/x` (anything starting with a dot) resolve against
//!   the directory of the file that declares the directive
//! - everything else resolves against the root directory, which is the
//!   directory containing the entry file
//!
//! All paths are made absolute and normalized lexically. Symlinks are not
//! followed and the target does not have to exist; a missing file surfaces
//! later, when the builder reads it.

use std::path::{Component, Path, PathBuf};

use crate::error::Result;

/// Make `path` absolute against the current directory and normalize it.
///
/// # Errors
///
/// Returns [`crate::Error::Io`] if `path` is empty or the current directory
/// cannot be determined.
pub fn absolutize(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path)?;
    Ok(normalize(&absolute))
}

/// Collapse `.` and `..` components without touching the file system.
///
/// `..` at the file-system root stays at the root, matching how shells and
/// most path libraries treat `/..`. Leading `..` components of a relative
/// path are kept.
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            _ => parts.push(component),
        }
    }

    parts.iter().collect()
}

/// Returns `true` if `identifier` resolves against the declaring file.
#[must_use]
pub fn is_relative_identifier(identifier: &str) -> bool {
    identifier.starts_with('.')
}

/// Resolve a raw directive identifier to an absolute path.
///
/// # Arguments
/// * `root_dir` - Directory containing the entry file
/// * `folder` - Directory containing the file that declares the directive
/// * `identifier` - The identifier exactly as written after the marker
#[must_use]
pub fn resolve_identifier(root_dir: &Path, folder: &Path, identifier: &str) -> PathBuf {
    let base = if is_relative_identifier(identifier) {
        folder
    } else {
        root_dir
    };
    normalize(&base.join(identifier))
}

/// Express `path` relative to `base`, using `..` where it leaves `base`.
///
/// Both paths are expected to be absolute and normalized. Returns an empty
/// path when they are equal.
#[must_use]
pub fn display_relative(path: &Path, base: &Path) -> PathBuf {
    let path_parts: Vec<_> = path.components().collect();
    let base_parts: Vec<_> = base.components().collect();

    let shared = path_parts
        .iter()
        .zip(&base_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in shared..base_parts.len() {
        relative.push("..");
    }
    for part in &path_parts[shared..] {
        relative.push(part);
    }
    relative
}
