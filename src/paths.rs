//! Catalog path normalization.
//!
//! The catalog records every image with the absolute path it had on the
//! machine that owned the library, which is meaningless once the bundle is
//! moved. It also records what it believes its own root is (`Archive Path`),
//! so stripping that root gives a path relative to the bundle:
//!
//! ```text
//! archive:  /Users/x/Pictures/Library.photolibrary
//! image:    /Users/x/Pictures/Library.photolibrary/Masters/2020/a.jpg
//! relative:                                        Masters/2020/a.jpg
//! ```
//!
//! Paths that don't start with the archive root are passed through
//! unchanged. Those leftovers are often absolute, so [`CleanPath::parse`]
//! refuses anything that would land outside the directory it is joined onto.
//! Reading, writing and caption grouping all go through the same
//! [`CleanPath`], so they always agree on where a photo lives.

use std::path::{Component, Path, PathBuf};

/// Separator used inside catalog paths. The catalog is written on macOS,
/// so this is `/` regardless of the host platform.
pub const CATALOG_SEPARATOR: char = '/';

/// Strip `prefix` from `path` if present, otherwise return `path` unchanged.
pub fn normalize<'a>(path: &'a str, prefix: &str) -> &'a str {
    path.strip_prefix(prefix).unwrap_or(path)
}

/// A relative catalog path reduced to its plain segments.
///
/// `.` segments and repeated separators are dropped:
///
/// ```text
/// Masters/./2020//a.jpg  →  dir "Masters/2020", file "a.jpg"
/// a.jpg                  →  dir "",             file "a.jpg"
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanPath {
    dirs: Vec<String>,
    file_name: String,
}

impl CleanPath {
    /// Returns `None` when `rel` is absolute, contains `..`, names no file,
    /// or ends in a separator (a directory, never a photo).
    pub fn parse(rel: &str) -> Option<Self> {
        if rel.ends_with(CATALOG_SEPARATOR) {
            return None;
        }
        let mut parts = Vec::new();
        for component in Path::new(rel).components() {
            match component {
                Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
            }
        }
        let file_name = parts.pop()?;
        Some(Self {
            dirs: parts,
            file_name,
        })
    }

    /// Directory part joined with `/`; empty for a file at the root.
    pub fn dir(&self) -> String {
        self.dirs.join("/")
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// This path joined onto `base`.
    pub fn under(&self, base: &Path) -> PathBuf {
        let mut path = dir_under(base, &self.dirs);
        path.push(&self.file_name);
        path
    }
}

/// Join `/`-separated directory segments onto `base`.
pub fn dir_under<S: AsRef<str>>(base: &Path, segments: &[S]) -> PathBuf {
    let mut path = base.to_path_buf();
    for segment in segments {
        path.push(segment.as_ref());
    }
    path
}
