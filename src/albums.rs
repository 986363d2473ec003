//! Album index: which photos belong to which album.
//!
//! Albums are flattened into a single `albums.txt` at the destination root,
//! one block per album, sorted by name, members sorted by relative path:
//!
//! ```text
//! Birthday
//!   Masters/2019/cake.jpg
//!
//! Vacation
//!   Masters/2020/a.jpg
//!   Masters/2020/b.jpg
//!
//! ```
//!
//! The library's built-in smart albums ([`SKIP_ALBUMS`]) say nothing about
//! how the photos were organized, so they are left out.
//!
//! The whole index is built in memory and written in one go, replacing any
//! previous `albums.txt`, so a re-run over an existing destination produces
//! the same file instead of appending a second copy.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::catalog::Catalog;
use crate::paths;

/// Built-in albums excluded from the index.
pub const SKIP_ALBUMS: &[&str] = &["Photos", "Last 12 Months", "Last Import", "Flagged"];

/// File name of the album index at the destination root.
pub const ALBUM_INDEX_FILENAME: &str = "albums.txt";

#[derive(Error, Debug)]
pub enum AlbumError {
    #[error("Album '{album}' references unknown image key '{key}'")]
    UnknownImage { album: String, key: String },
}

/// Album name → sorted relative paths of its members.
#[derive(Debug, Default)]
pub struct AlbumIndex {
    albums: BTreeMap<String, BTreeSet<String>>,
    skipped: usize,
    collisions: Vec<String>,
}

impl AlbumIndex {
    /// Resolve every non-skipped album's members to relative paths.
    ///
    /// Albums sharing a name collapse to the last one in the catalog; each
    /// such name is recorded in [`collisions`](Self::collisions).
    pub fn build(catalog: &Catalog, skip: &[String]) -> Result<Self, AlbumError> {
        let prefix = catalog.path_prefix();
        let mut index = AlbumIndex::default();

        for album in catalog.albums() {
            if skip.iter().any(|s| s == &album.name) {
                index.skipped += 1;
                continue;
            }

            let mut members = BTreeSet::new();
            for key in &album.member_keys {
                let image = catalog
                    .image(key)
                    .ok_or_else(|| AlbumError::UnknownImage {
                        album: album.name.clone(),
                        key: key.clone(),
                    })?;
                members.insert(paths::normalize(&image.image_path, &prefix).to_string());
            }

            if index.albums.insert(album.name.clone(), members).is_some() {
                index.collisions.push(album.name.clone());
            }
        }

        Ok(index)
    }

    /// Number of albums that will be written.
    pub fn len(&self) -> usize {
        self.albums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.albums.is_empty()
    }

    /// Number of catalog albums dropped by the skip-list.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Album names that appeared more than once; the last occurrence won.
    pub fn collisions(&self) -> &[String] {
        &self.collisions
    }

    /// Members of an album, in ascending order.
    pub fn members(&self, name: &str) -> Option<impl Iterator<Item = &str>> {
        self.albums
            .get(name)
            .map(|members| members.iter().map(String::as_str))
    }

    /// Album names in ascending order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.albums.keys().map(String::as_str)
    }

    /// Render the `albums.txt` contents.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (name, members) in &self.albums {
            out.push_str(name);
            out.push('\n');
            for path in members {
                out.push_str("  ");
                out.push_str(path);
                out.push('\n');
            }
            out.push('\n');
        }
        out
    }

    /// Write `albums.txt` into `dest_dir`, creating the directory if needed
    /// and replacing any existing index.
    pub fn write(&self, dest_dir: &Path) -> io::Result<PathBuf> {
        fs::create_dir_all(dest_dir)?;
        let path = dest_dir.join(ALBUM_INDEX_FILENAME);
        fs::write(&path, self.render())?;
        Ok(path)
    }
}

/// The default skip-list as owned strings.
pub fn default_skip_list() -> Vec<String> {
    SKIP_ALBUMS.iter().map(|s| s.to_string()).collect()
}
