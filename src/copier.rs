//! Photo copying and per-directory caption indices.
//!
//! Every image in the catalog is copied from the library bundle to the same
//! relative path under the destination:
//!
//! ```text
//! library/Masters/2020/a.jpg  →  out/Masters/2020/a.jpg
//! ```
//!
//! A large share of catalog entries typically point at files that no longer
//! exist (duplicates, broken paths from old library moves). Those are skipped
//! without error; in verbose mode each one is reported as `Not found: <path>`.
//!
//! Captions and comments of the copied files are collected into a
//! [`CaptionIndex`] and written as one `index.txt` per destination directory:
//!
//! ```text
//! a.jpg
//!   Beach
//!   Our first day
//!
//! b.jpg
//!
//! ```
//!
//! Empty captions and comments are omitted. Index files are written once,
//! after all copies, and replace whatever was there before.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::catalog::{Catalog, Image};
use crate::output;
use crate::paths::{self, CleanPath};

/// File name of the caption index written into each destination directory.
pub const CAPTION_INDEX_FILENAME: &str = "index.txt";

#[derive(Error, Debug)]
pub enum CopyError {
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to copy {from} to {to}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to write caption index {path}: {source}")]
    WriteIndex {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Options fixed when the copier is constructed.
#[derive(Debug, Clone, Copy, Default)]
pub struct CopyOptions {
    /// Report each image whose source file is missing.
    pub verbose: bool,
}

/// Caption and comment of one copied photo.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptionRecord {
    pub caption: Option<String>,
    pub comment: Option<String>,
}

impl From<&Image> for CaptionRecord {
    fn from(image: &Image) -> Self {
        Self {
            caption: image.caption.clone(),
            comment: image.comment.clone(),
        }
    }
}

/// Relative directory → file name → caption record.
///
/// Directories are catalog-relative and use `/`; the destination root is
/// the empty string.
#[derive(Debug, Default)]
pub struct CaptionIndex {
    dirs: BTreeMap<String, BTreeMap<String, CaptionRecord>>,
}

impl CaptionIndex {
    /// Record the caption of the photo at `path`. Returns `true` if this
    /// replaced an earlier record for the same file.
    pub fn insert(&mut self, path: &CleanPath, record: CaptionRecord) -> bool {
        self.dirs
            .entry(path.dir())
            .or_default()
            .insert(path.file_name().to_string(), record)
            .is_some()
    }

    pub fn get(&self, dir: &str, file_name: &str) -> Option<&CaptionRecord> {
        self.dirs.get(dir).and_then(|files| files.get(file_name))
    }

    /// Relative directories holding at least one record, ascending.
    pub fn dirs(&self) -> impl Iterator<Item = &str> {
        self.dirs.keys().map(String::as_str)
    }

    /// Render the `index.txt` contents for one directory.
    pub fn render(&self, dir: &str) -> Option<String> {
        let files = self.dirs.get(dir)?;
        let mut out = String::new();
        for (file_name, record) in files {
            out.push_str(file_name);
            out.push('\n');
            for text in [&record.caption, &record.comment].into_iter().flatten() {
                if !text.is_empty() {
                    out.push_str("  ");
                    out.push_str(text);
                    out.push('\n');
                }
            }
            out.push('\n');
        }
        Some(out)
    }

    /// Write one `index.txt` per directory under `dest`, replacing existing
    /// indices. Returns the paths written, in directory order.
    pub fn write(&self, dest: &Path) -> Result<Vec<PathBuf>, CopyError> {
        let mut written = Vec::with_capacity(self.dirs.len());
        for dir in self.dirs() {
            let segments: Vec<&str> = dir
                .split(paths::CATALOG_SEPARATOR)
                .filter(|s| !s.is_empty())
                .collect();
            let dir_path = paths::dir_under(dest, &segments);
            create_dir(&dir_path)?;

            let path = dir_path.join(CAPTION_INDEX_FILENAME);
            let contents = self.render(dir).unwrap_or_default();
            fs::write(&path, contents).map_err(|source| CopyError::WriteIndex {
                path: path.clone(),
                source,
            })?;
            written.push(path);
        }
        Ok(written)
    }
}

/// Outcome of copying a catalog's photos.
#[derive(Debug, Default)]
pub struct CopyReport {
    /// Relative paths copied, in catalog order.
    pub copied: Vec<String>,
    /// Relative paths whose source file was not found, in catalog order.
    pub missing: Vec<String>,
    /// Relative paths whose caption record replaced an earlier one.
    pub collisions: Vec<String>,
    pub captions: CaptionIndex,
}

/// Copies photos from a library bundle into a destination tree.
pub struct PhotoCopier {
    source: PathBuf,
    dest: PathBuf,
    options: CopyOptions,
}

impl PhotoCopier {
    pub fn new(source: impl Into<PathBuf>, dest: impl Into<PathBuf>, options: CopyOptions) -> Self {
        Self {
            source: source.into(),
            dest: dest.into(),
            options,
        }
    }

    /// Copy every image of `catalog` whose source file exists and collect
    /// their captions. Caption indices are not written; see
    /// [`CaptionIndex::write`].
    pub fn run(&self, catalog: &Catalog) -> Result<CopyReport, CopyError> {
        let prefix = catalog.path_prefix();
        let mut report = CopyReport::default();

        for (_key, image) in catalog.images() {
            let rel = paths::normalize(&image.image_path, &prefix);

            let Some((clean, src)) = self.existing_source(rel) else {
                if self.options.verbose {
                    output::print_not_found(rel);
                }
                report.missing.push(rel.to_string());
                continue;
            };
            let dst = clean.under(&self.dest);

            if let Some(parent) = dst.parent() {
                create_dir(parent)?;
            }
            fs::copy(&src, &dst).map_err(|source| CopyError::Copy {
                from: src.clone(),
                to: dst.clone(),
                source,
            })?;

            if report.captions.insert(&clean, CaptionRecord::from(image)) {
                report.collisions.push(rel.to_string());
            }
            report.copied.push(rel.to_string());
        }

        Ok(report)
    }

    /// The cleaned path and source file for `rel`, if it names an existing
    /// regular file inside the library.
    fn existing_source(&self, rel: &str) -> Option<(CleanPath, PathBuf)> {
        let clean = CleanPath::parse(rel)?;
        let src = clean.under(&self.source);
        src.is_file().then_some((clean, src))
    }
}

fn create_dir(path: &Path) -> Result<(), CopyError> {
    fs::create_dir_all(path).map_err(|source| CopyError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}
