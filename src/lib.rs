//! # photolib-extract
//!
//! One-shot migration of a legacy photo library bundle into plain
//! directories. The library's catalog (`AlbumData.xml`) is the data source:
//! albums become a text index, photos are copied under their original
//! sub-paths, and captions and comments end up next to the photos they
//! describe.
//!
//! # Pipeline
//!
//! ```text
//! 1. Load      AlbumData.xml     →  Catalog               (catalog)
//! 2. Index     albums            →  out/albums.txt        (albums)
//! 3. Copy      image files       →  out/<sub-path>        (copier)
//! 4. Captions  copied images     →  out/<dir>/index.txt   (copier)
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`catalog`] | Parses `AlbumData.xml` into albums and images, in document order |
//! | [`paths`] | Strips the archive root from recorded paths; safe joins |
//! | [`albums`] | Builds and writes the album → members index |
//! | [`copier`] | Copies photos and builds the per-directory caption indices |
//! | [`extract`] | Runs the stages in order and reports what happened |
//! | [`config`] | Run settings taken from the command line |
//! | [`output`] | CLI output formatting |
//!
//! # Re-runs
//!
//! Every text index is built in memory and written once, replacing any
//! previous file. Re-running against an existing destination therefore
//! reproduces the same indices, though files from unrelated earlier runs
//! are left in place. Start from an empty destination for a clean result.

pub mod albums;
pub mod catalog;
pub mod config;
pub mod copier;
pub mod extract;
pub mod output;
pub mod paths;

#[cfg(test)]
pub(crate) mod test_helpers;
