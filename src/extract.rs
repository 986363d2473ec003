//! The extraction pipeline.
//!
//! ```text
//! 1. Load      library/AlbumData.xml  →  Catalog
//! 2. Index     Catalog                →  out/albums.txt
//! 3. Copy      Catalog                →  out/<relative paths>
//! 4. Captions  copied photos          →  out/<dir>/index.txt
//! ```
//!
//! Everything that can fail on bad input (config validation, catalog parsing,
//! album member lookup) happens before the destination is touched. After
//! that, an I/O error aborts the run and leaves the destination as it was at
//! that moment; clear it before retrying.

use std::path::PathBuf;
use thiserror::Error;

use crate::albums::{AlbumError, AlbumIndex};
use crate::catalog::{Catalog, CatalogError};
use crate::config::{ConfigError, ExtractConfig};
use crate::copier::{CopyError, PhotoCopier};

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("Album error: {0}")]
    Album(#[from] AlbumError),
    #[error("Copy error: {0}")]
    Copy(#[from] CopyError),
}

/// What a run produced.
#[derive(Debug)]
pub struct ExtractReport {
    pub album_index: PathBuf,
    pub albums_written: usize,
    pub albums_skipped: usize,
    /// Album names that occurred more than once in the catalog.
    pub album_collisions: Vec<String>,
    pub images_in_catalog: usize,
    pub copied: usize,
    /// Relative paths of catalog images whose file was not found.
    pub missing: Vec<String>,
    /// Relative paths whose caption record was overwritten by a later image.
    pub caption_collisions: Vec<String>,
    pub caption_indices: Vec<PathBuf>,
}

/// Run the whole pipeline for `config`.
pub fn extract(config: &ExtractConfig) -> Result<ExtractReport, ExtractError> {
    config.validate()?;

    let catalog = Catalog::load(&config.source)?;
    let albums = AlbumIndex::build(&catalog, &config.skip_albums)?;

    let album_index = albums.write(&config.dest)?;

    let copier = PhotoCopier::new(&config.source, &config.dest, config.copy_options());
    let copied = copier.run(&catalog)?;
    let caption_indices = copied.captions.write(&config.dest)?;

    Ok(ExtractReport {
        album_index,
        albums_written: albums.len(),
        albums_skipped: albums.skipped(),
        album_collisions: albums.collisions().to_vec(),
        images_in_catalog: catalog.image_count(),
        copied: copied.copied.len(),
        missing: copied.missing,
        caption_collisions: copied.collisions,
        caption_indices,
    })
}
