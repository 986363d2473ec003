//! Run configuration.
//!
//! Everything the pipeline needs is given on the command line; no config
//! files or environment variables are read. [`ExtractConfig`] collects those
//! values once and is passed down explicitly, so no stage consults global
//! state.
//!
//! ```text
//! source        library bundle containing AlbumData.xml
//! dest          output directory (created if missing)
//! verbose       report images whose file is missing
//! skip_albums   built-in albums left out of albums.txt
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::albums;
use crate::copier::CopyOptions;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Settings for one extraction run.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Library bundle directory.
    pub source: PathBuf,
    /// Output directory.
    pub dest: PathBuf,
    /// Print a line for each catalog image whose file is missing.
    pub verbose: bool,
    /// Album names excluded from the album index.
    pub skip_albums: Vec<String>,
}

impl ExtractConfig {
    pub fn new(source: impl Into<PathBuf>, dest: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            dest: dest.into(),
            verbose: false,
            skip_albums: albums::default_skip_list(),
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn copy_options(&self) -> CopyOptions {
        CopyOptions {
            verbose: self.verbose,
        }
    }

    /// Check the paths before anything is read or written.
    ///
    /// The source must be an existing directory, and the destination must
    /// not be the source itself: copying a file onto itself truncates it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.source.is_dir() {
            return Err(ConfigError::Validation(format!(
                "source {} is not a directory",
                self.source.display()
            )));
        }
        if self.dest.exists() && !self.dest.is_dir() {
            return Err(ConfigError::Validation(format!(
                "destination {} exists and is not a directory",
                self.dest.display()
            )));
        }
        if same_dir(&self.source, &self.dest) {
            return Err(ConfigError::Validation(format!(
                "destination {} is the source library",
                self.dest.display()
            )));
        }
        Ok(())
    }
}

fn same_dir(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
