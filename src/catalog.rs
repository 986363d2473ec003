//! Catalog loading.
//!
//! The library bundle describes itself in a single property list,
//! `AlbumData.xml`, at the bundle root. Only a handful of its keys matter here:
//!
//! ```text
//! Archive Path          string   absolute root the library believes it lives at
//! List of Albums        array    { AlbumName, KeyList: [image key, ...] }
//! Master Image List     dict     image key → { ImagePath, Caption, Comment }
//! ```
//!
//! Everything else in the file (rolls, faces, keywords, ...) is ignored.
//! A catalog that is missing, unreadable or lacks one of the keys above is a
//! fatal error; there is no partial-catalog recovery.
//!
//! `Master Image List` is kept in document order. Later stages resolve
//! collisions last-write-wins, so a stable iteration order keeps their output
//! reproducible.

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io::{self, Cursor, Read, Seek};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::paths::CATALOG_SEPARATOR;

/// Name of the catalog file inside the library bundle.
pub const CATALOG_FILENAME: &str = "AlbumData.xml";

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog not found: {0}")]
    NotFound(PathBuf),
    #[error("Cannot read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Malformed catalog {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: plist::Error,
    },
}

/// The library catalog as loaded from `AlbumData.xml`.
#[derive(Debug, Deserialize)]
pub struct Catalog {
    #[serde(rename = "Archive Path")]
    archive_path: String,
    #[serde(rename = "List of Albums")]
    albums: Vec<Album>,
    #[serde(rename = "Master Image List")]
    images: ImageList,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Album {
    #[serde(rename = "AlbumName")]
    pub name: String,
    /// Image keys in catalog order; may repeat.
    #[serde(rename = "KeyList", default)]
    pub member_keys: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Image {
    /// Absolute path as recorded by the library. Frequently stale.
    #[serde(rename = "ImagePath")]
    pub image_path: String,
    #[serde(rename = "Caption", default)]
    pub caption: Option<String>,
    #[serde(rename = "Comment", default)]
    pub comment: Option<String>,
}

impl Catalog {
    /// Load `<source_dir>/AlbumData.xml`.
    pub fn load(source_dir: &Path) -> Result<Self, CatalogError> {
        let path = source_dir.join(CATALOG_FILENAME);
        let bytes = fs::read(&path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => CatalogError::NotFound(path.clone()),
            _ => CatalogError::Io {
                path: path.clone(),
                source,
            },
        })?;
        Self::from_reader(Cursor::new(bytes))
            .map_err(|source| CatalogError::Parse { path, source })
    }

    /// Parse a catalog from any XML or binary property list stream.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self, plist::Error> {
        plist::from_reader(reader)
    }

    pub fn archive_path(&self) -> &str {
        &self.archive_path
    }

    /// The prefix stripped from every image path: the archive root plus a
    /// trailing separator.
    pub fn path_prefix(&self) -> String {
        format!("{}{}", self.archive_path, CATALOG_SEPARATOR)
    }

    pub fn albums(&self) -> &[Album] {
        &self.albums
    }

    pub fn image(&self, key: &str) -> Option<&Image> {
        self.images.get(key)
    }

    /// All images with their keys, in document order.
    pub fn images(&self) -> impl Iterator<Item = (&str, &Image)> {
        self.images.iter()
    }

    pub fn image_count(&self) -> usize {
        self.images.entries.len()
    }
}

/// `Master Image List`, keyed by image id, preserving document order.
#[derive(Debug, Default)]
struct ImageList {
    entries: Vec<(String, Image)>,
    by_key: HashMap<String, usize>,
}

impl ImageList {
    fn insert(&mut self, key: String, image: Image) {
        match self.by_key.get(&key) {
            Some(&pos) => self.entries[pos].1 = image,
            None => {
                self.by_key.insert(key.clone(), self.entries.len());
                self.entries.push((key, image));
            }
        }
    }

    fn get(&self, key: &str) -> Option<&Image> {
        self.by_key.get(key).map(|&pos| &self.entries[pos].1)
    }

    fn iter(&self) -> impl Iterator<Item = (&str, &Image)> {
        self.entries.iter().map(|(key, image)| (key.as_str(), image))
    }
}

impl<'de> Deserialize<'de> for ImageList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ImageListVisitor;

        impl<'de> Visitor<'de> for ImageListVisitor {
            type Value = ImageList;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a dictionary of images keyed by id")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<ImageList, A::Error> {
                let mut list = ImageList::default();
                while let Some((key, image)) = map.next_entry::<String, Image>()? {
                    list.insert(key, image);
                }
                Ok(list)
            }
        }

        deserializer.deserialize_map(ImageListVisitor)
    }
}
