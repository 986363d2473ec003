//! Shared test utilities for the photolib-extract test suite.
//!
//! Provides a builder for `AlbumData.xml` catalogs and a temp-dir fixture
//! holding a library bundle alongside a not-yet-created destination.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let library = LibraryFixture::new(
//!     CatalogBuilder::new(ARCHIVE)
//!         .image("1", "Masters/2020/a.jpg", "Beach", "")
//!         .album("Vacation", &["1"]),
//! );
//! library.add_photo("Masters/2020/a.jpg", b"jpeg bytes");
//!
//! let catalog = Catalog::load(library.source()).unwrap();
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::catalog::CATALOG_FILENAME;

/// Archive root used by most fixtures.
pub const ARCHIVE: &str = "/Users/x/Pictures/Library.photolibrary";

// =========================================================================
// Catalog builder
// =========================================================================

struct FixtureImage {
    key: String,
    image_path: String,
    caption: String,
    comment: String,
}

struct FixtureAlbum {
    name: String,
    keys: Vec<String>,
}

/// Builds the XML text of an `AlbumData.xml` catalog.
pub struct CatalogBuilder {
    archive_path: String,
    albums: Vec<FixtureAlbum>,
    images: Vec<FixtureImage>,
}

impl CatalogBuilder {
    pub fn new(archive_path: &str) -> Self {
        Self {
            archive_path: archive_path.to_string(),
            albums: Vec::new(),
            images: Vec::new(),
        }
    }

    /// Add an image stored at `<archive>/<rel_path>`.
    pub fn image(self, key: &str, rel_path: &str, caption: &str, comment: &str) -> Self {
        let image_path = format!("{}/{}", self.archive_path, rel_path);
        self.image_at(key, &image_path, caption, comment)
    }

    /// Add an image with an explicit (possibly foreign) absolute path.
    pub fn image_at(mut self, key: &str, image_path: &str, caption: &str, comment: &str) -> Self {
        self.images.push(FixtureImage {
            key: key.to_string(),
            image_path: image_path.to_string(),
            caption: caption.to_string(),
            comment: comment.to_string(),
        });
        self
    }

    pub fn album(mut self, name: &str, keys: &[&str]) -> Self {
        self.albums.push(FixtureAlbum {
            name: name.to_string(),
            keys: keys.iter().map(|k| k.to_string()).collect(),
        });
        self
    }

    pub fn to_xml(&self) -> String {
        let mut xml = String::from(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <!DOCTYPE plist PUBLIC \"-//Apple//DTD PLIST 1.0//EN\" \
             \"http://www.apple.com/DTDs/PropertyList-1.0.dtd\">\n\
             <plist version=\"1.0\">\n<dict>\n",
        );
        xml.push_str(&format!(
            "\t<key>Archive Path</key>\n\t<string>{}</string>\n",
            escape(&self.archive_path)
        ));

        xml.push_str("\t<key>List of Albums</key>\n\t<array>\n");
        for album in &self.albums {
            xml.push_str("\t\t<dict>\n");
            xml.push_str(&format!(
                "\t\t\t<key>AlbumName</key>\n\t\t\t<string>{}</string>\n",
                escape(&album.name)
            ));
            xml.push_str("\t\t\t<key>KeyList</key>\n\t\t\t<array>\n");
            for key in &album.keys {
                xml.push_str(&format!("\t\t\t\t<string>{}</string>\n", escape(key)));
            }
            xml.push_str("\t\t\t</array>\n\t\t</dict>\n");
        }
        xml.push_str("\t</array>\n");

        xml.push_str("\t<key>Master Image List</key>\n\t<dict>\n");
        for image in &self.images {
            xml.push_str(&format!("\t\t<key>{}</key>\n\t\t<dict>\n", escape(&image.key)));
            for (field, value) in [
                ("Caption", &image.caption),
                ("Comment", &image.comment),
                ("ImagePath", &image.image_path),
            ] {
                xml.push_str(&format!(
                    "\t\t\t<key>{}</key>\n\t\t\t<string>{}</string>\n",
                    field,
                    escape(value)
                ));
            }
            xml.push_str("\t\t</dict>\n");
        }
        xml.push_str("\t</dict>\n</dict>\n</plist>\n");
        xml
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

// =========================================================================
// Library fixture
// =========================================================================

/// A temp directory holding `library/` (with its catalog) and an `out/`
/// destination that does not exist yet.
pub struct LibraryFixture {
    _tmp: TempDir,
    source: PathBuf,
    dest: PathBuf,
}

impl LibraryFixture {
    pub fn new(catalog: CatalogBuilder) -> Self {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("library");
        let dest = tmp.path().join("out");
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join(CATALOG_FILENAME), catalog.to_xml()).unwrap();
        Self {
            _tmp: tmp,
            source,
            dest,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn dest(&self) -> &Path {
        &self.dest
    }

    /// Replace the catalog with a new one.
    pub fn rewrite_catalog(&self, catalog: CatalogBuilder) {
        fs::write(self.source.join(CATALOG_FILENAME), catalog.to_xml()).unwrap();
    }

    /// Write a photo into the library bundle at `rel_path`.
    pub fn add_photo(&self, rel_path: &str, contents: &[u8]) -> PathBuf {
        let path = self.source().join(rel_path);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, contents).unwrap();
        path
    }

    /// Read a file from the destination as a string. Panics if missing.
    pub fn read_dest(&self, rel_path: &str) -> String {
        let path = self.dest().join(rel_path);
        fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()))
    }
}
