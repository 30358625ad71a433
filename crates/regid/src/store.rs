use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::Serialize;

use crate::{Error, IndexDocument, RegionDocument, RegionError, Result};

/// File name of the summary index, relative to the output root.
pub const INDEX_FILE: &str = "index.json";

/// Directory holding one document per region, relative to the output root.
pub const REGIONS_DIR: &str = "regions";

/// Path of a region document relative to the output root, with `/`
/// separators regardless of platform.
pub fn region_file(identifier: &str) -> String {
    format!("{REGIONS_DIR}/{identifier}.json")
}

/// Writes the export's JSON documents below a root directory.
///
/// Every write replaces the previous file; nothing is merged.
#[derive(Clone, Debug)]
pub struct DocumentStore {
    root: PathBuf,
}

impl DocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn index_path(&self) -> PathBuf {
        self.root.join(INDEX_FILE)
    }

    pub fn region_path(&self, identifier: &str) -> PathBuf {
        self.root.join(REGIONS_DIR).join(format!("{identifier}.json"))
    }

    /// Creates the output root and the regions directory if absent.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::CreateDir`] if the directories cannot be
    /// created. Region writes will then fail individually; the index may
    /// still succeed.
    pub fn prepare(&self) -> Result<(), RegionError> {
        let dir = self.root.join(REGIONS_DIR);
        fs::create_dir_all(&dir).map_err(|source| RegionError::CreateDir { path: dir, source })
    }

    /// Writes `document` to its identifier-keyed path.
    ///
    /// # Errors
    ///
    /// Returns a [`RegionError`] if encoding or writing fails.
    pub fn write_region(&self, document: &RegionDocument) -> Result<PathBuf, RegionError> {
        let path = self.region_path(&document.identifier);
        let bytes = encode(document).map_err(RegionError::Encode)?;
        match fs::write(&path, bytes) {
            Ok(()) => Ok(path),
            Err(source) => Err(RegionError::Write { path, source }),
        }
    }

    /// Writes the summary index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexEncode`] or [`Error::IndexWrite`].
    pub fn write_index(&self, index: &IndexDocument) -> Result<PathBuf> {
        let path = self.index_path();
        let bytes = encode(index).map_err(Error::IndexEncode)?;
        match fs::write(&path, bytes) {
            Ok(()) => Ok(path),
            Err(source) => Err(Error::IndexWrite { path, source }),
        }
    }

    /// Reads back a region document. Mostly useful for verification.
    pub fn read_region(&self, identifier: &str) -> io::Result<RegionDocument> {
        let bytes = fs::read(self.region_path(identifier))?;
        serde_json::from_slice(&bytes).map_err(io::Error::other)
    }

    /// Reads back the summary index.
    pub fn read_index(&self) -> io::Result<IndexDocument> {
        let bytes = fs::read(self.index_path())?;
        serde_json::from_slice(&bytes).map_err(io::Error::other)
    }
}

fn encode<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(value)?;
    bytes.push(b'\n');
    Ok(bytes)
}
