//! Error types for the export pipeline.
//!
//! Failures fall into two groups:
//! - [`Error`]: fatal. The run aborts and no index is written.
//! - [`RegionError`]: isolated to a single region. The region's document is
//!   skipped and the run continues.
//!
//! [`DirectoryError`] describes a failed call to the directory service and is
//! wrapped by both, depending on which request failed.

use std::{io, path::PathBuf};

/// A result type defaulting to the fatal [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// A failed request to the directory service.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum DirectoryError {
    /// The request never produced a response (connect, TLS, timeout, ...).
    #[cfg_attr(docsrs, doc(cfg(feature = "http")))]
    #[cfg(feature = "http")]
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-success status.
    #[error("{url} returned HTTP {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    /// The response body was not the expected JSON shape.
    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The base URL cannot carry request paths.
    #[error("invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The configured credential cannot be sent as an HTTP header.
    #[error("invalid credential header: {reason}")]
    InvalidCredential { reason: String },

    /// The HTTP client could not be constructed.
    #[cfg_attr(docsrs, doc(cfg(feature = "http")))]
    #[cfg(feature = "http")]
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// A failure confined to one region's document.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum RegionError {
    /// The sub-region list could not be fetched.
    #[error("sub-region fetch failed: {0}")]
    Fetch(#[from] DirectoryError),

    /// The region document could not be serialized.
    #[error("failed to encode region document: {0}")]
    Encode(#[source] serde_json::Error),

    /// The directory holding region documents could not be created.
    #[error("failed to create {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The region document could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Errors that abort the whole run.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The region list could not be fetched. Nothing useful can be produced
    /// without it.
    #[error("failed to fetch region list: {0}")]
    RegionList(#[source] DirectoryError),

    /// The region list contains an entry that breaks identifier assignment.
    #[error("malformed region list entry #{position} (code {code:?}, name {name:?}): {reason}")]
    MalformedRegion {
        position: usize,
        code: String,
        name: String,
        reason: &'static str,
    },

    /// The index document could not be serialized.
    #[error("failed to encode index document: {0}")]
    IndexEncode(#[source] serde_json::Error),

    /// The index document could not be written.
    #[error("failed to write index {}: {source}", path.display())]
    IndexWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
