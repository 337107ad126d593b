//! Error types for catalog loading, sidecar artifacts, and export.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::export::clipboard::ClipboardFormat;

/// Errors raised while building the icon catalog from a source tree.
///
/// Malformed SVG *content* is never an error at load time; the markup is
/// accepted as-is and downstream transforms tolerate it. Only filesystem
/// failures abort a scan.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A directory or file under the scan root could not be read.
    #[error("failed to read {path}")]
    Scan {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Errors raised while reading or writing a JSON sidecar artifact
/// (the hidden-list or the favorites set).
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to access {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed artifact at {path}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised by the export pipeline.
///
/// None of these are fatal: `copy_as_image` catches them tier by tier and
/// falls back to a lesser channel, and callers surface the rest as transient
/// [`Notice`](crate::export::Notice)s.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The markup could not be parsed for rasterization.
    #[error("unrenderable SVG markup")]
    Parse(#[from] resvg::usvg::Error),

    /// The target pixel buffer could not be allocated.
    #[error("cannot allocate a {width}x{height} canvas")]
    Canvas { width: u32, height: u32 },

    /// PNG encoding failed.
    #[error("failed to encode PNG")]
    Encode(#[from] image::ImageError),

    /// The clipboard rejected a write it claims to support.
    #[error("clipboard write failed: {0}")]
    Clipboard(String),

    /// The clipboard backend does not carry this payload format.
    #[error("clipboard does not support {0} payloads")]
    ClipboardUnsupported(ClipboardFormat),

    /// Writing the exported file failed.
    #[error("failed to write exported file")]
    Io(#[from] io::Error),
}
