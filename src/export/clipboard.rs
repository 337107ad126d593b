//! Clipboard backends.
//!
//! Clipboard capabilities vary wildly by platform, so the export pipeline
//! talks to a [`ClipboardBackend`] trait instead of a concrete clipboard:
//! the backend declares which payload formats it carries, and the pipeline
//! picks its delivery tier accordingly. [`SystemClipboard`] is the real
//! one; [`BufferClipboard`] is an in-memory stand-in for tests and headless
//! captures.

use std::fmt;

use crate::error::ExportError;

/// A clipboard payload format, named by its MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardFormat {
    /// `text/plain`: raw markup text.
    Text,
    /// `image/png`: a rasterized icon.
    Png,
    /// `image/svg+xml`: native vector clipboard content.
    Svg,
}

impl ClipboardFormat {
    /// The MIME type string for this format.
    pub fn mime(&self) -> &'static str {
        match self {
            Self::Text => "text/plain",
            Self::Png => "image/png",
            Self::Svg => "image/svg+xml",
        }
    }
}

impl fmt::Display for ClipboardFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime())
    }
}

/// Where clipboard writes land.
///
/// `supports` is a capability query, not a promise: a backend may still
/// fail a write it claims to support (permissions, platform quirks), and
/// the export pipeline catches that per tier.
pub trait ClipboardBackend {
    /// Whether this backend carries the given payload format at all.
    fn supports(&self, format: ClipboardFormat) -> bool;

    /// Writes a plain-text payload.
    fn write_text(&mut self, text: &str) -> Result<(), ExportError>;

    /// Writes an image payload of the given format.
    fn write_image(&mut self, format: ClipboardFormat, bytes: &[u8]) -> Result<(), ExportError>;
}

/// The operating-system clipboard.
///
/// Text only: the underlying clipboard interface carries no image
/// payloads, so `copy_as_image` exercises its full fallback chain on this
/// backend and ends at the text tier.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }
}

impl ClipboardBackend for SystemClipboard {
    fn supports(&self, format: ClipboardFormat) -> bool {
        matches!(format, ClipboardFormat::Text)
    }

    fn write_text(&mut self, text: &str) -> Result<(), ExportError> {
        cli_clipboard::set_contents(text.to_owned())
            .map_err(|err| ExportError::Clipboard(err.to_string()))
    }

    fn write_image(&mut self, format: ClipboardFormat, _bytes: &[u8]) -> Result<(), ExportError> {
        Err(ExportError::ClipboardUnsupported(format))
    }
}

/// An in-memory clipboard holding the most recent write.
///
/// Declares support for a caller-chosen set of formats, which makes it
/// useful both as a test double and as a headless capture target.
#[derive(Debug, Clone, Default)]
pub struct BufferClipboard {
    formats: Vec<ClipboardFormat>,
    payload: Option<(ClipboardFormat, Vec<u8>)>,
}

impl BufferClipboard {
    /// A buffer clipboard supporting exactly the given formats.
    pub fn supporting(formats: &[ClipboardFormat]) -> Self {
        Self { formats: formats.to_vec(), payload: None }
    }

    /// The most recent write, if any.
    pub fn payload(&self) -> Option<(ClipboardFormat, &[u8])> {
        self.payload.as_ref().map(|(f, b)| (*f, b.as_slice()))
    }

    /// The most recent write decoded as text, if it was a text write.
    pub fn text(&self) -> Option<&str> {
        match &self.payload {
            Some((ClipboardFormat::Text, bytes)) => std::str::from_utf8(bytes).ok(),
            _ => None,
        }
    }
}

impl ClipboardBackend for BufferClipboard {
    fn supports(&self, format: ClipboardFormat) -> bool {
        format == ClipboardFormat::Text || self.formats.contains(&format)
    }

    fn write_text(&mut self, text: &str) -> Result<(), ExportError> {
        self.payload = Some((ClipboardFormat::Text, text.as_bytes().to_vec()));
        Ok(())
    }

    fn write_image(&mut self, format: ClipboardFormat, bytes: &[u8]) -> Result<(), ExportError> {
        if !self.supports(format) {
            return Err(ExportError::ClipboardUnsupported(format));
        }
        self.payload = Some((format, bytes.to_vec()));
        Ok(())
    }
}
