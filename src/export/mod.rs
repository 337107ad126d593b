//! The export pipeline.
//!
//! Delivers a (possibly recolored) SVG string to the user through three
//! channels: clipboard-as-image, clipboard-as-text, and file save. Image
//! copy degrades gracefully (native vector payload, then rasterized PNG,
//! then plain text) because clipboard capabilities vary by platform. Each
//! tier's failure is caught independently; a failure in the raster tier
//! still reaches the text tier.
//!
//! Every operation is pure with respect to the catalog: callers pass the
//! already-recolored string when the export should reflect edits.

pub mod clipboard;
pub mod raster;

use std::path::{Path, PathBuf};
use std::time::Duration;

pub use clipboard::{BufferClipboard, ClipboardBackend, ClipboardFormat, SystemClipboard};

use crate::error::ExportError;

/// How long a transient notice stays on screen before auto-dismissing.
pub const NOTICE_DURATION: Duration = Duration::from_secs(2);

/// Which channel actually delivered an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Native `image/svg+xml` clipboard payload.
    SvgClipboard,
    /// Rasterized `image/png` clipboard payload.
    PngClipboard,
    /// Plain-text clipboard payload.
    TextClipboard,
    /// A file written to disk.
    File,
}

/// Proof of a completed export: the channel that delivered it, the label it
/// was delivered under, and the output path for file deliveries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReceipt {
    pub delivery: Delivery,
    pub label: String,
    pub path: Option<PathBuf>,
}

impl ExportReceipt {
    fn clipboard(delivery: Delivery, label: &str) -> Self {
        Self { delivery, label: label.to_string(), path: None }
    }

    /// The transient confirmation to show for this export.
    pub fn notice(&self) -> Notice {
        let message = match self.delivery {
            Delivery::SvgClipboard => format!("{} copied to the clipboard as an image", self.label),
            Delivery::PngClipboard => format!("{} copied to the clipboard as a PNG", self.label),
            Delivery::TextClipboard => format!("{} markup copied to the clipboard", self.label),
            Delivery::File => match &self.path {
                Some(path) => format!("{} saved to {}", self.label, path.display()),
                None => format!("{} saved", self.label),
            },
        };
        Notice::success(message)
    }
}

/// Kind of a transient notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A transient, auto-dismissing user notification.
///
/// Successes confirm an export; errors report a failed one. Neither is
/// fatal and neither carries a retry affordance; the user simply repeats
/// the gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub duration: Duration,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Success, message: message.into(), duration: NOTICE_DURATION }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, message: message.into(), duration: NOTICE_DURATION }
    }
}

/// The export pipeline over a clipboard backend.
pub struct Exporter<C: ClipboardBackend> {
    clipboard: C,
}

impl Exporter<SystemClipboard> {
    /// An exporter over the operating-system clipboard.
    pub fn system() -> Self {
        Self::new(SystemClipboard::new())
    }
}

impl<C: ClipboardBackend> Exporter<C> {
    pub fn new(clipboard: C) -> Self {
        Self { clipboard }
    }

    /// The backend, for inspection.
    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    /// Consumes the exporter and returns the backend.
    pub fn into_clipboard(self) -> C {
        self.clipboard
    }

    /// Copies raw markup to the clipboard as plain text. No fallback: a
    /// failure here is reported to the caller directly.
    pub fn copy_as_text(&mut self, svg: &str, label: &str) -> Result<ExportReceipt, ExportError> {
        self.clipboard.write_text(svg)?;
        Ok(ExportReceipt::clipboard(Delivery::TextClipboard, label))
    }

    /// Copies markup to the clipboard as an image, degrading tier by tier:
    /// native SVG payload, rasterized PNG payload, then plain text.
    ///
    /// The receipt names the tier that delivered. Only when the final text
    /// tier also fails does this return an error.
    pub fn copy_as_image(&mut self, svg: &str, label: &str) -> Result<ExportReceipt, ExportError> {
        if self.clipboard.supports(ClipboardFormat::Svg) {
            match self.clipboard.write_image(ClipboardFormat::Svg, svg.as_bytes()) {
                Ok(()) => return Ok(ExportReceipt::clipboard(Delivery::SvgClipboard, label)),
                Err(err) => log::warn!("svg clipboard write failed, trying raster: {err}"),
            }
        }

        if self.clipboard.supports(ClipboardFormat::Png) {
            let attempt = raster::rasterize_for_clipboard(svg)
                .and_then(|image| raster::encode_png(&image))
                .and_then(|png| self.clipboard.write_image(ClipboardFormat::Png, &png));
            match attempt {
                Ok(()) => return Ok(ExportReceipt::clipboard(Delivery::PngClipboard, label)),
                Err(err) => log::warn!("png clipboard write failed, falling back to text: {err}"),
            }
        }

        self.copy_as_text(svg, label)
    }
}

/// Writes markup to `{dir}/{name}.svg`.
pub fn save_svg(svg: &str, dir: &Path, name: &str) -> Result<ExportReceipt, ExportError> {
    let path = dir.join(format!("{name}.svg"));
    std::fs::write(&path, svg)?;
    Ok(ExportReceipt {
        delivery: Delivery::File,
        label: name.to_string(),
        path: Some(path),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><rect width="10" height="10" fill="#ff0000"/></svg>"##;

    /// Claims full image support but fails every image write, so the text
    /// tier is the only one that can deliver.
    #[derive(Default)]
    struct BrokenImageClipboard {
        text: Option<String>,
    }

    impl ClipboardBackend for BrokenImageClipboard {
        fn supports(&self, _format: ClipboardFormat) -> bool {
            true
        }

        fn write_text(&mut self, text: &str) -> Result<(), ExportError> {
            self.text = Some(text.to_string());
            Ok(())
        }

        fn write_image(&mut self, _f: ClipboardFormat, _b: &[u8]) -> Result<(), ExportError> {
            Err(ExportError::Clipboard("simulated platform failure".into()))
        }
    }

    #[test]
    fn copy_as_text_writes_markup() {
        let mut exporter = Exporter::new(BufferClipboard::supporting(&[]));
        let receipt = exporter.copy_as_text(SAMPLE_SVG, "Sample").unwrap();
        assert_eq!(receipt.delivery, Delivery::TextClipboard);
        assert_eq!(exporter.clipboard().text(), Some(SAMPLE_SVG));
    }

    #[test]
    fn copy_as_image_prefers_native_svg() {
        let clipboard = BufferClipboard::supporting(&[ClipboardFormat::Svg, ClipboardFormat::Png]);
        let mut exporter = Exporter::new(clipboard);
        let receipt = exporter.copy_as_image(SAMPLE_SVG, "Sample").unwrap();
        assert_eq!(receipt.delivery, Delivery::SvgClipboard);

        let (format, bytes) = exporter.clipboard().payload().unwrap();
        assert_eq!(format, ClipboardFormat::Svg);
        assert_eq!(bytes, SAMPLE_SVG.as_bytes());
    }

    #[test]
    fn copy_as_image_rasterizes_when_svg_is_unsupported() {
        let clipboard = BufferClipboard::supporting(&[ClipboardFormat::Png]);
        let mut exporter = Exporter::new(clipboard);
        let receipt = exporter.copy_as_image(SAMPLE_SVG, "Sample").unwrap();
        assert_eq!(receipt.delivery, Delivery::PngClipboard);

        let (format, bytes) = exporter.clipboard().payload().unwrap();
        assert_eq!(format, ClipboardFormat::Png);
        assert_eq!(&bytes[..4], &[0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn copy_as_image_falls_back_to_text_without_image_support() {
        let mut exporter = Exporter::new(BufferClipboard::supporting(&[]));
        let receipt = exporter.copy_as_image(SAMPLE_SVG, "Sample").unwrap();
        assert_eq!(receipt.delivery, Delivery::TextClipboard);
        assert_eq!(exporter.clipboard().text(), Some(SAMPLE_SVG));
    }

    #[test]
    fn copy_as_image_survives_failing_image_tiers() {
        // Both image tiers are attempted and fail; the markup still lands
        // on the clipboard as text.
        let mut exporter = Exporter::new(BrokenImageClipboard::default());
        let receipt = exporter.copy_as_image(SAMPLE_SVG, "Sample").unwrap();
        assert_eq!(receipt.delivery, Delivery::TextClipboard);
        assert_eq!(exporter.clipboard().text.as_deref(), Some(SAMPLE_SVG));
    }

    #[test]
    fn copy_as_image_tolerates_unrenderable_markup() {
        // Raster tier fails on malformed markup; text tier still delivers.
        let clipboard = BufferClipboard::supporting(&[ClipboardFormat::Png]);
        let mut exporter = Exporter::new(clipboard);
        let receipt = exporter.copy_as_image("<svg", "Broken").unwrap();
        assert_eq!(receipt.delivery, Delivery::TextClipboard);
        assert_eq!(exporter.clipboard().text(), Some("<svg"));
    }

    #[test]
    fn save_svg_writes_a_suffixed_file() {
        let dir = tempfile::tempdir().unwrap();
        let receipt = save_svg(SAMPLE_SVG, dir.path(), "Sample_modified").unwrap();
        assert_eq!(receipt.delivery, Delivery::File);

        let path = receipt.path.unwrap();
        assert_eq!(path, dir.path().join("Sample_modified.svg"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), SAMPLE_SVG);
    }

    #[test]
    fn receipts_produce_transient_success_notices() {
        let receipt = ExportReceipt::clipboard(Delivery::TextClipboard, "Sample");
        let notice = receipt.notice();
        assert_eq!(notice.kind, NoticeKind::Success);
        assert_eq!(notice.duration, NOTICE_DURATION);
        assert!(notice.message.contains("Sample"));
    }

    #[test]
    fn error_notices_share_the_display_duration() {
        let notice = Notice::error("could not copy the markup");
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.duration, NOTICE_DURATION);
    }
}
