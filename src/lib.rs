//! iconfolio: SVG icon catalog, recoloring, and export toolkit
//!
//! This crate loads a tree of SVG icons into a searchable in-memory
//! catalog, lets callers extract and rewrite the colors of any icon
//! without touching the original markup, and exports the result through
//! the clipboard (as image or text, with graceful fallback) or to a file.
//!
//! # Example
//!
//! ```
//! use iconfolio::{
//!     BufferClipboard, Exporter, HiddenConfig, IconCatalog, RecolorSession,
//! };
//!
//! let hidden = HiddenConfig::new();
//! let catalog = IconCatalog::from_sources(
//!     vec![(
//!         "icons/azure/00028-icon-service-home_32_regular.svg",
//!         r##"<svg><path fill="#FF0000" d="M0 0"/></svg>"##,
//!     )],
//!     &hidden,
//! );
//!
//! // Recolor a copy of the icon; the catalog record is never modified.
//! let record = &catalog.list()[0];
//! let mut session = RecolorSession::open(record);
//! session.set_color("#FF0000", "#00FF00");
//!
//! // Export through a clipboard backend.
//! let mut exporter = Exporter::new(BufferClipboard::supporting(&[]));
//! let receipt = exporter.copy_as_text(&session.current_svg(), &record.name).unwrap();
//! println!("{}", receipt.notice().message);
//! ```
//!
//! # Pipeline order
//!
//! Markup entering a [`RecolorSession`] is sanitized first
//! ([`transform::strip_noise`]), then color tokens are extracted
//! ([`transform::extract_colors`]), edited through a [`ColorMap`], and
//! finally id-scoped per render ([`transform::normalize_ids`]) so repeated
//! injection into one document never collides.

pub mod catalog;
pub mod error;
pub mod export;
pub mod favorites;
pub mod hidden;
pub mod naming;
pub mod preview;
pub mod search;
pub mod transform;

pub use catalog::{CatalogChange, IconCatalog, IconRecord};
pub use error::{ArtifactError, CatalogError, ExportError};
pub use export::{
    BufferClipboard, ClipboardBackend, ClipboardFormat, Delivery, ExportReceipt, Exporter,
    Notice, NoticeKind, SystemClipboard, save_svg,
};
pub use favorites::Favorites;
pub use hidden::HiddenConfig;
pub use preview::RecolorSession;
pub use search::{SearchFilter, SortKey, SortOrder};
pub use transform::{ColorMap, RenderSeed};
