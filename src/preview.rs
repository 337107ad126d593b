//! Preview/edit sessions over a single icon.
//!
//! A [`RecolorSession`] owns one customization interaction: it holds the
//! sanitized original markup (never modified), the extracted color tokens,
//! and the working [`ColorMap`]. Derived markup is produced on demand, and
//! every edit bumps a revision counter that feeds the id seed, so a
//! consumer re-injecting [`injection_markup`](RecolorSession::injection_markup)
//! always sees fresh content instead of a stale cached rendering.

use crate::catalog::IconRecord;
use crate::transform::{ColorMap, RenderSeed, apply_color_map, extract_colors, normalize_ids,
    strip_noise};

/// One preview/edit interaction. Discard it when the interaction closes;
/// the catalog record it was opened from is never touched.
#[derive(Debug, Clone)]
pub struct RecolorSession {
    name: String,
    original: String,
    colors: Vec<String>,
    map: ColorMap,
    revision: u64,
}

impl RecolorSession {
    /// Opens a session on a catalog record.
    pub fn open(record: &IconRecord) -> Self {
        Self::from_markup(&record.name, &record.svg)
    }

    /// Opens a session on bare markup, for callers without a catalog.
    pub fn from_markup(name: &str, svg: &str) -> Self {
        let original = strip_noise(svg);
        let colors = extract_colors(&original);
        let map = ColorMap::identity(colors.iter().cloned());
        Self { name: name.to_string(), original, colors, map, revision: 0 }
    }

    /// The icon's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The distinct recolorable tokens, in document order.
    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    /// Whether there is anything to customize. A UI must present an
    /// explicit "nothing to customize" state when this is false, rather
    /// than an empty control list.
    pub fn has_editable_colors(&self) -> bool {
        !self.colors.is_empty()
    }

    /// The working color map.
    pub fn color_map(&self) -> &ColorMap {
        &self.map
    }

    /// Sets the replacement for one extracted token. Returns false (and
    /// changes nothing) if the token was not extracted from this icon.
    pub fn set_color(&mut self, original: &str, replacement: impl Into<String>) -> bool {
        if !self.colors.iter().any(|c| c == original) {
            return false;
        }
        self.map.insert(original, replacement);
        self.revision += 1;
        true
    }

    /// Restores every color to its original value.
    pub fn reset(&mut self) {
        self.map.reset();
        self.revision += 1;
    }

    /// True once any color differs from its original.
    pub fn is_modified(&self) -> bool {
        !self.map.is_identity()
    }

    /// Edit counter; also feeds the id seed of [`injection_markup`](Self::injection_markup).
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The current markup with the working color map applied. This is the
    /// string to hand to the export pipeline.
    pub fn current_svg(&self) -> String {
        apply_color_map(&self.original, &self.map)
    }

    /// The current markup with ids scoped for injection into a shared
    /// document. The seed folds in the revision counter, so markup from
    /// after an edit never collides with markup from before it.
    pub fn injection_markup(&self) -> String {
        let seed = RenderSeed::with_nonce(&self.name, self.revision);
        normalize_ids(&self.current_svg(), &seed)
    }
}
