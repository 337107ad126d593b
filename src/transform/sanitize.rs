//! Markup sanitization: noise stripping and id scoping.
//!
//! Icons are injected into a shared document many at a time, and exported
//! verbatim. Two problems follow: editor noise (prologs, comments, metadata,
//! entity-bearing namespaces) pollutes both, and internal ids like `a` or
//! `grad1` collide between icons. [`strip_noise`] handles the first,
//! [`normalize_ids`] the second.

use std::fmt;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static XML_PROLOG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<\?xml.*?\?>").unwrap());
static COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());
static DOCTYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!DOCTYPE[^\[>]*(?:\[[^\]]*\])?[^>]*>").unwrap());
static METADATA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<metadata[^>]*>.*?</metadata>|<metadata[^>]*/>").unwrap());
static ENTITY_NAMESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\s+xmlns:[A-Za-z_][\w.-]*\s*=\s*"&[^"]*;""#).unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

static ID_ATTR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"id="([^"]*)""#).unwrap());
static URL_REF: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"url\(#([^)]+)\)").unwrap());
static HREF_REF: LazyLock<Regex> = LazyLock::new(|| Regex::new(r##"href="#([^"]*)""##).unwrap());

/// Removes markup noise that would otherwise pollute color extraction, id
/// scoping, and exported output.
///
/// Strips, in order: XML prolog declarations, comments, `DOCTYPE` blocks
/// (including any entity internal subset), `<metadata>` blocks, and
/// `xmlns:*` attributes whose value is an entity reference. Repeated
/// whitespace collapses to single spaces. Idempotent: applying it twice is
/// the same as applying it once.
///
/// Runs *before* [`extract_colors`](crate::transform::color::extract_colors)
/// and [`normalize_ids`] so neither ever sees noise.
pub fn strip_noise(svg: &str) -> String {
    let svg = XML_PROLOG.replace_all(svg, "");
    let svg = COMMENT.replace_all(&svg, "");
    let svg = DOCTYPE.replace_all(&svg, "");
    let svg = METADATA.replace_all(&svg, "");
    let svg = ENTITY_NAMESPACE.replace_all(&svg, "");
    WHITESPACE.replace_all(&svg, " ").trim().to_string()
}

/// A scope prefix for the ids inside one rendered icon.
///
/// Two icons that both define `id="a"` collide once injected into the same
/// document; prefixing every id (and every internal reference) with a
/// per-icon seed keeps them apart. The seed is deterministic for a given
/// name, and [`RenderSeed::with_nonce`] folds in a revision counter so that
/// re-rendering an edited icon produces markup consumers treat as new.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSeed(String);

impl RenderSeed {
    /// Derives a seed from an icon name: lower-cased, with anything outside
    /// ASCII alphanumerics folded to `-`, prefixed so the result is always
    /// a valid id start.
    pub fn from_name(name: &str) -> Self {
        let slug: String = name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' }
            })
            .collect();
        let slug = slug.trim_matches('-');
        if slug.is_empty() || !slug.starts_with(|c: char| c.is_ascii_alphabetic()) {
            Self(format!("icon-{slug}"))
        } else {
            Self(slug.to_string())
        }
    }

    /// Like [`from_name`](Self::from_name), with a revision nonce appended.
    /// Callers must change the nonce between re-renders of an edited icon.
    pub fn with_nonce(name: &str, nonce: u64) -> Self {
        let base = Self::from_name(name);
        Self(format!("{}-{nonce}", base.0))
    }

    /// The seed as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RenderSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rewrites every `id="X"` to `id="{seed}_X"`, and every `url(#X)` and
/// `href="#X"` (plain or `xlink:`) reference to match, preserving
/// referential integrity within the icon.
pub fn normalize_ids(svg: &str, seed: &RenderSeed) -> String {
    let svg = ID_ATTR.replace_all(svg, |caps: &Captures| format!(r#"id="{seed}_{}""#, &caps[1]));
    let svg = URL_REF.replace_all(&svg, |caps: &Captures| format!("url(#{seed}_{})", &caps[1]));
    let svg =
        HREF_REF.replace_all(&svg, |caps: &Captures| format!(r##"href="#{seed}_{}""##, &caps[1]));
    svg.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOISY: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
        <!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" \"svg11.dtd\" [\n\
          <!ENTITY ns_extend \"http://ns.adobe.com/Extensibility/1.0/\">\n\
        ]>\n\
        <!-- Generator: Adobe Illustrator -->\n\
        <svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:x=\"&ns_extend;\">\n\
          <metadata>junk</metadata>\n\
          <path   d=\"M0 0\"/>\n\
        </svg>";

    #[test]
    fn strip_noise_removes_all_noise_classes() {
        let clean = strip_noise(NOISY);
        assert!(!clean.contains("<?xml"));
        assert!(!clean.contains("DOCTYPE"));
        assert!(!clean.contains("ENTITY"));
        assert!(!clean.contains("<!--"));
        assert!(!clean.contains("<metadata"));
        assert!(!clean.contains("&ns_extend;"));
        assert!(clean.contains(r#"<path d="M0 0"/>"#));
        assert!(clean.contains(r#"xmlns="http://www.w3.org/2000/svg""#));
    }

    #[test]
    fn strip_noise_is_idempotent() {
        let once = strip_noise(NOISY);
        assert_eq!(strip_noise(&once), once);
    }

    #[test]
    fn strip_noise_keeps_plain_markup() {
        let svg = r#"<svg><circle r="4"/></svg>"#;
        assert_eq!(strip_noise(svg), svg);
    }

    #[test]
    fn normalize_ids_prefixes_ids_and_references() {
        let svg = r##"<svg><defs><linearGradient id="grad1"/></defs><rect fill="url(#grad1)"/><use href="#grad1"/></svg>"##;
        let seed = RenderSeed::from_name("Home");
        let scoped = normalize_ids(svg, &seed);
        assert!(scoped.contains(r#"id="home_grad1""#));
        assert!(scoped.contains("url(#home_grad1)"));
        assert!(scoped.contains(r##"href="#home_grad1""##));
        assert!(!scoped.contains(r#"id="grad1""#));
    }

    #[test]
    fn normalize_ids_handles_xlink_href() {
        let svg = r##"<svg><path id="a"/><use xlink:href="#a"/></svg>"##;
        let scoped = normalize_ids(svg, &RenderSeed::from_name("Star"));
        assert!(scoped.contains(r##"xlink:href="#star_a""##));
    }

    #[test]
    fn distinct_seeds_do_not_collide() {
        let svg = r#"<svg><path id="a"/></svg>"#;
        let first = normalize_ids(svg, &RenderSeed::from_name("Home"));
        let second = normalize_ids(svg, &RenderSeed::from_name("Star"));
        assert!(first.contains(r#"id="home_a""#));
        assert!(second.contains(r#"id="star_a""#));
        assert_ne!(first, second);
    }

    #[test]
    fn seed_from_awkward_names() {
        assert_eq!(RenderSeed::from_name("Home 32px").as_str(), "home-32px");
        assert_eq!(RenderSeed::from_name("32 Up").as_str(), "icon-32-up");
        assert_eq!(RenderSeed::from_name("").as_str(), "icon-");
    }

    #[test]
    fn nonce_changes_the_seed() {
        let a = RenderSeed::with_nonce("Home", 1);
        let b = RenderSeed::with_nonce("Home", 2);
        assert_ne!(a, b);
        assert_eq!(a.as_str(), "home-1");
    }
}
