//! Color extraction and substitution.
//!
//! Makes an icon's colors independently editable without corrupting its
//! markup: [`extract_colors`] lists the distinct recolorable tokens in
//! document order, a [`ColorMap`] records the edits, and [`apply_color_map`]
//! produces the modified copy while the original stays untouched.
//!
//! Substitution is syntactic (literal token replacement with regex-escaped
//! patterns, scoped to the three contexts below) rather than
//! a structural SVG parse. It can under-match a token sitting in a syntactic
//! position we do not scan, but it never touches unrelated text. Scanned
//! contexts:
//!
//! - `fill="..."` / `stroke="..."` attribute values
//! - `fill:` / `stroke:` declarations inside `style` attributes
//! - `stop-color="..."` attribute values (gradient stops)

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Named colors eligible for substitution. The set is fixed: tokens outside
/// it (and outside the hex/functional forms) are left alone.
pub const NAMED_COLORS: &[&str] = &[
    "red", "blue", "green", "yellow", "orange", "purple", "pink", "brown", "black", "white",
    "gray", "grey", "darkgray", "darkgrey", "lightgray", "lightgrey", "darkblue", "lightblue",
    "darkgreen", "lightgreen", "darkred", "lightred",
];

static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$").unwrap()
});
static RGB_FN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^rgba?\([^)]+\)$").unwrap());
static HSL_FN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^hsla?\([^)]+\)$").unwrap());

/// One pass over the markup hits all three paint contexts in document order.
static PAINT_SITES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:fill|stroke)="([^"]*)"|style="([^"]*)"|stop-color="([^"]*)""#).unwrap()
});

/// Declarations inside a `style` attribute value. The token charset matches
/// the original tool: terminated by `;`, `"`, or whitespace.
static STYLE_DECL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?:fill|stroke):\s*([^;"\s]+)"#).unwrap());

/// Whether a color token is eligible for substitution.
///
/// Rejected outright: the empty string, `none` (no paint), `inherit`, and
/// `currentColor` (inherits the contextual foreground and is never
/// rewritten). Accepted forms: 3/4/6/8-digit hex, `rgb()`/`rgba()`,
/// `hsl()`/`hsla()`, and the [`NAMED_COLORS`] allow-list
/// (case-insensitive).
pub fn is_recolorable(token: &str) -> bool {
    if token.is_empty() || matches!(token, "none" | "currentColor" | "inherit") {
        return false;
    }
    HEX_COLOR.is_match(token)
        || RGB_FN.is_match(token)
        || HSL_FN.is_match(token)
        || NAMED_COLORS.iter().any(|name| token.eq_ignore_ascii_case(name))
}

/// Extracts the distinct recolorable color tokens from the markup, in
/// first-occurrence document order.
pub fn extract_colors(svg: &str) -> Vec<String> {
    let mut colors: Vec<String> = Vec::new();
    for site in PAINT_SITES.captures_iter(svg) {
        if let Some(value) = site.get(1).or_else(|| site.get(3)) {
            push_color(&mut colors, value.as_str());
        } else if let Some(style) = site.get(2) {
            for decl in STYLE_DECL.captures_iter(style.as_str()) {
                push_color(&mut colors, &decl[1]);
            }
        }
    }
    colors
}

fn push_color(colors: &mut Vec<String>, token: &str) {
    if is_recolorable(token) && !colors.iter().any(|c| c == token) {
        colors.push(token.to_string());
    }
}

/// An ephemeral mapping from original color tokens to replacements.
///
/// Built per preview/edit interaction and discarded with it. Keys are the
/// tokens extracted from one icon; a key mapped to itself (the initial
/// state) is identity and produces no rewrite.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorMap {
    entries: Vec<(String, String)>,
}

impl ColorMap {
    /// An identity map over the given tokens: every color maps to itself.
    pub fn identity<I>(colors: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            entries: colors
                .into_iter()
                .map(|c| {
                    let c = c.into();
                    (c.clone(), c)
                })
                .collect(),
        }
    }

    /// Sets the replacement for a token, inserting the pair if the token is
    /// not yet a key.
    pub fn insert(&mut self, original: &str, replacement: impl Into<String>) {
        let replacement = replacement.into();
        match self.entries.iter_mut().find(|(o, _)| o == original) {
            Some((_, r)) => *r = replacement,
            None => self.entries.push((original.to_string(), replacement)),
        }
    }

    /// The replacement currently mapped to a token, if any.
    pub fn replacement_for(&self, original: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(o, _)| o == original)
            .map(|(_, r)| r.as_str())
    }

    /// Restores every entry to identity.
    pub fn reset(&mut self) {
        for (original, replacement) in &mut self.entries {
            replacement.clone_from(original);
        }
    }

    /// True when no entry would produce a rewrite.
    pub fn is_identity(&self) -> bool {
        self.entries.iter().all(|(o, r)| o == r)
    }

    /// Iterates `(original, replacement)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(o, r)| (o.as_str(), r.as_str()))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Applies a color map to the markup, returning the modified copy.
///
/// For every non-identity pair, all literal occurrences of the original
/// token are replaced in the three scanned contexts. Tokens are
/// regex-escaped, so metacharacter-bearing forms like `rgb(1, 2, 3)` are
/// matched literally. An identity map returns the input unchanged.
pub fn apply_color_map(svg: &str, map: &ColorMap) -> String {
    let mut updated = svg.to_string();
    for (original, replacement) in map.iter() {
        if original == replacement {
            continue;
        }
        let escaped = regex::escape(original);

        let Ok(attr) = Regex::new(&format!(r#"(fill|stroke)="{escaped}""#)) else { continue };
        updated = attr
            .replace_all(&updated, |caps: &Captures| {
                format!(r#"{}="{replacement}""#, &caps[1])
            })
            .into_owned();

        let Ok(style) = Regex::new(&format!(r#"((?:fill|stroke):\s*){escaped}([;"])"#)) else {
            continue;
        };
        updated = style
            .replace_all(&updated, |caps: &Captures| {
                format!("{}{replacement}{}", &caps[1], &caps[2])
            })
            .into_owned();

        let Ok(stop) = Regex::new(&format!(r#"stop-color="{escaped}""#)) else { continue };
        updated = stop
            .replace_all(&updated, |_: &Captures| format!(r#"stop-color="{replacement}""#))
            .into_owned();
    }
    updated
}
