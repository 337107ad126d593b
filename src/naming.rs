//! Display-name, category, and keyword derivation for catalog records.
//!
//! Source files arrive with machine-oriented names like
//! `00028-icon-service-home_32_regular.svg`. [`derive_name`] turns that into
//! `"Home 32px"` through an ordered list of cleanup rules; [`derive_category`]
//! and [`derive_keywords`] produce the grouping and search tokens the catalog
//! stores alongside the markup.

use std::sync::LazyLock;

use regex::Regex;

/// Acronyms kept fully upper-case during title-casing.
const ACRONYMS: &[&str] = &[
    "AI", "ML", "API", "UI", "UX", "SDK", "URL", "HTTP", "CSS", "HTML", "JS",
];

/// Category used when the source path carries no category segment.
pub const FALLBACK_CATEGORY: &str = "general";

static SIZE_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_(\d+)_").unwrap());
static NUMERIC_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+[-\s]?").unwrap());
static SERVICE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^icon[\s-]?service[\s-]?").unwrap());
static ICON_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^icon[\s-]?").unwrap());
static EMBEDDED_SIZE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_\d+_").unwrap());
static STYLE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)_(regular|filled|non-item|outline|solid)$").unwrap());
static SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[-_]").unwrap());
static PARENTHETICAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*\([^)]*\)").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static TOKEN_SPLIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[-_]|\s+").unwrap());

/// Derives a human-readable display name from a source path.
///
/// Rules, in order: strip numeric filename prefixes; strip `icon` /
/// `icon-service` prefix tokens (case-insensitive); capture an embedded
/// `_N_` size marker and remove it; strip trailing style qualifiers
/// (`regular`, `filled`, `non-item`, `outline`, `solid`); turn separators
/// into spaces; drop parenthetical suffixes; collapse whitespace; title-case
/// every word except the acronym allow-list; append the captured size as a
/// `Npx` suffix.
///
/// Never returns an empty string: if every rule strips the name away, the
/// raw filename stem is returned unchanged.
///
/// ```
/// use iconfolio::naming::derive_name;
///
/// assert_eq!(
///     derive_name("icons/azure/00028-icon-service-home_32_regular.svg"),
///     "Home 32px",
/// );
/// ```
pub fn derive_name(path: &str) -> String {
    let stem = file_stem(path);
    let cleaned = clean_name(stem);
    if cleaned.is_empty() { stem.to_string() } else { cleaned }
}

fn file_stem(path: &str) -> &str {
    let file = path.rsplit('/').next().unwrap_or(path);
    file.strip_suffix(".svg").unwrap_or(file)
}

fn clean_name(raw: &str) -> String {
    // The size marker is captured before any rule can destroy it.
    let size = SIZE_MARKER.captures(raw).map(|c| c[1].to_string());

    let cleaned = NUMERIC_PREFIX.replace(raw, "");
    let cleaned = SERVICE_PREFIX.replace(&cleaned, "");
    let cleaned = ICON_PREFIX.replace(&cleaned, "");
    let cleaned = EMBEDDED_SIZE.replace_all(&cleaned, "_");
    let cleaned = STYLE_SUFFIX.replace(&cleaned, "");
    let cleaned = SEPARATORS.replace_all(&cleaned, " ");
    let cleaned = PARENTHETICAL.replace_all(&cleaned, "");
    let cleaned = WHITESPACE.replace_all(&cleaned, " ");

    let mut name = title_case(cleaned.trim());
    if let Some(size) = size {
        if !name.is_empty() {
            name.push(' ');
            name.push_str(&size);
            name.push_str("px");
        }
    }
    name
}

fn title_case(s: &str) -> String {
    s.split(' ')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let upper = word.to_uppercase();
            if ACRONYMS.contains(&upper.as_str()) {
                return upper;
            }
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Returns the path segment immediately following the `icons` segment,
/// or [`FALLBACK_CATEGORY`] when that segment names the file itself or is
/// absent (a file sitting directly under the root).
pub fn derive_category(path: &str) -> String {
    let parts: Vec<&str> = path.split('/').collect();
    if let Some(idx) = parts.iter().position(|part| *part == "icons") {
        if idx + 2 < parts.len() {
            return parts[idx + 1].to_string();
        }
    }
    FALLBACK_CATEGORY.to_string()
}

/// Builds the lower-cased search-token set for one record.
///
/// Both inputs are tokenized on hyphens, underscores, and whitespace, and
/// the whole lower-cased name and category are included as extra tokens so
/// substring search and token search work against the same set. Duplicates
/// are removed; first-occurrence order is kept.
pub fn derive_keywords(name: &str, category: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    let name = name.to_lowercase();
    let category = category.to_lowercase();

    for source in [&name, &category] {
        for token in TOKEN_SPLIT.split(source) {
            push_unique(&mut keywords, token);
        }
    }
    push_unique(&mut keywords, &name);
    push_unique(&mut keywords, &category);
    keywords
}

fn push_unique(keywords: &mut Vec<String>, token: &str) {
    if !token.is_empty() && !keywords.iter().any(|k| k == token) {
        keywords.push(token.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_name_full_cleanup() {
        assert_eq!(
            derive_name("/icons/azure/00028-icon-service-home_32_regular.svg"),
            "Home 32px"
        );
    }

    #[test]
    fn derive_name_plain_file() {
        assert_eq!(derive_name("icons/general/user-profile.svg"), "User Profile");
    }

    #[test]
    fn derive_name_keeps_acronyms() {
        assert_eq!(derive_name("icons/dev/api-gateway.svg"), "API Gateway");
        assert_eq!(derive_name("icons/dev/machine_learning_ml.svg"), "Machine Learning ML");
    }

    #[test]
    fn derive_name_strips_parentheticals() {
        assert_eq!(derive_name("icons/misc/database (copy).svg"), "Database");
    }

    #[test]
    fn derive_name_strips_style_suffix() {
        assert_eq!(derive_name("icons/fluent/save_filled.svg"), "Save");
        assert_eq!(derive_name("icons/fluent/save_outline.svg"), "Save");
    }

    #[test]
    fn derive_name_never_empty() {
        // A name made entirely of strippable pieces falls back to the stem.
        assert_eq!(derive_name("icons/odd/12345-icon.svg"), "12345-icon");
        assert_eq!(derive_name("icons/odd/icon-.svg"), "icon-");
    }

    #[test]
    fn derive_name_without_size_marker() {
        assert_eq!(derive_name("icons/azure/icon-service-storage.svg"), "Storage");
    }

    #[test]
    fn derive_category_from_segment() {
        assert_eq!(derive_category("icons/azure/home.svg"), "azure");
        assert_eq!(derive_category("/src/icons/network/vpn.svg"), "network");
    }

    #[test]
    fn derive_category_fallback() {
        // The segment after `icons` is the file itself, not a category.
        assert_eq!(derive_category("icons/home.svg"), "general");
        assert_eq!(derive_category("home.svg"), "general");
    }

    #[test]
    fn derive_keywords_tokenizes_and_dedupes() {
        let keywords = derive_keywords("Home 32px", "azure");
        assert_eq!(keywords, vec!["home", "32px", "azure", "home 32px"]);
    }

    #[test]
    fn derive_keywords_includes_whole_strings() {
        let keywords = derive_keywords("User Profile", "general");
        assert!(keywords.contains(&"user profile".to_string()));
        assert!(keywords.contains(&"general".to_string()));
        // No duplicates.
        let mut sorted = keywords.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), keywords.len());
    }
}
