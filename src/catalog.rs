//! The in-memory icon catalog.
//!
//! A catalog is built once from a set of `(path, markup)` pairs (usually a
//! scanned directory tree) minus the exclusions, and then only ever shrinks:
//! [`IconCatalog::remove_by_path`] drops a record for the rest of the
//! session without touching source data. Rebuilding the catalog restores the
//! full set.
//!
//! The catalog is an owned store, not a global: consumers hold a reference,
//! read [`list`](IconCatalog::list), and either watch
//! [`version`](IconCatalog::version) or register a
//! [`subscribe`](IconCatalog::subscribe) callback to observe removals.

use std::fmt;
use std::path::Path;

use crate::error::CatalogError;
use crate::hidden::HiddenConfig;
use crate::naming;

/// Path segment whose presence excludes a source file from the catalog.
const HIDDEN_SEGMENT: &str = "hidden";

/// One icon available in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconRecord {
    /// Human-readable display name. Not globally unique: two source files
    /// may legitimately clean up to the same name.
    pub name: String,

    /// Raw markup as read from the source, unmodified at load time. May be
    /// malformed or empty; transforms downstream tolerate that.
    pub svg: String,

    /// Path segment under the icons root, or the fallback category.
    pub category: String,

    /// Lower-cased search tokens derived from name and category.
    pub keywords: Vec<String>,

    /// The original source path. This is the record's identity: removal and
    /// hiding key on it, because `name` is not reliable as a key.
    pub file_path: String,
}

impl IconRecord {
    /// Builds a record from a source path and its raw markup.
    pub fn from_source(file_path: impl Into<String>, svg: impl Into<String>) -> Self {
        let file_path = file_path.into();
        let name = naming::derive_name(&file_path);
        let category = naming::derive_category(&file_path);
        let keywords = naming::derive_keywords(&name, &category);
        Self { name, svg: svg.into(), category, keywords, file_path }
    }
}

/// A change observed on the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogChange {
    /// A record was removed for this session.
    Removed { file_path: String },
}

type Listener = Box<dyn FnMut(&CatalogChange) + Send>;

/// The owned icon store.
pub struct IconCatalog {
    records: Vec<IconRecord>,
    version: u64,
    listeners: Vec<Listener>,
}

impl IconCatalog {
    /// Builds a catalog from `(path, markup)` pairs.
    ///
    /// Excludes any path with a `hidden` segment and any path present in
    /// the hidden-list, then sorts by display name case-insensitively with
    /// `file_path` as the tie-breaker. Deterministic: the same inputs
    /// always produce the same record sequence.
    pub fn from_sources<I, P, S>(sources: I, hidden: &HiddenConfig) -> Self
    where
        I: IntoIterator<Item = (P, S)>,
        P: Into<String>,
        S: Into<String>,
    {
        let mut records: Vec<IconRecord> = sources
            .into_iter()
            .map(|(path, svg)| (path.into(), svg.into()))
            .filter(|(path, _)| !is_excluded(path, hidden))
            .map(|(path, svg)| IconRecord::from_source(path, svg))
            .collect();

        records.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.file_path.cmp(&b.file_path))
        });

        Self { records, version: 0, listeners: Vec::new() }
    }

    /// Scans a directory tree for `.svg` files and builds a catalog from it.
    ///
    /// Stored paths are relative to `root`, use forward slashes, and are
    /// prefixed `icons/` so category derivation sees the same path shape as
    /// the original source tree.
    pub fn scan_dir(root: &Path, hidden: &HiddenConfig) -> Result<Self, CatalogError> {
        let mut sources: Vec<(String, String)> = Vec::new();
        scan_recursive(root, root, &mut sources)?;
        Ok(Self::from_sources(sources, hidden))
    }

    /// The records, in catalog order.
    pub fn list(&self) -> &[IconRecord] {
        &self.records
    }

    /// Number of records currently in the catalog.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the catalog holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Looks up a record by its source path.
    pub fn get(&self, file_path: &str) -> Option<&IconRecord> {
        self.records.iter().find(|r| r.file_path == file_path)
    }

    /// Sorted, distinct category names across the catalog.
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> =
            self.records.iter().map(|r| r.category.clone()).collect();
        categories.sort();
        categories.dedup();
        categories
    }

    /// Monotonic change counter; bumped once per effective mutation.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Registers a callback invoked on every effective mutation.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&CatalogChange) + Send + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Removes the first record whose `file_path` matches, for this session
    /// only. Returns whether a record was removed; removing an absent path
    /// is a no-op, not an error, so the operation is idempotent.
    pub fn remove_by_path(&mut self, file_path: &str) -> bool {
        let Some(idx) = self.records.iter().position(|r| r.file_path == file_path) else {
            return false;
        };
        self.records.remove(idx);
        self.version += 1;
        let change = CatalogChange::Removed { file_path: file_path.to_string() };
        for listener in &mut self.listeners {
            listener(&change);
        }
        true
    }
}

impl fmt::Debug for IconCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IconCatalog")
            .field("records", &self.records.len())
            .field("version", &self.version)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

fn is_excluded(path: &str, hidden: &HiddenConfig) -> bool {
    path.split('/').any(|segment| segment == HIDDEN_SEGMENT) || hidden.contains(path)
}

fn scan_recursive(
    dir: &Path,
    root: &Path,
    sources: &mut Vec<(String, String)>,
) -> Result<(), CatalogError> {
    let entries = std::fs::read_dir(dir)
        .map_err(|source| CatalogError::Scan { path: dir.to_path_buf(), source })?;

    for entry in entries {
        let entry =
            entry.map_err(|source| CatalogError::Scan { path: dir.to_path_buf(), source })?;
        let path = entry.path();
        if path.is_dir() {
            scan_recursive(&path, root, sources)?;
        } else if path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
        {
            let svg = std::fs::read_to_string(&path)
                .map_err(|source| CatalogError::Scan { path: path.clone(), source })?;
            sources.push((catalog_path(&path, root), svg));
        }
    }
    Ok(())
}

/// Maps an on-disk path to the forward-slash, `icons/`-rooted shape the
/// catalog stores.
fn catalog_path(path: &Path, root: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    let rel = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    format!("icons/{rel}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn sample_sources() -> Vec<(&'static str, &'static str)> {
        vec![
            ("icons/azure/00028-icon-service-home_32_regular.svg", "<svg/>"),
            ("icons/general/zebra.svg", "<svg/>"),
            ("icons/general/apple.svg", "<svg/>"),
            ("icons/hidden/secret.svg", "<svg/>"),
        ]
    }

    #[test]
    fn loads_sorted_by_name() {
        let catalog = IconCatalog::from_sources(sample_sources(), &HiddenConfig::new());
        let names: Vec<&str> = catalog.list().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Apple", "Home 32px", "Zebra"]);
    }

    #[test]
    fn hidden_folder_is_excluded() {
        let catalog = IconCatalog::from_sources(sample_sources(), &HiddenConfig::new());
        assert!(catalog.get("icons/hidden/secret.svg").is_none());
    }

    #[test]
    fn hidden_list_is_excluded() {
        let hidden = HiddenConfig::new().with_hidden("icons/general/zebra.svg", "t");
        let catalog = IconCatalog::from_sources(sample_sources(), &hidden);
        assert!(catalog.get("icons/general/zebra.svg").is_none());
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn every_record_has_a_file_path() {
        let catalog = IconCatalog::from_sources(sample_sources(), &HiddenConfig::new());
        assert!(catalog.list().iter().all(|r| !r.file_path.is_empty()));
    }

    #[test]
    fn remove_by_path_is_idempotent() {
        let mut catalog = IconCatalog::from_sources(sample_sources(), &HiddenConfig::new());
        assert!(catalog.remove_by_path("icons/general/apple.svg"));
        let after_first = catalog.len();
        let version_after_first = catalog.version();

        assert!(!catalog.remove_by_path("icons/general/apple.svg"));
        assert_eq!(catalog.len(), after_first);
        assert_eq!(catalog.version(), version_after_first);
    }

    #[test]
    fn version_bumps_only_on_effective_removal() {
        let mut catalog = IconCatalog::from_sources(sample_sources(), &HiddenConfig::new());
        assert_eq!(catalog.version(), 0);
        catalog.remove_by_path("icons/no/such.svg");
        assert_eq!(catalog.version(), 0);
        catalog.remove_by_path("icons/general/zebra.svg");
        assert_eq!(catalog.version(), 1);
    }

    #[test]
    fn subscribers_observe_removals() {
        let mut catalog = IconCatalog::from_sources(sample_sources(), &HiddenConfig::new());
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);
        catalog.subscribe(move |change| {
            let CatalogChange::Removed { file_path } = change;
            assert_eq!(file_path, "icons/general/apple.svg");
            counter.fetch_add(1, Ordering::SeqCst);
        });

        catalog.remove_by_path("icons/general/apple.svg");
        catalog.remove_by_path("icons/general/apple.svg");
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn duplicate_names_keep_deterministic_order() {
        let sources = vec![
            ("icons/b/save.svg", "<svg/>"),
            ("icons/a/save.svg", "<svg/>"),
        ];
        let catalog = IconCatalog::from_sources(sources, &HiddenConfig::new());
        let paths: Vec<&str> = catalog.list().iter().map(|r| r.file_path.as_str()).collect();
        assert_eq!(paths, vec!["icons/a/save.svg", "icons/b/save.svg"]);
    }

    #[test]
    fn categories_are_sorted_and_distinct() {
        let catalog = IconCatalog::from_sources(sample_sources(), &HiddenConfig::new());
        assert_eq!(catalog.categories(), vec!["azure", "general"]);
    }

    #[test]
    fn scan_dir_collects_svg_files() {
        let dir = tempfile::tempdir().unwrap();
        let azure = dir.path().join("azure");
        std::fs::create_dir(&azure).unwrap();
        std::fs::write(azure.join("vm.svg"), "<svg/>").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not an icon").unwrap();

        let hidden_dir = dir.path().join("hidden");
        std::fs::create_dir(&hidden_dir).unwrap();
        std::fs::write(hidden_dir.join("secret.svg"), "<svg/>").unwrap();

        let catalog = IconCatalog::scan_dir(dir.path(), &HiddenConfig::new()).unwrap();
        assert_eq!(catalog.len(), 1);
        let record = &catalog.list()[0];
        assert_eq!(record.file_path, "icons/azure/vm.svg");
        assert_eq!(record.category, "azure");
        assert_eq!(record.name, "Vm");
    }
}
