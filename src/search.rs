//! Catalog search and filtering.
//!
//! Substring search over the derived keyword set, plus the gallery's
//! filter panel: category selection, favorites-only, and name/category
//! sorting. Filtering borrows from the catalog; it never copies records.

use crate::catalog::IconRecord;
use crate::favorites::Favorites;

/// Sort key for filtered results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Name,
    Category,
}

/// Sort direction for filtered results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// The gallery's filter state.
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    /// Free-text query, matched case-insensitively as a substring of the
    /// name, the category, and each keyword. Blank matches everything.
    pub query: String,

    /// Selected categories; empty means all.
    pub categories: Vec<String>,

    /// Restrict to starred icons.
    pub favorites_only: bool,

    pub sort_by: SortKey,
    pub sort_order: SortOrder,
}

impl SearchFilter {
    /// A filter that only carries a query.
    pub fn with_query(query: impl Into<String>) -> Self {
        Self { query: query.into(), ..Self::default() }
    }

    /// Whether any non-default filtering is active.
    pub fn is_active(&self) -> bool {
        !self.query.trim().is_empty()
            || !self.categories.is_empty()
            || self.favorites_only
            || self.sort_by != SortKey::Name
            || self.sort_order != SortOrder::Ascending
    }
}

/// Applies a filter to the record sequence, returning matching references
/// in the requested sort order.
pub fn filter<'a>(
    records: &'a [IconRecord],
    search: &SearchFilter,
    favorites: &Favorites,
) -> Vec<&'a IconRecord> {
    let query = search.query.trim().to_lowercase();

    let mut hits: Vec<&IconRecord> = records
        .iter()
        .filter(|record| {
            if search.favorites_only && !favorites.is_favorite(&record.name) {
                return false;
            }
            if !search.categories.is_empty()
                && !search.categories.iter().any(|c| c == &record.category)
            {
                return false;
            }
            query.is_empty() || matches_query(record, &query)
        })
        .collect();

    hits.sort_by(|a, b| {
        let ordering = match search.sort_by {
            SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortKey::Category => a
                .category
                .to_lowercase()
                .cmp(&b.category.to_lowercase())
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase())),
        };
        match search.sort_order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });

    hits
}

fn matches_query(record: &IconRecord, query: &str) -> bool {
    record.name.to_lowercase().contains(query)
        || record.category.to_lowercase().contains(query)
        || record.keywords.iter().any(|keyword| keyword.contains(query))
}
