//! Category filter view over the catalog snapshot

use std::collections::BTreeSet;
use std::fmt;

use shared::models::CatalogEntry;

use crate::catalog::Catalog;

const ALL: &str = "ALL";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    /// Parse operator input; `ALL` (any case) or blank selects everything
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() || text.eq_ignore_ascii_case(ALL) {
            CategoryFilter::All
        } else {
            CategoryFilter::Category(text.to_uppercase())
        }
    }

    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(category) => entry.category == *category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(ALL),
            CategoryFilter::Category(category) => f.write_str(category),
        }
    }
}

/// Entries passing `filter`, in catalog order
pub fn visible_entries<'a>(catalog: &'a Catalog, filter: &CategoryFilter) -> Vec<&'a CatalogEntry> {
    catalog
        .entries()
        .iter()
        .filter(|e| filter.matches(e))
        .collect()
}

/// Distinct non-empty categories, sorted
pub fn categories(catalog: &Catalog) -> Vec<String> {
    catalog
        .entries()
        .iter()
        .filter(|e| !e.category.is_empty())
        .map(|e| e.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
