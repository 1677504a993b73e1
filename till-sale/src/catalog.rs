//! Catalog snapshot
//!
//! Loaded once per sale session. Raw backend products are normalised here
//! and nowhere else; everything downstream sees [`CatalogEntry`] only.

use std::collections::HashMap;

use shared::ErrorCode;
use shared::models::{CatalogEntry, RawProduct, normalize_products};
use till_client::Credential;

use crate::backend::SalesBackend;

/// Immutable product snapshot for one sale session
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    /// Build from already-normalised entries. Later duplicates of an id are ignored.
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        let mut by_id = HashMap::with_capacity(entries.len());
        let mut kept = Vec::with_capacity(entries.len());
        for entry in entries {
            if by_id.contains_key(&entry.id) {
                continue;
            }
            by_id.insert(entry.id.clone(), kept.len());
            kept.push(entry);
        }
        Self {
            entries: kept,
            by_id,
        }
    }

    pub fn from_raw(raw: &[RawProduct]) -> Self {
        Self::new(normalize_products(raw))
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Entries in backend order
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.by_id.get(id).map(|&i| &self.entries[i])
    }

    /// First entry whose barcode equals `barcode`. Empty barcodes never match.
    pub fn find_by_barcode(&self, barcode: &str) -> Option<&CatalogEntry> {
        if barcode.is_empty() {
            return None;
        }
        self.entries.iter().find(|e| e.barcode == barcode)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Result of loading a snapshot: always a usable catalog, plus a notice on failure
#[derive(Debug, Clone)]
pub struct CatalogLoad {
    pub catalog: Catalog,
    pub notice: Option<String>,
}

impl CatalogLoad {
    pub fn is_degraded(&self) -> bool {
        self.notice.is_some()
    }
}

/// Fetch the product listing and normalise it.
///
/// Network failures and malformed listings leave an empty catalog and the
/// "Could not load products" notice.
pub async fn load<B>(backend: &B, credential: &Credential) -> CatalogLoad
where
    B: SalesBackend + ?Sized,
{
    match backend.list_products(credential).await {
        Ok(raw) => {
            let catalog = Catalog::from_raw(&raw);
            tracing::info!(
                products = catalog.len(),
                dropped = raw.len() - catalog.len(),
                "Catalog snapshot loaded"
            );
            CatalogLoad {
                catalog,
                notice: None,
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "Catalog snapshot unavailable");
            CatalogLoad {
                catalog: Catalog::empty(),
                notice: Some(ErrorCode::CatalogUnavailable.message().to_string()),
            }
        }
    }
}
