//! Barcode resolver
//!
//! Maps scanned or typed barcode text to a catalog entry and folds it into
//! the selection: first scan adds one unit, each further scan adds one more
//! until the stock on hand is reached.

use shared::ErrorCode;

use crate::catalog::Catalog;
use crate::selection::SelectionSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveResult {
    /// Entry inserted at quantity 1
    Added { id: String, name: String },
    /// Entry already selected, quantity raised by one
    Incremented { id: String, name: String, quantity: u32 },
    NotFound(String),
    OutOfStock(String),
    MaxQuantityReached(String, u32),
    /// Nothing but whitespace was entered
    Blank,
}

impl ResolveResult {
    /// Whether the selection changed
    pub fn is_applied(&self) -> bool {
        matches!(
            self,
            ResolveResult::Added { .. } | ResolveResult::Incremented { .. }
        )
    }

    /// Code for the rejection variants
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            ResolveResult::NotFound(_) => Some(ErrorCode::BarcodeNotFound),
            ResolveResult::OutOfStock(_) => Some(ErrorCode::OutOfStock),
            ResolveResult::MaxQuantityReached(..) => Some(ErrorCode::MaxQuantityReached),
            _ => None,
        }
    }

    /// Line shown to the operator; `None` for blank input
    pub fn message(&self) -> Option<String> {
        let text = match self {
            ResolveResult::Added { name, .. } => format!("Added {name}"),
            ResolveResult::Incremented { name, quantity, .. } => {
                format!("{name} x{quantity}")
            }
            ResolveResult::NotFound(text) => format!("Product not found with barcode: {text}"),
            ResolveResult::OutOfStock(name) => format!("{name} is out of stock"),
            ResolveResult::MaxQuantityReached(name, stock) => {
                format!("Maximum available quantity reached for {name} ({stock} in stock)")
            }
            ResolveResult::Blank => return None,
        };
        Some(text)
    }
}

/// Resolve one barcode against the catalog and apply it to the selection
pub fn resolve(text: &str, catalog: &Catalog, selection: &mut SelectionSet) -> ResolveResult {
    let barcode = text.trim();
    if barcode.is_empty() {
        return ResolveResult::Blank;
    }

    let Some(entry) = catalog.find_by_barcode(barcode) else {
        tracing::debug!(barcode, "Barcode not in catalog");
        return ResolveResult::NotFound(barcode.to_string());
    };

    if !selection.contains(&entry.id) {
        if !entry.in_stock() {
            return ResolveResult::OutOfStock(entry.name.clone());
        }
        selection.insert(&entry.id);
        return ResolveResult::Added {
            id: entry.id.clone(),
            name: entry.name.clone(),
        };
    }

    match selection.increment(&entry.id, entry.available_quantity) {
        Some(quantity) => ResolveResult::Incremented {
            id: entry.id.clone(),
            name: entry.name.clone(),
            quantity,
        },
        None => ResolveResult::MaxQuantityReached(entry.name.clone(), entry.available_quantity),
    }
}

/// Pending barcode input fed by a scan gun or keyboard.
///
/// Characters accumulate until a line end arrives; the completed line is
/// then handed out for resolution.
#[derive(Debug, Clone, Default)]
pub struct ScanBuffer {
    pending: String,
}

impl ScanBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append raw input. Returns every line completed by a CR or LF.
    pub fn push(&mut self, input: &str) -> Vec<String> {
        let mut completed = Vec::new();
        for c in input.chars() {
            match c {
                '\r' | '\n' => {
                    if !self.pending.is_empty() {
                        completed.push(std::mem::take(&mut self.pending));
                    }
                }
                c => self.pending.push(c),
            }
        }
        completed
    }

    /// Text typed so far
    pub fn pending(&self) -> &str {
        &self.pending
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
