//! Catalog entry: the canonical product shape seen by the sale engine

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::money::line_amount;
use super::product::RawProduct;

/// One sellable product as known to the client at snapshot time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    /// Stable identifier, falls back to the barcode
    pub id: String,
    /// Barcode, possibly empty
    pub barcode: String,
    /// Upper-cased display name
    pub name: String,
    /// Upper-cased category
    pub category: String,
    pub available_quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub selling_price: Decimal,
}

impl CatalogEntry {
    /// Normalise a raw backend product.
    ///
    /// Returns `None` when the product has neither an identifier nor a
    /// barcode, since such an entry could not be referenced by a selection.
    pub fn from_raw(raw: &RawProduct) -> Option<Self> {
        let barcode = raw.barcode_text();
        let id = match raw.identifier() {
            Some(id) => id,
            None if !barcode.is_empty() => barcode.clone(),
            None => return None,
        };
        Some(Self {
            id,
            barcode,
            name: raw.display_name(),
            category: raw.category_text(),
            available_quantity: raw.stock_count(),
            selling_price: raw.selling_price_amount(),
        })
    }

    /// Whether at least one unit can be sold
    pub fn in_stock(&self) -> bool {
        self.available_quantity > 0
    }

    /// Barcode used on the wire; the id stands in when no barcode is set
    pub fn sale_barcode(&self) -> &str {
        if self.barcode.is_empty() {
            &self.id
        } else {
            &self.barcode
        }
    }

    /// Value of the stock on hand at selling price
    pub fn stock_value(&self) -> Decimal {
        line_amount(self.selling_price, self.available_quantity)
    }
}

/// Normalise a backend product listing into catalog entries.
///
/// Backend order is kept. Products that cannot be identified are dropped,
/// and when two products normalise to the same id the first one wins.
pub fn normalize_products(raw: &[RawProduct]) -> Vec<CatalogEntry> {
    let mut seen = HashSet::with_capacity(raw.len());
    let mut entries = Vec::with_capacity(raw.len());
    for (index, product) in raw.iter().enumerate() {
        let Some(entry) = CatalogEntry::from_raw(product) else {
            tracing::warn!(index, "Dropping product without identifier or barcode");
            continue;
        };
        if !seen.insert(entry.id.clone()) {
            tracing::warn!(index, id = %entry.id, "Dropping product with duplicate id");
            continue;
        }
        entries.push(entry);
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    fn entry(value: serde_json::Value) -> Option<CatalogEntry> {
        let raw: RawProduct = serde_json::from_value(value).unwrap();
        CatalogEntry::from_raw(&raw)
    }

    #[test]
    fn test_from_raw_full() {
        let e = entry(json!({
            "id": 3,
            "barcode": "111",
            "name": "Apple",
            "category": "fruit",
            "quantity": 2,
            "sellingPrice": 10.0
        }))
        .unwrap();
        assert_eq!(e.id, "3");
        assert_eq!(e.barcode, "111");
        assert_eq!(e.name, "APPLE");
        assert_eq!(e.category, "FRUIT");
        assert_eq!(e.available_quantity, 2);
        assert_eq!(e.selling_price, Decimal::from(10));
    }

    #[test]
    fn test_from_raw_barcode_fallback_id() {
        let e = entry(json!({"barcode": "222", "stock": 1})).unwrap();
        assert_eq!(e.id, "222");
        assert_eq!(e.sale_barcode(), "222");
        assert_eq!(e.name, "");
    }

    #[test]
    fn test_from_raw_without_any_identifier() {
        assert!(entry(json!({"name": "ghost", "quantity": 4})).is_none());
    }

    #[test]
    fn test_sale_barcode_uses_id_when_blank() {
        let e = entry(json!({"_id": "abc", "quantity": 1})).unwrap();
        assert_eq!(e.barcode, "");
        assert_eq!(e.sale_barcode(), "abc");
    }

    #[test]
    fn test_normalize_products_keeps_order_and_dedupes() {
        let raw: Vec<RawProduct> = serde_json::from_value(json!([
            {"id": "b", "name": "second"},
            {"name": "no id"},
            {"id": "a", "name": "first"},
            {"id": "b", "name": "duplicate"}
        ]))
        .unwrap();
        let entries = normalize_products(&raw);
        let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(entries[0].name, "SECOND");
    }

    #[test]
    fn test_stock_value() {
        let e = entry(json!({"id": "x", "quantity": 3, "price": "1.25"})).unwrap();
        assert_eq!(e.stock_value(), Decimal::from_str("3.75").unwrap());
        assert!(e.in_stock());
    }
}
