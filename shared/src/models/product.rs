//! Product Model
//!
//! [`RawProduct`] is the product exactly as the backend sends it. Different
//! backend versions spell the same attribute differently (`id`/`_id`/
//! `productId`, `barcode`/`barCode`, `quantity`/`qty`/`stock`, ...), so every
//! attribute is kept as an optional JSON value and resolved through the
//! accessor methods. Nothing outside the catalog boundary should read these
//! fields directly.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::util::{now_millis, value_to_count, value_to_decimal, value_to_text};

/// Product entity as returned by `GET /api/products`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawProduct {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default, rename = "_id")]
    pub mongo_id: Option<Value>,
    #[serde(default, rename = "productId")]
    pub product_id: Option<Value>,
    #[serde(default, rename = "product_id")]
    pub product_id_snake: Option<Value>,

    #[serde(default)]
    pub barcode: Option<Value>,
    #[serde(default)]
    pub bracode: Option<Value>,
    #[serde(default, rename = "barCode")]
    pub bar_code: Option<Value>,

    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default, rename = "productName")]
    pub product_name: Option<Value>,
    #[serde(default)]
    pub title: Option<Value>,

    #[serde(default)]
    pub category: Option<Value>,
    #[serde(default, rename = "categoryName")]
    pub category_name: Option<Value>,

    #[serde(default)]
    pub quantity: Option<Value>,
    #[serde(default)]
    pub qty: Option<Value>,
    #[serde(default)]
    pub stock: Option<Value>,

    #[serde(default, rename = "sellingPrice")]
    pub selling_price: Option<Value>,
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub selling: Option<Value>,

    #[serde(default, rename = "costPrice")]
    pub cost_price: Option<Value>,
    #[serde(default)]
    pub cost: Option<Value>,
}

/// First field that is present and not `null`
fn first_present<'a>(candidates: &[&'a Option<Value>]) -> Option<&'a Value> {
    candidates
        .iter()
        .copied()
        .filter_map(|c| c.as_ref())
        .find(|v| !v.is_null())
}

impl RawProduct {
    /// Stable identifier: `id`, `_id`, `productId`, `product_id`, in that order.
    /// Empty strings do not count as an identifier.
    pub fn identifier(&self) -> Option<String> {
        [
            &self.id,
            &self.mongo_id,
            &self.product_id,
            &self.product_id_snake,
        ]
        .into_iter()
        .filter_map(|c| c.as_ref().and_then(value_to_text))
        .find(|s| !s.trim().is_empty())
    }

    /// Barcode text, empty when the product carries none
    pub fn barcode_text(&self) -> String {
        first_present(&[&self.barcode, &self.bracode, &self.bar_code])
            .and_then(value_to_text)
            .map(|s| s.trim().to_string())
            .unwrap_or_default()
    }

    /// Display name, upper-cased
    pub fn display_name(&self) -> String {
        first_present(&[&self.name, &self.product_name, &self.title])
            .and_then(value_to_text)
            .map(|s| s.trim().to_uppercase())
            .unwrap_or_default()
    }

    /// Category, upper-cased
    pub fn category_text(&self) -> String {
        first_present(&[&self.category, &self.category_name])
            .and_then(value_to_text)
            .map(|s| s.trim().to_uppercase())
            .unwrap_or_default()
    }

    /// Units in stock; unreadable or negative counts become 0
    pub fn stock_count(&self) -> u32 {
        first_present(&[&self.quantity, &self.qty, &self.stock])
            .and_then(value_to_count)
            .unwrap_or(0)
    }

    /// Selling price; unreadable or negative prices become 0
    pub fn selling_price_amount(&self) -> Decimal {
        first_present(&[&self.selling_price, &self.price, &self.selling])
            .and_then(value_to_decimal)
            .map(|d| d.max(Decimal::ZERO))
            .unwrap_or(Decimal::ZERO)
    }

    /// Cost price; unreadable or negative prices become 0
    pub fn cost_price_amount(&self) -> Decimal {
        first_present(&[&self.cost_price, &self.cost])
            .and_then(value_to_decimal)
            .map(|d| d.max(Decimal::ZERO))
            .unwrap_or(Decimal::ZERO)
    }
}

/// Product lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductStatus {
    #[default]
    Active,
    Inactive,
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Active => "ACTIVE",
            ProductStatus::Inactive => "INACTIVE",
        }
    }
}

/// Create / update product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub barcode: String,
    pub name: String,
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub cost_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub selling_price: Decimal,
    pub quantity: u32,
    pub purchase_date: Option<chrono::NaiveDate>,
    pub expiry_date: Option<chrono::NaiveDate>,
    pub status: ProductStatus,
}

impl ProductDraft {
    /// Build a draft with normalised text fields.
    ///
    /// Name and category are trimmed and upper-cased. A blank barcode is
    /// replaced by the current millisecond timestamp.
    pub fn new(name: &str, category: &str, barcode: Option<&str>) -> Self {
        let barcode = barcode
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| now_millis().to_string());
        Self {
            barcode,
            name: name.trim().to_uppercase(),
            category: category.trim().to_uppercase(),
            cost_price: Decimal::ZERO,
            selling_price: Decimal::ZERO,
            quantity: 0,
            purchase_date: None,
            expiry_date: None,
            status: ProductStatus::Active,
        }
    }

    pub fn with_prices(mut self, cost_price: Decimal, selling_price: Decimal) -> Self {
        self.cost_price = cost_price.max(Decimal::ZERO);
        self.selling_price = selling_price.max(Decimal::ZERO);
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_dates(
        mut self,
        purchase_date: Option<chrono::NaiveDate>,
        expiry_date: Option<chrono::NaiveDate>,
    ) -> Self {
        self.purchase_date = purchase_date;
        self.expiry_date = expiry_date;
        self
    }
}

/// Update price payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceUpdate {
    #[serde(with = "rust_decimal::serde::float")]
    pub cost_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub selling_price: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    fn raw(value: Value) -> RawProduct {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_identifier_precedence() {
        let p = raw(json!({"_id": "m1", "productId": 7, "barcode": "111"}));
        assert_eq!(p.identifier().as_deref(), Some("m1"));

        let p = raw(json!({"id": null, "productId": 7}));
        assert_eq!(p.identifier().as_deref(), Some("7"));

        let p = raw(json!({"id": "", "product_id": "snake"}));
        assert_eq!(p.identifier().as_deref(), Some("snake"));

        let p = raw(json!({"barcode": "111"}));
        assert_eq!(p.identifier(), None);
    }

    #[test]
    fn test_text_normalisation() {
        let p = raw(json!({"productName": " milk ", "categoryName": "dairy", "barCode": " 42 "}));
        assert_eq!(p.display_name(), "MILK");
        assert_eq!(p.category_text(), "DAIRY");
        assert_eq!(p.barcode_text(), "42");
    }

    #[test]
    fn test_numeric_fallbacks() {
        let p = raw(json!({"stock": "4", "price": "2.50", "cost": 1}));
        assert_eq!(p.stock_count(), 4);
        assert_eq!(p.selling_price_amount(), Decimal::from_str("2.50").unwrap());
        assert_eq!(p.cost_price_amount(), Decimal::from(1));

        let p = raw(json!({"quantity": -2, "sellingPrice": -1}));
        assert_eq!(p.stock_count(), 0);
        assert_eq!(p.selling_price_amount(), Decimal::ZERO);
    }

    #[test]
    fn test_draft_normalises_and_generates_barcode() {
        let draft = ProductDraft::new(" bread ", "bakery ", Some("  "));
        assert_eq!(draft.name, "BREAD");
        assert_eq!(draft.category, "BAKERY");
        assert!(!draft.barcode.is_empty());
        assert!(draft.barcode.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_draft_serializes_camel_case() {
        let draft = ProductDraft::new("tea", "drinks", Some("900"))
            .with_prices(Decimal::from(3), Decimal::from_str("4.5").unwrap())
            .with_quantity(12);
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["barcode"], "900");
        assert_eq!(json["sellingPrice"].as_f64(), Some(4.5));
        assert_eq!(json["quantity"], 12);
        assert_eq!(json["status"], "ACTIVE");
        assert!(json["expiryDate"].is_null());
    }
}
