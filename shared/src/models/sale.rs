//! Sale models
//!
//! A sale is recorded one line at a time: every `POST /api/sales` carries a
//! single [`SaleLineItem`]. [`SaleRecord`] is what the history endpoints
//! return for each recorded line.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::money::{line_amount, sum_amounts};
use crate::util::{value_to_count, value_to_decimal, value_to_text};

/// One product-and-quantity pair submitted as an independent sale record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleLineItem {
    pub barcode: String,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub selling_price: Decimal,
}

impl SaleLineItem {
    pub fn new(barcode: impl Into<String>, quantity: u32, selling_price: Decimal) -> Self {
        Self {
            barcode: barcode.into(),
            quantity,
            selling_price,
        }
    }

    /// Price × quantity
    pub fn line_total(&self) -> Decimal {
        line_amount(self.selling_price, self.quantity)
    }
}

fn de_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<Value>::deserialize(d)?.as_ref().and_then(value_to_text))
}

fn de_count<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    Ok(Option::<Value>::deserialize(d)?
        .as_ref()
        .and_then(value_to_count)
        .unwrap_or(0))
}

fn de_amount<'de, D: Deserializer<'de>>(d: D) -> Result<Decimal, D::Error> {
    Ok(Option::<Value>::deserialize(d)?
        .as_ref()
        .and_then(value_to_decimal)
        .unwrap_or(Decimal::ZERO))
}

/// A recorded sale line as listed by `GET /api/sales`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    #[serde(default, deserialize_with = "de_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "de_text")]
    pub barcode: Option<String>,
    #[serde(default, alias = "productName", deserialize_with = "de_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de_count")]
    pub quantity: u32,
    #[serde(
        default,
        deserialize_with = "de_amount",
        serialize_with = "rust_decimal::serde::float::serialize"
    )]
    pub selling_price: Decimal,
    #[serde(default, alias = "date", alias = "createdAt", deserialize_with = "de_text")]
    pub sale_date: Option<String>,
}

impl SaleRecord {
    pub fn line_total(&self) -> Decimal {
        line_amount(self.selling_price, self.quantity)
    }
}

/// Σ sellingPrice × quantity, rounded to two decimals
pub fn sales_total(records: &[SaleRecord]) -> Decimal {
    sum_amounts(records.iter().map(SaleRecord::line_total))
}

/// Σ quantity over a sales listing
pub fn units_sold(records: &[SaleRecord]) -> u64 {
    records.iter().map(|r| u64::from(r.quantity)).sum()
}
