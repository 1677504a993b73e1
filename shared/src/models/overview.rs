//! Dashboard overview figures

use rust_decimal::Decimal;
use serde::Serialize;

use super::{CatalogEntry, SaleRecord, money::sum_amounts, sale::units_sold};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    /// Σ units in stock across all products
    pub total_units: u64,
    /// Σ selling price × units in stock
    #[serde(with = "rust_decimal::serde::float")]
    pub stock_value: Decimal,
    /// Σ units over recorded sales
    pub units_sold: u64,
    /// Products at or below the out-of-stock threshold
    pub out_of_stock: usize,
}

impl Overview {
    pub fn compute(products: &[CatalogEntry], sales: &[SaleRecord], out_of_stock: usize) -> Self {
        Self {
            total_units: products
                .iter()
                .map(|p| u64::from(p.available_quantity))
                .sum(),
            stock_value: sum_amounts(products.iter().map(CatalogEntry::stock_value)),
            units_sold: units_sold(sales),
            out_of_stock,
        }
    }
}
