//! Dashboard overview

use shared::models::{Overview, normalize_products};

use super::TillClient;
use crate::{ClientResult, Credential, HttpClient};

impl<H: HttpClient> TillClient<H> {
    /// Products, sales and the `low-stock/1` listing folded into dashboard figures
    pub async fn overview(&self, credential: &Credential) -> ClientResult<Overview> {
        let (products, sales, out_of_stock) = tokio::try_join!(
            self.list_products(credential),
            self.list_sales(credential),
            self.low_stock(1, credential),
        )?;
        let products = normalize_products(&products);
        Ok(Overview::compute(&products, &sales, out_of_stock.len()))
    }
}
