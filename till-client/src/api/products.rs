//! Product API

use serde_json::Value;
use shared::models::{PriceUpdate, ProductDraft, ProductStatus, RawProduct};
use shared::response::list_items;

use super::{TillClient, endpoint};
use crate::{ClientError, ClientResult, Credential, HttpClient};

/// Decode a product listing body, skipping items that are not objects
pub(crate) fn decode_products(body: Value) -> ClientResult<Vec<RawProduct>> {
    let items = list_items(body)
        .ok_or_else(|| ClientError::InvalidResponse("product list is not an array".into()))?;

    Ok(items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(product) => Some(product),
            Err(e) => {
                tracing::warn!(index, error = %e, "Skipping malformed product");
                None
            }
        })
        .collect())
}

impl<H: HttpClient> TillClient<H> {
    /// `GET /api/products`
    pub async fn list_products(&self, credential: &Credential) -> ClientResult<Vec<RawProduct>> {
        let body: Value = self.http().get("api/products", Some(credential)).await?;
        decode_products(body)
    }

    /// `GET /api/products/low-stock/{threshold}`: products with quantity ≤ threshold
    pub async fn low_stock(
        &self,
        threshold: u32,
        credential: &Credential,
    ) -> ClientResult<Vec<RawProduct>> {
        let path = format!("api/products/low-stock/{threshold}");
        let body: Value = self.http().get(&path, Some(credential)).await?;
        decode_products(body)
    }

    /// `POST /api/products`
    pub async fn create_product(
        &self,
        draft: &ProductDraft,
        credential: &Credential,
    ) -> ClientResult<()> {
        let _: Value = self
            .http()
            .post("api/products", draft, Some(credential))
            .await?;
        tracing::info!(barcode = %draft.barcode, "Product created");
        Ok(())
    }

    /// `PUT /api/products/{id}`
    pub async fn update_product(
        &self,
        id: &str,
        draft: &ProductDraft,
        credential: &Credential,
    ) -> ClientResult<()> {
        let path = endpoint(&["api", "products", id]);
        let _: Value = self.http().put(&path, draft, Some(credential)).await?;
        Ok(())
    }

    /// `PUT /api/products/{id}/quantity?quantity=n`
    pub async fn update_quantity(
        &self,
        id: &str,
        quantity: u32,
        credential: &Credential,
    ) -> ClientResult<()> {
        let path = format!(
            "{}?quantity={quantity}",
            endpoint(&["api", "products", id, "quantity"])
        );
        let _: Value = self.http().put_empty(&path, Some(credential)).await?;
        Ok(())
    }

    /// `PUT /api/products/{id}/price`
    pub async fn update_price(
        &self,
        id: &str,
        prices: &PriceUpdate,
        credential: &Credential,
    ) -> ClientResult<()> {
        let path = endpoint(&["api", "products", id, "price"]);
        let _: Value = self.http().put(&path, prices, Some(credential)).await?;
        Ok(())
    }

    /// `PUT /api/products/{id}/status?status=S`
    pub async fn update_status(
        &self,
        id: &str,
        status: ProductStatus,
        credential: &Credential,
    ) -> ClientResult<()> {
        let path = format!(
            "{}?status={}",
            endpoint(&["api", "products", id, "status"]),
            status.as_str()
        );
        let _: Value = self.http().put_empty(&path, Some(credential)).await?;
        Ok(())
    }

    /// `DELETE /api/products/{id}`
    pub async fn delete_product(&self, id: &str, credential: &Credential) -> ClientResult<()> {
        let path = endpoint(&["api", "products", id]);
        let _: Value = self.http().delete(&path, Some(credential)).await?;
        tracing::info!(id, "Product deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_products_skips_non_objects() {
        let products = decode_products(json!({"data": [{"id": "a"}, 5, {"id": "b"}]})).unwrap();
        assert_eq!(products.len(), 2);
    }

    #[test]
    fn test_decode_products_rejects_non_array() {
        let err = decode_products(json!({"data": {"id": "a"}})).unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponse(_)));
    }
}
