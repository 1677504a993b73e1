//! Backend seam used by the engine
//!
//! The engine only needs two calls: the product listing that seeds the
//! catalog snapshot and the per-line sale record. [`TillClient`] provides
//! both over HTTP; tests substitute an in-memory backend.

use async_trait::async_trait;
use shared::models::{RawProduct, SaleLineItem};
use till_client::{ClientResult, Credential, HttpClient, TillClient};

#[async_trait]
pub trait SalesBackend: Send + Sync {
    /// Full product listing
    async fn list_products(&self, credential: &Credential) -> ClientResult<Vec<RawProduct>>;

    /// Record one sale line
    async fn record_sale(&self, item: &SaleLineItem, credential: &Credential) -> ClientResult<()>;
}

#[async_trait]
impl<H: HttpClient> SalesBackend for TillClient<H> {
    async fn list_products(&self, credential: &Credential) -> ClientResult<Vec<RawProduct>> {
        TillClient::list_products(self, credential).await
    }

    async fn record_sale(&self, item: &SaleLineItem, credential: &Credential) -> ClientResult<()> {
        TillClient::record_sale(self, item, credential).await
    }
}
