//! Sales API

use chrono::NaiveDate;
use serde_json::Value;
use shared::models::{SaleLineItem, SaleRecord};
use shared::response::list_items;

use super::{TillClient, endpoint};
use super::reports::DateRange;
use crate::{ClientError, ClientResult, Credential, HttpClient};

fn decode_sales(body: Value) -> ClientResult<Vec<SaleRecord>> {
    let items = list_items(body)
        .ok_or_else(|| ClientError::InvalidResponse("sales list is not an array".into()))?;
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

impl<H: HttpClient> TillClient<H> {
    /// `POST /api/sales`: records one line item
    pub async fn record_sale(&self, item: &SaleLineItem, credential: &Credential) -> ClientResult<()> {
        let _: Value = self.http().post("api/sales", item, Some(credential)).await?;
        tracing::debug!(barcode = %item.barcode, quantity = item.quantity, "Sale line recorded");
        Ok(())
    }

    /// `GET /api/sales`
    pub async fn list_sales(&self, credential: &Credential) -> ClientResult<Vec<SaleRecord>> {
        let body: Value = self.http().get("api/sales", Some(credential)).await?;
        decode_sales(body)
    }

    /// `GET /api/sales/date/{date}`
    pub async fn sales_on(
        &self,
        date: NaiveDate,
        credential: &Credential,
    ) -> ClientResult<Vec<SaleRecord>> {
        let path = format!("api/sales/date/{}", date.format("%Y-%m-%d"));
        let body: Value = self.http().get(&path, Some(credential)).await?;
        decode_sales(body)
    }

    /// `GET /api/sales/date-range`. An unbounded range lists everything.
    pub async fn sales_between(
        &self,
        range: &DateRange,
        credential: &Credential,
    ) -> ClientResult<Vec<SaleRecord>> {
        if range.is_unbounded() {
            return self.list_sales(credential).await;
        }
        let body: Value = self
            .http()
            .get_with_query("api/sales/date-range", &range.query(), Some(credential))
            .await?;
        decode_sales(body)
    }

    /// `DELETE /api/sales/{id}`
    pub async fn delete_sale(&self, id: &str, credential: &Credential) -> ClientResult<()> {
        let path = endpoint(&["api", "sales", id]);
        let _: Value = self.http().delete(&path, Some(credential)).await?;
        tracing::info!(id, "Sale deleted");
        Ok(())
    }
}
