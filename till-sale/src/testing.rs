//! In-memory backend for engine tests

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use serde_json::json;
use shared::models::{CatalogEntry, RawProduct, SaleLineItem};
use till_client::{ClientError, ClientResult, Credential};
use tokio::sync::Notify;

use crate::backend::SalesBackend;

pub(crate) fn entry(id: &str, barcode: &str, category: &str, stock: u32, price: &str) -> CatalogEntry {
    CatalogEntry {
        id: id.to_string(),
        barcode: barcode.to_string(),
        name: id.to_string(),
        category: category.to_string(),
        available_quantity: stock,
        selling_price: Decimal::from_str(price).unwrap(),
    }
}

pub(crate) fn raw_product(id: &str, barcode: &str, category: &str, stock: u32, price: &str) -> RawProduct {
    serde_json::from_value(json!({
        "id": id,
        "barcode": barcode,
        "name": id,
        "category": category,
        "quantity": stock,
        "sellingPrice": price,
    }))
    .unwrap()
}

struct Gate {
    started: Notify,
    release: Notify,
}

/// Records every sale line; product listing and per-barcode failures are scripted
#[derive(Default)]
pub(crate) struct MockBackend {
    products: Mutex<Option<Vec<RawProduct>>>,
    failures: HashMap<String, String>,
    recorded: Mutex<Vec<SaleLineItem>>,
    calls: AtomicUsize,
    gate: Option<Arc<Gate>>,
}

impl MockBackend {
    pub(crate) fn with_products(products: Vec<RawProduct>) -> Self {
        Self {
            products: Mutex::new(Some(products)),
            ..Self::default()
        }
    }

    /// Product listing fails
    pub(crate) fn unavailable() -> Self {
        Self::default()
    }

    pub(crate) fn fail_barcode(mut self, barcode: &str, message: &str) -> Self {
        self.failures.insert(barcode.to_string(), message.to_string());
        self
    }

    /// Sale calls block until [`MockBackend::release`]
    pub(crate) fn gated(mut self) -> Self {
        self.gate = Some(Arc::new(Gate {
            started: Notify::new(),
            release: Notify::new(),
        }));
        self
    }

    pub(crate) fn started(&self) -> &Notify {
        match &self.gate {
            Some(gate) => &gate.started,
            None => panic!("backend is not gated"),
        }
    }

    pub(crate) fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.release.notify_one();
        }
    }

    pub(crate) fn set_products(&self, products: Vec<RawProduct>) {
        *self.products.lock() = Some(products);
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn recorded(&self) -> Vec<SaleLineItem> {
        self.recorded.lock().clone()
    }
}

#[async_trait]
impl SalesBackend for MockBackend {
    async fn list_products(&self, _credential: &Credential) -> ClientResult<Vec<RawProduct>> {
        self.products
            .lock()
            .clone()
            .ok_or_else(|| ClientError::InvalidResponse("product list is not an array".into()))
    }

    async fn record_sale(&self, item: &SaleLineItem, _credential: &Credential) -> ClientResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.started.notify_one();
            gate.release.notified().await;
        }
        if let Some(message) = self.failures.get(&item.barcode) {
            return Err(ClientError::Api {
                status: 400,
                message: message.clone(),
            });
        }
        self.recorded.lock().push(item.clone());
        Ok(())
    }
}
