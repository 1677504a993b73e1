//! Sale submitter
//!
//! Turns the selection into line items and records them one request at a
//! time. The batch is best-effort: a failed line does not stop the lines
//! after it, and every outcome is kept for the summary.
//!
//! ```text
//! submit(selection, catalog)
//!     ├─ 1. In-flight guard (second caller gets AlreadySubmitting)
//!     ├─ 2. Empty selection check
//!     ├─ 3. Build every line item from the snapshot
//!     ├─ 4. POST each line in selection order
//!     └─ 5. Fold outcomes into a BatchResult
//! ```

use std::sync::atomic::{AtomicBool, Ordering};

use futures::StreamExt;
use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::{SaleLineItem, sum_amounts};
use till_client::Credential;

use crate::backend::SalesBackend;
use crate::catalog::Catalog;
use crate::error::{SubmitError, SubmitResult};
use crate::selection::SelectionSet;

/// Result of recording one line item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionOutcome {
    pub barcode: String,
    pub succeeded: bool,
    /// Present iff the line failed
    pub failure_message: Option<String>,
}

impl SubmissionOutcome {
    fn success(barcode: &str) -> Self {
        Self {
            barcode: barcode.to_string(),
            succeeded: true,
            failure_message: None,
        }
    }

    fn failure(barcode: &str, message: String) -> Self {
        Self {
            barcode: barcode.to_string(),
            succeeded: false,
            failure_message: Some(message),
        }
    }
}

/// Outcome of a whole submission, one entry per line item in dispatch order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchResult {
    items: Vec<SaleLineItem>,
    outcomes: Vec<SubmissionOutcome>,
}

impl BatchResult {
    pub fn items(&self) -> &[SaleLineItem] {
        &self.items
    }

    pub fn outcomes(&self) -> &[SubmissionOutcome] {
        &self.outcomes
    }

    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|o| o.succeeded)
    }

    pub fn succeeded_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.succeeded).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &SubmissionOutcome> {
        self.outcomes.iter().filter(|o| !o.succeeded)
    }

    /// `"{n} item(s) failed: {barcode}: {message}; ..."`, or `None` when all succeeded
    pub fn summary(&self) -> Option<String> {
        let failures: Vec<String> = self
            .failures()
            .map(|o| {
                format!(
                    "{}: {}",
                    o.barcode,
                    o.failure_message.as_deref().unwrap_or_default()
                )
            })
            .collect();
        if failures.is_empty() {
            return None;
        }
        Some(format!(
            "{} item(s) failed: {}",
            failures.len(),
            failures.join("; ")
        ))
    }

    /// Σ price × quantity over lines that were recorded
    pub fn total(&self) -> Decimal {
        sum_amounts(
            self.items
                .iter()
                .zip(&self.outcomes)
                .filter(|(_, o)| o.succeeded)
                .map(|(item, _)| item.line_total()),
        )
    }
}

/// Build the line items for a selection, in selection order.
///
/// Quantity comes from the selection, barcode and price from the snapshot.
/// Fails before anything is sent if a selected id has no catalog entry.
pub fn build_line_items(
    selection: &SelectionSet,
    catalog: &Catalog,
) -> SubmitResult<Vec<SaleLineItem>> {
    if selection.is_empty() {
        return Err(SubmitError::EmptySelection);
    }
    selection
        .entries()
        .iter()
        .map(|selected| {
            let entry = catalog
                .get(&selected.catalog_entry_id)
                .ok_or_else(|| SubmitError::UnknownProduct(selected.catalog_entry_id.clone()))?;
            Ok(SaleLineItem::new(
                entry.sale_barcode(),
                selected.quantity,
                entry.selling_price,
            ))
        })
        .collect()
}

/// Record each line item sequentially and collect the outcomes
pub async fn dispatch<B>(backend: &B, credential: &Credential, items: Vec<SaleLineItem>) -> BatchResult
where
    B: SalesBackend + ?Sized,
{
    let outcomes: Vec<SubmissionOutcome> = futures::stream::iter(items.iter())
        .then(|item| async move {
            match backend.record_sale(item, credential).await {
                Ok(()) => SubmissionOutcome::success(&item.barcode),
                Err(e) => {
                    let message = e.user_message();
                    tracing::warn!(barcode = %item.barcode, error = %message, "Sale line failed");
                    SubmissionOutcome::failure(&item.barcode, message)
                }
            }
        })
        .collect()
        .await;

    let batch = BatchResult { items, outcomes };
    tracing::info!(
        lines = batch.items.len(),
        succeeded = batch.succeeded_count(),
        total = %batch.total(),
        "Sale batch dispatched"
    );
    batch
}

/// Single-flight gate around submission
#[derive(Debug, Default)]
pub struct Submitter {
    in_flight: AtomicBool,
}

/// Holds the in-flight flag until dropped
#[derive(Debug)]
pub struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl Submitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Claim the in-flight flag
    pub fn begin(&self) -> SubmitResult<InFlightGuard<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| SubmitError::AlreadySubmitting)?;
        Ok(InFlightGuard {
            flag: &self.in_flight,
        })
    }

    /// Build and dispatch the selection as one batch
    pub async fn submit<B>(
        &self,
        backend: &B,
        credential: &Credential,
        selection: &SelectionSet,
        catalog: &Catalog,
    ) -> SubmitResult<BatchResult>
    where
        B: SalesBackend + ?Sized,
    {
        let _guard = self.begin()?;
        let items = build_line_items(selection, catalog)?;
        Ok(dispatch(backend, credential, items).await)
    }
}
