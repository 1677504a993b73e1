//! SaleSession - one pending sale at the till
//!
//! Bundles the catalog snapshot, the selection, the category filter, the
//! scan buffer and the in-flight flag. State sits behind a `parking_lot`
//! mutex that is released before any request goes out, so a session can be
//! shared through `Arc` between the input loop and other tasks.
//!
//! # Confirm Flow
//!
//! ```text
//! confirm()
//!     ├─ 1. Claim in-flight flag
//!     ├─ 2. Build line items under the lock
//!     ├─ 3. Dispatch (lock released)
//!     ├─ 4. All succeeded → remove the submitted quantities; reset the
//!     │     filter once the selection is empty
//!     └─ 5. Broadcast SaleCompleted once
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use rust_decimal::Decimal;
use shared::models::{CatalogEntry, line_amount, sum_amounts};
use till_client::Credential;
use tokio::sync::broadcast;

use crate::backend::SalesBackend;
use crate::catalog::{self, Catalog};
use crate::error::{SessionError, SessionResult, SubmitResult};
use crate::filter::{self, CategoryFilter};
use crate::resolver::{self, ResolveResult, ScanBuffer};
use crate::selection::{SelectionEntry, SelectionSet};
use crate::submitter::{self, BatchResult, Submitter};

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Notifications for views that depend on recorded sales
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Every line of a batch was recorded; sales history and stock are stale
    SaleCompleted { lines: usize, total: Decimal },
}

#[derive(Debug, Default)]
struct SessionState {
    catalog: Catalog,
    notice: Option<String>,
    selection: SelectionSet,
    filter: CategoryFilter,
    scan: ScanBuffer,
}

impl SessionState {
    fn reset(&mut self) {
        self.selection.clear();
        self.filter = CategoryFilter::All;
        self.scan.clear();
    }

    /// Remove a recorded batch. The sale view resets only once nothing
    /// selected is left over.
    fn settle(&mut self, recorded: &[SelectionEntry]) {
        self.selection.settle(recorded);
        if self.selection.is_empty() {
            self.reset();
        }
    }
}

pub struct SaleSession<B> {
    backend: Arc<B>,
    credential: Credential,
    state: Mutex<SessionState>,
    submitter: Submitter,
    event_tx: broadcast::Sender<SessionEvent>,
}

impl<B> std::fmt::Debug for SaleSession<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SaleSession")
            .field("credential", &self.credential)
            .field("state", &*self.state.lock())
            .field("in_flight", &self.submitter.is_in_flight())
            .finish()
    }
}

impl<B: SalesBackend> SaleSession<B> {
    /// Open a session and load its catalog snapshot
    pub async fn open(backend: Arc<B>, credential: Credential) -> Self {
        let load = catalog::load(backend.as_ref(), &credential).await;
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        tracing::info!(
            products = load.catalog.len(),
            degraded = load.is_degraded(),
            "Sale session opened"
        );
        Self {
            backend,
            credential,
            state: Mutex::new(SessionState {
                catalog: load.catalog,
                notice: load.notice,
                ..SessionState::default()
            }),
            submitter: Submitter::new(),
            event_tx,
        }
    }

    /// Fetch a fresh snapshot. Selected ids missing from it are dropped and
    /// quantities are clamped to the new stock.
    pub async fn reload(&self) {
        let load = catalog::load(self.backend.as_ref(), &self.credential).await;
        let mut state = self.state.lock();
        let previous = std::mem::take(&mut state.selection);
        for selected in previous.entries() {
            let Some(entry) = load.catalog.get(&selected.catalog_entry_id) else {
                continue;
            };
            if !entry.in_stock() {
                continue;
            }
            state.selection.insert(&entry.id);
            state.selection.set_quantity(
                &entry.id,
                &selected.quantity.to_string(),
                entry.available_quantity,
            );
        }
        state.catalog = load.catalog;
        state.notice = load.notice;
    }

    /// Load notice, e.g. "Could not load products"
    pub fn notice(&self) -> Option<String> {
        self.state.lock().notice.clone()
    }

    pub fn catalog(&self) -> Catalog {
        self.state.lock().catalog.clone()
    }

    /// Entries passing the current category filter
    pub fn visible_entries(&self) -> Vec<CatalogEntry> {
        let state = self.state.lock();
        filter::visible_entries(&state.catalog, &state.filter)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn categories(&self) -> Vec<String> {
        filter::categories(&self.state.lock().catalog)
    }

    pub fn filter(&self) -> CategoryFilter {
        self.state.lock().filter.clone()
    }

    pub fn set_filter(&self, filter: CategoryFilter) {
        self.state.lock().filter = filter;
    }

    /// Current selection, in submission order
    pub fn selection(&self) -> Vec<SelectionEntry> {
        self.state.lock().selection.entries().to_vec()
    }

    /// Σ price × quantity of the pending selection at snapshot prices
    pub fn pending_total(&self) -> Decimal {
        let state = self.state.lock();
        sum_amounts(state.selection.entries().iter().filter_map(|s| {
            state
                .catalog
                .get(&s.catalog_entry_id)
                .map(|e| line_amount(e.selling_price, s.quantity))
        }))
    }

    /// Select or deselect a catalog entry.
    ///
    /// Out-of-stock entries cannot be selected. Returns whether `id` is
    /// selected afterwards.
    pub fn toggle(&self, id: &str) -> SessionResult<bool> {
        let mut state = self.state.lock();
        let entry = state
            .catalog
            .get(id)
            .ok_or_else(|| SessionError::UnknownProduct(id.to_string()))?;
        if !state.selection.contains(id) && !entry.in_stock() {
            return Err(SessionError::OutOfStock(entry.name.clone()));
        }
        Ok(state.selection.toggle(id))
    }

    /// Set a selected entry's quantity from operator text, bounded by stock
    pub fn set_quantity(&self, id: &str, requested: &str) -> SessionResult<u32> {
        let mut state = self.state.lock();
        let max_stock = state
            .catalog
            .get(id)
            .map(|e| e.available_quantity)
            .ok_or_else(|| SessionError::UnknownProduct(id.to_string()))?;
        state
            .selection
            .set_quantity(id, requested, max_stock)
            .ok_or_else(|| SessionError::NotSelected(id.to_string()))
    }

    /// Feed raw scan-gun input; every completed line is resolved in order
    pub fn scan(&self, input: &str) -> Vec<ResolveResult> {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        state
            .scan
            .push(input)
            .into_iter()
            .map(|line| resolver::resolve(&line, &state.catalog, &mut state.selection))
            .collect()
    }

    /// Resolve a barcode typed and confirmed by hand.
    ///
    /// The pending input is cleared when the selection changed.
    pub fn resolve_barcode(&self, text: &str) -> ResolveResult {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        let result = resolver::resolve(text, &state.catalog, &mut state.selection);
        if result.is_applied() {
            state.scan.clear();
        }
        result
    }

    /// Text typed since the last line end
    pub fn pending_input(&self) -> String {
        self.state.lock().scan.pending().to_string()
    }

    /// Drop the pending sale without contacting the backend
    pub fn cancel(&self) {
        self.state.lock().reset();
        tracing::debug!("Sale cancelled");
    }

    pub fn is_submitting(&self) -> bool {
        self.submitter.is_in_flight()
    }

    /// Submit the selection as one best-effort batch.
    ///
    /// On full success the submitted quantities leave the selection and one
    /// [`SessionEvent::SaleCompleted`] is broadcast. Products selected while
    /// the batch was in flight stay selected. Otherwise the selection is
    /// left as it was so failed lines can be retried.
    pub async fn confirm(&self) -> SubmitResult<BatchResult> {
        let _guard = self.submitter.begin()?;
        let (submitted, items) = {
            let state = self.state.lock();
            let items = submitter::build_line_items(&state.selection, &state.catalog)?;
            (state.selection.entries().to_vec(), items)
        };

        let batch = submitter::dispatch(self.backend.as_ref(), &self.credential, items).await;

        if batch.is_success() {
            self.state.lock().settle(&submitted);
            let event = SessionEvent::SaleCompleted {
                lines: batch.items().len(),
                total: batch.total(),
            };
            if self.event_tx.send(event).is_err() {
                tracing::debug!("No subscribers for sale completion");
            }
        } else if let Some(summary) = batch.summary() {
            tracing::warn!(%summary, "Sale partially failed");
        }
        Ok(batch)
    }

    /// Subscribe to session events
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.event_tx.subscribe()
    }
}
