//! Till Sale - sale composition and submission engine
//!
//! A sale session loads a catalog snapshot once, lets the operator build a
//! selection by toggling products or scanning barcodes, and records the
//! selection as one best-effort batch of per-line sale requests.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use till_client::{ClientConfig, Credential, TillClient};
//! use till_sale::SaleSession;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Arc::new(TillClient::new(&ClientConfig::default())?);
//! let session = SaleSession::open(client, Credential::new("token")).await;
//!
//! session.scan("4006381333931\n");
//! let batch = session.confirm().await?;
//! if let Some(summary) = batch.summary() {
//!     eprintln!("{summary}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod catalog;
pub mod error;
pub mod filter;
pub mod resolver;
pub mod selection;
pub mod session;
pub mod submitter;

#[cfg(test)]
mod testing;

pub use backend::SalesBackend;
pub use catalog::{Catalog, CatalogLoad};
pub use error::{SessionError, SubmitError};
pub use filter::CategoryFilter;
pub use resolver::{ResolveResult, ScanBuffer};
pub use selection::{SelectionEntry, SelectionSet};
pub use session::{SaleSession, SessionEvent};
pub use submitter::{BatchResult, SubmissionOutcome, Submitter};
