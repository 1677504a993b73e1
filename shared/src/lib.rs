//! Shared types for the Till workspace
//!
//! Wire models exchanged with the inventory backend, the canonical catalog
//! shape used by the sale engine, response envelopes and error codes.

pub mod error;
pub mod models;
pub mod response;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::ErrorCode;
pub use models::{CatalogEntry, RawProduct, SaleLineItem, SaleRecord};
