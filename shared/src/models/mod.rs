//! Data models
//!
//! Shared between the HTTP client, the sale engine and the terminal.

pub mod catalog;
pub mod money;
pub mod overview;
pub mod product;
pub mod report;
pub mod sale;

// Re-exports
pub use catalog::*;
pub use money::{line_amount, sum_amounts};
pub use overview::*;
pub use product::*;
pub use report::*;
pub use sale::*;
