//! Error codes shared by the client, the sale engine and the terminal
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Sale errors
//! - 6xxx: Product / catalog errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::ErrorCode;
//!
//! let code = ErrorCode::EmptySelection;
//! assert_eq!(code.code(), 4001);
//! assert_eq!(code.message(), "Please select at least one product");
//! ```

mod codes;
mod http;

pub use codes::ErrorCode;
