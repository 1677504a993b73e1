//! Till Client - HTTP client for the inventory backend
//!
//! Provides network-based calls to the inventory REST API. Every call that
//! needs authentication takes an explicit [`Credential`]; the client never
//! reads tokens from ambient state.

pub mod api;
pub mod config;
pub mod credential;
pub mod error;
pub mod http;

pub use api::TillClient;
pub use api::reports::{DateRange, Report};
pub use config::ClientConfig;
pub use credential::{Credential, CredentialStorage};
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, NetworkHttpClient};
