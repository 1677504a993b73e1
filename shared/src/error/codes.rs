//! Unified error codes
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Sale errors
//! - 6xxx: Product / catalog errors
//! - 9xxx: System errors

use std::fmt;

/// Unified error code enum
///
/// Displayed as its number next to operator-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid format
    InvalidFormat = 6,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,

    // ==================== 4xxx: Sale ====================
    /// Confirm pressed with nothing selected
    EmptySelection = 4001,
    /// A sale submission is already in flight
    SaleInProgress = 4002,
    /// Some line items of a sale were rejected
    SalePartiallyFailed = 4003,

    // ==================== 6xxx: Product ====================
    /// Product not found
    ProductNotFound = 6001,
    /// No product carries the scanned barcode
    BarcodeNotFound = 6002,
    /// Product has no stock left
    OutOfStock = 6003,
    /// Selected quantity already equals available stock
    MaxQuantityReached = 6004,
    /// Product catalog could not be loaded
    CatalogUnavailable = 6005,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Network error
    NetworkError = 9003,
    /// Timeout
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidFormat => "Invalid format",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",

            // Sale
            ErrorCode::EmptySelection => "Please select at least one product",
            ErrorCode::SaleInProgress => "A sale is already being processed",
            ErrorCode::SalePartiallyFailed => "Some items of the sale failed",

            // Product
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::BarcodeNotFound => "Product not found with barcode",
            ErrorCode::OutOfStock => "Product is out of stock",
            ErrorCode::MaxQuantityReached => "Maximum available quantity reached",
            ErrorCode::CatalogUnavailable => "Could not load products",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message() {
        assert_eq!(ErrorCode::CatalogUnavailable.message(), "Could not load products");
        assert_eq!(
            ErrorCode::EmptySelection.message(),
            "Please select at least one product"
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ErrorCode::Success), "0");
        assert_eq!(format!("{}", ErrorCode::SalePartiallyFailed), "4003");
    }
}
