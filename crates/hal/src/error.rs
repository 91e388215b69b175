//! Common error type for backend operations.

use thiserror::Error;

/// Errors reported by controller and pin-mux backends.
///
/// Backends translate their register-level failures into these variants;
/// the engines propagate them unchanged to the requesting driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HalError {
    /// Invalid parameter provided
    #[error("invalid parameter")]
    InvalidParameter,
    /// Operation not supported by this backend
    #[error("operation not supported")]
    NotSupported,
    /// Resource is busy
    #[error("resource busy")]
    Busy,
    /// Hardware error occurred
    #[error("hardware error")]
    HardwareError,
    /// Vendor-specific error code
    #[error("vendor error code: {0}")]
    VendorError(i32),
}

/// Result type for backend operations.
pub type HalResult<T> = Result<T, HalError>;
