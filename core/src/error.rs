//! Error types for the restaurants API client.
//!
//! # Design
//! The service reports failures through an error code in the response
//! envelope. The three codes callers branch on most get dedicated variants;
//! every other code lands in `Service` with the raw code and message kept
//! structured for diagnostics. Transport and codec failures are collapsed
//! into `Communication`, kept strictly apart from service-reported errors.

use thiserror::Error;

/// Service error code for an operation denied due to insufficient
/// authorization.
pub const ERROR_NO_PERMISSION: &str = "no-permission";
/// Service error code for a request payload that failed service-side
/// validation.
pub const ERROR_INVALID_DATA: &str = "invalid-data";
/// Service error code for a service-side fault unrelated to the request.
pub const ERROR_INTERNAL: &str = "internal";

/// Errors returned by `RestaurantsClient` operations.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Network, timeout, or malformed HTTP/JSON. The request may or may not
    /// have reached the service.
    #[error("communication failure: {0}")]
    Communication(String),

    /// The service denied the operation due to insufficient authorization.
    #[error("no permission: {0}")]
    NoPermission(String),

    /// The request payload failed service-side validation.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// A service-side fault unrelated to the request's validity.
    #[error("internal service error: {0}")]
    Internal(String),

    /// Any other service-reported error code, verbatim. The delimited
    /// `code|message` form exists only in the `Display` output; the fields
    /// stay structured.
    #[error("{code}|{message}")]
    Service { code: String, message: String },
}
