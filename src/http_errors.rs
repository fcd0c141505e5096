// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! HTTP error code mapping to stable failure reasons.
//!
//! This module maps HTTP status codes returned by the SparkPost API, and
//! transport failures that never produced a status code, to short CamelCase
//! reasons. The reasons appear in [`crate::errors::ProviderError`] messages and
//! in structured log fields so operators can filter on them.
//!
//! # Usage
//!
//! ```rust
//! use sparkpost_provider::http_errors::map_http_error_to_reason;
//!
//! let (reason, message) = map_http_error_to_reason(401);
//! assert_eq!(reason, "AuthFailed");
//!
//! let (reason, message) = map_http_error_to_reason(429);
//! assert_eq!(reason, "RateLimited");
//! ```

/// The request body or parameters were rejected.
pub const REASON_BAD_REQUEST: &str = "BadRequest";

/// The API key is missing or invalid.
pub const REASON_AUTH_FAILED: &str = "AuthFailed";

/// The API key lacks the grant required for the endpoint.
pub const REASON_FORBIDDEN: &str = "Forbidden";

/// The addressed remote object does not exist.
pub const REASON_NOT_FOUND: &str = "NotFound";

/// The request conflicts with an existing remote object.
pub const REASON_CONFLICT: &str = "Conflict";

/// The remote service understood the request but refused its content.
pub const REASON_UNPROCESSABLE: &str = "Unprocessable";

/// The account hit a rate or sending limit.
pub const REASON_RATE_LIMITED: &str = "RateLimited";

/// The remote service failed internally.
pub const REASON_REMOTE_INTERNAL_ERROR: &str = "RemoteInternalError";

/// A gateway in front of the remote service failed or timed out.
pub const REASON_GATEWAY_ERROR: &str = "GatewayError";

/// The status code is outside the documented set.
pub const REASON_UNEXPECTED_STATUS: &str = "UnexpectedStatus";

/// A successful response did not carry the remote identity.
pub const REASON_MISSING_IDENTITY: &str = "MissingIdentity";

/// The request did not complete within the configured timeout.
pub const REASON_REQUEST_TIMEOUT: &str = "RequestTimeout";

/// No connection to the remote service could be established.
pub const REASON_UNREACHABLE: &str = "Unreachable";

/// The response body could not be read or decoded.
pub const REASON_INVALID_RESPONSE: &str = "InvalidResponse";

/// Map HTTP status code to failure reason and message.
///
/// # Arguments
///
/// * `status_code` - HTTP status code (e.g., 400, 404, 500)
///
/// # Returns
///
/// A tuple of `(reason, message)`.
///
/// # HTTP Code Mapping
///
/// | HTTP Code | Reason | Meaning |
/// |-----------|--------|---------|
/// | 400 | `BadRequest` | Invalid request format |
/// | 401 | `AuthFailed` | API key missing or invalid |
/// | 403 | `Forbidden` | API key lacks the grant |
/// | 404 | `NotFound` | Remote object not found |
/// | 409 | `Conflict` | Object already exists |
/// | 422 | `Unprocessable` | Semantically invalid request |
/// | 420, 429 | `RateLimited` | Rate or sending limit |
/// | 500 | `RemoteInternalError` | Internal server error |
/// | 502, 503, 504 | `GatewayError` | Gateway failure |
/// | Other | `UnexpectedStatus` | Unexpected status |
#[must_use]
pub fn map_http_error_to_reason(status_code: u16) -> (&'static str, String) {
    match status_code {
        400 => (
            REASON_BAD_REQUEST,
            "Invalid request to SparkPost API (400)".into(),
        ),
        401 => (
            REASON_AUTH_FAILED,
            "SparkPost API key missing or invalid (401)".into(),
        ),
        403 => (
            REASON_FORBIDDEN,
            "SparkPost API key lacks the required grant (403)".into(),
        ),
        404 => (
            REASON_NOT_FOUND,
            "Resource not found in SparkPost (404)".into(),
        ),
        409 => (
            REASON_CONFLICT,
            "Resource conflicts with an existing SparkPost object (409)".into(),
        ),
        422 => (
            REASON_UNPROCESSABLE,
            "SparkPost refused the request content (422)".into(),
        ),
        420 | 429 => (
            REASON_RATE_LIMITED,
            format!("SparkPost rate limit exceeded ({status_code})"),
        ),
        500 => (
            REASON_REMOTE_INTERNAL_ERROR,
            "SparkPost API internal error (500)".into(),
        ),
        502 => (
            REASON_GATEWAY_ERROR,
            "Bad gateway reaching SparkPost (502)".into(),
        ),
        503 => (
            REASON_GATEWAY_ERROR,
            "SparkPost service unavailable (503)".into(),
        ),
        504 => (
            REASON_GATEWAY_ERROR,
            "Gateway timeout reaching SparkPost (504)".into(),
        ),
        _ => (
            REASON_UNEXPECTED_STATUS,
            format!("Unexpected HTTP status from SparkPost ({status_code})"),
        ),
    }
}

/// Map a transport failure to a failure reason.
///
/// Use this when the request never produced an HTTP status, or the body of a
/// response could not be read.
#[must_use]
pub fn map_transport_error(err: &reqwest::Error) -> &'static str {
    if err.is_timeout() {
        REASON_REQUEST_TIMEOUT
    } else if err.is_connect() {
        REASON_UNREACHABLE
    } else if err.is_decode() || err.is_body() {
        REASON_INVALID_RESPONSE
    } else {
        REASON_UNREACHABLE
    }
}
