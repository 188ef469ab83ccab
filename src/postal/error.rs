//! Lookup failure kinds.

use thiserror::Error;

/// Why a PIN code lookup did not yield any post office.
///
/// Every variant is reported to callers as an invalid code; the split only
/// matters for diagnostics.
#[derive(Debug, Error)]
pub enum LookupError {
    /// request could not complete (DNS, connect, timeout, ...)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    HttpStatus(u16),

    /// body is not the JSON shape the service documents
    #[error("malformed response: {message}{}", excerpt(.body))]
    Malformed {
        message: String,
        body: Option<String>,
    },

    /// service answered with a status other than `Success`
    #[error("lookup status [{status}]: {message}")]
    Status { status: String, message: String },

    #[error("lookup succeeded without any post office")]
    NoPostOffices,
}

fn excerpt(body: &Option<String>) -> String {
    match body {
        Some(body) => format!(" (body: {body})"),
        None => String::new(),
    }
}
