use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use thiserror::Error;

/// Minimal, immutable view of an HTTP response carried by a `ServiceError`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseSnapshot {
    status: StatusCode,
    headers: HeaderMap,
}

impl ResponseSnapshot {
    /// Snapshot with the given status and no headers
    #[must_use]
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
        }
    }

    /// Return a snapshot that additionally carries `name: value`
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Status code of the response
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Response headers
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

impl From<&http::response::Parts> for ResponseSnapshot {
    fn from(parts: &http::response::Parts) -> Self {
        Self {
            status: parts.status,
            headers: parts.headers.clone(),
        }
    }
}

/// A response did not carry the status an error kind is bound to
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The response status disagrees with the expected one
    #[error("invalid response status: expected {}, got {}", .expected.as_u16(), .actual.as_u16())]
    StatusMismatch { expected: StatusCode, actual: StatusCode },

    /// No error kind is bound to this status
    #[error("no service error is bound to status {}", .status.as_u16())]
    Unbound { status: StatusCode },
}

/// Check that `response` carries the `expected` status
///
/// Returns the response unchanged on success so constructors can chain it.
///
/// # Errors
///
/// Returns `ValidationError::StatusMismatch` naming both codes when they differ
pub fn validate(response: ResponseSnapshot, expected: StatusCode) -> Result<ResponseSnapshot, ValidationError> {
    if response.status == expected {
        Ok(response)
    } else {
        Err(ValidationError::StatusMismatch {
            expected,
            actual: response.status,
        })
    }
}
