use std::error::Error as StdError;
use std::fmt;

use http::StatusCode;

use crate::{ErrorFamily, HttpError, ResponseSnapshot, ServiceErrorKind, ValidationError, validate};

type Cause = Box<dyn StdError + Send + Sync + 'static>;

/// A failure whose category, and therefore status code, is known when raised
///
/// Constructors taking a `ResponseSnapshot` check that its status matches the
/// kind's bound status. Constructors without one never validate; the bound
/// status is implied.
#[derive(Debug)]
pub struct ServiceError {
    kind: ServiceErrorKind,
    message: Option<String>,
    response: Option<ResponseSnapshot>,
    cause: Option<Cause>,
}

impl ServiceError {
    /// Error of `kind` with no message, response or cause
    #[must_use]
    pub const fn new(kind: ServiceErrorKind) -> Self {
        Self {
            kind,
            message: None,
            response: None,
            cause: None,
        }
    }

    /// Error of `kind` with a detail message
    #[must_use]
    pub fn with_message(kind: ServiceErrorKind, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::new(kind)
        }
    }

    /// Error of `kind` carrying `response`
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::StatusMismatch` if the response status is not
    /// the one `kind` is bound to
    pub fn from_response(kind: ServiceErrorKind, response: ResponseSnapshot) -> Result<Self, ValidationError> {
        let response = validate(response, kind.status())?;
        Ok(Self {
            response: Some(response),
            ..Self::new(kind)
        })
    }

    /// Error of `kind` carrying a detail message and `response`
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::StatusMismatch` if the response status is not
    /// the one `kind` is bound to
    pub fn from_response_with_message(
        kind: ServiceErrorKind,
        message: impl Into<String>,
        response: ResponseSnapshot,
    ) -> Result<Self, ValidationError> {
        let mut error = Self::from_response(kind, response)?;
        error.message = Some(message.into());
        Ok(error)
    }

    /// Error for whichever kind is bound to the response's status
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::Unbound` if no kind is bound to the status
    pub fn from_status(response: ResponseSnapshot) -> Result<Self, ValidationError> {
        let status = response.status();
        let kind = ServiceErrorKind::from_status(status).ok_or(ValidationError::Unbound { status })?;
        Self::from_response(kind, response)
    }

    /// Attach the underlying cause
    #[must_use]
    pub fn with_cause(mut self, cause: impl Into<Cause>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    pub const fn kind(&self) -> ServiceErrorKind {
        self.kind
    }

    pub const fn family(&self) -> ErrorFamily {
        self.kind.family()
    }

    /// The bound status, regardless of whether a response is attached
    pub const fn status(&self) -> StatusCode {
        self.kind.status()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub const fn response(&self) -> Option<&ResponseSnapshot> {
        self.response.as_ref()
    }

    pub fn cause(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// `HTTP 504 Gateway Timeout`
    fn default_message(&self) -> String {
        let status = self.status();
        format!("HTTP {} {}", status.as_u16(), status.canonical_reason().unwrap_or_default())
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message {
            Some(ref message) => f.write_str(message),
            None => f.write_str(&self.default_message()),
        }
    }
}

impl StdError for ServiceError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause.as_deref().map(|cause| cause as &(dyn StdError + 'static))
    }
}

impl From<ServiceErrorKind> for ServiceError {
    fn from(kind: ServiceErrorKind) -> Self {
        Self::new(kind)
    }
}

impl HttpError for ServiceError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_type(&self) -> &str {
        self.kind.as_str()
    }

    fn client_message(&self) -> String {
        match self.family() {
            ErrorFamily::Client => self.to_string(),
            ErrorFamily::Server => self.default_message(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_accepts_its_own_status() {
        for kind in ServiceErrorKind::ALL {
            let response = ResponseSnapshot::new(kind.status());

            let error = ServiceError::from_response(kind, response.clone()).unwrap();

            assert_eq!(error.response(), Some(&response));
            assert_eq!(error.status(), kind.status());
        }
    }

    #[test]
    fn every_kind_rejects_foreign_statuses() {
        for kind in ServiceErrorKind::ALL {
            for other in ServiceErrorKind::ALL.into_iter().filter(|other| *other != kind) {
                let err = ServiceError::from_response(kind, ResponseSnapshot::new(other.status())).unwrap_err();
                assert_eq!(
                    err,
                    ValidationError::StatusMismatch {
                        expected: kind.status(),
                        actual: other.status(),
                    }
                );
            }
        }
    }

    #[test]
    fn gateway_timeout_from_response() {
        let ok = ServiceError::from_response(
            ServiceErrorKind::GatewayTimeout,
            ResponseSnapshot::new(StatusCode::GATEWAY_TIMEOUT),
        );
        assert!(ok.is_ok());

        let err = ServiceError::from_response_with_message(
            ServiceErrorKind::GatewayTimeout,
            "upstream stalled",
            ResponseSnapshot::new(StatusCode::INTERNAL_SERVER_ERROR),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "invalid response status: expected 504, got 500");
    }

    #[test]
    fn without_response_status_is_implied() {
        let error = ServiceError::with_message(ServiceErrorKind::PreconditionRequired, "missing If-Match");

        assert_eq!(error.status(), StatusCode::PRECONDITION_REQUIRED);
        assert!(error.response().is_none());
        assert_eq!(error.to_string(), "missing If-Match");
    }

    #[test]
    fn default_message_uses_reason_phrase() {
        let error = ServiceError::new(ServiceErrorKind::NetworkAuthenticationRequired);
        assert_eq!(error.to_string(), "HTTP 511 Network Authentication Required");
    }

    #[test]
    fn cause_is_exposed_as_source() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "read timed out");
        let error = ServiceError::new(ServiceErrorKind::GatewayTimeout).with_cause(io);

        let source = error.source().unwrap();
        assert_eq!(source.to_string(), "read timed out");
        assert!(error.cause().is_some());
    }

    #[test]
    fn from_status_picks_the_bound_kind() {
        let error = ServiceError::from_status(ResponseSnapshot::new(StatusCode::EXPECTATION_FAILED)).unwrap();
        assert_eq!(error.kind(), ServiceErrorKind::ExpectationFailed);
        assert_eq!(error.family(), ErrorFamily::Client);

        let err = ServiceError::from_status(ResponseSnapshot::new(StatusCode::IM_A_TEAPOT)).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Unbound {
                status: StatusCode::IM_A_TEAPOT
            }
        );
    }

    #[test]
    fn server_errors_hide_their_message_from_clients() {
        let server = ServiceError::with_message(ServiceErrorKind::BadGateway, "db-7 refused connection");
        assert_eq!(server.client_message(), "HTTP 502 Bad Gateway");
        assert_eq!(server.error_type(), "bad_gateway");

        let client = ServiceError::with_message(ServiceErrorKind::NotFound, "no such widget");
        assert_eq!(client.client_message(), "no such widget");
    }
}
