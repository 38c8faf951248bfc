use std::fmt;

use http::StatusCode;

/// Which side of the exchange is at fault
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorFamily {
    /// 4xx: the caller or its request is at fault
    Client,
    /// 5xx: the server or an upstream it depends on is at fault
    Server,
}

/// A service failure category, permanently bound to one status code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceErrorKind {
    BadRequest,
    NotAuthorized,
    Forbidden,
    NotFound,
    NotAllowed,
    NotAcceptable,
    NotSupported,
    ExpectationFailed,
    PreconditionRequired,
    InternalServerError,
    BadGateway,
    ServiceUnavailable,
    GatewayTimeout,
    NetworkAuthenticationRequired,
}

impl ServiceErrorKind {
    /// Every kind, client family first
    pub const ALL: [Self; 14] = [
        Self::BadRequest,
        Self::NotAuthorized,
        Self::Forbidden,
        Self::NotFound,
        Self::NotAllowed,
        Self::NotAcceptable,
        Self::NotSupported,
        Self::ExpectationFailed,
        Self::PreconditionRequired,
        Self::InternalServerError,
        Self::BadGateway,
        Self::ServiceUnavailable,
        Self::GatewayTimeout,
        Self::NetworkAuthenticationRequired,
    ];

    /// The status code this kind is bound to
    #[must_use]
    pub const fn status(self) -> StatusCode {
        match self {
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::NotAuthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::NotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::NotAcceptable => StatusCode::NOT_ACCEPTABLE,
            Self::NotSupported => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::ExpectationFailed => StatusCode::EXPECTATION_FAILED,
            Self::PreconditionRequired => StatusCode::PRECONDITION_REQUIRED,
            Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadGateway => StatusCode::BAD_GATEWAY,
            Self::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::GatewayTimeout => StatusCode::GATEWAY_TIMEOUT,
            Self::NetworkAuthenticationRequired => StatusCode::NETWORK_AUTHENTICATION_REQUIRED,
        }
    }

    /// Whether the client or the server is at fault
    #[must_use]
    pub const fn family(self) -> ErrorFamily {
        match self {
            Self::BadRequest
            | Self::NotAuthorized
            | Self::Forbidden
            | Self::NotFound
            | Self::NotAllowed
            | Self::NotAcceptable
            | Self::NotSupported
            | Self::ExpectationFailed
            | Self::PreconditionRequired => ErrorFamily::Client,
            Self::InternalServerError
            | Self::BadGateway
            | Self::ServiceUnavailable
            | Self::GatewayTimeout
            | Self::NetworkAuthenticationRequired => ErrorFamily::Server,
        }
    }

    /// Look up the kind bound to `status`, if any
    #[must_use]
    pub fn from_status(status: StatusCode) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.status() == status)
    }

    /// Machine-readable name (e.g. `gateway_timeout`)
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BadRequest => "bad_request",
            Self::NotAuthorized => "not_authorized",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not_found",
            Self::NotAllowed => "not_allowed",
            Self::NotAcceptable => "not_acceptable",
            Self::NotSupported => "not_supported",
            Self::ExpectationFailed => "expectation_failed",
            Self::PreconditionRequired => "precondition_required",
            Self::InternalServerError => "internal_server_error",
            Self::BadGateway => "bad_gateway",
            Self::ServiceUnavailable => "service_unavailable",
            Self::GatewayTimeout => "gateway_timeout",
            Self::NetworkAuthenticationRequired => "network_authentication_required",
        }
    }
}

impl fmt::Display for ServiceErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
