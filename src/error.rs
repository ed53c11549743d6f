//! Standard errors used by all functions in the crate.

use serde::{de::DeserializeOwned, Deserialize};
use std::fmt;

/// Error collecting all possible failures of the Bambora client.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request could not be built: missing required argument, malformed URL
    /// or a value that cannot be sent as an HTTP header.
    ///
    /// Raised before any network activity.
    #[error("Invalid configuration: {0}")]
    Configuration(String),
    /// The transport never completed an exchange with the server
    /// (DNS failure, connection refused, TLS failure, timeout...).
    #[error("Could not process the request successfully: {0}")]
    Communication(#[source] anyhow::Error),
    /// The server answered with a non-success status code.
    #[error("{0}")]
    Api(#[from] ApiError),
    /// The request payload could not be serialized to JSON.
    #[error("Error serializing request body: {0}")]
    Serialization(#[source] serde_json::Error),
    /// A successful response body did not match the expected shape.
    #[error("Error deserializing response body: {0}")]
    Deserialization(#[source] serde_json::Error),
}

impl Error {
    /// Returns the classified [`ApiError`] if this error was produced by a non-success response.
    pub fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Api(e) => Some(e),
            _ => None,
        }
    }

    /// Shorthand to match on the kind of a classified API error.
    pub fn api_error_kind(&self) -> Option<ApiErrorKind> {
        self.as_api_error().map(|e| e.kind)
    }
}

impl From<reqwest_middleware::Error> for Error {
    fn from(e: reqwest_middleware::Error) -> Self {
        match e {
            reqwest_middleware::Error::Reqwest(e) => Error::Communication(e.into()),
            reqwest_middleware::Error::Middleware(e) => match e.downcast::<Error>() {
                Ok(e) => e,
                Err(e) => Error::Communication(e),
            },
        }
    }
}

/// Class of failure of a Bambora API call, derived from the HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// `302 Found`. The caller must follow a redirect (3-D Secure, wallet or Interac flows).
    Redirection,
    /// `400 Bad Request`, `405 Method Not Allowed` or `415 Unsupported Media Type`.
    InvalidRequest,
    /// `401 Unauthorized`. Authentication failed.
    Unauthorized,
    /// `402 Payment Required`. Valid request rejected by a business rule or the card issuer.
    BusinessRule,
    /// `403 Forbidden`. Authenticated but not allowed to perform this operation.
    Forbidden,
    /// `404 Not Found`.
    NotFound,
    /// Any other non-success status.
    InternalServer,
}

impl ApiErrorKind {
    /// Maps a non-success HTTP status code to its error kind.
    pub fn from_status(status: u16) -> Self {
        match status {
            302 => ApiErrorKind::Redirection,
            400 | 405 | 415 => ApiErrorKind::InvalidRequest,
            401 => ApiErrorKind::Unauthorized,
            402 => ApiErrorKind::BusinessRule,
            403 => ApiErrorKind::Forbidden,
            404 => ApiErrorKind::NotFound,
            _ => ApiErrorKind::InternalServer,
        }
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ApiErrorKind::Redirection => "redirection",
            ApiErrorKind::InvalidRequest => "invalid request",
            ApiErrorKind::Unauthorized => "unauthorized",
            ApiErrorKind::BusinessRule => "business rule violation",
            ApiErrorKind::Forbidden => "forbidden",
            ApiErrorKind::NotFound => "not found",
            ApiErrorKind::InternalServer => "internal server error",
        };
        f.write_str(name)
    }
}

/// Bambora HTTP APIs error.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// Class of the failure.
    pub kind: ApiErrorKind,
    /// HTTP status returned by the server.
    pub status: u16,
    /// Raw response body, kept for diagnostics.
    pub body: Option<String>,
    /// Human readable message returned by the server. Empty if the body could not be parsed.
    pub message: String,
    /// Bambora error category, or `-1` if unknown.
    pub category: i32,
    /// Bambora error code, or `-1` if unknown.
    pub code: i32,
}

impl ApiError {
    /// Classifies a failed response from its status code and best-effort parsed body.
    pub fn classify(status: u16, payload: &ErrorPayload, body: Option<String>) -> Self {
        Self {
            kind: ApiErrorKind::from_status(status),
            status,
            body,
            message: payload.message.clone(),
            category: payload.category,
            code: payload.code,
        }
    }

    /// Deserializes the raw body of the failed response.
    ///
    /// Useful for [`ApiErrorKind::Redirection`] errors, whose body carries the data needed
    /// to redirect the customer.
    pub fn deserialize_body<T: DeserializeOwned>(&self) -> Result<T, Error> {
        serde_json::from_str(self.body.as_deref().unwrap_or_default())
            .map_err(Error::Deserialization)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bambora HTTP error {} ({})", self.status, self.kind)?;

        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }

        if self.code != -1 || self.category != -1 {
            write!(f, "\nCode: {}, category: {}", self.code, self.category)?;
        }

        Ok(())
    }
}

/// Body of an error response from Bambora APIs.
///
/// Fields missing from the response keep their defaults: `-1` for `code` and `category`,
/// an empty `message`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorPayload {
    pub code: i32,
    pub category: i32,
    pub message: String,
}

impl Default for ErrorPayload {
    fn default() -> Self {
        Self {
            code: -1,
            category: -1,
            message: String::new(),
        }
    }
}

#[derive(Deserialize)]
struct RawErrorPayload {
    code: Option<i32>,
    category: Option<i32>,
    message: Option<String>,
}

impl ErrorPayload {
    /// Parses an error body. Returns `None` if the body is not a JSON object of the expected shape.
    pub fn parse(body: &str) -> Option<Self> {
        let raw: RawErrorPayload = serde_json::from_str(body).ok()?;
        let defaults = Self::default();

        Some(Self {
            code: raw.code.unwrap_or(defaults.code),
            category: raw.category.unwrap_or(defaults.category),
            message: raw.message.unwrap_or(defaults.message),
        })
    }

    /// Parses an error body, falling back to the default payload on any failure.
    pub fn parse_or_default(body: Option<&str>) -> Self {
        body.and_then(Self::parse).unwrap_or_default()
    }
}
