//! Error types for request construction and dispatch.
//!
//! A single [`Error`] enum covers every failure mode of the crate. Builder
//! methods never fail; only materialization (`create_http_request`) and the
//! `fetch_*` family return errors, and they return them to the caller rather
//! than panicking.

use std::borrow::Cow;

use thiserror::Error;

/// Result type alias for all request operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while materializing or dispatching a request.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A raw body and post-form data were both set on the same descriptor.
    #[error("cannot set both a raw body and post data")]
    ConflictingBody,

    /// A malformed URL string was passed to `with_url`.
    ///
    /// Recorded when the builder method runs, surfaced at materialization.
    #[error("invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// The TLS client certificate or key file was missing or invalid.
    #[error("TLS load error: {0}")]
    TlsLoad(Cow<'static, str>),

    /// Network-level failure surfaced from the transport (DNS, connect,
    /// broken connection, malformed response).
    #[error("transport error: {0}")]
    Transport(Cow<'static, str>),

    /// The configured timeout elapsed without a completed round trip.
    #[error("timeout: {0}")]
    Timeout(Cow<'static, str>),

    /// The descriptor could not be translated into a transport request
    /// (invalid header name/value, unrepresentable status code, ...).
    #[error("invalid request: {0}")]
    InvalidRequest(Cow<'static, str>),

    /// A body object failed to serialize in `with_json_body`/`with_xml_body`.
    ///
    /// Recorded when the builder method runs, surfaced at materialization.
    #[error("failed to encode request body: {0}")]
    Encode(Cow<'static, str>),

    /// The response body was read but failed to parse into the target shape.
    ///
    /// Carries the response status code so callers can distinguish "the
    /// server responded" from "we could not understand the response".
    #[error("failed to decode response body (status {status}): {message}")]
    Decode {
        /// Status code of the response whose body failed to decode.
        status: u16,
        /// Decoder error message.
        message: String,
    },
}

impl Error {
    /// Creates a TLS load error.
    pub fn tls_load(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::TlsLoad(msg.into())
    }

    /// Creates a transport error.
    pub fn transport(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Transport(msg.into())
    }

    /// Creates a timeout error.
    pub fn timeout(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Timeout(msg.into())
    }

    /// Creates an invalid request error.
    pub fn invalid_request(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Creates a body encoding error.
    pub fn encode(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Encode(msg.into())
    }

    /// Creates a response decoding error carrying the response status.
    pub fn decode(status: u16, message: impl Into<String>) -> Self {
        Self::Decode {
            status,
            message: message.into(),
        }
    }

    /// Returns `true` if this error is a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }

    /// Returns the response status code for decode errors, `None` otherwise.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Decode { status, .. } => Some(*status),
            _ => None,
        }
    }
}
