use bytes::Bytes;
use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderMap};

use crate::error::{Error, Result};
use crate::mock::MockedResponse;

/// Transport-level metadata of a response, independent of its body.
#[derive(Debug, Clone)]
pub struct ResponseMeta {
    /// HTTP status code.
    pub status_code: StatusCode,
    /// The `Content-Type` header value, when present and valid UTF-8.
    pub content_type: Option<String>,
    /// All response headers.
    pub headers: HeaderMap,
}

impl ResponseMeta {
    pub(crate) fn from_parts(status_code: StatusCode, headers: HeaderMap) -> Self {
        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        Self {
            status_code,
            content_type,
            headers,
        }
    }

    /// Whether the status is exactly 200 OK.
    pub fn is_ok(&self) -> bool {
        self.status_code == StatusCode::OK
    }
}

/// A response with its body read and buffered eagerly.
#[derive(Debug)]
pub struct RawResponse {
    /// Transport-level metadata.
    pub meta: ResponseMeta,
    /// The full response body.
    pub body: Bytes,
}

impl RawResponse {
    /// Buffers a live response, failing with a transport error if the body
    /// cannot be read.
    pub(crate) async fn read(response: reqwest::Response) -> Result<Self> {
        let status_code = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::transport(format!("failed to read response body: {e}")))?;
        Ok(Self {
            meta: ResponseMeta::from_parts(status_code, headers),
            body,
        })
    }

    /// Synthesizes a response from a mocked one, bypassing the transport.
    pub(crate) fn from_mock(mock: MockedResponse) -> Result<Self> {
        let status_code = StatusCode::from_u16(mock.status_code).map_err(|_| {
            Error::invalid_request(format!("mocked status code {} is invalid", mock.status_code))
        })?;
        Ok(Self {
            meta: ResponseMeta::from_parts(status_code, HeaderMap::new()),
            body: Bytes::from(mock.body),
        })
    }
}
