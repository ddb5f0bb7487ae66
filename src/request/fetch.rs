use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::error::{Error, Result};
use crate::logging::LogLevel;
use crate::serialization;

use super::builder::Request;
use super::response::{RawResponse, ResponseMeta};

/// Outcome of a body handler passed to [`Request::handle_fetch`].
///
/// A handler failure is mapped to [`Error::Decode`] carrying the response
/// status code.
pub type HandlerOutcome = std::result::Result<(), Box<dyn std::error::Error + Send + Sync>>;

const BODY_PREVIEW_SIZE: usize = 200;

impl Request {
    /// Executes the request and returns the buffered response.
    ///
    /// If a mock registry is attached and holds an entry for this request's
    /// `(verb, full URL)`, the registered responder is invoked with the
    /// pending body bytes and its canned response is returned without
    /// touching the network. Otherwise a single attempt is made over the
    /// real transport; timeouts surface as [`Error::Timeout`], other
    /// transport failures as [`Error::Transport`].
    pub async fn fetch_raw_response(&self) -> Result<RawResponse> {
        let client = self.resolve_client()?;
        let mut request = self.create_http_request(&client)?;
        if let Some(timeout) = self.timeout {
            *request.timeout_mut() = Some(timeout);
        }
        let url = request.url().to_string();

        if let Some(registry) = &self.mock_registry {
            let pending_body = request
                .body()
                .and_then(|b| b.as_bytes())
                .unwrap_or_default();
            if let Some(mock) = registry.respond(self.verb, &url, pending_body) {
                debug!(
                    verb = %self.verb,
                    url = %url,
                    status = mock.status_code,
                    "serving mocked response"
                );
                return RawResponse::from_mock(mock);
            }
        }

        if self.log_level >= LogLevel::Verbose {
            debug!(verb = %self.verb, url = %url, "service request");
        }

        let response = client.execute(request).await.map_err(|e| {
            if e.is_timeout() {
                Error::timeout(format!("request to {url} timed out"))
            } else {
                if self.log_level >= LogLevel::Errors {
                    error!(url = %url, error = %e, "request failed");
                }
                Error::transport(format!("request failed: {e}"))
            }
        })?;

        RawResponse::read(response).await
    }

    /// Executes the request and dispatches the raw body bytes to one of two
    /// handlers: `ok` when the status is exactly 200, `err` otherwise.
    ///
    /// Both handlers receive the same bytes. The response metadata is
    /// returned regardless of which handler ran; a handler failure comes
    /// back as [`Error::Decode`] carrying the status code, so callers can
    /// tell "the server responded" apart from "we could not understand the
    /// response".
    pub async fn handle_fetch<O, E>(&self, ok_handler: O, error_handler: E) -> Result<ResponseMeta>
    where
        O: FnOnce(&[u8]) -> HandlerOutcome,
        E: FnOnce(&[u8]) -> HandlerOutcome,
    {
        let response = self.fetch_raw_response().await?;

        if self.log_level >= LogLevel::Debug {
            let preview_len = response.body.len().min(BODY_PREVIEW_SIZE);
            debug!(
                status = response.meta.status_code.as_u16(),
                body_length = response.body.len(),
                body_preview = %String::from_utf8_lossy(&response.body[..preview_len]),
                "service response"
            );
        }

        let handled = if response.meta.is_ok() {
            ok_handler(&response.body)
        } else {
            error_handler(&response.body)
        };

        match handled {
            Ok(()) => Ok(response.meta),
            Err(e) => Err(Error::decode(
                response.meta.status_code.as_u16(),
                e.to_string(),
            )),
        }
    }

    /// Executes the request and discards the response body.
    pub async fn execute(&self) -> Result<ResponseMeta> {
        Ok(self.fetch_raw_response().await?.meta)
    }

    /// Executes the request and returns the response body as a string,
    /// regardless of status code.
    pub async fn fetch_string(&self) -> Result<String> {
        let response = self.fetch_raw_response().await?;
        Ok(String::from_utf8_lossy(&response.body).into_owned())
    }

    /// On a 200 response, decodes the JSON body into `target`; the body of
    /// any other status is ignored and `target` is left untouched.
    pub async fn fetch_json_to_object<T>(&self, target: &mut T) -> Result<ResponseMeta>
    where
        T: DeserializeOwned,
    {
        self.handle_fetch(json_handler(target), discard_body).await
    }

    /// Decodes the JSON body into `target` on 200, into `error_target`
    /// otherwise.
    pub async fn fetch_json_with_error_object<T, E>(
        &self,
        target: &mut T,
        error_target: &mut E,
    ) -> Result<ResponseMeta>
    where
        T: DeserializeOwned,
        E: DeserializeOwned,
    {
        self.handle_fetch(json_handler(target), json_handler(error_target))
            .await
    }

    /// Decodes the JSON body into `error_target` on any non-200 status; a
    /// 200 body is ignored.
    pub async fn fetch_json_error<E>(&self, error_target: &mut E) -> Result<ResponseMeta>
    where
        E: DeserializeOwned,
    {
        self.handle_fetch(discard_body, json_handler(error_target))
            .await
    }

    /// On a 200 response, decodes the XML body into `target`; the body of
    /// any other status is ignored and `target` is left untouched.
    pub async fn fetch_xml_to_object<T>(&self, target: &mut T) -> Result<ResponseMeta>
    where
        T: DeserializeOwned,
    {
        self.handle_fetch(xml_handler(target), discard_body).await
    }

    /// Decodes the XML body into `target` on 200, into `error_target`
    /// otherwise.
    pub async fn fetch_xml_with_error_object<T, E>(
        &self,
        target: &mut T,
        error_target: &mut E,
    ) -> Result<ResponseMeta>
    where
        T: DeserializeOwned,
        E: DeserializeOwned,
    {
        self.handle_fetch(xml_handler(target), xml_handler(error_target))
            .await
    }
}

fn json_handler<T: DeserializeOwned>(target: &mut T) -> impl FnOnce(&[u8]) -> HandlerOutcome + '_ {
    move |body| {
        *target = serialization::from_json(body)?;
        Ok(())
    }
}

fn xml_handler<T: DeserializeOwned>(target: &mut T) -> impl FnOnce(&[u8]) -> HandlerOutcome + '_ {
    move |body| {
        *target = serialization::from_xml(body)?;
        Ok(())
    }
}

fn discard_body(_body: &[u8]) -> HandlerOutcome {
    Ok(())
}
