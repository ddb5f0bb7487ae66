use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, HeaderName, HeaderValue};
use url::Url;

use crate::error::{Error, Result};

use super::builder::{DeferredError, Request};

impl Request {
    /// Builds the full URL from scheme, host, path, and encoded query.
    pub fn create_url(&self) -> Result<Url> {
        let mut url = Url::parse(&format!("{}://{}", self.scheme, self.host))?;
        url.set_path(&self.path);
        if !self.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &self.query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Materializes the descriptor into a transport-ready request.
    ///
    /// Surfaces any failure recorded during configuration (`with_url`,
    /// `with_json_body`, `with_xml_body`) first. Fails with
    /// [`Error::ConflictingBody`] when both a raw body and post-form data
    /// are set. A raw body is used verbatim; otherwise post data is
    /// form-encoded with content-type `application/x-www-form-urlencoded`;
    /// otherwise no payload is sent. Basic auth is applied when the username
    /// is non-empty, the content-type override wins over the form default,
    /// and custom headers are applied last and win over everything.
    pub fn create_http_request(&self, client: &Client) -> Result<reqwest::Request> {
        if let Some(deferred) = &self.deferred {
            return Err(match deferred {
                DeferredError::UrlParse(e) => Error::UrlParse(*e),
                DeferredError::Encode(msg) => Error::encode(msg.clone()),
            });
        }

        if self.body.is_some() && !self.post_data.is_empty() {
            return Err(Error::ConflictingBody);
        }

        let url = self.create_url()?;
        let mut builder = client.request(self.verb.as_method(), url);

        if let Some(body) = &self.body {
            builder = builder.body(body.clone());
        } else if !self.post_data.is_empty() {
            builder = builder.form(&self.post_data);
        }

        if let Some((username, password)) = &self.basic_auth {
            if !username.is_empty() {
                builder = builder.basic_auth(username, Some(password));
            }
        }

        let mut request = builder
            .build()
            .map_err(|e| Error::invalid_request(format!("failed to build request: {e}")))?;

        if let Some(content_type) = &self.content_type {
            let value = HeaderValue::from_str(content_type).map_err(|e| {
                Error::invalid_request(format!("invalid content-type {content_type:?}: {e}"))
            })?;
            request.headers_mut().insert(CONTENT_TYPE, value);
        }

        for (name, value) in &self.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| Error::invalid_request(format!("invalid header name {name:?}: {e}")))?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                Error::invalid_request(format!("invalid header value for {name}: {e}"))
            })?;
            request.headers_mut().insert(name, value);
        }

        Ok(request)
    }
}
