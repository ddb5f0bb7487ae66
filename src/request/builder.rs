use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use url::Url;

use crate::logging::LogLevel;
use crate::mock::{self, MockRegistry};
use crate::path::{combine_path_components, parse_query_pairs};
use crate::serialization;

/// HTTP verb of a request descriptor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Verb {
    /// GET (the default).
    #[default]
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
}

impl Verb {
    /// The verb as its wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Patch => "PATCH",
            Verb::Delete => "DELETE",
        }
    }

    pub(crate) fn as_method(self) -> reqwest::Method {
        match self {
            Verb::Get => reqwest::Method::GET,
            Verb::Post => reqwest::Method::POST,
            Verb::Put => reqwest::Method::PUT,
            Verb::Patch => reqwest::Method::PATCH,
            Verb::Delete => reqwest::Method::DELETE,
        }
    }
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builder failures recorded during configuration and surfaced at
/// materialization, the way `reqwest::RequestBuilder` defers its own errors.
#[derive(Debug, Clone)]
pub(crate) enum DeferredError {
    UrlParse(url::ParseError),
    Encode(String),
}

/// An HTTP request being assembled before dispatch.
///
/// Created empty with `scheme = "http"` and `verb = GET`; every `with_*`
/// method consumes and returns the descriptor for chaining and never fails —
/// only [`create_http_request`](Request::create_http_request) and the
/// `fetch_*` family return errors.
///
/// Query parameters, headers, and post-form data are ordered multimaps:
/// repeated `with_query_string`/`with_post_data` calls with the same key
/// accumulate values in call order.
#[derive(Debug)]
pub struct Request {
    /// URL scheme, `"http"` by default.
    pub scheme: String,
    /// Host, including port when non-standard (`localhost:5001`).
    pub host: String,
    /// URL path.
    pub path: String,
    /// Ordered query-string pairs.
    pub query: Vec<(String, String)>,
    /// Custom headers, applied last during materialization.
    pub headers: Vec<(String, String)>,
    /// Post-form data, mutually exclusive with `body`.
    pub post_data: Vec<(String, String)>,
    /// Basic-auth credentials; applied when the username is non-empty.
    pub basic_auth: Option<(String, String)>,
    /// HTTP verb, GET by default.
    pub verb: Verb,
    /// Content-type override; wins over the form-encoded default.
    pub content_type: Option<String>,
    /// Raw request body, mutually exclusive with `post_data`.
    pub body: Option<String>,
    /// Per-call timeout.
    pub timeout: Option<Duration>,
    /// TLS client certificate path (PEM); requires `tls_key_path` too.
    pub tls_cert_path: Option<PathBuf>,
    /// TLS client key path (PEM); requires `tls_cert_path` too.
    pub tls_key_path: Option<PathBuf>,
    /// Diagnostic verbosity for this request, off by default.
    pub log_level: LogLevel,
    /// Mock registry consulted before the real transport, when attached.
    pub mock_registry: Option<Arc<MockRegistry>>,

    pub(crate) deferred: Option<DeferredError>,
}

impl Default for Request {
    fn default() -> Self {
        Self::new()
    }
}

impl Request {
    /// Creates an empty descriptor with `scheme = "http"` and `verb = GET`.
    pub fn new() -> Self {
        Self {
            scheme: "http".to_string(),
            host: String::new(),
            path: String::new(),
            query: Vec::new(),
            headers: Vec::new(),
            post_data: Vec::new(),
            basic_auth: None,
            verb: Verb::Get,
            content_type: None,
            body: None,
            timeout: None,
            tls_cert_path: None,
            tls_key_path: None,
            log_level: LogLevel::Off,
            mock_registry: None,
            deferred: None,
        }
    }

    /// Sets the URL scheme.
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Sets the host (may include a port, e.g. `localhost:5001`).
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the URL path.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Sets the URL path by joining the given segments with single slashes.
    pub fn with_combined_path<I, S>(mut self, components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.path = combine_path_components(components);
        self
    }

    /// Parses a full URL string and overwrites scheme, host, path, and query.
    ///
    /// A malformed URL does not fail here; the parse error is recorded and
    /// surfaced by `create_http_request`. Query pairs lacking an `=` are kept
    /// as keys with empty values.
    pub fn with_url(mut self, url_string: &str) -> Self {
        match Url::parse(url_string) {
            Ok(url) => {
                self.scheme = url.scheme().to_string();
                self.host = match (url.host_str(), url.port()) {
                    (Some(host), Some(port)) => format!("{host}:{port}"),
                    (Some(host), None) => host.to_string(),
                    (None, _) => String::new(),
                };
                self.path = url.path().to_string();
                self.query = parse_query_pairs(url.query().unwrap_or(""));
            }
            Err(e) => {
                self.defer(DeferredError::UrlParse(e));
            }
        }
        self
    }

    /// Sets a custom header; replaces any earlier value for the same name
    /// and wins over everything computed during materialization.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Appends a query-string pair. Additive: repeated calls with the same
    /// key accumulate values in call order.
    pub fn with_query_string(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Appends a post-form pair. Additive, like `with_query_string`.
    pub fn with_post_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.post_data.push((key.into(), value.into()));
        self
    }

    /// Sets basic-auth credentials, applied when the username is non-empty.
    pub fn with_basic_auth(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.basic_auth = Some((username.into(), password.into()));
        self
    }

    /// Sets the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the TLS client certificate path. Takes effect only when the key
    /// path is set too.
    pub fn with_tls_cert(mut self, cert_path: impl Into<PathBuf>) -> Self {
        self.tls_cert_path = Some(cert_path.into());
        self
    }

    /// Sets the TLS client key path. Takes effect only when the certificate
    /// path is set too.
    pub fn with_tls_key(mut self, key_path: impl Into<PathBuf>) -> Self {
        self.tls_key_path = Some(key_path.into());
        self
    }

    /// Sets the HTTP verb.
    pub fn with_verb(mut self, verb: Verb) -> Self {
        self.verb = verb;
        self
    }

    /// Sets the verb to GET.
    pub fn as_get(self) -> Self {
        self.with_verb(Verb::Get)
    }

    /// Sets the verb to POST.
    pub fn as_post(self) -> Self {
        self.with_verb(Verb::Post)
    }

    /// Sets the verb to PUT.
    pub fn as_put(self) -> Self {
        self.with_verb(Verb::Put)
    }

    /// Sets the verb to PATCH.
    pub fn as_patch(self) -> Self {
        self.with_verb(Verb::Patch)
    }

    /// Sets the verb to DELETE.
    pub fn as_delete(self) -> Self {
        self.with_verb(Verb::Delete)
    }

    /// Sets the content-type override.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Serializes the value as JSON into the raw body and sets the
    /// content-type to `application/json`.
    ///
    /// A serialization failure is recorded and surfaced by
    /// `create_http_request`.
    pub fn with_json_body<T: Serialize>(mut self, value: &T) -> Self {
        match serialization::to_json(value) {
            Ok(body) => self.body = Some(body),
            Err(e) => self.defer(DeferredError::Encode(e.to_string())),
        }
        self.with_content_type("application/json")
    }

    /// Serializes the value as XML into the raw body and sets the
    /// content-type to `application/xml`.
    ///
    /// A serialization failure is recorded and surfaced by
    /// `create_http_request`.
    pub fn with_xml_body<T: Serialize>(mut self, value: &T) -> Self {
        match serialization::to_xml(value) {
            Ok(body) => self.body = Some(body),
            Err(e) => self.defer(DeferredError::Encode(e.to_string())),
        }
        self.with_content_type("application/xml")
    }

    /// Sets the raw request body, used verbatim as the payload.
    pub fn with_raw_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Enables error-level diagnostics for this request.
    pub fn with_logging(self) -> Self {
        self.with_log_level(LogLevel::Errors)
    }

    /// Sets the diagnostic verbosity for this request.
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    /// Attaches the process-wide mock registry; the dispatch layer will
    /// consult it before the real transport.
    pub fn with_mocked_responses(self) -> Self {
        self.with_mock_registry(mock::global_registry())
    }

    /// Attaches an explicit mock registry.
    pub fn with_mock_registry(mut self, registry: Arc<MockRegistry>) -> Self {
        self.mock_registry = Some(registry);
        self
    }

    // The first recorded failure wins; later ones would only mask it.
    fn defer(&mut self, error: DeferredError) {
        if self.deferred.is_none() {
            self.deferred = Some(error);
        }
    }
}
