//! Fluent HTTP Request Library
//!
//! A fluent builder for constructing and issuing HTTP requests, with JSON and
//! XML serialization, optional TLS client-certificate transport, timeout
//! control, and a deterministic mock-response registry for testing.
//!
//! # Features
//!
//! - **Fluent Builder**: every dimension of an HTTP call configured through
//!   chainable `with_*` methods that never fail
//! - **Mockable Dispatch**: a keyed registry intercepts outbound requests by
//!   method+URL and serves canned responses, including stateful responders
//!   that return different bodies on successive calls
//! - **Pluggable Serialization**: `serde_json` for JSON, `quick-xml` for XML
//! - **Error Handling**: comprehensive error types with `thiserror`
//!
//! # Example
//!
//! ```rust,no_run
//! use http_request::Request;
//!
//! # async fn example() -> http_request::Result<()> {
//! let mut status = serde_json::Value::Null;
//! let meta = Request::new()
//!     .with_url("http://localhost:5001/api/v1/status")
//!     .with_header("deployment", "test")
//!     .fetch_json_to_object(&mut status)
//!     .await?;
//! assert!(meta.is_ok());
//! # Ok(())
//! # }
//! ```
//!
//! # Mocking
//!
//! ```rust
//! use http_request::{MockRegistry, MockedResponse, Request, Verb};
//! use std::sync::Arc;
//!
//! # async fn example() -> http_request::Result<()> {
//! let registry = Arc::new(MockRegistry::new());
//! registry.register_response(
//!     Verb::Get,
//!     "http://localhost:5001/api/v1/status",
//!     MockedResponse::ok(r#"{"status":"ok!"}"#),
//! );
//!
//! let body = Request::new()
//!     .with_url("http://localhost:5001/api/v1/status")
//!     .with_mock_registry(registry)
//!     .fetch_string()
//!     .await?;
//! assert_eq!(body, r#"{"status":"ok!"}"#);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::return_self_not_must_use)]

pub mod error;
pub mod logging;
pub mod mock;
pub mod path;
pub mod request;
pub mod serialization;

pub use error::{Error, Result};
pub use logging::{LogConfig, LogFormat, LogLevel, init_logging, try_init_logging};
pub use mock::{
    MockRegistry, MockedResponse, ScopedMocks, clear_mocked_responses, global_registry,
    mock_response,
};
pub use path::{combine_path_components, parse_query_pairs};
pub use request::{HandlerOutcome, RawResponse, Request, ResponseMeta, Verb};

/// Prelude module for convenient imports.
///
/// ```rust
/// use http_request::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::logging::{LogConfig, LogLevel, init_logging};
    pub use crate::mock::{
        MockRegistry, MockedResponse, ScopedMocks, clear_mocked_responses, global_registry,
        mock_response,
    };
    pub use crate::path::combine_path_components;
    pub use crate::request::{RawResponse, Request, ResponseMeta, Verb};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
