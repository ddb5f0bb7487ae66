//! Request descriptor, builder, and dispatch layer.
//!
//! A [`Request`] captures every dimension of an HTTP call and is configured
//! through fluent `with_*` methods. Materialization turns it into a
//! transport-ready `reqwest::Request`; the `fetch_*` family executes it,
//! consulting any attached mock registry before the real transport.
//!
//! # Example
//!
//! ```rust,no_run
//! use http_request::Request;
//!
//! # async fn example() -> http_request::Result<()> {
//! let body = Request::new()
//!     .with_url("http://localhost:5001/api/v1/borrowers/2?env=dev")
//!     .with_header("deployment", "test")
//!     .fetch_string()
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod builder;
mod fetch;
mod materialize;
mod response;
mod transport;


pub use builder::{Request, Verb};
pub use fetch::HandlerOutcome;
pub use response::{RawResponse, ResponseMeta};
