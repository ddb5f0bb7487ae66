//! Mock response registry.
//!
//! A keyed store of `(verb, full URL)` to responder functions. When a
//! registry is attached to a request (via `with_mocked_responses` or
//! `with_mock_registry`), the dispatch layer consults it before touching the
//! real transport and serves the registered canned response instead.
//!
//! Responders are `FnMut` closures receiving the pending request body, so
//! they may carry private mutable state: the same key, fetched N times, can
//! yield N different bodies in registration order. Each responder lives
//! behind its own lock and is invoked outside the registry map lock, so a
//! responder may itself touch the registry without deadlocking.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock, Mutex};

use crate::request::Verb;

/// A canned response produced by a registered responder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockedResponse {
    /// Raw response body bytes.
    pub body: Vec<u8>,
    /// HTTP status code.
    pub status_code: u16,
}

impl MockedResponse {
    /// Creates a mocked response with the given status and body.
    pub fn new(status_code: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            body: body.into(),
            status_code,
        }
    }

    /// Creates a 200 response with the given body.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::new(200, body)
    }
}

type BoxedResponder = Box<dyn FnMut(&[u8]) -> MockedResponse + Send>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct MockKey {
    verb: Verb,
    url: String,
}

/// Keyed store of mocked responses, shared between test setup and dispatch.
///
/// Lookup is exact-match on `(verb, full URL including query string)` — no
/// wildcard or pattern matching. The registry is safe to share across
/// threads; a single mutex guards the map.
#[derive(Default)]
pub struct MockRegistry {
    entries: Mutex<HashMap<MockKey, Arc<Mutex<BoxedResponder>>>>,
}

impl fmt::Debug for MockRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockRegistry")
            .field("entries", &self.len())
            .finish()
    }
}

impl MockRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a responder for the exact `(verb, url)` key, overwriting
    /// any previous entry.
    ///
    /// The responder is called once per matched fetch and receives the
    /// pending request body (empty when the request has none).
    pub fn register<F>(&self, verb: Verb, url: impl Into<String>, responder: F)
    where
        F: FnMut(&[u8]) -> MockedResponse + Send + 'static,
    {
        let key = MockKey {
            verb,
            url: url.into(),
        };
        self.lock_entries()
            .insert(key, Arc::new(Mutex::new(Box::new(responder))));
    }

    /// Registers a fixed response for the exact `(verb, url)` key.
    pub fn register_response(&self, verb: Verb, url: impl Into<String>, response: MockedResponse) {
        self.register(verb, url, move |_| response.clone());
    }

    /// Removes the entry for `(verb, url)`, returning whether one existed.
    pub fn unregister(&self, verb: Verb, url: &str) -> bool {
        let key = MockKey {
            verb,
            url: url.to_string(),
        };
        self.lock_entries().remove(&key).is_some()
    }

    /// Removes all registered entries.
    pub fn clear(&self) {
        self.lock_entries().clear();
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.lock_entries().len()
    }

    /// Returns `true` when no entries are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Looks up `(verb, url)` and, on a hit, invokes the responder with the
    /// pending request body.
    ///
    /// The responder slot is cloned out under the map lock and invoked after
    /// the lock is released.
    pub fn respond(&self, verb: Verb, url: &str, request_body: &[u8]) -> Option<MockedResponse> {
        let key = MockKey {
            verb,
            url: url.to_string(),
        };
        let slot = self.lock_entries().get(&key).cloned()?;
        let mut responder = slot.lock().unwrap_or_else(|e| e.into_inner());
        Some(responder(request_body))
    }

    fn lock_entries(
        &self,
    ) -> std::sync::MutexGuard<'_, HashMap<MockKey, Arc<Mutex<BoxedResponder>>>> {
        // A panicking test must not wedge the registry for the rest of the
        // process, so poisoning is absorbed.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

static GLOBAL_REGISTRY: LazyLock<Arc<MockRegistry>> =
    LazyLock::new(|| Arc::new(MockRegistry::new()));

/// Returns the process-wide shared registry used by `with_mocked_responses`.
pub fn global_registry() -> Arc<MockRegistry> {
    Arc::clone(&GLOBAL_REGISTRY)
}

/// Registers a responder in the process-wide registry.
pub fn mock_response<F>(verb: Verb, url: impl Into<String>, responder: F)
where
    F: FnMut(&[u8]) -> MockedResponse + Send + 'static,
{
    GLOBAL_REGISTRY.register(verb, url, responder);
}

/// Removes all entries from the process-wide registry.
pub fn clear_mocked_responses() {
    GLOBAL_REGISTRY.clear();
}

/// Drop guard that clears a registry when it goes out of scope.
///
/// Test teardown runs even when the test body panics:
///
/// ```
/// use http_request::{MockedResponse, ScopedMocks, Verb};
///
/// let mocks = ScopedMocks::global();
/// mocks
///     .registry()
///     .register_response(Verb::Get, "http://localhost/x", MockedResponse::ok("{}"));
/// // cleared when `mocks` is dropped
/// ```
#[derive(Debug)]
pub struct ScopedMocks {
    registry: Arc<MockRegistry>,
}

impl ScopedMocks {
    /// Guards the process-wide registry.
    pub fn global() -> Self {
        Self::new(global_registry())
    }

    /// Guards the given registry.
    pub fn new(registry: Arc<MockRegistry>) -> Self {
        Self { registry }
    }

    /// The guarded registry.
    pub fn registry(&self) -> &Arc<MockRegistry> {
        &self.registry
    }
}

impl Drop for ScopedMocks {
    fn drop(&mut self) {
        self.registry.clear();
    }
}
