//! Mock registry integration tests: dispatch short-circuits the network
//! when a registry entry matches, including the sequential-response
//! scenario where one key yields a different body on each fetch.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use http_request::{
    Error, MockRegistry, MockedResponse, Request, ScopedMocks, Verb, clear_mocked_responses,
    global_registry, mock_response,
};

#[derive(Debug, Default, Deserialize)]
struct Borrower {
    id: i64,
    #[serde(default)]
    deployment_id: i64,
}

#[derive(Debug, Default, Deserialize)]
struct ApiError {
    message: String,
}

const BORROWER_URL: &str = "http://localhost:5001/api/v1/borrowers/2?foo=bar&moobar=zoobar";

fn borrower_request(registry: Arc<MockRegistry>) -> Request {
    Request::new()
        .as_get()
        .with_scheme("http")
        .with_host("localhost:5001")
        .with_path("/api/v1/borrowers/2")
        .with_header("deployment", "test")
        .with_query_string("foo", "bar")
        .with_query_string("moobar", "zoobar")
        .with_timeout(Duration::from_millis(500))
        .with_mock_registry(registry)
}

#[tokio::test]
async fn stateful_responder_pages_through_bodies() {
    let registry = Arc::new(MockRegistry::new());
    let bodies = [
        r#"{"id": 0, "deployment_id": 2}"#,
        r#"{"id": 1, "deployment_id": 2}"#,
        r#"{"id": 2, "deployment_id": 2}"#,
    ];
    let mut i = 0;
    registry.register(Verb::Get, BORROWER_URL, move |_| {
        let body = bodies[i];
        i += 1;
        MockedResponse::ok(body)
    });

    let request = borrower_request(Arc::clone(&registry));
    for expected_id in 0..3 {
        let mut borrower = Borrower::default();
        let meta = request.fetch_json_to_object(&mut borrower).await.unwrap();
        assert!(meta.is_ok());
        assert_eq!(borrower.id, expected_id);
        assert_eq!(borrower.deployment_id, 2);
    }
}

#[tokio::test]
async fn mocked_request_never_touches_the_network() {
    let registry = Arc::new(MockRegistry::new());
    registry.register_response(
        Verb::Get,
        // port 1 is closed; a real dispatch would fail with a transport error
        "http://127.0.0.1:1/api/v1/ping",
        MockedResponse::ok(r#"{"id": 42}"#),
    );

    let request = Request::new()
        .with_url("http://127.0.0.1:1/api/v1/ping")
        .with_mock_registry(Arc::clone(&registry));

    let mut borrower = Borrower::default();
    let meta = request.fetch_json_to_object(&mut borrower).await.unwrap();
    assert_eq!(meta.status_code.as_u16(), 200);
    assert_eq!(borrower.id, 42);

    // after clearing, the same call reaches the real transport and fails
    registry.clear();
    let result = request.fetch_raw_response().await;
    assert!(matches!(result, Err(Error::Transport(_))));
}

#[tokio::test]
async fn mock_lookup_is_exact_match() {
    let registry = Arc::new(MockRegistry::new());
    registry.register_response(
        Verb::Post,
        "http://127.0.0.1:1/api/v1/ping",
        MockedResponse::ok("{}"),
    );

    // same URL, different verb: no mock, so the dead port is hit
    let request = Request::new()
        .with_url("http://127.0.0.1:1/api/v1/ping")
        .as_get()
        .with_mock_registry(registry);
    assert!(request.fetch_raw_response().await.is_err());
}

#[tokio::test]
async fn responder_receives_the_pending_request_body() {
    let registry = Arc::new(MockRegistry::new());
    registry.register(Verb::Post, "http://localhost:5001/echo", |body| {
        MockedResponse::ok(body.to_vec())
    });

    let echoed = Request::new()
        .with_url("http://localhost:5001/echo")
        .as_post()
        .with_raw_body(r#"{"hello":"world"}"#)
        .with_mock_registry(registry)
        .fetch_string()
        .await
        .unwrap();
    assert_eq!(echoed, r#"{"hello":"world"}"#);
}

#[tokio::test]
async fn non_200_mock_dispatches_to_error_handler() {
    let registry = Arc::new(MockRegistry::new());
    registry.register_response(
        Verb::Get,
        "http://localhost:5001/broken",
        MockedResponse::new(500, r#"{"message": "boom"}"#),
    );

    let request = Request::new()
        .with_url("http://localhost:5001/broken")
        .with_mock_registry(registry);

    let mut borrower = Borrower { id: -1, deployment_id: -1 };
    let mut api_error = ApiError::default();
    let meta = request
        .fetch_json_with_error_object(&mut borrower, &mut api_error)
        .await
        .unwrap();

    assert_eq!(meta.status_code.as_u16(), 500);
    assert_eq!(api_error.message, "boom");
    // success target untouched
    assert_eq!(borrower.id, -1);
}

#[tokio::test]
async fn decode_failure_still_reports_the_status() {
    let registry = Arc::new(MockRegistry::new());
    registry.register_response(
        Verb::Get,
        "http://localhost:5001/not-json",
        MockedResponse::ok("<html>hello</html>"),
    );

    let request = Request::new()
        .with_url("http://localhost:5001/not-json")
        .with_mock_registry(registry);

    let mut borrower = Borrower::default();
    let err = request.fetch_json_to_object(&mut borrower).await.unwrap_err();
    assert_eq!(err.status(), Some(200));
    assert!(matches!(err, Error::Decode { .. }));
}

#[tokio::test]
async fn global_registry_with_scoped_teardown() {
    // URL unique to this test so parallel tests cannot collide on the
    // shared registry.
    let url = "http://localhost:5001/api/v1/global-registry-test";
    {
        let _mocks = ScopedMocks::global();
        mock_response(Verb::Get, url, |_| MockedResponse::ok(r#"{"id": 7}"#));

        let mut borrower = Borrower::default();
        Request::new()
            .with_url(url)
            .with_mocked_responses()
            .fetch_json_to_object(&mut borrower)
            .await
            .unwrap();
        assert_eq!(borrower.id, 7);
    }
    // guard dropped: registry is empty again
    assert!(global_registry().respond(Verb::Get, url, b"").is_none());

    mock_response(Verb::Get, url, |_| MockedResponse::ok("{}"));
    clear_mocked_responses();
    assert!(global_registry().respond(Verb::Get, url, b"").is_none());
}
