//! End-to-end tests over a real local HTTP server, covering the
//! materialized request shape (headers, auth, payload encoding) and the
//! dispatch layer's status-based handler selection.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use http_request::{Error, Request};

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
struct TestObject {
    id: i64,
    name: String,
    value: f64,
}

#[derive(Debug, Default, Deserialize)]
struct StatusObject {
    status: String,
}

fn test_object() -> TestObject {
    TestObject {
        id: 17,
        name: "Test Object 17".to_string(),
        value: 0.25,
    }
}

#[tokio::test]
async fn get_fetches_json_into_target() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/objects/17"))
        .and(query_param("env", "dev"))
        .respond_with(ResponseTemplate::new(200).set_body_json(test_object()))
        .mount(&server)
        .await;

    let mut fetched = TestObject::default();
    let meta = Request::new()
        .with_url(&format!("{}/api/v1/objects/17?env=dev", server.uri()))
        .fetch_json_to_object(&mut fetched)
        .await
        .unwrap();

    assert!(meta.is_ok());
    assert_eq!(meta.content_type.as_deref(), Some("application/json"));
    assert_eq!(fetched, test_object());
}

#[tokio::test]
async fn basic_auth_and_custom_headers_reach_the_wire() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/secure"))
        .and(header(
            "authorization",
            "Basic dGVzdF91c2VyOnRlc3RfcGFzc3dvcmQ=",
        ))
        .and(header("deployment", "test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "ok!"})))
        .mount(&server)
        .await;

    let mut status = StatusObject::default();
    let meta = Request::new()
        .with_url(&format!("{}/secure", server.uri()))
        .with_basic_auth("test_user", "test_password")
        .with_header("deployment", "test")
        .fetch_json_to_object(&mut status)
        .await
        .unwrap();

    assert!(meta.is_ok());
    assert_eq!(status.status, "ok!");
}

#[tokio::test]
async fn post_data_is_form_encoded_on_the_wire() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/submit"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string("foo=bar&moobar=zoobar"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "ok!"})))
        .mount(&server)
        .await;

    let mut status = StatusObject::default();
    let meta = Request::new()
        .with_url(&format!("{}/submit", server.uri()))
        .as_post()
        .with_post_data("foo", "bar")
        .with_post_data("moobar", "zoobar")
        .fetch_json_to_object(&mut status)
        .await
        .unwrap();

    assert!(meta.is_ok());
    assert_eq!(status.status, "ok!");
}

#[tokio::test]
async fn json_body_round_trips_through_an_echo_endpoint() {
    let server = MockServer::start().await;
    let sent = test_object();
    let body = serde_json::to_string(&sent).unwrap();
    Mock::given(method("POST"))
        .and(path("/echo"))
        .and(header("content-type", "application/json"))
        .and(body_string(body.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
        .mount(&server)
        .await;

    let mut echoed = TestObject::default();
    Request::new()
        .with_url(&format!("{}/echo", server.uri()))
        .as_post()
        .with_json_body(&sent)
        .fetch_json_to_object(&mut echoed)
        .await
        .unwrap();

    assert_eq!(echoed, sent);
}

#[tokio::test]
async fn xml_body_round_trips_through_an_echo_endpoint() {
    let server = MockServer::start().await;
    let sent = test_object();
    let body = http_request::serialization::to_xml(&sent).unwrap();
    Mock::given(method("POST"))
        .and(path("/echo"))
        .and(header("content-type", "application/xml"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/xml"))
        .mount(&server)
        .await;

    let mut echoed = TestObject::default();
    Request::new()
        .with_url(&format!("{}/echo", server.uri()))
        .as_post()
        .with_xml_body(&sent)
        .fetch_xml_to_object(&mut echoed)
        .await
        .unwrap();

    assert_eq!(echoed, sent);
}

#[tokio::test]
async fn non_200_status_selects_the_error_handler() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(serde_json::json!({"status": "internal error"})),
        )
        .mount(&server)
        .await;

    let request = Request::new().with_url(&format!("{}/broken", server.uri()));

    let mut ok_target = TestObject::default();
    let mut error_target = StatusObject::default();
    let meta = request
        .fetch_json_with_error_object(&mut ok_target, &mut error_target)
        .await
        .unwrap();

    assert_eq!(meta.status_code.as_u16(), 500);
    assert_eq!(error_target.status, "internal error");
    assert_eq!(ok_target, TestObject::default());
}

#[tokio::test]
async fn fetch_string_returns_body_regardless_of_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not here"))
        .mount(&server)
        .await;

    let body = Request::new()
        .with_url(&format!("{}/missing", server.uri()))
        .fetch_string()
        .await
        .unwrap();
    assert_eq!(body, "not here");
}

#[tokio::test]
async fn execute_discards_the_body_and_returns_meta() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/objects/17"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let meta = Request::new()
        .with_url(&format!("{}/api/v1/objects/17", server.uri()))
        .as_delete()
        .execute()
        .await
        .unwrap();
    assert!(meta.is_ok());
}

#[tokio::test]
async fn elapsed_timeout_fails_the_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let err = Request::new()
        .with_url(&format!("{}/slow", server.uri()))
        .with_timeout(Duration::from_millis(100))
        .fetch_raw_response()
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Timeout(_)), "got {err:?}");
}
