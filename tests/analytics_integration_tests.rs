use launchnav::bridge::{AnalyticsEvent, BridgeError, CallbackBridge, ConsoleHost, EventSink};
use launchnav::{LaunchNavigator, Platform};
use std::sync::Arc;
use wiremock::{
    matchers::{body_partial_json, method, path},
    Mock, MockServer, ResponseTemplate,
};

#[tokio::test]
async fn test_event_is_posted_as_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/events"))
        .and(body_partial_json(serde_json::json!({
            "name": "route_opened",
            "params": {"app": "waze"},
            "value_to_sum": 3.0
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let sink = EventSink::new(format!("{}/events", mock_server.uri()));
    let event = AnalyticsEvent::new(
        "route_opened",
        Some(serde_json::json!({"app": "waze"})),
        Some(3.0),
    );

    sink.send(&event).await.unwrap();
}

#[tokio::test]
async fn test_server_error_is_reported() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(503).set_body_string("collector down"))
        .mount(&mock_server)
        .await;

    let sink = EventSink::new(format!("{}/events", mock_server.uri()));
    let err = sink
        .send(&AnalyticsEvent::new("route_opened", None, None))
        .await
        .unwrap_err();

    match err {
        BridgeError::Api { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "collector down");
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_endpoint_is_a_network_error() {
    // Nothing listens on port 9 (discard) in the test environment
    let sink = EventSink::new("http://127.0.0.1:9/events");
    let err = sink
        .send(&AnalyticsEvent::new("route_opened", None, None))
        .await
        .unwrap_err();
    assert!(matches!(err, BridgeError::Network(_)));
}

fn console_navigator(endpoint: String) -> LaunchNavigator {
    let host = ConsoleHost::new(Platform::Android, vec![], Some(EventSink::new(endpoint)));
    LaunchNavigator::new(Arc::new(CallbackBridge::new(host)), Platform::Android)
}

#[tokio::test]
async fn test_console_event_is_sent_before_handle_resolves() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/events"))
        .and(body_partial_json(serde_json::json!({"name": "route_opened"})))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let nav = console_navigator(format!("{}/events", mock_server.uri()));
    nav.log_event("route_opened", None, Some(1.0))
        .unwrap()
        .await
        .unwrap();

    let received = mock_server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
}

#[tokio::test]
async fn test_console_event_failure_is_only_logged() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let nav = console_navigator(format!("{}/events", mock_server.uri()));
    nav.log_event("route_opened", None, None)
        .unwrap()
        .await
        .unwrap();
}
