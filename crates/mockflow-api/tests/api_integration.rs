//! Integration tests for the Mockflow REST API.
//!
//! These tests verify the endpoints the configuration view consumes, plus
//! the test-only cart mock route.
//!
//! Run with: `cargo test --package mockflow-api --test api_integration`

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use mockflow_api::{create_api_router, create_sample_state, mock_handlers, SAMPLE_FLOW};

/// Create a test router pre-populated with the sample flow.
fn create_test_router() -> Router {
    create_api_router(create_sample_state())
}

/// Helper to make a GET request.
async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap_or(json!(null));

    (status, json)
}

/// Helper to make a POST request with JSON body.
async fn post(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap_or(json!(null));

    (status, json)
}

// =============================================================================
// Graph Endpoint Tests
// =============================================================================

#[tokio::test]
async fn test_graph_returns_bare_array_of_trees() {
    let router = create_test_router();
    let (status, body) = get(&router, "/graph").await;

    assert_eq!(status, StatusCode::OK);
    let trees = body.as_array().expect("graph payload must be an array");
    assert_eq!(trees.len(), 1);
    assert_eq!(trees[0]["function"], "checkout");
    assert!(trees[0]["children"].is_array());
}

#[tokio::test]
async fn test_graph_is_empty_array_when_no_flows_configured() {
    let state = mockflow_api::create_api_state(Vec::new(), Default::default());
    let router = create_api_router(state);
    let (status, body) = get(&router, "/graph").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

// =============================================================================
// Dependencies Endpoint Tests
// =============================================================================

#[tokio::test]
async fn test_dependencies_scoped_to_flow() {
    let router = create_test_router();
    let (status, body) = get(&router, &format!("/dependencies?flow={SAMPLE_FLOW}")).await;

    assert_eq!(status, StatusCode::OK);
    let deps = body.as_array().unwrap();
    assert!(deps.contains(&json!("payment_gateway")));
    assert!(deps.contains(&json!("inventory_service")));
}

#[tokio::test]
async fn test_dependencies_unknown_flow_yields_empty_array() {
    let router = create_test_router();
    let (status, body) = get(&router, "/dependencies?flow=no_such_flow").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_dependencies_missing_flow_param_is_rejected() {
    let router = create_test_router();
    let (status, _) = get(&router, "/dependencies").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Configuration Endpoint Tests
// =============================================================================

#[tokio::test]
async fn test_configuration_defaults_for_unsaved_flow() {
    let router = create_test_router();
    let (status, body) = get(&router, &format!("/configuration?flow={SAMPLE_FLOW}")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["flow_name"], SAMPLE_FLOW);
    assert_eq!(body["entities_to_mock"], json!([]));
    assert_eq!(body["is_db_mocked"], false);
}

#[tokio::test]
async fn test_configuration_save_then_load_round_trip() {
    let router = create_test_router();

    let config = json!({
        "flow_name": SAMPLE_FLOW,
        "entities_to_mock": ["payment_gateway", "fraud_check"],
        "is_db_mocked": true,
        "db_credentials": { "username": "svc", "password": "secret" }
    });

    let (status, ack) = post(&router, "/configuration", config.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ack["saved"], true);
    assert_eq!(ack["flow_name"], SAMPLE_FLOW);

    let (status, body) = get(&router, &format!("/configuration?flow={SAMPLE_FLOW}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, config);
}

#[tokio::test]
async fn test_configuration_save_overwrites_previous() {
    let router = create_test_router();

    let first = json!({
        "flow_name": SAMPLE_FLOW,
        "entities_to_mock": ["payment_gateway"],
        "is_db_mocked": false,
        "db_credentials": { "username": "", "password": "" }
    });
    let second = json!({
        "flow_name": SAMPLE_FLOW,
        "entities_to_mock": [],
        "is_db_mocked": true,
        "db_credentials": { "username": "", "password": "" }
    });

    post(&router, "/configuration", first).await;
    post(&router, "/configuration", second.clone()).await;

    let (_, body) = get(&router, &format!("/configuration?flow={SAMPLE_FLOW}")).await;
    assert_eq!(body, second);
}

#[tokio::test]
async fn test_configuration_malformed_body_is_rejected() {
    let router = create_test_router();
    let (status, _) = post(&router, "/configuration", json!({ "flow_name": 42 })).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

// =============================================================================
// Health Endpoint Tests
// =============================================================================

#[tokio::test]
async fn test_health_reports_node_and_edge_counts() {
    let router = create_test_router();
    let (status, body) = get(&router, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    // Sample tree: checkout + 3 stages + 4 leaf dependencies = 8 nodes.
    assert_eq!(body["nodes"], 8);
    assert_eq!(body["edges"], 7);
}

// =============================================================================
// Mock Handler Tests
// =============================================================================

#[tokio::test]
async fn test_cart_mock_returns_canned_payload() {
    let router = mock_handlers();
    let (status, body) = post(&router, "/carts/42", json!({ "items": [1, 2, 3] })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["Laptop", "Phone"]));
}

#[tokio::test]
async fn test_cart_mock_accepts_non_utf8_body() {
    let router = mock_handlers();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/carts/42")
        .header("Content-Type", "application/octet-stream")
        .body(Body::from(vec![0xff, 0xfe, 0x00, 0x01]))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let payload: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(payload, json!(["Laptop", "Phone"]));
}

#[tokio::test]
async fn test_cart_mock_ignores_cart_id_and_body() {
    let router = mock_handlers();

    for (id, body) in [
        ("1", json!({})),
        ("abc-def", json!("anything")),
        ("999999", json!(null)),
    ] {
        let (status, payload) = post(&router, &format!("/carts/{id}"), body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload, json!(["Laptop", "Phone"]));
    }
}
