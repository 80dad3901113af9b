//! Route API integration tests against a running server.
//!
//! Run with: cargo test --test routes_test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};

fn base_url() -> String {
    std::env::var("ECOROUTE_TEST_URL").unwrap_or_else(|_| "http://localhost:8080".to_string())
}

/// Routes between two coordinates come back labeled and capped at three.
#[tokio::test]
#[ignore]
async fn test_find_routes() {
    let client = Client::new();
    let resp = client
        .post(format!("{}/api/routes", base_url()))
        .json(&json!({ "start": "18.5074,73.8077", "end": "18.4529,73.8652" }))
        .send()
        .await
        .expect("Failed to request routes");

    assert!(resp.status().is_success(), "Should find routes");
    let body: Value = resp.json().await.unwrap();
    let routes = body["routes"].as_array().expect("routes array");
    assert!(!routes.is_empty() && routes.len() <= 3);
    assert!(routes.iter().any(|r| r["name"] == "Fastest Route"));
    for route in routes {
        assert!(route["eta"].is_u64());
        assert!(route["aqi"].is_null() || route["aqi"].is_u64());
    }
}

/// Missing fields are rejected before any provider call.
#[tokio::test]
#[ignore]
async fn test_missing_end_rejected() {
    let client = Client::new();
    let resp = client
        .post(format!("{}/api/routes", base_url()))
        .json(&json!({ "start": "Pune" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Start and End required");
}
