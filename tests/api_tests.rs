mod common;

use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

use common::helpers::{connect, registration, sample};
use sensorhub::{server::build_router, state::AppState};

async fn get_json(state: Arc<AppState>, uri: &str) -> (StatusCode, Value) {
    let response = build_router(state)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_stats_on_empty_hub() {
    let (status, body) = get_json(Arc::new(AppState::new()), "/stats").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "data": {
                "producers": [],
                "observers": [],
                "cachedSamples": 0,
                "connections": 0
            },
            "error": null
        })
    );
}

#[tokio::test]
async fn test_stats_reports_registries() {
    let state = Arc::new(AppState::new());
    let (_producer, _observer) = {
        let mut hub = state.hub.lock().await;
        let producer = connect(&mut hub, "PROD2222");
        let observer = connect(&mut hub, "OBS22222");
        hub.register_producer("PROD2222", registration("p1"));
        hub.publish("PROD2222", sample("p1", json!({ "cpu": 3 })));
        hub.register_observer("OBS22222");
        (producer, observer)
    };

    let (status, body) = get_json(state, "/stats").await;

    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["producers"][0]["producerUid"], "p1");
    assert_eq!(data["producers"][0]["ownerConnectionId"], "PROD2222");
    assert_eq!(data["observers"][0]["observerId"], "OBS22222");
    assert_eq!(data["cachedSamples"], 1);
    assert_eq!(data["connections"], 2);
}

#[tokio::test]
async fn test_unknown_route() {
    let (status, body) = get_json(Arc::new(AppState::new()), "/broadcast/x").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "data": null, "error": "NOT_FOUND" }));
}
