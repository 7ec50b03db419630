use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use serde_json::json;
use tower::ServiceExt;

use super::common::*;
use crate::commerce::router::{commerce_router, CommerceServices, SIGNATURE_HEADER};
use crate::commerce::webhook::signature_header;

fn router(dispatcher: Arc<RecordingDispatcher>) -> Router {
    let services = CommerceServices {
        checkout: Arc::new(checkout_service(Some(Arc::new(
            FakePaymentGateway::default(),
        )))),
        webhooks: Arc::new(webhook_service(dispatcher)),
    };
    commerce_router(services)
}

fn json_post(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn checkout_route_returns_client_secret() {
    let response = router(Arc::new(RecordingDispatcher::default()))
        .oneshot(json_post(
            "/api/v1/checkout/sessions",
            json!({ "productId": "sleep-mask-pro" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["client_secret"], "cs_test_123_secret_abc");
}

#[tokio::test]
async fn checkout_route_maps_error_kinds_to_statuses() {
    let app = router(Arc::new(RecordingDispatcher::default()));

    let missing = app
        .clone()
        .oneshot(json_post(
            "/api/v1/checkout/sessions",
            json!({ "product_id": "nope" }),
        ))
        .await
        .expect("route executes");
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let unpriced = app
        .oneshot(json_post(
            "/api/v1/checkout/sessions",
            json!({ "product_id": "whoop-4" }),
        ))
        .await
        .expect("route executes");
    assert_eq!(unpriced.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let payload = read_json_body(unpriced).await;
    assert!(payload["error"]
        .as_str()
        .is_some_and(|message| message.contains("Stripe pricing")));
}

#[tokio::test]
async fn webhook_route_acknowledges_signed_deliveries() {
    let dispatcher = Arc::new(RecordingDispatcher::default());
    let payload = event_payload("checkout.session.completed", shopify_metadata());
    let signature = signature_header(WEBHOOK_SECRET, Utc::now().timestamp(), &payload);

    let response = router(dispatcher.clone())
        .oneshot(
            Request::post("/api/webhooks/stripe")
                .header(SIGNATURE_HEADER, signature)
                .body(Body::from(payload))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json_body(response).await, json!({ "received": true }));
    assert_eq!(dispatcher.orders().len(), 1);
}

#[tokio::test]
async fn webhook_route_rejects_unsigned_deliveries() {
    let dispatcher = Arc::new(RecordingDispatcher::default());
    let payload = event_payload("checkout.session.completed", shopify_metadata());

    let response = router(dispatcher.clone())
        .oneshot(
            Request::post("/api/webhooks/stripe")
                .body(Body::from(payload))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_json_body(response).await,
        json!({ "error": "No signature" })
    );
    assert!(dispatcher.orders().is_empty());
}

#[tokio::test]
async fn affiliate_clicks_are_acknowledged() {
    let response = router(Arc::new(RecordingDispatcher::default()))
        .oneshot(json_post(
            "/api/v1/affiliate-clicks",
            json!({ "productId": "polar-h10", "vendor": "amazon" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json_body(response).await, json!({ "success": true }));
}
