use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use super::checkout::{CheckoutService, PaymentGateway};
use super::clicks::{record_click, AffiliateClick};
use super::orders::OrderDispatcher;
use super::webhook::WebhookService;

pub const SIGNATURE_HEADER: &str = "stripe-signature";

/// Shared handles for the commerce endpoints.
pub struct CommerceServices<P, D> {
    pub checkout: Arc<CheckoutService<P>>,
    pub webhooks: Arc<WebhookService<D>>,
}

impl<P, D> Clone for CommerceServices<P, D> {
    fn clone(&self) -> Self {
        Self {
            checkout: Arc::clone(&self.checkout),
            webhooks: Arc::clone(&self.webhooks),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    #[serde(alias = "productId")]
    pub product_id: String,
}

/// Router exposing checkout initiation, payment webhooks, and click tracking.
pub fn commerce_router<P, D>(services: CommerceServices<P, D>) -> Router
where
    P: PaymentGateway + 'static,
    D: OrderDispatcher + 'static,
{
    Router::new()
        .route("/api/v1/checkout/sessions", post(checkout_handler::<P, D>))
        .route("/api/webhooks/stripe", post(webhook_handler::<P, D>))
        .route("/api/v1/affiliate-clicks", post(click_handler))
        .with_state(services)
}

pub(crate) async fn checkout_handler<P, D>(
    State(services): State<CommerceServices<P, D>>,
    Json(request): Json<CheckoutRequest>,
) -> Response
where
    P: PaymentGateway + 'static,
    D: OrderDispatcher + 'static,
{
    let checkout = Arc::clone(&services.checkout);
    let result =
        tokio::task::spawn_blocking(move || checkout.start_session(&request.product_id)).await;

    match result {
        Ok(Ok(client_secret)) => {
            let payload = json!({ "client_secret": client_secret });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Ok(Err(err)) => {
            let payload = json!({ "error": err.to_string() });
            (err.status_code(), Json(payload)).into_response()
        }
        Err(join_error) => internal_error(join_error),
    }
}

pub(crate) async fn webhook_handler<P, D>(
    State(services): State<CommerceServices<P, D>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response
where
    P: PaymentGateway + 'static,
    D: OrderDispatcher + 'static,
{
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let webhooks = Arc::clone(&services.webhooks);
    let result =
        tokio::task::spawn_blocking(move || webhooks.handle(&body, signature.as_deref())).await;

    match result {
        Ok(Ok(_receipt)) => (StatusCode::OK, Json(json!({ "received": true }))).into_response(),
        Ok(Err(err)) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
        Err(join_error) => internal_error(join_error),
    }
}

pub(crate) async fn click_handler(Json(click): Json<AffiliateClick>) -> Response {
    let receipt = record_click(&click);
    (StatusCode::OK, Json(json!({ "success": receipt.success }))).into_response()
}

fn internal_error(join_error: tokio::task::JoinError) -> Response {
    error!(error = %join_error, "commerce task aborted");
    let payload = json!({ "error": "internal error" });
    (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
}
