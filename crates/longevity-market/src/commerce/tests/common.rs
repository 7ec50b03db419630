use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::{json, Value};

use crate::catalog::ProductCatalog;
use crate::commerce::checkout::{
    CheckoutService, CheckoutSessionRequest, CreatedCheckoutSession, PaymentGateway,
};
use crate::commerce::error::{CommerceError, GatewayError};
use crate::commerce::orders::{
    FulfillmentReceipt, FulfillmentRoute, OrderDispatcher, OrderParams, ShippingAddress,
    ShopifyOrderCreated, ShopifyOrderGateway, ShopifyOrderRequest,
};
use crate::commerce::webhook::WebhookService;

pub(super) const WEBHOOK_SECRET: &str = "whsec_test_secret";
pub(super) const NOW: i64 = 1_760_000_000;

#[derive(Default)]
pub(super) struct FakePaymentGateway {
    requests: Mutex<Vec<CheckoutSessionRequest>>,
    failure: Option<GatewayError>,
}

impl FakePaymentGateway {
    pub(super) fn failing(failure: GatewayError) -> Self {
        Self {
            requests: Mutex::default(),
            failure: Some(failure),
        }
    }

    pub(super) fn requests(&self) -> Vec<CheckoutSessionRequest> {
        self.requests.lock().expect("gateway mutex poisoned").clone()
    }
}

impl PaymentGateway for FakePaymentGateway {
    fn create_checkout_session(
        &self,
        request: &CheckoutSessionRequest,
    ) -> Result<CreatedCheckoutSession, GatewayError> {
        self.requests
            .lock()
            .expect("gateway mutex poisoned")
            .push(request.clone());
        match &self.failure {
            Some(failure) => Err(failure.clone()),
            None => Ok(CreatedCheckoutSession {
                id: "cs_test_123".to_string(),
                client_secret: "cs_test_123_secret_abc".to_string(),
            }),
        }
    }
}

#[derive(Default)]
pub(super) struct RecordingDispatcher {
    orders: Mutex<Vec<OrderParams>>,
    failure: Option<CommerceError>,
}

impl RecordingDispatcher {
    pub(super) fn failing(failure: CommerceError) -> Self {
        Self {
            orders: Mutex::default(),
            failure: Some(failure),
        }
    }

    pub(super) fn orders(&self) -> Vec<OrderParams> {
        self.orders.lock().expect("dispatcher mutex poisoned").clone()
    }
}

impl OrderDispatcher for RecordingDispatcher {
    fn dispatch(&self, order: &OrderParams) -> Result<FulfillmentReceipt, CommerceError> {
        self.orders
            .lock()
            .expect("dispatcher mutex poisoned")
            .push(order.clone());
        match &self.failure {
            Some(failure) => Err(failure.clone()),
            None => Ok(FulfillmentReceipt {
                route: FulfillmentRoute::Manual,
                order_id: "MANUAL-1".to_string(),
                tracking_url: None,
            }),
        }
    }
}

#[derive(Default)]
pub(super) struct FakeShopify {
    requests: Mutex<Vec<ShopifyOrderRequest>>,
    failure: Option<GatewayError>,
}

impl FakeShopify {
    pub(super) fn failing(failure: GatewayError) -> Self {
        Self {
            requests: Mutex::default(),
            failure: Some(failure),
        }
    }

    pub(super) fn requests(&self) -> Vec<ShopifyOrderRequest> {
        self.requests.lock().expect("shopify mutex poisoned").clone()
    }
}

impl ShopifyOrderGateway for FakeShopify {
    fn store_domain(&self) -> &str {
        "longevity-test.myshopify.com"
    }

    fn create_order(
        &self,
        request: &ShopifyOrderRequest,
    ) -> Result<ShopifyOrderCreated, GatewayError> {
        self.requests
            .lock()
            .expect("shopify mutex poisoned")
            .push(request.clone());
        match &self.failure {
            Some(failure) => Err(failure.clone()),
            None => Ok(ShopifyOrderCreated {
                order_id: "5550001".to_string(),
            }),
        }
    }
}

pub(super) fn checkout_service(
    gateway: Option<Arc<FakePaymentGateway>>,
) -> CheckoutService<FakePaymentGateway> {
    CheckoutService::new(Arc::new(ProductCatalog::seed()), gateway)
}

pub(super) fn webhook_service(
    dispatcher: Arc<RecordingDispatcher>,
) -> WebhookService<RecordingDispatcher> {
    WebhookService::new(Some(WEBHOOK_SECRET.to_string()), 300, dispatcher)
}

pub(super) fn shipping_address() -> ShippingAddress {
    ShippingAddress {
        line1: Some("1 Main St".to_string()),
        line2: None,
        city: Some("Austin".to_string()),
        state: Some("TX".to_string()),
        postal_code: Some("78701".to_string()),
        country: None,
    }
}

pub(super) fn order_params(vendor: Option<&str>) -> OrderParams {
    OrderParams {
        product_id: "nmn-longevity-complex".to_string(),
        vendor: vendor.map(str::to_string),
        vendor_product_id: Some("44012345".to_string()),
        customer_email: "ada@example.com".to_string(),
        customer_name: "Ada Byron Lovelace".to_string(),
        shipping_address: Some(shipping_address()),
        stripe_session_id: "cs_test_123".to_string(),
        amount_paid: 8900,
    }
}

pub(super) fn event_payload(event_type: &str, metadata: Value) -> Vec<u8> {
    let event = json!({
        "id": "evt_test_1",
        "type": event_type,
        "data": {
            "object": {
                "id": "cs_test_123",
                "amount_total": 8900,
                "metadata": metadata,
                "customer_details": { "email": "ada@example.com", "name": "Ada Lovelace" },
                "shipping_details": {
                    "name": "Ada Lovelace",
                    "address": { "line1": "1 Main St", "city": "Austin", "state": "TX",
                                 "postal_code": "78701", "country": "US" }
                }
            }
        }
    });
    serde_json::to_vec(&event).expect("event serializes")
}

pub(super) fn shopify_metadata() -> Value {
    json!({
        "productId": "nmn-longevity-complex",
        "productSlug": "nmn-longevity-complex",
        "vendor": "shopify",
        "vendorProductId": "44012345"
    })
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("json body")
}
