use std::sync::{Arc, Mutex};

use longevity_market::catalog::{Goal, ProductCatalog};
use longevity_market::commerce::orders::{
    ShopifyOrderCreated, ShopifyOrderGateway, ShopifyOrderRequest,
};
use longevity_market::commerce::webhook::signature_header;
use longevity_market::commerce::{
    CheckoutService, CheckoutSessionRequest, CreatedCheckoutSession, GatewayError, OrderRouter,
    PaymentGateway, WebhookService,
};
use longevity_market::quiz::QuizAnswers;
use longevity_market::recommendations::{generate_recommendations, CollectionKind};
use serde_json::json;

const SECRET: &str = "whsec_flow";
const NOW: i64 = 1_760_000_000;

#[derive(Default)]
struct CapturingGateway {
    requests: Mutex<Vec<CheckoutSessionRequest>>,
}

impl PaymentGateway for CapturingGateway {
    fn create_checkout_session(
        &self,
        request: &CheckoutSessionRequest,
    ) -> Result<CreatedCheckoutSession, GatewayError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(CreatedCheckoutSession {
            id: "cs_flow_1".to_string(),
            client_secret: "cs_flow_1_secret".to_string(),
        })
    }
}

#[derive(Default)]
struct CapturingShopify {
    orders: Mutex<Vec<ShopifyOrderRequest>>,
}

impl ShopifyOrderGateway for CapturingShopify {
    fn store_domain(&self) -> &str {
        "flow.myshopify.com"
    }

    fn create_order(
        &self,
        request: &ShopifyOrderRequest,
    ) -> Result<ShopifyOrderCreated, GatewayError> {
        self.orders.lock().unwrap().push(request.clone());
        Ok(ShopifyOrderCreated {
            order_id: "9001".to_string(),
        })
    }
}

#[test]
fn quiz_to_checkout_to_dropship_order() {
    let catalog = Arc::new(ProductCatalog::seed());
    let answers = QuizAnswers::new(vec![Goal::Sleep], 100.0, false);

    let collections = generate_recommendations(catalog.products(), &answers);
    let start_here = collections
        .iter()
        .find(|collection| collection.kind == CollectionKind::StartHere)
        .expect("start here collection");
    let pick = start_here
        .products
        .iter()
        .map(|scored| scored.product)
        .find(|product| product.supports_hosted_checkout())
        .expect("a hosted-checkout product is recommended");

    let gateway = Arc::new(CapturingGateway::default());
    let checkout = CheckoutService::new(Arc::clone(&catalog), Some(Arc::clone(&gateway)));
    let client_secret = checkout.start_session(&pick.id.0).expect("session starts");
    assert_eq!(client_secret, "cs_flow_1_secret");

    let metadata = gateway.requests.lock().unwrap()[0].metadata.clone();
    let event = json!({
        "id": "evt_flow",
        "type": "checkout.session.completed",
        "data": { "object": {
            "id": "cs_flow_1",
            "amount_total": pick.price_in_cents,
            "metadata": metadata,
            "customer_details": { "email": "sam@example.com", "name": "Sam Rivera" },
            "shipping_details": {
                "name": "Sam Rivera",
                "address": { "line1": "9 Elm St", "city": "Toronto", "state": "ON",
                             "postal_code": "M5V 2T6", "country": "CA" }
            }
        }}
    });
    let payload = serde_json::to_vec(&event).unwrap();
    let header = signature_header(SECRET, NOW, &payload);

    let shopify = Arc::new(CapturingShopify::default());
    let router = Arc::new(OrderRouter::new(Some(
        Arc::clone(&shopify) as Arc<dyn ShopifyOrderGateway>
    )));
    let webhooks = WebhookService::new(Some(SECRET.to_string()), 300, router);

    let receipt = webhooks
        .handle_at(&payload, Some(&header), NOW + 5)
        .expect("delivery accepted");
    let outcome = receipt.fulfillment.expect("order routed");

    if pick.vendor.tag() == "shopify" {
        assert!(outcome.success);
        assert_eq!(outcome.order_id.as_deref(), Some("9001"));
        let orders = shopify.orders.lock().unwrap();
        assert_eq!(orders.len(), 1);
        let body = serde_json::to_value(&orders[0]).unwrap();
        assert_eq!(
            body["order"]["line_items"][0]["variant_id"].to_string(),
            pick.vendor_product_id.clone().unwrap()
        );
        assert_eq!(body["order"]["shipping_address"]["country"], "CA");
        assert_eq!(body["order"]["customer"]["last_name"], "Rivera");
    } else {
        assert!(outcome.success);
        assert!(outcome
            .order_id
            .as_deref()
            .is_some_and(|id| id.starts_with("MANUAL-")));
    }
}

#[test]
fn affiliate_only_products_cannot_start_hosted_checkout() {
    let catalog = Arc::new(ProductCatalog::seed());
    let checkout = CheckoutService::new(
        Arc::clone(&catalog),
        Some(Arc::new(CapturingGateway::default())),
    );

    for product in catalog
        .products()
        .iter()
        .filter(|product| !product.supports_hosted_checkout())
    {
        let err = checkout
            .start_session(&product.id.0)
            .expect_err("affiliate products are not checkout-enabled");
        assert_eq!(err.status_code(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    }
}
