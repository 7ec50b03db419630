use std::sync::Arc;

use super::common::*;
use crate::catalog::ProductCatalog;
use crate::commerce::checkout::{CheckoutSessionRequest, ALLOWED_SHIPPING_COUNTRIES};
use crate::commerce::error::{CommerceError, GatewayError};

#[test]
fn start_session_returns_client_secret_for_stripe_priced_product() {
    let gateway = Arc::new(FakePaymentGateway::default());
    let service = checkout_service(Some(gateway.clone()));

    let secret = service
        .start_session("nmn-longevity-complex")
        .expect("session created");

    assert_eq!(secret, "cs_test_123_secret_abc");
    let requests = gateway.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.line_item.unit_amount, 8900);
    assert_eq!(request.line_item.quantity, 1);
    assert_eq!(request.line_item.currency, "usd");
    assert_eq!(request.metadata["productId"], "nmn-longevity-complex");
    assert_eq!(request.metadata["productSlug"], "nmn-longevity-complex");
    assert_eq!(request.metadata["vendor"], "shopify");
    assert_eq!(request.metadata["vendorProductId"], "44012345678901");
}

#[test]
fn start_session_rejects_unknown_products() {
    let gateway = Arc::new(FakePaymentGateway::default());
    let service = checkout_service(Some(gateway.clone()));

    match service.start_session("does-not-exist") {
        Err(CommerceError::NotFound(message)) => assert!(message.contains("does-not-exist")),
        other => panic!("expected not found, got {other:?}"),
    }
    assert!(gateway.requests().is_empty());
}

#[test]
fn product_without_checkout_price_is_a_configuration_error() {
    let gateway = Arc::new(FakePaymentGateway::default());
    let service = checkout_service(Some(gateway.clone()));

    match service.start_session("oura-ring-gen3") {
        Err(CommerceError::Configuration(message)) => {
            assert!(message.contains("Oura Ring Gen3") || message.contains("Stripe pricing"))
        }
        other => panic!("expected configuration error, got {other:?}"),
    }
    assert!(gateway.requests().is_empty());
}

#[test]
fn missing_payment_gateway_is_a_configuration_error() {
    let service = checkout_service(None);

    assert!(matches!(
        service.start_session("sleep-mask-pro"),
        Err(CommerceError::Configuration(_))
    ));
}

#[test]
fn upstream_failures_surface_as_payment_provider_errors() {
    let gateway = Arc::new(FakePaymentGateway::failing(GatewayError::Status {
        status: 402,
        body: "{}".to_string(),
    }));
    let service = checkout_service(Some(gateway));

    match service.start_session("red-light-panel") {
        Err(CommerceError::PaymentProvider(message)) => assert!(message.contains("402")),
        other => panic!("expected payment provider error, got {other:?}"),
    }
}

#[test]
fn vendor_product_id_metadata_defaults_to_empty() {
    let catalog = ProductCatalog::seed();
    let product = catalog.find_by_id("air-quality-monitor").unwrap();

    let request = CheckoutSessionRequest::for_product(product).unwrap();

    assert_eq!(request.metadata["vendorProductId"], "");
    assert_eq!(request.metadata["vendor"], "other");
    assert_eq!(request.allowed_countries, ALLOWED_SHIPPING_COUNTRIES.to_vec());
}
