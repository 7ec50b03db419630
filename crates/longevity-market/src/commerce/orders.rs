use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info, warn};

use super::error::{CommerceError, GatewayError};
use crate::catalog::Vendor;

pub const SHOPIFY_ORDER_NOTE_PREFIX: &str = "Dropship order from LongevityBase. Stripe Session: ";
pub const SHOPIFY_ORDER_TAGS: &str = "dropship,longevitybase";
const DEFAULT_COUNTRY: &str = "US";

/// Postal address collected by the hosted checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    #[serde(default)]
    pub line1: Option<String>,
    #[serde(default)]
    pub line2: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

/// Everything needed to place a downstream order for a paid checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderParams {
    pub product_id: String,
    pub vendor: Option<String>,
    pub vendor_product_id: Option<String>,
    pub customer_email: String,
    pub customer_name: String,
    pub shipping_address: Option<ShippingAddress>,
    pub stripe_session_id: String,
    pub amount_paid: i64,
}

/// Fulfillment channel selected from the vendor metadata tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FulfillmentRoute {
    Shopify,
    Amazon,
    Manual,
}

impl FulfillmentRoute {
    /// Metadata tags must match the lowercase vendor tag exactly; anything else is manual.
    pub fn for_vendor(tag: Option<&str>) -> Self {
        let Some(vendor) = tag.and_then(|tag| Vendor::ALL.into_iter().find(|v| v.tag() == tag))
        else {
            return FulfillmentRoute::Manual;
        };
        match vendor {
            Vendor::Shopify => FulfillmentRoute::Shopify,
            Vendor::Amazon => FulfillmentRoute::Amazon,
            Vendor::Ebay
            | Vendor::Oura
            | Vendor::Whoop
            | Vendor::EightSleep
            | Vendor::Levels
            | Vendor::Thorne
            | Vendor::Other => FulfillmentRoute::Manual,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FulfillmentReceipt {
    pub route: FulfillmentRoute,
    pub order_id: String,
    pub tracking_url: Option<String>,
}

/// Flattened result reported back to the webhook log and API callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Result<FulfillmentReceipt, CommerceError>> for OrderOutcome {
    fn from(result: Result<FulfillmentReceipt, CommerceError>) -> Self {
        match result {
            Ok(receipt) => OrderOutcome {
                success: true,
                order_id: Some(receipt.order_id),
                tracking_url: receipt.tracking_url,
                error: None,
            },
            Err(err) => OrderOutcome {
                success: false,
                order_id: None,
                tracking_url: None,
                error: Some(err.to_string()),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShopifyLineItem {
    pub variant_id: Value,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShopifyCustomer {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShopifyAddress {
    pub first_name: String,
    pub last_name: String,
    pub address1: String,
    pub address2: String,
    pub city: String,
    pub province: String,
    pub country: String,
    pub zip: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShopifyOrder {
    pub email: String,
    pub fulfillment_status: &'static str,
    pub send_receipt: bool,
    pub send_fulfillment_receipt: bool,
    pub line_items: Vec<ShopifyLineItem>,
    pub customer: ShopifyCustomer,
    pub shipping_address: ShopifyAddress,
    pub note: String,
    pub tags: &'static str,
}

/// Body of the Admin API order creation call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShopifyOrderRequest {
    pub order: ShopifyOrder,
}

impl ShopifyOrderRequest {
    pub fn build(order: &OrderParams, variant_id: &str, address: &ShippingAddress) -> Self {
        let (first_name, last_name) = split_name(&order.customer_name);
        let field = |value: &Option<String>| value.clone().unwrap_or_default();

        Self {
            order: ShopifyOrder {
                email: order.customer_email.clone(),
                fulfillment_status: "unfulfilled",
                send_receipt: false,
                send_fulfillment_receipt: false,
                line_items: vec![ShopifyLineItem {
                    variant_id: variant_id_value(variant_id),
                    quantity: 1,
                }],
                customer: ShopifyCustomer {
                    email: order.customer_email.clone(),
                    first_name: first_name.clone(),
                    last_name: last_name.clone(),
                },
                shipping_address: ShopifyAddress {
                    first_name,
                    last_name,
                    address1: field(&address.line1),
                    address2: field(&address.line2),
                    city: field(&address.city),
                    province: field(&address.state),
                    country: address
                        .country
                        .clone()
                        .filter(|country| !country.is_empty())
                        .unwrap_or_else(|| DEFAULT_COUNTRY.to_string()),
                    zip: field(&address.postal_code),
                },
                note: format!("{SHOPIFY_ORDER_NOTE_PREFIX}{}", order.stripe_session_id),
                tags: SHOPIFY_ORDER_TAGS,
            },
        }
    }
}

/// First whitespace token, then the remaining tokens joined by single spaces.
pub fn split_name(full_name: &str) -> (String, String) {
    let mut parts = full_name.split_whitespace();
    let first = parts.next().unwrap_or_default().to_string();
    let rest = parts.collect::<Vec<_>>().join(" ");
    (first, rest)
}

fn variant_id_value(variant_id: &str) -> Value {
    variant_id
        .parse::<u64>()
        .map(Value::from)
        .unwrap_or_else(|_| Value::from(variant_id))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopifyOrderCreated {
    pub order_id: String,
}

/// Outbound port to the Shopify Admin API.
pub trait ShopifyOrderGateway: Send + Sync {
    fn store_domain(&self) -> &str;

    fn create_order(
        &self,
        request: &ShopifyOrderRequest,
    ) -> Result<ShopifyOrderCreated, GatewayError>;
}

/// Anything able to turn paid checkout parameters into a downstream order.
pub trait OrderDispatcher: Send + Sync {
    fn dispatch(&self, order: &OrderParams) -> Result<FulfillmentReceipt, CommerceError>;
}

/// Routes paid orders to the vendor-specific fulfillment channel.
#[derive(Clone, Default)]
pub struct OrderRouter {
    shopify: Option<Arc<dyn ShopifyOrderGateway>>,
}

impl OrderRouter {
    pub fn new(shopify: Option<Arc<dyn ShopifyOrderGateway>>) -> Self {
        Self { shopify }
    }

    pub fn route(&self, order: &OrderParams) -> Result<FulfillmentReceipt, CommerceError> {
        match FulfillmentRoute::for_vendor(order.vendor.as_deref()) {
            FulfillmentRoute::Shopify => self.place_shopify_order(order),
            FulfillmentRoute::Amazon => Err(CommerceError::NotImplemented(
                "Amazon integration not yet implemented".to_string(),
            )),
            FulfillmentRoute::Manual => Ok(self.record_manual_order(order)),
        }
    }

    fn place_shopify_order(&self, order: &OrderParams) -> Result<FulfillmentReceipt, CommerceError> {
        let gateway = self
            .shopify
            .as_ref()
            .ok_or_else(|| CommerceError::Configuration("Shopify not configured".to_string()))?;

        let variant_id = order
            .vendor_product_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| CommerceError::Validation("No Shopify product ID mapped".to_string()))?;

        let address = order
            .shipping_address
            .as_ref()
            .ok_or_else(|| CommerceError::Validation("No shipping address provided".to_string()))?;

        let request = ShopifyOrderRequest::build(order, variant_id, address);
        let created = gateway.create_order(&request).map_err(|err| {
            error!(
                product_id = %order.product_id,
                session_id = %order.stripe_session_id,
                error = %err,
                "shopify order creation failed"
            );
            match err {
                GatewayError::Status { status, .. } => CommerceError::VendorApi {
                    vendor: Vendor::Shopify.tag().to_string(),
                    status: Some(status),
                    message: format!("Shopify API error: {status}"),
                },
                other => CommerceError::VendorApi {
                    vendor: Vendor::Shopify.tag().to_string(),
                    status: None,
                    message: other.to_string(),
                },
            }
        })?;

        info!(
            order_id = %created.order_id,
            session_id = %order.stripe_session_id,
            "shopify order created"
        );

        let tracking_url = format!(
            "https://{}/admin/orders/{}",
            gateway.store_domain(),
            created.order_id
        );
        Ok(FulfillmentReceipt {
            route: FulfillmentRoute::Shopify,
            order_id: created.order_id,
            tracking_url: Some(tracking_url),
        })
    }

    fn record_manual_order(&self, order: &OrderParams) -> FulfillmentReceipt {
        let order_id = format!("MANUAL-{}", Utc::now().timestamp_millis());
        warn!(
            order_id = %order_id,
            vendor = order.vendor.as_deref().unwrap_or("unknown"),
            product_id = %order.product_id,
            customer_email = %order.customer_email,
            amount_paid = order.amount_paid,
            "manual fulfillment required"
        );
        FulfillmentReceipt {
            route: FulfillmentRoute::Manual,
            order_id,
            tracking_url: None,
        }
    }
}

impl OrderDispatcher for OrderRouter {
    fn dispatch(&self, order: &OrderParams) -> Result<FulfillmentReceipt, CommerceError> {
        self.route(order)
    }
}
