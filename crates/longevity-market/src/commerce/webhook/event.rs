use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::commerce::orders::{OrderParams, ShippingAddress};

pub const CHECKOUT_SESSION_COMPLETED: &str = "checkout.session.completed";

#[derive(Debug, Clone, Deserialize)]
pub struct StripeEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: EventData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventData {
    pub object: Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckoutSessionObject {
    pub id: String,
    #[serde(default)]
    pub metadata: Option<HashMap<String, String>>,
    #[serde(default)]
    pub customer_details: Option<CustomerDetails>,
    #[serde(default)]
    pub shipping_details: Option<ShippingDetails>,
    #[serde(default)]
    pub collected_information: Option<CollectedInformation>,
    #[serde(default)]
    pub amount_total: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerDetails {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShippingDetails {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<ShippingAddress>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CollectedInformation {
    #[serde(default)]
    pub shipping_details: Option<ShippingDetails>,
}

impl CheckoutSessionObject {
    fn metadata_value(&self, key: &str) -> Option<String> {
        self.metadata
            .as_ref()
            .and_then(|metadata| metadata.get(key))
            .filter(|value| !value.is_empty())
            .cloned()
    }

    fn shipping(&self) -> Option<&ShippingDetails> {
        self.shipping_details.as_ref().or_else(|| {
            self.collected_information
                .as_ref()
                .and_then(|info| info.shipping_details.as_ref())
        })
    }

    /// `None` when the session carries no product id in its metadata.
    pub fn order_params(&self) -> Option<OrderParams> {
        let product_id = self.metadata_value("productId")?;
        let shipping = self.shipping();
        let customer = self.customer_details.clone().unwrap_or_default();

        Some(OrderParams {
            product_id,
            vendor: self.metadata_value("vendor"),
            vendor_product_id: self.metadata_value("vendorProductId"),
            customer_email: customer.email.unwrap_or_default(),
            customer_name: shipping
                .and_then(|details| details.name.clone())
                .or(customer.name)
                .unwrap_or_default(),
            shipping_address: shipping.and_then(|details| details.address.clone()),
            stripe_session_id: self.id.clone(),
            amount_paid: self.amount_total.unwrap_or_default(),
        })
    }
}
