use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use super::error::GatewayError;
use super::orders::{ShopifyOrderCreated, ShopifyOrderGateway, ShopifyOrderRequest};

pub const ADMIN_API_VERSION: &str = "2024-01";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Blocking Admin API client used for dropship order placement.
pub struct ShopifyAdminClient {
    agent: ureq::Agent,
    domain: String,
    admin_token: String,
}

impl ShopifyAdminClient {
    pub fn new(domain: impl Into<String>, admin_token: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build();
        Self {
            agent,
            domain: domain.into(),
            admin_token: admin_token.into(),
        }
    }

    pub fn orders_url(&self) -> String {
        format!(
            "https://{}/admin/api/{ADMIN_API_VERSION}/orders.json",
            self.domain
        )
    }
}

#[derive(Debug, Deserialize)]
struct CreatedOrderEnvelope {
    order: CreatedOrder,
}

#[derive(Debug, Deserialize)]
struct CreatedOrder {
    id: Value,
}

impl ShopifyOrderGateway for ShopifyAdminClient {
    fn store_domain(&self) -> &str {
        &self.domain
    }

    fn create_order(
        &self,
        request: &ShopifyOrderRequest,
    ) -> Result<ShopifyOrderCreated, GatewayError> {
        let response = self
            .agent
            .post(&self.orders_url())
            .set("X-Shopify-Access-Token", &self.admin_token)
            .send_json(request)?;

        let envelope: CreatedOrderEnvelope = response
            .into_json()
            .map_err(|err| GatewayError::Decode(err.to_string()))?;

        let order_id = match envelope.order.id {
            Value::String(id) => id,
            other => other.to_string(),
        };
        Ok(ShopifyOrderCreated { order_id })
    }
}
