use std::time::Duration;

use serde::Deserialize;

use super::checkout::{CheckoutSessionRequest, CreatedCheckoutSession, PaymentGateway};
use super::error::GatewayError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Blocking client for the hosted checkout session endpoint.
pub struct StripeClient {
    agent: ureq::Agent,
    api_base: String,
    secret_key: String,
}

impl StripeClient {
    pub fn new(api_base: impl Into<String>, secret_key: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build();
        Self {
            agent,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            secret_key: secret_key.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    id: String,
    #[serde(default)]
    client_secret: Option<String>,
}

/// Flattens a session request into the provider's bracketed form encoding.
pub fn form_fields(request: &CheckoutSessionRequest) -> Vec<(String, String)> {
    let item = &request.line_item;
    let mut fields = vec![
        ("ui_mode".to_string(), "embedded".to_string()),
        ("redirect_on_completion".to_string(), "never".to_string()),
        ("mode".to_string(), "payment".to_string()),
        (
            "line_items[0][price_data][currency]".to_string(),
            item.currency.to_string(),
        ),
        (
            "line_items[0][price_data][product_data][name]".to_string(),
            item.name.clone(),
        ),
        (
            "line_items[0][price_data][unit_amount]".to_string(),
            item.unit_amount.to_string(),
        ),
        (
            "line_items[0][quantity]".to_string(),
            item.quantity.to_string(),
        ),
    ];

    if !item.description.is_empty() {
        fields.push((
            "line_items[0][price_data][product_data][description]".to_string(),
            item.description.clone(),
        ));
    }

    for (index, country) in request.allowed_countries.iter().enumerate() {
        fields.push((
            format!("shipping_address_collection[allowed_countries][{index}]"),
            country.to_string(),
        ));
    }

    for (key, value) in &request.metadata {
        fields.push((format!("metadata[{key}]"), value.clone()));
    }

    fields
}

impl PaymentGateway for StripeClient {
    fn create_checkout_session(
        &self,
        request: &CheckoutSessionRequest,
    ) -> Result<CreatedCheckoutSession, GatewayError> {
        let fields = form_fields(request);
        let pairs: Vec<(&str, &str)> = fields
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
            .collect();

        let response = self
            .agent
            .post(&format!("{}/v1/checkout/sessions", self.api_base))
            .set("Authorization", &format!("Bearer {}", self.secret_key))
            .send_form(&pairs)?;

        let session: SessionResponse = response
            .into_json()
            .map_err(|err| GatewayError::Decode(err.to_string()))?;
        let client_secret = session
            .client_secret
            .ok_or_else(|| GatewayError::Decode("session has no client_secret".to_string()))?;

        Ok(CreatedCheckoutSession {
            id: session.id,
            client_secret,
        })
    }
}
