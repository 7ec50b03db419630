use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::error::{CommerceError, GatewayError};
use crate::catalog::{Product, ProductCatalog};

/// Countries the hosted checkout will collect shipping addresses for.
pub const ALLOWED_SHIPPING_COUNTRIES: [&str; 8] = ["US", "CA", "GB", "AU", "DE", "FR", "IT", "ES"];
pub const CHECKOUT_CURRENCY: &str = "usd";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutLineItem {
    pub name: String,
    pub description: String,
    pub unit_amount: u32,
    pub currency: &'static str,
    pub quantity: u32,
}

/// Provider-agnostic description of an embedded payment session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutSessionRequest {
    pub line_item: CheckoutLineItem,
    pub allowed_countries: Vec<&'static str>,
    pub metadata: BTreeMap<String, String>,
}

impl CheckoutSessionRequest {
    pub fn for_product(product: &Product) -> Result<Self, CommerceError> {
        let unit_amount = product.price_in_cents.ok_or_else(|| {
            CommerceError::Configuration(format!(
                "Product \"{}\" does not have Stripe pricing configured",
                product.title
            ))
        })?;

        let mut metadata = BTreeMap::new();
        metadata.insert("productId".to_string(), product.id.0.clone());
        metadata.insert("productSlug".to_string(), product.slug.clone());
        metadata.insert("vendor".to_string(), product.vendor.tag().to_string());
        metadata.insert(
            "vendorProductId".to_string(),
            product.vendor_product_id.clone().unwrap_or_default(),
        );

        Ok(Self {
            line_item: CheckoutLineItem {
                name: product.title.clone(),
                description: product.short.clone(),
                unit_amount,
                currency: CHECKOUT_CURRENCY,
                quantity: 1,
            },
            allowed_countries: ALLOWED_SHIPPING_COUNTRIES.to_vec(),
            metadata,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedCheckoutSession {
    pub id: String,
    pub client_secret: String,
}

/// Outbound port to the hosted payment provider.
pub trait PaymentGateway: Send + Sync {
    fn create_checkout_session(
        &self,
        request: &CheckoutSessionRequest,
    ) -> Result<CreatedCheckoutSession, GatewayError>;
}

/// Looks products up in the static catalog and requests hosted payment sessions for them.
pub struct CheckoutService<P> {
    catalog: Arc<ProductCatalog>,
    gateway: Option<Arc<P>>,
}

impl<P> CheckoutService<P>
where
    P: PaymentGateway + 'static,
{
    pub fn new(catalog: Arc<ProductCatalog>, gateway: Option<Arc<P>>) -> Self {
        Self { catalog, gateway }
    }

    /// Returns the client secret consumed by the embedded checkout widget.
    pub fn start_session(&self, product_id: &str) -> Result<String, CommerceError> {
        let product = self.catalog.find_by_id(product_id).ok_or_else(|| {
            CommerceError::NotFound(format!("Product with id \"{product_id}\" not found"))
        })?;

        let request = CheckoutSessionRequest::for_product(product)?;

        let gateway = self.gateway.as_ref().ok_or_else(|| {
            CommerceError::Configuration(
                "Stripe is not configured: set STRIPE_SECRET_KEY".to_string(),
            )
        })?;

        let session = gateway
            .create_checkout_session(&request)
            .map_err(|err| {
                error!(product_id, error = %err, "checkout session creation failed");
                match err {
                    GatewayError::Status { status, .. } => {
                        CommerceError::PaymentProvider(format!("Stripe API error: {status}"))
                    }
                    other => CommerceError::PaymentProvider(other.to_string()),
                }
            })?;

        info!(product_id, session_id = %session.id, "checkout session created");
        Ok(session.client_secret)
    }
}
