use longevity_market::catalog::{AffiliateSettings, CatalogError, ProductCatalog};
use longevity_market::commerce::{
    CheckoutService, CommerceServices, OrderRouter, ShopifyAdminClient, ShopifyOrderGateway,
    StripeClient, WebhookService,
};
use longevity_market::config::{AppConfig, CatalogConfig};
use longevity_market::integrations::PartnerFeeds;
use metrics_exporter_prometheus::PrometheusHandle;
use std::str::FromStr;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) catalog: Arc<ProductCatalog>,
    pub(crate) feeds: Arc<PartnerFeeds>,
    pub(crate) affiliates: Arc<AffiliateSettings>,
}

pub(crate) fn load_catalog(config: &CatalogConfig) -> Result<ProductCatalog, CatalogError> {
    match &config.path {
        Some(path) => {
            let catalog = ProductCatalog::from_path(path)?;
            info!(path = %path.display(), products = catalog.len(), "catalog imported");
            Ok(catalog)
        }
        None => Ok(ProductCatalog::seed()),
    }
}

pub(crate) type LiveCommerce = CommerceServices<StripeClient, OrderRouter>;

/// Wires the hosted checkout and fulfillment adapters from whatever credentials are present.
pub(crate) fn build_commerce(config: &AppConfig, catalog: Arc<ProductCatalog>) -> LiveCommerce {
    let payments = &config.payments;
    let stripe = payments
        .secret_key
        .as_ref()
        .map(|key| Arc::new(StripeClient::new(payments.api_base.clone(), key.clone())));
    if stripe.is_none() {
        warn!("STRIPE_SECRET_KEY not set; hosted checkout disabled");
    }

    let shopify = config.vendors.shopify_admin().map(|(domain, token)| {
        Arc::new(ShopifyAdminClient::new(domain, token)) as Arc<dyn ShopifyOrderGateway>
    });
    if shopify.is_none() {
        warn!("Shopify admin credentials not set; shopify orders will fail");
    }

    let router = Arc::new(OrderRouter::new(shopify));
    CommerceServices {
        checkout: Arc::new(CheckoutService::new(catalog, stripe)),
        webhooks: Arc::new(WebhookService::new(
            payments.webhook_secret.clone(),
            payments.webhook_tolerance_secs,
            router,
        )),
    }
}

/// Splits a comma separated list, skipping blanks.
pub(crate) fn parse_list<T>(raw: &str) -> Result<Vec<T>, T::Err>
where
    T: FromStr,
{
    raw.split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(T::from_str)
        .collect()
}
