//! Partner product feeds and their credential-driven availability.

use serde::Serialize;
use tracing::{info, warn};

use crate::catalog::{Product, Vendor};
use crate::commerce::GatewayError;
use crate::config::VendorCredentials;

/// Which partner integrations have the credentials they need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IntegrationStatus {
    pub amazon: bool,
    pub ebay: bool,
    pub shopify: bool,
}

impl IntegrationStatus {
    pub fn from_credentials(credentials: &VendorCredentials) -> Self {
        Self {
            amazon: credentials.amazon_access_key.is_some()
                && credentials.amazon_secret_key.is_some(),
            ebay: credentials.ebay_app_id.is_some(),
            shopify: credentials.shopify_domain.is_some()
                && credentials.shopify_storefront_token.is_some(),
        }
    }
}

/// A live product source at a partner marketplace.
pub trait ProductFeed: Send + Sync {
    fn vendor(&self) -> Vendor;

    fn fetch_products(&self, query: &str) -> Result<Vec<Product>, GatewayError>;
}

struct AmazonFeed {
    partner_tag: String,
    locale: String,
}

impl ProductFeed for AmazonFeed {
    fn vendor(&self) -> Vendor {
        Vendor::Amazon
    }

    // Product Advertising API lookups are not wired up; the seed catalog covers Amazon items.
    fn fetch_products(&self, query: &str) -> Result<Vec<Product>, GatewayError> {
        info!(query, partner_tag = %self.partner_tag, locale = %self.locale, "amazon feed queried");
        Ok(Vec::new())
    }
}

struct EbayFeed;

impl ProductFeed for EbayFeed {
    fn vendor(&self) -> Vendor {
        Vendor::Ebay
    }

    fn fetch_products(&self, query: &str) -> Result<Vec<Product>, GatewayError> {
        info!(query, "ebay feed queried");
        Ok(Vec::new())
    }
}

struct ShopifyFeed {
    domain: String,
}

impl ProductFeed for ShopifyFeed {
    fn vendor(&self) -> Vendor {
        Vendor::Shopify
    }

    fn fetch_products(&self, _query: &str) -> Result<Vec<Product>, GatewayError> {
        info!(domain = %self.domain, "shopify storefront feed queried");
        Ok(Vec::new())
    }
}

/// Fan-out over every enabled partner feed.
pub struct PartnerFeeds {
    status: IntegrationStatus,
    feeds: Vec<Box<dyn ProductFeed>>,
}

impl PartnerFeeds {
    pub fn from_credentials(credentials: &VendorCredentials) -> Self {
        let status = IntegrationStatus::from_credentials(credentials);
        let mut feeds: Vec<Box<dyn ProductFeed>> = Vec::new();

        if status.amazon {
            feeds.push(Box::new(AmazonFeed {
                partner_tag: credentials
                    .amazon_partner_tag
                    .clone()
                    .unwrap_or_else(|| credentials.amazon_assoc_tag.clone()),
                locale: credentials.amazon_locale.clone(),
            }));
        }
        if status.ebay {
            feeds.push(Box::new(EbayFeed));
        }
        if let (true, Some(domain)) = (status.shopify, credentials.shopify_domain.clone()) {
            feeds.push(Box::new(ShopifyFeed { domain }));
        }

        Self { status, feeds }
    }

    pub fn with_feeds(status: IntegrationStatus, feeds: Vec<Box<dyn ProductFeed>>) -> Self {
        Self { status, feeds }
    }

    pub fn status(&self) -> IntegrationStatus {
        self.status
    }

    pub fn enabled_vendors(&self) -> Vec<Vendor> {
        self.feeds.iter().map(|feed| feed.vendor()).collect()
    }

    /// Failed feeds are logged and skipped.
    pub fn fetch_products(&self, query: &str) -> Vec<Product> {
        self.feeds
            .iter()
            .flat_map(|feed| match feed.fetch_products(query) {
                Ok(products) => products,
                Err(err) => {
                    warn!(vendor = %feed.vendor(), error = %err, "partner feed failed");
                    Vec::new()
                }
            })
            .collect()
    }
}
