//! Vendor storefront metadata and outbound affiliate link builders.

use super::domain::{Product, Vendor};

const DEFAULT_AMAZON_TAG: &str = "acme-20";
const AFFILIATE_CAMPAIGN: &str = "utm_source=acme&utm_medium=affiliate&utm_campaign=longevity";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VendorProfile {
    pub name: &'static str,
    pub base_url: Option<&'static str>,
    pub affiliate_param: Option<&'static str>,
}

pub fn profile(vendor: Vendor) -> VendorProfile {
    match vendor {
        Vendor::Amazon => VendorProfile {
            name: "Amazon",
            base_url: Some("https://amazon.com"),
            affiliate_param: Some("tag=acme-20"),
        },
        Vendor::Ebay => VendorProfile {
            name: "eBay",
            base_url: Some("https://ebay.com"),
            affiliate_param: None,
        },
        Vendor::Shopify => VendorProfile {
            name: "Shopify",
            base_url: Some("https://shopify.com"),
            affiliate_param: None,
        },
        Vendor::Oura => VendorProfile {
            name: "Oura",
            base_url: Some("https://ouraring.com"),
            affiliate_param: Some("utm_source=acme"),
        },
        Vendor::Whoop => VendorProfile {
            name: "WHOOP",
            base_url: Some("https://whoop.com"),
            affiliate_param: Some("utm_source=acme"),
        },
        Vendor::EightSleep => VendorProfile {
            name: "Eight Sleep",
            base_url: Some("https://eightsleep.com"),
            affiliate_param: Some("utm_source=acme"),
        },
        Vendor::Thorne => VendorProfile {
            name: "Thorne",
            base_url: Some("https://thorne.com"),
            affiliate_param: Some("utm_source=acme"),
        },
        Vendor::Levels => VendorProfile {
            name: "Levels",
            base_url: Some("https://levelshealth.com"),
            affiliate_param: Some("utm_source=acme"),
        },
        Vendor::Other => VendorProfile {
            name: "Other",
            base_url: None,
            affiliate_param: None,
        },
    }
}

/// Deployment-specific affiliate identifiers applied to generated outbound links.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AffiliateSettings {
    pub amazon_tag: Option<String>,
    pub shopify_domain: Option<String>,
}

pub fn amazon_affiliate_url(asin: &str, tag: Option<&str>) -> String {
    let tag = tag
        .filter(|value| !value.trim().is_empty())
        .unwrap_or(DEFAULT_AMAZON_TAG);
    format!("https://amazon.com/dp/{asin}?tag={tag}&{AFFILIATE_CAMPAIGN}")
}

pub fn ebay_affiliate_url(item_id: &str) -> String {
    format!("https://ebay.com/itm/{item_id}?{AFFILIATE_CAMPAIGN}")
}

pub fn shopify_cart_url(variant_ids: &[&str], domain: Option<&str>) -> String {
    let domain = domain
        .filter(|value| !value.trim().is_empty())
        .unwrap_or("store.example.com");
    format!(
        "https://{domain}/cart/add?ids={}&utm_source=acme&utm_medium=affiliate",
        variant_ids.join(",")
    )
}

/// Best-effort outbound link for products without an explicit affiliate URL.
pub(crate) fn affiliate_url_for(product: &Product, settings: &AffiliateSettings) -> String {
    let external_id = product
        .vendor_product_id
        .as_deref()
        .unwrap_or(product.id.0.as_str());

    match product.vendor {
        Vendor::Amazon => amazon_affiliate_url(external_id, settings.amazon_tag.as_deref()),
        Vendor::Ebay => ebay_affiliate_url(external_id),
        Vendor::Shopify => match product.vendor_product_id.as_deref() {
            Some(variant) => shopify_cart_url(&[variant], settings.shopify_domain.as_deref()),
            None => format!(
                "https://{}/products/{}",
                settings
                    .shopify_domain
                    .as_deref()
                    .filter(|value| !value.trim().is_empty())
                    .unwrap_or("store.example.com"),
                product.slug
            ),
        },
        other => {
            let profile = profile(other);
            match (profile.base_url, profile.affiliate_param) {
                (Some(base), Some(param)) => format!("{base}?{param}"),
                (Some(base), None) => base.to_string(),
                _ => "#".to_string(),
            }
        }
    }
}
