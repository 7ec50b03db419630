use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::vendors::{self, AffiliateSettings};

/// Identifier wrapper for catalog products.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductId(pub String);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fulfillment or affiliate partner that owns a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vendor {
    Amazon,
    Ebay,
    Shopify,
    Oura,
    Whoop,
    EightSleep,
    Thorne,
    Levels,
    Other,
}

impl Vendor {
    pub const ALL: [Vendor; 9] = [
        Vendor::Amazon,
        Vendor::Ebay,
        Vendor::Shopify,
        Vendor::Oura,
        Vendor::Whoop,
        Vendor::EightSleep,
        Vendor::Thorne,
        Vendor::Levels,
        Vendor::Other,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            Vendor::Amazon => "amazon",
            Vendor::Ebay => "ebay",
            Vendor::Shopify => "shopify",
            Vendor::Oura => "oura",
            Vendor::Whoop => "whoop",
            Vendor::EightSleep => "eight_sleep",
            Vendor::Thorne => "thorne",
            Vendor::Levels => "levels",
            Vendor::Other => "other",
        }
    }

    pub fn display_name(&self) -> &'static str {
        vendors::profile(*self).name
    }
}

/// Health-optimization area used to match products to quiz answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    Sleep,
    Hrv,
    Metabolic,
    Cognitive,
    Recovery,
    Longevity,
}

impl Goal {
    pub const ALL: [Goal; 6] = [
        Goal::Sleep,
        Goal::Hrv,
        Goal::Metabolic,
        Goal::Cognitive,
        Goal::Recovery,
        Goal::Longevity,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            Goal::Sleep => "sleep",
            Goal::Hrv => "hrv",
            Goal::Metabolic => "metabolic",
            Goal::Cognitive => "cognitive",
            Goal::Recovery => "recovery",
            Goal::Longevity => "longevity",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Wearables,
    Sleep,
    Nutrition,
    Diagnostics,
    SmartHome,
    Books,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Wearables,
        Category::Sleep,
        Category::Nutrition,
        Category::Diagnostics,
        Category::SmartHome,
        Category::Books,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            Category::Wearables => "wearables",
            Category::Sleep => "sleep",
            Category::Nutrition => "nutrition",
            Category::Diagnostics => "diagnostics",
            Category::SmartHome => "smart_home",
            Category::Books => "books",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    InStock,
    Backorder,
    OutOfStock,
}

impl StockStatus {
    pub fn tag(&self) -> &'static str {
        match self {
            StockStatus::InStock => "in_stock",
            StockStatus::Backorder => "backorder",
            StockStatus::OutOfStock => "out_of_stock",
        }
    }
}

/// Error raised when a textual tag does not name a known enum member.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownTag {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! impl_from_tag {
    ($ty:ty, $kind:literal, $all:expr) => {
        impl FromStr for $ty {
            type Err = UnknownTag;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                let needle = value.trim();
                $all.iter()
                    .copied()
                    .find(|candidate| candidate.tag().eq_ignore_ascii_case(needle))
                    .ok_or_else(|| UnknownTag {
                        kind: $kind,
                        value: value.to_string(),
                    })
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.tag())
            }
        }
    };
}

impl_from_tag!(Vendor, "vendor", Vendor::ALL);
impl_from_tag!(Goal, "goal", Goal::ALL);
impl_from_tag!(Category, "category", Category::ALL);
impl_from_tag!(
    StockStatus,
    "stock status",
    [
        StockStatus::InStock,
        StockStatus::Backorder,
        StockStatus::OutOfStock
    ]
);

/// Static catalog record. Never mutated once the catalog is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub slug: String,
    pub title: String,
    pub vendor: Vendor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_product_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affiliate_url: Option<String>,
    pub images: Vec<String>,
    pub price: f64,
    pub currency: String,
    /// Minor-unit price; present only when hosted checkout is available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_in_cents: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    pub category: Category,
    pub goals: Vec<Goal>,
    pub tags: Vec<String>,
    pub stock_status: StockStatus,
    pub short: String,
    #[serde(default)]
    pub pros: Vec<String>,
    #[serde(default)]
    pub cons: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub popularity: f64,
}

/// How a shopper completes a purchase for a given product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PurchaseOption {
    HostedCheckout { price_in_cents: u32 },
    Affiliate { url: String },
}

impl Product {
    pub fn has_goal(&self, goal: Goal) -> bool {
        self.goals.contains(&goal)
    }

    pub fn supports_hosted_checkout(&self) -> bool {
        self.price_in_cents.is_some()
    }

    pub fn purchase_option(&self, settings: &AffiliateSettings) -> PurchaseOption {
        match self.price_in_cents {
            Some(price_in_cents) => PurchaseOption::HostedCheckout { price_in_cents },
            None => PurchaseOption::Affiliate {
                url: self
                    .affiliate_url
                    .clone()
                    .unwrap_or_else(|| vendors::affiliate_url_for(self, settings)),
            },
        }
    }
}
