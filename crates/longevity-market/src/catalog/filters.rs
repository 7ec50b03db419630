use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::domain::{Category, Goal, Product, Vendor};

pub const DEFAULT_MIN_PRICE: f64 = 0.0;
pub const DEFAULT_MAX_PRICE: f64 = 3000.0;

/// Browsing constraints. Empty selector sets are skipped; price bounds always apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductFilters {
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub vendors: Vec<Vendor>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default = "default_min_price")]
    pub min_price: f64,
    #[serde(default = "default_max_price")]
    pub max_price: f64,
    #[serde(default)]
    pub search: String,
}

fn default_min_price() -> f64 {
    DEFAULT_MIN_PRICE
}

fn default_max_price() -> f64 {
    DEFAULT_MAX_PRICE
}

impl Default for ProductFilters {
    fn default() -> Self {
        Self {
            goals: Vec::new(),
            vendors: Vec::new(),
            categories: Vec::new(),
            min_price: DEFAULT_MIN_PRICE,
            max_price: DEFAULT_MAX_PRICE,
            search: String::new(),
        }
    }
}

impl ProductFilters {
    pub fn matches(&self, product: &Product) -> bool {
        if !self.goals.is_empty() && !self.goals.iter().any(|goal| product.has_goal(*goal)) {
            return false;
        }

        if !self.vendors.is_empty() && !self.vendors.contains(&product.vendor) {
            return false;
        }

        if !self.categories.is_empty() && !self.categories.contains(&product.category) {
            return false;
        }

        if product.price < self.min_price || product.price > self.max_price {
            return false;
        }

        if !self.search.is_empty() {
            let needle = self.search.to_lowercase();
            let matches_search = product.title.to_lowercase().contains(&needle)
                || product.short.to_lowercase().contains(&needle)
                || product
                    .tags
                    .iter()
                    .any(|tag| tag.to_lowercase().contains(&needle));
            if !matches_search {
                return false;
            }
        }

        true
    }
}

/// Total orders offered on the browse page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    #[default]
    Best,
    PriceAsc,
    PriceDesc,
    Rating,
    Newest,
}

impl SortOption {
    pub fn tag(&self) -> &'static str {
        match self {
            SortOption::Best => "best",
            SortOption::PriceAsc => "price-asc",
            SortOption::PriceDesc => "price-desc",
            SortOption::Rating => "rating",
            SortOption::Newest => "newest",
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort option '{0}' (expected best, price-asc, price-desc, rating, or newest)")]
pub struct UnknownSortOption(pub String);

impl FromStr for SortOption {
    type Err = UnknownSortOption;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "best" => Ok(SortOption::Best),
            "price-asc" => Ok(SortOption::PriceAsc),
            "price-desc" => Ok(SortOption::PriceDesc),
            "rating" => Ok(SortOption::Rating),
            "newest" => Ok(SortOption::Newest),
            _ => Err(UnknownSortOption(value.to_string())),
        }
    }
}

pub fn filter_products<'a>(products: &'a [Product], filters: &ProductFilters) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|product| filters.matches(product))
        .collect()
}

pub fn sort_products<'a>(mut products: Vec<&'a Product>, sort_by: SortOption) -> Vec<&'a Product> {
    match sort_by {
        SortOption::Best => products.sort_by(|a, b| b.popularity.total_cmp(&a.popularity)),
        SortOption::PriceAsc => products.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortOption::PriceDesc => products.sort_by(|a, b| b.price.total_cmp(&a.price)),
        SortOption::Rating => products.sort_by(|a, b| rating_of(b).total_cmp(&rating_of(a))),
        SortOption::Newest => products.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }
    products
}

fn rating_of(product: &Product) -> f64 {
    product.rating.unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductCatalog;

    #[test]
    fn default_filters_keep_catalog_order() {
        let catalog = ProductCatalog::seed();
        let filtered = filter_products(catalog.products(), &ProductFilters::default());
        let expected: Vec<&Product> = catalog.products().iter().collect();
        assert_eq!(filtered, expected);
    }

    #[test]
    fn selectors_combine_with_and_semantics() {
        let catalog = ProductCatalog::seed();
        let filters = ProductFilters {
            goals: vec![Goal::Sleep],
            categories: vec![Category::Wearables],
            ..ProductFilters::default()
        };

        let filtered = filter_products(catalog.products(), &filters);
        assert!(!filtered.is_empty());
        assert!(filtered
            .iter()
            .all(|p| p.has_goal(Goal::Sleep) && p.category == Category::Wearables));
    }

    #[test]
    fn goal_selector_matches_any_selected_goal() {
        let catalog = ProductCatalog::seed();
        let filters = ProductFilters {
            goals: vec![Goal::Metabolic, Goal::Hrv],
            ..ProductFilters::default()
        };

        let filtered = filter_products(catalog.products(), &filters);
        assert!(filtered
            .iter()
            .all(|p| p.has_goal(Goal::Metabolic) || p.has_goal(Goal::Hrv)));
        assert!(filtered.iter().any(|p| p.id.0 == "polar-h10"));
        assert!(filtered.iter().any(|p| p.id.0 == "levels-cgm-program"));
    }

    #[test]
    fn search_matches_title_short_or_tags_case_insensitively() {
        let catalog = ProductCatalog::seed();
        let by_tag = ProductFilters {
            search: "GLUCOSE".to_string(),
            ..ProductFilters::default()
        };
        let ids: Vec<&str> = filter_products(catalog.products(), &by_tag)
            .iter()
            .map(|p| p.id.0.as_str())
            .collect();
        assert!(ids.contains(&"levels-cgm-program"));
        assert!(ids.contains(&"cgm-starter-kit"));

        let by_short = ProductFilters {
            search: "titanium".to_string(),
            ..ProductFilters::default()
        };
        assert_eq!(filter_products(catalog.products(), &by_short).len(), 1);
    }

    #[test]
    fn price_bounds_always_apply() {
        let catalog = ProductCatalog::seed();
        let filters = ProductFilters {
            min_price: 50.0,
            max_price: 100.0,
            ..ProductFilters::default()
        };
        let filtered = filter_products(catalog.products(), &filters);
        assert!(!filtered.is_empty());
        assert!(filtered.iter().all(|p| p.price >= 50.0 && p.price <= 100.0));
    }

    #[test]
    fn price_ascending_is_monotonic() {
        let catalog = ProductCatalog::seed();
        let sorted = sort_products(catalog.products().iter().collect(), SortOption::PriceAsc);
        assert_eq!(sorted.len(), catalog.len());
        assert!(sorted.windows(2).all(|pair| pair[0].price <= pair[1].price));

        assert!(sort_products(Vec::new(), SortOption::PriceAsc).is_empty());
    }

    #[test]
    fn orders_for_remaining_sort_options() {
        let catalog = ProductCatalog::seed();
        let all = || catalog.products().iter().collect::<Vec<_>>();

        let best = sort_products(all(), SortOption::Best);
        assert!(best.windows(2).all(|w| w[0].popularity >= w[1].popularity));

        let desc = sort_products(all(), SortOption::PriceDesc);
        assert!(desc.windows(2).all(|w| w[0].price >= w[1].price));

        let rating = sort_products(all(), SortOption::Rating);
        assert!(rating
            .windows(2)
            .all(|w| w[0].rating.unwrap_or(0.0) >= w[1].rating.unwrap_or(0.0)));

        let newest = sort_products(all(), SortOption::Newest);
        assert!(newest.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    }

    #[test]
    fn sort_option_parses_tags() {
        assert_eq!("price-desc".parse::<SortOption>(), Ok(SortOption::PriceDesc));
        assert_eq!("".parse::<SortOption>(), Ok(SortOption::Best));
        assert!("cheapest".parse::<SortOption>().is_err());
    }
}
