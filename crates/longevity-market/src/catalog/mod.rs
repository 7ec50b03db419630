//! Static product catalog, filtering/sorting, and vendor storefront metadata.

pub mod domain;
pub mod filters;
mod parser;
mod seed;
pub mod vendors;

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

pub use domain::{
    Category, Goal, Product, ProductId, PurchaseOption, StockStatus, UnknownTag, Vendor,
};
pub use filters::{filter_products, sort_products, ProductFilters, SortOption};
pub use vendors::AffiliateSettings;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalog CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid catalog row {line}: {reason}")]
    InvalidRow { line: usize, reason: String },
    #[error("duplicate product id '{0}'")]
    DuplicateId(String),
}

/// Read-only product list shared across requests.
#[derive(Debug, Clone)]
pub struct ProductCatalog {
    products: Vec<Product>,
    by_id: HashMap<ProductId, usize>,
}

impl ProductCatalog {
    /// Built-in seed data shipped with the storefront.
    pub fn seed() -> Self {
        Self::from_unique(seed::seed_products())
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        Self::from_products(parser::parse_products(reader)?)
    }

    pub fn from_products(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashMap::with_capacity(products.len());
        for (index, product) in products.iter().enumerate() {
            if seen.insert(product.id.clone(), index).is_some() {
                return Err(CatalogError::DuplicateId(product.id.0.clone()));
            }
        }

        Ok(Self {
            products,
            by_id: seen,
        })
    }

    fn from_unique(products: Vec<Product>) -> Self {
        let by_id = products
            .iter()
            .enumerate()
            .map(|(index, product)| (product.id.clone(), index))
            .collect();
        Self { products, by_id }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Product> {
        self.by_id
            .get(&ProductId(id.to_string()))
            .and_then(|index| self.products.get(*index))
    }

    pub fn find_by_slug(&self, slug: &str) -> Option<&Product> {
        self.products.iter().find(|product| product.slug == slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn seed_catalog_is_consistent() {
        let catalog = ProductCatalog::seed();
        assert!(!catalog.is_empty());

        for product in catalog.products() {
            assert!(product.price >= 0.0, "{} has a negative price", product.id);
            assert!(!product.goals.is_empty(), "{} has no goals", product.id);
            assert_eq!(product.currency, "USD");
            if let Some(cents) = product.price_in_cents {
                assert_eq!(
                    f64::from(cents),
                    (product.price * 100.0).round(),
                    "{} minor-unit price disagrees with price",
                    product.id
                );
            }
        }
    }

    #[test]
    fn seed_ids_are_unique() {
        let products = ProductCatalog::seed().products().to_vec();
        let count = products.len();
        let catalog = ProductCatalog::from_products(products).expect("unique seed ids");
        assert_eq!(catalog.len(), count);
    }

    #[test]
    fn lookups_by_id_and_slug() {
        let catalog = ProductCatalog::seed();
        let product = catalog.find_by_id("oura-ring-gen3").expect("oura present");
        assert_eq!(product.vendor, Vendor::Oura);
        assert_eq!(
            catalog.find_by_slug("whoop-4-0").map(|p| p.id.0.as_str()),
            Some("whoop-4")
        );
        assert!(catalog.find_by_id("missing").is_none());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let product = ProductCatalog::seed().products()[0].clone();
        let error = ProductCatalog::from_products(vec![product.clone(), product])
            .expect_err("duplicate ids rejected");
        assert!(matches!(error, CatalogError::DuplicateId(_)));
    }

    #[test]
    fn from_path_propagates_io_errors() {
        let error = ProductCatalog::from_path("./does-not-exist.csv").expect_err("io error");
        assert!(matches!(error, CatalogError::Io(_)));
    }

    #[test]
    fn from_reader_builds_catalog() {
        let csv = "id,slug,title,vendor,vendor_product_id,affiliate_url,images,price,price_in_cents,rating,category,goals,tags,stock_status,short,pros,cons,created_at,popularity\n\
book,book,Book,amazon,0593236599,,,18.99,,4.8,books,longevity,book,in_stock,A book,,,2023-03-28,92\n";
        let catalog = ProductCatalog::from_reader(Cursor::new(csv)).expect("import");
        assert_eq!(catalog.len(), 1);
        assert!(catalog.find_by_id("book").is_some());
    }
}
