use std::io::Read;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};

use super::domain::{Category, Goal, Product, ProductId, StockStatus, Vendor};
use super::CatalogError;

const LIST_SEPARATOR: char = '|';

pub(crate) fn parse_products<R: Read>(reader: R) -> Result<Vec<Product>, CatalogError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut products = Vec::new();

    for (index, record) in csv_reader.deserialize::<CatalogRow>().enumerate() {
        let row = record?;
        // header occupies line 1
        let line = index + 2;
        products.push(row.into_product(line)?);
    }

    Ok(products)
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    id: String,
    slug: String,
    title: String,
    vendor: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    vendor_product_id: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    affiliate_url: Option<String>,
    #[serde(default)]
    images: String,
    price: f64,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    price_in_cents: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    rating: Option<String>,
    category: String,
    #[serde(default)]
    goals: String,
    #[serde(default)]
    tags: String,
    stock_status: String,
    #[serde(default)]
    short: String,
    #[serde(default)]
    pros: String,
    #[serde(default)]
    cons: String,
    created_at: String,
    #[serde(default)]
    popularity: f64,
}

impl CatalogRow {
    fn into_product(self, line: usize) -> Result<Product, CatalogError> {
        let invalid = |reason: String| CatalogError::InvalidRow { line, reason };

        if self.id.is_empty() {
            return Err(invalid("product id is required".to_string()));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(invalid(format!("price {} must be a non-negative number", self.price)));
        }
        if !self.popularity.is_finite() {
            return Err(invalid(format!("popularity {} must be finite", self.popularity)));
        }

        let vendor = self
            .vendor
            .parse::<Vendor>()
            .map_err(|err| invalid(err.to_string()))?;
        let category = self
            .category
            .parse::<Category>()
            .map_err(|err| invalid(err.to_string()))?;
        let stock_status = self
            .stock_status
            .parse::<StockStatus>()
            .map_err(|err| invalid(err.to_string()))?;
        let goals = split_list(&self.goals)
            .into_iter()
            .map(|goal| goal.parse::<Goal>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| invalid(err.to_string()))?;
        let price_in_cents = self
            .price_in_cents
            .as_deref()
            .map(str::parse::<u32>)
            .transpose()
            .map_err(|err| invalid(format!("price_in_cents: {err}")))?;
        let rating = self
            .rating
            .as_deref()
            .map(str::parse::<f64>)
            .transpose()
            .map_err(|err| invalid(format!("rating: {err}")))?;
        if let Some(rating) = rating.filter(|rating| !rating.is_finite()) {
            return Err(invalid(format!("rating {rating} must be finite")));
        }
        let created_at = parse_timestamp(&self.created_at)
            .ok_or_else(|| invalid(format!("created_at '{}' is not a date", self.created_at)))?;

        Ok(Product {
            id: ProductId(self.id),
            slug: self.slug,
            title: self.title,
            vendor,
            vendor_product_id: self.vendor_product_id,
            affiliate_url: self.affiliate_url,
            images: split_list(&self.images),
            price: self.price,
            currency: "USD".to_string(),
            price_in_cents,
            rating,
            category,
            goals,
            tags: split_list(&self.tags),
            stock_status,
            short: self.short,
            pros: split_list(&self.pros),
            cons: split_list(&self.cons),
            created_at,
            popularity: self.popularity,
        })
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER: &str = "id,slug,title,vendor,vendor_product_id,affiliate_url,images,price,price_in_cents,rating,category,goals,tags,stock_status,short,pros,cons,created_at,popularity\n";

    #[test]
    fn parses_list_columns_and_optional_fields() {
        let csv = format!(
            "{HEADER}mask,sleep-mask,Sleep Mask,shopify,4401,,/a.jpg|/b.jpg,35,3500,,sleep,sleep|recovery,mask | travel,in_stock,Blocks light,Soft,,2024-03-18,70\n"
        );
        let products = parse_products(Cursor::new(csv)).expect("parse");
        assert_eq!(products.len(), 1);

        let product = &products[0];
        assert_eq!(product.vendor, Vendor::Shopify);
        assert_eq!(product.images, vec!["/a.jpg", "/b.jpg"]);
        assert_eq!(product.goals, vec![Goal::Sleep, Goal::Recovery]);
        assert_eq!(product.tags, vec!["mask", "travel"]);
        assert_eq!(product.price_in_cents, Some(3500));
        assert!(product.rating.is_none());
        assert!(product.cons.is_empty());
        assert_eq!(product.created_at.to_rfc3339(), "2024-03-18T00:00:00+00:00");
    }

    #[test]
    fn reports_line_of_invalid_row() {
        let csv = format!(
            "{HEADER}ok,ok,Ok,other,,,,10,,,books,longevity,,in_stock,,,,2024-01-01,1\nbad,bad,Bad,walmart,,,,10,,,books,,,in_stock,,,,2024-01-01,1\n"
        );
        let error = parse_products(Cursor::new(csv)).expect_err("unknown vendor");
        match error {
            CatalogError::InvalidRow { line, reason } => {
                assert_eq!(line, 3);
                assert!(reason.contains("walmart"));
            }
            other => panic!("expected invalid row, got {other:?}"),
        }
    }

    #[test]
    fn rejects_non_finite_popularity_and_rating() {
        let popularity = format!(
            "{HEADER}ok,ok,Ok,other,,,,10,,,books,longevity,,in_stock,,,,2024-01-01,NaN\n"
        );
        match parse_products(Cursor::new(popularity)) {
            Err(CatalogError::InvalidRow { line, reason }) => {
                assert_eq!(line, 2);
                assert!(reason.contains("popularity"));
            }
            other => panic!("expected invalid popularity, got {other:?}"),
        }

        let rating = format!(
            "{HEADER}ok,ok,Ok,other,,,,10,,inf,books,longevity,,in_stock,,,,2024-01-01,1\n"
        );
        match parse_products(Cursor::new(rating)) {
            Err(CatalogError::InvalidRow { line, reason }) => {
                assert_eq!(line, 2);
                assert!(reason.contains("rating"));
            }
            other => panic!("expected invalid rating, got {other:?}"),
        }
    }

    #[test]
    fn timestamps_accept_rfc3339_and_dates() {
        assert!(parse_timestamp("2024-05-01T08:30:00Z").is_some());
        assert!(parse_timestamp("2024-05-01").is_some());
        assert!(parse_timestamp(" ").is_none());
        assert!(parse_timestamp("yesterday").is_none());
    }
}
