use clap::Args;
use longevity_market::catalog::{
    filter_products, sort_products, Category, Goal, Product, ProductCatalog, ProductFilters,
    SortOption, Vendor,
};
use longevity_market::config::CatalogConfig;
use longevity_market::error::AppError;
use longevity_market::quiz::QuizAnswers;
use longevity_market::recommendations::{generate_recommendations, RecommendationCollection};
use std::fmt::Write;
use std::path::PathBuf;

use crate::infra::load_catalog;

#[derive(Args, Debug)]
pub(crate) struct RecommendArgs {
    /// Primary goals, comma separated (at most three)
    #[arg(long, value_delimiter = ',', required = true)]
    pub(crate) goals: Vec<Goal>,
    /// Spending comfort in USD
    #[arg(long, default_value_t = 100.0)]
    pub(crate) budget: f64,
    /// Prefer wearable devices
    #[arg(long)]
    pub(crate) wearables: bool,
    /// Score a CSV catalog instead of the built-in seed
    #[arg(long)]
    pub(crate) catalog_csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct CatalogArgs {
    /// Goals to match (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub(crate) goal: Vec<Goal>,
    /// Vendors to include (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub(crate) vendor: Vec<Vendor>,
    /// Categories to include (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub(crate) category: Vec<Category>,
    /// Case-insensitive text search over title, summary, and tags
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// best, price-asc, price-desc, rating, or newest
    #[arg(long, default_value = "best")]
    pub(crate) sort: SortOption,
    #[arg(long)]
    pub(crate) min_price: Option<f64>,
    #[arg(long)]
    pub(crate) max_price: Option<f64>,
    /// List a CSV catalog instead of the built-in seed
    #[arg(long)]
    pub(crate) catalog_csv: Option<PathBuf>,
}

pub(crate) fn run_recommend(args: RecommendArgs) -> Result<(), AppError> {
    let catalog = load_catalog(&CatalogConfig {
        path: args.catalog_csv,
    })?;
    let answers = QuizAnswers::new(args.goals, args.budget, args.wearables);
    answers.validate()?;

    let collections = generate_recommendations(catalog.products(), &answers);
    print!("{}", render_collections(&answers, &collections));
    Ok(())
}

pub(crate) fn run_catalog(args: CatalogArgs) -> Result<(), AppError> {
    let catalog = load_catalog(&CatalogConfig {
        path: args.catalog_csv.clone(),
    })?;
    let filters = catalog_filters(&args);

    let products = sort_products(filter_products(catalog.products(), &filters), args.sort);
    print!("{}", render_products(&catalog, &products, args.sort));
    Ok(())
}

fn catalog_filters(args: &CatalogArgs) -> ProductFilters {
    let mut filters = ProductFilters {
        goals: args.goal.clone(),
        vendors: args.vendor.clone(),
        categories: args.category.clone(),
        search: args.search.clone().unwrap_or_default(),
        ..ProductFilters::default()
    };
    if let Some(min_price) = args.min_price {
        filters.min_price = min_price;
    }
    if let Some(max_price) = args.max_price {
        filters.max_price = max_price;
    }
    filters
}

pub(crate) fn render_collections(
    answers: &QuizAnswers,
    collections: &[RecommendationCollection<'_>],
) -> String {
    let goals: Vec<&str> = answers.primary_goals.iter().map(|goal| goal.tag()).collect();
    let mut out = String::new();
    let _ = writeln!(out, "Recommendations");
    let _ = writeln!(
        out,
        "Goals: {} | Budget: ${:.0} | Wearables: {}",
        goals.join(", "),
        answers.budget,
        if answers.prefers_wearables { "yes" } else { "no" }
    );

    for collection in collections {
        if collection.is_empty() {
            continue;
        }
        let _ = writeln!(out, "\n{}", collection.title);
        let _ = writeln!(out, "  {}", collection.description);
        for scored in &collection.products {
            let _ = writeln!(
                out,
                "  {:>5.2}  {:<36} ${:>8.2}  {}",
                scored.score,
                scored.product.title,
                scored.product.price,
                scored.product.vendor.display_name()
            );
        }
    }

    if collections.iter().all(RecommendationCollection::is_empty) {
        let _ = writeln!(out, "\nNo products matched these answers.");
    }
    out
}

pub(crate) fn render_products(
    catalog: &ProductCatalog,
    products: &[&Product],
    sort: SortOption,
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Catalog: {} of {} products (sorted by {})",
        products.len(),
        catalog.len(),
        sort
    );
    for product in products {
        let rating = product
            .rating
            .map(|rating| format!("{rating:.1}"))
            .unwrap_or_else(|| "-".to_string());
        let checkout = if product.supports_hosted_checkout() {
            "checkout"
        } else {
            "affiliate"
        };
        let _ = writeln!(
            out,
            "  {:<36} ${:>8.2}  {:>3}  {:<12} {:<10} {}",
            product.title,
            product.price,
            rating,
            product.vendor.display_name(),
            checkout,
            product.stock_status
        );
    }
    out
}
