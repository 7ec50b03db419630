use crate::infra::{parse_list, AppState};
use axum::extract::{Path, Query};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use longevity_market::catalog::{
    filter_products, Category, Goal, Vendor, sort_products, Product, ProductFilters, PurchaseOption, SortOption,
};
use longevity_market::commerce::{commerce_router, CommerceServices, OrderDispatcher, PaymentGateway};
use longevity_market::error::AppError;
use longevity_market::integrations::IntegrationStatus;
use longevity_market::quiz::{questions, QuizAnswers, QuizQuestion};
use longevity_market::recommendations::{generate_recommendations, CollectionKind, ProductScore};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ProductQuery {
    #[serde(default)]
    pub(crate) goals: Option<String>,
    #[serde(default)]
    pub(crate) vendors: Option<String>,
    #[serde(default)]
    pub(crate) categories: Option<String>,
    #[serde(default)]
    pub(crate) min_price: Option<f64>,
    #[serde(default)]
    pub(crate) max_price: Option<f64>,
    #[serde(default)]
    pub(crate) search: Option<String>,
    #[serde(default)]
    pub(crate) sort: Option<String>,
}

impl ProductQuery {
    fn into_filters(self) -> Result<(ProductFilters, SortOption), String> {
        let mut filters = ProductFilters::default();
        if let Some(raw) = self.goals.as_deref() {
            filters.goals = parse_list::<Goal>(raw).map_err(|err| err.to_string())?;
        }
        if let Some(raw) = self.vendors.as_deref() {
            filters.vendors = parse_list::<Vendor>(raw).map_err(|err| err.to_string())?;
        }
        if let Some(raw) = self.categories.as_deref() {
            filters.categories = parse_list::<Category>(raw).map_err(|err| err.to_string())?;
        }
        if let Some(min_price) = self.min_price {
            filters.min_price = min_price;
        }
        if let Some(max_price) = self.max_price {
            filters.max_price = max_price;
        }
        filters.search = self.search.unwrap_or_default();

        let sort = self
            .sort
            .as_deref()
            .unwrap_or_default()
            .parse::<SortOption>()
            .map_err(|err| err.to_string())?;

        Ok((filters, sort))
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ProductListResponse {
    pub(crate) count: usize,
    pub(crate) products: Vec<Product>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ProductDetailResponse {
    pub(crate) product: Product,
    pub(crate) purchase_option: PurchaseOption,
}

#[derive(Debug, Serialize)]
pub(crate) struct QuizResponse {
    pub(crate) questions: Vec<QuizQuestion>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CollectionView {
    pub(crate) kind: CollectionKind,
    pub(crate) title: &'static str,
    pub(crate) description: &'static str,
    pub(crate) hidden: bool,
    pub(crate) products: Vec<ScoredProductView>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ScoredProductView {
    pub(crate) score: f64,
    pub(crate) product: Product,
}

impl From<&ProductScore<'_>> for ScoredProductView {
    fn from(scored: &ProductScore<'_>) -> Self {
        Self {
            score: scored.score,
            product: scored.product.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct RecommendationsResponse {
    pub(crate) collections: Vec<CollectionView>,
}

pub(crate) fn with_storefront_routes<P, D>(commerce: CommerceServices<P, D>) -> Router
where
    P: PaymentGateway + 'static,
    D: OrderDispatcher + 'static,
{
    commerce_router(commerce)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/products", get(list_products_endpoint))
        .route("/api/v1/products/:slug", get(product_detail_endpoint))
        .route("/api/v1/quiz", get(quiz_endpoint))
        .route("/api/v1/recommendations", post(recommendations_endpoint))
        .route("/api/v1/integrations", get(integrations_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn list_products_endpoint(
    Extension(state): Extension<AppState>,
    Query(query): Query<ProductQuery>,
) -> Response {
    let (filters, sort) = match query.into_filters() {
        Ok(parsed) => parsed,
        Err(message) => {
            return (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
        }
    };

    let partner = if filters.search.trim().is_empty() {
        Vec::new()
    } else {
        state.feeds.fetch_products(filters.search.trim())
    };
    let combined;
    let pool: &[Product] = if partner.is_empty() {
        state.catalog.products()
    } else {
        combined = [state.catalog.products(), partner.as_slice()].concat();
        &combined
    };

    let products: Vec<Product> = sort_products(filter_products(pool, &filters), sort)
        .into_iter()
        .cloned()
        .collect();

    Json(ProductListResponse {
        count: products.len(),
        products,
    })
    .into_response()
}

pub(crate) async fn product_detail_endpoint(
    Extension(state): Extension<AppState>,
    Path(slug): Path<String>,
) -> Response {
    match state.catalog.find_by_slug(&slug) {
        Some(product) => Json(ProductDetailResponse {
            purchase_option: product.purchase_option(&state.affiliates),
            product: product.clone(),
        })
        .into_response(),
        None => {
            let payload = json!({ "error": format!("product '{slug}' not found") });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn quiz_endpoint() -> Json<QuizResponse> {
    Json(QuizResponse {
        questions: questions(),
    })
}

pub(crate) async fn recommendations_endpoint(
    Extension(state): Extension<AppState>,
    Json(answers): Json<QuizAnswers>,
) -> Result<Json<RecommendationsResponse>, AppError> {
    answers.validate()?;

    let collections = generate_recommendations(state.catalog.products(), &answers)
        .iter()
        .map(|collection| CollectionView {
            kind: collection.kind,
            title: collection.title,
            description: collection.description,
            hidden: collection.is_empty(),
            products: collection
                .products
                .iter()
                .map(ScoredProductView::from)
                .collect(),
        })
        .collect();

    Ok(Json(RecommendationsResponse { collections }))
}

pub(crate) async fn integrations_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<IntegrationStatus> {
    Json(state.feeds.status())
}
