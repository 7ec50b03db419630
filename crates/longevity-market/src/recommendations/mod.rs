//! Quiz-driven product scoring and bucketing into the three recommendation collections.

mod collections;
pub mod scoring;

pub use collections::{CollectionKind, RecommendationCollection};
pub use scoring::{
    related_goals, score_breakdown, score_product, ScoreBreakdown, ScoreComponent, ScoreFactor,
};

use serde::Serialize;

use crate::catalog::Product;
use crate::quiz::QuizAnswers;

/// Upper bound on scored candidates considered for bucketing.
pub const TOP_CANDIDATES: usize = 24;
/// Upper bound on products per collection.
pub const COLLECTION_SIZE: usize = 8;

/// A product paired with its quiz score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductScore<'a> {
    pub product: &'a Product,
    pub score: f64,
}

/// Scores every product, keeps the positive ones in descending order, and truncates to
/// [`TOP_CANDIDATES`].
pub fn rank_products<'a>(products: &'a [Product], answers: &QuizAnswers) -> Vec<ProductScore<'a>> {
    let mut scored: Vec<ProductScore<'a>> = products
        .iter()
        .map(|product| ProductScore {
            product,
            score: score_product(product, answers),
        })
        .filter(|scored| scored.score > 0.0)
        .collect();

    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(TOP_CANDIDATES);
    scored
}

/// Produces the "Start Here", "Optimize", and "Deep Dive" collections, always in that order.
///
/// Bucket predicates overlap, so a product may appear in more than one collection.
pub fn generate_recommendations<'a>(
    products: &'a [Product],
    answers: &QuizAnswers,
) -> Vec<RecommendationCollection<'a>> {
    let ranked = rank_products(products, answers);

    CollectionKind::ALL
        .iter()
        .map(|kind| RecommendationCollection::fill(*kind, &ranked, answers.budget))
        .collect()
}
