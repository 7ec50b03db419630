use serde::Serialize;

use super::{ProductScore, COLLECTION_SIZE};

const START_HERE_MAX_BUDGET_RATIO: f64 = 0.8;
const OPTIMIZE_MAX_BUDGET_RATIO: f64 = 1.5;
const OPTIMIZE_MIN_SCORE: f64 = 5.0;
const DEEP_DIVE_MIN_SCORE: f64 = 7.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionKind {
    StartHere,
    Optimize,
    DeepDive,
}

impl CollectionKind {
    pub const ALL: [CollectionKind; 3] = [
        CollectionKind::StartHere,
        CollectionKind::Optimize,
        CollectionKind::DeepDive,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            CollectionKind::StartHere => "Start Here",
            CollectionKind::Optimize => "Optimize",
            CollectionKind::DeepDive => "Deep Dive",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CollectionKind::StartHere => {
                "Budget-friendly essentials to begin your longevity journey"
            }
            CollectionKind::Optimize => "Mid-tier products for measurable improvements",
            CollectionKind::DeepDive => "Advanced tools for serious optimization",
        }
    }

    pub fn admits(&self, scored: &ProductScore<'_>, budget: f64) -> bool {
        let price = scored.product.price;
        match self {
            CollectionKind::StartHere => price <= budget * START_HERE_MAX_BUDGET_RATIO,
            CollectionKind::Optimize => {
                price > budget * START_HERE_MAX_BUDGET_RATIO
                    && price <= budget * OPTIMIZE_MAX_BUDGET_RATIO
                    && scored.score >= OPTIMIZE_MIN_SCORE
            }
            CollectionKind::DeepDive => {
                price > budget * OPTIMIZE_MAX_BUDGET_RATIO || scored.score >= DEEP_DIVE_MIN_SCORE
            }
        }
    }
}

/// Named, score-ordered bucket of recommended products.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationCollection<'a> {
    pub kind: CollectionKind,
    pub title: &'static str,
    pub description: &'static str,
    pub products: Vec<ProductScore<'a>>,
}

impl<'a> RecommendationCollection<'a> {
    pub(super) fn fill(kind: CollectionKind, ranked: &[ProductScore<'a>], budget: f64) -> Self {
        let products = ranked
            .iter()
            .filter(|scored| kind.admits(scored, budget))
            .take(COLLECTION_SIZE)
            .cloned()
            .collect();

        Self {
            kind,
            title: kind.title(),
            description: kind.description(),
            products,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
