use serde::Serialize;

use crate::catalog::{Category, Goal, Product, StockStatus};
use crate::quiz::QuizAnswers;

pub const GOAL_MATCH_POINTS: f64 = 3.0;
pub const RELATED_GOAL_BONUS: f64 = 1.0;
pub const PRICE_FIT_POINTS: f64 = 1.0;
pub const WEARABLE_PENALTY: f64 = -2.0;
pub const BACKORDER_PENALTY: f64 = -2.0;
pub const OUT_OF_STOCK_PENALTY: f64 = -5.0;

const PRICE_FIT_LOWER: f64 = 0.7;
const PRICE_FIT_UPPER: f64 = 1.3;

/// Goals that earn partial credit when adjacent to a selected goal.
///
/// The match is exhaustive, so adding a `Goal` variant fails to compile until its
/// neighbours are declared here.
pub fn related_goals(goal: Goal) -> &'static [Goal] {
    match goal {
        Goal::Sleep => &[Goal::Recovery, Goal::Hrv],
        Goal::Hrv => &[Goal::Sleep, Goal::Recovery],
        Goal::Metabolic => &[Goal::Longevity],
        Goal::Cognitive => &[Goal::Longevity],
        Goal::Recovery => &[Goal::Sleep, Goal::Hrv],
        Goal::Longevity => &[Goal::Metabolic, Goal::Cognitive],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFactor {
    GoalMatch,
    RelatedGoal,
    PriceFit,
    WearablePreference,
    Popularity,
    Stock,
}

/// Single additive term of a product score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreComponent {
    pub factor: ScoreFactor,
    pub points: f64,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub total: f64,
    pub components: Vec<ScoreComponent>,
}

pub fn score_product(product: &Product, answers: &QuizAnswers) -> f64 {
    score_breakdown(product, answers).total
}

pub fn score_breakdown(product: &Product, answers: &QuizAnswers) -> ScoreBreakdown {
    let mut components = Vec::with_capacity(6);

    let goal_matches = product
        .goals
        .iter()
        .filter(|goal| answers.primary_goals.contains(goal))
        .count();
    components.push(ScoreComponent {
        factor: ScoreFactor::GoalMatch,
        points: goal_matches as f64 * GOAL_MATCH_POINTS,
        notes: format!("{goal_matches} selected goal(s) matched"),
    });

    let has_related_goal = product.goals.iter().any(|goal| {
        related_goals(*goal)
            .iter()
            .any(|related| answers.primary_goals.contains(related))
    });
    if has_related_goal {
        components.push(ScoreComponent {
            factor: ScoreFactor::RelatedGoal,
            points: RELATED_GOAL_BONUS,
            notes: "adjacent to a selected goal".to_string(),
        });
    }

    let lower = answers.budget * PRICE_FIT_LOWER;
    let upper = answers.budget * PRICE_FIT_UPPER;
    let price_fit = product.price >= lower && product.price <= upper;
    components.push(ScoreComponent {
        factor: ScoreFactor::PriceFit,
        points: if price_fit {
            PRICE_FIT_POINTS
        } else {
            -PRICE_FIT_POINTS
        },
        notes: format!(
            "price {:.2} {} budget window {:.2}-{:.2}",
            product.price,
            if price_fit { "inside" } else { "outside" },
            lower,
            upper
        ),
    });

    if !answers.prefers_wearables && product.category == Category::Wearables {
        components.push(ScoreComponent {
            factor: ScoreFactor::WearablePreference,
            points: WEARABLE_PENALTY,
            notes: "shopper prefers no wearables".to_string(),
        });
    }

    components.push(ScoreComponent {
        factor: ScoreFactor::Popularity,
        points: product.popularity / 100.0,
        notes: format!("popularity {}", product.popularity),
    });

    let stock_points = match product.stock_status {
        StockStatus::InStock => None,
        StockStatus::Backorder => Some(BACKORDER_PENALTY),
        StockStatus::OutOfStock => Some(OUT_OF_STOCK_PENALTY),
    };
    if let Some(points) = stock_points {
        components.push(ScoreComponent {
            factor: ScoreFactor::Stock,
            points,
            notes: product.stock_status.tag().to_string(),
        });
    }

    let total = components
        .iter()
        .fold(0.0, |total, component| total + component.points);

    ScoreBreakdown { total, components }
}
