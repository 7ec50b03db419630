//! Quiz question definitions and the answer record the wizard accumulates.

use serde::{Deserialize, Serialize};

use crate::catalog::Goal;

pub const MAX_PRIMARY_GOALS: usize = 3;
pub const DEFAULT_BUDGET: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Single,
    Multi,
    Slider,
    Toggle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizOption {
    pub id: &'static str,
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<Goal>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizQuestion {
    pub id: &'static str,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub title: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<QuizOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StimulantSensitivity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingStyle {
    Passive,
    Moderate,
    Active,
}

/// Answers collected by the quiz wizard and consumed by the recommendation generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizAnswers {
    #[serde(alias = "primaryGoals")]
    pub primary_goals: Vec<Goal>,
    #[serde(default = "default_budget")]
    pub budget: f64,
    #[serde(default, alias = "prefersWearables")]
    pub prefers_wearables: bool,
    #[serde(default, alias = "dietConstraints")]
    pub diet_constraints: Vec<String>,
    #[serde(
        default,
        alias = "stimulantSensitivity",
        skip_serializing_if = "Option::is_none"
    )]
    pub stimulant_sensitivity: Option<StimulantSensitivity>,
    #[serde(default, alias = "trackingStyle", skip_serializing_if = "Option::is_none")]
    pub tracking_style: Option<TrackingStyle>,
}

fn default_budget() -> f64 {
    DEFAULT_BUDGET
}

impl QuizAnswers {
    pub fn new(primary_goals: Vec<Goal>, budget: f64, prefers_wearables: bool) -> Self {
        Self {
            primary_goals,
            budget,
            prefers_wearables,
            diet_constraints: Vec::new(),
            stimulant_sensitivity: None,
            tracking_style: None,
        }
    }

    pub fn validate(&self) -> Result<(), QuizError> {
        match self.primary_goals.len() {
            0 => return Err(QuizError::NoGoals),
            n if n > MAX_PRIMARY_GOALS => return Err(QuizError::TooManyGoals(n)),
            _ => {}
        }

        if !self.budget.is_finite() || self.budget <= 0.0 {
            return Err(QuizError::InvalidBudget(self.budget));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QuizError {
    #[error("select at least one primary goal")]
    NoGoals,
    #[error("select at most 3 primary goals (got {0})")]
    TooManyGoals(usize),
    #[error("budget must be a positive amount (got {0})")]
    InvalidBudget(f64),
}

fn goal_option(id: &'static str, label: &'static str, goal: Goal) -> QuizOption {
    QuizOption {
        id,
        label,
        value: None,
        goal: Some(goal),
    }
}

fn value_option(id: &'static str, label: &'static str) -> QuizOption {
    QuizOption {
        id,
        label,
        value: Some(id),
        goal: None,
    }
}

/// Fixed, ordered question set shown by the quiz wizard.
pub fn questions() -> Vec<QuizQuestion> {
    vec![
        QuizQuestion {
            id: "goals",
            kind: QuestionType::Multi,
            title: "What are your primary longevity goals?",
            subtitle: Some("Select up to 3 areas you'd like to optimize"),
            options: vec![
                goal_option("sleep", "Better Sleep Quality", Goal::Sleep),
                goal_option("hrv", "Heart Rate Variability", Goal::Hrv),
                goal_option("metabolic", "Metabolic Health", Goal::Metabolic),
                goal_option("cognitive", "Cognitive Performance", Goal::Cognitive),
                goal_option("recovery", "Recovery & Performance", Goal::Recovery),
                goal_option("longevity", "General Longevity", Goal::Longevity),
            ],
            min: None,
            max: None,
            step: None,
            unit: None,
        },
        QuizQuestion {
            id: "budget",
            kind: QuestionType::Slider,
            title: "What's your budget per product?",
            subtitle: Some("This helps us recommend items in your price range"),
            options: Vec::new(),
            min: Some(20.0),
            max: Some(500.0),
            step: Some(10.0),
            unit: Some("USD"),
        },
        QuizQuestion {
            id: "wearables",
            kind: QuestionType::Toggle,
            title: "Are you open to wearing devices?",
            subtitle: Some("Some tracking requires wearables like rings, watches, or bands"),
            options: Vec::new(),
            min: None,
            max: None,
            step: None,
            unit: None,
        },
        QuizQuestion {
            id: "diet",
            kind: QuestionType::Multi,
            title: "Do you have any dietary preferences?",
            subtitle: Some("Select all that apply"),
            options: vec![
                value_option("none", "No restrictions"),
                value_option("vegan", "Vegan"),
                value_option("vegetarian", "Vegetarian"),
                value_option("keto", "Keto"),
                value_option("paleo", "Paleo"),
            ],
            min: None,
            max: None,
            step: None,
            unit: None,
        },
        QuizQuestion {
            id: "stimulants",
            kind: QuestionType::Single,
            title: "How sensitive are you to stimulants?",
            subtitle: Some("This helps us recommend appropriate supplements"),
            options: vec![
                value_option("low", "Not sensitive - I handle caffeine well"),
                value_option("medium", "Moderately sensitive"),
                value_option("high", "Very sensitive - I avoid caffeine"),
            ],
            min: None,
            max: None,
            step: None,
            unit: None,
        },
        QuizQuestion {
            id: "tracking",
            kind: QuestionType::Single,
            title: "What's your tracking style?",
            subtitle: Some("How hands-on do you want to be?"),
            options: vec![
                value_option("passive", "Passive - set it and forget it"),
                value_option("moderate", "Moderate - check occasionally"),
                value_option("active", "Active - I love data and optimization"),
            ],
            min: None,
            max: None,
            step: None,
            unit: None,
        },
    ]
}
