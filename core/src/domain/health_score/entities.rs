use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Interpretation {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl Interpretation {
    /// Bands are closed at their lower bound: 80 is Excellent, 65 Good, 50 Fair
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Interpretation::Excellent
        } else if score >= 65.0 {
            Interpretation::Good
        } else if score >= 50.0 {
            Interpretation::Fair
        } else {
            Interpretation::Poor
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Interpretation::Excellent => "Excellent - Whole food, minimal processing",
            Interpretation::Good => "Good - Moderately processed",
            Interpretation::Fair => "Fair - Processed food, consume in moderation",
            Interpretation::Poor => "Poor - Ultra-processed, limit consumption",
        }
    }
}

/// Nutrient values per 100g used by the score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NutrientBreakdown {
    pub sugar: f64,
    pub saturated_fat: f64,
    pub salt: f64,
    pub fiber: f64,
    pub protein: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NutrientLevel {
    Low,
    Moderate,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NutrientLevels {
    pub sugar: NutrientLevel,
    pub salt: NutrientLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthAssessment {
    /// Between 0 and 100, one decimal
    pub score: f64,
    pub interpretation: Interpretation,
    pub summary: String,
    pub breakdown: NutrientBreakdown,
    pub nutrient_levels: NutrientLevels,
}
